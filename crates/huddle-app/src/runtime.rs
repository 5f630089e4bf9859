//! Generic runtime for screen orchestration.
//!
//! The Runtime drives the chat screen event loop, coordinating between:
//! - [`ChatScreen`]: screen lifecycle state machine
//! - [`Bridge`]: translation to the session core
//! - [`Driver`]: platform-specific I/O
//! - [`BookingDirectory`]: counterpart resolution

use huddle_client::{ChatSession, CredentialStore};

use crate::{
    Bridge, BookingDirectory, ChatScreen, ChatView, Driver, ScreenAction, ScreenEvent,
};

/// Generic runtime that orchestrates screen, bridge, driver, and directory.
///
/// # Type Parameters
///
/// - `D`: Platform-specific I/O driver
/// - `S`: Credential store backing the session
/// - `B`: Booking-details collaborator
pub struct Runtime<D, S, B> {
    driver: D,
    screen: ChatScreen,
    bridge: Bridge<S>,
    directory: B,
}

impl<D, S, B> Runtime<D, S, B>
where
    D: Driver,
    S: CredentialStore + Send,
    B: BookingDirectory,
{
    /// Create a runtime around the given driver, session, and directory.
    pub fn new(driver: D, session: ChatSession<S>, directory: B) -> Self {
        Self { driver, screen: ChatScreen::new(), bridge: Bridge::new(session), directory }
    }

    /// Run the screen lifecycle for one booking until unmount.
    ///
    /// This is the core orchestration loop that:
    /// 1. Mounts the screen and opens the connection
    /// 2. Polls for screen events from the driver
    /// 3. Receives frames from the server
    /// 4. Processes actions and events between screen and bridge
    ///
    /// # Errors
    ///
    /// Returns an error if the driver encounters an I/O error.
    pub async fn run(&mut self, booking_id: String) -> Result<(), D::Error> {
        let actions = self.screen.handle(ScreenEvent::Mounted { booking_id });
        self.process_actions(actions).await?;

        while !self.screen.is_torn_down() {
            self.process_cycle().await?;
        }

        self.driver.stop();
        Ok(())
    }

    /// Process one cycle of the event loop.
    async fn process_cycle(&mut self) -> Result<(), D::Error> {
        if let Some(event) = self.driver.poll_event().await? {
            let actions = self.screen.handle(event);
            self.process_actions(actions).await?;
            if self.screen.is_torn_down() {
                return Ok(());
            }
        }

        if self.driver.is_connected()
            && let Some(frame) = self.driver.recv_frame().await
        {
            let events = self.bridge.handle_frame(frame);
            self.process_screen_events(events).await?;
        }

        Ok(())
    }

    /// Process actions returned by the screen.
    async fn process_actions(&mut self, initial_actions: Vec<ScreenAction>) -> Result<(), D::Error> {
        let mut pending_actions = initial_actions;

        while !pending_actions.is_empty() {
            let actions = std::mem::take(&mut pending_actions);

            for action in actions {
                match action {
                    ScreenAction::Render => self.render()?,
                    ScreenAction::Connect => {
                        let mut events = self.bridge.process_screen_action(ScreenAction::Connect);
                        if let Some(request) = self.bridge.take_connect_request() {
                            match self.driver.connect(&request).await {
                                Ok(()) => events.extend(self.bridge.connect_established()),
                                Err(e) => {
                                    tracing::error!(error = %e, "transport connect failed");
                                    events.extend(self.bridge.connect_failed(e.to_string()));
                                },
                            }
                        }
                        for event in events {
                            pending_actions.extend(self.screen.handle(event));
                        }
                    },
                    ScreenAction::FetchCounterpart { booking_id } => {
                        let events = match self.directory.booking_parties(&booking_id).await {
                            // The fetch may resolve after unmount; never commit then.
                            Ok(parties) if !self.screen.is_torn_down() => {
                                self.bridge.resolve_counterpart(&parties)
                            },
                            Ok(_) => vec![],
                            Err(e) => {
                                vec![ScreenEvent::CounterpartUnavailable { reason: e.to_string() }]
                            },
                        };
                        for event in events {
                            pending_actions.extend(self.screen.handle(event));
                        }
                    },

                    // Session operations go through the bridge.
                    action @ (ScreenAction::Join { .. }
                    | ScreenAction::Send { .. }
                    | ScreenAction::MarkRead { .. }
                    | ScreenAction::Teardown) => {
                        let events = self.bridge.process_screen_action(action);
                        if self.bridge.take_close_request() {
                            self.driver.stop();
                        }
                        for event in events {
                            pending_actions.extend(self.screen.handle(event));
                        }
                    },
                }
            }

            self.flush_outgoing().await?;
        }
        Ok(())
    }

    /// Process events from the bridge back into the screen.
    async fn process_screen_events(&mut self, events: Vec<ScreenEvent>) -> Result<(), D::Error> {
        for event in events {
            let actions = self.screen.handle(event);
            self.process_actions(actions).await?;
        }
        Ok(())
    }

    /// Send all pending outgoing frames to the server.
    async fn flush_outgoing(&mut self) -> Result<(), D::Error> {
        for frame in self.bridge.take_outgoing() {
            self.driver.send_frame(frame).await?;
        }
        Ok(())
    }

    fn render(&mut self) -> Result<(), D::Error> {
        let session = self.bridge.session();
        let view = ChatView {
            screen: &self.screen,
            messages: session.messages(),
            counterpart: session.counterpart(),
            loading: session.loading(),
        };
        self.driver.render(&view)
    }

    /// The screen state machine.
    pub fn screen(&self) -> &ChatScreen {
        &self.screen
    }

    /// The bridge, including the wrapped session.
    pub fn bridge(&self) -> &Bridge<S> {
        &self.bridge
    }
}
