//! Session-to-screen translation layer.
//!
//! The [`Bridge`] wraps the sans-IO [`ChatSession`] and adapts it to the
//! screen lifecycle.
//!
//! # Responsibilities
//!
//! - Converts [`crate::ScreenAction`] into session events.
//! - Accumulates outgoing [`ClientFrame`]s for the driver to flush on the
//!   next I/O cycle, and records transport open/close requests.
//! - Interprets session actions and converts them back into
//!   [`crate::ScreenEvent`]s to update the screen.

use huddle_client::{
    ChatSession, ConnectConfig, Counterpart, CredentialStore, SessionAction, SessionEvent,
};
use huddle_proto::{ClientFrame, ServerFrame};

use crate::{BookingParties, ScreenAction, ScreenEvent};

/// Request to open the realtime transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectRequest {
    /// Bearer token for the connection, if any.
    pub token: Option<String>,
    /// Transport retry policy.
    pub config: ConnectConfig,
}

/// Bridge between screen and session logic.
pub struct Bridge<S> {
    session: ChatSession<S>,
    outgoing: Vec<ClientFrame>,
    pending_connect: Option<ConnectRequest>,
    close_requested: bool,
}

impl<S: CredentialStore> Bridge<S> {
    /// Create a bridge around the given session.
    pub fn new(session: ChatSession<S>) -> Self {
        Self { session, outgoing: Vec::new(), pending_connect: None, close_requested: false }
    }

    /// The wrapped session; the single source of truth for the message log.
    pub fn session(&self) -> &ChatSession<S> {
        &self.session
    }

    /// Process a screen action and return resulting screen events.
    pub fn process_screen_action(&mut self, action: ScreenAction) -> Vec<ScreenEvent> {
        match action {
            ScreenAction::Connect => {
                let actions = self.session.handle(SessionEvent::Connect);
                self.process_session_actions(actions)
            },
            ScreenAction::Join { booking_id } => {
                let actions = self.session.handle(SessionEvent::JoinRoom { booking_id });
                self.process_session_actions(actions)
            },
            ScreenAction::Send { booking_id, text } => {
                let actions = self
                    .session
                    .handle(SessionEvent::SendMessage { booking_id, content: text });
                self.process_session_actions(actions)
            },
            ScreenAction::MarkRead { message_id } => {
                let _ = self.session.mark_read(&message_id);
                vec![]
            },
            ScreenAction::Teardown => {
                let actions = self.session.handle(SessionEvent::Teardown);
                self.process_session_actions(actions)
            },
            // Executed by the runtime, not the session.
            ScreenAction::Render | ScreenAction::FetchCounterpart { .. } => vec![],
        }
    }

    /// Handle a frame from the server.
    pub fn handle_frame(&mut self, frame: ServerFrame) -> Vec<ScreenEvent> {
        let actions = self.session.handle(SessionEvent::FrameReceived(frame));
        self.process_session_actions(actions)
    }

    /// Report the transport as established.
    pub fn connect_established(&mut self) -> Vec<ScreenEvent> {
        let actions = self.session.handle(SessionEvent::TransportConnected);
        let mut events = self.process_session_actions(actions);
        events.push(ScreenEvent::ConnectResolved);
        events
    }

    /// Report a transport failure.
    pub fn connect_failed(&mut self, reason: String) -> Vec<ScreenEvent> {
        let actions = self.session.handle(SessionEvent::TransportFailed { reason });
        self.process_session_actions(actions)
    }

    /// Resolve the counterpart from fetched booking parties.
    ///
    /// Picks whichever party is not the current user and threads the
    /// identity into the session for display-name resolution.
    pub fn resolve_counterpart(&mut self, parties: &BookingParties) -> Vec<ScreenEvent> {
        let profile = parties.counterpart_of(self.session.current_user_id());
        let counterpart = Counterpart::from_profile(profile, self.session.labels());
        let actions = self.session.handle(SessionEvent::CounterpartResolved(counterpart));
        let mut events = self.process_session_actions(actions);
        events.push(ScreenEvent::CounterpartResolved);
        events
    }

    /// Take pending outgoing frames.
    pub fn take_outgoing(&mut self) -> Vec<ClientFrame> {
        std::mem::take(&mut self.outgoing)
    }

    /// Take a pending transport open request, if any.
    pub fn take_connect_request(&mut self) -> Option<ConnectRequest> {
        self.pending_connect.take()
    }

    /// Take a pending transport close request.
    pub fn take_close_request(&mut self) -> bool {
        std::mem::take(&mut self.close_requested)
    }

    fn process_session_actions(&mut self, actions: Vec<SessionAction>) -> Vec<ScreenEvent> {
        let mut events = Vec::new();

        for action in actions {
            match action {
                SessionAction::OpenTransport { token, config } => {
                    self.pending_connect = Some(ConnectRequest { token, config });
                },
                SessionAction::Send(frame) => {
                    self.outgoing.push(frame);
                },
                SessionAction::HistoryApplied { count } => {
                    events.push(ScreenEvent::HistoryLoaded { count });
                },
                SessionAction::MessageAppended { id } => {
                    events.push(ScreenEvent::MessageArrived { id });
                },
                SessionAction::SurfaceError { message } => {
                    events.push(ScreenEvent::ServerError { message });
                },
                SessionAction::CloseTransport => {
                    self.close_requested = true;
                },
            }
        }

        events
    }
}
