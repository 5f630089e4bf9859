//! Chat screen state machine.
//!
//! Tracks the per-screen lifecycle from mount to teardown. The message log
//! itself lives in the session (single source of truth); the screen owns only
//! presentation state: lifecycle phase, the bound booking, and the error
//! banner.
//!
//! This is a pure state machine: it consumes [`ScreenEvent`] inputs and
//! produces [`ScreenAction`] instructions for the runtime to execute.

use crate::{ScreenAction, ScreenEvent};

/// Lifecycle of a mounted chat screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lifecycle {
    /// Created, not yet mounted.
    Uninitialized,
    /// Mounted, connection opening.
    Connecting,
    /// Connected, join emitted or pending.
    Joining,
    /// Receiving room events.
    Subscribed,
    /// Unmounted. Terminal; all further events are ignored.
    TornDown,
}

/// Screen state machine for one chat screen instance.
///
/// Pure state machine that processes events and produces actions.
/// No I/O dependencies; fully testable in isolation.
#[derive(Debug, Clone)]
pub struct ChatScreen {
    lifecycle: Lifecycle,
    booking_id: Option<String>,
    error_banner: Option<String>,
}

impl ChatScreen {
    /// Create an unmounted screen.
    pub fn new() -> Self {
        Self { lifecycle: Lifecycle::Uninitialized, booking_id: None, error_banner: None }
    }

    /// Process an event and return actions.
    ///
    /// Teardown is reached exactly once; afterwards every event is ignored
    /// and produces no actions.
    pub fn handle(&mut self, event: ScreenEvent) -> Vec<ScreenAction> {
        if self.lifecycle == Lifecycle::TornDown {
            tracing::debug!(?event, "event ignored after teardown");
            return vec![];
        }

        match event {
            ScreenEvent::Mounted { booking_id } => self.handle_mounted(booking_id),
            ScreenEvent::ConnectResolved => self.handle_connect_resolved(),
            ScreenEvent::CounterpartResolved => vec![ScreenAction::Render],
            ScreenEvent::CounterpartUnavailable { reason } => {
                tracing::warn!(%reason, "counterpart unresolved, using placeholder names");
                vec![ScreenAction::Render]
            },
            ScreenEvent::HistoryLoaded { count } => {
                tracing::debug!(count, "history applied");
                if self.lifecycle == Lifecycle::Joining {
                    self.lifecycle = Lifecycle::Subscribed;
                }
                vec![ScreenAction::Render]
            },
            ScreenEvent::MessageArrived { .. } => vec![ScreenAction::Render],
            ScreenEvent::ServerError { message } => {
                self.error_banner = Some(message);
                vec![ScreenAction::Render]
            },
            ScreenEvent::SendPressed { text } => self.handle_send_pressed(text),
            ScreenEvent::MarkReadPressed { message_id } => {
                vec![ScreenAction::MarkRead { message_id }, ScreenAction::Render]
            },
            ScreenEvent::Unmounted => {
                self.lifecycle = Lifecycle::TornDown;
                vec![ScreenAction::Teardown]
            },
        }
    }

    fn handle_mounted(&mut self, booking_id: String) -> Vec<ScreenAction> {
        if self.lifecycle != Lifecycle::Uninitialized {
            tracing::warn!("duplicate mount ignored");
            return vec![];
        }
        self.lifecycle = Lifecycle::Connecting;
        self.booking_id = Some(booking_id.clone());
        vec![
            ScreenAction::Connect,
            ScreenAction::FetchCounterpart { booking_id },
            ScreenAction::Render,
        ]
    }

    fn handle_connect_resolved(&mut self) -> Vec<ScreenAction> {
        let Some(booking_id) = self.booking_id.clone() else {
            tracing::warn!("connect resolved before mount");
            return vec![];
        };
        if self.lifecycle == Lifecycle::Connecting {
            self.lifecycle = Lifecycle::Joining;
        }
        vec![ScreenAction::Join { booking_id }, ScreenAction::Render]
    }

    fn handle_send_pressed(&mut self, text: String) -> Vec<ScreenAction> {
        match self.booking_id.clone() {
            Some(booking_id) => vec![ScreenAction::Send { booking_id, text }],
            None => {
                tracing::warn!("send pressed before mount");
                vec![]
            },
        }
    }

    /// Current lifecycle phase.
    pub fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    /// Booking this screen is bound to. `None` before mount.
    pub fn booking_id(&self) -> Option<&str> {
        self.booking_id.as_deref()
    }

    /// Error banner text, if an error should be shown.
    pub fn error_banner(&self) -> Option<&str> {
        self.error_banner.as_deref()
    }

    /// Dismiss the error banner.
    pub fn dismiss_error(&mut self) {
        self.error_banner = None;
    }

    /// Whether the screen has been torn down.
    pub fn is_torn_down(&self) -> bool {
        self.lifecycle == Lifecycle::TornDown
    }
}

impl Default for ChatScreen {
    fn default() -> Self {
        Self::new()
    }
}
