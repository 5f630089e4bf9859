//! Chat session state machine.
//!
//! [`ChatSession`] composes the connection manager, room session, and codec
//! into the top-level state machine for one booking conversation. It owns the
//! ordered message log (insertion order equals arrival order) and is the
//! single source of truth rendered by the view.

use chrono::Utc;
use huddle_proto::{ServerFrame, WireMessage};

use crate::{
    codec::{self, MessageIdSeq},
    connection::{ConnectConfig, ConnectionManager, CredentialStore},
    event::{SessionAction, SessionEvent},
    room::RoomSession,
    state::{ChatMessage, Counterpart, Labels, MessageStatus, SessionPhase},
};

/// Session state machine for one booking conversation.
///
/// Pure state machine apart from clock reads for fallback timestamps: it
/// consumes [`SessionEvent`] inputs and produces [`SessionAction`]
/// instructions for the runtime to execute. Owned by one screen at a time and
/// discarded on unmount.
pub struct ChatSession<S> {
    store: S,
    labels: Labels,
    connection: ConnectionManager,
    room: RoomSession,
    phase: SessionPhase,
    /// Current-user id snapshot, captured once at session start.
    me: Option<String>,
    identity_captured: bool,
    counterpart: Option<Counterpart>,
    messages: Vec<ChatMessage>,
    /// Incremental messages that arrived before the first history payload.
    pending: Vec<WireMessage>,
    history_applied: bool,
    loading: bool,
    ids: MessageIdSeq,
}

impl<S: CredentialStore> ChatSession<S> {
    /// Create a session backed by the given credential store.
    pub fn new(store: S, config: ConnectConfig, labels: Labels) -> Self {
        Self {
            store,
            labels,
            connection: ConnectionManager::new(config),
            room: RoomSession::new(),
            phase: SessionPhase::Idle,
            me: None,
            identity_captured: false,
            counterpart: None,
            messages: Vec::new(),
            pending: Vec::new(),
            history_applied: false,
            loading: true,
            ids: MessageIdSeq::new(),
        }
    }

    /// Process an event and return resulting actions.
    ///
    /// After teardown every event is ignored and produces no actions.
    pub fn handle(&mut self, event: SessionEvent) -> Vec<SessionAction> {
        if self.phase == SessionPhase::TornDown {
            tracing::debug!(?event, "event ignored after teardown");
            return vec![];
        }

        match event {
            SessionEvent::Connect => self.handle_connect(),
            SessionEvent::TransportConnected => self.handle_transport_connected(),
            SessionEvent::TransportFailed { reason } => self.handle_transport_failed(reason),
            SessionEvent::JoinRoom { booking_id } => self.handle_join(&booking_id),
            SessionEvent::LeaveRoom => self.handle_leave(),
            SessionEvent::SendMessage { booking_id, content } => {
                self.handle_send(&booking_id, &content)
            },
            SessionEvent::FrameReceived(frame) => self.handle_frame(frame),
            SessionEvent::CounterpartResolved(counterpart) => {
                self.counterpart = Some(counterpart);
                vec![]
            },
            SessionEvent::Teardown => self.handle_teardown(),
        }
    }

    fn handle_connect(&mut self) -> Vec<SessionAction> {
        let (connection, opened) = self.connection.connect(&self.store);
        if !opened {
            // Live connection reused; no re-authentication, no new transport.
            return vec![];
        }

        let token = connection.token().map(str::to_string);
        let config = self.connection.config().clone();

        if !self.identity_captured {
            self.identity_captured = true;
            self.me = match self.store.current_user() {
                Ok(Some(profile)) => Some(profile.id),
                Ok(None) => {
                    tracing::warn!("no stored user profile, own messages will not be marked");
                    None
                },
                Err(e) => {
                    tracing::warn!(error = %e, "user profile read failed");
                    None
                },
            };
        }

        self.phase = SessionPhase::Connecting;
        vec![SessionAction::OpenTransport { token, config }]
    }

    fn handle_transport_connected(&mut self) -> Vec<SessionAction> {
        self.connection.mark_connected();
        if self.phase == SessionPhase::Connecting {
            self.phase = SessionPhase::Joining;
        }
        vec![]
    }

    fn handle_transport_failed(&mut self, reason: String) -> Vec<SessionAction> {
        self.connection.mark_error(&reason);
        self.loading = false;
        self.phase = SessionPhase::Failed { reason: reason.clone() };
        vec![SessionAction::SurfaceError { message: reason }]
    }

    fn handle_join(&mut self, booking_id: &str) -> Vec<SessionAction> {
        match self.room.join(self.connection.current(), booking_id) {
            Ok(frame) => {
                self.phase = SessionPhase::Subscribed;
                vec![SessionAction::Send(frame)]
            },
            Err(e) => {
                tracing::error!(error = %e, %booking_id, "join refused");
                vec![]
            },
        }
    }

    fn handle_leave(&mut self) -> Vec<SessionAction> {
        self.room.leave();
        // A later join gets a fresh backlog for its own room.
        self.messages.clear();
        self.pending.clear();
        self.history_applied = false;
        self.counterpart = None;
        self.loading = true;
        if self.phase == SessionPhase::Subscribed {
            self.phase = SessionPhase::Joining;
        }
        vec![]
    }

    fn handle_send(&mut self, booking_id: &str, content: &str) -> Vec<SessionAction> {
        match self.room.send(self.connection.current(), booking_id, content) {
            Ok(frame) => vec![SessionAction::Send(frame)],
            Err(e) => {
                tracing::warn!(error = %e, "send skipped");
                vec![]
            },
        }
    }

    fn handle_frame(&mut self, frame: ServerFrame) -> Vec<SessionAction> {
        match frame {
            ServerFrame::ChatHistory(history) => {
                self.messages = history.iter().map(|wire| self.normalize(wire)).collect();
                self.history_applied = true;
                self.loading = false;

                let buffered = std::mem::take(&mut self.pending);
                for wire in &buffered {
                    let message = self.normalize(wire);
                    self.messages.push(message);
                }

                vec![SessionAction::HistoryApplied { count: self.messages.len() }]
            },
            ServerFrame::ReceiveMessage(wire) => {
                if !self.history_applied {
                    // History must land first; hold incrementals until it does.
                    self.pending.push(wire);
                    return vec![];
                }
                let message = self.normalize(&wire);
                let id = message.id.clone();
                self.messages.push(message);
                vec![SessionAction::MessageAppended { id }]
            },
            ServerFrame::Error(message) => {
                tracing::warn!(%message, "server error frame");
                vec![SessionAction::SurfaceError { message }]
            },
        }
    }

    fn handle_teardown(&mut self) -> Vec<SessionAction> {
        self.phase = SessionPhase::TornDown;
        self.connection.disconnect();
        vec![SessionAction::CloseTransport]
    }

    fn normalize(&mut self, wire: &WireMessage) -> ChatMessage {
        codec::normalize(
            wire,
            self.me.as_deref(),
            self.counterpart.as_ref(),
            &self.labels,
            &mut self.ids,
            Utc::now(),
        )
    }

    /// Mark one message as read. Returns whether a message changed.
    ///
    /// This is the explicit hook for read receipts; nothing in the session
    /// triggers it implicitly.
    pub fn mark_read(&mut self, message_id: &str) -> bool {
        if self.phase == SessionPhase::TornDown {
            return false;
        }
        match self.messages.iter_mut().find(|m| m.id == message_id) {
            Some(message) if message.status == MessageStatus::Unread => {
                message.status = MessageStatus::Read;
                true
            },
            _ => false,
        }
    }

    /// The ordered message log, arrival order.
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// True until the first history payload or failure.
    pub fn loading(&self) -> bool {
        self.loading
    }

    /// Current session phase.
    pub fn phase(&self) -> &SessionPhase {
        &self.phase
    }

    /// Resolved counterpart identity, if available.
    pub fn counterpart(&self) -> Option<&Counterpart> {
        self.counterpart.as_ref()
    }

    /// Currently joined booking id, if any.
    pub fn current_room(&self) -> Option<&str> {
        self.room.current()
    }

    /// Current-user id snapshot captured at session start.
    pub fn current_user_id(&self) -> Option<&str> {
        self.me.as_deref()
    }

    /// Display labels this session normalizes with.
    pub fn labels(&self) -> &Labels {
        &self.labels
    }
}
