//! Session events and actions.
//!
//! The caller is responsible for:
//! - Opening and closing the transport in response to actions
//! - Feeding inbound frames back as [`SessionEvent::FrameReceived`]
//! - Forwarding application intents (connect, join, send, teardown)

use huddle_proto::{ClientFrame, ServerFrame};

use crate::{
    connection::ConnectConfig,
    state::Counterpart,
};

/// Events the caller feeds into the session.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// Application wants the shared connection open.
    Connect,

    /// Transport reported the connection established.
    TransportConnected,

    /// Transport reported a connection failure.
    TransportFailed {
        /// Failure description.
        reason: String,
    },

    /// Application wants to join a booking's conversation.
    JoinRoom {
        /// Booking id acting as the room key.
        booking_id: String,
    },

    /// Application wants to leave the current room.
    LeaveRoom,

    /// Application wants to post a message.
    SendMessage {
        /// Booking id acting as the room key.
        booking_id: String,
        /// Message body text.
        content: String,
    },

    /// Frame pushed by the server.
    FrameReceived(ServerFrame),

    /// The booking's counterpart identity resolved.
    CounterpartResolved(Counterpart),

    /// Screen unmounted; release everything.
    Teardown,
}

/// Actions the session produces for the caller to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionAction {
    /// Open the realtime transport.
    OpenTransport {
        /// Bearer token for the connection, if any.
        token: Option<String>,
        /// Transport retry policy.
        config: ConnectConfig,
    },

    /// Send a frame to the server.
    Send(ClientFrame),

    /// The message log was replaced by a history payload.
    HistoryApplied {
        /// Number of messages now in the log.
        count: usize,
    },

    /// One message was appended to the log.
    MessageAppended {
        /// Id of the appended message.
        id: String,
    },

    /// A server-pushed error should be surfaced to the user.
    SurfaceError {
        /// Error description.
        message: String,
    },

    /// Close the realtime transport.
    CloseTransport,
}
