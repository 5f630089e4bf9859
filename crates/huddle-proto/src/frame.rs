//! Event frames exchanged with the chat server.
//!
//! One JSON object per transport text message, shaped
//! `{"event": <name>, "data": <payload>}`. Event names and payload fields
//! follow the server's camelCase convention.

use serde::{Deserialize, Serialize};

use crate::{ProtocolError, WireMessage};

/// Frames sent from client to server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ClientFrame {
    /// Subscribe to a booking's conversation channel.
    #[serde(rename_all = "camelCase")]
    JoinRoom {
        /// Booking id acting as the room key.
        booking_id: String,
    },

    /// Post a new message to a booking's conversation.
    #[serde(rename_all = "camelCase")]
    SendMessage {
        /// Booking id acting as the room key.
        booking_id: String,
        /// Message body text.
        content: String,
    },

    /// Subscribe to the notification side-channel.
    SubscribeToNotifications,
}

impl ClientFrame {
    /// Encode this frame as a JSON text message.
    pub fn encode(&self) -> Result<String, ProtocolError> {
        serde_json::to_string(self).map_err(ProtocolError::Encode)
    }

    /// Decode a JSON text message into a client frame.
    ///
    /// Used by test fixtures and simulated servers; production clients only
    /// encode this direction.
    pub fn decode(text: &str) -> Result<Self, ProtocolError> {
        serde_json::from_str(text).map_err(ProtocolError::Decode)
    }
}

/// Frames pushed from server to client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ServerFrame {
    /// Full backlog for the joined room, oldest first.
    ChatHistory(Vec<WireMessage>),

    /// One new message, including echoes of the client's own sends.
    ReceiveMessage(WireMessage),

    /// Transport-level error notice.
    Error(String),
}

impl ServerFrame {
    /// Decode a JSON text message into a server frame.
    pub fn decode(text: &str) -> Result<Self, ProtocolError> {
        serde_json::from_str(text).map_err(ProtocolError::Decode)
    }

    /// Encode this frame as a JSON text message.
    ///
    /// Used by test fixtures and simulated servers.
    pub fn encode(&self) -> Result<String, ProtocolError> {
        serde_json::to_string(self).map_err(ProtocolError::Encode)
    }
}
