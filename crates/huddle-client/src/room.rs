//! Booking-room membership and outbound dispatch guards.
//!
//! Room membership is an explicit value: at most one booking is joined at a
//! time, and joining a different booking requires leaving first. This keeps
//! two rooms from sharing one connection and receiving each other's events.
//!
//! The wire protocol has no leave event, so [`RoomSession::leave`] is
//! client-local; only a full disconnect severs membership server-side.

use huddle_proto::ClientFrame;

use crate::{connection::Connection, error::SessionError};

/// Membership in a booking-scoped conversation channel.
#[derive(Debug, Clone, Default)]
pub struct RoomSession {
    current: Option<String>,
}

impl RoomSession {
    /// Create a session with no room joined.
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently joined booking id, if any.
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Join a booking's conversation channel.
    ///
    /// Preconditions: the transport must be fully established (a connection
    /// still opening refuses the join), and no *different* booking may
    /// currently be joined. Re-joining the same booking re-emits the join
    /// frame. Returns the frame to emit.
    pub fn join(
        &mut self,
        connection: Option<&Connection>,
        booking_id: &str,
    ) -> Result<ClientFrame, SessionError> {
        if booking_id.is_empty() {
            return Err(SessionError::MissingBookingId);
        }
        if !connection.is_some_and(Connection::is_connected) {
            return Err(SessionError::NotConnected { operation: "joinRoom" });
        }
        if let Some(joined) = self.current.as_deref()
            && joined != booking_id
        {
            return Err(SessionError::RoomBusy {
                joined: joined.to_string(),
                requested: booking_id.to_string(),
            });
        }

        self.current = Some(booking_id.to_string());
        Ok(ClientFrame::JoinRoom { booking_id: booking_id.to_string() })
    }

    /// Leave the current room, if any. Client-local only.
    pub fn leave(&mut self) {
        if let Some(booking_id) = self.current.take() {
            tracing::debug!(%booking_id, "left room");
        }
    }

    /// Post a message to a booking's conversation.
    ///
    /// Guards: established connection, non-empty booking id, non-whitespace
    /// content. No optimistic local insert happens anywhere; the log only
    /// grows when the server echoes the message back.
    pub fn send(
        &self,
        connection: Option<&Connection>,
        booking_id: &str,
        content: &str,
    ) -> Result<ClientFrame, SessionError> {
        if booking_id.is_empty() {
            return Err(SessionError::MissingBookingId);
        }
        if content.trim().is_empty() {
            return Err(SessionError::EmptyMessage);
        }
        if !connection.is_some_and(Connection::is_connected) {
            return Err(SessionError::NotConnected { operation: "sendMessage" });
        }

        Ok(ClientFrame::SendMessage {
            booking_id: booking_id.to_string(),
            content: content.to_string(),
        })
    }
}
