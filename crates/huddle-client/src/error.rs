//! Error types for the chat session core.
//!
//! Failures in this subsystem never propagate into the render path. Room and
//! dispatch operations return [`SessionError`] so callers can see why an
//! operation was refused, but the composed [`crate::ChatSession`] downgrades
//! every one of them to a logged no-op, per the session contract.

use thiserror::Error;

/// Errors reading from the persistent credential store.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CredentialError {
    /// Underlying key-value storage failed.
    #[error("credential storage read failed: {0}")]
    Storage(String),

    /// Stored value exists but could not be parsed.
    #[error("stored credential is malformed: {0}")]
    Malformed(String),
}

/// Reasons a room or dispatch operation was refused.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionError {
    /// Operation requires an established connection.
    #[error("no active connection for {operation}")]
    NotConnected {
        /// Operation that was attempted.
        operation: &'static str,
    },

    /// A different room is already joined; leave it first.
    #[error("already joined room {joined}, refusing join of {requested}")]
    RoomBusy {
        /// Currently joined booking id.
        joined: String,
        /// Booking id whose join was refused.
        requested: String,
    },

    /// Outbound message was empty or whitespace-only.
    #[error("refusing to send empty message")]
    EmptyMessage,

    /// No booking id was supplied for the operation.
    #[error("missing booking id")]
    MissingBookingId,
}
