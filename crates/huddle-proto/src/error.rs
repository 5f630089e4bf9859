//! Protocol error types.
//!
//! Strongly-typed errors for frame encoding and decoding. We avoid exposing
//! `serde_json::Error` directly so callers can match on the failure direction
//! without knowing the serialization backend.

use thiserror::Error;

/// Errors produced while encoding or decoding wire frames.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Frame could not be serialized to JSON.
    #[error("frame encode failed: {0}")]
    Encode(#[source] serde_json::Error),

    /// Inbound text could not be parsed as a known frame.
    #[error("frame decode failed: {0}")]
    Decode(#[source] serde_json::Error),
}
