//! Wire protocol for the Huddle realtime chat channel.
//!
//! Defines the JSON event frames exchanged with the chat server and the raw
//! wire message shape, prior to any normalization. Protocol logic lives in
//! `huddle-client`; this crate is types and codec only.

mod error;
mod frame;
mod message;

pub use error::ProtocolError;
pub use frame::{ClientFrame, ServerFrame};
pub use message::{PartyProfile, PartyRef, WireMessage};
