//! Sans-IO chat session core for Huddle.
//!
//! The [`ChatSession`] is a pure state machine: it consumes [`SessionEvent`]
//! inputs and produces [`SessionAction`] instructions for a runtime to
//! execute. No sockets, timers, or storage are touched here, which keeps the
//! connect/join/teardown lifecycle fully testable without a server.
//!
//! # Components
//!
//! - [`ConnectionManager`]: the single shared realtime connection handle
//! - [`RoomSession`]: explicit booking-room membership and outbound guards
//! - [`codec`]: wire-to-local message normalization
//! - [`ChatSession`]: the composed session state machine
//! - [`transport`] (feature `transport`): WebSocket I/O for production use

pub mod codec;
mod connection;
mod error;
mod event;
mod room;
mod session;
mod state;

#[cfg(feature = "transport")]
pub mod transport;

pub use connection::{ConnectConfig, Connection, ConnectionManager, ConnectionState, CredentialStore};
pub use error::{CredentialError, SessionError};
pub use event::{SessionAction, SessionEvent};
pub use room::RoomSession;
pub use session::ChatSession;
pub use state::{ChatMessage, Counterpart, Labels, MessageStatus, SessionPhase};
