//! Application layer for Huddle chat screens.
//!
//! Pure state machines and a generic runtime for the chat screen lifecycle,
//! keeping orchestration testable without a real socket or HTTP stack.
//!
//! # Components
//!
//! - [`ChatScreen`]: screen lifecycle state machine (mount through teardown)
//! - [`Bridge`]: translates screen actions to session events and back
//! - [`BookingDirectory`]: trait for the booking-details collaborator
//! - [`Driver`]: trait for platform-specific I/O
//! - [`Runtime`]: generic orchestration loop using Driver

mod action;
mod bridge;
mod directory;
mod driver;
mod event;
mod runtime;
mod screen;

pub use action::ScreenAction;
pub use bridge::{Bridge, ConnectRequest};
pub use directory::{BookingDirectory, BookingParties, DirectoryError};
pub use driver::{ChatView, Driver};
pub use event::ScreenEvent;
pub use runtime::Runtime;
pub use screen::{ChatScreen, Lifecycle};
