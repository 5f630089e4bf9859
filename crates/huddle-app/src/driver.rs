//! Driver trait for abstracting I/O operations.
//!
//! The [`Driver`] trait decouples the screen runtime from specific I/O
//! implementations. Each frontend implements the trait to provide
//! platform-specific I/O, while the generic [`crate::Runtime`] handles all
//! orchestration.

use std::future::Future;

use huddle_client::{ChatMessage, Counterpart};
use huddle_proto::{ClientFrame, ServerFrame};

use crate::{ChatScreen, ConnectRequest, ScreenEvent};

/// Borrowed view of everything a frontend needs to render one frame.
#[derive(Debug)]
pub struct ChatView<'a> {
    /// Screen lifecycle and banner state.
    pub screen: &'a ChatScreen,
    /// Ordered message log, arrival order.
    pub messages: &'a [ChatMessage],
    /// Resolved counterpart, if available.
    pub counterpart: Option<&'a Counterpart>,
    /// Whether the backlog is still loading.
    pub loading: bool,
}

/// Abstracts I/O operations for the screen runtime.
///
/// Implementations provide platform-specific I/O while the generic
/// [`Runtime`](crate::Runtime) handles orchestration logic, so the same
/// orchestration code runs against a real socket and in simulation.
///
/// # Implementations
///
/// - **Production**: `huddle-client`'s WebSocket transport plus the host
///   UI's event source and renderer
/// - **Simulation**: scripted events and frames for deterministic tests
pub trait Driver: Send {
    /// Platform-specific error type.
    type Error: std::error::Error + Send + 'static;

    /// Poll for the next screen event.
    ///
    /// Returns `Ok(None)` when no event is ready. Implementations may block
    /// briefly, but must not block indefinitely or server frames will starve.
    fn poll_event(&mut self)
    -> impl Future<Output = Result<Option<ScreenEvent>, Self::Error>> + Send;

    /// Establish the realtime connection.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established within the
    /// request's retry budget.
    fn connect(
        &mut self,
        request: &ConnectRequest,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Send a frame to the server.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection is closed or the send fails.
    fn send_frame(&mut self, frame: ClientFrame)
    -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Receive a frame from the server.
    ///
    /// Returns `None` when no frame is ready or the connection is closed.
    fn recv_frame(&mut self) -> impl Future<Output = Option<ServerFrame>> + Send;

    /// Check if connected to the server.
    fn is_connected(&self) -> bool;

    /// Render the view.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    fn render(&mut self, view: &ChatView<'_>) -> Result<(), Self::Error>;

    /// Stop the connection and clean up resources.
    ///
    /// Must be safe to call more than once.
    fn stop(&mut self);
}
