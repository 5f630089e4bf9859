//! Screen side-effects and intents.
//!
//! Instructions produced by the [`crate::ChatScreen`] state machine for the
//! runtime to execute.

/// Actions produced by the screen state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenAction {
    /// Render the current view.
    Render,

    /// Open the shared realtime connection.
    Connect,

    /// Resolve the counterpart identity from booking details.
    FetchCounterpart {
        /// Booking to look up.
        booking_id: String,
    },

    /// Join a booking's conversation channel.
    Join {
        /// Booking id acting as the room key.
        booking_id: String,
    },

    /// Post a message.
    Send {
        /// Booking id acting as the room key.
        booking_id: String,
        /// Raw input text.
        text: String,
    },

    /// Mark a message as read.
    MarkRead {
        /// Message to mark.
        message_id: String,
    },

    /// Unsubscribe and disconnect.
    Teardown,
}
