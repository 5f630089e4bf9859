//! Screen input events.
//!
//! Events originate from two distinct sources: user interactions forwarded by
//! the host UI (mount, send, mark-read, unmount) and protocol notifications
//! translated from the session by the [`crate::Bridge`].

/// Events processed by the [`crate::ChatScreen`] state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenEvent {
    /// Screen mounted for a booking's conversation.
    Mounted {
        /// Booking id acting as the room key.
        booking_id: String,
    },

    /// The realtime connection resolved.
    ConnectResolved,

    /// The counterpart identity resolved.
    CounterpartResolved,

    /// The counterpart lookup failed; placeholder names stay in use.
    CounterpartUnavailable {
        /// Failure description.
        reason: String,
    },

    /// The history backlog was applied.
    HistoryLoaded {
        /// Number of messages in the log.
        count: usize,
    },

    /// One message was appended to the log.
    MessageArrived {
        /// Id of the appended message.
        id: String,
    },

    /// A server or connection error should be shown to the user.
    ServerError {
        /// Error description.
        message: String,
    },

    /// User pressed send with the given input text.
    SendPressed {
        /// Raw input text; emptiness guards live in the session.
        text: String,
    },

    /// User viewed a message; mark it read.
    MarkReadPressed {
        /// Id of the viewed message.
        message_id: String,
    },

    /// Screen unmounted.
    Unmounted,
}
