//! Observable session state types.
//!
//! These structures are the "view model" of a chat session: the normalized
//! message log, the resolved counterpart, and the session phase. They contain
//! exactly what a screen needs to render, with wire-format irregularities
//! already smoothed out by the codec.

use chrono::{DateTime, Utc};
use huddle_proto::PartyProfile;

/// Client-local read status of a message.
///
/// The server never confirms reads; status only changes through the explicit
/// mark-read hook on [`crate::ChatSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageStatus {
    /// Freshly normalized, not yet marked read.
    Unread,
    /// Marked read locally.
    Read,
}

/// One normalized chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    /// Server-assigned id, or a locally unique fallback id.
    pub id: String,
    /// Sender's participant id.
    pub sender_id: String,
    /// Resolved display name for the sender.
    pub sender_name: String,
    /// Message body text.
    pub text: String,
    /// Creation time, falling back to receipt time when the wire omits it.
    pub sent_at: DateTime<Utc>,
    /// Short localized clock label, e.g. `10:00 AM`.
    pub clock_label: String,
    /// Whether the current user authored this message.
    ///
    /// Computed once at normalization time from the session-start identity
    /// snapshot; never recomputed.
    pub is_mine: bool,
    /// Client-local read status.
    pub status: MessageStatus,
}

/// The other participant in a booking's conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Counterpart {
    /// Participant id.
    pub id: String,
    /// Display name.
    pub full_name: String,
    /// Avatar URL.
    pub avatar: Option<String>,
}

impl Counterpart {
    /// Build a counterpart from a wire profile, substituting the generic
    /// placeholder when the profile carries no name.
    pub fn from_profile(profile: &PartyProfile, labels: &Labels) -> Self {
        Self {
            id: profile.id.clone(),
            full_name: profile
                .full_name
                .clone()
                .unwrap_or_else(|| labels.unknown_user.clone()),
            avatar: profile.profile_image.clone(),
        }
    }
}

/// Localized display labels threaded into the codec.
///
/// Localization lives outside the core; the session only needs the two
/// placeholder strings the codec can fall back to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labels {
    /// Label for the current user's own messages.
    pub me: String,
    /// Placeholder when no sender name can be resolved.
    pub unknown_user: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self { me: "Me".to_string(), unknown_user: "User".to_string() }
    }
}

/// Phase of a chat session, from creation to teardown.
///
/// One tagged state instead of parallel boolean flags; every transition goes
/// through [`crate::ChatSession::handle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionPhase {
    /// Created, nothing requested yet.
    Idle,
    /// Transport opening.
    Connecting,
    /// Connected, no room joined yet.
    Joining,
    /// Room joined, receiving events.
    Subscribed,
    /// Connection failed.
    Failed {
        /// Failure description.
        reason: String,
    },
    /// Torn down. Terminal; all further events are ignored.
    TornDown,
}
