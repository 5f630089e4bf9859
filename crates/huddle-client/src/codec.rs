//! Wire-to-local message normalization.
//!
//! The server is inconsistent about message shape: the sender may arrive as a
//! bare id or an embedded profile, the id and timestamp may be missing, and
//! display names sometimes have to come from the separately resolved
//! counterpart. [`normalize`] flattens all of that into one [`ChatMessage`].
//!
//! Normalization is pure given its inputs; the only mutable piece is the
//! fallback id sequence, threaded in explicitly so ids stay unique under
//! rapid message bursts.

use chrono::{DateTime, Utc};
use huddle_proto::WireMessage;

use crate::state::{ChatMessage, Counterpart, Labels, MessageStatus};

/// Monotonic source of fallback message ids.
///
/// Used when the wire message carries no server id. Wall-clock derived ids
/// collide under rapid-fire messages; a counter cannot.
#[derive(Debug, Clone, Default)]
pub struct MessageIdSeq {
    next: u64,
}

impl MessageIdSeq {
    /// Create a sequence starting at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Next locally unique id.
    pub fn next_id(&mut self) -> String {
        let id = format!("local-{}", self.next);
        self.next += 1;
        id
    }
}

/// Normalize one wire message into the local record.
///
/// - `current_user_id`: identity snapshot captured at session start; `is_mine`
///   is computed once against it and never recomputed.
/// - `counterpart`: resolved other party, if available; used for display names
///   when the wire carries only a bare sender id.
/// - `received_at`: substitute timestamp when the wire omits `createdAt`.
pub fn normalize(
    wire: &WireMessage,
    current_user_id: Option<&str>,
    counterpart: Option<&Counterpart>,
    labels: &Labels,
    ids: &mut MessageIdSeq,
    received_at: DateTime<Utc>,
) -> ChatMessage {
    let sender_id = wire.sender_id.id().to_string();
    let is_mine = current_user_id == Some(sender_id.as_str());

    let sender_name = match wire.sender_id.full_name() {
        Some(name) => name.to_string(),
        None if is_mine => labels.me.clone(),
        None => counterpart
            .map_or_else(|| labels.unknown_user.clone(), |c| c.full_name.clone()),
    };

    let sent_at = wire.created_at.unwrap_or(received_at);
    let id = wire.id.clone().unwrap_or_else(|| ids.next_id());

    ChatMessage {
        id,
        sender_id,
        sender_name,
        text: wire.content.clone(),
        sent_at,
        clock_label: clock_label(sent_at),
        is_mine,
        status: MessageStatus::Unread,
    }
}

/// Short localized clock label for a timestamp, e.g. `10:00 AM`.
pub fn clock_label(at: DateTime<Utc>) -> String {
    at.format("%-I:%M %p").to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;
    use huddle_proto::{PartyProfile, PartyRef};

    use super::*;

    fn wire(sender: PartyRef, content: &str) -> WireMessage {
        WireMessage {
            id: None,
            sender_id: sender,
            receiver_id: None,
            content: content.to_string(),
            created_at: Some(Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap()),
        }
    }

    fn counterpart() -> Counterpart {
        Counterpart { id: "u2".into(), full_name: "Sam".into(), avatar: None }
    }

    #[test]
    fn is_mine_holds_for_bare_and_embedded_sender() {
        let labels = Labels::default();
        let mut ids = MessageIdSeq::new();
        let now = Utc::now();

        let bare = normalize(
            &wire(PartyRef::Id("u1".into()), "hi"),
            Some("u1"),
            None,
            &labels,
            &mut ids,
            now,
        );
        let embedded = normalize(
            &wire(PartyRef::Profile(PartyProfile::bare("u1")), "hi"),
            Some("u1"),
            None,
            &labels,
            &mut ids,
            now,
        );

        assert!(bare.is_mine);
        assert!(embedded.is_mine);
    }

    #[test]
    fn embedded_name_wins_over_counterpart() {
        let labels = Labels::default();
        let mut ids = MessageIdSeq::new();
        let profile = PartyProfile {
            id: "u2".into(),
            full_name: Some("Sam Embedded".into()),
            role: None,
            profile_image: None,
        };

        let msg = normalize(
            &wire(PartyRef::Profile(profile), "hi"),
            Some("u1"),
            Some(&counterpart()),
            &labels,
            &mut ids,
            Utc::now(),
        );

        assert_eq!(msg.sender_name, "Sam Embedded");
    }

    #[test]
    fn bare_counterpart_sender_uses_resolved_name() {
        let labels = Labels::default();
        let mut ids = MessageIdSeq::new();

        let msg = normalize(
            &wire(PartyRef::Id("u2".into()), "hi"),
            Some("u1"),
            Some(&counterpart()),
            &labels,
            &mut ids,
            Utc::now(),
        );

        assert_eq!(msg.sender_name, "Sam");
        assert!(!msg.is_mine);
    }

    #[test]
    fn unresolved_counterpart_falls_back_to_placeholder() {
        let labels = Labels::default();
        let mut ids = MessageIdSeq::new();

        let msg = normalize(
            &wire(PartyRef::Id("u2".into()), "hi"),
            Some("u1"),
            None,
            &labels,
            &mut ids,
            Utc::now(),
        );

        assert_eq!(msg.sender_name, "User");
    }

    #[test]
    fn own_bare_sender_uses_me_label() {
        let labels = Labels::default();
        let mut ids = MessageIdSeq::new();

        let msg = normalize(
            &wire(PartyRef::Id("u1".into()), "hi"),
            Some("u1"),
            Some(&counterpart()),
            &labels,
            &mut ids,
            Utc::now(),
        );

        assert_eq!(msg.sender_name, "Me");
    }

    #[test]
    fn clock_label_renders_short_time() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();
        assert_eq!(clock_label(at), "10:00 AM");

        let afternoon = Utc.with_ymd_and_hms(2024, 1, 1, 15, 5, 0).unwrap();
        assert_eq!(clock_label(afternoon), "3:05 PM");
    }

    #[test]
    fn missing_created_at_uses_receipt_time() {
        let labels = Labels::default();
        let mut ids = MessageIdSeq::new();
        let received = Utc.with_ymd_and_hms(2024, 6, 1, 9, 30, 0).unwrap();
        let mut raw = wire(PartyRef::Id("u2".into()), "hi");
        raw.created_at = None;

        let msg = normalize(&raw, Some("u1"), None, &labels, &mut ids, received);

        assert_eq!(msg.sent_at, received);
        assert_eq!(msg.clock_label, "9:30 AM");
    }

    #[test]
    fn fallback_ids_are_unique_under_bursts() {
        let labels = Labels::default();
        let mut ids = MessageIdSeq::new();
        let now = Utc::now();
        let mut seen = std::collections::HashSet::new();

        for _ in 0..100 {
            let mut raw = wire(PartyRef::Id("u2".into()), "hi");
            raw.id = None;
            let msg = normalize(&raw, Some("u1"), None, &labels, &mut ids, now);
            assert!(seen.insert(msg.id));
        }
        assert_eq!(seen.len(), 100);
    }

    #[test]
    fn server_id_is_preferred() {
        let labels = Labels::default();
        let mut ids = MessageIdSeq::new();
        let mut raw = wire(PartyRef::Id("u2".into()), "hi");
        raw.id = Some("m42".into());

        let msg = normalize(&raw, Some("u1"), None, &labels, &mut ids, Utc::now());

        assert_eq!(msg.id, "m42");
    }

    #[test]
    fn fresh_messages_start_unread() {
        let labels = Labels::default();
        let mut ids = MessageIdSeq::new();

        let msg = normalize(
            &wire(PartyRef::Id("u2".into()), "hi"),
            Some("u1"),
            None,
            &labels,
            &mut ids,
            Utc::now(),
        );

        assert_eq!(msg.status, MessageStatus::Unread);
    }
}
