//! Raw wire message shape.
//!
//! Messages arrive from the server with the sender either embedded as a full
//! profile object or collapsed to a bare id string, depending on which server
//! path produced them. [`PartyRef`] models both shapes; normalization into a
//! uniform local record happens in `huddle-client`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A chat participant as it appears on the wire.
///
/// The server is inconsistent about this field: history payloads embed the
/// full profile, while live echoes may carry only the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PartyRef {
    /// Bare participant id.
    Id(String),
    /// Embedded participant profile.
    Profile(PartyProfile),
}

impl PartyRef {
    /// Participant id, regardless of wire shape.
    pub fn id(&self) -> &str {
        match self {
            Self::Id(id) => id,
            Self::Profile(profile) => &profile.id,
        }
    }

    /// Display name if the wire shape carried one.
    pub fn full_name(&self) -> Option<&str> {
        match self {
            Self::Id(_) => None,
            Self::Profile(profile) => profile.full_name.as_deref(),
        }
    }
}

/// Embedded participant profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyProfile {
    /// Server-assigned participant id.
    #[serde(rename = "_id")]
    pub id: String,

    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,

    /// Marketplace role (`customer` or `provider`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// Avatar URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
}

impl PartyProfile {
    /// Create a profile with only an id, remaining fields unset.
    pub fn bare(id: impl Into<String>) -> Self {
        Self { id: id.into(), full_name: None, role: None, profile_image: None }
    }
}

/// One chat message as delivered by the server, prior to normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireMessage {
    /// Server-assigned message id. Absent on some live-echo paths.
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Message author.
    pub sender_id: PartyRef,

    /// Message recipient. Not always present on history payloads.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receiver_id: Option<PartyRef>,

    /// Message body text.
    pub content: String,

    /// Creation time. Absent messages fall back to receipt time during
    /// normalization.
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn bare_sender_id_decodes() {
        let json = r#"{"sender_id":"u2","content":"hi"}"#;
        let msg: WireMessage = serde_json::from_str(json).unwrap();

        assert_eq!(msg.sender_id, PartyRef::Id("u2".into()));
        assert_eq!(msg.sender_id.id(), "u2");
        assert_eq!(msg.sender_id.full_name(), None);
        assert_eq!(msg.id, None);
        assert_eq!(msg.created_at, None);
    }

    #[test]
    fn embedded_sender_profile_decodes() {
        let json = r#"{
            "_id": "m1",
            "sender_id": {"_id": "u2", "full_name": "Sam", "role": "provider"},
            "content": "hi",
            "createdAt": "2024-01-01T10:00:00Z"
        }"#;
        let msg: WireMessage = serde_json::from_str(json).unwrap();

        assert_eq!(msg.id.as_deref(), Some("m1"));
        assert_eq!(msg.sender_id.id(), "u2");
        assert_eq!(msg.sender_id.full_name(), Some("Sam"));
        assert!(msg.created_at.is_some());
    }

    #[test]
    fn profile_without_optional_fields_decodes() {
        let json = r#"{"sender_id":{"_id":"u3"},"content":"x"}"#;
        let msg: WireMessage = serde_json::from_str(json).unwrap();

        assert_eq!(msg.sender_id.id(), "u3");
        assert_eq!(msg.sender_id.full_name(), None);
    }
}
