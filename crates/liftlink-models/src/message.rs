//! Chat messages exchanged between the manifest operator and the pilot.
//!
//! Messages are created either by an operator action (outbound) or by a
//! poll discovering a new inbound message on the server. The client never
//! mutates or deletes them; ordering is server-assigned and preserved
//! as received.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// MessageDirection
// ---------------------------------------------------------------------------

/// Which way a chat message travelled.
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MessageDirection {
    /// Pilot → manifest. Also the defensive default for payloads that
    /// omit the field.
    #[default]
    In,
    /// Manifest → pilot.
    Out,
}

// ---------------------------------------------------------------------------
// Message
// ---------------------------------------------------------------------------

/// A single chat message.
///
/// `status` and `ts` are server-assigned and free-form; the client treats
/// them as opaque display data (observed status values are `"sent"`,
/// `"delivered"` and `"read"`).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Message {
    /// Server-assigned message id, when the server provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Travel direction, `"in"` or `"out"` on the wire.
    #[serde(default)]
    pub direction: MessageDirection,
    /// Message body. Non-empty for any message the client sends.
    pub text: String,
    /// Delivery status, server-assigned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Creation time, server-assigned (server-local, no offset on the wire).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ts: Option<NaiveDateTime>,
}

impl Message {
    /// Build a local outbound message for optimistic display before the
    /// next poll confirms it.
    pub fn outbound(text: &str) -> Self {
        Self {
            id: None,
            direction: MessageDirection::Out,
            text: text.to_string(),
            status: Some("sent".to_string()),
            ts: Some(chrono::Utc::now().naive_utc()),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_wire_format() {
        assert_eq!(
            serde_json::to_string(&MessageDirection::Out).unwrap(),
            "\"out\""
        );
        let back: MessageDirection = serde_json::from_str("\"in\"").unwrap();
        assert_eq!(back, MessageDirection::In);
    }

    #[test]
    fn direction_display() {
        assert_eq!(MessageDirection::In.to_string(), "in");
        assert_eq!(MessageDirection::Out.to_string(), "out");
    }

    #[test]
    fn deserializes_full_server_message() {
        let json = r#"{
            "id": 3,
            "direction": "in",
            "text": "5 min to takeoff",
            "status": "delivered",
            "ts": "2026-08-30T10:15:00"
        }"#;
        let msg: Message = serde_json::from_str(json).unwrap();
        assert_eq!(msg.id, Some(3));
        assert_eq!(msg.direction, MessageDirection::In);
        assert_eq!(msg.text, "5 min to takeoff");
        assert_eq!(msg.status.as_deref(), Some("delivered"));
        assert!(msg.ts.is_some());
    }

    #[test]
    fn deserializes_sparse_message() {
        // Only `text` is guaranteed; everything else defaults.
        let msg: Message = serde_json::from_str(r#"{"text":"ok"}"#).unwrap();
        assert_eq!(msg.text, "ok");
        assert_eq!(msg.direction, MessageDirection::In);
        assert_eq!(msg.id, None);
        assert_eq!(msg.status, None);
        assert_eq!(msg.ts, None);
    }

    #[test]
    fn outbound_helper_is_marked_sent() {
        let msg = Message::outbound("Ready for lift");
        assert_eq!(msg.direction, MessageDirection::Out);
        assert_eq!(msg.status.as_deref(), Some("sent"));
        assert!(msg.ts.is_some());
    }
}
