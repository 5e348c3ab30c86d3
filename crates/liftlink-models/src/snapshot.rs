//! The authoritative server state payload.
//!
//! `GET /api/state` returns the full picture the client renders from:
//! chat history, the day's lifts, and (in the server-backed quick-message
//! deployment) the quick-message template list. The payload is small, so
//! the client replaces its render model wholesale on every poll rather
//! than patching incrementally.

use serde::{Deserialize, Serialize};

use crate::lift::Lift;
use crate::message::Message;

/// Response body of `GET /api/state`.
///
/// Every field deserializes defensively: anything the server omits
/// becomes empty / `None` so a partial payload still renders.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct StateSnapshot {
    /// Club display label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub club: Option<String>,
    /// Chat history in server order.
    #[serde(default)]
    pub messages: Vec<Message>,
    /// The day's lifts, unordered on the wire.
    #[serde(default)]
    pub lifts: Vec<Lift>,
    /// Quick-message templates; present only in the server-backed
    /// quick-message deployment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quick: Option<Vec<String>>,
}
