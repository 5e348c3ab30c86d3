//! The local render model.
//!
//! [`SessionState`] is what frontends draw from: one instance per active
//! client session, owned by the synchronizer — no ambient globals. Polls
//! replace it wholesale (the server is authoritative and the payload is
//! small); the only client-side additions are optimistic chat echoes and
//! the quick list, which the registry owns.

use chrono::{DateTime, Utc};
use liftlink_models::{Lift, Message, StateSnapshot};

use crate::aggregate::suggest_next_id;

/// Everything a frontend needs to render one client session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    /// Club display label from the server, when it sends one.
    pub club: Option<String>,
    /// Chat history in server order.
    pub messages: Vec<Message>,
    /// The day's lifts, id-descending (most recent first).
    pub lifts: Vec<Lift>,
    /// Quick-message templates as currently known.
    pub quick: Vec<String>,
    /// Suggested id for the next lift submission.
    pub next_lift_id: u32,
    /// When the last successful poll landed.
    pub last_sync: Option<DateTime<Utc>>,
}

impl SessionState {
    /// Fresh model before the first poll. `next_lift_id` is seeded from
    /// the local cache so an early submission after a restart does not
    /// reuse an id.
    pub fn new(next_lift_id: u32) -> Self {
        Self {
            club: None,
            messages: Vec::new(),
            lifts: Vec::new(),
            quick: Vec::new(),
            next_lift_id: next_lift_id.max(1),
            last_sync: None,
        }
    }

    /// Replace the model with an authoritative snapshot.
    ///
    /// Lifts are re-sorted id-descending for display. The next-id
    /// suggestion is recomputed from the authoritative list unless the
    /// operator is mid-edit of that field (`keep_next_id`). The quick
    /// list is left untouched here — the registry reconciles it and the
    /// synchronizer writes the result back.
    pub fn apply_snapshot(&mut self, snapshot: StateSnapshot, keep_next_id: bool) {
        self.club = snapshot.club;
        self.messages = snapshot.messages;
        self.lifts = snapshot.lifts;
        self.lifts.sort_by(|a, b| b.id.cmp(&a.id));
        if !keep_next_id {
            self.next_lift_id = suggest_next_id(&self.lifts);
        }
        self.last_sync = Some(Utc::now());
    }

    /// Append an outbound message for display before the next poll
    /// confirms it.
    pub fn push_outbound(&mut self, text: &str) {
        self.messages.push(Message::outbound(text));
    }
}

#[cfg(test)]
mod tests {
    use liftlink_models::{LiftTotals, MessageDirection};

    use super::*;

    fn snapshot_with_lift_ids(ids: &[u32]) -> StateSnapshot {
        StateSnapshot {
            club: Some("Pilatus Manifest".to_string()),
            messages: Vec::new(),
            lifts: ids
                .iter()
                .map(|&id| Lift {
                    id,
                    name: format!("Lift {id}"),
                    status: "active".to_string(),
                    rows: Vec::new(),
                    totals: LiftTotals::default(),
                })
                .collect(),
            quick: None,
        }
    }

    #[test]
    fn snapshot_replaces_and_sorts_lifts() {
        let mut state = SessionState::new(1);
        state.apply_snapshot(snapshot_with_lift_ids(&[1, 5, 3]), false);
        let ids: Vec<u32> = state.lifts.iter().map(|l| l.id).collect();
        assert_eq!(ids, [5, 3, 1]);
        assert_eq!(state.club.as_deref(), Some("Pilatus Manifest"));
        assert!(state.last_sync.is_some());
    }

    #[test]
    fn snapshot_recomputes_next_id() {
        let mut state = SessionState::new(1);
        state.apply_snapshot(snapshot_with_lift_ids(&[3, 1, 5]), false);
        assert_eq!(state.next_lift_id, 6);

        state.apply_snapshot(snapshot_with_lift_ids(&[]), false);
        assert_eq!(state.next_lift_id, 1);
    }

    #[test]
    fn mid_edit_id_survives_snapshot() {
        let mut state = SessionState::new(1);
        state.next_lift_id = 42;
        state.apply_snapshot(snapshot_with_lift_ids(&[5]), true);
        assert_eq!(state.next_lift_id, 42);
    }

    #[test]
    fn cached_seed_is_clamped_to_one() {
        assert_eq!(SessionState::new(0).next_lift_id, 1);
        assert_eq!(SessionState::new(8).next_lift_id, 8);
    }

    #[test]
    fn optimistic_echo_appends_outbound() {
        let mut state = SessionState::new(1);
        state.push_outbound("Ready for lift");
        assert_eq!(state.messages.len(), 1);
        assert_eq!(state.messages[0].direction, MessageDirection::Out);
        assert_eq!(state.messages[0].text, "Ready for lift");
    }

    #[test]
    fn quick_list_is_untouched_by_snapshot() {
        let mut state = SessionState::new(1);
        state.quick = vec!["Ready".to_string()];
        state.apply_snapshot(snapshot_with_lift_ids(&[2]), false);
        assert_eq!(state.quick, ["Ready"]);
    }
}
