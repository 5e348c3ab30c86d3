//! Lift (aircraft load) records.
//!
//! A lift summarizes one aircraft load: how many jumpers exit at each
//! altitude band, how many passes over the drop zone each band needs,
//! and the jumper / canopy totals. Lifts are constructed client-side at
//! submission time, sent once, and never mutated by the client
//! afterwards — subsequent knowledge comes only from server polls.

use serde::{Deserialize, Serialize};

/// The fixed, ascending altitude bands a jump can be manifested at.
///
/// Unit-agnostic; these are the exit altitudes the pilot flies to.
pub const ALTITUDE_PRESETS: [u32; 4] = [1000, 1500, 2250, 4000];

/// Default lift status for new submissions.
pub const LIFT_STATUS_ACTIVE: &str = "active";

// ---------------------------------------------------------------------------
// LiftRow
// ---------------------------------------------------------------------------

/// One altitude band of a lift.
///
/// A row with `jumpers == 0` is never included in a submitted lift.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiftRow {
    /// Exit altitude, one of [`ALTITUDE_PRESETS`].
    pub alt: u32,
    /// Number of jumpers exiting at this altitude.
    #[serde(default)]
    pub jumpers: u32,
    /// Number of passes over the drop zone for this band. Opaque to the
    /// client beyond the submission default of 1; the pilot interprets it.
    #[serde(default)]
    pub overflights: u32,
}

impl LiftRow {
    /// Row with jumpers and an explicit overflight count.
    pub fn new(alt: u32, jumpers: u32, overflights: u32) -> Self {
        Self {
            alt,
            jumpers,
            overflights,
        }
    }

    /// Row with jumpers and no overflight count yet (defaulted at
    /// submission time).
    pub fn with_jumpers(alt: u32, jumpers: u32) -> Self {
        Self {
            alt,
            jumpers,
            overflights: 0,
        }
    }
}

// ---------------------------------------------------------------------------
// LiftTotals
// ---------------------------------------------------------------------------

/// Jumper and canopy totals for a lift.
///
/// Each value is either auto-derived (see the aggregator in
/// `liftlink-client`) or operator-supplied. Canopies default to one per
/// jumper; tandem or cargo drops diverge.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LiftTotals {
    /// Total jumpers on the load.
    #[serde(default)]
    pub jumpers: u32,
    /// Total canopies expected in the air.
    #[serde(default)]
    pub canopies: u32,
}

// ---------------------------------------------------------------------------
// Lift
// ---------------------------------------------------------------------------

fn default_lift_status() -> String {
    LIFT_STATUS_ACTIVE.to_string()
}

/// A complete lift record as known to the server.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Lift {
    /// Positive, unique lift number for the day.
    pub id: u32,
    /// Display label; servers send `"Lift {id}"` unless overridden.
    #[serde(default)]
    pub name: String,
    /// Free-form status; `"active"` until the pilot reports otherwise
    /// (observed values: `"active"`, `"completed"`).
    #[serde(default = "default_lift_status")]
    pub status: String,
    /// Altitude-ascending rows, only bands with jumpers.
    #[serde(default)]
    pub rows: Vec<LiftRow>,
    /// Jumper / canopy totals.
    #[serde(default)]
    pub totals: LiftTotals,
}

impl Lift {
    /// Label to render: the server-assigned name, or `"Lift {id}"` when
    /// the server sent none.
    pub fn display_name(&self) -> String {
        if self.name.is_empty() {
            format!("Lift {}", self.id)
        } else {
            self.name.clone()
        }
    }

    /// Wire body for `POST /api/lift`.
    ///
    /// Totals are always sent explicitly; the nullable override fields in
    /// the endpoint contract exist for clients that let the server derive
    /// them.
    pub fn to_submission(&self) -> LiftSubmission {
        LiftSubmission {
            id: self.id,
            status: self.status.clone(),
            rows: self.rows.clone(),
            totals_jumpers: Some(self.totals.jumpers),
            totals_canopies: Some(self.totals.canopies),
        }
    }
}

// ---------------------------------------------------------------------------
// LiftSubmission
// ---------------------------------------------------------------------------

/// Request body for `POST /api/lift`.
///
/// `totals_jumpers` / `totals_canopies` are nullable on the wire: a
/// `null` asks the server to derive the value from the rows.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LiftSubmission {
    /// Lift number.
    pub id: u32,
    /// Initial status, normally [`LIFT_STATUS_ACTIVE`].
    pub status: String,
    /// Rows with jumpers, altitude ascending.
    pub rows: Vec<LiftRow>,
    /// Explicit jumper total, or `null` for server-derived.
    pub totals_jumpers: Option<u32>,
    /// Explicit canopy total, or `null` for server-derived.
    pub totals_canopies: Option<u32>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_are_ascending() {
        let mut sorted = ALTITUDE_PRESETS;
        sorted.sort_unstable();
        assert_eq!(sorted, ALTITUDE_PRESETS);
    }

    #[test]
    fn lift_serde_roundtrip() {
        let lift = Lift {
            id: 7,
            name: "Lift 7".to_string(),
            status: LIFT_STATUS_ACTIVE.to_string(),
            rows: vec![LiftRow::new(1000, 2, 2), LiftRow::new(4000, 10, 1)],
            totals: LiftTotals {
                jumpers: 12,
                canopies: 12,
            },
        };
        let json = serde_json::to_string(&lift).unwrap();
        let back: Lift = serde_json::from_str(&json).unwrap();
        assert_eq!(lift, back);
    }

    #[test]
    fn lift_defaults_fill_missing_fields() {
        let lift: Lift = serde_json::from_str(r#"{"id": 3}"#).unwrap();
        assert_eq!(lift.status, "active");
        assert!(lift.rows.is_empty());
        assert_eq!(lift.totals, LiftTotals::default());
        assert_eq!(lift.display_name(), "Lift 3");
    }

    #[test]
    fn display_name_prefers_server_label() {
        let lift: Lift =
            serde_json::from_str(r#"{"id": 3, "name": "Sunset load"}"#).unwrap();
        assert_eq!(lift.display_name(), "Sunset load");
    }

    #[test]
    fn submission_carries_explicit_totals() {
        let lift = Lift {
            id: 4,
            name: "Lift 4".to_string(),
            status: LIFT_STATUS_ACTIVE.to_string(),
            rows: vec![LiftRow::new(2250, 3, 1)],
            totals: LiftTotals {
                jumpers: 3,
                canopies: 4,
            },
        };
        let body = lift.to_submission();
        assert_eq!(body.totals_jumpers, Some(3));
        assert_eq!(body.totals_canopies, Some(4));
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["rows"][0]["alt"], 2250);
        assert_eq!(json["totals_jumpers"], 3);
    }
}
