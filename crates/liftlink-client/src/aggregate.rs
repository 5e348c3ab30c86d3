//! Lift aggregation: pure derived-value computation.
//!
//! Everything here is side-effect free and infallible except for the
//! final empty-lift check, so the same functions can drive both the live
//! total display (called on every row edit) and the final submission
//! payload. Inputs that make no sense coerce to safe defaults rather
//! than erroring.

use liftlink_models::{Lift, LiftRow, LiftTotals, ModelError, LIFT_STATUS_ACTIVE};

use crate::overrides::{OverrideField, OverrideFlags};

/// Compute the jumper / canopy totals for a row set.
///
/// The jumper total is the sum of row jumper counts unless the operator
/// has overridden it (flag set *and* a value present). The canopy total
/// defaults to the jumper total — one canopy per jumper — under the same
/// override rule.
pub fn compute_totals(
    rows: &[LiftRow],
    flags: &OverrideFlags,
    explicit_jumpers: Option<u32>,
    explicit_canopies: Option<u32>,
) -> LiftTotals {
    let auto_jumpers: u32 = rows.iter().map(|r| r.jumpers).sum();

    let jumpers = match explicit_jumpers {
        Some(value) if flags.is_overridden(OverrideField::JumperTotal) => value,
        _ => auto_jumpers,
    };
    let canopies = match explicit_canopies {
        Some(value) if flags.is_overridden(OverrideField::CanopyTotal) => value,
        _ => jumpers,
    };

    LiftTotals { jumpers, canopies }
}

/// Suggest the next lift id: `max(existing ids) + 1`, or 1 for an empty day.
pub fn suggest_next_id(lifts: &[Lift]) -> u32 {
    lifts.iter().map(|l| l.id).max().map_or(1, |max| max + 1)
}

/// Build the lift record to submit.
///
/// Rows without jumpers are dropped; rows with jumpers but no overflight
/// count get the default of 1; rows are ordered altitude-ascending to
/// match the preset order. The id comes from explicit input when it is a
/// positive integer, otherwise from [`suggest_next_id`].
///
/// A lift with no surviving rows and a zero jumper total is rejected —
/// an all-empty form must not be silently accepted as a zero lift.
pub fn build_submission(
    explicit_id: Option<u32>,
    rows: &[LiftRow],
    totals: LiftTotals,
    existing: &[Lift],
) -> Result<Lift, ModelError> {
    let id = match explicit_id {
        Some(id) if id > 0 => id,
        _ => suggest_next_id(existing),
    };

    let mut kept: Vec<LiftRow> = rows
        .iter()
        .filter(|r| r.jumpers > 0)
        .map(|r| LiftRow {
            overflights: if r.overflights == 0 { 1 } else { r.overflights },
            ..*r
        })
        .collect();
    kept.sort_by_key(|r| r.alt);

    if kept.is_empty() && totals.jumpers == 0 {
        return Err(ModelError::EmptyLift { id });
    }

    Ok(Lift {
        id,
        name: format!("Lift {id}"),
        status: LIFT_STATUS_ACTIVE.to_string(),
        rows: kept,
        totals,
    })
}
