//! Override tracking for auto-computed fields.
//!
//! Three numeric fields are normally auto-derived: the jumper total, the
//! canopy total, and the next-lift-id suggestion. The moment the operator
//! types into one of them the corresponding flag is set, and recomputation
//! stops touching that field. Recomputing never clears a flag — only
//! [`OverrideFlags::reset`], called after a successful submission, does.

/// The auto-computed fields an operator can override by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum OverrideField {
    /// The derived jumper total of the lift being edited.
    JumperTotal,
    /// The derived canopy total of the lift being edited.
    CanopyTotal,
    /// The suggested id for the next lift.
    LiftId,
}

/// Per-field override flags for one lift record in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OverrideFlags {
    jumper_total: bool,
    canopy_total: bool,
    lift_id: bool,
}

impl OverrideFlags {
    /// All flags cleared: every field auto-tracks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that the operator typed directly into `field`.
    pub fn mark(&mut self, field: OverrideField) {
        match field {
            OverrideField::JumperTotal => self.jumper_total = true,
            OverrideField::CanopyTotal => self.canopy_total = true,
            OverrideField::LiftId => self.lift_id = true,
        }
    }

    /// Whether `field` is currently operator-controlled.
    pub fn is_overridden(&self, field: OverrideField) -> bool {
        match field {
            OverrideField::JumperTotal => self.jumper_total,
            OverrideField::CanopyTotal => self.canopy_total,
            OverrideField::LiftId => self.lift_id,
        }
    }

    /// Return every field to auto-tracking. Called once a submission has
    /// succeeded and a fresh record starts; nothing else clears flags.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn starts_clear() {
        let flags = OverrideFlags::new();
        for field in OverrideField::iter() {
            assert!(!flags.is_overridden(field));
        }
    }

    #[test]
    fn flags_are_independent() {
        let mut flags = OverrideFlags::new();
        flags.mark(OverrideField::CanopyTotal);
        assert!(flags.is_overridden(OverrideField::CanopyTotal));
        assert!(!flags.is_overridden(OverrideField::JumperTotal));
        assert!(!flags.is_overridden(OverrideField::LiftId));
    }

    #[test]
    fn only_reset_clears() {
        let mut flags = OverrideFlags::new();
        flags.mark(OverrideField::JumperTotal);
        // Marking again is idempotent, not a toggle.
        flags.mark(OverrideField::JumperTotal);
        assert!(flags.is_overridden(OverrideField::JumperTotal));
        flags.reset();
        for field in OverrideField::iter() {
            assert!(!flags.is_overridden(field));
        }
    }

    #[test]
    fn field_names_render_snake_case() {
        assert_eq!(OverrideField::JumperTotal.to_string(), "jumper_total");
        assert_eq!(OverrideField::LiftId.to_string(), "lift_id");
    }
}
