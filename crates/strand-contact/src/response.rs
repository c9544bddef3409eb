//! Per-pass contact summary.

use serde::{Deserialize, Serialize};
use strand_telemetry::EventKind;

/// What one contact pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactResult {
    /// Element pairs with positive penetration.
    pub pairs_in_contact: u32,
    /// Largest penetration seen, zero when nothing touched.
    pub max_penetration: f64,
    /// Sum of the net contact force magnitudes applied.
    pub total_force: f64,
}

impl ContactResult {
    /// Accounts for one evaluated pair.
    pub(crate) fn record(&mut self, penetration: f64, force_magnitude: f64) {
        if penetration > 0.0 {
            self.pairs_in_contact += 1;
            self.max_penetration = self.max_penetration.max(penetration);
        }
        self.total_force += force_magnitude;
    }

    pub fn is_empty(&self) -> bool {
        self.pairs_in_contact == 0 && self.total_force == 0.0
    }

    /// Telemetry event for this pass.
    pub fn to_event(&self, contributor: &str) -> EventKind {
        EventKind::ContactPass {
            contributor: contributor.to_string(),
            pairs_in_contact: self.pairs_in_contact,
            max_penetration: self.max_penetration,
            total_force: self.total_force,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn separated_pairs_only_add_force() {
        let mut result = ContactResult::default();
        result.record(-1e-6, 0.0);
        assert!(result.is_empty());
        result.record(0.25, 0.5);
        result.record(0.1, 0.25);
        assert_eq!(result.pairs_in_contact, 2);
        assert_eq!(result.max_penetration, 0.25);
        assert_eq!(result.total_force, 0.75);
    }
}
