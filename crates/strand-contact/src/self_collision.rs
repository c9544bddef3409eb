//! Self-contact of a single rod.

use strand_solver::{ForceContributor, SystemCollection};
use strand_telemetry::EventKind;
use strand_types::{RodId, StrandResult};

use crate::contact::{ensure_straight, ContactParams};
use crate::narrow::{calculate_contact_forces_self_rod, edges, RodSegments};
use crate::response::ContactResult;

/// Penalty contact between non-neighbouring elements of one straight rod.
///
/// There is no box test: a rod always overlaps its own box.
#[derive(Debug, Clone)]
pub struct SelfContact {
    pub rod: RodId,
    pub params: ContactParams,
    last: ContactResult,
}

impl SelfContact {
    pub fn new(rod: RodId, params: ContactParams) -> Self {
        Self {
            rod,
            params,
            last: ContactResult::default(),
        }
    }

    pub fn last_result(&self) -> ContactResult {
        self.last
    }
}

impl ForceContributor for SelfContact {
    fn apply(&mut self, systems: &mut SystemCollection, _time: f64) -> StrandResult<()> {
        ensure_straight(systems, self.rod)?;
        let rod = systems.rod_loads(self.rod)?;
        let rod_edges = edges(rod.lengths, rod.tangents);
        let segments = RodSegments {
            x: &rod.position[..rod.lengths.len()],
            edges: &rod_edges,
            radius: rod.radius,
            lengths: rod.lengths,
            velocity: rod.velocity,
            internal_forces: rod.internal_forces,
        };
        self.last = calculate_contact_forces_self_rod(&segments, rod.external_forces, &self.params);
        tracing::debug!(
            rod = self.rod.0,
            pairs = self.last.pairs_in_contact,
            "self-contact pass"
        );
        Ok(())
    }

    fn name(&self) -> &str {
        "self_contact"
    }

    fn diagnostics(&self) -> Option<EventKind> {
        Some(self.last.to_event(self.name()))
    }
}
