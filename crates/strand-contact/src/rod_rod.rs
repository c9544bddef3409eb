//! Contact between two distinct rods.

use strand_solver::{ForceContributor, SystemCollection};
use strand_telemetry::EventKind;
use strand_types::{RodId, StrandError, StrandResult};

use crate::broad::prune_using_aabbs_rod_rod;
use crate::contact::{ensure_straight, ContactParams};
use crate::narrow::{calculate_contact_forces_rod_rod, edges, RodSegments};
use crate::response::ContactResult;

/// Penalty contact between two straight rods.
#[derive(Debug, Clone)]
pub struct RodRodContact {
    pub first: RodId,
    pub second: RodId,
    pub params: ContactParams,
    last: ContactResult,
}

impl RodRodContact {
    pub fn new(first: RodId, second: RodId, params: ContactParams) -> StrandResult<Self> {
        if first == second {
            return Err(StrandError::InvalidConfig(format!(
                "rod {first:?} cannot contact itself; use SelfContact"
            )));
        }
        Ok(Self {
            first,
            second,
            params,
            last: ContactResult::default(),
        })
    }

    /// Summary of the most recent pass.
    pub fn last_result(&self) -> ContactResult {
        self.last
    }
}

impl ForceContributor for RodRodContact {
    fn apply(&mut self, systems: &mut SystemCollection, _time: f64) -> StrandResult<()> {
        ensure_straight(systems, self.first)?;
        ensure_straight(systems, self.second)?;
        let (one, two) = systems.rod_loads_pair(self.first, self.second)?;

        if prune_using_aabbs_rod_rod(one.position, one.radius, one.lengths, two.position, two.radius, two.lengths) {
            self.last = ContactResult::default();
            return Ok(());
        }

        let one_edges = edges(one.lengths, one.tangents);
        let two_edges = edges(two.lengths, two.tangents);
        let one_segments = RodSegments {
            x: &one.position[..one.lengths.len()],
            edges: &one_edges,
            radius: one.radius,
            lengths: one.lengths,
            velocity: one.velocity,
            internal_forces: one.internal_forces,
        };
        let two_segments = RodSegments {
            x: &two.position[..two.lengths.len()],
            edges: &two_edges,
            radius: two.radius,
            lengths: two.lengths,
            velocity: two.velocity,
            internal_forces: two.internal_forces,
        };
        self.last = calculate_contact_forces_rod_rod(
            &one_segments,
            one.external_forces,
            &two_segments,
            two.external_forces,
            &self.params,
        );
        tracing::debug!(
            first = self.first.0,
            second = self.second.0,
            pairs = self.last.pairs_in_contact,
            max_penetration = self.last.max_penetration,
            "rod-rod contact pass"
        );
        Ok(())
    }

    fn name(&self) -> &str {
        "rod_rod_contact"
    }

    fn diagnostics(&self) -> Option<EventKind> {
        Some(self.last.to_event(self.name()))
    }
}
