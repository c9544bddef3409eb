//! Contact between a rod and a rigid cylinder.

use glam::DVec3;
use strand_solver::{ForceContributor, SystemCollection};
use strand_telemetry::EventKind;
use strand_types::{RigidBodyId, RodId, StrandResult};

use crate::broad::prune_using_aabbs_rod_rigid_body;
use crate::contact::{ensure_straight, ContactParams};
use crate::narrow::{calculate_contact_forces_rod_rigid_body, edges, RodSegments};
use crate::response::ContactResult;

/// Penalty contact with slip friction between a straight rod and a cylinder.
///
/// Each rod element is tested as the segment `[m, m + l t]` from its midpoint `m`.
#[derive(Debug, Clone)]
pub struct RodCylinderContact {
    pub rod: RodId,
    pub cylinder: RigidBodyId,
    pub params: ContactParams,
    last: ContactResult,
}

impl RodCylinderContact {
    pub fn new(rod: RodId, cylinder: RigidBodyId, params: ContactParams) -> Self {
        Self {
            rod,
            cylinder,
            params,
            last: ContactResult::default(),
        }
    }

    /// Summary of the most recent pass.
    pub fn last_result(&self) -> ContactResult {
        self.last
    }
}

impl ForceContributor for RodCylinderContact {
    fn apply(&mut self, systems: &mut SystemCollection, _time: f64) -> StrandResult<()> {
        ensure_straight(systems, self.rod)?;
        let (rod, cylinder) = systems.rod_loads_and_cylinder(self.rod, self.cylinder)?;

        if prune_using_aabbs_rod_rigid_body(
            rod.position,
            rod.radius,
            rod.lengths,
            cylinder.position,
            cylinder.director,
            cylinder.radius,
            cylinder.length,
        ) {
            self.last = ContactResult::default();
            return Ok(());
        }

        // Segments start at element midpoints against rigid bodies.
        let midpoints: Vec<DVec3> = rod.position.windows(2).map(|w| 0.5 * (w[0] + w[1])).collect();
        let rod_edges = edges(rod.lengths, rod.tangents);
        let segments = RodSegments {
            x: &midpoints,
            edges: &rod_edges,
            radius: rod.radius,
            lengths: rod.lengths,
            velocity: rod.velocity,
            internal_forces: rod.internal_forces,
        };
        self.last = calculate_contact_forces_rod_rigid_body(&segments, rod.external_forces, cylinder, &self.params);
        tracing::debug!(
            rod = self.rod.0,
            cylinder = self.cylinder.0,
            pairs = self.last.pairs_in_contact,
            max_penetration = self.last.max_penetration,
            "rod-cylinder contact pass"
        );
        Ok(())
    }

    fn name(&self) -> &str {
        "rod_cylinder_contact"
    }

    fn diagnostics(&self) -> Option<EventKind> {
        Some(self.last.to_event(self.name()))
    }
}
