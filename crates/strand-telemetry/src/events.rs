//! Simulation event types.
//!
//! Events are small value types tagged with the step that produced them.

use serde::{Deserialize, Serialize};

/// A simulation event emitted by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationEvent {
    /// Step number (0-indexed).
    pub step: u64,
    /// Event payload.
    pub kind: EventKind,
}

/// Event payload variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EventKind {
    /// Step started.
    StepBegin {
        /// Simulation time at the start of the step.
        time: f64,
    },

    /// Step completed.
    StepEnd {
        /// Simulation time after the step.
        time: f64,
        /// Wall-clock duration of the step (seconds).
        wall_time: f64,
    },

    /// A contact contributor finished its prune and narrow phases.
    ContactPass {
        /// Contributor name.
        contributor: String,
        /// Element pairs with non-negative penetration.
        pairs_in_contact: u32,
        /// Largest penetration depth seen.
        max_penetration: f64,
        /// Sum of the applied contact force magnitudes.
        total_force: f64,
    },

    /// Energy snapshot.
    Energy {
        /// Translational plus rotational kinetic energy.
        kinetic: f64,
        /// Bending/twist strain energy.
        bending: f64,
        /// Shear/stretch strain energy.
        shear: f64,
    },

    /// Integration stopped on an error.
    RunAborted {
        /// Last step that completed without error.
        last_valid_step: u64,
        /// Rendered error.
        reason: String,
    },

    /// Free-form event.
    Custom {
        label: String,
        /// JSON-encoded payload.
        payload: String,
    },
}

impl SimulationEvent {
    pub fn new(step: u64, kind: EventKind) -> Self {
        Self { step, kind }
    }

    /// Short machine-readable name of the event kind.
    pub fn name(&self) -> &'static str {
        match self.kind {
            EventKind::StepBegin { .. } => "step_begin",
            EventKind::StepEnd { .. } => "step_end",
            EventKind::ContactPass { .. } => "contact_pass",
            EventKind::Energy { .. } => "energy",
            EventKind::RunAborted { .. } => "run_aborted",
            EventKind::Custom { .. } => "custom",
        }
    }
}
