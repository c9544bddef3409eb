//! Per-step observers.

use std::sync::{Arc, Mutex};

use glam::DVec3;
use strand_rod::dynamics::{bending_energy, shear_energy};
use strand_telemetry::{EventEmitter, EventKind, SimulationEvent};
use strand_types::{RodId, StrandError, StrandResult};

use crate::collection::SystemCollection;

/// Observer invoked after every completed step (and once before the first).
pub trait CallBack: Send {
    fn on_step(&mut self, systems: &SystemCollection, time: f64, step: u64) -> StrandResult<()>;

    /// Called once when integration stops on an error.
    fn on_abort(&mut self, _last_valid_step: u64, _error: &StrandError) {}

    fn name(&self) -> &str;
}

// ─── PositionRecorder ─────────────────────────────────────────

/// Node positions of one rod sampled over time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PositionHistory {
    pub steps: Vec<u64>,
    pub times: Vec<f64>,
    pub positions: Vec<Vec<DVec3>>,
}

/// Records a rod's node positions every `every` steps.
///
/// Clones share the same history, so a clone kept by the caller can read
/// what the simulator-owned copy recorded.
#[derive(Debug, Clone)]
pub struct PositionRecorder {
    pub rod: RodId,
    pub every: u64,
    history: Arc<Mutex<PositionHistory>>,
}

impl PositionRecorder {
    pub fn new(rod: RodId, every: u64) -> Self {
        Self {
            rod,
            every: every.max(1),
            history: Arc::default(),
        }
    }

    /// Snapshot of everything recorded so far.
    pub fn history(&self) -> PositionHistory {
        match self.history.lock() {
            Ok(h) => h.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl CallBack for PositionRecorder {
    fn on_step(&mut self, systems: &SystemCollection, time: f64, step: u64) -> StrandResult<()> {
        if step % self.every != 0 {
            return Ok(());
        }
        let positions = systems.rod(self.rod)?.position().to_vec();
        let mut history = match self.history.lock() {
            Ok(h) => h,
            Err(poisoned) => poisoned.into_inner(),
        };
        history.steps.push(step);
        history.times.push(time);
        history.positions.push(positions);
        Ok(())
    }

    fn name(&self) -> &str {
        "position_recorder"
    }
}

// ─── TelemetryCallBack ────────────────────────────────────────

/// Emits energy snapshots and aborted-run reports to an event bus.
#[derive(Debug, Clone)]
pub struct TelemetryCallBack {
    emitter: EventEmitter,
    pub every: u64,
}

impl TelemetryCallBack {
    pub fn new(emitter: EventEmitter, every: u64) -> Self {
        Self {
            emitter,
            every: every.max(1),
        }
    }
}

impl CallBack for TelemetryCallBack {
    fn on_step(&mut self, systems: &SystemCollection, _time: f64, step: u64) -> StrandResult<()> {
        if step % self.every != 0 {
            return Ok(());
        }
        let mut bending = 0.0;
        let mut shear = 0.0;
        for block in systems.blocks() {
            for k in 0..block.n_rods() {
                let rod = block.rod(k);
                bending += bending_energy(&rod);
                shear += shear_energy(&rod);
            }
        }
        self.emitter.emit(SimulationEvent::new(
            step,
            EventKind::Energy {
                kinetic: systems.kinetic_energy(),
                bending,
                shear,
            },
        ));
        Ok(())
    }

    fn on_abort(&mut self, last_valid_step: u64, error: &StrandError) {
        self.emitter.emit(SimulationEvent::new(
            last_valid_step + 1,
            EventKind::RunAborted {
                last_valid_step,
                reason: error.to_string(),
            },
        ));
    }

    fn name(&self) -> &str {
        "telemetry"
    }
}
