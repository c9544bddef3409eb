//! The integration driver.
//!
//! ```text
//! let mut sim = Simulator::new(systems, StepperKind::PositionVerlet)?;
//! sim.add_forcing(Box::new(GravityForces::new(g)));
//! sim.add_constraint(Box::new(OneEndFixedRod::at_current_start(sim.systems(), rod)?));
//! let report = sim.integrate(final_time, total_steps)?;
//! ```

use std::time::Instant;

use serde::{Deserialize, Serialize};
use strand_telemetry::{EventBus, EventKind, SimulationEvent};
use strand_types::{StrandError, StrandResult};

use crate::callback::CallBack;
use crate::collection::SystemCollection;
use crate::config::{SimulationConfig, StepperKind};
use crate::constraints::Constraint;
use crate::forcing::{ForceContributor, GravityForces};
use crate::stepper::{stepper_for, StepContext, TimeStepper};

/// Summary of a completed [`Simulator::integrate`] call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegrationReport {
    /// Steps taken by this call.
    pub steps: u64,
    /// Simulation time after the last step.
    pub final_time: f64,
    pub dt: f64,
    /// Wall-clock duration of the call (seconds).
    pub wall_time: f64,
    pub stepper: String,
}

/// Owns a finalized [`SystemCollection`] and advances it in time.
pub struct Simulator {
    systems: SystemCollection,
    stepper: Box<dyn TimeStepper>,
    forcing: Vec<Box<dyn ForceContributor>>,
    constraints: Vec<Box<dyn Constraint>>,
    callbacks: Vec<Box<dyn CallBack>>,
    telemetry: Option<EventBus>,
    time: f64,
    step: u64,
}

impl Simulator {
    /// Finalizes `systems` if needed and selects a stepper.
    pub fn new(mut systems: SystemCollection, stepper: StepperKind) -> StrandResult<Self> {
        if !systems.is_finalized() {
            systems.finalize()?;
        }
        Ok(Self {
            systems,
            stepper: stepper_for(stepper),
            forcing: Vec::new(),
            constraints: Vec::new(),
            callbacks: Vec::new(),
            telemetry: None,
            time: 0.0,
            step: 0,
        })
    }

    /// Builds a simulator for `config`, registering gravity when it is
    /// non-zero.
    pub fn from_config(systems: SystemCollection, config: &SimulationConfig) -> StrandResult<Self> {
        config.validate()?;
        let mut sim = Self::new(systems, config.stepper)?;
        let g = config.gravity();
        if g != glam::DVec3::ZERO {
            sim.add_forcing(Box::new(GravityForces::new(g)));
        }
        Ok(sim)
    }

    /// Replaces the stepper.
    pub fn set_stepper(&mut self, stepper: Box<dyn TimeStepper>) {
        self.stepper = stepper;
    }

    pub fn add_forcing(&mut self, contributor: Box<dyn ForceContributor>) {
        self.forcing.push(contributor);
    }

    pub fn add_constraint(&mut self, constraint: Box<dyn Constraint>) {
        self.constraints.push(constraint);
    }

    pub fn add_callback(&mut self, callback: Box<dyn CallBack>) {
        self.callbacks.push(callback);
    }

    /// Routes step, contact and callback events through `bus`.
    pub fn set_telemetry(&mut self, bus: EventBus) {
        self.telemetry = Some(bus);
    }

    pub fn telemetry_mut(&mut self) -> Option<&mut EventBus> {
        self.telemetry.as_mut()
    }

    pub fn systems(&self) -> &SystemCollection {
        &self.systems
    }

    pub fn systems_mut(&mut self) -> &mut SystemCollection {
        &mut self.systems
    }

    pub fn into_systems(self) -> SystemCollection {
        self.systems
    }

    /// Current simulation time.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Steps completed so far, across all `integrate` calls.
    pub fn step_count(&self) -> u64 {
        self.step
    }

    fn emit(&self, kind: EventKind) {
        if let Some(bus) = &self.telemetry {
            bus.emit(SimulationEvent::new(self.step, kind));
        }
    }

    fn flush(&mut self) {
        if let Some(bus) = &mut self.telemetry {
            bus.flush();
        }
    }

    fn run_callbacks(&mut self) -> StrandResult<()> {
        for callback in &mut self.callbacks {
            callback.on_step(&self.systems, self.time, self.step)?;
        }
        Ok(())
    }

    /// Advances `total_steps` fixed steps of `final_time / total_steps`.
    ///
    /// Callbacks run once before the first step of the first call and after
    /// every step. On any error the run stops with the offending state
    /// intact and [`StrandError::Integration`] names the last completed step.
    pub fn integrate(&mut self, final_time: f64, total_steps: u64) -> StrandResult<IntegrationReport> {
        if !final_time.is_finite() || final_time <= 0.0 || total_steps == 0 {
            return Err(StrandError::InvalidConfig(format!(
                "integration needs a positive time span and step count, got {final_time} over {total_steps} steps"
            )));
        }
        let dt = final_time / total_steps as f64;
        let started = Instant::now();
        tracing::info!(
            stepper = self.stepper.name(),
            final_time,
            total_steps,
            dt,
            "starting integration"
        );

        if self.step == 0 {
            self.run_callbacks().map_err(|e| self.abort(e))?;
        }

        for _ in 0..total_steps {
            let step_started = Instant::now();
            self.emit(EventKind::StepBegin { time: self.time });

            let mut ctx = StepContext {
                systems: &mut self.systems,
                forcing: &mut self.forcing,
                constraints: &mut self.constraints,
            };
            let time = match self.stepper.step(&mut ctx, self.time, dt) {
                Ok(time) => time,
                Err(e) => return Err(self.abort(e)),
            };
            self.time = time;
            self.step += 1;

            self.run_callbacks().map_err(|e| self.abort(e))?;
            if self.telemetry.is_some() {
                for contributor in &self.forcing {
                    if let Some(kind) = contributor.diagnostics() {
                        self.emit(kind);
                    }
                }
                self.emit(EventKind::StepEnd {
                    time: self.time,
                    wall_time: step_started.elapsed().as_secs_f64(),
                });
                self.flush();
            }
        }

        let report = IntegrationReport {
            steps: total_steps,
            final_time: self.time,
            dt,
            wall_time: started.elapsed().as_secs_f64(),
            stepper: self.stepper.name().to_string(),
        };
        if let Some(bus) = &mut self.telemetry {
            bus.finish();
        }
        tracing::info!(
            steps = report.steps,
            time = report.final_time,
            wall_time = report.wall_time,
            "integration finished"
        );
        Ok(report)
    }

    /// Wraps a step error, notifying callbacks and flushing telemetry.
    fn abort(&mut self, error: StrandError) -> StrandError {
        let last_valid_step = self.step;
        tracing::warn!(last_valid_step, time = self.time, %error, "integration aborted");
        for callback in &mut self.callbacks {
            callback.on_abort(last_valid_step, &error);
        }
        if let Some(bus) = &mut self.telemetry {
            bus.finish();
        }
        StrandError::Integration {
            last_valid_step,
            source: Box::new(error),
        }
    }
}

impl std::fmt::Debug for Simulator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulator")
            .field("stepper", &self.stepper.name())
            .field("forcing", &self.forcing.iter().map(|c| c.name()).collect::<Vec<_>>())
            .field("constraints", &self.constraints.iter().map(|c| c.name()).collect::<Vec<_>>())
            .field("callbacks", &self.callbacks.iter().map(|c| c.name()).collect::<Vec<_>>())
            .field("time", &self.time)
            .field("step", &self.step)
            .finish()
    }
}
