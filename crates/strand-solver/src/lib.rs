//! # strand-solver
//!
//! System collection, external loads, boundary conditions and the
//! symplectic time integration of packed rods and rigid bodies.
//!
//! ## Key Types
//!
//! - [`SystemCollection`]: appended rods/cylinders, packed on finalize
//! - [`ForceContributor`]: additive external loads
//! - [`Constraint`]: boundary conditions between sub-steps
//! - [`TimeStepper`]: [`PositionVerlet`] and [`Pefrl`]
//! - [`Simulator`]: fixed-step driver producing an [`IntegrationReport`]

pub mod callback;
pub mod collection;
pub mod config;
pub mod constraints;
pub mod forcing;
pub mod simulator;
pub mod stepper;

pub use callback::{CallBack, PositionHistory, PositionRecorder, TelemetryCallBack};
pub use collection::SystemCollection;
pub use config::{ContactConfig, ScenarioConfig, ScenarioKind, SimulationConfig, StepperKind};
pub use constraints::{Constraint, FixedRigidBody, FreeRod, HelicalBucklingBC, OneEndFixedRod};
pub use forcing::{
    EndpointForces, ForceContributor, GravityForces, MuscleTorques, NoForces, UniformForces,
    UniformTorques,
};
pub use simulator::{IntegrationReport, Simulator};
pub use stepper::{stepper_for, Pefrl, PositionVerlet, StepContext, TimeStepper};
