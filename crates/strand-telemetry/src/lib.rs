//! # strand-telemetry
//!
//! Structured simulation events (step timing, contact passes, energies,
//! aborted runs) dispatched through an [`EventBus`] to pluggable sinks.

pub mod bus;
pub mod events;
pub mod sinks;

pub use bus::{EventBus, EventEmitter};
pub use events::{EventKind, SimulationEvent};
pub use sinks::{EventSink, TracingSink, VecSink};
