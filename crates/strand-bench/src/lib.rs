//! # strand-bench
//!
//! Benchmark suite for the strand rod engine.
//!
//! Provides four procedural scenarios, per-run metrics with CSV export, and
//! spatial convergence studies that run each resolution on its own thread.

pub mod convergence;
pub mod metrics;
pub mod runner;
pub mod scenarios;

pub use convergence::{run_convergence_study, ConvergenceCase, ConvergenceRecord};
pub use metrics::{BenchmarkMetrics, StepTimingSink, StepTimings};
pub use runner::BenchmarkRunner;
pub use scenarios::Scenario;
pub use strand_solver::ScenarioKind;
