//! Benchmark metrics: data collected during a benchmark run.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use strand_telemetry::{EventKind, EventSink, SimulationEvent};

/// Metrics collected from a benchmark scenario run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkMetrics {
    /// Scenario name.
    pub scenario: String,
    pub stepper: String,
    /// Elements of the reported rod.
    pub n_elems: usize,
    /// Number of steps executed.
    pub timesteps: u64,
    /// Simulated time at the end of the run.
    pub final_time: f64,
    /// Total wall-clock time (seconds).
    pub total_wall_time: f64,
    /// Average wall-clock time per step (seconds).
    pub avg_step_time: f64,
    pub min_step_time: f64,
    pub max_step_time: f64,
    /// Kinetic energy of every body after the last step.
    pub final_kinetic_energy: f64,
    /// Largest node displacement of the reported rod.
    pub max_displacement: f64,
    /// Largest contact penetration seen during the run.
    pub max_penetration: f64,
}

impl BenchmarkMetrics {
    /// CSV header matching [`to_csv_row`](Self::to_csv_row).
    pub fn to_csv_header() -> String {
        "scenario,stepper,n_elems,timesteps,final_time,total_wall_time_s,avg_step_ms,min_step_ms,max_step_ms,final_ke,max_displacement,max_penetration".to_string()
    }

    /// Format this metrics instance as a CSV data row.
    pub fn to_csv_row(&self) -> String {
        format!(
            "{},{},{},{},{:.6},{:.6},{:.4},{:.4},{:.4},{:.6e},{:.6},{:.6e}",
            self.scenario,
            self.stepper,
            self.n_elems,
            self.timesteps,
            self.final_time,
            self.total_wall_time,
            self.avg_step_time * 1000.0,
            self.min_step_time * 1000.0,
            self.max_step_time * 1000.0,
            self.final_kinetic_energy,
            self.max_displacement,
            self.max_penetration,
        )
    }

    /// Format multiple metrics as a complete CSV string.
    pub fn to_csv(metrics: &[BenchmarkMetrics]) -> String {
        let mut csv = Self::to_csv_header();
        for m in metrics {
            csv.push('\n');
            csv.push_str(&m.to_csv_row());
        }
        csv
    }
}

/// Per-step wall times and contact extremes folded from telemetry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepTimings {
    pub steps: u64,
    pub total: f64,
    pub min: f64,
    pub max: f64,
    pub max_penetration: f64,
}

impl Default for StepTimings {
    fn default() -> Self {
        Self {
            steps: 0,
            total: 0.0,
            min: f64::INFINITY,
            max: 0.0,
            max_penetration: 0.0,
        }
    }
}

impl StepTimings {
    pub fn average(&self) -> f64 {
        if self.steps == 0 {
            0.0
        } else {
            self.total / self.steps as f64
        }
    }

    /// Minimum step time, zero when nothing ran.
    pub fn min_or_zero(&self) -> f64 {
        if self.steps == 0 {
            0.0
        } else {
            self.min
        }
    }
}

/// Event sink that keeps running step-time statistics instead of events.
///
/// Clones share the statistics.
#[derive(Debug, Clone, Default)]
pub struct StepTimingSink {
    timings: Arc<Mutex<StepTimings>>,
}

impl StepTimingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn timings(&self) -> StepTimings {
        match self.timings.lock() {
            Ok(t) => *t,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}

impl EventSink for StepTimingSink {
    fn handle(&mut self, event: &SimulationEvent) {
        let mut t = match self.timings.lock() {
            Ok(t) => t,
            Err(poisoned) => poisoned.into_inner(),
        };
        match &event.kind {
            EventKind::StepEnd { wall_time, .. } => {
                t.steps += 1;
                t.total += wall_time;
                t.min = t.min.min(*wall_time);
                t.max = t.max.max(*wall_time);
            }
            EventKind::ContactPass { max_penetration, .. } => {
                t.max_penetration = t.max_penetration.max(*max_penetration);
            }
            _ => {}
        }
    }

    fn name(&self) -> &str {
        "step_timing"
    }
}
