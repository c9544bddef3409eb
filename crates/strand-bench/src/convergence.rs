//! Spatial convergence studies.
//!
//! The same scenario is run at several resolutions in parallel, one run per
//! rayon task. Each final centerline is compared with the finest run's,
//! sampled at the same normalized arc length.

use std::time::Instant;

use glam::DVec3;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use strand_material::RodMaterial;
use strand_solver::{ContactConfig, ScenarioKind};
use strand_types::{StrandError, StrandResult};

use crate::scenarios::Scenario;

/// One resolution of a convergence study.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConvergenceCase {
    pub n_elems: usize,
    /// Overrides the scenario's native time span, keeping its step size.
    pub final_time: Option<f64>,
}

impl ConvergenceCase {
    pub fn new(n_elems: usize) -> Self {
        Self {
            n_elems,
            final_time: None,
        }
    }

    pub fn with_final_time(mut self, final_time: f64) -> Self {
        self.final_time = Some(final_time);
        self
    }
}

/// Outcome of one resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvergenceRecord {
    pub n_elems: usize,
    pub total_steps: u64,
    pub dt: f64,
    pub wall_time: f64,
    pub final_kinetic_energy: f64,
    /// Mean, root-mean-square and maximum centerline deviation from the
    /// finest run. Zero for the finest run itself.
    pub l1: f64,
    pub l2: f64,
    pub linf: f64,
    #[serde(skip)]
    pub centerline: Vec<DVec3>,
}

/// Runs `kind` once per case, in parallel, and returns one record per case
/// in input order.
pub fn run_convergence_study(
    kind: ScenarioKind,
    material: &RodMaterial,
    contact: &ContactConfig,
    gravity: DVec3,
    cases: &[ConvergenceCase],
) -> StrandResult<Vec<ConvergenceRecord>> {
    if cases.is_empty() {
        return Err(StrandError::InvalidConfig("convergence study needs at least one case".into()));
    }
    tracing::info!(scenario = kind.name(), cases = cases.len(), "starting convergence study");

    let mut records = cases
        .par_iter()
        .map(|case| run_case(kind, material, contact, gravity, case))
        .collect::<StrandResult<Vec<_>>>()?;

    let finest = records
        .iter()
        .max_by_key(|r| r.n_elems)
        .map(|r| r.centerline.clone())
        .unwrap_or_default();
    for record in &mut records {
        let (l1, l2, linf) = error_norms(&record.centerline, &finest);
        record.l1 = l1;
        record.l2 = l2;
        record.linf = linf;
    }
    Ok(records)
}

fn run_case(
    kind: ScenarioKind,
    material: &RodMaterial,
    contact: &ContactConfig,
    gravity: DVec3,
    case: &ConvergenceCase,
) -> StrandResult<ConvergenceRecord> {
    let mut scenario = Scenario::build(kind, case.n_elems, material, contact, gravity)?;
    if let Some(final_time) = case.final_time {
        let dt = scenario.dt();
        scenario = scenario.truncated((final_time / dt).round() as u64);
    }
    let started = Instant::now();
    let report = scenario
        .simulator
        .integrate(scenario.final_time, scenario.total_steps)?;
    let systems = scenario.simulator.systems();
    tracing::debug!(n_elems = scenario.n_elems, steps = report.steps, "convergence case done");

    Ok(ConvergenceRecord {
        n_elems: scenario.n_elems,
        total_steps: report.steps,
        dt: report.dt,
        wall_time: started.elapsed().as_secs_f64(),
        final_kinetic_energy: systems.kinetic_energy(),
        l1: 0.0,
        l2: 0.0,
        linf: 0.0,
        centerline: systems.rod(scenario.rod)?.position().to_vec(),
    })
}

/// Point at normalized arc length `s ∈ [0, 1]` of a uniformly discretized
/// polyline.
fn sample(centerline: &[DVec3], s: f64) -> DVec3 {
    let n = centerline.len() - 1;
    if n == 0 {
        return centerline[0];
    }
    let u = s.clamp(0.0, 1.0) * n as f64;
    let k = (u.floor() as usize).min(n - 1);
    centerline[k].lerp(centerline[k + 1], u - k as f64)
}

/// Deviation of `centerline` from `reference` at every node of `centerline`.
pub fn error_norms(centerline: &[DVec3], reference: &[DVec3]) -> (f64, f64, f64) {
    if centerline.len() < 2 || reference.is_empty() {
        return (0.0, 0.0, 0.0);
    }
    let n = centerline.len() - 1;
    let errors: Vec<f64> = centerline
        .iter()
        .enumerate()
        .map(|(k, x)| (*x - sample(reference, k as f64 / n as f64)).length())
        .collect();
    let count = errors.len() as f64;
    let l1 = errors.iter().sum::<f64>() / count;
    let l2 = (errors.iter().map(|e| e * e).sum::<f64>() / count).sqrt();
    let linf = errors.iter().copied().fold(0.0, f64::max);
    (l1, l2, linf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_lines_have_zero_error() {
        let line: Vec<DVec3> = (0..5).map(|k| DVec3::new(k as f64, 0.0, 0.0)).collect();
        assert_eq!(error_norms(&line, &line), (0.0, 0.0, 0.0));
    }

    #[test]
    fn coarse_line_is_sampled_on_fine_reference() {
        let fine: Vec<DVec3> = (0..=4).map(|k| DVec3::new(k as f64 * 0.25, 0.0, 0.0)).collect();
        let coarse = vec![DVec3::ZERO, DVec3::new(0.5, 0.1, 0.0), DVec3::X];
        let (l1, l2, linf) = error_norms(&coarse, &fine);
        assert!((linf - 0.1).abs() < 1e-12);
        assert!((l1 - 0.1 / 3.0).abs() < 1e-12);
        assert!((l2 - (0.01_f64 / 3.0).sqrt()).abs() < 1e-12);
    }
}
