//! Benchmark runner: integrates scenarios and collects metrics.

use glam::DVec3;
use strand_material::{MaterialDatabase, RodMaterial};
use strand_solver::{ScenarioKind, SimulationConfig};
use strand_telemetry::EventBus;
use strand_types::StrandResult;

use crate::metrics::{BenchmarkMetrics, StepTimingSink};
use crate::scenarios::Scenario;

/// Runs benchmark scenarios and collects metrics.
pub struct BenchmarkRunner;

impl BenchmarkRunner {
    /// Integrates `scenario` over its full span.
    ///
    /// Step times come from the simulator's telemetry, so any bus already
    /// attached to the scenario is replaced.
    pub fn run(scenario: &mut Scenario) -> StrandResult<BenchmarkMetrics> {
        let initial: Vec<DVec3> = scenario.simulator.systems().rod(scenario.rod)?.position().to_vec();

        let timing = StepTimingSink::new();
        let mut bus = EventBus::new();
        bus.add_sink(Box::new(timing.clone()));
        scenario.simulator.set_telemetry(bus);

        let report = scenario
            .simulator
            .integrate(scenario.final_time, scenario.total_steps)?;

        let systems = scenario.simulator.systems();
        let max_displacement = systems
            .rod(scenario.rod)?
            .position()
            .iter()
            .zip(&initial)
            .map(|(x, x0)| (*x - *x0).length())
            .fold(0.0, f64::max);
        let t = timing.timings();

        let metrics = BenchmarkMetrics {
            scenario: scenario.kind.name().to_string(),
            stepper: report.stepper,
            n_elems: scenario.n_elems,
            timesteps: report.steps,
            final_time: report.final_time,
            total_wall_time: report.wall_time,
            avg_step_time: t.average(),
            min_step_time: t.min_or_zero(),
            max_step_time: t.max,
            final_kinetic_energy: systems.kinetic_energy(),
            max_displacement,
            max_penetration: t.max_penetration,
        };
        tracing::info!(
            scenario = %metrics.scenario,
            steps = metrics.timesteps,
            wall_time = metrics.total_wall_time,
            "benchmark finished"
        );
        Ok(metrics)
    }

    /// Runs every scenario at `n_elems` for `steps` steps of its native size.
    pub fn run_all(n_elems: usize, steps: u64) -> StrandResult<Vec<BenchmarkMetrics>> {
        let config = SimulationConfig::default();
        let material = MaterialDatabase::with_defaults()
            .get(&config.scenario.material)
            .cloned()
            .unwrap_or_else(|| RodMaterial::new("demo_elastic", 5000.0, 1.0e4, 0.5));

        let mut results = Vec::new();
        for &kind in ScenarioKind::all() {
            let mut scenario =
                Scenario::build(kind, n_elems, &material, &config.contact, config.gravity())?.truncated(steps);
            results.push(Self::run(&mut scenario)?);
        }
        Ok(results)
    }
}
