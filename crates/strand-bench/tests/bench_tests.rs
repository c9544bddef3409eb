//! Integration tests for strand-bench.

use approx::assert_abs_diff_eq;
use glam::DVec3;
use strand_bench::convergence::{run_convergence_study, ConvergenceCase};
use strand_bench::metrics::{BenchmarkMetrics, StepTimingSink};
use strand_bench::runner::BenchmarkRunner;
use strand_bench::scenarios::Scenario;
use strand_material::{MaterialDatabase, RodMaterial};
use strand_solver::{ContactConfig, ScenarioKind, SimulationConfig, StepperKind};
use strand_telemetry::{EventKind, EventSink, SimulationEvent};
use strand_types::StrandError;

fn demo_material() -> RodMaterial {
    MaterialDatabase::with_defaults().get("demo_elastic").cloned().unwrap()
}

fn gravity() -> DVec3 {
    DVec3::new(0.0, 0.0, -9.81)
}

fn sample_metrics(scenario: &str) -> BenchmarkMetrics {
    BenchmarkMetrics {
        scenario: scenario.into(),
        stepper: "position_verlet".into(),
        n_elems: 16,
        timesteps: 100,
        final_time: 0.5,
        total_wall_time: 1.5,
        avg_step_time: 0.015,
        min_step_time: 0.01,
        max_step_time: 0.02,
        final_kinetic_energy: 1e-5,
        max_displacement: 0.5,
        max_penetration: 0.0,
    }
}

// ─── Scenario Tests ───────────────────────────────────────────

#[test]
fn butterfly_is_symmetric_v() {
    let s = Scenario::butterfly(8).unwrap();
    assert_eq!(s.kind, ScenarioKind::Butterfly);
    assert_eq!(s.n_elems, 8);

    let rod = s.simulator.systems().rod(s.rod).unwrap();
    let x = rod.position();
    assert_eq!(x.len(), 9);
    assert_abs_diff_eq!(x[0].x, x[8].x, epsilon = 1e-12);
    assert!(x[4].x > x[0].x);
    // Arms are 45° from the z axis.
    let arm = x[4] - x[0];
    assert_abs_diff_eq!(arm.x, arm.z, epsilon = 1e-12);
    assert_abs_diff_eq!(arm.length(), 1.5, epsilon = 1e-12);
}

#[test]
fn butterfly_rounds_up_to_even_elements() {
    let s = Scenario::butterfly(7).unwrap();
    assert_eq!(s.n_elems, 8);
}

#[test]
fn butterfly_step_scales_with_element_length() {
    let s = Scenario::butterfly(30).unwrap();
    assert_abs_diff_eq!(s.dt(), 0.01 * 0.1, epsilon = 1e-9);
    assert_abs_diff_eq!(s.final_time, 40.0, epsilon = 1e-12);
}

#[test]
fn helical_buckling_kicks_middle_node() {
    let s = Scenario::helical_buckling(10).unwrap();
    let rod = s.simulator.systems().rod(s.rod).unwrap();
    let v = rod.velocity();
    assert_abs_diff_eq!(v[5].y, 1e-6, epsilon = 1e-18);
    assert_eq!(v[4], DVec3::ZERO);
    let x = rod.position();
    assert_abs_diff_eq!(x[10].z, 100.0, epsilon = 1e-9);
}

#[test]
fn cylinder_contact_starts_clear_of_cylinder() {
    let s = Scenario::cylinder_contact(8, &demo_material(), &ContactConfig::default(), gravity()).unwrap();
    let systems = s.simulator.systems();
    assert_eq!(systems.n_cylinders(), 1);
    let rod = systems.rod(s.rod).unwrap();
    assert!(rod.position().iter().all(|x| x.z > 0.2));
}

#[test]
fn truncated_keeps_step_size() {
    let s = Scenario::cantilever(4, &demo_material(), gravity()).unwrap();
    let dt = s.dt();
    let t = s.truncated(7);
    assert_eq!(t.total_steps, 7);
    assert_abs_diff_eq!(t.dt(), dt, epsilon = 1e-15);
}

#[test]
fn from_config_uses_run_settings() {
    let mut config = SimulationConfig::debug();
    config.stepper = StepperKind::Pefrl;
    config.scenario.kind = ScenarioKind::Cantilever;
    config.scenario.n_elems = 6;
    let s = Scenario::from_config(&config).unwrap();
    assert_eq!(s.kind, ScenarioKind::Cantilever);
    assert_eq!(s.n_elems, 6);
    assert_eq!(s.total_steps, 100);
    assert_abs_diff_eq!(s.final_time, 0.1, epsilon = 1e-12);
}

#[test]
fn from_config_rejects_unknown_material() {
    let mut config = SimulationConfig::debug();
    config.scenario.material = "unobtainium".into();
    let err = Scenario::from_config(&config).unwrap_err();
    assert!(matches!(err, StrandError::InvalidConfig(_)));
}

// ─── Runner Tests ─────────────────────────────────────────────

#[test]
fn run_cantilever_sags() {
    let mut scenario = Scenario::cantilever(8, &demo_material(), gravity()).unwrap().truncated(20);
    let metrics = BenchmarkRunner::run(&mut scenario).unwrap();

    assert_eq!(metrics.scenario, "cantilever");
    assert_eq!(metrics.stepper, "position_verlet");
    assert_eq!(metrics.timesteps, 20);
    assert!(metrics.total_wall_time > 0.0);
    assert!(metrics.max_displacement > 0.0);
    assert!(metrics.min_step_time <= metrics.avg_step_time);
    assert!(metrics.avg_step_time <= metrics.max_step_time);
    assert!(metrics.final_kinetic_energy > 0.0);
}

#[test]
fn run_all_scenarios() {
    let results = BenchmarkRunner::run_all(6, 3).unwrap();
    assert_eq!(results.len(), ScenarioKind::all().len());
    for (metrics, kind) in results.iter().zip(ScenarioKind::all()) {
        assert_eq!(metrics.scenario, kind.name());
        assert_eq!(metrics.timesteps, 3);
        assert!(metrics.final_kinetic_energy.is_finite());
    }
}

// ─── Metrics Tests ────────────────────────────────────────────

#[test]
fn metrics_csv_output() {
    let row = sample_metrics("test").to_csv_row();
    assert!(row.starts_with("test,position_verlet,16,100,"));
    assert_eq!(
        row.split(',').count(),
        BenchmarkMetrics::to_csv_header().split(',').count()
    );
}

#[test]
fn metrics_csv_multi() {
    let csv = BenchmarkMetrics::to_csv(&[sample_metrics("a"), sample_metrics("b")]);
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("scenario,"));
}

#[test]
fn metrics_json_round_trip() {
    let metrics = sample_metrics("test");
    let json = serde_json::to_string(&metrics).unwrap();
    let recovered: BenchmarkMetrics = serde_json::from_str(&json).unwrap();
    assert_eq!(recovered, metrics);
}

#[test]
fn step_timing_sink_folds_events() {
    let sink = StepTimingSink::new();
    let mut handle = sink.clone();
    for (step, wall_time) in [0.002, 0.001, 0.003].into_iter().enumerate() {
        handle.handle(&SimulationEvent::new(step as u64, EventKind::StepEnd { time: 0.0, wall_time }));
    }
    handle.handle(&SimulationEvent::new(
        3,
        EventKind::ContactPass {
            contributor: "rod_cylinder_contact".into(),
            pairs_in_contact: 2,
            max_penetration: 0.01,
            total_force: 4.0,
        },
    ));

    let t = sink.timings();
    assert_eq!(t.steps, 3);
    assert_abs_diff_eq!(t.average(), 0.002, epsilon = 1e-15);
    assert_abs_diff_eq!(t.min, 0.001);
    assert_abs_diff_eq!(t.max, 0.003);
    assert_abs_diff_eq!(t.max_penetration, 0.01);
}

#[test]
fn empty_timings_report_zero() {
    let t = StepTimingSink::new().timings();
    assert_eq!(t.average(), 0.0);
    assert_eq!(t.min_or_zero(), 0.0);
}

// ─── Convergence Tests ────────────────────────────────────────

#[test]
fn convergence_records_follow_case_order() {
    let cases = [8, 4, 16].map(|n| ConvergenceCase::new(n).with_final_time(0.005));
    let records = run_convergence_study(
        ScenarioKind::Cantilever,
        &demo_material(),
        &ContactConfig::default(),
        gravity(),
        &cases,
    )
    .unwrap();

    let n: Vec<usize> = records.iter().map(|r| r.n_elems).collect();
    assert_eq!(n, vec![8, 4, 16]);
    for r in &records {
        assert_eq!(r.centerline.len(), r.n_elems + 1);
        assert!(r.l1 <= r.l2 + 1e-15);
        assert!(r.l2 <= r.linf + 1e-15);
    }
    // The finest run is the reference.
    assert_abs_diff_eq!(records[2].linf, 0.0, epsilon = 1e-12);
    assert_eq!(records[1].total_steps, 20);
    assert_eq!(records[2].total_steps, 80);
}

#[test]
fn convergence_needs_cases() {
    let err = run_convergence_study(
        ScenarioKind::Butterfly,
        &demo_material(),
        &ContactConfig::default(),
        gravity(),
        &[],
    )
    .unwrap_err();
    assert!(matches!(err, StrandError::InvalidConfig(_)));
}
