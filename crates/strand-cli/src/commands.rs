//! CLI command implementations.

use strand_bench::convergence::{run_convergence_study, ConvergenceCase};
use strand_bench::metrics::BenchmarkMetrics;
use strand_bench::runner::BenchmarkRunner;
use strand_bench::scenarios::Scenario;
use strand_material::MaterialDatabase;
use strand_solver::{ScenarioKind, SimulationConfig};

type CliResult = Result<(), Box<dyn std::error::Error>>;

fn parse_kind(name: &str) -> Result<ScenarioKind, Box<dyn std::error::Error>> {
    ScenarioKind::all()
        .iter()
        .copied()
        .find(|k| k.name() == name)
        .ok_or_else(|| {
            let available: Vec<&str> = ScenarioKind::all().iter().map(|k| k.name()).collect();
            format!("Unknown scenario: '{name}'. Available: {}", available.join(", ")).into()
        })
}

fn load_config(path: &str) -> Result<SimulationConfig, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)?;
    Ok(SimulationConfig::from_toml_str(&content)?)
}

fn print_metrics(metrics: &BenchmarkMetrics) {
    println!("  Wall time:     {:.3}s", metrics.total_wall_time);
    println!("  Avg step:      {:.3}ms", metrics.avg_step_time * 1000.0);
    println!("  Final KE:      {:.6e}", metrics.final_kinetic_energy);
    println!("  Max displace:  {:.4}m", metrics.max_displacement);
    if metrics.max_penetration > 0.0 {
        println!("  Max penetr.:   {:.4e}m", metrics.max_penetration);
    }
    println!();
}

fn write_csv(metrics: &[BenchmarkMetrics], output_path: Option<&str>) -> CliResult {
    let csv = BenchmarkMetrics::to_csv(metrics);
    if let Some(path) = output_path {
        std::fs::write(path, &csv)?;
        println!("Results written to: {path}");
    } else {
        println!("CSV Output:");
        println!("{csv}");
    }
    Ok(())
}

/// Run the scenario a config file describes.
pub fn simulate(config_path: &str, output_path: Option<&str>) -> CliResult {
    println!("Strand Simulation");
    println!("─────────────────");
    println!("Config: {config_path}");
    println!();

    let config = load_config(config_path)?;
    let mut scenario = Scenario::from_config(&config)?;
    println!(
        "Running: {} ({} elems, {} steps of {:.3e}s, {:?})",
        config.scenario.kind.name(),
        scenario.n_elems,
        scenario.total_steps,
        scenario.dt(),
        config.stepper,
    );

    let metrics = BenchmarkRunner::run(&mut scenario)?;
    print_metrics(&metrics);
    write_csv(&[metrics], output_path)
}

/// Run built-in scenarios for a fixed number of steps.
pub fn benchmark(scenario_name: &str, n_elems: usize, steps: u64, output_path: Option<&str>) -> CliResult {
    println!("Strand Benchmark Suite");
    println!("══════════════════════");
    println!();

    let kinds: Vec<ScenarioKind> = if scenario_name == "all" {
        ScenarioKind::all().to_vec()
    } else {
        vec![parse_kind(scenario_name)?]
    };

    let config = SimulationConfig::default();
    let db = MaterialDatabase::with_defaults();
    let material = db
        .get(&config.scenario.material)
        .ok_or_else(|| format!("Unknown material: '{}'", config.scenario.material))?;

    let mut all_metrics = Vec::new();
    for kind in kinds {
        let mut scenario =
            Scenario::build(kind, n_elems, material, &config.contact, config.gravity())?.truncated(steps);
        println!("Running: {} ({} elems, {} steps)", kind.name(), scenario.n_elems, scenario.total_steps);

        let metrics = BenchmarkRunner::run(&mut scenario).map_err(|e| format!("Benchmark failed: {e}"))?;
        print_metrics(&metrics);
        all_metrics.push(metrics);
    }

    write_csv(&all_metrics, output_path)
}

/// Run one scenario at several resolutions and report errors against the
/// finest.
pub fn convergence(
    scenario_name: &str,
    elems: &[usize],
    final_time: Option<f64>,
    output_path: Option<&str>,
) -> CliResult {
    println!("Strand Convergence Study");
    println!("════════════════════════");
    println!();

    let kind = parse_kind(scenario_name)?;
    let cases: Vec<ConvergenceCase> = elems
        .iter()
        .map(|&n| {
            let case = ConvergenceCase::new(n);
            match final_time {
                Some(t) => case.with_final_time(t),
                None => case,
            }
        })
        .collect();

    let config = SimulationConfig::default();
    let db = MaterialDatabase::with_defaults();
    let material = db
        .get(&config.scenario.material)
        .ok_or_else(|| format!("Unknown material: '{}'", config.scenario.material))?;

    let records = run_convergence_study(kind, material, &config.contact, config.gravity(), &cases)?;

    println!("{:>8} {:>10} {:>12} {:>10} {:>12} {:>12} {:>12}", "elems", "steps", "dt", "wall_s", "l1", "l2", "linf");
    for r in &records {
        println!(
            "{:>8} {:>10} {:>12.4e} {:>10.3} {:>12.4e} {:>12.4e} {:>12.4e}",
            r.n_elems, r.total_steps, r.dt, r.wall_time, r.l1, r.l2, r.linf
        );
    }

    if let Some(path) = output_path {
        std::fs::write(path, serde_json::to_string_pretty(&records)?)?;
        println!();
        println!("Results written to: {path}");
    }
    Ok(())
}

/// Validate a simulation config.
pub fn validate(path: &str) -> CliResult {
    println!("Strand Validator");
    println!("────────────────");
    println!();

    if !path.ends_with(".toml") {
        return Err(format!("Unsupported file format: '{path}'. Use .toml").into());
    }
    println!("Validating config: {path}");
    let config = load_config(path)?;
    let db = MaterialDatabase::with_defaults();
    if db.get(&config.scenario.material).is_none() {
        return Err(format!(
            "Unknown material: '{}'. Available: {}",
            config.scenario.material,
            db.names().join(", ")
        )
        .into());
    }
    println!(
        "Config is valid: {} with {} elems, {} steps over {}s.",
        config.scenario.kind.name(),
        config.scenario.n_elems,
        config.total_steps,
        config.final_time
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_names_parse() {
        for &kind in ScenarioKind::all() {
            assert_eq!(parse_kind(kind.name()).unwrap(), kind);
        }
        assert!(parse_kind("hanging_sheet").is_err());
    }
}
