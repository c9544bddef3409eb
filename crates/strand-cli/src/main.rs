//! Strand CLI: scenario runs, benchmarks and convergence studies.

use clap::{ArgAction, Parser, Subcommand};

mod commands;
mod logging;

#[derive(Parser)]
#[command(name = "strand")]
#[command(version, about = "Strand: batched Cosserat rod simulation")]
struct Cli {
    /// Increase log detail (-v info, -vv debug, -vvv trace). `RUST_LOG` overrides.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the scenario described by a config file.
    Simulate {
        /// Path to simulation config (TOML).
        #[arg(short, long, default_value = "simulation.toml")]
        config: String,

        /// Output CSV file path.
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Run built-in scenarios for a fixed number of steps.
    Benchmark {
        /// Which scenario to run (butterfly, cantilever, cylinder_contact, helical_buckling, all).
        #[arg(short, long, default_value = "all")]
        scenario: String,

        /// Elements per rod.
        #[arg(short = 'n', long, default_value_t = 32)]
        elems: usize,

        /// Steps per scenario.
        #[arg(long, default_value_t = 1000)]
        steps: u64,

        /// Output CSV file path.
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Run one scenario at several resolutions in parallel.
    Convergence {
        #[arg(short, long, default_value = "helical_buckling")]
        scenario: String,

        /// Comma-separated element counts.
        #[arg(short = 'n', long, value_delimiter = ',', default_values_t = [100, 200, 400, 800])]
        elems: Vec<usize>,

        /// Simulated time per run; the scenario's own span when omitted.
        #[arg(long)]
        final_time: Option<f64>,

        /// Output JSON file path.
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Validate a simulation config.
    Validate {
        /// Path to config file (TOML).
        path: String,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::setup_logging(cli.verbose) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    let result = match cli.command {
        Commands::Simulate { config, output } => commands::simulate(&config, output.as_deref()),
        Commands::Benchmark {
            scenario,
            elems,
            steps,
            output,
        } => commands::benchmark(&scenario, elems, steps, output.as_deref()),
        Commands::Convergence {
            scenario,
            elems,
            final_time,
            output,
        } => commands::convergence(&scenario, &elems, final_time, output.as_deref()),
        Commands::Validate { path } => commands::validate(&path),
    };

    if let Err(e) = result {
        tracing::error!(error = %e, "command failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
