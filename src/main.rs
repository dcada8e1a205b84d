//! Fission Chain - headless runner
//!
//! Places atoms, releases neutrons and drives the chain reaction at a fixed
//! cadence, logging renderer deltas through `tracing` and printing a run
//! summary (text or JSON) at the end.

use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use fission_chain::core::config::SimulationConfig;
use fission_chain::core::error::Result;
use fission_chain::render::{Renderer, TracingRenderer};
use fission_chain::scheduler::FixedCadence;
use fission_chain::simulation::{parse_atom_count, LayoutMode, LayoutParams, RunOutput, Simulation};
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset or blank
const DEFAULT_LOG_DIRECTIVES: &str = "fission_chain=info";

/// Neutron chain reaction simulator
#[derive(Parser, Debug)]
#[command(name = "fission")]
#[command(about = "Run a neutron chain reaction over a layout of fissile atoms")]
struct Args {
    /// Number of atoms to place (anything that is not a non-negative integer means 0)
    #[arg(long, default_value = "50")]
    atoms: String,

    /// Atom layout: random, grid or circle
    #[arg(long, default_value = "random")]
    layout: String,

    /// Grid spacing (grid layout only)
    #[arg(long)]
    spacing: Option<f64>,

    /// Circle radius (circle layout only)
    #[arg(long)]
    radius: Option<f64>,

    /// Neutrons to release before the first tick
    #[arg(long, default_value_t = 1)]
    neutrons: usize,

    /// Number of ticks to run
    #[arg(long, default_value_t = 500)]
    ticks: u64,

    /// Stop early once every neutron has left the area
    #[arg(long)]
    stop_when_idle: bool,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// TOML file overriding the default simulation constants
    #[arg(long)]
    config: Option<PathBuf>,

    /// Pace ticks at the configured interval instead of running flat out
    #[arg(long)]
    realtime: bool,

    /// Output format: json or text
    #[arg(long, default_value = "text")]
    format: String,
}

/// A non-blank `RUST_LOG` replaces the default filter entirely
fn log_directives(rust_log: Option<String>) -> String {
    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_LOG_DIRECTIVES.to_string())
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_directives(
            std::env::var(EnvFilter::DEFAULT_ENV).ok(),
        )))
        .with_writer(std::io::stderr)
        .init();

    let config = match &args.config {
        Some(path) => SimulationConfig::load(path)?,
        None => SimulationConfig::default(),
    };

    let mode: LayoutMode = args.layout.parse()?;
    let defaults = LayoutParams::from_config(&config);
    let params = LayoutParams {
        spacing: args.spacing.unwrap_or(defaults.spacing),
        radius: args.radius.unwrap_or(defaults.radius),
    };

    let mut sim = Simulation::new(config, args.seed)?;
    tracing::info!("Fission Chain starting with seed {}", sim.seed());

    let mut renderer = TracingRenderer;
    let count = parse_atom_count(&args.atoms);
    sim.reset_and_place(count, mode, params);
    renderer.reset(sim.atoms(), sim.neutrons());

    for _ in 0..args.neutrons {
        let neutron = sim.inject_neutron();
        renderer.neutron_added(&neutron);
    }
    renderer.metrics(sim.metrics());

    let cadence = if args.realtime {
        FixedCadence::realtime(&sim)
    } else {
        FixedCadence::headless()
    };

    let start = Instant::now();
    let history = if args.stop_when_idle {
        cadence.run_until_quiescent(&mut sim, &mut renderer, args.ticks)
    } else {
        cadence.run_ticks(&mut sim, &mut renderer, args.ticks)
    };
    let output = RunOutput::new(&sim, args.neutrons, history, start.elapsed());

    if args.format == "json" {
        println!("{}", output.to_json()?);
    } else {
        println!("{}", output.summary());
        println!("{}", sim.metrics());
    }

    Ok(())
}
