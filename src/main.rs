//! Waddle simulation entry point.
//!
//! Runs a headless population of waddling mobs for a fixed number of ticks
//! and prints a JSON summary on stdout.
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --mode client --ticks 1200 --replication-out deltas.jsonl
//! ```

use std::path::PathBuf;

use clap::Parser;
use log::{error, info, warn};

use waddle::resources::simconfig::{HostMode, SimConfig};
use waddle::simulation::{Simulation, SimulationError, open_sink};

/// Predicted waddle animation simulator
#[derive(Parser)]
#[command(version, about = "Simulates predicted waddle animation state for a crowd of mobs.")]
struct Cli {
    /// INI configuration file (default: ./waddle.ini).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Host side to simulate.
    #[arg(long, value_enum)]
    mode: Option<HostMode>,

    /// Logical ticks to simulate.
    #[arg(long)]
    ticks: Option<u64>,

    /// Number of waddlers to spawn.
    #[arg(long)]
    entities: Option<usize>,

    #[arg(long)]
    seed: Option<u64>,

    /// Speculative replays per tick (client only).
    #[arg(long)]
    prediction_passes: Option<u32>,

    /// Write replicated field deltas as JSON lines to this file.
    #[arg(long, value_name = "PATH")]
    replication_out: Option<PathBuf>,
}

impl Cli {
    /// Build the configuration: INI file first, then command line overrides.
    ///
    /// A missing default file is tolerated. An explicitly named file must load.
    fn into_config(self) -> Result<(SimConfig, Option<PathBuf>), SimulationError> {
        let mut config = match &self.config {
            Some(path) => SimConfig::with_path(path),
            None => SimConfig::new(),
        };
        match config.load_from_file() {
            Ok(()) => {}
            Err(e) if self.config.is_some() => return Err(e.into()),
            Err(e) => warn!("{e}; using defaults"),
        }
        if let Some(mode) = self.mode {
            config.mode = mode;
        }
        if let Some(ticks) = self.ticks {
            config.ticks = ticks;
        }
        if let Some(entities) = self.entities {
            config.entities = entities;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(passes) = self.prediction_passes {
            config.prediction_passes = passes;
        }
        Ok((config, self.replication_out))
    }
}

fn run(cli: Cli) -> Result<String, SimulationError> {
    let (config, replication_out) = cli.into_config()?;
    let sink = open_sink(replication_out.as_deref())?;
    let mut simulation = Simulation::new(config, sink);
    simulation.run();
    let summary = simulation.finish();
    Ok(serde_json::to_string_pretty(&summary)?)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    info!("Waddle simulator starting");
    match run(cli) {
        Ok(summary) => println!("{summary}"),
        Err(e) => {
            error!("{e}");
            std::process::exit(1);
        }
    }
}
