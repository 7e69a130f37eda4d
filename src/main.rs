use std::path::PathBuf;

use ballpit::{SimulationConfig, SimulationError};
use clap::Parser;
use log::info;

/// A field of glossy spheres that bounce around a box and follow the cursor.
#[derive(Parser, Debug)]
#[command(name = "ballpit", version, about)]
struct Cli {
    /// YAML file with simulation settings. Missing keys keep their defaults.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of bodies, overriding the config file.
    #[arg(short = 'n', long)]
    count: Option<usize>,

    /// Seed for the initial layout.
    #[arg(short, long)]
    seed: Option<u64>,

    /// Disable attraction toward the pointer.
    #[arg(long)]
    no_follow_cursor: bool,

    /// Print the effective settings as YAML and exit without opening a window.
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<(), SimulationError> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => {
            info!("Loading config from {}", path.display());
            SimulationConfig::from_yaml_file(path)?
        }
        None => SimulationConfig::default(),
    };
    if let Some(count) = cli.count {
        config = config.with_count(count);
    }
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }
    if cli.no_follow_cursor {
        config = config.with_follow_cursor(false);
    }
    config.validate()?;

    if cli.print_config {
        print!("{}", config.to_yaml_string()?);
        return Ok(());
    }

    ballpit::run(config)
}
