//! Generate command - write a random map config

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use hexnav_core::MapConfig;

#[derive(Args)]
pub struct GenerateArgs {
    #[arg(long, default_value = "7")]
    pub width: i32,

    #[arg(long, default_value = "9")]
    pub height: i32,

    /// Number of obstacle tiles
    #[arg(long, default_value = "10")]
    pub obstacles: usize,

    /// Random seed for reproducibility (random if omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Map name stored in the config
    #[arg(long, default_value = "generated")]
    pub name: String,

    /// Output JSON file
    #[arg(long, value_name = "FILE")]
    pub output: PathBuf,
}

/// Run generate command
pub fn run(args: GenerateArgs) -> Result<()> {
    let mut rng = create_rng(args.seed);
    let config = MapConfig::random(&mut rng, &args.name, args.width, args.height, args.obstacles);
    config.grid()?;

    config
        .save(&args.output)
        .with_context(|| format!("Failed to write map: {}", args.output.display()))?;

    tracing::info!(
        "Wrote {}x{} map '{}' with {} obstacles to {}",
        config.width,
        config.height,
        config.name,
        config.obstacles.len(),
        args.output.display()
    );
    Ok(())
}

/// Create RNG from seed or random
fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}
