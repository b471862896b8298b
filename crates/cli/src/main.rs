//! Headless animal simulation.
//!
//! Loads behavior settings and species stats from the content directory, runs
//! the scripted meadow at a fixed tick rate and logs every state change.
//!
//! ```bash
//! RUST_LOG=animal_core=debug ANIMAL_SEED=7 cargo run -p animal-cli
//! ```
mod config;
mod meadow;

use animal_content::{ContentFactory, SpeciesCatalog};
use animal_core::BehaviorSettings;
use anyhow::{Context, Result};
use config::CliConfig;
use meadow::Meadow;

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    setup_logging();

    let config = CliConfig::from_env();
    tracing::info!(
        "Starting meadow: seed={}, {}s at {} Hz, data={}",
        config.seed,
        config.sim_seconds,
        config.tick_hz,
        config.data_dir.display()
    );

    let (settings, species) = load_content(&config)?;
    tracing::info!("Loaded {} species", species.len());

    let mut meadow = Meadow::new(&settings, &species, config.seed)?;
    let summary = meadow.run(config.sim_seconds, config.dt())?;

    tracing::info!(
        "Done after {} ticks: {} transitions, {} deaths",
        summary.ticks,
        summary.transitions,
        summary.deaths
    );
    Ok(())
}

fn setup_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Falls back to built-in defaults when the content directory is missing.
fn load_content(config: &CliConfig) -> Result<(BehaviorSettings, SpeciesCatalog)> {
    if !config.data_dir.is_dir() {
        tracing::warn!(
            "Content directory {} not found, using built-in defaults",
            config.data_dir.display()
        );
        return Ok((BehaviorSettings::default(), SpeciesCatalog::default()));
    }

    let factory = ContentFactory::new(&config.data_dir);
    let settings = factory
        .load_settings()
        .context("failed to load behavior settings")?;
    let species = factory
        .load_species()
        .context("failed to load species catalog")?;
    Ok((settings, species))
}
