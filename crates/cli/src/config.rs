//! Driver configuration read from the environment.
use std::env;
use std::path::PathBuf;

/// Settings for one headless run.
#[derive(Clone, Debug, PartialEq)]
pub struct CliConfig {
    /// Directory holding `behavior.toml` and `animals.ron`.
    pub data_dir: PathBuf,
    /// Simulated seconds to run.
    pub sim_seconds: f32,
    /// Fixed ticks per simulated second.
    pub tick_hz: u32,
    /// World seed shared by every animal's dice.
    pub seed: u64,
}

impl CliConfig {
    pub const DEFAULT_SIM_SECONDS: f32 = 30.0;
    pub const DEFAULT_TICK_HZ: u32 = 20;
    pub const DEFAULT_SEED: u64 = 42;

    /// Construct configuration from environment variables.
    ///
    /// Environment variables:
    /// - `ANIMAL_DATA_DIR` - content directory (default: `data`)
    /// - `ANIMAL_SIM_SECONDS` - simulated duration (default: 30)
    /// - `ANIMAL_TICK_HZ` - ticks per second, at least 1 (default: 20)
    /// - `ANIMAL_SEED` - world seed (default: 42)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(dir) = read_env::<PathBuf>("ANIMAL_DATA_DIR") {
            config.data_dir = dir;
        }
        if let Some(seconds) = read_env::<f32>("ANIMAL_SIM_SECONDS") {
            config.sim_seconds = sanitize_seconds(seconds);
        }
        if let Some(hz) = read_env::<u32>("ANIMAL_TICK_HZ") {
            config.tick_hz = hz.max(1);
        }
        if let Some(seed) = read_env::<u64>("ANIMAL_SEED") {
            config.seed = seed;
        }

        config
    }

    /// Seconds per tick.
    pub fn dt(&self) -> f32 {
        1.0 / self.tick_hz.max(1) as f32
    }
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            sim_seconds: Self::DEFAULT_SIM_SECONDS,
            tick_hz: Self::DEFAULT_TICK_HZ,
            seed: Self::DEFAULT_SEED,
        }
    }
}

fn sanitize_seconds(seconds: f32) -> f32 {
    if seconds.is_finite() && seconds > 0.0 {
        seconds
    } else {
        CliConfig::DEFAULT_SIM_SECONDS
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
