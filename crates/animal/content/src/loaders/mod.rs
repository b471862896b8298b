//! Content loaders for reading animal data from files.
//!
//! Every loader normalizes what it reads with the same rules the state
//! machine would apply, so downstream code only ever sees in-range values.

pub mod factory;
pub mod settings;
pub mod stats;

pub use factory::ContentFactory;
pub use settings::SettingsLoader;
pub use stats::{SpeciesCatalog, StatsLoader};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
