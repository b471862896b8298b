//! Content factory for loading animal data from a directory.

use std::path::{Path, PathBuf};

use animal_core::BehaviorSettings;

use crate::loaders::{LoadResult, SettingsLoader, SpeciesCatalog, StatsLoader};

/// Content factory that loads all animal content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── behavior.toml
/// └── animals.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub const SETTINGS_FILE: &'static str = "behavior.toml";
    pub const SPECIES_FILE: &'static str = "animals.ron";

    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load behavior settings from `behavior.toml`.
    pub fn load_settings(&self) -> LoadResult<BehaviorSettings> {
        SettingsLoader::load(&self.data_dir.join(Self::SETTINGS_FILE))
    }

    /// Load the species catalog from `animals.ron`.
    pub fn load_species(&self) -> LoadResult<SpeciesCatalog> {
        StatsLoader::load(&self.data_dir.join(Self::SPECIES_FILE))
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
