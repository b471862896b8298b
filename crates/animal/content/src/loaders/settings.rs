//! Behavior settings loader.

use std::path::Path;

use animal_core::BehaviorSettings;
use serde::Deserialize;
use tracing::warn;

use crate::loaders::{LoadResult, read_file};

/// On-disk layout of `behavior.toml`.
///
/// ```toml
/// [behavior]
/// chance_to_eat = 0.7
/// idle_duration_range = { min = 3.0, max = 8.0 }
/// ```
///
/// Missing keys (or a missing `[behavior]` table) fall back to the defaults.
/// Unknown keys are an error.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct BehaviorFile {
    #[serde(default)]
    behavior: BehaviorSettings,
}

/// Loader for behavior settings from TOML files.
pub struct SettingsLoader;

impl SettingsLoader {
    /// Load and normalize behavior settings from a TOML file.
    pub fn load(path: &Path) -> LoadResult<BehaviorSettings> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("{} ({})", e, path.display()))
    }

    /// Parse and normalize behavior settings from TOML text.
    pub fn parse(content: &str) -> LoadResult<BehaviorSettings> {
        let file: BehaviorFile = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse behavior TOML: {}", e))?;

        let settings = file.behavior.normalized();
        if settings != file.behavior {
            warn!(
                "behavior settings were out of range and have been normalized: {:?} -> {:?}",
                file.behavior, settings
            );
        }
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use animal_core::DurationRange;

    #[test]
    fn test_empty_file_uses_defaults() {
        let settings = SettingsLoader::parse("").unwrap();
        assert_eq!(settings, BehaviorSettings::default());
    }

    #[test]
    fn test_partial_table_keeps_other_defaults() {
        let settings = SettingsLoader::parse(
            r#"
            [behavior]
            chance_to_eat = 0.25
            idle_duration_range = { min = 1.0, max = 2.0 }
            "#,
        )
        .unwrap();

        assert_eq!(settings.chance_to_eat, 0.25);
        assert_eq!(settings.idle_duration_range, DurationRange::new(1.0, 2.0));
        assert_eq!(
            settings.low_health_threshold,
            BehaviorSettings::DEFAULT_LOW_HEALTH_THRESHOLD
        );
    }

    #[test]
    fn test_out_of_range_values_are_normalized() {
        let settings = SettingsLoader::parse(
            r#"
            [behavior]
            chance_to_eat = 1.5
            hurt_duration = -2.0
            eating_duration_range = { min = 10.0, max = 5.0 }
            "#,
        )
        .unwrap();

        assert_eq!(settings.chance_to_eat, 1.0);
        assert_eq!(settings.hurt_duration, 0.0);
        assert_eq!(settings.eating_duration_range, DurationRange::new(5.0, 10.0));
        assert!(settings.is_normalized());
    }

    #[test]
    fn test_unknown_table_is_rejected() {
        let err = SettingsLoader::parse("[behaviour]\nchance_to_eat = 0.5\n").unwrap_err();
        assert!(err.to_string().contains("Failed to parse behavior TOML"));
    }

    #[test]
    fn test_misspelled_key_is_rejected() {
        let err = SettingsLoader::parse("[behavior]\nchance_to_eet = 0.5\n").unwrap_err();
        assert!(err.to_string().contains("chance_to_eet"));
    }

    #[test]
    fn test_load_reports_path() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("behavior.toml");
        std::fs::write(&path, "[behavior]\nchance_to_eat = \"often\"\n").unwrap();

        let err = SettingsLoader::load(&path).unwrap_err();
        assert!(err.to_string().contains("behavior.toml"));

        let missing = SettingsLoader::load(&temp.path().join("nope.toml")).unwrap_err();
        assert!(missing.to_string().contains("Failed to read file"));
    }
}
