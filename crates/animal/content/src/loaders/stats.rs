//! Species stats loader.
//!
//! `animals.ron` holds a list of species:
//!
//! ```ron
//! [
//!     (name: "Deer", max_health: 80.0, sprint_speed: 9.0),
//!     (name: "Boar", max_health: 140.0, threat_detection_range: 10.0),
//! ]
//! ```
//!
//! Omitted fields take [`AnimalStats::default`] values; unknown fields are an error.

use std::path::Path;

use animal_core::AnimalStats;
use tracing::warn;

use crate::loaders::{LoadResult, read_file};

/// Species stats keyed by name, in file order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SpeciesCatalog {
    species: Vec<AnimalStats>,
}

impl SpeciesCatalog {
    pub fn new(species: Vec<AnimalStats>) -> Self {
        Self { species }
    }

    /// Case-insensitive lookup by species name.
    pub fn get(&self, name: &str) -> Option<&AnimalStats> {
        self.species
            .iter()
            .find(|stats| stats.name.eq_ignore_ascii_case(name))
    }

    pub fn iter(&self) -> impl Iterator<Item = &AnimalStats> {
        self.species.iter()
    }

    pub fn len(&self) -> usize {
        self.species.len()
    }

    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }
}

/// Loader for species stats from RON files.
pub struct StatsLoader;

impl StatsLoader {
    /// Load and normalize a species catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<SpeciesCatalog> {
        let content = read_file(path)?;
        Self::parse(&content).map_err(|e| anyhow::anyhow!("{} ({})", e, path.display()))
    }

    /// Parse and normalize a species catalog from RON text.
    ///
    /// Species names must be unique (ignoring case).
    pub fn parse(content: &str) -> LoadResult<SpeciesCatalog> {
        let raw: Vec<AnimalStats> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse species RON: {}", e))?;

        let mut species: Vec<AnimalStats> = Vec::with_capacity(raw.len());
        for stats in raw {
            if species
                .iter()
                .any(|known| known.name.eq_ignore_ascii_case(&stats.name))
            {
                anyhow::bail!("Duplicate species '{}'", stats.name);
            }

            let normalized = stats.normalized();
            if normalized != stats {
                warn!(
                    "species '{}' had out-of-range stats and has been normalized",
                    stats.name
                );
            }
            species.push(normalized);
        }

        Ok(SpeciesCatalog::new(species))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fills_defaults() {
        let catalog = StatsLoader::parse(
            r#"[
                (name: "Deer", max_health: 80.0, sprint_speed: 9.0),
                (name: "Boar"),
            ]"#,
        )
        .unwrap();

        assert_eq!(catalog.len(), 2);
        let deer = catalog.get("deer").unwrap();
        assert_eq!(deer.max_health, 80.0);
        assert_eq!(deer.sprint_speed, 9.0);
        assert_eq!(deer.walk_speed, AnimalStats::default().walk_speed);
        assert_eq!(catalog.get("Boar").unwrap(), &AnimalStats::new("Boar"));
        assert!(catalog.get("Wolf").is_none());
    }

    #[test]
    fn test_negative_stats_are_clamped() {
        let catalog =
            StatsLoader::parse(r#"[(name: "Rabbit", walk_speed: -1.0, max_health: -5.0)]"#)
                .unwrap();

        let rabbit = catalog.get("Rabbit").unwrap();
        assert_eq!(rabbit.walk_speed, 0.0);
        assert_eq!(rabbit.max_health, 0.0);
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let err = StatsLoader::parse(r#"[(name: "Deer", sprint_sped: 9.0)]"#).unwrap_err();
        assert!(err.to_string().contains("Failed to parse species RON"));
    }

    #[test]
    fn test_detection_angle_is_read_and_clamped() {
        let catalog =
            StatsLoader::parse(r#"[(name: "Owl", threat_detection_angle: 400.0), (name: "Hare")]"#)
                .unwrap();

        assert_eq!(catalog.get("Owl").unwrap().threat_detection_angle, 360.0);
        assert_eq!(catalog.get("Hare").unwrap().threat_detection_angle, 270.0);
    }

    #[test]
    fn test_duplicate_names_are_rejected() {
        let err = StatsLoader::parse(r#"[(name: "Deer"), (name: "DEER")]"#).unwrap_err();
        assert!(err.to_string().contains("Duplicate species"));
    }

    #[test]
    fn test_load_from_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("animals.ron");
        std::fs::write(&path, r#"[(name: "Fox", run_speed: 6.5)]"#).unwrap();

        let catalog = StatsLoader::load(&path).unwrap();
        assert_eq!(catalog.get("fox").unwrap().run_speed, 6.5);
    }
}
