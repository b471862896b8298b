//! Data-driven animal content.
//!
//! Provides loaders for the two authored data files an animal needs:
//! - behavior settings shared by every state machine (TOML)
//! - species stats consumed by the engine-side collaborators (RON)
//!
//! Authored values are normalized on load; anything the loader had to clamp
//! is logged at `warn` so designers notice it.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ContentFactory, LoadResult, SettingsLoader, SpeciesCatalog, StatsLoader};
