//! Headless runtime for animal state machines.
//!
//! Provides the owning entity that drives one [`animal_core::AnimalStateMachine`]
//! per animal, plus simple reference collaborators so the machine can run
//! outside a game engine:
//! - [`controller`] hosts the per-tick orchestration of one animal
//! - [`collaborators`] implements movement, health, detection, waypoints and effects
//! - [`world`] holds the food and threat objects animals perceive
//! - [`simulation`] steps every animal in a shared world
pub mod collaborators;
pub mod controller;
pub mod error;
pub mod simulation;
pub mod world;

pub use collaborators::{
    Body, DamageOutcome, RecordingEffects, RouteOrder, SimDetection, SimHealth, SimMovement,
    WaypointRoute,
};
pub use controller::{
    AnimalController, AnimalSpec, WOUNDED_HEALTH_FRACTION, WOUNDED_SPEED_MULTIPLIER,
};
pub use error::{Result, RuntimeError};
pub use simulation::Simulation;
pub use world::{ObjectKind, World, WorldObject};
