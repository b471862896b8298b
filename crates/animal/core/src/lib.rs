//! Deterministic behavior controller for a simulated animal.
//!
//! `animal-core` owns the finite state machine that decides, each tick, what an
//! animal is doing (idling, wandering, eating, fleeing, hurting or dead). Engine
//! services such as movement, health, detection, waypoints and audio/animation
//! are consumed through the traits in [`env`]; the core never inspects them for
//! anything beyond the few booleans and positions it needs to arbitrate.
//!
//! All state mutation flows through [`machine::AnimalStateMachine`], which
//! performs at most one transition per call and runs the Exit → construct →
//! Enter protocol synchronously.
pub mod config;
pub mod env;
pub mod error;
pub mod events;
pub mod machine;
pub mod sensor;
pub mod state;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use config::{AnimalStats, BehaviorSettings, DurationRange};
pub use env::{
    AnimalEnv, ConstantRng, Detection, Dice, DrawPurpose, EffectSink, Health, Movement, PcgRng,
    RngOracle, WaypointSource, compute_seed,
};
pub use error::{
    BehaviorError, ErrorSeverity, InvalidOperation, InvariantViolation, StateMachineError,
};
pub use events::{AnimalEvent, EventQueue};
pub use machine::{AnimalStateMachine, Transition};
pub use sensor::{MAX_TRACKED_THREATS, SensorSnapshot};
pub use state::{
    AnimalState, DeadState, EatingPhase, EatingState, FleeingState, ForageGate, HurtState,
    IdleState, Interrupt, StateKind, TransitionRequest, WanderingState,
};
pub use types::{AnimalId, EffectCue, EntityHandle, Sighting, SpeedTier};

/// Re-exported so collaborators and tests share one vector type.
pub use glam::Vec3;
