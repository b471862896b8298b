//! Animal states and their Enter/Update/Exit dispatch.
//!
//! [`AnimalState`] is a closed set of variants, each carrying only the data its
//! behavior needs. The machine drives them through a single dispatch table
//! (the `match` arms below); states never change the active state themselves.
//! Instead, `update` returns a [`TransitionRequest`] describing what should
//! come next and the machine performs the transition.

mod dead;
mod eating;
mod fleeing;
mod hurt;
mod idle;
mod policy;
mod wandering;

pub use dead::DeadState;
pub use eating::{EatingPhase, EatingState};
pub use fleeing::FleeingState;
pub use hurt::HurtState;
pub use idle::IdleState;
pub use policy::{ForageGate, Interrupt};
pub use wandering::WanderingState;

pub(crate) use policy::admits;

use crate::config::BehaviorSettings;
use crate::env::{AnimalEnv, Dice};
use crate::error::InvariantViolation;
use crate::sensor::SensorSnapshot;
use crate::types::Sighting;

/// Fieldless name of a state, used for diagnostics, events and errors.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::AsRefStr,
    strum::IntoStaticStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StateKind {
    Idle,
    Wandering,
    Eating,
    Fleeing,
    Hurt,
    Dead,
}

impl StateKind {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Dead)
    }
}

/// The active behavior of an animal. Exactly one is active at a time.
#[derive(Clone, Debug, PartialEq)]
pub enum AnimalState {
    Idle(IdleState),
    Wandering(WanderingState),
    Eating(EatingState),
    Fleeing(FleeingState),
    Hurt(HurtState),
    Dead(DeadState),
}

/// What a state asks the machine to switch to.
///
/// Requests carry the constructor arguments of the next state; the state
/// itself is only built after the current state has exited.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TransitionRequest {
    Idle,
    Wandering,
    /// `None` means the food vanished before the request could be honored.
    Eating(Option<Sighting>),
    Fleeing(Option<Sighting>),
    Hurt,
    Dead,
}

impl TransitionRequest {
    pub fn target(&self) -> StateKind {
        match self {
            Self::Idle => StateKind::Idle,
            Self::Wandering => StateKind::Wandering,
            Self::Eating(_) => StateKind::Eating,
            Self::Fleeing(_) => StateKind::Fleeing,
            Self::Hurt => StateKind::Hurt,
            Self::Dead => StateKind::Dead,
        }
    }

    /// Builds a fresh, not yet entered, state instance.
    pub(crate) fn into_state(self) -> AnimalState {
        match self {
            Self::Idle => AnimalState::Idle(IdleState::new()),
            Self::Wandering => AnimalState::Wandering(WanderingState::new()),
            Self::Eating(food) => AnimalState::Eating(EatingState::new(food)),
            Self::Fleeing(threat) => AnimalState::Fleeing(FleeingState::new(threat)),
            Self::Hurt => AnimalState::Hurt(HurtState::new()),
            Self::Dead => AnimalState::Dead(DeadState),
        }
    }
}

/// Result of entering a state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum EnterOutcome {
    Settled,
    /// The state's precondition failed on entry; the machine performs exactly
    /// one more transition inside the same call.
    Redirect(TransitionRequest),
}

/// Everything a state may use while entering, updating or exiting.
pub(crate) struct StateContext<'a, 'env> {
    pub(crate) env: &'a mut AnimalEnv<'env>,
    pub(crate) settings: &'a BehaviorSettings,
    pub(crate) dice: &'a mut Dice,
}

impl<'a, 'env> StateContext<'a, 'env> {
    pub(crate) fn new(
        env: &'a mut AnimalEnv<'env>,
        settings: &'a BehaviorSettings,
        dice: &'a mut Dice,
    ) -> Self {
        Self {
            env,
            settings,
            dice,
        }
    }
}

impl AnimalState {
    pub fn kind(&self) -> StateKind {
        match self {
            Self::Idle(_) => StateKind::Idle,
            Self::Wandering(_) => StateKind::Wandering,
            Self::Eating(_) => StateKind::Eating,
            Self::Fleeing(_) => StateKind::Fleeing,
            Self::Hurt(_) => StateKind::Hurt,
            Self::Dead(_) => StateKind::Dead,
        }
    }

    pub fn name(&self) -> &'static str {
        self.kind().into()
    }

    pub(crate) fn enter(&mut self, ctx: &mut StateContext<'_, '_>) -> EnterOutcome {
        match self {
            Self::Idle(state) => state.enter(ctx),
            Self::Wandering(state) => state.enter(ctx),
            Self::Eating(state) => state.enter(ctx),
            Self::Fleeing(state) => state.enter(ctx),
            Self::Hurt(state) => state.enter(ctx),
            Self::Dead(state) => state.enter(ctx),
        }
    }

    pub(crate) fn update(
        &mut self,
        dt: f32,
        snapshot: &SensorSnapshot,
        ctx: &mut StateContext<'_, '_>,
    ) -> Option<TransitionRequest> {
        match self {
            Self::Idle(state) => state.update(dt, snapshot, ctx),
            Self::Wandering(state) => state.update(dt, snapshot, ctx),
            Self::Eating(state) => state.update(dt, snapshot, ctx),
            Self::Fleeing(state) => state.update(dt, snapshot, ctx),
            Self::Hurt(state) => state.update(dt, snapshot, ctx),
            Self::Dead(state) => state.update(dt, snapshot, ctx),
        }
    }

    pub(crate) fn exit(
        &mut self,
        ctx: &mut StateContext<'_, '_>,
    ) -> Result<(), InvariantViolation> {
        match self {
            Self::Idle(_) | Self::Hurt(_) => Ok(()),
            Self::Wandering(state) => {
                state.exit(ctx);
                Ok(())
            }
            Self::Eating(state) => {
                state.exit(ctx);
                Ok(())
            }
            Self::Fleeing(state) => {
                state.exit(ctx);
                Ok(())
            }
            Self::Dead(state) => state.exit(ctx),
        }
    }
}
