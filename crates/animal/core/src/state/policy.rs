//! Transition priority policy.
//!
//! Priorities, highest first:
//!
//! 1. Death: overrides everything, including Hurt and Eating.
//! 2. Damage: pre-empts every live state except Hurt itself.
//! 3. Threat sighted: beats any food or timer in the same tick.
//! 4. Hungry and food sighted: gated by one chance draw per state instance.
//! 5. State-local timers and arrival checks.
//!
//! Levels 1-2 arrive as out-of-band notifications and go through [`admits`];
//! levels 3-4 are shared by Idle and Wandering through [`respond_to_stimuli`];
//! level 5 lives in each state.

use tracing::debug;

use super::{StateContext, StateKind, TransitionRequest};
use crate::env::DrawPurpose;
use crate::sensor::SensorSnapshot;

/// Out-of-band notifications that interrupt whatever the animal is doing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Interrupt {
    Damage,
    Death,
}

impl Interrupt {
    pub fn request(self) -> TransitionRequest {
        match self {
            Self::Damage => TransitionRequest::Hurt,
            Self::Death => TransitionRequest::Dead,
        }
    }
}

/// Whether `interrupt` may replace the `current` state.
///
/// `current` is `None` before the machine has started; death is still
/// admitted there so an animal killed before its first tick ends up Dead.
pub(crate) fn admits(current: Option<StateKind>, interrupt: Interrupt) -> bool {
    match (interrupt, current) {
        (_, Some(StateKind::Dead)) => false,
        (Interrupt::Death, _) => true,
        (Interrupt::Damage, Some(StateKind::Hurt)) => false,
        (Interrupt::Damage, Some(_)) => true,
        (Interrupt::Damage, None) => false,
    }
}

/// Outcome of the chance-to-eat roll for one Idle or Wandering instance.
///
/// The roll happens the first time the animal is hungry and sees food. A
/// declined roll sticks until the state is left, so the animal does not flap
/// between considering and ignoring food every tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ForageGate {
    #[default]
    Undecided,
    Declined,
}

/// Threat, then hunger. Shared by every state that can be distracted.
pub(super) fn respond_to_stimuli(
    snapshot: &SensorSnapshot,
    gate: &mut ForageGate,
    ctx: &mut StateContext<'_, '_>,
) -> Option<TransitionRequest> {
    if let Some(request) = flee_from_threat(snapshot) {
        return Some(request);
    }
    forage(snapshot, gate, ctx)
}

pub(super) fn flee_from_threat(snapshot: &SensorSnapshot) -> Option<TransitionRequest> {
    snapshot
        .nearest_threat()
        .map(|threat| TransitionRequest::Fleeing(Some(threat)))
}

fn forage(
    snapshot: &SensorSnapshot,
    gate: &mut ForageGate,
    ctx: &mut StateContext<'_, '_>,
) -> Option<TransitionRequest> {
    if *gate == ForageGate::Declined {
        return None;
    }
    if snapshot.health_fraction() >= ctx.settings.low_health_threshold {
        return None;
    }
    let food = snapshot.nearest_food()?;

    if ctx
        .dice
        .chance(ctx.settings.chance_to_eat, DrawPurpose::ForageChance)
    {
        debug!(
            "forage accepted: food={:?}, health={:.2}",
            food.handle,
            snapshot.health_fraction()
        );
        Some(TransitionRequest::Eating(Some(food)))
    } else {
        debug!(
            "forage declined for this state instance: food={:?}",
            food.handle
        );
        *gate = ForageGate::Declined;
        None
    }
}
