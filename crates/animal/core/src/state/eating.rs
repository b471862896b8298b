use tracing::debug;

use super::policy;
use super::{EnterOutcome, StateContext, TransitionRequest};
use crate::env::DrawPurpose;
use crate::sensor::SensorSnapshot;
use crate::types::{EffectCue, EntityHandle, Sighting, SpeedTier};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EatingPhase {
    /// Walking towards the food.
    #[default]
    Approaching,
    /// At the food, waiting out the chew timer.
    Chewing,
}

/// Walking to a food object, then eating it.
///
/// Healing happens once, when the chew timer completes. Losing the food or
/// sighting a threat leaves the state without any heal.
#[derive(Clone, Debug, PartialEq)]
pub struct EatingState {
    pub(crate) food: Option<Sighting>,
    pub(crate) phase: EatingPhase,
    pub(crate) chew_elapsed: f32,
    pub(crate) chew_duration: f32,
}

impl EatingState {
    pub(crate) fn new(food: Option<Sighting>) -> Self {
        Self {
            food,
            phase: EatingPhase::Approaching,
            chew_elapsed: 0.0,
            chew_duration: 0.0,
        }
    }

    pub fn food_handle(&self) -> Option<EntityHandle> {
        self.food.map(|food| food.handle)
    }

    pub fn phase(&self) -> EatingPhase {
        self.phase
    }

    pub fn chew_elapsed(&self) -> f32 {
        self.chew_elapsed
    }

    /// Zero until chewing starts.
    pub fn chew_duration(&self) -> f32 {
        self.chew_duration
    }

    pub(super) fn enter(&mut self, ctx: &mut StateContext<'_, '_>) -> EnterOutcome {
        let Some(food) = self.food else {
            debug!("eating entered without food, falling back to idle");
            return EnterOutcome::Redirect(TransitionRequest::Idle);
        };
        self.phase = EatingPhase::Approaching;
        self.chew_elapsed = 0.0;
        ctx.env.movement.set_speed_tier(SpeedTier::Walk);
        ctx.env.movement.move_to(food.position);
        EnterOutcome::Settled
    }

    pub(super) fn update(
        &mut self,
        dt: f32,
        snapshot: &SensorSnapshot,
        ctx: &mut StateContext<'_, '_>,
    ) -> Option<TransitionRequest> {
        if let Some(request) = policy::flee_from_threat(snapshot) {
            return Some(request);
        }

        let Some(food) = self.food else {
            return Some(TransitionRequest::Idle);
        };
        let Some(position) = ctx.env.detection.locate(food.handle) else {
            debug!("food {:?} vanished during {}", food.handle, self.phase);
            self.food = None;
            return Some(TransitionRequest::Idle);
        };
        self.food = Some(Sighting::new(food.handle, position));

        match self.phase {
            EatingPhase::Approaching => {
                if ctx.env.movement.has_reached_target() {
                    self.start_chewing(ctx);
                }
                None
            }
            EatingPhase::Chewing => {
                self.chew_elapsed += dt;
                if self.chew_elapsed < self.chew_duration {
                    return None;
                }
                let amount = ctx.settings.health_restored_from_eating;
                ctx.env.health.heal(amount);
                debug!("finished eating {:?}, healed {}", food.handle, amount);
                Some(TransitionRequest::Idle)
            }
        }
    }

    fn start_chewing(&mut self, ctx: &mut StateContext<'_, '_>) {
        ctx.env.movement.stop();
        self.chew_duration = ctx
            .dice
            .sample(ctx.settings.eating_duration_range, DrawPurpose::ChewDuration);
        self.chew_elapsed = 0.0;
        self.phase = EatingPhase::Chewing;
        ctx.env.effects.trigger(EffectCue::EatStart);
    }

    pub(super) fn exit(&mut self, ctx: &mut StateContext<'_, '_>) {
        ctx.env.effects.trigger(EffectCue::EatStop);
    }
}
