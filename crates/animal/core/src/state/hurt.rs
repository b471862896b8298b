use super::policy;
use super::{EnterOutcome, StateContext, TransitionRequest};
use crate::sensor::SensorSnapshot;
use crate::types::EffectCue;

/// Brief stagger after taking damage. Further damage does not restart it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HurtState {
    pub(crate) elapsed: f32,
}

impl HurtState {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub(super) fn enter(&mut self, ctx: &mut StateContext<'_, '_>) -> EnterOutcome {
        self.elapsed = 0.0;
        ctx.env.movement.stop();
        ctx.env.effects.trigger(EffectCue::Hurt);
        EnterOutcome::Settled
    }

    pub(super) fn update(
        &mut self,
        dt: f32,
        snapshot: &SensorSnapshot,
        ctx: &mut StateContext<'_, '_>,
    ) -> Option<TransitionRequest> {
        self.elapsed += dt;
        if self.elapsed < ctx.settings.hurt_duration {
            return None;
        }
        policy::flee_from_threat(snapshot).or(Some(TransitionRequest::Idle))
    }
}
