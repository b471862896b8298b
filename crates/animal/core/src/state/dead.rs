use super::{EnterOutcome, StateContext, TransitionRequest};
use crate::error::InvariantViolation;
use crate::sensor::SensorSnapshot;
use crate::types::EffectCue;

/// Terminal state. Once entered, the animal never leaves it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DeadState;

impl DeadState {
    pub(super) fn enter(&mut self, ctx: &mut StateContext<'_, '_>) -> EnterOutcome {
        if !ctx.env.health.is_dead() {
            ctx.env.health.kill();
        }
        ctx.env.movement.stop();
        ctx.env.movement.set_enabled(false);
        ctx.env.detection.set_enabled(false);
        ctx.env.effects.trigger(EffectCue::Death);
        EnterOutcome::Settled
    }

    pub(super) fn update(
        &mut self,
        _dt: f32,
        _snapshot: &SensorSnapshot,
        _ctx: &mut StateContext<'_, '_>,
    ) -> Option<TransitionRequest> {
        None
    }

    pub(super) fn exit(&mut self, _ctx: &mut StateContext<'_, '_>) -> Result<(), InvariantViolation> {
        Err(InvariantViolation::DeadStateExit)
    }
}
