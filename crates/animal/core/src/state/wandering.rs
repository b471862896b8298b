use glam::Vec3;

use super::policy::{self, ForageGate};
use super::{EnterOutcome, StateContext, TransitionRequest};
use crate::sensor::SensorSnapshot;
use crate::types::SpeedTier;

/// Walking to the next waypoint.
#[derive(Clone, Debug, PartialEq)]
pub struct WanderingState {
    pub(crate) destination: Vec3,
    /// Seconds spent on the current leg.
    pub(crate) pause_elapsed: f32,
    pub(crate) forage: ForageGate,
}

impl WanderingState {
    pub(crate) fn new() -> Self {
        Self {
            destination: Vec3::ZERO,
            pause_elapsed: 0.0,
            forage: ForageGate::Undecided,
        }
    }

    pub fn destination(&self) -> Vec3 {
        self.destination
    }

    pub fn pause_elapsed(&self) -> f32 {
        self.pause_elapsed
    }

    pub fn forage(&self) -> ForageGate {
        self.forage
    }

    pub(super) fn enter(&mut self, ctx: &mut StateContext<'_, '_>) -> EnterOutcome {
        let Some(destination) = ctx.env.waypoints.next_destination() else {
            return EnterOutcome::Redirect(TransitionRequest::Idle);
        };
        self.destination = destination;
        self.pause_elapsed = 0.0;
        ctx.env.movement.set_speed_tier(SpeedTier::Walk);
        ctx.env.movement.move_to(destination);
        EnterOutcome::Settled
    }

    pub(super) fn update(
        &mut self,
        dt: f32,
        snapshot: &SensorSnapshot,
        ctx: &mut StateContext<'_, '_>,
    ) -> Option<TransitionRequest> {
        self.pause_elapsed += dt;

        if let Some(request) = policy::respond_to_stimuli(snapshot, &mut self.forage, ctx) {
            return Some(request);
        }

        let arrived = ctx.env.movement.has_reached_target()
            || ctx
                .env
                .waypoints
                .reached(ctx.settings.waypoint_reached_radius);
        arrived.then_some(TransitionRequest::Idle)
    }

    /// Stops unconditionally; a higher-priority transition may have cut the leg short.
    pub(super) fn exit(&mut self, ctx: &mut StateContext<'_, '_>) {
        ctx.env.movement.stop();
    }
}
