use glam::Vec3;
use tracing::trace;

use super::{EnterOutcome, StateContext, TransitionRequest};
use crate::env::DrawPurpose;
use crate::sensor::SensorSnapshot;
use crate::types::{EffectCue, EntityHandle, Sighting, SpeedTier};

/// Sprinting directly away from a threat.
///
/// The threat handle is a weak reference: once it stops being tracked the
/// animal keeps running away from the last position it was seen at until
/// the calm-down timer runs out.
#[derive(Clone, Debug, PartialEq)]
pub struct FleeingState {
    pub(crate) threat: Option<EntityHandle>,
    pub(crate) last_known_position: Option<Vec3>,
    pub(crate) time_since_threat_lost: f32,
}

impl FleeingState {
    pub(crate) fn new(threat: Option<Sighting>) -> Self {
        Self {
            threat: threat.map(|t| t.handle),
            last_known_position: threat.map(|t| t.position),
            time_since_threat_lost: 0.0,
        }
    }

    pub fn threat_handle(&self) -> Option<EntityHandle> {
        self.threat
    }

    pub fn last_known_position(&self) -> Option<Vec3> {
        self.last_known_position
    }

    pub fn time_since_threat_lost(&self) -> f32 {
        self.time_since_threat_lost
    }

    pub(super) fn enter(&mut self, ctx: &mut StateContext<'_, '_>) -> EnterOutcome {
        self.time_since_threat_lost = 0.0;
        ctx.env.movement.set_speed_tier(SpeedTier::Sprint);
        // Replaces whatever move target the previous state left behind.
        let away = self.away_from_threat(ctx);
        ctx.env.movement.move_in_direction(away);
        ctx.env.effects.trigger(EffectCue::Alert);
        EnterOutcome::Settled
    }

    pub(super) fn update(
        &mut self,
        dt: f32,
        snapshot: &SensorSnapshot,
        ctx: &mut StateContext<'_, '_>,
    ) -> Option<TransitionRequest> {
        // The snapshot carries a bounded set; detection has the full answer.
        let tracked = self.threat.is_some_and(|handle| {
            snapshot.threat_still_tracked(handle)
                || ctx.env.detection.is_threat_still_tracked(handle)
        });

        if tracked {
            self.time_since_threat_lost = 0.0;
            if let Some(position) = self.threat.and_then(|h| ctx.env.detection.locate(h)) {
                self.last_known_position = Some(position);
            }
        } else {
            self.time_since_threat_lost += dt;
            if self.time_since_threat_lost >= ctx.settings.flee_duration_after_losing_threat {
                trace!(
                    "threat lost for {:.2}s, calming down",
                    self.time_since_threat_lost
                );
                return Some(TransitionRequest::Idle);
            }
        }

        let direction = self.flee_direction(ctx);
        ctx.env.movement.move_in_direction(direction);
        None
    }

    /// Horizontal unit vector away from the last known threat position, with jitter.
    ///
    /// Zero when there is nothing to run from or the threat stands exactly on
    /// the animal; jitter alone may still produce a direction in that case.
    fn flee_direction(&self, ctx: &mut StateContext<'_, '_>) -> Vec3 {
        let away = self.away_from_threat(ctx);
        let amplitude = ctx.settings.flee_jitter;
        if amplitude <= 0.0 {
            return away;
        }
        let jitter = Vec3::new(
            ctx.dice.jitter(amplitude, DrawPurpose::FleeJitterX),
            0.0,
            ctx.dice.jitter(amplitude, DrawPurpose::FleeJitterZ),
        );
        trace!("flee jitter {:?}", jitter);
        (away + jitter).normalize_or_zero()
    }

    fn away_from_threat(&self, ctx: &StateContext<'_, '_>) -> Vec3 {
        match self.last_known_position {
            Some(threat) => {
                let offset = ctx.env.movement.position() - threat;
                Vec3::new(offset.x, 0.0, offset.z).normalize_or_zero()
            }
            None => Vec3::ZERO,
        }
    }

    pub(super) fn exit(&mut self, ctx: &mut StateContext<'_, '_>) {
        ctx.env.movement.set_speed_tier(SpeedTier::Walk);
    }
}
