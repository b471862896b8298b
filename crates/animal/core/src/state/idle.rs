use super::policy::{self, ForageGate};
use super::{EnterOutcome, StateContext, TransitionRequest};
use crate::env::DrawPurpose;
use crate::sensor::SensorSnapshot;
use crate::types::EffectCue;

/// Standing still and looking around for a randomly chosen while.
#[derive(Clone, Debug, PartialEq)]
pub struct IdleState {
    pub(crate) elapsed: f32,
    pub(crate) target_duration: f32,
    pub(crate) forage: ForageGate,
}

impl IdleState {
    pub(crate) fn new() -> Self {
        Self {
            elapsed: 0.0,
            target_duration: 0.0,
            forage: ForageGate::Undecided,
        }
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Sampled on entry from the configured idle range.
    pub fn target_duration(&self) -> f32 {
        self.target_duration
    }

    pub fn forage(&self) -> ForageGate {
        self.forage
    }

    pub(super) fn enter(&mut self, ctx: &mut StateContext<'_, '_>) -> EnterOutcome {
        ctx.env.movement.stop();
        ctx.env.effects.trigger(EffectCue::Idle);
        self.target_duration = ctx
            .dice
            .sample(ctx.settings.idle_duration_range, DrawPurpose::IdleDuration);
        self.elapsed = 0.0;
        EnterOutcome::Settled
    }

    pub(super) fn update(
        &mut self,
        dt: f32,
        snapshot: &SensorSnapshot,
        ctx: &mut StateContext<'_, '_>,
    ) -> Option<TransitionRequest> {
        self.elapsed += dt;

        if let Some(request) = policy::respond_to_stimuli(snapshot, &mut self.forage, ctx) {
            return Some(request);
        }

        (self.elapsed >= self.target_duration).then_some(TransitionRequest::Wandering)
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use crate::config::{BehaviorSettings, DurationRange};
    use crate::state::{AnimalState, ForageGate, StateKind};
    use crate::testing::{Rig, eager_machine, fixed_settings, reluctant_machine, started, step};
    use crate::types::{EffectCue, EntityHandle, Sighting};

    fn idle(machine: &crate::AnimalStateMachine) -> &super::IdleState {
        match machine.current_state() {
            Some(AnimalState::Idle(state)) => state,
            other => panic!("expected Idle, got {other:?}"),
        }
    }

    #[test]
    fn enter_stops_and_samples_duration() {
        let mut rig = Rig::default();
        let settings = BehaviorSettings {
            idle_duration_range: DurationRange::new(3.0, 8.0),
            ..BehaviorSettings::default()
        };
        let mut machine = eager_machine(settings);
        machine.start(&mut rig.env()).unwrap();

        // ConstantRng(0) samples the bottom of the range
        assert_eq!(idle(&machine).target_duration(), 3.0);
        assert_eq!(rig.count(EffectCue::Idle), 1);
        assert_eq!(
            rig.movement.commands,
            vec![crate::testing::MoveCommand::Stop]
        );
    }

    #[test]
    fn wanders_exactly_when_the_timer_expires() {
        let mut rig = Rig::default();
        let mut machine = started(&mut rig);

        assert_eq!(step(&mut machine, &mut rig, 1.0), None);
        assert_eq!(step(&mut machine, &mut rig, 0.5), None);
        let transition = step(&mut machine, &mut rig, 0.5).unwrap();

        assert_eq!(transition.from, Some(StateKind::Idle));
        assert_eq!(transition.to, StateKind::Wandering);
    }

    #[test]
    fn threat_beats_food_and_timer_in_the_same_tick() {
        let mut rig = Rig::default();
        rig.health.fraction = 0.3;
        let mut machine = started(&mut rig);
        rig.detection
            .show_food(EntityHandle(2), Vec3::new(1.0, 0.0, 0.0));
        rig.detection
            .show_threat(EntityHandle(9), Vec3::new(-5.0, 0.0, 0.0));

        let transition = step(&mut machine, &mut rig, 10.0).unwrap();

        assert_eq!(transition.to, StateKind::Fleeing);
        match machine.current_state() {
            Some(AnimalState::Fleeing(state)) => {
                assert_eq!(state.threat_handle(), Some(EntityHandle(9)))
            }
            other => panic!("expected Fleeing, got {other:?}"),
        }
    }

    #[test]
    fn hungry_animal_goes_for_visible_food() {
        let mut rig = Rig::default();
        rig.health.fraction = 0.3;
        let mut machine = started(&mut rig);
        let food = Sighting::new(EntityHandle(4), Vec3::new(2.0, 0.0, 1.0));
        rig.detection.show_food(food.handle, food.position);
        rig.events.drain().for_each(drop);

        let transition = step(&mut machine, &mut rig, 0.1).unwrap();

        assert_eq!(transition.to, StateKind::Eating);
        assert_eq!(rig.events.len(), 1, "exactly one transition");
        match machine.current_state() {
            Some(AnimalState::Eating(state)) => assert_eq!(state.food_handle(), Some(food.handle)),
            other => panic!("expected Eating, got {other:?}"),
        }
    }

    #[test]
    fn healthy_animal_ignores_food() {
        let mut rig = Rig::default();
        let mut machine = started(&mut rig);
        rig.detection
            .show_food(EntityHandle(4), Vec3::new(2.0, 0.0, 0.0));

        assert_eq!(step(&mut machine, &mut rig, 0.1), None);
        assert_eq!(idle(&machine).forage(), ForageGate::Undecided);
    }

    #[test]
    fn declined_forage_is_not_rerolled_in_the_same_instance() {
        let mut rig = Rig::default();
        rig.health.fraction = 0.3;
        let mut machine = reluctant_machine(fixed_settings());
        machine.start(&mut rig.env()).unwrap();
        rig.detection
            .show_food(EntityHandle(4), Vec3::new(2.0, 0.0, 0.0));

        let draws_before = machine.draws();
        assert_eq!(step(&mut machine, &mut rig, 0.1), None);
        assert_eq!(idle(&machine).forage(), ForageGate::Declined);
        assert_eq!(machine.draws(), draws_before + 1);

        for _ in 0..5 {
            assert_eq!(step(&mut machine, &mut rig, 0.1), None);
        }
        assert_eq!(machine.draws(), draws_before + 1, "no re-roll while declined");
    }
}
