//! Scripted collaborators for unit tests.

use std::collections::{HashMap, VecDeque};

use glam::Vec3;

use crate::config::{BehaviorSettings, DurationRange};
use crate::env::{AnimalEnv, ConstantRng, Detection, Health, Movement, WaypointSource};
use crate::events::EventQueue;
use crate::machine::AnimalStateMachine;
use crate::sensor::SensorSnapshot;
use crate::types::{AnimalId, EffectCue, EntityHandle, Sighting, SpeedTier};

#[derive(Clone, Debug, PartialEq)]
pub enum MoveCommand {
    MoveTo(Vec3),
    Direction(Vec3),
    Stop,
    Speed(SpeedTier),
    Enabled(bool),
}

#[derive(Debug)]
pub struct FakeMovement {
    pub position: Vec3,
    pub reached: bool,
    pub tier: SpeedTier,
    pub enabled: bool,
    pub commands: Vec<MoveCommand>,
}

impl Default for FakeMovement {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            reached: false,
            tier: SpeedTier::Walk,
            enabled: true,
            commands: Vec::new(),
        }
    }
}

impl FakeMovement {
    pub fn last_direction(&self) -> Option<Vec3> {
        self.commands.iter().rev().find_map(|c| match c {
            MoveCommand::Direction(d) => Some(*d),
            _ => None,
        })
    }

    pub fn count(&self, wanted: &MoveCommand) -> usize {
        self.commands.iter().filter(|c| *c == wanted).count()
    }
}

impl Movement for FakeMovement {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn move_to(&mut self, target: Vec3) {
        self.commands.push(MoveCommand::MoveTo(target));
    }

    fn move_in_direction(&mut self, direction: Vec3) {
        self.commands.push(MoveCommand::Direction(direction));
    }

    fn stop(&mut self) {
        self.commands.push(MoveCommand::Stop);
    }

    fn set_speed_tier(&mut self, tier: SpeedTier) {
        self.tier = tier;
        self.commands.push(MoveCommand::Speed(tier));
    }

    fn has_reached_target(&self) -> bool {
        self.reached
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        self.commands.push(MoveCommand::Enabled(enabled));
    }
}

#[derive(Debug, Default)]
pub struct FakeHealth {
    pub fraction: f32,
    pub dead: bool,
    pub heals: Vec<f32>,
    pub kills: u32,
}

impl FakeHealth {
    pub fn with_fraction(fraction: f32) -> Self {
        Self {
            fraction,
            ..Self::default()
        }
    }

    pub fn full() -> Self {
        Self::with_fraction(1.0)
    }
}

impl Health for FakeHealth {
    fn health_fraction(&self) -> f32 {
        self.fraction
    }

    fn take_damage(&mut self, amount: f32) {
        self.fraction = (self.fraction - amount / 100.0).max(0.0);
        self.dead = self.fraction == 0.0;
    }

    fn heal(&mut self, amount: f32) {
        self.heals.push(amount);
        self.fraction = (self.fraction + amount / 100.0).min(1.0);
    }

    fn is_dead(&self) -> bool {
        self.dead
    }

    fn kill(&mut self) {
        self.kills += 1;
        self.dead = true;
        self.fraction = 0.0;
    }
}

#[derive(Debug)]
pub struct FakeDetection {
    pub threat: Option<Sighting>,
    pub food: Option<Sighting>,
    pub tracked: Vec<EntityHandle>,
    pub alive: HashMap<EntityHandle, Vec3>,
    pub enabled: bool,
}

impl Default for FakeDetection {
    fn default() -> Self {
        Self {
            threat: None,
            food: None,
            tracked: Vec::new(),
            alive: HashMap::new(),
            enabled: true,
        }
    }
}

impl FakeDetection {
    /// Makes `handle` the visible, tracked nearest threat.
    pub fn show_threat(&mut self, handle: EntityHandle, position: Vec3) {
        self.threat = Some(Sighting::new(handle, position));
        if !self.tracked.contains(&handle) {
            self.tracked.insert(0, handle);
        }
        self.alive.insert(handle, position);
    }

    /// Threat is no longer detected but still exists.
    pub fn lose_threat(&mut self) {
        self.threat = None;
        self.tracked.clear();
    }

    pub fn show_food(&mut self, handle: EntityHandle, position: Vec3) {
        self.food = Some(Sighting::new(handle, position));
        self.alive.insert(handle, position);
    }

    /// Destroys an object: it stops being detected and can no longer be located.
    pub fn destroy(&mut self, handle: EntityHandle) {
        self.alive.remove(&handle);
        self.tracked.retain(|h| *h != handle);
        if self.food.is_some_and(|f| f.handle == handle) {
            self.food = None;
        }
        if self.threat.is_some_and(|t| t.handle == handle) {
            self.threat = None;
        }
    }
}

impl Detection for FakeDetection {
    fn nearest_threat(&self) -> Option<Sighting> {
        self.threat
    }

    fn nearest_food(&self) -> Option<Sighting> {
        self.food
    }

    fn tracked_threats(&self) -> &[EntityHandle] {
        &self.tracked
    }

    fn locate(&self, handle: EntityHandle) -> Option<Vec3> {
        self.alive.get(&handle).copied()
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}

#[derive(Debug, Default)]
pub struct FakeWaypoints {
    pub destinations: VecDeque<Vec3>,
    pub current: Option<Vec3>,
    pub reached: bool,
}

impl FakeWaypoints {
    pub fn with_points(points: impl IntoIterator<Item = Vec3>) -> Self {
        Self {
            destinations: points.into_iter().collect(),
            ..Self::default()
        }
    }
}

impl WaypointSource for FakeWaypoints {
    fn next_destination(&mut self) -> Option<Vec3> {
        self.current = self.destinations.pop_front();
        self.current
    }

    fn reached(&self, _radius: f32) -> bool {
        self.reached
    }
}

/// All collaborators for one animal.
#[derive(Debug)]
pub struct Rig {
    pub movement: FakeMovement,
    pub health: FakeHealth,
    pub detection: FakeDetection,
    pub waypoints: FakeWaypoints,
    pub effects: Vec<EffectCue>,
    pub events: EventQueue,
}

impl Default for Rig {
    fn default() -> Self {
        Self {
            movement: FakeMovement::default(),
            health: FakeHealth::full(),
            detection: FakeDetection::default(),
            waypoints: FakeWaypoints::with_points([Vec3::new(10.0, 0.0, 0.0)]),
            effects: Vec::new(),
            events: EventQueue::new(),
        }
    }
}

impl Rig {
    pub fn env(&mut self) -> AnimalEnv<'_> {
        AnimalEnv::new(
            &mut self.movement,
            &mut self.health,
            &mut self.detection,
            &mut self.waypoints,
            &mut self.effects,
            &mut self.events,
        )
    }

    pub fn snapshot(&self) -> SensorSnapshot {
        SensorSnapshot::capture(&self.detection, &self.health)
    }

    pub fn count(&self, cue: EffectCue) -> usize {
        self.effects.iter().filter(|c| **c == cue).count()
    }
}

/// Settings with fixed timers so tests can reason about exact tick counts.
pub fn fixed_settings() -> BehaviorSettings {
    BehaviorSettings {
        idle_duration_range: DurationRange::fixed(2.0),
        eating_duration_range: DurationRange::fixed(3.0),
        hurt_duration: 1.0,
        flee_duration_after_losing_threat: 3.0,
        flee_jitter: 0.0,
        ..BehaviorSettings::default()
    }
}

/// Machine whose chance draws always succeed.
pub fn eager_machine(settings: BehaviorSettings) -> AnimalStateMachine {
    AnimalStateMachine::with_rng(AnimalId(1), settings, Box::new(ConstantRng(0)), 0)
}

/// Machine whose chance draws below 1.0 always fail.
pub fn reluctant_machine(settings: BehaviorSettings) -> AnimalStateMachine {
    AnimalStateMachine::with_rng(AnimalId(1), settings, Box::new(ConstantRng(u32::MAX)), 0)
}

/// Started machine in Idle with fixed settings and successful chance draws.
pub fn started(rig: &mut Rig) -> AnimalStateMachine {
    let mut machine = eager_machine(fixed_settings());
    machine.start(&mut rig.env()).unwrap();
    machine
}

/// Ticks once with a freshly captured snapshot.
pub fn step(
    machine: &mut AnimalStateMachine,
    rig: &mut Rig,
    dt: f32,
) -> Option<crate::machine::Transition> {
    let snapshot = rig.snapshot();
    machine.tick(dt, &snapshot, &mut rig.env()).unwrap()
}
