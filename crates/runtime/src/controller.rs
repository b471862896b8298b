//! The owning entity of one state machine.
//!
//! [`AnimalController`] keeps the machine and its collaborators together and
//! calls them in a fixed order every tick, replacing callback wiring with
//! explicit, ordered notifications:
//!
//! 1. advance health timers (regeneration, invulnerability)
//! 2. apply queued damage; lethal damage notifies death, other damage notifies hurt
//! 3. slow the animal down while badly wounded
//! 4. scan the world along the current facing and capture a sensor snapshot
//! 5. tick the machine
//! 6. integrate movement

use animal_core::{
    AnimalEvent, AnimalId, AnimalStateMachine, AnimalStats, BehaviorSettings, EventQueue, Health,
    Movement, SensorSnapshot, Transition, Vec3,
};
use tracing::{debug, warn};

use crate::collaborators::{
    Body, DamageOutcome, RecordingEffects, RouteOrder, SimDetection, SimHealth, SimMovement,
    WaypointRoute,
};
use crate::error::{Result, RuntimeError};
use crate::world::World;

/// Below this health fraction the animal moves slower.
pub const WOUNDED_HEALTH_FRACTION: f32 = 0.3;

/// Speed multiplier applied while wounded.
pub const WOUNDED_SPEED_MULTIPLIER: f32 = 0.7;

/// Everything needed to place an animal in the world.
#[derive(Clone, Debug)]
pub struct AnimalSpec {
    pub stats: AnimalStats,
    pub settings: BehaviorSettings,
    pub position: Vec3,
    pub waypoints: Vec<Vec3>,
    pub route_order: RouteOrder,
}

impl AnimalSpec {
    pub fn new(stats: AnimalStats, position: Vec3) -> Self {
        Self {
            stats,
            settings: BehaviorSettings::default(),
            position,
            waypoints: Vec::new(),
            route_order: RouteOrder::default(),
        }
    }

    pub fn with_settings(mut self, settings: BehaviorSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_waypoints(mut self, waypoints: Vec<Vec3>, order: RouteOrder) -> Self {
        self.waypoints = waypoints;
        self.route_order = order;
        self
    }
}

#[derive(Debug)]
pub struct AnimalController {
    id: AnimalId,
    stats: AnimalStats,
    machine: AnimalStateMachine,
    body: Body,
    pending_damage: Vec<f32>,
    pending_kill: bool,
}

impl AnimalController {
    /// Builds an unstarted controller. Stats are normalized here.
    pub fn new(id: AnimalId, spec: AnimalSpec, world_seed: u64) -> Self {
        let stats = spec.stats.normalized();
        if stats != spec.stats {
            warn!("{}: stats for '{}' normalized", id, stats.name);
        }
        let body = Body {
            movement: SimMovement::new(&stats, spec.position),
            health: SimHealth::new(&stats),
            detection: SimDetection::new(&stats),
            waypoints: WaypointRoute::new(
                spec.waypoints,
                spec.route_order,
                spec.position,
                id,
                world_seed,
            ),
            effects: RecordingEffects::new(id),
        };
        Self {
            id,
            stats,
            machine: AnimalStateMachine::with_seed(id, spec.settings, world_seed),
            body,
            pending_damage: Vec::new(),
            pending_kill: false,
        }
    }

    /// Starts the machine. Equivalent to the animal appearing in the world.
    pub fn start(&mut self, events: &mut EventQueue) -> Result<Transition> {
        self.machine
            .start(&mut self.body.env(events))
            .map_err(RuntimeError::machine(self.id))
    }

    /// Damage applied at the start of the next tick.
    pub fn queue_damage(&mut self, amount: f32) {
        self.pending_damage.push(amount);
    }

    /// Death applied at the start of the next tick.
    pub fn queue_kill(&mut self) {
        self.pending_kill = true;
    }

    /// Routes damage through health and notifies the machine right away.
    ///
    /// Safe to call between ticks or from another component's update.
    pub fn take_damage(&mut self, amount: f32, events: &mut EventQueue) -> Result<DamageOutcome> {
        let outcome = self.body.health.apply_damage(amount);
        match outcome {
            DamageOutcome::Ignored => {
                debug!("{}: damage {} ignored", self.id, amount);
            }
            DamageOutcome::Wounded { dealt } => {
                events.push(AnimalEvent::Damaged {
                    animal: self.id,
                    amount: dealt,
                });
                self.machine
                    .notify_damage(&mut self.body.env(events))
                    .map_err(RuntimeError::machine(self.id))?;
            }
            DamageOutcome::Killed { dealt } => {
                events.push(AnimalEvent::Damaged {
                    animal: self.id,
                    amount: dealt,
                });
                self.sync_death(events)?;
            }
        }
        Ok(outcome)
    }

    /// Kills the animal right away.
    pub fn kill(&mut self, events: &mut EventQueue) -> Result<()> {
        self.body.health.kill();
        self.sync_death(events)
    }

    /// Moves the machine to Dead if health says the animal died.
    fn sync_death(&mut self, events: &mut EventQueue) -> Result<()> {
        if self.body.health.is_dead() && !self.machine.is_dead() {
            self.machine
                .notify_death(&mut self.body.env(events))
                .map_err(RuntimeError::machine(self.id))?;
        }
        Ok(())
    }

    /// Runs one simulation step of `dt` seconds.
    pub fn tick(
        &mut self,
        dt: f32,
        world: &World,
        events: &mut EventQueue,
    ) -> Result<Option<Transition>> {
        let dt = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };

        self.body.health.update(dt);
        for amount in std::mem::take(&mut self.pending_damage) {
            self.take_damage(amount, events)?;
        }
        if std::mem::take(&mut self.pending_kill) {
            self.kill(events)?;
        }
        self.sync_death(events)?;

        let multiplier = if self.body.health.health_fraction() < WOUNDED_HEALTH_FRACTION {
            WOUNDED_SPEED_MULTIPLIER
        } else {
            1.0
        };
        self.body.movement.set_health_multiplier(multiplier);

        let position = self.body.movement.position();
        let facing = self.body.movement.facing();
        self.body.detection.scan(position, facing, world);
        self.body.waypoints.set_origin(position);
        let snapshot = SensorSnapshot::capture(&self.body.detection, &self.body.health);

        let transition = self
            .machine
            .tick(dt, &snapshot, &mut self.body.env(events))
            .map_err(RuntimeError::machine(self.id))?;

        self.body.movement.integrate(dt);
        Ok(transition)
    }

    pub fn id(&self) -> AnimalId {
        self.id
    }

    pub fn stats(&self) -> &AnimalStats {
        &self.stats
    }

    pub fn machine(&self) -> &AnimalStateMachine {
        &self.machine
    }

    pub fn state_name(&self) -> &'static str {
        self.machine.current_state_name()
    }

    pub fn position(&self) -> Vec3 {
        self.body.movement.position()
    }

    pub fn is_alive(&self) -> bool {
        !self.body.health.is_dead()
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    pub fn health(&self) -> &SimHealth {
        &self.body.health
    }

    pub fn movement(&self) -> &SimMovement {
        &self.body.movement
    }

    pub fn effects(&self) -> &RecordingEffects {
        &self.body.effects
    }
}
