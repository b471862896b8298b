//! Single-threaded driver for a group of animals sharing one world.

use std::collections::BTreeMap;

use animal_core::{AnimalEvent, AnimalId, EventQueue};
use tracing::{debug, trace};

use crate::collaborators::DamageOutcome;
use crate::controller::{AnimalController, AnimalSpec};
use crate::error::{Result, RuntimeError};
use crate::world::World;

/// Owns the world and every animal in it, and steps them with a fixed `dt`.
///
/// Animals are updated in id order. Events from every animal go into one
/// queue, drained by each call to [`Simulation::step`].
#[derive(Debug)]
pub struct Simulation {
    world: World,
    animals: BTreeMap<AnimalId, AnimalController>,
    events: EventQueue,
    seed: u64,
    next_id: u32,
    elapsed: f32,
    ticks: u64,
}

impl Simulation {
    pub fn new(seed: u64) -> Self {
        Self::with_world(World::new(), seed)
    }

    pub fn with_world(world: World, seed: u64) -> Self {
        Self {
            world,
            animals: BTreeMap::new(),
            events: EventQueue::new(),
            seed,
            next_id: 1,
            elapsed: 0.0,
            ticks: 0,
        }
    }

    /// Places and starts a new animal.
    pub fn spawn(&mut self, spec: AnimalSpec) -> Result<AnimalId> {
        let id = AnimalId(self.next_id);
        self.next_id += 1;

        let name = spec.stats.name.clone();
        let position = spec.position;
        let mut controller = AnimalController::new(id, spec, self.seed);
        controller.start(&mut self.events)?;
        self.animals.insert(id, controller);
        debug!("spawned {} ({}) at {}", id, name, position);
        Ok(id)
    }

    /// Advances every animal by `dt` and returns the events they produced,
    /// together with anything queued between steps.
    pub fn step(&mut self, dt: f32) -> Result<Vec<AnimalEvent>> {
        for controller in self.animals.values_mut() {
            controller.tick(dt, &self.world, &mut self.events)?;
        }
        self.elapsed += dt.max(0.0);
        self.ticks += 1;
        trace!("tick {} at {:.2}s", self.ticks, self.elapsed);
        Ok(self.events.drain().collect())
    }

    /// Steps until `duration` seconds have elapsed, collecting every event.
    pub fn run_for(&mut self, duration: f32, dt: f32) -> Result<Vec<AnimalEvent>> {
        let mut events = Vec::new();
        if dt.is_nan() || dt <= 0.0 || !duration.is_finite() {
            return Ok(events);
        }
        let steps = (duration / dt).ceil() as u64;
        for _ in 0..steps {
            events.extend(self.step(dt)?);
        }
        Ok(events)
    }

    /// Damages an animal right away.
    pub fn damage(&mut self, animal: AnimalId, amount: f32) -> Result<DamageOutcome> {
        let controller = self
            .animals
            .get_mut(&animal)
            .ok_or(RuntimeError::UnknownAnimal { animal })?;
        controller.take_damage(amount, &mut self.events)
    }

    /// Kills an animal right away.
    pub fn kill(&mut self, animal: AnimalId) -> Result<()> {
        let controller = self
            .animals
            .get_mut(&animal)
            .ok_or(RuntimeError::UnknownAnimal { animal })?;
        controller.kill(&mut self.events)
    }

    pub fn animal(&self, animal: AnimalId) -> Result<&AnimalController> {
        self.animals
            .get(&animal)
            .ok_or(RuntimeError::UnknownAnimal { animal })
    }

    pub fn animal_mut(&mut self, animal: AnimalId) -> Result<&mut AnimalController> {
        self.animals
            .get_mut(&animal)
            .ok_or(RuntimeError::UnknownAnimal { animal })
    }

    pub fn animals(&self) -> impl Iterator<Item = &AnimalController> {
        self.animals.values()
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

#[cfg(test)]
mod tests {
    use animal_core::{AnimalStats, StateKind, Vec3};

    use super::*;

    #[test]
    fn spawn_starts_the_animal_and_reports_it() {
        let mut sim = Simulation::new(1);
        let id = sim
            .spawn(AnimalSpec::new(AnimalStats::new("Deer"), Vec3::ZERO))
            .unwrap();

        let events = sim.step(0.1).unwrap();

        assert_eq!(sim.animal(id).unwrap().state_name(), "Idle");
        assert_eq!(
            events.first(),
            Some(&AnimalEvent::StateChanged {
                animal: id,
                from: None,
                to: StateKind::Idle
            })
        );
    }

    #[test]
    fn unknown_animals_are_errors() {
        let mut sim = Simulation::new(1);
        let ghost = AnimalId(99);
        assert_eq!(
            sim.damage(ghost, 5.0).unwrap_err(),
            RuntimeError::UnknownAnimal { animal: ghost }
        );
        assert!(sim.kill(ghost).is_err());
        assert!(sim.animal(ghost).is_err());
    }

    #[test]
    fn run_for_counts_ticks() {
        let mut sim = Simulation::new(1);
        sim.spawn(AnimalSpec::new(AnimalStats::new("Deer"), Vec3::ZERO))
            .unwrap();

        sim.run_for(1.0, 0.25).unwrap();

        assert_eq!(sim.ticks(), 4);
        assert_eq!(sim.elapsed(), 1.0);
        assert!(sim.run_for(1.0, 0.0).unwrap().is_empty());
    }
}
