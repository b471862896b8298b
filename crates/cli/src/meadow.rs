//! Scripted meadow: a deer walking a loop, a rabbit grazing at random, and a
//! wolf that wanders in, lingers and leaves.

use animal_content::SpeciesCatalog;
use animal_core::{AnimalEvent, AnimalId, AnimalStats, BehaviorSettings, EntityHandle, Vec3};
use animal_runtime::{AnimalSpec, RouteOrder, Simulation};
use anyhow::{Context, Result, ensure};
use tracing::{debug, info, warn};

/// Something the script does to the world at a given time.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Beat {
    WolfAppears(Vec3),
    WolfMoves(Vec3),
    WolfLeaves,
    Damage(Actor, f32),
    Kill(Actor),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Actor {
    Deer,
    Rabbit,
}

const SCRIPT: &[(f32, Beat)] = &[
    (4.0, Beat::Damage(Actor::Rabbit, 15.0)),
    (8.0, Beat::WolfAppears(Vec3::new(30.0, 0.0, 0.0))),
    (10.0, Beat::WolfMoves(Vec3::new(14.0, 0.0, 2.0))),
    (14.0, Beat::WolfLeaves),
    (18.0, Beat::Damage(Actor::Deer, 30.0)),
    (24.0, Beat::Kill(Actor::Rabbit)),
];

/// Per-run totals reported at the end.
#[derive(Debug, Default)]
pub struct Summary {
    pub ticks: u64,
    pub transitions: usize,
    pub deaths: usize,
}

pub struct Meadow {
    sim: Simulation,
    deer: AnimalId,
    rabbit: AnimalId,
    wolf: Option<EntityHandle>,
    next_beat: usize,
}

impl Meadow {
    pub fn new(settings: &BehaviorSettings, species: &SpeciesCatalog, seed: u64) -> Result<Self> {
        let mut sim = Simulation::new(seed);
        sim.world_mut().spawn_food(Vec3::new(3.0, 0.0, 1.0));
        sim.world_mut().spawn_food(Vec3::new(9.0, 0.0, 5.0));

        let route = vec![
            Vec3::new(6.0, 0.0, 0.0),
            Vec3::new(6.0, 0.0, 6.0),
            Vec3::new(0.0, 0.0, 6.0),
            Vec3::new(0.0, 0.0, 0.0),
        ];
        let deer = sim
            .spawn(
                AnimalSpec::new(stats_for(species, "Deer"), Vec3::ZERO)
                    .with_settings(settings.clone())
                    .with_waypoints(route, RouteOrder::Sequential),
            )
            .context("failed to spawn deer")?;
        let rabbit = sim
            .spawn(
                AnimalSpec::new(stats_for(species, "Rabbit"), Vec3::new(8.0, 0.0, 3.0))
                    .with_settings(settings.clone()),
            )
            .context("failed to spawn rabbit")?;

        Ok(Self {
            sim,
            deer,
            rabbit,
            wolf: None,
            next_beat: 0,
        })
    }

    /// Runs the script for `seconds` at a fixed `dt`, logging every event.
    pub fn run(&mut self, seconds: f32, dt: f32) -> Result<Summary> {
        ensure!(dt.is_finite() && dt > 0.0, "tick length must be positive, got {dt}");
        let mut summary = Summary::default();
        while self.sim.elapsed() < seconds {
            self.play_due_beats()?;
            for event in self.sim.step(dt)? {
                log_event(&event, self.sim.elapsed());
                match event {
                    AnimalEvent::StateChanged { .. } => summary.transitions += 1,
                    AnimalEvent::Died { .. } => summary.deaths += 1,
                    AnimalEvent::Damaged { .. } => {}
                }
            }
        }
        summary.ticks = self.sim.ticks();

        for animal in self.sim.animals() {
            info!(
                "{} ({}): {} at {:.1}, health {:.0}/{:.0}",
                animal.id(),
                animal.stats().name,
                animal.state_name(),
                animal.position(),
                animal.health().current(),
                animal.health().max()
            );
            let cues: Vec<&str> = animal.effects().cues().iter().map(|c| c.as_ref()).collect();
            debug!("{} cues: {}", animal.id(), cues.join(", "));
        }
        Ok(summary)
    }

    fn play_due_beats(&mut self) -> Result<()> {
        while let Some(&(at, beat)) = SCRIPT.get(self.next_beat) {
            if self.sim.elapsed() < at {
                break;
            }
            self.next_beat += 1;
            info!("[{:>5.1}s] script: {:?}", self.sim.elapsed(), beat);
            self.play(beat)?;
        }
        Ok(())
    }

    fn play(&mut self, beat: Beat) -> Result<()> {
        match beat {
            Beat::WolfAppears(position) => {
                self.wolf = Some(self.sim.world_mut().spawn_threat(position));
            }
            Beat::WolfMoves(position) => {
                if let Some(wolf) = self.wolf {
                    self.sim.world_mut().move_object(wolf, position)?;
                }
            }
            Beat::WolfLeaves => {
                if let Some(wolf) = self.wolf.take() {
                    self.sim.world_mut().destroy(wolf)?;
                }
            }
            Beat::Damage(actor, amount) => {
                let outcome = self.sim.damage(self.id(actor), amount)?;
                debug!("{:?} damage outcome: {:?}", actor, outcome);
            }
            Beat::Kill(actor) => self.sim.kill(self.id(actor))?,
        }
        Ok(())
    }

    fn id(&self, actor: Actor) -> AnimalId {
        match actor {
            Actor::Deer => self.deer,
            Actor::Rabbit => self.rabbit,
        }
    }
}

fn stats_for(species: &SpeciesCatalog, name: &str) -> AnimalStats {
    match species.get(name) {
        Some(stats) => stats.clone(),
        None => {
            warn!("species '{}' not in catalog, using defaults", name);
            AnimalStats::new(name)
        }
    }
}

fn log_event(event: &AnimalEvent, at: f32) {
    match event {
        AnimalEvent::StateChanged {
            animal,
            from: Some(from),
            to,
        } => info!("[{:>5.1}s] {} {} -> {}", at, animal, from, to),
        AnimalEvent::StateChanged {
            animal,
            from: None,
            to,
        } => info!("[{:>5.1}s] {} starts {}", at, animal, to),
        AnimalEvent::Damaged { animal, amount } => {
            info!("[{:>5.1}s] {} took {:.0} damage", at, animal, amount)
        }
        AnimalEvent::Died { animal } => info!("[{:>5.1}s] {} died", at, animal),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_is_in_time_order() {
        assert!(SCRIPT.windows(2).all(|pair| pair[0].0 <= pair[1].0));
    }

    #[test]
    fn full_run_kills_the_rabbit_once() {
        let mut meadow =
            Meadow::new(&BehaviorSettings::default(), &SpeciesCatalog::default(), 42).unwrap();

        let summary = meadow.run(30.0, 0.05).unwrap();

        assert_eq!(summary.deaths, 1);
        assert!(summary.transitions >= 3);
        assert_eq!(meadow.sim.animal(meadow.rabbit).unwrap().state_name(), "Dead");
        assert!(meadow.sim.animal(meadow.deer).unwrap().is_alive());
    }

    #[test]
    fn zero_tick_is_rejected() {
        let mut meadow =
            Meadow::new(&BehaviorSettings::default(), &SpeciesCatalog::default(), 1).unwrap();
        assert!(meadow.run(5.0, 0.0).is_err());
    }
}
