//! Kinematic point mover.
//!
//! No acceleration, steering or terrain: each `integrate` step moves the
//! animal straight towards its target, or along its heading, at the speed of
//! the current tier scaled by the health multiplier.

use animal_core::{AnimalStats, Movement, SpeedTier, Vec3};

/// Distance at which a `move_to` target counts as reached.
pub const STOP_DISTANCE: f32 = 0.1;

#[derive(Clone, Copy, Debug, PartialEq)]
enum Command {
    Halt,
    Towards(Vec3),
    Heading(Vec3),
}

#[derive(Clone, Debug)]
pub struct SimMovement {
    position: Vec3,
    /// Horizontal direction of the last actual step.
    facing: Vec3,
    command: Command,
    tier: SpeedTier,
    walk_speed: f32,
    run_speed: f32,
    sprint_speed: f32,
    health_multiplier: f32,
    enabled: bool,
}

impl SimMovement {
    pub fn new(stats: &AnimalStats, position: Vec3) -> Self {
        Self {
            position,
            facing: Vec3::Z,
            command: Command::Halt,
            tier: SpeedTier::Walk,
            walk_speed: stats.walk_speed,
            run_speed: stats.run_speed,
            sprint_speed: stats.sprint_speed,
            health_multiplier: 1.0,
            enabled: true,
        }
    }

    /// Unit vector the animal looks along. Starts as `+Z`.
    pub fn facing(&self) -> Vec3 {
        self.facing
    }

    pub fn tier(&self) -> SpeedTier {
        self.tier
    }

    /// Effective speed for the current tier, in units per second.
    pub fn speed(&self) -> f32 {
        let base = match self.tier {
            SpeedTier::Walk => self.walk_speed,
            SpeedTier::Run => self.run_speed,
            SpeedTier::Sprint => self.sprint_speed,
        };
        base * self.health_multiplier
    }

    /// Clamped to `[0, 1]`.
    pub fn set_health_multiplier(&mut self, multiplier: f32) {
        self.health_multiplier = if multiplier.is_nan() {
            0.0
        } else {
            multiplier.clamp(0.0, 1.0)
        };
    }

    pub fn health_multiplier(&self) -> f32 {
        self.health_multiplier
    }

    pub fn target(&self) -> Option<Vec3> {
        match self.command {
            Command::Towards(target) => Some(target),
            _ => None,
        }
    }

    pub fn heading(&self) -> Option<Vec3> {
        match self.command {
            Command::Heading(direction) => Some(direction),
            _ => None,
        }
    }

    pub fn is_moving(&self) -> bool {
        self.enabled && self.command != Command::Halt && !self.has_reached_target()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Advances the position by `dt` seconds.
    pub fn integrate(&mut self, dt: f32) {
        if !self.enabled || dt.is_nan() || dt <= 0.0 {
            return;
        }
        let step = self.speed() * dt;
        let before = self.position;
        match self.command {
            Command::Halt => {}
            Command::Towards(target) => {
                let offset = target - self.position;
                let distance = offset.length();
                if distance <= step {
                    self.position = target;
                } else {
                    self.position += offset / distance * step;
                }
            }
            Command::Heading(direction) => {
                self.position += direction * step;
            }
        }
        let moved = self.position - before;
        let turned = Vec3::new(moved.x, 0.0, moved.z).normalize_or_zero();
        if turned != Vec3::ZERO {
            self.facing = turned;
        }
    }
}

impl Movement for SimMovement {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn move_to(&mut self, target: Vec3) {
        if self.enabled {
            self.command = Command::Towards(target);
        }
    }

    fn move_in_direction(&mut self, direction: Vec3) {
        if self.enabled {
            self.command = Command::Heading(direction.normalize_or_zero());
        }
    }

    fn stop(&mut self) {
        self.command = Command::Halt;
    }

    fn set_speed_tier(&mut self, tier: SpeedTier) {
        if self.enabled {
            self.tier = tier;
        }
    }

    fn has_reached_target(&self) -> bool {
        self.target()
            .is_some_and(|target| self.position.distance(target) <= STOP_DISTANCE)
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.command = Command::Halt;
        }
    }
}
