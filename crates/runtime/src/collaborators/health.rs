//! Health pool with invulnerability frames and delayed regeneration.

use animal_core::{AnimalStats, Health};
use tracing::debug;

/// What happened to a single hit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DamageOutcome {
    /// Dead, invulnerable, or a non-positive amount.
    Ignored,
    Wounded { dealt: f32 },
    Killed { dealt: f32 },
}

#[derive(Clone, Debug)]
pub struct SimHealth {
    max: f32,
    current: f32,
    dead: bool,
    can_regenerate: bool,
    regeneration_rate: f32,
    regeneration_delay: f32,
    invulnerability_duration: f32,
    invulnerable_for: f32,
    since_last_damage: f32,
    regeneration_timer: f32,
}

impl SimHealth {
    pub fn new(stats: &AnimalStats) -> Self {
        Self {
            max: stats.max_health,
            current: stats.max_health,
            dead: false,
            can_regenerate: stats.can_regenerate,
            regeneration_rate: stats.regeneration_rate,
            regeneration_delay: stats.regeneration_delay,
            invulnerability_duration: stats.invulnerability_duration,
            invulnerable_for: 0.0,
            since_last_damage: f32::INFINITY,
            regeneration_timer: 0.0,
        }
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable_for > 0.0
    }

    /// Applies one hit and reports its effect.
    pub fn apply_damage(&mut self, amount: f32) -> DamageOutcome {
        if self.dead || self.is_invulnerable() || amount.is_nan() || amount <= 0.0 {
            return DamageOutcome::Ignored;
        }

        let dealt = amount.min(self.current);
        self.current = (self.current - dealt).max(0.0);
        self.since_last_damage = 0.0;
        self.regeneration_timer = 0.0;
        self.invulnerable_for = self.invulnerability_duration;
        debug!("took {} damage, health {}/{}", dealt, self.current, self.max);

        if self.current <= 0.0 {
            self.die();
            DamageOutcome::Killed { dealt }
        } else {
            DamageOutcome::Wounded { dealt }
        }
    }

    /// Advances invulnerability and regeneration timers.
    ///
    /// Regeneration restores `regeneration_rate` once per full second, after
    /// `regeneration_delay` seconds without damage.
    pub fn update(&mut self, dt: f32) {
        if self.dead {
            return;
        }
        self.invulnerable_for = (self.invulnerable_for - dt).max(0.0);
        self.since_last_damage += dt;

        if !self.can_regenerate || self.current >= self.max {
            return;
        }
        if self.since_last_damage < self.regeneration_delay {
            self.regeneration_timer = 0.0;
            return;
        }
        self.regeneration_timer += dt;
        if self.regeneration_timer >= 1.0 {
            self.regeneration_timer = 0.0;
            self.heal(self.regeneration_rate);
        }
    }

    fn die(&mut self) {
        self.dead = true;
        self.can_regenerate = false;
        self.invulnerable_for = 0.0;
        debug!("died");
    }
}

impl Health for SimHealth {
    fn health_fraction(&self) -> f32 {
        if self.max > 0.0 {
            (self.current / self.max).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    fn take_damage(&mut self, amount: f32) {
        self.apply_damage(amount);
    }

    fn heal(&mut self, amount: f32) {
        if self.dead || amount.is_nan() || amount <= 0.0 || self.current >= self.max {
            return;
        }
        let healed = amount.min(self.max - self.current);
        self.current += healed;
        debug!("healed {}, health {}/{}", healed, self.current, self.max);
    }

    fn is_dead(&self) -> bool {
        self.dead
    }

    fn kill(&mut self) {
        if self.dead {
            return;
        }
        self.current = 0.0;
        self.die();
    }
}
