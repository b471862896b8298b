//! Behavior parameters and species stats.
//!
//! Both structs are authored game-design data. Out-of-range values are
//! normalized once, when the data is loaded or handed to a state machine,
//! instead of being rejected or re-checked at every use.

/// Inclusive range of seconds from which a state samples its timer.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DurationRange {
    pub min: f32,
    pub max: f32,
}

impl DurationRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// A degenerate range that always samples `seconds`.
    pub const fn fixed(seconds: f32) -> Self {
        Self {
            min: seconds,
            max: seconds,
        }
    }

    /// Negative or non-finite ends become zero; reversed ends are swapped.
    #[must_use]
    pub fn normalized(self) -> Self {
        let min = non_negative(self.min);
        let max = non_negative(self.max);
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    /// Maps `t` in `[0, 1]` onto the range.
    pub fn lerp(&self, t: f32) -> f32 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        self.min + (self.max - self.min) * t
    }

    pub fn contains(&self, seconds: f32) -> bool {
        seconds >= self.min && seconds <= self.max
    }
}

/// Tunables consumed by the states to parameterize timers and chance draws.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, deny_unknown_fields)
)]
pub struct BehaviorSettings {
    /// How long an idle animal stands around before wandering off.
    pub idle_duration_range: DurationRange,
    /// Distance at which a waypoint counts as reached.
    pub waypoint_reached_radius: f32,
    /// How long a chewing session lasts once the animal reaches its food.
    pub eating_duration_range: DurationRange,
    /// Health restored when a chewing session completes.
    pub health_restored_from_eating: f32,
    /// Probability (0-1) that a hungry animal goes for food it can see.
    pub chance_to_eat: f32,
    /// Seconds of fleeing after the threat stops being tracked.
    pub flee_duration_after_losing_threat: f32,
    /// Per-axis jitter added to the flee heading before normalization.
    pub flee_jitter: f32,
    /// Seconds spent in the hurt reaction.
    pub hurt_duration: f32,
    /// Health fraction (0-1) below which the animal looks for food.
    pub low_health_threshold: f32,
}

impl BehaviorSettings {
    pub const DEFAULT_IDLE_DURATION: DurationRange = DurationRange::new(3.0, 8.0);
    pub const DEFAULT_WAYPOINT_REACHED_RADIUS: f32 = 1.5;
    pub const DEFAULT_EATING_DURATION: DurationRange = DurationRange::new(5.0, 10.0);
    pub const DEFAULT_HEALTH_RESTORED_FROM_EATING: f32 = 10.0;
    pub const DEFAULT_CHANCE_TO_EAT: f32 = 0.7;
    pub const DEFAULT_FLEE_DURATION_AFTER_LOSING_THREAT: f32 = 3.0;
    pub const DEFAULT_FLEE_JITTER: f32 = 0.2;
    pub const DEFAULT_HURT_DURATION: f32 = 1.0;
    pub const DEFAULT_LOW_HEALTH_THRESHOLD: f32 = 0.8;

    pub const fn new() -> Self {
        Self {
            idle_duration_range: Self::DEFAULT_IDLE_DURATION,
            waypoint_reached_radius: Self::DEFAULT_WAYPOINT_REACHED_RADIUS,
            eating_duration_range: Self::DEFAULT_EATING_DURATION,
            health_restored_from_eating: Self::DEFAULT_HEALTH_RESTORED_FROM_EATING,
            chance_to_eat: Self::DEFAULT_CHANCE_TO_EAT,
            flee_duration_after_losing_threat: Self::DEFAULT_FLEE_DURATION_AFTER_LOSING_THREAT,
            flee_jitter: Self::DEFAULT_FLEE_JITTER,
            hurt_duration: Self::DEFAULT_HURT_DURATION,
            low_health_threshold: Self::DEFAULT_LOW_HEALTH_THRESHOLD,
        }
    }

    /// Returns a copy with every field clamped into its meaningful domain.
    ///
    /// - durations and ranges: negative or non-finite → 0
    /// - chances and thresholds: clamped to `[0, 1]`, NaN → 0
    /// - radii, amounts, jitter: negative or non-finite → 0
    #[must_use]
    pub fn normalized(&self) -> Self {
        Self {
            idle_duration_range: self.idle_duration_range.normalized(),
            waypoint_reached_radius: non_negative(self.waypoint_reached_radius),
            eating_duration_range: self.eating_duration_range.normalized(),
            health_restored_from_eating: non_negative(self.health_restored_from_eating),
            chance_to_eat: unit_interval(self.chance_to_eat),
            flee_duration_after_losing_threat: non_negative(
                self.flee_duration_after_losing_threat,
            ),
            flee_jitter: non_negative(self.flee_jitter),
            hurt_duration: non_negative(self.hurt_duration),
            low_health_threshold: unit_interval(self.low_health_threshold),
        }
    }

    /// True when [`Self::normalized`] would leave the settings untouched.
    pub fn is_normalized(&self) -> bool {
        *self == self.normalized()
    }
}

impl Default for BehaviorSettings {
    fn default() -> Self {
        Self::new()
    }
}

/// Species stats consumed by engine-side collaborators (movement, health, detection).
///
/// The state machine itself never reads these.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, deny_unknown_fields)
)]
pub struct AnimalStats {
    pub name: String,

    // ===== health =====
    pub max_health: f32,
    pub can_regenerate: bool,
    /// Health per second once regeneration kicks in.
    pub regeneration_rate: f32,
    /// Seconds after the last hit before regeneration starts.
    pub regeneration_delay: f32,
    /// Seconds of damage immunity after a hit.
    pub invulnerability_duration: f32,

    // ===== movement =====
    pub walk_speed: f32,
    pub run_speed: f32,
    pub sprint_speed: f32,

    // ===== detection =====
    pub food_detection_range: f32,
    pub threat_detection_range: f32,
    /// Field of view in degrees for spotting threats. 360 sees all around.
    pub threat_detection_angle: f32,
}

impl AnimalStats {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn normalized(&self) -> Self {
        Self {
            name: self.name.clone(),
            max_health: non_negative(self.max_health),
            can_regenerate: self.can_regenerate,
            regeneration_rate: non_negative(self.regeneration_rate),
            regeneration_delay: non_negative(self.regeneration_delay),
            invulnerability_duration: non_negative(self.invulnerability_duration),
            walk_speed: non_negative(self.walk_speed),
            run_speed: non_negative(self.run_speed),
            sprint_speed: non_negative(self.sprint_speed),
            food_detection_range: non_negative(self.food_detection_range),
            threat_detection_range: non_negative(self.threat_detection_range),
            threat_detection_angle: full_turn(self.threat_detection_angle),
        }
    }

    pub fn is_normalized(&self) -> bool {
        *self == self.normalized()
    }

    pub fn speed_for(&self, tier: crate::SpeedTier) -> f32 {
        match tier {
            crate::SpeedTier::Walk => self.walk_speed,
            crate::SpeedTier::Run => self.run_speed,
            crate::SpeedTier::Sprint => self.sprint_speed,
        }
    }
}

impl Default for AnimalStats {
    fn default() -> Self {
        Self {
            name: "Animal".to_owned(),
            max_health: 100.0,
            can_regenerate: true,
            regeneration_rate: 1.0,
            regeneration_delay: 5.0,
            invulnerability_duration: 0.5,
            walk_speed: 2.0,
            run_speed: 5.0,
            sprint_speed: 8.0,
            food_detection_range: 5.0,
            threat_detection_range: 15.0,
            threat_detection_angle: 270.0,
        }
    }
}

fn non_negative(value: f32) -> f32 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

fn full_turn(degrees: f32) -> f32 {
    if degrees.is_nan() {
        0.0
    } else {
        degrees.clamp(0.0, 360.0)
    }
}

fn unit_interval(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}
