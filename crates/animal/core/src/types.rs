//! Identifiers and small value types shared by the state machine and its collaborators.

use glam::Vec3;

/// Opaque reference to an external object (a food source or a threat).
///
/// Handles may outlive the object they point to. A stale handle is a normal
/// condition, answered by [`crate::Detection::locate`] returning `None`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityHandle(pub u32);

impl EntityHandle {
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// Identity of the animal that owns a state machine.
///
/// Mixed into random seeds so two animals with the same world seed still
/// make independent choices, and carried on every emitted event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnimalId(pub u32);

impl core::fmt::Display for AnimalId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "animal#{}", self.0)
    }
}

/// A detected object: its handle and where it was when detection last saw it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sighting {
    pub handle: EntityHandle,
    pub position: Vec3,
}

impl Sighting {
    pub const fn new(handle: EntityHandle, position: Vec3) -> Self {
        Self { handle, position }
    }
}

/// Movement speed tiers understood by the movement collaborator.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum SpeedTier {
    #[default]
    Walk,
    Run,
    Sprint,
}

/// Symbolic side-effect names routed to animation and audio sinks.
///
/// The core fires these and forgets them; it never waits on or queries playback.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::AsRefStr,
    strum::IntoStaticStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum EffectCue {
    Idle,
    EatStart,
    EatStop,
    Hurt,
    Death,
    Alert,
}
