//! Explicit event queue for animal lifecycle notifications.
//!
//! Events are pushed into a queue that the owner passes in through
//! [`crate::AnimalEnv`] and drains after each update. There is no global bus:
//! two animals only share events if their owner hands them the same queue.

use crate::state::StateKind;
use crate::types::AnimalId;

/// Something observable happened to an animal.
#[derive(Clone, Debug, PartialEq)]
pub enum AnimalEvent {
    /// The active state changed. `from` is `None` for the first state.
    StateChanged {
        animal: AnimalId,
        from: Option<StateKind>,
        to: StateKind,
    },

    /// Damage was routed to the animal's health.
    Damaged { animal: AnimalId, amount: f32 },

    /// The animal entered the Dead state.
    Died { animal: AnimalId },
}

impl AnimalEvent {
    pub fn animal(&self) -> AnimalId {
        match self {
            Self::StateChanged { animal, .. }
            | Self::Damaged { animal, .. }
            | Self::Died { animal } => *animal,
        }
    }
}

/// FIFO of pending events.
#[derive(Clone, Debug, Default)]
pub struct EventQueue {
    events: Vec<AnimalEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: AnimalEvent) {
        self.events.push(event);
    }

    /// Removes and yields all pending events in the order they were pushed.
    pub fn drain(&mut self) -> std::vec::Drain<'_, AnimalEvent> {
        self.events.drain(..)
    }

    pub fn iter(&self) -> impl Iterator<Item = &AnimalEvent> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
