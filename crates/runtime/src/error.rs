//! Unified error types surfaced by the runtime.
//!
//! Wraps state machine failures and lookups of animals or world objects that
//! do not exist, so drivers can bubble them up with consistent context.

use animal_core::{AnimalId, EntityHandle, StateMachineError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error, PartialEq)]
pub enum RuntimeError {
    #[error("state machine of {animal} failed")]
    StateMachine {
        animal: AnimalId,
        #[source]
        source: StateMachineError,
    },

    #[error("no animal registered as {animal}")]
    UnknownAnimal { animal: AnimalId },

    #[error("no world object with handle {handle:?}")]
    UnknownObject { handle: EntityHandle },
}

impl RuntimeError {
    pub(crate) fn machine(animal: AnimalId) -> impl FnOnce(StateMachineError) -> Self {
        move |source| Self::StateMachine { animal, source }
    }
}
