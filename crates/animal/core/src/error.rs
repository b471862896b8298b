//! Common error infrastructure for animal-core.
//!
//! Only two things can go wrong inside the state machine: the owner misuses it
//! (double start, ticking before start) or an internal invariant is broken
//! (Dead exited, transitions chained from Enter/Exit). Stale food or threat
//! handles are *not* errors; states handle them with local checks.

use crate::state::StateKind;

/// Severity level of an error, used for categorization and logging priority.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorSeverity {
    /// Invalid call from the owner; the machine is unchanged and usable.
    Validation,

    /// Unexpected state inconsistency. Indicates a bug.
    Internal,

    /// The machine can no longer guarantee its invariants.
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all animal-core errors.
pub trait BehaviorError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Misuse of the state machine API by its owner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InvalidOperation {
    #[error("state machine already started (current state: {current})")]
    AlreadyStarted { current: StateKind },

    #[error("state machine has not been started")]
    NotStarted,
}

/// Logic faults inside the transition protocol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InvariantViolation {
    #[error("the Dead state is terminal and must never be exited")]
    DeadStateExit,

    #[error("transition {from:?} -> {to} requested while another transition is running")]
    ReentrantTransition {
        from: Option<StateKind>,
        to: StateKind,
    },

    #[error("entering {via} redirected again to {to}; only one hop is allowed")]
    RedirectChain { via: StateKind, to: StateKind },
}

/// Errors surfaced by [`crate::AnimalStateMachine`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StateMachineError {
    #[error("invalid operation: {0}")]
    InvalidOperation(#[from] InvalidOperation),

    #[error("invariant violation: {0}")]
    InvariantViolation(#[from] InvariantViolation),
}

impl BehaviorError for StateMachineError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InvalidOperation(_) => ErrorSeverity::Validation,
            Self::InvariantViolation(InvariantViolation::DeadStateExit) => ErrorSeverity::Fatal,
            Self::InvariantViolation(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidOperation(InvalidOperation::AlreadyStarted { .. }) => "ALREADY_STARTED",
            Self::InvalidOperation(InvalidOperation::NotStarted) => "NOT_STARTED",
            Self::InvariantViolation(InvariantViolation::DeadStateExit) => "DEAD_STATE_EXIT",
            Self::InvariantViolation(InvariantViolation::ReentrantTransition { .. }) => {
                "REENTRANT_TRANSITION"
            }
            Self::InvariantViolation(InvariantViolation::RedirectChain { .. }) => "REDIRECT_CHAIN",
        }
    }
}

pub type Result<T> = core::result::Result<T, StateMachineError>;
