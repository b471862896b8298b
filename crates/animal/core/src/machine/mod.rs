//! The state machine shell.
//!
//! [`AnimalStateMachine`] owns the active [`AnimalState`] exclusively and is
//! the only place that replaces it. Every public operation performs at most
//! one transition (plus the single sanctioned redirect hop from an Enter
//! that cannot hold) before returning.

mod transition;

use tracing::{debug, warn};

use crate::config::BehaviorSettings;
use crate::env::{AnimalEnv, Dice, PcgRng, RngOracle};
use crate::error::{InvalidOperation, Result};
use crate::events::AnimalEvent;
use crate::sensor::SensorSnapshot;
use crate::state::{AnimalState, Interrupt, StateContext, StateKind, TransitionRequest, admits};
use crate::types::AnimalId;

/// A completed transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transition {
    /// `None` for the initial transition performed by `start`.
    pub from: Option<StateKind>,
    pub to: StateKind,
    /// Set when the requested state refused entry and redirected to `to`.
    pub redirected_from: Option<StateKind>,
}

/// Finite state machine driving one animal.
#[derive(Debug)]
pub struct AnimalStateMachine {
    animal: AnimalId,
    settings: BehaviorSettings,
    dice: Dice,
    state: Option<AnimalState>,
    transitioning: bool,
    transitions: u64,
}

impl AnimalStateMachine {
    /// Creates an unstarted machine using the default PCG oracle and world seed 0.
    pub fn new(animal: AnimalId, settings: BehaviorSettings) -> Self {
        Self::with_seed(animal, settings, 0)
    }

    pub fn with_seed(animal: AnimalId, settings: BehaviorSettings, world_seed: u64) -> Self {
        Self::with_rng(animal, settings, Box::new(PcgRng), world_seed)
    }

    /// Creates an unstarted machine with a custom random oracle.
    ///
    /// Settings are normalized here so states never have to re-check them.
    pub fn with_rng(
        animal: AnimalId,
        settings: BehaviorSettings,
        oracle: Box<dyn RngOracle>,
        world_seed: u64,
    ) -> Self {
        Self {
            animal,
            settings: settings.normalized(),
            dice: Dice::new(oracle, world_seed, animal),
            state: None,
            transitioning: false,
            transitions: 0,
        }
    }

    /// Enters Idle. Fails if a state is already active.
    pub fn start(&mut self, env: &mut AnimalEnv<'_>) -> Result<Transition> {
        if let Some(current) = self.current_kind() {
            warn!("{}: start called while already in {}", self.animal, current);
            return Err(InvalidOperation::AlreadyStarted { current }.into());
        }
        self.transition(TransitionRequest::Idle, env)
    }

    /// Runs the active state's Update and performs the transition it requests, if any.
    ///
    /// A negative or non-finite `dt` is treated as zero.
    pub fn tick(
        &mut self,
        dt: f32,
        snapshot: &SensorSnapshot,
        env: &mut AnimalEnv<'_>,
    ) -> Result<Option<Transition>> {
        let dt = sanitize_dt(dt);
        let Some(state) = self.state.as_mut() else {
            return Err(InvalidOperation::NotStarted.into());
        };

        let request = {
            let mut ctx = StateContext::new(env, &self.settings, &mut self.dice);
            state.update(dt, snapshot, &mut ctx)
        };

        match request {
            Some(request) => self.transition(request, env).map(Some),
            None => Ok(None),
        }
    }

    /// Switches to Hurt unless the animal is already Hurt or Dead.
    ///
    /// Returns `Ok(None)` when the damage was absorbed without a transition.
    pub fn notify_damage(&mut self, env: &mut AnimalEnv<'_>) -> Result<Option<Transition>> {
        let current = self.current_kind();
        if current.is_none() {
            return Err(InvalidOperation::NotStarted.into());
        }
        self.interrupt(Interrupt::Damage, env)
    }

    /// Switches to Dead from any state, including before `start`.
    ///
    /// Repeated calls once Dead are no-ops.
    pub fn notify_death(&mut self, env: &mut AnimalEnv<'_>) -> Result<Option<Transition>> {
        let transition = self.interrupt(Interrupt::Death, env)?;
        if transition.is_some() {
            env.events.push(AnimalEvent::Died {
                animal: self.animal,
            });
        }
        Ok(transition)
    }

    fn interrupt(
        &mut self,
        interrupt: Interrupt,
        env: &mut AnimalEnv<'_>,
    ) -> Result<Option<Transition>> {
        let current = self.current_kind();
        if !admits(current, interrupt) {
            debug!("{}: {:?} ignored in {:?}", self.animal, interrupt, current);
            return Ok(None);
        }
        self.transition(interrupt.request(), env).map(Some)
    }

    /// True only while Idle or Wandering.
    pub fn can_start_eating(&self) -> bool {
        matches!(
            self.current_kind(),
            Some(StateKind::Idle | StateKind::Wandering)
        )
    }

    /// Diagnostic name of the active state, `"Unstarted"` before `start`.
    pub fn current_state_name(&self) -> &'static str {
        self.state.as_ref().map_or("Unstarted", AnimalState::name)
    }

    pub fn current_state(&self) -> Option<&AnimalState> {
        self.state.as_ref()
    }

    pub fn current_kind(&self) -> Option<StateKind> {
        self.state.as_ref().map(AnimalState::kind)
    }

    pub fn is_started(&self) -> bool {
        self.state.is_some()
    }

    pub fn is_dead(&self) -> bool {
        self.current_kind() == Some(StateKind::Dead)
    }

    pub fn animal(&self) -> AnimalId {
        self.animal
    }

    pub fn settings(&self) -> &BehaviorSettings {
        &self.settings
    }

    /// Random draws taken so far.
    pub fn draws(&self) -> u64 {
        self.dice.draws()
    }

    /// Completed transitions, including the initial one.
    pub fn transition_count(&self) -> u64 {
        self.transitions
    }
}

fn sanitize_dt(dt: f32) -> f32 {
    if dt.is_finite() && dt > 0.0 { dt } else { 0.0 }
}
