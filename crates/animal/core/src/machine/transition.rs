//! Exit → construct → Enter protocol.

use tracing::debug;

use super::{AnimalStateMachine, Transition};
use crate::env::AnimalEnv;
use crate::error::{InvariantViolation, Result};
use crate::events::AnimalEvent;
use crate::state::{EnterOutcome, StateContext, TransitionRequest};

impl AnimalStateMachine {
    /// Replaces the active state.
    ///
    /// Exit of the old state completes before the new state is constructed.
    /// If the new state's Enter redirects, the refused state is exited and the
    /// redirect target is entered within the same call; a second redirect is a
    /// fault. Exactly one `StateChanged` event is queued per call.
    pub(super) fn transition(
        &mut self,
        request: TransitionRequest,
        env: &mut AnimalEnv<'_>,
    ) -> Result<Transition> {
        let from = self.current_kind();
        if self.transitioning {
            return Err(InvariantViolation::ReentrantTransition {
                from,
                to: request.target(),
            }
            .into());
        }

        self.transitioning = true;
        let result = self.run_transition(request, env);
        self.transitioning = false;

        let transition = result?;
        self.transitions += 1;
        env.events.push(AnimalEvent::StateChanged {
            animal: self.animal,
            from: transition.from,
            to: transition.to,
        });
        match transition.redirected_from {
            Some(via) => debug!(
                "{}: {:?} -> {} (redirected from {})",
                self.animal, transition.from, transition.to, via
            ),
            None => debug!("{}: {:?} -> {}", self.animal, transition.from, transition.to),
        }
        Ok(transition)
    }

    fn run_transition(
        &mut self,
        request: TransitionRequest,
        env: &mut AnimalEnv<'_>,
    ) -> Result<Transition> {
        let mut ctx = StateContext::new(env, &self.settings, &mut self.dice);

        let from = match self.state.take() {
            Some(mut old) => {
                let kind = old.kind();
                if let Err(violation) = old.exit(&mut ctx) {
                    self.state = Some(old);
                    return Err(violation.into());
                }
                Some(kind)
            }
            None => None,
        };

        let mut next = request.into_state();
        let EnterOutcome::Redirect(hop) = next.enter(&mut ctx) else {
            let to = next.kind();
            self.state = Some(next);
            return Ok(Transition {
                from,
                to,
                redirected_from: None,
            });
        };

        let via = next.kind();
        debug!("{} refused entry, redirecting to {}", via, hop.target());
        if let Err(violation) = next.exit(&mut ctx) {
            self.state = Some(next);
            return Err(violation.into());
        }

        let mut landed = hop.into_state();
        let outcome = landed.enter(&mut ctx);
        let to = landed.kind();
        self.state = Some(landed);
        if let EnterOutcome::Redirect(again) = outcome {
            return Err(InvariantViolation::RedirectChain {
                via: to,
                to: again.target(),
            }
            .into());
        }

        Ok(Transition {
            from,
            to,
            redirected_from: Some(via),
        })
    }
}
