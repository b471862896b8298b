//! Effect sink that keeps every cue in order.

use animal_core::{AnimalId, EffectCue, EffectSink};
use tracing::debug;

/// Stands in for animation and audio: records cues and logs them.
#[derive(Clone, Debug, Default)]
pub struct RecordingEffects {
    animal: AnimalId,
    cues: Vec<EffectCue>,
}

impl RecordingEffects {
    pub fn new(animal: AnimalId) -> Self {
        Self {
            animal,
            cues: Vec::new(),
        }
    }

    pub fn cues(&self) -> &[EffectCue] {
        &self.cues
    }

    pub fn count(&self, cue: EffectCue) -> usize {
        self.cues.iter().filter(|c| **c == cue).count()
    }

    pub fn last(&self) -> Option<EffectCue> {
        self.cues.last().copied()
    }

    /// Removes and returns everything recorded so far.
    pub fn take(&mut self) -> Vec<EffectCue> {
        std::mem::take(&mut self.cues)
    }
}

impl EffectSink for RecordingEffects {
    fn trigger(&mut self, cue: EffectCue) {
        debug!("{}: effect {}", self.animal, cue);
        self.cues.push(cue);
    }
}
