use crate::types::EffectCue;

/// Animation/audio sink keyed by symbolic cue names.
pub trait EffectSink {
    fn trigger(&mut self, cue: EffectCue);
}

/// Records cues in order. Handy for headless runs and tests.
impl EffectSink for Vec<EffectCue> {
    fn trigger(&mut self, cue: EffectCue) {
        self.push(cue);
    }
}
