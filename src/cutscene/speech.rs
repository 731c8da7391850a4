//! Speech bubbles floating over the launch backdrop.

use glam::DVec2;

use crate::grid::PlayerId;
use crate::{SPEECH_BASE_SECS, SPEECH_BYTES_PER_SEC, SPEECH_FADE_RATE};

/// Wall-clock time at which speech said at `now` starts to fade.
///
/// Longer text stays up longer: one extra second per five whole bytes.
#[expect(
    clippy::cast_precision_loss,
    reason = "Speech lengths are far below f64's exact integer range."
)]
#[must_use]
pub fn fade_start_for(text: &str, now: f64) -> f64 {
    now + SPEECH_BASE_SECS + (text.len() / SPEECH_BYTES_PER_SEC) as f64
}

/// Another player's words drifting over the launch.
#[derive(Debug, Clone, PartialEq)]
pub struct FloatingSpeech {
    /// Who said it.
    pub speaker: PlayerId,
    /// What was said.
    pub text: String,
    /// Relative to the screen centre.
    pub pos: DVec2,
    /// Opacity; the bubble is dropped once this reaches zero.
    pub fade: f64,
    /// Wall-clock second after which the bubble starts fading.
    pub fade_start: f64,
}

impl FloatingSpeech {
    /// A fully opaque bubble said at wall-clock `now`.
    #[must_use]
    pub fn new(speaker: PlayerId, said: impl Into<String>, pos: DVec2, now: f64) -> Self {
        let text = said.into();
        let fade_start = fade_start_for(&text, now);
        Self {
            speaker,
            text,
            pos,
            fade: 1.0,
            fade_start,
        }
    }

    /// Fades the bubble once its time is up; returns `false` when it has
    /// fully faded and should be dropped.
    pub fn age(&mut self, now: f64, frame_rate_factor: f64) -> bool {
        if now > self.fade_start {
            self.fade -= SPEECH_FADE_RATE * frame_rate_factor;
        }
        self.fade > 0.0
    }
}
