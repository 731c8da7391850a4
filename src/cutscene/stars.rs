//! Twinkling starfield particles.

use std::f64::consts::TAU;

use glam::DVec2;
use rand::Rng;

/// Uniform sample from `[lo, hi)`, or `lo` when the range is empty.
pub(crate) fn bounded(rng: &mut impl Rng, lo: f64, hi: f64) -> f64 {
    if hi > lo {
        rng.gen_range(lo..hi)
    } else {
        lo
    }
}

fn twinkle_rate(rng: &mut impl Rng) -> f64 {
    bounded(rng, 0.01, 0.02)
}

fn twinkle_amount(rng: &mut impl Rng, fade: f64) -> f64 {
    bounded(rng, fade * 0.25, fade * 0.6)
}

/// One star, positioned relative to the screen centre.
#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    /// Offset from the screen centre before scrolling.
    pub pos: DVec2,
    /// Base brightness.
    pub fade: f64,
    /// Maximum brightness removed at the trough of a twinkle.
    pub twinkle_amount: f64,
    /// Oscillator phase; one twinkle per whole unit.
    pub twinkle_phase: f64,
    /// Phase advance per nominal frame.
    pub twinkle_rate: f64,
}

impl Star {
    /// Places a star on whole screen units, spread from half a screen below
    /// centre to five screens above so the field can scroll down.
    #[must_use]
    pub fn random(rng: &mut impl Rng, view_width: f64, view_height: f64) -> Self {
        let pos = DVec2::new(
            bounded(rng, -view_width / 2.0, view_width / 2.0).floor(),
            bounded(rng, -view_height / 2.0, 5.0 * view_height).floor(),
        );
        let fade = bounded(rng, 0.25, 1.0);
        let twinkle_amount = twinkle_amount(rng, fade);
        let twinkle_rate = twinkle_rate(rng);
        let twinkle_phase = bounded(rng, 0.0, 1.0);
        Self {
            pos,
            fade,
            twinkle_amount,
            twinkle_phase,
            twinkle_rate,
        }
    }

    /// Advances the twinkle; returns `true` when the rate and amount were
    /// re-rolled because the phase crossed a whole number.
    ///
    /// The re-roll is a deliberate discontinuity in brightness.
    pub fn advance(&mut self, frame_rate_factor: f64, rng: &mut impl Rng) -> bool {
        let last = self.twinkle_phase;
        self.twinkle_phase += self.twinkle_rate * frame_rate_factor;
        if self.twinkle_phase.floor() > last.floor() {
            self.twinkle_rate = twinkle_rate(rng);
            self.twinkle_amount = twinkle_amount(rng, self.fade);
            true
        } else {
            false
        }
    }

    /// Current brightness before the global star alpha is applied.
    #[must_use]
    pub fn brightness(&self) -> f64 {
        self.fade - self.twinkle_amount * 0.5 * ((self.twinkle_phase * TAU).sin() + 1.0)
    }
}
