//! Cycling highlight colour for the help overlay.
//!
//! Stepped once per rendered frame with no delta-time scaling, so the cycle
//! speed follows the frame rate.

/// Three-channel colour that walks around the hue wheel one channel at a time.
#[derive(Debug, Clone, PartialEq)]
pub struct RainbowColor {
    channels: [f32; 3],
    active: usize,
    increasing: bool,
    step_size: f32,
}

impl Default for RainbowColor {
    fn default() -> Self {
        Self::new(crate::RAINBOW_STEP)
    }
}

impl RainbowColor {
    /// Starts at pure red, raising the green channel first.
    #[must_use]
    pub const fn new(step_size: f32) -> Self {
        Self {
            channels: [1.0, 0.0, 0.0],
            active: 1,
            increasing: true,
            step_size,
        }
    }

    /// Red, green and blue in `[0, 1]`.
    #[must_use]
    pub const fn channels(&self) -> [f32; 3] {
        self.channels
    }

    /// Index of the channel currently being nudged.
    #[must_use]
    pub const fn active_channel(&self) -> usize {
        self.active
    }

    /// Whether the active channel is rising.
    #[must_use]
    pub const fn is_increasing(&self) -> bool {
        self.increasing
    }

    /// Nudges the active channel; returns `true` when it saturated.
    ///
    /// On saturation the direction flips and the previous channel (wrapping
    /// from 0 to 2) becomes active.
    pub fn step(&mut self) -> bool {
        let Some(value) = self.channels.get_mut(self.active) else {
            return false;
        };

        let saturated = if self.increasing {
            *value = (*value + self.step_size).min(1.0);
            *value >= 1.0
        } else {
            *value = (*value - self.step_size).max(0.0);
            *value <= 0.0
        };

        if saturated {
            self.increasing = !self.increasing;
            self.active = (self.active + 2) % 3;
        }
        saturated
    }
}
