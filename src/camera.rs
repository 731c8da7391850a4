//! Camera zoom: scales the visible view around the unzoomed default.

use crate::settings::ZoomSettings;

/// Current zoom level and the view size derived from it.
#[derive(Debug, Clone, PartialEq)]
pub struct Zoom {
    settings: ZoomSettings,
    scale: f32,
    view_width: i32,
    view_height: i32,
    panel_offset_x: i32,
    panel_offset_y: i32,
}

impl Default for Zoom {
    fn default() -> Self {
        Self::new(ZoomSettings::default())
    }
}

impl Zoom {
    /// Starts at `settings.initial`, clamped into the allowed range.
    #[must_use]
    pub fn new(settings: ZoomSettings) -> Self {
        let scale = settings.initial.clamp(settings.min, settings.max);
        let mut zoom = Self {
            settings,
            scale,
            view_width: 0,
            view_height: 0,
            panel_offset_x: 0,
            panel_offset_y: 0,
        };
        zoom.recalculate();
        zoom
    }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "View sizes truncate to whole screen units."
    )]
    fn recalculate(&mut self) {
        let default_w = self.settings.default_view_width;
        let default_h = self.settings.default_view_height;
        self.view_width = (f64::from(default_w) * f64::from(self.scale)) as i32;
        self.view_height = (f64::from(default_h) * f64::from(self.scale)) as i32;
        self.panel_offset_x = (self.view_width - default_w) / 2;
        self.panel_offset_y = (self.view_height - default_h) / 2;
    }

    /// Enlarges the view by one step, up to the maximum scale.
    pub fn zoom_in(&mut self) {
        self.scale = (self.scale + self.settings.step).min(self.settings.max);
        self.recalculate();
    }

    /// Shrinks the view by one step, down to the minimum scale.
    pub fn zoom_out(&mut self) {
        self.scale = (self.scale - self.settings.step).max(self.settings.min);
        self.recalculate();
    }

    /// Multiplier applied to the default view.
    #[must_use]
    pub const fn scale(&self) -> f32 {
        self.scale
    }

    /// Visible width in screen units.
    #[must_use]
    pub const fn view_width(&self) -> i32 {
        self.view_width
    }

    /// Visible height in screen units.
    #[must_use]
    pub const fn view_height(&self) -> i32 {
        self.view_height
    }

    /// Offset of the fixed-size UI panel inside the zoomed view.
    #[must_use]
    pub const fn panel_offset(&self) -> (i32, i32) {
        (self.panel_offset_x, self.panel_offset_y)
    }
}
