//! Runtime configuration for the controller, HUD and cutscene.
//!
//! Settings deserialize from JSON with every field optional; missing fields
//! fall back to the defaults in [`crate::constants`]. Values are validated
//! after parsing so a bad file fails loudly at startup instead of producing
//! odd behaviour mid-game.

use std::fs;
use std::path::Path;

use bevy::prelude::Resource;
use log::{debug, warn};
use serde::Deserialize;

use crate::error::SettingsError;
use crate::grid::{ObjectId, Rgba};
use crate::hazards::HazardSet;
use crate::{
    BACKPACK_SLOT, CELL_SIZE, DEFAULT_VIEW_HEIGHT, DEFAULT_VIEW_WIDTH, EMOTE_REPEAT_SECS,
    INITIAL_ZOOM, MAX_ZOOM, MIN_ZOOM, RAINBOW_STEP, STAR_COUNT, STAR_SPEED, ZOOM_STEP,
};

/// Zoom limits and the unzoomed view size.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ZoomSettings {
    /// Unzoomed view width in screen units.
    pub default_view_width: i32,
    /// Unzoomed view height in screen units.
    pub default_view_height: i32,
    /// Scale at start-up.
    pub initial: f32,
    /// Scale change per zoom key press.
    pub step: f32,
    /// Smallest scale.
    pub min: f32,
    /// Largest scale.
    pub max: f32,
}

impl Default for ZoomSettings {
    fn default() -> Self {
        Self {
            default_view_width: DEFAULT_VIEW_WIDTH,
            default_view_height: DEFAULT_VIEW_HEIGHT,
            initial: INITIAL_ZOOM,
            step: ZOOM_STEP,
            min: MIN_ZOOM,
            max: MAX_ZOOM,
        }
    }
}

/// Chat commands listed in the help overlay's third column.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HelpCommands {
    /// Respawn command.
    pub die: String,
    /// Frame-rate overlay toggle.
    pub fps: String,
    /// Network overlay toggle.
    pub net: String,
    /// Ping display command.
    pub ping: String,
}

impl Default for HelpCommands {
    fn default() -> Self {
        Self {
            die: "/DIE".to_owned(),
            fps: "/FPS".to_owned(),
            net: "/NET".to_owned(),
            ping: "/PING".to_owned(),
        }
    }
}

/// Launch cutscene tuning.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CutsceneSettings {
    /// Stars generated per launch.
    pub star_count: usize,
    /// Screen units per nominal frame.
    pub star_speed: f64,
    /// Backdrop at lift-off.
    pub sky_color: Rgba,
    /// Backdrop once in space.
    pub space_color: Rgba,
    /// Progress below which the backdrop fades in.
    pub sky_fade_in_point: f64,
    /// Progress at which the backdrop becomes pure space.
    pub space_color_point: f64,
    /// Progress at which stars begin to appear.
    pub stars_appear_point: f64,
    /// Progress at which stars reach full opacity.
    pub stars_full_point: f64,
}

impl Default for CutsceneSettings {
    fn default() -> Self {
        Self {
            star_count: STAR_COUNT,
            star_speed: STAR_SPEED,
            sky_color: Rgba::from_rgb8(135, 206, 235),
            space_color: Rgba::BLACK,
            sky_fade_in_point: 0.025,
            space_color_point: 0.5,
            stars_appear_point: 0.125,
            stars_full_point: 0.5,
        }
    }
}

impl CutsceneSettings {
    fn validate(&self) -> Result<(), SettingsError> {
        let thresholds = [
            ("cutscene.sky_fade_in_point", self.sky_fade_in_point),
            ("cutscene.space_color_point", self.space_color_point),
            ("cutscene.stars_appear_point", self.stars_appear_point),
            ("cutscene.stars_full_point", self.stars_full_point),
        ];
        for (field, value) in thresholds {
            if !(value > 0.0 && value <= 1.0) {
                return Err(SettingsError::invalid(field, format!("{value} is outside (0, 1]")));
            }
        }
        if self.stars_appear_point >= self.stars_full_point {
            return Err(SettingsError::invalid(
                "cutscene.stars_appear_point",
                "stars must appear before they reach full opacity",
            ));
        }
        if !self.star_speed.is_finite() {
            return Err(SettingsError::invalid("cutscene.star_speed", "must be finite"));
        }
        Ok(())
    }
}

/// Top-level client configuration.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientSettings {
    /// World units per grid cell.
    pub cell_size: f64,
    /// Zoom limits.
    pub zoom: ZoomSettings,
    /// Wall-clock seconds between re-sends of a permanent emote.
    pub emote_repeat_secs: i64,
    /// Clothing slot the backpack keys act on.
    pub backpack_slot: i32,
    /// Per-frame step of the help overlay's highlight colour.
    pub rainbow_step: f32,
    /// Overrides the built-in hazardous animal list when present.
    pub hazard_ids: Option<Vec<i32>>,
    /// Trigger words of the emotions, in the host's emotion order.
    pub emotion_words: Vec<String>,
    /// Chat commands listed in the help overlay.
    pub help_commands: HelpCommands,
    /// Launch cutscene tuning.
    pub cutscene: CutsceneSettings,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            cell_size: CELL_SIZE,
            zoom: ZoomSettings::default(),
            emote_repeat_secs: EMOTE_REPEAT_SECS,
            backpack_slot: BACKPACK_SLOT,
            rainbow_step: RAINBOW_STEP,
            hazard_ids: None,
            emotion_words: Vec::new(),
            help_commands: HelpCommands::default(),
            cutscene: CutsceneSettings::default(),
        }
    }
}

impl ClientSettings {
    /// Parses and validates settings from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Parse`] for malformed JSON or unknown fields
    /// and [`SettingsError::Invalid`] for out-of-range values.
    pub fn from_json_str(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reads settings from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Io`] when the file cannot be read, otherwise
    /// the same errors as [`Self::from_json_str`].
    pub fn load(file: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = file.as_ref();
        let json = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json_str(&json)?;
        debug!("loaded client settings from {}", path.display());
        Ok(settings)
    }

    /// Checks that every value is usable.
    ///
    /// # Errors
    ///
    /// Returns the first [`SettingsError::Invalid`] found.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(self.cell_size.is_finite() && self.cell_size > 0.0) {
            return Err(SettingsError::invalid("cell_size", "must be positive"));
        }
        let zoom = &self.zoom;
        if zoom.default_view_width <= 0 || zoom.default_view_height <= 0 {
            return Err(SettingsError::invalid("zoom.default_view", "must be positive"));
        }
        if !(zoom.min > 0.0 && zoom.min <= zoom.max) {
            return Err(SettingsError::invalid("zoom.min", "must be positive and at most zoom.max"));
        }
        if !(zoom.min..=zoom.max).contains(&zoom.initial) {
            return Err(SettingsError::invalid("zoom.initial", "must lie within [min, max]"));
        }
        if !(zoom.step > 0.0) {
            return Err(SettingsError::invalid("zoom.step", "must be positive"));
        }
        if self.emote_repeat_secs < 0 {
            return Err(SettingsError::invalid("emote_repeat_secs", "must not be negative"));
        }
        if !(self.rainbow_step > 0.0 && self.rainbow_step <= 1.0) {
            return Err(SettingsError::invalid("rainbow_step", "must lie within (0, 1]"));
        }
        if let Some(ids) = &self.hazard_ids {
            if ids.is_empty() {
                warn!("hazard_ids is empty; movement will not avoid animals");
            }
        }
        self.cutscene.validate()
    }

    /// Hazard set selected by these settings.
    #[must_use]
    pub fn hazards(&self) -> HazardSet {
        self.hazard_ids.as_ref().map_or_else(HazardSet::default, |ids| {
            HazardSet::new(ids.iter().copied().map(ObjectId))
        })
    }
}
