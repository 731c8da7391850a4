//! Client tuning constants shared across the controller and the cutscene.
//!
//! Most of them can be overridden through
//! [`crate::settings::ClientSettings`].

/// Size of one world cell in world (pixel) units.
pub const CELL_SIZE: f64 = 128.0;
/// Unzoomed view width in screen units.
pub const DEFAULT_VIEW_WIDTH: i32 = 1280;
/// Unzoomed view height in screen units.
pub const DEFAULT_VIEW_HEIGHT: i32 = 720;

/// Zoom scale at start-up.
pub const INITIAL_ZOOM: f32 = 1.5;
/// Scale change per zoom key press.
pub const ZOOM_STEP: f32 = 0.25;
/// Smallest zoom scale.
pub const MIN_ZOOM: f32 = 0.5;
/// Largest zoom scale.
pub const MAX_ZOOM: f32 = 10.0;

/// Seconds of wall-clock time between re-sends of a permanent emote.
pub const EMOTE_REPEAT_SECS: i64 = 8;
/// Clothing slot holding the backpack.
pub const BACKPACK_SLOT: i32 = 5;

/// Channel change per frame of the help overlay's highlight colour.
pub const RAINBOW_STEP: f32 = 0.01;

/// Nominal frame rate that `frame_rate_factor` is relative to.
pub const TARGET_FPS: f64 = 60.0;

/// Stars in the launch backdrop.
pub const STAR_COUNT: usize = 1000;
/// Star scroll speed in screen units per nominal frame.
pub const STAR_SPEED: f64 = 0.5;
/// Fade lost per nominal frame by a speech bubble once it starts fading.
pub const SPEECH_FADE_RATE: f64 = 0.05;
/// Seconds a speech bubble stays opaque before any length bonus.
pub const SPEECH_BASE_SECS: f64 = 3.0;
/// Bytes of speech text that earn one extra opaque second.
pub const SPEECH_BYTES_PER_SEC: usize = 5;
