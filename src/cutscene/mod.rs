//! Rocket launch cutscene.
//!
//! A time-driven overlay: the backdrop fades from sky to space, a starfield
//! scrolls past, the rocket climbs across the screen and other players'
//! speech floats over the top. [`RocketLaunch::step`] advances the
//! simulation and [`RocketLaunch::draw`] turns it into a [`DrawList`].

mod backdrop;
mod speech;
mod stars;

use bevy::prelude::Resource;
use glam::DVec2;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

pub use backdrop::{background_color, star_alpha};
pub use speech::{fade_start_for, FloatingSpeech};
pub use stars::Star;

use crate::draw::{DrawCommand, DrawList};
use crate::error::CutsceneError;
use crate::grid::{ObjectId, PlayerId, Rgba};
use crate::host::Viewport;
use crate::settings::CutsceneSettings;

const STAR_HALF_EXTENT: f64 = 1.5;

/// Lifecycle of a launch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CutscenePhase {
    /// No launch has been started since the last reset.
    #[default]
    NotStarted,
    /// Animating towards full progress.
    Running,
    /// Progress reached the end and [`RocketLaunch::is_running`] saw it.
    Finished,
}

/// What is being launched, by whom, and for how long.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaunchParams {
    /// Player aboard the rocket; their own speech is not shown.
    pub riding_player: PlayerId,
    /// Object drawn as the rocket.
    pub rocket: ObjectId,
    /// Seconds from start to full progress.
    pub duration_secs: f64,
    /// Fixes the starfield layout; seeded from the start time otherwise.
    pub seed: Option<u64>,
}

impl LaunchParams {
    /// Unseeded launch parameters.
    #[must_use]
    pub const fn new(riding_player: PlayerId, rocket: ObjectId, duration_secs: f64) -> Self {
        Self {
            riding_player,
            rocket,
            duration_secs,
            seed: None,
        }
    }

    /// Pins the random layout to `seed`.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// The launch sequencer.
#[derive(Resource, Debug, Clone)]
pub struct RocketLaunch {
    settings: CutsceneSettings,
    phase: CutscenePhase,
    launch: Option<LaunchParams>,
    view: Viewport,
    start_time: f64,
    progress: f64,
    frame_count: u64,
    scroll: f64,
    rocket_start: DVec2,
    rocket_end: DVec2,
    rocket_pos: DVec2,
    stars: Vec<Star>,
    speech: Vec<FloatingSpeech>,
    rng: StdRng,
}

impl Default for RocketLaunch {
    fn default() -> Self {
        Self::new(CutsceneSettings::default())
    }
}

impl RocketLaunch {
    /// An idle sequencer using `settings` for every future launch.
    #[must_use]
    pub fn new(settings: CutsceneSettings) -> Self {
        Self {
            settings,
            phase: CutscenePhase::NotStarted,
            launch: None,
            view: Viewport::new(DVec2::ZERO, 0.0, 0.0),
            start_time: 0.0,
            progress: 0.0,
            frame_count: 0,
            scroll: 0.0,
            rocket_start: DVec2::ZERO,
            rocket_end: DVec2::ZERO,
            rocket_pos: DVec2::ZERO,
            stars: Vec::new(),
            speech: Vec::new(),
            rng: StdRng::seed_from_u64(0),
        }
    }

    /// Begins a launch at wall-clock `now` (seconds).
    ///
    /// Any previous launch is discarded. The viewport size fixes the star
    /// spread, the rocket path and where new speech appears.
    ///
    /// # Errors
    ///
    /// Returns [`CutsceneError::InvalidDuration`] unless the duration is
    /// finite and strictly positive; the sequencer is left untouched.
    pub fn start(
        &mut self,
        launch: LaunchParams,
        viewport: Viewport,
        now: f64,
    ) -> Result<(), CutsceneError> {
        let duration = launch.duration_secs;
        if !(duration.is_finite() && duration > 0.0) {
            return Err(CutsceneError::InvalidDuration(duration));
        }

        self.reset();
        self.rng = StdRng::seed_from_u64(launch.seed.unwrap_or_else(|| now.to_bits()));
        self.launch = Some(launch);
        self.view = viewport;
        self.start_time = now;

        let (w, h) = (viewport.width, viewport.height);
        self.stars = (0..self.settings.star_count)
            .map(|_| Star::random(&mut self.rng, w, h))
            .collect();
        self.rocket_start = DVec2::new(0.0, -h);
        self.rocket_end = DVec2::new(0.0, h);
        self.rocket_pos = self.rocket_start;
        self.phase = CutscenePhase::Running;

        info!(
            "rocket launch started: player {:?}, {duration}s, {} stars",
            launch.riding_player,
            self.stars.len()
        );
        Ok(())
    }

    /// Advances the animation to wall-clock `now`.
    ///
    /// `frame_rate_factor` is the frame time relative to a 60 fps frame.
    /// Does nothing unless the launch is running.
    pub fn step(&mut self, now: f64, frame_rate_factor: f64) {
        if self.phase != CutscenePhase::Running {
            return;
        }
        self.frame_count += 1;

        self.speech.retain_mut(|speech| speech.age(now, frame_rate_factor));
        for star in &mut self.stars {
            star.advance(frame_rate_factor, &mut self.rng);
        }
        self.scroll += self.settings.star_speed * frame_rate_factor;

        let duration = self.launch.map_or(1.0, |launch| launch.duration_secs);
        let elapsed = ((now - self.start_time) / duration).clamp(0.0, 1.0);
        self.progress = self.progress.max(elapsed);
        self.rocket_pos = self.rocket_end * self.progress + self.rocket_start * (1.0 - self.progress);
    }

    /// Whether the launch is still playing. Marks it finished the first
    /// time progress is observed to have reached the end.
    pub fn is_running(&mut self) -> bool {
        if self.phase == CutscenePhase::Running && self.progress >= 1.0 {
            self.phase = CutscenePhase::Finished;
            info!("rocket launch finished after {} frames", self.frame_count);
        }
        self.phase == CutscenePhase::Running
    }

    /// Current lifecycle phase.
    #[must_use]
    pub const fn phase(&self) -> CutscenePhase {
        self.phase
    }

    /// Fraction of the launch completed, in `[0, 1]`.
    #[must_use]
    pub const fn progress(&self) -> f64 {
        self.progress
    }

    /// Frames stepped since the launch started.
    #[must_use]
    pub const fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Accumulated downward scroll of the starfield.
    #[must_use]
    pub const fn scroll(&self) -> f64 {
        self.scroll
    }

    /// Rocket offset from the screen centre.
    #[must_use]
    pub const fn rocket_position(&self) -> DVec2 {
        self.rocket_pos
    }

    /// Stars in their current twinkle state.
    #[must_use]
    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    /// Speech bubbles still visible.
    #[must_use]
    pub fn speech(&self) -> &[FloatingSpeech] {
        &self.speech
    }

    /// Renders the current state centred on `viewport`.
    #[must_use]
    pub fn draw(&self, viewport: &Viewport) -> DrawList {
        let mut list = DrawList::new();
        let Some(launch) = self.launch else {
            return list;
        };
        let center = viewport.center;

        list.set_color(background_color(self.progress, &self.settings));
        // Oversized so the backdrop covers the view at any zoom.
        list.rect(center, viewport.width, viewport.height);

        let alpha = star_alpha(self.progress, &self.settings);
        if alpha > 0.0 {
            list.set_color(Rgba::new(1.0, 1.0, 1.0, 1.0));
            let scroll = DVec2::new(0.0, -self.scroll);
            for star in &self.stars {
                list.push(DrawCommand::SetFade(alpha * to_fade(star.brightness())));
                list.rect(center + star.pos + scroll, STAR_HALF_EXTENT, STAR_HALF_EXTENT);
            }
            list.push(DrawCommand::SetFade(1.0));
        }

        list.push(DrawCommand::Sprite {
            object: launch.rocket,
            pos: center + self.rocket_pos,
        });

        list.extend(self.speech.iter().map(|speech| DrawCommand::Speech {
            text: speech.text.clone(),
            pos: center + speech.pos,
            fade: speech.fade,
        }));
        list
    }

    /// Shows `text` said by `speaker` as a floating bubble.
    ///
    /// Returns `false` without adding anything when no launch has started or
    /// the speaker is the rider, whose speech the host shows elsewhere.
    pub fn add_speech(&mut self, speaker: PlayerId, text: &str, now: f64) -> bool {
        let Some(launch) = self.launch else {
            return false;
        };
        if speaker == launch.riding_player {
            return false;
        }

        let (w, h) = (self.view.width, self.view.height);
        let pos = DVec2::new(
            stars::bounded(&mut self.rng, -0.333 * w, 0.333 * w),
            stars::bounded(&mut self.rng, -0.45 * h, -0.2 * h),
        );
        debug!("speech from {speaker:?} during launch: {text}");
        self.speech.push(FloatingSpeech::new(speaker, text, pos, now));
        true
    }

    /// Drops all stars and speech and returns to [`CutscenePhase::NotStarted`].
    pub fn reset(&mut self) {
        self.stars = Vec::new();
        self.speech = Vec::new();
        self.launch = None;
        self.phase = CutscenePhase::NotStarted;
        self.progress = 0.0;
        self.frame_count = 0;
        self.scroll = 0.0;
        self.rocket_pos = DVec2::ZERO;
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "Fades only need f32 precision."
)]
fn to_fade(value: f64) -> f32 {
    value as f32
}
