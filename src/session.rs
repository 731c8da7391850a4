//! Per-client controller state tying input, movement, HUD and emotes together.
//!
//! The host forwards key transitions to [`ClientSession::key_down`] and
//! [`ClientSession::key_up`] and calls [`ClientSession::frame`] once per
//! rendered frame.

use bevy::prelude::Resource;
use glam::DVec2;
use log::{debug, info};

use crate::actions::{self, emote_for_key, EmoteState};
use crate::camera::Zoom;
use crate::draw::{DrawCommand, DrawList};
use crate::hazards::HazardSet;
use crate::host::{HostPorts, PlayerState};
use crate::hud::{self, HudFrame};
use crate::movement::{Direction, MoveAttempt, MovementController, MovementIntent};
use crate::rainbow::RainbowColor;
use crate::settings::ClientSettings;

/// Host state needed to interpret a key press.
#[derive(Debug, Clone, Copy)]
pub struct KeyContext<'a> {
    /// Keys typed into the chat field belong to the chat field.
    pub say_field_focused: bool,
    /// The local player.
    pub player: &'a PlayerState,
}

/// Host state for one rendered frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameContext<'a> {
    /// The local player.
    pub player: &'a PlayerState,
    /// Screen centre in world units.
    pub center: DVec2,
    /// Wall-clock seconds.
    pub now: i64,
}

/// Controller state owned by one client: held keys, zoom, help overlay and
/// emotes.
#[derive(Resource, Debug, Clone)]
pub struct ClientSession {
    settings: ClientSettings,
    hazards: HazardSet,
    movement: MovementController,
    rainbow: RainbowColor,
    zoom: Zoom,
    show_help: bool,
    emotes: EmoteState,
}

impl Default for ClientSession {
    fn default() -> Self {
        Self::new(ClientSettings::default())
    }
}

impl ClientSession {
    /// Fresh session using `settings`.
    #[must_use]
    pub fn new(settings: ClientSettings) -> Self {
        Self {
            hazards: settings.hazards(),
            movement: MovementController::default(),
            rainbow: RainbowColor::new(settings.rainbow_step),
            zoom: Zoom::new(settings.zoom.clone()),
            show_help: false,
            emotes: EmoteState::default(),
            settings,
        }
    }

    /// Settings the session was built with.
    #[must_use]
    pub const fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    /// Movement keys currently held.
    #[must_use]
    pub const fn intent(&self) -> MovementIntent {
        self.movement.intent()
    }

    /// Outcome of the most recent movement step.
    #[must_use]
    pub const fn last_attempt(&self) -> Option<MoveAttempt> {
        self.movement.last_attempt()
    }

    /// Current zoom.
    #[must_use]
    pub const fn zoom(&self) -> &Zoom {
        &self.zoom
    }

    /// Highlight colour cycling in the help overlay.
    #[must_use]
    pub const fn rainbow(&self) -> &RainbowColor {
        &self.rainbow
    }

    /// Whether the help overlay is shown.
    #[must_use]
    pub const fn help_visible(&self) -> bool {
        self.show_help
    }

    /// Emote being repeated, if any.
    #[must_use]
    pub const fn permanent_emote(&self) -> Option<i32> {
        self.emotes.permanent()
    }

    /// Handles a key press. Returns whether the key was consumed.
    pub fn key_down(&mut self, key: char, ctx: &KeyContext<'_>, ports: &mut HostPorts<'_>) -> bool {
        if ctx.say_field_focused {
            return false;
        }

        if let Some(id) = emote_for_key(key) {
            debug!("short emote {id}");
            self.emotes.send_short(id, &mut *ports.sink);
            return true;
        }

        match key {
            'h' => {
                self.show_help = !self.show_help;
            }
            'u' => actions::use_tile_relative(ctx.player, 1, 0, ports.coords, &mut *ports.sink),
            'r' => actions::remove_tile_relative(ctx.player, 1, 0, ports.coords, &mut *ports.sink),
            'q' | 'Q' => actions::use_backpack(
                ctx.player,
                key == 'Q',
                self.settings.backpack_slot,
                ports.coords,
                &mut *ports.sink,
            ),
            '+' => {
                self.zoom.zoom_in();
                info!("zoom {}", self.zoom.scale());
            }
            '-' => {
                self.zoom.zoom_out();
                info!("zoom {}", self.zoom.scale());
            }
            _ => {
                let Some(direction) = Direction::from_key(key) else {
                    return false;
                };
                self.movement.press(direction);
            }
        }
        true
    }

    /// Handles a key release. Only movement keys are consumed.
    pub fn key_up(&mut self, key: char) -> bool {
        let Some(direction) = Direction::from_key(key) else {
            return false;
        };
        self.movement.release(direction);
        true
    }

    /// Makes emote `id` permanent as of wall-clock `now`.
    pub fn set_emote(&mut self, id: i32, now: i64) {
        debug!("permanent emote {id}");
        self.emotes.set_permanent(id, now);
    }

    /// Runs one frame: movement, rainbow, HUD, help overlay and the
    /// permanent-emote resend, in that order. Returns the HUD draw list.
    pub fn frame(&mut self, ctx: &FrameContext<'_>, ports: &mut HostPorts<'_>) -> Vec<DrawCommand> {
        self.movement.step(
            ctx.player,
            ports.world,
            &self.hazards,
            &mut *ports.sink,
            self.settings.cell_size,
        );
        self.rainbow.step();

        let frame = HudFrame {
            center: ctx.center,
            view_width: self.zoom.view_width(),
            view_height: self.zoom.view_height(),
        };
        let mut list = DrawList::new();
        hud::draw_status(&mut list, &frame, ctx.player, ports.text);
        if self.show_help {
            hud::draw_help(
                &mut list,
                &frame,
                &self.rainbow,
                &self.settings.emotion_words,
                &self.settings.help_commands,
            );
        }

        self.emotes
            .tick(ctx.now, self.settings.emote_repeat_secs, &mut *ports.sink);
        list.into_commands()
    }
}
