//! Bevy plugins hosting the client controller and the launch cutscene.
//!
//! `HudPlugin` bridges `ButtonInput<KeyCode>` into [`ClientSession`] key
//! handling and rebuilds the HUD draw list every frame. `RocketLaunchPlugin`
//! steps [`RocketLaunch`] from `Time` and publishes its draw list while the
//! launch is running. Both plugins only produce [`DrawCommand`] data; the
//! host renderer replays it.

use bevy::prelude::*;
use glam::DVec2;
use log::{debug, warn};

use crate::cutscene::{LaunchParams, RocketLaunch};
use crate::draw::DrawCommand;
use crate::grid::PlayerId;
use crate::host::{HostPorts, Viewport};
use crate::session::{ClientSession, FrameContext, KeyContext};
use crate::settings::ClientSettings;
use crate::world_handle::{FixedPitchText, LocalPlayer, OutboundAction, Outbox, WireOffset, WorldHandle};
use crate::TARGET_FPS;

/// HUD commands produced by the most recent frame.
#[derive(Resource, Default, Debug, Clone, PartialEq)]
pub struct HudDrawList(pub Vec<DrawCommand>);

/// Cutscene commands produced by the most recent frame; empty when idle.
#[derive(Resource, Default, Debug, Clone, PartialEq)]
pub struct CutsceneDrawList(pub Vec<DrawCommand>);

/// Actions the controller emitted during the most recent frame.
///
/// [`publish_actions_system`] moves the frame's [`Outbox`] contents here, so
/// the outbox itself never holds more than one frame of traffic.
#[derive(Resource, Default, Debug, Clone, PartialEq)]
pub struct LastFrameActions(pub Outbox);

/// Current screen view, kept in step with the player and zoom by the HUD.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct ScreenView(pub Viewport);

impl Default for ScreenView {
    fn default() -> Self {
        let zoom = crate::camera::Zoom::default();
        Self(Viewport::new(
            DVec2::ZERO,
            f64::from(zoom.view_width()),
            f64::from(zoom.view_height()),
        ))
    }
}

/// Requests picked up by [`rocket_launch_system`] on its next run.
///
/// # Examples
///
/// ```
/// use wayside::cutscene::LaunchParams;
/// use wayside::grid::{ObjectId, PlayerId};
/// use wayside::presentation::LaunchInbox;
///
/// let mut inbox = LaunchInbox::default();
/// inbox.launch = Some(LaunchParams::new(PlayerId(1), ObjectId(2_000), 30.0));
/// inbox.speech.push((PlayerId(4), "safe travels".to_owned()));
/// ```
#[derive(Resource, Default, Debug, Clone, PartialEq)]
pub struct LaunchInbox {
    /// Launch to start, replacing any running one.
    pub launch: Option<LaunchParams>,
    /// Speech heard since the last frame.
    pub speech: Vec<(PlayerId, String)>,
}

/// Character the controller understands for a key, if any.
///
/// Shift turns `Q` into the backpack-swap key and `=` into zoom-in.
#[must_use]
pub const fn key_char(code: KeyCode, shift: bool) -> Option<char> {
    let key = match code {
        KeyCode::Digit0 | KeyCode::Numpad0 => '0',
        KeyCode::Digit1 | KeyCode::Numpad1 => '1',
        KeyCode::Digit2 | KeyCode::Numpad2 => '2',
        KeyCode::Digit3 | KeyCode::Numpad3 => '3',
        KeyCode::Digit4 | KeyCode::Numpad4 => '4',
        KeyCode::Digit5 | KeyCode::Numpad5 => '5',
        KeyCode::Digit6 | KeyCode::Numpad6 => '6',
        KeyCode::Digit7 | KeyCode::Numpad7 => '7',
        KeyCode::Digit8 | KeyCode::Numpad8 => '8',
        KeyCode::Digit9 | KeyCode::Numpad9 => '9',
        KeyCode::KeyW => 'w',
        KeyCode::KeyA => 'a',
        KeyCode::KeyS => 's',
        KeyCode::KeyD => 'd',
        KeyCode::KeyH => 'h',
        KeyCode::KeyU => 'u',
        KeyCode::KeyR => 'r',
        KeyCode::KeyQ if shift => 'Q',
        KeyCode::KeyQ => 'q',
        KeyCode::Equal if shift => '+',
        KeyCode::Equal => '=',
        KeyCode::NumpadAdd => '+',
        KeyCode::Minus | KeyCode::NumpadSubtract => '-',
        _ => return None,
    };
    Some(key)
}

/// Feeds this frame's key transitions to the session.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn keyboard_bridge_system(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut session: ResMut<ClientSession>,
    player: Res<LocalPlayer>,
    world: Res<WorldHandle>,
    offset: Res<WireOffset>,
    text: Res<FixedPitchText>,
    mut outbox: ResMut<Outbox>,
) {
    let shift = keyboard.any_pressed([KeyCode::ShiftLeft, KeyCode::ShiftRight]);
    let ctx = KeyContext {
        say_field_focused: player.say_field_focused,
        player: &player.state,
    };
    let mut ports = HostPorts {
        world: &*world,
        coords: &*offset,
        sink: &mut *outbox,
        text: &*text,
    };

    for code in keyboard.get_just_pressed() {
        if let Some(key) = key_char(*code, shift) {
            session.key_down(key, &ctx, &mut ports);
        }
    }
    for code in keyboard.get_just_released() {
        if let Some(key) = key_char(*code, false) {
            session.key_up(key);
        }
    }
}

/// Runs the session frame and stores the HUD draw list.
///
/// The camera follows the player, so the screen centre is the player's
/// position scaled to world units. Emote timing reads real time so a paused
/// virtual clock does not stall the permanent emote.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
#[expect(
    clippy::cast_possible_truncation,
    reason = "Wall-clock seconds fit comfortably in i64."
)]
pub fn hud_frame_system(
    time: Res<Time<Real>>,
    mut session: ResMut<ClientSession>,
    player: Res<LocalPlayer>,
    world: Res<WorldHandle>,
    offset: Res<WireOffset>,
    text: Res<FixedPitchText>,
    mut outbox: ResMut<Outbox>,
    mut view: ResMut<ScreenView>,
    mut draw: ResMut<HudDrawList>,
) {
    let center = player.state.position * session.settings().cell_size;
    let ctx = FrameContext {
        player: &player.state,
        center,
        now: time.elapsed_secs_f64().floor() as i64,
    };
    let mut ports = HostPorts {
        world: &*world,
        coords: &*offset,
        sink: &mut *outbox,
        text: &*text,
    };
    draw.0 = session.frame(&ctx, &mut ports);

    let zoom = session.zoom();
    view.0 = Viewport::new(
        center,
        f64::from(zoom.view_width()),
        f64::from(zoom.view_height()),
    );
}

/// Hands this frame's outbound actions to [`LastFrameActions`] and empties
/// the outbox.
pub fn publish_actions_system(mut outbox: ResMut<Outbox>, mut published: ResMut<LastFrameActions>) {
    published.0.sent = outbox.drain();
    for action in &published.0.sent {
        match action {
            OutboundAction::Server(message) => debug!("sent `{message}`"),
            OutboundAction::NextAction { message, target, .. } => {
                debug!("queued `{message}` for {target:?}");
            }
            OutboundAction::ClickMove(pos) => debug!("click move to ({}, {})", pos.x, pos.y),
        }
    }
}

/// Starts queued launches, forwards speech and steps the cutscene.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn rocket_launch_system(
    time: Res<Time>,
    view: Res<ScreenView>,
    mut inbox: ResMut<LaunchInbox>,
    mut launch: ResMut<RocketLaunch>,
    mut draw: ResMut<CutsceneDrawList>,
) {
    let now = time.elapsed_secs_f64();
    if let Some(params) = inbox.launch.take() {
        if let Err(err) = launch.start(params, view.0, now) {
            warn!("ignoring launch request: {err}");
        }
    }
    for (speaker, text) in inbox.speech.drain(..) {
        launch.add_speech(speaker, &text, now);
    }

    launch.step(now, f64::from(time.delta_secs()) * TARGET_FPS);
    if launch.is_running() {
        draw.0 = launch.draw(&view.0).into_commands();
    } else if !draw.0.is_empty() {
        draw.0.clear();
    }
}

/// Plugin hosting the input controller and HUD.
///
/// Settings come from an existing [`ClientSettings`] resource when the app
/// provides one, otherwise the defaults are used.
///
/// # Examples
///
/// ```
/// use bevy::prelude::*;
/// use wayside::presentation::HudPlugin;
///
/// let mut app = App::new();
/// app.add_plugins(MinimalPlugins)
///     .init_resource::<ButtonInput<KeyCode>>()
///     .add_plugins(HudPlugin);
/// app.update();
/// ```
#[derive(Debug)]
pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        let settings = app
            .world()
            .get_resource::<ClientSettings>()
            .cloned()
            .unwrap_or_default();
        app.insert_resource(ClientSession::new(settings.clone()));
        app.insert_resource(settings);
        app.init_resource::<LocalPlayer>();
        app.init_resource::<WorldHandle>();
        app.init_resource::<WireOffset>();
        app.init_resource::<FixedPitchText>();
        app.init_resource::<Outbox>();
        app.init_resource::<ScreenView>();
        app.init_resource::<HudDrawList>();
        app.init_resource::<LastFrameActions>();
        app.add_systems(
            Update,
            (keyboard_bridge_system, hud_frame_system, publish_actions_system).chain(),
        );
    }
}

/// Plugin hosting the rocket launch cutscene.
#[derive(Debug)]
pub struct RocketLaunchPlugin;

impl Plugin for RocketLaunchPlugin {
    fn build(&self, app: &mut App) {
        let settings = app
            .world()
            .get_resource::<ClientSettings>()
            .map(|s| s.cutscene.clone())
            .unwrap_or_default();
        app.insert_resource(RocketLaunch::new(settings));
        app.init_resource::<ScreenView>();
        app.init_resource::<LaunchInbox>();
        app.init_resource::<CutsceneDrawList>();
        app.add_systems(Update, rocket_launch_system);
    }
}
