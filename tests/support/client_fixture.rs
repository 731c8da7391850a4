//! Shared fixture for behavioural tests of the client plugins.
//!
//! Owns a headless `App` with both plugins installed, a manual clock and a
//! hand-driven keyboard so scenarios can press keys and step frames
//! deterministically.

use std::sync::MutexGuard;
use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use wayside::cutscene::LaunchParams;
use wayside::grid::{GridCell, PlayerId};
use wayside::host::PlayerState;
use wayside::presentation::{CutsceneDrawList, HudDrawList, LastFrameActions, LaunchInbox};
use wayside::world_handle::{LocalPlayer, Outbox, WorldHandle};
use wayside::{ClientSession, HudPlugin, RocketLaunch, RocketLaunchPlugin};

use crate::serial_app::{AppCell, SharedApp};

/// One simulated frame.
pub const FRAME: Duration = Duration::from_millis(100);

#[derive(Resource, Debug, Default)]
struct PluginsFinalized;

/// Every action published since the last reset, across frames.
#[derive(Resource, Debug, Default)]
struct SentSinceReset(Outbox);

#[derive(Debug, Clone)]
pub struct ClientAppFixture {
    app: SharedApp,
}

impl ClientAppFixture {
    /// Builds the app around `world`, with the player standing at the origin.
    #[must_use]
    pub fn bootstrap(world: WorldHandle) -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(TimeUpdateStrategy::ManualDuration(FRAME))
            .init_resource::<ButtonInput<KeyCode>>()
            .insert_resource(world)
            .init_resource::<SentSinceReset>()
            .add_plugins((HudPlugin, RocketLaunchPlugin));
        Self {
            app: SharedApp::new(app),
        }
    }

    /// Locks the underlying `App` for direct inspection or mutation.
    pub fn app_guard(&self) -> MutexGuard<'_, AppCell> {
        self.app.lock()
    }

    /// Advances one frame, then clears this frame's key transitions.
    ///
    /// The first tick finalizes plugins so schedules run deterministically.
    pub fn tick(&self) {
        let mut app = self.app_guard();
        if app.world().get_resource::<PluginsFinalized>().is_none() {
            app.finish();
            app.cleanup();
            app.insert_resource(PluginsFinalized);
        }
        app.update();
        let frame = app.world().resource::<LastFrameActions>().0.sent.clone();
        let world = app.world_mut();
        world.resource_mut::<SentSinceReset>().0.sent.extend(frame);
        world.resource_mut::<ButtonInput<KeyCode>>().clear();
    }

    pub fn press(&self, key: KeyCode) {
        let mut app = self.app_guard();
        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(key);
    }

    pub fn release(&self, key: KeyCode) {
        let mut app = self.app_guard();
        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .release(key);
    }

    /// Releases every key, forgets sent actions and puts the player back on
    /// `cell`.
    pub fn reset(&self, cell: GridCell) {
        let mut app = self.app_guard();
        let world = app.world_mut();
        world.resource_mut::<ButtonInput<KeyCode>>().reset_all();
        world.resource_mut::<SentSinceReset>().0.sent.clear();
        world.resource_mut::<LocalPlayer>().state = PlayerState::standing_at(PlayerId(1), cell);
        let settings = world.resource::<ClientSession>().settings().clone();
        world.insert_resource(ClientSession::new(settings));
        world.resource_mut::<RocketLaunch>().reset();
    }

    pub fn set_player(&self, player: PlayerState) {
        let mut app = self.app_guard();
        app.world_mut().resource_mut::<LocalPlayer>().state = player;
    }

    pub fn request_launch(&self, launch: LaunchParams) {
        let mut app = self.app_guard();
        app.world_mut().resource_mut::<LaunchInbox>().launch = Some(launch);
    }

    pub fn say(&self, speaker: PlayerId, text: &str) {
        let mut app = self.app_guard();
        app.world_mut()
            .resource_mut::<LaunchInbox>()
            .speech
            .push((speaker, text.to_owned()));
    }

    /// Actions published by every tick since the last reset.
    pub fn outbox(&self) -> Outbox {
        self.app_guard().world().resource::<SentSinceReset>().0.clone()
    }

    pub fn hud(&self) -> HudDrawList {
        self.app_guard().world().resource::<HudDrawList>().clone()
    }

    pub fn cutscene(&self) -> CutsceneDrawList {
        self.app_guard().world().resource::<CutsceneDrawList>().clone()
    }

    pub fn launch_state(&self) -> RocketLaunch {
        self.app_guard().world().resource::<RocketLaunch>().clone()
    }
}
