//! Headless demo driving the client controller and launch cutscene for a
//! fixed number of frames, then logging what was sent.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use clap::Parser;
use log::info;
use wayside::cutscene::LaunchParams;
use wayside::grid::{GridCell, ObjectId, PlayerId};
use wayside::presentation::{CutsceneDrawList, HudDrawList, LastFrameActions, LaunchInbox};
use wayside::world_handle::{LocalPlayer, OutboundAction};
use wayside::{init_logging, ClientSettings, HudPlugin, RocketLaunchPlugin, WorldHandle, TARGET_FPS};

const ROCKET: ObjectId = ObjectId(2_000);
const WOLF: ObjectId = ObjectId(418);
const STONE_WALL: ObjectId = ObjectId(886);

/// Headless run of the client controller and launch cutscene
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
    /// JSON settings file
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Number of frames to simulate
    #[arg(short, long, default_value_t = 120)]
    frames: u32,
    /// Movement keys held for the whole run, e.g. "wd"
    #[arg(short, long, default_value = "d")]
    keys: String,
    /// Start a rocket launch lasting this many seconds
    #[arg(long)]
    launch_secs: Option<f64>,
    /// Starfield seed for the launch
    #[arg(long)]
    seed: Option<u64>,
}

fn key_code(key: char) -> Option<KeyCode> {
    match key {
        'w' => Some(KeyCode::KeyW),
        'a' => Some(KeyCode::KeyA),
        's' => Some(KeyCode::KeyS),
        'd' => Some(KeyCode::KeyD),
        _ => None,
    }
}

fn demo_world() -> WorldHandle {
    let mut world = WorldHandle::default().with_blocking(STONE_WALL);
    world
        .place((3, 0), STONE_WALL)
        .place((4, 1), WOLF)
        .place((0, 3), WOLF)
        .place((-2, 0), STONE_WALL);
    world
}

/// Teleports the player to each click-move target so the walk progresses.
fn follow_clicks(app: &mut App) {
    let cell_size = app.world().resource::<ClientSettings>().cell_size;
    let target = app
        .world()
        .resource::<LastFrameActions>()
        .0
        .click_moves()
        .last()
        .map(|pos| pos / cell_size);
    if let Some(cell_pos) = target {
        let mut player = app.world_mut().resource_mut::<LocalPlayer>();
        player.state.position = cell_pos;
        player.state.destination = GridCell::rounded(cell_pos);
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let settings = match &args.config {
        Some(path) => ClientSettings::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => ClientSettings::default(),
    };

    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
            1.0 / TARGET_FPS,
        )))
        .init_resource::<ButtonInput<KeyCode>>()
        .insert_resource(settings)
        .insert_resource(demo_world())
        .add_plugins((HudPlugin, RocketLaunchPlugin));

    {
        let mut keyboard = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
        for code in args.keys.chars().filter_map(key_code) {
            keyboard.press(code);
        }
    }

    if let Some(duration) = args.launch_secs {
        let mut launch = LaunchParams::new(PlayerId(1), ROCKET, duration);
        if let Some(seed) = args.seed {
            launch = launch.with_seed(seed);
        }
        app.world_mut().resource_mut::<LaunchInbox>().launch = Some(launch);
    }

    let mut sent = Vec::new();
    for _ in 0..args.frames {
        app.update();
        sent.extend(app.world().resource::<LastFrameActions>().0.sent.iter().cloned());
        app.world_mut().resource_mut::<ButtonInput<KeyCode>>().clear();
        follow_clicks(&mut app);
    }

    let world = app.world();
    for action in &sent {
        match action {
            OutboundAction::ClickMove(pos) => info!("click move to ({}, {})", pos.x, pos.y),
            OutboundAction::Server(message) => info!("sent `{message}`"),
            OutboundAction::NextAction { message, .. } => info!("queued `{message}`"),
        }
    }
    info!(
        "final position {:?}; HUD {} commands; cutscene {} commands",
        world.resource::<LocalPlayer>().state.position,
        world.resource::<HudDrawList>().0.len(),
        world.resource::<CutsceneDrawList>().0.len(),
    );
    Ok(())
}
