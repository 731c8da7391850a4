//! Utility helpers for tests.
//!
//! World and player builders plus assertions over rendered draw lists.

use glam::DVec2;
use wayside::draw::DrawCommand;
use wayside::grid::{GridCell, ObjectId, PlayerId};
use wayside::host::PlayerState;
use wayside::world_handle::WorldHandle;

/// A wolf, one of the default hazardous animals.
pub const WOLF: ObjectId = ObjectId(418);
/// A grizzly bear, one of the default hazardous animals.
pub const BEAR: ObjectId = ObjectId(628);
/// An impassable, harmless object.
pub const WALL: ObjectId = ObjectId(886);
/// A harmless object that can be walked over.
pub const BERRY_BUSH: ObjectId = ObjectId(30);

/// Builds a world from `(x, y, id)` triples; [`WALL`] blocks walking.
#[must_use]
pub fn world_with(objects: &[(i32, i32, ObjectId)]) -> WorldHandle {
    let mut world = WorldHandle::default().with_blocking(WALL);
    for &(x, y, id) in objects {
        world.place((x, y), id);
    }
    world
}

/// A stationary player with id 1 standing on `(x, y)`.
#[must_use]
pub fn player_at(x: i32, y: i32) -> PlayerState {
    PlayerState::standing_at(PlayerId(1), GridCell::new(x, y))
}

/// A player at `(x, y)` walking towards `destination`.
#[must_use]
pub fn walking_player(x: f64, y: f64, destination: GridCell) -> PlayerState {
    let mut player = PlayerState::standing_at(PlayerId(1), destination);
    player.position = DVec2::new(x, y);
    player.in_motion = true;
    player
}

/// Every text string carried by `commands`, in draw order.
#[must_use]
pub fn draw_texts(commands: &[DrawCommand]) -> Vec<&str> {
    commands.iter().filter_map(DrawCommand::text).collect()
}

/// Assert that all strings in `keys` are drawn by `commands`.
///
/// # Panics
/// Panics with a helpful message if any key is missing.
pub fn assert_all_present(commands: &[DrawCommand], keys: &[&str]) {
    let texts = draw_texts(commands);
    for key in keys {
        assert!(texts.contains(key), "{key} not found in {texts:?}");
    }
}

/// Assert that none of the strings in `keys` are drawn by `commands`.
///
/// # Panics
/// Panics with a helpful message if any key is found.
pub fn assert_all_absent(commands: &[DrawCommand], keys: &[&str]) {
    let texts = draw_texts(commands);
    for key in keys {
        assert!(!texts.contains(key), "{key} should not be drawn");
    }
}
