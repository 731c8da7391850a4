//! Contracts consumed from the host game engine.
//!
//! World lookup, coordinate conversion, action dispatch and text metrics
//! all live in the engine. The controller only sees them through these
//! traits, so the collision heuristic and HUD layout run without a world
//! database or graphics context.

use glam::DVec2;

use crate::grid::{GridCell, ObjectId, PlayerId};
use crate::protocol::ActionMessage;

/// Read-only queries against the world grid.
#[cfg_attr(test, mockall::automock)]
pub trait WorldQuery {
    /// Object occupying `cell`, if any.
    fn object_id_at(&self, cell: GridCell) -> Option<ObjectId>;

    /// Whether objects of type `id` stop players walking through them.
    fn blocks_walking(&self, id: ObjectId) -> bool;
}

/// Conversion from absolute world cells to the coordinates the server expects.
#[cfg_attr(test, mockall::automock)]
pub trait CoordinateSpace {
    /// Server column for world column `x`.
    fn send_x(&self, x: i32) -> i32;
    /// Server row for world row `y`.
    fn send_y(&self, y: i32) -> i32;
}

/// Outbound channel towards the server and the host's action queue.
#[cfg_attr(test, mockall::automock)]
pub trait ActionSink {
    /// Writes `message` straight to the server socket.
    fn send_to_server(&mut self, message: &ActionMessage);

    /// Queues `message` as the next action, executed once the player is
    /// next to `target`.
    fn set_next_action(&mut self, message: &ActionMessage, target: GridCell, dropping: bool);

    /// Issues a click-to-move towards a world-space position.
    fn click_move(&mut self, world_pos: DVec2);
}

/// Width measurement for the handwriting font.
#[cfg_attr(test, mockall::automock)]
pub trait TextMetrics {
    /// Rendered width of `text` in screen units.
    fn measure(&self, text: &str) -> f64;
}

/// Borrowed bundle of every host port a frame may touch.
pub struct HostPorts<'a> {
    /// World grid lookups.
    pub world: &'a dyn WorldQuery,
    /// World-to-server coordinate conversion.
    pub coords: &'a dyn CoordinateSpace,
    /// Where actions and moves are sent.
    pub sink: &'a mut dyn ActionSink,
    /// Font measurement for HUD layout.
    pub text: &'a dyn TextMetrics,
}

/// Snapshot of the local player supplied by the host each frame.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerState {
    /// Live-object id of the player.
    pub id: PlayerId,
    /// Current position in fractional cell units.
    pub position: DVec2,
    /// Cell the player is walking towards (or standing on).
    pub destination: GridCell,
    /// Whether a walk is in progress.
    pub in_motion: bool,
    /// Age in years.
    pub age: f64,
    /// Object currently held in hand.
    pub holding: Option<ObjectId>,
}

impl PlayerState {
    /// A stationary player standing on `cell`.
    #[must_use]
    pub fn standing_at(id: PlayerId, cell: GridCell) -> Self {
        Self {
            id,
            position: DVec2::new(f64::from(cell.x), f64::from(cell.y)),
            destination: cell,
            in_motion: false,
            age: 0.0,
            holding: None,
        }
    }

    /// Nearest cell to the current position.
    #[must_use]
    pub fn rounded_cell(&self) -> GridCell {
        GridCell::rounded(self.position)
    }

    /// Cell at `offset` from the current position, truncating toward zero.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "Truncation toward zero is the host's cell convention for relative actions."
    )]
    #[must_use]
    pub fn relative_cell(&self, dx: i32, dy: i32) -> GridCell {
        GridCell::new(
            (f64::from(dx) + self.position.x) as i32,
            (f64::from(dy) + self.position.y) as i32,
        )
    }

    /// Whether something is actually in hand.
    #[must_use]
    pub fn is_holding(&self) -> bool {
        self.holding.is_some_and(ObjectId::is_present)
    }
}

/// Current screen view: centre in world units and visible extent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Screen centre in world units.
    pub center: DVec2,
    /// Visible width.
    pub width: f64,
    /// Visible height.
    pub height: f64,
}

impl Viewport {
    /// View of `width` by `height` centred on `center`.
    #[must_use]
    pub const fn new(center: DVec2, width: f64, height: f64) -> Self {
        Self {
            center,
            width,
            height,
        }
    }
}
