//! In-memory host used by the demo binary, the Bevy plugins and tests.
//!
//! [`WorldHandle`] stores a sparse object grid, [`WireOffset`] converts cells
//! to the server's frame and [`Outbox`] records everything the controller
//! tries to send instead of writing to a socket.

use bevy::prelude::Resource;
use glam::DVec2;
use hashbrown::{HashMap, HashSet};
use log::trace;

use crate::grid::{GridCell, ObjectId, PlayerId};
use crate::host::{ActionSink, CoordinateSpace, PlayerState, TextMetrics, WorldQuery};
use crate::protocol::ActionMessage;

#[derive(Resource, Debug, Clone, Default)]
/// Sparse snapshot of the objects lying on the world grid.
pub struct WorldHandle {
    /// Object occupying each non-empty cell.
    pub objects: HashMap<GridCell, ObjectId>,
    /// Object types that stop players walking through them.
    pub blocking: HashSet<ObjectId>,
}

impl WorldHandle {
    /// Puts `id` on `cell`, replacing anything already there.
    ///
    /// # Examples
    ///
    /// ```
    /// use wayside::grid::{GridCell, ObjectId};
    /// use wayside::host::WorldQuery;
    /// use wayside::world_handle::WorldHandle;
    ///
    /// let mut world = WorldHandle::default();
    /// world.place(GridCell::new(1, 2), ObjectId(418));
    /// assert_eq!(world.object_id_at(GridCell::new(1, 2)), Some(ObjectId(418)));
    /// assert_eq!(world.object_id_at(GridCell::new(0, 0)), None);
    /// ```
    pub fn place(&mut self, cell: impl Into<GridCell>, id: ObjectId) -> &mut Self {
        self.objects.insert(cell.into(), id);
        self
    }

    /// Empties `cell`, returning what was there.
    pub fn clear(&mut self, cell: impl Into<GridCell>) -> Option<ObjectId> {
        self.objects.remove(&cell.into())
    }

    /// Marks objects of type `id` as impassable.
    #[must_use]
    pub fn with_blocking(mut self, id: ObjectId) -> Self {
        self.blocking.insert(id);
        self
    }
}

impl WorldQuery for WorldHandle {
    fn object_id_at(&self, cell: GridCell) -> Option<ObjectId> {
        self.objects.get(&cell).copied()
    }

    fn blocks_walking(&self, id: ObjectId) -> bool {
        self.blocking.contains(&id)
    }
}

/// Server coordinates are absolute cells minus the client's birth origin.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WireOffset {
    /// Absolute cell the server treats as `(0, 0)`.
    pub origin: GridCell,
}

impl CoordinateSpace for WireOffset {
    fn send_x(&self, x: i32) -> i32 {
        x - self.origin.x
    }

    fn send_y(&self, y: i32) -> i32 {
        y - self.origin.y
    }
}

/// Something the controller tried to send to the host.
#[derive(Debug, Clone, PartialEq)]
pub enum OutboundAction {
    /// Written straight to the server.
    Server(ActionMessage),
    /// Queued until the player is next to `target`.
    NextAction {
        /// Message sent on arrival.
        message: ActionMessage,
        /// Cell the player must be beside.
        target: GridCell,
        /// Whether the action puts the held object down.
        dropping: bool,
    },
    /// Click-to-move towards a world position.
    ClickMove(DVec2),
}

/// Records outbound actions in order.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct Outbox {
    /// Actions in the order they were emitted.
    pub sent: Vec<OutboundAction>,
}

impl Outbox {
    /// Removes and returns everything recorded so far.
    pub fn drain(&mut self) -> Vec<OutboundAction> {
        std::mem::take(&mut self.sent)
    }

    /// Wire text of every message, queued or sent, in order.
    pub fn wire_lines(&self) -> impl Iterator<Item = String> + '_ {
        self.sent.iter().filter_map(|action| match action {
            OutboundAction::Server(message) | OutboundAction::NextAction { message, .. } => {
                Some(message.to_string())
            }
            OutboundAction::ClickMove(_) => None,
        })
    }

    /// Click-move destinations in order.
    pub fn click_moves(&self) -> impl Iterator<Item = DVec2> + '_ {
        self.sent.iter().filter_map(|action| match action {
            OutboundAction::ClickMove(pos) => Some(*pos),
            _ => None,
        })
    }
}

impl ActionSink for Outbox {
    fn send_to_server(&mut self, message: &ActionMessage) {
        trace!("server <- {message}");
        self.sent.push(OutboundAction::Server(*message));
    }

    fn set_next_action(&mut self, message: &ActionMessage, target: GridCell, dropping: bool) {
        self.sent.push(OutboundAction::NextAction {
            message: *message,
            target,
            dropping,
        });
    }

    fn click_move(&mut self, world_pos: DVec2) {
        self.sent.push(OutboundAction::ClickMove(world_pos));
    }
}

/// Text metrics approximating a fixed-pitch handwriting font.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct FixedPitchText {
    /// Width of every glyph in screen units.
    pub advance: f64,
}

impl Default for FixedPitchText {
    fn default() -> Self {
        Self { advance: 16.0 }
    }
}

impl TextMetrics for FixedPitchText {
    #[expect(
        clippy::cast_precision_loss,
        reason = "HUD strings are short enough to count exactly in f64."
    )]
    fn measure(&self, text: &str) -> f64 {
        text.chars().count() as f64 * self.advance
    }
}

/// The local player's latest snapshot plus whether chat has focus.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct LocalPlayer {
    /// Latest snapshot of the player.
    pub state: PlayerState,
    /// Whether the chat field has keyboard focus.
    pub say_field_focused: bool,
}

impl Default for LocalPlayer {
    fn default() -> Self {
        Self {
            state: PlayerState::standing_at(PlayerId(1), GridCell::default()),
            say_field_focused: false,
        }
    }
}
