//! Tile actions, backpack shortcuts and emotes.
//!
//! Tile actions are queued through [`ActionSink::set_next_action`] so the
//! host walks into range first. Emotes go straight to the server socket.

use log::debug;

use crate::grid::GridCell;
use crate::host::{ActionSink, CoordinateSpace, PlayerState};
use crate::protocol::ActionMessage;

/// Converts an absolute cell into the server's coordinate space.
fn to_wire(coords: &dyn CoordinateSpace, cell: GridCell) -> GridCell {
    GridCell::new(coords.send_x(cell.x), coords.send_y(cell.y))
}

fn queue(sink: &mut dyn ActionSink, message: ActionMessage, target: GridCell, dropping: bool) {
    debug!("queueing `{message}`");
    sink.set_next_action(&message, target, dropping);
}

/// Uses whatever sits at `(dx, dy)` from the player.
pub fn use_tile_relative(
    player: &PlayerState,
    dx: i32,
    dy: i32,
    coords: &dyn CoordinateSpace,
    sink: &mut dyn ActionSink,
) {
    let wire = to_wire(coords, player.relative_cell(dx, dy));
    queue(sink, ActionMessage::Use { x: wire.x, y: wire.y }, wire, false);
}

/// Takes the top item from the container at `(dx, dy)` from the player.
pub fn remove_tile_relative(
    player: &PlayerState,
    dx: i32,
    dy: i32,
    coords: &dyn CoordinateSpace,
    sink: &mut dyn ActionSink,
) {
    let wire = to_wire(coords, player.relative_cell(dx, dy));
    let message = ActionMessage::Remove {
        x: wire.x,
        y: wire.y,
        index: -1,
    };
    queue(sink, message, wire, false);
}

/// Drops the held object at `(dx, dy)` from the player.
pub fn drop_tile_relative(
    player: &PlayerState,
    dx: i32,
    dy: i32,
    coords: &dyn CoordinateSpace,
    sink: &mut dyn ActionSink,
) {
    let wire = to_wire(coords, player.relative_cell(dx, dy));
    let message = ActionMessage::Drop {
        x: wire.x,
        y: wire.y,
        slot: -1,
    };
    queue(sink, message, wire, false);
}

/// Puts the held object into the backpack, or takes one out when empty-handed.
///
/// With `replace` the held object is swapped with the worn backpack instead
/// of being stored inside it.
pub fn use_backpack(
    player: &PlayerState,
    replace: bool,
    slot: i32,
    coords: &dyn CoordinateSpace,
    sink: &mut dyn ActionSink,
) {
    let wire = to_wire(coords, player.destination);
    let (x, y) = (wire.x, wire.y);

    if player.is_holding() {
        let message = if replace {
            ActionMessage::Drop { x, y, slot }
        } else {
            ActionMessage::SelfUse { x, y, slot }
        };
        queue(sink, message, wire, true);
    } else {
        let message = ActionMessage::SlotRemove {
            x,
            y,
            slot,
            index: -1,
        };
        queue(sink, message, wire, false);
    }
}

/// Emote id bound to a number key; ids 7 and 8 are skipped.
#[must_use]
pub fn emote_for_key(key: char) -> Option<i32> {
    let digit = key.to_digit(10)?;
    let id = i32::try_from(digit).ok()?;
    Some(if id > 6 { id + 2 } else { id })
}

/// Short and permanent emote bookkeeping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmoteState {
    permanent: Option<i32>,
    last_sent: i64,
}

impl EmoteState {
    /// Emote currently being repeated, if any.
    #[must_use]
    pub const fn permanent(&self) -> Option<i32> {
        self.permanent
    }

    /// Sends a one-off emote and cancels any permanent one.
    pub fn send_short(&mut self, id: i32, sink: &mut dyn ActionSink) {
        self.permanent = None;
        sink.send_to_server(&ActionMessage::Emote { id });
    }

    /// Makes `id` permanent; the first re-send happens after the interval.
    pub const fn set_permanent(&mut self, id: i32, now: i64) {
        self.permanent = Some(id);
        self.last_sent = now;
    }

    /// Re-sends the permanent emote once `repeat_secs` have fully elapsed.
    ///
    /// `now` is wall-clock seconds. Returns whether a message went out.
    pub fn tick(&mut self, now: i64, repeat_secs: i64, sink: &mut dyn ActionSink) -> bool {
        let Some(id) = self.permanent else {
            return false;
        };
        if self.last_sent + repeat_secs >= now {
            return false;
        }
        self.last_sent = now;
        sink.send_to_server(&ActionMessage::Emote { id });
        true
    }
}
