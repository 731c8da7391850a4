//! Cell predicates backing the movement heuristic.
//!
//! Both predicates treat an empty or unknown cell as safe. The corner rule
//! guards diagonal steps so the player never cuts past a hazard that sits
//! on either cell flanking the diagonal.

use crate::grid::GridCell;
use crate::hazards::HazardSet;
use crate::host::WorldQuery;
use crate::movement::MovementIntent;

/// Returns `false` when `cell` holds a hazardous object.
#[must_use]
pub fn tile_has_no_hazards(world: &dyn WorldQuery, hazards: &HazardSet, cell: GridCell) -> bool {
    match world.object_id_at(cell) {
        Some(id) if id.is_present() => !hazards.contains(id),
        _ => true,
    }
}

/// Returns `false` when `cell` holds a hazardous or walk-blocking object.
#[must_use]
pub fn tile_is_safe_to_walk(world: &dyn WorldQuery, hazards: &HazardSet, cell: GridCell) -> bool {
    match world.object_id_at(cell) {
        Some(id) if id.is_present() => !hazards.contains(id) && !world.blocks_walking(id),
        _ => true,
    }
}

/// Applies the corner rule for a step out of `origin` in `directions`.
///
/// Only diagonal input is constrained: the vertical neighbour must be free
/// of hazards and, if it is, so must the horizontal neighbour. Up wins over
/// down and right over left when both members of a pair are set.
#[must_use]
pub fn corner_is_safe(
    world: &dyn WorldQuery,
    hazards: &HazardSet,
    origin: GridCell,
    directions: MovementIntent,
) -> bool {
    let vertical = if directions.up {
        Some(1)
    } else if directions.down {
        Some(-1)
    } else {
        None
    };
    let horizontal = if directions.right {
        Some(1)
    } else if directions.left {
        Some(-1)
    } else {
        None
    };

    match (vertical, horizontal) {
        (Some(dy), Some(dx)) => {
            tile_has_no_hazards(world, hazards, origin.offset(0, dy))
                && tile_has_no_hazards(world, hazards, origin.offset(dx, 0))
        }
        _ => true,
    }
}
