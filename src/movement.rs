//! Keyboard-driven single-cell movement with hazard avoidance.
//!
//! Held direction keys are folded into a [`MovementIntent`]. Once per frame
//! [`MovementController::step`] turns the intent into at most one candidate
//! cell, validates it against walkability and the corner rule, slides along
//! walls when the straight step is blocked, and only then issues a single
//! click-move to the host.

use log::{debug, trace};

use crate::grid::GridCell;
use crate::hazards::HazardSet;
use crate::host::{ActionSink, PlayerState, WorldQuery};
use crate::walkability::{corner_is_safe, tile_is_safe_to_walk};

/// One of the four movement keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// `W`, towards increasing `y`.
    Up,
    /// `S`
    Down,
    /// `A`
    Left,
    /// `D`, towards increasing `x`.
    Right,
}

impl Direction {
    /// Maps the WASD layout to directions.
    #[must_use]
    pub const fn from_key(key: char) -> Option<Self> {
        match key {
            'w' => Some(Self::Up),
            's' => Some(Self::Down),
            'a' => Some(Self::Left),
            'd' => Some(Self::Right),
            _ => None,
        }
    }
}

/// Pressed state of the four movement keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[expect(
    clippy::struct_excessive_bools,
    reason = "This struct represents the pressed state of exactly four directional keys."
)]
pub struct MovementIntent {
    /// Whether the "up" key (W) is held.
    pub up: bool,
    /// Whether the "down" key (S) is held.
    pub down: bool,
    /// Whether the "left" key (A) is held.
    pub left: bool,
    /// Whether the "right" key (D) is held.
    pub right: bool,
}

impl MovementIntent {
    /// Only up held.
    pub const UP: Self = Self::new(true, false, false, false);
    /// Only down held.
    pub const DOWN: Self = Self::new(false, true, false, false);
    /// Only left held.
    pub const LEFT: Self = Self::new(false, false, true, false);
    /// Only right held.
    pub const RIGHT: Self = Self::new(false, false, false, true);
    /// Up and right held.
    pub const UP_RIGHT: Self = Self::new(true, false, false, true);
    /// Up and left held.
    pub const UP_LEFT: Self = Self::new(true, false, true, false);
    /// Down and right held.
    pub const DOWN_RIGHT: Self = Self::new(false, true, false, true);
    /// Down and left held.
    pub const DOWN_LEFT: Self = Self::new(false, true, true, false);

    /// Builds an intent from the four key states.
    #[must_use]
    pub const fn new(up: bool, down: bool, left: bool, right: bool) -> Self {
        Self {
            up,
            down,
            left,
            right,
        }
    }

    /// Whether any key is held.
    #[must_use]
    pub const fn any(self) -> bool {
        self.up || self.down || self.left || self.right
    }

    /// Records a key transition.
    pub const fn set(&mut self, direction: Direction, pressed: bool) {
        match direction {
            Direction::Up => self.up = pressed,
            Direction::Down => self.down = pressed,
            Direction::Left => self.left = pressed,
            Direction::Right => self.right = pressed,
        }
    }

    /// Intent with opposing pairs cancelled out.
    #[must_use]
    pub const fn effective(self) -> Self {
        Self {
            up: self.up && !self.down,
            down: self.down && !self.up,
            left: self.left && !self.right,
            right: self.right && !self.left,
        }
    }

    /// Cell offset `(dx, dy)` implied by the intent; `y` grows upwards.
    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        /// Maps a negative/positive key pair to an axis value.
        const fn axis(neg: bool, pos: bool) -> i32 {
            match (neg, pos) {
                (true, false) => -1,
                (false, true) => 1,
                _ => 0,
            }
        }

        (axis(self.left, self.right), axis(self.down, self.up))
    }
}

/// Last committed movement: where it started and where it headed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveAttempt {
    /// Rounded player cell when the attempt was made.
    pub origin: GridCell,
    /// Cell the click-move was issued towards.
    pub target: GridCell,
}

/// A sideways fallback tried when a straight step is blocked.
struct Deflection {
    allowed: bool,
    offset: (i32, i32),
    diagonal: MovementIntent,
}

/// A straight step and its two deflections, in evaluation order.
struct WallSlide {
    active: bool,
    straight: (i32, i32),
    deflections: [Deflection; 2],
}

/// Slides for the effective directions `d`. A deflection towards one side is
/// only permitted while the opposite key is physically up, so `held` is the
/// raw key state before opposing pairs cancel.
const fn wall_slides(d: MovementIntent, held: MovementIntent) -> [WallSlide; 4] {
    const fn deflect(allowed: bool, offset: (i32, i32), diagonal: MovementIntent) -> Deflection {
        Deflection {
            allowed,
            offset,
            diagonal,
        }
    }

    [
        WallSlide {
            active: d.up,
            straight: (0, 1),
            deflections: [
                deflect(!held.left, (1, 1), MovementIntent::UP_RIGHT),
                deflect(!held.right, (-1, 1), MovementIntent::UP_LEFT),
            ],
        },
        WallSlide {
            active: d.down,
            straight: (0, -1),
            deflections: [
                deflect(!held.left, (1, -1), MovementIntent::DOWN_RIGHT),
                deflect(!held.right, (-1, -1), MovementIntent::DOWN_LEFT),
            ],
        },
        WallSlide {
            active: d.right,
            straight: (1, 0),
            deflections: [
                deflect(!held.down, (1, 1), MovementIntent::UP_RIGHT),
                deflect(!held.up, (1, -1), MovementIntent::DOWN_RIGHT),
            ],
        },
        WallSlide {
            active: d.left,
            straight: (-1, 0),
            deflections: [
                deflect(!held.down, (-1, 1), MovementIntent::UP_LEFT),
                deflect(!held.up, (-1, -1), MovementIntent::DOWN_LEFT),
            ],
        },
    ]
}

/// Picks the cell to walk to from `origin`, or `None` when no safe step exists.
///
/// The direct candidate must pass the corner rule and be walkable. When it
/// is not, each held direction is retried as a straight step and then as
/// the two perpendicular deflections, each deflection re-running the corner
/// rule first. A failed corner check is sticky: if the last corner
/// evaluated was unsafe the move is rejected even when a walkable cell was
/// found.
///
/// # Examples
///
/// ```
/// use wayside::grid::GridCell;
/// use wayside::hazards::HazardSet;
/// use wayside::movement::{resolve_move, MovementIntent};
/// use wayside::world_handle::WorldHandle;
///
/// let world = WorldHandle::default();
/// let target = resolve_move(
///     MovementIntent::UP,
///     GridCell::new(0, 0),
///     &world,
///     &HazardSet::default(),
/// );
/// assert_eq!(target, Some(GridCell::new(0, 1)));
/// ```
#[must_use]
pub fn resolve_move(
    intent: MovementIntent,
    origin: GridCell,
    world: &dyn WorldQuery,
    hazards: &HazardSet,
) -> Option<GridCell> {
    let directions = intent.effective();
    let (dx, dy) = directions.offset();
    if (dx, dy) == (0, 0) {
        return None;
    }

    let walkable = |cell: GridCell| tile_is_safe_to_walk(world, hazards, cell);

    let mut corner_ok = corner_is_safe(world, hazards, origin, directions);
    let mut target = origin.offset(dx, dy);
    let mut safe = corner_ok && walkable(target);

    for slide in wall_slides(directions, intent) {
        if safe || !slide.active {
            continue;
        }
        target = origin.offset(slide.straight.0, slide.straight.1);
        safe = walkable(target);

        for deflection in slide.deflections {
            if safe || !deflection.allowed {
                continue;
            }
            corner_ok = corner_is_safe(world, hazards, origin, deflection.diagonal);
            if corner_ok {
                target = origin.offset(deflection.offset.0, deflection.offset.1);
                safe = walkable(target);
            }
        }
    }

    (safe && corner_ok).then_some(target)
}

/// Owns key state and the last attempt; issues at most one move per frame.
#[derive(Debug, Clone, Default)]
pub struct MovementController {
    intent: MovementIntent,
    last_attempt: Option<MoveAttempt>,
}

impl MovementController {
    /// Keys currently held.
    #[must_use]
    pub const fn intent(&self) -> MovementIntent {
        self.intent
    }

    /// Attempt committed since the keys were last all released.
    #[must_use]
    pub const fn last_attempt(&self) -> Option<MoveAttempt> {
        self.last_attempt
    }

    /// Holds a key.
    pub const fn press(&mut self, direction: Direction) {
        self.intent.set(direction, true);
    }

    /// Releases a key; once all keys are up the last attempt is forgotten.
    pub const fn release(&mut self, direction: Direction) {
        self.intent.set(direction, false);
        if !self.intent.any() {
            self.last_attempt = None;
        }
    }

    /// Runs one frame of movement resolution.
    ///
    /// Skips when nothing is held, or while the player is still walking away
    /// from the cell of the previous attempt. Returns the committed attempt.
    pub fn step(
        &mut self,
        player: &PlayerState,
        world: &dyn WorldQuery,
        hazards: &HazardSet,
        sink: &mut dyn ActionSink,
        cell_size: f64,
    ) -> Option<MoveAttempt> {
        if !self.intent.any() {
            return None;
        }

        let origin = player.rounded_cell();
        if player.in_motion && self.last_attempt.is_some_and(|last| last.origin == origin) {
            return None;
        }

        let Some(target) = resolve_move(self.intent, origin, world, hazards) else {
            trace!("no safe step from {origin:?} for {:?}", self.intent);
            return None;
        };

        let attempt = MoveAttempt { origin, target };
        self.last_attempt = Some(attempt);
        debug!("moving from {origin:?} to {target:?}");
        sink.click_move(target.to_world(cell_size));
        Some(attempt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{ObjectId, PlayerId};
    use crate::host::{MockActionSink, MockWorldQuery};
    use glam::DVec2;
    use rstest::rstest;

    const WOLF: ObjectId = ObjectId(418);
    const WALL: ObjectId = ObjectId(886);

    /// Mock world populated from `(x, y, id)` triples.
    fn world(objects: &'static [(i32, i32, ObjectId)]) -> MockWorldQuery {
        let mut world = MockWorldQuery::new();
        world.expect_object_id_at().returning(move |cell| {
            objects
                .iter()
                .find(|(x, y, _)| GridCell::new(*x, *y) == cell)
                .map(|(_, _, id)| *id)
        });
        world.expect_blocks_walking().returning(|id| id == WALL);
        world
    }

    fn resolve(intent: MovementIntent, objects: &'static [(i32, i32, ObjectId)]) -> Option<GridCell> {
        resolve_move(intent, GridCell::new(0, 0), &world(objects), &HazardSet::default())
    }

    #[rstest]
    #[case::no_keys(MovementIntent::default(), (0, 0))]
    #[case::up(MovementIntent::UP, (0, 1))]
    #[case::down(MovementIntent::DOWN, (0, -1))]
    #[case::left(MovementIntent::LEFT, (-1, 0))]
    #[case::right(MovementIntent::RIGHT, (1, 0))]
    #[case::diagonal(MovementIntent::UP_LEFT, (-1, 1))]
    #[case::vertical_cancels(MovementIntent::new(true, true, false, true), (1, 0))]
    #[case::everything_cancels(MovementIntent::new(true, true, true, true), (0, 0))]
    fn offsets(#[case] intent: MovementIntent, #[case] expected: (i32, i32)) {
        assert_eq!(intent.effective().offset(), expected);
    }

    #[rstest]
    #[case::open_field(MovementIntent::UP, &[], Some((0, 1)))]
    #[case::open_diagonal(MovementIntent::DOWN_RIGHT, &[], Some((1, -1)))]
    #[case::opposing_only(MovementIntent::new(false, false, true, true), &[], None)]
    #[case::slide_right_past_wall(MovementIntent::UP, &[(0, 1, WALL)], Some((1, 1)))]
    #[case::slide_left_when_right_blocked(
        MovementIntent::UP,
        &[(0, 1, WALL), (1, 1, WALL)],
        Some((-1, 1))
    )]
    #[case::boxed_in(MovementIntent::RIGHT, &[(1, 0, WALL), (1, 1, WALL), (1, -1, WALL)], None)]
    #[case::slide_up_past_wall(MovementIntent::LEFT, &[(-1, 0, WALL)], Some((-1, 1)))]
    #[case::wolf_ahead_poisons_both_slides(MovementIntent::LEFT, &[(-1, 0, WOLF)], None)]
    #[case::walled_diagonal_falls_back_to_vertical(
        MovementIntent::UP_RIGHT,
        &[(1, 1, WALL)],
        Some((0, 1))
    )]
    #[case::wolf_on_diagonal_falls_back_to_vertical(
        MovementIntent::UP_RIGHT,
        &[(1, 1, WOLF)],
        Some((0, 1))
    )]
    #[case::diagonal_and_vertical_walled_goes_horizontal(
        MovementIntent::UP_RIGHT,
        &[(1, 1, WALL), (0, 1, WALL)],
        Some((1, 0))
    )]
    #[case::diagonal_boxed_in(
        MovementIntent::UP_RIGHT,
        &[(0, 1, WALL), (1, 1, WALL), (1, 0, WALL), (-1, 1, WALL), (1, -1, WALL)],
        None
    )]
    #[case::held_sideways_pair_forbids_deflection(
        MovementIntent::new(true, false, true, true),
        &[(0, 1, WALL)],
        None
    )]
    fn resolution(
        #[case] intent: MovementIntent,
        #[case] objects: &'static [(i32, i32, ObjectId)],
        #[case] expected: Option<(i32, i32)>,
    ) {
        assert_eq!(resolve(intent, objects), expected.map(GridCell::from));
    }

    #[rstest]
    #[case::vertical_neighbour(&[(0, 1, WOLF)])]
    #[case::horizontal_neighbour(&[(1, 0, WOLF)])]
    fn hazardous_corner_rejects_diagonal(#[case] objects: &'static [(i32, i32, ObjectId)]) {
        assert_eq!(resolve(MovementIntent::UP_RIGHT, objects), None);
    }

    #[test]
    fn deflection_skips_hazardous_corner() {
        // Straight up is walled; the right deflection would pass a wolf.
        let objects: &'static [(i32, i32, ObjectId)] = &[(0, 1, WALL), (1, 0, WOLF)];
        assert_eq!(resolve(MovementIntent::UP, objects), Some(GridCell::new(-1, 1)));
    }

    fn player_at(x: f64, y: f64, in_motion: bool) -> PlayerState {
        let mut player = PlayerState::standing_at(PlayerId(7), GridCell::default());
        player.position = DVec2::new(x, y);
        player.in_motion = in_motion;
        player
    }

    #[test]
    fn commit_issues_one_click_move() {
        let mut controller = MovementController::default();
        controller.press(Direction::Right);
        let mut sink = MockActionSink::new();
        sink.expect_click_move()
            .withf(|pos| *pos == DVec2::new(256.0, 128.0))
            .times(1)
            .return_const(());

        let attempt = controller.step(
            &player_at(0.6, 1.2, false),
            &world(&[]),
            &HazardSet::default(),
            &mut sink,
            128.0,
        );

        let expected = MoveAttempt {
            origin: GridCell::new(1, 1),
            target: GridCell::new(2, 1),
        };
        assert_eq!(attempt, Some(expected));
        assert_eq!(controller.last_attempt(), Some(expected));
    }

    #[test]
    fn waits_while_walking_away_from_last_origin() {
        let mut controller = MovementController::default();
        controller.press(Direction::Up);
        let mut sink = MockActionSink::new();
        sink.expect_click_move().times(2).return_const(());
        let world = world(&[]);
        let hazards = HazardSet::default();

        assert!(controller
            .step(&player_at(0.0, 0.0, false), &world, &hazards, &mut sink, 128.0)
            .is_some());
        assert!(controller
            .step(&player_at(0.0, 0.3, true), &world, &hazards, &mut sink, 128.0)
            .is_none());
        assert!(controller
            .step(&player_at(0.0, 0.6, true), &world, &hazards, &mut sink, 128.0)
            .is_some());
    }

    #[test]
    fn stationary_player_retries_same_cell() {
        let mut controller = MovementController::default();
        controller.press(Direction::Up);
        let mut sink = MockActionSink::new();
        sink.expect_click_move().times(2).return_const(());
        let world = world(&[]);
        let hazards = HazardSet::default();
        let player = player_at(0.0, 0.0, false);

        controller.step(&player, &world, &hazards, &mut sink, 128.0);
        controller.step(&player, &world, &hazards, &mut sink, 128.0);
    }

    #[test]
    fn releasing_every_key_forgets_last_attempt() {
        let mut controller = MovementController::default();
        controller.press(Direction::Up);
        controller.press(Direction::Left);
        let mut sink = MockActionSink::new();
        sink.expect_click_move().return_const(());
        controller.step(
            &player_at(0.0, 0.0, false),
            &world(&[]),
            &HazardSet::default(),
            &mut sink,
            128.0,
        );

        controller.release(Direction::Up);
        assert!(controller.last_attempt().is_some());
        controller.release(Direction::Left);
        assert_eq!(controller.last_attempt(), None);
    }

    #[test]
    fn idle_controller_never_queries_world() {
        let mut controller = MovementController::default();
        let mut world = MockWorldQuery::new();
        world.expect_object_id_at().never();
        let mut sink = MockActionSink::new();
        sink.expect_click_move().never();
        assert!(controller
            .step(&player_at(0.0, 0.0, false), &world, &HazardSet::default(), &mut sink, 128.0)
            .is_none());
    }
}
