//! Movement heuristic against the in-memory world.

use glam::DVec2;
use rstest::rstest;
use test_utils::{player_at, walking_player, world_with, BEAR, BERRY_BUSH, WALL, WOLF};
use wayside::grid::{GridCell, ObjectId};
use wayside::hazards::HazardSet;
use wayside::movement::{resolve_move, Direction, MovementController, MovementIntent};
use wayside::world_handle::{OutboundAction, Outbox};
use wayside::CELL_SIZE;

fn step(
    controller: &mut MovementController,
    objects: &[(i32, i32, ObjectId)],
    origin: (i32, i32),
) -> Outbox {
    let world = world_with(objects);
    let mut outbox = Outbox::default();
    controller.step(
        &player_at(origin.0, origin.1),
        &world,
        &HazardSet::default(),
        &mut outbox,
        CELL_SIZE,
    );
    outbox
}

fn holding(directions: &[Direction]) -> MovementController {
    let mut controller = MovementController::default();
    for direction in directions {
        controller.press(*direction);
    }
    controller
}

#[rstest]
#[case::up(Direction::Up, (5, 6))]
#[case::down(Direction::Down, (5, 4))]
#[case::left(Direction::Left, (4, 5))]
#[case::right(Direction::Right, (6, 5))]
fn clear_single_step_commits(#[case] direction: Direction, #[case] target: (i32, i32)) {
    let mut controller = holding(&[direction]);
    let outbox = step(&mut controller, &[(9, 9, WOLF), (5, 5, BERRY_BUSH)], (5, 5));

    let target = GridCell::from(target);
    assert_eq!(controller.last_attempt().map(|a| a.target), Some(target));
    assert_eq!(
        outbox.sent,
        vec![OutboundAction::ClickMove(target.to_world(CELL_SIZE))]
    );
}

#[rstest]
#[case::wolf_above(&[(0, 1, WOLF)])]
#[case::wolf_beside(&[(1, 0, WOLF)])]
#[case::bear_above(&[(0, 1, BEAR)])]
#[case::bear_beside_wall_ahead(&[(1, 0, BEAR), (1, 1, WALL)])]
fn hazardous_corner_blocks_diagonal(#[case] objects: &[(i32, i32, ObjectId)]) {
    let mut controller = holding(&[Direction::Up, Direction::Right]);
    let outbox = step(&mut controller, objects, (0, 0));
    assert!(outbox.sent.is_empty());
    assert_eq!(controller.last_attempt(), None);
}

#[test]
fn wall_on_corner_still_allows_diagonal() {
    let mut controller = holding(&[Direction::Up, Direction::Right]);
    let outbox = step(&mut controller, &[(0, 1, WALL)], (0, 0));
    assert_eq!(
        outbox.click_moves().collect::<Vec<_>>(),
        vec![DVec2::new(CELL_SIZE, CELL_SIZE)]
    );
}

#[test]
fn blocked_step_slides_along_wall() {
    let world = world_with(&[(0, 1, WALL)]);
    let target = resolve_move(
        MovementIntent::UP,
        GridCell::new(0, 0),
        &world,
        &HazardSet::default(),
    );
    assert_eq!(target, Some(GridCell::new(1, 1)));
}

#[test]
fn slide_avoids_hazardous_corner() {
    // Up is walled; the right deflection would brush past a wolf, so the
    // slide goes left instead.
    let world = world_with(&[(0, 1, WALL), (1, 0, WOLF)]);
    let target = resolve_move(
        MovementIntent::UP,
        GridCell::new(0, 0),
        &world,
        &HazardSet::default(),
    );
    assert_eq!(target, Some(GridCell::new(-1, 1)));
}

#[test]
fn boxed_in_player_stays_put() {
    let world = world_with(&[(0, 1, WALL), (1, 1, WALL), (-1, 1, WALL)]);
    let target = resolve_move(
        MovementIntent::UP,
        GridCell::new(0, 0),
        &world,
        &HazardSet::default(),
    );
    assert_eq!(target, None);
}

#[test]
fn custom_hazards_replace_defaults() {
    let world = world_with(&[(0, 1, WOLF), (1, 0, BERRY_BUSH)]);
    let hazards = HazardSet::new([BERRY_BUSH]);
    let origin = GridCell::new(0, 0);

    assert_eq!(
        resolve_move(MovementIntent::UP, origin, &world, &hazards),
        Some(GridCell::new(0, 1))
    );
    assert_eq!(
        resolve_move(MovementIntent::UP_RIGHT, origin, &world, &hazards),
        None
    );
}

#[test]
fn no_new_attempt_while_walking_from_same_cell() {
    let world = world_with(&[]);
    let hazards = HazardSet::default();
    let mut controller = holding(&[Direction::Right]);
    let mut outbox = Outbox::default();

    controller.step(&player_at(0, 0), &world, &hazards, &mut outbox, CELL_SIZE);
    let walking = walking_player(0.3, 0.0, GridCell::new(1, 0));
    controller.step(&walking, &world, &hazards, &mut outbox, CELL_SIZE);
    assert_eq!(outbox.click_moves().count(), 1);

    let arriving = walking_player(0.7, 0.0, GridCell::new(1, 0));
    controller.step(&arriving, &world, &hazards, &mut outbox, CELL_SIZE);
    assert_eq!(
        outbox.click_moves().last(),
        Some(GridCell::new(2, 0).to_world(CELL_SIZE))
    );
}

#[test]
fn releasing_every_key_forgets_last_attempt() {
    let mut controller = holding(&[Direction::Left]);
    step(&mut controller, &[], (0, 0));
    assert!(controller.last_attempt().is_some());

    controller.release(Direction::Left);
    assert_eq!(controller.last_attempt(), None);
    assert!(step(&mut controller, &[], (0, 0)).sent.is_empty());
}
