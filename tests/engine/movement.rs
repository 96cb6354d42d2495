//! Integration tests for movement and chain propagation.

use std::time::Instant;

use slither_engine::{EnvironmentRepository, GameConfig};
use slither_foundation::{Direction, EntityId, LocationId, Rgb};
use slither_world::{Entity, Food, SnakePart};

fn repo(size: u32) -> EnvironmentRepository {
    let config = GameConfig::default()
        .with_initial_grid_size(size)
        .with_power_up_spawn_chance(0.0);
    EnvironmentRepository::new(1, config, 42)
}

fn place_part(repo: &mut EnvironmentRepository, x: u32, y: u32) -> EntityId {
    let cell = repo.environment().grid().location_at(x, y).unwrap();
    repo.add_entity_to_location(
        Entity::SnakePart(SnakePart::new(Rgb::new(0, 200, 0))),
        cell,
    )
    .unwrap()
}

fn place_food(repo: &mut EnvironmentRepository, x: u32, y: u32) -> EntityId {
    let cell = repo.environment().grid().location_at(x, y).unwrap();
    repo.add_entity_to_location(Entity::Food(Food::new(Rgb::new(99, 99, 99))), cell)
        .unwrap()
}

/// Positions of the chain in head-to-tail order, following the links.
fn chain_positions(repo: &EnvironmentRepository, head: EntityId) -> Vec<(EntityId, LocationId)> {
    let mut positions = Vec::new();
    let mut current = Some(head);
    while let Some(id) = current {
        positions.push((id, repo.location_of_entity(id).unwrap()));
        current = repo.snake_part(id).unwrap().next;
    }
    positions
}

// =============================================================================
// Border Semantics
// =============================================================================

#[test]
fn border_move_leaves_head_and_chain_untouched() {
    let mut repo = repo(9);
    let head = place_part(&mut repo, 2, 4);
    repo.steer(head, Direction::Left).unwrap();
    place_food(&mut repo, 1, 4);

    // Eat once so there is a chain to preserve, then run into the wall.
    repo.move_entity(head, Direction::Left, Instant::now())
        .unwrap();
    repo.move_entity(head, Direction::Left, Instant::now())
        .unwrap();
    assert_eq!(
        repo.location_of_entity(head),
        repo.environment().grid().location_at(0, 4)
    );

    let before = chain_positions(&repo, head);
    let due = repo
        .move_entity(head, Direction::Left, Instant::now())
        .unwrap();

    assert!(!due);
    assert!(!repo.collision());
    assert_eq!(chain_positions(&repo, head), before);
}

// =============================================================================
// Chain Propagation
// =============================================================================

#[test]
fn chain_follows_the_heads_path_with_no_gaps_or_overlaps() {
    let mut repo = repo(9);
    let head = place_part(&mut repo, 1, 4);
    repo.steer(head, Direction::Right).unwrap();
    place_food(&mut repo, 2, 4);

    // Grow to two segments; the head's forward cell is excluded from
    // tail placement, so the path to the right stays clear.
    repo.move_entity(head, Direction::Right, Instant::now())
        .unwrap();
    assert_eq!(repo.snake_length(), 2);

    // An L-shaped walk. Before each step remember where every segment
    // stood; afterwards each segment must stand exactly where its
    // leader stood, with no two segments sharing a cell.
    let walk = [
        (Direction::Right, 5),
        (Direction::Down, 3),
        (Direction::Left, 5),
        (Direction::Up, 2),
    ];
    for (direction, steps) in walk {
        for _ in 0..steps {
            let before = chain_positions(&repo, head);
            let expected_head = repo.location_toward(head, direction).unwrap();

            repo.move_entity(head, direction, Instant::now()).unwrap();

            let after = chain_positions(&repo, head);
            assert_eq!(after[0].1, expected_head);
            for i in 1..before.len() {
                assert_eq!(
                    after[i].1, before[i - 1].1,
                    "segment {i} must inherit its leader's cell"
                );
            }

            let mut seen: Vec<LocationId> =
                before.iter().map(|&(id, _)| after_position(&after, id)).collect();
            seen.sort_unstable();
            seen.dedup();
            assert_eq!(seen.len(), before.len(), "no two settled segments overlap");

            assert!(!repo.collision());
        }
    }
}

fn after_position(after: &[(EntityId, LocationId)], id: EntityId) -> LocationId {
    after
        .iter()
        .find(|&&(part, _)| part == id)
        .map(|&(_, position)| position)
        .unwrap()
}

#[test]
fn each_segment_remembers_its_previous_cell() {
    let mut repo = repo(9);
    let head = place_part(&mut repo, 4, 4);
    let origin = repo.location_of_entity(head).unwrap();

    repo.move_entity(head, Direction::Down, Instant::now())
        .unwrap();
    assert_eq!(repo.snake_part(head).unwrap().last_position, Some(origin));

    let second = repo.location_of_entity(head).unwrap();
    repo.move_entity(head, Direction::Right, Instant::now())
        .unwrap();
    assert_eq!(repo.snake_part(head).unwrap().last_position, Some(second));
}

// =============================================================================
// Collision
// =============================================================================

#[test]
fn moving_into_a_body_segment_collides_and_signals_restart() {
    let mut repo = repo(9);
    let head = place_part(&mut repo, 1, 4);
    repo.steer(head, Direction::Right).unwrap();
    place_food(&mut repo, 2, 4);

    // Grow to two, then walk right until the body sits directly behind
    // the head.
    repo.move_entity(head, Direction::Right, Instant::now())
        .unwrap();
    repo.move_entity(head, Direction::Right, Instant::now())
        .unwrap();
    repo.move_entity(head, Direction::Right, Instant::now())
        .unwrap();

    let body_cell = repo.location_toward(head, Direction::Left).unwrap();
    let occupied_by_part = repo
        .environment()
        .entities_at(body_cell)
        .iter()
        .any(|&id| repo.snake_part(id).is_ok());
    assert!(occupied_by_part);

    // Reversing straight into the neck is a collision.
    let due = repo
        .move_entity(head, Direction::Left, Instant::now())
        .unwrap();

    assert!(repo.collision());
    assert!(due, "restart policy flags the level for reinitialization");
}
