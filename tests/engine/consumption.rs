//! Integration tests for food and power-up consumption.

use std::time::Instant;

use slither_engine::{EnvironmentRepository, GameConfig};
use slither_foundation::{Direction, EntityId, EntityKind, Rgb};
use slither_world::{Entity, Food, SnakePart};

fn repo_with_chance(chance: f64) -> EnvironmentRepository {
    let config = GameConfig::default()
        .with_initial_grid_size(7)
        .with_power_up_spawn_chance(chance);
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

fn count_kind(repo: &EnvironmentRepository, kind: EntityKind) -> usize {
    repo.environment()
        .iter()
        .filter(|&id| {
            repo.environment()
                .entity(id)
                .is_ok_and(|entity| entity.kind() == kind)
        })
        .count()
}

// =============================================================================
// Growth
// =============================================================================

#[test]
fn eating_grows_the_chain_by_exactly_one() {
    let mut repo = repo_with_chance(0.0);
    let head = place_part(&mut repo, 2, 3);
    repo.steer(head, Direction::Right).unwrap();
    place_food(&mut repo, 3, 3);

    assert_eq!(repo.snake_length(), 1);
    repo.move_entity(head, Direction::Right, Instant::now())
        .unwrap();
    assert_eq!(repo.snake_length(), 2);

    // The new segment is linked behind the head and placed on the grid.
    let tail = repo.snake_part(head).unwrap().next.unwrap();
    assert_eq!(repo.snake_part(tail).unwrap().prev, Some(head));
    assert!(repo.location_of_entity(tail).is_some());
}

#[test]
fn food_count_is_conserved_at_exactly_one() {
    let mut repo = repo_with_chance(0.0);
    let head = place_part(&mut repo, 2, 3);
    repo.steer(head, Direction::Right).unwrap();
    let eaten = place_food(&mut repo, 3, 3);

    assert_eq!(count_kind(&repo, EntityKind::Food), 1);
    repo.move_entity(head, Direction::Right, Instant::now())
        .unwrap();

    // The old food is gone, a replacement exists, never zero, never two.
    assert!(!repo.environment().exists(eaten));
    assert_eq!(count_kind(&repo, EntityKind::Food), 1);
}

#[test]
fn a_move_without_food_does_not_grow() {
    let mut repo = repo_with_chance(0.0);
    let head = place_part(&mut repo, 2, 3);

    repo.move_entity(head, Direction::Down, Instant::now())
        .unwrap();
    assert_eq!(repo.snake_length(), 1);
    assert_eq!(count_kind(&repo, EntityKind::Food), 0);
}

// =============================================================================
// Power-Up Spawn Chance
// =============================================================================

#[test]
fn spawn_chance_below_threshold_spawns_exactly_one_power_up() {
    // With chance 1.0 every random draw is below the threshold.
    let mut repo = repo_with_chance(1.0);
    let head = place_part(&mut repo, 2, 3);
    repo.steer(head, Direction::Right).unwrap();
    place_food(&mut repo, 3, 3);

    repo.move_entity(head, Direction::Right, Instant::now())
        .unwrap();
    assert_eq!(count_kind(&repo, EntityKind::PowerUp), 1);
}

#[test]
fn spawn_chance_above_threshold_spawns_none() {
    // With chance 0.0 every random draw is at or above the threshold.
    let mut repo = repo_with_chance(0.0);
    let head = place_part(&mut repo, 2, 3);
    repo.steer(head, Direction::Right).unwrap();
    place_food(&mut repo, 3, 3);

    repo.move_entity(head, Direction::Right, Instant::now())
        .unwrap();
    assert_eq!(count_kind(&repo, EntityKind::PowerUp), 0);
}

#[test]
fn power_up_spawns_only_on_food_ticks() {
    let mut repo = repo_with_chance(1.0);
    let head = place_part(&mut repo, 2, 3);

    // No food consumed: no power-up, however generous the chance.
    repo.move_entity(head, Direction::Down, Instant::now())
        .unwrap();
    assert_eq!(count_kind(&repo, EntityKind::PowerUp), 0);
}
