//! Level transitions, reinitialization, and saved state.

use std::sync::{Arc, Mutex};
use std::time::Instant;

use slither_engine::{
    grid_size_for, Difficulty, EnvironmentRepository, GameConfig,
};
use slither_foundation::{Direction, Rgb};
use slither_runtime::{GameSession, SavedState, StateStore};
use slither_world::{Entity, SnakePart};

// =============================================================================
// Reinitialization
// =============================================================================

#[test]
fn reinitialize_resets_cleanly() {
    let config = GameConfig::default().with_power_up_spawn_chance(0.0);
    let mut repo = EnvironmentRepository::new(1, config.clone(), 42);
    repo.spawn_snake_head().unwrap();
    repo.spawn_food().unwrap();
    repo.spawn_power_up().unwrap();

    repo.reinitialize(3);

    let size = grid_size_for(3, &config);
    assert_eq!(repo.num_locations(), (size * size) as usize);
    assert_eq!(repo.snake_length(), 0);
    assert!(repo.environment().is_empty(), "no entity survives the reset");
    assert!(repo.active_power_ups().is_empty());
    assert!(!repo.collision());
    assert!(repo.running());
}

#[test]
fn grid_size_tracks_level_and_difficulty() {
    let normal = GameConfig::default();
    let easy = GameConfig::default().with_difficulty(Difficulty::Easy);
    let hard = GameConfig::default().with_difficulty(Difficulty::Hard);

    let mut repo = EnvironmentRepository::new(1, normal.clone(), 42);
    assert_eq!(repo.rows(), grid_size_for(1, &normal));
    repo.reinitialize(4);
    assert_eq!(repo.rows(), grid_size_for(4, &normal));

    // Easy grows the grid, Hard shrinks it, on every level.
    assert!(grid_size_for(2, &easy) > grid_size_for(2, &normal));
    assert!(grid_size_for(2, &hard) < grid_size_for(2, &normal));
}

// =============================================================================
// Session Transitions
// =============================================================================

#[derive(Debug, Default, Clone)]
struct RecordingStore {
    saves: Arc<Mutex<Vec<SavedState>>>,
}

impl StateStore for RecordingStore {
    fn load(&self) -> SavedState {
        SavedState::default()
    }

    fn save(&mut self, state: &SavedState) {
        self.saves.lock().unwrap().push(state.clone());
    }
}

#[test]
fn restart_rebuilds_the_level_and_saves_state() {
    let store = RecordingStore::default();
    let saves = Arc::clone(&store.saves);
    let config = GameConfig::default().with_power_up_spawn_chance(0.0);
    let mut session = GameSession::with_state_store(config, 42, Box::new(store)).unwrap();

    session.advance(Instant::now()).unwrap();
    session.restart().unwrap();

    assert_eq!(session.level(), 1);
    assert_eq!(session.snake_length(), 1);
    assert_eq!(session.current_score(), 0);

    let recorded = saves.lock().unwrap();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].level, 1);
    assert_eq!(recorded[0].current_score, 0);
}

#[test]
fn collision_under_restart_policy_rebuilds_the_level() {
    let config = GameConfig::default().with_power_up_spawn_chance(0.0);
    let mut repo = EnvironmentRepository::new(1, config, 42);

    let cell = repo.environment().grid().location_at(2, 2).unwrap();
    let head = repo
        .add_entity_to_location(Entity::SnakePart(SnakePart::new(Rgb::new(0, 200, 0))), cell)
        .unwrap();
    let blocker = repo.environment().grid().location_at(3, 2).unwrap();
    repo.add_entity_to_location(
        Entity::SnakePart(SnakePart::new(Rgb::new(0, 200, 0))),
        blocker,
    )
    .unwrap();

    let due = repo
        .move_entity(head, Direction::Right, Instant::now())
        .unwrap();
    assert!(due, "restart policy flags the level for reinitialization");
    assert!(repo.collision());

    // The caller reacts by reinitializing; afterwards the board is
    // fresh and the collision flag is gone.
    repo.reinitialize(repo.level());
    assert!(!repo.collision());
    assert!(repo.environment().is_empty());
}
