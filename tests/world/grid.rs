//! Integration tests for grid geometry and navigation.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use slither_foundation::Direction;
use slither_world::Grid;

// =============================================================================
// Border Invariant
// =============================================================================

#[test]
fn every_edge_cell_rejects_its_outward_direction() {
    let grid = Grid::new(6, 8);

    for location in grid.locations() {
        let id = location.id();
        if location.y() == 0 {
            assert!(grid.neighbor(id, Direction::Up).is_none());
        }
        if location.y() == grid.rows() - 1 {
            assert!(grid.neighbor(id, Direction::Down).is_none());
        }
        if location.x() == 0 {
            assert!(grid.neighbor(id, Direction::Left).is_none());
        }
        if location.x() == grid.columns() - 1 {
            assert!(grid.neighbor(id, Direction::Right).is_none());
        }
    }
}

#[test]
fn interior_cells_have_four_neighbors() {
    let grid = Grid::new(5, 5);

    for location in grid.locations() {
        let interior = location.x() > 0
            && location.x() < grid.columns() - 1
            && location.y() > 0
            && location.y() < grid.rows() - 1;
        if interior {
            for direction in Direction::ALL {
                assert!(grid.neighbor(location.id(), direction).is_some());
            }
        }
    }
}

// =============================================================================
// Random Selection
// =============================================================================

#[test]
fn random_location_covers_the_whole_grid_eventually() {
    let grid = Grid::new(3, 3);
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    let mut seen = std::collections::HashSet::new();
    for _ in 0..500 {
        seen.insert(grid.random_location(&mut rng));
    }
    assert_eq!(seen.len(), grid.num_locations());
}

#[test]
fn random_neighbor_never_leaves_the_grid() {
    let grid = Grid::new(2, 2);
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    for location in grid.locations() {
        for _ in 0..50 {
            let neighbor = grid.random_neighbor(location.id(), &mut rng).unwrap();
            assert!(grid.get(neighbor).is_some());
            assert_ne!(neighbor, location.id());
        }
    }
}

// =============================================================================
// Properties
// =============================================================================

mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn neighbor_count_matches_cell_position(
            rows in 2u32..16,
            columns in 2u32..16
        ) {
            let grid = Grid::new(rows, columns);
            for location in grid.locations() {
                let neighbors = Direction::ALL
                    .iter()
                    .filter(|&&direction| grid.neighbor(location.id(), direction).is_some())
                    .count();

                let on_x_edge = location.x() == 0 || location.x() == columns - 1;
                let on_y_edge = location.y() == 0 || location.y() == rows - 1;
                let expected = match (on_x_edge, on_y_edge) {
                    (true, true) => 2,
                    (true, false) | (false, true) => 3,
                    (false, false) => 4,
                };
                prop_assert_eq!(neighbors, expected);
            }
        }
    }
}
