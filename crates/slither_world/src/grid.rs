//! The dense rows-by-columns cell index.

// Allow u32 to usize and i64 casts - coordinates are small
#![allow(clippy::cast_possible_truncation)]

use rand::Rng;

use slither_foundation::{Direction, LocationId};

use crate::location::Location;

/// A fixed rows-by-columns table of [`Location`]s.
///
/// Every coordinate in `[0, columns) x [0, rows)` exists exactly once; no
/// cell is created or destroyed after construction. Level transitions
/// replace the whole grid. All navigation here is pure - grids never
/// mutate entity state.
#[derive(Clone, Debug)]
pub struct Grid {
    rows: u32,
    columns: u32,
    locations: Vec<Location>,
}

impl Grid {
    /// Creates a grid with the given dimensions, all cells empty.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    #[must_use]
    pub fn new(rows: u32, columns: u32) -> Self {
        assert!(rows > 0 && columns > 0, "grid dimensions must be nonzero");

        let mut locations = Vec::with_capacity((rows * columns) as usize);
        for y in 0..rows {
            for x in 0..columns {
                let id = LocationId(y * columns + x);
                locations.push(Location::new(id, x, y));
            }
        }

        Self {
            rows,
            columns,
            locations,
        }
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn columns(&self) -> u32 {
        self.columns
    }

    /// Returns the total number of cells.
    #[must_use]
    pub fn num_locations(&self) -> usize {
        self.locations.len()
    }

    /// Returns all cells in row-major order.
    #[must_use]
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    /// Returns the id of the cell at `(x, y)`, or `None` if the
    /// coordinate is out of range.
    #[must_use]
    pub fn location_at(&self, x: u32, y: u32) -> Option<LocationId> {
        if x < self.columns && y < self.rows {
            Some(LocationId(y * self.columns + x))
        } else {
            None
        }
    }

    /// Returns the cell with the given id, or `None` if the id does not
    /// address this grid.
    #[must_use]
    pub fn get(&self, id: LocationId) -> Option<&Location> {
        self.locations.get(id.index())
    }

    /// Returns the cell with the given id mutably.
    pub(crate) fn get_mut(&mut self, id: LocationId) -> Option<&mut Location> {
        self.locations.get_mut(id.index())
    }

    /// Returns the cell adjacent to `id` in the given direction, or
    /// `None` if the step would leave the grid. No wraparound.
    #[must_use]
    pub fn neighbor(&self, id: LocationId, direction: Direction) -> Option<LocationId> {
        let location = self.get(id)?;
        let (dx, dy) = direction.offset();
        let x = i64::from(location.x()) + i64::from(dx);
        let y = i64::from(location.y()) + i64::from(dy);
        if x < 0 || y < 0 {
            return None;
        }
        self.location_at(x as u32, y as u32)
    }

    /// Selects a cell uniformly at random among all cells.
    pub fn random_location<R: Rng + ?Sized>(&self, rng: &mut R) -> LocationId {
        LocationId(rng.gen_range(0..self.rows * self.columns))
    }

    /// Selects uniformly among the in-range neighbors of `id`.
    ///
    /// Returns `None` only if every direction leaves the grid, which
    /// cannot happen on grids of at least 2x2.
    pub fn random_neighbor<R: Rng + ?Sized>(
        &self,
        id: LocationId,
        rng: &mut R,
    ) -> Option<LocationId> {
        let neighbors: Vec<LocationId> = Direction::ALL
            .iter()
            .filter_map(|&direction| self.neighbor(id, direction))
            .collect();
        if neighbors.is_empty() {
            None
        } else {
            Some(neighbors[rng.gen_range(0..neighbors.len())])
        }
    }
}
