//! The environment: entity arena, placement, and the reverse index.
//!
//! All entity mutation goes through [`Environment`]. It keeps three
//! structures mutually consistent: the arena slot for each entity, the
//! membership list of each [`Location`](crate::Location), and the reverse
//! index from entity id to the id of the cell holding it.

// Allow u32 to usize casts - arena indices are small
#![allow(clippy::cast_possible_truncation)]

use std::collections::HashMap;

use tracing::warn;

use slither_foundation::{EntityId, Error, LocationId, Result};

use crate::entity::Entity;
use crate::grid::Grid;

/// One arena slot. Even generations are free, odd generations are alive.
#[derive(Clone, Debug)]
struct Slot {
    generation: u32,
    entity: Option<Entity>,
}

/// Owns one [`Grid`] plus every entity placed on it.
///
/// Entities live in a generational arena: handles to removed entities go
/// stale instead of dangling. The reverse index makes "where is this
/// entity" an O(1) query without scanning the grid.
#[derive(Clone, Debug)]
pub struct Environment {
    grid: Grid,
    slots: Vec<Slot>,
    free_list: Vec<u32>,
    placements: HashMap<EntityId, LocationId>,
    live_count: usize,
}

impl Environment {
    /// Creates an environment around the given grid, with no entities.
    #[must_use]
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            slots: Vec::new(),
            free_list: Vec::new(),
            placements: HashMap::new(),
            live_count: 0,
        }
    }

    /// Returns the grid.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Returns the number of rows in the grid.
    #[must_use]
    pub fn rows(&self) -> u32 {
        self.grid.rows()
    }

    /// Returns the number of columns in the grid.
    #[must_use]
    pub fn columns(&self) -> u32 {
        self.grid.columns()
    }

    /// Returns the total number of grid cells.
    #[must_use]
    pub fn num_locations(&self) -> usize {
        self.grid.num_locations()
    }

    // --- Arena ---

    /// Adds an entity to the arena, unplaced. Returns its handle.
    ///
    /// Reuses free slots when available.
    pub fn insert(&mut self, entity: Entity) -> EntityId {
        self.live_count += 1;

        if let Some(index) = self.free_list.pop() {
            let slot = &mut self.slots[index as usize];
            // Increment generation (was even/free, now odd/alive)
            slot.generation += 1;
            slot.entity = Some(entity);
            EntityId::new(index, slot.generation)
        } else {
            let index = self.slots.len() as u32;
            // New entities start at generation 1 (odd = alive)
            self.slots.push(Slot {
                generation: 1,
                entity: Some(entity),
            });
            EntityId::new(index, 1)
        }
    }

    /// Returns true if the handle refers to a live entity.
    #[must_use]
    pub fn exists(&self, id: EntityId) -> bool {
        match self.slots.get(id.index as usize) {
            Some(slot) => slot.generation == id.generation && id.generation % 2 == 1,
            None => false,
        }
    }

    /// Validates that a handle is live.
    ///
    /// # Errors
    ///
    /// Returns `EntityNotFound` for never-allocated or freed slots and
    /// `StaleEntity` when the generation does not match.
    pub fn validate(&self, id: EntityId) -> Result<()> {
        let Some(slot) = self.slots.get(id.index as usize) else {
            return Err(Error::entity_not_found(id));
        };
        if slot.generation != id.generation {
            return Err(Error::stale_entity(id));
        }
        if slot.generation % 2 == 0 {
            return Err(Error::entity_not_found(id));
        }
        Ok(())
    }

    /// Returns the entity behind a handle.
    ///
    /// # Errors
    ///
    /// Fails for stale or never-allocated handles.
    pub fn entity(&self, id: EntityId) -> Result<&Entity> {
        self.validate(id)?;
        Ok(self.slots[id.index as usize]
            .entity
            .as_ref()
            .expect("live slot holds an entity"))
    }

    /// Returns the entity behind a handle, mutably.
    ///
    /// # Errors
    ///
    /// Fails for stale or never-allocated handles.
    pub fn entity_mut(&mut self, id: EntityId) -> Result<&mut Entity> {
        self.validate(id)?;
        Ok(self.slots[id.index as usize]
            .entity
            .as_mut()
            .expect("live slot holds an entity"))
    }

    /// Returns the number of live entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.live_count
    }

    /// Returns true if there are no live entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live_count == 0
    }

    /// Iterates over all live entity handles.
    pub fn iter(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.generation % 2 == 1)
            .map(|(index, slot)| EntityId::new(index as u32, slot.generation))
    }

    // --- Placement ---

    /// Places a live entity on a cell.
    ///
    /// # Errors
    ///
    /// Fails with `AlreadyPlaced` if the entity is on the grid (callers
    /// must displace first), `LocationNotFound` if the cell id does not
    /// address this grid, or a handle error if the entity is not live.
    pub fn place(&mut self, id: EntityId, location: LocationId) -> Result<()> {
        self.validate(id)?;
        if let Some(&occupied) = self.placements.get(&id) {
            return Err(Error::already_placed(id, occupied));
        }
        let Some(cell) = self.grid.get_mut(location) else {
            return Err(Error::location_not_found(location));
        };
        cell.add(id);
        self.placements.insert(id, location);
        Ok(())
    }

    /// Takes a live entity off the grid, keeping it in the arena.
    ///
    /// Unplaced entities are left alone with a diagnostic; that is a
    /// recoverable logic-warning, not an error.
    ///
    /// # Errors
    ///
    /// Fails only for stale or never-allocated handles.
    pub fn displace(&mut self, id: EntityId) -> Result<()> {
        self.validate(id)?;
        match self.placements.remove(&id) {
            Some(location) => {
                let cell = self
                    .grid
                    .get_mut(location)
                    .expect("reverse index points at a grid cell");
                let removed = cell.remove(id);
                debug_assert!(removed, "membership and reverse index agree");
                Ok(())
            }
            None => {
                warn!(entity = %id, "displace of an unplaced entity");
                Ok(())
            }
        }
    }

    /// Removes an entity from play: off the grid and out of the arena.
    ///
    /// Safe to call with a handle that is no longer live; that case is
    /// logged and ignored.
    pub fn remove(&mut self, id: EntityId) {
        if self.validate(id).is_err() {
            warn!(entity = %id, "remove of an entity that is not present");
            return;
        }
        if let Some(location) = self.placements.remove(&id) {
            let cell = self
                .grid
                .get_mut(location)
                .expect("reverse index points at a grid cell");
            cell.remove(id);
        }
        let slot = &mut self.slots[id.index as usize];
        // Increment generation (was odd/alive, now even/free)
        slot.generation += 1;
        slot.entity = None;
        self.free_list.push(id.index);
        self.live_count -= 1;
    }

    /// Removes an entity from play and hands its value back.
    ///
    /// Like [`remove`](Self::remove), but for callers that keep the
    /// entity alive outside the grid (collected power-ups).
    ///
    /// # Errors
    ///
    /// Fails for stale or never-allocated handles.
    pub fn take(&mut self, id: EntityId) -> Result<Entity> {
        self.validate(id)?;
        if let Some(location) = self.placements.remove(&id) {
            let cell = self
                .grid
                .get_mut(location)
                .expect("reverse index points at a grid cell");
            cell.remove(id);
        }
        let slot = &mut self.slots[id.index as usize];
        slot.generation += 1;
        let entity = slot.entity.take().expect("live slot holds an entity");
        self.free_list.push(id.index);
        self.live_count -= 1;
        Ok(entity)
    }

    /// Returns the cell currently holding an entity, or `None` if the
    /// entity is unplaced or not live.
    #[must_use]
    pub fn location_of(&self, id: EntityId) -> Option<LocationId> {
        self.placements.get(&id).copied()
    }

    /// Returns the entities standing on a cell, oldest first.
    #[must_use]
    pub fn entities_at(&self, location: LocationId) -> &[EntityId] {
        self.grid
            .get(location)
            .map_or(&[], |cell| cell.entities())
    }

    /// Removes every entity from the grid and the arena, leaving the grid
    /// itself intact.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            if slot.generation % 2 == 1 {
                slot.generation += 1;
                slot.entity = None;
            }
        }
        self.free_list = (0..self.slots.len() as u32).rev().collect();
        self.placements.clear();
        self.live_count = 0;
        for location in 0..self.grid.num_locations() {
            if let Some(cell) = self.grid.get_mut(LocationId(location as u32)) {
                cell.clear();
            }
        }
    }
}
