// src/spawner/tracker.rs
//! Per-spawner book-keeping of live instances.

use bevy::prelude::*;

/// Handles of instances a spawner has created and not yet seen die.
///
/// Entries are only ever removed by [`Population::sweep_and_count`]; nothing
/// else mutates the list, so the count it returns is exact for the frame it
/// ran in.
#[derive(Component, Default, Debug)]
pub struct Population {
    alive: Vec<Entity>,
}

impl Population {
    /// Record a freshly spawned instance.
    pub fn register(&mut self, entity: Entity) {
        self.alive.push(entity);
    }

    /// Drop every entry `is_alive` rejects and return how many remain.
    pub fn sweep_and_count(&mut self, is_alive: impl Fn(Entity) -> bool) -> usize {
        self.alive.retain(|&e| is_alive(e));
        self.alive.len()
    }

    pub fn len(&self) -> usize {
        self.alive.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alive.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Entity> + '_ {
        self.alive.iter().copied()
    }
}
