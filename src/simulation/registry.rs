//! Parking space registry
//!
//! Owns the parking spaces and their occupancy. `try_take` is the only way a
//! space becomes held, so it must check and set in one step.

use std::collections::BTreeMap;

use super::types::{Position, SpaceId};

/// A single parking space
#[derive(Debug, Clone)]
pub struct ParkingSpace {
    pub id: SpaceId,
    pub center: Position,
    /// Point an agent drives towards when leaving
    pub exit: Position,
    /// Usable length; agents with a longer footprint do not fit
    pub length: f32,
    pub occupied: bool,
}

impl ParkingSpace {
    pub fn new(id: SpaceId, center: Position, exit: Position, length: f32) -> Self {
        Self {
            id,
            center,
            exit,
            length,
            occupied: false,
        }
    }
}

/// Transactional view over the set of parking spaces
pub trait ParkingSpaceRegistry {
    /// Occupied spaces over total spaces
    fn fill_rate(&self) -> f32;

    /// Claim `space` if it is free. Returns false if already taken or unknown.
    fn try_take(&mut self, space: SpaceId) -> bool;

    fn release(&mut self, space: SpaceId);

    fn total_spaces(&self) -> usize;

    fn occupied_spaces(&self) -> usize;

    /// Mark every space free
    fn reset(&mut self);

    fn space(&self, space: SpaceId) -> Option<&ParkingSpace>;

    fn space_ids(&self) -> Vec<SpaceId>;

    /// Move a space. Returns false for an unknown space. Whoever is parked
    /// there is not moved; the scheduler must be told separately.
    fn relocate(&mut self, space: SpaceId, center: Position, exit: Position) -> bool;

    fn is_taken(&self, space: SpaceId) -> bool {
        self.space(space).is_some_and(|s| s.occupied)
    }
}

/// In-memory registry used by the simulation and tests
#[derive(Debug, Default, Clone)]
pub struct SimParkingRegistry {
    spaces: BTreeMap<SpaceId, ParkingSpace>,
    occupied: usize,
}

impl SimParkingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a free space, replacing any space with the same id
    pub fn add_space(&mut self, space: ParkingSpace) {
        let mut space = space;
        space.occupied = false;
        if let Some(old) = self.spaces.insert(space.id, space) {
            if old.occupied {
                self.occupied -= 1;
            }
        }
    }
}

impl ParkingSpaceRegistry for SimParkingRegistry {
    fn fill_rate(&self) -> f32 {
        if self.spaces.is_empty() {
            return 0.0;
        }
        self.occupied as f32 / self.spaces.len() as f32
    }

    fn try_take(&mut self, space: SpaceId) -> bool {
        match self.spaces.get_mut(&space) {
            Some(s) if !s.occupied => {
                s.occupied = true;
                self.occupied += 1;
                true
            }
            _ => false,
        }
    }

    fn release(&mut self, space: SpaceId) {
        if let Some(s) = self.spaces.get_mut(&space) {
            if s.occupied {
                s.occupied = false;
                self.occupied -= 1;
            }
        }
    }

    fn total_spaces(&self) -> usize {
        self.spaces.len()
    }

    fn occupied_spaces(&self) -> usize {
        self.occupied
    }

    fn reset(&mut self) {
        for space in self.spaces.values_mut() {
            space.occupied = false;
        }
        self.occupied = 0;
    }

    fn space(&self, space: SpaceId) -> Option<&ParkingSpace> {
        self.spaces.get(&space)
    }

    fn space_ids(&self) -> Vec<SpaceId> {
        self.spaces.keys().copied().collect()
    }

    fn relocate(&mut self, space: SpaceId, center: Position, exit: Position) -> bool {
        match self.spaces.get_mut(&space) {
            Some(s) => {
                s.center = center;
                s.exit = exit;
                true
            }
            None => false,
        }
    }
}
