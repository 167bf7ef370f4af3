//! Spawn point lookup inside parking areas

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;

use super::registry::ParkingSpaceRegistry;
use super::types::{Footprint, Position, SpaceId};

/// Where to place a freshly activated agent
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnPoint {
    pub position: Position,
    pub look_at: Position,
    /// The space this point belongs to, if it lies in a parking area
    pub space: Option<SpaceId>,
}

impl SpawnPoint {
    /// Spawn point at the centre of a space, facing its exit
    pub fn in_space(space: SpaceId, center: Position, exit: Position) -> Self {
        Self {
            position: center,
            look_at: exit,
            space: Some(space),
        }
    }
}

pub trait SpawnPointProvider {
    /// A collision-free spawn point for an agent of the given footprint, or
    /// `None` when every candidate point is obstructed
    fn valid_spawn_point(
        &mut self,
        footprint: &Footprint,
        exclude_roads: bool,
        registry: &dyn ParkingSpaceRegistry,
    ) -> Option<SpawnPoint>;
}

/// Spawn provider whose spawn area is the set of parking spaces.
///
/// A space counts as obstructed while the registry reports it occupied, and
/// is never offered to an agent longer than the space.
#[derive(Default)]
pub struct ParkingSpawnPoints {
    rng: Option<StdRng>,
}

impl ParkingSpawnPoints {
    pub fn new() -> Self {
        Self { rng: None }
    }

    pub fn new_with_seed(seed: u64) -> Self {
        Self {
            rng: Some(StdRng::seed_from_u64(seed)),
        }
    }

    fn choose_random<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        match &mut self.rng {
            Some(rng) => slice.choose(rng),
            None => slice.choose(&mut rand::rng()),
        }
    }
}

impl SpawnPointProvider for ParkingSpawnPoints {
    fn valid_spawn_point(
        &mut self,
        footprint: &Footprint,
        _exclude_roads: bool,
        registry: &dyn ParkingSpaceRegistry,
    ) -> Option<SpawnPoint> {
        // Parking areas never contain road points, so excluding roads is a no-op
        let free: Vec<SpaceId> = registry
            .space_ids()
            .into_iter()
            .filter(|id| !registry.is_taken(*id))
            .filter(|id| {
                registry
                    .space(*id)
                    .is_some_and(|s| footprint.length <= s.length)
            })
            .collect();

        let id = *self.choose_random(&free)?;
        let space = registry.space(id)?;
        Some(SpawnPoint::in_space(id, space.center, space.exit))
    }
}
