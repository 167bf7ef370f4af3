//! Fixed-capacity agent pool
//!
//! Agents are created once and only ever activated or deactivated.

use super::agent::{Agent, ParkingPhase};
use super::types::{AgentId, Footprint, SpaceId};

/// Produces at most `len` indices starting at `start`, wrapping at `len`
#[derive(Debug, Clone)]
pub struct CircularScan {
    next: usize,
    len: usize,
    remaining: usize,
}

impl CircularScan {
    pub fn new(start: usize, len: usize) -> Self {
        Self {
            next: if len == 0 { 0 } else { start % len },
            len,
            remaining: len,
        }
    }
}

impl Iterator for CircularScan {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let index = self.next;
        self.next = (self.next + 1) % self.len;
        Some(index)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for CircularScan {}

#[derive(Debug, Default)]
pub struct AgentPool {
    agents: Vec<Agent>,
}

impl AgentPool {
    /// A pool of `capacity` agents sharing one footprint
    pub fn uniform(capacity: usize, footprint: Footprint) -> Self {
        Self::with_footprints(std::iter::repeat_n(footprint, capacity))
    }

    pub fn with_footprints(footprints: impl IntoIterator<Item = Footprint>) -> Self {
        let agents = footprints
            .into_iter()
            .enumerate()
            .map(|(i, footprint)| Agent::new(AgentId(i), footprint))
            .collect();
        Self { agents }
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn find_agent_at(&self, index: usize) -> Option<&Agent> {
        self.agents.get(index)
    }

    pub fn get(&self, id: AgentId) -> Option<&Agent> {
        self.agents.get(id.0)
    }

    pub fn get_mut(&mut self, id: AgentId) -> Option<&mut Agent> {
        self.agents.get_mut(id.0)
    }

    pub fn count_active(&self) -> usize {
        self.agents.iter().filter(|a| a.active).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Agent> {
        self.agents.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Agent> {
        self.agents.iter_mut()
    }

    pub fn active(&self) -> impl Iterator<Item = &Agent> {
        self.agents.iter().filter(|a| a.active)
    }

    /// Every pool index once, starting at `start`
    pub fn scan_from(&self, start: usize) -> CircularScan {
        CircularScan::new(start, self.agents.len())
    }

    /// The active agent parked in `space`, if any
    pub fn agent_parked_in(&self, space: SpaceId) -> Option<AgentId> {
        self.active()
            .find(|a| a.phase() == ParkingPhase::Parked && a.behaviour.current_space() == Some(space))
            .map(|a| a.id)
    }

    /// The active agent currently heading into `space`, if any
    pub fn agent_parking_towards(&self, space: SpaceId) -> Option<AgentId> {
        self.active()
            .find(|a| a.phase() == ParkingPhase::Parking && a.behaviour.current_space() == Some(space))
            .map(|a| a.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circular_scan_wraps_once() {
        let indices: Vec<usize> = CircularScan::new(3, 5).collect();
        assert_eq!(indices, vec![3, 4, 0, 1, 2]);
    }

    #[test]
    fn test_circular_scan_start_out_of_range() {
        let indices: Vec<usize> = CircularScan::new(7, 5).collect();
        assert_eq!(indices, vec![2, 3, 4, 0, 1]);
    }

    #[test]
    fn test_circular_scan_empty_pool() {
        assert_eq!(CircularScan::new(0, 0).count(), 0);
    }

    #[test]
    fn test_pool_starts_inactive() {
        let pool = AgentPool::uniform(4, Footprint::default());
        assert_eq!(pool.len(), 4);
        assert_eq!(pool.count_active(), 0);
        assert_eq!(pool.find_agent_at(2).map(|a| a.id), Some(AgentId(2)));
        assert!(pool.find_agent_at(4).is_none());
    }
}
