//! Pooled agents and their parking state machine
//!
//! Each agent carries a [`ParkingBehaviour`]: a tagged state holding the data
//! that is only meaningful in that state (target space, parked-since time,
//! lane progress) plus the `wait` flag that suspends automatic eviction.

use log::{trace, warn};
use ordered_float::OrderedFloat;

use super::config::ParkingConfig;
use super::lane_map::LaneMap;
use super::registry::ParkingSpaceRegistry;
use super::types::{AgentId, Footprint, LaneId, Position, SpaceId, Transform, TripId};

/// Coarse state tag, for comparisons and reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParkingPhase {
    Driving,
    Parking,
    Parked,
    Leaving,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParkingState {
    /// Following a lane, or idle in the pool when `lane` is `None`
    Driving { lane: Option<LaneId>, waypoint: usize },
    /// Space claimed, heading towards it
    Parking { space: SpaceId },
    Parked { space: SpaceId, since: f32 },
    /// Heading for the exit; the registry still holds `releasing` until the
    /// exit is reached
    Leaving { releasing: SpaceId },
}

impl Default for ParkingState {
    fn default() -> Self {
        ParkingState::Driving {
            lane: None,
            waypoint: 0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ParkingBehaviour {
    state: ParkingState,
    /// Suspends automatic despawn and non-forced leaving
    pub wait: bool,
    pub able_to_park: bool,
}

impl Default for ParkingBehaviour {
    fn default() -> Self {
        Self {
            state: ParkingState::default(),
            wait: false,
            able_to_park: true,
        }
    }
}

impl ParkingBehaviour {
    pub fn state(&self) -> &ParkingState {
        &self.state
    }

    pub fn phase(&self) -> ParkingPhase {
        match self.state {
            ParkingState::Driving { .. } => ParkingPhase::Driving,
            ParkingState::Parking { .. } => ParkingPhase::Parking,
            ParkingState::Parked { .. } => ParkingPhase::Parked,
            ParkingState::Leaving { .. } => ParkingPhase::Leaving,
        }
    }

    /// The space this agent is associated with; only while parking or parked
    pub fn current_space(&self) -> Option<SpaceId> {
        match self.state {
            ParkingState::Parking { space } | ParkingState::Parked { space, .. } => Some(space),
            _ => None,
        }
    }

    pub fn current_lane(&self) -> Option<LaneId> {
        match self.state {
            ParkingState::Driving { lane, .. } => lane,
            _ => None,
        }
    }

    /// Enter `Parking` towards a space the caller has already claimed
    pub fn switch_to_parking(&mut self, space: SpaceId) -> bool {
        if !matches!(self.state, ParkingState::Driving { .. }) {
            return false;
        }
        self.state = ParkingState::Parking { space };
        true
    }

    /// Claim `space` in the registry and head towards it
    pub fn init_parking(&mut self, space: SpaceId, registry: &mut dyn ParkingSpaceRegistry) -> bool {
        if !self.able_to_park || !matches!(self.state, ParkingState::Driving { .. }) {
            return false;
        }
        if !registry.try_take(space) {
            return false;
        }
        self.state = ParkingState::Parking { space };
        true
    }

    fn arrive(&mut self, now: f32) -> bool {
        match self.state {
            ParkingState::Parking { space } => {
                self.state = ParkingState::Parked { space, since: now };
                true
            }
            _ => false,
        }
    }

    /// Ask a parked agent to leave. Non-forced requests are refused while
    /// waiting or before the minimum parked duration has passed.
    pub fn try_init_leaving(&mut self, now: f32, min_parked_duration: f32, force: bool) -> bool {
        let ParkingState::Parked { space, since } = self.state else {
            return false;
        };
        if !force && (self.wait || now - since < min_parked_duration) {
            return false;
        }
        self.state = ParkingState::Leaving { releasing: space };
        true
    }

    fn finish_leaving(
        &mut self,
        registry: &mut dyn ParkingSpaceRegistry,
        lane: Option<LaneId>,
        waypoint: usize,
    ) -> bool {
        let ParkingState::Leaving { releasing } = self.state else {
            return false;
        };
        registry.release(releasing);
        self.state = ParkingState::Driving { lane, waypoint };
        true
    }

    /// Drop whatever space is held and fall back to idle driving state
    pub fn vacate(&mut self, registry: &mut dyn ParkingSpaceRegistry) -> Option<SpaceId> {
        let released = match self.state {
            ParkingState::Parking { space }
            | ParkingState::Parked { space, .. }
            | ParkingState::Leaving { releasing: space } => Some(space),
            ParkingState::Driving { .. } => None,
        };
        if let Some(space) = released {
            registry.release(space);
        }
        self.state = ParkingState::default();
        released
    }

    /// Put an idle agent on a lane
    pub fn join_lane(&mut self, lane: LaneId, waypoint: usize) {
        self.state = ParkingState::Driving {
            lane: Some(lane),
            waypoint,
        };
    }
}

/// Result of an agent update indicating what the scheduler should do next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentUpdate {
    Continue,
    /// Reached its space and is now parked
    Arrived(SpaceId),
    /// Released its space and rejoined traffic
    LeftSpace(SpaceId),
    /// Ran out of lane; return to the pool
    EndOfLane,
}

/// A pooled vehicle agent
#[derive(Debug, Clone)]
pub struct Agent {
    pub id: AgentId,
    pub trip: TripId,
    pub transform: Transform,
    pub footprint: Footprint,
    /// On scene
    pub active: bool,
    /// Update logic runs
    pub enabled: bool,
    pub physics_enabled: bool,
    /// Whether this agent is included in the traffic (non-parked) counter
    pub counted_in_traffic: bool,
    pub behaviour: ParkingBehaviour,
}

impl Agent {
    pub fn new(id: AgentId, footprint: Footprint) -> Self {
        Self {
            id,
            trip: TripId::default(),
            transform: Transform::default(),
            footprint,
            active: false,
            enabled: false,
            physics_enabled: true,
            counted_in_traffic: false,
            behaviour: ParkingBehaviour::default(),
        }
    }

    pub fn phase(&self) -> ParkingPhase {
        self.behaviour.phase()
    }

    pub fn position(&self) -> Position {
        self.transform.position
    }

    /// Move towards `target`; returns true once within tolerance
    fn drive_towards(&mut self, target: &Position, step: f32, tolerance: f32) -> bool {
        self.transform.look_at(target);
        self.transform.position = self.transform.position.step_towards(target, step);
        self.transform.position.distance(target) <= tolerance
    }

    /// Advance movement by one tick
    pub fn update(
        &mut self,
        delta_secs: f32,
        now: f32,
        config: &ParkingConfig,
        registry: &mut dyn ParkingSpaceRegistry,
        lanes: &dyn LaneMap,
    ) -> AgentUpdate {
        let step = config.agent_speed * delta_secs;

        match self.behaviour.state.clone() {
            ParkingState::Parked { .. } => AgentUpdate::Continue,
            ParkingState::Parking { space } => {
                let Some((center, exit)) = registry.space(space).map(|s| (s.center, s.exit)) else {
                    warn!("{} is parking towards unknown {}", self.id, space);
                    return AgentUpdate::Continue;
                };
                if !self.drive_towards(&center, step, config.arrival_tolerance) {
                    return AgentUpdate::Continue;
                }
                self.transform = Transform::looking_at(center, &exit);
                self.behaviour.arrive(now);
                trace!("{} parked in {}", self.id, space);
                AgentUpdate::Arrived(space)
            }
            ParkingState::Leaving { releasing } => {
                let Some(exit) = registry.space(releasing).map(|s| s.exit) else {
                    warn!("{} is leaving unknown {}", self.id, releasing);
                    self.behaviour.finish_leaving(registry, None, 0);
                    return AgentUpdate::LeftSpace(releasing);
                };
                if !self.drive_towards(&exit, step, config.arrival_tolerance) {
                    return AgentUpdate::Continue;
                }
                let lane = lanes.closest_lane(&exit);
                let waypoint = lane
                    .and_then(|l| lanes.lane_positions(l))
                    .map(|samples| next_waypoint(samples, &exit))
                    .unwrap_or(0);
                self.behaviour.finish_leaving(registry, lane, waypoint);
                trace!("{} left {}", self.id, releasing);
                AgentUpdate::LeftSpace(releasing)
            }
            ParkingState::Driving { lane, waypoint } => {
                let Some(samples) = lane.and_then(|l| lanes.lane_positions(l)) else {
                    return AgentUpdate::EndOfLane;
                };
                let Some(target) = samples.get(waypoint).copied() else {
                    return AgentUpdate::EndOfLane;
                };
                if self.drive_towards(&target, step, config.arrival_tolerance) {
                    let waypoint = waypoint + 1;
                    if waypoint >= samples.len() {
                        return AgentUpdate::EndOfLane;
                    }
                    self.behaviour.state = ParkingState::Driving { lane, waypoint };
                }
                AgentUpdate::Continue
            }
        }
    }
}

/// Index of the first sample after the one closest to `point`
fn next_waypoint(samples: &[Position], point: &Position) -> usize {
    let closest = samples
        .iter()
        .enumerate()
        .min_by_key(|(_, p)| OrderedFloat(p.distance(point)))
        .map(|(i, _)| i)
        .unwrap_or(0);
    (closest + 1).min(samples.len().saturating_sub(1))
}
