//! Parking lot scheduler
//!
//! Keeps the lot near its target fill-rate with three periodic processes
//! (spawn, despawn, leaving) and serves directed-parking requests. All work
//! happens inside [`ParkingLotScheduler::tick`] or a direct call, so every
//! scan/claim/release sequence runs to completion before anything else
//! touches the pool or the registry.

use log::{debug, error, info, warn};
use ordered_float::OrderedFloat;
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;
use sorted_vec::SortedSet;

use super::agent::{AgentUpdate, ParkingPhase};
use super::config::ParkingConfig;
use super::error::{ParkingError, ParkingResult};
use super::hooks::{
    ControlSensor, DespawnObserver, LocalReplica, Replication, CONTROL_SENSOR_PREFIX,
};
use super::lane_map::LaneMap;
use super::pool::AgentPool;
use super::processes::{DeferredKind, DeferredQueue, ProcessTimers};
use super::registry::ParkingSpaceRegistry;
use super::spawns::{SpawnPoint, SpawnPointProvider};
use super::types::{AgentId, Footprint, LaneId, Position, SpaceId, Transform, TripId};

/// Who ends up driving into a directed space
enum DirectedCandidate {
    Active(AgentId),
    /// Inactive pool agent to be placed at the start of the approach lane
    Fresh(AgentId),
}

/// Owns the agent pool and keeps the lot near its target fill-rate
pub struct ParkingLotScheduler {
    /// Tunables, changed at runtime by commands
    config: ParkingConfig,
    /// All agents, active or not
    pool: AgentPool,
    registry: Box<dyn ParkingSpaceRegistry>,
    /// Spawn points for agents placed straight into a space
    spawns: Box<dyn SpawnPointProvider>,
    /// Read-only lane queries for directed parking and driving
    lanes: Box<dyn LaneMap>,
    replication: Box<dyn Replication>,
    /// Components on the currently controlled agent
    control_sensors: Vec<Box<dyn ControlSensor>>,
    despawn_observers: Vec<Box<dyn DespawnObserver>>,
    /// Agents kept parked until `release_waiting`
    waiting: SortedSet<AgentId>,
    /// `None` while the periodic processes are stopped
    timers: Option<ProcessTimers>,
    /// Pending physics-disable actions
    deferred: DeferredQueue,
    /// Pool index where the next leaving scan starts
    leaving_cursor: usize,
    /// Last trip id handed out
    next_trip: u64,
    /// Active agents not holding a space
    active_npc_count: usize,
    /// Set once the initial placement has run
    placed_on_map: bool,
    /// Where inactive agents are parked off-scene
    pool_home: Position,
    /// Simulated seconds since start
    time: f32,
    /// Seeded RNG for deterministic runs, or `None` for thread RNG
    rng: Option<StdRng>,
}

impl ParkingLotScheduler {
    fn new_internal(
        config: ParkingConfig,
        registry: Box<dyn ParkingSpaceRegistry>,
        spawns: Box<dyn SpawnPointProvider>,
        lanes: Box<dyn LaneMap>,
        rng: Option<StdRng>,
    ) -> ParkingResult<Self> {
        config.validate()?;
        let capacity = config.pool_capacity(registry.total_spaces());
        Ok(Self {
            pool: AgentPool::uniform(capacity, Footprint::default()),
            config,
            registry,
            spawns,
            lanes,
            replication: Box::new(LocalReplica),
            control_sensors: Vec::new(),
            despawn_observers: Vec::new(),
            waiting: SortedSet::new(),
            timers: None,
            deferred: DeferredQueue::default(),
            leaving_cursor: 0,
            next_trip: 0,
            active_npc_count: 0,
            placed_on_map: false,
            pool_home: Position::default(),
            time: 0.0,
            rng,
        })
    }

    pub fn new(
        config: ParkingConfig,
        registry: Box<dyn ParkingSpaceRegistry>,
        spawns: Box<dyn SpawnPointProvider>,
        lanes: Box<dyn LaneMap>,
    ) -> ParkingResult<Self> {
        Self::new_internal(config, registry, spawns, lanes, None)
    }

    /// Create a scheduler with a seeded RNG for reproducible process choices
    pub fn new_with_seed(
        config: ParkingConfig,
        registry: Box<dyn ParkingSpaceRegistry>,
        spawns: Box<dyn SpawnPointProvider>,
        lanes: Box<dyn LaneMap>,
        seed: u64,
    ) -> ParkingResult<Self> {
        Self::new_internal(config, registry, spawns, lanes, Some(StdRng::seed_from_u64(seed)))
    }

    /// Replace the default pool, e.g. to mix agent footprints
    pub fn with_pool(mut self, pool: AgentPool) -> Self {
        self.pool = pool;
        self
    }

    pub fn with_replication(mut self, replication: Box<dyn Replication>) -> Self {
        self.replication = replication;
        self
    }

    pub fn with_pool_home(mut self, home: Position) -> Self {
        self.pool_home = home;
        self
    }

    pub fn attach_control_sensor(&mut self, sensor: Box<dyn ControlSensor>) {
        self.control_sensors.push(sensor);
    }

    pub fn add_despawn_observer(&mut self, observer: Box<dyn DespawnObserver>) {
        self.despawn_observers.push(observer);
    }

    pub fn config(&self) -> &ParkingConfig {
        &self.config
    }

    pub fn pool(&self) -> &AgentPool {
        &self.pool
    }

    pub fn registry(&self) -> &dyn ParkingSpaceRegistry {
        self.registry.as_ref()
    }

    pub fn registry_mut(&mut self) -> &mut dyn ParkingSpaceRegistry {
        self.registry.as_mut()
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn active_npc_count(&self) -> usize {
        self.active_npc_count
    }

    pub fn change_active_count_by(&mut self, diff: isize) {
        self.active_npc_count = self.active_npc_count.saturating_add_signed(diff);
    }

    pub fn workers_running(&self) -> bool {
        self.timers.is_some()
    }

    pub fn is_waiting(&self, agent: AgentId) -> bool {
        self.waiting.binary_search(&agent).is_ok()
    }

    pub fn pending_deferred(&self) -> usize {
        self.deferred.len()
    }

    fn random_index(&mut self, len: usize) -> usize {
        match &mut self.rng {
            Some(rng) => rng.random_range(0..len),
            None => rand::rng().random_range(0..len),
        }
    }

    fn next_trip_id(&mut self) -> TripId {
        self.next_trip += 1;
        TripId(self.next_trip)
    }

    fn broadcast(&mut self, agent: AgentId) {
        if !self.replication.is_authoritative() {
            return;
        }
        if let Some(a) = self.pool.get(agent) {
            let transform = a.transform;
            self.replication.broadcast_snapshot(agent, &transform, true);
        }
    }

    /// Start or stop all three periodic processes together.
    ///
    /// Stopping also drops pending deferred actions.
    pub fn enable_workers(&mut self, enabled: bool) {
        if enabled {
            if self.timers.is_some() {
                warn!("Parking workers already running");
                return;
            }
            info!("Starting parking workers");
            self.timers = Some(ProcessTimers::new(
                self.config.spawn_pause,
                self.config.despawn_pause,
                self.config.leaving_pause,
            ));
        } else {
            info!("Stopping parking workers");
            self.timers = None;
            self.deferred.clear();
        }
    }

    pub fn set_behaviour_enabled(&mut self, enabled: bool) {
        self.config.behaviour_enabled = enabled;
    }

    pub fn set_fill_rate(&mut self, rate: f32) -> ParkingResult<()> {
        if rate < 0.0 {
            return Err(ParkingError::InvalidConfig(format!(
                "fill-rate target must not be negative, got {rate}"
            )));
        }
        self.config.max_fill_rate = rate;
        Ok(())
    }

    pub fn set_min_parked_duration(&mut self, seconds: f32) {
        self.config.min_parked_duration = seconds;
    }

    pub fn reset_min_parked_duration(&mut self) {
        self.config.reset_min_parked_duration();
    }

    pub fn set_spawn_rate(&mut self, per_minute: u32) -> ParkingResult<()> {
        self.config.set_spawn_rate(per_minute)?;
        if let Some(timers) = &mut self.timers {
            timers.spawn.set_interval(self.config.spawn_pause);
        }
        Ok(())
    }

    pub fn set_despawn_rate(&mut self, per_minute: u32) -> ParkingResult<()> {
        self.config.set_despawn_rate(per_minute)?;
        if let Some(timers) = &mut self.timers {
            timers.despawn.set_interval(self.config.despawn_pause);
        }
        Ok(())
    }

    /// Advance simulated time by `delta_secs`
    pub fn tick(&mut self, delta_secs: f32) {
        self.time += delta_secs;

        for action in self.deferred.advance(delta_secs) {
            if let Some(agent) = self.pool.get_mut(action.agent) {
                if agent.active && agent.trip == action.trip {
                    match action.kind {
                        DeferredKind::DisablePhysics => agent.physics_enabled = false,
                    }
                }
            }
        }

        self.update_agents(delta_secs);

        let Some(timers) = &mut self.timers else {
            return;
        };
        let spawns = timers.spawn.advance(delta_secs);
        let despawns = timers.despawn.advance(delta_secs);
        let leaves = timers.leaving.advance(delta_secs);

        for _ in 0..spawns {
            self.run_spawn_process();
        }
        for _ in 0..despawns {
            self.run_despawn_process();
        }
        for _ in 0..leaves {
            self.run_leaving_process();
        }
    }

    fn update_agents(&mut self, delta_secs: f32) {
        for index in 0..self.pool.len() {
            let id = AgentId(index);
            let Some(agent) = self.pool.get_mut(id) else {
                continue;
            };
            if !agent.active || !agent.enabled {
                continue;
            }
            let result = agent.update(
                delta_secs,
                self.time,
                &self.config,
                self.registry.as_mut(),
                self.lanes.as_ref(),
            );
            match result {
                AgentUpdate::Continue => {}
                AgentUpdate::Arrived(space) => debug!("{} arrived in {}", id, space),
                AgentUpdate::LeftSpace(space) => {
                    debug!("{} left {} and rejoined traffic", id, space);
                    agent.counted_in_traffic = true;
                    self.active_npc_count += 1;
                }
                AgentUpdate::EndOfLane => self.despawn_npc(id),
            }
        }
    }

    /// Admit one agent into a random pool slot while below the band's top edge
    pub fn run_spawn_process(&mut self) -> usize {
        if !self.config.behaviour_enabled || self.pool.is_empty() {
            return 0;
        }
        if !self.config.admits_spawn(self.registry.fill_rate()) {
            return 0;
        }
        let index = self.random_index(self.pool.len());
        self.try_spawn(1, index, None)
    }

    /// Despawn one random parked agent while at or above the band's bottom edge
    pub fn run_despawn_process(&mut self) -> Option<AgentId> {
        if !self.config.behaviour_enabled || self.pool.is_empty() {
            return None;
        }
        if !self.config.favours_eviction(self.registry.fill_rate()) {
            return None;
        }
        let index = self.random_index(self.pool.len());
        let agent = self.pool.find_agent_at(index)?;
        if !agent.active || agent.phase() != ParkingPhase::Parked || agent.behaviour.wait {
            return None;
        }
        let id = agent.id;
        self.despawn(id);
        Some(id)
    }

    /// Ask the first parked agent at or after the leaving cursor to leave
    pub fn run_leaving_process(&mut self) -> Option<AgentId> {
        if !self.config.behaviour_enabled {
            return None;
        }
        if !self.config.favours_eviction(self.registry.fill_rate()) {
            return None;
        }
        let (now, min_parked) = (self.time, self.config.min_parked_duration);
        while self.leaving_cursor < self.pool.len() {
            let id = AgentId(self.leaving_cursor);
            if let Some(agent) = self.pool.get_mut(id) {
                if agent.active
                    && agent.phase() == ParkingPhase::Parked
                    && agent.behaviour.try_init_leaving(now, min_parked, false)
                {
                    debug!("{} starts leaving", id);
                    return Some(id);
                }
            }
            self.leaving_cursor += 1;
        }
        self.leaving_cursor = 0;
        None
    }

    /// First placement: fill the lot from the whole pool once
    pub fn set_npc_on_map(&mut self) -> usize {
        if self.placed_on_map {
            return 0;
        }
        self.placed_on_map = true;
        let spawned = self.try_spawn(self.pool.len(), 0, None);
        info!("Initial placement parked {} agents", spawned);
        spawned
    }

    /// Would one more occupied space push the lot over its target?
    fn exceeds_fill_target(&self) -> bool {
        let total = self.registry.total_spaces();
        if total == 0 {
            return true;
        }
        let projected = (self.registry.occupied_spaces() + 1) as f32 / total as f32;
        projected > self.config.max_fill_rate + f32::EPSILON
    }

    /// Spawn up to `count` inactive agents into parking spaces, scanning the
    /// pool circularly from `start`. With `override_space` the agents go to
    /// that space instead of a provider-chosen one.
    ///
    /// Returns how many agents were spawned.
    pub fn try_spawn(
        &mut self,
        count: usize,
        start: usize,
        override_space: Option<SpaceId>,
    ) -> usize {
        let mut remaining = count;
        for index in self.pool.scan_from(start) {
            if remaining == 0 {
                break;
            }
            let Some(agent) = self.pool.find_agent_at(index) else {
                break;
            };
            if agent.active {
                continue;
            }
            let (id, footprint) = (agent.id, agent.footprint);

            let point = match override_space {
                Some(space) => match self.registry.space(space) {
                    Some(s) => SpawnPoint::in_space(space, s.center, s.exit),
                    None => {
                        error!("Cannot fill unknown {}", space);
                        break;
                    }
                },
                None => match self
                    .spawns
                    .valid_spawn_point(&footprint, true, self.registry.as_ref())
                {
                    Some(point) => point,
                    None => {
                        debug!("No free spawn point, ending spawn pass");
                        break;
                    }
                },
            };
            let Some(space) = point.space else {
                continue;
            };
            let fits = self
                .registry
                .space(space)
                .is_some_and(|s| footprint.length <= s.length);
            if !fits {
                continue;
            }
            if self.exceeds_fill_target() {
                debug!("Fill-rate target reached, ending spawn pass");
                break;
            }
            if !self.registry.try_take(space) {
                continue;
            }

            self.activate_in_space(id, space, &point);
            remaining -= 1;
        }
        count - remaining
    }

    fn activate_in_space(&mut self, id: AgentId, space: SpaceId, point: &SpawnPoint) {
        let trip = self.next_trip_id();
        let delay = self.config.physics_disable_delay;
        let Some(agent) = self.pool.get_mut(id) else {
            return;
        };
        agent.transform = Transform::looking_at(point.position, &point.look_at);
        agent.trip = trip;
        agent.active = true;
        agent.enabled = true;
        agent.physics_enabled = true;
        agent.counted_in_traffic = false;
        agent.behaviour.wait = false;
        agent.behaviour.switch_to_parking(space);

        self.deferred
            .schedule(id, trip, DeferredKind::DisablePhysics, delay);
        self.broadcast(id);
        debug!("{} spawned into {} (trip {})", id, space, trip.0);
    }

    /// Inactive agent that could be placed at the start of `lane`, if the
    /// lane start is clear
    fn lane_spawn_candidate(&self, lane: LaneId) -> Option<AgentId> {
        let samples = self.lanes.lane_positions(lane)?;
        let [start, _, ..] = samples else {
            warn!("Lane {:?} is too short to spawn on", lane);
            return None;
        };
        let start = *start;
        let obstructed = self
            .pool
            .active()
            .any(|a| a.position().distance(&start) < self.config.spawn_clearance_radius);
        if obstructed {
            return None;
        }
        let candidate = self
            .pool
            .iter()
            .find(|a| !a.active && a.behaviour.able_to_park)
            .map(|a| a.id);
        if candidate.is_none() {
            error!("Could not find an inactive agent able to park");
        }
        candidate
    }

    /// Returns false when the lane has no start and heading to place the agent at
    fn activate_on_lane(&mut self, id: AgentId, lane: LaneId) -> bool {
        let Some((start, look_at)) = self
            .lanes
            .lane_positions(lane)
            .and_then(|s| Some((*s.first()?, *s.get(1)?)))
        else {
            return false;
        };
        let trip = self.next_trip_id();
        let Some(agent) = self.pool.get_mut(id) else {
            return false;
        };
        agent.transform = Transform::looking_at(start, &look_at);
        agent.trip = trip;
        agent.active = true;
        agent.enabled = true;
        agent.physics_enabled = true;
        agent.counted_in_traffic = true;
        agent.behaviour.wait = false;
        agent.behaviour.join_lane(lane, 1);
        self.active_npc_count += 1;

        self.broadcast(id);
        debug!("{} spawned on lane {:?} (trip {})", id, lane, trip.0);
        true
    }

    /// Place an inactive agent at the start of `lane` as ordinary traffic
    pub fn spawn_on_lane(&mut self, lane: LaneId) -> Option<AgentId> {
        let id = self.lane_spawn_candidate(lane)?;
        self.activate_on_lane(id, lane).then_some(id)
    }

    /// Free the agent's space (if any) and return it to the pool
    pub fn despawn(&mut self, id: AgentId) {
        let Some(agent) = self.pool.get_mut(id) else {
            error!("Cannot despawn unknown {}", id);
            return;
        };
        if let Some(space) = agent.behaviour.vacate(self.registry.as_mut()) {
            debug!("{} released {}", id, space);
        }
        self.despawn_npc(id);
    }

    /// Pool bookkeeping only: deactivate, move off-scene, stop timers and
    /// notify observers. Space release belongs to the state machine.
    pub fn despawn_npc(&mut self, id: AgentId) {
        let home = self.pool_home;
        let Some(agent) = self.pool.get_mut(id) else {
            return;
        };
        agent.active = false;
        agent.transform = Transform {
            position: home,
            heading: 0.0,
        };
        agent.enabled = false;
        agent.behaviour.wait = false;
        let was_counted = std::mem::take(&mut agent.counted_in_traffic);

        self.deferred.cancel_agent(id);
        let _ = self.waiting.remove_item(&id);
        if was_counted {
            self.active_npc_count = self.active_npc_count.saturating_sub(1);
        }
        for observer in &mut self.despawn_observers {
            observer.on_despawn(id);
        }
    }

    /// Re-place the agent parked in `space` after the space moved
    pub fn space_changed(&mut self, space: SpaceId) {
        let Some(geometry) = self.registry.space(space).map(|s| (s.center, s.exit)) else {
            error!("Geometry changed for unknown {}", space);
            return;
        };
        let Some(id) = self.pool.agent_parked_in(space) else {
            return;
        };
        if let Some(agent) = self.pool.get_mut(id) {
            agent.transform = Transform::looking_at(geometry.0, &geometry.1);
        }
        self.broadcast(id);
    }

    /// Despawn whoever is parked in `space`
    pub fn force_space_free(&mut self, space: SpaceId) -> Option<AgentId> {
        let Some(id) = self.pool.agent_parked_in(space) else {
            error!("Could not find an agent to despawn in {}", space);
            return None;
        };
        self.despawn(id);
        Some(id)
    }

    /// Make whoever is parked in `space` leave, ignoring wait and minimum duration
    pub fn leave_space(&mut self, space: SpaceId) -> Option<AgentId> {
        let Some(id) = self.pool.agent_parked_in(space) else {
            error!("Could not find an agent to leave {}", space);
            return None;
        };
        let now = self.time;
        let agent = self.pool.get_mut(id)?;
        agent
            .behaviour
            .try_init_leaving(now, 0.0, true)
            .then_some(id)
    }

    pub fn fill_space(&mut self, space: SpaceId) -> bool {
        self.try_spawn(1, 0, Some(space)) == 1
    }

    /// Empty the lot and refill it from the whole pool
    pub fn fill_all(&mut self) -> usize {
        let holders: Vec<AgentId> = self
            .pool
            .active()
            .filter(|a| a.phase() != ParkingPhase::Driving)
            .map(|a| a.id)
            .collect();
        for id in holders {
            self.despawn(id);
        }
        self.registry.reset();
        self.try_spawn(self.pool.len(), 0, None)
    }

    /// Closest upstream agent eligible to drive into `space` from `lane`
    fn best_candidate(&self, space_center: &Position, lane: LaneId) -> Option<AgentId> {
        let lane_start = *self.lanes.lane_positions(lane)?.first()?;
        let feeders = self.lanes.predecessors(lane);
        let space_from_start = lane_start.distance(space_center);

        self.pool
            .active()
            .filter(|a| a.behaviour.able_to_park)
            .filter(|a| {
                !matches!(a.phase(), ParkingPhase::Parking | ParkingPhase::Leaving)
            })
            .filter_map(|a| {
                let agent_lane = a.behaviour.current_lane()?;
                let from_start = lane_start.distance(&a.position());
                let to_space = space_center.distance(&a.position());
                let upstream = agent_lane == lane
                    && from_start < space_from_start
                    && to_space > self.config.upstream_min_gap;
                let feeding = feeders.contains(&agent_lane)
                    && from_start < self.config.feeder_max_distance;
                (upstream || feeding).then_some((OrderedFloat(from_start), a.id))
            })
            .min()
            .map(|(_, id)| id)
    }

    /// Direct some agent into `space`.
    ///
    /// Returns the agent already heading there if there is one. Otherwise the
    /// closest eligible upstream agent is chosen, falling back to a fresh
    /// agent at the start of the approach lane. `Ok(None)` means nobody is
    /// available right now; the only error worth stopping for is a missing
    /// control sensor.
    pub fn force_park(&mut self, space: SpaceId) -> ParkingResult<Option<AgentId>> {
        let Some(center) = self.registry.space(space).map(|s| s.center) else {
            return Err(ParkingError::UnknownSpace(space));
        };
        if let Some(id) = self.pool.agent_parking_towards(space) {
            info!("{} already parking in {}", id, space);
            return Ok(Some(id));
        }
        if self.registry.is_taken(space) {
            warn!("Cannot direct an agent into taken {}", space);
            return Ok(None);
        }
        let Some(lane) = self.lanes.closest_lane(&center) else {
            warn!("No lane leads to {}", space);
            return Ok(None);
        };

        let candidate = match self.best_candidate(&center, lane) {
            Some(id) => DirectedCandidate::Active(id),
            None => match self.lane_spawn_candidate(lane) {
                Some(id) => DirectedCandidate::Fresh(id),
                None => {
                    info!("Could not find a free agent for {}", space);
                    return Ok(None);
                }
            },
        };
        let id = match candidate {
            DirectedCandidate::Active(id) | DirectedCandidate::Fresh(id) => id,
        };

        let sensor = self
            .control_sensors
            .iter()
            .position(|s| s.name().starts_with(CONTROL_SENSOR_PREFIX))
            .ok_or(ParkingError::MissingControlSensor { agent: id })?;

        if let DirectedCandidate::Fresh(id) = candidate {
            if !self.activate_on_lane(id, lane) {
                warn!("Could not place {} on the approach lane to {}", id, space);
                return Ok(None);
            }
        }
        self.control_sensors[sensor].do_not_track(id);

        let Some(agent) = self.pool.get_mut(id) else {
            return Err(ParkingError::UnknownAgent(id));
        };
        if !agent.behaviour.init_parking(space, self.registry.as_mut()) {
            warn!("{} could not claim {}", id, space);
            return Ok(None);
        }
        if std::mem::take(&mut agent.counted_in_traffic) {
            self.active_npc_count = self.active_npc_count.saturating_sub(1);
        }
        info!("{} directed into {}", id, space);
        Ok(Some(id))
    }

    /// Like [`force_park`](Self::force_park), but the agent then stays parked
    /// until [`release_waiting`](Self::release_waiting)
    pub fn force_park_and_wait(&mut self, space: SpaceId) -> ParkingResult<Option<AgentId>> {
        let result = self.force_park(space)?;
        if let Some(id) = result {
            if let Some(agent) = self.pool.get_mut(id) {
                agent.behaviour.wait = true;
            }
            let _ = self.waiting.find_or_insert(id);
        }
        Ok(result)
    }

    pub fn release_waiting(&mut self) {
        let released = std::mem::replace(&mut self.waiting, SortedSet::new());
        for id in released.iter() {
            if let Some(agent) = self.pool.get_mut(*id) {
                agent.behaviour.wait = false;
            }
        }
    }

    pub fn count_in_phase(&self, phase: ParkingPhase) -> usize {
        self.pool.active().filter(|a| a.phase() == phase).count()
    }

    /// Log a summary of the lot state
    pub fn log_summary(&self) {
        info!("=== Parking Lot Summary ===");
        info!("Time: {:.2}s", self.time);
        info!(
            "Spaces: {}/{} occupied (fill-rate {:.2}, target {:.2})",
            self.registry.occupied_spaces(),
            self.registry.total_spaces(),
            self.registry.fill_rate(),
            self.config.max_fill_rate
        );
        info!(
            "Agents: {}/{} active, {} in traffic",
            self.pool.count_active(),
            self.pool.len(),
            self.active_npc_count
        );
        info!(
            "Parking: {}, Parked: {}, Leaving: {}, Driving: {}, Waiting: {}",
            self.count_in_phase(ParkingPhase::Parking),
            self.count_in_phase(ParkingPhase::Parked),
            self.count_in_phase(ParkingPhase::Leaving),
            self.count_in_phase(ParkingPhase::Driving),
            self.waiting.len()
        );
    }
}
