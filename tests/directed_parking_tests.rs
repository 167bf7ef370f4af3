//! Directed parking: candidate selection, fallback spawn and waiting agents

use std::cell::RefCell;
use std::rc::Rc;

use parking_sim::simulation::{
    build_demo_lot, AgentId, AgentPool, CommandOutcome, ControlSensor, DemoLot, Footprint,
    LaneId, LaneMap, ParkingCommand, ParkingConfig, ParkingError, ParkingLotScheduler,
    ParkingPhase, ParkingSpace, ParkingSpawnPoints, Position, SimParkingRegistry, SpaceId,
    CONTROL_SENSOR_PREFIX,
};

struct RecordingSensor {
    name: String,
    untracked: Rc<RefCell<Vec<AgentId>>>,
}

impl ControlSensor for RecordingSensor {
    fn name(&self) -> &str {
        &self.name
    }

    fn do_not_track(&mut self, agent: AgentId) {
        self.untracked.borrow_mut().push(agent);
    }
}

/// A map whose only lane is a single point
struct StubLaneMap {
    samples: Vec<Position>,
}

impl LaneMap for StubLaneMap {
    fn closest_lane(&self, _point: &Position) -> Option<LaneId> {
        Some(LaneId(0))
    }

    fn lane_positions(&self, lane: LaneId) -> Option<&[Position]> {
        (lane == LaneId(0)).then_some(self.samples.as_slice())
    }

    fn predecessors(&self, _lane: LaneId) -> Vec<LaneId> {
        Vec::new()
    }
}

struct Setup {
    scheduler: ParkingLotScheduler,
    main_lane: LaneId,
    feeder_lane: LaneId,
    untracked: Rc<RefCell<Vec<AgentId>>>,
}

fn setup_with(spaces: usize, config: ParkingConfig, with_sensor: bool) -> Setup {
    let DemoLot {
        registry,
        lanes,
        main_lane,
        feeder_lane,
    } = build_demo_lot(spaces).expect("demo lot");
    let mut scheduler = ParkingLotScheduler::new_with_seed(
        config,
        Box::new(registry),
        Box::new(ParkingSpawnPoints::new_with_seed(3)),
        Box::new(lanes),
        3,
    )
    .expect("valid config");

    let untracked = Rc::new(RefCell::new(Vec::new()));
    if with_sensor {
        // Only the sensor following the naming convention is notified
        scheduler.attach_control_sensor(Box::new(RecordingSensor {
            name: "Camera".to_string(),
            untracked: Rc::new(RefCell::new(Vec::new())),
        }));
        scheduler.attach_control_sensor(Box::new(RecordingSensor {
            name: format!("{CONTROL_SENSOR_PREFIX}Front"),
            untracked: untracked.clone(),
        }));
    }
    Setup {
        scheduler,
        main_lane,
        feeder_lane,
        untracked,
    }
}

fn setup(spaces: usize) -> Setup {
    let config = ParkingConfig {
        max_fill_rate: 1.0,
        ..Default::default()
    };
    setup_with(spaces, config, true)
}

#[test]
fn test_closest_upstream_agent_is_chosen() {
    let Setup {
        mut scheduler,
        main_lane,
        untracked,
        ..
    } = setup(3);

    let ahead = scheduler.spawn_on_lane(main_lane).unwrap();
    scheduler.tick(1.0);
    // Lane start is clear again once the first agent moved on
    let behind = scheduler.spawn_on_lane(main_lane).unwrap();
    assert_eq!(scheduler.active_npc_count(), 2);

    let chosen = scheduler.force_park(SpaceId(0)).unwrap();
    assert_eq!(chosen, Some(behind));
    assert_eq!(*untracked.borrow(), vec![behind]);

    let agent = scheduler.pool().get(behind).unwrap();
    assert_eq!(agent.phase(), ParkingPhase::Parking);
    assert_eq!(agent.behaviour.current_space(), Some(SpaceId(0)));
    assert!(scheduler.registry().is_taken(SpaceId(0)));
    assert_eq!(
        scheduler.pool().get(ahead).unwrap().phase(),
        ParkingPhase::Driving
    );
    assert_eq!(scheduler.active_npc_count(), 1);
}

#[test]
fn test_force_park_is_idempotent() {
    let Setup { mut scheduler, .. } = setup(3);

    let first = scheduler.force_park(SpaceId(1)).unwrap().unwrap();
    let occupied = scheduler.registry().occupied_spaces();
    let active = scheduler.pool().count_active();

    let second = scheduler.force_park(SpaceId(1)).unwrap();
    assert_eq!(second, Some(first));
    assert_eq!(scheduler.registry().occupied_spaces(), occupied);
    assert_eq!(scheduler.pool().count_active(), active);
}

#[test]
fn test_force_park_returns_agent_spawned_into_space() {
    let Setup { mut scheduler, .. } = setup(5);
    scheduler.set_npc_on_map();

    let target = scheduler
        .pool()
        .agent_parking_towards(SpaceId(4))
        .expect("every space has an agent heading to it");
    let outcome = scheduler
        .apply_command(ParkingCommand::ForcePark(SpaceId(4)))
        .unwrap();
    assert_eq!(outcome, CommandOutcome::Agent(Some(target)));
    assert_eq!(scheduler.registry().occupied_spaces(), 5);
}

#[test]
fn test_fallback_spawns_agent_on_approach_lane() {
    let Setup {
        mut scheduler,
        untracked,
        ..
    } = setup(3);

    let id = scheduler.force_park(SpaceId(2)).unwrap().unwrap();
    let agent = scheduler.pool().get(id).unwrap();
    assert!(agent.active);
    assert_eq!(agent.phase(), ParkingPhase::Parking);
    assert_eq!(*untracked.borrow(), vec![id]);
    // Directed agents are not traffic any more
    assert_eq!(scheduler.active_npc_count(), 0);

    // Drive in from the lane start
    for _ in 0..15 {
        scheduler.tick(1.0);
    }
    assert_eq!(
        scheduler.pool().get(id).unwrap().phase(),
        ParkingPhase::Parked
    );
    assert_eq!(scheduler.pool().agent_parked_in(SpaceId(2)), Some(id));
}

#[test]
fn test_feeder_lane_agent_near_junction_is_eligible() {
    let Setup {
        mut scheduler,
        feeder_lane,
        ..
    } = setup(3);

    let feeder_agent = scheduler.spawn_on_lane(feeder_lane).unwrap();
    // Five samples along the feeder brings it within reach of the junction
    for _ in 0..5 {
        scheduler.tick(1.0);
    }

    let chosen = scheduler.force_park(SpaceId(0)).unwrap();
    assert_eq!(chosen, Some(feeder_agent));
}

#[test]
fn test_agent_past_the_space_is_not_eligible() {
    let Setup {
        mut scheduler,
        main_lane,
        ..
    } = setup(3);

    let passed = scheduler.spawn_on_lane(main_lane).unwrap();
    // Well beyond the row of spaces
    for _ in 0..9 {
        scheduler.tick(1.0);
    }
    assert_eq!(
        scheduler.pool().get(passed).unwrap().phase(),
        ParkingPhase::Driving
    );

    let chosen = scheduler.force_park(SpaceId(0)).unwrap().unwrap();
    assert_ne!(chosen, passed);
}

#[test]
fn test_no_candidate_and_no_free_agent() {
    let Setup { scheduler, .. } = setup(2);
    let mut scheduler = scheduler.with_pool(AgentPool::uniform(1, Footprint::default()));
    assert!(scheduler.fill_space(SpaceId(1)));
    scheduler.tick(0.1);

    let result = scheduler.force_park(SpaceId(0)).unwrap();
    assert_eq!(result, None);
    assert!(!scheduler.registry().is_taken(SpaceId(0)));
    assert_eq!(scheduler.registry().occupied_spaces(), 1);
}

#[test]
fn test_missing_control_sensor_is_fatal() {
    let config = ParkingConfig {
        max_fill_rate: 1.0,
        ..Default::default()
    };
    let Setup {
        mut scheduler,
        main_lane,
        ..
    } = setup_with(3, config, false);
    let driver = scheduler.spawn_on_lane(main_lane).unwrap();

    let err = scheduler.force_park(SpaceId(0)).unwrap_err();
    assert!(matches!(err, ParkingError::MissingControlSensor { agent } if agent == driver));
    assert!(err.is_fatal());
    // Nothing was claimed or redirected
    assert!(!scheduler.registry().is_taken(SpaceId(0)));
    assert_eq!(
        scheduler.pool().get(driver).unwrap().phase(),
        ParkingPhase::Driving
    );
}

#[test]
fn test_unknown_space_is_reported() {
    let Setup { mut scheduler, .. } = setup(1);
    let err = scheduler.force_park(SpaceId(99)).unwrap_err();
    assert!(matches!(err, ParkingError::UnknownSpace(SpaceId(99))));
    assert!(!err.is_fatal());
}

#[test]
fn test_waiting_agent_stays_until_released() {
    let config = ParkingConfig {
        max_fill_rate: 1.0,
        min_parked_duration: 0.0,
        ..Default::default()
    };
    let Setup { scheduler, .. } = setup_with(5, config, true);
    let mut scheduler = scheduler.with_pool(AgentPool::uniform(1, Footprint::default()));

    let outcome = scheduler
        .apply_command(ParkingCommand::ForceParkAndWait(SpaceId(0)))
        .unwrap();
    let CommandOutcome::Agent(Some(id)) = outcome else {
        panic!("expected an agent, got {outcome:?}");
    };
    assert!(scheduler.is_waiting(id));
    for _ in 0..15 {
        scheduler.tick(1.0);
    }
    assert_eq!(
        scheduler.pool().get(id).unwrap().phase(),
        ParkingPhase::Parked
    );

    // Fill-rate 0.2 favours eviction once the target drops
    scheduler.set_fill_rate(0.2).unwrap();
    assert_eq!(scheduler.run_despawn_process(), None);
    assert_eq!(scheduler.run_leaving_process(), None);

    scheduler
        .apply_command(ParkingCommand::ReleaseWaiting)
        .unwrap();
    assert!(!scheduler.is_waiting(id));
    assert_eq!(scheduler.run_leaving_process(), Some(id));
}

#[test]
fn test_lane_too_short_to_spawn_on_leaves_space_free() {
    let mut registry = SimParkingRegistry::new();
    registry.add_space(ParkingSpace::new(
        SpaceId(0),
        Position::new(30.0, 0.0, 6.0),
        Position::new(30.0, 0.0, 1.0),
        5.0,
    ));
    let lanes = StubLaneMap {
        samples: vec![Position::default()],
    };
    let mut scheduler = ParkingLotScheduler::new_with_seed(
        ParkingConfig::default(),
        Box::new(registry),
        Box::new(ParkingSpawnPoints::new_with_seed(3)),
        Box::new(lanes),
        3,
    )
    .expect("valid config");
    let untracked = Rc::new(RefCell::new(Vec::new()));
    scheduler.attach_control_sensor(Box::new(RecordingSensor {
        name: CONTROL_SENSOR_PREFIX.to_string(),
        untracked: untracked.clone(),
    }));

    assert_eq!(scheduler.spawn_on_lane(LaneId(0)), None);
    assert_eq!(scheduler.force_park(SpaceId(0)).unwrap(), None);

    assert!(!scheduler.registry().is_taken(SpaceId(0)));
    assert_eq!(scheduler.pool().count_active(), 0);
    assert!(scheduler
        .pool()
        .iter()
        .all(|a| a.phase() == ParkingPhase::Driving));
    assert!(untracked.borrow().is_empty());
    assert_eq!(scheduler.active_npc_count(), 0);
}
