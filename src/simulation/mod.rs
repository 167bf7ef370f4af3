//! Parking lot simulation module
//!
//! Pooled vehicle agents occupying, holding and vacating a finite set of
//! parking spaces. The scheduler drives everything from a single tick, so
//! it can be run headless and tested without any rendering.

mod agent;
mod commands;
mod config;
mod demo;
mod error;
mod hooks;
mod lane_map;
mod pool;
mod processes;
mod registry;
mod scheduler;
mod spawns;
mod types;

// Re-export public types for external use
pub use agent::{Agent, AgentUpdate, ParkingBehaviour, ParkingPhase, ParkingState};
pub use commands::{CommandOutcome, ParkingCommand};
#[allow(unused_imports)]
pub use config::{
    ParkingConfig, DEFAULT_BASE_POOL_SIZE, DEFAULT_FEEDER_MAX_DISTANCE, DEFAULT_FILL_RATE_DIFF,
    DEFAULT_MAX_FILL_RATE, DEFAULT_MIN_PARKED_DURATION, DEFAULT_SPAWN_CLEARANCE_RADIUS,
    DEFAULT_UPSTREAM_MIN_GAP, LEAVING_PAUSE, PHYSICS_DISABLE_DELAY,
};
pub use demo::{build_demo_lot, DemoLot};
pub use error::{ParkingError, ParkingResult};
pub use hooks::{ControlSensor, DespawnObserver, LocalReplica, Replication, CONTROL_SENSOR_PREFIX};
pub use lane_map::{LaneMap, SimLaneMap};
pub use pool::{AgentPool, CircularScan};
pub use processes::PeriodicTimer;
pub use registry::{ParkingSpace, ParkingSpaceRegistry, SimParkingRegistry};
pub use scheduler::ParkingLotScheduler;
pub use spawns::{ParkingSpawnPoints, SpawnPoint, SpawnPointProvider};
pub use types::{AgentId, Footprint, LaneId, Position, SpaceId, Transform, TripId};
