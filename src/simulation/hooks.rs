//! Narrow contracts to collaborators outside the parking subsystem.

use log::trace;

use super::types::{AgentId, Transform};

/// Prefix identifying control sensors on the controlled agent
pub const CONTROL_SENSOR_PREFIX: &str = "NPCControlSensor";

/// Network replication hook.
///
/// Called after any out-of-band transform change so remote observers
/// resynchronise.
pub trait Replication {
    fn is_authoritative(&self) -> bool;

    fn broadcast_snapshot(&mut self, agent: AgentId, transform: &Transform, force: bool);
}

/// A single-process simulation: always authoritative, nobody to notify
#[derive(Debug, Default)]
pub struct LocalReplica;

impl Replication for LocalReplica {
    fn is_authoritative(&self) -> bool {
        true
    }

    fn broadcast_snapshot(&mut self, agent: AgentId, transform: &Transform, force: bool) {
        trace!(
            "snapshot {} at ({:.1}, {:.1}) force={}",
            agent,
            transform.position.x,
            transform.position.z,
            force
        );
    }
}

/// A component attached to the currently controlled agent
pub trait ControlSensor {
    fn name(&self) -> &str;

    /// Stop tracking `agent`; it is being directed by the parking subsystem
    fn do_not_track(&mut self, agent: AgentId);
}

/// Callbacks invoked when an agent returns to the pool.
///
/// All methods have default no-op implementations.
pub trait DespawnObserver {
    fn on_despawn(&mut self, _agent: AgentId) {}
}
