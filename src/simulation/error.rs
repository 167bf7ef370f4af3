//! Error taxonomy for the parking subsystem.
//!
//! Resource exhaustion is not represented here: a full lot or an idle pool
//! simply makes a pass end early and is retried on the next interval.

use thiserror::Error;

use super::types::{AgentId, SpaceId};

#[derive(Debug, Error)]
pub enum ParkingError {
    /// The currently controlled agent carries no control sensor. This is a
    /// setup defect and must not be retried.
    #[error("no control sensor attached to the controlled agent (while directing {agent})")]
    MissingControlSensor { agent: AgentId },

    #[error("{0} not found")]
    UnknownSpace(SpaceId),

    #[error("{0} not found")]
    UnknownAgent(AgentId),

    #[error("invalid parking configuration: {0}")]
    InvalidConfig(String),
}

impl ParkingError {
    /// Whether the caller should stop rather than retry later
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ParkingError::MissingControlSensor { .. } | ParkingError::InvalidConfig(_)
        )
    }
}

pub type ParkingResult<T> = Result<T, ParkingError>;
