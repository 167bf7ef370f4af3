//! External command surface
//!
//! Configuration and testing hooks arrive as [`ParkingCommand`] values and
//! are applied synchronously, outside the periodic cadence.

use log::info;

use super::error::ParkingResult;
use super::scheduler::ParkingLotScheduler;
use super::types::{AgentId, SpaceId};

#[derive(Debug, Clone, PartialEq)]
pub enum ParkingCommand {
    EnableWorkers(bool),
    SetBehaviourEnabled(bool),
    SetFillRate(f32),
    SetMinParkedDuration(f32),
    ResetMinParkedDuration,
    /// Spawns per minute
    SetSpawnRate(u32),
    /// Despawns per minute
    SetDespawnRate(u32),
    ForceSpaceFree(SpaceId),
    LeaveSpace(SpaceId),
    SpaceChanged(SpaceId),
    FillSpace(SpaceId),
    FillAll,
    ForcePark(SpaceId),
    ForceParkAndWait(SpaceId),
    ReleaseWaiting,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Done,
    /// The agent affected by the command, if one was found
    Agent(Option<AgentId>),
    Spawned(usize),
}

impl ParkingLotScheduler {
    pub fn apply_command(&mut self, command: ParkingCommand) -> ParkingResult<CommandOutcome> {
        info!("Applying {:?}", command);
        let outcome = match command {
            ParkingCommand::EnableWorkers(enabled) => {
                self.enable_workers(enabled);
                CommandOutcome::Done
            }
            ParkingCommand::SetBehaviourEnabled(enabled) => {
                self.set_behaviour_enabled(enabled);
                CommandOutcome::Done
            }
            ParkingCommand::SetFillRate(rate) => {
                self.set_fill_rate(rate)?;
                CommandOutcome::Done
            }
            ParkingCommand::SetMinParkedDuration(seconds) => {
                self.set_min_parked_duration(seconds);
                CommandOutcome::Done
            }
            ParkingCommand::ResetMinParkedDuration => {
                self.reset_min_parked_duration();
                CommandOutcome::Done
            }
            ParkingCommand::SetSpawnRate(per_minute) => {
                self.set_spawn_rate(per_minute)?;
                CommandOutcome::Done
            }
            ParkingCommand::SetDespawnRate(per_minute) => {
                self.set_despawn_rate(per_minute)?;
                CommandOutcome::Done
            }
            ParkingCommand::ForceSpaceFree(space) => {
                CommandOutcome::Agent(self.force_space_free(space))
            }
            ParkingCommand::LeaveSpace(space) => CommandOutcome::Agent(self.leave_space(space)),
            ParkingCommand::SpaceChanged(space) => {
                self.space_changed(space);
                CommandOutcome::Done
            }
            ParkingCommand::FillSpace(space) => {
                CommandOutcome::Spawned(usize::from(self.fill_space(space)))
            }
            ParkingCommand::FillAll => CommandOutcome::Spawned(self.fill_all()),
            ParkingCommand::ForcePark(space) => CommandOutcome::Agent(self.force_park(space)?),
            ParkingCommand::ForceParkAndWait(space) => {
                CommandOutcome::Agent(self.force_park_and_wait(space)?)
            }
            ParkingCommand::ReleaseWaiting => {
                self.release_waiting();
                CommandOutcome::Done
            }
        };
        Ok(outcome)
    }
}
