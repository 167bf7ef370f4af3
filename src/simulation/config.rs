//! Parking lot configuration
//!
//! Every tunable the scheduler reads lives here and is injected at
//! construction time. Commands may change fields at runtime.

use super::error::{ParkingError, ParkingResult};

/// Hysteresis band around the fill-rate target
pub const DEFAULT_FILL_RATE_DIFF: f32 = 0.05;

pub const DEFAULT_MAX_FILL_RATE: f32 = 1.4;

pub const DEFAULT_SPAWN_PAUSE: f32 = 5.0;
pub const DEFAULT_DESPAWN_PAUSE: f32 = 5.0;
pub const LEAVING_PAUSE: f32 = 1.0;

/// Delay before physics is switched off for an agent spawned into a space
pub const PHYSICS_DISABLE_DELAY: f32 = 0.5;

/// Effectively "never leave unless asked"
pub const DEFAULT_MIN_PARKED_DURATION: f32 = 100_000.0;

pub const DEFAULT_BASE_POOL_SIZE: usize = 10;

/// Directed parking: a same-lane candidate must be further than this from the space
pub const DEFAULT_UPSTREAM_MIN_GAP: f32 = 10.0;

/// Directed parking: a feeder-lane candidate must be this close to the lane start
pub const DEFAULT_FEEDER_MAX_DISTANCE: f32 = 10.0;

/// Lane-start clearance required before a fresh agent is placed there
pub const DEFAULT_SPAWN_CLEARANCE_RADIUS: f32 = 3.0;

#[derive(Debug, Clone, PartialEq)]
pub struct ParkingConfig {
    /// Master switch for parking behaviour
    pub behaviour_enabled: bool,
    pub max_fill_rate: f32,
    pub fill_rate_diff: f32,
    /// Seconds between spawn attempts
    pub spawn_pause: f32,
    /// Seconds between despawn attempts
    pub despawn_pause: f32,
    pub leaving_pause: f32,
    pub physics_disable_delay: f32,
    /// Seconds an agent must stay parked before it accepts a non-forced leave
    pub min_parked_duration: f32,
    pub base_pool_size: usize,
    pub upstream_min_gap: f32,
    pub feeder_max_distance: f32,
    pub spawn_clearance_radius: f32,
    /// Speed used when agents move between waypoints (units/s)
    pub agent_speed: f32,
    pub arrival_tolerance: f32,
}

impl Default for ParkingConfig {
    fn default() -> Self {
        Self {
            behaviour_enabled: true,
            max_fill_rate: DEFAULT_MAX_FILL_RATE,
            fill_rate_diff: DEFAULT_FILL_RATE_DIFF,
            spawn_pause: DEFAULT_SPAWN_PAUSE,
            despawn_pause: DEFAULT_DESPAWN_PAUSE,
            leaving_pause: LEAVING_PAUSE,
            physics_disable_delay: PHYSICS_DISABLE_DELAY,
            min_parked_duration: DEFAULT_MIN_PARKED_DURATION,
            base_pool_size: DEFAULT_BASE_POOL_SIZE,
            upstream_min_gap: DEFAULT_UPSTREAM_MIN_GAP,
            feeder_max_distance: DEFAULT_FEEDER_MAX_DISTANCE,
            spawn_clearance_radius: DEFAULT_SPAWN_CLEARANCE_RADIUS,
            agent_speed: 5.0,
            arrival_tolerance: 0.25,
        }
    }
}

impl ParkingConfig {
    /// Pool capacity for a lot with `total_spaces` spaces
    pub fn pool_capacity(&self, total_spaces: usize) -> usize {
        self.base_pool_size + (self.max_fill_rate * total_spaces as f32) as usize
    }

    /// Spawning is allowed strictly below the upper edge of the band
    pub fn admits_spawn(&self, fill_rate: f32) -> bool {
        fill_rate < self.max_fill_rate + self.fill_rate_diff
    }

    /// Eviction kicks in at the lower edge of the band
    pub fn favours_eviction(&self, fill_rate: f32) -> bool {
        fill_rate >= self.max_fill_rate - self.fill_rate_diff
    }

    /// Spawns per minute
    pub fn set_spawn_rate(&mut self, per_minute: u32) -> ParkingResult<()> {
        self.spawn_pause = pause_from_rate(per_minute)?;
        Ok(())
    }

    /// Despawns per minute
    pub fn set_despawn_rate(&mut self, per_minute: u32) -> ParkingResult<()> {
        self.despawn_pause = pause_from_rate(per_minute)?;
        Ok(())
    }

    pub fn reset_min_parked_duration(&mut self) {
        self.min_parked_duration = DEFAULT_MIN_PARKED_DURATION;
    }

    pub fn validate(&self) -> ParkingResult<()> {
        for (name, pause) in [
            ("spawn_pause", self.spawn_pause),
            ("despawn_pause", self.despawn_pause),
            ("leaving_pause", self.leaving_pause),
        ] {
            if !(pause > 0.0) {
                return Err(ParkingError::InvalidConfig(format!(
                    "{name} must be positive, got {pause}"
                )));
            }
        }
        if self.max_fill_rate < 0.0 {
            return Err(ParkingError::InvalidConfig(format!(
                "max_fill_rate must not be negative, got {}",
                self.max_fill_rate
            )));
        }
        if self.fill_rate_diff < 0.0 {
            return Err(ParkingError::InvalidConfig(format!(
                "fill_rate_diff must not be negative, got {}",
                self.fill_rate_diff
            )));
        }
        if !(self.agent_speed > 0.0) {
            return Err(ParkingError::InvalidConfig(
                "agent_speed must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

fn pause_from_rate(per_minute: u32) -> ParkingResult<f32> {
    if per_minute == 0 {
        return Err(ParkingError::InvalidConfig(
            "rate per minute must be at least 1".to_string(),
        ));
    }
    Ok(60.0 / per_minute as f32)
}
