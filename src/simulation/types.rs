//! Core types for the parking simulation
//!
//! Identifiers, geometry and agent footprints shared by every component.

use std::fmt;

/// A wrapper type for pooled agent IDs (stable pool index)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AgentId(pub usize);

/// A wrapper type for parking space IDs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpaceId(pub usize);

/// A wrapper type for traffic lane IDs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LaneId(pub usize);

/// Global trip id, assigned every time an agent is (re)activated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct TripId(pub u64);

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "agent#{}", self.0)
    }
}

impl fmt::Display for SpaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "space#{}", self.0)
    }
}

/// A 3D position in the simulation
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Position {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn distance(&self, other: &Position) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// Move towards `target` by at most `max_step`, never overshooting
    pub fn step_towards(&self, target: &Position, max_step: f32) -> Position {
        let dist = self.distance(target);
        if dist <= max_step || dist == 0.0 {
            return *target;
        }
        let t = max_step / dist;
        Position {
            x: self.x + (target.x - self.x) * t,
            y: self.y + (target.y - self.y) * t,
            z: self.z + (target.z - self.z) * t,
        }
    }

    /// Calculate the angle from this position to another (Y-axis rotation)
    pub fn angle_to(&self, other: &Position) -> f32 {
        let dx = other.x - self.x;
        let dz = other.z - self.z;
        let direction_len = (dx * dx + dz * dz).sqrt();
        if direction_len > 0.0 {
            (dx / direction_len).atan2(dz / direction_len)
        } else {
            0.0
        }
    }
}

/// Position plus heading of an agent
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Transform {
    pub position: Position,
    /// Y-axis rotation in radians
    pub heading: f32,
}

impl Transform {
    /// Place at `position`, facing `look_at`
    pub fn looking_at(position: Position, look_at: &Position) -> Self {
        Self {
            position,
            heading: position.angle_to(look_at),
        }
    }

    pub fn look_at(&mut self, target: &Position) {
        self.heading = self.position.angle_to(target);
    }
}

/// Bounding footprint of an agent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Footprint {
    pub width: f32,
    /// Extent along the driving direction; compared against space length
    pub length: f32,
}

impl Footprint {
    pub fn new(width: f32, length: f32) -> Self {
        Self { width, length }
    }
}

impl Default for Footprint {
    fn default() -> Self {
        Self {
            width: 2.0,
            length: 4.5,
        }
    }
}
