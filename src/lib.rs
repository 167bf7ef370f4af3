//! Parking Simulation Library
//!
//! Occupancy control for a pool of simulated vehicles that park in, hold and
//! vacate a finite set of parking spaces.

pub mod simulation;
