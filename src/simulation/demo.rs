//! A small ready-made parking lot for the headless runner and tests

use anyhow::Result;

use super::lane_map::SimLaneMap;
use super::registry::{ParkingSpace, SimParkingRegistry};
use super::types::{LaneId, Position, SpaceId};

/// Distance between neighbouring space centres
const SPACE_SPACING: f32 = 3.0;
/// Where the row of spaces starts along the main lane
const ROW_OFFSET: f32 = 30.0;
const SPACE_DEPTH: f32 = 6.0;
const SPACE_LENGTH: f32 = 5.0;
const LANE_SAMPLE_STEP: f32 = 5.0;

pub struct DemoLot {
    pub registry: SimParkingRegistry,
    pub lanes: SimLaneMap,
    /// Lane running past the row of spaces
    pub main_lane: LaneId,
    /// Lane feeding into the start of the main lane
    pub feeder_lane: LaneId,
}

fn straight_lane(from_x: f32, to_x: f32) -> Vec<Position> {
    let steps = ((to_x - from_x) / LANE_SAMPLE_STEP).ceil().max(1.0) as usize;
    (0..=steps)
        .map(|i| Position::new(from_x + (to_x - from_x) * i as f32 / steps as f32, 0.0, 0.0))
        .collect()
}

/// A row of `spaces` spaces beside a straight main lane, with one feeder lane.
///
/// The main lane starts at the origin and runs along +x; spaces sit
/// `SPACE_DEPTH` units to its side and exit back towards it.
pub fn build_demo_lot(spaces: usize) -> Result<DemoLot> {
    let mut registry = SimParkingRegistry::new();
    for i in 0..spaces {
        let x = ROW_OFFSET + i as f32 * SPACE_SPACING;
        registry.add_space(ParkingSpace::new(
            SpaceId(i),
            Position::new(x, 0.0, SPACE_DEPTH),
            Position::new(x, 0.0, 1.0),
            SPACE_LENGTH,
        ));
    }

    let lane_end = ROW_OFFSET + spaces as f32 * SPACE_SPACING + ROW_OFFSET;
    let mut lanes = SimLaneMap::new();
    let feeder_lane = lanes.add_lane(straight_lane(-ROW_OFFSET, 0.0))?;
    let main_lane = lanes.add_lane(straight_lane(0.0, lane_end))?;
    lanes.connect(feeder_lane, main_lane)?;

    Ok(DemoLot {
        registry,
        lanes,
        main_lane,
        feeder_lane,
    })
}
