//! Lane graph queries
//!
//! The parking scheduler only reads the map: closest lane to a point, the
//! sampled world positions of a lane, and which lanes feed into it.

use anyhow::{Context, Result};
use ordered_float::OrderedFloat;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use std::collections::HashMap;

use super::types::{LaneId, Position};

pub trait LaneMap {
    fn closest_lane(&self, point: &Position) -> Option<LaneId>;

    /// World-space samples along the lane in driving order
    fn lane_positions(&self, lane: LaneId) -> Option<&[Position]>;

    /// Lanes whose end connects to the start of `lane`
    fn predecessors(&self, lane: LaneId) -> Vec<LaneId>;
}

/// Lane graph backed by a petgraph directed graph (edge = "flows into")
#[derive(Default)]
pub struct SimLaneMap {
    graph: DiGraph<LaneId, ()>,
    lane_to_node: HashMap<LaneId, NodeIndex>,
    samples: HashMap<LaneId, Vec<Position>>,
    next_id: usize,
}

impl SimLaneMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a lane through the given samples; a lane needs at least two
    pub fn add_lane(&mut self, samples: Vec<Position>) -> Result<LaneId> {
        if samples.len() < 2 {
            anyhow::bail!("A lane needs at least two samples, got {}", samples.len());
        }
        let id = LaneId(self.next_id);
        self.next_id += 1;
        let node = self.graph.add_node(id);
        self.lane_to_node.insert(id, node);
        self.samples.insert(id, samples);
        Ok(id)
    }

    /// Record that traffic on `from` continues onto `to`
    pub fn connect(&mut self, from: LaneId, to: LaneId) -> Result<()> {
        let from_node = *self
            .lane_to_node
            .get(&from)
            .context("Source lane not found")?;
        let to_node = *self
            .lane_to_node
            .get(&to)
            .context("Target lane not found")?;
        self.graph.update_edge(from_node, to_node, ());
        Ok(())
    }

    pub fn lane_count(&self) -> usize {
        self.graph.node_count()
    }
}

/// Distance from `point` to the segment `a`-`b`
fn distance_to_segment(point: &Position, a: &Position, b: &Position) -> f32 {
    let (abx, aby, abz) = (b.x - a.x, b.y - a.y, b.z - a.z);
    let len_sq = abx * abx + aby * aby + abz * abz;
    if len_sq == 0.0 {
        return point.distance(a);
    }
    let t = ((point.x - a.x) * abx + (point.y - a.y) * aby + (point.z - a.z) * abz) / len_sq;
    let t = t.clamp(0.0, 1.0);
    let projected = Position::new(a.x + abx * t, a.y + aby * t, a.z + abz * t);
    point.distance(&projected)
}

impl LaneMap for SimLaneMap {
    fn closest_lane(&self, point: &Position) -> Option<LaneId> {
        self.samples
            .iter()
            .map(|(id, samples)| {
                let dist = samples
                    .windows(2)
                    .map(|w| OrderedFloat(distance_to_segment(point, &w[0], &w[1])))
                    .min()
                    .unwrap_or(OrderedFloat(f32::MAX));
                (dist, *id)
            })
            .min()
            .map(|(_, id)| id)
    }

    fn lane_positions(&self, lane: LaneId) -> Option<&[Position]> {
        self.samples.get(&lane).map(|s| s.as_slice())
    }

    fn predecessors(&self, lane: LaneId) -> Vec<LaneId> {
        let Some(node) = self.lane_to_node.get(&lane) else {
            return Vec::new();
        };
        self.graph
            .neighbors_directed(*node, Direction::Incoming)
            .map(|n| self.graph[n])
            .collect()
    }
}
