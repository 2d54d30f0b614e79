// Read-only views for whatever renders or archives a run. The core never
// draws anything itself; it hands positions and link strengths to the
// outside and is done.

use crate::graph::Graph;
use anyhow::Result;
use csv::Writer;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeView {
    pub id: usize,
    pub x: f64,
    pub y: f64,
    pub endpoint: bool,
}

/// One entry per distinct route source per node, for link-strength display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkView {
    pub from: usize,
    pub to: usize,
    pub cost: f64,
    pub strength: f64,
    pub alpha: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationReport {
    pub name: String,
    pub steps: u32,
    pub nodes: Vec<NodeView>,
    pub links: Vec<LinkView>,
}

pub fn node_views(graph: &Graph) -> Vec<NodeView> {
    graph
        .nodes
        .iter()
        .map(|node| NodeView {
            id: node.id,
            x: node.pos.x,
            y: node.pos.y,
            endpoint: node.endpoint,
        })
        .collect()
}

/// Links from each node to the neighbors its routes arrive through.
/// Strength is the reciprocal cost, so a zero-cost link (two nodes sitting
/// on top of each other) is skipped rather than divided by, and the global
/// minimum is clamped before normalization for the same reason.
pub fn link_views(graph: &Graph, transmit_from_endpoints: bool) -> Vec<LinkView> {
    let min_cost = graph
        .connections
        .iter()
        .map(|c| c.cost)
        .fold(f64::INFINITY, f64::min);
    let max_strength = 1.0 / min_cost.max(0.001);

    let mut links = Vec::new();
    for node in &graph.nodes {
        if node.endpoint && !transmit_from_endpoints {
            continue;
        }
        for source in node.route_sources() {
            if source == node.id {
                continue;
            }
            let Some(cost) = graph.connection_cost(node.id, source) else {
                continue;
            };
            if cost <= 0.0 {
                continue;
            }
            let strength = 1.0 / cost;
            links.push(LinkView {
                from: node.id,
                to: source,
                cost,
                strength,
                alpha: (strength / max_strength).powf(0.3).min(1.0),
            });
        }
    }
    links
}

#[derive(Debug, Serialize)]
struct PositionRecord {
    step: u32,
    id: usize,
    x: f64,
    y: f64,
    endpoint: bool,
}

pub struct PositionLogger {
    writer: Writer<File>,
}

impl PositionLogger {
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let writer = Writer::from_path(path)?;
        Ok(Self { writer })
    }

    pub fn log_step(&mut self, step: u32, graph: &Graph) -> Result<()> {
        for node in &graph.nodes {
            self.writer.serialize(PositionRecord {
                step,
                id: node.id,
                x: node.pos.x,
                y: node.pos.y,
                endpoint: node.endpoint,
            })?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
