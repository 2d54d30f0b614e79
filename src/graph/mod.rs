pub mod builder;

pub use builder::TopologyConfig;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub type NodeId = usize;
pub type ConnectionId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_squared(&self, other: Point) -> f64 {
        (self.x - other.x).powi(2) + (self.y - other.y).powi(2)
    }

    pub fn distance(&self, other: Point) -> f64 {
        self.distance_squared(other).sqrt()
    }
}

/// Undirected edge between two nodes. `cost` is the squared Euclidean
/// distance between the endpoints' current positions and must be refreshed
/// after every move phase, a connection with a stale cost is never valid.
#[derive(Debug, Clone, Copy)]
pub struct Connection {
    pub a: NodeId,
    pub b: NodeId,
    pub cost: f64,
}

/// A node's best known path toward one endpoint. `source` is the neighbor
/// that reported it (the next hop). An endpoint's self-route has
/// source == endpoint == own id and cost 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub source: NodeId,
    pub endpoint: NodeId,
    pub cost: f64,
}

#[derive(Debug, Clone)]
pub struct Node {
    pub id: NodeId,
    pub pos: Point,
    pub endpoint: bool,
    /// Full adjacency, neighbor id -> connection index in the arena.
    pub connections: BTreeMap<NodeId, ConnectionId>,
    /// Neighbors this node actually sends to. Either the full adjacency or
    /// the cheapest-K subset picked at construction time (never re-sorted).
    pub propagation: Vec<NodeId>,
    /// At most one route per endpoint id.
    pub routes: BTreeMap<NodeId, Route>,
}

impl Node {
    pub fn new(id: NodeId, pos: Point) -> Self {
        Self {
            id,
            pos,
            endpoint: false,
            connections: BTreeMap::new(),
            propagation: Vec::new(),
            routes: BTreeMap::new(),
        }
    }

    pub fn make_endpoint(&mut self) {
        self.endpoint = true;
        self.routes.insert(
            self.id,
            Route {
                source: self.id,
                endpoint: self.id,
                cost: 0.0,
            },
        );
    }

    /// Conflict resolution for an incoming candidate route. The candidate
    /// replaces the stored route when there is none yet, when it is strictly
    /// cheaper, or when it comes from the same source we already rely on.
    /// The last rule is what keeps the protocol honest once nodes drift
    /// apart: the authoritative sender must be able to raise its cost.
    pub fn accept_route(&mut self, candidate: Route) -> bool {
        if let Some(current) = self.routes.get(&candidate.endpoint) {
            if candidate.cost >= current.cost && candidate.source != current.source {
                return false;
            }
        }
        self.routes.insert(candidate.endpoint, candidate);
        true
    }

    /// Distinct immediate neighbors the current route table arrives through.
    pub fn route_sources(&self) -> Vec<NodeId> {
        let mut sources: Vec<NodeId> = self.routes.values().map(|r| r.source).collect();
        sources.sort_unstable();
        sources.dedup();
        sources
    }
}

/// The whole topology as an arena. Connections store node ids instead of
/// node handles, so there are no ownership cycles and snapshotting a route
/// table is a plain clone of small value structs.
#[derive(Debug, Clone)]
pub struct Graph {
    pub nodes: Vec<Node>,
    pub connections: Vec<Connection>,
}

impl Graph {
    pub fn connection_between(&self, a: NodeId, b: NodeId) -> Option<&Connection> {
        self.nodes[a]
            .connections
            .get(&b)
            .map(|&cid| &self.connections[cid])
    }

    pub fn connection_cost(&self, a: NodeId, b: NodeId) -> Option<f64> {
        self.connection_between(a, b).map(|c| c.cost)
    }

    /// Recompute every connection cost from the current positions. Runs as
    /// the last phase of a simulation step, after all moves are applied.
    pub fn refresh_costs(&mut self) {
        let Graph { nodes, connections } = self;
        for conn in connections.iter_mut() {
            conn.cost = nodes[conn.a].pos.distance_squared(nodes[conn.b].pos);
        }
    }
}
