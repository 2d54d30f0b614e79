// Label-setting alternative to the propagation protocol. Computes exact
// single-source costs in one shot instead of converging over simulation
// steps. Not wired into the per-step loop; callers splice the result into
// route tables themselves.

use crate::graph::{Graph, NodeId, Route};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, BinaryHeap};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathNode {
    pub cost: f64,
    pub predecessor: Option<NodeId>,
}

#[derive(Debug, Clone, Copy)]
struct HeapEntry {
    cost: f64,
    node: NodeId,
    predecessor: Option<NodeId>,
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cost == other.cost && self.node == other.node
    }
}

impl Eq for HeapEntry {}

impl Ord for HeapEntry {
    // Reversed so the std max-heap pops the cheapest entry first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Dijkstra over the arena from one source. Connections whose raw Euclidean
/// length exceeds `max_edge_length` are skipped entirely (a transmission
/// range limit, and a cheap sparsifier on dense meshes). `cost_offset` is a
/// fixed calibration constant subtracted per traversed edge.
pub fn shortest_paths(
    graph: &Graph,
    source: NodeId,
    max_edge_length: f64,
    cost_offset: f64,
) -> BTreeMap<NodeId, PathNode> {
    let mut settled: BTreeMap<NodeId, PathNode> = BTreeMap::new();
    let mut heap = BinaryHeap::new();
    heap.push(HeapEntry {
        cost: 0.0,
        node: source,
        predecessor: None,
    });

    while let Some(entry) = heap.pop() {
        if settled.contains_key(&entry.node) {
            continue;
        }
        settled.insert(
            entry.node,
            PathNode {
                cost: entry.cost,
                predecessor: entry.predecessor,
            },
        );

        let node = &graph.nodes[entry.node];
        for (&neighbor, &cid) in &node.connections {
            if settled.contains_key(&neighbor) {
                continue;
            }
            let length = node.pos.distance(graph.nodes[neighbor].pos);
            if length > max_edge_length {
                continue;
            }
            heap.push(HeapEntry {
                cost: entry.cost + graph.connections[cid].cost - cost_offset,
                node: neighbor,
                predecessor: Some(entry.node),
            });
        }
    }

    settled
}

/// Turn a search rooted at an endpoint into per-node Route records. The
/// predecessor on the path back toward the endpoint becomes the route
/// source, so the records drop straight into `Node::routes`.
pub fn routes_toward(
    endpoint: NodeId,
    paths: &BTreeMap<NodeId, PathNode>,
) -> BTreeMap<NodeId, Route> {
    paths
        .iter()
        .map(|(&id, path)| {
            (
                id,
                Route {
                    source: path.predecessor.unwrap_or(id),
                    endpoint,
                    cost: path.cost,
                },
            )
        })
        .collect()
}

/// Every node reachable from `start` over any connection. Explicit stack
/// instead of recursion, large meshes would blow the call stack otherwise.
pub fn reachable_from(graph: &Graph, start: NodeId) -> BTreeSet<NodeId> {
    let mut visited = BTreeSet::new();
    let mut stack = vec![start];
    while let Some(id) = stack.pop() {
        if !visited.insert(id) {
            continue;
        }
        for &neighbor in graph.nodes[id].connections.keys() {
            if !visited.contains(&neighbor) {
                stack.push(neighbor);
            }
        }
    }
    visited
}
