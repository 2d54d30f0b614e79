pub mod shortest_path;

pub use shortest_path::{PathNode, reachable_from, routes_toward, shortest_paths};

use crate::graph::{Graph, NodeId, Route};

/// One synchronous round of route exchange. Every node offers each entry of
/// its table to every neighbor in its propagation set, with the link cost
/// added on top. Candidates are built from a snapshot of the tables taken at
/// the start of the round, so nothing a node learns mid-round leaks back
/// into the same round.
///
/// This is deliberately one round, not a fixed-point loop: convergence
/// emerges across simulation steps while the nodes keep moving.
pub fn propagation_step(graph: &mut Graph, transmit_from_endpoints: bool) {
    let tables: Vec<Vec<Route>> = graph
        .nodes
        .iter()
        .map(|node| {
            if node.endpoint && !transmit_from_endpoints {
                // Endpoints still advertise themselves, they just never
                // relay routes learned from elsewhere.
                node.routes
                    .values()
                    .filter(|r| r.endpoint == node.id)
                    .copied()
                    .collect()
            } else {
                node.routes.values().copied().collect()
            }
        })
        .collect();

    for sender in 0..graph.nodes.len() {
        if tables[sender].is_empty() {
            continue;
        }
        let neighbors = graph.nodes[sender].propagation.clone();
        for target in neighbors {
            let Some(link_cost) = graph.connection_cost(sender, target) else {
                continue;
            };
            for route in &tables[sender] {
                graph.nodes[target].accept_route(Route {
                    source: sender,
                    endpoint: route.endpoint,
                    cost: route.cost + link_cost,
                });
            }
        }
    }
}

/// Run the protocol with static positions until the tables stop changing or
/// `max_rounds` is hit. Handy for verification against the exact engine; the
/// simulation itself never does this.
pub fn propagate_to_fixed_point(
    graph: &mut Graph,
    transmit_from_endpoints: bool,
    max_rounds: usize,
) -> usize {
    for round in 0..max_rounds {
        let before: Vec<Vec<(NodeId, Route)>> = graph
            .nodes
            .iter()
            .map(|n| n.routes.iter().map(|(&e, &r)| (e, r)).collect())
            .collect();
        propagation_step(graph, transmit_from_endpoints);
        let unchanged = graph
            .nodes
            .iter()
            .zip(&before)
            .all(|(n, prev)| n.routes.iter().map(|(&e, &r)| (e, r)).eq(prev.iter().copied()));
        if unchanged {
            return round + 1;
        }
    }
    max_rounds
}
