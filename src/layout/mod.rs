// Numerical-gradient layout pass. Each movable node nudges itself toward a
// position that scores better under `value_at`, using the routes it learned
// this step. Pure reads only; the driver applies the returned vectors in a
// separate batch.

use crate::graph::{Graph, Node, NodeId, Point};

/// Scalar proxy for how well-placed a node is: the summed squared distance
/// to each distinct neighbor currently feeding it routes, negated and scaled
/// by how many such neighbors there are. Uses the direct link cost to the
/// reporting neighbor, not the full cumulative route cost.
pub fn value_at(graph: &Graph, sources: &[NodeId], pos: Point) -> f64 {
    let total: f64 = sources
        .iter()
        .map(|&s| pos.distance_squared(graph.nodes[s].pos))
        .sum();
    -total * sources.len() as f64
}

/// Finite-difference move vector for one node. A node that hears routes
/// through fewer than two distinct neighbors is considered insufficiently
/// informed and stays put.
pub fn find_move_direction(
    graph: &Graph,
    node: &Node,
    wiggle: f64,
    move_strength: f64,
    max_speed: f64,
) -> Point {
    let sources = node.route_sources();
    if sources.len() < 2 {
        return Point::ZERO;
    }

    let current = value_at(graph, &sources, node.pos);
    let dx = value_at(graph, &sources, Point::new(node.pos.x + wiggle, node.pos.y)) - current;
    let dy = value_at(graph, &sources, Point::new(node.pos.x, node.pos.y + wiggle)) - current;

    // Axis-wise clamp, not a magnitude clamp.
    Point::new(
        (dx / wiggle * move_strength).clamp(-max_speed, max_speed),
        (dy / wiggle * move_strength).clamp(-max_speed, max_speed),
    )
}
