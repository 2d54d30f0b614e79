// Topology provider. Builds the full-mesh arena from literal or random
// points; everything downstream only mutates route tables and positions.

use super::{Connection, Graph, Node, Point};
use anyhow::{Result, bail};
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopologyConfig {
    pub nodes: usize,
    pub endpoints: usize,
    pub node_domain: (f64, f64),
    pub endpoint_domain: Option<(f64, f64)>,
    pub max_connections: Option<usize>,
}

impl Default for TopologyConfig {
    fn default() -> Self {
        Self {
            nodes: 5,
            endpoints: 2,
            node_domain: (-20.0, 20.0),
            endpoint_domain: None,
            max_connections: None,
        }
    }
}

/// Full mesh over the given points. The first `endpoints` nodes become
/// endpoints and are seeded with their self-route. When a connection cap is
/// set, each non-endpoint node's propagation set is narrowed to its cheapest
/// K connections here and never re-sorted afterward.
pub fn graph_from_points(
    points: Vec<Point>,
    endpoints: usize,
    max_connections: Option<usize>,
) -> Result<Graph> {
    if endpoints > points.len() {
        bail!(
            "endpoint count ({}) cannot exceed node count ({})",
            endpoints,
            points.len()
        );
    }

    let mut nodes: Vec<Node> = points
        .iter()
        .enumerate()
        .map(|(id, &pos)| Node::new(id, pos))
        .collect();

    let mut connections = Vec::new();
    for i in 0..points.len() {
        for j in (i + 1)..points.len() {
            let cid = connections.len();
            connections.push(Connection {
                a: i,
                b: j,
                cost: points[i].distance_squared(points[j]),
            });
            nodes[i].connections.insert(j, cid);
            nodes[j].connections.insert(i, cid);
        }
    }

    for node in nodes.iter_mut().take(endpoints) {
        node.make_endpoint();
    }

    for node in nodes.iter_mut() {
        node.propagation = match max_connections {
            Some(cap) if !node.endpoint => {
                let mut by_cost: Vec<(f64, usize)> = node
                    .connections
                    .iter()
                    .map(|(&neighbor, &cid)| (connections[cid].cost, neighbor))
                    .collect();
                by_cost.sort_by(|x, y| x.0.total_cmp(&y.0));
                by_cost.truncate(cap);
                by_cost.into_iter().map(|(_, neighbor)| neighbor).collect()
            }
            _ => node.connections.keys().copied().collect(),
        };
    }

    Ok(Graph { nodes, connections })
}

/// Random topology. The rng is threaded in explicitly so runs stay
/// reproducible, there is no hidden process-wide seed.
pub fn random_graph(config: &TopologyConfig, rng: &mut impl Rng) -> Result<Graph> {
    validate_domain("node domain", config.node_domain)?;
    if let Some(domain) = config.endpoint_domain {
        validate_domain("endpoint domain", domain)?;
    }

    let (lo, hi) = config.node_domain;
    let points = (0..config.nodes)
        .map(|_| Point::new(rng.gen_range(lo..hi), rng.gen_range(lo..hi)))
        .collect();

    let mut graph = graph_from_points(points, config.endpoints, config.max_connections)?;

    // Endpoints can be pinned into their own region. Done after the mesh is
    // built, so connection costs need one refresh.
    if let Some((elo, ehi)) = config.endpoint_domain {
        for node in graph.nodes.iter_mut().filter(|n| n.endpoint) {
            node.pos = Point::new(rng.gen_range(elo..ehi), rng.gen_range(elo..ehi));
        }
        graph.refresh_costs();
    }

    Ok(graph)
}

fn validate_domain(name: &str, (lo, hi): (f64, f64)) -> Result<()> {
    if lo >= hi {
        bail!("{name} lower bound ({lo}) must be strictly less than upper bound ({hi})");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn full_mesh_connection_count() {
        let points = (0..6).map(|i| Point::new(i as f64, 0.0)).collect();
        let graph = graph_from_points(points, 2, None).unwrap();
        assert_eq!(graph.connections.len(), 15);
        for node in &graph.nodes {
            assert_eq!(node.connections.len(), 5);
            assert_eq!(node.propagation.len(), 5);
        }
    }

    #[test]
    fn too_many_endpoints_is_an_error() {
        let points = vec![Point::ZERO, Point::new(1.0, 0.0)];
        assert!(graph_from_points(points, 3, None).is_err());
    }

    #[test]
    fn inverted_domain_is_an_error() {
        let config = TopologyConfig {
            node_domain: (5.0, 5.0),
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(0);
        assert!(random_graph(&config, &mut rng).is_err());
    }

    #[test]
    fn connection_cap_keeps_cheapest_neighbors() {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(2.0, 0.0),
            Point::new(10.0, 0.0),
        ];
        let graph = graph_from_points(points, 0, Some(2)).unwrap();
        // Node 0's two cheapest neighbors are 1 and 2, in cost order.
        assert_eq!(graph.nodes[0].propagation, vec![1, 2]);
        assert_eq!(graph.nodes[0].connections.len(), 3);
    }

    #[test]
    fn endpoints_keep_full_propagation_under_cap() {
        let points = (0..5).map(|i| Point::new(i as f64, 0.0)).collect();
        let graph = graph_from_points(points, 1, Some(1)).unwrap();
        assert_eq!(graph.nodes[0].propagation.len(), 4);
        assert_eq!(graph.nodes[1].propagation.len(), 1);
    }

    #[test]
    fn random_graph_is_reproducible() {
        let config = TopologyConfig::default();
        let a = random_graph(&config, &mut StdRng::seed_from_u64(7)).unwrap();
        let b = random_graph(&config, &mut StdRng::seed_from_u64(7)).unwrap();
        for (na, nb) in a.nodes.iter().zip(&b.nodes) {
            assert_eq!(na.pos, nb.pos);
        }
    }

    #[test]
    fn endpoint_domain_repositions_endpoints() {
        let config = TopologyConfig {
            nodes: 8,
            endpoints: 3,
            endpoint_domain: Some((100.0, 101.0)),
            ..Default::default()
        };
        let graph = random_graph(&config, &mut StdRng::seed_from_u64(1)).unwrap();
        for node in graph.nodes.iter().filter(|n| n.endpoint) {
            assert!(node.pos.x >= 100.0 && node.pos.x < 101.0);
            assert!(node.pos.y >= 100.0 && node.pos.y < 101.0);
        }
        // Costs were refreshed after the reposition.
        let c = graph.connection_between(0, 1).unwrap();
        let expected = graph.nodes[0].pos.distance_squared(graph.nodes[1].pos);
        assert!((c.cost - expected).abs() < 1e-9);
    }
}
