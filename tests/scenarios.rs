// End-to-end runs over the fixed five-point topology.

use driftmesh::graph::builder::graph_from_points;
use driftmesh::prelude::*;

fn fixed_points() -> Vec<Point> {
    vec![
        Point::new(5.0, -1.0),
        Point::new(0.0, -2.0),
        Point::new(2.0, 4.0),
        Point::new(-1.0, 3.0),
        Point::new(-3.0, 5.0),
    ]
}

fn single_step_config() -> SimConfig {
    SimConfig {
        steps: 1,
        wiggle: 0.01,
        move_strength: 0.01,
        transmit_from_endpoints: false,
        ..Default::default()
    }
}

#[test]
fn one_step_with_two_endpoints() {
    let graph = graph_from_points(fixed_points(), 2, None).unwrap();
    let before: Vec<Point> = graph.nodes.iter().map(|n| n.pos).collect();

    let mut sim = Simulation::new(graph, single_step_config());
    sim.step();

    for node in &sim.graph.nodes {
        if node.endpoint {
            assert_eq!(node.pos, before[node.id]);
        } else {
            // Learned at least one route, and from a direct neighbor.
            assert!(!node.routes.is_empty());
            for route in node.routes.values() {
                assert!(node.connections.contains_key(&route.source));
            }
        }
    }
}

#[test]
fn no_endpoints_means_nothing_ever_moves() {
    let graph = graph_from_points(fixed_points(), 0, None).unwrap();
    let before: Vec<Point> = graph.nodes.iter().map(|n| n.pos).collect();

    let mut sim = Simulation::new(graph, single_step_config().with_steps(20));
    for _ in 0..20 {
        sim.step();
    }

    for node in &sim.graph.nodes {
        assert!(node.routes.is_empty());
        assert_eq!(node.pos, before[node.id]);
    }
}

#[test]
fn runs_are_deterministic_for_a_fixed_seed() {
    let topology = TopologyConfig {
        nodes: 12,
        endpoints: 3,
        ..Default::default()
    };

    let mut positions = Vec::new();
    for _ in 0..2 {
        use rand::SeedableRng;
        let mut rng = rand::rngs::StdRng::seed_from_u64(42);
        let graph = random_graph(&topology, &mut rng).unwrap();
        let mut sim = Simulation::new(graph, single_step_config().with_steps(25));
        for _ in 0..25 {
            sim.step();
        }
        positions.push(
            sim.graph
                .nodes
                .iter()
                .map(|n| (n.pos.x, n.pos.y))
                .collect::<Vec<_>>(),
        );
    }
    assert_eq!(positions[0], positions[1]);
}

#[test]
fn exact_engine_substitutes_for_the_protocol() {
    // Splice the engine's output into the route tables and check the
    // optimizer sees the same source structure the protocol would build.
    let mut graph = graph_from_points(fixed_points(), 1, None).unwrap();
    let paths = shortest_paths(&graph, 0, f64::INFINITY, 0.0);
    let routes = driftmesh::routing::routes_toward(0, &paths);
    for (id, route) in routes {
        graph.nodes[id].routes.insert(0, route);
    }

    let mut reference = graph_from_points(fixed_points(), 1, None).unwrap();
    driftmesh::routing::propagate_to_fixed_point(&mut reference, false, 50);

    for (node, reference_node) in graph.nodes.iter().zip(&reference.nodes) {
        let spliced = node.routes[&0];
        let learned = reference_node.routes[&0];
        assert!((spliced.cost - learned.cost).abs() < 1e-9);
        assert_eq!(spliced.endpoint, learned.endpoint);
    }
}
