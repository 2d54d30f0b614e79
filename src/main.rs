// Simulates a swarm of mobile relay nodes that learn routes toward fixed
// endpoints and drift, step by step, toward positions that make those
// routes cheaper.

use driftmesh::graph::builder::random_graph;
use driftmesh::graph::TopologyConfig;
use driftmesh::routing::shortest_paths;
use driftmesh::simulation::{SimConfig, Simulation};

use anyhow::Result;
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{Level, info};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full propagation + layout simulation
    Run {
        #[arg(short = 'n', long, default_value_t = 5)]
        nodes: usize,
        #[arg(short = 'e', long, default_value_t = 2)]
        endpoints: usize,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(short = 's', long, default_value_t = 1000)]
        steps: u32,
        #[arg(short = 'w', long, default_value_t = 0.01)]
        wiggle: f64,
        #[arg(short = 'm', long, default_value_t = 0.01)]
        move_strength: f64,
        #[arg(long, default_value_t = 5.0)]
        max_speed: f64,
        #[arg(long)]
        transmit_from_endpoints: bool,
        #[arg(long, num_args = 2, allow_hyphen_values = true, value_names = ["LO", "HI"],
              default_values_t = [-20.0, 20.0])]
        node_domain: Vec<f64>,
        #[arg(long, num_args = 2, allow_hyphen_values = true, value_names = ["LO", "HI"])]
        endpoint_domain: Option<Vec<f64>>,
        #[arg(short = 'c', long)]
        max_connections: Option<usize>,
        #[arg(long)]
        log_positions: Option<String>,
        #[arg(short = 'x', long)]
        export: bool,
    },

    /// Run the exact shortest-path engine once and print the result
    Paths {
        #[arg(short = 'n', long, default_value_t = 20)]
        nodes: usize,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, default_value_t = 0)]
        source: usize,
        #[arg(long, default_value_t = f64::INFINITY)]
        max_edge_length: f64,
        #[arg(long, default_value_t = 0.0)]
        offset: f64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Run {
            nodes,
            endpoints,
            seed,
            steps,
            wiggle,
            move_strength,
            max_speed,
            transmit_from_endpoints,
            node_domain,
            endpoint_domain,
            max_connections,
            log_positions,
            export,
        } => {
            let topology = TopologyConfig {
                nodes,
                endpoints,
                node_domain: as_domain(&node_domain),
                endpoint_domain: endpoint_domain.as_deref().map(as_domain),
                max_connections,
            };
            let mut rng = seeded_rng(seed);
            let graph = random_graph(&topology, &mut rng)?;

            let config = SimConfig {
                name: format!("sim_n{}_e{}", nodes, endpoints),
                steps,
                wiggle,
                move_strength,
                max_speed,
                transmit_from_endpoints,
                log_positions,
                export,
            };

            let mut sim = Simulation::new(graph, config);
            sim.run()?;
        }

        Commands::Paths {
            nodes,
            seed,
            source,
            max_edge_length,
            offset,
        } => {
            let topology = TopologyConfig {
                nodes,
                endpoints: 1,
                ..Default::default()
            };
            let mut rng = seeded_rng(seed);
            let graph = random_graph(&topology, &mut rng)?;
            anyhow::ensure!(source < nodes, "source {} is not a valid node id", source);

            let paths = shortest_paths(&graph, source, max_edge_length, offset);
            info!(
                "{} of {} nodes reachable from {}",
                paths.len(),
                nodes,
                source
            );

            println!("{:>6} {:>12} {:>12}", "node", "cost", "via");
            for (id, path) in &paths {
                let via = path
                    .predecessor
                    .map(|p| p.to_string())
                    .unwrap_or_else(|| "-".to_string());
                println!("{:>6} {:>12.3} {:>12}", id, path.cost, via);
            }
        }
    }

    Ok(())
}

fn as_domain(values: &[f64]) -> (f64, f64) {
    // clap's num_args = 2 guarantees the length.
    (values[0], values[1])
}

fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
