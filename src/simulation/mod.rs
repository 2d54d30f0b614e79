pub mod config;
pub use config::SimConfig;

use crate::export::{self, PositionLogger, SimulationReport};
use crate::graph::{Graph, NodeId, Point};
use crate::layout;
use crate::routing;
use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use tracing::info;

pub struct Simulation {
    pub graph: Graph,
    config: SimConfig,
}

impl Simulation {
    pub fn new(graph: Graph, config: SimConfig) -> Self {
        Self { graph, config }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// One simulation step in three phases: exchange routes, compute every
    /// move vector from that settled snapshot, then apply moves and refresh
    /// connection costs. Nothing a node does in a phase is visible to the
    /// others until the phase is over, so node order never matters.
    pub fn step(&mut self) {
        routing::propagation_step(&mut self.graph, self.config.transmit_from_endpoints);

        let graph = &self.graph;
        let config = &self.config;
        let moves: Vec<(NodeId, Point)> = graph
            .nodes
            .par_iter()
            .filter(|node| !node.endpoint)
            .map(|node| {
                (
                    node.id,
                    layout::find_move_direction(
                        graph,
                        node,
                        config.wiggle,
                        config.move_strength,
                        config.max_speed,
                    ),
                )
            })
            .collect();

        for (id, direction) in moves {
            let node = &mut self.graph.nodes[id];
            node.pos.x += direction.x;
            node.pos.y += direction.y;
        }

        self.graph.refresh_costs();
    }

    pub fn run(&mut self) -> Result<()> {
        info!("Starting simulation: {}", self.config.name);
        info!(
            "Nodes: {}, endpoints: {}, steps: {}",
            self.graph.nodes.len(),
            self.graph.nodes.iter().filter(|n| n.endpoint).count(),
            self.config.steps
        );

        let mut logger = match &self.config.log_positions {
            Some(path) => Some(PositionLogger::new(path)?),
            None => None,
        };

        let pb = ProgressBar::new(self.config.steps as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.orange/yellow} {pos}/{len} steps")?
                .progress_chars("█▓░"),
        );

        for step in 0..self.config.steps {
            self.step();
            if let Some(logger) = logger.as_mut() {
                logger.log_step(step, &self.graph)?;
            }
            pb.inc(1);
        }
        pb.finish_with_message("Simulation complete");

        if self.config.export {
            self.save_results()?;
        }

        Ok(())
    }

    fn save_results(&self) -> Result<()> {
        let report = SimulationReport {
            name: self.config.name.clone(),
            steps: self.config.steps,
            nodes: export::node_views(&self.graph),
            links: export::link_views(&self.graph, self.config.transmit_from_endpoints),
        };

        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        std::fs::create_dir_all("results")?;
        let json_path = format!("results/{}_{}.json", self.config.name, timestamp);
        std::fs::write(&json_path, serde_json::to_string_pretty(&report)?)?;
        info!("Report saved to: {}", json_path);

        Ok(())
    }
}
