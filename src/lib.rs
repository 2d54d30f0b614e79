pub mod graph;
pub mod routing;
pub mod layout;
pub mod export;
pub mod simulation;

pub use graph::{Connection, Graph, Node, Point, Route, TopologyConfig};
pub use simulation::{SimConfig, Simulation};

pub mod prelude {
    pub use crate::export::SimulationReport;
    pub use crate::graph::builder::{graph_from_points, random_graph};
    pub use crate::graph::{Graph, Node, Point, Route, TopologyConfig};
    pub use crate::routing::{propagation_step, shortest_paths};
    pub use crate::simulation::{SimConfig, Simulation};
}
