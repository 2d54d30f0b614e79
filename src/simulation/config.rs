use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    pub name: String,
    pub steps: u32,
    pub wiggle: f64,
    pub move_strength: f64,
    pub max_speed: f64,
    pub transmit_from_endpoints: bool,
    /// Write a per-step CSV of node positions when set.
    pub log_positions: Option<String>,
    /// Write a timestamped JSON report under results/ at the end.
    pub export: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            name: "default_sim".to_string(),
            steps: 1000,
            wiggle: 0.01,
            move_strength: 0.01,
            max_speed: 5.0,
            transmit_from_endpoints: false,
            log_positions: None,
            export: false,
        }
    }
}

impl SimConfig {
    pub fn with_steps(mut self, steps: u32) -> Self {
        self.steps = steps;
        self
    }

    pub fn with_transmit_from_endpoints(mut self, transmit: bool) -> Self {
        self.transmit_from_endpoints = transmit;
        self
    }
}
