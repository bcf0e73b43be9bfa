pub mod macros;

use embryogen_lib::model::config::{AppConfig, EngineMode};
use embryogen_lib::model::engine::SimulationEngine;
use embryogen_lib::model::state::Agent;

#[allow(dead_code)]
pub struct EngineBuilder {
    config: AppConfig,
    params: Vec<(&'static str, f64)>,
}

#[allow(dead_code)]
impl EngineBuilder {
    pub fn new(mode: EngineMode) -> Self {
        Self {
            config: AppConfig::for_mode(mode).with_seed(42),
            params: Vec::new(),
        }
    }

    pub fn lattice() -> Self {
        Self::new(EngineMode::Lattice)
    }

    pub fn off_lattice() -> Self {
        Self::new(EngineMode::OffLattice)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.world.seed = Some(seed);
        self
    }

    pub fn with_lattice_size(mut self, size: usize) -> Self {
        self.config.world.lattice_size = size;
        self
    }

    /// Initial embryo and placenta agent counts.
    pub fn with_agents(mut self, embryo: usize, placenta: usize) -> Self {
        self.config.agents.initial_agents = embryo;
        self.config.agents.placenta_agents = placenta;
        self
    }

    pub fn with_param(mut self, name: &'static str, value: f64) -> Self {
        self.params.push((name, value));
        self
    }

    pub fn with_config<F: FnOnce(&mut AppConfig)>(mut self, f: F) -> Self {
        f(&mut self.config);
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn build(self) -> SimulationEngine {
        let mut engine =
            SimulationEngine::new(self.config).expect("Failed to create engine in test builder");
        for (name, value) in self.params {
            engine
                .set_parameter(name, value)
                .expect("Unknown parameter in test builder");
        }
        engine
    }
}

/// Mean distance from each agent to its nearest neighbour (brute force).
#[allow(dead_code)]
pub fn mean_nearest_neighbor(agents: &[Agent]) -> f64 {
    if agents.len() < 2 {
        return 0.0;
    }
    let total: f64 = agents
        .iter()
        .enumerate()
        .map(|(i, a)| {
            agents
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != i)
                .map(|(_, b)| a.distance_to(b.x, b.y))
                .fold(f64::INFINITY, f64::min)
        })
        .sum();
    total / agents.len() as f64
}
