//! The engine's mutable cell state in either rearrangement mode.

use crate::config::{AgentConfig, AppConfig, EngineMode};
use crate::lattice::Grid;
use crate::systems::stats::{census_agents, census_lattice, Census};
use embryogen_data::{Agent, CellType};
use rand::Rng;
use std::f64::consts::TAU;

#[derive(Clone, Debug)]
pub enum Tissue {
    Lattice(Grid),
    Agents(Vec<Agent>),
}

impl Tissue {
    /// Starting configuration for `config.world.mode`: a small central
    /// cluster of undifferentiated cells inside a sparse placenta ring.
    pub fn seeded(config: &AppConfig, rng: &mut impl Rng) -> Self {
        match config.world.mode {
            EngineMode::Lattice => {
                Tissue::Lattice(Grid::seeded(config.world.lattice_size, &config.lattice, rng))
            }
            EngineMode::OffLattice => Tissue::Agents(seed_agents(
                &config.agents,
                config.world.area_width,
                config.world.area_height,
                rng,
            )),
        }
    }

    pub fn mode(&self) -> EngineMode {
        match self {
            Tissue::Lattice(_) => EngineMode::Lattice,
            Tissue::Agents(_) => EngineMode::OffLattice,
        }
    }

    /// Occupied sites or agents.
    pub fn population(&self) -> usize {
        match self {
            Tissue::Lattice(grid) => grid.size() * grid.size() - grid.volume(CellType::Empty),
            Tissue::Agents(agents) => agents.len(),
        }
    }

    pub fn contains(&self, cell: CellType) -> bool {
        match self {
            Tissue::Lattice(grid) => grid.volume(cell) > 0,
            Tissue::Agents(agents) => agents.iter().any(|a| a.cell_type == cell),
        }
    }

    pub fn census(&self) -> Census {
        match self {
            Tissue::Lattice(grid) => census_lattice(grid),
            Tissue::Agents(agents) => census_agents(agents),
        }
    }
}

/// Initial agents: `initial_agents` embryo cells uniform in a disc of
/// `seed_radius` around the center, then `placenta_agents` placenta cells
/// uniform in the ring between `0.32` and `0.42` of the shorter side.
pub fn seed_agents(config: &AgentConfig, width: f64, height: f64, rng: &mut impl Rng) -> Vec<Agent> {
    let (cx, cy) = (width / 2.0, height / 2.0);
    let extent = width.min(height);
    let mut agents = Vec::with_capacity(config.initial_agents + config.placenta_agents);

    for _ in 0..config.initial_agents {
        let angle = rng.gen::<f64>() * TAU;
        let r = config.seed_radius * rng.gen::<f64>().sqrt();
        agents.push(Agent::new(cx + r * angle.cos(), cy + r * angle.sin(), CellType::Embryo));
    }

    let (inner, outer) = (0.32 * extent, 0.42 * extent);
    for _ in 0..config.placenta_agents {
        let angle = rng.gen::<f64>() * TAU;
        let r = inner + (outer - inner) * rng.gen::<f64>();
        agents.push(Agent::new(cx + r * angle.cos(), cy + r * angle.sin(), CellType::Placenta));
    }
    agents
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_seed_agents_layout() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let config = AgentConfig::default();
        let agents = seed_agents(&config, 600.0, 600.0, &mut rng);
        assert_eq!(agents.len(), 800);
        for a in &agents {
            let d = a.distance_to(300.0, 300.0);
            match a.cell_type {
                CellType::Embryo => assert!(d <= 25.0),
                CellType::Placenta => assert!((192.0..=252.0).contains(&d)),
                other => panic!("unexpected {other}"),
            }
        }
    }

    #[test]
    fn test_seeded_tissue_matches_mode() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let lattice = Tissue::seeded(&AppConfig::default(), &mut rng);
        assert_eq!(lattice.mode(), EngineMode::Lattice);
        assert!(lattice.contains(CellType::Embryo));
        assert!(lattice.population() > 49);

        let agents = Tissue::seeded(&AppConfig::for_mode(EngineMode::OffLattice), &mut rng);
        assert_eq!(agents.mode(), EngineMode::OffLattice);
        assert_eq!(agents.population(), 800);
        assert!(agents.contains(CellType::Placenta));
        assert_eq!(agents.census().types_present.len(), 2);
    }
}
