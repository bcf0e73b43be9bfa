//! The simulation engine: owns every piece of state and sequences the
//! systems once per tick.

mod init;
mod update;

use crate::adhesion::AdhesionMatrix;
use crate::clock::SimulationClock;
use crate::config::{AppConfig, EngineMode, Parameters};
use crate::error::Result;
use crate::metrics::Metrics;
use crate::morphogen::MorphogenField;
use crate::snapshot::{EngineSnapshot, TissueSnapshot};
use crate::spatial_hash::SpatialHash;
use crate::systems::stats::Census;
use crate::template::{AnatomicalTemplate, Frame};
use crate::tissue::Tissue;
use embryogen_data::{CellType, Stage};
use rand_chacha::ChaCha8Rng;
use std::collections::BTreeMap;

pub use update::TickReport;

pub struct SimulationEngine {
    config: AppConfig,
    params: Parameters,
    seed: u64,
    rng: ChaCha8Rng,
    clock: SimulationClock,
    morphogens: MorphogenField,
    tissue: Tissue,
    adhesion: AdhesionMatrix,
    spatial_hash: SpatialHash,
    frame: Frame,
    organ_onsets: BTreeMap<CellType, u64>,
    metrics: Metrics,
    cap_reported: bool,
}

impl SimulationEngine {
    /// Changes a live knob. Takes effect on the next tick.
    pub fn set_parameter(&mut self, name: &str, value: f64) -> Result<()> {
        self.params.set(name, value)?;
        tracing::debug!(name, value, "Parameter changed");
        Ok(())
    }

    pub fn parameter(&self, name: &str) -> Result<f64> {
        self.params.get(name)
    }

    pub fn parameters(&self) -> &Parameters {
        &self.params
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn mode(&self) -> EngineMode {
        self.tissue.mode()
    }

    /// Seed the current run was started from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn iteration(&self) -> u64 {
        self.clock.iteration()
    }

    pub fn week(&self) -> u32 {
        self.clock.week()
    }

    pub fn stage(&self) -> Stage {
        self.clock.stage()
    }

    pub fn morphogens(&self) -> &MorphogenField {
        &self.morphogens
    }

    pub fn tissue(&self) -> &Tissue {
        &self.tissue
    }

    /// Template for the current week, placed on this engine's tissue.
    pub fn template(&self) -> AnatomicalTemplate {
        AnatomicalTemplate::for_week(self.week(), &self.frame)
    }

    pub fn census(&self) -> Census {
        self.tissue.census()
    }

    /// Iteration at which each organ type first appeared.
    pub fn organ_onsets(&self) -> &BTreeMap<CellType, u64> {
        &self.organ_onsets
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Owned copy of the state for renderers and tests.
    pub fn snapshot(&self) -> EngineSnapshot {
        let tissue = match &self.tissue {
            Tissue::Lattice(grid) => TissueSnapshot::Lattice {
                size: grid.size(),
                cells: grid.cells().to_vec(),
            },
            Tissue::Agents(agents) => TissueSnapshot::Agents {
                agents: agents.clone(),
            },
        };
        EngineSnapshot {
            mode: self.mode(),
            seed: self.seed,
            iteration: self.iteration(),
            week: self.week(),
            stage: self.stage(),
            parameters: self.params,
            census: self.census(),
            tissue,
        }
    }
}
