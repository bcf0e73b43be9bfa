use super::SimulationEngine;
use crate::adhesion::AdhesionMatrix;
use crate::clock::SimulationClock;
use crate::config::{AppConfig, EngineMode};
use crate::error::{EngineError, Result};
use crate::metrics::Metrics;
use crate::morphogen::MorphogenField;
use crate::snapshot::EngineSnapshot;
use crate::spatial_hash::SpatialHash;
use crate::template::Frame;
use crate::tissue::Tissue;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::BTreeMap;

impl SimulationEngine {
    /// Builds an engine and seeds its starting tissue.
    ///
    /// Without a configured seed one is drawn from entropy; either way the
    /// seed is kept so that [`SimulationEngine::reset`] replays the run.
    pub fn new(config: AppConfig) -> Result<Self> {
        config
            .validate()
            .map_err(|e| EngineError::invalid_config(e.to_string()))?;

        let seed = config.world.seed.unwrap_or_else(rand::random);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let tissue = Tissue::seeded(&config, &mut rng);

        let (frame, morphogen_size) = match config.world.mode {
            EngineMode::Lattice => (
                Frame::for_lattice(config.world.lattice_size),
                config.world.lattice_size,
            ),
            EngineMode::OffLattice => (
                Frame::for_area(config.world.area_width, config.world.area_height),
                config.agents.morphogen_resolution,
            ),
        };

        let engine = Self {
            params: config.parameters(),
            seed,
            rng,
            clock: SimulationClock::new(),
            morphogens: MorphogenField::new(morphogen_size),
            tissue,
            adhesion: AdhesionMatrix::from_config(&config.adhesion),
            spatial_hash: SpatialHash::new(
                config.agents.bucket_size,
                config.world.area_width,
                config.world.area_height,
            ),
            frame,
            organ_onsets: BTreeMap::new(),
            metrics: Metrics::new(config.logging.report_interval),
            cap_reported: false,
            config,
        };
        engine.log_start();
        Ok(engine)
    }

    /// Restores the starting configuration and zeroes the clock. Live
    /// parameters keep their current values.
    pub fn reset(&mut self) -> EngineSnapshot {
        self.rng = ChaCha8Rng::seed_from_u64(self.seed);
        self.clock.reset();
        self.tissue = Tissue::seeded(&self.config, &mut self.rng);
        self.morphogens = MorphogenField::new(self.morphogens.size());
        self.organ_onsets.clear();
        self.metrics = Metrics::new(self.config.logging.report_interval);
        self.cap_reported = false;
        self.log_start();
        self.snapshot()
    }

    /// Replaces the seed and resets.
    pub fn reseed(&mut self, seed: u64) -> EngineSnapshot {
        self.seed = seed;
        self.reset()
    }

    fn log_start(&self) {
        tracing::info!(
            seed = self.seed,
            mode = ?self.mode(),
            population = self.tissue.population(),
            fingerprint = %self.config.fingerprint(),
            "Simulation reset"
        );
    }
}
