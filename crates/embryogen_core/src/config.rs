//! Configuration management for simulation parameters.
//!
//! This module provides strongly-typed configuration structures that map to
//! the `config.toml` file. Structural settings (mode, lattice size, agent
//! geometry) are fixed for the lifetime of an engine; the live knobs in
//! [`Parameters`] may be changed between ticks.
//!
//! ## Configuration Hierarchy
//!
//! 1. Default values (hardcoded in `Default` impls, per engine mode)
//! 2. `config.toml` file (overrides defaults)
//! 3. `Parameters::set` at runtime (live knobs only)
//!
//! ## Example `config.toml`
//!
//! ```toml
//! [world]
//! mode = "lattice"
//! seed = 42
//! lattice_size = 150
//!
//! [params]
//! temperature = 12.0
//! adhesion = 10.0
//! volume_constraint = 8.0
//! growth_rate = 0.2
//! differentiation_rate = 0.12
//! morphogen_diffusion = 0.6
//! adhesion_base = 0.2
//! speed = 1.0
//! ```

use crate::adhesion::{default_rules, AdhesionRule};
use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Which rearrangement model drives the tissue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EngineMode {
    /// Cellular Potts lattice with Monte-Carlo label swaps.
    #[default]
    Lattice,
    /// Agent-based tissue with force integration and division.
    OffLattice,
}

impl std::str::FromStr for EngineMode {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "lattice" | "grid" | "cpm" => Ok(EngineMode::Lattice),
            "off_lattice" | "offlattice" | "agents" => Ok(EngineMode::OffLattice),
            other => Err(EngineError::invalid_config(format!("unknown mode '{other}'"))),
        }
    }
}

/// Live simulation knobs, readable every tick and writable at any time.
///
/// No range validation is applied: the systems clamp where a value feeds a
/// division or an exponent.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Parameters {
    pub temperature: f64,
    /// Heterotypic contact cost on the lattice.
    pub adhesion: f64,
    /// Pairwise attraction scale for agents.
    pub adhesion_base: f64,
    pub volume_constraint: f64,
    pub growth_rate: f64,
    pub differentiation_rate: f64,
    pub morphogen_diffusion: f64,
    pub speed: f64,
}

impl Parameters {
    pub const NAMES: [&'static str; 8] = [
        "temperature",
        "adhesion",
        "adhesion_base",
        "volume_constraint",
        "growth_rate",
        "differentiation_rate",
        "morphogen_diffusion",
        "speed",
    ];

    pub fn for_mode(mode: EngineMode) -> Self {
        match mode {
            EngineMode::Lattice => Self {
                temperature: 12.0,
                adhesion: 10.0,
                adhesion_base: 0.2,
                volume_constraint: 8.0,
                growth_rate: 0.20,
                differentiation_rate: 0.12,
                morphogen_diffusion: 0.6,
                speed: 1.0,
            },
            EngineMode::OffLattice => Self {
                temperature: 1.0,
                adhesion: 10.0,
                adhesion_base: 0.2,
                volume_constraint: 8.0,
                growth_rate: 0.04,
                differentiation_rate: 0.08,
                morphogen_diffusion: 0.6,
                speed: 1.0,
            },
        }
    }

    pub fn get(&self, name: &str) -> Result<f64> {
        Ok(match name {
            "temperature" => self.temperature,
            "adhesion" => self.adhesion,
            "adhesion_base" => self.adhesion_base,
            "volume_constraint" => self.volume_constraint,
            "growth_rate" => self.growth_rate,
            "differentiation_rate" => self.differentiation_rate,
            "morphogen_diffusion" => self.morphogen_diffusion,
            "speed" => self.speed,
            other => return Err(EngineError::UnknownParameter(other.to_string())),
        })
    }

    /// Sets a knob by name. Any finite value is accepted.
    pub fn set(&mut self, name: &str, value: f64) -> Result<()> {
        if !value.is_finite() {
            return Err(EngineError::NonFiniteParameter {
                name: name.to_string(),
                value,
            });
        }
        let slot = match name {
            "temperature" => &mut self.temperature,
            "adhesion" => &mut self.adhesion,
            "adhesion_base" => &mut self.adhesion_base,
            "volume_constraint" => &mut self.volume_constraint,
            "growth_rate" => &mut self.growth_rate,
            "differentiation_rate" => &mut self.differentiation_rate,
            "morphogen_diffusion" => &mut self.morphogen_diffusion,
            "speed" => &mut self.speed,
            other => return Err(EngineError::UnknownParameter(other.to_string())),
        };
        *slot = value;
        Ok(())
    }

    /// Temperature as used in exponents: never below `1e-6`.
    #[inline]
    pub fn effective_temperature(&self) -> f64 {
        self.temperature.max(1e-6)
    }

    /// Blur sigma as used by the morphogen field: never below `0.1`.
    #[inline]
    pub fn effective_sigma(&self) -> f64 {
        self.morphogen_diffusion.max(0.1)
    }
}

impl Default for Parameters {
    fn default() -> Self {
        Self::for_mode(EngineMode::Lattice)
    }
}

/// World-level configuration: mode, seed and tissue dimensions.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct WorldConfig {
    pub mode: EngineMode,
    pub seed: Option<u64>,
    /// Edge length N of the N x N lattice.
    pub lattice_size: usize,
    pub area_width: f64,
    pub area_height: f64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            mode: EngineMode::Lattice,
            seed: None,
            lattice_size: 150,
            area_width: 600.0,
            area_height: 600.0,
        }
    }
}

/// Cellular Potts constants.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct LatticeConfig {
    /// Swap attempts per tick are `attempts_per_edge * N`.
    pub attempts_per_edge: usize,
    pub seed_radius: i32,
    /// Placenta ring bounds as fractions of N.
    pub placenta_inner: f64,
    pub placenta_outer: f64,
    pub placenta_density: f64,
    /// Target population per type is `volume_base + week * growth_rate * volume_slope`.
    pub volume_base: f64,
    pub volume_slope: f64,
    pub volume_scale: f64,
    pub same_type_bonus: f64,
    pub umbilical_probability: f64,
    /// Anchors are widened to at least this many sites on the lattice.
    pub min_anchor_radius: f64,
}

impl Default for LatticeConfig {
    fn default() -> Self {
        Self {
            attempts_per_edge: 5,
            seed_radius: 4,
            placenta_inner: 0.32,
            placenta_outer: 0.42,
            placenta_density: 0.35,
            volume_base: 40.0,
            volume_slope: 8.0,
            volume_scale: 2000.0,
            same_type_bonus: 1.5,
            umbilical_probability: 0.45,
            min_anchor_radius: 2.0,
        }
    }
}

/// Off-lattice agent constants.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct AgentConfig {
    pub initial_agents: usize,
    pub seed_radius: f64,
    pub placenta_agents: usize,
    pub max_population: usize,
    pub bucket_size: f64,
    pub preferred_distance: f64,
    pub repulsion: f64,
    pub adhesion_radius: f64,
    pub adhesion_falloff: f64,
    pub force_scale: f64,
    pub damping: f64,
    pub boundary_padding: f64,
    pub head_pull: f64,
    pub head_anchor_offset: f64,
    pub noise_scale: f64,
    pub crowding_radius: f64,
    pub crowding_capacity: f64,
    pub inheritance: f64,
    pub differentiation_tolerance: f64,
    pub umbilical_width: f64,
    pub umbilical_probability: f64,
    /// Edge length of the morphogen field laid over the area.
    pub morphogen_resolution: usize,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            initial_agents: 500,
            seed_radius: 25.0,
            placenta_agents: 300,
            max_population: 6000,
            bucket_size: 12.0,
            preferred_distance: 4.5,
            repulsion: 3.5,
            adhesion_radius: 18.0,
            adhesion_falloff: 14.0,
            force_scale: 0.2,
            damping: 0.85,
            boundary_padding: 4.0,
            head_pull: 0.2,
            head_anchor_offset: 70.0,
            noise_scale: 0.5,
            crowding_radius: 4.0,
            crowding_capacity: 8.0,
            inheritance: 0.95,
            differentiation_tolerance: 1.2,
            umbilical_width: 4.0,
            umbilical_probability: 0.4,
            morphogen_resolution: 150,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct MorphogenConfig {
    pub decay: f64,
}

impl Default for MorphogenConfig {
    fn default() -> Self {
        Self { decay: 0.94 }
    }
}

/// Declarative adhesion table: defaults plus explicit overrides.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct AdhesionConfig {
    pub same_type: f64,
    pub other_type: f64,
    pub overrides: Vec<AdhesionRule>,
}

impl Default for AdhesionConfig {
    fn default() -> Self {
        Self {
            same_type: 0.4,
            other_type: -0.05,
            overrides: default_rules(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    /// Ticks between summary log lines.
    pub report_interval: u64,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { report_interval: 7 }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub world: WorldConfig,
    /// Live knobs; `None` means the defaults of `world.mode`.
    pub params: Option<Parameters>,
    pub lattice: LatticeConfig,
    pub agents: AgentConfig,
    pub morphogen: MorphogenConfig,
    pub adhesion: AdhesionConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    pub fn for_mode(mode: EngineMode) -> Self {
        Self {
            world: WorldConfig {
                mode,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.world.seed = Some(seed);
        self
    }

    /// Initial live parameters for this configuration.
    pub fn parameters(&self) -> Parameters {
        self.params
            .unwrap_or_else(|| Parameters::for_mode(self.world.mode))
    }

    /// Validates the structural configuration.
    ///
    /// Live parameters are deliberately not checked here; the engine
    /// tolerates any finite value for them.
    pub fn validate(&self) -> anyhow::Result<()> {
        // World validation
        anyhow::ensure!(
            (8..=1000).contains(&self.world.lattice_size),
            "Lattice size must be in [8, 1000]"
        );
        anyhow::ensure!(
            self.world.area_width > 0.0 && self.world.area_width.is_finite(),
            "Area width must be positive"
        );
        anyhow::ensure!(
            self.world.area_height > 0.0 && self.world.area_height.is_finite(),
            "Area height must be positive"
        );

        // Lattice validation
        anyhow::ensure!(
            self.lattice.attempts_per_edge > 0,
            "Attempts per edge must be positive"
        );
        anyhow::ensure!(self.lattice.seed_radius >= 0, "Seed radius must be non-negative");
        anyhow::ensure!(
            self.lattice.placenta_inner < self.lattice.placenta_outer,
            "Placenta ring inner bound must be below outer bound"
        );
        anyhow::ensure!(
            (0.0..=1.0).contains(&self.lattice.placenta_density),
            "Placenta density must be in [0.0, 1.0]"
        );
        anyhow::ensure!(
            self.lattice.volume_scale > 0.0,
            "Volume scale must be positive"
        );
        anyhow::ensure!(
            (0.0..=1.0).contains(&self.lattice.umbilical_probability),
            "Lattice umbilical probability must be in [0.0, 1.0]"
        );

        // Agent validation
        anyhow::ensure!(
            self.agents.max_population >= self.agents.initial_agents + self.agents.placenta_agents,
            "Max population must hold the initial agents and placenta ring"
        );
        anyhow::ensure!(self.agents.bucket_size > 0.0, "Bucket size must be positive");
        anyhow::ensure!(
            self.agents.preferred_distance > 0.0,
            "Preferred distance must be positive"
        );
        anyhow::ensure!(
            self.agents.adhesion_radius >= self.agents.preferred_distance,
            "Adhesion radius must not be below the preferred distance"
        );
        anyhow::ensure!(
            self.agents.adhesion_falloff > 0.0,
            "Adhesion falloff must be positive"
        );
        anyhow::ensure!(
            (0.0..=1.0).contains(&self.agents.damping),
            "Damping must be in [0.0, 1.0]"
        );
        anyhow::ensure!(
            (0.0..=1.0).contains(&self.agents.inheritance),
            "Inheritance must be in [0.0, 1.0]"
        );
        anyhow::ensure!(
            (0.0..=1.0).contains(&self.agents.umbilical_probability),
            "Agent umbilical probability must be in [0.0, 1.0]"
        );
        anyhow::ensure!(
            self.agents.crowding_capacity > 0.0,
            "Crowding capacity must be positive"
        );
        anyhow::ensure!(
            self.agents.differentiation_tolerance >= 1.0,
            "Differentiation tolerance must be at least 1.0"
        );
        anyhow::ensure!(
            (8..=1000).contains(&self.agents.morphogen_resolution),
            "Morphogen resolution must be in [8, 1000]"
        );
        anyhow::ensure!(
            2.0 * self.agents.boundary_padding < self.world.area_width.min(self.world.area_height),
            "Boundary padding leaves no room in the area"
        );

        // Morphogen validation
        anyhow::ensure!(
            self.morphogen.decay > 0.0 && self.morphogen.decay <= 1.0,
            "Morphogen decay must be in (0.0, 1.0]"
        );

        anyhow::ensure!(
            self.logging.report_interval > 0,
            "Report interval must be positive"
        );

        Ok(())
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config = toml::from_str::<Self>(content)?;
        config
            .validate()
            .map_err(|e| EngineError::invalid_config(e.to_string()))?;
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise returns the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    #[must_use]
    pub fn fingerprint(&self) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(format!("{:?}", self.world.mode).as_bytes());
        hasher.update(format!("{:?}", self.parameters()).as_bytes());
        hasher.update(format!("{:?}", self.lattice).as_bytes());
        hasher.update(format!("{:?}", self.agents).as_bytes());
        hasher.update(format!("{:?}", self.morphogen).as_bytes());
        hasher.update(format!("{:?}", self.adhesion).as_bytes());
        hex::encode(hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        assert!(AppConfig::default().validate().is_ok());
        assert!(AppConfig::for_mode(EngineMode::OffLattice).validate().is_ok());
    }

    #[test]
    fn test_invalid_lattice_size() {
        let config = AppConfig {
            world: WorldConfig {
                lattice_size: 2,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_population_cap_below_initial() {
        let config = AppConfig {
            agents: AgentConfig {
                max_population: 10,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_decay() {
        let config = AppConfig {
            morphogen: MorphogenConfig { decay: 1.5 },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_toml_partial() {
        let config = AppConfig::from_toml(
            r#"
            [world]
            mode = "off_lattice"
            seed = 7

            [agents]
            initial_agents = 50
            "#,
        )
        .unwrap();
        assert_eq!(config.world.mode, EngineMode::OffLattice);
        assert_eq!(config.world.seed, Some(7));
        assert_eq!(config.agents.initial_agents, 50);
        assert_eq!(config.agents.placenta_agents, 300);
        assert_eq!(config.parameters().growth_rate, 0.04);
    }

    #[test]
    fn test_from_toml_rejects_invalid() {
        let err = AppConfig::from_toml("[world]\nlattice_size = 0\n").unwrap_err();
        assert!(matches!(err, EngineError::InvalidConfig(_)));
    }

    #[test]
    fn test_parameter_set_and_get() {
        let mut params = Parameters::default();
        params.set("temperature", -3.0).unwrap();
        assert_eq!(params.get("temperature").unwrap(), -3.0);
        assert_eq!(params.effective_temperature(), 1e-6);
        assert!(matches!(
            params.set("viscosity", 1.0),
            Err(EngineError::UnknownParameter(_))
        ));
        assert!(matches!(
            params.set("speed", f64::NAN),
            Err(EngineError::NonFiniteParameter { .. })
        ));
        for name in Parameters::NAMES {
            assert!(params.get(name).is_ok());
        }
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("off-lattice".parse::<EngineMode>().unwrap(), EngineMode::OffLattice);
        assert_eq!("Lattice".parse::<EngineMode>().unwrap(), EngineMode::Lattice);
        assert!("hex".parse::<EngineMode>().is_err());
    }

    #[test]
    fn test_fingerprint_consistency() {
        let config1 = AppConfig::default();
        let config2 = AppConfig::default();
        assert_eq!(config1.fingerprint(), config2.fingerprint());
        let other = AppConfig::for_mode(EngineMode::OffLattice);
        assert_ne!(config1.fingerprint(), other.fingerprint());
    }
}
