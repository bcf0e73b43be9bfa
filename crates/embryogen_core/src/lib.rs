//! # Embryogen Core
//!
//! The simulation engine for Embryogen, a 2D model of fetal development in
//! which typed cells rearrange, adhere, divide and take on tissue identity
//! under diffusing morphogens and a week-dependent anatomical template.
//!
//! Two rearrangement modes share one pipeline:
//! - **Lattice**: a Cellular Potts grid relabelled by Metropolis copy attempts
//! - **Off-lattice**: free agents moved by pairwise forces and dividing under
//!   crowding suppression
//!
//! Each tick runs morphogen update, rearrangement, differentiation, growth and
//! the clock, in that order. All randomness comes from one seeded
//! `ChaCha8Rng` per engine, so a seed reproduces a run exactly.
//!
//! ## Example
//!
//! ```
//! use embryogen_core::config::AppConfig;
//! use embryogen_core::engine::SimulationEngine;
//!
//! let mut config = AppConfig::default().with_seed(42);
//! config.world.lattice_size = 40;
//! let mut engine = SimulationEngine::new(config).unwrap();
//! engine.run(14);
//! assert_eq!(engine.week(), 3);
//! let snapshot = engine.snapshot();
//! assert_eq!(snapshot.iteration, 14);
//! ```

/// Declarative type-pair adhesion table
pub mod adhesion;
/// Iteration, week and stage bookkeeping
pub mod clock;
/// Configuration management for simulation parameters
pub mod config;
/// Engine construction, tick sequencing and the control API
pub mod engine;
/// Error types
pub mod error;
/// Cellular Potts lattice
pub mod lattice;
/// Run metrics and logging setup
pub mod metrics;
/// Head and body morphogen fields
pub mod morphogen;
/// Owned engine snapshots and state digests
pub mod snapshot;
/// Spatial hashing for agent neighbour queries
pub mod spatial_hash;
/// Per-tick systems (swap, forces, differentiation, growth, census)
pub mod systems;
/// Week-dependent anatomical anchors
pub mod template;
/// Lattice or agent tissue state
pub mod tissue;

pub use config::{AppConfig, EngineMode, Parameters};
pub use engine::{SimulationEngine, TickReport};
pub use error::{EngineError, Result};
pub use metrics::{init_logging, Metrics};
pub use snapshot::{EngineSnapshot, TissueSnapshot};
pub use systems::stats::Census;
pub use template::{template_for, AnatomicalTemplate, AnchorKind};
