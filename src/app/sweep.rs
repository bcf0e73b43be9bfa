//! Parameter sweeps: one fresh engine per value, same seed, fixed tick count.

use crate::model::config::AppConfig;
use crate::model::engine::SimulationEngine;
use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SweepPoint {
    pub parameter: String,
    pub value: f64,
    pub cells: usize,
    pub organ_count: usize,
    /// Mean per-tick change in the number of distinct types.
    pub differentiation_speed: f64,
    pub spread: f64,
    pub diversity: usize,
    pub organ_onsets: BTreeMap<&'static str, u64>,
}

/// Mean of consecutive differences; zero for fewer than two samples.
pub fn mean_step(progression: &[usize]) -> f64 {
    match progression {
        [first, .., last] => (*last as f64 - *first as f64) / (progression.len() - 1) as f64,
        _ => 0.0,
    }
}

pub fn run_sweep(base: &AppConfig, name: &str, values: &[f64], ticks: u64) -> Result<Vec<SweepPoint>> {
    values
        .iter()
        .map(|&value| {
            let mut engine = SimulationEngine::new(base.clone()).context("Failed to build engine")?;
            engine
                .set_parameter(name, value)
                .with_context(|| format!("Cannot sweep '{name}'"))?;

            let mut progression = Vec::with_capacity(ticks as usize);
            for _ in 0..ticks {
                engine.tick();
                progression.push(engine.census().diversity());
            }

            let census = engine.census();
            tracing::info!(parameter = name, value, cells = census.population, "Sweep point done");
            Ok(SweepPoint {
                parameter: name.to_string(),
                value,
                cells: census.population,
                organ_count: census.organ_count,
                differentiation_speed: mean_step(&progression),
                spread: census.spread,
                diversity: census.diversity(),
                organ_onsets: engine
                    .organ_onsets()
                    .iter()
                    .map(|(organ, &it)| (organ.label(), it))
                    .collect(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_step() {
        assert_eq!(mean_step(&[]), 0.0);
        assert_eq!(mean_step(&[3]), 0.0);
        assert_eq!(mean_step(&[2, 3, 3, 6]), 4.0 / 3.0);
    }

    #[test]
    fn test_sweep_rejects_unknown_parameter() {
        let mut config = AppConfig::default().with_seed(1);
        config.world.lattice_size = 30;
        assert!(run_sweep(&config, "viscosity", &[1.0], 1).is_err());
    }

    #[test]
    fn test_sweep_one_point_per_value() {
        let mut config = AppConfig::default().with_seed(1);
        config.world.lattice_size = 30;
        let points = run_sweep(&config, "temperature", &[1.0, 20.0], 3).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[1].value, 20.0);
        assert!(points.iter().all(|p| p.cells > 0));
    }
}
