//! Headless batch runs: drive an engine to a target week and summarise.

pub mod sweep;

pub use sweep::{run_sweep, SweepPoint};

use crate::model::config::{AppConfig, EngineMode};
use crate::model::engine::SimulationEngine;
use crate::model::Census;
use anyhow::{Context, Result};
use embryogen_data::milestone_for_week;
use serde::Serialize;
use std::collections::BTreeMap;
use std::time::Instant;

/// Summary of one headless run.
#[derive(Serialize, Debug, Clone)]
pub struct RunReport {
    pub seed: u64,
    pub mode: EngineMode,
    pub iterations: u64,
    pub week: u32,
    pub stage: u8,
    pub stage_name: &'static str,
    pub milestone: &'static str,
    pub census: Census,
    /// Organ label to the iteration it first appeared at.
    pub organ_onsets: BTreeMap<&'static str, u64>,
    pub counters: BTreeMap<String, u64>,
    pub digest: String,
    pub elapsed_ms: u64,
}

pub fn report(engine: &SimulationEngine, elapsed_ms: u64) -> RunReport {
    let snapshot = engine.snapshot();
    RunReport {
        seed: engine.seed(),
        mode: engine.mode(),
        iterations: engine.iteration(),
        week: engine.week(),
        stage: engine.stage().number(),
        stage_name: engine.stage().name(),
        milestone: milestone_for_week(engine.week()),
        organ_onsets: engine
            .organ_onsets()
            .iter()
            .map(|(organ, &it)| (organ.label(), it))
            .collect(),
        counters: engine.metrics().counters(),
        digest: snapshot.digest(),
        census: snapshot.census,
        elapsed_ms,
    }
}

/// Builds an engine from `config` and ticks it until `weeks` is reached.
pub fn run_headless(config: AppConfig, weeks: u32) -> Result<RunReport> {
    let started = Instant::now();
    let mut engine = SimulationEngine::new(config).context("Failed to build engine")?;
    let ticks = engine.run_until_week(weeks);
    tracing::info!(ticks, week = engine.week(), "Headless run finished");
    Ok(report(&engine, started.elapsed().as_millis() as u64))
}

impl std::fmt::Display for RunReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "seed {} | {:?} | day {} | week {} | {}",
            self.seed, self.mode, self.iterations, self.week, self.stage_name
        )?;
        writeln!(f, "  {}", self.milestone)?;
        writeln!(
            f,
            "  cells {} | types {} | organs {} | spread {:.2}",
            self.census.population,
            self.census.diversity(),
            self.census.organ_count,
            self.census.spread
        )?;
        for (cell, count) in &self.census.counts {
            writeln!(f, "    {:<12} {}", cell.label(), count)?;
        }
        if !self.organ_onsets.is_empty() {
            let onsets: Vec<String> = self
                .organ_onsets
                .iter()
                .map(|(organ, it)| format!("{organ}@{it}"))
                .collect();
            writeln!(f, "  onsets {}", onsets.join(", "))?;
        }
        write!(f, "  digest {}", self.digest)
    }
}
