use super::SimulationEngine;
use crate::systems::cpm::{monte_carlo_step, CpmContext, SwapStats};
use crate::systems::differentiation::{
    differentiate_agents, differentiate_lattice, AgentDifferentiation, DifferentiationStats,
    LatticeDifferentiation,
};
use crate::systems::forces::{integrate_forces, ForceContext, ForceStats};
use crate::systems::growth::{divide_agents, GrowthContext, GrowthOutcome};
use crate::template::AnatomicalTemplate;
use crate::tissue::Tissue;
use embryogen_data::{CellType, FINAL_WEEK};
use std::time::Instant;

/// Counters of one tick, by system.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickReport {
    pub iteration: u64,
    pub week: u32,
    pub swaps: SwapStats,
    pub forces: ForceStats,
    pub differentiation: DifferentiationStats,
    pub growth: GrowthOutcome,
    pub week_changed: bool,
}

impl SimulationEngine {
    /// One full tick.
    pub fn tick(&mut self) -> TickReport {
        self.step(1.0)
    }

    /// One tick: morphogens, rearrangement, differentiation, growth, clock.
    ///
    /// `dt` scales agent motion only; a lattice tick is indivisible. A
    /// non-finite or negative `dt` moves nothing but still advances the
    /// clock.
    pub fn step(&mut self, dt: f64) -> TickReport {
        let started = Instant::now();
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let week = self.clock.week();
        let mut report = TickReport {
            iteration: self.clock.iteration(),
            week,
            ..TickReport::default()
        };

        self.morphogens.update(
            week,
            self.config.morphogen.decay,
            self.params.morphogen_diffusion,
        );
        let template = AnatomicalTemplate::for_week(week, &self.frame);

        match &mut self.tissue {
            Tissue::Lattice(grid) => {
                let cpm = CpmContext {
                    params: &self.params,
                    config: &self.config.lattice,
                    week,
                };
                report.swaps = monte_carlo_step(grid, &cpm, &mut self.rng);

                let diff = LatticeDifferentiation {
                    params: &self.params,
                    config: &self.config.lattice,
                    template: &template,
                    morphogens: &self.morphogens,
                };
                report.differentiation = differentiate_lattice(grid, &diff, &mut self.rng);
            }
            Tissue::Agents(agents) => {
                let (width, height) = (self.config.world.area_width, self.config.world.area_height);
                let forces = ForceContext {
                    params: &self.params,
                    config: &self.config.agents,
                    adhesion: &self.adhesion,
                    width,
                    height,
                };
                report.forces =
                    integrate_forces(agents, &mut self.spatial_hash, &forces, dt, &mut self.rng);

                let diff = AgentDifferentiation {
                    params: &self.params,
                    config: &self.config.agents,
                    template: &template,
                    morphogens: &self.morphogens,
                    width,
                    height,
                };
                report.differentiation = differentiate_agents(agents, &diff, &mut self.rng);

                let growth = GrowthContext {
                    params: &self.params,
                    config: &self.config.agents,
                    width,
                    height,
                };
                report.growth = divide_agents(agents, &mut self.spatial_hash, &growth, &mut self.rng);
            }
        }

        self.track_organs(report.iteration);
        if report.growth.capped && !self.cap_reported {
            self.cap_reported = true;
            tracing::warn!(
                cap = self.config.agents.max_population,
                iteration = report.iteration,
                "Population cap reached, division suspended"
            );
        }

        report.week_changed = self.clock.advance();
        let population = self.tissue.population();
        if report.week_changed {
            tracing::info!(
                week = self.clock.week(),
                stage = self.clock.stage().name(),
                population = population,
                "Week advanced"
            );
        }
        tracing::debug!(
            iteration = report.iteration,
            swaps = report.swaps.accepted,
            differentiated = report.differentiation.total(),
            births = report.growth.births,
            "Tick complete"
        );

        self.metrics.add("swaps_accepted", report.swaps.accepted as u64);
        self.metrics.add("differentiations", report.differentiation.relabeled as u64);
        self.metrics.add("umbilical_conversions", report.differentiation.umbilical as u64);
        self.metrics.add("divisions", report.growth.births as u64);
        self.metrics.add("sanitized_forces", report.forces.sanitized as u64);
        self.metrics
            .record_tick(started.elapsed(), self.clock.week(), population);
        report
    }

    /// Steps for one rendered frame at the given speed multiplier:
    /// `floor(speed)` whole ticks (at least one) and, for a fractional
    /// remainder, one more tick of that length. Speed is floored at `0.01`.
    pub fn advance_frame(&mut self, speed: f64) -> usize {
        let speed = if speed.is_finite() { speed.max(0.01) } else { 1.0 };
        let whole = speed.floor();
        let frac = speed - whole;
        let steps = (whole as usize).max(1);
        for _ in 0..steps {
            self.step(1.0);
        }
        if frac > 1e-6 {
            self.step(frac);
            return steps + 1;
        }
        steps
    }

    /// Ticks until the clock reaches `week` (capped at week 40) and returns
    /// the number of ticks taken.
    pub fn run_until_week(&mut self, week: u32) -> u64 {
        let week = week.min(FINAL_WEEK);
        let mut ticks = 0;
        while self.clock.week() < week {
            self.tick();
            ticks += 1;
        }
        ticks
    }

    /// Runs `n` full ticks.
    pub fn run(&mut self, n: u64) {
        for _ in 0..n {
            self.tick();
        }
    }

    fn track_organs(&mut self, iteration: u64) {
        for organ in CellType::ORGANS {
            if self.organ_onsets.contains_key(&organ) || !self.tissue.contains(organ) {
                continue;
            }
            self.organ_onsets.insert(organ, iteration);
            self.metrics.increment_counter("organ_onsets");
            tracing::info!(organ = organ.label(), iteration, "Organ appeared");
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{AppConfig, EngineMode};
    use crate::engine::SimulationEngine;
    use crate::error::EngineError;

    fn small_lattice(seed: u64) -> SimulationEngine {
        let mut config = AppConfig::default().with_seed(seed);
        config.world.lattice_size = 60;
        SimulationEngine::new(config).unwrap()
    }

    #[test]
    fn test_clock_advances_per_step() {
        let mut engine = small_lattice(1);
        assert_eq!(engine.week(), 1);
        engine.run(7);
        assert_eq!(engine.iteration(), 7);
        assert_eq!(engine.week(), 2);
        engine.step(f64::NAN);
        assert_eq!(engine.iteration(), 8);
    }

    #[test]
    fn test_advance_frame_counts() {
        let mut engine = small_lattice(2);
        assert_eq!(engine.advance_frame(0.5), 2);
        assert_eq!(engine.advance_frame(3.0), 3);
        assert_eq!(engine.advance_frame(2.25), 3);
        assert_eq!(engine.advance_frame(-4.0), 2);
        assert_eq!(engine.iteration(), 10);
    }

    #[test]
    fn test_reset_replays_run() {
        let mut engine = small_lattice(5);
        let start = engine.snapshot().digest();
        engine.run(10);
        let after = engine.snapshot().digest();
        assert_eq!(engine.reset().digest(), start);
        engine.run(10);
        assert_eq!(engine.snapshot().digest(), after);
    }

    #[test]
    fn test_unknown_parameter_is_rejected() {
        let mut engine = small_lattice(3);
        assert!(matches!(
            engine.set_parameter("gravity", 1.0),
            Err(EngineError::UnknownParameter(_))
        ));
        engine.set_parameter("temperature", 0.0).unwrap();
        assert_eq!(engine.parameter("temperature").unwrap(), 0.0);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = AppConfig::default();
        config.world.lattice_size = 0;
        assert!(matches!(
            SimulationEngine::new(config),
            Err(EngineError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_run_until_week_caps() {
        let mut config = AppConfig::for_mode(EngineMode::OffLattice).with_seed(4);
        config.agents.initial_agents = 40;
        config.agents.placenta_agents = 20;
        let mut engine = SimulationEngine::new(config).unwrap();
        assert_eq!(engine.run_until_week(3), 14);
        assert_eq!(engine.week(), 3);
        assert_eq!(engine.run_until_week(2), 0);
    }
}
