//! Simulation clock: one tick is one simulated day.

use embryogen_data::{Stage, FINAL_WEEK};
use serde::{Deserialize, Serialize};

pub const DAYS_PER_WEEK: u64 = 7;

/// Gestational week for an iteration count, saturating at [`FINAL_WEEK`].
#[inline]
pub fn week_for_iteration(iteration: u64) -> u32 {
    let week = iteration / DAYS_PER_WEEK + 1;
    week.min(u64::from(FINAL_WEEK)) as u32
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationClock {
    iteration: u64,
}

impl SimulationClock {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn iteration(&self) -> u64 {
        self.iteration
    }

    #[inline]
    pub fn week(&self) -> u32 {
        week_for_iteration(self.iteration)
    }

    #[inline]
    pub fn stage(&self) -> Stage {
        Stage::from_week(self.week())
    }

    /// Advances one tick and reports whether the week changed.
    pub fn advance(&mut self) -> bool {
        let before = self.week();
        self.iteration = self.iteration.saturating_add(1);
        self.week() != before
    }

    pub fn reset(&mut self) {
        self.iteration = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_week_formula() {
        assert_eq!(week_for_iteration(0), 1);
        assert_eq!(week_for_iteration(6), 1);
        assert_eq!(week_for_iteration(7), 2);
        assert_eq!(week_for_iteration(70), 11);
        assert_eq!(week_for_iteration(273), 40);
        assert_eq!(week_for_iteration(280), 40);
        assert_eq!(week_for_iteration(300), 40);
        assert_eq!(week_for_iteration(u64::MAX), 40);
    }

    #[test]
    fn test_advance_reports_week_change() {
        let mut clock = SimulationClock::new();
        let changes = (0..14).filter(|_| clock.advance()).count();
        assert_eq!(changes, 2);
        assert_eq!(clock.week(), 3);
        assert_eq!(clock.stage(), Stage::Embryonic);
        clock.reset();
        assert_eq!(clock.iteration(), 0);
    }
}
