use serde::{Deserialize, Serialize};

/// Last gestational week the simulation tracks.
pub const FINAL_WEEK: u32 = 40;

/// Developmental stage derived from the gestational week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Stage {
    Implantation,
    Embryonic,
    EarlyFetal,
    MidFetal,
    LateFetal,
}

impl Stage {
    pub fn from_week(week: u32) -> Self {
        match week {
            0..=2 => Stage::Implantation,
            3..=8 => Stage::Embryonic,
            9..=12 => Stage::EarlyFetal,
            13..=24 => Stage::MidFetal,
            _ => Stage::LateFetal,
        }
    }

    /// Stage number, 1 through 5.
    pub fn number(self) -> u8 {
        match self {
            Stage::Implantation => 1,
            Stage::Embryonic => 2,
            Stage::EarlyFetal => 3,
            Stage::MidFetal => 4,
            Stage::LateFetal => 5,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Stage::Implantation => "Implantation (W1-2)",
            Stage::Embryonic => "Embryonic (W3-8)",
            Stage::EarlyFetal => "Early Fetal (W9-12)",
            Stage::MidFetal => "Mid Fetal (W13-24)",
            Stage::LateFetal => "Late Fetal (W25-40)",
        }
    }
}

const MILESTONES: [(u32, u32, &str); 11] = [
    (1, 2, "Weeks 1-2: Fertilization and implantation window."),
    (3, 5, "Weeks 3-5: Embryonic disk, early heart tube, neural tube closure begins."),
    (6, 8, "Weeks 6-8: Organogenesis peak. Heart beats, limb buds and facial features emerge."),
    (9, 12, "Weeks 9-12: Fetus forms. Organs grow and refine; first trimester ends."),
    (13, 16, "Weeks 13-16: Movement increases; anatomy starts to look more human."),
    (17, 20, "Weeks 17-20: Quickening usually felt; detailed anatomy scan around 18-20 weeks."),
    (21, 24, "Weeks 21-24: Brain grows rapidly; viability threshold approaches around 24 weeks."),
    (25, 28, "Weeks 25-28: Lungs and fat accumulation accelerate."),
    (29, 32, "Weeks 29-32: Rapid weight gain; nervous system maturing."),
    (33, 36, "Weeks 33-36: Final maturation; baby often turns head-down."),
    (37, FINAL_WEEK, "Weeks 37-40+: Full-term. Baby gains final weight."),
];

/// Milestone description for a gestational week. Weeks past the last range
/// report the full-term milestone.
pub fn milestone_for_week(week: u32) -> &'static str {
    MILESTONES
        .iter()
        .find(|(from, to, _)| (*from..=*to).contains(&week))
        .map(|(_, _, text)| *text)
        .unwrap_or(MILESTONES[MILESTONES.len() - 1].2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_thresholds() {
        assert_eq!(Stage::from_week(1).number(), 1);
        assert_eq!(Stage::from_week(2).number(), 1);
        assert_eq!(Stage::from_week(3).number(), 2);
        assert_eq!(Stage::from_week(8).number(), 2);
        assert_eq!(Stage::from_week(12).number(), 3);
        assert_eq!(Stage::from_week(24).number(), 4);
        assert_eq!(Stage::from_week(25).number(), 5);
        assert_eq!(Stage::from_week(40).number(), 5);
    }

    #[test]
    fn test_every_week_has_a_milestone() {
        for week in 1..=FINAL_WEEK {
            let covered = MILESTONES
                .iter()
                .any(|(from, to, _)| (*from..=*to).contains(&week));
            assert!(covered, "week {week} has no milestone");
        }
        assert!(milestone_for_week(7).starts_with("Weeks 6-8"));
    }

    #[test]
    fn test_stage_serializes_by_name() {
        let json = serde_json::to_string(&Stage::EarlyFetal).unwrap();
        assert_eq!(json, "\"EarlyFetal\"");
    }
}
