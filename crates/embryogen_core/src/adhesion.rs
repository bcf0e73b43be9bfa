//! Pairwise adhesion preferences between cell types.
//!
//! The matrix is a dense `COUNT x COUNT` table indexed by
//! [`CellType::index`]. It starts from a same-type / other-type default and
//! applies a declarative list of overrides in order. Rows are the acting
//! cell, columns the neighbour, so the table may be asymmetric.

use crate::config::AdhesionConfig;
use embryogen_data::CellType;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct AdhesionRule {
    pub from: CellType,
    pub to: CellType,
    pub value: f64,
    /// Also set `to -> from`.
    #[serde(default)]
    pub symmetric: bool,
}

impl AdhesionRule {
    pub const fn one_way(from: CellType, to: CellType, value: f64) -> Self {
        Self {
            from,
            to,
            value,
            symmetric: false,
        }
    }

    pub const fn both_ways(from: CellType, to: CellType, value: f64) -> Self {
        Self {
            from,
            to,
            value,
            symmetric: true,
        }
    }
}

/// Head tissue coheres and shuns the body; organs cling to the body.
pub fn default_rules() -> Vec<AdhesionRule> {
    use CellType::*;
    vec![
        AdhesionRule::one_way(Head, Head, 1.2),
        AdhesionRule::one_way(Brain, Brain, 1.0),
        AdhesionRule::both_ways(Head, Brain, 0.9),
        AdhesionRule::both_ways(Head, Body, -0.3),
        AdhesionRule::both_ways(Brain, Body, -0.3),
        AdhesionRule::one_way(Body, Body, 0.8),
        AdhesionRule::both_ways(ArmLeft, ArmRight, 0.4),
        AdhesionRule::both_ways(LegLeft, LegRight, 0.4),
        AdhesionRule::one_way(Heart, Body, 1.4),
        AdhesionRule::one_way(Liver, Body, 1.4),
        AdhesionRule::one_way(Lung, Body, 1.4),
        AdhesionRule::one_way(Stomach, Body, 1.2),
        AdhesionRule::one_way(Intestine, Body, 1.2),
        AdhesionRule::one_way(Kidney, Body, 1.2),
        AdhesionRule::one_way(Bladder, Body, 1.0),
        AdhesionRule::one_way(Body, Heart, 1.4),
    ]
}

#[derive(Debug, Clone, PartialEq)]
pub struct AdhesionMatrix {
    table: [[f64; CellType::COUNT]; CellType::COUNT],
}

impl AdhesionMatrix {
    pub fn new(same_type: f64, other_type: f64, rules: &[AdhesionRule]) -> Self {
        let mut table = [[other_type; CellType::COUNT]; CellType::COUNT];
        for (i, row) in table.iter_mut().enumerate() {
            row[i] = same_type;
        }
        for rule in rules {
            table[rule.from.index()][rule.to.index()] = rule.value;
            if rule.symmetric {
                table[rule.to.index()][rule.from.index()] = rule.value;
            }
        }
        Self { table }
    }

    pub fn from_config(config: &AdhesionConfig) -> Self {
        Self::new(config.same_type, config.other_type, &config.overrides)
    }

    #[inline]
    pub fn get(&self, from: CellType, to: CellType) -> f64 {
        self.table[from.index()][to.index()]
    }
}

impl Default for AdhesionMatrix {
    fn default() -> Self {
        Self::from_config(&AdhesionConfig::default())
    }
}
