use crate::lattice::Grid;
use embryogen_data::{Agent, CellType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Population summary of the tissue at one instant.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Census {
    /// Occupied sites or agents (everything but `Empty`).
    pub population: usize,
    /// Per-type counts of the types present.
    pub counts: BTreeMap<CellType, usize>,
    /// Distinct non-empty types present, in type order.
    pub types_present: Vec<CellType>,
    /// Distinct organ types present.
    pub organ_count: usize,
    /// Mean of the x and y standard deviations of occupied positions.
    pub spread: f64,
}

impl Census {
    pub fn count(&self, cell: CellType) -> usize {
        self.counts.get(&cell).copied().unwrap_or(0)
    }

    pub fn contains(&self, cell: CellType) -> bool {
        self.count(cell) > 0
    }

    /// Number of distinct non-empty types.
    pub fn diversity(&self) -> usize {
        self.types_present.len()
    }

    fn from_counts(counts: [usize; CellType::COUNT], spread: f64) -> Self {
        let counts: BTreeMap<CellType, usize> = CellType::ALL
            .iter()
            .copied()
            .filter(|&t| t != CellType::Empty && counts[t.index()] > 0)
            .map(|t| (t, counts[t.index()]))
            .collect();
        let types_present: Vec<CellType> = counts.keys().copied().collect();
        Self {
            population: counts.values().sum(),
            organ_count: types_present.iter().filter(|t| t.is_organ()).count(),
            types_present,
            counts,
            spread,
        }
    }
}

/// Running first and second moments of a point set.
#[derive(Default)]
struct Spread {
    n: f64,
    sx: f64,
    sy: f64,
    sxx: f64,
    syy: f64,
}

impl Spread {
    #[inline]
    fn push(&mut self, x: f64, y: f64) {
        self.n += 1.0;
        self.sx += x;
        self.sy += y;
        self.sxx += x * x;
        self.syy += y * y;
    }

    fn value(&self) -> f64 {
        if self.n == 0.0 {
            return 0.0;
        }
        let var = |s: f64, ss: f64| (ss / self.n - (s / self.n).powi(2)).max(0.0);
        (var(self.sx, self.sxx).sqrt() + var(self.sy, self.syy).sqrt()) / 2.0
    }
}

pub fn census_lattice(grid: &Grid) -> Census {
    let mut counts = [0usize; CellType::COUNT];
    for t in CellType::ALL {
        counts[t.index()] = grid.volume(t);
    }
    let mut spread = Spread::default();
    for (x, y, cell) in grid.sites() {
        if cell != CellType::Empty {
            spread.push(x as f64, y as f64);
        }
    }
    Census::from_counts(counts, spread.value())
}

pub fn census_agents(agents: &[Agent]) -> Census {
    let mut counts = [0usize; CellType::COUNT];
    let mut spread = Spread::default();
    for agent in agents {
        counts[agent.cell_type.index()] += 1;
        if agent.cell_type != CellType::Empty {
            spread.push(agent.x, agent.y);
        }
    }
    Census::from_counts(counts, spread.value())
}
