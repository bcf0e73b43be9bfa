use crate::config::{EngineMode, Parameters};
use crate::systems::stats::Census;
use embryogen_data::{Agent, CellType, Stage};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Owned copy of the cell state.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TissueSnapshot {
    /// Row-major labels of an `size x size` lattice.
    Lattice { size: usize, cells: Vec<CellType> },
    Agents { agents: Vec<Agent> },
}

impl TissueSnapshot {
    /// Legacy integer tags for renderers (lattice only).
    pub fn tags(&self) -> Option<Vec<u8>> {
        match self {
            TissueSnapshot::Lattice { cells, .. } => Some(cells.iter().map(|c| c.tag()).collect()),
            TissueSnapshot::Agents { .. } => None,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            TissueSnapshot::Lattice { cells, .. } => cells.len(),
            TissueSnapshot::Agents { agents } => agents.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Read-only view of an engine between ticks.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct EngineSnapshot {
    pub mode: EngineMode,
    pub seed: u64,
    pub iteration: u64,
    pub week: u32,
    pub stage: Stage,
    pub parameters: Parameters,
    pub census: Census,
    pub tissue: TissueSnapshot,
}

impl EngineSnapshot {
    /// Stage number, 1 through 5.
    pub fn stage_number(&self) -> u8 {
        self.stage.number()
    }

    /// SHA-256 over the clock and the full tissue state, hex encoded.
    #[must_use]
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.iteration.to_le_bytes());
        hasher.update([self.mode as u8]);
        match &self.tissue {
            TissueSnapshot::Lattice { size, cells } => {
                hasher.update((*size as u64).to_le_bytes());
                let tags: Vec<u8> = cells.iter().map(|c| c.index() as u8).collect();
                hasher.update(&tags);
            }
            TissueSnapshot::Agents { agents } => {
                for a in agents {
                    for v in [a.x, a.y, a.vx, a.vy, a.age] {
                        hasher.update(v.to_bits().to_le_bytes());
                    }
                    hasher.update([a.cell_type.index() as u8]);
                }
            }
        }
        hex::encode(hasher.finalize())
    }
}
