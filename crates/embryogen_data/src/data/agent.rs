use super::cell::CellType;
use serde::{Deserialize, Serialize};

/// An off-lattice cell: continuous position, velocity, identity and age.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub cell_type: CellType,
    pub age: f64,
}

impl Agent {
    pub fn new(x: f64, y: f64, cell_type: CellType) -> Self {
        Self {
            x,
            y,
            vx: 0.0,
            vy: 0.0,
            cell_type,
            age: 0.0,
        }
    }

    #[inline]
    pub fn distance_to(&self, x: f64, y: f64) -> f64 {
        (self.x - x).hypot(self.y - y)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.vx.is_finite() && self.vy.is_finite()
    }
}
