//! Square lattice of cell labels for the Potts variant.

use crate::config::LatticeConfig;
use embryogen_data::CellType;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Axis-aligned neighbour offsets `(dx, dy)`.
pub const NEIGHBORS4: [(i64, i64); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// An `N x N` grid of labels with per-type site counts kept in sync.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Grid {
    size: usize,
    cells: Vec<CellType>,
    volumes: Vec<usize>,
}

impl Grid {
    pub fn new(size: usize) -> Self {
        let mut volumes = vec![0; CellType::COUNT];
        volumes[CellType::Empty.index()] = size * size;
        Self {
            size,
            cells: vec![CellType::Empty; size * size],
            volumes,
        }
    }

    /// Starting configuration: an embryo disc at the center and a sparse
    /// placenta ring.
    pub fn seeded(size: usize, config: &LatticeConfig, rng: &mut impl Rng) -> Self {
        let mut grid = Self::new(size);
        let center = (size / 2) as i64;
        let r = i64::from(config.seed_radius);
        for dy in -r..=r {
            for dx in -r..=r {
                if dx * dx + dy * dy <= r * r {
                    grid.set_checked(center + dx, center + dy, CellType::Embryo);
                }
            }
        }

        let inner = size as f64 * config.placenta_inner;
        let outer = size as f64 * config.placenta_outer;
        for y in 0..size {
            for x in 0..size {
                let dist = ((y as f64) - center as f64).hypot((x as f64) - center as f64);
                if inner < dist && dist < outer && rng.gen::<f64>() < config.placenta_density {
                    grid.set(x, y, CellType::Placenta);
                }
            }
        }
        grid
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        y * self.size + x
    }

    #[inline]
    pub fn in_bounds(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.size && (y as usize) < self.size
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> CellType {
        self.cells[self.index(x, y)]
    }

    /// Label at signed coordinates, `None` outside the grid.
    #[inline]
    pub fn get_checked(&self, x: i64, y: i64) -> Option<CellType> {
        self.in_bounds(x, y)
            .then(|| self.get(x as usize, y as usize))
    }

    /// Relabels a site and returns the previous label.
    pub fn set(&mut self, x: usize, y: usize, cell: CellType) -> CellType {
        let idx = self.index(x, y);
        let old = std::mem::replace(&mut self.cells[idx], cell);
        if old != cell {
            self.volumes[old.index()] -= 1;
            self.volumes[cell.index()] += 1;
        }
        old
    }

    pub fn set_checked(&mut self, x: i64, y: i64, cell: CellType) -> Option<CellType> {
        self.in_bounds(x, y)
            .then(|| self.set(x as usize, y as usize, cell))
    }

    /// In-bounds axis-aligned neighbours of `(x, y)`.
    pub fn neighbors4(&self, x: usize, y: usize) -> impl Iterator<Item = CellType> + '_ {
        NEIGHBORS4
            .iter()
            .filter_map(move |&(dx, dy)| self.get_checked(x as i64 + dx, y as i64 + dy))
    }

    /// Number of sites carrying `cell`.
    #[inline]
    pub fn volume(&self, cell: CellType) -> usize {
        self.volumes[cell.index()]
    }

    pub fn cells(&self) -> &[CellType] {
        &self.cells
    }

    /// `(x, y, label)` for every site in row-major order.
    pub fn sites(&self) -> impl Iterator<Item = (usize, usize, CellType)> + '_ {
        let n = self.size;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &c)| (i % n, i / n, c))
    }

    pub fn types_present(&self) -> BTreeSet<CellType> {
        CellType::ALL
            .iter()
            .copied()
            .filter(|&t| self.volume(t) > 0)
            .collect()
    }

    /// Legacy integer tags, row-major.
    pub fn to_tags(&self) -> Vec<u8> {
        self.cells.iter().map(|c| c.tag()).collect()
    }

    /// Rebuilds a grid from legacy tags; unknown tags become `Empty`.
    pub fn from_tags(size: usize, tags: &[u8]) -> Self {
        let mut grid = Self::new(size);
        for (i, &tag) in tags.iter().take(size * size).enumerate() {
            grid.set(i % size, i / size, CellType::from_tag_or_empty(tag));
        }
        grid
    }
}
