use rayon::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};

#[derive(Clone, Debug, Default)]
/// Uniform bucket grid over agent positions.
///
/// Buckets are stored in the "offset array" layout of a compressed sparse
/// row matrix: `cell_offsets[i]..cell_offsets[i + 1]` indexes into
/// `entity_indices` for every agent in bucket `i`. Within a bucket agents keep
/// their input order, so queries visit neighbours deterministically.
///
/// # Examples
/// ```
/// use embryogen_core::spatial_hash::SpatialHash;
///
/// let mut spatial = SpatialHash::new(12.0, 600.0, 600.0);
/// let positions = vec![(300.0, 300.0), (304.0, 300.0), (500.0, 80.0)];
/// spatial.build(&positions);
///
/// let mut nearby = Vec::new();
/// spatial.query_into(300.0, 300.0, 18.0, &mut nearby);
/// assert_eq!(nearby.len(), 2);
/// ```
pub struct SpatialHash {
    pub cell_size: f64,
    pub width: f64,
    pub height: f64,
    pub cols: usize,
    pub rows: usize,
    pub cell_offsets: Vec<usize>,
    pub entity_indices: Vec<usize>,
}

impl SpatialHash {
    pub fn new(cell_size: f64, width: f64, height: f64) -> Self {
        let cell_size = if cell_size.is_finite() && cell_size > 0.0 {
            cell_size
        } else {
            1.0
        };
        let cols = (width / cell_size).ceil().max(1.0) as usize;
        let rows = (height / cell_size).ceil().max(1.0) as usize;
        Self {
            cell_size,
            width,
            height,
            cols,
            rows,
            cell_offsets: vec![0; cols * rows + 1],
            entity_indices: Vec::new(),
        }
    }

    /// Bucket index of a position, `None` for non-finite or outside points.
    #[inline]
    pub fn get_cell_idx(&self, x: f64, y: f64) -> Option<usize> {
        if !x.is_finite() || !y.is_finite() {
            return None;
        }

        if x.abs() > i32::MAX as f64 * self.cell_size || y.abs() > i32::MAX as f64 * self.cell_size
        {
            return None;
        }

        let cx = (x / self.cell_size).floor() as i32;
        let cy = (y / self.cell_size).floor() as i32;
        if cx < 0 || cx >= self.cols as i32 || cy < 0 || cy >= self.rows as i32 {
            None
        } else {
            Some((cy as usize * self.cols) + cx as usize)
        }
    }

    /// Rebuilds the buckets from scratch. Counting runs in parallel; the
    /// scatter is sequential so bucket contents keep input order.
    pub fn build(&mut self, positions: &[(f64, f64)]) {
        let cell_count = self.cols * self.rows;

        let atomic_counts: Vec<AtomicUsize> =
            (0..cell_count).map(|_| AtomicUsize::new(0)).collect();
        positions.par_iter().for_each(|&(x, y)| {
            if let Some(idx) = self.get_cell_idx(x, y) {
                atomic_counts[idx].fetch_add(1, AtomicOrdering::Relaxed);
            }
        });
        let counts: Vec<usize> = atomic_counts.into_iter().map(|a| a.into_inner()).collect();

        self.cell_offsets.resize(cell_count + 1, 0);
        let mut total = 0;
        for (i, &count) in counts.iter().enumerate() {
            self.cell_offsets[i] = total;
            total += count;
        }
        self.cell_offsets[cell_count] = total;

        self.entity_indices.clear();
        self.entity_indices.resize(total, 0);
        let mut cursor = self.cell_offsets[..cell_count].to_vec();
        for (entity_idx, &(x, y)) in positions.iter().enumerate() {
            if let Some(cell_idx) = self.get_cell_idx(x, y) {
                self.entity_indices[cursor[cell_idx]] = entity_idx;
                cursor[cell_idx] += 1;
            }
        }
    }

    /// Number of indexed agents.
    pub fn len(&self) -> usize {
        self.entity_indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entity_indices.is_empty()
    }

    #[inline]
    fn bucket_range(&self, x: f64, y: f64, radius: f64) -> Option<(i32, i32, i32, i32)> {
        if !x.is_finite() || !y.is_finite() || !radius.is_finite() || radius < 0.0 {
            return None;
        }
        let clamp_col = |v: f64| ((v / self.cell_size).floor().clamp(-1.0, self.cols as f64)) as i32;
        let clamp_row = |v: f64| ((v / self.cell_size).floor().clamp(-1.0, self.rows as f64)) as i32;
        Some((
            clamp_col(x - radius).max(0),
            clamp_col(x + radius).min(self.cols as i32 - 1),
            clamp_row(y - radius).max(0),
            clamp_row(y + radius).min(self.rows as i32 - 1),
        ))
    }

    /// Visits every agent in the buckets overlapping the query square.
    /// Callers filter by exact distance.
    pub fn query_callback<F>(&self, x: f64, y: f64, radius: f64, mut callback: F)
    where
        F: FnMut(usize),
    {
        let Some((min_cx, max_cx, min_cy, max_cy)) = self.bucket_range(x, y, radius) else {
            return;
        };

        for cy in min_cy..=max_cy {
            for cx in min_cx..=max_cx {
                let cell_idx = (cy as usize * self.cols) + cx as usize;
                let start = self.cell_offsets[cell_idx];
                let end = self.cell_offsets[cell_idx + 1];

                for &entity_idx in &self.entity_indices[start..end] {
                    callback(entity_idx);
                }
            }
        }
    }

    #[inline]
    pub fn query_into(&self, x: f64, y: f64, radius: f64, result: &mut Vec<usize>) {
        result.clear();
        let Some((min_cx, max_cx, min_cy, max_cy)) = self.bucket_range(x, y, radius) else {
            return;
        };

        for cy in min_cy..=max_cy {
            for cx in min_cx..=max_cx {
                let cell_idx = (cy as usize * self.cols) + cx as usize;
                let start = self.cell_offsets[cell_idx];
                let end = self.cell_offsets[cell_idx + 1];

                result.extend_from_slice(&self.entity_indices[start..end]);
            }
        }
    }

    /// Exact number of agents strictly closer than `radius`, not counting
    /// `exclude`.
    pub fn count_within(
        &self,
        x: f64,
        y: f64,
        radius: f64,
        positions: &[(f64, f64)],
        exclude: Option<usize>,
    ) -> usize {
        let r2 = radius * radius;
        let mut count = 0;
        self.query_callback(x, y, radius, |idx| {
            if Some(idx) == exclude {
                return;
            }
            let (ox, oy) = positions[idx];
            let (dx, dy) = (ox - x, oy - y);
            if dx * dx + dy * dy < r2 {
                count += 1;
            }
        });
        count
    }
}
