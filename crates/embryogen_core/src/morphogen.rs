//! Head and body morphogen grids.
//!
//! Each tick both fields decay, receive their source patches and are smoothed
//! by a separable Gaussian blur. Sources are laid out for a 150-site grid and
//! scaled to the actual resolution. The blur reflects at the borders and
//! truncates the kernel at four sigma. All weights are positive, so values
//! stay non-negative.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Resolution the source patch geometry is expressed in.
const REFERENCE_SIZE: f64 = 150.0;
const KERNEL_TRUNCATE: f64 = 4.0;

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct MorphogenField {
    size: usize,
    head: Vec<f64>,
    body: Vec<f64>,
    head_max: f64,
    body_max: f64,
    #[serde(skip)]
    scratch: Vec<f64>,
}

impl MorphogenField {
    pub fn new(size: usize) -> Self {
        let size = size.max(1);
        Self {
            size,
            head: vec![0.0; size * size],
            body: vec![0.0; size * size],
            head_max: 0.0,
            body_max: 0.0,
            scratch: vec![0.0; size * size],
        }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn head(&self) -> &[f64] {
        &self.head
    }

    pub fn body(&self) -> &[f64] {
        &self.body
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        y * self.size + x
    }

    /// Raw head level at a site. Out-of-range coordinates are clamped.
    #[inline]
    pub fn head_at(&self, x: usize, y: usize) -> f64 {
        let last = self.size - 1;
        self.head[self.index(x.min(last), y.min(last))]
    }

    #[inline]
    pub fn body_at(&self, x: usize, y: usize) -> f64 {
        let last = self.size - 1;
        self.body[self.index(x.min(last), y.min(last))]
    }

    /// Head and body levels at a world position, each divided by its field
    /// maximum so the result lies in `[0, 1]`.
    pub fn sample_normalized(&self, x: f64, y: f64, width: f64, height: f64) -> (f64, f64) {
        let to_site = |v: f64, extent: f64| -> usize {
            if !v.is_finite() || extent <= 0.0 {
                return 0;
            }
            ((v / extent) * self.size as f64).clamp(0.0, (self.size - 1) as f64) as usize
        };
        let (sx, sy) = (to_site(x, width), to_site(y, height));
        let norm = |v: f64, max: f64| if max > 0.0 { (v / max).clamp(0.0, 1.0) } else { 0.0 };
        (
            norm(self.head_at(sx, sy), self.head_max),
            norm(self.body_at(sx, sy), self.body_max),
        )
    }

    /// Decays, re-seeds and blurs both fields for the given week.
    pub fn update(&mut self, week: u32, decay: f64, diffusion: f64) {
        let decay = if decay.is_finite() { decay.clamp(0.0, 1.0) } else { 1.0 };
        self.head.par_iter_mut().for_each(|v| *v *= decay);
        self.body.par_iter_mut().for_each(|v| *v *= decay);

        let n = self.size;
        let center = (n / 2) as i64;
        let scale = n as f64 / REFERENCE_SIZE;
        let span = |v: f64| ((v * scale).round() as i64).max(1);

        let head_strength = match week {
            3..=8 => 1.4,
            0..=12 => 1.0,
            _ => 0.6,
        };
        let lift = (8 - (f64::from(week.min(8)) * 0.6) as i64).max(4);
        let head_y = center - span(lift as f64);
        fill_patch(
            &mut self.head,
            n,
            (center - span(6.0), center + span(6.0)),
            (head_y - span(2.0), head_y + span(2.0)),
            head_strength,
        );
        fill_patch(
            &mut self.body,
            n,
            (center - span(2.0), center + span(2.0)),
            (center - span(12.0), center + span(12.0)),
            1.0,
        );

        let sigma = if diffusion.is_finite() { diffusion.max(0.1) } else { 0.1 };
        let sigma = sigma.min((n as f64 / 2.0).max(0.1));
        let kernel = gaussian_kernel(sigma);
        self.scratch.resize(n * n, 0.0);
        gaussian_blur(&mut self.head, &mut self.scratch, n, &kernel);
        gaussian_blur(&mut self.body, &mut self.scratch, n, &kernel);

        self.head_max = self.head.iter().copied().fold(0.0, f64::max);
        self.body_max = self.body.iter().copied().fold(0.0, f64::max);
    }

    pub fn clear(&mut self) {
        self.head.fill(0.0);
        self.body.fill(0.0);
        self.head_max = 0.0;
        self.body_max = 0.0;
    }

    pub fn is_finite(&self) -> bool {
        self.head.iter().chain(self.body.iter()).all(|v| v.is_finite())
    }

    pub fn min_value(&self) -> f64 {
        self.head
            .iter()
            .chain(self.body.iter())
            .copied()
            .fold(f64::INFINITY, f64::min)
    }

    pub fn total_head(&self) -> f64 {
        self.head.iter().sum()
    }

    pub fn total_body(&self) -> f64 {
        self.body.iter().sum()
    }
}

/// Adds `amount` on the half-open rectangle `xs.0..xs.1` by `ys.0..ys.1`,
/// clipped to the grid.
fn fill_patch(field: &mut [f64], size: usize, xs: (i64, i64), ys: (i64, i64), amount: f64) {
    let clip = |v: i64| v.clamp(0, size as i64) as usize;
    let (x0, x1) = (clip(xs.0), clip(xs.1));
    let (y0, y1) = (clip(ys.0), clip(ys.1));
    for y in y0..y1 {
        for v in &mut field[y * size + x0..y * size + x1] {
            *v += amount;
        }
    }
}

/// Normalised 1-D Gaussian weights with radius `round(4 * sigma)`.
fn gaussian_kernel(sigma: f64) -> Vec<f64> {
    let radius = (KERNEL_TRUNCATE * sigma + 0.5) as i64;
    let denom = 2.0 * sigma * sigma;
    let mut weights: Vec<f64> = (-radius..=radius)
        .map(|k| (-((k * k) as f64) / denom).exp())
        .collect();
    let sum: f64 = weights.iter().sum();
    for w in &mut weights {
        *w /= sum;
    }
    weights
}

/// Mirror an index into `0..len` (`d c b a | a b c d | d c b a`).
#[inline]
fn reflect(i: i64, len: usize) -> usize {
    let len = len as i64;
    let period = 2 * len;
    let m = i.rem_euclid(period);
    if m < len {
        m as usize
    } else {
        (period - 1 - m) as usize
    }
}

/// Separable blur in place. Rows are processed in parallel; every output
/// value depends only on the previous pass, so the result is independent of
/// scheduling.
fn gaussian_blur(field: &mut [f64], scratch: &mut [f64], size: usize, kernel: &[f64]) {
    if kernel.len() == 1 {
        return;
    }
    let radius = (kernel.len() / 2) as i64;

    let input: &[f64] = field;
    scratch
        .par_chunks_mut(size)
        .enumerate()
        .for_each(|(y, row)| {
            let src = &input[y * size..(y + 1) * size];
            for (x, out) in row.iter_mut().enumerate() {
                *out = kernel
                    .iter()
                    .enumerate()
                    .map(|(k, w)| w * src[reflect(x as i64 + k as i64 - radius, size)])
                    .sum();
            }
        });

    let input: &[f64] = scratch;
    field.par_chunks_mut(size).enumerate().for_each(|(y, row)| {
        for (x, out) in row.iter_mut().enumerate() {
            *out = kernel
                .iter()
                .enumerate()
                .map(|(k, w)| w * input[reflect(y as i64 + k as i64 - radius, size) * size + x])
                .sum();
        }
    });
}
