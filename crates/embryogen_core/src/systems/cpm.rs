use crate::config::{LatticeConfig, Parameters};
use crate::lattice::{Grid, NEIGHBORS4};
use crate::systems::growth::target_volume;
use embryogen_data::CellType;
use rand::Rng;

/// Read-only inputs of one Monte-Carlo sweep.
pub struct CpmContext<'a> {
    pub params: &'a Parameters,
    pub config: &'a LatticeConfig,
    pub week: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SwapStats {
    pub attempts: usize,
    pub accepted: usize,
    pub rejected_bounds: usize,
    pub rejected_placenta: usize,
}

/// Placenta only ever trades with empty space.
#[inline]
pub fn placenta_blocks(current: CellType, incoming: CellType) -> bool {
    (current == CellType::Placenta && incoming != CellType::Empty)
        || (incoming == CellType::Placenta && current != CellType::Empty)
}

/// Energy change of relabelling `(x, y)` as `incoming`.
///
/// Adhesion is summed over the in-bounds 4-neighbourhood. A contact matching
/// the current label or the incoming one gets the same-type bonus; every
/// heterotypic contact the move creates costs that amount and every one it
/// removes refunds it. The volume term penalises the current type's global
/// population straying from its week target.
pub fn energy_delta(grid: &Grid, x: usize, y: usize, incoming: CellType, ctx: &CpmContext) -> f64 {
    let current = grid.get(x, y);
    let bonus = ctx.config.same_type_bonus;
    let mut energy = 0.0;
    for neighbor in grid.neighbors4(x, y) {
        let mut adhesion = ctx.params.adhesion;
        if current == neighbor {
            adhesion *= bonus;
        }
        if incoming == neighbor {
            adhesion *= bonus;
        }
        if current != neighbor {
            energy -= adhesion;
        }
        if incoming != neighbor {
            energy += adhesion;
        }
    }

    if current != CellType::Empty {
        let volume = grid.volume(current) as f64;
        let target = target_volume(ctx.week, ctx.params, ctx.config);
        energy += ctx.params.volume_constraint * (volume - target).powi(2) / ctx.config.volume_scale;
    }
    energy
}

/// Metropolis acceptance: downhill always, uphill with `exp(-dE / T)`.
#[inline]
pub fn accept(delta: f64, temperature: f64, rng: &mut impl Rng) -> bool {
    if delta < 0.0 {
        return true;
    }
    let t = if temperature.is_finite() { temperature.max(1e-6) } else { 1e-6 };
    rng.gen::<f64>() < (-delta / t).exp()
}

/// Runs `attempts_per_edge * N` copy attempts. Each picks a random site and a
/// random axis neighbour and proposes copying the neighbour's label onto the
/// site. Sites are only relabelled, never created or removed.
pub fn monte_carlo_step(grid: &mut Grid, ctx: &CpmContext, rng: &mut impl Rng) -> SwapStats {
    let n = grid.size();
    let mut stats = SwapStats::default();
    if n == 0 {
        return stats;
    }
    let temperature = ctx.params.effective_temperature();

    for _ in 0..ctx.config.attempts_per_edge * n {
        stats.attempts += 1;
        let x = rng.gen_range(0..n);
        let y = rng.gen_range(0..n);
        let (dx, dy) = NEIGHBORS4[rng.gen_range(0..NEIGHBORS4.len())];
        let Some(incoming) = grid.get_checked(x as i64 + dx, y as i64 + dy) else {
            stats.rejected_bounds += 1;
            continue;
        };
        let current = grid.get(x, y);
        if placenta_blocks(current, incoming) {
            stats.rejected_placenta += 1;
            continue;
        }
        if current == incoming {
            continue;
        }
        let delta = energy_delta(grid, x, y, incoming, ctx);
        if accept(delta, temperature, rng) {
            grid.set(x, y, incoming);
            stats.accepted += 1;
        }
    }
    stats
}
