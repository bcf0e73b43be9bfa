use crate::config::{AgentConfig, LatticeConfig, Parameters};
use crate::spatial_hash::SpatialHash;
use embryogen_data::{Agent, CellType};
use rand::Rng;
use std::f64::consts::TAU;

/// Population each lattice type is pulled towards in a given week.
///
/// Lattice growth has no explicit division: types expand and shrink only
/// through relabelling, steered by this target in the swap energy.
#[inline]
pub fn target_volume(week: u32, params: &Parameters, config: &LatticeConfig) -> f64 {
    config.volume_base + f64::from(week) * params.growth_rate * config.volume_slope
}

pub struct GrowthContext<'a> {
    pub params: &'a Parameters,
    pub config: &'a AgentConfig,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GrowthOutcome {
    pub births: usize,
    /// Daughters that fell back to the undifferentiated type.
    pub reverted: usize,
    /// The population cap stopped division this tick.
    pub capped: bool,
}

/// One division pass over the agents present at the start of the pass.
///
/// Crowding within `crowding_radius` suppresses division by up to 90%.
/// Daughters appear 1.5 to 2.5 units from the parent, keep its type with
/// probability `inheritance` and are otherwise undifferentiated.
/// Placenta agents never divide. Nothing is spawned at or past
/// `max_population`.
pub fn divide_agents(
    agents: &mut Vec<Agent>,
    hash: &mut SpatialHash,
    ctx: &GrowthContext,
    rng: &mut impl Rng,
) -> GrowthOutcome {
    let cfg = ctx.config;
    let positions: Vec<(f64, f64)> = agents.iter().map(|a| (a.x, a.y)).collect();
    hash.build(&positions);

    let pad = cfg.boundary_padding;
    let (max_x, max_y) = ((ctx.width - pad).max(pad), (ctx.height - pad).max(pad));
    let mut outcome = GrowthOutcome::default();

    for (i, &(px, py)) in positions.iter().enumerate() {
        if agents.len() >= cfg.max_population {
            outcome.capped = true;
            break;
        }
        let parent_type = agents[i].cell_type;
        if parent_type == CellType::Placenta {
            continue;
        }

        let neighbors = hash.count_within(px, py, cfg.crowding_radius, &positions, Some(i));
        let crowding = (neighbors as f64 / cfg.crowding_capacity).min(0.9);
        let prob = ctx.params.growth_rate * (1.0 - crowding);
        if rng.gen::<f64>() >= prob {
            continue;
        }

        let angle = rng.gen::<f64>() * TAU;
        let r = 1.5 + rng.gen::<f64>();
        let cell_type = if rng.gen::<f64>() < cfg.inheritance {
            parent_type
        } else {
            outcome.reverted += 1;
            CellType::Embryo
        };
        let x = (px + angle.cos() * r).clamp(pad, max_x);
        let y = (py + angle.sin() * r).clamp(pad, max_y);
        agents.push(Agent::new(x, y, cell_type));
        outcome.births += 1;
    }
    outcome
}
