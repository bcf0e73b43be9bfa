use crate::adhesion::AdhesionMatrix;
use crate::config::{AgentConfig, Parameters};
use crate::spatial_hash::SpatialHash;
use embryogen_data::{Agent, CellType};
use rand::Rng;
use rayon::prelude::*;

/// Pairs closer than this are skipped instead of normalised.
const MIN_PAIR_DISTANCE: f64 = 0.1;
/// Head agents closer than this to the head anchor feel no pull.
const HEAD_PULL_DEADZONE: f64 = 5.0;

pub struct ForceContext<'a> {
    pub params: &'a Parameters,
    pub config: &'a AgentConfig,
    pub adhesion: &'a AdhesionMatrix,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ForceStats {
    pub mean_force: f64,
    /// Forces or velocities that came out non-finite and were zeroed.
    pub sanitized: usize,
    pub boundary_hits: usize,
}

/// Net pairwise force on agent `i`, computed from the indexed snapshot.
///
/// Overlapping pairs push apart linearly in the overlap. Pairs between the
/// preferred distance and the adhesion radius attract (or repel, for
/// negative preferences) with a linear falloff.
pub fn pair_force(
    i: usize,
    agents: &[Agent],
    hash: &SpatialHash,
    ctx: &ForceContext,
) -> (f64, f64) {
    let cfg = ctx.config;
    let me = &agents[i];
    let preferred = cfg.preferred_distance;
    let reach = cfg.adhesion_radius;
    let (mut fx, mut fy) = (0.0, 0.0);

    hash.query_callback(me.x, me.y, reach, |j| {
        if j == i {
            return;
        }
        let other = &agents[j];
        let dx = me.x - other.x;
        let dy = me.y - other.y;
        let dist = dx.hypot(dy) + 1e-6;
        if dist < MIN_PAIR_DISTANCE {
            return;
        }
        let (ux, uy) = (dx / dist, dy / dist);
        if dist < preferred {
            let push = (preferred - dist) * cfg.repulsion;
            fx += ux * push;
            fy += uy * push;
        } else if dist < reach {
            let pref = ctx.adhesion.get(me.cell_type, other.cell_type);
            let pull = pref * ctx.params.adhesion_base * (1.0 - (dist - preferred) / cfg.adhesion_falloff);
            fx -= ux * pull;
            fy -= uy * pull;
        }
    });

    if matches!(me.cell_type, CellType::Head | CellType::Brain) {
        let tx = ctx.width / 2.0 - me.x;
        let ty = ctx.height / 2.0 - cfg.head_anchor_offset - me.y;
        let d = tx.hypot(ty);
        if d > HEAD_PULL_DEADZONE {
            fx += tx / d * cfg.head_pull;
            fy += ty / d * cfg.head_pull;
        }
    }
    (fx, fy)
}

/// Moves every agent one step.
///
/// Jitter is drawn sequentially up front, forces are then computed in
/// parallel against the unchanged positions, and only after all forces exist
/// are velocities and positions integrated. Positions are confined to the
/// area minus `boundary_padding`; hitting the edge reverses that velocity
/// component.
pub fn integrate_forces(
    agents: &mut [Agent],
    hash: &mut SpatialHash,
    ctx: &ForceContext,
    dt: f64,
    rng: &mut impl Rng,
) -> ForceStats {
    let cfg = ctx.config;
    let mut stats = ForceStats::default();
    if agents.is_empty() {
        return stats;
    }

    let positions: Vec<(f64, f64)> = agents.iter().map(|a| (a.x, a.y)).collect();
    hash.build(&positions);

    let jitter_scale = ctx.params.temperature * cfg.noise_scale;
    let jitter: Vec<(f64, f64)> = (0..agents.len())
        .map(|_| {
            let jx = (rng.gen::<f64>() - 0.5) * jitter_scale;
            let jy = (rng.gen::<f64>() - 0.5) * jitter_scale;
            (jx, jy)
        })
        .collect();

    let snapshot: &[Agent] = agents;
    let forces: Vec<(f64, f64)> = (0..snapshot.len())
        .into_par_iter()
        .map(|i| {
            let (fx, fy) = pair_force(i, snapshot, hash, ctx);
            (fx + jitter[i].0, fy + jitter[i].1)
        })
        .collect();

    let step = if dt.is_finite() { dt.max(0.0) } else { 0.0 } * ctx.params.speed;
    let pad = cfg.boundary_padding;
    let (max_x, max_y) = ((ctx.width - pad).max(pad), (ctx.height - pad).max(pad));
    let mut total = 0.0;

    for (agent, &(mut fx, mut fy)) in agents.iter_mut().zip(forces.iter()) {
        if !fx.is_finite() || !fy.is_finite() {
            fx = 0.0;
            fy = 0.0;
            stats.sanitized += 1;
        }
        total += fx.hypot(fy);

        agent.vx = (agent.vx + fx * cfg.force_scale) * cfg.damping;
        agent.vy = (agent.vy + fy * cfg.force_scale) * cfg.damping;
        if !agent.vx.is_finite() || !agent.vy.is_finite() {
            agent.vx = 0.0;
            agent.vy = 0.0;
            stats.sanitized += 1;
        }
        let nx = agent.x + agent.vx * step;
        let ny = agent.y + agent.vy * step;
        if nx.is_finite() && ny.is_finite() {
            agent.x = nx;
            agent.y = ny;
        }

        if agent.x < pad || agent.x > max_x {
            agent.x = agent.x.clamp(pad, max_x);
            agent.vx = -agent.vx;
            stats.boundary_hits += 1;
        }
        if agent.y < pad || agent.y > max_y {
            agent.y = agent.y.clamp(pad, max_y);
            agent.vy = -agent.vy;
            stats.boundary_hits += 1;
        }
        agent.age += dt.max(0.0);
    }

    stats.mean_force = total / agents.len() as f64;
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    struct Fixture {
        params: Parameters,
        config: AgentConfig,
        adhesion: AdhesionMatrix,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                params: Parameters {
                    temperature: 0.0,
                    ..Parameters::for_mode(crate::config::EngineMode::OffLattice)
                },
                config: AgentConfig::default(),
                adhesion: AdhesionMatrix::default(),
            }
        }

        fn ctx(&self) -> ForceContext<'_> {
            ForceContext {
                params: &self.params,
                config: &self.config,
                adhesion: &self.adhesion,
                width: 600.0,
                height: 600.0,
            }
        }
    }

    fn built(agents: &[Agent]) -> SpatialHash {
        let mut hash = SpatialHash::new(12.0, 600.0, 600.0);
        let positions: Vec<_> = agents.iter().map(|a| (a.x, a.y)).collect();
        hash.build(&positions);
        hash
    }

    #[test]
    fn test_overlapping_pair_repels() {
        let f = Fixture::new();
        let agents = vec![
            Agent::new(300.0, 300.0, CellType::Embryo),
            Agent::new(302.0, 300.0, CellType::Embryo),
        ];
        let hash = built(&agents);
        let (fx, fy) = pair_force(0, &agents, &hash, &f.ctx());
        assert!(fx < 0.0);
        assert!(fy.abs() < 1e-12);
    }

    #[test]
    fn test_same_type_attracts_beyond_preferred_distance() {
        let f = Fixture::new();
        let agents = vec![
            Agent::new(300.0, 300.0, CellType::Body),
            Agent::new(310.0, 300.0, CellType::Body),
        ];
        let hash = built(&agents);
        let (fx, _) = pair_force(0, &agents, &hash, &f.ctx());
        assert!(fx > 0.0);
    }

    #[test]
    fn test_coincident_agents_are_skipped() {
        let f = Fixture::new();
        let agents = vec![
            Agent::new(300.0, 300.0, CellType::Body),
            Agent::new(300.0, 300.0, CellType::Body),
        ];
        let hash = built(&agents);
        let (fx, fy) = pair_force(0, &agents, &hash, &f.ctx());
        assert_eq!((fx, fy), (0.0, 0.0));
    }

    #[test]
    fn test_head_agents_are_pulled_to_head_anchor() {
        let f = Fixture::new();
        let agents = vec![Agent::new(300.0, 400.0, CellType::Head)];
        let hash = built(&agents);
        let (fx, fy) = pair_force(0, &agents, &hash, &f.ctx());
        assert!(fx.abs() < 1e-12);
        assert!((fy + f.config.head_pull).abs() < 1e-12);
    }

    #[test]
    fn test_boundary_reflects_velocity() {
        let f = Fixture::new();
        let mut agents = vec![Agent::new(5.0, 300.0, CellType::Embryo)];
        agents[0].vx = -10.0;
        let mut hash = SpatialHash::new(12.0, 600.0, 600.0);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let stats = integrate_forces(&mut agents, &mut hash, &f.ctx(), 1.0, &mut rng);
        assert_eq!(agents[0].x, 4.0);
        assert!(agents[0].vx > 0.0);
        assert_eq!(stats.boundary_hits, 1);
        assert_eq!(agents[0].age, 1.0);
    }

    #[test]
    fn test_crowded_cluster_spreads_out() {
        let f = Fixture::new();
        let mut agents: Vec<Agent> = (0..25)
            .map(|i| Agent::new(300.0 + (i % 5) as f64, 300.0 + (i / 5) as f64, CellType::Embryo))
            .collect();
        let mut hash = SpatialHash::new(12.0, 600.0, 600.0);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let spread = |a: &[Agent]| {
            let n = a.len() as f64;
            let (mx, my) = (a.iter().map(|p| p.x).sum::<f64>() / n, a.iter().map(|p| p.y).sum::<f64>() / n);
            a.iter().map(|p| (p.x - mx).hypot(p.y - my)).sum::<f64>() / n
        };
        let before = spread(&agents);
        for _ in 0..30 {
            integrate_forces(&mut agents, &mut hash, &f.ctx(), 1.0, &mut rng);
        }
        assert!(spread(&agents) > before);
        assert!(agents.iter().all(Agent::is_finite));
    }

    #[test]
    fn test_extreme_parameters_stay_finite() {
        let mut f = Fixture::new();
        f.params.temperature = 1e300;
        f.params.adhesion_base = -1e300;
        f.params.speed = 1e300;
        let mut agents: Vec<Agent> = (0..10)
            .map(|i| Agent::new(300.0 + i as f64 * 6.0, 300.0, CellType::Body))
            .collect();
        let mut hash = SpatialHash::new(12.0, 600.0, 600.0);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..5 {
            integrate_forces(&mut agents, &mut hash, &f.ctx(), 1.0, &mut rng);
        }
        assert!(agents.iter().all(Agent::is_finite));
        assert!(agents.iter().all(|a| (4.0..=596.0).contains(&a.x)));
    }
}
