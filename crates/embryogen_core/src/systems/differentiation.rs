//! Template-driven identity assignment.
//!
//! The lattice pass tests every anchor independently, in anchor order, so a
//! site can be claimed by several anchors in one tick; [`CellType::may_become`]
//! settles who wins. The agent pass scores all candidate anchors and lets each
//! agent commit to at most one.

use crate::config::{AgentConfig, LatticeConfig, Parameters};
use crate::lattice::Grid;
use crate::morphogen::MorphogenField;
use crate::template::{AnatomicalTemplate, AnchorKind};
use embryogen_data::{Agent, CellType};
use rand::Rng;

/// Extra head-anchor probability per unit of raw head morphogen (lattice).
const HEAD_MORPHOGEN_GAIN: f64 = 0.8;
/// Morphogen factor gains for agents.
const AGENT_HEAD_GAIN: f64 = 5.0;
const AGENT_BODY_GAIN: f64 = 2.5;
/// Young agents are more plastic: `1 + AGE_GAIN * exp(-AGE_DECAY * age)`.
const AGE_GAIN: f64 = 1.2;
const AGE_DECAY: f64 = 0.005;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DifferentiationStats {
    pub relabeled: usize,
    pub umbilical: usize,
}

impl DifferentiationStats {
    pub fn total(&self) -> usize {
        self.relabeled + self.umbilical
    }
}

/// Differentiation boost by developmental phase: strongest during
/// organogenesis (weeks 3-8), tapering through the early fetal weeks.
#[inline]
pub fn phase_multiplier(week: u32) -> f64 {
    match week {
        3..=8 => 1.9,
        9..=12 => 1.3,
        _ => 0.9,
    }
}

pub struct LatticeDifferentiation<'a> {
    pub params: &'a Parameters,
    pub config: &'a LatticeConfig,
    pub template: &'a AnatomicalTemplate,
    pub morphogens: &'a MorphogenField,
}

/// One lattice pass: every active anchor, then the umbilical cord.
///
/// A site is inside an anchor when its shape distance is strictly below the
/// anchor radius, widened to `min_anchor_radius` so that anchors scaled down
/// to a small lattice still cover a few sites.
pub fn differentiate_lattice(
    grid: &mut Grid,
    ctx: &LatticeDifferentiation,
    rng: &mut impl Rng,
) -> DifferentiationStats {
    let mut stats = DifferentiationStats::default();
    let week = ctx.template.week();
    let phase = phase_multiplier(week);
    let base = ctx.params.differentiation_rate * phase;
    let n = grid.size() as i64;

    for (kind, anchor) in ctx.template.active() {
        let Some(target) = kind.target() else {
            continue;
        };
        let shape = kind.shape();
        let radius = anchor.radius.max(ctx.config.min_anchor_radius);
        let rate = base * kind.lattice_factor();

        let x0 = ((anchor.x - radius).floor() as i64).max(0);
        let x1 = ((anchor.x + radius).ceil() as i64).min(n - 1);
        let y0 = ((anchor.y - radius).floor() as i64).max(0);
        let y1 = ((anchor.y + radius).ceil() as i64).min(n - 1);

        for y in y0..=y1 {
            for x in x0..=x1 {
                let (ux, uy) = (x as usize, y as usize);
                let current = grid.get(ux, uy);
                if current == CellType::Placenta {
                    continue;
                }
                if anchor.distance(shape, x as f64, y as f64) >= radius {
                    continue;
                }
                let prob = if kind == AnchorKind::Head {
                    rate * (1.0 + HEAD_MORPHOGEN_GAIN * ctx.morphogens.head_at(ux, uy))
                } else {
                    rate
                };
                if rng.gen::<f64>() < prob && current.may_become(target) {
                    grid.set(ux, uy, target);
                    stats.relabeled += 1;
                }
            }
        }
    }

    if let Some(cord) = ctx.template.umbilical() {
        for (x, y) in cord.sites() {
            let Some(current) = grid.get_checked(x, y) else {
                continue;
            };
            if !current.may_become(CellType::Umbilical) {
                continue;
            }
            if rng.gen::<f64>() < ctx.config.umbilical_probability {
                grid.set(x as usize, y as usize, CellType::Umbilical);
                stats.umbilical += 1;
            }
        }
    }
    stats
}

pub struct AgentDifferentiation<'a> {
    pub params: &'a Parameters,
    pub config: &'a AgentConfig,
    pub template: &'a AnatomicalTemplate,
    pub morphogens: &'a MorphogenField,
    pub width: f64,
    pub height: f64,
}

/// Best anchor for one agent, if any: the highest
/// `priority * morphogen * distance falloff * age` score among active anchors
/// the agent lies within `differentiation_tolerance * radius` of and may
/// become. Equal scores go to the lexically smaller anchor name.
pub fn best_candidate(agent: &Agent, ctx: &AgentDifferentiation) -> Option<(AnchorKind, f64)> {
    let (mh, mb) = ctx
        .morphogens
        .sample_normalized(agent.x, agent.y, ctx.width, ctx.height);
    let age_factor = 1.0 + AGE_GAIN * (-AGE_DECAY * agent.age.max(0.0)).exp();
    let mut best: Option<(AnchorKind, f64)> = None;

    for (kind, anchor) in ctx.template.active() {
        let Some(target) = kind.target() else {
            continue;
        };
        if anchor.radius <= 0.0 || !agent.cell_type.may_become(target) {
            continue;
        }
        let reach = ctx.config.differentiation_tolerance * anchor.radius;
        let d = anchor.distance(kind.shape(), agent.x, agent.y);
        if d >= reach {
            continue;
        }
        let morph = if kind.is_head_driven() {
            1.0 + AGENT_HEAD_GAIN * mh
        } else {
            1.0 + AGENT_BODY_GAIN * mb
        };
        let score = kind.priority() * morph * (1.0 - d / reach) * age_factor;
        if best.map_or(true, |incumbent| outranks((kind, score), incumbent)) {
            best = Some((kind, score));
        }
    }
    best
}

/// Higher score wins; on equal scores the lexically smaller name wins.
#[inline]
pub fn outranks(candidate: (AnchorKind, f64), incumbent: (AnchorKind, f64)) -> bool {
    candidate.1 > incumbent.1 || (candidate.1 == incumbent.1 && candidate.0.name() < incumbent.0.name())
}

/// One agent pass. Placenta agents are left alone. An agent that picked a
/// candidate commits with probability `rate * phase * score / 100`.
pub fn differentiate_agents(
    agents: &mut [Agent],
    ctx: &AgentDifferentiation,
    rng: &mut impl Rng,
) -> DifferentiationStats {
    let mut stats = DifferentiationStats::default();
    let base = ctx.params.differentiation_rate * phase_multiplier(ctx.template.week());

    for agent in agents.iter_mut() {
        if agent.cell_type == CellType::Placenta {
            continue;
        }
        let Some((kind, score)) = best_candidate(agent, ctx) else {
            continue;
        };
        let prob = base * score / 100.0;
        if rng.gen::<f64>() < prob {
            if let Some(target) = kind.target() {
                agent.cell_type = target;
                stats.relabeled += 1;
            }
        }
    }

    if let Some(cord) = ctx.template.umbilical() {
        for agent in agents.iter_mut() {
            if !agent.cell_type.may_become(CellType::Umbilical) {
                continue;
            }
            if cord.distance_to(agent.x, agent.y) >= ctx.config.umbilical_width {
                continue;
            }
            if rng.gen::<f64>() < ctx.config.umbilical_probability {
                agent.cell_type = CellType::Umbilical;
                stats.umbilical += 1;
            }
        }
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineMode;
    use crate::template::Frame;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn filled(size: usize, cell: CellType) -> Grid {
        let mut grid = Grid::new(size);
        for y in 0..size {
            for x in 0..size {
                grid.set(x, y, cell);
            }
        }
        grid
    }

    #[test]
    fn test_phase_multiplier() {
        assert_eq!(phase_multiplier(2), 0.9);
        assert_eq!(phase_multiplier(5), 1.9);
        assert_eq!(phase_multiplier(11), 1.3);
        assert_eq!(phase_multiplier(30), 0.9);
    }

    #[test]
    fn test_lattice_pass_never_demotes_head_region() {
        let params = Parameters {
            differentiation_rate: 1.0,
            ..Parameters::default()
        };
        let config = LatticeConfig::default();
        let template = AnatomicalTemplate::for_week(11, &Frame::for_lattice(150));
        let morphogens = MorphogenField::new(150);
        let ctx = LatticeDifferentiation {
            params: &params,
            config: &config,
            template: &template,
            morphogens: &morphogens,
        };
        let mut grid = filled(150, CellType::Head);
        grid.set(10, 10, CellType::Brain);
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..5 {
            differentiate_lattice(&mut grid, &ctx, &mut rng);
        }
        for (_, _, cell) in grid.sites() {
            assert!(cell != CellType::Body && !cell.is_limb());
            assert!(!cell.is_organ() || cell == CellType::Eye);
        }
        assert!(grid.volume(CellType::Brain) > 1);
        assert!(grid.volume(CellType::Eye) > 0);
    }

    #[test]
    fn test_lattice_pass_leaves_placenta_and_gated_anchors() {
        let params = Parameters {
            differentiation_rate: 1.0,
            ..Parameters::default()
        };
        let config = LatticeConfig::default();
        let morphogens = MorphogenField::new(150);
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let template = AnatomicalTemplate::for_week(4, &Frame::for_lattice(150));
        let ctx = LatticeDifferentiation {
            params: &params,
            config: &config,
            template: &template,
            morphogens: &morphogens,
        };
        let mut grid = filled(150, CellType::Embryo);
        differentiate_lattice(&mut grid, &ctx, &mut rng);
        assert_eq!(grid.volume(CellType::Heart), 0);
        assert_eq!(grid.volume(CellType::Liver), 0);
        assert!(grid.volume(CellType::Body) > 0);

        let mut placenta = filled(150, CellType::Placenta);
        let stats = differentiate_lattice(&mut placenta, &ctx, &mut rng);
        assert_eq!(stats.total(), 0);
        assert_eq!(placenta.volume(CellType::Placenta), 150 * 150);
    }

    #[test]
    fn test_lattice_cord_converts_only_undifferentiated_sites() {
        let params = Parameters {
            differentiation_rate: 0.0,
            ..Parameters::default()
        };
        let config = LatticeConfig {
            umbilical_probability: 1.0,
            ..LatticeConfig::default()
        };
        let template = AnatomicalTemplate::for_week(11, &Frame::for_lattice(150));
        let morphogens = MorphogenField::new(150);
        let ctx = LatticeDifferentiation {
            params: &params,
            config: &config,
            template: &template,
            morphogens: &morphogens,
        };
        let mut grid = Grid::new(150);
        grid.set(75, 95, CellType::Body);
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let stats = differentiate_lattice(&mut grid, &ctx, &mut rng);
        assert_eq!(stats.umbilical, 11);
        assert_eq!(grid.get(75, 95), CellType::Body);
        assert_eq!(grid.get(75, 91), CellType::Umbilical);
    }

    fn agent_ctx<'a>(
        params: &'a Parameters,
        config: &'a AgentConfig,
        template: &'a AnatomicalTemplate,
        morphogens: &'a MorphogenField,
    ) -> AgentDifferentiation<'a> {
        AgentDifferentiation {
            params,
            config,
            template,
            morphogens,
            width: 600.0,
            height: 600.0,
        }
    }

    #[test]
    fn test_best_candidate_prefers_head_over_body() {
        let params = Parameters::for_mode(EngineMode::OffLattice);
        let config = AgentConfig::default();
        let template = AnatomicalTemplate::for_week(11, &Frame::for_area(600.0, 600.0));
        let morphogens = MorphogenField::new(150);
        let ctx = agent_ctx(&params, &config, &template, &morphogens);

        let head = template.get(AnchorKind::Head).unwrap();
        let agent = Agent::new(head.x + 30.0, head.y, CellType::Embryo);
        let (kind, score) = best_candidate(&agent, &ctx).unwrap();
        assert_eq!(kind, AnchorKind::Head);
        assert!(score > 0.0);

        let far = Agent::new(20.0, 20.0, CellType::Embryo);
        assert!(best_candidate(&far, &ctx).is_none());
    }

    #[test]
    fn test_equal_scores_break_ties_by_name() {
        let left = (AnchorKind::KidneyLeft, 20.0);
        let right = (AnchorKind::KidneyRight, 20.0);
        assert!(outranks(left, right));
        assert!(!outranks(right, left));
        assert!(!outranks(left, left));
        assert!(outranks((AnchorKind::Bladder, 20.5), left));
        // "head" sorts before "heart"
        assert!(outranks((AnchorKind::Head, 1.0), (AnchorKind::Heart, 1.0)));
    }

    #[test]
    fn test_agent_pass_commits_once_and_spares_placenta() {
        let params = Parameters {
            differentiation_rate: 100.0,
            ..Parameters::for_mode(EngineMode::OffLattice)
        };
        let config = AgentConfig::default();
        let template = AnatomicalTemplate::for_week(11, &Frame::for_area(600.0, 600.0));
        let morphogens = MorphogenField::new(150);
        let ctx = agent_ctx(&params, &config, &template, &morphogens);
        let body = *template.get(AnchorKind::Body).unwrap();

        let mut agents = vec![
            Agent::new(body.x, body.y + 30.0, CellType::Embryo),
            Agent::new(body.x, body.y + 30.0, CellType::Placenta),
        ];
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let stats = differentiate_agents(&mut agents, &ctx, &mut rng);
        assert_eq!(stats.relabeled, 1);
        assert_ne!(agents[0].cell_type, CellType::Embryo);
        assert_eq!(agents[1].cell_type, CellType::Placenta);
    }

    #[test]
    fn test_agent_cord_pass() {
        let params = Parameters {
            differentiation_rate: 0.0,
            ..Parameters::for_mode(EngineMode::OffLattice)
        };
        let config = AgentConfig {
            umbilical_probability: 1.0,
            ..AgentConfig::default()
        };
        let template = AnatomicalTemplate::for_week(11, &Frame::for_area(600.0, 600.0));
        let morphogens = MorphogenField::new(150);
        let ctx = agent_ctx(&params, &config, &template, &morphogens);
        let cord = *template.umbilical().unwrap();

        let mut agents = vec![
            Agent::new(cord.x + 1.0, cord.start_y + 5.0, CellType::Embryo),
            Agent::new(cord.x + 10.0, cord.start_y + 5.0, CellType::Embryo),
            Agent::new(cord.x, cord.start_y + 5.0, CellType::Heart),
        ];
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let stats = differentiate_agents(&mut agents, &ctx, &mut rng);
        assert_eq!(stats.umbilical, 1);
        assert_eq!(agents[0].cell_type, CellType::Umbilical);
        assert_eq!(agents[1].cell_type, CellType::Embryo);
        assert_eq!(agents[2].cell_type, CellType::Heart);
    }
}
