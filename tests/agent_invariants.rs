mod common;

use common::{mean_nearest_neighbor, EngineBuilder};
use embryogen_lib::model::state::{Agent, CellType};
use embryogen_lib::model::tissue::Tissue;

fn agents_of(tissue: &Tissue) -> &[Agent] {
    match tissue {
        Tissue::Agents(agents) => agents,
        Tissue::Lattice(_) => panic!("Expected agent tissue"),
    }
}

#[test]
fn test_population_never_shrinks_and_respects_cap() {
    let mut engine = EngineBuilder::off_lattice()
        .with_agents(300, 80)
        .with_config(|c| c.agents.max_population = 900)
        .with_param("growth_rate", 0.5)
        .build();

    let mut last = engine.census().population;
    for _ in 0..40 {
        let report = engine.tick();
        let population = engine.census().population;
        assert!(population >= last, "population shrank from {last} to {population}");
        assert!(population <= 900);
        assert!(report.growth.births <= 900);
        last = population;
    }
    assert_eq!(last, 900, "an aggressive growth rate should reach the cap");
    assert!(engine.metrics().counter("divisions") > 0);
}

#[test]
fn test_placenta_agents_keep_their_identity() {
    let mut engine = EngineBuilder::off_lattice()
        .with_agents(200, 90)
        .with_param("growth_rate", 0.1)
        .build();
    engine.run(42);

    let agents = agents_of(engine.tissue());
    let placenta = agents.iter().filter(|a| a.cell_type == CellType::Placenta).count();
    assert_eq!(placenta, 90);
}

#[test]
fn test_clustered_agents_spread_apart() {
    let mut engine = EngineBuilder::off_lattice()
        .with_agents(400, 0)
        .with_param("growth_rate", 0.0)
        .with_config(|c| c.agents.seed_radius = 20.0)
        .build();
    let initial = mean_nearest_neighbor(agents_of(engine.tissue()));
    engine.run(40);
    let settled = mean_nearest_neighbor(agents_of(engine.tissue()));

    assert!(settled > initial, "mean spacing {settled} did not grow from {initial}");
    assert!(settled > 2.5, "agents still packed at mean spacing {settled}");
}

#[test]
fn test_agents_stay_finite_and_inside_area() {
    let mut engine = EngineBuilder::off_lattice()
        .with_agents(250, 60)
        .with_param("temperature", 40.0)
        .with_param("adhesion", 25.0)
        .build();
    engine.run(30);

    let (w, h) = (engine.config().world.area_width, engine.config().world.area_height);
    for agent in agents_of(engine.tissue()) {
        assert!(agent.is_finite(), "non-finite agent {agent:?}");
        assert!((0.0..=w).contains(&agent.x) && (0.0..=h).contains(&agent.y));
    }
    assert_finite_morphogens!(engine);
}

#[test]
fn test_zero_dt_freezes_positions() {
    let mut engine = EngineBuilder::off_lattice()
        .with_agents(150, 40)
        .with_param("growth_rate", 0.0)
        .build();
    engine.run(3);
    let before: Vec<(f64, f64)> = agents_of(engine.tissue()).iter().map(|a| (a.x, a.y)).collect();

    engine.step(0.0);
    let after: Vec<(f64, f64)> = agents_of(engine.tissue()).iter().map(|a| (a.x, a.y)).collect();
    assert_eq!(engine.iteration(), 4);
    assert_eq!(before, after);
}
