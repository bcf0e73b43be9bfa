use anyhow::{Context, Result};
use clap::Parser;
use embryogen_lib::app::{run_headless, run_sweep};
use embryogen_lib::model::config::{AppConfig, EngineMode};
use embryogen_lib::model::init_logging;

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless fetal development simulator", long_about = None)]
struct Args {
    /// RNG seed; overrides the config file
    #[arg(short, long)]
    seed: Option<u64>,

    /// Gestational week to run to
    #[arg(short, long, default_value_t = 11)]
    weeks: u32,

    /// Rearrangement mode (lattice or off-lattice); overrides the config file
    #[arg(short, long)]
    mode: Option<EngineMode>,

    /// Custom config file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Sweep this live parameter instead of a single run
    #[arg(long, requires = "values")]
    sweep: Option<String>,

    /// Comma-separated values for --sweep
    #[arg(long, value_delimiter = ',')]
    values: Vec<f64>,

    /// Ticks per sweep point
    #[arg(long, default_value_t = 70)]
    ticks: u64,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging();

    let mut config = AppConfig::load(&args.config)
        .with_context(|| format!("Failed to load {}", args.config))?;
    if let Some(mode) = args.mode {
        config.world.mode = mode;
        config.params = None;
    }
    if let Some(seed) = args.seed {
        config.world.seed = Some(seed);
    }

    if let Some(name) = args.sweep.as_deref() {
        let points = run_sweep(&config, name, &args.values, args.ticks)?;
        if args.json {
            println!("{}", serde_json::to_string_pretty(&points)?);
        } else {
            println!("{:>10} {:>8} {:>7} {:>10} {:>8} {:>6}", name, "cells", "organs", "diff/tick", "spread", "types");
            for p in &points {
                println!(
                    "{:>10.3} {:>8} {:>7} {:>10.4} {:>8.2} {:>6}",
                    p.value, p.cells, p.organ_count, p.differentiation_speed, p.spread, p.diversity
                );
            }
        }
        return Ok(());
    }

    let report = run_headless(config, args.weeks)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{report}");
    }
    Ok(())
}
