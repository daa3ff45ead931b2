//! leash_sim - Headless scenario runner for leash_core

mod scenario;
mod simulation;

use clap::Parser;
use leash_core::logging;
use scenario::{Scenario, SimError};
use simulation::Simulation;
use std::path::PathBuf;

/// Run a patrol helicopter leash scenario
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Scenario TOML file (uses the built-in scenario when omitted)
    scenario: Option<PathBuf>,

    /// Override the scenario seed
    #[arg(long)]
    seed: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), SimError> {
    let args = Args::parse();
    logging::init(args.verbose);

    let mut scenario = match &args.scenario {
        Some(path) => Scenario::load(path)?,
        None => Scenario::builtin()?,
    };
    if let Some(seed) = args.seed {
        scenario.seed = seed;
    }
    let settings = scenario.resolve_settings()?;

    let stats = Simulation::new(&scenario, settings).run();

    println!("Ticks run:          {}", stats.ticks_run);
    println!("Hits:               {}", stats.hits);
    println!("Retargets:          {}", stats.retargets);
    println!("Broadcasts:         {}", stats.broadcasts);
    println!("Messages delivered: {}", stats.messages_delivered);
    match stats.destroyed_at {
        Some(tick) => println!("Heli destroyed at:  tick {}", tick),
        None => println!("Heli survived"),
    }
    if let Some(distance) = stats.final_distance {
        println!("Final distance:     {:.1}m", distance);
    }

    Ok(())
}
