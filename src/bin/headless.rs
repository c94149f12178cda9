//! Headless Ecosystem Runner
//!
//! Runs the ecosystem for a fixed number of ticks without player input and
//! prints a summary, as JSON or text. Simulated frames of `--frame-ms` are
//! fed through the fixed-step driver, so frame pacing and backlog dropping
//! behave as they would under a real-time front end.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use serde::Serialize;

use saurian::core::config::SimulationConfig;
use saurian::driver::FixedStepDriver;
use saurian::ecosystem::Ecosystem;
use saurian::entity::Species;
use saurian::persistence::{EcosystemHealth, SaveSlots, DEFAULT_SAVE_DIR};
use saurian::simulation::PlayerInput;

/// Headless Ecosystem Runner - batch runs for tuning and regression checks
#[derive(Parser, Debug)]
#[command(name = "headless")]
#[command(about = "Run the dinosaur ecosystem without a front end and print a summary")]
struct Args {
    /// Number of ticks to simulate
    #[arg(long, default_value_t = 1000)]
    ticks: u64,

    /// Simulated frame length in milliseconds (defaults to one tick)
    #[arg(long)]
    frame_ms: Option<u64>,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// TOML file overriding simulation constants
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: String,

    /// Save the final state to this slot
    #[arg(long)]
    save: Option<String>,

    /// Directory holding save slots
    #[arg(long, default_value = DEFAULT_SAVE_DIR)]
    save_dir: PathBuf,
}

/// JSON output structure
#[derive(Serialize)]
struct RunSummary {
    seed: u64,
    ticks: u64,
    animals: usize,
    plants: usize,
    corpses: usize,
    health: EcosystemHealth,
    species: BTreeMap<String, usize>,
    events: BTreeMap<&'static str, usize>,
    extinct: Vec<String>,
}

impl RunSummary {
    fn collect(world: &Ecosystem, events: BTreeMap<&'static str, usize>) -> Self {
        let species: BTreeMap<String, usize> = Species::ALL
            .iter()
            .map(|s| (s.to_string(), world.species_count(*s)))
            .collect();
        let extinct = Species::ALL
            .iter()
            .filter(|s| !s.is_player() && world.species_count(**s) == 0)
            .map(|s| s.to_string())
            .collect();
        let animals = world.live_animal_count();
        let plants = world.live_plant_count();

        Self {
            seed: world.seed,
            ticks: world.current_tick,
            animals,
            plants,
            corpses: world.corpses.len(),
            health: EcosystemHealth::assess(animals, plants, world.max_animals),
            species,
            events,
            extinct,
        }
    }

    fn print_text(&self) {
        println!("=== ECOSYSTEM RUN (seed {}) ===", self.seed);
        println!("Ticks: {}", self.ticks);
        println!("Animals: {}  Plants: {}  Corpses: {}", self.animals, self.plants, self.corpses);
        println!("Health: {}", self.health);
        println!("\nPopulation:");
        for (name, count) in &self.species {
            println!("  {:<14} {}", name, count);
        }
        println!("\nEvents:");
        for (kind, count) in &self.events {
            println!("  {:<14} {}", kind, count);
        }
        if !self.extinct.is_empty() {
            println!("\nExtinct: {}", self.extinct.join(", "));
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "saurian=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => SimulationConfig::load(path)?,
        None => SimulationConfig::default(),
    };
    let seed = args.seed.unwrap_or_else(rand::random);

    let mut driver = FixedStepDriver::from_config(&config);
    let frame = args
        .frame_ms
        .map(|ms| Duration::from_millis(ms.max(1)))
        .unwrap_or_else(|| driver.dt());
    let mut world = Ecosystem::with_initial_population(config, seed);
    let mut tally: BTreeMap<&'static str, usize> = BTreeMap::new();
    let mut dropped = Duration::ZERO;

    while world.current_tick < args.ticks {
        // Never overshoot the requested tick count
        let left = u32::try_from(args.ticks - world.current_tick).unwrap_or(u32::MAX);
        let elapsed = frame.min((driver.dt() * left).saturating_sub(driver.pending()));
        let report = driver.advance(&mut world, elapsed, PlayerInput::idle(), None);
        dropped += report.dropped;
        for event in report.events {
            *tally.entry(event.kind()).or_insert(0) += 1;
        }
    }
    if !dropped.is_zero() {
        tracing::warn!("Dropped {:?} of simulated backlog", dropped);
    }

    if let Some(slot) = &args.save {
        let slots = SaveSlots::new(&args.save_dir)?;
        slots.save(slot, &world, false, 0)?;
    }

    let summary = RunSummary::collect(&world, tally);
    match args.format.as_str() {
        "text" => summary.print_text(),
        _ => println!("{}", serde_json::to_string_pretty(&summary)?),
    }

    Ok(())
}
