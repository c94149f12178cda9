//! Saurian - Entry Point
//!
//! Interactive terminal loop. Each command advances or inspects the
//! ecosystem; the T-Rex is steered with `move` and `attack`.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;

use saurian::core::config::SimulationConfig;
use saurian::core::error::Result;
use saurian::driver::Autosaver;
use saurian::ecosystem::Ecosystem;
use saurian::entity::Species;
use saurian::persistence::{Compatibility, SaveSlots, DEFAULT_SAVE_DIR};
use saurian::simulation::{run_simulation_tick, Direction, PlayerInput, SimulationEvent};

#[derive(Parser, Debug)]
#[command(name = "saurian")]
#[command(about = "Dinosaur ecosystem simulation")]
struct Args {
    /// TOML file overriding simulation constants
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Directory holding save slots
    #[arg(long, default_value = DEFAULT_SAVE_DIR)]
    save_dir: PathBuf,

    /// Slot used by autosave
    #[arg(long, default_value = "autosave")]
    autosave_slot: String,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "saurian=info".into()),
        )
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => SimulationConfig::load(path)?,
        None => SimulationConfig::default(),
    };
    let seed = args.seed.unwrap_or_else(rand::random);

    tracing::info!("Saurian starting with seed {}", seed);

    let mut world = Ecosystem::with_initial_population(config, seed);
    let mut autosaver = Autosaver::new(SaveSlots::new(&args.save_dir)?, args.autosave_slot.clone());

    print_help();

    loop {
        display_status(&world);

        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        let mut parts = line.split_whitespace();
        let Some(command) = parts.next() else {
            continue;
        };
        let arg = parts.next();

        match command {
            "quit" | "q" => break,
            "help" | "h" => print_help(),
            "tick" | "t" => {
                step(&mut world, &mut autosaver, PlayerInput::idle());
            }
            "run" => match arg.and_then(|n| n.parse::<u64>().ok()) {
                Some(n) => {
                    let mut tally = EventTally::default();
                    for _ in 0..n {
                        tally.add(&step_quiet(&mut world, &mut autosaver, PlayerInput::idle()));
                    }
                    println!(
                        "Completed {} ticks. Now at tick {}. {}",
                        n,
                        world.current_tick,
                        tally
                    );
                }
                None => println!("Usage: run <number>"),
            },
            "status" | "s" => display_detailed_status(&world),
            "move" | "m" => match arg.map(str::parse::<Direction>) {
                Some(Ok(direction)) => {
                    step(&mut world, &mut autosaver, PlayerInput::moving(direction));
                }
                Some(Err(e)) => println!("{}", e),
                None => println!("Usage: move <n|ne|e|se|s|sw|w|nw>"),
            },
            "attack" | "a" => {
                step(&mut world, &mut autosaver, PlayerInput::attacking());
            }
            "save" => match arg {
                Some(slot) => {
                    let interval = autosaver.schedule.interval();
                    match autosaver.slots.save(slot, &world, false, interval) {
                        Ok(meta) => println!("Saved slot '{}': {}", slot, meta.summary()),
                        Err(e) => println!("Save failed: {}", e),
                    }
                }
                None => println!("Usage: save <slot>"),
            },
            "load" => match arg {
                Some(slot) => match autosaver.slots.load(slot) {
                    Ok((loaded, compatibility)) => {
                        world = loaded;
                        match compatibility {
                            Compatibility::Current => println!("Loaded slot '{}'.", slot),
                            Compatibility::Legacy => {
                                println!("Loaded slot '{}' (legacy format).", slot)
                            }
                        }
                    }
                    Err(e) => println!("Load failed: {}", e),
                },
                None => println!("Usage: load <slot>"),
            },
            "slots" => match autosaver.slots.list() {
                Ok(list) if list.is_empty() => println!("No saved slots."),
                Ok(list) => {
                    for (name, meta) in list {
                        println!("  {:<12} {}", name, meta.summary());
                    }
                }
                Err(e) => println!("Could not list slots: {}", e),
            },
            "autosave" => {
                let interval = autosaver.schedule.cycle();
                if interval == 0 {
                    println!("Autosave off.");
                } else {
                    println!("Autosave every {} ticks to slot '{}'.", interval, autosaver.slot);
                }
            }
            _ => println!("Unknown command. Type 'help' for the list."),
        }
    }

    println!(
        "\nGoodbye! Final state: {} animals, {} plants, {} ticks elapsed.",
        world.live_animal_count(),
        world.live_plant_count(),
        world.current_tick
    );
    Ok(())
}

fn print_help() {
    println!("\n=== SAURIAN ===");
    println!("A dinosaur ecosystem. You are the T-Rex.");
    println!();
    println!("Commands:");
    println!("  tick / t        - Advance simulation by one tick");
    println!("  run <n>         - Run n simulation ticks");
    println!("  move <dir>      - Move the T-Rex one tick (n, ne, e, se, s, sw, w, nw)");
    println!("  attack / a      - Attack the nearest animal in range");
    println!("  status / s      - Show detailed status");
    println!("  save <slot>     - Save to a slot");
    println!("  load <slot>     - Load a slot");
    println!("  slots           - List saved slots");
    println!("  autosave        - Cycle autosave interval (off, 300, 600, 1200)");
    println!("  quit / q        - Exit");
    println!();
}

fn step_quiet(
    world: &mut Ecosystem,
    autosaver: &mut Autosaver,
    input: PlayerInput,
) -> Vec<SimulationEvent> {
    let events = run_simulation_tick(world, input);
    autosaver.after_tick(world);
    events
}

fn step(world: &mut Ecosystem, autosaver: &mut Autosaver, input: PlayerInput) {
    let events = step_quiet(world, autosaver, input);
    for event in &events {
        if let Some(line) = describe_event(event) {
            println!("  {}", line);
        }
    }
    println!("Tick {} complete.", world.current_tick);
}

fn describe_event(event: &SimulationEvent) -> Option<String> {
    match event {
        SimulationEvent::Hit { attacker_species, damage, .. } => {
            Some(format!("{} hit for {}", attacker_species, damage))
        }
        SimulationEvent::CorpseSpawned { species, position, .. } => Some(format!(
            "{} corpse at ({:.0}, {:.0})",
            species, position.x, position.y
        )),
        SimulationEvent::Born { species, .. } => Some(format!("A {} was born", species)),
        SimulationEvent::Died { species, cause, .. } => {
            Some(format!("A {} died ({:?})", species, cause))
        }
        SimulationEvent::Ate { .. } => None,
    }
}

#[derive(Default)]
struct EventTally {
    hits: usize,
    births: usize,
    deaths: usize,
    corpses: usize,
}

impl EventTally {
    fn add(&mut self, events: &[SimulationEvent]) {
        for event in events {
            match event {
                SimulationEvent::Hit { .. } => self.hits += 1,
                SimulationEvent::Born { .. } => self.births += 1,
                SimulationEvent::Died { .. } => self.deaths += 1,
                SimulationEvent::CorpseSpawned { .. } => self.corpses += 1,
                SimulationEvent::Ate { .. } => {}
            }
        }
    }
}

impl std::fmt::Display for EventTally {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} hits, {} births, {} deaths, {} corpses",
            self.hits, self.births, self.deaths, self.corpses
        )
    }
}

fn display_status(world: &Ecosystem) {
    let player = world
        .player()
        .map(|p| format!("T-Rex {}hp {:.0}en", p.health, p.energy))
        .unwrap_or_else(|| "no player".into());
    println!(
        "[tick {}] {} animals, {} plants, {} corpses | {}",
        world.current_tick,
        world.live_animal_count(),
        world.live_plant_count(),
        world.corpses.len(),
        player
    );
}

fn display_detailed_status(world: &Ecosystem) {
    println!("\n=== ECOSYSTEM STATUS (tick {}) ===", world.current_tick);
    println!("Population ({} / {}):", world.live_animal_count(), world.max_animals);
    for species in Species::ALL {
        println!(
            "  {:<14} {:>3} / {}",
            species.to_string(),
            world.species_count(species),
            world.species_caps.cap(species)
        );
    }
    println!("Plants: {}", world.live_plant_count());
    println!("Corpses: {}", world.corpses.len());

    println!("\nAnimals:");
    for idx in world.iter_living() {
        let a = &world.animals[idx];
        println!(
            "  {:<14} hp {:>3}  en {:>5.1}  age {:>5}  at ({:>5.0}, {:>5.0})",
            a.name, a.health, a.energy, a.age, a.position.x, a.position.y
        );
    }
    println!();
}
