//! Idlescape - Entry Point
//!
//! Loads or generates a world, then drives the session from a tokio
//! sleep per pulse. Commands are read from stdin; the world is saved on exit.

use clap::Parser;
use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use idlescape::command::Command;
use idlescape::core::config::SimulationConfig;
use idlescape::core::error::Result;
use idlescape::core::types::{now_ms, Vec2};
use idlescape::data::{BlueprintKind, GameData};
use idlescape::simulation::{PulseOutcome, Session};
use idlescape::world::persistence;
use idlescape::world::WorldState;

/// Idlescape world simulator
#[derive(Parser, Debug)]
#[command(name = "idlescape")]
#[command(about = "Run the survival world simulation with offline catch-up")]
struct Args {
    /// Save file, loaded on start and written on exit
    #[arg(long, default_value = "saves/world.json")]
    save: PathBuf,

    /// Game data TOML (resources, blueprints, recipes)
    #[arg(long)]
    data: Option<PathBuf>,

    /// Simulation config TOML
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed for reproducible drops, spawns and placement
    #[arg(long)]
    seed: Option<u64>,

    /// Run this many ticks without waiting on the wall clock, then exit
    #[arg(long)]
    headless_ticks: Option<u64>,
}

/// One parsed line of stdin
#[derive(Debug)]
enum Input {
    Command(Command),
    Status,
    Help,
    Quit,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("idlescape=info")),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SimulationConfig::load_from_toml(path)?,
        None => SimulationConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    let data = match &args.data {
        Some(path) => GameData::load_from_toml(path)?,
        None => GameData::with_defaults(),
    };

    let mut session = match persistence::load_from_file(&args.save)? {
        Some(state) => Session::from_state(state, config, data)?,
        None => Session::new(config, data, now_ms())?,
    };

    match args.headless_ticks {
        Some(ticks) => run_headless(&mut session, ticks)?,
        None => run_interactive(&mut session).await?,
    }

    persistence::save_to_file(&session.snapshot(), &args.save)?;
    Ok(())
}

/// Advance on a simulated clock, one tick interval per pulse
fn run_headless(session: &mut Session, ticks: u64) -> Result<()> {
    let step = session.config().tick_interval_ms as i64;
    let mut now = session.snapshot().timestamp;
    for _ in 0..ticks {
        now += step;
        session.pulse(now)?;
        if session.snapshot().is_game_over {
            break;
        }
    }
    print_status(&session.snapshot());
    Ok(())
}

async fn run_interactive(session: &mut Session) -> Result<()> {
    let (tx, rx) = mpsc::unbounded_channel::<Input>();
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            match parse_input(&line) {
                Some(input) => {
                    if tx.send(input).is_err() {
                        break;
                    }
                }
                None if line.trim().is_empty() => {}
                None => println!("Unknown command: {} (try 'help')", line.trim()),
            }
        }
    });

    print_help();
    drive(session, rx, tokio::signal::ctrl_c()).await
}

/// Pulse the session until `interrupt` resolves or the input channel
/// closes. The interrupt future lives across every pulse.
async fn drive<F>(
    session: &mut Session,
    mut rx: mpsc::UnboundedReceiver<Input>,
    interrupt: F,
) -> Result<()>
where
    F: Future,
{
    tokio::pin!(interrupt);

    loop {
        let delay = session.timekeeper().pulse_interval().unwrap_or(Duration::ZERO);
        tokio::select! {
            _ = &mut interrupt => {
                tracing::info!("Interrupted, stopping between ticks");
                break;
            }
            input = rx.recv() => match input {
                Some(Input::Command(command)) => session.enqueue(command),
                Some(Input::Status) => print_status(&session.snapshot()),
                Some(Input::Help) => print_help(),
                Some(Input::Quit) | None => break,
            },
            _ = tokio::time::sleep(delay) => {
                if let PulseOutcome::FastForwardPrompt { gap_ms } = session.pulse(now_ms())? {
                    println!(
                        "The world is {:.0}s behind. Type 'ff' to fast-forward or 'resume' to keep waiting.",
                        gap_ms as f64 / 1000.0
                    );
                }
            }
        }
    }
    Ok(())
}

fn parse_input(line: &str) -> Option<Input> {
    let mut parts = line.split_whitespace();
    let input = match parts.next()? {
        "pause" | "p" => Input::Command(Command::Pause),
        "resume" | "r" => Input::Command(Command::Resume),
        "ff" | "fast-forward" => Input::Command(Command::FastForward),
        "reset" => Input::Command(Command::ResetWorld),
        "status" | "s" => Input::Status,
        "help" | "h" => Input::Help,
        "quit" | "q" => Input::Quit,
        "build" => {
            let kind = BlueprintKind::parse(parts.next()?)?;
            let x = parts.next()?.parse().ok()?;
            let y = parts.next()?.parse().ok()?;
            Input::Command(Command::BuildAction {
                kind,
                location: Vec2::new(x, y),
            })
        }
        _ => return None,
    };
    Some(input)
}

fn print_help() {
    println!("\n=== IDLESCAPE ===");
    println!("Commands:");
    println!("  pause / p              - Pause the simulation");
    println!("  resume / r             - Resume after a pause");
    println!("  ff                     - Fast-forward to the present");
    println!("  build <kind> <x> <y>   - Place a blueprint (stockpile, tree_seed, grass_seed)");
    println!("  status / s             - Show world status");
    println!("  reset                  - Generate a new world");
    println!("  quit / q               - Save and exit");
    println!();
}

fn print_status(state: &WorldState) {
    println!(
        "Tick {} | {} actors, {} resources, {} blueprints, {} structures{}",
        state.tick,
        state.actor_count(),
        state.resources().count(),
        state.blueprints().count(),
        state.structures().count(),
        if state.is_game_over { " | GAME OVER" } else { "" }
    );
    for entity in state.actors() {
        if let Some(actor) = entity.as_actor() {
            let held: Vec<String> = actor
                .inventory
                .slots()
                .iter()
                .flatten()
                .map(|s| format!("{}x{}", s.item, s.quantity))
                .collect();
            println!(
                "  {} at ({:.0}, {:.0}) hp {:.0}/{:.0} hunger {:.2} thirst {:.2} [{}]",
                entity.id,
                entity.position.x,
                entity.position.y,
                actor.vitals.health,
                actor.vitals.max_health,
                actor.vitals.hunger,
                actor.vitals.thirst,
                held.join(", ")
            );
        }
    }
}
