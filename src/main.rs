//! Grid Snake entry point
//!
//! Native demo: an autopilot plays one run on a simulated clock, then the
//! final board and leaderboard are printed.

use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use grid_snake::leaderboard::Timestamp;
use grid_snake::sim::{Autopilot, GameEngine, RunState, TickOutcome};
use grid_snake::{AccountStore, MemoryAccountStore, Session, Settings, TextRenderer, persistence};

/// Simulated frame time
const FRAME: Duration = Duration::from_millis(16);
/// Give up after this many frames
const MAX_FRAMES: u32 = 200_000;

fn main() {
    env_logger::init();
    log::info!("Grid Snake (native demo) starting...");

    if let Err(err) = run() {
        log::error!("{err}");
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = match std::env::var_os("SNAKE_SETTINGS") {
        Some(path) => Settings::load(&PathBuf::from(path)),
        None => Settings::default(),
    };
    let save_path = std::env::var_os("SNAKE_SAVE").map(PathBuf::from);

    let mut store = MemoryAccountStore::new();
    if let Some(path) = &save_path {
        if path.exists() {
            persistence::load_file(path)?.apply_to(&mut store);
        }
    }
    if store.login("autopilot", "demo").is_err() {
        store.register("autopilot", "demo", now_ms())?;
        store.login("autopilot", "demo")?;
    }

    let engine = GameEngine::new(&settings)?;
    let mut session = Session::new(engine, store, TextRenderer::new(settings.grid_size));
    let pilot = Autopilot;

    session.start();
    let mut clock: Timestamp = now_ms();
    for _ in 0..MAX_FRAMES {
        if session.engine().phase() != RunState::Running {
            break;
        }
        if let Some(dir) = pilot.choose(session.engine()) {
            session.steer(dir);
        }
        clock += FRAME.as_millis() as u64;
        for outcome in session.advance(FRAME, clock) {
            if let TickOutcome::Ended(summary) = outcome {
                println!(
                    "Run ended ({:?}): score {}, level {}, length {}",
                    summary.cause, summary.score, summary.level, summary.length
                );
            }
        }
    }

    println!("{}", session.renderer().frame());
    println!();
    println!("Leaderboard");
    for (rank, entry) in session.store().leaderboard().entries().iter().enumerate() {
        println!("{:>2}. [{}] {:<16} {:>6}", rank + 1, entry.avatar.letter, entry.username, entry.score);
    }
    if let Some(user) = session.store().current_user() {
        println!("Personal best for {}: {}", user.username, user.high_score);
    }

    if let Some(path) = &save_path {
        persistence::save_file(path, session.store())?;
    }
    Ok(())
}

fn now_ms() -> Timestamp {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
