//! End-to-end gameplay scenarios

use std::time::Duration;

use grid_snake::accounts::{AccountStore, MemoryAccountStore};
use grid_snake::renderer::TextRenderer;
use grid_snake::settings::Settings;
use grid_snake::sim::{Cell, Direction, EndCause, GameEngine, Layout, RunState, RunSummary, TickOutcome};
use grid_snake::{Session, persistence};

fn cells(raw: &[(i32, i32)]) -> Vec<Cell> {
    raw.iter().copied().map(Cell::from).collect()
}

fn engine(body: &[(i32, i32)], direction: Direction, food: (i32, i32)) -> GameEngine {
    let layout = Layout {
        body: cells(body),
        direction,
        food: food.into(),
    };
    let mut engine = GameEngine::from_layout(&Settings::default(), 2024, layout).unwrap();
    engine.start();
    engine
}

#[test]
fn eating_grows_and_scores() {
    let mut engine = engine(&[(5, 5), (4, 5), (3, 5)], Direction::Right, (6, 5));
    assert_eq!(engine.tick(), TickOutcome::Grew { level_up: None });
    assert_eq!(engine.body().to_vec(), cells(&[(6, 5), (5, 5), (4, 5), (3, 5)]));
    assert_eq!(engine.score(), 10);
    assert_eq!(engine.level(), 1);
}

#[test]
fn leaving_the_grid_ends_the_run() {
    let mut engine = engine(&[(0, 5), (1, 5), (2, 5)], Direction::Left, (9, 9));
    let outcome = engine.tick();
    assert_eq!(
        outcome,
        TickOutcome::Ended(RunSummary {
            cause: EndCause::Wall,
            score: 0,
            level: 1,
            length: 3,
        })
    );
    assert_eq!(engine.phase(), RunState::Over);
    assert_eq!(engine.body().to_vec(), cells(&[(0, 5), (1, 5), (2, 5)]));
}

#[test]
fn reversal_is_ignored() {
    let mut engine = engine(&[(5, 5), (4, 5), (3, 5)], Direction::Right, (9, 9));
    assert!(!engine.steer(Direction::Left));
    engine.tick();
    assert_eq!(engine.direction(), Direction::Right);
    assert_eq!(engine.body().head(), Cell::new(6, 5));
}

#[test]
fn running_into_own_body_ends_the_run() {
    // Hook shape: turning down runs into the second row of the body
    let mut engine = engine(
        &[(5, 5), (4, 5), (4, 6), (5, 6), (6, 6)],
        Direction::Right,
        (15, 15),
    );
    engine.steer(Direction::Down);
    let outcome = engine.tick();
    assert!(matches!(
        outcome,
        TickOutcome::Ended(RunSummary {
            cause: EndCause::Body,
            ..
        })
    ));
}

#[test]
fn pause_resume_and_restart() {
    let mut engine = engine(&[(5, 5), (4, 5), (3, 5)], Direction::Right, (9, 9));
    engine.toggle_pause();
    assert_eq!(engine.tick(), TickOutcome::Skipped);
    assert!(!engine.steer(Direction::Up));
    engine.start();
    assert_eq!(engine.phase(), RunState::Running);

    engine.restart();
    assert_eq!(engine.phase(), RunState::Running);
    assert_eq!(engine.body().to_vec(), cells(&[(10, 10), (9, 10), (8, 10)]));
}

#[test]
fn session_submits_to_leaderboard_and_survives_export() {
    let settings = Settings::default();
    let mut store = MemoryAccountStore::new();
    store.register("dana", "secret", 1).unwrap();
    store.login("dana", "secret").unwrap();

    // Food on the last column, then the wall
    let layout = Layout {
        body: cells(&[(18, 3), (17, 3), (16, 3)]),
        direction: Direction::Right,
        food: Cell::new(19, 3),
    };
    let engine = GameEngine::from_layout(&settings, 9, layout).unwrap();
    let mut session = Session::new(engine, store, TextRenderer::new(settings.grid_size));
    session.start();

    let mut ended = None;
    for step in 0..20 {
        for outcome in session.advance(Duration::from_millis(200), 1_000 + step) {
            if let TickOutcome::Ended(summary) = outcome {
                ended = Some(summary);
            }
        }
        if ended.is_some() {
            break;
        }
    }
    let summary = ended.expect("run should hit the wall");
    assert_eq!(summary.cause, EndCause::Wall);
    assert_eq!(summary.score, 10);

    let store = session.store();
    assert_eq!(store.current_user().unwrap().high_score, 10);
    assert_eq!(store.leaderboard().entries()[0].username, "dana");

    let json = persistence::export(store).unwrap();
    let mut restored = MemoryAccountStore::new();
    persistence::import(&json).unwrap().apply_to(&mut restored);
    assert_eq!(restored.leaderboard(), store.leaderboard());
}
