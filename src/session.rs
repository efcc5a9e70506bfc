//! Game session
//!
//! Wires one engine to its tick timer, the account store and a renderer.
//! The platform layer feeds it elapsed time and player input.

use std::time::Duration;

use crate::accounts::AccountStore;
use crate::leaderboard::Timestamp;
use crate::renderer::Renderer;
use crate::sim::{Direction, GameEngine, RunState, TickOutcome, TickTimer};

/// A running game plus its collaborators
#[derive(Debug)]
pub struct Session<S: AccountStore, R: Renderer> {
    engine: GameEngine,
    /// At most one schedule drives the engine
    timer: Option<TickTimer>,
    store: S,
    renderer: R,
}

impl<S: AccountStore, R: Renderer> Session<S, R> {
    pub fn new(engine: GameEngine, store: S, mut renderer: R) -> Self {
        renderer.present(&engine.snapshot());
        Self {
            engine,
            timer: None,
            store,
            renderer,
        }
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn timer(&self) -> Option<&TickTimer> {
        self.timer.as_ref()
    }

    /// Start (or resume) play and make sure a timer is running
    pub fn start(&mut self) {
        self.engine.start();
        if self.engine.phase() == RunState::Running && self.timer.is_none() {
            self.timer = Some(TickTimer::new(self.engine.interval()));
        }
    }

    /// Pause when running, resume when paused. The timer is kept; it simply
    /// receives no time while paused.
    pub fn toggle_pause(&mut self) {
        self.engine.toggle_pause();
    }

    /// Throw away the current run and start a new one
    pub fn restart(&mut self) {
        self.timer = None;
        self.engine.reset();
        self.renderer.present(&self.engine.snapshot());
        self.start();
    }

    pub fn steer(&mut self, dir: Direction) -> bool {
        self.engine.steer(dir)
    }

    /// Feed elapsed time and run every tick that falls due.
    ///
    /// `now` stamps leaderboard updates if the run ends.
    pub fn advance(&mut self, elapsed: Duration, now: Timestamp) -> Vec<TickOutcome> {
        let mut outcomes = Vec::new();
        if self.engine.phase() != RunState::Running {
            return outcomes;
        }
        let Some(timer) = self.timer.as_mut() else {
            return outcomes;
        };

        let due = timer.advance(elapsed);
        for _ in 0..due {
            let outcome = self.engine.tick();
            if outcome.committed() {
                self.renderer.present(&self.engine.snapshot());
            }
            outcomes.push(outcome);

            match outcome {
                TickOutcome::Grew {
                    level_up: Some(level_up),
                } => {
                    // Ticks still owed under the old interval are dropped
                    if let Some(timer) = self.timer.as_mut() {
                        timer.reschedule(level_up.interval);
                    }
                    break;
                }
                TickOutcome::Ended(summary) => {
                    self.timer = None;
                    self.report(summary.score, now);
                    break;
                }
                _ => {}
            }
        }
        outcomes
    }

    fn report(&mut self, score: u32, now: Timestamp) {
        let Some(user) = self.store.current_user() else {
            log::info!("Final score {score} (no player logged in)");
            return;
        };
        if self.store.commit_high_score(user.id, score, now) {
            log::info!("`{}` set a new personal best: {score}", user.username);
        } else {
            log::info!("`{}` scored {score}; best stays {}", user.username, user.high_score);
        }
    }
}
