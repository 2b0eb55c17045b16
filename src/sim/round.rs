//! Round state machine
//!
//! `Menu -> Playing -> {Paused <-> Playing} -> GameOver`, with `reset`
//! re-entering `Playing` from anywhere.

use super::state::{GameEvent, GamePhase, GameSession, Paddle, RoundStats};
use crate::tuning::Difficulty;

impl GameSession {
    /// Begin (or continue) play.
    ///
    /// From `GameOver` this starts a fresh round. Returns true if the phase changed.
    pub fn start(&mut self) -> bool {
        match self.phase {
            GamePhase::Menu => {
                self.phase = GamePhase::Playing;
                log::info!("Round started ({}, {} balls)", self.difficulty, self.capacity());
                self.push_event(GameEvent::RoundStarted {
                    difficulty: self.difficulty,
                    capacity: self.capacity(),
                });
                true
            }
            GamePhase::Paused => self.toggle_pause(),
            GamePhase::GameOver => {
                self.reset();
                true
            }
            GamePhase::Playing => false,
        }
    }

    /// Playing <-> Paused; no-op in any other phase. Returns true if the phase changed.
    pub fn toggle_pause(&mut self) -> bool {
        match self.phase {
            GamePhase::Playing => {
                self.phase = GamePhase::Paused;
                self.paddle.set_velocity(0.0);
                log::info!("Paused at frame {}", self.frame_count);
                self.push_event(GameEvent::Paused);
                true
            }
            GamePhase::Paused => {
                self.phase = GamePhase::Playing;
                log::info!("Resumed at frame {}", self.frame_count);
                self.push_event(GameEvent::Resumed);
                true
            }
            _ => false,
        }
    }

    /// Start a fresh round: stats zeroed, pool refilled, counters cleared
    pub fn reset(&mut self) {
        let tuning = *self.tuning();
        self.pool.initialize(
            tuning.max_balls,
            self.config.field_width,
            self.config.ball_radius,
            &mut self.rng,
        );
        self.paddle = Paddle::new(self.config.paddle_start_x, tuning.paddle_width);
        self.stats = RoundStats::default();
        self.frame_count = 0;
        self.elapsed_ms = 0.0;
        self.phase = GamePhase::Playing;

        log::info!("Round reset ({}, {} balls)", self.difficulty, self.capacity());
        self.push_event(GameEvent::RoundStarted {
            difficulty: self.difficulty,
            capacity: self.capacity(),
        });
    }

    /// Switch difficulty; always resets the round
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
        self.reset();
    }

    /// Playing -> GameOver once every ball has been resolved
    pub(crate) fn end_round(&mut self) {
        self.phase = GamePhase::GameOver;
        self.paddle.set_velocity(0.0);
        let hit_percentage = self.stats.hit_percentage(self.capacity());
        log::info!(
            "Game over: {} burst, {} escaped, {:.2}% hit, score {}",
            self.stats.burst,
            self.stats.escaped,
            hit_percentage,
            self.stats.score
        );
        self.push_event(GameEvent::RoundOver {
            burst: self.stats.burst,
            escaped: self.stats.escaped,
            hit_percentage,
        });
    }
}
