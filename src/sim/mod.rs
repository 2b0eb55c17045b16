//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (by pool slot)
//! - Frame timing passed in, never read from a clock
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod round;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Resolution, advance_balls, ball_escaped, ball_paddle_overlap, resolve_ball};
pub use spawner::spawn;
pub use state::{
    Ball, BallPool, BallState, ColorTag, GameEvent, GamePhase, GameSession, Paddle, PaddleRect,
    RoundStats,
};
pub use tick::tick;
