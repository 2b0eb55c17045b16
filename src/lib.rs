//! Ball Burst - A falling-ball arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ball pool, paddle, spawner, collisions, round state)
//! - `driver`: Frame driver tying the simulation to hooks and the clock
//! - `hooks`: Ordered per-tick observers (audio, particles, high score)
//! - `renderer`: Draw primitives and the Canvas 2D target
//! - `platform`: Browser/native platform abstraction (input, time)
//! - `persistence`: Key-value storage backends
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod driver;
pub mod effects;
pub mod error;
pub mod highscores;
pub mod hooks;
pub mod hud;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use driver::FrameDriver;
pub use error::{ConfigError, StorageError};
pub use highscores::HighScore;
pub use settings::Settings;
pub use tuning::{Difficulty, DifficultyTuning, GameConfig};

/// Game configuration constants
pub mod consts {
    /// Play field dimensions (pixels)
    pub const FIELD_WIDTH: f32 = 450.0;
    pub const FIELD_HEIGHT: f32 = 300.0;

    /// Paddle defaults - paddle sits flush with the floor
    pub const PADDLE_HEIGHT: f32 = 10.0;
    pub const PADDLE_START_X: f32 = 200.0;
    /// Keyboard paddle speed (pixels per frame)
    pub const PADDLE_KEY_SPEED: f32 = 5.0;
    /// Touch drag dampening (paddle pixels per finger pixel)
    pub const TOUCH_FACTOR: f32 = 0.5;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;

    /// Frames per step counter increment
    pub const STEP_INTERVAL: u64 = 60;
    /// Ball speeds are expressed per reference frame of this duration
    pub const REFERENCE_FRAME_MS: f32 = 16.0;
    /// Largest frame delta fed to the simulation after a stall
    pub const MAX_FRAME_DELTA_MS: f32 = 100.0;

    /// Particle defaults
    pub const PARTICLES_PER_BURST: usize = 10;
    pub const PARTICLE_RADIUS: f32 = 3.0;
    pub const PARTICLE_DECAY: f32 = 0.02;
    pub const MAX_PARTICLES: usize = 256;

    /// Colors
    pub const BACKGROUND_COLOR: &str = "#EAEDDC";
    pub const PADDLE_COLOR: &str = "#3498db";
}
