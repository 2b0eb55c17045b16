//! Game state and core simulation types
//!
//! Everything a round mutates lives in [`GameSession`]; adapters only read it.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::tuning::{Difficulty, DifficultyTuning, GameConfig};

/// Current phase of the round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Session created, round not started yet
    Menu,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Every ball in the pool has been resolved
    GameOver,
}

/// Lifecycle of a pool slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BallState {
    /// Waiting to be picked by the spawner
    Dormant,
    /// In flight toward the floor
    Falling,
    /// Caught by the paddle
    Burst,
    /// Reached the floor
    Escaped,
}

/// Ball color, fixed at pool initialization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorTag {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl ColorTag {
    pub fn random(rng: &mut impl Rng) -> Self {
        Self {
            r: rng.random(),
            g: rng.random(),
            b: rng.random(),
        }
    }

    /// CSS color string (`rgb(r,g,b)`)
    pub fn to_css(&self) -> String {
        format!("rgb({},{},{})", self.r, self.g, self.b)
    }
}

/// A ball slot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub slot: usize,
    pub pos: Vec2,
    pub radius: f32,
    pub color: ColorTag,
    pub state: BallState,
}

impl Ball {
    pub fn is_active(&self) -> bool {
        self.state == BallState::Falling
    }

    pub fn is_dormant(&self) -> bool {
        self.state == BallState::Dormant
    }

    /// Start falling from the top edge at a random x that keeps the ball inside the field
    pub fn activate(&mut self, field_width: f32, rng: &mut impl Rng) {
        let span = (field_width - 2.0 * self.radius).max(0.0);
        self.pos = Vec2::new(rng.random::<f32>() * span + self.radius, 0.0);
        self.state = BallState::Falling;
    }
}

/// Fixed-capacity ball pool; slot index is the ball's identity
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BallPool {
    balls: Vec<Ball>,
}

impl BallPool {
    pub fn new(capacity: usize, field_width: f32, radius: f32, rng: &mut impl Rng) -> Self {
        let mut pool = Self::default();
        pool.initialize(capacity, field_width, radius, rng);
        pool
    }

    /// Reset every slot to dormant with a random x, y = 0 and a fresh color
    pub fn initialize(&mut self, capacity: usize, field_width: f32, radius: f32, rng: &mut impl Rng) {
        self.balls.clear();
        self.balls.reserve(capacity);
        for slot in 0..capacity {
            self.balls.push(Ball {
                slot,
                pos: Vec2::new(rng.random::<f32>() * field_width, 0.0),
                radius,
                color: ColorTag::random(rng),
                state: BallState::Dormant,
            });
        }
    }

    /// Slots still waiting to be spawned
    pub fn find_inactive(&self) -> Vec<usize> {
        self.balls
            .iter()
            .filter(|b| b.is_dormant())
            .map(|b| b.slot)
            .collect()
    }

    pub fn capacity(&self) -> usize {
        self.balls.len()
    }

    pub fn active_count(&self) -> usize {
        self.balls.iter().filter(|b| b.is_active()).count()
    }

    pub fn get(&self, slot: usize) -> Option<&Ball> {
        self.balls.get(slot)
    }

    pub fn get_mut(&mut self, slot: usize) -> Option<&mut Ball> {
        self.balls.get_mut(slot)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Ball> {
        self.balls.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Ball> {
        self.balls.iter_mut()
    }

    pub fn active(&self) -> impl Iterator<Item = &Ball> {
        self.balls.iter().filter(|b| b.is_active())
    }
}

/// Axis-aligned paddle rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaddleRect {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub height: f32,
}

/// The player's paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    /// Left edge (pixels)
    pub x: f32,
    /// Horizontal speed applied each tick (pixels per frame)
    pub velocity: f32,
    /// Width for the current difficulty
    pub width: f32,
}

impl Paddle {
    pub fn new(x: f32, width: f32) -> Self {
        Self {
            x,
            velocity: 0.0,
            width,
        }
    }

    pub fn set_velocity(&mut self, velocity: f32) {
        self.velocity = velocity;
    }

    /// Rightmost legal x for the paddle's left edge
    pub fn max_x(&self, field_width: f32) -> f32 {
        (field_width - self.width).max(0.0)
    }

    /// Apply velocity for one frame.
    ///
    /// The move is gated on the pre-move position (right only while
    /// `x < max_x`, left only while `x > 0`), so a step can overshoot; the
    /// result is then clamped back into the field.
    pub fn tick(&mut self, field_width: f32) {
        let max_x = self.max_x(field_width);
        if self.velocity > 0.0 && self.x < max_x {
            self.x += self.velocity;
        }
        if self.velocity < 0.0 && self.x > 0.0 {
            self.x += self.velocity;
        }
        self.x = self.x.clamp(0.0, max_x);
    }

    /// Touch drag: displace directly, bypassing velocity
    pub fn nudge(&mut self, delta: f32, field_width: f32) {
        self.x = (self.x + delta).clamp(0.0, self.max_x(field_width));
    }

    pub fn rect(&self, config: &GameConfig) -> PaddleRect {
        PaddleRect {
            left: self.x,
            right: self.x + self.width,
            top: config.paddle_top(),
            height: config.paddle_height,
        }
    }
}

/// Per-round counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundStats {
    pub burst: u32,
    pub escaped: u32,
    pub steps: u64,
    pub score: u64,
}

impl RoundStats {
    /// Balls resolved either way
    pub fn resolved(&self) -> usize {
        (self.burst + self.escaped) as usize
    }

    /// Percentage of the pool that was burst
    pub fn hit_percentage(&self, capacity: usize) -> f32 {
        if capacity == 0 {
            return 0.0;
        }
        self.burst as f32 / capacity as f32 * 100.0
    }
}

/// Things that happened during a tick or a transition, in order
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    RoundStarted {
        difficulty: Difficulty,
        capacity: usize,
    },
    Paused,
    Resumed,
    BallSpawned {
        slot: usize,
    },
    Burst {
        slot: usize,
        pos: Vec2,
        color: ColorTag,
        points: u64,
    },
    Escaped {
        slot: usize,
    },
    RoundOver {
        burst: u32,
        escaped: u32,
        hit_percentage: f32,
    },
}

/// One game session: the single owner of all round state
#[derive(Debug, Clone)]
pub struct GameSession {
    pub config: GameConfig,
    pub difficulty: Difficulty,
    pub phase: GamePhase,
    pub pool: BallPool,
    pub paddle: Paddle,
    pub stats: RoundStats,
    /// Frames ticked this round
    pub frame_count: u64,
    /// Simulated milliseconds this round
    pub elapsed_ms: f64,
    pub(crate) rng: Pcg32,
    pub(crate) events: Vec<GameEvent>,
}

impl GameSession {
    /// Create a session in the menu phase with a freshly filled pool
    pub fn new(config: GameConfig, difficulty: Difficulty, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let tuning = *config.tuning(difficulty);
        let pool = BallPool::new(tuning.max_balls, config.field_width, config.ball_radius, &mut rng);
        let paddle = Paddle::new(config.paddle_start_x, tuning.paddle_width);

        Self {
            config,
            difficulty,
            phase: GamePhase::Menu,
            pool,
            paddle,
            stats: RoundStats::default(),
            frame_count: 0,
            elapsed_ms: 0.0,
            rng,
            events: Vec::new(),
        }
    }

    pub fn tuning(&self) -> &DifficultyTuning {
        self.config.tuning(self.difficulty)
    }

    pub fn capacity(&self) -> usize {
        self.pool.capacity()
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// Take the events queued since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(7)
    }

    #[test]
    fn test_pool_initialize_all_dormant() {
        let pool = BallPool::new(50, 450.0, 10.0, &mut rng());
        assert_eq!(pool.capacity(), 50);
        assert_eq!(pool.find_inactive().len(), 50);
        assert_eq!(pool.active_count(), 0);
        for (i, ball) in pool.iter().enumerate() {
            assert_eq!(ball.slot, i);
            assert_eq!(ball.pos.y, 0.0);
            assert!(ball.pos.x >= 0.0 && ball.pos.x <= 450.0);
        }
    }

    #[test]
    fn test_resolved_balls_are_not_inactive() {
        let mut pool = BallPool::new(3, 450.0, 10.0, &mut rng());
        pool.get_mut(0).unwrap().state = BallState::Burst;
        pool.get_mut(1).unwrap().state = BallState::Escaped;
        assert_eq!(pool.find_inactive(), vec![2]);
    }

    #[test]
    fn test_activate_keeps_ball_inside_field() {
        let mut r = rng();
        let mut pool = BallPool::new(20, 450.0, 10.0, &mut r);
        for ball in pool.iter_mut() {
            ball.activate(450.0, &mut r);
            assert!(ball.pos.x >= 10.0 && ball.pos.x <= 440.0);
            assert_eq!(ball.pos.y, 0.0);
            assert!(ball.is_active());
        }
    }

    #[test]
    fn test_paddle_clamped_at_right_edge() {
        let mut paddle = Paddle::new(378.0, 70.0);
        paddle.set_velocity(5.0);
        paddle.tick(450.0);
        assert_eq!(paddle.x, 380.0);
        paddle.tick(450.0);
        assert_eq!(paddle.x, 380.0);
    }

    #[test]
    fn test_paddle_clamped_at_left_edge() {
        let mut paddle = Paddle::new(2.0, 50.0);
        paddle.set_velocity(-5.0);
        paddle.tick(450.0);
        assert_eq!(paddle.x, 0.0);
        paddle.tick(450.0);
        assert_eq!(paddle.x, 0.0);
    }

    #[test]
    fn test_paddle_nudge_bypasses_velocity() {
        let mut paddle = Paddle::new(200.0, 50.0);
        paddle.nudge(-30.0, 450.0);
        assert_eq!(paddle.x, 170.0);
        assert_eq!(paddle.velocity, 0.0);
        paddle.nudge(1000.0, 450.0);
        assert_eq!(paddle.x, 400.0);
    }

    #[test]
    fn test_hit_percentage() {
        let stats = RoundStats {
            burst: 12,
            escaped: 38,
            ..Default::default()
        };
        assert_eq!(stats.resolved(), 50);
        assert!((stats.hit_percentage(50) - 24.0).abs() < 1e-4);
        assert_eq!(stats.hit_percentage(0), 0.0);
    }

    #[test]
    fn test_color_css() {
        let color = ColorTag { r: 1, g: 22, b: 255 };
        assert_eq!(color.to_css(), "rgb(1,22,255)");
    }
}
