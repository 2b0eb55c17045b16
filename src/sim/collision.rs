//! Collision detection and scoring
//!
//! Balls fall straight down, so the only contacts are the floor and the
//! paddle rectangle sitting on it.

use super::state::{BallPool, BallState, GameEvent, PaddleRect, RoundStats};
use glam::Vec2;

use crate::tuning::DifficultyTuning;

/// How a ball was resolved this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Escaped,
    Burst,
}

/// Check a ball's bounding box against the paddle rectangle (strict overlap)
pub fn ball_paddle_overlap(center: Vec2, radius: f32, paddle: &PaddleRect) -> bool {
    center.x + radius > paddle.left
        && center.x - radius < paddle.right
        && center.y + radius > paddle.top
        && center.y - radius < paddle.top + paddle.height
}

/// Whether a ball has crossed the floor line
pub fn ball_escaped(center: Vec2, radius: f32, field_height: f32) -> bool {
    center.y + radius > field_height
}

/// Classify a ball at its post-move position.
///
/// Escape is checked first: a ball past the floor that also overlaps the
/// paddle counts as escaped.
pub fn resolve_ball(
    center: Vec2,
    radius: f32,
    paddle: &PaddleRect,
    field_height: f32,
) -> Option<Resolution> {
    if ball_escaped(center, radius, field_height) {
        Some(Resolution::Escaped)
    } else if ball_paddle_overlap(center, radius, paddle) {
        Some(Resolution::Burst)
    } else {
        None
    }
}

/// Sub-steps needed so no single move is longer than the paddle's catch
/// window (its height); a longer move could jump from above the paddle to
/// past the floor in one go.
fn substeps(step: f32, catch_window: f32) -> u32 {
    if catch_window <= 0.0 || step <= catch_window {
        return 1;
    }
    (step / catch_window).ceil() as u32
}

/// Move every falling ball and resolve floor/paddle contacts.
///
/// `dt_scale` is the frame delta divided by the reference frame duration.
/// Large deltas are split into sub-steps so fast balls cannot tunnel
/// through the paddle. Returns true once every ball in the pool has been
/// resolved.
pub fn advance_balls(
    pool: &mut BallPool,
    paddle: &PaddleRect,
    stats: &mut RoundStats,
    tuning: &DifficultyTuning,
    field_height: f32,
    dt_scale: f32,
    events: &mut Vec<GameEvent>,
) -> bool {
    let step = tuning.ball_speed * dt_scale;
    let substeps = substeps(step, paddle.height);
    let sub_step = step / substeps as f32;

    for ball in pool.iter_mut() {
        if !ball.is_active() {
            continue;
        }

        let mut resolution = None;
        for _ in 0..substeps {
            ball.pos.y += sub_step;
            resolution = resolve_ball(ball.pos, ball.radius, paddle, field_height);
            if resolution.is_some() {
                break;
            }
        }

        match resolution {
            Some(Resolution::Escaped) => {
                ball.state = BallState::Escaped;
                stats.escaped += 1;
                events.push(GameEvent::Escaped { slot: ball.slot });
            }
            Some(Resolution::Burst) => {
                ball.state = BallState::Burst;
                stats.burst += 1;
                stats.score += tuning.score_value;
                events.push(GameEvent::Burst {
                    slot: ball.slot,
                    pos: ball.pos,
                    color: ball.color,
                    points: tuning.score_value,
                });
            }
            None => {}
        }
    }

    stats.resolved() >= pool.capacity()
}
