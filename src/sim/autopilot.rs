//! Idle/demo mode - the game plays itself
//!
//! Chases the lowest falling ball, the one closest to escaping.

use super::state::GameSession;

/// Paddle velocity that moves toward the most urgent ball (0 when idle or lined up)
pub fn steer(session: &GameSession) -> f32 {
    let speed = session.config.paddle_key_speed;
    let Some(target) = session
        .pool
        .active()
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
    else {
        return 0.0;
    };

    let center = session.paddle.x + session.paddle.width / 2.0;
    let offset = target.pos.x - center;
    // Dead zone keeps the paddle from jittering around the target
    if offset.abs() <= speed {
        0.0
    } else {
        speed * offset.signum()
    }
}
