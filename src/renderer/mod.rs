//! Rendering module
//!
//! The field is drawn with three primitives: a clear, a filled rectangle for
//! the paddle and filled circles for balls (and particles).

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod draw_list;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
pub use draw_list::{DrawCommand, DrawList};

use crate::consts::{BACKGROUND_COLOR, PADDLE_COLOR};
use crate::sim::GameSession;

/// Anything that can draw the game's primitives
pub trait RenderTarget {
    fn clear(&mut self, color: &str);
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: &str);
    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: &str, alpha: f32);
}

/// Draw the field, paddle and every falling ball
pub fn draw_frame(target: &mut dyn RenderTarget, session: &GameSession) {
    let config = &session.config;

    target.clear(BACKGROUND_COLOR);
    target.fill_rect(
        session.paddle.x,
        config.paddle_top(),
        session.paddle.width,
        config.paddle_height,
        PADDLE_COLOR,
    );

    for ball in session.pool.active() {
        target.fill_circle(ball.pos.x, ball.pos.y, ball.radius, &ball.color.to_css(), 1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::BallState;
    use crate::tuning::{Difficulty, GameConfig};

    #[test]
    fn test_draw_frame_primitives() {
        let mut session = GameSession::new(GameConfig::default(), Difficulty::Moderate, 3);
        for slot in [4, 9] {
            let ball = session.pool.get_mut(slot).unwrap();
            ball.state = BallState::Falling;
            ball.pos.y = 42.0;
        }
        session.pool.get_mut(5).unwrap().state = BallState::Burst;

        let mut list = DrawList::default();
        draw_frame(&mut list, &session);

        assert_eq!(list.commands.len(), 4);
        assert_eq!(list.commands[0], DrawCommand::Clear(BACKGROUND_COLOR.to_string()));
        assert_eq!(
            list.commands[1],
            DrawCommand::Rect {
                x: 200.0,
                y: 290.0,
                w: 50.0,
                h: 10.0,
                color: PADDLE_COLOR.to_string(),
            }
        );
        assert_eq!(list.circles().count(), 2);
    }
}
