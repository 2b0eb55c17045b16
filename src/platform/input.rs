//! Input mapping
//!
//! Keyboard and on-screen buttons drive paddle velocity; touch drags move
//! the paddle directly. The two paths are independent.

use crate::tuning::Difficulty;

/// Something the player asked for
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputAction {
    MoveLeft,
    MoveRight,
    StopMove,
    /// Touch drag displacement (already scaled)
    Nudge(f32),
    TogglePause,
    Start,
    Reset,
    SelectDifficulty(Difficulty),
    ToggleAutopilot,
}

/// Map a `KeyboardEvent.key` value on key-down
pub fn map_key_down(key: &str) -> Option<InputAction> {
    match key {
        "ArrowLeft" => Some(InputAction::MoveLeft),
        "ArrowRight" => Some(InputAction::MoveRight),
        "p" | "P" => Some(InputAction::TogglePause),
        " " | "Enter" => Some(InputAction::Start),
        "r" | "R" => Some(InputAction::Reset),
        "i" | "I" => Some(InputAction::ToggleAutopilot),
        "1" => Some(InputAction::SelectDifficulty(Difficulty::Easy)),
        "2" => Some(InputAction::SelectDifficulty(Difficulty::Moderate)),
        "3" => Some(InputAction::SelectDifficulty(Difficulty::Hard)),
        _ => None,
    }
}

/// Map a `KeyboardEvent.key` value on key-up
pub fn map_key_up(key: &str) -> Option<InputAction> {
    match key {
        "ArrowLeft" | "ArrowRight" => Some(InputAction::StopMove),
        _ => None,
    }
}

/// Tracks a touch drag and turns finger movement into paddle displacement
#[derive(Debug, Clone)]
pub struct TouchTracker {
    last_x: Option<f32>,
    factor: f32,
}

impl TouchTracker {
    pub fn new(factor: f32) -> Self {
        Self {
            last_x: None,
            factor,
        }
    }

    pub fn begin(&mut self, x: f32) {
        self.last_x = Some(x);
    }

    /// Scaled displacement since the previous touch point
    pub fn move_to(&mut self, x: f32) -> Option<InputAction> {
        let last = self.last_x.replace(x)?;
        Some(InputAction::Nudge((x - last) * self.factor))
    }

    pub fn end(&mut self) {
        self.last_x = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_keys() {
        assert_eq!(map_key_down("ArrowLeft"), Some(InputAction::MoveLeft));
        assert_eq!(map_key_down("ArrowRight"), Some(InputAction::MoveRight));
        assert_eq!(map_key_up("ArrowLeft"), Some(InputAction::StopMove));
        assert_eq!(map_key_up("p"), None);
        assert_eq!(map_key_down("p"), Some(InputAction::TogglePause));
        assert_eq!(map_key_down("x"), None);
    }

    #[test]
    fn test_touch_drag_scaled() {
        let mut touch = TouchTracker::new(0.5);
        assert_eq!(touch.move_to(10.0), None);
        touch.begin(100.0);
        assert_eq!(touch.move_to(140.0), Some(InputAction::Nudge(20.0)));
        assert_eq!(touch.move_to(120.0), Some(InputAction::Nudge(-10.0)));
        touch.end();
        assert_eq!(touch.move_to(0.0), None);
    }
}
