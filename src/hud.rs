//! On-screen text
//!
//! Read-only projections of the round stats.

use crate::sim::{GamePhase, GameSession};

/// All HUD strings for one frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HudText {
    pub steps: String,
    pub burst: String,
    pub escaped: String,
    pub score: String,
    pub high_score: String,
    /// Final result, only once the round is over
    pub result: Option<String>,
}

impl HudText {
    pub fn new(session: &GameSession, high_score: u64) -> Self {
        let stats = &session.stats;
        let result = (session.phase == GamePhase::GameOver)
            .then(|| final_result(stats.hit_percentage(session.capacity())));

        Self {
            steps: format!("Steps elapsed: {}", stats.steps),
            burst: format!("Burst: {}", stats.burst),
            escaped: format!("Escaped: {}", stats.escaped),
            score: format!("Score: {}", stats.score),
            high_score: format!("High score: {}", high_score.max(stats.score)),
            result,
        }
    }
}

/// Game over message
pub fn final_result(hit_percentage: f32) -> String {
    format!("Game Over, your hit percentage was {:.2}%", hit_percentage)
}
