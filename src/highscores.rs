//! High score persistence
//!
//! A single best score, read at startup and written whenever the running
//! score beats it.

use crate::error::StorageError;
use crate::hooks::TickHook;
use crate::persistence::KeyValueStore;
use crate::sim::{GameEvent, GameSession};

/// Storage key for the best score
pub const STORAGE_KEY: &str = "ball_burst_high_score";

/// Best score seen so far
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HighScore {
    pub best: u64,
}

impl HighScore {
    pub fn new(best: u64) -> Self {
        Self { best }
    }

    /// Parse a stored value
    pub fn parse(raw: &str) -> Result<u64, StorageError> {
        raw.trim().parse::<u64>().map_err(|_| StorageError::Malformed {
            key: STORAGE_KEY.to_string(),
            value: raw.to_string(),
        })
    }

    /// Load from storage; missing or malformed values count as zero
    pub fn load(store: &dyn KeyValueStore) -> Self {
        match store.get(STORAGE_KEY) {
            Ok(Some(raw)) => match Self::parse(&raw) {
                Ok(best) => {
                    log::info!("Loaded high score {}", best);
                    Self::new(best)
                }
                Err(e) => {
                    log::warn!("{}, treating high score as 0", e);
                    Self::default()
                }
            },
            Ok(None) => {
                log::info!("No high score found, starting fresh");
                Self::default()
            }
            Err(e) => {
                log::warn!("Failed to read high score: {}", e);
                Self::default()
            }
        }
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<(), StorageError> {
        store.set(STORAGE_KEY, &self.best.to_string())
    }

    /// Record a running score; returns true if it is a new best
    pub fn record(&mut self, score: u64) -> bool {
        if score > self.best {
            self.best = score;
            true
        } else {
            false
        }
    }
}

/// Hook that persists the high score as soon as the running score beats it
pub struct HighScoreHook {
    high_score: HighScore,
    store: Box<dyn KeyValueStore>,
}

impl HighScoreHook {
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        let high_score = HighScore::load(store.as_ref());
        Self { high_score, store }
    }

    pub fn best(&self) -> u64 {
        self.high_score.best
    }
}

impl TickHook for HighScoreHook {
    fn name(&self) -> &'static str {
        "high_score"
    }

    fn on_event(&mut self, session: &GameSession, event: &GameEvent) {
        if !matches!(event, GameEvent::Burst { .. }) {
            return;
        }
        if self.high_score.record(session.stats.score) {
            if let Err(e) = self.high_score.save(self.store.as_mut()) {
                log::warn!("Failed to save high score: {}", e);
            }
        }
    }

    fn high_score(&self) -> Option<u64> {
        Some(self.high_score.best)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_parse() {
        assert_eq!(HighScore::parse("120").unwrap(), 120);
        assert_eq!(HighScore::parse(" 7\n").unwrap(), 7);
        assert!(HighScore::parse("abc").is_err());
        assert!(HighScore::parse("-5").is_err());
        assert!(HighScore::parse("").is_err());
    }

    #[test]
    fn test_load_missing_is_zero() {
        let store = MemoryStore::new();
        assert_eq!(HighScore::load(&store).best, 0);
    }

    #[test]
    fn test_load_malformed_is_zero() {
        let mut store = MemoryStore::new();
        store.set(STORAGE_KEY, "NaN").unwrap();
        assert_eq!(HighScore::load(&store).best, 0);
    }

    #[test]
    fn test_record_and_save() {
        let mut store = MemoryStore::new();
        let mut high = HighScore::new(50);
        assert!(!high.record(50));
        assert!(high.record(60));
        high.save(&mut store).unwrap();
        assert_eq!(store.get(STORAGE_KEY).unwrap().as_deref(), Some("60"));
        assert_eq!(HighScore::load(&store).best, 60);
    }

    #[test]
    fn test_hook_saves_when_running_score_beats_best() {
        use crate::sim::ColorTag;
        use crate::tuning::{Difficulty, GameConfig};
        use glam::Vec2;

        let mut store = MemoryStore::new();
        store.set(STORAGE_KEY, "20").unwrap();
        let mut hook = HighScoreHook::new(Box::new(store));
        assert_eq!(hook.best(), 20);

        let mut session = GameSession::new(GameConfig::default(), Difficulty::Easy, 1);
        let burst = GameEvent::Burst {
            slot: 0,
            pos: Vec2::ZERO,
            color: ColorTag { r: 0, g: 0, b: 0 },
            points: 10,
        };

        session.stats.score = 20;
        hook.on_event(&session, &burst);
        assert_eq!(hook.best(), 20);

        session.stats.score = 30;
        hook.on_event(&session, &burst);
        assert_eq!(hook.best(), 30);
        assert_eq!(hook.store.get(STORAGE_KEY).unwrap().as_deref(), Some("30"));
    }
}
