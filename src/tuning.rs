//! Data-driven game balance
//!
//! Every difficulty is a row in one table instead of a separate copy of the game.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Difficulty presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Moderate,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Moderate, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Moderate => "moderate",
            Difficulty::Hard => "hard",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "moderate" | "medium" | "med" => Ok(Difficulty::Moderate),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(ConfigError::UnknownDifficulty(s.to_string())),
        }
    }
}

/// Tuning values for one difficulty
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyTuning {
    /// Paddle width (pixels)
    pub paddle_width: f32,
    /// Fall speed in pixels per reference frame
    pub ball_speed: f32,
    /// Frames between spawns
    pub spawn_interval: u64,
    /// Balls activated per spawn
    pub balls_per_spawn: u32,
    /// Points awarded per burst
    pub score_value: u64,
    /// Pool capacity for a round
    pub max_balls: usize,
}

/// Per-difficulty tuning table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultyTable {
    pub easy: DifficultyTuning,
    pub moderate: DifficultyTuning,
    pub hard: DifficultyTuning,
}

impl Default for DifficultyTable {
    fn default() -> Self {
        Self {
            easy: DifficultyTuning {
                paddle_width: 70.0,
                ball_speed: 0.5,
                spawn_interval: 150,
                balls_per_spawn: 1,
                score_value: 10,
                max_balls: 50,
            },
            moderate: DifficultyTuning {
                paddle_width: 50.0,
                ball_speed: 1.2,
                spawn_interval: 80,
                balls_per_spawn: 1,
                score_value: 20,
                max_balls: 75,
            },
            hard: DifficultyTuning {
                paddle_width: 40.0,
                ball_speed: 2.0,
                spawn_interval: 50,
                balls_per_spawn: 2,
                score_value: 30,
                max_balls: 100,
            },
        }
    }
}

impl DifficultyTable {
    pub fn get(&self, difficulty: Difficulty) -> &DifficultyTuning {
        match difficulty {
            Difficulty::Easy => &self.easy,
            Difficulty::Moderate => &self.moderate,
            Difficulty::Hard => &self.hard,
        }
    }
}

/// Complete game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub field_width: f32,
    pub field_height: f32,
    pub paddle_height: f32,
    pub paddle_start_x: f32,
    pub paddle_key_speed: f32,
    pub touch_factor: f32,
    pub ball_radius: f32,
    pub step_interval: u64,
    pub reference_frame_ms: f32,
    pub max_frame_delta_ms: f32,
    pub difficulties: DifficultyTable,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            paddle_height: PADDLE_HEIGHT,
            paddle_start_x: PADDLE_START_X,
            paddle_key_speed: PADDLE_KEY_SPEED,
            touch_factor: TOUCH_FACTOR,
            ball_radius: BALL_RADIUS,
            step_interval: STEP_INTERVAL,
            reference_frame_ms: REFERENCE_FRAME_MS,
            max_frame_delta_ms: MAX_FRAME_DELTA_MS,
            difficulties: DifficultyTable::default(),
        }
    }
}

impl GameConfig {
    /// Parse a config from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn tuning(&self, difficulty: Difficulty) -> &DifficultyTuning {
        self.difficulties.get(difficulty)
    }

    /// Top edge of the paddle rectangle
    pub fn paddle_top(&self) -> f32 {
        self.field_height - self.paddle_height
    }

    /// Reject configurations the simulation cannot run
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.field_width <= 0.0 || self.field_height <= 0.0 {
            return Err(ConfigError::InvalidField {
                width: self.field_width,
                height: self.field_height,
            });
        }
        if self.paddle_height <= 0.0 || self.paddle_height > self.field_height {
            return Err(ConfigError::InvalidField {
                width: self.field_width,
                height: self.field_height,
            });
        }
        if self.step_interval == 0 {
            return Err(ConfigError::InvalidTiming("step_interval must be at least 1"));
        }
        if self.reference_frame_ms <= 0.0 || self.max_frame_delta_ms <= 0.0 {
            return Err(ConfigError::InvalidTiming("frame durations must be positive"));
        }

        for difficulty in Difficulty::ALL {
            let tuning = self.tuning(difficulty);
            let invalid = |reason: &str| ConfigError::InvalidTuning {
                difficulty: difficulty.as_str(),
                reason: reason.to_string(),
            };
            if tuning.spawn_interval == 0 {
                return Err(invalid("spawn_interval must be at least 1"));
            }
            if tuning.max_balls == 0 {
                return Err(invalid("max_balls must be at least 1"));
            }
            if tuning.balls_per_spawn == 0 {
                return Err(invalid("balls_per_spawn must be at least 1"));
            }
            if tuning.paddle_width <= 0.0 || tuning.paddle_width > self.field_width {
                return Err(invalid("paddle_width must fit inside the field"));
            }
            if self.paddle_start_x < 0.0
                || self.paddle_start_x > self.field_width - tuning.paddle_width
            {
                return Err(invalid("paddle_start_x puts the paddle outside the field"));
            }
            if tuning.ball_speed <= 0.0 {
                return Err(invalid("ball_speed must be positive"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn test_difficulty_parse() {
        assert_eq!("Hard".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert_eq!(" med ".parse::<Difficulty>().unwrap(), Difficulty::Moderate);
        assert!("nightmare".parse::<Difficulty>().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = GameConfig::from_json(r#"{ "field_width": 600.0 }"#).unwrap();
        assert_eq!(config.field_width, 600.0);
        assert_eq!(config.field_height, FIELD_HEIGHT);
        assert_eq!(config.tuning(Difficulty::Easy).spawn_interval, 150);
    }

    #[test]
    fn test_zero_spawn_interval_rejected() {
        let mut config = GameConfig::default();
        config.difficulties.hard.spawn_interval = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidTuning { difficulty: "hard", .. })
        ));
    }

    #[test]
    fn test_paddle_wider_than_field_rejected() {
        let mut config = GameConfig::default();
        config.difficulties.easy.paddle_width = config.field_width + 1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_paddle_start_off_field_rejected() {
        let config = GameConfig {
            paddle_start_x: 420.0,
            ..Default::default()
        };
        // Easy's 70 px paddle needs x <= 380
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidTuning { difficulty: "easy", .. })
        ));

        let config = GameConfig::from_json(r#"{ "paddle_start_x": -5.0 }"#);
        assert!(config.is_err());

        let config = GameConfig {
            paddle_start_x: 380.0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
