//! Per-game time control configuration
//!
//! Built by the setup form (or a preset), validated once, then immutable for
//! the whole game. All budgets are plain f64 seconds.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::state::Player;

/// How a player's bonus seconds are applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimingMode {
    /// Bonus added to the clock after each completed move (Fischer)
    #[default]
    Increment,
    /// Grace countdown before the main clock resumes ticking (US delay)
    Delay,
}

/// Extra minutes granted once a player completes a specific move number
/// (multi-period controls, e.g. "90 minutes for 40 moves, then +30")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeStage {
    pub move_number: u32,
    pub minutes_to_add: u32,
}

/// Asymmetric base times for the Armageddon tiebreak. Which player gets the
/// White budget is only known once priming resolves who moves first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArmageddonSplit {
    pub white_seconds: f64,
    pub black_seconds: f64,
}

/// One player's time control
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerTiming {
    /// Starting budget in seconds
    pub base_seconds: f64,
    /// Bonus seconds, interpreted per `mode`
    pub increment_seconds: f64,
    #[serde(default)]
    pub mode: TimingMode,
}

impl PlayerTiming {
    /// Build from the hours/minutes/seconds fields of the setup form
    pub fn from_hms(hours: u32, minutes: u32, seconds: u32, increment: f64, mode: TimingMode) -> Self {
        Self {
            base_seconds: f64::from(hours * 3600 + minutes * 60 + seconds),
            increment_seconds: increment,
            mode,
        }
    }

    /// A player needs some budget: either base time or an increment
    fn has_time_budget(&self) -> bool {
        self.base_seconds > 0.0 || self.increment_seconds > 0.0
    }
}

/// Setup form field a validation error points at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupField {
    Base,
    Increment,
}

/// Rejected configuration, keyed to the offending setup field
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Set a valid time for both players")]
    NoTimeBudget,
    #[error("Increment cannot be negative")]
    NegativeIncrement,
}

impl ConfigError {
    pub fn field(&self) -> SetupField {
        match self {
            ConfigError::NoTimeBudget => SetupField::Base,
            ConfigError::NegativeIncrement => SetupField::Increment,
        }
    }
}

/// Complete configuration for one game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClockConfig {
    pub players: [PlayerTiming; 2],
    #[serde(default)]
    pub stages: Vec<TimeStage>,
    #[serde(default)]
    pub armageddon: Option<ArmageddonSplit>,
}

impl ClockConfig {
    /// Same control on both sides
    pub fn mirrored(timing: PlayerTiming) -> Self {
        Self {
            players: [timing, timing],
            stages: Vec::new(),
            armageddon: None,
        }
    }

    pub fn timing(&self, player: Player) -> &PlayerTiming {
        &self.players[player.index()]
    }

    /// Check the configuration before a game may start
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.players.iter().any(|p| p.increment_seconds < 0.0) {
            return Err(ConfigError::NegativeIncrement);
        }
        if !self.players.iter().all(PlayerTiming::has_time_budget) {
            return Err(ConfigError::NoTimeBudget);
        }
        Ok(())
    }

    /// Stage bonus in seconds for a player's Nth completed move, if any
    pub fn stage_bonus(&self, completed_moves: u32) -> Option<f64> {
        self.stages
            .iter()
            .find(|s| s.move_number == completed_moves)
            .map(|s| f64::from(s.minutes_to_add) * 60.0)
    }
}

impl Default for ClockConfig {
    /// The default the setup screen opens with: 3 minutes + 2 seconds/move
    fn default() -> Self {
        Self::mirrored(PlayerTiming::from_hms(0, 3, 0, 2.0, TimingMode::Increment))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hms_totals() {
        let t = PlayerTiming::from_hms(1, 30, 15, 30.0, TimingMode::Increment);
        assert_eq!(t.base_seconds, 5415.0);
        assert_eq!(t.increment_seconds, 30.0);
    }

    #[test]
    fn test_validate_rejects_zero_budget_either_side() {
        let mut config = ClockConfig::default();
        config.players[1] = PlayerTiming::from_hms(0, 0, 0, 0.0, TimingMode::Increment);
        assert_eq!(config.validate(), Err(ConfigError::NoTimeBudget));
        assert_eq!(config.validate().unwrap_err().field(), SetupField::Base);
    }

    #[test]
    fn test_validate_accepts_increment_only() {
        // No base time at all is fine as long as the increment keeps the
        // player alive after each move
        let config =
            ClockConfig::mirrored(PlayerTiming::from_hms(0, 0, 0, 5.0, TimingMode::Increment));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_negative_increment() {
        let config =
            ClockConfig::mirrored(PlayerTiming::from_hms(0, 5, 0, -1.0, TimingMode::Increment));
        assert_eq!(config.validate(), Err(ConfigError::NegativeIncrement));
        assert_eq!(
            config.validate().unwrap_err().field(),
            SetupField::Increment
        );
    }

    #[test]
    fn test_stage_bonus_lookup() {
        let mut config = ClockConfig::default();
        config.stages = vec![
            TimeStage {
                move_number: 40,
                minutes_to_add: 30,
            },
            TimeStage {
                move_number: 60,
                minutes_to_add: 15,
            },
        ];
        assert_eq!(config.stage_bonus(40), Some(1800.0));
        assert_eq!(config.stage_bonus(60), Some(900.0));
        assert_eq!(config.stage_bonus(41), None);
    }
}
