//! Engine state and game lifecycle
//!
//! All observable clock state lives here. The engine is a plain struct with
//! no platform dependencies; the host passes wall-clock time into every
//! mutating call as an `f64` seconds value, so tests can simulate elapsed
//! time deterministically.

use super::config::{ClockConfig, ConfigError, TimingMode};

/// One of the two sides of the clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub fn opponent(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Index into the per-player state arrays
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Player::One => "Player 1",
            Player::Two => "Player 2",
        }
    }
}

/// Clock lifecycle phase
///
/// Exactly one clock may run at a time; that player is carried by the
/// `Running` variant, so "no active player" never needs a sentinel value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Setup screen open, no game configured yet
    Setup,
    /// Game configured, waiting for the first mover to be established
    Priming,
    /// One player's clock is counting down
    Running(Player),
    /// Mid-game halt; `ready_player` resumes
    Paused,
    /// The carried player ran out of time
    GameOver(Player),
}

/// The dual-clock engine
///
/// Owns the configuration and all mutable game state. Countdown is computed
/// from a wall-clock snapshot taken at the start of each turn rather than by
/// decrementing a counter per tick, so displayed time stays accurate when
/// the host throttles or delays the timer callback.
#[derive(Debug, Clone)]
pub struct ClockEngine {
    config: ClockConfig,
    /// Seconds left per player, clamped at zero
    pub remaining: [f64; 2],
    /// Grace countdown per player; while positive for the active player,
    /// `remaining` does not deplete
    pub delay_remaining: [f64; 2],
    /// Completed turns per player, drives stage bonuses
    pub moves_completed: [u32; 2],
    pub phase: Phase,
    /// Whose clock starts on the next resume; meaningful while no clock runs
    pub ready_player: Player,
    /// Set by the first interaction that selects the first mover
    pub has_primed: bool,
    /// Which side moved first, for downstream labeling
    pub first_move_player: Option<Player>,
    /// One-shot work at the first Priming -> Running transition: armageddon
    /// re-assignment and the first mover's initial delay
    pub(super) first_start_pending: bool,
    pub(super) turn_started_at: f64,
    pub(super) turn_start_remaining: f64,
    pub(super) turn_start_delay: f64,
}

impl ClockEngine {
    pub fn new() -> Self {
        Self {
            config: ClockConfig::default(),
            remaining: [0.0; 2],
            delay_remaining: [0.0; 2],
            moves_completed: [0; 2],
            phase: Phase::Setup,
            ready_player: Player::One,
            has_primed: false,
            first_move_player: None,
            first_start_pending: true,
            turn_started_at: 0.0,
            turn_start_remaining: 0.0,
            turn_start_delay: 0.0,
        }
    }

    pub fn config(&self) -> &ClockConfig {
        &self.config
    }

    /// Validate a configuration and move Setup -> Priming
    ///
    /// In Increment mode the first increment is granted up front, so a
    /// zero-base control never starts a game at 0.0 seconds.
    pub fn start_game(&mut self, config: ClockConfig) -> Result<(), ConfigError> {
        config.validate()?;

        *self = Self::new();
        for player in [Player::One, Player::Two] {
            let timing = config.timing(player);
            self.remaining[player.index()] = match timing.mode {
                TimingMode::Increment => timing.base_seconds + timing.increment_seconds,
                TimingMode::Delay => timing.base_seconds,
            };
        }
        // Player 1 plays White unless priming decides otherwise
        self.first_move_player = Some(Player::One);
        self.config = config;
        self.phase = Phase::Priming;
        Ok(())
    }

    /// Return to Setup, discarding the game
    ///
    /// While a game is live (anything but GameOver) the caller must pass the
    /// user's confirmation; declining leaves the state untouched.
    pub fn reset_game(&mut self, confirmed: bool) -> bool {
        if self.phase == Phase::Setup {
            return false;
        }
        if !self.is_game_over() && !confirmed {
            return false;
        }
        *self = Self::new();
        true
    }

    /// The player whose clock is counting down, if any
    pub fn active_player(&self) -> Option<Player> {
        match self.phase {
            Phase::Running(player) => Some(player),
            _ => None,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self.phase, Phase::Running(_))
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self.phase, Phase::GameOver(_))
    }

    /// The player who ran out of time, once the game is over
    pub fn flagged_player(&self) -> Option<Player> {
        match self.phase {
            Phase::GameOver(player) => Some(player),
            _ => None,
        }
    }

    pub fn remaining_secs(&self, player: Player) -> f64 {
        self.remaining[player.index()]
    }

    pub fn delay_secs(&self, player: Player) -> f64 {
        self.delay_remaining[player.index()]
    }

    pub fn moves(&self, player: Player) -> u32 {
        self.moves_completed[player.index()]
    }

    /// Snapshot the wall clock and the entering player's budgets; all
    /// subsequent ticks measure against these values
    pub(super) fn begin_turn(&mut self, player: Player, now: f64) {
        self.turn_started_at = now;
        self.turn_start_remaining = self.remaining[player.index()];
        self.turn_start_delay = self.delay_remaining[player.index()];
    }
}

impl Default for ClockEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::{PlayerTiming, SetupField};

    #[test]
    fn test_start_game_moves_to_priming() {
        let mut engine = ClockEngine::new();
        assert_eq!(engine.phase, Phase::Setup);

        engine.start_game(ClockConfig::default()).unwrap();
        assert_eq!(engine.phase, Phase::Priming);
        assert!(!engine.has_primed);
        assert_eq!(engine.ready_player, Player::One);
        // 3 minutes base + 2 seconds pre-granted increment
        assert_eq!(engine.remaining, [182.0, 182.0]);
    }

    #[test]
    fn test_start_game_delay_mode_does_not_pregrant() {
        let mut engine = ClockEngine::new();
        let config = ClockConfig::mirrored(PlayerTiming::from_hms(0, 5, 0, 3.0, TimingMode::Delay));
        engine.start_game(config).unwrap();
        assert_eq!(engine.remaining, [300.0, 300.0]);
        assert_eq!(engine.delay_remaining, [0.0, 0.0]);
    }

    #[test]
    fn test_start_game_rejects_invalid_and_keeps_setup() {
        let mut engine = ClockEngine::new();
        let mut config = ClockConfig::default();
        config.players[0] = PlayerTiming::from_hms(0, 0, 0, 0.0, TimingMode::Increment);

        let err = engine.start_game(config).unwrap_err();
        assert_eq!(err.field(), SetupField::Base);
        assert_eq!(engine.phase, Phase::Setup);
    }

    #[test]
    fn test_reset_requires_confirmation_mid_game() {
        let mut engine = ClockEngine::new();
        engine.start_game(ClockConfig::default()).unwrap();
        engine.pause_toggle(0.0);
        assert!(engine.is_running());

        assert!(!engine.reset_game(false));
        assert!(engine.is_running());

        assert!(engine.reset_game(true));
        assert_eq!(engine.phase, Phase::Setup);
        assert_eq!(engine.first_move_player, None);
    }

    #[test]
    fn test_reset_after_game_over_needs_no_confirmation() {
        let mut engine = ClockEngine::new();
        engine.phase = Phase::GameOver(Player::Two);
        assert!(engine.reset_game(false));
        assert_eq!(engine.phase, Phase::Setup);
    }
}
