//! Turn-end and pause/resume interactions
//!
//! A tap on a clock half means different things per phase: before the game
//! has primed it nominates the opponent as the first mover (the player who
//! moves first taps the clock to start the *other* side, as on a physical
//! chess clock); while running it ends the tapping player's turn. Every
//! accepted interaction returns `true` so the host can pulse haptics.

use super::config::TimingMode;
use super::state::{ClockEngine, Phase, Player};
use super::tick::TickOutcome;

impl ClockEngine {
    /// A tap on `player`'s side of the clock at wall-clock time `now`
    ///
    /// Returns whether the interaction was accepted. Taps outside Priming
    /// and Running, and taps out of turn, are deliberate no-ops.
    pub fn move_signal(&mut self, player: Player, now: f64) -> bool {
        match self.phase {
            Phase::Setup | Phase::Paused | Phase::GameOver(_) => false,
            Phase::Priming => self.nominate(player),
            Phase::Running(current) => {
                if player != current {
                    return false;
                }
                // Account for time since the last tick first; the flag takes
                // precedence over a move landing at the same instant.
                if let TickOutcome::Flagged(_) = self.settle(now) {
                    return false;
                }
                self.complete_move(player, now);
                true
            }
        }
    }

    /// Start the clock out of Priming, or toggle Running <-> Paused
    pub fn pause_toggle(&mut self, now: f64) -> bool {
        match self.phase {
            Phase::Setup | Phase::GameOver(_) => false,
            Phase::Priming | Phase::Paused => {
                self.has_primed = true;
                let starter = self.ready_player;
                if self.first_start_pending {
                    self.first_start_pending = false;
                    self.apply_armageddon(starter);
                    let timing = *self.config().timing(starter);
                    if timing.mode == TimingMode::Delay {
                        self.delay_remaining[starter.index()] = timing.increment_seconds;
                    }
                }
                self.phase = Phase::Running(starter);
                self.begin_turn(starter, now);
                true
            }
            Phase::Running(current) => {
                if let TickOutcome::Flagged(_) = self.settle(now) {
                    return false;
                }
                self.ready_player = current;
                self.phase = Phase::Paused;
                true
            }
        }
    }

    /// Priming tap: the tapped side nominates its opponent to move first.
    /// Once primed, only the currently-ready player may flip the nomination.
    fn nominate(&mut self, player: Player) -> bool {
        if self.has_primed && self.ready_player != player {
            return false;
        }
        self.has_primed = true;
        self.ready_player = player.opponent();
        self.first_move_player = Some(self.ready_player);
        true
    }

    /// End `player`'s turn: count the move, grant increment and stage
    /// bonuses, arm the opponent's delay, hand the turn over.
    fn complete_move(&mut self, player: Player, now: f64) {
        let idx = player.index();
        self.moves_completed[idx] += 1;

        let timing = *self.config().timing(player);
        let mut bonus = 0.0;
        if timing.mode == TimingMode::Increment {
            bonus += timing.increment_seconds;
        }
        if let Some(stage) = self.config().stage_bonus(self.moves_completed[idx]) {
            bonus += stage;
        }
        if bonus > 0.0 {
            self.remaining[idx] += bonus;
        }
        self.delay_remaining[idx] = 0.0;

        let opponent = player.opponent();
        let opp_timing = *self.config().timing(opponent);
        self.delay_remaining[opponent.index()] = match opp_timing.mode {
            TimingMode::Delay => opp_timing.increment_seconds,
            TimingMode::Increment => 0.0,
        };

        self.phase = Phase::Running(opponent);
        self.begin_turn(opponent, now);
    }

    /// Armageddon: the first mover plays White and takes the White budget.
    /// Applied exactly once, at the Priming -> Running transition.
    fn apply_armageddon(&mut self, first_mover: Player) {
        if let Some(split) = self.config().armageddon {
            self.remaining[first_mover.index()] = split.white_seconds;
            self.remaining[first_mover.opponent().index()] = split.black_seconds;
        }
    }
}
