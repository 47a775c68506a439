//! Wall-clock countdown
//!
//! The host fires `tick` on a short fixed interval (10 ms) while a clock is
//! running. Each tick recomputes the active player's budgets from the
//! wall-clock delta since the turn started instead of subtracting a fixed
//! step, so a throttled or delayed callback (backgrounded tab) cannot make
//! the clock drift. The worst case is one tick interval of overshoot past
//! zero, which is clamped away.

use super::state::{ClockEngine, Phase, Player};

/// What a tick observed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// No clock is running; nothing to do
    Idle,
    /// The active player's budgets were updated
    Running,
    /// The active player just ran out of time; the game is over
    Flagged(Player),
}

impl ClockEngine {
    /// Advance the active clock to wall-clock time `now`
    pub fn tick(&mut self, now: f64) -> TickOutcome {
        self.settle(now)
    }

    /// Recompute the active player's budgets from the turn snapshot.
    ///
    /// Shared by `tick`, `move_signal` and `pause_toggle` so interactions
    /// account for the time elapsed since the last timer callback.
    pub(super) fn settle(&mut self, now: f64) -> TickOutcome {
        let Phase::Running(player) = self.phase else {
            return TickOutcome::Idle;
        };
        let idx = player.index();
        // Tolerate a host clock stepping backwards
        let elapsed = (now - self.turn_started_at).max(0.0);

        if self.turn_start_delay > 0.0 {
            let delay_left = (self.turn_start_delay - elapsed).max(0.0);
            self.delay_remaining[idx] = delay_left;
            if delay_left > 0.0 {
                // Main budget untouched until the grace period runs out
                return TickOutcome::Running;
            }
            self.remaining[idx] = self.turn_start_remaining - (elapsed - self.turn_start_delay);
        } else {
            self.remaining[idx] = self.turn_start_remaining - elapsed;
        }

        if self.remaining[idx] <= 0.0 {
            self.remaining[idx] = 0.0;
            self.phase = Phase::GameOver(player);
            return TickOutcome::Flagged(player);
        }
        TickOutcome::Running
    }
}
