//! Session wrapper tying the engine to device side effects
//!
//! Forwards every action to the engine, then reconciles the wake lock
//! against the resulting phase: acquired while a clock runs, released on
//! every way out of Running (pause, flag, reset). Accepted taps pulse
//! haptics. Keeping this in one funnel means no exit path can leak a lock.

use crate::engine::{ClockConfig, ClockEngine, ConfigError, Player, TickOutcome};
use crate::platform::{Haptics, ScreenLock};

pub struct ClockSession<L: ScreenLock, H: Haptics> {
    engine: ClockEngine,
    lock: L,
    haptics: H,
    /// Whether we believe a lock is held; drives visibility re-acquisition
    lock_held: bool,
}

impl<L: ScreenLock, H: Haptics> ClockSession<L, H> {
    pub fn new(lock: L, haptics: H) -> Self {
        Self {
            engine: ClockEngine::new(),
            lock,
            haptics,
            lock_held: false,
        }
    }

    pub fn engine(&self) -> &ClockEngine {
        &self.engine
    }

    pub fn start_game(&mut self, config: ClockConfig) -> Result<(), ConfigError> {
        let result = self.engine.start_game(config);
        self.sync_lock();
        result
    }

    pub fn move_signal(&mut self, player: Player, now: f64) -> bool {
        let accepted = self.engine.move_signal(player, now);
        if accepted {
            self.haptics.pulse();
        }
        self.sync_lock();
        accepted
    }

    pub fn pause_toggle(&mut self, now: f64) -> bool {
        let accepted = self.engine.pause_toggle(now);
        self.sync_lock();
        accepted
    }

    pub fn reset_game(&mut self, confirmed: bool) -> bool {
        let reset = self.engine.reset_game(confirmed);
        self.sync_lock();
        reset
    }

    pub fn tick(&mut self, now: f64) -> TickOutcome {
        let outcome = self.engine.tick(now);
        if matches!(outcome, TickOutcome::Flagged(_)) {
            self.sync_lock();
        }
        outcome
    }

    /// Host-reported page visibility. Browsers drop wake locks when the
    /// page is hidden; if one should be held, take it again on return.
    pub fn on_visibility_change(&mut self, visible: bool) {
        if visible && self.lock_held {
            self.lock.acquire();
        }
    }

    fn sync_lock(&mut self) {
        let want = self.engine.is_running();
        if want && !self.lock_held {
            self.lock.acquire();
        } else if !want && self.lock_held {
            self.lock.release();
        }
        self.lock_held = want;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{ClockConfig, Phase};
    use crate::platform::{Haptics, ScreenLock};
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records acquire/release calls and the resulting held state
    #[derive(Clone, Default)]
    struct SpyLock {
        held: Rc<RefCell<bool>>,
        acquires: Rc<RefCell<u32>>,
    }

    impl ScreenLock for SpyLock {
        fn acquire(&mut self) {
            *self.held.borrow_mut() = true;
            *self.acquires.borrow_mut() += 1;
        }
        fn release(&mut self) {
            *self.held.borrow_mut() = false;
        }
    }

    #[derive(Clone, Default)]
    struct SpyHaptics {
        pulses: Rc<RefCell<u32>>,
    }

    impl Haptics for SpyHaptics {
        fn pulse(&mut self) {
            *self.pulses.borrow_mut() += 1;
        }
    }

    fn session() -> (ClockSession<SpyLock, SpyHaptics>, SpyLock, SpyHaptics) {
        let lock = SpyLock::default();
        let haptics = SpyHaptics::default();
        (
            ClockSession::new(lock.clone(), haptics.clone()),
            lock,
            haptics,
        )
    }

    #[test]
    fn test_lock_follows_running_phase() {
        let (mut session, lock, _) = session();
        session.start_game(ClockConfig::default()).unwrap();
        assert!(!*lock.held.borrow());

        session.pause_toggle(0.0);
        assert!(*lock.held.borrow());

        session.pause_toggle(1.0);
        assert!(!*lock.held.borrow());

        session.pause_toggle(2.0);
        session.reset_game(true);
        assert!(!*lock.held.borrow());
    }

    #[test]
    fn test_lock_released_on_flag() {
        let (mut session, lock, _) = session();
        session.start_game(ClockConfig::default()).unwrap();
        session.pause_toggle(0.0);
        assert!(*lock.held.borrow());

        // 3 min + pre-granted 2 s
        let outcome = session.tick(200.0);
        assert!(matches!(outcome, TickOutcome::Flagged(Player::One)));
        assert_eq!(session.engine().phase, Phase::GameOver(Player::One));
        assert!(!*lock.held.borrow());
    }

    #[test]
    fn test_visibility_reacquires_only_while_running() {
        let (mut session, lock, _) = session();
        session.start_game(ClockConfig::default()).unwrap();
        session.pause_toggle(0.0);
        let acquires = *lock.acquires.borrow();

        session.on_visibility_change(true);
        assert_eq!(*lock.acquires.borrow(), acquires + 1);

        session.pause_toggle(1.0);
        session.on_visibility_change(true);
        assert_eq!(*lock.acquires.borrow(), acquires + 1);
    }

    #[test]
    fn test_haptics_only_on_accepted_taps() {
        let (mut session, _, haptics) = session();
        session.start_game(ClockConfig::default()).unwrap();

        session.move_signal(Player::One, 0.0); // priming nomination
        assert_eq!(*haptics.pulses.borrow(), 1);

        session.move_signal(Player::One, 0.0); // not the ready side: dropped
        assert_eq!(*haptics.pulses.borrow(), 1);

        session.pause_toggle(0.0); // start; buttons don't vibrate
        session.move_signal(Player::One, 1.0); // not their turn: dropped
        assert_eq!(*haptics.pulses.borrow(), 1);

        session.move_signal(Player::Two, 1.0);
        assert_eq!(*haptics.pulses.borrow(), 2);
    }
}
