//! Blitz Clock - A dual-timer chess clock for the browser
//!
//! Core modules:
//! - `engine`: Deterministic timing engine (state machine, countdown, formatting)
//! - `presets`: Data-driven time control catalog
//! - `platform`: Browser/native capability abstraction (wake lock, haptics)
//! - `session`: Ties engine phase transitions to device side effects

pub mod engine;
pub mod platform;
pub mod presets;
pub mod session;

pub use engine::{
    ClockConfig, ClockEngine, ConfigError, Phase, Player, PlayerTiming, TickOutcome, TimingMode,
    format_time,
};
pub use presets::{Preset, load_presets};
pub use session::ClockSession;

/// Clock host constants
pub mod consts {
    /// Countdown update interval (10 ms for smooth hundredths display)
    pub const TICK_INTERVAL_MS: i32 = 10;
    /// Haptic pulse length on an accepted tap
    pub const VIBRATION_PULSE_MS: u32 = 125;
}
