//! Dual-clock timing engine
//!
//! All clock logic lives here. This module must stay pure and deterministic:
//! - Wall-clock time is always passed in by the host, never sampled
//! - No platform or DOM dependencies
//! - Mutations happen only through the action and tick entry points

pub mod actions;
pub mod config;
pub mod format;
pub mod state;
pub mod tick;

pub use config::{
    ArmageddonSplit, ClockConfig, ConfigError, PlayerTiming, SetupField, TimeStage, TimingMode,
};
pub use format::format_time;
pub use state::{ClockEngine, Phase, Player};
pub use tick::TickOutcome;
