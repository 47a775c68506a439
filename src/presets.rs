//! Data-driven time control catalog
//!
//! The preset list ships as an embedded JSON file so the catalog can be
//! tweaked without touching clock logic. Every entry expands to a mirrored
//! `ClockConfig`; asymmetric starts (Armageddon) ride along as metadata the
//! engine applies once priming resolves.

use serde::{Deserialize, Serialize};

use crate::engine::{ArmageddonSplit, ClockConfig, PlayerTiming, TimeStage, TimingMode};

const CATALOG_JSON: &str = include_str!("../data/presets.json");

/// One named time control from the catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preset {
    pub label: String,
    #[serde(default)]
    pub hours: u32,
    #[serde(default)]
    pub minutes: u32,
    #[serde(default)]
    pub seconds: u32,
    #[serde(default)]
    pub increment: f64,
    #[serde(default)]
    pub mode: TimingMode,
    #[serde(default)]
    pub stages: Vec<TimeStage>,
    #[serde(default)]
    pub armageddon: Option<ArmageddonSplit>,
    #[serde(default)]
    pub description: String,
}

impl Preset {
    /// Expand into a game configuration (same control on both sides)
    pub fn to_config(&self) -> ClockConfig {
        let timing = PlayerTiming::from_hms(
            self.hours,
            self.minutes,
            self.seconds,
            self.increment,
            self.mode,
        );
        ClockConfig {
            players: [timing, timing],
            stages: self.stages.clone(),
            armageddon: self.armageddon,
        }
    }
}

/// Parse the embedded catalog
pub fn load_presets() -> Result<Vec<Preset>, serde_json::Error> {
    serde_json::from_str(CATALOG_JSON)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_parses_and_validates() {
        let presets = load_presets().expect("embedded catalog must parse");
        assert!(!presets.is_empty());
        for preset in &presets {
            assert!(
                preset.to_config().validate().is_ok(),
                "invalid preset: {}",
                preset.label
            );
        }
    }

    #[test]
    fn test_catalog_covers_all_modes() {
        let presets = load_presets().unwrap();
        assert!(presets.iter().any(|p| p.mode == TimingMode::Delay));
        assert!(
            presets
                .iter()
                .any(|p| p.mode == TimingMode::Increment && p.increment > 0.0)
        );
        assert!(presets.iter().any(|p| !p.stages.is_empty()));
    }

    #[test]
    fn test_armageddon_preset_split() {
        let presets = load_presets().unwrap();
        let armageddon = presets
            .iter()
            .find(|p| p.armageddon.is_some())
            .expect("catalog carries an armageddon preset");
        let split = armageddon.armageddon.unwrap();
        assert_eq!(split.white_seconds, 300.0);
        assert_eq!(split.black_seconds, 240.0);
    }

    #[test]
    fn test_fide_preset_stage() {
        let presets = load_presets().unwrap();
        let fide = presets
            .iter()
            .find(|p| p.label.starts_with("90+30"))
            .unwrap();
        let config = fide.to_config();
        assert_eq!(config.stage_bonus(40), Some(1800.0));
    }
}
