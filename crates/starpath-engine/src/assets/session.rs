use serde::{Deserialize, Serialize};

use crate::level::archetype::Archetype;

/// Everything the host passes to start a level. Loaded from JSON at level start.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Language code used for text lookups (e.g., "en", "zh-TW").
    #[serde(default = "default_language")]
    pub language: String,
    /// Position of the level on the map, used for title keys.
    pub level_number: u32,
    /// Which puzzle to build. Derived from `level_number` when absent.
    #[serde(default)]
    pub archetype: Option<Archetype>,
    /// Fixed seed for shuffles and boss rolls. The host supplies one when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub timing: TimingConfig,
}

/// Delays (in seconds) for every scheduled transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Last match to complete/fail overlay (single-round levels).
    pub outcome_delay: f32,
    /// Round cleared to next round or, on the last round, to the outcome (phonics).
    pub round_delay: f32,
    /// Boss intro banner.
    pub boss_intro: f32,
    /// Interval between memory symbol flashes.
    pub memory_flash: f32,
    /// Last flash to memory input opening.
    pub memory_input_delay: f32,
    /// Memory sequence regeneration after a wrong tap or a cleared sequence.
    pub memory_retry: f32,
    /// Boss victory to completion event.
    pub victory_delay: f32,
    /// Boss damage feedback display time.
    pub feedback_clear: f32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            outcome_delay: 0.5,
            round_delay: 1.5,
            boss_intro: 2.0,
            memory_flash: 0.8,
            memory_input_delay: 0.5,
            memory_retry: 1.0,
            victory_delay: 2.0,
            feedback_clear: 0.8,
        }
    }
}

fn default_language() -> String {
    crate::assets::catalog::FALLBACK_LANGUAGE.to_string()
}

impl SessionConfig {
    /// Parse a session config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// The explicit archetype, or the one at `level_number` on the level map.
    pub fn resolve_archetype(&self) -> Option<Archetype> {
        self.archetype.or_else(|| Archetype::for_level_number(self.level_number))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal_session() {
        let config = SessionConfig::from_json(r#"{ "level_number": 1, "archetype": "shape_match" }"#).unwrap();
        assert_eq!(config.language, "zh-TW");
        assert_eq!(config.archetype, Some(Archetype::ShapeMatch));
        assert_eq!(config.seed, None);
        assert_eq!(config.timing, TimingConfig::default());
    }

    #[test]
    fn parse_partial_timing() {
        let json = r#"{
            "language": "en",
            "level_number": 29,
            "archetype": "boss",
            "seed": 7,
            "timing": { "outcome_delay": 0.0 }
        }"#;
        let config = SessionConfig::from_json(json).unwrap();
        assert_eq!(config.resolve_archetype(), Some(Archetype::Boss));
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.timing.outcome_delay, 0.0);
        assert_eq!(config.timing.round_delay, 1.5);
    }

    #[test]
    fn archetype_falls_back_to_level_map() {
        let config = SessionConfig::from_json(r#"{ "level_number": 7 }"#).unwrap();
        assert_eq!(config.resolve_archetype(), Some(Archetype::CategorySort));
        let config = SessionConfig::from_json(r#"{ "level_number": 12 }"#).unwrap();
        assert_eq!(config.resolve_archetype(), None);
    }

    #[test]
    fn unknown_archetype_is_an_error() {
        assert!(SessionConfig::from_json(r#"{ "level_number": 3, "archetype": "chess" }"#).is_err());
        assert!(SessionConfig::from_json("not json").is_err());
    }
}
