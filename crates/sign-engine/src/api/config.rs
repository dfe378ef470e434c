use serde::{Deserialize, Serialize};

/// Tunables for the challenge engine.
/// Every field has a default, so a partial JSON object is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Questions per FlashSign / SignMatch game (default: 10).
    pub questions_per_round: u32,
    /// Starting lives in Endless (default: 3).
    pub endless_lives: u32,
    /// Round timer length in seconds for FlashSign / Endless (default: 10).
    pub round_seconds: u32,
    /// Recognizer candidates below this confidence are ignored (default: 0.3).
    pub confidence_threshold: f32,
    /// Words drawn from each category when building the Endless queue (default: 3).
    pub endless_words_per_category: usize,
    /// Feedback pause before the next question, in seconds (default: 1.5).
    pub advance_delay: f32,
    /// Longest frame delta `tick` accepts, in seconds (default: 0.5).
    /// A tab resuming from the background must not drain the round timer in one frame.
    pub max_frame_dt: f32,
    /// Seconds between watchdog checks (default: 5).
    pub watchdog_interval: f32,
    /// A detection loop silent for longer than this is considered stalled (default: 3).
    pub watchdog_stale_after: f32,
    /// Consecutive restarts before the watchdog gives up and reports a stall (default: 5).
    pub max_watchdog_restarts: u32,
    /// Fall back to a built-in A–Z list when the alphabet category is empty (default: true).
    pub hardcoded_fallback: bool,
    /// Category used by FlashSign and SignMatch until the player picks one.
    pub default_category: String,
    /// RNG seed. Zero lets the host pick one.
    pub seed: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            questions_per_round: 10,
            endless_lives: 3,
            round_seconds: 10,
            confidence_threshold: 0.3,
            endless_words_per_category: 3,
            advance_delay: 1.5,
            max_frame_dt: 0.5,
            watchdog_interval: 5.0,
            watchdog_stale_after: 3.0,
            max_watchdog_restarts: 5,
            hardcoded_fallback: true,
            default_category: crate::assets::words::ALPHABET.to_string(),
            seed: 0,
        }
    }
}

impl EngineConfig {
    /// Parse a config from a JSON string. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = EngineConfig::from_json(r#"{ "round_seconds": 15, "seed": 7 }"#).unwrap();
        assert_eq!(config.round_seconds, 15);
        assert_eq!(config.seed, 7);
        assert_eq!(config.questions_per_round, 10);
        assert_eq!(config.endless_lives, 3);
        assert_eq!(config.confidence_threshold, 0.3);
        assert_eq!(config.default_category, "alphabet");
        assert_eq!(config.max_frame_dt, 0.5);
    }

    #[test]
    fn empty_object_is_default() {
        assert_eq!(EngineConfig::from_json("{}").unwrap(), EngineConfig::default());
    }

    #[test]
    fn rejects_wrong_types() {
        assert!(EngineConfig::from_json(r#"{ "round_seconds": "ten" }"#).is_err());
    }
}
