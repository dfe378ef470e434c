use serde::Serialize;

use crate::api::types::{GameMode, Outcome, QuestionToken};

/// Everything the engine pushes to the presentation layer and its collaborators.
/// Drained by the host once per frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EngineEvent {
    GameStarted {
        mode: GameMode,
        total_questions: Option<u32>,
        lives: Option<u32>,
    },
    QuestionStarted {
        token: QuestionToken,
        index: u32,
        total: Option<u32>,
        word: String,
        category: String,
    },
    /// SignMatch: two demonstration videos, exactly one showing the target word.
    VideoChoices {
        token: QuestionToken,
        left: String,
        right: String,
    },
    TimerTick {
        remaining: u32,
    },
    ScoreChanged {
        score: u32,
    },
    LivesChanged {
        lives: u32,
    },
    /// Best above-threshold label of the latest recognizer result. Display only.
    Detected {
        label: String,
        confidence: f32,
    },
    QuestionResolved {
        token: QuestionToken,
        outcome: Outcome,
        expected: String,
        detected: Option<String>,
    },
    DemonstrationRequired {
        word: String,
    },
    DemonstrationMismatch {
        expected: String,
        detected: String,
    },
    DetectionEnabled,
    DetectionDisabled,
    /// Ask the recognizer to load the model for `category`; reply with the same token.
    ConfigureRecognizer {
        category: String,
        token: QuestionToken,
    },
    CameraStart {
        token: QuestionToken,
    },
    CameraStop,
    RestartDetection {
        token: QuestionToken,
        attempt: u32,
    },
    DetectionStalled {
        token: QuestionToken,
    },
    RevealShown {
        word: String,
        video: String,
    },
    RevealDismissed,
    GameOver {
        summary: GameSummary,
    },
    ConfigurationFailed {
        message: String,
    },
}

/// Read-only end-of-game tally.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameSummary {
    pub mode: GameMode,
    pub score: u32,
    pub correct: u32,
    pub wrong: u32,
    pub skipped: u32,
    /// correct + wrong + skipped. The canonical attempted count, Endless included.
    pub questions_attempted: u32,
    /// Only reported for Endless.
    pub lives_left: Option<u32>,
    /// correct / attempted, 0 when nothing was attempted.
    pub accuracy: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_are_tagged_by_type() {
        let json = serde_json::to_value(EngineEvent::TimerTick { remaining: 4 }).unwrap();
        assert_eq!(json["type"], "timer_tick");
        assert_eq!(json["remaining"], 4);

        let json = serde_json::to_value(EngineEvent::CameraStop).unwrap();
        assert_eq!(json["type"], "camera_stop");
    }

    #[test]
    fn resolved_event_carries_outcome() {
        let event = EngineEvent::QuestionResolved {
            token: QuestionToken(3),
            outcome: Outcome::TimedOut,
            expected: "B".into(),
            detected: None,
        };
        let json = serde_json::to_value(event).unwrap();
        assert_eq!(json["token"], 3);
        assert_eq!(json["outcome"], "timed_out");
        assert!(json["detected"].is_null());
    }
}
