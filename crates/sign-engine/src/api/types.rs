use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::api::error::EngineError;

/// The three challenge modes. Fixed when a game starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameMode {
    /// Timed: perform the shown word's sign before the round timer runs out.
    FlashSign,
    /// Untimed: pick the matching video, then perform the sign.
    SignMatch,
    /// Lives-based, cross-category queue, no fixed question count.
    Endless,
}

impl GameMode {
    /// Numeric code used by the bridge's custom event path.
    pub fn code(self) -> u32 {
        match self {
            GameMode::FlashSign => 0,
            GameMode::SignMatch => 1,
            GameMode::Endless => 2,
        }
    }

    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(GameMode::FlashSign),
            1 => Some(GameMode::SignMatch),
            2 => Some(GameMode::Endless),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GameMode::FlashSign => "flash-sign",
            GameMode::SignMatch => "sign-match",
            GameMode::Endless => "endless",
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameMode {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "flash-sign" | "flashsign" | "flash" => Ok(GameMode::FlashSign),
            "sign-match" | "signmatch" | "match" => Ok(GameMode::SignMatch),
            "endless" => Ok(GameMode::Endless),
            _ => Err(EngineError::UnknownMode(s.to_string())),
        }
    }
}

/// One challenge prompt. Drawn fresh every question, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Question {
    pub word: String,
    pub category: String,
}

impl Question {
    pub fn new(word: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            category: category.into(),
        }
    }
}

/// Generation token for the current question.
/// Every async result (recognizer ready, detection, scheduled advance) carries the
/// token it was issued under and is dropped if the question has moved on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionToken(pub u32);

impl QuestionToken {
    pub fn next(self) -> Self {
        QuestionToken(self.0.wrapping_add(1))
    }
}

/// Which of the two SignMatch videos the player picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(Side::Left),
            1 => Some(Side::Right),
            _ => None,
        }
    }
}

/// A single (label, confidence) pair reported by the gesture recognizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub label: String,
    pub confidence: f32,
}

impl Candidate {
    pub fn new(label: impl Into<String>, confidence: f32) -> Self {
        Self {
            label: label.into(),
            confidence,
        }
    }
}

/// How a question ended, as shown to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Correct,
    Wrong,
    TimedOut,
    Skipped,
}

/// Audio cue for the feedback notifier. Fire-and-forget.
/// The numeric id maps to a sound in the site's audio manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum FeedbackCue {
    Correct = 1,
    Incorrect = 2,
    Select = 3,
    Camera = 4,
}

impl FeedbackCue {
    pub fn id(self) -> u8 {
        self as u8
    }
}
