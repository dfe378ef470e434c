pub mod api;
pub mod core;
pub mod modes;
pub mod bridge;
pub mod input;
pub mod assets;

// Re-export key types at crate root for convenience
pub use api::config::EngineConfig;
pub use api::error::{ConfigurationError, EngineError};
pub use api::events::{EngineEvent, GameSummary};
pub use api::types::{Candidate, FeedbackCue, GameMode, Outcome, Question, QuestionToken, Side};
pub use assets::manifest::WordManifest;
pub use assets::words::{WordBank, WordSource, ALPHABET};
pub use bridge::protocol::HudFrame;
pub use crate::core::engine::ChallengeEngine;
pub use crate::core::queue::EndlessQueue;
pub use crate::core::rng::Rng;
pub use crate::core::state::{GameState, QuestionPhase, SignMatchState};
pub use crate::core::timer::{RoundTimer, TimerSignal, TimerState};
pub use crate::core::watchdog::{Watchdog, WatchdogVerdict};
pub use input::queue::{ActionQueue, PlayerAction};
pub use modes::{ModeRules, QuestionSetup, Verdict, VideoChoices};
