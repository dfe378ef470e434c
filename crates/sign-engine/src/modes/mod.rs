//! Per-mode rules. The engine owns the state and applies scoring;
//! a mode only decides what an input means for the current question.

pub mod endless;
pub mod flash_sign;
pub mod sign_match;

pub use endless::EndlessRules;
pub use flash_sign::FlashSignRules;
pub use sign_match::SignMatchRules;

use crate::api::config::EngineConfig;
use crate::api::error::ConfigurationError;
use crate::api::types::{GameMode, Question, Side};
use crate::assets::words::{labels_match, resolve_words, WordSource};
use crate::core::rng::Rng;
use crate::core::state::{GameState, QuestionPhase};

/// What an input means for the current question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Not applicable in the current phase; drop it.
    Ignore,
    Correct,
    Wrong,
    TimedOut,
    /// SignMatch: right video picked, demonstration phase follows.
    CorrectPick,
    /// SignMatch: wrong video picked. Terminal.
    WrongPick,
    DemonstrationComplete,
    DemonstrationMismatch,
}

/// The two SignMatch videos, already resolved to locators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoChoices {
    pub left: String,
    pub right: String,
    pub correct: Side,
}

/// How a freshly drawn question should be presented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionSetup {
    /// Run the round timer.
    pub timed: bool,
    /// Turn gesture detection on right away.
    pub detection: bool,
    pub choices: Option<VideoChoices>,
}

pub trait ModeRules {
    fn mode(&self) -> GameMode;

    /// `None` for unbounded games.
    fn total_questions(&self) -> Option<u32>;

    fn starting_lives(&self) -> u32 {
        0
    }

    /// Wrong answers and timeouts cost a life; the game ends at zero.
    fn costs_lives(&self) -> bool {
        false
    }

    fn allows_skip(&self) -> bool {
        true
    }

    fn draw(&mut self, source: &dyn WordSource, rng: &mut Rng) -> Result<Question, ConfigurationError>;

    fn on_question_start(
        &mut self,
        question: &Question,
        source: &dyn WordSource,
        rng: &mut Rng,
    ) -> QuestionSetup;

    /// A normalized, above-threshold label from the recognizer.
    fn on_candidate_answer(&self, state: &GameState, label: &str) -> Verdict;

    fn on_video_picked(&self, _state: &GameState, _side: Side) -> Verdict {
        Verdict::Ignore
    }

    fn on_timer_expired(&self, state: &GameState) -> Verdict;
}

/// Build the rules for a mode from the engine config.
pub fn rules_for(mode: GameMode, config: &EngineConfig, category: &str) -> Box<dyn ModeRules> {
    match mode {
        GameMode::FlashSign => Box::new(FlashSignRules::new(config, category)),
        GameMode::SignMatch => Box::new(SignMatchRules::new(config, category)),
        GameMode::Endless => Box::new(EndlessRules::new(config)),
    }
}

/// Uniform draw from one category, with the alphabet fallbacks applied.
pub(crate) fn draw_from_category(
    source: &dyn WordSource,
    category: &str,
    hardcoded_fallback: bool,
    rng: &mut Rng,
) -> Result<Question, ConfigurationError> {
    let (category, words) = resolve_words(source, category, hardcoded_fallback)?;
    rng.choose(&words)
        .map(|word| Question::new(word.clone(), category.clone()))
        .ok_or(ConfigurationError::NoWords { category })
}

/// Gesture-driven resolution shared by FlashSign and Endless.
pub(crate) fn gesture_verdict(state: &GameState, label: &str) -> Verdict {
    if state.phase != QuestionPhase::AwaitingInput {
        return Verdict::Ignore;
    }
    match &state.question {
        Some(question) if labels_match(label, &question.word) => Verdict::Correct,
        Some(_) => Verdict::Wrong,
        None => Verdict::Ignore,
    }
}

pub(crate) fn timeout_verdict(state: &GameState) -> Verdict {
    if state.phase == QuestionPhase::AwaitingInput {
        Verdict::TimedOut
    } else {
        Verdict::Ignore
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::words::WordBank;

    fn awaiting(word: &str) -> GameState {
        let mut state = GameState::new(GameMode::FlashSign, Some(10), 0);
        state.is_active = true;
        state.phase = QuestionPhase::AwaitingInput;
        state.question = Some(Question::new(word, "alphabet"));
        state
    }

    #[test]
    fn gesture_verdict_matches_case_insensitively() {
        let state = awaiting("Hello");
        assert_eq!(gesture_verdict(&state, "hello"), Verdict::Correct);
        assert_eq!(gesture_verdict(&state, "Yes"), Verdict::Wrong);
    }

    #[test]
    fn resolved_question_ignores_answers_and_timeouts() {
        let mut state = awaiting("A");
        state.phase = QuestionPhase::Resolved;
        assert_eq!(gesture_verdict(&state, "A"), Verdict::Ignore);
        assert_eq!(timeout_verdict(&state), Verdict::Ignore);
    }

    #[test]
    fn draw_from_missing_category_uses_alphabet() {
        let bank = WordBank::builtin();
        let mut rng = Rng::new(4);
        let q = draw_from_category(&bank, "colors", false, &mut rng).unwrap();
        assert_eq!(q.category, "alphabet");
        assert_eq!(q.word.len(), 1);
    }

    #[test]
    fn rules_for_each_mode() {
        let config = EngineConfig::default();
        assert_eq!(rules_for(GameMode::FlashSign, &config, "alphabet").total_questions(), Some(10));
        assert_eq!(rules_for(GameMode::SignMatch, &config, "alphabet").total_questions(), Some(10));
        let endless = rules_for(GameMode::Endless, &config, "alphabet");
        assert_eq!(endless.total_questions(), None);
        assert_eq!(endless.starting_lives(), 3);
        assert!(endless.costs_lives());
        assert!(!endless.allows_skip());
    }
}
