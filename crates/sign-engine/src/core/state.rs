use serde::Serialize;

use crate::api::events::GameSummary;
use crate::api::types::{GameMode, Question, QuestionToken, Side};

/// Per-question state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum QuestionPhase {
    /// No question drawn yet (before start, or between end and restart).
    Pending,
    AwaitingInput,
    /// SignMatch only: the right video was picked, the sign still has to be performed.
    AwaitingDemonstration,
    Resolved,
}

/// SignMatch sub-state. Cleared at every new question.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SignMatchState {
    pub video_selection_made: bool,
    pub last_selection_correct: bool,
    pub demonstration_required: bool,
    pub demonstration_word: Option<String>,
    pub correct_side: Option<Side>,
}

/// The single mutable aggregate of a game. Only the engine holds a mutable reference.
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    pub mode: GameMode,
    pub score: u32,
    /// 1-based once the first question is drawn.
    pub current_question_index: u32,
    /// `None` means unbounded (Endless).
    pub total_questions: Option<u32>,
    /// Only meaningful in Endless.
    pub lives: u32,
    pub reveal_power_used: bool,
    pub correct_count: u32,
    pub wrong_count: u32,
    pub skipped_count: u32,
    pub is_active: bool,
    pub detection_enabled: bool,
    pub phase: QuestionPhase,
    pub token: QuestionToken,
    pub question: Option<Question>,
    pub sign_match: SignMatchState,
    pub last_detected_label: Option<String>,
}

impl GameState {
    pub fn new(mode: GameMode, total_questions: Option<u32>, lives: u32) -> Self {
        Self {
            mode,
            score: 0,
            current_question_index: 0,
            total_questions,
            lives,
            reveal_power_used: false,
            correct_count: 0,
            wrong_count: 0,
            skipped_count: 0,
            is_active: false,
            detection_enabled: false,
            phase: QuestionPhase::Pending,
            token: QuestionToken::default(),
            question: None,
            sign_match: SignMatchState::default(),
            last_detected_label: None,
        }
    }

    /// Guard against double-scoring: true once the question reached a terminal resolution.
    pub fn question_answered(&self) -> bool {
        self.phase == QuestionPhase::Resolved
    }

    /// Clear all per-question flags ahead of the next draw.
    pub fn reset_question(&mut self) {
        self.phase = QuestionPhase::Pending;
        self.question = None;
        self.sign_match = SignMatchState::default();
        self.last_detected_label = None;
    }

    pub fn questions_attempted(&self) -> u32 {
        self.correct_count + self.wrong_count + self.skipped_count
    }

    pub fn summary(&self) -> GameSummary {
        let attempted = self.questions_attempted();
        GameSummary {
            mode: self.mode,
            score: self.score,
            correct: self.correct_count,
            wrong: self.wrong_count,
            skipped: self.skipped_count,
            questions_attempted: attempted,
            lives_left: (self.mode == GameMode::Endless).then_some(self.lives),
            accuracy: if attempted == 0 {
                0.0
            } else {
                self.correct_count as f32 / attempted as f32
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_state_is_inactive() {
        let state = GameState::new(GameMode::FlashSign, Some(10), 0);
        assert!(!state.is_active);
        assert!(!state.question_answered());
        assert_eq!(state.current_question_index, 0);
    }

    #[test]
    fn summary_accuracy() {
        let mut state = GameState::new(GameMode::Endless, None, 3);
        state.correct_count = 3;
        state.wrong_count = 1;
        state.skipped_count = 0;
        state.lives = 2;
        let summary = state.summary();
        assert_eq!(summary.questions_attempted, 4);
        assert_eq!(summary.accuracy, 0.75);
        assert_eq!(summary.lives_left, Some(2));
    }

    #[test]
    fn summary_of_empty_game() {
        let summary = GameState::new(GameMode::SignMatch, Some(10), 0).summary();
        assert_eq!(summary.accuracy, 0.0);
        assert_eq!(summary.lives_left, None);
    }

    #[test]
    fn reset_question_clears_sign_match() {
        let mut state = GameState::new(GameMode::SignMatch, Some(10), 0);
        state.phase = QuestionPhase::AwaitingDemonstration;
        state.sign_match.demonstration_required = true;
        state.sign_match.demonstration_word = Some("Hello".into());
        state.last_detected_label = Some("Yes".into());
        state.reset_question();
        assert_eq!(state.phase, QuestionPhase::Pending);
        assert_eq!(state.sign_match, SignMatchState::default());
        assert!(state.last_detected_label.is_none());
    }
}
