use crate::api::config::EngineConfig;
use crate::api::error::ConfigurationError;
use crate::api::types::{GameMode, Question, Side};
use crate::assets::words::{labels_match, WordSource, FALLBACK_ALPHABET};
use crate::core::rng::Rng;
use crate::core::state::{GameState, QuestionPhase};
use crate::modes::{draw_from_category, ModeRules, QuestionSetup, Verdict, VideoChoices};

/// Untimed two-phase mode: pick the video that shows the word, then sign it.
///
/// A correct pick is credited immediately; the demonstration that follows only
/// completes the question and has no retry limit.
pub struct SignMatchRules {
    category: String,
    total: u32,
    hardcoded_fallback: bool,
}

impl SignMatchRules {
    pub fn new(config: &EngineConfig, category: &str) -> Self {
        Self {
            category: category.to_string(),
            total: config.questions_per_round,
            hardcoded_fallback: config.hardcoded_fallback,
        }
    }

    /// A different word, preferably from the same category.
    fn decoy(question: &Question, source: &dyn WordSource, rng: &mut Rng) -> Question {
        let differs = |w: &String| !labels_match(w, &question.word);

        let same: Vec<String> = source.words_for(&question.category).into_iter().filter(differs).collect();
        if let Some(word) = rng.choose(&same) {
            return Question::new(word.clone(), question.category.clone());
        }

        let others: Vec<Question> = source
            .categories()
            .into_iter()
            .filter(|c| *c != question.category)
            .flat_map(|c| {
                source
                    .words_for(&c)
                    .into_iter()
                    .filter(differs)
                    .map(move |w| Question::new(w, c.clone()))
            })
            .collect();
        if let Some(other) = rng.choose(&others) {
            return other.clone();
        }

        let letters: Vec<&str> = FALLBACK_ALPHABET
            .iter()
            .copied()
            .filter(|l| !labels_match(l, &question.word))
            .collect();
        let letter = rng.choose(&letters).copied().unwrap_or("A");
        Question::new(letter, question.category.clone())
    }
}

impl ModeRules for SignMatchRules {
    fn mode(&self) -> GameMode {
        GameMode::SignMatch
    }

    fn total_questions(&self) -> Option<u32> {
        Some(self.total)
    }

    fn draw(&mut self, source: &dyn WordSource, rng: &mut Rng) -> Result<Question, ConfigurationError> {
        draw_from_category(source, &self.category, self.hardcoded_fallback, rng)
    }

    fn on_question_start(&mut self, question: &Question, source: &dyn WordSource, rng: &mut Rng) -> QuestionSetup {
        let decoy = Self::decoy(question, source, rng);
        let target = source.video_ref(&question.word, &question.category);
        let other = source.video_ref(&decoy.word, &decoy.category);

        let choices = if rng.next_bool() {
            VideoChoices { left: target, right: other, correct: Side::Left }
        } else {
            VideoChoices { left: other, right: target, correct: Side::Right }
        };

        // Detection stays off while the player is picking.
        QuestionSetup {
            timed: false,
            detection: false,
            choices: Some(choices),
        }
    }

    fn on_candidate_answer(&self, state: &GameState, label: &str) -> Verdict {
        let sm = &state.sign_match;
        if state.phase != QuestionPhase::AwaitingDemonstration
            || !sm.last_selection_correct
            || !sm.demonstration_required
        {
            return Verdict::Ignore;
        }
        match &sm.demonstration_word {
            Some(word) if labels_match(label, word) => Verdict::DemonstrationComplete,
            Some(_) => Verdict::DemonstrationMismatch,
            None => Verdict::Ignore,
        }
    }

    fn on_video_picked(&self, state: &GameState, side: Side) -> Verdict {
        if state.phase != QuestionPhase::AwaitingInput || state.sign_match.video_selection_made {
            return Verdict::Ignore;
        }
        match state.sign_match.correct_side {
            Some(correct) if correct == side => Verdict::CorrectPick,
            Some(_) => Verdict::WrongPick,
            None => Verdict::Ignore,
        }
    }

    fn on_timer_expired(&self, _state: &GameState) -> Verdict {
        Verdict::Ignore
    }
}
