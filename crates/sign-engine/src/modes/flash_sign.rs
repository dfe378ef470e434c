use crate::api::config::EngineConfig;
use crate::api::error::ConfigurationError;
use crate::api::types::{GameMode, Question};
use crate::assets::words::WordSource;
use crate::core::rng::Rng;
use crate::core::state::GameState;
use crate::modes::{draw_from_category, gesture_verdict, timeout_verdict, ModeRules, QuestionSetup, Verdict};

/// Timed mode: sign the shown word before the round timer runs out.
/// A timeout counts as wrong but costs nothing else.
pub struct FlashSignRules {
    category: String,
    total: u32,
    hardcoded_fallback: bool,
}

impl FlashSignRules {
    pub fn new(config: &EngineConfig, category: &str) -> Self {
        Self {
            category: category.to_string(),
            total: config.questions_per_round,
            hardcoded_fallback: config.hardcoded_fallback,
        }
    }
}

impl ModeRules for FlashSignRules {
    fn mode(&self) -> GameMode {
        GameMode::FlashSign
    }

    fn total_questions(&self) -> Option<u32> {
        Some(self.total)
    }

    fn draw(&mut self, source: &dyn WordSource, rng: &mut Rng) -> Result<Question, ConfigurationError> {
        draw_from_category(source, &self.category, self.hardcoded_fallback, rng)
    }

    fn on_question_start(&mut self, _question: &Question, _source: &dyn WordSource, _rng: &mut Rng) -> QuestionSetup {
        QuestionSetup {
            timed: true,
            detection: true,
            choices: None,
        }
    }

    fn on_candidate_answer(&self, state: &GameState, label: &str) -> Verdict {
        gesture_verdict(state, label)
    }

    fn on_timer_expired(&self, state: &GameState) -> Verdict {
        timeout_verdict(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::words::WordBank;

    #[test]
    fn draws_from_selected_category() {
        let bank = WordBank::builtin();
        let mut rules = FlashSignRules::new(&EngineConfig::default(), "greetings");
        let mut rng = Rng::new(8);
        for _ in 0..20 {
            let q = rules.draw(&bank, &mut rng).unwrap();
            assert_eq!(q.category, "greetings");
            assert!(bank.words_for("greetings").contains(&q.word));
        }
    }

    #[test]
    fn questions_are_timed_with_detection() {
        let bank = WordBank::builtin();
        let mut rules = FlashSignRules::new(&EngineConfig::default(), "alphabet");
        let mut rng = Rng::new(8);
        let q = Question::new("A", "alphabet");
        let setup = rules.on_question_start(&q, &bank, &mut rng);
        assert!(setup.timed);
        assert!(setup.detection);
        assert!(setup.choices.is_none());
        assert!(rules.allows_skip());
        assert!(!rules.costs_lives());
    }
}
