use crate::api::config::EngineConfig;
use crate::api::error::ConfigurationError;
use crate::api::types::{GameMode, Question};
use crate::assets::words::{WordSource, ALPHABET};
use crate::core::queue::EndlessQueue;
use crate::core::rng::Rng;
use crate::core::state::GameState;
use crate::modes::{draw_from_category, gesture_verdict, timeout_verdict, ModeRules, QuestionSetup, Verdict};

/// Lives-based mode over a shuffled cross-category queue. No skipping.
pub struct EndlessRules {
    queue: EndlessQueue,
    lives: u32,
    hardcoded_fallback: bool,
}

impl EndlessRules {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            queue: EndlessQueue::new(config.endless_words_per_category),
            lives: config.endless_lives,
            hardcoded_fallback: config.hardcoded_fallback,
        }
    }

    pub fn queue(&self) -> &EndlessQueue {
        &self.queue
    }
}

impl ModeRules for EndlessRules {
    fn mode(&self) -> GameMode {
        GameMode::Endless
    }

    fn total_questions(&self) -> Option<u32> {
        None
    }

    fn starting_lives(&self) -> u32 {
        self.lives
    }

    fn costs_lives(&self) -> bool {
        true
    }

    fn allows_skip(&self) -> bool {
        false
    }

    fn draw(&mut self, source: &dyn WordSource, rng: &mut Rng) -> Result<Question, ConfigurationError> {
        if let Some(question) = self.queue.next(source, rng) {
            return Ok(question);
        }
        draw_from_category(source, ALPHABET, self.hardcoded_fallback, rng)
            .map_err(|_| ConfigurationError::EmptyWordSource)
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
