//! Numeric bridge between the engine and the page scripts.
//! Must stay in sync with the site's `challenge-bridge.js`.
//!
//! Rich events (words, video locators, summaries) travel as a JSON batch per frame.
//! Hot numeric HUD state is a flat f32 record JS reads straight out of wasm memory:
//! ```text
//! [active, mode, score, lives, question_index, total_questions,
//!  timer_remaining, detection_enabled, reveal_available, correct, wrong, skipped]
//! ```
//! `total_questions` is -1 for unbounded games.

use bytemuck::{Pod, Zeroable};

use crate::core::state::GameState;

/// Bridge version, bumped whenever `HudFrame` or the action codes change.
pub const PROTOCOL_VERSION: f32 = 1.0;

// Custom action kinds (UI → engine), payload in `a`.
pub const ACTION_SELECT_MODE: u32 = 1;
pub const ACTION_PICK_VIDEO: u32 = 2;
pub const ACTION_SKIP: u32 = 3;
pub const ACTION_QUIT: u32 = 4;
pub const ACTION_REVEAL: u32 = 5;
pub const ACTION_CONTINUE_AFTER_REVEAL: u32 = 6;

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct HudFrame {
    pub active: f32,
    pub mode: f32,
    pub score: f32,
    pub lives: f32,
    pub question_index: f32,
    pub total_questions: f32,
    pub timer_remaining: f32,
    pub detection_enabled: f32,
    pub reveal_available: f32,
    pub correct: f32,
    pub wrong: f32,
    pub skipped: f32,
}

fn flag(b: bool) -> f32 {
    if b { 1.0 } else { 0.0 }
}

impl HudFrame {
    pub const FLOATS: usize = 12;

    pub fn from_state(state: &GameState, timer_remaining: u32) -> Self {
        Self {
            active: flag(state.is_active),
            mode: state.mode.code() as f32,
            score: state.score as f32,
            lives: state.lives as f32,
            question_index: state.current_question_index as f32,
            total_questions: state.total_questions.map_or(-1.0, |t| t as f32),
            timer_remaining: timer_remaining as f32,
            detection_enabled: flag(state.detection_enabled),
            reveal_available: flag(state.is_active && !state.reveal_power_used),
            correct: state.correct_count as f32,
            wrong: state.wrong_count as f32,
            skipped: state.skipped_count as f32,
        }
    }

    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(std::slice::from_ref(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::GameMode;

    #[test]
    fn frame_size_matches_float_count() {
        assert_eq!(std::mem::size_of::<HudFrame>(), HudFrame::FLOATS * 4);
    }

    #[test]
    fn floats_are_in_declared_order() {
        let mut state = GameState::new(GameMode::SignMatch, Some(10), 0);
        state.is_active = true;
        state.score = 4;
        state.current_question_index = 6;
        state.skipped_count = 2;

        let frame = HudFrame::from_state(&state, 0);
        let floats = frame.as_floats();
        assert_eq!(floats.len(), HudFrame::FLOATS);
        assert_eq!(floats[0], 1.0);
        assert_eq!(floats[1], 1.0);
        assert_eq!(floats[2], 4.0);
        assert_eq!(floats[4], 6.0);
        assert_eq!(floats[5], 10.0);
        assert_eq!(floats[8], 1.0);
        assert_eq!(floats[11], 2.0);
    }

    #[test]
    fn unbounded_total_is_negative() {
        let state = GameState::new(GameMode::Endless, None, 3);
        let frame = HudFrame::from_state(&state, 10);
        assert_eq!(frame.total_questions, -1.0);
        assert_eq!(frame.reveal_available, 0.0);
    }
}
