use crate::api::types::{GameMode, Side};
use crate::bridge::protocol::{
    ACTION_CONTINUE_AFTER_REVEAL, ACTION_PICK_VIDEO, ACTION_QUIT, ACTION_REVEAL, ACTION_SELECT_MODE,
    ACTION_SKIP,
};

/// Discrete player actions forwarded by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerAction {
    ModeSelected(GameMode),
    CategorySelected(String),
    VideoPicked(Side),
    Skip,
    Quit,
    Reveal,
    ContinueAfterReveal,
}

impl PlayerAction {
    /// Decode the generic numeric `(kind, a)` event used by UI buttons.
    /// Unknown kinds or payloads yield `None`.
    pub fn from_custom(kind: u32, a: f32) -> Option<Self> {
        match kind {
            ACTION_SELECT_MODE => GameMode::from_code(a as u32).map(PlayerAction::ModeSelected),
            ACTION_PICK_VIDEO => Side::from_code(a as u32).map(PlayerAction::VideoPicked),
            ACTION_SKIP => Some(PlayerAction::Skip),
            ACTION_QUIT => Some(PlayerAction::Quit),
            ACTION_REVEAL => Some(PlayerAction::Reveal),
            ACTION_CONTINUE_AFTER_REVEAL => Some(PlayerAction::ContinueAfterReveal),
            _ => None,
        }
    }
}

/// A queue of player actions.
/// JS pushes actions as they happen; the engine drains them each frame.
pub struct ActionQueue {
    actions: Vec<PlayerAction>,
}

impl ActionQueue {
    pub fn new() -> Self {
        Self {
            actions: Vec::with_capacity(8),
        }
    }

    pub fn push(&mut self, action: PlayerAction) {
        self.actions.push(action);
    }

    /// Drain all pending actions. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<PlayerAction> {
        std::mem::take(&mut self.actions)
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }
}

impl Default for ActionQueue {
    fn default() -> Self {
        Self::new()
    }
}
