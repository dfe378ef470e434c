use sign_engine::{
    ActionQueue, Candidate, ChallengeEngine, EngineConfig, EngineError, FeedbackCue, HudFrame,
    PlayerAction, QuestionToken, WordBank,
};

/// Wires the challenge engine to the page.
///
/// Actions from UI handlers are queued and applied at the start of the next frame;
/// recognizer callbacks go straight to the engine since they carry their own token.
pub struct ChallengeRunner {
    engine: ChallengeEngine<WordBank>,
    input: ActionQueue,
    hud: HudFrame,
    /// Flat buffer of feedback cue ids for the audio notifier.
    cue_buffer: Vec<u8>,
}

impl ChallengeRunner {
    pub fn new(config: EngineConfig) -> Self {
        let engine = ChallengeEngine::new(config, WordBank::builtin());
        let hud = engine.hud();
        Self {
            engine,
            input: ActionQueue::new(),
            hud,
            cue_buffer: Vec::with_capacity(8),
        }
    }

    /// Replace the built-in vocabulary with a manifest fetched by the page.
    pub fn load_words(&mut self, json: &str) -> Result<(), EngineError> {
        let bank = WordBank::from_json(json)?;
        self.engine.set_words(bank);
        Ok(())
    }

    pub fn push_action(&mut self, action: PlayerAction) {
        self.input.push(action);
    }

    pub fn recognizer_ready(&mut self, token: u32) {
        self.engine.on_recognizer_ready(QuestionToken(token));
    }

    /// `json` is an array of `{ "label": .., "confidence": .. }`.
    pub fn detection(&mut self, token: u32, json: &str) -> Result<(), EngineError> {
        let candidates: Vec<Candidate> = serde_json::from_str(json)?;
        self.engine.on_detection(QuestionToken(token), &candidates);
        Ok(())
    }

    /// Run one frame: apply queued actions, advance timers, refresh the HUD.
    pub fn tick(&mut self, dt: f32) {
        self.engine.process(&mut self.input);
        self.engine.tick(dt);
        self.hud = self.engine.hud();

        self.cue_buffer.clear();
        self.cue_buffer
            .extend(self.engine.drain_cues().into_iter().map(FeedbackCue::id));
    }

    /// Serialize and clear the events produced since the last call.
    pub fn take_events_json(&mut self) -> String {
        let events = self.engine.drain_events();
        serde_json::to_string(&events).unwrap_or_else(|err| {
            log::error!("failed to serialize engine events: {}", err);
            "[]".to_string()
        })
    }

    pub fn state_json(&self) -> String {
        serde_json::to_string(self.engine.state()).unwrap_or_else(|_| "null".to_string())
    }

    pub fn engine(&self) -> &ChallengeEngine<WordBank> {
        &self.engine
    }

    // ---- Pointer accessors for direct wasm memory reads ----

    pub fn hud_ptr(&self) -> *const f32 {
        self.hud.as_floats().as_ptr()
    }

    pub fn hud_floats(&self) -> u32 {
        HudFrame::FLOATS as u32
    }

    pub fn cue_ptr(&self) -> *const u8 {
        self.cue_buffer.as_ptr()
    }

    pub fn cue_len(&self) -> u32 {
        self.cue_buffer.len() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sign_engine::GameMode;

    fn runner() -> ChallengeRunner {
        let mut runner = ChallengeRunner::new(EngineConfig {
            seed: 9,
            ..EngineConfig::default()
        });
        runner
            .load_words(r#"{ "categories": { "alphabet": ["A"] } }"#)
            .unwrap();
        runner
    }

    #[test]
    fn actions_apply_on_next_tick() {
        let mut runner = runner();
        runner.push_action(PlayerAction::ModeSelected(GameMode::FlashSign));
        assert!(!runner.engine().state().is_active);

        runner.tick(1.0 / 60.0);
        assert!(runner.engine().state().is_active);
        assert_eq!(runner.hud.active, 1.0);
        assert_eq!(runner.cue_len(), 1);
    }

    #[test]
    fn detection_json_reaches_engine() {
        let mut runner = runner();
        runner.push_action(PlayerAction::ModeSelected(GameMode::FlashSign));
        runner.tick(0.0);
        let token = runner.engine().state().token.0;

        runner.recognizer_ready(token);
        runner
            .detection(token, r#"[{ "label": "A", "confidence": 0.8 }]"#)
            .unwrap();
        assert_eq!(runner.engine().state().score, 1);
        assert!(runner.detection(token, "not json").is_err());
    }

    #[test]
    fn events_serialize_as_json_array() {
        let mut runner = runner();
        runner.push_action(PlayerAction::ModeSelected(GameMode::Endless));
        runner.tick(0.0);

        let json = runner.take_events_json();
        let events: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(events[0]["type"], "game_started");
        assert_eq!(events[0]["mode"], "endless");
        assert_eq!(runner.take_events_json(), "[]");
    }

    #[test]
    fn bad_manifest_is_rejected() {
        let mut runner = runner();
        assert!(runner.load_words("{ \"categories\": 3 }").is_err());
    }
}
