use crate::api::config::EngineConfig;
use crate::api::error::ConfigurationError;
use crate::api::events::EngineEvent;
use crate::api::types::{Candidate, FeedbackCue, GameMode, Outcome, QuestionToken, Side};
use crate::assets::words::{WordBank, WordSource};
use crate::bridge::protocol::HudFrame;
use crate::core::rng::Rng;
use crate::core::state::{GameState, QuestionPhase};
use crate::core::timer::{RoundTimer, TimerSignal};
use crate::core::watchdog::{Watchdog, WatchdogVerdict};
use crate::input::queue::{ActionQueue, PlayerAction};
use crate::modes::{rules_for, ModeRules, Verdict};

/// An `advance_question` waiting out the feedback pause.
/// Bound to the question it was scheduled for.
#[derive(Debug, Clone, Copy)]
struct PendingAdvance {
    token: QuestionToken,
    remaining: f32,
}

/// The challenge game controller.
///
/// Owns the `GameState` and is the only thing that mutates it. The host feeds it
/// player actions, recognizer results and frame deltas; it answers with
/// `EngineEvent`s and `FeedbackCue`s drained once per frame.
pub struct ChallengeEngine<S: WordSource = WordBank> {
    config: EngineConfig,
    words: S,
    rng: Rng,
    rules: Box<dyn ModeRules>,
    state: GameState,
    timer: RoundTimer,
    watchdog: Watchdog,
    pending_advance: Option<PendingAdvance>,
    /// Token the recognizer last confirmed its configuration for.
    recognizer_ready: Option<QuestionToken>,
    camera_active: bool,
    category: String,
    events: Vec<EngineEvent>,
    cues: Vec<FeedbackCue>,
}

impl<S: WordSource> ChallengeEngine<S> {
    pub fn new(config: EngineConfig, words: S) -> Self {
        let category = config.default_category.clone();
        let rules = rules_for(GameMode::FlashSign, &config, &category);
        let state = GameState::new(GameMode::FlashSign, rules.total_questions(), 0);
        Self {
            rng: Rng::new(config.seed),
            timer: RoundTimer::new(config.round_seconds),
            watchdog: Self::watchdog_for(&config),
            rules,
            state,
            pending_advance: None,
            recognizer_ready: None,
            camera_active: false,
            category,
            events: Vec::new(),
            cues: Vec::new(),
            words,
            config,
        }
    }

    fn watchdog_for(config: &EngineConfig) -> Watchdog {
        Watchdog::new(
            config.watchdog_interval,
            config.watchdog_stale_after,
            config.max_watchdog_restarts,
        )
    }

    // -- Read access --

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn timer(&self) -> &RoundTimer {
        &self.timer
    }

    pub fn has_pending_advance(&self) -> bool {
        self.pending_advance.is_some()
    }

    /// Events emitted since the last drain.
    pub fn events(&self) -> &[EngineEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn drain_cues(&mut self) -> Vec<FeedbackCue> {
        std::mem::take(&mut self.cues)
    }

    /// Numeric HUD snapshot for the bridge.
    pub fn hud(&self) -> HudFrame {
        HudFrame::from_state(&self.state, self.timer.remaining())
    }

    // -- Setup --

    /// Replace the word source. Takes effect from the next drawn question.
    pub fn set_words(&mut self, words: S) {
        self.words = words;
    }

    /// Category used by FlashSign and SignMatch from the next game on.
    pub fn select_category(&mut self, category: impl Into<String>) {
        self.category = category.into();
        log::debug!("category set to `{}`", self.category);
    }

    // -- Presentation intake --

    pub fn handle_action(&mut self, action: PlayerAction) {
        match action {
            PlayerAction::ModeSelected(mode) => {
                // A configuration failure is already surfaced as an event.
                let _ = self.start_game(mode);
            }
            PlayerAction::CategorySelected(category) => self.select_category(category),
            PlayerAction::VideoPicked(side) => self.on_video_picked(side),
            PlayerAction::Skip => self.skip_question(),
            PlayerAction::Quit => self.quit_game(),
            PlayerAction::Reveal => self.use_reveal_power(),
            PlayerAction::ContinueAfterReveal => self.continue_after_reveal(),
        }
    }

    /// Apply every queued action in arrival order.
    pub fn process(&mut self, queue: &mut ActionQueue) {
        for action in queue.drain() {
            self.handle_action(action);
        }
    }

    // -- Lifecycle --

    /// Start a fresh game in `mode`, superseding any running one, and draw the first question.
    pub fn start_game(&mut self, mode: GameMode) -> Result<(), ConfigurationError> {
        self.stop_question_activity();
        self.watchdog = Self::watchdog_for(&self.config);

        // Tokens keep counting across games so late callbacks from the previous game stay stale.
        let last_token = self.state.token;
        self.rules = rules_for(mode, &self.config, &self.category);
        self.state = GameState::new(
            self.rules.mode(),
            self.rules.total_questions(),
            self.rules.starting_lives(),
        );
        self.state.token = last_token;
        self.state.is_active = true;

        log::info!("starting {} game", mode);
        self.events.push(EngineEvent::GameStarted {
            mode,
            total_questions: self.state.total_questions,
            lives: self.rules.costs_lives().then_some(self.state.lives),
        });
        self.events.push(EngineEvent::ScoreChanged { score: 0 });
        if self.rules.costs_lives() {
            self.events.push(EngineEvent::LivesChanged {
                lives: self.state.lives,
            });
        }

        self.advance_question()
    }

    /// Move to the next question, or end the game when there is none.
    pub fn advance_question(&mut self) -> Result<(), ConfigurationError> {
        if !self.state.is_active {
            return Ok(());
        }

        // Old callbacks must not see the new question's context.
        self.stop_question_activity();
        self.state.reset_question();
        self.state.current_question_index += 1;

        let out_of_questions = matches!(
            self.state.total_questions,
            Some(total) if self.state.current_question_index > total
        );
        let out_of_lives = self.rules.costs_lives() && self.state.lives == 0;
        if out_of_questions || out_of_lives {
            self.end_game();
            return Ok(());
        }

        let question = match self.rules.draw(&self.words, &mut self.rng) {
            Ok(question) => question,
            Err(err) => {
                self.abort(&err);
                return Err(err);
            }
        };

        let token = self.state.token.next();
        self.state.token = token;
        self.state.phase = QuestionPhase::AwaitingInput;
        self.state.question = Some(question.clone());

        log::debug!(
            "question {} ({}): `{}` from `{}`",
            self.state.current_question_index,
            token.0,
            question.word,
            question.category
        );
        self.events.push(EngineEvent::QuestionStarted {
            token,
            index: self.state.current_question_index,
            total: self.state.total_questions,
            word: question.word.clone(),
            category: question.category.clone(),
        });
        self.events.push(EngineEvent::ConfigureRecognizer {
            category: question.category.clone(),
            token,
        });

        let setup = self.rules.on_question_start(&question, &self.words, &mut self.rng);
        if setup.timed {
            self.timer.start();
            self.events.push(EngineEvent::TimerTick {
                remaining: self.timer.remaining(),
            });
        }
        if let Some(choices) = setup.choices {
            self.state.sign_match.correct_side = Some(choices.correct);
            self.events.push(EngineEvent::VideoChoices {
                token,
                left: choices.left,
                right: choices.right,
            });
        }
        if setup.detection {
            self.enable_detection();
        }
        Ok(())
    }

    /// Terminal. Stops everything and publishes the summary.
    pub fn end_game(&mut self) {
        if !self.state.is_active {
            return;
        }
        self.stop_question_activity();
        self.state.is_active = false;

        let summary = self.state.summary();
        log::info!(
            "{} game over: score {}, {}/{}/{} correct/wrong/skipped",
            summary.mode,
            summary.score,
            summary.correct,
            summary.wrong,
            summary.skipped
        );
        self.events.push(EngineEvent::GameOver { summary });
    }

    /// Player-initiated early end.
    pub fn quit_game(&mut self) {
        if self.state.is_active {
            log::info!("player quit at question {}", self.state.current_question_index);
        }
        self.end_game();
    }

    /// Fatal configuration failure: back to mode selection without a summary.
    fn abort(&mut self, err: &ConfigurationError) {
        log::error!("aborting game: {}", err);
        self.stop_question_activity();
        self.state.is_active = false;
        self.events.push(EngineEvent::ConfigurationFailed {
            message: err.to_string(),
        });
    }

    // -- Frame loop --

    /// Advance timers by `dt` seconds. Call once per display frame.
    ///
    /// `dt` is capped at `max_frame_dt`, the same way the fixed-step accumulator
    /// caps its backlog.
    pub fn tick(&mut self, dt: f32) {
        if !self.state.is_active {
            return;
        }
        let dt = dt.max(0.0).min(self.config.max_frame_dt);

        // A pending advance consumes frame time from the frame after it was scheduled.
        if let Some(mut pending) = self.pending_advance.take() {
            pending.remaining -= dt;
            if pending.remaining > 0.0 {
                self.pending_advance = Some(pending);
            } else if pending.token == self.state.token {
                // A configuration failure is already surfaced as an event.
                let _ = self.advance_question();
                // The new question's clocks start on the next frame.
                return;
            }
        }

        for signal in self.timer.advance(dt) {
            match signal {
                TimerSignal::Tick(remaining) => self.events.push(EngineEvent::TimerTick { remaining }),
                TimerSignal::Expired => self.on_time_expired(),
            }
        }

        if let Some(verdict) = self.watchdog.advance(dt) {
            self.on_watchdog(verdict);
        }
    }

    fn on_watchdog(&mut self, verdict: WatchdogVerdict) {
        let token = self.state.token;
        match verdict {
            WatchdogVerdict::Restart { attempt } => {
                log::warn!("detection loop stalled, restarting (attempt {})", attempt);
                self.recognizer_ready = None;
                self.events.push(EngineEvent::RestartDetection { token, attempt });
                if let Some(question) = &self.state.question {
                    self.events.push(EngineEvent::ConfigureRecognizer {
                        category: question.category.clone(),
                        token,
                    });
                }
            }
            WatchdogVerdict::GaveUp => {
                log::warn!("detection loop still stalled after {} restarts", self.watchdog.restarts());
                self.events.push(EngineEvent::DetectionStalled { token });
            }
        }
    }

    // -- Recognizer intake --

    /// The recognizer finished loading the model requested under `token`.
    pub fn on_recognizer_ready(&mut self, token: QuestionToken) {
        if !self.state.is_active || token != self.state.token {
            log::trace!("ignoring stale recognizer ready ({})", token.0);
            return;
        }
        self.recognizer_ready = Some(token);
    }

    /// One recognizer result for a frame captured under `token`.
    pub fn on_detection(&mut self, token: QuestionToken, candidates: &[Candidate]) {
        if !self.state.is_active || token != self.state.token {
            log::trace!("ignoring stale detection ({})", token.0);
            return;
        }
        self.watchdog.record_result();

        if self.recognizer_ready != Some(token) || !self.state.detection_enabled {
            return;
        }

        let threshold = self.config.confidence_threshold;
        let best = candidates
            .iter()
            .filter(|c| c.confidence >= threshold)
            .max_by(|a, b| a.confidence.total_cmp(&b.confidence));
        let Some(best) = best else {
            return;
        };

        let label = self.words.normalize(&best.label);
        self.state.last_detected_label = Some(label.clone());
        self.events.push(EngineEvent::Detected {
            label: label.clone(),
            confidence: best.confidence,
        });

        let verdict = self.rules.on_candidate_answer(&self.state, &label);
        self.apply(verdict, Some(label));
    }

    // -- Answer adjudication --

    fn apply(&mut self, verdict: Verdict, detected: Option<String>) {
        match verdict {
            Verdict::Ignore => {}
            Verdict::Correct => self.handle_correct(detected),
            Verdict::Wrong => self.handle_wrong(Outcome::Wrong, detected),
            Verdict::TimedOut => self.handle_wrong(Outcome::TimedOut, None),
            Verdict::CorrectPick => self.accept_pick(),
            Verdict::WrongPick => {
                self.state.wrong_count += 1;
                self.resolve(Outcome::Wrong, None);
                self.schedule_advance();
            }
            Verdict::DemonstrationComplete => {
                self.state.sign_match.demonstration_required = false;
                self.state.sign_match.demonstration_word = None;
                self.resolve(Outcome::Correct, detected);
                self.schedule_advance();
            }
            Verdict::DemonstrationMismatch => {
                if let (Some(expected), Some(detected)) =
                    (self.state.sign_match.demonstration_word.clone(), detected)
                {
                    self.cues.push(FeedbackCue::Incorrect);
                    self.events.push(EngineEvent::DemonstrationMismatch { expected, detected });
                }
            }
        }
    }

    fn handle_correct(&mut self, detected: Option<String>) {
        if self.state.phase != QuestionPhase::AwaitingInput {
            return;
        }
        self.state.score += 1;
        self.state.correct_count += 1;
        self.events.push(EngineEvent::ScoreChanged {
            score: self.state.score,
        });
        self.resolve(Outcome::Correct, detected);
        self.schedule_advance();
    }

    /// Wrong answer or timeout. Costs a life where the mode says so.
    fn handle_wrong(&mut self, outcome: Outcome, detected: Option<String>) {
        if self.state.phase != QuestionPhase::AwaitingInput {
            return;
        }
        self.state.wrong_count += 1;
        if self.rules.costs_lives() {
            self.state.lives = self.state.lives.saturating_sub(1);
            self.events.push(EngineEvent::LivesChanged {
                lives: self.state.lives,
            });
        }
        self.resolve(outcome, detected);

        if self.rules.costs_lives() && self.state.lives == 0 {
            self.end_game();
        } else {
            self.schedule_advance();
        }
    }

    fn on_time_expired(&mut self) {
        let verdict = self.rules.on_timer_expired(&self.state);
        self.apply(verdict, None);
    }

    /// SignMatch: credit the pick now, then wait for the sign itself.
    fn accept_pick(&mut self) {
        let Some(question) = self.state.question.clone() else {
            return;
        };
        self.state.score += 1;
        self.state.correct_count += 1;
        self.state.phase = QuestionPhase::AwaitingDemonstration;

        let sm = &mut self.state.sign_match;
        sm.video_selection_made = true;
        sm.last_selection_correct = true;
        sm.demonstration_required = true;
        sm.demonstration_word = Some(question.word.clone());

        self.cues.push(FeedbackCue::Correct);
        self.events.push(EngineEvent::ScoreChanged {
            score: self.state.score,
        });
        self.events.push(EngineEvent::DemonstrationRequired {
            word: question.word,
        });
        self.enable_detection();
    }

    /// Mark the question terminal and tell the player how it went.
    fn resolve(&mut self, outcome: Outcome, detected: Option<String>) {
        self.state.phase = QuestionPhase::Resolved;
        self.timer.cancel();
        self.disable_detection();

        if let Some(question) = &self.state.question {
            self.events.push(EngineEvent::QuestionResolved {
                token: self.state.token,
                outcome,
                expected: question.word.clone(),
                detected,
            });
        }
        match outcome {
            Outcome::Correct => self.cues.push(FeedbackCue::Correct),
            Outcome::Wrong | Outcome::TimedOut => self.cues.push(FeedbackCue::Incorrect),
            Outcome::Skipped => self.cues.push(FeedbackCue::Select),
        }
    }

    fn schedule_advance(&mut self) {
        self.pending_advance = Some(PendingAdvance {
            token: self.state.token,
            remaining: self.config.advance_delay,
        });
    }

    // -- SignMatch picker --

    pub fn on_video_picked(&mut self, side: Side) {
        if !self.state.is_active {
            return;
        }
        let verdict = self.rules.on_video_picked(&self.state, side);
        if verdict == Verdict::WrongPick {
            self.state.sign_match.video_selection_made = true;
            self.state.sign_match.last_selection_correct = false;
        }
        self.apply(verdict, None);
    }

    // -- Power-ups --

    /// One-shot hint: show the current word's demonstration video.
    pub fn use_reveal_power(&mut self) {
        if !self.state.is_active || self.state.reveal_power_used {
            return;
        }
        if !matches!(
            self.state.phase,
            QuestionPhase::AwaitingInput | QuestionPhase::AwaitingDemonstration
        ) {
            return;
        }
        let Some(question) = &self.state.question else {
            return;
        };
        let video = self.words.video_ref(&question.word, &question.category);
        let word = question.word.clone();

        self.state.reveal_power_used = true;
        self.cues.push(FeedbackCue::Select);
        self.events.push(EngineEvent::RevealShown { word, video });
    }

    pub fn continue_after_reveal(&mut self) {
        if self.state.is_active {
            self.events.push(EngineEvent::RevealDismissed);
        }
    }

    /// Skip the current question. Not available in Endless.
    ///
    /// During a SignMatch demonstration the pick is already credited, so skipping
    /// just moves on without touching the counters.
    pub fn skip_question(&mut self) {
        if !self.state.is_active || !self.rules.allows_skip() {
            return;
        }
        match self.state.phase {
            QuestionPhase::AwaitingInput => {
                self.state.skipped_count += 1;
                self.resolve(Outcome::Skipped, None);
                self.schedule_advance();
            }
            QuestionPhase::AwaitingDemonstration => {
                self.state.sign_match.demonstration_required = false;
                self.state.sign_match.demonstration_word = None;
                self.resolve(Outcome::Skipped, None);
                self.schedule_advance();
            }
            QuestionPhase::Pending | QuestionPhase::Resolved => {}
        }
    }

    // -- Detection resource --

    fn enable_detection(&mut self) {
        if !self.camera_active {
            self.camera_active = true;
            self.cues.push(FeedbackCue::Camera);
            self.events.push(EngineEvent::CameraStart {
                token: self.state.token,
            });
        }
        if !self.state.detection_enabled {
            self.state.detection_enabled = true;
            self.events.push(EngineEvent::DetectionEnabled);
        }
        self.watchdog.arm();
    }

    fn disable_detection(&mut self) {
        self.watchdog.disarm();
        if self.state.detection_enabled {
            self.state.detection_enabled = false;
            self.events.push(EngineEvent::DetectionDisabled);
        }
        if self.camera_active {
            self.camera_active = false;
            self.events.push(EngineEvent::CameraStop);
        }
    }

    /// Cancel every per-question timer and release the camera.
    fn stop_question_activity(&mut self) {
        self.timer.cancel();
        self.pending_advance = None;
        self.recognizer_ready = None;
        self.disable_detection();
    }
}

impl Default for ChallengeEngine<WordBank> {
    fn default() -> Self {
        Self::new(EngineConfig::default(), WordBank::builtin())
    }
}
