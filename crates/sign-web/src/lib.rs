//! wasm-bindgen exports for the sign challenge engine.
//!
//! The page calls `challenge_init` once, forwards UI events and recognizer results
//! as they happen, calls `challenge_tick` from `requestAnimationFrame`, and then reads
//! `challenge_take_events`, the HUD floats and the cue bytes.

pub mod runner;

pub use runner::ChallengeRunner;

use std::cell::RefCell;

use sign_engine::{EngineConfig, GameMode, PlayerAction, Side};
use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<Option<ChallengeRunner>> = RefCell::new(None);
}

fn with_runner<R>(f: impl FnOnce(&mut ChallengeRunner) -> R) -> R {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        let runner = borrow
            .as_mut()
            .expect("Challenge not initialized. Call challenge_init() first.");
        f(runner)
    })
}

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// `config_json` may be empty for defaults. A zero seed is replaced by a random one.
#[wasm_bindgen]
pub fn challenge_init(config_json: &str) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let mut config = if config_json.trim().is_empty() {
        EngineConfig::default()
    } else {
        EngineConfig::from_json(config_json).map_err(to_js)?
    };
    if config.seed == 0 {
        config.seed = (js_sys::Math::random() * u32::MAX as f64) as u64 | 1;
    }

    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(ChallengeRunner::new(config));
    });
    log::info!("sign challenge: initialized");
    Ok(())
}

#[wasm_bindgen]
pub fn challenge_load_words(json: &str) -> Result<(), JsValue> {
    with_runner(|r| r.load_words(json)).map_err(to_js)
}

#[wasm_bindgen]
pub fn challenge_tick(dt: f32) {
    with_runner(|r| r.tick(dt));
}

// ---- Presentation → engine ----

#[wasm_bindgen]
pub fn challenge_select_mode(mode: &str) -> Result<(), JsValue> {
    let mode: GameMode = mode.parse().map_err(to_js)?;
    with_runner(|r| r.push_action(PlayerAction::ModeSelected(mode)));
    Ok(())
}

#[wasm_bindgen]
pub fn challenge_select_category(category: &str) {
    let category = category.to_string();
    with_runner(|r| r.push_action(PlayerAction::CategorySelected(category)));
}

/// `side`: 0 = left, 1 = right.
#[wasm_bindgen]
pub fn challenge_pick_video(side: u32) {
    match Side::from_code(side) {
        Some(side) => with_runner(|r| r.push_action(PlayerAction::VideoPicked(side))),
        None => log::warn!("ignoring video pick with unknown side {}", side),
    }
}

#[wasm_bindgen]
pub fn challenge_skip() {
    with_runner(|r| r.push_action(PlayerAction::Skip));
}

#[wasm_bindgen]
pub fn challenge_quit() {
    with_runner(|r| r.push_action(PlayerAction::Quit));
}

#[wasm_bindgen]
pub fn challenge_reveal() {
    with_runner(|r| r.push_action(PlayerAction::Reveal));
}

#[wasm_bindgen]
pub fn challenge_continue_after_reveal() {
    with_runner(|r| r.push_action(PlayerAction::ContinueAfterReveal));
}

/// Generic numeric path for UI buttons; see the action codes in the bridge protocol.
#[wasm_bindgen]
pub fn challenge_custom_event(kind: u32, a: f32) {
    match PlayerAction::from_custom(kind, a) {
        Some(action) => with_runner(|r| r.push_action(action)),
        None => log::warn!("ignoring unknown custom event {} ({})", kind, a),
    }
}

// ---- Recognizer → engine ----

#[wasm_bindgen]
pub fn challenge_recognizer_ready(token: u32) {
    with_runner(|r| r.recognizer_ready(token));
}

#[wasm_bindgen]
pub fn challenge_detection(token: u32, candidates_json: &str) -> Result<(), JsValue> {
    with_runner(|r| r.detection(token, candidates_json)).map_err(to_js)
}

// ---- Engine → presentation ----

#[wasm_bindgen]
pub fn challenge_take_events() -> String {
    with_runner(|r| r.take_events_json())
}

#[wasm_bindgen]
pub fn challenge_state() -> String {
    with_runner(|r| r.state_json())
}

#[wasm_bindgen]
pub fn get_hud_ptr() -> *const f32 {
    with_runner(|r| r.hud_ptr())
}

#[wasm_bindgen]
pub fn get_hud_floats() -> u32 {
    with_runner(|r| r.hud_floats())
}

#[wasm_bindgen]
pub fn get_cue_ptr() -> *const u8 {
    with_runner(|r| r.cue_ptr())
}

#[wasm_bindgen]
pub fn get_cue_len() -> u32 {
    with_runner(|r| r.cue_len())
}

#[wasm_bindgen]
pub fn get_protocol_version() -> f32 {
    sign_engine::bridge::protocol::PROTOCOL_VERSION
}
