//! Browser bindings
//!
//! The page owns a `WebGame`, forwards clicks and key presses into it, and
//! redraws from `view_json()` after each call.

use wasm_bindgen::prelude::*;
use web_sys::KeyboardEvent;

use crate::settings::Settings;
use crate::ui::Session;
use crate::words::WordBank;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).expect("Failed to init logger");
    log::info!("Viselitsa loaded");
}

/// Game handle exported to JS
#[wasm_bindgen]
pub struct WebGame {
    session: Session,
}

#[wasm_bindgen]
impl WebGame {
    /// Classic game with the built-in word bank
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebGame {
        Self::with_settings(Settings::default(), WordBank::default())
    }

    /// Game configured from JSON settings and an optional JSON word bank
    pub fn from_config(settings_json: &str, words_json: Option<String>) -> Result<WebGame, JsValue> {
        let settings = Settings::from_json(settings_json).map_err(to_js_error)?;
        let bank = match words_json {
            Some(json) => WordBank::from_json(&json).map_err(to_js_error)?,
            None => WordBank::default(),
        };
        Ok(Self::with_settings(settings, bank))
    }

    /// Theme card click
    pub fn choose_theme(&mut self, theme: &str) -> Result<(), JsValue> {
        self.session.choose_theme(theme).map_err(to_js_error)
    }

    /// On-screen key click
    pub fn press_letter(&mut self, letter: char) {
        self.session.press_letter(letter);
    }

    /// `keydown` listener; returns whether the key was used
    pub fn key_down(&mut self, event: &KeyboardEvent) -> bool {
        if event.repeat() {
            return false;
        }
        self.session.key_down(&event.key())
    }

    pub fn hint(&mut self) {
        self.session.hint();
    }

    pub fn give_up(&mut self) {
        self.session.give_up();
    }

    pub fn new_game(&mut self) {
        self.session.new_game();
    }

    /// Full view model as JSON
    pub fn view_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.session.view()).map_err(to_js_error)
    }

    /// Pending game events as JSON, oldest first
    pub fn events_json(&mut self) -> Result<String, JsValue> {
        serde_json::to_string(&self.session.drain_events()).map_err(to_js_error)
    }
}

impl WebGame {
    fn with_settings(settings: Settings, bank: WordBank) -> WebGame {
        let seed = js_sys::Date::now() as u64;
        WebGame {
            session: Session::new(settings, bank, seed),
        }
    }
}

impl Default for WebGame {
    fn default() -> Self {
        Self::new()
    }
}

fn to_js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}
