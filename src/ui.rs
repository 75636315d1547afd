//! Screen flow and view models
//!
//! `Session` is what a page holds: it owns the RNG, the word bank and the
//! current game, and tracks which of the three screens is showing. The
//! page renders from the view structs and forwards clicks and key presses
//! back in.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::consts::ALPHABET;
use crate::progress::{ProgressRenderer, ProgressView};
use crate::settings::Settings;
use crate::sim::{Command, GameError, GameEvent, GameState, Outcome, apply};
use crate::words::WordBank;
use crate::{is_alphabet_letter, normalize_letter};

/// Which screen is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    ThemeSelect,
    Game,
    Result,
}

/// One on-screen keyboard key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct KeyView {
    pub letter: char,
    pub enabled: bool,
}

/// Final screen text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultView {
    pub win: bool,
    pub status: &'static str,
    pub word_reveal: String,
}

impl ResultView {
    fn new(outcome: Outcome, word: &[char]) -> Self {
        let win = outcome.is_win();
        let word: String = word.iter().collect();
        Self {
            win,
            status: if win { "Победа!" } else { "Поражение" },
            word_reveal: format!("Загаданное слово: {word}"),
        }
    }
}

/// Everything the page needs to draw one frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct View {
    pub screen: Screen,
    pub themes: Vec<String>,
    /// One entry per letter; `None` while hidden
    pub tiles: Vec<Option<char>>,
    pub keyboard: Vec<KeyView>,
    pub attempts_left: u32,
    pub progress: ProgressView,
    pub result: Option<ResultView>,
}

/// A player's session: settings, word bank, RNG and the current game
pub struct Session {
    settings: Settings,
    bank: WordBank,
    rng: Pcg32,
    state: GameState,
    screen: Screen,
}

impl Session {
    pub fn new(settings: Settings, bank: WordBank, seed: u64) -> Self {
        log::info!(
            "Session started ({} variant, seed {seed})",
            settings.variant.as_str()
        );
        Self {
            settings,
            bank,
            rng: Pcg32::seed_from_u64(seed),
            state: GameState::default(),
            screen: Screen::ThemeSelect,
        }
    }

    /// Start a game from the theme card the player picked
    pub fn choose_theme(&mut self, theme: &str) -> Result<(), GameError> {
        self.dispatch(Command::Start {
            theme: theme.to_string(),
        })?;
        self.screen = Screen::Game;
        Ok(())
    }

    /// On-screen keyboard click
    pub fn press_letter(&mut self, letter: char) {
        if self.screen == Screen::Game {
            self.run(Command::Guess(letter));
        }
    }

    /// Physical key press. Only single alphabet letters count, and only on
    /// the game screen while the game is running. Returns whether the key
    /// was consumed.
    pub fn key_down(&mut self, key: &str) -> bool {
        if self.screen != Screen::Game || self.state.is_over() {
            return false;
        }
        let Some(letter) = filter_key(key) else {
            return false;
        };
        if self.state.is_used(letter) {
            return false;
        }
        self.run(Command::Guess(letter));
        true
    }

    pub fn hint(&mut self) {
        if self.screen == Screen::Game {
            self.run(Command::Hint);
        }
    }

    pub fn give_up(&mut self) {
        if self.screen == Screen::Game {
            self.run(Command::GiveUp);
        }
    }

    /// Back to theme selection
    pub fn new_game(&mut self) {
        self.screen = Screen::ThemeSelect;
    }

    fn run(&mut self, command: Command) {
        // Only Start can fail
        if let Err(e) = self.dispatch(command) {
            log::warn!("Command failed: {e}");
        }
    }

    fn dispatch(&mut self, command: Command) -> Result<(), GameError> {
        apply(
            &mut self.state,
            &self.bank,
            &self.settings,
            &command,
            &mut self.rng,
        )?;
        if self.state.is_over() {
            self.screen = Screen::Result;
        }
        Ok(())
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn theme_names(&self) -> Vec<String> {
        self.bank.themes().map(str::to_string).collect()
    }

    /// Take pending game events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }

    pub fn tiles(&self) -> Vec<Option<char>> {
        self.state
            .secret_word()
            .iter()
            .zip(self.state.revealed())
            .map(|(c, shown)| shown.then_some(*c))
            .collect()
    }

    pub fn keyboard(&self) -> Vec<KeyView> {
        let over = self.state.is_over();
        ALPHABET
            .iter()
            .map(|&letter| KeyView {
                letter,
                enabled: !over && !self.state.is_used(letter),
            })
            .collect()
    }

    pub fn progress_view(&self) -> ProgressView {
        let lost = matches!(self.state.outcome(), Some(Outcome::Lost { .. }));
        self.settings.progress.render(
            self.state.progress(),
            self.state.max_attempts(),
            lost,
        )
    }

    pub fn result_view(&self) -> Option<ResultView> {
        self.state
            .outcome()
            .map(|outcome| ResultView::new(outcome, self.state.secret_word()))
    }

    pub fn view(&self) -> View {
        View {
            screen: self.screen,
            themes: self.theme_names(),
            tiles: self.tiles(),
            keyboard: self.keyboard(),
            attempts_left: self.state.attempts_left(),
            progress: self.progress_view(),
            result: self.result_view(),
        }
    }
}

/// Map a keyboard `key` value to an alphabet letter
pub fn filter_key(key: &str) -> Option<char> {
    let mut chars = key.chars();
    let letter = normalize_letter(chars.next()?)?;
    if chars.next().is_some() || !is_alphabet_letter(letter) {
        return None;
    }
    Some(letter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Variant;

    fn session(variant: Variant) -> Session {
        Session::new(Settings::from_variant(variant), WordBank::default(), 2024)
    }

    #[test]
    fn test_filter_key() {
        assert_eq!(filter_key("ф"), Some('Ф'));
        assert_eq!(filter_key("Ё"), Some('Ё'));
        assert_eq!(filter_key("Enter"), None);
        assert_eq!(filter_key("f"), None);
        assert_eq!(filter_key(""), None);
    }

    #[test]
    fn test_screen_flow() {
        let mut s = session(Variant::Classic);
        assert_eq!(s.screen(), Screen::ThemeSelect);
        assert_eq!(s.theme_names(), ["animals", "cities", "tech"]);

        s.choose_theme("animals").unwrap();
        assert_eq!(s.screen(), Screen::Game);
        assert!(s.tiles().iter().all(Option::is_none));

        s.give_up();
        assert_eq!(s.screen(), Screen::Result);
        let result = s.result_view().unwrap();
        assert!(!result.win);
        assert_eq!(result.status, "Поражение");
        let word: String = s.state().secret_word().iter().collect();
        assert_eq!(result.word_reveal, format!("Загаданное слово: {word}"));

        s.new_game();
        assert_eq!(s.screen(), Screen::ThemeSelect);
    }

    #[test]
    fn test_unknown_theme_stays_on_select() {
        let mut s = session(Variant::Classic);
        assert!(s.choose_theme("planets").is_err());
        assert_eq!(s.screen(), Screen::ThemeSelect);
    }

    #[test]
    fn test_keyboard_disables_used_letters() {
        let mut s = session(Variant::Compact);
        s.choose_theme("cities").unwrap();
        s.press_letter('Ъ');
        let keys = s.keyboard();
        assert_eq!(keys.len(), ALPHABET.len());
        let hard_sign = keys.iter().find(|k| k.letter == 'Ъ').unwrap();
        assert!(!hard_sign.enabled);
        assert_eq!(keys.iter().filter(|k| !k.enabled).count(), 1);
        assert_eq!(s.state().attempts_left(), 5);
    }

    #[test]
    fn test_key_down_only_in_game() {
        let mut s = session(Variant::Classic);
        assert!(!s.key_down("а"));

        s.choose_theme("tech").unwrap();
        assert!(s.key_down("ъ"));
        assert!(!s.key_down("ъ")); // already used
        assert!(!s.key_down("Escape"));
        assert_eq!(s.state().used_letters().len(), 1);
    }

    #[test]
    fn test_win_via_keys() {
        let mut s = session(Variant::Classic);
        s.choose_theme("animals").unwrap();
        let letters: Vec<char> = s.state().secret_word().to_vec();
        for letter in letters {
            s.key_down(&letter.to_string());
        }
        assert_eq!(s.screen(), Screen::Result);
        let result = s.result_view().unwrap();
        assert!(result.win);
        assert_eq!(result.status, "Победа!");
        assert!(s.keyboard().iter().all(|k| !k.enabled));
        assert_eq!(s.state().attempts_left(), 10);
    }

    #[test]
    fn test_progress_views() {
        let mut s = session(Variant::Classic);
        s.choose_theme("animals").unwrap();
        s.press_letter('Щ');
        s.press_letter('Ю');
        assert_eq!(
            s.progress_view(),
            ProgressView::Figure {
                visible: vec!["hg-knot", "hg-head"]
            }
        );

        let mut s = session(Variant::Compact);
        s.choose_theme("animals").unwrap();
        s.give_up();
        assert_eq!(
            s.progress_view(),
            ProgressView::Image {
                frame: 6,
                src: "img/hangman6.png".into()
            }
        );
    }

    #[test]
    fn test_hint_reveals_tile() {
        let mut s = session(Variant::Classic);
        s.choose_theme("tech").unwrap();
        s.hint();
        assert!(s.tiles().iter().any(Option::is_some));
        assert_eq!(s.state().attempts_left(), 10);
        let events = s.drain_events();
        assert!(matches!(events.last(), Some(GameEvent::HintUsed { .. })));
    }

    #[test]
    fn test_view_serializes() {
        let mut s = session(Variant::Compact);
        s.choose_theme("cities").unwrap();
        let json = serde_json::to_value(s.view()).unwrap();
        assert_eq!(json["screen"], "game");
        assert_eq!(json["attempts_left"], 6);
        assert_eq!(json["progress"]["kind"], "image");
        assert!(json["result"].is_null());
    }
}
