//! Viselitsa - a themed hangman word-guessing game
//!
//! Core modules:
//! - `sim`: Game state machine (word selection, letter matching, win/loss)
//! - `words`: Themed word bank
//! - `progress`: Pluggable progress indicator (staged figure or image sequence)
//! - `settings`: Variant presets and configuration
//! - `ui`: Screen flow and view models consumed by the page
//! - `web`: wasm-bindgen surface (wasm32 only)

pub mod progress;
pub mod settings;
pub mod sim;
pub mod ui;
#[cfg(target_arch = "wasm32")]
pub mod web;
pub mod words;

pub use settings::{Settings, Variant};
pub use sim::{GameState, Outcome};
pub use ui::Session;
pub use words::WordBank;

/// Game configuration constants
pub mod consts {
    /// Attempts for the classic variant (ten-part figure)
    pub const MAX_ATTEMPTS_CLASSIC: u32 = 10;
    /// Attempts for the compact variant (stepped images)
    pub const MAX_ATTEMPTS_COMPACT: u32 = 6;

    /// Guessable letters, in on-screen keyboard order
    pub const ALPHABET: [char; 33] = [
        'А', 'Б', 'В', 'Г', 'Д', 'Е', 'Ё', 'Ж', 'З', 'И', 'Й', 'К', 'Л', 'М', 'Н', 'О', 'П', 'Р',
        'С', 'Т', 'У', 'Ф', 'Х', 'Ц', 'Ч', 'Ш', 'Щ', 'Ъ', 'Ы', 'Ь', 'Э', 'Ю', 'Я',
    ];
}

/// Whether `letter` belongs to the game alphabet
#[inline]
pub fn is_alphabet_letter(letter: char) -> bool {
    consts::ALPHABET.contains(&letter)
}

/// Upper-case a single letter. Returns `None` when the upper-case form is
/// more than one char.
#[inline]
pub fn normalize_letter(letter: char) -> Option<char> {
    let mut upper = letter.to_uppercase();
    let first = upper.next()?;
    match upper.next() {
        Some(_) => None,
        None => Some(first),
    }
}
