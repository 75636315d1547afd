//! Game state and transitions
//!
//! One `GameState` per game. Every transition is synchronous and atomic;
//! invalid or repeated input is ignored rather than reported.

use std::collections::BTreeSet;

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::words::WordBank;
use crate::{is_alphabet_letter, normalize_letter};

/// Errors from starting a game
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("Unknown theme '{0}'")]
    UnknownTheme(String),

    #[error("Theme '{0}' has no words")]
    EmptyTheme(String),

    #[error("'{0}' is not a playable word")]
    InvalidWord(String),

    #[error("A game needs at least one attempt")]
    NoAttempts,
}

/// Errors from restoring a serialized game
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StateError {
    #[error("revealed has {revealed} entries for a {word}-letter word")]
    MaskLength { word: usize, revealed: usize },

    #[error("'{0}' is not in the alphabet")]
    InvalidLetter(char),

    #[error("{attempts_left} attempts left out of {max_attempts}")]
    AttemptsOutOfRange { attempts_left: u32, max_attempts: u32 },

    #[error("letter {0} is revealed without being used, or used without being revealed")]
    MaskMismatch(char),

    #[error("outcome {outcome:?} does not match the board")]
    OutcomeMismatch { outcome: Option<Outcome> },
}

/// How a finished game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Won,
    Lost { gave_up: bool },
}

impl Outcome {
    pub fn is_win(&self) -> bool {
        matches!(self, Outcome::Won)
    }
}

/// Something the presentation layer may want to react to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Started { theme: String, length: usize },
    LetterHit { letter: char, count: usize },
    LetterMiss { letter: char, attempts_left: u32 },
    HintUsed { letter: char, count: usize },
    Won,
    Lost { gave_up: bool },
}

/// Result of a single letter guess
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guess {
    /// Game over, letter already used, or not a letter of the alphabet
    Ignored,
    /// Letter occurs in the word; `revealed` positions were uncovered
    Hit { revealed: usize },
    /// Letter does not occur; one attempt consumed
    Miss,
}

/// Complete state of one game (serializable)
///
/// `Default` is the idle state before any game has started: every
/// transition on it is a no-op.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGameState")]
pub struct GameState {
    /// Theme the secret word was drawn from
    theme: String,
    /// Secret word, one entry per letter
    secret_word: Vec<char>,
    /// `revealed[i]` iff letter `i` is shown
    revealed: Vec<bool>,
    attempts_left: u32,
    max_attempts: u32,
    /// Every letter guessed or hinted so far
    used_letters: BTreeSet<char>,
    /// `Some` once the game is over
    outcome: Option<Outcome>,
    /// Pending events, drained by the presentation layer
    #[serde(skip)]
    events: Vec<GameEvent>,
}

/// Serialized form, checked before it becomes a `GameState`
#[derive(Deserialize)]
struct RawGameState {
    theme: String,
    secret_word: Vec<char>,
    revealed: Vec<bool>,
    attempts_left: u32,
    max_attempts: u32,
    used_letters: BTreeSet<char>,
    outcome: Option<Outcome>,
}

impl TryFrom<RawGameState> for GameState {
    type Error = StateError;

    fn try_from(raw: RawGameState) -> Result<Self, Self::Error> {
        if raw.revealed.len() != raw.secret_word.len() {
            return Err(StateError::MaskLength {
                word: raw.secret_word.len(),
                revealed: raw.revealed.len(),
            });
        }
        if let Some(letter) = raw
            .secret_word
            .iter()
            .chain(&raw.used_letters)
            .find(|c| !is_alphabet_letter(**c))
        {
            return Err(StateError::InvalidLetter(*letter));
        }

        let started = !raw.secret_word.is_empty();
        if raw.attempts_left > raw.max_attempts || (started && raw.max_attempts == 0) {
            return Err(StateError::AttemptsOutOfRange {
                attempts_left: raw.attempts_left,
                max_attempts: raw.max_attempts,
            });
        }

        // A letter is shown exactly when it has been guessed or hinted
        for (c, shown) in raw.secret_word.iter().zip(&raw.revealed) {
            if *shown != raw.used_letters.contains(c) {
                return Err(StateError::MaskMismatch(*c));
            }
        }

        let solved = raw.revealed.iter().all(|shown| *shown);
        let consistent = match raw.outcome {
            _ if !started => raw.outcome.is_none() && raw.used_letters.is_empty(),
            None => !solved && raw.attempts_left > 0,
            Some(Outcome::Won) => solved,
            Some(Outcome::Lost { gave_up: false }) => !solved && raw.attempts_left == 0,
            Some(Outcome::Lost { gave_up: true }) => raw.attempts_left == 0,
        };
        if !consistent {
            return Err(StateError::OutcomeMismatch {
                outcome: raw.outcome,
            });
        }

        Ok(Self {
            theme: raw.theme,
            secret_word: raw.secret_word,
            revealed: raw.revealed,
            attempts_left: raw.attempts_left,
            max_attempts: raw.max_attempts,
            used_letters: raw.used_letters,
            outcome: raw.outcome,
            events: Vec::new(),
        })
    }
}

impl GameState {
    /// Start a game with a word drawn uniformly from `theme`
    pub fn new<R: Rng + ?Sized>(
        bank: &WordBank,
        theme: &str,
        max_attempts: u32,
        rng: &mut R,
    ) -> Result<Self, GameError> {
        let mut state = Self::default();
        state.start(bank, theme, max_attempts, rng)?;
        Ok(state)
    }

    /// Start a game with a known secret word
    pub fn from_word(theme: &str, word: &str, max_attempts: u32) -> Result<Self, GameError> {
        if word.is_empty() || !word.chars().all(is_alphabet_letter) {
            return Err(GameError::InvalidWord(word.to_string()));
        }
        if max_attempts == 0 {
            return Err(GameError::NoAttempts);
        }

        let secret_word: Vec<char> = word.chars().collect();
        let mut state = Self {
            theme: theme.to_string(),
            revealed: vec![false; secret_word.len()],
            secret_word,
            attempts_left: max_attempts,
            max_attempts,
            used_letters: BTreeSet::new(),
            outcome: None,
            events: Vec::new(),
        };
        state.events.push(GameEvent::Started {
            theme: state.theme.clone(),
            length: state.secret_word.len(),
        });
        log::info!(
            "New game: theme '{}', {} letters, {} attempts",
            state.theme,
            state.secret_word.len(),
            max_attempts
        );
        Ok(state)
    }

    /// Pick a new secret word from `theme` and reset everything else.
    /// On error the current state is left untouched.
    pub fn start<R: Rng + ?Sized>(
        &mut self,
        bank: &WordBank,
        theme: &str,
        max_attempts: u32,
        rng: &mut R,
    ) -> Result<(), GameError> {
        let words = bank
            .words(theme)
            .ok_or_else(|| GameError::UnknownTheme(theme.to_string()))?;
        if words.is_empty() {
            return Err(GameError::EmptyTheme(theme.to_string()));
        }

        let word = &words[rng.random_range(0..words.len())];
        *self = Self::from_word(theme, word, max_attempts)?;
        Ok(())
    }

    /// Guess a letter. Lower-case input is accepted.
    pub fn guess_letter(&mut self, letter: char) -> Guess {
        if !self.is_active() {
            return Guess::Ignored;
        }
        let Some(letter) = normalize_letter(letter).filter(|c| is_alphabet_letter(*c)) else {
            return Guess::Ignored;
        };
        if !self.used_letters.insert(letter) {
            return Guess::Ignored;
        }

        let count = self.reveal(letter);
        let guess = if count > 0 {
            log::debug!("Guess {letter}: hit x{count}");
            self.events.push(GameEvent::LetterHit { letter, count });
            Guess::Hit { revealed: count }
        } else {
            self.attempts_left = self.attempts_left.saturating_sub(1);
            log::debug!("Guess {letter}: miss, {} left", self.attempts_left);
            self.events.push(GameEvent::LetterMiss {
                letter,
                attempts_left: self.attempts_left,
            });
            Guess::Miss
        };

        self.check_outcome();
        guess
    }

    /// Reveal every occurrence of a random hidden letter for free.
    /// Returns the revealed letter.
    pub fn use_hint<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<char> {
        if !self.is_active() {
            return None;
        }
        let hidden: Vec<usize> = self
            .revealed
            .iter()
            .enumerate()
            .filter(|(_, shown)| !**shown)
            .map(|(i, _)| i)
            .collect();
        if hidden.is_empty() {
            return None;
        }

        let letter = self.secret_word[hidden[rng.random_range(0..hidden.len())]];
        let count = self.reveal(letter);
        self.used_letters.insert(letter);
        log::debug!("Hint: {letter} x{count}");
        self.events.push(GameEvent::HintUsed { letter, count });

        self.check_outcome();
        Some(letter)
    }

    /// End the game as a loss with the indicator at its final stage.
    /// Returns false if there was no game in progress.
    pub fn give_up(&mut self) -> bool {
        if !self.is_active() {
            return false;
        }
        self.attempts_left = 0;
        self.finish(Outcome::Lost { gave_up: true });
        true
    }

    /// Mark every occurrence of `letter` as shown, returning how many
    fn reveal(&mut self, letter: char) -> usize {
        let mut count = 0;
        for (shown, c) in self.revealed.iter_mut().zip(&self.secret_word) {
            if *c == letter {
                *shown = true;
                count += 1;
            }
        }
        count
    }

    fn check_outcome(&mut self) {
        if self.revealed.iter().all(|shown| *shown) {
            self.finish(Outcome::Won);
        } else if self.attempts_left == 0 {
            self.finish(Outcome::Lost { gave_up: false });
        }
    }

    fn finish(&mut self, outcome: Outcome) {
        self.outcome = Some(outcome);
        self.events.push(match outcome {
            Outcome::Won => GameEvent::Won,
            Outcome::Lost { gave_up } => GameEvent::Lost { gave_up },
        });
        let word: String = self.secret_word.iter().collect();
        match outcome {
            Outcome::Won => log::info!("Won with {} attempts left: {}", self.attempts_left, word),
            Outcome::Lost { gave_up } => log::info!("Lost (gave up: {gave_up}): {word}"),
        }
    }

    /// A game has started and is not over yet
    fn is_active(&self) -> bool {
        self.is_started() && !self.is_over()
    }

    pub fn is_started(&self) -> bool {
        !self.secret_word.is_empty()
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn theme(&self) -> &str {
        &self.theme
    }

    pub fn secret_word(&self) -> &[char] {
        &self.secret_word
    }

    pub fn revealed(&self) -> &[bool] {
        &self.revealed
    }

    pub fn attempts_left(&self) -> u32 {
        self.attempts_left
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn used_letters(&self) -> &BTreeSet<char> {
        &self.used_letters
    }

    pub fn is_used(&self, letter: char) -> bool {
        self.used_letters.contains(&letter)
    }

    /// Number of positions still hidden
    pub fn hidden_count(&self) -> usize {
        self.revealed.iter().filter(|shown| !**shown).count()
    }

    /// Progress indicator stage: misses so far, or `max_attempts` after
    /// giving up. Cosmetic only.
    pub fn progress(&self) -> u32 {
        self.max_attempts.saturating_sub(self.attempts_left)
    }

    /// The word with hidden letters replaced by `placeholder`
    pub fn masked_word(&self, placeholder: char) -> String {
        self.secret_word
            .iter()
            .zip(&self.revealed)
            .map(|(c, shown)| if *shown { *c } else { placeholder })
            .collect()
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
