//! Input commands and dispatch
//!
//! Every user interaction maps to exactly one `Command`, applied as one
//! state transition.

use rand::Rng;

use super::state::{GameError, GameState};
use crate::settings::Settings;
use crate::words::WordBank;

/// A discrete player action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Start a new game from a theme
    Start { theme: String },
    /// Guess a letter (on-screen or physical key)
    Guess(char),
    /// Reveal a random hidden letter
    Hint,
    /// Give up the current game
    GiveUp,
}

impl Command {
    /// Parse a line of terminal input: `?` hint, `!` give up, otherwise a
    /// single letter
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        match input {
            "?" => Some(Command::Hint),
            "!" => Some(Command::GiveUp),
            _ => {
                let mut chars = input.chars();
                let letter = chars.next()?;
                chars.next().is_none().then_some(Command::Guess(letter))
            }
        }
    }
}

/// Apply one command to the game state
pub fn apply<R: Rng + ?Sized>(
    state: &mut GameState,
    bank: &WordBank,
    settings: &Settings,
    command: &Command,
    rng: &mut R,
) -> Result<(), GameError> {
    match command {
        Command::Start { theme } => state.start(bank, theme, settings.max_attempts, rng)?,
        Command::Guess(letter) => {
            state.guess_letter(*letter);
        }
        Command::Hint => {
            state.use_hint(rng);
        }
        Command::GiveUp => {
            state.give_up();
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Variant;
    use crate::sim::Outcome;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_parse() {
        assert_eq!(Command::parse("?"), Some(Command::Hint));
        assert_eq!(Command::parse(" !\n"), Some(Command::GiveUp));
        assert_eq!(Command::parse("ж"), Some(Command::Guess('ж')));
        assert_eq!(Command::parse("жж"), None);
        assert_eq!(Command::parse(""), None);
    }

    #[test]
    fn test_apply_sequence() {
        let bank = WordBank::default();
        let settings = Settings::from_variant(Variant::Compact);
        let mut rng = Pcg32::seed_from_u64(12345);
        let mut state = GameState::default();

        let start = Command::Start {
            theme: "cities".into(),
        };
        apply(&mut state, &bank, &settings, &start, &mut rng).unwrap();
        assert_eq!(state.max_attempts(), 6);
        assert!(state.is_started());

        apply(&mut state, &bank, &settings, &Command::Hint, &mut rng).unwrap();
        assert_eq!(state.used_letters().len(), 1);
        assert_eq!(state.attempts_left(), 6);

        apply(&mut state, &bank, &settings, &Command::GiveUp, &mut rng).unwrap();
        assert_eq!(state.outcome(), Some(Outcome::Lost { gave_up: true }));
    }

    #[test]
    fn test_apply_unknown_theme() {
        let bank = WordBank::default();
        let settings = Settings::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut state = GameState::default();
        let start = Command::Start {
            theme: "planets".into(),
        };
        assert_eq!(
            apply(&mut state, &bank, &settings, &start, &mut rng),
            Err(GameError::UnknownTheme("planets".into()))
        );
        assert!(!state.is_started());
    }

    #[test]
    fn test_determinism() {
        // Same seed and commands give identical games
        let bank = WordBank::default();
        let settings = Settings::default();
        let commands = [
            Command::Start {
                theme: "tech".into(),
            },
            Command::Guess('Е'),
            Command::Hint,
            Command::Guess('Щ'),
            Command::Hint,
        ];

        let play = |seed: u64| {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut state = GameState::default();
            for command in &commands {
                apply(&mut state, &bank, &settings, command, &mut rng).unwrap();
            }
            state
        };
        assert_eq!(play(99999), play(99999));
    }
}
