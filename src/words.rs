//! Themed word bank
//!
//! Immutable once built. The default bank carries the three built-in
//! themes; a custom bank can be loaded from JSON of the form
//! `{"theme": ["WORD", ...]}`.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::is_alphabet_letter;

/// Errors that can occur when building a word bank.
#[derive(Debug, Error)]
pub enum WordBankError {
    /// JSON parsing failed.
    #[error("Failed to parse word bank: {0}")]
    Parse(#[from] serde_json::Error),

    /// A theme has no words to draw from.
    #[error("Theme '{0}' has no words")]
    EmptyTheme(String),

    /// A word is the empty string.
    #[error("Theme '{theme}' contains an empty word")]
    EmptyWord { theme: String },

    /// A word uses a letter outside the game alphabet.
    #[error("Word '{word}' in theme '{theme}' contains '{letter}', which is not in the alphabet")]
    InvalidLetter {
        theme: String,
        word: String,
        letter: char,
    },
}

const ANIMALS: &[&str] = &[
    "ЛЕВ", "ТИГР", "КОРОВА", "ПИНГВИН", "ЖИРАФ", "СОБАКА", "КОШКА", "МЕДВЕДЬ",
];
const CITIES: &[&str] = &["МИНСК", "МОСКВА", "ПАРИЖ", "ЛОНДОН", "БЕРЛИН", "РИГА", "КИЕВ"];
const TECH: &[&str] = &[
    "АЛГОРИТМ",
    "БРАУЗЕР",
    "СЕРВЕР",
    "ИНТЕРНЕТ",
    "ФРЕЙМВОРК",
    "ДАННЫЕ",
];

/// Mapping from theme name to candidate words
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordBank {
    themes: BTreeMap<String, Vec<String>>,
}

impl Default for WordBank {
    fn default() -> Self {
        let themes = [("animals", ANIMALS), ("cities", CITIES), ("tech", TECH)]
            .into_iter()
            .map(|(name, words)| {
                (
                    name.to_string(),
                    words.iter().map(|w| w.to_string()).collect(),
                )
            })
            .collect();
        Self { themes }
    }
}

impl WordBank {
    /// Build a bank from theme lists, validating every word
    pub fn new(themes: BTreeMap<String, Vec<String>>) -> Result<Self, WordBankError> {
        let bank = Self { themes };
        bank.validate()?;
        Ok(bank)
    }

    /// Parse and validate a JSON word bank
    pub fn from_json(json: &str) -> Result<Self, WordBankError> {
        let themes: BTreeMap<String, Vec<String>> = serde_json::from_str(json)?;
        let bank = Self::new(themes)?;
        log::info!("Loaded word bank with {} themes", bank.themes.len());
        Ok(bank)
    }

    fn validate(&self) -> Result<(), WordBankError> {
        for (theme, words) in &self.themes {
            if words.is_empty() {
                return Err(WordBankError::EmptyTheme(theme.clone()));
            }
            for word in words {
                if word.is_empty() {
                    return Err(WordBankError::EmptyWord {
                        theme: theme.clone(),
                    });
                }
                if let Some(letter) = word.chars().find(|c| !is_alphabet_letter(*c)) {
                    return Err(WordBankError::InvalidLetter {
                        theme: theme.clone(),
                        word: word.clone(),
                        letter,
                    });
                }
            }
        }
        Ok(())
    }

    /// Words for a theme, if it exists
    pub fn words(&self, theme: &str) -> Option<&[String]> {
        self.themes.get(theme).map(Vec::as_slice)
    }

    /// Theme names in sorted order
    pub fn themes(&self) -> impl Iterator<Item = &str> {
        self.themes.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bank_is_valid() {
        let bank = WordBank::default();
        assert!(bank.validate().is_ok());
        assert_eq!(bank.themes().collect::<Vec<_>>(), ["animals", "cities", "tech"]);
        assert_eq!(bank.words("cities").map(|w| w.len()), Some(7));
        assert!(bank.words("planets").is_none());
    }

    #[test]
    fn test_from_json() {
        let bank = WordBank::from_json(r#"{"fruit": ["ЯБЛОКО", "ГРУША"]}"#).unwrap();
        assert_eq!(bank.themes().collect::<Vec<_>>(), ["fruit"]);
        assert_eq!(bank.words("fruit").unwrap()[1], "ГРУША");
    }

    #[test]
    fn test_rejects_latin_letters() {
        let err = WordBank::from_json(r#"{"mixed": ["КОТ", "DOG"]}"#).unwrap_err();
        assert!(matches!(
            err,
            WordBankError::InvalidLetter { letter: 'D', .. }
        ));
    }

    #[test]
    fn test_rejects_empty_theme_and_word() {
        assert!(matches!(
            WordBank::from_json(r#"{"none": []}"#),
            Err(WordBankError::EmptyTheme(_))
        ));
        assert!(matches!(
            WordBank::from_json(r#"{"blank": [""]}"#),
            Err(WordBankError::EmptyWord { .. })
        ));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            WordBank::from_json("[1, 2]"),
            Err(WordBankError::Parse(_))
        ));
    }
}
