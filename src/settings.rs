//! Game settings
//!
//! A variant bundles an attempt budget with a progress renderer. Settings
//! can also be read from JSON for pages that want their own mix.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{MAX_ATTEMPTS_CLASSIC, MAX_ATTEMPTS_COMPACT};
use crate::progress::{ImageSequence, ProgressStyle};

/// Errors from reading settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("max_attempts must be at least 1")]
    NoAttempts,
}

/// Preset game variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// Ten attempts, figure drawn part by part
    #[default]
    Classic,
    /// Six attempts, stepped image sequence
    Compact,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Classic => "Classic",
            Variant::Compact => "Compact",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" | "a" | "10" => Some(Variant::Classic),
            "compact" | "b" | "6" => Some(Variant::Compact),
            _ => None,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        match self {
            Variant::Classic => MAX_ATTEMPTS_CLASSIC,
            Variant::Compact => MAX_ATTEMPTS_COMPACT,
        }
    }

    pub fn progress_style(&self) -> ProgressStyle {
        match self {
            Variant::Classic => ProgressStyle::Figure,
            Variant::Compact => ProgressStyle::Images(ImageSequence::default()),
        }
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Preset the other fields were derived from
    pub variant: Variant,
    /// Incorrect guesses allowed per game
    pub max_attempts: u32,
    /// How progress is drawn
    pub progress: ProgressStyle,
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_variant(Variant::Classic)
    }
}

impl Settings {
    /// Create settings from a variant preset
    pub fn from_variant(variant: Variant) -> Self {
        Self {
            variant,
            max_attempts: variant.max_attempts(),
            progress: variant.progress_style(),
        }
    }

    /// Parse settings from JSON. Missing fields fall back to the variant's
    /// defaults.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        #[derive(Deserialize)]
        struct Partial {
            #[serde(default)]
            variant: Variant,
            max_attempts: Option<u32>,
            progress: Option<ProgressStyle>,
        }

        let partial: Partial = serde_json::from_str(json)?;
        let mut settings = Self::from_variant(partial.variant);
        if let Some(max_attempts) = partial.max_attempts {
            settings.max_attempts = max_attempts;
        }
        if let Some(progress) = partial.progress {
            settings.progress = progress;
        }

        if settings.max_attempts == 0 {
            log::warn!("Rejected settings with zero attempts");
            return Err(SettingsError::NoAttempts);
        }
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_from_str() {
        assert_eq!(Variant::from_str("Classic"), Some(Variant::Classic));
        assert_eq!(Variant::from_str("B"), Some(Variant::Compact));
        assert_eq!(Variant::from_str("6"), Some(Variant::Compact));
        assert_eq!(Variant::from_str("huge"), None);
    }

    #[test]
    fn test_presets() {
        let classic = Settings::default();
        assert_eq!(classic.max_attempts, 10);
        assert_eq!(classic.progress, ProgressStyle::Figure);

        let compact = Settings::from_variant(Variant::Compact);
        assert_eq!(compact.max_attempts, 6);
        assert!(matches!(compact.progress, ProgressStyle::Images(_)));
    }

    #[test]
    fn test_from_json_overrides() {
        let settings = Settings::from_json(r#"{"variant":"compact","max_attempts":8}"#).unwrap();
        assert_eq!(settings.variant, Variant::Compact);
        assert_eq!(settings.max_attempts, 8);
        assert!(matches!(settings.progress, ProgressStyle::Images(_)));

        let settings = Settings::from_json("{}").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_from_json_rejects_zero_attempts() {
        assert!(matches!(
            Settings::from_json(r#"{"max_attempts":0}"#),
            Err(SettingsError::NoAttempts)
        ));
        assert!(matches!(
            Settings::from_json("not json"),
            Err(SettingsError::Parse(_))
        ));
    }
}
