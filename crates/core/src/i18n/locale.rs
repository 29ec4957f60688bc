use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LocaleError {
    #[error("unsupported locale: {0}")]
    Unsupported(String),
}

/// Supported locale codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// English.
    En,
    /// Spanish.
    Es,
}

/// Locale consulted when a key is absent in the requested one.
pub const DEFAULT_LOCALE: Locale = Locale::En;

impl Locale {
    /// All supported locales in display order.
    #[must_use]
    pub const fn all() -> [Self; 2] {
        [Self::En, Self::Es]
    }

    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Es => "es",
        }
    }

    /// Human-friendly label for pickers.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Es => "Español",
        }
    }

    /// Maps a language tag such as `es-MX` or `es_ES.UTF-8` to a supported locale.
    #[must_use]
    pub fn from_lang_tag(tag: &str) -> Option<Self> {
        let lowered = tag.trim().to_ascii_lowercase();
        let base = lowered
            .split(['-', '_', '.', '@'])
            .next()
            .unwrap_or_default();
        Self::all().into_iter().find(|locale| locale.code() == base)
    }
}

impl Default for Locale {
    fn default() -> Self {
        DEFAULT_LOCALE
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = LocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .into_iter()
            .find(|locale| locale.code() == s)
            .ok_or_else(|| LocaleError::Unsupported(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_exact_codes() {
        assert_eq!("en".parse::<Locale>().unwrap(), Locale::En);
        assert_eq!("es".parse::<Locale>().unwrap(), Locale::Es);
    }

    #[test]
    fn rejects_unknown_codes() {
        assert_eq!(
            "xx".parse::<Locale>().unwrap_err(),
            LocaleError::Unsupported("xx".into())
        );
        assert!("EN".parse::<Locale>().is_err());
    }

    #[test]
    fn maps_language_tags() {
        assert_eq!(Locale::from_lang_tag("es-MX"), Some(Locale::Es));
        assert_eq!(Locale::from_lang_tag("es_ES.UTF-8"), Some(Locale::Es));
        assert_eq!(Locale::from_lang_tag("EN"), Some(Locale::En));
        assert_eq!(Locale::from_lang_tag("fr-FR"), None);
        assert_eq!(Locale::from_lang_tag(""), None);
    }

    #[test]
    fn serde_uses_codes() {
        assert_eq!(serde_json::to_string(&Locale::Es).unwrap(), "\"es\"");
        let locale: Locale = serde_json::from_str("\"en\"").unwrap();
        assert_eq!(locale, Locale::En);
    }
}
