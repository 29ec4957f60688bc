//! Localized string resolution.

mod dictionary;
mod locale;
mod localizer;
mod path;

use thiserror::Error;

pub use dictionary::{Dictionary, Node, Resolution};
pub use locale::{DEFAULT_LOCALE, Locale, LocaleError};
pub use localizer::{Localizer, interpolate};
pub use path::{KeyPath, PathError, Segment};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum I18nError {
    #[error("invalid locale dictionary: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("no dictionary loaded for fallback locale {0}")]
    MissingFallback(Locale),

    #[error(transparent)]
    Locale(#[from] LocaleError),

    #[error(transparent)]
    Path(#[from] PathError),
}
