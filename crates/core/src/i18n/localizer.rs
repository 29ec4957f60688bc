//! Translation lookup with fallback and positional interpolation.
//!
//! # Failure modes
//!
//! | Failure | Behavior |
//! |---------|----------|
//! | Key missing in requested locale | Whole walk retried in the fallback locale |
//! | Key missing everywhere | Raw path returned as placeholder |
//! | Malformed path | Raw path returned as placeholder |
//! | `{n}` without a matching argument | Token left as-is |

use std::collections::HashMap;
use std::fmt;

use crate::i18n::dictionary::{Dictionary, Resolution};
use crate::i18n::locale::{DEFAULT_LOCALE, Locale};
use crate::i18n::path::KeyPath;
use crate::i18n::I18nError;

const BUNDLED_EN: &str = include_str!("../../content/locales/en.json");
const BUNDLED_ES: &str = include_str!("../../content/locales/es.json");

/// Resolves translation keys against per-locale dictionaries.
#[derive(Debug, Clone)]
pub struct Localizer {
    dictionaries: HashMap<Locale, Dictionary>,
    fallback: Locale,
}

impl Localizer {
    /// Builds a localizer.
    ///
    /// # Errors
    ///
    /// Returns `I18nError::MissingFallback` if no dictionary is provided for
    /// `fallback`.
    pub fn new(
        dictionaries: HashMap<Locale, Dictionary>,
        fallback: Locale,
    ) -> Result<Self, I18nError> {
        if !dictionaries.contains_key(&fallback) {
            return Err(I18nError::MissingFallback(fallback));
        }
        Ok(Self {
            dictionaries,
            fallback,
        })
    }

    /// Dictionaries shipped with the crate, falling back to English.
    ///
    /// # Errors
    ///
    /// Returns `I18nError` if a bundled dictionary fails to parse.
    pub fn bundled() -> Result<Self, I18nError> {
        let mut dictionaries = HashMap::new();
        dictionaries.insert(Locale::En, Dictionary::from_json(BUNDLED_EN)?);
        dictionaries.insert(Locale::Es, Dictionary::from_json(BUNDLED_ES)?);
        Self::new(dictionaries, DEFAULT_LOCALE)
    }

    #[must_use]
    pub fn has_locale(&self, locale: Locale) -> bool {
        self.dictionaries.contains_key(&locale)
    }

    /// Translates `path` for `locale`, substituting `{0}`, `{1}`, ... with `params`.
    ///
    /// Never fails: a missing translation comes back as the raw path.
    #[must_use]
    pub fn t(&self, locale: Locale, path: &str, params: &[&dyn fmt::Display]) -> String {
        match KeyPath::parse(path) {
            Ok(parsed) => self.t_path(locale, &parsed, params),
            Err(err) => {
                tracing::debug!(path, %err, "malformed translation key");
                path.to_owned()
            }
        }
    }

    /// Same as [`Localizer::t`] for an already parsed path.
    #[must_use]
    pub fn t_path(&self, locale: Locale, path: &KeyPath, params: &[&dyn fmt::Display]) -> String {
        match self.text(locale, path) {
            Some(text) if params.is_empty() => text,
            Some(text) => interpolate(&text, params),
            None => {
                tracing::debug!(%locale, path = %path, "missing translation");
                path.as_str().to_owned()
            }
        }
    }

    /// The string leaf at `path` with fallback, without placeholder degradation.
    #[must_use]
    pub fn text(&self, locale: Locale, path: &KeyPath) -> Option<String> {
        self.lookup(locale, path, Resolution::is_leaf).into_leaf()
    }

    /// Resolves `path` to a string list, or an empty list when missing.
    #[must_use]
    pub fn t_list(&self, locale: Locale, path: &str) -> Vec<String> {
        let Ok(parsed) = KeyPath::parse(path) else {
            tracing::debug!(path, "malformed translation key");
            return Vec::new();
        };
        self.lookup(locale, &parsed, |res| matches!(res, Resolution::Sequence(_)))
            .into_sequence()
            .unwrap_or_else(|| {
                tracing::debug!(%locale, path, "missing translation list");
                Vec::new()
            })
    }

    /// Resolves `path` in `locale`, then in the fallback locale.
    #[must_use]
    pub fn resolve(&self, locale: Locale, path: &KeyPath) -> Resolution {
        self.lookup(locale, path, |res| !res.is_missing())
    }

    /// Leaf paths present in the fallback dictionary but absent from `locale`.
    #[must_use]
    pub fn missing_keys(&self, locale: Locale) -> Vec<String> {
        let Some(reference) = self.dictionaries.get(&self.fallback) else {
            return Vec::new();
        };
        let target = self.dictionaries.get(&locale);
        reference
            .leaf_paths()
            .into_iter()
            .filter(|raw| {
                let Some(target) = target else {
                    return true;
                };
                KeyPath::parse(raw).map_or(true, |path| !target.resolve(&path).is_leaf())
            })
            .collect()
    }

    fn lookup(
        &self,
        locale: Locale,
        path: &KeyPath,
        accept: impl Fn(&Resolution) -> bool,
    ) -> Resolution {
        let chain = [Some(locale), (locale != self.fallback).then_some(self.fallback)];
        for candidate in chain.into_iter().flatten() {
            let Some(dictionary) = self.dictionaries.get(&candidate) else {
                continue;
            };
            let resolved = dictionary.resolve(path);
            if accept(&resolved) {
                return resolved;
            }
        }
        Resolution::Missing
    }
}

/// Replaces `{n}` tokens with `params[n]` in a single pass.
///
/// Tokens without a matching argument, and braces around anything but
/// digits, are copied through unchanged.
#[must_use]
pub fn interpolate(template: &str, params: &[&dyn fmt::Display]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let digits = after.bytes().take_while(u8::is_ascii_digit).count();
        let closed = digits > 0 && after.as_bytes().get(digits) == Some(&b'}');
        let param = closed
            .then(|| after[..digits].parse::<usize>().ok())
            .flatten()
            .and_then(|idx| params.get(idx));
        match param {
            Some(value) => {
                out.push_str(&value.to_string());
                rest = &after[digits + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn localizer() -> Localizer {
        let en = Dictionary::from_json(
            r#"{
                "a": { "items": ["x", "y", "z"] },
                "nav": { "next": "Next", "prev": "Previous" },
                "caption": { "others": "{0} other circles" },
                "when_to_use": ["Compare values", "Show ranking"]
            }"#,
        )
        .unwrap();
        let es = Dictionary::from_json(
            r#"{
                "nav": { "next": "Siguiente" },
                "caption": { "others": "{0} otros círculos" },
                "a": { "items": "not a list" }
            }"#,
        )
        .unwrap();
        let mut dictionaries = HashMap::new();
        dictionaries.insert(Locale::En, en);
        dictionaries.insert(Locale::Es, es);
        Localizer::new(dictionaries, Locale::En).unwrap()
    }

    #[test]
    fn returns_exact_locale_string() {
        assert_eq!(localizer().t(Locale::Es, "nav.next", &[]), "Siguiente");
        assert_eq!(localizer().t(Locale::En, "nav.next", &[]), "Next");
    }

    #[test]
    fn falls_back_to_default_locale() {
        assert_eq!(localizer().t(Locale::Es, "nav.prev", &[]), "Previous");
    }

    #[test]
    fn missing_everywhere_returns_path() {
        assert_eq!(localizer().t(Locale::Es, "nav.home", &[]), "nav.home");
        assert_eq!(localizer().t(Locale::En, "", &[]), "");
        assert_eq!(localizer().t(Locale::En, "a..b", &[]), "a..b");
    }

    #[test]
    fn interpolates_positional_param() {
        assert_eq!(
            localizer().t(Locale::En, "caption.others", &[&42]),
            "42 other circles"
        );
        assert_eq!(
            localizer().t(Locale::Es, "caption.others", &[&7]),
            "7 otros círculos"
        );
    }

    #[test]
    fn array_paths_resolve_and_degrade() {
        let l10n = localizer();
        assert_eq!(l10n.t(Locale::En, "a.items.1", &[]), "y");
        assert_eq!(l10n.t(Locale::En, "a.items.9", &[]), "a.items.9");
        // es has a string where en has a list; index walk falls back to en
        assert_eq!(l10n.t(Locale::Es, "a.items.0", &[]), "x");
    }

    #[test]
    fn container_path_is_not_a_translation() {
        assert_eq!(localizer().t(Locale::En, "nav", &[]), "nav");
        assert_eq!(localizer().t(Locale::En, "a.items", &[]), "a.items");
    }

    #[test]
    fn t_list_returns_sequence_with_fallback() {
        let l10n = localizer();
        assert_eq!(
            l10n.t_list(Locale::Es, "when_to_use"),
            vec!["Compare values".to_string(), "Show ranking".to_string()]
        );
        assert_eq!(l10n.t_list(Locale::Es, "a.items"), vec!["x", "y", "z"]);
        assert!(l10n.t_list(Locale::En, "nav.next").is_empty());
    }

    #[test]
    fn resolve_reports_shape() {
        let l10n = localizer();
        let path = KeyPath::parse("a.items").unwrap();
        assert_eq!(l10n.resolve(Locale::Es, &path), Resolution::Leaf("not a list".into()));
        assert!(matches!(l10n.resolve(Locale::En, &path), Resolution::Sequence(_)));
        let missing = KeyPath::parse("nope").unwrap();
        assert_eq!(l10n.resolve(Locale::Es, &missing), Resolution::Missing);
    }

    #[test]
    fn missing_keys_lists_untranslated_leaves() {
        let missing = localizer().missing_keys(Locale::Es);
        assert!(missing.contains(&"nav.prev".to_string()));
        assert!(missing.contains(&"when_to_use.1".to_string()));
        assert!(!missing.contains(&"nav.next".to_string()));
        assert!(localizer().missing_keys(Locale::En).is_empty());
    }

    #[test]
    fn new_requires_fallback_dictionary() {
        let err = Localizer::new(HashMap::new(), Locale::En).unwrap_err();
        assert!(matches!(err, I18nError::MissingFallback(Locale::En)));
    }

    #[test]
    fn interpolation_edge_cases() {
        assert_eq!(interpolate("{0} and {1}", &[&"a", &"b"]), "a and b");
        assert_eq!(interpolate("{1} before {0}", &[&"a", &"b"]), "b before a");
        assert_eq!(interpolate("{2} left", &[&"a"]), "{2} left");
        assert_eq!(interpolate("{name} {0}", &[&1]), "{name} 1");
        assert_eq!(interpolate("{0", &[&1]), "{0");
        assert_eq!(interpolate("{}", &[&1]), "{}");
        // no recursive substitution
        assert_eq!(interpolate("{0}", &[&"{0}"]), "{0}");
    }

    #[test]
    fn bundled_locales_load() {
        let l10n = Localizer::bundled().unwrap();
        for locale in Locale::all() {
            assert!(l10n.has_locale(locale));
            assert_ne!(l10n.t(locale, "nav.next", &[]), "nav.next");
        }
    }
}
