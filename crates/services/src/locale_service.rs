use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use playbook_core::i18n::{Locale, LocaleError, Localizer};
use storage::repository::{KeyValueStore, LOCALE_KEY};

/// Owns the active locale and resolves strings against it.
pub struct LocaleService {
    store: Arc<dyn KeyValueStore>,
    localizer: Arc<Localizer>,
    active: RwLock<Locale>,
    // Serializes update + save so the stored value tracks the last switch.
    write_lock: tokio::sync::Mutex<()>,
}

impl LocaleService {
    /// Restore the preferred locale from `store`, or use `default`.
    pub async fn load(
        store: Arc<dyn KeyValueStore>,
        localizer: Arc<Localizer>,
        default: Locale,
    ) -> Self {
        let active = match store.load(LOCALE_KEY).await {
            Ok(Some(bytes)) => match std::str::from_utf8(&bytes).map(str::parse::<Locale>) {
                Ok(Ok(locale)) => locale,
                _ => {
                    tracing::warn!("stored locale preference is invalid, using {default}");
                    default
                }
            },
            Ok(None) => default,
            Err(err) => {
                tracing::warn!(%err, "failed to load locale preference, using {default}");
                default
            }
        };

        Self {
            store,
            localizer,
            active: RwLock::new(active),
            write_lock: tokio::sync::Mutex::new(()),
        }
    }

    #[must_use]
    pub fn active(&self) -> Locale {
        *self.active.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Switch the active locale and persist the preference best-effort.
    ///
    /// The choice is written even when it equals the current locale.
    pub async fn set_active(&self, locale: Locale) {
        let _write = self.write_lock.lock().await;
        *self.active.write().unwrap_or_else(PoisonError::into_inner) = locale;

        if let Err(err) = self.store.save(LOCALE_KEY, locale.code().as_bytes()).await {
            tracing::warn!(%locale, %err, "failed to persist locale preference");
        } else {
            tracing::info!(%locale, "active locale changed");
        }
    }

    /// Validate a language tag (`es`, `es-MX`, ...) and switch to it.
    ///
    /// # Errors
    ///
    /// Returns `LocaleError::Unsupported` if the tag maps to no supported
    /// locale; the active locale is left unchanged.
    pub async fn set_active_tag(&self, tag: &str) -> Result<Locale, LocaleError> {
        let locale =
            Locale::from_lang_tag(tag).ok_or_else(|| LocaleError::Unsupported(tag.to_owned()))?;
        self.set_active(locale).await;
        Ok(locale)
    }

    /// Translate `path` in the active locale.
    #[must_use]
    pub fn t(&self, path: &str, params: &[&dyn fmt::Display]) -> String {
        self.localizer.t(self.active(), path, params)
    }

    /// Translate a list-valued `path` in the active locale.
    #[must_use]
    pub fn t_list(&self, path: &str) -> Vec<String> {
        self.localizer.t_list(self.active(), path)
    }

    #[must_use]
    pub fn localizer(&self) -> Arc<Localizer> {
        Arc::clone(&self.localizer)
    }
}
