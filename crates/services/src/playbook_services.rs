use std::sync::Arc;

use playbook_core::Curriculum;
use playbook_core::i18n::{Locale, Localizer};
use storage::repository::Storage;

use crate::error::PlaybookServicesError;
use crate::lesson_service::LessonService;
use crate::locale_service::LocaleService;
use crate::progress_service::ProgressService;

/// Assembles the playbook services around one storage backend.
///
/// Built once at startup and handed by reference to whatever owns the UI.
#[derive(Clone)]
pub struct PlaybookServices {
    curriculum: Arc<Curriculum>,
    progress: Arc<ProgressService>,
    locale: Arc<LocaleService>,
    lessons: Arc<LessonService>,
}

impl PlaybookServices {
    /// Build services backed by `SQLite` storage and the bundled content.
    ///
    /// # Errors
    ///
    /// Returns `PlaybookServicesError` if storage initialization fails or the
    /// bundled content is invalid.
    pub async fn new_sqlite(
        db_url: &str,
        default_locale: Locale,
    ) -> Result<Self, PlaybookServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Self::bundled(storage, default_locale).await
    }

    /// Build services over `storage` with the bundled curriculum and dictionaries.
    ///
    /// # Errors
    ///
    /// Returns `PlaybookServicesError` if the bundled content is invalid.
    pub async fn bundled(
        storage: Storage,
        default_locale: Locale,
    ) -> Result<Self, PlaybookServicesError> {
        let curriculum = Curriculum::bundled()?;
        let localizer = Localizer::bundled()?;
        Ok(Self::from_parts(storage, curriculum, localizer, default_locale).await)
    }

    /// Build services from explicit content.
    pub async fn from_parts(
        storage: Storage,
        curriculum: Curriculum,
        localizer: Localizer,
        default_locale: Locale,
    ) -> Self {
        let curriculum = Arc::new(curriculum);
        let progress = Arc::new(ProgressService::load(Arc::clone(&storage.kv)).await);
        let locale = Arc::new(
            LocaleService::load(Arc::clone(&storage.kv), Arc::new(localizer), default_locale)
                .await,
        );
        let lessons = Arc::new(LessonService::new(
            Arc::clone(&curriculum),
            Arc::clone(&progress),
            Arc::clone(&locale),
        ));

        Self {
            curriculum,
            progress,
            locale,
            lessons,
        }
    }

    #[must_use]
    pub fn curriculum(&self) -> Arc<Curriculum> {
        Arc::clone(&self.curriculum)
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }

    #[must_use]
    pub fn locale(&self) -> Arc<LocaleService> {
        Arc::clone(&self.locale)
    }

    #[must_use]
    pub fn lessons(&self) -> Arc<LessonService> {
        Arc::clone(&self.lessons)
    }
}
