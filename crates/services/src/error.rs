//! Shared error types for the services crate.

use thiserror::Error;

use playbook_core::CurriculumError;
use playbook_core::i18n::I18nError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `LessonService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LessonServiceError {
    #[error("unknown lesson: {section_id}/{slug}")]
    UnknownLesson { section_id: String, slug: String },
}

/// Errors emitted while bootstrapping playbook services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PlaybookServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Curriculum(#[from] CurriculumError),
    #[error(transparent)]
    I18n(#[from] I18nError),
}
