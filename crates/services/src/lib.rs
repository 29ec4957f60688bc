#![forbid(unsafe_code)]

pub mod error;
pub mod lesson_service;
pub mod locale_service;
pub mod playbook_services;
pub mod progress_service;

pub use error::{LessonServiceError, PlaybookServicesError};
pub use lesson_service::{LessonPage, LessonService, SectionOverview};
pub use locale_service::LocaleService;
pub use playbook_services::PlaybookServices;
pub use progress_service::{ProgressService, ProgressSummary};
