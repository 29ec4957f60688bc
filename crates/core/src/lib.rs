#![forbid(unsafe_code)]

pub mod curriculum;
pub mod i18n;
pub mod model;

pub use curriculum::{Curriculum, CurriculumError, LessonRef};
pub use i18n::{KeyPath, Locale, Localizer, Resolution};
pub use model::{LessonKey, LessonSlug, SectionId};
