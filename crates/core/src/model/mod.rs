mod ids;
mod lesson;
mod section;

pub use ids::{IdError, KEY_SEPARATOR, LessonKey, LessonSlug, SectionId};
pub use lesson::Lesson;
pub use section::Section;
