use serde::{Deserialize, Serialize};

use crate::model::ids::LessonSlug;

/// The smallest addressable curriculum unit.
///
/// `id` is the display ordinal (e.g. `"1.1"`); `slug` is the stable
/// identifier, unique within the owning section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    id: String,
    slug: LessonSlug,
    title: String,
    #[serde(default)]
    description: String,
}

impl Lesson {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        slug: LessonSlug,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            slug,
            title: title.into(),
            description: description.into(),
        }
    }

    // Accessors
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn slug(&self) -> &LessonSlug {
        &self.slug
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }
}
