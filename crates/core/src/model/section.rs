use serde::{Deserialize, Serialize};

use crate::model::ids::SectionId;
use crate::model::lesson::Lesson;

/// A top-level curriculum unit holding an ordered list of lessons.
///
/// Lesson order is the curriculum order, not just display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    id: SectionId,
    number: String,
    title: String,
    color: String,
    #[serde(default)]
    lessons: Vec<Lesson>,
}

impl Section {
    #[must_use]
    pub fn new(
        id: SectionId,
        number: impl Into<String>,
        title: impl Into<String>,
        color: impl Into<String>,
        lessons: Vec<Lesson>,
    ) -> Self {
        Self {
            id,
            number: number.into(),
            title: title.into(),
            color: color.into(),
            lessons,
        }
    }

    // Accessors
    #[must_use]
    pub fn id(&self) -> &SectionId {
        &self.id
    }

    #[must_use]
    pub fn number(&self) -> &str {
        &self.number
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Design-token name used by the presentation layer.
    #[must_use]
    pub fn color(&self) -> &str {
        &self.color
    }

    #[must_use]
    pub fn lessons(&self) -> &[Lesson] {
        &self.lessons
    }
}
