//! Read-only curriculum graph: sections, lessons and sequential traversal.
//!
//! Every lesson sits in a single flattened sequence (section order, then
//! lesson order within the section). Next/previous navigation walks that
//! sequence, so it crosses section boundaries transparently. Unknown
//! identifiers are an expected outcome and come back as `None`.

use std::collections::{HashMap, HashSet};

use serde::Deserialize;
use thiserror::Error;

use crate::model::{Lesson, LessonKey, LessonSlug, Section, SectionId};

const BUNDLED_CURRICULUM: &str = include_str!("../content/curriculum.json");

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CurriculumError {
    #[error("duplicate section id: {0}")]
    DuplicateSection(SectionId),

    #[error("duplicate lesson slug {slug} in section {section}")]
    DuplicateLesson {
        section: SectionId,
        slug: LessonSlug,
    },

    #[error("invalid curriculum definition: {0}")]
    Parse(#[from] serde_json::Error),
}

//
// ─── LESSON REF ────────────────────────────────────────────────────────────────
//

/// A lesson together with the section that owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LessonRef<'a> {
    pub section: &'a Section,
    pub lesson: &'a Lesson,
}

impl LessonRef<'_> {
    /// Canonical key of the referenced lesson.
    #[must_use]
    pub fn key(&self) -> LessonKey {
        LessonKey::new(self.section.id().clone(), self.lesson.slug().clone())
    }
}

//
// ─── CURRICULUM ────────────────────────────────────────────────────────────────
//

#[derive(Deserialize)]
struct CurriculumDocument {
    sections: Vec<Section>,
}

/// Immutable section/lesson hierarchy with a precomputed flattened order.
#[derive(Debug, Clone)]
pub struct Curriculum {
    sections: Vec<Section>,
    section_index: HashMap<SectionId, usize>,
    // Flattened position of each section's first lesson.
    offsets: Vec<usize>,
    // (section index, lesson index) for every flattened position.
    flat: Vec<(usize, usize)>,
}

impl Curriculum {
    /// Builds a curriculum from sections in declaration order.
    ///
    /// # Errors
    ///
    /// Returns `CurriculumError` if a section id repeats or a slug repeats
    /// inside one section.
    pub fn new(sections: Vec<Section>) -> Result<Self, CurriculumError> {
        let mut section_index = HashMap::with_capacity(sections.len());
        let mut offsets = Vec::with_capacity(sections.len());
        let mut flat = Vec::new();

        for (s_idx, section) in sections.iter().enumerate() {
            if section_index.insert(section.id().clone(), s_idx).is_some() {
                return Err(CurriculumError::DuplicateSection(section.id().clone()));
            }

            let mut seen = HashSet::with_capacity(section.lessons().len());
            offsets.push(flat.len());
            for (l_idx, lesson) in section.lessons().iter().enumerate() {
                if !seen.insert(lesson.slug()) {
                    return Err(CurriculumError::DuplicateLesson {
                        section: section.id().clone(),
                        slug: lesson.slug().clone(),
                    });
                }
                flat.push((s_idx, l_idx));
            }
        }

        Ok(Self {
            sections,
            section_index,
            offsets,
            flat,
        })
    }

    /// Parses a `{ "sections": [...] }` JSON document.
    ///
    /// # Errors
    ///
    /// Returns `CurriculumError` if the JSON is malformed or fails validation.
    pub fn from_json(raw: &str) -> Result<Self, CurriculumError> {
        let document: CurriculumDocument = serde_json::from_str(raw)?;
        Self::new(document.sections)
    }

    /// The curriculum shipped with the crate.
    ///
    /// # Errors
    ///
    /// Returns `CurriculumError` if the bundled definition is invalid.
    pub fn bundled() -> Result<Self, CurriculumError> {
        Self::from_json(BUNDLED_CURRICULUM)
    }

    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    #[must_use]
    pub fn section(&self, section_id: &str) -> Option<&Section> {
        self.section_index
            .get(section_id)
            .map(|idx| &self.sections[*idx])
    }

    /// Total number of lessons across all sections.
    #[must_use]
    pub fn lesson_count(&self) -> usize {
        self.flat.len()
    }

    /// All lessons in flattened curriculum order.
    pub fn lessons(&self) -> impl Iterator<Item = LessonRef<'_>> + '_ {
        (0..self.flat.len()).map(|pos| self.at(pos))
    }

    #[must_use]
    pub fn first_lesson(&self) -> Option<LessonKey> {
        (!self.flat.is_empty()).then(|| self.at(0).key())
    }

    /// Finds the lesson addressed by `(section_id, slug)`.
    #[must_use]
    pub fn lesson_by_slug(&self, section_id: &str, slug: &str) -> Option<LessonRef<'_>> {
        self.position(section_id, slug).map(|pos| self.at(pos))
    }

    /// Zero-based index of the lesson in the flattened sequence.
    #[must_use]
    pub fn position(&self, section_id: &str, slug: &str) -> Option<usize> {
        let s_idx = *self.section_index.get(section_id)?;
        let l_idx = self.sections[s_idx]
            .lessons()
            .iter()
            .position(|lesson| lesson.slug().as_str() == slug)?;
        Some(self.offsets[s_idx] + l_idx)
    }

    /// The lesson after `(section_id, slug)`, possibly in the next section.
    ///
    /// Returns `None` at the very last lesson or for an unknown lesson.
    #[must_use]
    pub fn next_lesson(&self, section_id: &str, slug: &str) -> Option<LessonKey> {
        let pos = self.position(section_id, slug)?;
        (pos + 1 < self.flat.len()).then(|| self.at(pos + 1).key())
    }

    /// The lesson before `(section_id, slug)`, possibly in the previous section.
    ///
    /// Returns `None` at the very first lesson or for an unknown lesson.
    #[must_use]
    pub fn prev_lesson(&self, section_id: &str, slug: &str) -> Option<LessonKey> {
        let pos = self.position(section_id, slug)?;
        pos.checked_sub(1).map(|prev| self.at(prev).key())
    }

    /// Whether `key` addresses a lesson of this curriculum.
    #[must_use]
    pub fn contains(&self, key: &LessonKey) -> bool {
        self.position(key.section_id().as_str(), key.slug().as_str())
            .is_some()
    }

    fn at(&self, pos: usize) -> LessonRef<'_> {
        let (s_idx, l_idx) = self.flat[pos];
        let section = &self.sections[s_idx];
        LessonRef {
            section,
            lesson: &section.lessons()[l_idx],
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn lesson(id: &str, slug: &str) -> Lesson {
        Lesson::new(id, LessonSlug::new(slug).unwrap(), slug.to_uppercase(), "")
    }

    fn section(id: &str, number: &str, lessons: Vec<Lesson>) -> Section {
        Section::new(SectionId::new(id).unwrap(), number, id, "blue", lessons)
    }

    fn two_sections() -> Curriculum {
        Curriculum::new(vec![
            section("S1", "1", vec![lesson("1.1", "a"), lesson("1.2", "b")]),
            section("S2", "2", vec![lesson("2.1", "c")]),
        ])
        .unwrap()
    }

    fn key(section: &str, slug: &str) -> LessonKey {
        LessonKey::from_parts(section, slug).unwrap()
    }

    #[test]
    fn next_crosses_section_boundary() {
        let curriculum = two_sections();
        assert_eq!(curriculum.next_lesson("S1", "a"), Some(key("S1", "b")));
        assert_eq!(curriculum.next_lesson("S1", "b"), Some(key("S2", "c")));
        assert_eq!(curriculum.next_lesson("S2", "c"), None);
    }

    #[test]
    fn prev_crosses_section_boundary() {
        let curriculum = two_sections();
        assert_eq!(curriculum.prev_lesson("S2", "c"), Some(key("S1", "b")));
        assert_eq!(curriculum.prev_lesson("S1", "a"), None);
    }

    #[test]
    fn unknown_identifiers_are_none() {
        let curriculum = two_sections();
        assert!(curriculum.lesson_by_slug("S9", "a").is_none());
        assert!(curriculum.lesson_by_slug("S1", "zz").is_none());
        assert!(curriculum.lesson_by_slug("", "").is_none());
        assert_eq!(curriculum.next_lesson("S1", "zz"), None);
        assert_eq!(curriculum.prev_lesson("", "a"), None);
        // slug exists, but in another section
        assert_eq!(curriculum.next_lesson("S2", "a"), None);
    }

    #[test]
    fn lookup_returns_section_and_lesson() {
        let curriculum = two_sections();
        let found = curriculum.lesson_by_slug("S1", "b").unwrap();
        assert_eq!(found.section.id().as_str(), "S1");
        assert_eq!(found.lesson.id(), "1.2");
        assert_eq!(found.key(), key("S1", "b"));
    }

    #[test]
    fn empty_sections_are_skipped_by_traversal() {
        let curriculum = Curriculum::new(vec![
            section("S1", "1", vec![lesson("1.1", "a")]),
            section("empty", "2", vec![]),
            section("S3", "3", vec![lesson("3.1", "c")]),
        ])
        .unwrap();
        assert_eq!(curriculum.next_lesson("S1", "a"), Some(key("S3", "c")));
        assert_eq!(curriculum.prev_lesson("S3", "c"), Some(key("S1", "a")));
        assert_eq!(curriculum.lesson_count(), 2);
    }

    #[test]
    fn rejects_duplicate_section() {
        let err = Curriculum::new(vec![
            section("S1", "1", vec![]),
            section("S1", "2", vec![]),
        ])
        .unwrap_err();
        assert!(matches!(err, CurriculumError::DuplicateSection(_)));
    }

    #[test]
    fn rejects_duplicate_slug_within_section() {
        let err = Curriculum::new(vec![section(
            "S1",
            "1",
            vec![lesson("1.1", "a"), lesson("1.2", "a")],
        )])
        .unwrap_err();
        assert!(matches!(err, CurriculumError::DuplicateLesson { .. }));
    }

    #[test]
    fn same_slug_in_different_sections_is_allowed() {
        let curriculum = Curriculum::new(vec![
            section("S1", "1", vec![lesson("1.1", "intro")]),
            section("S2", "2", vec![lesson("2.1", "intro")]),
        ])
        .unwrap();
        assert_eq!(
            curriculum.next_lesson("S1", "intro"),
            Some(key("S2", "intro"))
        );
    }

    #[test]
    fn from_json_parses_sections() {
        let raw = r##"{
            "sections": [
                { "id": "S1", "number": "1", "title": "One", "color": "#fff",
                  "lessons": [ { "id": "1.1", "slug": "a", "title": "A", "description": "d" } ] }
            ]
        }"##;
        let curriculum = Curriculum::from_json(raw).unwrap();
        assert_eq!(curriculum.first_lesson(), Some(key("S1", "a")));
        assert_eq!(curriculum.section("S1").unwrap().color(), "#fff");
    }

    #[test]
    fn from_json_rejects_blank_slug() {
        let raw = r#"{ "sections": [ { "id": "S1", "number": "1", "title": "One", "color": "x",
            "lessons": [ { "id": "1.1", "slug": " ", "title": "A" } ] } ] }"#;
        assert!(matches!(
            Curriculum::from_json(raw),
            Err(CurriculumError::Parse(_))
        ));
    }

    #[test]
    fn bundled_curriculum_is_valid() {
        let curriculum = Curriculum::bundled().unwrap();
        assert!(curriculum.lesson_count() > 0);
        let first = curriculum.first_lesson().unwrap();
        assert!(curriculum.contains(&first));
    }
}
