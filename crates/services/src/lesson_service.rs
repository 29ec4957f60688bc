use std::sync::Arc;

use playbook_core::i18n::KeyPath;
use playbook_core::model::{LessonKey, Section};
use playbook_core::{Curriculum, LessonRef};

use crate::error::LessonServiceError;
use crate::locale_service::LocaleService;
use crate::progress_service::{ProgressService, ProgressSummary};

/// Everything a lesson page needs, with display strings already localized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonPage {
    pub key: LessonKey,
    pub ordinal: String,
    pub title: String,
    pub description: String,
    pub section_number: String,
    pub section_title: String,
    pub color: String,
    pub completed: bool,
    pub prev: Option<LessonKey>,
    pub next: Option<LessonKey>,
    /// 1-based position in the flattened curriculum.
    pub position: usize,
    pub total: usize,
}

/// A section row for an index page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionOverview {
    pub id: String,
    pub number: String,
    pub title: String,
    pub color: String,
    pub progress: ProgressSummary,
    /// Localized "done/total in title" line.
    pub caption: String,
}

/// Composes curriculum, progress and strings the way a page view does.
#[derive(Clone)]
pub struct LessonService {
    curriculum: Arc<Curriculum>,
    progress: Arc<ProgressService>,
    locale: Arc<LocaleService>,
}

impl LessonService {
    #[must_use]
    pub fn new(
        curriculum: Arc<Curriculum>,
        progress: Arc<ProgressService>,
        locale: Arc<LocaleService>,
    ) -> Self {
        Self {
            curriculum,
            progress,
            locale,
        }
    }

    /// Build the page model for `(section_id, slug)`, or `None` if unknown.
    #[must_use]
    pub fn lesson_page(&self, section_id: &str, slug: &str) -> Option<LessonPage> {
        let found = self.curriculum.lesson_by_slug(section_id, slug)?;
        let position = self.curriculum.position(section_id, slug)?;
        let key = found.key();

        Some(LessonPage {
            ordinal: found.lesson.id().to_owned(),
            title: self.lesson_text(&found, "title", found.lesson.title()),
            description: self.lesson_text(&found, "description", found.lesson.description()),
            section_number: found.section.number().to_owned(),
            section_title: self.section_title(found.section),
            color: found.section.color().to_owned(),
            completed: self.progress.is_complete(&key),
            prev: self.curriculum.prev_lesson(section_id, slug),
            next: self.curriculum.next_lesson(section_id, slug),
            position: position + 1,
            total: self.curriculum.lesson_count(),
            key,
        })
    }

    /// Mark a lesson complete and return the lesson to continue with.
    ///
    /// # Errors
    ///
    /// Returns `LessonServiceError::UnknownLesson` if the lesson does not exist.
    pub async fn complete(
        &self,
        section_id: &str,
        slug: &str,
    ) -> Result<Option<LessonKey>, LessonServiceError> {
        let found = self
            .curriculum
            .lesson_by_slug(section_id, slug)
            .ok_or_else(|| LessonServiceError::UnknownLesson {
                section_id: section_id.to_owned(),
                slug: slug.to_owned(),
            })?;
        self.progress.mark_complete(found.key()).await;
        Ok(self.curriculum.next_lesson(section_id, slug))
    }

    /// Every section in order with localized titles and completion counts.
    #[must_use]
    pub fn sections(&self) -> Vec<SectionOverview> {
        self.curriculum
            .sections()
            .iter()
            .map(|section| {
                let title = self.section_title(section);
                let progress = self
                    .progress
                    .section_progress(&self.curriculum, section.id().as_str())
                    .unwrap_or_default();
                let caption = self.locale.t(
                    "progress.section",
                    &[&progress.completed, &progress.total, &title],
                );
                SectionOverview {
                    id: section.id().to_string(),
                    number: section.number().to_owned(),
                    title,
                    color: section.color().to_owned(),
                    progress,
                    caption,
                }
            })
            .collect()
    }

    /// Localized "N of M lessons complete" caption.
    #[must_use]
    pub fn progress_caption(&self) -> String {
        let summary = self.progress.overall_progress(&self.curriculum);
        self.locale
            .t("progress.summary", &[&summary.completed, &summary.total])
    }

    /// First lesson not yet completed, in curriculum order.
    #[must_use]
    pub fn resume_point(&self) -> Option<LessonKey> {
        self.curriculum
            .lessons()
            .map(|found| found.key())
            .find(|key| !self.progress.is_complete(key))
    }

    #[must_use]
    pub fn curriculum(&self) -> Arc<Curriculum> {
        Arc::clone(&self.curriculum)
    }

    fn section_title(&self, section: &Section) -> String {
        self.localized(&format!("sections.{}.title", section.id()), section.title())
    }

    fn lesson_text(&self, found: &LessonRef<'_>, field: &str, default: &str) -> String {
        let raw = format!(
            "lessons.{}.{}.{field}",
            found.section.id(),
            found.lesson.slug()
        );
        self.localized(&raw, default)
    }

    // Curriculum text is the last resort when no dictionary has the key.
    fn localized(&self, raw: &str, default: &str) -> String {
        let Ok(path) = KeyPath::parse(raw) else {
            return default.to_owned();
        };
        self.locale
            .localizer()
            .text(self.locale.active(), &path)
            .unwrap_or_else(|| default.to_owned())
    }
}
