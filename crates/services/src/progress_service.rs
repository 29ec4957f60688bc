use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use playbook_core::Curriculum;
use playbook_core::model::LessonKey;
use storage::repository::{KeyValueStore, PROGRESS_KEY, ProgressRecord};

/// Completed versus total lessons for a scope of the curriculum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProgressSummary {
    pub completed: usize,
    pub total: usize,
}

impl ProgressSummary {
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.total > 0 && self.completed == self.total
    }
}

/// Durable, one-way record of completed lessons.
///
/// The in-memory set is authoritative for the session. Every change is
/// written through to the key-value store; a failed write is logged and the
/// session carries on with the in-memory state.
pub struct ProgressService {
    store: Arc<dyn KeyValueStore>,
    completed: Mutex<BTreeSet<LessonKey>>,
    // Serializes snapshot+save so an older set never overwrites a newer one.
    write_lock: tokio::sync::Mutex<()>,
}

impl ProgressService {
    /// Restore progress from `store`.
    ///
    /// Never fails: an unreadable or malformed payload starts an empty set.
    pub async fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let completed = match store.load(PROGRESS_KEY).await {
            Ok(Some(bytes)) => match ProgressRecord::decode(&bytes) {
                Ok(decoded) => {
                    if !decoded.skipped.is_empty() {
                        tracing::warn!(
                            skipped = ?decoded.skipped,
                            "ignoring malformed progress entries"
                        );
                    }
                    decoded.record.completed
                }
                Err(err) => {
                    tracing::warn!(%err, "stored progress is unreadable, starting empty");
                    BTreeSet::new()
                }
            },
            Ok(None) => BTreeSet::new(),
            Err(err) => {
                tracing::warn!(%err, "failed to load progress, starting empty");
                BTreeSet::new()
            }
        };
        tracing::debug!(completed = completed.len(), "progress loaded");

        Self {
            store,
            completed: Mutex::new(completed),
            write_lock: tokio::sync::Mutex::new(()),
        }
    }

    #[must_use]
    pub fn is_complete(&self, key: &LessonKey) -> bool {
        self.guard().contains(key)
    }

    /// Record `key` as completed. Calling it again for the same key is a no-op.
    ///
    /// The key is visible to [`ProgressService::is_complete`] before the
    /// durable write starts.
    pub async fn mark_complete(&self, key: LessonKey) {
        let inserted = self.guard().insert(key.clone());
        if !inserted {
            return;
        }

        let _write = self.write_lock.lock().await;
        let record = ProgressRecord::new(self.snapshot());
        let result = match record.encode() {
            Ok(bytes) => self.store.save(PROGRESS_KEY, &bytes).await,
            Err(err) => Err(err),
        };
        match result {
            Ok(()) => tracing::info!(lesson = %key, "lesson marked complete"),
            Err(err) => tracing::warn!(
                lesson = %key,
                %err,
                "failed to persist progress, keeping it in memory for this session"
            ),
        }
    }

    /// The full completed set.
    #[must_use]
    pub fn snapshot(&self) -> BTreeSet<LessonKey> {
        self.guard().clone()
    }

    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.guard().len()
    }

    /// Progress within one section, or `None` for an unknown section.
    #[must_use]
    pub fn section_progress(
        &self,
        curriculum: &Curriculum,
        section_id: &str,
    ) -> Option<ProgressSummary> {
        let section = curriculum.section(section_id)?;
        let completed = self.guard();
        let done = section
            .lessons()
            .iter()
            .filter(|lesson| {
                completed.contains(&LessonKey::new(section.id().clone(), lesson.slug().clone()))
            })
            .count();
        Some(ProgressSummary {
            completed: done,
            total: section.lessons().len(),
        })
    }

    /// Progress across the whole curriculum. Keys for unknown lessons are not counted.
    #[must_use]
    pub fn overall_progress(&self, curriculum: &Curriculum) -> ProgressSummary {
        let completed = self.guard();
        ProgressSummary {
            completed: completed.iter().filter(|key| curriculum.contains(key)).count(),
            total: curriculum.lesson_count(),
        }
    }

    fn guard(&self) -> MutexGuard<'_, BTreeSet<LessonKey>> {
        self.completed.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
