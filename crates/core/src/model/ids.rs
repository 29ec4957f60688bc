use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Separator between the section id and the slug in a [`LessonKey`].
pub const KEY_SEPARATOR: char = '/';

/// Error type for building identifiers from strings.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum IdError {
    #[error("{kind} cannot be empty")]
    Empty { kind: &'static str },

    #[error("{kind} cannot contain '/': {raw}")]
    ContainsSeparator { kind: &'static str, raw: String },

    #[error("lesson key must look like <section>/<slug>: {raw}")]
    MalformedKey { raw: String },
}

fn validate(kind: &'static str, raw: String) -> Result<String, IdError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(IdError::Empty { kind });
    }
    if trimmed.contains(KEY_SEPARATOR) {
        return Err(IdError::ContainsSeparator { kind, raw });
    }
    Ok(trimmed.to_owned())
}

/// Unique, stable identifier of a Section.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SectionId(String);

impl SectionId {
    /// Creates a validated `SectionId`.
    ///
    /// # Errors
    ///
    /// Returns `IdError` if the id is blank or contains the key separator.
    pub fn new(id: impl Into<String>) -> Result<Self, IdError> {
        validate("section id", id.into()).map(Self)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Slug of a Lesson, unique within its section.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LessonSlug(String);

impl LessonSlug {
    /// Creates a validated `LessonSlug`.
    ///
    /// # Errors
    ///
    /// Returns `IdError` if the slug is blank or contains the key separator.
    pub fn new(slug: impl Into<String>) -> Result<Self, IdError> {
        validate("lesson slug", slug.into()).map(Self)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Canonical lesson identifier: the owning section plus the lesson slug.
///
/// Renders as `"<sectionId>/<slug>"`, which is also the progress key format.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LessonKey {
    section_id: SectionId,
    slug: LessonSlug,
}

impl LessonKey {
    #[must_use]
    pub fn new(section_id: SectionId, slug: LessonSlug) -> Self {
        Self { section_id, slug }
    }

    /// Builds a key from raw strings.
    ///
    /// # Errors
    ///
    /// Returns `IdError` if either part is invalid.
    pub fn from_parts(section_id: &str, slug: &str) -> Result<Self, IdError> {
        Ok(Self::new(SectionId::new(section_id)?, LessonSlug::new(slug)?))
    }

    #[must_use]
    pub fn section_id(&self) -> &SectionId {
        &self.section_id
    }

    #[must_use]
    pub fn slug(&self) -> &LessonSlug {
        &self.slug
    }
}

// ─── Debug / Display ───────────────────────────────────────────────────────────

impl fmt::Debug for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SectionId({})", self.0)
    }
}

impl fmt::Debug for LessonSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LessonSlug({})", self.0)
    }
}

impl fmt::Debug for LessonKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LessonKey({self})")
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for LessonSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for LessonKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{KEY_SEPARATOR}{}", self.section_id, self.slug)
    }
}

// ─── Conversions ───────────────────────────────────────────────────────────────

impl TryFrom<String> for SectionId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SectionId> for String {
    fn from(value: SectionId) -> Self {
        value.0
    }
}

impl TryFrom<String> for LessonSlug {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<LessonSlug> for String {
    fn from(value: LessonSlug) -> Self {
        value.0
    }
}

impl Borrow<str> for SectionId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl FromStr for SectionId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl FromStr for LessonSlug {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl FromStr for LessonKey {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (section, slug) = s
            .split_once(KEY_SEPARATOR)
            .ok_or_else(|| IdError::MalformedKey { raw: s.to_owned() })?;
        Self::from_parts(section, slug).map_err(|_| IdError::MalformedKey { raw: s.to_owned() })
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────
