use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PathError {
    #[error("key path cannot be empty")]
    Empty,

    #[error("key path has an empty segment: {0}")]
    EmptySegment(String),
}

/// One step of a [`KeyPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Indexes a mapping by key.
    Key(String),
    /// Indexes an ordered sequence by position.
    Index(usize),
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => f.write_str(key),
            Self::Index(idx) => write!(f, "{idx}"),
        }
    }
}

/// Dotted translation key parsed once into segments.
///
/// `"lessons.when_to_use.2"` becomes `[Key("lessons"), Key("when_to_use"), Index(2)]`.
/// Purely numeric segments become indices.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyPath {
    raw: String,
    segments: Vec<Segment>,
}

impl KeyPath {
    /// Parses a dotted key path.
    ///
    /// # Errors
    ///
    /// Returns `PathError` if the path or any of its segments is empty.
    pub fn parse(raw: &str) -> Result<Self, PathError> {
        if raw.is_empty() {
            return Err(PathError::Empty);
        }
        let segments = raw
            .split('.')
            .map(|segment| {
                if segment.is_empty() {
                    return Err(PathError::EmptySegment(raw.to_owned()));
                }
                Ok(parse_segment(segment))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            raw: raw.to_owned(),
            segments,
        })
    }

    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns a new path with `segment` appended.
    #[must_use]
    pub fn child(&self, segment: Segment) -> Self {
        let raw = format!("{}.{segment}", self.raw);
        let mut segments = self.segments.clone();
        segments.push(segment);
        Self { raw, segments }
    }
}

fn parse_segment(segment: &str) -> Segment {
    // Only canonical decimals index; "01" keeps its spelling as a map key.
    let canonical = segment == "0" || !segment.starts_with('0');
    if canonical && segment.bytes().all(|b| b.is_ascii_digit()) {
        if let Ok(idx) = segment.parse::<usize>() {
            return Segment::Index(idx);
        }
    }
    Segment::Key(segment.to_owned())
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for KeyPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
