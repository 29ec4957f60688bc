use std::collections::BTreeMap;

use serde::Deserialize;

use crate::i18n::I18nError;
use crate::i18n::path::{KeyPath, Segment};

/// One node of a locale dictionary.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Node {
    Text(String),
    List(Vec<Node>),
    Map(BTreeMap<String, Node>),
}

/// Outcome of walking a [`KeyPath`] through a dictionary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The path ends on a string.
    Leaf(String),
    /// The path ends on a list made only of strings.
    Sequence(Vec<String>),
    /// A segment did not resolve, or the path ends on some other container.
    Missing,
}

impl Resolution {
    #[must_use]
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    #[must_use]
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf(_))
    }

    #[must_use]
    pub fn into_leaf(self) -> Option<String> {
        match self {
            Self::Leaf(text) => Some(text),
            _ => None,
        }
    }

    #[must_use]
    pub fn into_sequence(self) -> Option<Vec<String>> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }
}

/// Nested translation data for one locale. The root is always a mapping.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(transparent)]
pub struct Dictionary {
    root: BTreeMap<String, Node>,
}

impl Dictionary {
    /// Parses a JSON object whose leaves are strings or lists.
    ///
    /// # Errors
    ///
    /// Returns `I18nError::Parse` if the document is not an object of strings,
    /// lists and nested objects.
    pub fn from_json(raw: &str) -> Result<Self, I18nError> {
        serde_json::from_str(raw).map_err(I18nError::Parse)
    }

    /// Walks `path` one segment at a time.
    #[must_use]
    pub fn resolve(&self, path: &KeyPath) -> Resolution {
        let mut segments = path.segments().iter();
        let Some(first) = segments.next() else {
            return Resolution::Missing;
        };
        let Some(mut node) = map_get(&self.root, first) else {
            return Resolution::Missing;
        };
        for segment in segments {
            let next = match (node, segment) {
                (Node::Map(map), segment) => map_get(map, segment),
                (Node::List(items), Segment::Index(idx)) => items.get(*idx),
                (Node::List(_) | Node::Text(_), _) => None,
            };
            let Some(next) = next else {
                return Resolution::Missing;
            };
            node = next;
        }

        match node {
            Node::Text(text) => Resolution::Leaf(text.clone()),
            Node::List(items) => items
                .iter()
                .map(|item| match item {
                    Node::Text(text) => Some(text.clone()),
                    _ => None,
                })
                .collect::<Option<Vec<_>>>()
                .map_or(Resolution::Missing, Resolution::Sequence),
            Node::Map(_) => Resolution::Missing,
        }
    }

    /// Dotted paths of every string leaf, in key order.
    #[must_use]
    pub fn leaf_paths(&self) -> Vec<String> {
        let mut out = Vec::new();
        for (key, node) in &self.root {
            collect_leaves(node, key.clone(), &mut out);
        }
        out
    }
}

fn map_get<'a>(map: &'a BTreeMap<String, Node>, segment: &Segment) -> Option<&'a Node> {
    match segment {
        Segment::Key(key) => map.get(key),
        // numeric keys in objects are spelled as strings
        Segment::Index(idx) => map.get(&idx.to_string()),
    }
}

fn collect_leaves(node: &Node, prefix: String, out: &mut Vec<String>) {
    match node {
        Node::Text(_) => out.push(prefix),
        Node::List(items) => {
            for (idx, item) in items.iter().enumerate() {
                collect_leaves(item, format!("{prefix}.{idx}"), out);
            }
        }
        Node::Map(map) => {
            for (key, child) in map {
                collect_leaves(child, format!("{prefix}.{key}"), out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dict() -> Dictionary {
        Dictionary::from_json(
            r#"{
                "a": { "items": ["x", "y", "z"] },
                "nav": { "next": "Next" },
                "cards": [ { "label": "First" }, { "label": "Second" } ],
                "by_number": { "0": "zero" }
            }"#,
        )
        .unwrap()
    }

    fn path(raw: &str) -> KeyPath {
        KeyPath::parse(raw).unwrap()
    }

    #[test]
    fn resolves_string_leaf() {
        assert_eq!(dict().resolve(&path("nav.next")), Resolution::Leaf("Next".into()));
    }

    #[test]
    fn resolves_array_index() {
        assert_eq!(dict().resolve(&path("a.items.1")), Resolution::Leaf("y".into()));
        assert_eq!(dict().resolve(&path("a.items.9")), Resolution::Missing);
    }

    #[test]
    fn resolves_object_inside_array() {
        assert_eq!(
            dict().resolve(&path("cards.1.label")),
            Resolution::Leaf("Second".into())
        );
    }

    #[test]
    fn string_list_is_a_sequence() {
        assert_eq!(
            dict().resolve(&path("a.items")),
            Resolution::Sequence(vec!["x".into(), "y".into(), "z".into()])
        );
    }

    #[test]
    fn containers_are_not_leaves() {
        assert_eq!(dict().resolve(&path("nav")), Resolution::Missing);
        assert_eq!(dict().resolve(&path("cards")), Resolution::Missing);
    }

    #[test]
    fn walking_past_a_leaf_is_missing() {
        assert_eq!(dict().resolve(&path("nav.next.deeper")), Resolution::Missing);
        assert_eq!(dict().resolve(&path("a.items.first")), Resolution::Missing);
    }

    #[test]
    fn numeric_segment_reads_numeric_object_key() {
        assert_eq!(
            dict().resolve(&path("by_number.0")),
            Resolution::Leaf("zero".into())
        );
    }

    #[test]
    fn zero_padded_object_key_keeps_its_spelling() {
        let dict =
            Dictionary::from_json(r#"{ "steps": { "01": "first", "1": "one" } }"#).unwrap();
        assert_eq!(
            dict.resolve(&path("steps.01")),
            Resolution::Leaf("first".into())
        );
        assert_eq!(dict.resolve(&path("steps.1")), Resolution::Leaf("one".into()));
    }

    #[test]
    fn rejects_non_string_leaves() {
        assert!(Dictionary::from_json(r#"{ "count": 3 }"#).is_err());
        assert!(Dictionary::from_json(r#"["not", "an", "object"]"#).is_err());
    }

    #[test]
    fn lists_leaf_paths() {
        let paths = dict().leaf_paths();
        assert!(paths.contains(&"a.items.2".to_string()));
        assert!(paths.contains(&"cards.0.label".to_string()));
        assert!(paths.contains(&"nav.next".to_string()));
        assert!(!paths.contains(&"nav".to_string()));
    }
}
