//! Metadata records and merging

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A single frontmatter or catalog value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FrontValue {
    Text(String),
    List(Vec<String>),
}

impl FrontValue {
    /// The value as text, `None` for lists
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FrontValue::Text(s) => Some(s),
            FrontValue::List(_) => None,
        }
    }

    /// The value as a list; a text value is read as a one-element list
    pub fn to_list(&self) -> Vec<String> {
        match self {
            FrontValue::Text(s) if s.is_empty() => Vec::new(),
            FrontValue::Text(s) => vec![s.clone()],
            FrontValue::List(items) => items.clone(),
        }
    }
}

impl From<&str> for FrontValue {
    fn from(value: &str) -> Self {
        FrontValue::Text(value.to_string())
    }
}

impl From<String> for FrontValue {
    fn from(value: String) -> Self {
        FrontValue::Text(value)
    }
}

impl From<Vec<String>> for FrontValue {
    fn from(value: Vec<String>) -> Self {
        FrontValue::List(value)
    }
}

/// Insertion-ordered metadata record
pub type Metadata = IndexMap<String, FrontValue>;

/// Overlay `overlay` on top of `base`.
///
/// Keys keep the base order; keys only present in the overlay follow in
/// overlay order. Neither input is modified.
pub fn merge(base: &Metadata, overlay: &Metadata) -> Metadata {
    let mut merged = base.clone();
    for (key, value) in overlay {
        merged.insert(key.clone(), value.clone());
    }
    merged
}

/// Typed view over merged post metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PostMeta {
    pub title: String,
    pub description: String,
    pub date: String,
    pub read_time: String,
    pub tags: Vec<String>,
    /// Authoritative source URL, only set when non-blank
    pub canonical: Option<String>,
    /// Remaining keys not covered by the typed fields
    pub extra: Metadata,
}

const KNOWN_KEYS: [&str; 7] = [
    "slug",
    "title",
    "description",
    "date",
    "readTime",
    "tags",
    "canonical",
];

impl PostMeta {
    pub fn from_metadata(meta: &Metadata) -> Self {
        let text = |key: &str| {
            meta.get(key)
                .map(|v| match v {
                    FrontValue::Text(s) => s.clone(),
                    FrontValue::List(items) => items.join(", "),
                })
                .unwrap_or_default()
        };

        let canonical = meta
            .get("canonical")
            .and_then(FrontValue::as_text)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        let extra = meta
            .iter()
            .filter(|(k, _)| !KNOWN_KEYS.contains(&k.as_str()))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        Self {
            title: text("title"),
            description: text("description"),
            date: text("date"),
            read_time: text("readTime"),
            tags: meta.get("tags").map(FrontValue::to_list).unwrap_or_default(),
            canonical,
            extra,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, &str)]) -> Metadata {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), FrontValue::from(*v)))
            .collect()
    }

    #[test]
    fn test_overlay_wins() {
        let base = record(&[("title", "X"), ("date", "2020-01-01")]);
        let overlay = record(&[("title", "Y")]);

        let merged = merge(&base, &overlay);
        assert_eq!(merged, record(&[("title", "Y"), ("date", "2020-01-01")]));
        // Inputs are untouched
        assert_eq!(base.get("title"), Some(&FrontValue::from("X")));
    }

    #[test]
    fn test_merge_key_order() {
        let base = record(&[("a", "1"), ("b", "2")]);
        let overlay = record(&[("c", "3"), ("a", "9")]);

        let merged = merge(&base, &overlay);
        let keys: Vec<&str> = merged.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
        assert_eq!(merged["a"], FrontValue::from("9"));
    }

    #[test]
    fn test_post_meta_view() {
        let mut meta = record(&[
            ("title", "Hello"),
            ("readTime", "3 min read"),
            ("tags", "rust"),
            ("canonical", "   "),
            ("series", "intro"),
        ]);
        meta.insert("slug".to_string(), FrontValue::from("hello"));

        let post = PostMeta::from_metadata(&meta);
        assert_eq!(post.title, "Hello");
        assert_eq!(post.read_time, "3 min read");
        assert_eq!(post.tags, vec!["rust"]);
        assert_eq!(post.canonical, None);
        assert_eq!(post.extra.len(), 1);
        assert!(post.extra.contains_key("series"));
    }

    #[test]
    fn test_canonical_is_trimmed() {
        let meta = record(&[("canonical", " https://dev.to/me/post ")]);
        let post = PostMeta::from_metadata(&meta);
        assert_eq!(post.canonical.as_deref(), Some("https://dev.to/me/post"));
    }
}
