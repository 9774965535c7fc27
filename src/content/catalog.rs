//! Post catalog (posts.json)

use serde::{Deserialize, Serialize};

use super::metadata::{FrontValue, Metadata};
use crate::helpers::parse_date;

/// Summary metadata for one post, as listed in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    /// Unique id, also the document file name
    pub slug: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub read_time: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl CatalogEntry {
    /// Metadata record keyed like the catalog JSON
    pub fn to_metadata(&self) -> Metadata {
        let mut meta = Metadata::new();
        meta.insert("slug".to_string(), FrontValue::from(self.slug.as_str()));
        meta.insert("title".to_string(), FrontValue::from(self.title.as_str()));
        meta.insert(
            "description".to_string(),
            FrontValue::from(self.description.as_str()),
        );
        meta.insert("date".to_string(), FrontValue::from(self.date.as_str()));
        meta.insert(
            "readTime".to_string(),
            FrontValue::from(self.read_time.as_str()),
        );
        meta.insert("tags".to_string(), FrontValue::List(self.tags.clone()));
        meta
    }
}

/// The full collection of catalog entries, in file order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    /// Parse a catalog from its JSON array form
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<CatalogEntry> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an entry by slug
    pub fn find(&self, slug: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.slug == slug)
    }

    pub fn contains(&self, slug: &str) -> bool {
        self.find(slug).is_some()
    }

    pub fn push(&mut self, entry: CatalogEntry) {
        self.entries.push(entry);
    }

    /// Entries ordered newest first
    pub fn sorted(&self) -> Vec<CatalogEntry> {
        let mut entries = self.entries.clone();
        sort_by_date_desc(&mut entries);
        entries
    }
}

/// Sort newest first.
///
/// The sort is stable: entries with equal dates keep their relative order,
/// and entries whose date cannot be parsed go last in catalog order.
pub fn sort_by_date_desc(entries: &mut [CatalogEntry]) {
    entries.sort_by_cached_key(|e| std::cmp::Reverse(parse_date(&e.date)));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(slug: &str, date: &str) -> CatalogEntry {
        CatalogEntry {
            slug: slug.to_string(),
            title: slug.to_uppercase(),
            description: String::new(),
            date: date.to_string(),
            read_time: String::new(),
            tags: Vec::new(),
        }
    }

    fn slugs(entries: &[CatalogEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.slug.as_str()).collect()
    }

    #[test]
    fn test_parse_catalog_json() {
        let json = r#"[
            {"slug": "first", "title": "First", "description": "d", "date": "2025-05-05", "readTime": "4 min read", "tags": ["rust", "web"]},
            {"slug": "bare", "title": "Bare"}
        ]"#;
        let catalog = Catalog::from_json(json).unwrap();
        assert_eq!(catalog.len(), 2);

        let first = catalog.find("first").unwrap();
        assert_eq!(first.read_time, "4 min read");
        assert_eq!(first.tags, vec!["rust", "web"]);

        let bare = catalog.find("bare").unwrap();
        assert!(bare.tags.is_empty());
        assert!(bare.date.is_empty());
        assert!(!catalog.contains("missing"));
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(Catalog::from_json("{\"slug\": 1}").is_err());
        assert!(Catalog::from_json("not json").is_err());
    }

    #[test]
    fn test_sorted_newest_first() {
        let catalog = Catalog::new(vec![entry("old", "2025-05-05"), entry("new", "2026-01-01")]);
        assert_eq!(slugs(&catalog.sorted()), vec!["new", "old"]);
        // Original order is untouched
        assert_eq!(slugs(catalog.entries()), vec!["old", "new"]);
    }

    #[test]
    fn test_sort_is_stable() {
        let mut entries = vec![
            entry("a", "2025-01-01"),
            entry("undated", "someday"),
            entry("b", "2025-01-01"),
            entry("c", "2025-03-01T08:00:00Z"),
            entry("d", "2025-01-01"),
        ];
        sort_by_date_desc(&mut entries);
        assert_eq!(slugs(&entries), vec!["c", "a", "b", "d", "undated"]);
    }

    #[test]
    fn test_to_metadata_keys() {
        let meta = entry("hello", "2024-02-02").to_metadata();
        let keys: Vec<&str> = meta.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec!["slug", "title", "description", "date", "readTime", "tags"]
        );
        assert_eq!(meta["tags"], FrontValue::List(Vec::new()));
    }

    #[test]
    fn test_json_round_trip_keeps_camel_case() {
        let catalog = Catalog::new(vec![entry("one", "2024-01-01")]);
        let json = catalog.to_json_pretty().unwrap();
        assert!(json.contains("\"readTime\""));
        assert_eq!(Catalog::from_json(&json).unwrap(), catalog);
    }
}
