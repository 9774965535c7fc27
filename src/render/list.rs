//! Post listing

use serde::Serialize;

use super::fetch_catalog;
use crate::config::SiteConfig;
use crate::content::catalog::{sort_by_date_desc, CatalogEntry};
use crate::error::ViewError;
use crate::helpers::{date_xml, display_date, post_url};
use crate::source::{ResourceLayout, ResourceSource};

/// Summary card for one post in the listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostCard {
    pub slug: String,
    pub title: String,
    pub description: String,
    /// Display date
    pub date: String,
    /// `datetime` attribute value
    pub date_iso: String,
    pub read_time: String,
    pub tags: Vec<String>,
    /// Link to the detail view
    pub href: String,
}

/// What the listing region shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ListView {
    /// The catalog has no entries
    Empty { message: String },
    /// Cards, newest first
    Posts { cards: Vec<PostCard> },
    /// The catalog could not be loaded
    Error { message: String },
}

impl ListView {
    pub fn cards(&self) -> &[PostCard] {
        match self {
            ListView::Posts { cards } => cards,
            _ => &[],
        }
    }
}

/// Renders the listing from the catalog resource
pub struct ListRenderer<'a, S: ?Sized> {
    source: &'a S,
    config: &'a SiteConfig,
}

impl<'a, S> ListRenderer<'a, S>
where
    S: ResourceSource + ?Sized,
{
    pub fn new(source: &'a S, config: &'a SiteConfig) -> Self {
        Self { source, config }
    }

    /// Fetch the catalog and build the listing; failures become `ListView::Error`
    pub async fn render(&self) -> ListView {
        let layout = ResourceLayout::from_config(&self.config.blog);

        match fetch_catalog(self.source, &layout).await {
            Ok(catalog) => build_list_view(catalog.into_entries(), self.config),
            Err(e) => {
                tracing::warn!("Failed to load catalog: {:#}", e);
                ListView::Error {
                    message: ViewError::ListUnavailable.to_string(),
                }
            }
        }
    }
}

/// Sort entries newest first and build one card per entry
pub fn build_list_view(mut entries: Vec<CatalogEntry>, config: &SiteConfig) -> ListView {
    if entries.is_empty() {
        return ListView::Empty {
            message: config.blog.empty_message.clone(),
        };
    }

    sort_by_date_desc(&mut entries);

    let cards = entries
        .into_iter()
        .map(|entry| PostCard {
            href: post_url(config, &entry.slug),
            date: display_date(&entry.date, &config.date_format),
            date_iso: date_xml(&entry.date),
            slug: entry.slug,
            title: entry.title,
            description: entry.description,
            read_time: entry.read_time,
            tags: entry.tags,
        })
        .collect();

    ListView::Posts { cards }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::testing::MemorySource;

    const CATALOG: &str = r#"[
        {"slug": "older", "title": "Older", "description": "First post", "date": "2025-05-05", "readTime": "3 min read", "tags": ["notes"]},
        {"slug": "newer", "title": "Newer", "description": "Second post", "date": "2026-01-01", "readTime": "5 min read", "tags": ["rust", "web"]}
    ]"#;

    #[tokio::test]
    async fn test_newest_first() {
        let source = MemorySource::new().with("blog/posts.json", CATALOG);
        let config = SiteConfig::default();

        let view = ListRenderer::new(&source, &config).render().await;
        let slugs: Vec<&str> = view.cards().iter().map(|c| c.slug.as_str()).collect();
        assert_eq!(slugs, vec!["newer", "older"]);

        let card = &view.cards()[0];
        assert_eq!(card.title, "Newer");
        assert_eq!(card.date, "January 1, 2026");
        assert_eq!(card.date_iso, "2026-01-01T00:00:00");
        assert_eq!(card.read_time, "5 min read");
        assert_eq!(card.tags, vec!["rust", "web"]);
        assert_eq!(card.href, "/blog/post.html?slug=newer");
    }

    #[tokio::test]
    async fn test_empty_catalog_shows_placeholder() {
        let source = MemorySource::new().with("blog/posts.json", "[]");
        let config = SiteConfig::default();

        let view = ListRenderer::new(&source, &config).render().await;
        assert_eq!(
            view,
            ListView::Empty {
                message: "No posts yet.".to_string()
            }
        );
        assert!(view.cards().is_empty());
    }

    #[tokio::test]
    async fn test_missing_catalog_is_error() {
        let source = MemorySource::new();
        let config = SiteConfig::default();

        let view = ListRenderer::new(&source, &config).render().await;
        assert!(matches!(view, ListView::Error { .. }));
        assert_eq!(source.fetched(), vec!["blog/posts.json"]);
    }

    #[tokio::test]
    async fn test_malformed_catalog_is_error() {
        let source = MemorySource::new().with("blog/posts.json", "{ not json");
        let config = SiteConfig::default();

        let view = ListRenderer::new(&source, &config).render().await;
        match view {
            ListView::Error { message } => assert!(!message.is_empty()),
            other => panic!("expected error view, got {:?}", other),
        }
    }

    #[test]
    fn test_same_day_keeps_catalog_order() {
        let entry = |slug: &str| CatalogEntry {
            slug: slug.to_string(),
            title: slug.to_string(),
            description: String::new(),
            date: "2025-05-05".to_string(),
            read_time: String::new(),
            tags: Vec::new(),
        };
        let view = build_list_view(
            vec![entry("a"), entry("b"), entry("c")],
            &SiteConfig::default(),
        );
        let slugs: Vec<&str> = view.cards().iter().map(|c| c.slug.as_str()).collect();
        assert_eq!(slugs, vec!["a", "b", "c"]);
    }
}
