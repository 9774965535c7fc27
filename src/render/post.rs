//! Single post view
//!
//! Rendering a post walks a fixed sequence of states:
//!
//! ```text
//! ReadingSlug -> LoadingCatalog -> LoadingDocument -> Parsing -> Rendering -> Done
//! ```
//!
//! Any step before `Done` may instead end in `Error`. The document is only
//! fetched once the slug has been found in the catalog.

use serde::Serialize;

use super::fetch_catalog;
use crate::config::SiteConfig;
use crate::content::{merge, CatalogEntry, FrontMatter, MarkdownRenderer, PostMeta};
use crate::error::ViewError;
use crate::helpers::{date_xml, display_date};
use crate::source::{ResourceLayout, ResourceSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PostState {
    ReadingSlug,
    LoadingCatalog,
    LoadingDocument,
    Parsing,
    Rendering,
    Done,
    Error,
}

/// Document-level metadata: `<title>`, meta description, canonical link
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
    pub canonical: Option<String>,
}

/// Fields shown in the post header
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostHeader {
    pub title: String,
    pub description: String,
    pub date: String,
    pub date_iso: String,
    pub read_time: String,
    pub tags: Vec<String>,
}

/// Visible "originally published at" notice
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CanonicalNotice {
    pub url: String,
    /// Host part of the URL, used as link text
    pub label: String,
}

impl CanonicalNotice {
    fn new(url: &str) -> Self {
        let without_scheme = url.split_once("://").map(|(_, rest)| rest).unwrap_or(url);
        let label = without_scheme
            .split(['/', '?', '#'])
            .next()
            .filter(|host| !host.is_empty())
            .unwrap_or(url)
            .to_string();
        Self {
            url: url.to_string(),
            label,
        }
    }
}

/// A fully rendered post
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostView {
    pub slug: String,
    pub meta: PageMeta,
    pub header: PostHeader,
    pub canonical_notice: Option<CanonicalNotice>,
    /// Rendered body HTML
    pub content: String,
}

/// Result of a post render, with the states it went through
#[derive(Debug, Clone)]
pub struct PostOutcome {
    pub trace: Vec<PostState>,
    pub result: Result<PostView, ViewError>,
}

impl PostOutcome {
    /// Final state, `Done` or `Error`
    pub fn state(&self) -> PostState {
        self.trace.last().copied().unwrap_or(PostState::ReadingSlug)
    }

    pub fn visited(&self, state: PostState) -> bool {
        self.trace.contains(&state)
    }
}

/// Renders one post from the catalog and its document
pub struct PostRenderer<'a, S: ?Sized> {
    source: &'a S,
    config: &'a SiteConfig,
    markdown: &'a MarkdownRenderer,
}

impl<'a, S> PostRenderer<'a, S>
where
    S: ResourceSource + ?Sized,
{
    pub fn new(source: &'a S, config: &'a SiteConfig, markdown: &'a MarkdownRenderer) -> Self {
        Self {
            source,
            config,
            markdown,
        }
    }

    /// Render the post selected by `slug`
    pub async fn render(&self, slug: Option<&str>) -> PostOutcome {
        let mut trace = vec![PostState::ReadingSlug];
        let result = self.run(slug, &mut trace).await;

        let last = if result.is_ok() {
            PostState::Done
        } else {
            PostState::Error
        };
        trace.push(last);
        tracing::debug!("Post render {:?} finished: {:?}", slug, trace);

        PostOutcome { trace, result }
    }

    async fn run(
        &self,
        slug: Option<&str>,
        trace: &mut Vec<PostState>,
    ) -> Result<PostView, ViewError> {
        let slug = slug
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(ViewError::NotFound)?;

        trace.push(PostState::LoadingCatalog);
        let entry = self.resolve_entry(slug).await?;

        trace.push(PostState::LoadingDocument);
        let document = self.load_document(&entry).await?;

        trace.push(PostState::Parsing);
        let (frontmatter, body) = FrontMatter::parse(&document);
        let meta = PostMeta::from_metadata(&merge(&entry.to_metadata(), &frontmatter.fields));

        trace.push(PostState::Rendering);
        Ok(assemble_view(&entry.slug, meta, body, self.config, self.markdown))
    }

    /// Find the catalog entry for a slug
    async fn resolve_entry(&self, slug: &str) -> Result<CatalogEntry, ViewError> {
        let layout = ResourceLayout::from_config(&self.config.blog);
        let catalog = fetch_catalog(self.source, &layout).await.map_err(|e| {
            tracing::warn!("Failed to load catalog: {:#}", e);
            ViewError::NotFound
        })?;

        catalog.find(slug).cloned().ok_or_else(|| {
            tracing::debug!("Slug {:?} is not in the catalog", slug);
            ViewError::NotFound
        })
    }

    async fn load_document(&self, entry: &CatalogEntry) -> Result<String, ViewError> {
        let layout = ResourceLayout::from_config(&self.config.blog);
        self.source
            .fetch_text(&layout.document(&entry.slug))
            .await
            .map_err(|e| {
                tracing::warn!("Failed to load post {}: {}", entry.slug, e);
                ViewError::LoadFailed
            })
    }
}

/// Build a post view from a catalog entry and its raw document
pub fn build_post_view(
    entry: &CatalogEntry,
    document: &str,
    config: &SiteConfig,
    markdown: &MarkdownRenderer,
) -> PostView {
    let (frontmatter, body) = FrontMatter::parse(document);
    let meta = PostMeta::from_metadata(&merge(&entry.to_metadata(), &frontmatter.fields));
    assemble_view(&entry.slug, meta, body, config, markdown)
}

fn assemble_view(
    slug: &str,
    meta: PostMeta,
    body: &str,
    config: &SiteConfig,
    markdown: &MarkdownRenderer,
) -> PostView {
    let title = if meta.title.trim().is_empty() {
        slug.to_string()
    } else {
        meta.title.clone()
    };

    let page = PageMeta {
        title: format!("{}{}", title, config.blog.title_suffix),
        description: meta.description.clone(),
        canonical: meta.canonical.clone(),
    };

    let header = PostHeader {
        title,
        description: meta.description,
        date: display_date(&meta.date, &config.date_format),
        date_iso: date_xml(&meta.date),
        read_time: meta.read_time,
        tags: meta.tags,
    };

    PostView {
        slug: slug.to_string(),
        canonical_notice: meta.canonical.as_deref().map(CanonicalNotice::new),
        meta: page,
        header,
        content: markdown.render(body),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::testing::MemorySource;

    const CATALOG: &str = r#"[
        {"slug": "hello", "title": "Catalog Title", "description": "From the catalog", "date": "2025-05-05", "readTime": "2 min read", "tags": ["intro"]},
        {"slug": "orphan", "title": "No Document", "date": "2025-01-01"}
    ]"#;

    const DOCUMENT: &str = "---\ntitle: \"Frontmatter Title\"\ntags: [rust, web]\ncanonical: https://dev.to/me/hello\n---\n# Heading\n\n```rust\nfn main() {}\n```\n";

    fn site() -> MemorySource {
        MemorySource::new()
            .with("blog/posts.json", CATALOG)
            .with("blog/posts/hello.md", DOCUMENT)
    }

    #[tokio::test]
    async fn test_render_post() {
        let source = site();
        let config = SiteConfig::default();
        let markdown = MarkdownRenderer::new();

        let outcome = PostRenderer::new(&source, &config, &markdown)
            .render(Some("hello"))
            .await;
        assert_eq!(
            outcome.trace,
            vec![
                PostState::ReadingSlug,
                PostState::LoadingCatalog,
                PostState::LoadingDocument,
                PostState::Parsing,
                PostState::Rendering,
                PostState::Done,
            ]
        );

        let view = outcome.result.unwrap();
        assert_eq!(view.meta.title, "Frontmatter Title | Blog");
        assert_eq!(view.meta.description, "From the catalog");
        assert_eq!(view.meta.canonical.as_deref(), Some("https://dev.to/me/hello"));
        assert_eq!(view.header.title, "Frontmatter Title");
        assert_eq!(view.header.date, "May 5, 2025");
        assert_eq!(view.header.read_time, "2 min read");
        assert_eq!(view.header.tags, vec!["rust", "web"]);

        let notice = view.canonical_notice.unwrap();
        assert_eq!(notice.label, "dev.to");
        assert!(view.content.contains("<h1>Heading</h1>"));
        assert!(view.content.contains("highlight rust"));
        assert_eq!(
            source.fetched(),
            vec!["blog/posts.json", "blog/posts/hello.md"]
        );
    }

    #[tokio::test]
    async fn test_missing_slug_is_not_found() {
        let source = site();
        let config = SiteConfig::default();
        let markdown = MarkdownRenderer::new();
        let renderer = PostRenderer::new(&source, &config, &markdown);

        for slug in [None, Some(""), Some("   ")] {
            let outcome = renderer.render(slug).await;
            assert_eq!(outcome.result.unwrap_err(), ViewError::NotFound);
            assert_eq!(outcome.trace, vec![PostState::ReadingSlug, PostState::Error]);
        }
        assert!(source.fetched().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_slug_never_fetches_document() {
        let source = site();
        let config = SiteConfig::default();
        let markdown = MarkdownRenderer::new();

        let outcome = PostRenderer::new(&source, &config, &markdown)
            .render(Some("does-not-exist"))
            .await;
        assert_eq!(outcome.state(), PostState::Error);
        assert!(!outcome.visited(PostState::LoadingDocument));

        let err = outcome.result.unwrap_err();
        assert_eq!(err, ViewError::NotFound);
        assert!(err.to_string().contains("not found"));
        assert_eq!(source.fetched(), vec!["blog/posts.json"]);
    }

    #[tokio::test]
    async fn test_catalog_unavailable_is_not_found() {
        let source = MemorySource::new().with("blog/posts/hello.md", DOCUMENT);
        let config = SiteConfig::default();
        let markdown = MarkdownRenderer::new();

        let outcome = PostRenderer::new(&source, &config, &markdown)
            .render(Some("hello"))
            .await;
        assert_eq!(outcome.result.unwrap_err(), ViewError::NotFound);
        assert_eq!(source.fetched(), vec!["blog/posts.json"]);
    }

    #[tokio::test]
    async fn test_missing_document_is_load_failed() {
        let source = site();
        let config = SiteConfig::default();
        let markdown = MarkdownRenderer::new();

        let outcome = PostRenderer::new(&source, &config, &markdown)
            .render(Some("orphan"))
            .await;
        assert!(outcome.visited(PostState::LoadingDocument));
        assert!(!outcome.visited(PostState::Parsing));
        assert_eq!(outcome.result.unwrap_err(), ViewError::LoadFailed);
    }

    #[test]
    fn test_document_without_frontmatter_uses_catalog() {
        let entry = CatalogEntry {
            slug: "plain".to_string(),
            title: "Plain".to_string(),
            description: "Just text".to_string(),
            date: "2024-03-09".to_string(),
            read_time: "1 min read".to_string(),
            tags: vec!["misc".to_string()],
        };
        let view = build_post_view(
            &entry,
            "Just a body.\n",
            &SiteConfig::default(),
            &MarkdownRenderer::new(),
        );
        assert_eq!(view.meta.title, "Plain | Blog");
        assert_eq!(view.header.tags, vec!["misc"]);
        assert_eq!(view.meta.canonical, None);
        assert!(view.canonical_notice.is_none());
        assert!(view.content.contains("<p>Just a body.</p>"));
    }

    #[test]
    fn test_canonical_notice_label() {
        assert_eq!(CanonicalNotice::new("https://medium.com/@me/post?x=1").label, "medium.com");
        assert_eq!(CanonicalNotice::new("example.org/p").label, "example.org");
    }
}
