//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,

    // URL
    pub url: String,
    pub root: String,

    // Directory
    pub source_dir: String,
    pub public_dir: String,

    /// Moment-style display format for post dates
    pub date_format: String,

    #[serde(default)]
    pub blog: BlogConfig,
    #[serde(default)]
    pub markdown: MarkdownConfig,
    #[serde(default)]
    pub highlight: HighlightConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Portfolio".to_string(),
            description: String::new(),
            author: String::new(),

            url: "http://example.com".to_string(),
            root: "/".to_string(),

            source_dir: ".".to_string(),
            public_dir: "public".to_string(),

            date_format: "MMMM D, YYYY".to_string(),

            blog: BlogConfig::default(),
            markdown: MarkdownConfig::default(),
            highlight: HighlightConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

/// Blog resource locations and listing settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BlogConfig {
    /// Directory (relative to the source dir) that pre-rendered posts go under
    pub dir: String,
    pub catalog_path: String,
    /// Document path template, `{slug}` is substituted
    pub post_path: String,
    pub list_page: String,
    pub post_page: String,
    pub title_suffix: String,
    pub empty_message: String,
    pub words_per_minute: usize,
    /// Link cards to pre-rendered `{dir}/{slug}/` pages instead of `post_page?slug=`
    pub static_links: bool,
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            dir: "blog".to_string(),
            catalog_path: "blog/posts.json".to_string(),
            post_path: "blog/posts/{slug}.md".to_string(),
            list_page: "blog/index.html".to_string(),
            post_page: "blog/post.html".to_string(),
            title_suffix: " | Blog".to_string(),
            empty_message: "No posts yet.".to_string(),
            words_per_minute: 200,
            static_links: false,
        }
    }
}

/// Markdown engine options
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkdownConfig {
    /// Render single newlines as `<br />`
    pub breaks: bool,
    pub gfm: bool,
    pub smart_punctuation: bool,
    /// Escape raw HTML and neutralize script links
    pub sanitize: bool,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self {
            breaks: true,
            gfm: true,
            smart_punctuation: false,
            sanitize: true,
        }
    }
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub theme: String,
    pub line_number: bool,
    pub auto_detect: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: "base16-ocean.dark".to_string(),
            line_number: false,
            auto_detect: true,
        }
    }
}
