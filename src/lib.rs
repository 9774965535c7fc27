//! folio: blog renderer for a static portfolio site
//!
//! A site keeps a JSON catalog of post summaries and one markdown document
//! per post. This crate parses the documents' front-matter, merges it over
//! the catalog metadata and renders listing and post pages, either ahead of
//! time (`generate`) or on request (`server`).

pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod helpers;
pub mod render;
pub mod server;
pub mod source;
pub mod templates;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// The main application
#[derive(Clone)]
pub struct Folio {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Directory holding the site resources (catalog, posts, pages)
    pub source_dir: PathBuf,
    /// Public (output) directory
    pub public_dir: PathBuf,
}

impl Folio {
    /// Create a new instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Create an instance with an already loaded configuration
    pub fn with_config(base_dir: PathBuf, config: config::SiteConfig) -> Self {
        let source_dir = base_dir.join(&config.source_dir);
        let public_dir = base_dir.join(&config.public_dir);

        Self {
            config,
            base_dir,
            source_dir,
            public_dir,
        }
    }

    /// Resource source reading from the local site
    pub fn source(&self) -> source::FsSource {
        source::FsSource::new(&self.source_dir)
    }

    /// Resource locations from the blog config
    pub fn layout(&self) -> source::ResourceLayout {
        source::ResourceLayout::from_config(&self.config.blog)
    }

    /// Markdown renderer configured for this site
    pub fn markdown(&self) -> content::MarkdownRenderer {
        content::MarkdownRenderer::with_options(&self.config.markdown, &self.config.highlight)
    }

    /// Pre-render the blog into the public directory
    pub async fn generate(&self) -> Result<()> {
        commands::generate::run(self).await
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}
