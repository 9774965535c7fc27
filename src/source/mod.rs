//! Resource sources - where the catalog and post documents are fetched from

mod fs;
mod http;

use async_trait::async_trait;

pub use fs::FsSource;
pub use http::HttpSource;

use crate::config::BlogConfig;
use crate::error::FetchError;

/// Fetches site resources by relative path
#[async_trait]
pub trait ResourceSource: Send + Sync {
    /// Fetch a text resource, e.g. `blog/posts.json`
    async fn fetch_text(&self, path: &str) -> Result<String, FetchError>;
}

/// Where the catalog and the per-slug documents live
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceLayout {
    catalog_path: String,
    post_path: String,
}

impl ResourceLayout {
    pub fn new(catalog_path: impl Into<String>, post_path: impl Into<String>) -> Self {
        Self {
            catalog_path: catalog_path.into(),
            post_path: post_path.into(),
        }
    }

    pub fn from_config(blog: &BlogConfig) -> Self {
        Self::new(&blog.catalog_path, &blog.post_path)
    }

    pub fn catalog(&self) -> &str {
        &self.catalog_path
    }

    /// Document path for a slug
    pub fn document(&self, slug: &str) -> String {
        self.post_path.replace("{slug}", slug)
    }
}

/// Concatenate a base location and a relative resource path
fn join_path(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
pub mod testing {
    //! In-memory source that records every fetch

    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MemorySource {
        files: HashMap<String, String>,
        fetched: Mutex<Vec<String>>,
    }

    impl MemorySource {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with(mut self, path: &str, content: &str) -> Self {
            self.files.insert(path.to_string(), content.to_string());
            self
        }

        /// Paths requested so far, in order
        pub fn fetched(&self) -> Vec<String> {
            self.fetched.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ResourceSource for MemorySource {
        async fn fetch_text(&self, path: &str) -> Result<String, FetchError> {
            self.fetched.lock().unwrap().push(path.to_string());
            self.files
                .get(path)
                .cloned()
                .ok_or_else(|| FetchError::NotFound {
                    path: path.to_string(),
                })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_paths() {
        let layout = ResourceLayout::from_config(&BlogConfig::default());
        assert_eq!(layout.catalog(), "blog/posts.json");
        assert_eq!(layout.document("hello-world"), "blog/posts/hello-world.md");
    }

    #[test]
    fn test_join_path() {
        assert_eq!(join_path("https://a.dev/", "/blog/x.md"), "https://a.dev/blog/x.md");
        assert_eq!(join_path("site", "blog/x.md"), "site/blog/x.md");
    }
}
