//! Filesystem resource source

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use super::ResourceSource;
use crate::error::FetchError;

/// Reads resources from a site directory on disk
#[derive(Debug, Clone)]
pub struct FsSource {
    root: PathBuf,
}

impl FsSource {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a relative resource path, refusing anything outside the root
    fn resolve(&self, path: &str) -> Option<PathBuf> {
        let relative = Path::new(path.trim_start_matches('/'));
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        (!escapes).then(|| self.root.join(relative))
    }
}

#[async_trait]
impl ResourceSource for FsSource {
    async fn fetch_text(&self, path: &str) -> Result<String, FetchError> {
        let full_path = self.resolve(path).ok_or_else(|| FetchError::NotFound {
            path: path.to_string(),
        })?;

        match tokio::fs::read_to_string(&full_path).await {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(FetchError::NotFound {
                path: path.to_string(),
            }),
            Err(e) => Err(FetchError::Io {
                path: path.to_string(),
                source: e,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("blog")).unwrap();
        std::fs::write(dir.path().join("blog/posts.json"), "[]").unwrap();

        let source = FsSource::new(dir.path());
        assert_eq!(source.fetch_text("blog/posts.json").await.unwrap(), "[]");
        assert_eq!(source.fetch_text("/blog/posts.json").await.unwrap(), "[]");
    }

    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let source = FsSource::new(dir.path());
        let err = source.fetch_text("blog/missing.md").await.unwrap_err();
        assert!(matches!(err, FetchError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_parent_traversal_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let site = dir.path().join("site");
        std::fs::create_dir_all(&site).unwrap();
        std::fs::write(dir.path().join("secret.txt"), "nope").unwrap();

        let source = FsSource::new(&site);
        let err = source.fetch_text("../secret.txt").await.unwrap_err();
        assert!(matches!(err, FetchError::NotFound { .. }));
    }
}
