//! Error types for resource fetching and view rendering
//!
//! Uses `thiserror` for the typed errors; commands and the binary wrap them
//! in `anyhow` as usual.

use thiserror::Error;

/// Failure to fetch a site resource (catalog or post document)
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("resource not found: {path}")]
    NotFound { path: String },

    #[error("request for {path} returned status {status}")]
    Status { path: String, status: u16 },

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("request for {path} failed: {source}")]
    Http {
        path: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Terminal failure of a listing or post view.
///
/// The display text is the user-facing message; causes are logged, not shown.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewError {
    /// Missing slug, unavailable catalog, or slug absent from the catalog
    #[error("Post not found.")]
    NotFound,

    /// The post document could not be fetched
    #[error("Failed to load post.")]
    LoadFailed,

    /// The catalog could not be fetched or parsed for the listing
    #[error("Failed to load posts. Please try again later.")]
    ListUnavailable,
}

impl ViewError {
    /// Stable short code, used for logging and HTTP mapping
    pub fn code(&self) -> &'static str {
        match self {
            ViewError::NotFound => "not-found",
            ViewError::LoadFailed => "load-failed",
            ViewError::ListUnavailable => "list-unavailable",
        }
    }
}
