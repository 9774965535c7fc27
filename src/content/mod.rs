//! Content module - catalog, front-matter, metadata and markdown processing

pub mod catalog;
mod detect;
mod frontmatter;
mod markdown;
pub mod metadata;

pub use catalog::{Catalog, CatalogEntry};
pub use detect::detect_language;
pub use frontmatter::{FrontMatter, DELIMITER};
pub use markdown::MarkdownRenderer;
pub use metadata::{merge, FrontValue, Metadata, PostMeta};
