//! View rendering - turns catalog and document resources into view models
//!
//! Nothing in here touches the display surface. The listing and post
//! renderers produce plain data (`ListView`, `PostOutcome`) and
//! [`crate::templates`] turns that data into HTML.

mod list;
mod post;

use anyhow::{Context, Result};

pub use list::{build_list_view, ListRenderer, ListView, PostCard};
pub use post::{
    build_post_view, CanonicalNotice, PageMeta, PostHeader, PostOutcome, PostRenderer, PostState,
    PostView,
};

use crate::content::Catalog;
use crate::source::{ResourceLayout, ResourceSource};

/// Fetch and parse the catalog
pub async fn fetch_catalog<S>(source: &S, layout: &ResourceLayout) -> Result<Catalog>
where
    S: ResourceSource + ?Sized,
{
    let json = source.fetch_text(layout.catalog()).await?;
    let catalog = Catalog::from_json(&json)
        .with_context(|| format!("Invalid catalog {}", layout.catalog()))?;
    Ok(catalog)
}
