//! List the posts in the catalog

use anyhow::{Context, Result};

use crate::content::CatalogEntry;
use crate::helpers::display_date;
use crate::render::fetch_catalog;
use crate::Folio;

/// Print the catalog, newest first
pub async fn run(folio: &Folio) -> Result<()> {
    let entries = sorted_entries(folio).await?;

    println!("Posts ({}):", entries.len());
    for entry in &entries {
        println!("{}", format_entry(entry, &folio.config.date_format));
    }

    Ok(())
}

pub async fn sorted_entries(folio: &Folio) -> Result<Vec<CatalogEntry>> {
    let catalog = fetch_catalog(&folio.source(), &folio.layout())
        .await
        .context("Failed to load catalog")?;
    Ok(catalog.sorted())
}

fn format_entry(entry: &CatalogEntry, date_format: &str) -> String {
    let mut line = format!(
        "  {} - {} [{}]",
        display_date(&entry.date, date_format),
        entry.title,
        entry.slug
    );
    if !entry.tags.is_empty() {
        line.push_str(&format!(" #{}", entry.tags.join(" #")));
    }
    line
}
