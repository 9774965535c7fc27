//! Generate static files

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs;
use std::path::{Component, Path};
use walkdir::WalkDir;

use crate::render::{build_list_view, build_post_view, fetch_catalog};
use crate::source::ResourceSource;
use crate::templates::TemplateRenderer;
use crate::Folio;

/// Summary of a generate run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateReport {
    pub posts: usize,
    /// Slugs whose document could not be loaded
    pub failed: Vec<String>,
    /// Slugs not written: unsafe as a path, or already written
    pub skipped: Vec<String>,
    pub assets: usize,
}

/// Pre-render the listing and every post into the public directory
pub async fn run(folio: &Folio) -> Result<()> {
    let report = generate(folio).await?;
    tracing::info!(
        "Generated {} posts and copied {} files",
        report.posts,
        report.assets
    );
    if !report.failed.is_empty() {
        tracing::warn!("Posts rendered as errors: {}", report.failed.join(", "));
    }
    if !report.skipped.is_empty() {
        tracing::warn!("Posts skipped: {}", report.skipped.join(", "));
    }
    Ok(())
}

pub async fn generate(folio: &Folio) -> Result<GenerateReport> {
    let start = std::time::Instant::now();

    // Static output has no query strings, cards link to the per-slug pages
    let mut config = folio.config.clone();
    config.blog.static_links = true;

    let source = folio.source();
    let layout = folio.layout();
    let markdown = folio.markdown();
    let templates = TemplateRenderer::new(&config)?;

    let catalog = fetch_catalog(&source, &layout)
        .await
        .context("Cannot generate without a catalog")?;

    fs::create_dir_all(&folio.public_dir)?;
    let mut report = GenerateReport {
        assets: copy_source_assets(folio)?,
        ..Default::default()
    };

    let list_html = templates.render_list(&build_list_view(catalog.entries().to_vec(), &config))?;
    write_page(&folio.public_dir.join(&config.blog.list_page), &list_html)?;

    let mut written = HashSet::new();
    for entry in catalog.entries() {
        if !is_path_segment(&entry.slug) {
            tracing::warn!("Skipping post with unsafe slug {:?}", entry.slug);
            report.skipped.push(entry.slug.clone());
            continue;
        }
        if !written.insert(entry.slug.as_str()) {
            tracing::warn!("Skipping duplicate post {}", entry.slug);
            report.skipped.push(entry.slug.clone());
            continue;
        }

        let html = match source.fetch_text(&layout.document(&entry.slug)).await {
            Ok(document) => {
                let post = build_post_view(entry, &document, &config, &markdown);
                templates.render_post(&post)?
            }
            Err(e) => {
                tracing::warn!("Failed to load post {}: {}", entry.slug, e);
                report.failed.push(entry.slug.clone());
                templates.render_error(crate::error::ViewError::LoadFailed)?
            }
        };

        let out = folio
            .public_dir
            .join(&config.blog.dir)
            .join(&entry.slug)
            .join("index.html");
        write_page(&out, &html)?;
        report.posts += 1;
    }

    tracing::debug!("Generated in {:.2}s", start.elapsed().as_secs_f64());
    Ok(report)
}

/// A slug is written as one directory under the blog dir
fn is_path_segment(slug: &str) -> bool {
    let mut components = Path::new(slug).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

fn write_page(path: &Path, html: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, html)?;
    tracing::debug!("Wrote {:?}", path);
    Ok(())
}

/// Copy the site's own files (pages, images, the catalog) into public
fn copy_source_assets(folio: &Folio) -> Result<usize> {
    let mut copied = 0;
    let public_dir = folio.public_dir.canonicalize()?;

    let walker = WalkDir::new(&folio.source_dir)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| {
            let hidden = e.depth() > 0 && e.file_name().to_string_lossy().starts_with('.');
            let is_public = e
                .path()
                .canonicalize()
                .map(|p| p == public_dir)
                .unwrap_or(false);
            !hidden && !is_public
        });

    for entry in walker.filter_map(|e| e.ok()) {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let relative = path.strip_prefix(&folio.source_dir).unwrap_or(path);
        if relative == Path::new("_config.yml") {
            continue;
        }

        let dest = folio.public_dir.join(relative);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(path, &dest)?;
        copied += 1;
    }

    Ok(copied)
}
