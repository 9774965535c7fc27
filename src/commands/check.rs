//! Check that every catalog entry has exactly one document

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs;
use walkdir::WalkDir;

use crate::content::Catalog;
use crate::Folio;

/// Problems found in the site's blog resources
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckReport {
    /// Catalog slugs without a document
    pub missing: Vec<String>,
    /// Slugs listed more than once
    pub duplicates: Vec<String>,
    /// Documents without a catalog entry
    pub orphans: Vec<String>,
}

impl CheckReport {
    pub fn is_ok(&self) -> bool {
        self.missing.is_empty() && self.duplicates.is_empty() && self.orphans.is_empty()
    }
}

pub fn run(folio: &Folio) -> Result<()> {
    let report = check(folio)?;

    for slug in &report.missing {
        println!("missing document: {}", slug);
    }
    for slug in &report.duplicates {
        println!("duplicate slug: {}", slug);
    }
    for slug in &report.orphans {
        println!("not in catalog: {}", slug);
    }

    if !report.is_ok() {
        anyhow::bail!("Blog check failed");
    }
    println!("Blog check passed.");
    Ok(())
}

pub fn check(folio: &Folio) -> Result<CheckReport> {
    let layout = folio.layout();
    let catalog_path = folio.source_dir.join(layout.catalog());
    let json = fs::read_to_string(&catalog_path)
        .with_context(|| format!("Failed to read {:?}", catalog_path))?;
    let catalog = Catalog::from_json(&json)
        .with_context(|| format!("Invalid catalog {:?}", catalog_path))?;

    let mut report = CheckReport::default();
    let mut seen = HashSet::new();

    for entry in catalog.entries() {
        if !seen.insert(entry.slug.as_str()) {
            if !report.duplicates.contains(&entry.slug) {
                report.duplicates.push(entry.slug.clone());
            }
            continue;
        }
        if !folio.source_dir.join(layout.document(&entry.slug)).is_file() {
            report.missing.push(entry.slug.clone());
        }
    }

    report.orphans = document_slugs(folio)
        .into_iter()
        .filter(|slug| !seen.contains(slug.as_str()))
        .collect();
    report.orphans.sort();

    Ok(report)
}

/// Slugs of all documents matching the post path template
fn document_slugs(folio: &Folio) -> Vec<String> {
    let Some((prefix, suffix)) = folio.config.blog.post_path.split_once("{slug}") else {
        return Vec::new();
    };
    let dir = match prefix.rfind('/') {
        Some(pos) => folio.source_dir.join(&prefix[..pos]),
        None => folio.source_dir.clone(),
    };
    if !dir.is_dir() {
        return Vec::new();
    }

    WalkDir::new(&dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| {
            let relative = e.path().strip_prefix(&folio.source_dir).ok()?;
            let relative = relative.to_string_lossy().replace('\\', "/");
            let slug = relative.strip_prefix(prefix)?.strip_suffix(suffix)?;
            (!slug.is_empty() && !slug.contains('/')).then(|| slug.to_string())
        })
        .collect()
}
