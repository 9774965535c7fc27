//! Create a new post

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

use crate::content::{Catalog, CatalogEntry};
use crate::helpers::read_time;
use crate::Folio;

/// Details for a new post
#[derive(Debug, Clone, Default)]
pub struct NewPost {
    pub title: String,
    pub slug: Option<String>,
    pub description: String,
    pub tags: Vec<String>,
}

/// Write the post document and add its catalog entry.
///
/// Returns the path of the new document.
pub fn create_post(folio: &Folio, post: &NewPost) -> Result<PathBuf> {
    let slug = post
        .slug
        .clone()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| slug::slugify(&post.title));
    if slug.is_empty() {
        anyhow::bail!("Cannot derive a slug from title {:?}", post.title);
    }

    let layout = folio.layout();
    let catalog_path = folio.source_dir.join(layout.catalog());
    let mut catalog = if catalog_path.exists() {
        let json = fs::read_to_string(&catalog_path)?;
        Catalog::from_json(&json).with_context(|| format!("Invalid catalog {:?}", catalog_path))?
    } else {
        Catalog::default()
    };

    if catalog.contains(&slug) {
        anyhow::bail!("Slug already in catalog: {}", slug);
    }

    let file_path = folio.source_dir.join(layout.document(&slug));
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let now = chrono::Local::now();
    let date = now.format("%Y-%m-%d").to_string();
    let body = format!("Write about {} here.\n", post.title);

    let content = format!(
        "---\ntitle: \"{}\"\ndate: {}\ntags: [{}]\n---\n\n{}",
        post.title.replace('"', "'"),
        date,
        post.tags.join(", "),
        body
    );

    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&file_path, content)?;

    catalog.push(CatalogEntry {
        slug: slug.clone(),
        title: post.title.clone(),
        description: post.description.clone(),
        date,
        read_time: read_time(&body, folio.config.blog.words_per_minute),
        tags: post.tags.clone(),
    });
    if let Some(parent) = catalog_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&catalog_path, catalog.to_json_pretty()?)?;

    tracing::info!("Added {} to {:?}", slug, catalog_path);
    Ok(file_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{FrontMatter, FrontValue};

    #[test]
    fn test_create_post() {
        let dir = tempfile::tempdir().unwrap();
        let folio = Folio::new(dir.path()).unwrap();

        let post = NewPost {
            title: "My New Post".to_string(),
            description: "About things".to_string(),
            tags: vec!["rust".to_string(), "notes".to_string()],
            ..Default::default()
        };
        let path = create_post(&folio, &post).unwrap();
        assert!(path.ends_with("blog/posts/my-new-post.md"));

        let document = fs::read_to_string(&path).unwrap();
        let (fm, _) = FrontMatter::parse(&document);
        assert_eq!(fm.get("title"), Some(&FrontValue::from("My New Post")));
        assert_eq!(
            fm.get("tags"),
            Some(&FrontValue::List(vec!["rust".to_string(), "notes".to_string()]))
        );

        let json = fs::read_to_string(dir.path().join("blog/posts.json")).unwrap();
        let catalog = Catalog::from_json(&json).unwrap();
        let entry = catalog.find("my-new-post").unwrap();
        assert_eq!(entry.description, "About things");
        assert_eq!(entry.read_time, "1 min read");
    }

    #[test]
    fn test_duplicate_slug_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let folio = Folio::new(dir.path()).unwrap();
        let post = NewPost {
            title: "Same".to_string(),
            ..Default::default()
        };

        create_post(&folio, &post).unwrap();
        assert!(create_post(&folio, &post).is_err());
    }

    #[test]
    fn test_explicit_slug() {
        let dir = tempfile::tempdir().unwrap();
        let folio = Folio::new(dir.path()).unwrap();
        let post = NewPost {
            title: "Whatever".to_string(),
            slug: Some("custom".to_string()),
            ..Default::default()
        };

        let path = create_post(&folio, &post).unwrap();
        assert!(path.ends_with("blog/posts/custom.md"));
    }
}
