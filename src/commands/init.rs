//! Initialize a new site

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::content::{Catalog, CatalogEntry};
use crate::helpers::read_time;

const CONFIG_TEMPLATE: &str = r#"# Site
title: Portfolio
description: ''
author: ''

# URL
url: http://example.com
root: /

# Directory
source_dir: .
public_dir: public

# Date format (Moment.js style)
date_format: MMMM D, YYYY

blog:
  dir: blog
  catalog_path: blog/posts.json
  post_path: blog/posts/{slug}.md
  list_page: blog/index.html
  post_page: blog/post.html
  title_suffix: ' | Blog'
  empty_message: No posts yet.
  words_per_minute: 200

markdown:
  breaks: true
  gfm: true
  smart_punctuation: false
  sanitize: true

highlight:
  theme: base16-ocean.dark
  line_number: false
  auto_detect: true
"#;

const SAMPLE_BODY: &str = r#"Welcome to the blog! This post lives in `blog/posts/hello-world.md`,
and its summary is listed in `blog/posts.json`.

## Writing a post

```bash
$ folio new "My New Post" --tags rust,notes
```

Front-matter at the top of a post overrides the catalog entry:

```
---
title: A better title
tags: [rust, notes]
canonical: https://example.com/original
---
```

## Previewing

```bash
$ folio server
```
"#;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    let posts_dir = target_dir.join("blog/posts");
    fs::create_dir_all(&posts_dir)?;

    let config_path = target_dir.join("_config.yml");
    if config_path.exists() {
        anyhow::bail!("Site already initialized: {:?}", config_path);
    }
    fs::write(&config_path, CONFIG_TEMPLATE)?;

    let today = chrono::Local::now().format("%Y-%m-%d").to_string();
    let sample_post = format!(
        "---\ntitle: Hello World\ndate: {}\ntags: [meta]\n---\n\n{}",
        today, SAMPLE_BODY
    );
    fs::write(posts_dir.join("hello-world.md"), sample_post)?;

    let catalog = Catalog::new(vec![CatalogEntry {
        slug: "hello-world".to_string(),
        title: "Hello World".to_string(),
        description: "The first post on this blog.".to_string(),
        date: today,
        read_time: read_time(SAMPLE_BODY, 200),
        tags: vec!["meta".to_string()],
    }]);
    fs::write(target_dir.join("blog/posts.json"), catalog.to_json_pretty()?)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;

    #[test]
    fn test_init_site() {
        let dir = tempfile::tempdir().unwrap();
        init_site(dir.path()).unwrap();

        let config = SiteConfig::load(dir.path().join("_config.yml")).unwrap();
        assert_eq!(config.blog.post_path, "blog/posts/{slug}.md");
        assert_eq!(config.blog.title_suffix, " | Blog");

        let json = fs::read_to_string(dir.path().join("blog/posts.json")).unwrap();
        let catalog = Catalog::from_json(&json).unwrap();
        assert!(catalog.contains("hello-world"));
        assert!(dir.path().join("blog/posts/hello-world.md").exists());
    }

    #[test]
    fn test_init_twice_fails() {
        let dir = tempfile::tempdir().unwrap();
        init_site(dir.path()).unwrap();
        assert!(init_site(dir.path()).is_err());
    }
}
