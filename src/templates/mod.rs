//! Built-in blog templates using Tera template engine
//!
//! This is the display side of the renderers: list and post view models go
//! in, complete HTML pages come out. Templates are embedded in the binary.

use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::config::SiteConfig;
use crate::error::ViewError;
use crate::helpers::{html_escape, list_url, truncate, url_for};
use crate::render::{ListView, PostOutcome, PostView};

/// Template renderer with the embedded blog templates
pub struct TemplateRenderer {
    tera: Tera,
    site: SiteData,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new(config: &SiteConfig) -> Result<Self> {
        let mut tera = Tera::default();

        // Escape markup but leave `/` alone so paths stay readable
        tera.set_escape_fn(html_escape);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("blog/layout.html")),
            ("list.html", include_str!("blog/list.html")),
            ("post.html", include_str!("blog/post.html")),
            ("error.html", include_str!("blog/error.html")),
        ])?;

        tera.register_filter("truncate_chars", truncate_chars_filter);

        Ok(Self {
            tera,
            site: SiteData::from_config(config),
        })
    }

    /// Render the listing page
    pub fn render_list(&self, view: &ListView) -> Result<String> {
        let mut context = self.base_context();
        context.insert("view", view);
        Ok(self.tera.render("list.html", &context)?)
    }

    /// Render a post page
    pub fn render_post(&self, post: &PostView) -> Result<String> {
        let mut context = self.base_context();
        context.insert("post", post);
        Ok(self.tera.render("post.html", &context)?)
    }

    /// Render the uniform error page
    pub fn render_error(&self, error: ViewError) -> Result<String> {
        let mut context = self.base_context();
        context.insert(
            "error",
            &ErrorData {
                message: error.to_string(),
                code: error.code(),
            },
        );
        Ok(self.tera.render("error.html", &context)?)
    }

    /// Render whichever page a post outcome calls for
    pub fn render_outcome(&self, outcome: &PostOutcome) -> Result<String> {
        match &outcome.result {
            Ok(post) => self.render_post(post),
            Err(e) => self.render_error(*e),
        }
    }

    fn base_context(&self) -> Context {
        let mut context = Context::new();
        context.insert("site", &self.site);
        context
    }
}

/// Tera filter: truncate by character count
fn truncate_chars_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("truncate_chars", "value", String, value);
    let length = match args.get("length") {
        Some(val) => tera::try_get_value!("truncate_chars", "length", usize, val),
        None => 150,
    };
    let omission = match args.get("omission") {
        Some(val) => tera::try_get_value!("truncate_chars", "omission", String, val),
        None => "...".to_string(),
    };

    Ok(tera::Value::String(truncate(&s, length, Some(&omission))))
}

/// Site-wide template data
#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub title: String,
    pub description: String,
    pub author: String,
    pub root: String,
    pub list_url: String,
}

impl SiteData {
    pub fn from_config(config: &SiteConfig) -> Self {
        Self {
            title: config.title.clone(),
            description: config.description.clone(),
            author: config.author.clone(),
            root: url_for(config, ""),
            list_url: list_url(config),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
struct ErrorData {
    message: String,
    code: &'static str,
}
