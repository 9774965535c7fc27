//! Render a single post page to stdout

use anyhow::Result;

use crate::render::{PostRenderer, PostState};
use crate::source::{HttpSource, ResourceSource};
use crate::templates::TemplateRenderer;
use crate::Folio;

/// Render the page for `slug`, reading resources locally or from `remote`.
///
/// A post that fails to render still produces the error page; the returned
/// state tells the two apart.
pub async fn render_page(
    folio: &Folio,
    slug: &str,
    remote: Option<&str>,
) -> Result<(PostState, String)> {
    let source: Box<dyn ResourceSource> = match remote {
        Some(base_url) => Box::new(HttpSource::new(base_url)),
        None => Box::new(folio.source()),
    };

    let markdown = folio.markdown();
    let templates = TemplateRenderer::new(&folio.config)?;

    let outcome = PostRenderer::new(source.as_ref(), &folio.config, &markdown)
        .render(Some(slug))
        .await;
    let html = templates.render_outcome(&outcome)?;

    Ok((outcome.state(), html))
}

pub async fn run(folio: &Folio, slug: &str, remote: Option<&str>) -> Result<()> {
    let (state, html) = render_page(folio, slug, remote).await?;
    println!("{}", html);

    if state == PostState::Error {
        anyhow::bail!("Post {} could not be rendered", slug);
    }
    Ok(())
}
