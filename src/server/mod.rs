//! Development server
//!
//! Renders the listing and post pages on each request, the way the browser
//! would on the deployed site, and serves every other file from the source
//! directory.

use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::content::MarkdownRenderer;
use crate::error::ViewError;
use crate::helpers::{list_url, url_for};
use crate::render::{ListRenderer, ListView, PostRenderer};
use crate::source::FsSource;
use crate::templates::TemplateRenderer;
use crate::Folio;

/// Server state, shared read-only by all requests
struct ServerState {
    folio: Folio,
    source: FsSource,
    markdown: MarkdownRenderer,
    templates: TemplateRenderer,
}

#[derive(Debug, Deserialize)]
struct PostQuery {
    slug: Option<String>,
}

/// Build the router for a site
pub fn router(folio: &Folio) -> Result<Router> {
    let config = &folio.config;
    let state = Arc::new(ServerState {
        folio: folio.clone(),
        source: folio.source(),
        markdown: folio.markdown(),
        templates: TemplateRenderer::new(config)?,
    });

    let list_path = list_url(config);
    let list_page_path = url_for(config, &config.blog.list_page);
    let post_page_path = url_for(config, &config.blog.post_page);
    // Directory-style links only, so files under the blog dir reach ServeDir
    let slug_path = url_for(config, &format!("{}/:slug/", config.blog.dir));

    let mut app = Router::new()
        .route(&list_page_path, get(list_handler))
        .route(&post_page_path, get(post_handler))
        .route(&slug_path, get(slug_handler));
    if list_path != list_page_path {
        app = app.route(&list_path, get(list_handler));
    }

    let app = app
        .fallback_service(ServeDir::new(&folio.source_dir).append_index_html_on_directories(true))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}

/// Start the server
pub async fn start(folio: &Folio, ip: &str, port: u16, open: bool) -> Result<()> {
    let app = router(folio)?;

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    let url = format!("http://{}:{}{}", ip, port, list_url(&folio.config));
    println!("Server running at {}", url);
    println!("Press Ctrl+C to stop.");

    if open {
        if let Err(e) = open_browser(&url) {
            tracing::warn!("Failed to open browser: {}", e);
        }
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn list_handler(State(state): State<Arc<ServerState>>) -> Response {
    let view = ListRenderer::new(&state.source, &state.folio.config)
        .render()
        .await;
    let status = match view {
        ListView::Error { .. } => StatusCode::BAD_GATEWAY,
        _ => StatusCode::OK,
    };
    page(status, state.templates.render_list(&view))
}

async fn post_handler(
    State(state): State<Arc<ServerState>>,
    Query(query): Query<PostQuery>,
) -> Response {
    render_post(&state, query.slug.as_deref()).await
}

async fn slug_handler(State(state): State<Arc<ServerState>>, Path(slug): Path<String>) -> Response {
    render_post(&state, Some(&slug)).await
}

async fn render_post(state: &ServerState, slug: Option<&str>) -> Response {
    let outcome = PostRenderer::new(&state.source, &state.folio.config, &state.markdown)
        .render(slug)
        .await;

    let status = match outcome.result {
        Ok(_) => StatusCode::OK,
        Err(ViewError::LoadFailed) => StatusCode::BAD_GATEWAY,
        Err(_) => StatusCode::NOT_FOUND,
    };
    page(status, state.templates.render_outcome(&outcome))
}

fn page(status: StatusCode, html: Result<String>) -> Response {
    match html {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            tracing::error!("Template error: {:#}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Template error").into_response()
        }
    }
}

/// Open a URL in the default browser
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(url).spawn()?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(url).spawn()?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/c", "start", url])
            .spawn()?;
    }

    Ok(())
}
