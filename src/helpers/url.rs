//! URL helper functions

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::config::SiteConfig;

/// Characters escaped in a query value; unreserved URL characters pass through
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Generate a URL with the root path
///
/// # Examples
/// ```ignore
/// url_for(&config, "/blog/index.html") // -> "/portfolio/blog/index.html"
/// ```
pub fn url_for(config: &SiteConfig, path: &str) -> String {
    let root = config.root.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", root)
    } else {
        format!("{}/{}", root, path)
    }
}

/// Encode a value for use inside a query string
pub fn encode_query_value(value: &str) -> String {
    utf8_percent_encode(value, QUERY_VALUE).to_string()
}

/// Link to the detail view of a post
pub fn post_url(config: &SiteConfig, slug: &str) -> String {
    if config.blog.static_links {
        return url_for(config, &format!("{}/{}/", config.blog.dir, encode_query_value(slug)));
    }
    format!(
        "{}?slug={}",
        url_for(config, &config.blog.post_page),
        encode_query_value(slug)
    )
}

/// Link to the listing page
pub fn list_url(config: &SiteConfig) -> String {
    let url = url_for(config, &config.blog.list_page);
    match url.strip_suffix("index.html") {
        Some(dir) => dir.to_string(),
        None => url,
    }
}
