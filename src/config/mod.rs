//! Configuration module

mod site;

pub use site::BlogConfig;
pub use site::HighlightConfig;
pub use site::MarkdownConfig;
pub use site::SiteConfig;
