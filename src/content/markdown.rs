//! Markdown rendering with syntax highlighting

use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::highlighted_html_for_string;
use syntect::parsing::{SyntaxReference, SyntaxSet};

use super::detect::detect_language;
use crate::config::{HighlightConfig, MarkdownConfig};
use crate::helpers::html_escape;

const FALLBACK_THEME: &str = "base16-ocean.dark";

/// Link schemes dropped when sanitizing
const UNSAFE_SCHEMES: [&str; 3] = ["javascript:", "vbscript:", "data:"];

/// Markdown renderer with syntax highlighting
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    theme: Option<Theme>,
    markdown: MarkdownConfig,
    line_numbers: bool,
    auto_detect: bool,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer with default settings
    pub fn new() -> Self {
        Self::with_options(&MarkdownConfig::default(), &HighlightConfig::default())
    }

    /// Create with custom settings
    pub fn with_options(markdown: &MarkdownConfig, highlight: &HighlightConfig) -> Self {
        let mut theme_set = ThemeSet::load_defaults();
        let theme = theme_set
            .themes
            .remove(&highlight.theme)
            .or_else(|| {
                tracing::warn!(
                    "Unknown highlight theme {:?}, using {}",
                    highlight.theme,
                    FALLBACK_THEME
                );
                theme_set.themes.remove(FALLBACK_THEME)
            });

        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme,
            markdown: markdown.clone(),
            line_numbers: highlight.line_number,
            auto_detect: highlight.auto_detect,
        }
    }

    fn options(&self) -> Options {
        // YAML metadata blocks stay off, front-matter is handled by FrontMatter::parse()
        let mut options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_HEADING_ATTRIBUTES;
        if self.markdown.gfm {
            options |= Options::ENABLE_GFM;
        }
        if self.markdown.smart_punctuation {
            options |= Options::ENABLE_SMART_PUNCTUATION;
        }
        options
    }

    /// Render markdown to HTML
    pub fn render(&self, markdown: &str) -> String {
        let parser = Parser::new_ext(markdown, self.options());

        let mut events: Vec<Event> = Vec::new();
        // Some(hint) while inside a code block
        let mut code_block: Option<Option<String>> = None;
        let mut code_block_content = String::new();

        for event in parser {
            if code_block.is_some() {
                match event {
                    Event::Text(text) => code_block_content.push_str(&text),
                    Event::End(TagEnd::CodeBlock) => {
                        let hint = code_block.take().flatten();
                        let highlighted = self.highlight_code(&code_block_content, hint.as_deref());
                        events.push(Event::Html(CowStr::from(highlighted)));
                        code_block_content.clear();
                    }
                    _ => {}
                }
                continue;
            }

            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    code_block = Some(match kind {
                        CodeBlockKind::Fenced(info) => language_hint(&info),
                        CodeBlockKind::Indented => None,
                    });
                }
                Event::SoftBreak if self.markdown.breaks => events.push(Event::HardBreak),
                Event::Html(raw) | Event::InlineHtml(raw) if self.markdown.sanitize => {
                    events.push(Event::Text(raw));
                }
                Event::Start(Tag::Link {
                    link_type,
                    dest_url,
                    title,
                    id,
                }) if self.markdown.sanitize => {
                    events.push(Event::Start(Tag::Link {
                        link_type,
                        dest_url: safe_url(dest_url),
                        title,
                        id,
                    }));
                }
                Event::Start(Tag::Image {
                    link_type,
                    dest_url,
                    title,
                    id,
                }) if self.markdown.sanitize => {
                    events.push(Event::Start(Tag::Image {
                        link_type,
                        dest_url: safe_url(dest_url),
                        title,
                        id,
                    }));
                }
                other => events.push(other),
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());
        html_output
    }

    /// Highlight a code block.
    ///
    /// Never fails: an unusable hint falls back to detection, and a failing
    /// highlighter falls back to escaped plain text.
    fn highlight_code(&self, code: &str, hint: Option<&str>) -> String {
        let Some(theme) = &self.theme else {
            return plain_code_block(code, hint.unwrap_or("plaintext"));
        };

        if let Some(lang) = hint {
            match self.find_syntax(lang) {
                Some(syntax) => {
                    match highlighted_html_for_string(code, &self.syntax_set, syntax, theme) {
                        Ok(highlighted) => return self.wrap(&highlighted, lang),
                        Err(e) => {
                            tracing::warn!(
                                "Highlighting as {} failed, detecting language: {}",
                                lang,
                                e
                            )
                        }
                    }
                }
                None => tracing::debug!("Unknown language hint {:?}, detecting language", lang),
            }
        }

        let (syntax, label) = self.detect_syntax(code);
        match highlighted_html_for_string(code, &self.syntax_set, syntax, theme) {
            Ok(highlighted) => self.wrap(&highlighted, &label),
            Err(e) => {
                tracing::warn!("Highlighting failed, emitting plain code: {}", e);
                plain_code_block(code, &label)
            }
        }
    }

    fn find_syntax(&self, lang: &str) -> Option<&SyntaxReference> {
        self.syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
    }

    /// Pick a syntax for code whose language is unknown
    fn detect_syntax(&self, code: &str) -> (&SyntaxReference, String) {
        if self.auto_detect {
            let first_line = code.lines().next().unwrap_or("");
            if let Some(syntax) = self.syntax_set.find_syntax_by_first_line(first_line) {
                return (syntax, syntax_label(syntax));
            }
            if let Some(token) = detect_language(code) {
                if let Some(syntax) = self.syntax_set.find_syntax_by_token(token) {
                    return (syntax, token.to_string());
                }
            }
        }
        (self.syntax_set.find_syntax_plain_text(), "plaintext".to_string())
    }

    fn wrap(&self, highlighted: &str, lang: &str) -> String {
        let lang = html_escape(lang);
        if self.line_numbers {
            add_line_numbers(highlighted, &lang)
        } else {
            format!(r#"<figure class="highlight {}">{}</figure>"#, lang, highlighted)
        }
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// First word of a fence info string, e.g. `rust` for "rust,ignore"
fn language_hint(info: &str) -> Option<String> {
    let lang = info
        .split(|c: char| c.is_whitespace() || c == ',' || c == '{')
        .next()
        .unwrap_or("")
        .trim_start_matches("language-");
    (!lang.is_empty()).then(|| lang.to_string())
}

fn safe_url(url: CowStr<'_>) -> CowStr<'_> {
    let lowered = url.trim().to_ascii_lowercase();
    if UNSAFE_SCHEMES.iter().any(|s| lowered.starts_with(s)) {
        CowStr::from("#")
    } else {
        url
    }
}

fn plain_code_block(code: &str, lang: &str) -> String {
    format!(
        r#"<pre><code class="language-{}">{}</code></pre>"#,
        html_escape(lang),
        html_escape(code)
    )
}

/// Class label for a detected syntax: its primary file extension
fn syntax_label(syntax: &SyntaxReference) -> String {
    match syntax.file_extensions.first() {
        Some(ext) => ext.to_lowercase(),
        None => syntax
            .name
            .to_lowercase()
            .split(|c: char| !c.is_alphanumeric())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join("-"),
    }
}

/// Add line numbers to highlighted code
fn add_line_numbers(code: &str, lang: &str) -> String {
    let lines: Vec<&str> = code.lines().collect();
    let line_count = lines.len();

    let mut gutter = String::new();
    let mut code_lines = String::new();

    for (i, line) in lines.iter().enumerate() {
        gutter.push_str(&format!(r#"<span class="line-number">{}</span>"#, i + 1));
        code_lines.push_str(line);
        if i + 1 < line_count {
            gutter.push('\n');
            code_lines.push('\n');
        }
    }

    format!(
        r#"<figure class="highlight {}"><table><tr><td class="gutter"><pre>{}</pre></td><td class="code">{}</td></tr></table></figure>"#,
        lang, gutter, code_lines
    )
}
