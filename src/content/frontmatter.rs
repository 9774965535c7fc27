//! Front-matter parsing
//!
//! Documents may start with a header block:
//!
//! ```text
//! ---
//! title: Hello
//! tags: [rust, web]
//! ---
//! body...
//! ```
//!
//! The reader is line oriented: one `key: value` pair per line, values are
//! plain text or a bracketed, comma separated list. Escaped commas and
//! nested brackets are not supported.

use super::metadata::{FrontValue, Metadata};

/// Marker line opening and closing the header block
pub const DELIMITER: &str = "---";

/// Front-matter data parsed from a document header
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontMatter {
    /// Parsed key/value pairs, in document order
    pub fields: Metadata,
    /// Whether a complete header block was present
    pub found: bool,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    ///
    /// Without a well formed header the fields are empty and the whole input
    /// is returned as body. The body is always a sub-slice of the input.
    pub fn parse(content: &str) -> (Self, &str) {
        let mut lines = content.split_inclusive('\n');

        match lines.next() {
            Some(first) if is_delimiter(first) => {
                let mut offset = first.len();
                let mut header = Vec::new();

                for line in lines {
                    offset += line.len();
                    if is_delimiter(line) {
                        let fm = Self {
                            fields: parse_fields(&header),
                            found: true,
                        };
                        return (fm, &content[offset..]);
                    }
                    header.push(line);
                }

                // No closing delimiter
                (Self::default(), content)
            }
            _ => (Self::default(), content),
        }
    }

    pub fn get(&self, key: &str) -> Option<&FrontValue> {
        self.fields.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

fn is_delimiter(line: &str) -> bool {
    line.trim_end() == DELIMITER
}

fn parse_fields(lines: &[&str]) -> Metadata {
    let mut fields = Metadata::new();

    for line in lines {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        fields.insert(key.to_string(), parse_value(value));
    }

    fields
}

fn parse_value(raw: &str) -> FrontValue {
    let raw = raw.trim();

    // A quoted value is always text, even if it looks like a list
    if let Some(inner) = unquote(raw) {
        return FrontValue::Text(inner.to_string());
    }

    if let Some(inner) = raw.strip_prefix('[').and_then(|r| r.strip_suffix(']')) {
        let items = inner
            .split(',')
            .map(|item| {
                let item = item.trim();
                unquote(item).unwrap_or(item).trim().to_string()
            })
            .filter(|item| !item.is_empty())
            .collect();
        return FrontValue::List(items);
    }

    FrontValue::Text(raw.to_string())
}

/// Strip one matching pair of surrounding quotes
fn unquote(s: &str) -> Option<&str> {
    let quoted = s.len() >= 2
        && ((s.starts_with('"') && s.ends_with('"')) || (s.starts_with('\'') && s.ends_with('\'')));
    quoted.then(|| &s[1..s.len() - 1])
}
