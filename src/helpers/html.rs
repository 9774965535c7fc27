//! HTML and text helper functions

/// Escape HTML special characters
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Truncate a string to a maximum length
pub fn truncate(s: &str, length: usize, omission: Option<&str>) -> String {
    let omission = omission.unwrap_or("...");

    if s.chars().count() <= length {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(length).collect();
        format!("{}{}", truncated.trim_end(), omission)
    }
}

/// Count words in plain or markdown text
pub fn word_count(s: &str) -> usize {
    s.split_whitespace()
        .filter(|w| w.chars().any(char::is_alphanumeric))
        .count()
}

/// Estimated reading time label, at least one minute
pub fn read_time(s: &str, words_per_minute: usize) -> String {
    let wpm = words_per_minute.max(1);
    let minutes = word_count(s).div_ceil(wpm).max(1);
    format!("{} min read", minutes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape("<a href=\"x\">Tom & 'Jerry'</a>"),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Hello World", 5, None), "Hello...");
        assert_eq!(truncate("Hi", 5, None), "Hi");
    }

    #[test]
    fn test_read_time() {
        assert_eq!(word_count("one two -- three"), 3);
        assert_eq!(read_time("", 200), "1 min read");
        let text = "word ".repeat(450);
        assert_eq!(read_time(&text, 200), "3 min read");
    }
}
