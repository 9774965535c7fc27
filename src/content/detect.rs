//! Heuristic language detection for code blocks without a usable hint

use lazy_static::lazy_static;
use regex::Regex;

struct Rule {
    /// syntect lookup token
    token: &'static str,
    patterns: Vec<Regex>,
}

fn rule(token: &'static str, patterns: &[&str]) -> Rule {
    Rule {
        token,
        patterns: patterns
            .iter()
            .filter_map(|p| Regex::new(p).ok())
            .collect(),
    }
}

lazy_static! {
    static ref RULES: Vec<Rule> = vec![
        rule(
            "rs",
            &[
                r"\bfn\s+\w+\s*[(<]",
                r"\blet\s+mut\b",
                r"(?m)^\s*impl\b",
                r"(?m)^\s*(pub\s+)?(use|mod|struct|enum|trait)\s+\w+",
                r"\w::\w",
                r"\b(println|vec|format|macro_rules)!",
            ],
        ),
        rule(
            "py",
            &[
                r"(?m)^\s*def\s+\w+\s*\(.*\)\s*(->\s*[\w\[\], ]+)?:\s*$",
                r"(?m)^\s*(from\s+[\w.]+\s+)?import\s+\w+",
                r"\bself\.",
                r"(?m)^\s*(elif|except|class\s+\w+.*:)",
                r"\bprint\(",
                r"\b(None|True|False)\b",
            ],
        ),
        rule(
            "js",
            &[
                r"\bfunction\b",
                r"\b(const|let|var)\s+\w+\s*=",
                r"=>",
                r"\bconsole\.\w+\(",
                r"\b(document|window)\.",
                r"\brequire\(|\bmodule\.exports\b",
            ],
        ),
        rule(
            "sh",
            &[
                r"(?m)^\s*\$\s+\w",
                r"^#!.*\b(ba|z)?sh\b",
                r"(?m)^\s*(echo|sudo|apt(-get)?|export|cd|brew|curl|cargo|npm)\s",
                r"\|\s*(grep|sed|awk|xargs|sort)\b",
            ],
        ),
        rule(
            "json",
            &[
                r#"^\s*[\[{]"#,
                r#""[\w-]+"\s*:\s*"#,
                r#"(?m)^\s*[}\]],?\s*$"#,
            ],
        ),
        rule(
            "html",
            &[
                r"(?i)<!DOCTYPE\s+html>",
                r"</?(html|head|body|div|span|p|a|ul|li|script|section)\b[^>]*>",
            ],
        ),
        rule(
            "css",
            &[
                r"(?m)^\s*[.#]?[\w-]+(\s*[>+~,]?\s*[.#]?[\w-]+)*\s*\{\s*$",
                r"(?m)^\s*[\w-]+\s*:\s*[^;{}]+;\s*$",
            ],
        ),
        rule(
            "go",
            &[
                r"(?m)^package\s+\w+",
                r"\bfunc\s+(\(\w+\s+\*?\w+\)\s*)?\w+\(",
                r":=",
                r"\bfmt\.\w+",
            ],
        ),
        rule(
            "c",
            &[r"(?m)^#include\s*[<\x22]", r"\bint\s+main\s*\(", r"\bprintf\("],
        ),
        rule(
            "sql",
            &[
                r"(?is)\bselect\b.+\bfrom\b",
                r"(?i)\b(insert\s+into|create\s+table|update\s+\w+\s+set|delete\s+from)\b",
            ],
        ),
    ];
}

/// Guess the language of a code snippet.
///
/// Returns the syntect token of the best scoring language, `None` when no
/// rule matches. Ties go to the rule listed first.
pub fn detect_language(code: &str) -> Option<&'static str> {
    let mut best: Option<(&'static str, usize)> = None;

    for rule in RULES.iter() {
        let score = rule.patterns.iter().filter(|re| re.is_match(code)).count();
        if score == 0 {
            continue;
        }
        match best {
            Some((_, top)) if top >= score => {}
            _ => best = Some((rule.token, score)),
        }
    }

    best.map(|(token, _)| token)
}
