//! Trim comments — strips comment lines out of fenced code spans.
//!
//! A leading documentation comment is not discarded outright: its first
//! meaningful line survives as a one-line `//` summary, since the doc
//! header usually carries the only prose worth keeping from a code excerpt.

use regex::Regex;

use super::{find_code_spans, rewrite_spans, ReductionStrategy, StrategyInput, StrategyOutcome};

/// Spans shorter than this are not worth touching.
const MIN_SPAN_CHARS: usize = 100;

/// Languages whose `#` lines are comments (as opposed to C preprocessor
/// directives or Markdown headings).
const HASH_COMMENT_LANGS: &[&str] = &[
    "python", "py", "ruby", "rb", "sh", "bash", "shell", "zsh", "yaml", "yml", "toml", "perl",
];

pub struct TrimComments;

impl ReductionStrategy for TrimComments {
    fn name(&self) -> &'static str {
        "trim_comments"
    }

    fn apply(&self, input: &StrategyInput<'_>) -> Option<StrategyOutcome> {
        let spans = find_code_spans(input.text);
        if spans.is_empty() {
            return None;
        }

        let mut changed = false;
        let text = rewrite_spans(input.text, &spans, |span| {
            if span.content_len() < MIN_SPAN_CHARS {
                return None;
            }
            let content = span.content(input.text);
            let stripped = strip_comments(content, span.language.as_deref());
            if stripped == content {
                None
            } else {
                changed = true;
                Some(stripped)
            }
        });

        if !changed {
            return None;
        }
        let tokens = input.estimator.estimate(&text, false);
        Some(StrategyOutcome { text, tokens })
    }
}

/// Remove comment lines from one span's content, keeping a one-line summary
/// of a leading doc comment when one exists.
fn strip_comments(content: &str, language: Option<&str>) -> String {
    let hash_comments = language.map(|l| HASH_COMMENT_LANGS.contains(&l)).unwrap_or(false);

    let doc_summary = leading_doc_summary(content);
    let mut out = String::with_capacity(content.len());
    if let Some(summary) = &doc_summary {
        out.push_str("// ");
        out.push_str(summary);
        out.push('\n');
    }

    let mut in_block = false;
    for line in content.split_inclusive('\n') {
        let trimmed = line.trim_end_matches(['\n', '\r']).trim_start();

        if in_block {
            if trimmed.contains("*/") {
                in_block = false;
            }
            continue;
        }
        if trimmed.starts_with("/*") {
            if !trimmed.contains("*/") {
                in_block = true;
            }
            continue;
        }
        if trimmed.starts_with("//") {
            continue;
        }
        if hash_comments && trimmed.starts_with('#') && !trimmed.starts_with("#!") {
            continue;
        }

        out.push_str(&strip_trailing_comment(line));
    }
    out
}

/// First meaningful line of a leading `/** */`, `///` or `//!` doc comment.
fn leading_doc_summary(content: &str) -> Option<String> {
    let first = content.lines().find(|l| !l.trim().is_empty())?;
    let trimmed = first.trim_start();
    if !(trimmed.starts_with("/**") || trimmed.starts_with("///") || trimmed.starts_with("//!")) {
        return None;
    }

    for line in content.lines() {
        let cleaned = line
            .trim()
            .trim_start_matches("/**")
            .trim_start_matches("//!")
            .trim_start_matches("///")
            .trim_start_matches('*')
            .trim_end_matches("*/")
            .trim();
        if cleaned.chars().any(char::is_alphanumeric) {
            return Some(cleaned.to_string());
        }
        // The doc header ended before any prose.
        if line.trim().ends_with("*/") {
            break;
        }
    }
    None
}

/// Strip a trailing `// ...` comment, leaving URLs (`://`) alone.
fn strip_trailing_comment(line: &str) -> String {
    if let Ok(re) = Regex::new(r"^(.*?\S)\s+//[^/].*$") {
        if !line.contains("://") {
            if let Some(caps) = re.captures(line.trim_end_matches(['\n', '\r'])) {
                let mut kept = caps[1].to_string();
                if line.ends_with('\n') {
                    kept.push('\n');
                }
                return kept;
            }
        }
    }
    line.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimator::TokenEstimator;

    fn run(text: &str) -> Option<String> {
        let est = TokenEstimator::default();
        let input = StrategyInput {
            text,
            sections: &[],
            tokens_before: est.estimate(text, false),
            token_budget: 0,
            estimator: &est,
        };
        TrimComments.apply(&input).map(|o| o.text)
    }

    #[test]
    fn removes_line_comments_from_large_span() {
        let mut code = String::from("```js\n");
        for i in 0..10 {
            code.push_str(&format!("// comment number {}\nconst v{} = {};\n", i, i, i));
        }
        code.push_str("```\n");
        let out = run(&code).expect("should reduce");
        assert!(!out.contains("// comment number"));
        assert!(out.contains("const v3 = 3;"));
    }

    #[test]
    fn keeps_leading_doc_comment_summary() {
        let code = "```ts\n/**\n * Parses the manifest file and validates entries.\n * @param path - file path\n */\nexport function parse(path) {\n  return read(path);\n}\n// trailing note\nconst x = 1;\n```\n";
        let out = run(code).expect("should reduce");
        assert!(out.contains("// Parses the manifest file and validates entries."));
        assert!(!out.contains("@param"));
        assert!(!out.contains("trailing note"));
    }

    #[test]
    fn skips_small_spans() {
        let code = "```js\n// tiny\nconst x = 1;\n```\n";
        assert!(run(code).is_none());
    }

    #[test]
    fn strips_block_comments() {
        let code = format!(
            "```c\n/* a\n   multi line\n   block */\nint main() {{ return 0; }}\n{}```\n",
            "int pad = 0;\n".repeat(8)
        );
        let out = run(&code).expect("should reduce");
        assert!(!out.contains("multi line"));
        assert!(out.contains("int main()"));
    }

    #[test]
    fn hash_comments_only_for_hash_languages() {
        let py = format!(
            "```python\n# a python comment\nx = 1\n{}```\n",
            "y = 2\n".repeat(15)
        );
        let out = run(&py).expect("should reduce");
        assert!(!out.contains("a python comment"));

        // In C, `#include` must survive even in a big span.
        let c = format!(
            "```c\n#include <stdio.h>\n// drop me\nint x;\n{}```\n",
            "int pad;\n".repeat(12)
        );
        let out = run(&c).expect("should reduce");
        assert!(out.contains("#include <stdio.h>"));
        assert!(!out.contains("drop me"));
    }

    #[test]
    fn trailing_comment_stripped_but_urls_kept() {
        let code = format!(
            "```js\nconst a = 1; // inline note\nconst u = \"https://example.com\";\n{}```\n",
            "let pad = 0;\n".repeat(10)
        );
        let out = run(&code).expect("should reduce");
        assert!(!out.contains("inline note"));
        assert!(out.contains("https://example.com"));
    }

    #[test]
    fn no_comments_is_a_noop() {
        let code = format!("```js\n{}```\n", "const v = 1;\n".repeat(12));
        assert!(run(&code).is_none());
    }
}
