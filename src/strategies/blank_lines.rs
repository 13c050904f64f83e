//! Remove blank lines — collapses runs of blank lines everywhere, in code
//! and prose alike, and drops blank lines hugging braces.

use super::{ReductionStrategy, StrategyInput, StrategyOutcome};

pub struct RemoveBlankLines;

impl ReductionStrategy for RemoveBlankLines {
    fn name(&self) -> &'static str {
        "remove_blank_lines"
    }

    fn apply(&self, input: &StrategyInput<'_>) -> Option<StrategyOutcome> {
        let text = collapse_blank_lines(input.text);
        if text == input.text {
            return None;
        }
        let tokens = input.estimator.estimate(&text, false);
        Some(StrategyOutcome { text, tokens })
    }
}

/// Collapse runs of two or more blank lines to one, and remove blank lines
/// immediately after a `{` line or before a `}` line.
fn collapse_blank_lines(text: &str) -> String {
    let lines: Vec<&str> = text.split_inclusive('\n').collect();
    let mut out = String::with_capacity(text.len());
    let mut blank_run = 0usize;
    let mut prev_opens_brace = false;

    for line in &lines {
        let stripped = line.trim_end_matches(['\n', '\r']);
        if stripped.trim().is_empty() {
            blank_run += 1;
            continue;
        }

        if blank_run > 0 {
            let next_closes_brace = stripped.trim_start().starts_with('}');
            if !prev_opens_brace && !next_closes_brace {
                out.push('\n');
            }
            blank_run = 0;
        }

        out.push_str(line);
        prev_opens_brace = stripped.trim_end().ends_with('{');
    }

    // A trailing blank run keeps a single newline separator.
    if blank_run > 0 && !out.ends_with("\n\n") {
        // The last content line already carries its own newline (unless the
        // text ended without one).
        if !out.is_empty() && !out.ends_with('\n') {
            out.push('\n');
        }
    }
    out
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
        RemoveBlankLines.apply(&input).map(|o| o.text)
    }

    #[test]
    fn collapses_runs_to_one_blank_line() {
        let text = "a\n\n\n\nb\n";
        assert_eq!(run(text).unwrap(), "a\n\nb\n");
    }

    #[test]
    fn single_blank_lines_survive() {
        let text = "a\n\nb\n";
        assert!(run(text).is_none());
    }

    #[test]
    fn blank_after_open_brace_is_dropped() {
        let text = "fn f() {\n\n    body();\n}\n";
        assert_eq!(run(text).unwrap(), "fn f() {\n    body();\n}\n");
    }

    #[test]
    fn blank_before_close_brace_is_dropped() {
        let text = "fn f() {\n    body();\n\n}\n";
        assert_eq!(run(text).unwrap(), "fn f() {\n    body();\n}\n");
    }

    #[test]
    fn applies_to_prose_and_code_alike() {
        let text = "# Title\n\n\nprose\n\n```js\nlet a;\n\n\nlet b;\n```\n";
        let out = run(text).unwrap();
        assert_eq!(out, "# Title\n\nprose\n\n```js\nlet a;\n\nlet b;\n```\n");
    }

    #[test]
    fn already_compact_is_a_noop() {
        assert!(run("a\nb\nc\n").is_none());
    }
}
