//! Reduce indentation — collapses the indent unit of code spans to one
//! space per nesting level.
//!
//! Detects the prevailing unit (smallest non-zero indent width, tabs
//! counted as 4) and remaps every line's depth. Spans with at most one
//! distinct indent level have nothing to gain and are skipped.

use super::{find_code_spans, rewrite_spans, ReductionStrategy, StrategyInput, StrategyOutcome};

const TAB_WIDTH: usize = 4;

pub struct ReduceIndentation;

impl ReductionStrategy for ReduceIndentation {
    fn name(&self) -> &'static str {
        "reduce_indentation"
    }

    fn apply(&self, input: &StrategyInput<'_>) -> Option<StrategyOutcome> {
        let spans = find_code_spans(input.text);
        if spans.is_empty() {
            return None;
        }

        let mut changed = false;
        let text = rewrite_spans(input.text, &spans, |span| {
            let content = span.content(input.text);
            let reduced = reduce_indent(content)?;
            if reduced == content {
                None
            } else {
                changed = true;
                Some(reduced)
            }
        });

        if !changed {
            return None;
        }
        let tokens = input.estimator.estimate(&text, false);
        Some(StrategyOutcome { text, tokens })
    }
}

/// Width of a line's leading whitespace, tabs expanded.
fn indent_width(line: &str) -> usize {
    let mut width = 0;
    for ch in line.chars() {
        match ch {
            ' ' => width += 1,
            '\t' => width += TAB_WIDTH,
            _ => break,
        }
    }
    width
}

/// Remap indentation to one space per level, or `None` when the span has
/// one or fewer distinct non-zero indent levels.
fn reduce_indent(content: &str) -> Option<String> {
    let mut levels: Vec<usize> = content
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(indent_width)
        .filter(|&w| w > 0)
        .collect();
    levels.sort_unstable();
    levels.dedup();
    if levels.len() <= 1 {
        return None;
    }
    let unit = levels[0];

    let mut out = String::with_capacity(content.len());
    for line in content.split_inclusive('\n') {
        let body = line.trim_start_matches([' ', '\t']);
        if body.trim_end_matches(['\n', '\r']).is_empty() {
            out.push_str(body);
            continue;
        }
        let depth = indent_width(line) / unit;
        for _ in 0..depth {
            out.push(' ');
        }
        out.push_str(body);
    }
    Some(out)
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
        ReduceIndentation.apply(&input).map(|o| o.text)
    }

    #[test]
    fn collapses_four_space_indent_to_one() {
        let code = "```python\ndef f():\n    if x:\n        return 1\n    return 0\n```\n";
        let out = run(code).expect("should reduce");
        assert!(out.contains("\n if x:\n"));
        assert!(out.contains("\n  return 1\n"));
        assert!(out.contains("\n return 0\n"));
    }

    #[test]
    fn tabs_count_as_four_spaces() {
        let code = "```go\nfunc f() {\n\tif x {\n\t\treturn\n\t}\n}\n```\n";
        let out = run(code).expect("should reduce");
        assert!(out.contains("\n if x {\n"));
        assert!(out.contains("\n  return\n"));
    }

    #[test]
    fn single_indent_level_is_skipped() {
        let code = "```js\nfunction f() {\n  return 1;\n}\n```\n";
        assert!(run(code).is_none());
    }

    #[test]
    fn flat_code_is_skipped() {
        let code = "```js\nconst a = 1;\nconst b = 2;\n```\n";
        assert!(run(code).is_none());
    }

    #[test]
    fn blank_lines_keep_no_indent() {
        let code = "```python\ndef f():\n    a = 1\n\n        b = 2\n```\n";
        let out = run(code).expect("should reduce");
        assert!(out.contains("\n a = 1\n\n  b = 2\n"));
    }
}
