//! Shorten paths — compacts long multi-segment paths found in fenced-block
//! header lines, then replaces every literal occurrence document-wide.

use regex::Regex;

use super::{find_code_spans, ReductionStrategy, StrategyInput, StrategyOutcome};

/// Paths shorter than this aren't worth shortening.
const MIN_PATH_CHARS: usize = 30;

/// Paths with fewer segments than this are left alone.
const MIN_SEGMENTS: usize = 3;

/// Segments longer than this get truncated in the 3-segment form.
const MAX_SEGMENT_CHARS: usize = 12;

pub struct ShortenPaths;

impl ReductionStrategy for ShortenPaths {
    fn name(&self) -> &'static str {
        "shorten_paths"
    }

    fn apply(&self, input: &StrategyInput<'_>) -> Option<StrategyOutcome> {
        let spans = find_code_spans(input.text);
        if spans.is_empty() {
            return None;
        }

        let re = Regex::new(r"[/\\]?[A-Za-z0-9_.@\-]+(?:[/\\][A-Za-z0-9_.@\-]+)+").ok()?;

        // Candidates come from block header lines only.
        let mut candidates: Vec<String> = Vec::new();
        for span in &spans {
            let Some(header) = span.content(input.text).lines().next() else {
                continue;
            };
            for m in re.find_iter(header) {
                let path = m.as_str().to_string();
                if !candidates.contains(&path) {
                    candidates.push(path);
                }
            }
        }

        let mut text = input.text.to_string();
        let mut changed = false;
        for path in &candidates {
            if let Some(short) = shorten_path(path) {
                if short != *path && text.contains(path.as_str()) {
                    text = text.replace(path.as_str(), &short);
                    changed = true;
                }
            }
        }
        if !changed {
            return None;
        }
        let tokens = input.estimator.estimate(&text, false);
        Some(StrategyOutcome { text, tokens })
    }
}

/// Shorten one path, or `None` when it is too short to qualify.
///
/// Four or more segments collapse to `first/.../last-three`; exactly three
/// segments get per-segment truncation instead.
fn shorten_path(path: &str) -> Option<String> {
    let rooted = path.starts_with('/') || path.starts_with('\\');
    if path.len() < MIN_PATH_CHARS {
        return None;
    }
    let segments: Vec<&str> = path.split(['/', '\\']).filter(|s| !s.is_empty()).collect();
    if segments.len() < MIN_SEGMENTS {
        return None;
    }

    let prefix = if rooted { "/" } else { "" };
    if segments.len() >= 4 {
        let tail = &segments[segments.len() - 3..];
        return Some(format!("{}{}/.../{}", prefix, segments[0], tail.join("/")));
    }

    let truncated: Vec<String> = segments
        .iter()
        .map(|seg| {
            if seg.len() > MAX_SEGMENT_CHARS {
                format!("{}..", &seg[..MAX_SEGMENT_CHARS - 2])
            } else {
                (*seg).to_string()
            }
        })
        .collect();
    Some(format!("{}{}", prefix, truncated.join("/")))
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
        ShortenPaths.apply(&input).map(|o| o.text)
    }

    #[test]
    fn four_segment_path_keeps_first_and_last_three() {
        // 45 chars, 4 segments.
        let path = "/verylongprojectname/src/services/handler.ts";
        assert_eq!(path.len(), 45);
        let text = format!("```ts\n// {}\nconst x = require('{}');\n```\n", path, path);
        let out = run(&text).expect("should shorten");
        let short = "/verylongprojectname/.../src/services/handler.ts";
        assert_eq!(out.matches(path).count(), 0, "original path must be gone");
        assert!(out.contains(short));
        // Both literal occurrences were replaced.
        assert_eq!(out.matches(short).count(), 2);
    }

    #[test]
    fn many_segment_path_shrinks() {
        let path = "packages/server/src/modules/auth/session/store.ts";
        let text = format!("```ts\n// {}\nbody();\n```\n", path);
        let out = run(&text).expect("should shorten");
        assert!(out.contains("packages/.../auth/session/store.ts"));
    }

    #[test]
    fn three_segment_path_truncates_segments() {
        let path = "extraordinarily/unquestionably/implementation.module.ts";
        let text = format!("```ts\n// {}\nbody();\n```\n", path);
        let out = run(&text).expect("should shorten");
        assert!(!out.contains(path));
        assert!(out.contains("extraordin../unquestion../implementa.."));
    }

    #[test]
    fn short_path_is_skipped() {
        let text = "```ts\n// src/app/main.ts\nbody();\n```\n";
        assert!(run(text).is_none());
    }

    #[test]
    fn two_segment_path_is_skipped() {
        let text = "```ts\n// averylongdirectoryname/averylongfilename.ts\nbody();\n```\n";
        assert!(run(text).is_none());
    }

    #[test]
    fn paths_outside_headers_are_not_candidates() {
        let text =
            "```ts\n// note\nimport x from 'packages/server/src/modules/auth/handler.ts';\n```\n";
        assert!(run(text).is_none());
    }
}
