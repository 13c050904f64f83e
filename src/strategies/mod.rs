//! Reduction strategies — independent, lossy text→text transforms.
//!
//! Each strategy implements [`ReductionStrategy`] and is all-or-nothing per
//! invocation: it either returns a rewritten text with a fresh token
//! estimate, or `None` when its preconditions don't hold. Strategies do not
//! share a pre-extracted document model; each re-scans the full text for
//! fenced code spans with [`find_code_spans`], so any subset can run in any
//! combination without coordinating state.
//!
//! Declaration order is fixed and is the order the orchestrator runs them:
//! cheap structure-preserving passes first, destructive rewrites last.

pub mod blank_lines;
pub mod comments;
pub mod file_summary;
pub mod indentation;
pub mod paths;
pub mod skeleton;

pub use blank_lines::RemoveBlankLines;
pub use comments::TrimComments;
pub use file_summary::SummarizeFiles;
pub use indentation::ReduceIndentation;
pub use paths::ShortenPaths;
pub use skeleton::CodeSkeletonization;

use crate::estimator::TokenEstimator;
use crate::sections::Section;

// ---------------------------------------------------------------------------
// Strategy contract
// ---------------------------------------------------------------------------

/// Everything a strategy is allowed to look at.
pub struct StrategyInput<'a> {
    pub text: &'a str,
    pub sections: &'a [Section],
    pub tokens_before: usize,
    pub token_budget: usize,
    pub estimator: &'a TokenEstimator,
}

/// A successful strategy application: the rewritten text plus the
/// strategy's own fresh estimate of it.
pub struct StrategyOutcome {
    pub text: String,
    pub tokens: usize,
}

/// A single lossy reduction transform.
///
/// Implementations must be total: absence of a match is a `None`, never a
/// panic or an error. They must not consult anything outside the input.
pub trait ReductionStrategy {
    /// Stable name, used in [`StrategyApplication`](crate::optimizer::StrategyApplication)
    /// records and configuration keys.
    fn name(&self) -> &'static str;

    /// Apply the transform, or `None` when nothing qualifies.
    fn apply(&self, input: &StrategyInput<'_>) -> Option<StrategyOutcome>;
}

/// All six strategies in declaration (execution) order.
pub fn all_strategies() -> Vec<Box<dyn ReductionStrategy>> {
    vec![
        Box::new(TrimComments),
        Box::new(ReduceIndentation),
        Box::new(RemoveBlankLines),
        Box::new(SummarizeFiles),
        Box::new(ShortenPaths),
        Box::new(CodeSkeletonization),
    ]
}

/// Strategy names in declaration order, for configuration keys.
pub const STRATEGY_NAMES: [&str; 6] = [
    "trim_comments",
    "reduce_indentation",
    "remove_blank_lines",
    "summarize_files",
    "shorten_paths",
    "code_skeletonization",
];

// ---------------------------------------------------------------------------
// Fenced code spans
// ---------------------------------------------------------------------------

/// One triple-backtick fenced region of the text.
///
/// `content_start..content_end` covers the lines between the fence markers;
/// `block_start..block_end` additionally covers the markers themselves.
#[derive(Debug, Clone)]
pub struct CodeSpan {
    pub language: Option<String>,
    pub block_start: usize,
    pub block_end: usize,
    pub content_start: usize,
    pub content_end: usize,
}

impl CodeSpan {
    /// The text between the fence markers.
    pub fn content<'a>(&self, text: &'a str) -> &'a str {
        &text[self.content_start..self.content_end]
    }

    pub fn content_len(&self) -> usize {
        self.content_end - self.content_start
    }
}

/// Scan `text` for fenced code spans.
///
/// An opening fence is a line starting with three backticks, optionally
/// followed by a language tag; the closing fence is a bare ``` line. An
/// unclosed fence runs to the end of the text.
pub fn find_code_spans(text: &str) -> Vec<CodeSpan> {
    let mut spans = Vec::new();
    let mut open: Option<(usize, usize, Option<String>)> = None; // (block_start, content_start, lang)
    let mut offset = 0;

    for line in text.split_inclusive('\n') {
        let trimmed = line.trim_end_matches(['\n', '\r']).trim_start();
        match &open {
            None => {
                if let Some(rest) = trimmed.strip_prefix("```") {
                    let tag = rest.trim();
                    let language = if tag.is_empty() {
                        None
                    } else {
                        Some(tag.to_lowercase())
                    };
                    open = Some((offset, offset + line.len(), language));
                }
            }
            Some((block_start, content_start, language)) => {
                if trimmed == "```" {
                    spans.push(CodeSpan {
                        language: language.clone(),
                        block_start: *block_start,
                        block_end: offset + line.len(),
                        content_start: *content_start,
                        content_end: offset,
                    });
                    open = None;
                }
            }
        }
        offset += line.len();
    }

    if let Some((block_start, content_start, language)) = open {
        spans.push(CodeSpan {
            language,
            block_start,
            block_end: text.len(),
            content_start: content_start.min(text.len()),
            content_end: text.len(),
        });
    }

    spans
}

/// Rebuild `text` with each span's content replaced by the string the
/// callback returns (`None` leaves a span untouched). Fence markers and all
/// prose between spans are preserved verbatim.
pub fn rewrite_spans<F>(text: &str, spans: &[CodeSpan], mut f: F) -> String
where
    F: FnMut(&CodeSpan) -> Option<String>,
{
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for span in spans {
        match f(span) {
            Some(replacement) => {
                out.push_str(&text[cursor..span.content_start]);
                out.push_str(&replacement);
                cursor = span.content_end;
            }
            None => {
                // Leave this span (and the prose before it) for the next copy.
            }
        }
    }
    out.push_str(&text[cursor..]);
    out
}
