//! Section parser — structural decomposition of a documentation string.
//!
//! Scans for Markdown heading lines (1–6 `#` markers, a space, a title) and
//! emits one [`Section`] per heading, spanning from that heading line to the
//! start of the next heading or the end of the text. The parser is purely
//! structural; it never interprets section semantics.
//!
//! Two boundary rules keep the output well defined:
//! - text before the first heading becomes a level-0 section with an empty
//!   title, so the sections always partition the input exactly;
//! - heading-looking lines inside fenced code blocks (shell or Python `#`
//!   comments) are not headings.

use crate::estimator::TokenEstimator;
use crate::sections::priority::score_priority;

/// One heading-delimited span of the source text.
///
/// Immutable once parsed. `start..end` are byte offsets into the original
/// string; `content` is the owned slice covering the heading line and its
/// body. Level 0 is reserved for the preamble pseudo-section.
#[derive(Debug, Clone)]
pub struct Section {
    pub level: u8,
    pub title: String,
    pub content: String,
    pub start: usize,
    pub end: usize,
    pub tokens: usize,
    pub priority: u8,
}

/// Parse `text` into an ordered, non-overlapping sequence of sections.
///
/// The returned sections partition the input in source order: concatenating
/// their `content` fields reproduces `text` byte for byte. Empty input
/// yields an empty vector.
pub fn parse_sections(text: &str, estimator: &TokenEstimator) -> Vec<Section> {
    if text.is_empty() {
        return Vec::new();
    }

    // Pass 1: locate heading lines, skipping fenced code regions.
    let mut headings: Vec<(usize, u8, String)> = Vec::new();
    let mut in_fence = false;
    let mut offset = 0;

    for line in text.split_inclusive('\n') {
        let trimmed = line.trim_end_matches(['\n', '\r']);
        if trimmed.trim_start().starts_with("```") {
            in_fence = !in_fence;
        } else if !in_fence {
            if let Some((level, title)) = parse_heading_line(trimmed) {
                headings.push((offset, level, title));
            }
        }
        offset += line.len();
    }

    // Pass 2: cut the text at the heading offsets.
    let mut sections = Vec::with_capacity(headings.len() + 1);

    let first_heading = headings.first().map(|(o, _, _)| *o).unwrap_or(text.len());
    if first_heading > 0 {
        sections.push(make_section(text, 0, first_heading, 0, String::new(), estimator));
    }

    for (i, (start, level, title)) in headings.iter().enumerate() {
        let end = headings
            .get(i + 1)
            .map(|(o, _, _)| *o)
            .unwrap_or(text.len());
        sections.push(make_section(text, *start, end, *level, title.clone(), estimator));
    }

    sections
}

/// Interpret one line as a heading: a run of 1–6 `#`, a space, and a
/// non-empty title.
fn parse_heading_line(line: &str) -> Option<(u8, String)> {
    let marker_len = line.bytes().take_while(|&b| b == b'#').count();
    if marker_len == 0 || marker_len > 6 {
        return None;
    }
    let rest = &line[marker_len..];
    let title = rest.strip_prefix(' ')?.trim();
    if title.is_empty() {
        return None;
    }
    Some((marker_len as u8, title.to_string()))
}

fn make_section(
    text: &str,
    start: usize,
    end: usize,
    level: u8,
    title: String,
    estimator: &TokenEstimator,
) -> Section {
    let content = text[start..end].to_string();
    let tokens = estimator.estimate(&content, false);
    let priority = score_priority(&title, level);
    Section {
        level,
        title,
        content,
        start,
        end,
        tokens,
        priority,
    }
}
