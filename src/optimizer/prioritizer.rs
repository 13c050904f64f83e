//! Section prioritizer — the fallback when strategies alone can't reach
//! the budget.
//!
//! Rebuilds the document keeping the highest-priority sections in full and
//! truncating the rest to a short annotated stub. Selection happens in
//! priority order, but the output is emitted in source order so the
//! document's structure survives the pruning.

use crate::sections::Section;

/// Sections at or above this priority are always kept in full.
const ALWAYS_KEEP_PRIORITY: u8 = 8;

/// How much of a truncated section survives.
const TRUNCATED_CHARS: usize = 200;

/// The annotation appended to every truncated section.
pub const TRUNCATION_MARKER: &str = "*[Section truncated to save tokens]*";

/// Rebuild `sections` to fit `token_budget`, truncating the lowest-priority
/// spans first.
pub fn prioritize_sections(sections: &[Section], token_budget: usize) -> String {
    // Selection order: priority descending, source order on ties.
    let mut order: Vec<usize> = (0..sections.len()).collect();
    order.sort_by(|&a, &b| {
        sections[b]
            .priority
            .cmp(&sections[a].priority)
            .then_with(|| sections[a].start.cmp(&sections[b].start))
    });

    let mut keep_full = vec![false; sections.len()];
    let mut used_tokens = 0usize;

    // Must-keep sections claim their tokens first.
    for &i in &order {
        if sections[i].priority >= ALWAYS_KEEP_PRIORITY {
            keep_full[i] = true;
            used_tokens += sections[i].tokens;
        }
    }

    // Everything else is kept in full while the budget holds.
    for &i in &order {
        if keep_full[i] {
            continue;
        }
        if used_tokens + sections[i].tokens <= token_budget {
            keep_full[i] = true;
            used_tokens += sections[i].tokens;
        }
    }

    // Emit in source order.
    let mut parts: Vec<String> = Vec::with_capacity(sections.len());
    for (i, section) in sections.iter().enumerate() {
        if keep_full[i] {
            parts.push(section.content.trim_end().to_string());
        } else {
            parts.push(truncate_section(section));
        }
    }
    parts.join("\n\n")
}

/// First ~200 chars of the section plus the literal truncation marker.
fn truncate_section(section: &Section) -> String {
    let content = section.content.trim_end();
    let mut cut = TRUNCATED_CHARS.min(content.len());
    while cut > 0 && !content.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}\n\n{}", content[..cut].trim_end(), TRUNCATION_MARKER)
}
