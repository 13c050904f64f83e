//! Priority scorer — how important is a section to keep?
//!
//! Deterministic and side-effect free. Shallower headings score higher, and
//! a few keyword sets nudge the score up or down: a title like
//! "API Overview" is worth keeping in full, "Internal Helpers" is not.

/// Titles containing any of these gain +3.
const HIGH_KEYWORDS: &[&str] = &[
    "overview",
    "summary",
    "purpose",
    "architecture",
    "api",
    "interface",
    "export",
];

/// Titles containing any of these gain +1.
const MEDIUM_KEYWORDS: &[&str] = &[
    "structure",
    "usage",
    "flow",
    "data model",
    "relationships",
];

/// Titles containing any of these lose 2.
const LOW_KEYWORDS: &[&str] = &[
    "implementation",
    "utilities",
    "helper",
    "details",
    "internal",
];

/// Score a section's priority in `[0, 10]` from its title and heading level.
///
/// Base score is `10 - min(level, 5)`, so an `#` heading starts at 9 and
/// anything `#####` or deeper starts at 5. The level-0 preamble starts at
/// 10. Keyword bonuses are applied once per set, then the result is clamped.
pub fn score_priority(title: &str, level: u8) -> u8 {
    let mut score = 10i32 - i32::from(level.min(5));

    let lower = title.to_lowercase();
    if HIGH_KEYWORDS.iter().any(|k| lower.contains(k)) {
        score += 3;
    }
    if MEDIUM_KEYWORDS.iter().any(|k| lower.contains(k)) {
        score += 1;
    }
    if LOW_KEYWORDS.iter().any(|k| lower.contains(k)) {
        score -= 2;
    }

    score.clamp(0, 10) as u8
}
