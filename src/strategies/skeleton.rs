//! Code skeletonization — replaces function bodies with a placeholder
//! comment while keeping signatures.
//!
//! Class (and impl/interface) bodies are walked rather than elided, so the
//! method signatures inside them survive with their own bodies collapsed.
//! Pattern-based and intentionally lossy: brace counting ignores string
//! contents, which is acceptable for documentation excerpts.

use regex::Regex;

use super::{find_code_spans, rewrite_spans, ReductionStrategy, StrategyInput, StrategyOutcome};

/// Spans shorter than this keep their bodies.
const MIN_SPAN_CHARS: usize = 200;

/// Languages the skeletonizer understands.
const BRACE_LANGS: &[&str] = &[
    "js",
    "javascript",
    "jsx",
    "ts",
    "typescript",
    "tsx",
    "rust",
    "rs",
    "go",
    "golang",
    "java",
    "c",
    "cpp",
    "c++",
    "csharp",
    "cs",
    "kotlin",
    "swift",
    "scala",
];
const INDENT_LANGS: &[&str] = &["python", "py"];

/// Identifiers that look like method calls but open control blocks.
const CONTROL_KEYWORDS: &[&str] = &[
    "if", "else", "for", "while", "switch", "match", "catch", "try", "return", "do", "loop",
];

pub struct CodeSkeletonization;

impl ReductionStrategy for CodeSkeletonization {
    fn name(&self) -> &'static str {
        "code_skeletonization"
    }

    fn apply(&self, input: &StrategyInput<'_>) -> Option<StrategyOutcome> {
        let spans = find_code_spans(input.text);
        if spans.is_empty() {
            return None;
        }
        let patterns = Patterns::new()?;

        let mut changed = false;
        let text = rewrite_spans(input.text, &spans, |span| {
            if span.content_len() < MIN_SPAN_CHARS {
                return None;
            }
            let lang = span.language.as_deref()?;
            let content = span.content(input.text);
            let rewritten = if BRACE_LANGS.contains(&lang) {
                skeletonize_braces(content, &patterns)
            } else if INDENT_LANGS.contains(&lang) {
                skeletonize_python(content, &patterns)
            } else {
                return None;
            };
            if rewritten == content {
                None
            } else {
                changed = true;
                Some(rewritten)
            }
        });

        if !changed {
            return None;
        }
        let tokens = input.estimator.estimate(&text, false);
        Some(StrategyOutcome { text, tokens })
    }
}

struct Patterns {
    class_header: Regex,
    fn_header: Regex,
    method_header: Regex,
    py_def: Regex,
}

impl Patterns {
    fn new() -> Option<Self> {
        Some(Self {
            class_header: Regex::new(
                r"^\s*(?:export\s+)?(?:pub(?:\([^)]*\))?\s+)?(?:default\s+)?(?:abstract\s+)?(?:class|interface|trait|impl|enum|struct)\b[^;]*\{\s*$",
            )
            .ok()?,
            fn_header: Regex::new(
                r"^\s*(?:export\s+)?(?:pub(?:\([^)]*\))?\s+)?(?:default\s+)?(?:static\s+)?(?:async\s+)?(?:function\s*\*?\s*|fn\s+|func\s+(?:\([^)]*\)\s*)?)([A-Za-z_$][\w$]*)",
            )
            .ok()?,
            method_header: Regex::new(
                r"^\s*(?:public\s+|private\s+|protected\s+|static\s+|override\s+|async\s+)*([A-Za-z_$][\w$]*)\s*(?:<[^>]*>)?\s*\([^)]*\)\s*(?:->\s*[^{]*|:[^{]*)?\{\s*$",
            )
            .ok()?,
            py_def: Regex::new(r"^(\s*)(?:async\s+)?def\s+[\w]+.*:\s*$").ok()?,
        })
    }

    /// Does this line open a function or method body?
    fn opens_function(&self, line: &str) -> bool {
        if self.class_header.is_match(line) {
            return false;
        }
        if net_braces(line) <= 0 {
            return false;
        }
        if let Some(caps) = self.fn_header.captures(line) {
            if !CONTROL_KEYWORDS.contains(&&caps[1]) {
                return true;
            }
        }
        if let Some(caps) = self.method_header.captures(line) {
            if !CONTROL_KEYWORDS.contains(&&caps[1]) {
                return true;
            }
        }
        false
    }
}

/// `{` minus `}` on one line. Strings are not tracked.
fn net_braces(line: &str) -> i32 {
    let mut n = 0;
    for ch in line.chars() {
        match ch {
            '{' => n += 1,
            '}' => n -= 1,
            _ => {}
        }
    }
    n
}

fn leading_whitespace(line: &str) -> &str {
    let end = line.len() - line.trim_start_matches([' ', '\t']).len();
    &line[..end]
}

/// Collapse function bodies in brace-delimited code.
fn skeletonize_braces(content: &str, patterns: &Patterns) -> String {
    let lines: Vec<&str> = content.split_inclusive('\n').collect();
    let mut out = String::with_capacity(content.len());
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];
        let stripped = line.trim_end_matches(['\n', '\r']);

        if !patterns.opens_function(stripped) {
            out.push_str(line);
            i += 1;
            continue;
        }

        // Function header: keep it, drop the body, keep the closing brace.
        out.push_str(line);
        let indent = leading_whitespace(stripped);
        out.push_str(indent);
        out.push_str("  // ...\n");

        let mut depth = net_braces(stripped);
        i += 1;
        while i < lines.len() && depth > 0 {
            let inner = lines[i].trim_end_matches(['\n', '\r']);
            depth += net_braces(inner);
            if depth <= 0 {
                out.push_str(lines[i]);
            }
            i += 1;
        }
    }
    out
}

/// Collapse `def` bodies in indentation-delimited code.
fn skeletonize_python(content: &str, patterns: &Patterns) -> String {
    let lines: Vec<&str> = content.split_inclusive('\n').collect();
    let mut out = String::with_capacity(content.len());
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];
        let stripped = line.trim_end_matches(['\n', '\r']);

        let Some(caps) = patterns.py_def.captures(stripped) else {
            out.push_str(line);
            i += 1;
            continue;
        };

        let indent = caps[1].to_string();
        out.push_str(line);
        out.push_str(&indent);
        out.push_str("    # ...\n");

        let header_width = indent.len();
        i += 1;
        while i < lines.len() {
            let inner = lines[i].trim_end_matches(['\n', '\r']);
            if inner.trim().is_empty() {
                i += 1;
                continue;
            }
            if leading_whitespace(inner).len() <= header_width {
                break;
            }
            i += 1;
        }
    }
    out
}
