//! Summarize files — replaces embedded file blocks with signature stubs.
//!
//! An "embedded file" is a fenced span whose first line is a path. Each one
//! gets an importance score from filename and extension heuristics (config
//! and lockfiles highest, tests lowest), and the least important are
//! replaced first with a short stub of extracted signatures, until the
//! requested token delta is met or no candidates remain.

use regex::Regex;

use super::{find_code_spans, rewrite_spans, CodeSpan, ReductionStrategy, StrategyInput, StrategyOutcome};

/// Max signature lines carried into a stub.
const MAX_STUB_SIGNATURES: usize = 5;

pub struct SummarizeFiles;

impl ReductionStrategy for SummarizeFiles {
    fn name(&self) -> &'static str {
        "summarize_files"
    }

    fn apply(&self, input: &StrategyInput<'_>) -> Option<StrategyOutcome> {
        let tokens_to_reduce = input.tokens_before.saturating_sub(input.token_budget);
        if tokens_to_reduce == 0 {
            return None;
        }

        let spans = find_code_spans(input.text);
        let mut candidates: Vec<(usize, u8)> = Vec::new();
        for (i, span) in spans.iter().enumerate() {
            if let Some(path) = file_path_header(span, input.text) {
                candidates.push((i, file_importance(path)));
            }
        }
        if candidates.is_empty() {
            return None;
        }

        // Least important first; bigger blocks first within a tier so the
        // delta is met with fewer replacements.
        candidates.sort_by(|a, b| {
            a.1.cmp(&b.1)
                .then_with(|| spans[b.0].content_len().cmp(&spans[a.0].content_len()))
        });

        let mut replacements: Vec<Option<String>> = vec![None; spans.len()];
        let mut tokens_reduced = 0usize;
        for (i, _) in &candidates {
            if tokens_reduced >= tokens_to_reduce {
                break;
            }
            let content = spans[*i].content(input.text);
            let stub = summarize_file_block(content);
            let before = input.estimator.estimate(content, true);
            let after = input.estimator.estimate(&stub, true);
            if after >= before {
                continue;
            }
            tokens_reduced += before - after;
            replacements[*i] = Some(stub);
        }
        if replacements.iter().all(|r| r.is_none()) {
            return None;
        }

        let mut index = 0;
        let text = rewrite_spans(input.text, &spans, |_| {
            let r = replacements[index].clone();
            index += 1;
            r
        });
        let tokens = input.estimator.estimate(&text, false);
        Some(StrategyOutcome { text, tokens })
    }
}

/// The span's first line, when it looks like an embedded file path.
fn file_path_header<'a>(span: &CodeSpan, text: &'a str) -> Option<&'a str> {
    let first = span.content(text).lines().next()?.trim();
    let path = first.trim_start_matches("//").trim_start_matches('#').trim();
    if (path.contains('/') || path.contains('\\'))
        && !path.contains(char::is_whitespace)
        && path.len() < 200
    {
        Some(first)
    } else {
        None
    }
}

/// Importance on a 0–10 scale. Higher survives longer.
fn file_importance(header: &str) -> u8 {
    let path = header.trim().to_lowercase();
    let file_name = path.rsplit(['/', '\\']).next().unwrap_or(&path).to_string();

    // Tests go first when tokens are needed.
    if file_name.contains(".test.")
        || file_name.contains(".spec.")
        || file_name.starts_with("test_")
        || file_name.contains("_test.")
        || path.contains("__tests__")
        || path.contains("/tests/")
    {
        return 1;
    }

    // Config and lockfiles describe the project shape; keep them longest.
    const CONFIG_NAMES: &[&str] = &[
        "package.json",
        "package-lock.json",
        "yarn.lock",
        "cargo.toml",
        "cargo.lock",
        "pyproject.toml",
        "tsconfig.json",
        "go.mod",
        "makefile",
        "dockerfile",
    ];
    if CONFIG_NAMES.contains(&file_name.as_str())
        || file_name.ends_with(".lock")
        || file_name.contains(".config.")
    {
        return 10;
    }

    // Entry points anchor the module graph.
    if file_name.starts_with("index.")
        || file_name.starts_with("main.")
        || file_name.starts_with("app.")
        || file_name == "lib.rs"
        || file_name == "mod.rs"
    {
        return 8;
    }

    // Plain documentation is cheap to regenerate.
    if file_name.ends_with(".md") || file_name.ends_with(".txt") {
        return 3;
    }

    5
}

/// Build the stub: path header, up to a few signature lines, and an
/// omission note.
fn summarize_file_block(content: &str) -> String {
    let mut lines = content.lines();
    let header = lines.next().unwrap_or("");
    let body: Vec<&str> = lines.collect();

    let mut stub = String::new();
    stub.push_str(header);
    stub.push('\n');

    let signatures = extract_signatures(&body);
    for sig in &signatures {
        stub.push_str(sig);
        stub.push('\n');
    }

    let omitted = body.len().saturating_sub(signatures.len());
    stub.push_str(&format!("// ... ({} lines omitted)\n", omitted));
    stub
}

/// Lines that look like declarations: functions, classes, exports, types.
fn extract_signatures(body: &[&str]) -> Vec<String> {
    let pattern = r"^\s*(?:export\s+)?(?:pub\s+)?(?:default\s+)?(?:async\s+)?(?:(?:function|class|interface|type|enum|struct|trait|impl|fn|def|func)\b|const\s+\w+\s*=)";
    let re = match Regex::new(pattern) {
        Ok(re) => re,
        Err(_) => return Vec::new(),
    };

    let mut sigs = Vec::new();
    for line in body {
        if re.is_match(line) {
            sigs.push(line.trim_end().to_string());
            if sigs.len() >= MAX_STUB_SIGNATURES {
                break;
            }
        }
    }
    sigs
}
