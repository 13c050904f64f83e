//! Token estimation — the single counting primitive for the whole crate.
//!
//! Uses the chars-per-token heuristic rather than a real tokenizer: a proper
//! tokenizer (tiktoken, sentencepiece) would be more accurate, but the char
//! ratio is surprisingly close for English-heavy documentation and avoids a
//! heavy dependency. Every component counts tokens through [`TokenEstimator`]
//! so that a ratio change is globally consistent.

/// Default chars-per-token ratio for prose.
pub const DEFAULT_CHARS_PER_TOKEN: f64 = 4.0;

/// Default chars-per-token ratio for code, which tokenizes denser.
pub const DEFAULT_CODE_CHARS_PER_TOKEN: f64 = 3.5;

/// Approximates token counts from character length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TokenEstimator {
    chars_per_token: f64,
    code_chars_per_token: f64,
}

impl Default for TokenEstimator {
    fn default() -> Self {
        Self {
            chars_per_token: DEFAULT_CHARS_PER_TOKEN,
            code_chars_per_token: DEFAULT_CODE_CHARS_PER_TOKEN,
        }
    }
}

impl TokenEstimator {
    /// Create an estimator with explicit ratios. Callers validate ratios
    /// before constructing (see `OptimizerConfig::validate`).
    pub fn new(chars_per_token: f64, code_chars_per_token: f64) -> Self {
        Self {
            chars_per_token,
            code_chars_per_token,
        }
    }

    /// Estimate the number of tokens in `text`.
    ///
    /// Computes `ceil(len / ratio)` with the prose or code ratio depending
    /// on `is_code`. Empty input yields 0.
    pub fn estimate(&self, text: &str, is_code: bool) -> usize {
        if text.is_empty() {
            return 0;
        }
        let ratio = if is_code {
            self.code_chars_per_token
        } else {
            self.chars_per_token
        };
        (text.len() as f64 / ratio).ceil() as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn estimate_empty() {
        assert_eq!(TokenEstimator::default().estimate("", false), 0);
        assert_eq!(TokenEstimator::default().estimate("", true), 0);
    }

    #[test]
    fn estimate_prose_rounds_up() {
        let est = TokenEstimator::default();
        // 4 chars -> 1 token, 5 chars -> ceil(5/4) = 2
        assert_eq!(est.estimate("abcd", false), 1);
        assert_eq!(est.estimate("abcde", false), 2);
    }

    #[test]
    fn estimate_code_uses_denser_ratio() {
        let est = TokenEstimator::default();
        // 35 chars: prose ceil(35/4) = 9, code ceil(35/3.5) = 10
        let text = "let total = items.iter().sum::<i32>";
        assert_eq!(text.len(), 35);
        assert_eq!(est.estimate(text, false), 9);
        assert_eq!(est.estimate(text, true), 10);
    }

    #[test]
    fn estimate_is_deterministic() {
        let est = TokenEstimator::new(3.0, 2.5);
        let text = "the same input always yields the same integer";
        let first = est.estimate(text, false);
        for _ in 0..10 {
            assert_eq!(est.estimate(text, false), first);
        }
    }

    #[test]
    fn estimate_custom_ratio() {
        let est = TokenEstimator::new(2.0, 2.0);
        assert_eq!(est.estimate("abcd", false), 2);
    }
}
