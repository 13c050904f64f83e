//! Optimizer orchestrator — the crate's entry point.
//!
//! Sequences the whole pipeline: estimate, short-circuit when the text
//! already fits, pick a reduction tier, run the enabled strategies in
//! declaration order against the current text (stopping the moment the
//! running estimate is under budget), fall back to section-level pruning
//! when strategies aren't enough, and annotate the result with one of two
//! literal status footnotes.
//!
//! There is no error path in normal operation: finishing over budget is a
//! reported outcome, not a failure.

pub mod prioritizer;
pub mod tier;

pub use prioritizer::{prioritize_sections, TRUNCATION_MARKER};
pub use tier::{ReductionTier, StrategySet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::OptimizerConfig;
use crate::estimator::TokenEstimator;
use crate::sections::parse_sections;
use crate::strategies::{all_strategies, StrategyInput};

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// One strategy that ran and changed the token estimate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyApplication {
    pub name: String,
    pub tokens_before: usize,
    pub tokens_after: usize,
    /// Signed: a strategy is best-effort, not strictly monotonic.
    pub reduction: i64,
    pub reduction_pct: f64,
}

/// What an optimize call hands back. The optimizer retains nothing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationResult {
    pub text: String,
    pub original_tokens: usize,
    pub optimized_tokens: usize,
    pub reduction_pct: f64,
    pub strategies: Vec<StrategyApplication>,
}

/// Caller-compatibility options. Accepted and carried through; neither
/// currently changes behavior.
#[derive(Debug, Clone, Default)]
pub struct OptimizeOptions {
    pub preserve_headers: bool,
    pub module_context: Option<String>,
}

// ---------------------------------------------------------------------------
// Orchestrator
// ---------------------------------------------------------------------------

/// Token-budget optimizer for generated documentation.
///
/// Holds only immutable configuration, so one instance can be shared
/// freely: every call derives its own strategy set from the tier and
/// threads it as a value.
pub struct ContextOptimizer {
    config: OptimizerConfig,
    estimator: TokenEstimator,
}

impl Default for ContextOptimizer {
    fn default() -> Self {
        Self::new(OptimizerConfig::default())
    }
}

impl ContextOptimizer {
    pub fn new(config: OptimizerConfig) -> Self {
        let estimator = config.estimator();
        Self { config, estimator }
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Estimate tokens with this optimizer's configured ratios.
    pub fn estimate_tokens(&self, text: &str, is_code: bool) -> usize {
        self.estimator.estimate(text, is_code)
    }

    /// Reduce `text` toward `token_budget`.
    ///
    /// Best-effort: the result may still exceed the budget, in which case
    /// the over-budget footnote says so and `optimized_tokens` tells by how
    /// much. Input that already fits is returned unchanged with an empty
    /// strategy list and no footnote.
    pub fn optimize_context(
        &self,
        text: &str,
        token_budget: usize,
        _options: &OptimizeOptions,
    ) -> OptimizationResult {
        let original_tokens = self.estimator.estimate(text, false);
        if original_tokens <= token_budget {
            debug!(original_tokens, token_budget, "already within budget");
            return OptimizationResult {
                text: text.to_string(),
                original_tokens,
                optimized_tokens: original_tokens,
                reduction_pct: 0.0,
                strategies: Vec::new(),
            };
        }

        // original_tokens > budget >= 0, so the division is safe.
        let target_reduction =
            (original_tokens - token_budget) as f64 / original_tokens as f64;
        let tier = ReductionTier::for_target_reduction(target_reduction);
        let enabled = StrategySet::for_tier(tier);
        debug!(?tier, target_reduction, "selected reduction tier");

        // Parsed once; strategies re-scan the text themselves and only use
        // these for context.
        let sections = parse_sections(text, &self.estimator);

        let mut current = text.to_string();
        let mut tokens = original_tokens;
        let mut applications: Vec<StrategyApplication> = Vec::new();

        for strategy in all_strategies() {
            if tokens <= token_budget {
                break;
            }
            if !enabled.includes(strategy.name()) {
                continue;
            }
            let input = StrategyInput {
                text: &current,
                sections: &sections,
                tokens_before: tokens,
                token_budget,
                estimator: &self.estimator,
            };
            let Some(outcome) = strategy.apply(&input) else {
                continue;
            };
            if outcome.tokens == tokens {
                continue;
            }
            let reduction = tokens as i64 - outcome.tokens as i64;
            debug!(
                strategy = strategy.name(),
                tokens_before = tokens,
                tokens_after = outcome.tokens,
                "strategy applied"
            );
            applications.push(StrategyApplication {
                name: strategy.name().to_string(),
                tokens_before: tokens,
                tokens_after: outcome.tokens,
                reduction,
                reduction_pct: reduction as f64 / tokens as f64 * 100.0,
            });
            current = outcome.text;
            tokens = outcome.tokens;
        }

        if tokens > token_budget {
            debug!(tokens, token_budget, "strategies insufficient, pruning sections");
            // Re-parse: the fallback's spans must describe the text it
            // rebuilds, and the strategies above may have rewritten it.
            let current_sections = parse_sections(&current, &self.estimator);
            current = prioritize_sections(&current_sections, token_budget);
            tokens = self.estimator.estimate(&current, false);
        }

        let reduction_pct =
            (original_tokens as f64 - tokens as f64) / original_tokens as f64 * 100.0;

        // The footnote is an annotation on top of the measured result.
        if tokens <= token_budget {
            current.push_str(&format!(
                "\n\n*Note: Context was optimized to fit the token budget. Reduced by {:.1}%.*",
                reduction_pct
            ));
        } else {
            current.push_str(&format!(
                "\n\n*Note: Context was optimized but still exceeds the token budget by approximately {} tokens.*",
                tokens - token_budget
            ));
        }

        OptimizationResult {
            text: current,
            original_tokens,
            optimized_tokens: tokens,
            reduction_pct,
            strategies: applications,
        }
    }
}
