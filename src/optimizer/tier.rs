//! Tier selection — which strategies may run for a given reduction need.
//!
//! Destructive rewrites (file summarization, skeletonization) only come out
//! when a light pass cannot possibly satisfy the budget. The selected set
//! is an immutable per-call value, never stored on the optimizer.

/// How aggressive a pass the budget demands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReductionTier {
    /// Under 20% reduction needed: structure-preserving cleanups only.
    Light,
    /// Under 50%: also summarize embedded files.
    Medium,
    /// 50% or more: everything, including skeletonization.
    Aggressive,
}

impl ReductionTier {
    /// Pick a tier from the fractional reduction required,
    /// `(original - budget) / original`.
    pub fn for_target_reduction(target: f64) -> Self {
        if target < 0.2 {
            Self::Light
        } else if target < 0.5 {
            Self::Medium
        } else {
            Self::Aggressive
        }
    }
}

/// The immutable set of strategies enabled for one optimize call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrategySet {
    tier: ReductionTier,
}

impl StrategySet {
    pub fn for_tier(tier: ReductionTier) -> Self {
        Self { tier }
    }

    pub fn tier(&self) -> ReductionTier {
        self.tier
    }

    /// Whether the named strategy runs in this tier.
    pub fn includes(&self, name: &str) -> bool {
        match name {
            "trim_comments" | "reduce_indentation" | "remove_blank_lines" => true,
            "summarize_files" => self.tier != ReductionTier::Light,
            "shorten_paths" | "code_skeletonization" => self.tier == ReductionTier::Aggressive,
            _ => false,
        }
    }
}
