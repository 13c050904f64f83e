//! Context optimizer — compacts generated project documentation to fit a
//! token budget.
//!
//! Sits between a module-summary generator and prompt assembly: given
//! headed Markdown interleaved with fenced code excerpts, it runs an
//! ordered pipeline of lossy reduction strategies (comment trimming,
//! indentation collapse, blank-line removal, file summarization, path
//! shortening, code skeletonization), tiered by how much reduction the
//! budget demands, with a section-level priority fallback when strategies
//! alone aren't enough. Best-effort by design: the result carries a
//! literal status footnote instead of a fit guarantee.

pub mod config;
pub mod error;
pub mod estimator;
pub mod observability;
pub mod optimizer;
pub mod sections;
pub mod strategies;

pub use config::{ConfigOverrides, OptimizerConfig, StrategySettings};
pub use error::{OptimizerError, Result};
pub use estimator::TokenEstimator;
pub use optimizer::{
    ContextOptimizer, OptimizationResult, OptimizeOptions, ReductionTier, StrategyApplication,
};
