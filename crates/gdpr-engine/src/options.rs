//! Per-run analysis options.

use crate::catalog::RuleCatalog;

/// Minimum score for a semantic candidate to survive; also the evidence
/// threshold the aggregator applies. Shared so the two stages agree.
pub const DEFAULT_SEMANTIC_THRESHOLD: f32 = 0.55;

/// Per-call timeout for the classifier capability.
pub const DEFAULT_EMBED_TIMEOUT_MS: u64 = 2000;

/// Concurrent in-flight classifier calls.
pub const DEFAULT_MAX_CONCURRENCY: usize = 8;

#[derive(Debug, Clone)]
pub struct AnalyzeOptions {
    /// Minimum raw score for a semantic candidate, and the evidence cutoff
    /// in aggregation.
    pub semantic_threshold: f32,
    /// Timeout per classifier call, in milliseconds.
    pub embed_timeout_ms: u64,
    /// Bound on concurrent classifier calls.
    pub max_concurrency: usize,
    /// Pins which rule catalog to apply, for reproducibility across catalog
    /// updates.
    pub catalog_version: String,
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self {
            semantic_threshold: DEFAULT_SEMANTIC_THRESHOLD,
            embed_timeout_ms: DEFAULT_EMBED_TIMEOUT_MS,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            catalog_version: RuleCatalog::DEFAULT_VERSION.to_string(),
        }
    }
}

impl AnalyzeOptions {
    pub fn with_semantic_threshold(mut self, threshold: f32) -> Self {
        self.semantic_threshold = threshold;
        self
    }

    pub fn with_embed_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.embed_timeout_ms = timeout_ms;
        self
    }

    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency;
        self
    }

    pub fn with_catalog_version(mut self, version: &str) -> Self {
        self.catalog_version = version.to_string();
        self
    }
}
