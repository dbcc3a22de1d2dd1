//! Error taxonomy for the analysis engine.
//!
//! Only whole-run failures are errors. Per-segment classifier failures
//! degrade that segment's contribution and surface as warnings on the
//! report instead (see `semantic`).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// The document is blank after whitespace trimming.
    #[error("document contains no analyzable text")]
    EmptyInput,

    /// The pinned rule catalog version is not compiled into this build.
    #[error("unknown rule catalog version: {0}")]
    UnknownCatalogVersion(String),

    /// Internal consistency violated. Indicates a bug, never swallowed.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}
