//! Planning error taxonomy.
//!
//! Sub-crates may define their own error enums and wrap `DnError` as one
//! variant (see `dn_sim::SimError`), or return `DnError` directly.

use thiserror::Error;

/// The top-level error type for `dn-core` and a common base for sub-crates.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DnError {
    /// Malformed coordinates, negative or non-finite quantities, duplicate ids.
    #[error("validation error: {0}")]
    Validation(String),

    /// Total demand cannot be met from total depot capacity.
    #[error("infeasible: total demand {demand} exceeds total capacity {capacity}")]
    Infeasible { capacity: f64, demand: f64 },

    /// Empty inputs or out-of-range tuning parameters.
    #[error("configuration error: {0}")]
    Configuration(String),
}

/// Shorthand result type for all `dn-*` crates.
pub type DnResult<T> = Result<T, DnError>;
