//! Engine error taxonomy
//!
//! Only two failure kinds exist: an unrecognized severity category reaching a
//! registry lookup, and an external scale dataset that violates the registry
//! invariants. Scoring and classification never fail for well-typed input.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The registry holds no tiers for the requested category.
    ///
    /// Unreachable with the embedded defaults; guards against override
    /// datasets mangled upstream of deserialization.
    #[error("unknown severity category: {category}")]
    InvalidCategory { category: String },

    /// An externally supplied scale dataset violates a registry invariant.
    #[error("invalid scale dataset: {reason}")]
    InvalidScale { reason: String },
}
