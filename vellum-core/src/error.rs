//! Error types for core editing operations.

use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised by the strict (contract-enforcing) parts of the core.
///
/// Lenient operations such as graph lookups and `snap::*` never return these;
/// they degrade to empty results or sentinel values instead.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A selector token that is not part of the selector algebra.
    #[error("Unknown selector: {0:?}")]
    UnknownSelector(String),

    /// Alignment was requested against an empty candidate list.
    #[error("At least one target is required")]
    EmptyTargets,

    /// Alignment threshold was negative (or NaN).
    #[error("Threshold must be a non-negative number, got {0}")]
    NegativeThreshold(f64),

    /// Quantization step was zero, negative or NaN.
    #[error("Step size must be a positive number, got {0}")]
    InvalidStep(f64),

    /// Node not found in the document.
    #[error("Node not found: {0}")]
    NodeNotFound(String),

    /// Scene not found in the document.
    #[error("Scene not found: {0}")]
    SceneNotFound(String),

    /// A node with this id already exists.
    #[error("Node already exists: {0}")]
    DuplicateNode(String),

    /// A structural edit or snapshot that breaks a document invariant.
    #[error("Invariant violated: {0}")]
    InvariantViolation(String),

    /// Snapshot or config serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
