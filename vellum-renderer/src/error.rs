//! Renderer error types.

use thiserror::Error;
use vellum_core::CoreError;

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur during rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The requested scene does not exist.
    #[error("Scene not found: {0}")]
    SceneNotFound(String),

    /// The document failed validation.
    #[error("Invalid document: {0}")]
    Core(#[from] CoreError),
}
