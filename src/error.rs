//! Top-level error type

use crate::cache::CacheError;
use crate::render::RenderError;
use crate::wiki::WikiError;
use thiserror::Error;

/// Errors that abort a run.
///
/// Bad or missing wiki data never ends up here; only resource-level
/// failures do.
#[derive(Debug, Error)]
pub enum CharnetError {
    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    #[error("Wiki client error: {0}")]
    Wiki(#[from] WikiError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),
}

/// Result type for pipeline operations
pub type CharnetResult<T> = Result<T, CharnetError>;
