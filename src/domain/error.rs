//! Domain error types for the diff model.

use thiserror::Error;

/// Errors surfaced while turning raw diff text into the renderable model.
#[derive(Debug, Error)]
pub enum DiffError {
    #[error("invalid diff format: {0}")]
    InvalidFormat(String),

    #[error("diff parse failed: {message}")]
    Parse { message: String },
}
