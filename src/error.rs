// src/error.rs

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    /// Cancellation was requested between two blocks. No edits are returned.
    #[error("formatting was cancelled")]
    Cancelled,
}
