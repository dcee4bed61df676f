//! Error types for rich text input

use thiserror::Error;

/// Errors that can occur when loading rich text
///
/// Tree shape problems are never errors; only unreadable input is.
#[derive(Error, Debug)]
pub enum RichTextError {
    /// The input is not valid JSON
    #[error("Invalid rich text JSON: {0}")]
    Json(#[from] serde_json::Error),
}
