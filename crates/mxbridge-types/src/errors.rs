//! Error types for the formatting pipeline

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, FormatError>;

/// Errors produced by the markup formatting path.
///
/// The plain-text path and reply-target extraction never fail; missing or
/// malformed metadata there is absence, not an error.
#[derive(Debug, Error)]
pub enum FormatError {
    /// The tokenizer or a rewrite step failed. Carries the original input
    /// for diagnostics; retrying with the same input will fail again.
    #[error("failed to convert Matrix format ({reason}): {input}")]
    ConversionFailed { input: String, reason: String },

    /// Wire text decoding produced invalid UTF-16.
    #[error("invalid UTF-16 wire text: {0}")]
    InvalidWireText(#[from] std::string::FromUtf16Error),

    /// An internal invariant was violated at the pipeline exit. Indicates a
    /// logic fault in the formatter, not bad user input.
    #[error("internal fault: {0}")]
    InternalFault(String),
}
