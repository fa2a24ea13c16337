/*!
 * Error types for the cuetrack library and binary.
 *
 * Subtitle parsing failures are modelled with `SubtitleError`; everything the
 * command line shell can hit is folded into `AppError`. Both use the
 * thiserror crate for their definitions.
 */

use thiserror::Error;

/// Errors raised while decoding subtitle text
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SubtitleError {
    /// A timestamp token does not match `H:MM:SS,mmm`
    #[error("Invalid timestamp: '{0}'")]
    InvalidTimestamp(String),

    /// An SRT block is missing a required token
    #[error("Malformed subtitle block {block}: {reason}")]
    MalformedBlock {
        /// 1-based position of the block in the file
        block: usize,
        /// What the scanner expected to find
        reason: String,
    },
}

impl SubtitleError {
    pub(crate) fn malformed(block: usize, reason: impl Into<String>) -> Self {
        Self::MalformedBlock {
            block,
            reason: reason.into(),
        }
    }
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from subtitle parsing
    #[error("Subtitle error: {0}")]
    Subtitle(#[from] SubtitleError),

    /// Invalid or unreadable configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
