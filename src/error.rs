//! Unified SDK error types.

use thiserror::Error;

/// Top-level SDK error.
#[derive(Error, Debug, Clone)]
pub enum SdkError {
    /// Chain read failed: the account could not be reached or decoded.
    #[error("Sale state unavailable: {0}")]
    Unavailable(String),

    /// Transaction rejected before inclusion.
    #[error("Submission rejected: {0}")]
    Submission(RawError),

    /// No terminal status was observed before the deadline.
    #[error("Confirmation timed out for {signature}")]
    ConfirmationTimeout { signature: String },

    /// Transaction was included and rejected by the program.
    #[error("Program rejected transaction: {0}")]
    Program(RawError),

    #[error("Invalid account discriminator: expected {expected}, got {actual}")]
    InvalidDiscriminator { expected: String, actual: String },

    #[error("Invalid data length: expected at least {expected}, got {actual}")]
    InvalidDataLength { expected: usize, actual: usize },

    #[error("Invalid account data: {0}")]
    InvalidAccountData(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Result type alias for SDK operations.
pub type SdkResult<T> = Result<T, SdkError>;

/// A failure as reported by the underlying client library.
///
/// Submission-time failures usually carry only text (preflight logs such as
/// `custom program error: 0x137`), while confirmation-time failures carry the
/// instruction's custom error code. Both shapes end up here.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct RawError {
    /// Custom program error code, when the client surfaced one.
    pub code: Option<u32>,
    /// Human-readable message from the client library.
    pub message: String,
}

impl RawError {
    pub fn with_code(code: u32, message: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            message: message.into(),
        }
    }

    pub fn from_message(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }
}
