//! Error types for the task tracker.
//!
//! Exit codes used by the CLI:
//! - 1: Storage failure (read/write/encode)
//! - 2: User error (missing or invalid input)

use thiserror::Error;

/// Exit codes for the `tt` binary.
pub mod exit_codes {
    pub const STORAGE_FAILED: i32 = 1;
    pub const USER_ERROR: i32 = 2;
}

/// Main error type for task tracker operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Both fields are required!")]
    MissingFields,

    #[error("Unrecognised due date: '{0}' (use YYYY-MM-DD, today, tomorrow or in Nd)")]
    InvalidDate(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::MissingFields | Error::InvalidDate(_) => exit_codes::USER_ERROR,
            Error::Io(_) | Error::Json(_) => exit_codes::STORAGE_FAILED,
        }
    }
}

/// Result type alias for task tracker operations.
pub type Result<T> = std::result::Result<T, Error>;
