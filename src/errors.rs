/*!
 * Error types for the mqxlate application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur while reading or writing MQXLIFF documents
#[derive(Error, Debug)]
pub enum XliffError {
    /// Error while parsing the XML event stream
    #[error("Failed to parse XLIFF: {0}")]
    Parse(String),

    /// The file element is missing its language pair
    #[error("Source and/or target language not found in the document: {original_file}")]
    MissingLanguages {
        /// Value of the file element's `original` attribute
        original_file: String,
    },

    /// Error from the underlying file operation
    #[error("File error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur when calling a translation engine
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an engine request fails
    #[error("Engine request failed: {0}")]
    RequestFailed(String),

    /// The engine returned an empty response for a non-empty segment
    #[error("Engine returned an empty response")]
    EmptyResponse,

    /// All retry attempts were consumed
    #[error("Retries exhausted after {attempts} attempts: {reason}")]
    RetriesExhausted {
        /// Number of attempts made
        attempts: usize,
        /// Reason the last attempt was rejected
        reason: String,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from XLIFF processing
    #[error("XLIFF error: {0}")]
    Xliff(#[from] XliffError),

    /// Error from a translation engine
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error in the application configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::Xliff(XliffError::Io(error))
    }
}
