//! Error types for the idscan-core library.

use thiserror::Error;

/// Main error type for the idscan library.
#[derive(Error, Debug)]
pub enum IdScanError {
    /// OCR processing error.
    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to OCR processing.
#[derive(Error, Debug)]
pub enum OcrError {
    /// Failed to load OCR models.
    #[error("failed to load model: {0}")]
    ModelLoad(String),

    /// Failed to acquire a recognizer for the requested language.
    #[error("failed to acquire recognizer for '{language}': {reason}")]
    Acquire { language: String, reason: String },

    /// Text recognition failed.
    #[error("text recognition failed: {0}")]
    Recognition(String),

    /// The payload could not be decoded as an image.
    #[error("invalid image: {0}")]
    InvalidImage(String),
}

/// Result type for the idscan library.
pub type Result<T> = std::result::Result<T, IdScanError>;
