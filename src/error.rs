//! Error types for docrank.

use std::io;
use thiserror::Error;

/// Result type alias for docrank operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while extracting outlines or ranking sections.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file format is not recognized as PDF.
    #[error("Unknown file format: not a valid PDF")]
    UnknownFormat,

    /// The PDF version is not supported.
    #[error("Unsupported PDF version: {0}")]
    UnsupportedVersion(String),

    /// Error parsing PDF structure.
    #[error("PDF parsing error: {0}")]
    PdfParse(String),

    /// The PDF document is encrypted.
    #[error("Document is encrypted")]
    Encrypted,

    /// Page index is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(u32, u32),

    /// The document exceeds the configured page limit.
    #[error("Document has {pages} pages (limit is {limit})")]
    TooManyPages {
        /// Pages in the document
        pages: u32,
        /// Configured maximum
        limit: u32,
    },

    /// A document referenced by a collection is absent.
    #[error("Document not found: {0}")]
    MissingDocument(String),

    /// Caller-supplied input is invalid.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// JSON (de)serialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error during rendering.
    #[error("Rendering error: {0}")]
    Render(String),
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::PdfParse(err.to_string()),
        }
    }
}
