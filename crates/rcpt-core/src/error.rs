//! Error types for the rcpt-core library.
//!
//! Field extraction itself never fails; these cover the intake around it
//! (reading files, validating PDFs, loading configuration).

use thiserror::Error;

/// Main error type for the rcpt library.
#[derive(Error, Debug)]
pub enum RcptError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF intake.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Invalid page number requested.
    #[error("invalid page number: {0}")]
    InvalidPage(u32),

    /// The file is not a PDF.
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// The file exceeds the configured size limit.
    #[error("file is too large: {size} bytes (limit {limit})")]
    TooLarge { size: u64, limit: u64 },
}

/// Result type for the rcpt library.
pub type Result<T> = std::result::Result<T, RcptError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_error_converts() {
        let err: RcptError = PdfError::NoPages.into();
        assert_eq!(err.to_string(), "PDF error: PDF has no pages");
    }

    #[test]
    fn test_too_large_message() {
        let err = PdfError::TooLarge { size: 20, limit: 10 };
        assert_eq!(err.to_string(), "file is too large: 20 bytes (limit 10)");
    }
}
