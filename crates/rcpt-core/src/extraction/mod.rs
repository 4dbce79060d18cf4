//! Receipt field extraction module.
//!
//! Turns raw (OCR or text-layer) receipt text into an [`ExtractedRecord`].
//! Extraction is a total function: malformed input degrades to unset fields,
//! never to an error.

mod parser;
pub mod rules;

pub use parser::{ExtractionResult, ReceiptParser};

use crate::models::receipt::ExtractedRecord;

/// Trait for receipt extractors.
pub trait ReceiptExtractor {
    /// Extract receipt data from plain text.
    fn extract_from_text(&self, text: &str) -> ExtractedRecord;
}

/// Extract a record from receipt text with the default parser.
pub fn extract(text: &str) -> ExtractedRecord {
    ReceiptParser::new().extract(text)
}

/// Extract a record from text that may be absent (e.g. OCR produced nothing).
pub fn extract_opt(text: Option<&str>) -> ExtractedRecord {
    text.map(extract).unwrap_or_default()
}
