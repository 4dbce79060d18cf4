//! Core library for receipt processing.
//!
//! This crate provides:
//! - PDF intake (upload checks, validation, text-layer extraction)
//! - Receipt field extraction (merchant, date, total, tax, payment method,
//!   receipt number, line items) from raw OCR text
//! - Receipt data models and configuration

pub mod error;
pub mod extraction;
pub mod models;
pub mod pdf;

pub use error::{PdfError, RcptError, Result};
pub use extraction::{extract, extract_opt, ExtractionResult, ReceiptExtractor, ReceiptParser};
pub use models::config::RcptConfig;
pub use models::receipt::{Currency, ExtractedRecord, LineItem, PaymentMethod};
pub use pdf::{validate_pdf, PdfExtractor, PdfProcessor, PdfValidation};
