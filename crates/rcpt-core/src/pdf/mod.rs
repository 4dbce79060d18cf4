//! PDF intake: upload checks, validation and text-layer extraction.

mod extractor;

pub use extractor::PdfExtractor;

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::PdfError;
use crate::models::config::PdfConfig;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Trait for PDF processing implementations.
pub trait PdfProcessor {
    /// Load a PDF from bytes.
    fn load(&mut self, data: &[u8]) -> Result<()>;

    /// Get the number of pages in the PDF.
    fn page_count(&self) -> u32;

    /// Extract text from the entire PDF.
    fn extract_text(&self) -> Result<String>;

    /// Extract text from a specific page (1-indexed).
    fn extract_page_text(&self, page: u32) -> Result<String>;
}

/// Outcome of validating an uploaded file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PdfValidation {
    /// Whether the file is a usable PDF.
    pub is_valid: bool,
    /// Why the file was rejected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invalid_reason: Option<String>,
    /// Number of pages, when the file loaded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_count: Option<u32>,
}

impl PdfValidation {
    fn valid(page_count: u32) -> Self {
        Self {
            is_valid: true,
            invalid_reason: None,
            page_count: Some(page_count),
        }
    }

    fn invalid(reason: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            invalid_reason: Some(reason.into()),
            page_count: None,
        }
    }
}

/// Validate PDF bytes: the document must load and have at least one page.
///
/// Encrypted documents are only accepted when `config` allows empty-password
/// decryption.
pub fn validate_pdf(data: &[u8], config: &PdfConfig) -> PdfValidation {
    let mut extractor =
        PdfExtractor::new().with_empty_password_decryption(config.decrypt_empty_password);
    match extractor.load(data) {
        Ok(()) => PdfValidation::valid(extractor.page_count()),
        Err(e) => {
            debug!("PDF rejected: {}", e);
            PdfValidation::invalid(e.to_string())
        }
    }
}

/// Check that an upload looks like a PDF and fits the size limit.
pub fn check_upload(path: &Path, size: u64, config: &PdfConfig) -> Result<()> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    if extension != "pdf" {
        return Err(PdfError::UnsupportedFormat(format!(
            "{} (only PDF files are allowed)",
            path.display()
        )));
    }

    if size > config.max_file_size {
        return Err(PdfError::TooLarge {
            size,
            limit: config.max_file_size,
        });
    }

    Ok(())
}

#[cfg(test)]
pub(crate) mod test_support {
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Document, Object, Stream};

    /// Build an in-memory PDF with one text line per page.
    pub fn build_pdf(pages: &[&str]) -> Vec<u8> {
        save(build_document(pages))
    }

    /// Like `build_pdf`, but marked as encrypted with an empty user password.
    pub fn build_encrypted_pdf(pages: &[&str]) -> Vec<u8> {
        let mut doc = build_document(pages);
        let encrypt_id = doc.add_object(dictionary! {
            "Filter" => "Standard",
            "V" => 2,
            "R" => 3,
            "Length" => 128,
            "O" => Object::string_literal(vec![0x42u8; 32]),
            "P" => -4,
            "CF" => dictionary! {
                "StdCF" => dictionary! { "CFM" => "V2" },
            },
        });
        doc.trailer.set("Encrypt", encrypt_id);
        doc.trailer.set(
            "ID",
            vec![
                Object::string_literal(vec![0x17u8; 16]),
                Object::string_literal(vec![0x17u8; 16]),
            ],
        );
        save(doc)
    }

    fn save(mut doc: Document) -> Vec<u8> {
        let mut data = Vec::new();
        doc.save_to(&mut data).unwrap();
        data
    }

    fn build_document(pages: &[&str]) -> Document {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut kids: Vec<Object> = Vec::new();
        for text in pages {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 12.into()]),
                    Operation::new("Td", vec![72.into(), 720.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*text)]),
                    Operation::new("ET", vec![]),
                ],
            };
            let content_id =
                doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::{build_encrypted_pdf, build_pdf};
    use super::*;

    #[test]
    fn test_validate_single_page() {
        let validation = validate_pdf(&build_pdf(&["Total: $45.99"]), &PdfConfig::default());
        assert!(validation.is_valid);
        assert_eq!(validation.invalid_reason, None);
        assert_eq!(validation.page_count, Some(1));
    }

    #[test]
    fn test_validate_no_pages() {
        let validation = validate_pdf(&build_pdf(&[]), &PdfConfig::default());
        assert!(!validation.is_valid);
        assert_eq!(validation.invalid_reason.as_deref(), Some("PDF has no pages"));
    }

    #[test]
    fn test_validate_garbage() {
        let validation = validate_pdf(b"this is not a pdf", &PdfConfig::default());
        assert!(!validation.is_valid);
        assert!(validation
            .invalid_reason
            .unwrap()
            .starts_with("failed to parse PDF"));
    }

    #[test]
    fn test_validate_encrypted_follows_config() {
        let data = build_encrypted_pdf(&["Total: $45.99"]);

        let validation = validate_pdf(&data, &PdfConfig::default());
        assert!(validation.is_valid);
        assert_eq!(validation.page_count, Some(1));

        let config = PdfConfig {
            decrypt_empty_password: false,
            ..PdfConfig::default()
        };
        let validation = validate_pdf(&data, &config);
        assert!(!validation.is_valid);
        assert_eq!(validation.invalid_reason.as_deref(), Some("PDF is encrypted"));
    }

    #[test]
    fn test_check_upload() {
        let config = PdfConfig::default();

        assert!(check_upload(Path::new("receipt.PDF"), 1024, &config).is_ok());
        assert!(matches!(
            check_upload(Path::new("receipt.png"), 1024, &config),
            Err(PdfError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            check_upload(Path::new("receipt.pdf"), config.max_file_size + 1, &config),
            Err(PdfError::TooLarge { .. })
        ));
    }
}
