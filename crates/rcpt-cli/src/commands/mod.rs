//! CLI subcommands and the input handling they share.

pub mod batch;
pub mod config;
pub mod process;
pub mod validate;

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use rcpt_core::models::config::RcptConfig;
use rcpt_core::pdf::{check_upload, validate_pdf, PdfExtractor, PdfProcessor};

/// Where the receipt text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSource {
    /// Embedded PDF text layer.
    PdfText,
    /// Plain text file holding OCR output.
    OcrText,
    /// Standard input.
    Stdin,
}

impl TextSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextSource::PdfText => "pdf_text",
            TextSource::OcrText => "ocr_text",
            TextSource::Stdin => "stdin",
        }
    }
}

/// Load configuration from an explicit path, the default location, or defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<RcptConfig> {
    if let Some(path) = config_path {
        return Ok(RcptConfig::from_file(Path::new(path))?);
    }

    let default_path = config::default_config_path();
    if default_path.exists() {
        debug!("Using config from {}", default_path.display());
        Ok(RcptConfig::from_file(&default_path)?)
    } else {
        Ok(RcptConfig::default())
    }
}

/// True for files `read_receipt_text` accepts.
pub fn is_supported(path: &Path) -> bool {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    matches!(ext.to_lowercase().as_str(), "pdf" | "txt")
}

/// Read receipt text from a PDF text layer, a text file, or stdin (`-`).
pub fn read_receipt_text(
    input: &Path,
    config: &RcptConfig,
) -> anyhow::Result<(String, TextSource)> {
    if input == Path::new("-") {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        return Ok((text, TextSource::Stdin));
    }

    if !input.exists() {
        anyhow::bail!("Input file not found: {}", input.display());
    }

    let extension = input
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "pdf" => Ok((read_pdf_text(input, config)?, TextSource::PdfText)),
        "txt" => Ok((fs::read_to_string(input)?, TextSource::OcrText)),
        _ => anyhow::bail!("Unsupported file format: {}", extension),
    }
}

fn read_pdf_text(input: &Path, config: &RcptConfig) -> anyhow::Result<String> {
    let size = fs::metadata(input)?.len();
    check_upload(input, size, &config.pdf)?;

    let data = fs::read(input)?;
    let validation = validate_pdf(&data, &config.pdf);
    if !validation.is_valid {
        anyhow::bail!(
            "Invalid PDF {}: {}",
            input.display(),
            validation.invalid_reason.unwrap_or_default()
        );
    }

    let mut extractor =
        PdfExtractor::new().with_empty_password_decryption(config.pdf.decrypt_empty_password);
    extractor.load(&data)?;
    info!("Loaded {} ({} pages)", input.display(), extractor.page_count());

    match extractor.text_layer(config.pdf.min_text_length) {
        Some(text) => Ok(text),
        None => anyhow::bail!(
            "No text could be extracted from {}; run OCR and pass the text file instead",
            input.display()
        ),
    }
}

/// Output path for `input` inside `dir` with the given extension.
pub fn output_path_for(input: &Path, dir: &Path, extension: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("receipt");
    dir.join(format!("{}.{}", stem, extension))
}
