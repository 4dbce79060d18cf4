//! Validate command - check that uploads are usable PDF receipts.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use console::style;
use serde::Serialize;
use tracing::debug;

use rcpt_core::models::config::RcptConfig;
use rcpt_core::pdf::{check_upload, validate_pdf, PdfValidation};

use super::load_config;

/// Arguments for the validate command.
#[derive(Args)]
pub struct ValidateArgs {
    /// Files to check
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Print results as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct FileValidation {
    path: String,
    #[serde(flatten)]
    validation: PdfValidation,
}

pub async fn run(args: ValidateArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    let results: Vec<FileValidation> = args
        .inputs
        .iter()
        .map(|path| FileValidation {
            path: path.display().to_string(),
            validation: validate_file(path, &config),
        })
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        for result in &results {
            match &result.validation.invalid_reason {
                None => println!(
                    "{} {} ({} pages)",
                    style("✓").green(),
                    result.path,
                    result.validation.page_count.unwrap_or(0)
                ),
                Some(reason) => println!("{} {}: {}", style("✗").red(), result.path, reason),
            }
        }
    }

    let invalid = results.iter().filter(|r| !r.validation.is_valid).count();
    if invalid > 0 {
        anyhow::bail!("{} of {} files are not valid PDFs", invalid, results.len());
    }

    Ok(())
}

fn validate_file(path: &Path, config: &RcptConfig) -> PdfValidation {
    let checked = fs::metadata(path)
        .map_err(|e| e.to_string())
        .and_then(|meta| check_upload(path, meta.len(), &config.pdf).map_err(|e| e.to_string()))
        .and_then(|()| fs::read(path).map_err(|e| e.to_string()));

    match checked {
        Ok(data) => validate_pdf(&data, &config.pdf),
        Err(reason) => {
            debug!("{} rejected before parsing: {}", path.display(), reason);
            PdfValidation {
                is_valid: false,
                invalid_reason: Some(reason),
                page_count: None,
            }
        }
    }
}
