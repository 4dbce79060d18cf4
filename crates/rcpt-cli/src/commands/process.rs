//! Process command - extract data from a single receipt.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::{debug, info, warn};

use rcpt_core::extraction::{ExtractionResult, ReceiptParser};
use rcpt_core::models::config::RcptConfig;
use rcpt_core::models::receipt::ExtractedRecord;

use super::{load_config, read_receipt_text, TextSource};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (PDF with a text layer, OCR text file, or `-` for stdin)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Validate extracted data
    #[arg(long)]
    validate: bool,

    /// Include the raw text in JSON output
    #[arg(long)]
    raw_text: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    /// File extension for files written in this format.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

/// JSON document written for one processed receipt.
#[derive(Serialize)]
struct ReceiptOutput<'a> {
    #[serde(flatten)]
    record: &'a ExtractedRecord,
    source: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    warnings: &'a Vec<String>,
    processing_time_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    raw_text: Option<&'a str>,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let mut config = load_config(config_path)?;
    if args.raw_text {
        config.output.include_raw_text = true;
    }
    if args.validate {
        config.extraction.validate = true;
    }

    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {msg}")?
            .progress_chars("##-"),
    );

    pb.set_message("Extracting receipt data...");
    pb.set_position(10);
    let (result, source) = match process_input(&args.input, &config) {
        Ok(processed) => processed,
        Err(e) => {
            pb.abandon();
            return Err(e);
        }
    };
    pb.set_position(100);
    pb.finish_and_clear();

    if config.extraction.validate {
        report_issues(&result.record);
    }

    let output = format_result(&result, source, args.format, &config)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Read the input and run extraction on it.
pub fn process_input(
    input: &Path,
    config: &RcptConfig,
) -> anyhow::Result<(ExtractionResult, TextSource)> {
    let (text, source) = read_receipt_text(input, config)?;
    debug!("Read {} chars from {}", text.chars().count(), source.as_str());

    if text.trim().is_empty() {
        warn!("{} contains no text", input.display());
    }

    let parser = ReceiptParser::new().with_line_items(config.extraction.extract_line_items);
    Ok((parser.parse(&text), source))
}

fn report_issues(record: &ExtractedRecord) {
    let issues = record.validate();
    if !issues.is_empty() {
        eprintln!("{}", style("Validation issues:").yellow());
        for issue in &issues {
            eprintln!("  - {}", issue);
        }
    }
}

/// Render an extraction result in the requested format.
pub fn format_result(
    result: &ExtractionResult,
    source: TextSource,
    format: OutputFormat,
    config: &RcptConfig,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => format_json(result, source, config),
        OutputFormat::Csv => format_csv(&result.record),
        OutputFormat::Text => Ok(format_text(&result.record)),
    }
}

fn format_json(
    result: &ExtractionResult,
    source: TextSource,
    config: &RcptConfig,
) -> anyhow::Result<String> {
    let output = ReceiptOutput {
        record: &result.record,
        source: source.as_str(),
        warnings: &result.warnings,
        processing_time_ms: result.processing_time_ms,
        raw_text: config
            .output
            .include_raw_text
            .then_some(result.raw_text.as_str()),
    };

    if config.output.pretty {
        Ok(serde_json::to_string_pretty(&output)?)
    } else {
        Ok(serde_json::to_string(&output)?)
    }
}

fn format_csv(record: &ExtractedRecord) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "merchant_name",
        "purchased_at",
        "total_amount",
        "currency",
        "tax_amount",
        "payment_method",
        "receipt_number",
        "item_count",
    ])?;

    wtr.write_record([
        record.merchant_name.clone().unwrap_or_default(),
        record
            .purchased_at
            .map(|d| d.date().to_string())
            .unwrap_or_default(),
        opt_to_string(record.total_amount),
        opt_to_string(record.currency),
        opt_to_string(record.tax_amount),
        opt_to_string(record.payment_method),
        record.receipt_number.clone().unwrap_or_default(),
        record.items.len().to_string(),
    ])?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(record: &ExtractedRecord) -> String {
    let mut output = String::new();
    let currency = record.currency.map(|c| c.code()).unwrap_or("");

    output.push_str(&format!(
        "Merchant: {}\n",
        record.merchant_name.as_deref().unwrap_or("-")
    ));
    output.push_str(&format!(
        "Date: {}\n",
        record
            .purchased_at
            .map(|d| d.date().to_string())
            .unwrap_or_else(|| "-".to_string())
    ));
    if let Some(number) = &record.receipt_number {
        output.push_str(&format!("Receipt #: {}\n", number));
    }
    if let Some(method) = record.payment_method {
        output.push_str(&format!("Paid by: {}\n", method));
    }

    if !record.items.is_empty() {
        output.push_str("\nItems:\n");
        for item in &record.items {
            output.push_str(&format!(
                "  {} x {} @ {} = {}\n",
                item.quantity, item.item_name, item.unit_price, item.total_price
            ));
        }
    }

    output.push('\n');
    if let Some(tax) = record.tax_amount {
        output.push_str(&format!("Tax:   {} {}\n", tax, currency));
    }
    match record.total_amount {
        Some(total) => output.push_str(&format!("Total: {} {}\n", total, currency)),
        None => output.push_str("Total: -\n"),
    }

    output
}

fn opt_to_string<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
