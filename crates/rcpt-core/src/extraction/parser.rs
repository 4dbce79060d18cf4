//! Receipt parser combining the per-field rules into one record.

use std::time::Instant;

use tracing::{debug, info};

use crate::models::receipt::ExtractedRecord;

use super::rules::{
    DateExtractor, FieldExtractor, LineItemExtractor, MerchantExtractor, PaymentExtractor,
    ReceiptNumberExtractor, TaxExtractor, TotalExtractor,
};
use super::ReceiptExtractor;

/// Result of receipt extraction.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// Extracted record.
    pub record: ExtractedRecord,
    /// Raw text the record was extracted from.
    pub raw_text: String,
    /// Extraction warnings.
    pub warnings: Vec<String>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Rule-based receipt parser.
///
/// Holds no state between calls; a single parser can be shared across
/// threads.
#[derive(Debug, Clone)]
pub struct ReceiptParser {
    /// Whether to extract line items.
    line_items: bool,
}

impl ReceiptParser {
    /// Create a new parser with default settings.
    pub fn new() -> Self {
        Self { line_items: true }
    }

    /// Enable or disable line item extraction.
    pub fn with_line_items(mut self, enabled: bool) -> Self {
        self.line_items = enabled;
        self
    }

    /// Extract a record from text.
    ///
    /// Never fails: every field is resolved independently and left unset when
    /// nothing matches.
    pub fn extract(&self, text: &str) -> ExtractedRecord {
        let mut record = ExtractedRecord::default();
        if text.is_empty() {
            return record;
        }

        if let Some(m) = MerchantExtractor::new().extract(text) {
            debug!("merchant_name from {}: {:?}", m.rule, m.value);
            record.merchant_name = Some(m.value);
        }

        if let Some(m) = DateExtractor::new().extract(text) {
            debug!("purchased_at from {}: {}", m.rule, m.value);
            record.purchased_at = Some(m.value);
        }

        if let Some(m) = TotalExtractor::new().extract(text) {
            debug!("total_amount from {}: {:?}", m.rule, m.source);
            record.total_amount = Some(m.value.value);
            record.currency = m.value.currency;
        }

        if let Some(m) = PaymentExtractor::new().extract(text) {
            debug!("payment_method from {}: {}", m.rule, m.value);
            record.payment_method = Some(m.value);
        }

        if let Some(m) = TaxExtractor::new().extract(text) {
            debug!("tax_amount from {}: {:?}", m.rule, m.source);
            record.tax_amount = Some(m.value);
        }

        if let Some(m) = ReceiptNumberExtractor::new().extract(text) {
            debug!("receipt_number from {}: {:?}", m.rule, m.value);
            record.receipt_number = Some(m.value);
        }

        if self.line_items {
            record.items = LineItemExtractor::new().extract_all(text);
            debug!("Extracted {} line items", record.items.len());
        }

        record
    }

    /// Parse a receipt and collect warnings about unset fields.
    pub fn parse(&self, text: &str) -> ExtractionResult {
        let start = Instant::now();

        info!("Parsing receipt from {} characters of text", text.chars().count());

        let record = self.extract(text);

        let mut warnings: Vec<String> = record
            .missing_fields()
            .into_iter()
            .map(|field| format!("Could not extract {}", field))
            .collect();

        if self.line_items && record.items.is_empty() {
            warnings.push("Could not extract line items".to_string());
        }

        debug!(
            "Extracted receipt with {} missing fields and {} items",
            record.missing_fields().len(),
            record.items.len()
        );

        ExtractionResult {
            record,
            raw_text: text.to_string(),
            warnings,
            processing_time_ms: start.elapsed().as_millis() as u64,
        }
    }
}

impl Default for ReceiptParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ReceiptExtractor for ReceiptParser {
    fn extract_from_text(&self, text: &str) -> ExtractedRecord {
        self.extract(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    use crate::models::receipt::{Currency, LineItem, PaymentMethod};

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    const GROCERY: &str = "FRESH MART GROCERY
42 Elm Street
Springfield

Date: 14/03/2024
Receipt #: 000123

2 x Coffee $8.00
Bagel $2.50

TAX $0.84
Total: $11.34
Paid by VISA
";

    #[test]
    fn test_parse_grocery_receipt() {
        let record = ReceiptParser::new().extract(GROCERY);

        assert_eq!(record.merchant_name.as_deref(), Some("FRESH MART GROCERY"));
        assert_eq!(
            record.purchased_at,
            NaiveDate::from_ymd_opt(2024, 3, 14).unwrap().and_hms_opt(0, 0, 0)
        );
        assert_eq!(record.total_amount, Some(dec("11.34")));
        assert_eq!(record.currency, Some(Currency::Usd));
        assert_eq!(record.tax_amount, Some(dec("0.84")));
        assert_eq!(record.payment_method, Some(PaymentMethod::CreditCard));
        assert_eq!(record.receipt_number.as_deref(), Some("000123"));

        assert_eq!(
            record.items[0],
            LineItem {
                item_name: "Coffee".to_string(),
                quantity: dec("2"),
                unit_price: dec("4.00"),
                total_price: dec("8.00"),
            }
        );
        assert_eq!(record.items[1].item_name, "Bagel");
    }

    #[test]
    fn test_empty_input() {
        let record = ReceiptParser::new().extract("");
        assert_eq!(record, ExtractedRecord::default());
        assert!(record.items.is_empty());
    }

    #[test]
    fn test_idempotent() {
        let parser = ReceiptParser::new();
        assert_eq!(parser.extract(GROCERY), parser.extract(GROCERY));
    }

    #[test]
    fn test_without_line_items() {
        let record = ReceiptParser::new().with_line_items(false).extract(GROCERY);
        assert!(record.items.is_empty());
        assert_eq!(record.total_amount, Some(dec("11.34")));
    }

    #[test]
    fn test_parse_warnings() {
        let result = ReceiptParser::new().parse("Total: $45.99");
        assert_eq!(result.record.total_amount, Some(dec("45.99")));
        assert!(result.warnings.contains(&"Could not extract tax_amount".to_string()));
        assert!(!result.warnings.iter().any(|w| w.contains("total_amount")));
        assert_eq!(result.raw_text, "Total: $45.99");
    }
}
