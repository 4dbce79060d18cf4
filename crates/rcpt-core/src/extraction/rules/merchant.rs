//! Merchant name extraction.

use super::patterns::DATE_DMY_SLASH;
use super::{ExtractionMatch, FieldExtractor};

/// Merchants are printed at the top of the receipt; only this many lines are
/// considered.
const MERCHANT_SCAN_LINES: usize = 3;

/// Merchant name extractor.
#[derive(Debug, Default)]
pub struct MerchantExtractor;

impl MerchantExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl FieldExtractor for MerchantExtractor {
    type Output = String;

    fn extract(&self, text: &str) -> Option<ExtractionMatch<Self::Output>> {
        text.trim()
            .split('\n')
            .take(MERCHANT_SCAN_LINES)
            .map(str::trim)
            .find(|line| is_merchant_line(line))
            .map(|line| ExtractionMatch::new(line.to_string(), "top-lines", line))
    }
}

fn is_merchant_line(line: &str) -> bool {
    !line.is_empty()
        && line.chars().count() > 3
        && !line.starts_with("http")
        && !DATE_DMY_SLASH.is_match(line)
}
