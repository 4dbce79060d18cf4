//! Receipt number extraction.

use lazy_static::lazy_static;
use regex::Captures;

use super::patterns::{RECEIPT_NUMBER_LABELED, RECEIPT_NUMBER_MARKER, TRAILING_TOKEN};
use super::{first_match, ExtractionMatch, FieldExtractor, Rule};

lazy_static! {
    static ref RECEIPT_NUMBER_RULES: [Rule<String>; 2] = [
        Rule::new("labeled", &RECEIPT_NUMBER_LABELED, trailing_token),
        Rule::new("marker", &RECEIPT_NUMBER_MARKER, trailing_token),
    ];
}

/// Receipt, invoice, order or transaction number extractor.
#[derive(Debug, Default)]
pub struct ReceiptNumberExtractor;

impl ReceiptNumberExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl FieldExtractor for ReceiptNumberExtractor {
    type Output = String;

    fn extract(&self, text: &str) -> Option<ExtractionMatch<Self::Output>> {
        first_match(RECEIPT_NUMBER_RULES.as_slice(), text)
    }
}

fn trailing_token(caps: &Captures<'_>) -> Option<String> {
    TRAILING_TOKEN
        .find(&caps[0])
        .map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labeled_number() {
        let result = ReceiptNumberExtractor::new().extract("Receipt #: 004512").unwrap();
        assert_eq!(result.value, "004512");
        assert_eq!(result.rule, "labeled");
    }

    #[test]
    fn test_order_number_with_hyphen() {
        let result = ReceiptNumberExtractor::new()
            .extract("ORDER NUMBER: A-1001\nThanks")
            .unwrap();
        assert_eq!(result.value, "A-1001");
    }

    #[test]
    fn test_bare_marker() {
        let result = ReceiptNumberExtractor::new().extract("Ticket # 8812").unwrap();
        assert_eq!(result.value, "8812");
        assert_eq!(result.rule, "marker");
    }

    #[test]
    fn test_none() {
        assert!(ReceiptNumberExtractor::new().extract("Thank you").is_none());
    }
}
