//! Payment method extraction.

use lazy_static::lazy_static;
use regex::Captures;

use crate::models::receipt::PaymentMethod;

use super::patterns::{PAYMENT_BRAND, PAYMENT_LABELED};
use super::{first_match, ExtractionMatch, FieldExtractor, Rule};

/// Classification keywords, checked in order against the matched text.
const PAYMENT_KEYWORDS: [(&[&str], PaymentMethod); 4] = [
    (&["cash"], PaymentMethod::Cash),
    (&["credit", "visa", "mastercard", "amex"], PaymentMethod::CreditCard),
    (&["debit"], PaymentMethod::DebitCard),
    (&["paypal"], PaymentMethod::PayPal),
];

lazy_static! {
    static ref PAYMENT_RULES: [Rule<PaymentMethod>; 2] = [
        Rule::new("labeled", &PAYMENT_LABELED, classify_match),
        Rule::new("brand", &PAYMENT_BRAND, classify_match),
    ];
}

/// Payment method extractor.
#[derive(Debug, Default)]
pub struct PaymentExtractor;

impl PaymentExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl FieldExtractor for PaymentExtractor {
    type Output = PaymentMethod;

    fn extract(&self, text: &str) -> Option<ExtractionMatch<Self::Output>> {
        first_match(PAYMENT_RULES.as_slice(), text)
    }
}

fn classify_match(caps: &Captures<'_>) -> Option<PaymentMethod> {
    classify(&caps[0])
}

/// Classify a payment description by keyword containment.
pub fn classify(text: &str) -> Option<PaymentMethod> {
    let text = text.to_lowercase();

    PAYMENT_KEYWORDS
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| text.contains(k)))
        .map(|(_, method)| *method)
}
