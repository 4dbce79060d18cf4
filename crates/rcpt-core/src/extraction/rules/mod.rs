//! Rule-based field extractors for receipts.
//!
//! Every field is resolved by an ordered list of [`Rule`]s. Rules are tried in
//! order and the first one whose pattern matches *and* whose parser yields a
//! value wins; later rules are never consulted.

pub mod amounts;
pub mod dates;
pub mod items;
pub mod merchant;
pub mod patterns;
pub mod payment;
pub mod receipt_number;

pub use amounts::{parse_amount, ParsedAmount, TaxExtractor, TotalExtractor};
pub use dates::DateExtractor;
pub use items::{extract_line_items, LineItemExtractor};
pub use merchant::MerchantExtractor;
pub use payment::PaymentExtractor;
pub use receipt_number::ReceiptNumberExtractor;

use regex::{Captures, Regex};

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<ExtractionMatch<Self::Output>>;
}

/// A pattern paired with the function that turns its match into a value.
pub struct Rule<T> {
    /// Short name, used in logs.
    pub name: &'static str,
    /// Pattern searched for anywhere in the text.
    pub pattern: &'static Regex,
    /// Converts the first match into a value; `None` falls through.
    pub parse: fn(&Captures<'_>) -> Option<T>,
}

impl<T> Rule<T> {
    pub fn new(
        name: &'static str,
        pattern: &'static Regex,
        parse: fn(&Captures<'_>) -> Option<T>,
    ) -> Self {
        Self { name, pattern, parse }
    }

    /// Apply the rule to the first occurrence of its pattern.
    pub fn apply(&self, text: &str) -> Option<ExtractionMatch<T>> {
        let caps = self.pattern.captures(text)?;
        let value = (self.parse)(&caps)?;
        let full_match = caps.get(0)?;

        Some(
            ExtractionMatch::new(value, self.name, full_match.as_str())
                .with_position(full_match.start(), full_match.end()),
        )
    }
}

/// Evaluate rules in order and return the first successful one.
pub fn first_match<T>(rules: &[Rule<T>], text: &str) -> Option<ExtractionMatch<T>> {
    rules.iter().find_map(|rule| rule.apply(text))
}

/// An extracted value together with where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Name of the rule that produced it.
    pub rule: &'static str,
    /// Position in source text.
    pub position: Option<(usize, usize)>,
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, rule: &'static str, source: impl Into<String>) -> Self {
        Self {
            value,
            rule,
            position: None,
            source: source.into(),
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}
