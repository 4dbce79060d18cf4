//! Total and tax amount extraction.

use lazy_static::lazy_static;
use regex::Captures;
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::models::receipt::Currency;

use super::patterns::{
    AMOUNT_TOKEN, CURRENCY_SYMBOL, NUMERIC_RUN, TAX_AMOUNT_FIRST, TAX_KEYWORD_FIRST,
    TOTAL_ADJACENT, TOTAL_AMOUNT_FIRST, TOTAL_KEYWORD_FIRST,
};
use super::{first_match, ExtractionMatch, FieldExtractor, Rule};

/// An amount parsed out of a labeled match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedAmount {
    /// Numeric value.
    pub value: Decimal,
    /// Currency, when the amount carried a symbol.
    pub currency: Option<Currency>,
}

lazy_static! {
    static ref TOTAL_RULES: [Rule<ParsedAmount>; 3] = [
        Rule::new("keyword-then-amount", &TOTAL_KEYWORD_FIRST, amount_from_match),
        Rule::new("amount-then-keyword", &TOTAL_AMOUNT_FIRST, amount_from_match),
        Rule::new("total-adjacent", &TOTAL_ADJACENT, amount_from_match),
    ];

    static ref TAX_RULES: [Rule<Decimal>; 2] = [
        Rule::new("keyword-then-amount", &TAX_KEYWORD_FIRST, tax_from_match),
        Rule::new("amount-then-keyword", &TAX_AMOUNT_FIRST, tax_from_match),
    ];
}

/// Total amount extractor. Also resolves the currency from the amount's symbol.
#[derive(Debug, Default)]
pub struct TotalExtractor;

impl TotalExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl FieldExtractor for TotalExtractor {
    type Output = ParsedAmount;

    fn extract(&self, text: &str) -> Option<ExtractionMatch<Self::Output>> {
        first_match(TOTAL_RULES.as_slice(), text)
    }
}

/// Tax amount extractor (tax, VAT, GST).
#[derive(Debug, Default)]
pub struct TaxExtractor;

impl TaxExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl FieldExtractor for TaxExtractor {
    type Output = Decimal;

    fn extract(&self, text: &str) -> Option<ExtractionMatch<Self::Output>> {
        first_match(TAX_RULES.as_slice(), text)
    }
}

fn amount_from_match(caps: &Captures<'_>) -> Option<ParsedAmount> {
    parse_amount(&caps[0])
}

fn tax_from_match(caps: &Captures<'_>) -> Option<Decimal> {
    parse_amount(&caps[0]).map(|amount| amount.value)
}

/// Parse the first amount token in a labeled match (e.g. `"Total: $1,50"`).
///
/// Commas are treated as decimal points and the leading numeric run is taken
/// as the value, so `"$1,50"` parses as 1.50 and `"1,234.56"` does not parse.
pub fn parse_amount(matched: &str) -> Option<ParsedAmount> {
    let token = AMOUNT_TOKEN.find(matched)?;
    let normalized = token.as_str().replace(',', ".");

    let run = NUMERIC_RUN.find(&normalized)?;
    let value = parse_decimal(run.as_str())?;

    let currency = CURRENCY_SYMBOL
        .find(&normalized)
        .and_then(|m| m.as_str().chars().next())
        .map(Currency::from_symbol);

    Some(ParsedAmount { value, currency })
}

/// Parse a run of digits and periods. A lone leading or trailing period is
/// accepted (`".5"`, `"12."`); more than one period is not.
pub fn parse_decimal(run: &str) -> Option<Decimal> {
    if run.matches('.').count() > 1 {
        return None;
    }

    let trimmed = run.strip_suffix('.').unwrap_or(run);
    if trimmed.is_empty() {
        return None;
    }

    if trimmed.starts_with('.') {
        Decimal::from_str(&format!("0{}", trimmed)).ok()
    } else {
        Decimal::from_str(trimmed).ok()
    }
}
