//! Common regex patterns for receipt field extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Date patterns, in priority order
    pub static ref DATE_DMY_SLASH: Regex = Regex::new(
        r"(\d{2})/(\d{2})/(\d{4})"
    ).unwrap();

    pub static ref DATE_DMY_DASH: Regex = Regex::new(
        r"(\d{2})-(\d{2})-(\d{4})"
    ).unwrap();

    pub static ref DATE_YMD_SLASH: Regex = Regex::new(
        r"(\d{4})/(\d{2})/(\d{2})"
    ).unwrap();

    pub static ref DATE_YMD_DASH: Regex = Regex::new(
        r"(\d{4})-(\d{2})-(\d{2})"
    ).unwrap();

    pub static ref DATE_DAY_MONTH_YEAR: Regex = Regex::new(
        r"(\d{1,2})\s+((?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)[a-z]*)\s+(\d{4})"
    ).unwrap();

    // Total amount
    pub static ref TOTAL_KEYWORD_FIRST: Regex = Regex::new(
        r"(?i)(?:total|amount|sum|balance).{0,20}(?:[$€£¥]|\d)\s*[\d,.]+"
    ).unwrap();

    pub static ref TOTAL_AMOUNT_FIRST: Regex = Regex::new(
        r"(?i)(?:[$€£¥]|\d)\s*[\d,.]+\s*(?:total|amount)"
    ).unwrap();

    pub static ref TOTAL_ADJACENT: Regex = Regex::new(
        r"(?i)total\s*(?:[$€£¥]|\d)\s*[\d,.]+"
    ).unwrap();

    // Tax amount
    pub static ref TAX_KEYWORD_FIRST: Regex = Regex::new(
        r"(?i)(?:tax|vat|gst).{0,15}(?:[$€£¥]|\d)\s*[\d,.]+"
    ).unwrap();

    pub static ref TAX_AMOUNT_FIRST: Regex = Regex::new(
        r"(?i)(?:[$€£¥]|\d)\s*[\d,.]+\s*(?:tax|vat|gst)"
    ).unwrap();

    // Amount token inside a total/tax match, and its parts
    pub static ref AMOUNT_TOKEN: Regex = Regex::new(
        r"(?:[$€£¥]|\d)\s*[\d,.]+"
    ).unwrap();

    pub static ref NUMERIC_RUN: Regex = Regex::new(
        r"[\d.]+"
    ).unwrap();

    pub static ref CURRENCY_SYMBOL: Regex = Regex::new(
        r"[$€£¥]"
    ).unwrap();

    // Payment method
    pub static ref PAYMENT_LABELED: Regex = Regex::new(
        r"(?i)(?:paid|payment|method).{0,15}(?:cash|credit|debit|visa|mastercard|amex|paypal)"
    ).unwrap();

    pub static ref PAYMENT_BRAND: Regex = Regex::new(
        r"(?i)(?:cash|credit|debit|visa|mastercard|amex|paypal)"
    ).unwrap();

    // Receipt number
    pub static ref RECEIPT_NUMBER_LABELED: Regex = Regex::new(
        r"(?i)(?:receipt|invoice|order|transaction).{0,5}(?:#|no|num|number).{0,5}[\w\d-]+"
    ).unwrap();

    pub static ref RECEIPT_NUMBER_MARKER: Regex = Regex::new(
        r"(?i)(?:#|no|num|number).{0,5}[\w\d-]+"
    ).unwrap();

    pub static ref TRAILING_TOKEN: Regex = Regex::new(
        r"[\w\d-]+$"
    ).unwrap();

    // Line items: "2 x Coffee $8.00", "Bagel ....... 2.50"
    pub static ref ITEM_WITH_QUANTITY: Regex = Regex::new(
        r"(\d+)?\s*[xX]?\s*([a-zA-Z\s]+)[-\s.]*(\$?\d+\.\d{2})"
    ).unwrap();

    pub static ref ITEM_PRICE_ONLY: Regex = Regex::new(
        r"([a-zA-Z\s]+)[-\s.]*(\$?\d+\.\d{2})"
    ).unwrap();
}
