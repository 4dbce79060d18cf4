//! Receipt data models produced by field extraction.

use std::fmt;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Structured fields extracted from the text of one receipt.
///
/// Every scalar field is optional: a field that could not be found or parsed
/// is simply left unset. The record carries no identifiers or timestamps of
/// its own; those belong to whatever stores it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedRecord {
    /// Merchant name, taken from the top of the receipt.
    pub merchant_name: Option<String>,

    /// Purchase date (midnight; receipts rarely carry a reliable time).
    pub purchased_at: Option<NaiveDateTime>,

    /// Total amount.
    pub total_amount: Option<Decimal>,

    /// Currency of the total amount.
    pub currency: Option<Currency>,

    /// Payment method.
    pub payment_method: Option<PaymentMethod>,

    /// Tax amount.
    pub tax_amount: Option<Decimal>,

    /// Receipt, invoice, order or transaction number.
    pub receipt_number: Option<String>,

    /// Line items in the order they appear in the text.
    #[serde(default)]
    pub items: Vec<LineItem>,
}

/// A single purchased line on the receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Item description.
    pub item_name: String,

    /// Quantity (1 when the line carries none).
    pub quantity: Decimal,

    /// Price per unit.
    pub unit_price: Decimal,

    /// Price for the whole line.
    pub total_price: Decimal,
}

/// Currencies recognised from their symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    #[serde(rename = "USD")]
    Usd,
    #[serde(rename = "EUR")]
    Eur,
    #[serde(rename = "GBP")]
    Gbp,
    #[serde(rename = "JPY")]
    Jpy,
}

impl Currency {
    /// Map a currency symbol to its currency. Unknown symbols map to USD.
    pub fn from_symbol(symbol: char) -> Self {
        match symbol {
            '$' => Currency::Usd,
            '€' => Currency::Eur,
            '£' => Currency::Gbp,
            '¥' => Currency::Jpy,
            _ => Currency::Usd,
        }
    }

    /// ISO 4217 code.
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Jpy => "JPY",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Payment method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "Cash")]
    Cash,
    #[serde(rename = "Credit Card")]
    CreditCard,
    #[serde(rename = "Debit Card")]
    DebitCard,
    #[serde(rename = "PayPal")]
    PayPal,
}

impl PaymentMethod {
    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::CreditCard => "Credit Card",
            PaymentMethod::DebitCard => "Debit Card",
            PaymentMethod::PayPal => "PayPal",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl ExtractedRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// True when nothing at all was extracted.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Names of the scalar fields that were left unset.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();

        if self.merchant_name.is_none() {
            missing.push("merchant_name");
        }
        if self.purchased_at.is_none() {
            missing.push("purchased_at");
        }
        if self.total_amount.is_none() {
            missing.push("total_amount");
        }
        if self.currency.is_none() {
            missing.push("currency");
        }
        if self.payment_method.is_none() {
            missing.push("payment_method");
        }
        if self.tax_amount.is_none() {
            missing.push("tax_amount");
        }
        if self.receipt_number.is_none() {
            missing.push("receipt_number");
        }

        missing
    }

    /// Sum of all line item totals, or `None` if the sum overflows.
    pub fn items_total(&self) -> Option<Decimal> {
        self.items
            .iter()
            .try_fold(Decimal::ZERO, |sum, item| sum.checked_add(item.total_price))
    }

    /// Check the record for inconsistencies and return any issues found.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if self.merchant_name.is_none() {
            issues.push("Missing merchant name".to_string());
        }

        let Some(total) = self.total_amount else {
            issues.push("Missing total amount".to_string());
            return issues;
        };

        if let Some(tax) = self.tax_amount {
            if tax > total {
                issues.push(format!("Tax amount ({}) exceeds total ({})", tax, total));
            }
        }

        if !self.items.is_empty() {
            match self.items_total() {
                Some(items_total) => {
                    let differs = items_total
                        .checked_sub(total)
                        .is_none_or(|diff| diff.abs() > Decimal::new(1, 2));
                    if differs {
                        issues.push(format!(
                            "Line item total ({}) differs from receipt total ({})",
                            items_total, total
                        ));
                    }
                }
                None => issues.push("Line item total overflows".to_string()),
            }
        }

        issues
    }
}
