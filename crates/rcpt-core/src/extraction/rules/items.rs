//! Line item extraction.
//!
//! Item lines are found with a loose "name ... price" heuristic applied to
//! every line independently. False positives (a "Total: $9.99" line is also
//! an item) are expected.

use lazy_static::lazy_static;
use regex::Captures;
use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::trace;

use crate::models::receipt::LineItem;

use super::patterns::{ITEM_PRICE_ONLY, ITEM_WITH_QUANTITY};
use super::Rule;

/// Lines this short (in characters) never hold an item.
const MIN_ITEM_LINE_LEN: usize = 5;

lazy_static! {
    static ref ITEM_RULES: [Rule<LineItem>; 2] = [
        Rule::new("quantity-name-price", &ITEM_WITH_QUANTITY, item_with_quantity),
        Rule::new("name-price", &ITEM_PRICE_ONLY, item_price_only),
    ];
}

/// Line item extractor.
#[derive(Debug, Default)]
pub struct LineItemExtractor;

impl LineItemExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract at most one item from a single line.
    ///
    /// The first rule whose pattern matches decides; if its price does not
    /// parse the line yields nothing, the next rule is not tried.
    pub fn extract_line(&self, line: &str) -> Option<LineItem> {
        let line = line.trim();
        if line.chars().count() <= MIN_ITEM_LINE_LEN {
            return None;
        }

        let (rule, caps) = ITEM_RULES
            .iter()
            .find_map(|rule| rule.pattern.captures(line).map(|caps| (rule, caps)))?;

        let item = (rule.parse)(&caps);
        if item.is_none() {
            trace!("Skipping line matched by {} with unparsable price: {}", rule.name, line);
        }
        item
    }

    /// Extract items from every line of the text, in order.
    pub fn extract_all(&self, text: &str) -> Vec<LineItem> {
        text.lines().filter_map(|line| self.extract_line(line)).collect()
    }
}

/// Extract line items from receipt text.
pub fn extract_line_items(text: &str) -> Vec<LineItem> {
    LineItemExtractor::new().extract_all(text)
}

fn item_with_quantity(caps: &Captures<'_>) -> Option<LineItem> {
    let price = parse_price(&caps[3])?;

    match caps.get(1) {
        Some(quantity) => {
            let quantity = Decimal::from_str(quantity.as_str()).ok()?;
            let unit_price = price.checked_div(quantity)?;
            Some(LineItem {
                item_name: caps[2].trim().to_string(),
                quantity,
                unit_price,
                total_price: price,
            })
        }
        None => Some(single_item(&caps[2], price)),
    }
}

fn item_price_only(caps: &Captures<'_>) -> Option<LineItem> {
    let price = parse_price(&caps[2])?;
    Some(single_item(&caps[1], price))
}

fn single_item(name: &str, price: Decimal) -> LineItem {
    LineItem {
        item_name: name.trim().to_string(),
        quantity: Decimal::ONE,
        unit_price: price,
        total_price: price,
    }
}

fn parse_price(s: &str) -> Option<Decimal> {
    Decimal::from_str(s.replace('$', "").trim()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_quantity_item() {
        let item = LineItemExtractor::new().extract_line("2 x Coffee $8.00").unwrap();
        assert_eq!(
            item,
            LineItem {
                item_name: "Coffee".to_string(),
                quantity: dec("2"),
                unit_price: dec("4.00"),
                total_price: dec("8.00"),
            }
        );
    }

    #[test]
    fn test_item_without_quantity() {
        let item = LineItemExtractor::new()
            .extract_line("Blueberry Muffin ..... 3.25")
            .unwrap();
        assert_eq!(item.item_name, "Blueberry Muffin");
        assert_eq!(item.quantity, Decimal::ONE);
        assert_eq!(item.unit_price, dec("3.25"));
        assert_eq!(item.total_price, dec("3.25"));
    }

    #[test]
    fn test_short_lines_skipped() {
        assert!(LineItemExtractor::new().extract_line("A 1.00").is_some());
        assert!(LineItemExtractor::new().extract_line("A1.00").is_none());
        assert!(LineItemExtractor::new().extract_line("   A1.00   ").is_none());
    }

    #[test]
    fn test_zero_quantity_skipped() {
        assert!(LineItemExtractor::new().extract_line("0 x Water $1.00").is_none());
    }

    #[test]
    fn test_lines_without_price() {
        assert!(LineItemExtractor::new().extract_line("Thank you for visiting").is_none());
        assert!(LineItemExtractor::new().extract_line("Apples 3.5").is_none());
    }

    #[test]
    fn test_items_keep_text_order() {
        let text = "Bagel $2.50\n\n3 Donut $3.00\nSubtotal $5.50";
        let items = extract_line_items(text);
        let names: Vec<_> = items.iter().map(|i| i.item_name.as_str()).collect();
        assert_eq!(names, vec!["Bagel", "Donut", "Subtotal"]);
        assert_eq!(items[1].quantity, dec("3"));
        assert_eq!(items[1].unit_price, dec("1.00"));
    }
}
