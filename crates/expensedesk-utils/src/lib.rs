//! Utility functions and helpers

use rust_decimal::{Decimal, RoundingStrategy};

/// Insert thousands separators into a run of ASCII digits
pub fn group_thousands(digits: &str) -> String {
    let mut result = String::new();
    let mut count = 0;
    for c in digits.chars().rev() {
        if count == 3 {
            result.push(',');
            count = 0;
        }
        result.push(c);
        count += 1;
    }
    result.chars().rev().collect()
}

/// Fixed-point rendering with a fixed number of decimals, no grouping.
/// This is the form used in CSV output and search matching.
pub fn fixed_amount(amount: Decimal, decimal_places: u32) -> String {
    let rounded = amount.round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.*}", decimal_places as usize, rounded)
}

/// Display an amount with currency symbol and thousands separators, e.g. `$1,234.50`
pub fn format_amount(amount: Decimal, symbol: &str, decimal_places: u32) -> String {
    let fixed = fixed_amount(amount.abs(), decimal_places);
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };
    let sign = if amount.is_sign_negative() && !amount.is_zero() { "-" } else { "" };
    match frac_part {
        Some(frac) => format!("{}{}{}.{}", sign, symbol, group_thousands(int_part), frac),
        None => format!("{}{}{}", sign, symbol, group_thousands(int_part)),
    }
}

/// Escape text for inclusion in HTML element bodies and attribute values
pub fn escape_html(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    for c in content.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
