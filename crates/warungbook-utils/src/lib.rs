//! Utility functions and helpers

use rust_decimal::{Decimal, RoundingStrategy};

/// Group the integer digits of a number with a thousands separator
pub fn format_number<T: ToString>(n: T, separator: &str) -> String {
    let s = n.to_string();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", s.as_str()),
    };

    let mut result = String::new();
    let mut count = 0;
    for c in digits.chars().rev() {
        if count == 3 {
            result.push_str(&separator.chars().rev().collect::<String>());
            count = 0;
        }
        result.push(c);
        count += 1;
    }
    format!("{}{}", sign, result.chars().rev().collect::<String>())
}

/// Format a money amount, e.g. `Rp 1.500.000`
pub fn format_money(amount: Decimal, symbol: &str, separator: &str, decimal_places: u32) -> String {
    let rounded = amount.round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointAwayFromZero);
    let integer = rounded.trunc();
    let grouped = format_number(integer.abs(), separator);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };

    let mut out = format!("{}{} {}", sign, symbol, grouped);
    if decimal_places > 0 {
        let decimal_sep = if separator == "." { "," } else { "." };
        let fraction = (rounded.abs() - integer.abs()).to_string();
        let digits = fraction.split('.').nth(1).unwrap_or("");
        out.push_str(decimal_sep);
        out.push_str(&format!("{:0<width$}", digits, width = decimal_places as usize));
    }
    out
}

/// Format a percentage with one decimal place
pub fn format_percent(value: Decimal) -> String {
    format!("{}%", value.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero))
}

/// Escape text for safe inclusion in HTML
pub fn sanitize_html(content: &str) -> String {
    content
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Generate a unique ID
pub fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Last six characters of an id, used in journal references
pub fn short_ref(id: &str) -> &str {
    let count = id.chars().count();
    if count <= 6 {
        return id;
    }
    let start = id
        .char_indices()
        .nth(count - 6)
        .map(|(i, _)| i)
        .unwrap_or(0);
    &id[start..]
}
