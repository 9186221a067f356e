//! Cell formatting by column type

use chrono::NaiveDate;
use pe_model::{ColumnType, FieldValue};

/// Text for one cell; absent values render empty
#[must_use]
pub fn format_cell(value: Option<&FieldValue>, column_type: ColumnType) -> String {
    let Some(value) = value else {
        return String::new();
    };
    match (column_type, value) {
        (ColumnType::Currency, FieldValue::Number(n)) => format!("${}", format_thousands(*n)),
        (ColumnType::Number, FieldValue::Number(_)) => format!("{value}%"),
        (ColumnType::Date, FieldValue::Text(s)) => format_date(s),
        _ => value.to_display_string(),
    }
}

/// Bucket total, currency-styled when the summed column is currency
#[must_use]
pub fn format_amount(amount: f64, column_type: Option<ColumnType>) -> String {
    match column_type {
        Some(ColumnType::Currency) => format!("${}", format_thousands(amount)),
        _ => format_thousands(amount),
    }
}

/// `2024-12-20` as `Dec 20, 2024`; anything unparseable unchanged
#[must_use]
pub fn format_date(raw: &str) -> String {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_or_else(|_| raw.to_string(), |d| d.format("%b %-d, %Y").to_string())
}

/// Comma-grouped integer part, up to three fraction digits
#[must_use]
pub fn format_thousands(n: f64) -> String {
    if !n.is_finite() {
        return FieldValue::Number(n).to_display_string();
    }

    let rounded = (n.abs() * 1000.0).round() / 1000.0;
    let whole = rounded.trunc();
    let digits = format!("{whole:.0}");

    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 5);
    if n < 0.0 && rounded > 0.0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }

    let fraction = format!("{:.3}", rounded - whole);
    let fraction = fraction.trim_start_matches('0').trim_end_matches('0');
    if fraction.len() > 1 {
        out.push_str(fraction);
    }
    out
}
