use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;

use crate::error::ObraError;
use crate::parsing::values::round2;

/// Parse the certificate issue timestamp.
///
/// Accepts RFC 3339 (`2024-05-01T10:00:00.000000Z`, with or without
/// fractional seconds) and a bare `YYYY-MM-DDTHH:MM:SS[.f]`, read as UTC.
pub fn parse_issued_at(s: &str) -> Result<DateTime<Utc>, ObraError> {
    let s = s.trim();
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f").map(|n| n.and_utc()))
        .map_err(|_| ObraError::InvalidTimestamp(s.to_string()))
}

/// `DD/MM/YYYY`
pub fn format_date(dt: &DateTime<Utc>) -> String {
    dt.format("%d/%m/%Y").to_string()
}

/// `1.234.567,89`
pub fn format_number(value: Decimal) -> String {
    let rounded = round2(value);
    let plain = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(*c);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}{grouped},{frac_part}")
}

/// `$ 1.234.567,89`
pub fn format_currency(value: Decimal) -> String {
    format!("$ {}", format_number(value))
}

/// `50,00 %`
pub fn format_percent(value: Decimal) -> String {
    format!("{} %", format_number(value))
}
