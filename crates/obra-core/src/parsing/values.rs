use crate::error::ObraError;
use crate::model::Cell;
use rust_decimal::{Decimal, RoundingStrategy};

/// Read a numeric cell and round it to cents.
///
/// Handles:
/// - number cells
/// - "12.5", "12,5", "1.234,50" text (Spanish decimal comma)
/// - empty or blank cells -> None
///
/// Rounding works on the cell's binary float value with ties to even, so
/// 2.675 (stored as 2.67499..) gives 2.67 and an exact 0.125 gives 0.12.
/// Text that is not a number, and numbers a Decimal cannot hold (NaN,
/// infinities, magnitudes beyond 7.9e28), are errors naming the row and column.
pub fn cell_as_cents(cell: &Cell, row: usize, column: &str) -> Result<Option<Decimal>, ObraError> {
    let invalid = |value: String| ObraError::InvalidNumber {
        row,
        column: column.to_string(),
        value,
    };
    match cell {
        Cell::Empty => Ok(None),
        Cell::Number(f) => round_float2(*f)
            .map(Some)
            .ok_or_else(|| invalid(f.to_string())),
        Cell::Text(s) => {
            let s = s.trim();
            if s.is_empty() {
                return Ok(None);
            }
            parse_float(s)
                .and_then(round_float2)
                .map(Some)
                .ok_or_else(|| invalid(s.to_string()))
        }
    }
}

/// Parse a number written as text, handling Spanish comma notation.
pub fn parse_float(s: &str) -> Option<f64> {
    let s = s.trim();
    let normalized = if s.contains(',') {
        // "1.234,50": dots group thousands, the comma is the decimal mark
        s.replace('.', "").replace(',', ".")
    } else {
        s.to_string()
    };
    normalized.parse::<f64>().ok().filter(|f| f.is_finite())
}

/// Round a float to two decimals from its exact binary value, ties to even.
/// `None` when the value does not fit a Decimal.
pub fn round_float2(f: f64) -> Option<Decimal> {
    Decimal::from_f64_retain(f)
        .map(|d| d.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven))
}

/// Round a money amount to two decimals, halves away from zero.
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
