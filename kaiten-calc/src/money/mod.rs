//! Money utilities using rust_decimal for precision
//!
//! Catalog prices and rates arrive as `f64`. They are converted to `Decimal`
//! at this boundary, every calculation runs in `Decimal`, and rounding only
//! happens when a value is displayed or explicitly converted back to `f64`.

use rust_decimal::prelude::*;
use shared::models::{CurrencyFormat, CurrencyPosition};

/// Rounding for stored monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Tolerance for monetary comparisons (0.01)
pub const MONEY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Convert f64 to Decimal for calculation
///
/// Catalog values are validated as finite at load time. If NaN/Infinity
/// somehow reaches here, logs an error and returns ZERO.
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_else(|| {
        tracing::error!(value = ?value, "Non-finite f64 in monetary calculation, defaulting to zero");
        Decimal::ZERO
    })
}

/// Convert Decimal back to f64, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Compare two monetary values for equality (within 0.01 tolerance)
pub fn money_eq(a: Decimal, b: Decimal) -> bool {
    (a - b).abs() < MONEY_TOLERANCE
}

/// Sum amounts with overflow checking; `None` when the total does not fit
pub fn checked_sum(amounts: impl IntoIterator<Item = Decimal>) -> Option<Decimal> {
    amounts
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, amount| acc.checked_add(amount))
}

/// Format an amount for display
///
/// Rounds to the configured digit count, groups the integer part with the
/// thousands separator and places the symbol before or after the number.
/// A minus sign stays next to the digits: `฿-100.00`.
pub fn format_currency(amount: Decimal, format: &CurrencyFormat) -> String {
    let mut rounded =
        amount.round_dp_with_strategy(format.decimal_digits, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        // -0.001 rounds to a signed zero
        rounded = Decimal::ZERO;
    }
    rounded.rescale(format.decimal_digits);

    let text = rounded.abs().to_string();
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text.as_str(), None),
    };

    let mut number = String::with_capacity(text.len() + 8);
    if rounded.is_sign_negative() {
        number.push('-');
    }
    number.push_str(&group_thousands(int_part, &format.thousands_separator));
    if let Some(frac) = frac_part {
        number.push_str(&format.decimal_separator);
        number.push_str(frac);
    }

    match format.position {
        CurrencyPosition::Before => format!("{}{}", format.symbol, number),
        CurrencyPosition::After => format!("{}{}", number, format.symbol),
    }
}

/// Insert `separator` every three digits from the right
fn group_thousands(digits: &str, separator: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3 * separator.len());
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push_str(separator);
        }
        out.push(ch);
    }
    out
}

/// Render a fractional rate as a percentage label (`0.07` → `7%`)
pub fn format_rate(rate: f64) -> String {
    let percent = (to_decimal(rate) * Decimal::ONE_HUNDRED)
        .round_dp(4)
        .normalize();
    format!("{}%", percent)
}
