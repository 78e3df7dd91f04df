//! Spreadsheet number parsing and JSON number encoding for amounts.
//!
//! Amounts are [`Decimal`] internally. On the wire they are plain JSON
//! numbers: integral values are written without a fractional part
//! (`1180`, not `1180.0`), everything else as a float.

use std::str::FromStr;

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serializer};

use super::error::Gstr1Error;

/// Parse a spreadsheet number cell.
///
/// Thousands-separator commas are removed and the leading numeric part is
/// read, so `"1,180"` is 1180 and `"18%"` is 18. Empty or non-numeric input
/// yields zero.
///
/// Values outside the [`Decimal`] range (about ±7.9e28) also yield zero; use
/// [`parse_amount`] to tell them apart.
pub fn parse_number(value: &str) -> Decimal {
    parse_amount(value).unwrap_or(Decimal::ZERO)
}

/// Like [`parse_number`], but a numeric cell too large for a [`Decimal`]
/// is an error instead of zero. Exponents so negative the value vanishes
/// still read as zero.
pub fn parse_amount(value: &str) -> Result<Decimal, Gstr1Error> {
    if value.trim().is_empty() {
        return Ok(Decimal::ZERO);
    }
    let cleaned = value.replace(',', "");
    match leading_decimal(cleaned.trim()) {
        None => Ok(Decimal::ZERO),
        Some(Ok(amount)) => Ok(amount),
        Some(Err(())) => Err(Gstr1Error::OutOfRange(value.trim().to_string())),
    }
}

/// Round to two decimal places, halves toward positive infinity.
pub fn round2(value: Decimal) -> Decimal {
    let strategy = if value.is_sign_negative() {
        RoundingStrategy::MidpointTowardZero
    } else {
        RoundingStrategy::MidpointAwayFromZero
    };
    value.round_dp_with_strategy(2, strategy)
}

const MAX_EXPONENT: u32 = 56;

/// Read the longest numeric prefix: `[+-]digits[.digits][e[+-]digits]`.
///
/// `None` when there is no numeric prefix, `Some(Err(()))` when there is
/// one but it does not fit.
fn leading_decimal(s: &str) -> Option<Result<Decimal, ()>> {
    let bytes = s.as_bytes();
    let mut pos = 0;
    let negative = match bytes.first() {
        Some(b'-') => {
            pos = 1;
            true
        }
        Some(b'+') => {
            pos = 1;
            false
        }
        _ => false,
    };

    let int_start = pos;
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    let int_part = &s[int_start..pos];

    let mut frac_part = "";
    if pos < bytes.len() && bytes[pos] == b'.' {
        let frac_start = pos + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        frac_part = &s[frac_start..frac_end];
        pos = frac_end;
    }

    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }

    let mut mantissa = String::with_capacity(int_part.len() + frac_part.len() + 3);
    if negative {
        mantissa.push('-');
    }
    mantissa.push_str(if int_part.is_empty() { "0" } else { int_part });
    if !frac_part.is_empty() {
        mantissa.push('.');
        mantissa.push_str(frac_part);
    }
    let base = Decimal::from_str(&mantissa).map_err(|_| ());

    if pos < bytes.len() && (bytes[pos] == b'e' || bytes[pos] == b'E') {
        let mut exp_end = pos + 1;
        let shrinks = exp_end < bytes.len() && bytes[exp_end] == b'-';
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > digits_start {
            return Some(scale_by_exponent(
                base,
                &mantissa,
                &s[pos + 1..exp_end],
                &s[digits_start..exp_end],
                shrinks,
            ));
        }
    }

    Some(base)
}

/// Apply a decimal exponent. Underflow reads as zero, overflow is an error.
fn scale_by_exponent(
    base: Result<Decimal, ()>,
    mantissa: &str,
    exponent: &str,
    digits: &str,
    shrinks: bool,
) -> Result<Decimal, ()> {
    if base.is_ok_and(|b| b.is_zero()) {
        return Ok(Decimal::ZERO);
    }
    let magnitude: u32 = digits.parse().unwrap_or(u32::MAX);
    if magnitude > MAX_EXPONENT {
        return if shrinks { Ok(Decimal::ZERO) } else { Err(()) };
    }
    match Decimal::from_scientific(&format!("{mantissa}e{exponent}")) {
        Ok(value) => Ok(value),
        Err(_) if shrinks => Ok(Decimal::ZERO),
        Err(_) => Err(()),
    }
}

fn serialize_decimal<S: Serializer>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
    let normalized = value.normalize();
    if normalized.scale() == 0 {
        if let Some(int) = normalized.to_i64() {
            return serializer.serialize_i64(int);
        }
    }
    serializer.serialize_f64(normalized.to_f64().unwrap_or_default())
}

fn decimal_from_f64<E: serde::de::Error>(value: f64) -> Result<Decimal, E> {
    Decimal::from_f64(value)
        .ok_or_else(|| E::custom(format!("number {value} is out of range for an amount")))
}

/// `#[serde(with = "...")]` adapter writing a [`Decimal`] as a JSON number.
pub mod number {
    use super::*;

    pub fn serialize<S: Serializer>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_decimal(value, serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
        decimal_from_f64(f64::deserialize(deserializer)?)
    }
}

/// Like [`number`], for optional amounts.
pub mod option_number {
    use super::*;

    pub fn serialize<S: Serializer>(
        value: &Option<Decimal>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(v) => serialize_decimal(v, serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Decimal>, D::Error> {
        Option::<f64>::deserialize(deserializer)?
            .map(decimal_from_f64)
            .transpose()
    }
}
