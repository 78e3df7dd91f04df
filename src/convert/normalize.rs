//! Cell normalization: dates, places of supply, flags and invoice types.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::core::{Gstr1Error, InvoiceType, ReverseCharge, state_code};

/// Formats tried, in order, when none of the spreadsheet date shapes match.
const FALLBACK_DATE_FORMATS: &[&str] = &[
    "%Y/%m/%d",
    "%Y-%m-%d",
    "%Y.%m.%d",
    "%m/%d/%Y",
    "%d %B %Y",
    "%B %d, %Y",
    "%B %d %Y",
    "%a %b %d %Y",
];

const FALLBACK_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// Normalize an invoice date to `DD-MM-YYYY`.
///
/// Accepted shapes:
/// - `DD-MM-YYYY` (unchanged)
/// - `DD/MM/YYYY`
/// - `D-Mon-YY`, `DD/Month/YYYY` and mixes of `/` and `-`; two-digit years
///   below 50 are 20xx, the rest 19xx
/// - `YYYY-MM-DD`
/// - a handful of looser formats (`2024/4/1`, `1 April 2024`,
///   `April 1, 2024`, ISO timestamps)
///
/// Anything else is returned trimmed but otherwise unchanged. Only an empty
/// input is an error.
pub fn normalize_date(raw: &str) -> Result<String, Gstr1Error> {
    let s = raw.trim();
    if s.is_empty() {
        return Err(Gstr1Error::EmptyDate);
    }

    if is_digit_date(s, b'-') {
        return Ok(s.to_string());
    }
    if is_digit_date(s, b'/') {
        return Ok(s.replace('/', "-"));
    }
    if let Some(date) = month_name_date(s) {
        return Ok(date);
    }
    if is_iso_date(s) {
        return Ok(format!("{}-{}-{}", &s[8..10], &s[5..7], &s[..4]));
    }
    if let Some(date) = fallback_date(s) {
        return Ok(date.format("%d-%m-%Y").to_string());
    }
    Ok(s.to_string())
}

/// `DD?MM?YYYY` with `sep` as both separators. Digits are not range-checked.
fn is_digit_date(s: &str, sep: u8) -> bool {
    let b = s.as_bytes();
    b.len() == 10
        && b[2] == sep
        && b[5] == sep
        && b.iter()
            .enumerate()
            .all(|(i, c)| i == 2 || i == 5 || c.is_ascii_digit())
}

/// `YYYY-MM-DD`.
fn is_iso_date(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() == 10
        && b[4] == b'-'
        && b[7] == b'-'
        && b.iter()
            .enumerate()
            .all(|(i, c)| i == 4 || i == 7 || c.is_ascii_digit())
}

/// `D[D]{/|-}<month name>{/|-}YY[YY]`, e.g. "1-Oct-25" or "01/October/2025".
fn month_name_date(s: &str) -> Option<String> {
    const SEPARATORS: [char; 2] = ['/', '-'];

    let day_len = s.bytes().take_while(u8::is_ascii_digit).count();
    if !(1..=2).contains(&day_len) {
        return None;
    }
    let day: u32 = s[..day_len].parse().ok()?;

    let rest = s[day_len..].strip_prefix(SEPARATORS)?;
    let name_len = rest.bytes().take_while(u8::is_ascii_alphabetic).count();
    if name_len < 3 {
        return None;
    }
    let month = month_number(&rest[..name_len])?;

    let year_str = rest[name_len..].strip_prefix(SEPARATORS)?;
    if !(2..=4).contains(&year_str.len()) || !year_str.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let mut year: u32 = year_str.parse().ok()?;
    if year < 100 {
        year += if year < 50 { 2000 } else { 1900 };
    }

    Some(format!("{day:02}-{month:02}-{year}"))
}

/// Month number for an English month name or three-letter abbreviation.
fn month_number(name: &str) -> Option<u32> {
    let month = match name.to_lowercase().as_str() {
        "jan" | "january" => 1,
        "feb" | "february" => 2,
        "mar" | "march" => 3,
        "apr" | "april" => 4,
        "may" => 5,
        "jun" | "june" => 6,
        "jul" | "july" => 7,
        "aug" | "august" => 8,
        "sep" | "september" => 9,
        "oct" | "october" => 10,
        "nov" | "november" => 11,
        "dec" | "december" => 12,
        _ => return None,
    };
    Some(month)
}

fn fallback_date(s: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    FALLBACK_DATE_FORMATS
        .iter()
        .find_map(|f| NaiveDate::parse_from_str(s, f).ok())
        .or_else(|| {
            FALLBACK_DATETIME_FORMATS
                .iter()
                .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
                .map(|dt| dt.date())
        })
}

/// Normalize a place of supply to a 2-digit state code.
///
/// "33-Tamil Nadu" → "33", "29" → "29", "Karnataka" → "29". Unknown values
/// are returned trimmed.
pub fn normalize_state_code(pos: &str) -> String {
    let s = pos.trim();
    let b = s.as_bytes();

    if b.len() >= 3 && b[0].is_ascii_digit() && b[1].is_ascii_digit() && b[2] == b'-' {
        return s[..2].to_string();
    }
    if b.len() == 2 && b.iter().all(u8::is_ascii_digit) {
        return s.to_string();
    }
    match state_code(s) {
        Some(code) => code.to_string(),
        None => s.to_string(),
    }
}

/// `Y`, `YES`, `TRUE` or `1` (any case) is a reverse-charge supply.
pub fn parse_reverse_charge(value: &str) -> ReverseCharge {
    match value.trim().to_uppercase().as_str() {
        "Y" | "YES" | "TRUE" | "1" => ReverseCharge::Yes,
        _ => ReverseCharge::No,
    }
}

/// Map free-text invoice type to its code. Defaults to regular.
pub fn parse_invoice_type(value: &str) -> InvoiceType {
    let lower = value.to_lowercase();
    if lower.contains("regular") {
        InvoiceType::Regular
    } else if lower.contains("sez") {
        InvoiceType::SezWithPayment
    } else if lower.contains("deemed") {
        InvoiceType::DeemedExport
    } else {
        InvoiceType::Regular
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> String {
        normalize_date(s).unwrap()
    }

    #[test]
    fn common_date_forms_agree() {
        assert_eq!(date("2024-04-01"), "01-04-2024");
        assert_eq!(date("01/04/2024"), "01-04-2024");
        assert_eq!(date("01-04-2024"), "01-04-2024");
        assert_eq!(date("  01-04-2024 "), "01-04-2024");
    }

    #[test]
    fn month_names() {
        assert_eq!(date("01/Oct/25"), "01-10-2025");
        assert_eq!(date("1-Oct-25"), "01-10-2025");
        assert_eq!(date("15-September-1999"), "15-09-1999");
        assert_eq!(date("3/mar/75"), "03-03-1975");
        assert_eq!(date("3-MAR/49"), "03-03-2049");
        assert_eq!(date("3-Mar-50"), "03-03-1950");
    }

    #[test]
    fn unknown_month_name_falls_through() {
        assert_eq!(date("01-Foo-25"), "01-Foo-25");
    }

    #[test]
    fn fallback_formats() {
        assert_eq!(date("2024/4/1"), "01-04-2024");
        assert_eq!(date("1 April 2024"), "01-04-2024");
        assert_eq!(date("April 1, 2024"), "01-04-2024");
        assert_eq!(date("2024-04-01T10:30:00Z"), "01-04-2024");
        assert_eq!(date("2024-04-01 10:30:00"), "01-04-2024");
    }

    #[test]
    fn unparseable_passes_through() {
        assert_eq!(date("sometime in April"), "sometime in April");
        assert_eq!(date("45383"), "45383");
    }

    #[test]
    fn empty_date_is_error() {
        assert!(matches!(normalize_date(""), Err(Gstr1Error::EmptyDate)));
        assert!(matches!(normalize_date("   "), Err(Gstr1Error::EmptyDate)));
    }

    #[test]
    fn state_codes() {
        assert_eq!(normalize_state_code("33-Tamil Nadu"), "33");
        assert_eq!(normalize_state_code("29"), "29");
        assert_eq!(normalize_state_code(" Karnataka "), "29");
        assert_eq!(normalize_state_code("KA"), "29");
        assert_eq!(normalize_state_code("maharashtra"), "27");
        assert_eq!(normalize_state_code("Atlantis"), "Atlantis");
        assert_eq!(normalize_state_code("7"), "7");
    }

    #[test]
    fn reverse_charge_flags() {
        for yes in ["Y", "y", "Yes", "TRUE", "1", " yes "] {
            assert_eq!(parse_reverse_charge(yes), ReverseCharge::Yes, "{yes}");
        }
        for no in ["N", "No", "", "0", "false", "maybe"] {
            assert_eq!(parse_reverse_charge(no), ReverseCharge::No, "{no}");
        }
    }

    #[test]
    fn invoice_types() {
        assert_eq!(parse_invoice_type("Regular B2B"), InvoiceType::Regular);
        assert_eq!(parse_invoice_type("SEZ supplies with payment"), InvoiceType::SezWithPayment);
        assert_eq!(parse_invoice_type("Deemed Exp"), InvoiceType::DeemedExport);
        assert_eq!(parse_invoice_type(""), InvoiceType::Regular);
        assert_eq!(parse_invoice_type("Intra-State supplies"), InvoiceType::Regular);
        // first rule wins
        assert_eq!(parse_invoice_type("regular sez"), InvoiceType::Regular);
    }
}
