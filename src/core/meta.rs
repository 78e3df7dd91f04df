use super::error::{Gstr1Error, ValidationError};
use super::types::FilingMeta;

impl FilingMeta {
    /// Run [`check_meta`] and fail with all findings joined.
    pub fn checked(self) -> Result<Self, Gstr1Error> {
        let errors = check_meta(&self);
        if errors.is_empty() {
            return Ok(self);
        }
        let messages: Vec<String> = errors.iter().map(|e| e.message.clone()).collect();
        Err(Gstr1Error::Meta(messages.join("; ")))
    }
}

/// Structural checks on filer metadata.
///
/// Checks shape only: GSTIN length, alphabet and state prefix, and an
/// MMYYYY filing period. No checksum verification. [`convert`] does not
/// call this; it is for callers collecting the metadata.
///
/// [`convert`]: crate::convert::convert
pub fn check_meta(meta: &FilingMeta) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let gstin = meta.gstin.trim();
    if gstin.is_empty() {
        errors.push(ValidationError::global("gstin", "GSTIN is required"));
    } else if gstin.chars().count() != 15 {
        errors.push(ValidationError::global(
            "gstin",
            format!("GSTIN must be 15 characters, got {}", gstin.chars().count()),
        ));
    } else if !gstin.chars().all(|c| c.is_ascii_alphanumeric()) {
        errors.push(ValidationError::global(
            "gstin",
            "GSTIN must contain only letters and digits",
        ));
    } else if !gstin[..2].chars().all(|c| c.is_ascii_digit()) {
        errors.push(ValidationError::global(
            "gstin",
            "GSTIN must start with a 2-digit state code",
        ));
    }

    let fp = meta.fp.trim();
    if fp.len() != 6 || !fp.chars().all(|c| c.is_ascii_digit()) {
        errors.push(ValidationError::global(
            "fp",
            format!("filing period '{fp}' must be MMYYYY"),
        ));
    } else {
        let month: u32 = fp[..2].parse().unwrap_or(0);
        if !(1..=12).contains(&month) {
            errors.push(ValidationError::global(
                "fp",
                format!("filing period month '{}' must be 01-12", &fp[..2]),
            ));
        }
    }

    errors
}
