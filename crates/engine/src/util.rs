//! Internal helpers for validation and conversion.
//!
//! These utilities are **not** part of the public API. They centralize
//! validation and mapping logic so the engine enforces consistent invariants.

use chrono::NaiveDate;
use unicode_normalization::UnicodeNormalization;
use uuid::Uuid;

use crate::{EngineError, ResultEngine};

/// Normalize a required display name: NFC, trimmed, non-empty.
///
/// Uniqueness checks compare normalized names, so "Bar " and "Bar" collide.
pub(crate) fn normalize_name(value: &str, label: &str) -> ResultEngine<String> {
    let normalized: String = value.nfc().collect();
    let trimmed = normalized.trim();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidAmount(format!(
            "{label} name must not be empty"
        )));
    }
    Ok(trimmed.to_string())
}

/// Trim optional free text, mapping whitespace-only values to `None`.
pub(crate) fn normalize_optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

/// Parse a UUID from storage and return a labeled error on failure.
pub(crate) fn parse_uuid(value: &str, label: &str) -> ResultEngine<Uuid> {
    Uuid::parse_str(value).map_err(|_| EngineError::InvalidId(format!("invalid {label} id")))
}

/// Validate an inclusive date range filter.
pub(crate) fn ensure_date_range(from: Option<NaiveDate>, to: Option<NaiveDate>) -> ResultEngine<()> {
    if let (Some(from), Some(to)) = (from, to)
        && from > to
    {
        return Err(EngineError::InvalidDate(
            "from must not be after to".to_string(),
        ));
    }
    Ok(())
}

/// Validate a pair of per-payment-method amounts for a journal row.
pub(crate) fn validate_method_amounts(cash_minor: i64, card_minor: i64) -> ResultEngine<()> {
    if cash_minor < 0 || card_minor < 0 {
        return Err(EngineError::InvalidAmount(
            "method amounts must be >= 0".to_string(),
        ));
    }
    if cash_minor == 0 && card_minor == 0 {
        return Err(EngineError::InvalidAmount(
            "at least one method amount must be > 0".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_name_trims_and_rejects_empty() {
        assert_eq!(normalize_name("  Bar Centrale ", "company").unwrap(), "Bar Centrale");
        assert!(normalize_name("   ", "company").is_err());
    }

    #[test]
    fn method_amounts_must_have_one_positive() {
        assert!(validate_method_amounts(0, 0).is_err());
        assert!(validate_method_amounts(-1, 100).is_err());
        assert!(validate_method_amounts(100, 0).is_ok());
        assert!(validate_method_amounts(0, 250).is_ok());
    }

    #[test]
    fn date_range_rejects_inverted_bounds() {
        let from = NaiveDate::from_ymd_opt(2026, 3, 10);
        let to = NaiveDate::from_ymd_opt(2026, 3, 1);
        assert!(ensure_date_range(from, to).is_err());
        assert!(ensure_date_range(to, from).is_ok());
        assert!(ensure_date_range(from, None).is_ok());
    }
}
