//! Field-level validation guards for catalogue domain types.

use super::CatalogueValidationError;
use crate::domain::slug::is_valid_slug;

pub(super) fn validate_slug(
    field: &'static str,
    value: String,
) -> Result<String, CatalogueValidationError> {
    if is_valid_slug(&value) {
        Ok(value)
    } else {
        Err(CatalogueValidationError::InvalidSlug { field })
    }
}

pub(super) fn validate_non_empty_field(
    field: &'static str,
    value: String,
) -> Result<String, CatalogueValidationError> {
    if value.trim().is_empty() {
        Err(CatalogueValidationError::EmptyField { field })
    } else {
        Ok(value)
    }
}

pub(super) fn ensure_non_negative(
    field: &'static str,
    value: i64,
) -> Result<(), CatalogueValidationError> {
    if value < 0 {
        Err(CatalogueValidationError::NegativeValue { field, value })
    } else {
        Ok(())
    }
}

pub(super) fn ensure_at_least_one(
    field: &'static str,
    value: u32,
) -> Result<(), CatalogueValidationError> {
    if value == 0 {
        Err(CatalogueValidationError::ZeroValue { field })
    } else {
        Ok(())
    }
}
