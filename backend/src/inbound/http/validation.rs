//! Shared validation helpers for inbound HTTP adapters.

use chrono::NaiveDate;
use serde_json::json;

use crate::domain::Error;

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }
}

/// Parse an ISO 8601 calendar date (`2026-09-05`) from request input.
///
/// A rejected value produces an `invalid_request` error whose details carry
/// the field name, the offending value, and the `invalid_date` code.
pub(crate) fn parse_iso_date(value: &str, field: FieldName) -> Result<NaiveDate, Error> {
    value.parse::<NaiveDate>().map_err(|_| {
        Error::invalid_request(format!("{} must be an ISO 8601 date", field.0)).with_details(
            json!({
                "field": field.0,
                "value": value,
                "code": "invalid_date",
            }),
        )
    })
}
