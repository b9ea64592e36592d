//! Localisation primitives shared by the course catalogue domain types.
//!
//! Course copy is authored in both of the platform's locales (`ar-DZ` and
//! `fr-DZ`). The domain represents that copy as typed maps so callers can
//! validate structure before a course reaches the catalogue.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Locale code key used in localisation maps (for example `fr-DZ`).
pub type LocaleCode = String;

/// Localised course copy for one locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct LocalizedCopy {
    pub title: String,
    pub summary: Option<String>,
}

impl LocalizedCopy {
    /// Create a new localised copy entry.
    pub fn new(title: impl Into<String>, summary: Option<String>) -> Self {
        Self {
            title: title.into(),
            summary,
        }
    }
}

/// Ways a localisation map can fail validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocalizationValidationError {
    /// The map carried no locales at all.
    EmptyMap,
    /// A locale key was empty or carried surrounding whitespace.
    InvalidLocaleCode { locale: String },
    /// The copy for a locale had a blank title.
    EmptyTitle { locale: String },
}

impl fmt::Display for LocalizationValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyMap => f.write_str("localizations must contain at least one locale"),
            Self::InvalidLocaleCode { locale } => {
                write!(f, "locale code '{locale}' must be trimmed and non-empty")
            }
            Self::EmptyTitle { locale } => {
                write!(f, "localized title for locale '{locale}' must not be empty")
            }
        }
    }
}

impl std::error::Error for LocalizationValidationError {}

fn validate_entry(locale: &str, copy: &LocalizedCopy) -> Result<(), LocalizationValidationError> {
    if locale.is_empty() || locale.trim() != locale {
        return Err(LocalizationValidationError::InvalidLocaleCode {
            locale: locale.to_owned(),
        });
    }
    if copy.title.trim().is_empty() {
        return Err(LocalizationValidationError::EmptyTitle {
            locale: locale.to_owned(),
        });
    }
    Ok(())
}

/// Non-empty set of localised copy entries keyed by locale code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocalizationMap(BTreeMap<LocaleCode, LocalizedCopy>);

impl LocalizationMap {
    /// Check every entry and wrap the map.
    pub fn new(
        values: BTreeMap<LocaleCode, LocalizedCopy>,
    ) -> Result<Self, LocalizationValidationError> {
        if values.is_empty() {
            return Err(LocalizationValidationError::EmptyMap);
        }
        values
            .iter()
            .try_for_each(|(locale, copy)| validate_entry(locale, copy))?;
        Ok(Self(values))
    }

    /// Read access to the entries.
    pub fn as_map(&self) -> &BTreeMap<LocaleCode, LocalizedCopy> {
        &self.0
    }
}

impl TryFrom<BTreeMap<LocaleCode, LocalizedCopy>> for LocalizationMap {
    type Error = LocalizationValidationError;

    fn try_from(value: BTreeMap<LocaleCode, LocalizedCopy>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
