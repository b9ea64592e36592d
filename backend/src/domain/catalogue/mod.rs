//! Course catalogue domain types.
//!
//! These types model the courses Takwin offers as validated domain entities
//! owned by the domain layer. Adapters construct them through drafts so an
//! unpriced or seatless course can never reach a handler.

use std::fmt;

use super::localization::LocalizationValidationError;

mod category;
mod course;
mod validation;


pub use category::{Category, CategoryDraft};
pub use course::{Course, CourseDraft};

/// Validation errors returned by catalogue entity constructors.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogueValidationError {
    /// A slug field broke the slug grammar.
    InvalidSlug { field: &'static str },
    /// A required text field was blank.
    EmptyField { field: &'static str },
    /// A money or count field carried a negative value.
    NegativeValue { field: &'static str, value: i64 },
    /// A capacity field was zero.
    ZeroValue { field: &'static str },
    /// The localised copy failed its own validation.
    Localization(LocalizationValidationError),
}

impl fmt::Display for CatalogueValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Localization(error) => error.fmt(f),
            Self::InvalidSlug { field } => {
                write!(f, "{field} must be a lowercase slug of letters, digits, and hyphens")
            }
            Self::EmptyField { field } => write!(f, "{field} must not be empty"),
            Self::NegativeValue { field, value } => {
                write!(f, "{field} must not be negative, got {value}")
            }
            Self::ZeroValue { field } => write!(f, "{field} must be at least one"),
        }
    }
}

impl std::error::Error for CatalogueValidationError {}

impl From<LocalizationValidationError> for CatalogueValidationError {
    fn from(value: LocalizationValidationError) -> Self {
        Self::Localization(value)
    }
}
