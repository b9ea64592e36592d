//! Course category entity.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::CatalogueValidationError;
use super::validation::validate_slug;
use crate::domain::localization::LocalizationMap;

/// Input payload for [`Category::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct CategoryDraft {
    pub id: Uuid,
    pub slug: String,
    pub localizations: LocalizationMap,
}

/// Category grouping for catalogue browsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct Category {
    pub id: Uuid,
    pub slug: String,
    pub localizations: LocalizationMap,
}

impl Category {
    /// Validate and construct a category.
    pub fn new(draft: CategoryDraft) -> Result<Self, CatalogueValidationError> {
        let slug = validate_slug("category.slug", draft.slug)?;

        Ok(Self {
            id: draft.id,
            slug,
            localizations: draft.localizations,
        })
    }
}
