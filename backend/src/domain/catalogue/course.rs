//! Course catalogue entity.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::CatalogueValidationError;
use super::validation::{
    ensure_at_least_one, ensure_non_negative, validate_non_empty_field, validate_slug,
};
use crate::domain::localization::LocalizationMap;

/// Input payload for [`Course::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct CourseDraft {
    pub id: Uuid,
    pub slug: String,
    pub category_id: Uuid,
    pub localizations: LocalizationMap,
    pub price_centimes: i64,
    pub starts_on: NaiveDate,
    pub seats_total: u32,
    pub contact_phone: String,
    pub published: bool,
}

/// A course offered through the catalogue.
///
/// `contact_phone` is kept exactly as entered by the coordinator; display
/// grouping happens at the HTTP edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct Course {
    id: Uuid,
    slug: String,
    category_id: Uuid,
    localizations: LocalizationMap,
    price_centimes: i64,
    starts_on: NaiveDate,
    seats_total: u32,
    contact_phone: String,
    published: bool,
}

impl Course {
    /// Validate and construct a course.
    pub fn new(draft: CourseDraft) -> Result<Self, CatalogueValidationError> {
        Self::try_from(draft)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }
    pub fn slug(&self) -> &str {
        self.slug.as_str()
    }
    pub fn category_id(&self) -> Uuid {
        self.category_id
    }
    pub fn localizations(&self) -> &LocalizationMap {
        &self.localizations
    }
    pub fn price_centimes(&self) -> i64 {
        self.price_centimes
    }
    pub fn starts_on(&self) -> NaiveDate {
        self.starts_on
    }
    pub fn seats_total(&self) -> u32 {
        self.seats_total
    }
    pub fn contact_phone(&self) -> &str {
        self.contact_phone.as_str()
    }
    pub fn published(&self) -> bool {
        self.published
    }
}

impl TryFrom<CourseDraft> for Course {
    type Error = CatalogueValidationError;

    fn try_from(draft: CourseDraft) -> Result<Self, Self::Error> {
        let slug = validate_slug("course.slug", draft.slug)?;
        ensure_non_negative("course.price_centimes", draft.price_centimes)?;
        ensure_at_least_one("course.seats_total", draft.seats_total)?;
        let contact_phone = validate_non_empty_field("course.contact_phone", draft.contact_phone)?;

        Ok(Self {
            id: draft.id,
            slug,
            category_id: draft.category_id,
            localizations: draft.localizations,
            price_centimes: draft.price_centimes,
            starts_on: draft.starts_on,
            seats_total: draft.seats_total,
            contact_phone,
            published: draft.published,
        })
    }
}

impl<'de> Deserialize<'de> for Course {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        CourseDraft::deserialize(deserializer)?
            .try_into()
            .map_err(serde::de::Error::custom)
    }
}
