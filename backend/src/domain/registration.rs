//! Course registration records.
//!
//! Registrations are captured at the front desk on behalf of attendees, so
//! the record keeps who entered it alongside the attendee details.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::{DisplayName, UserId};

/// Attendee details captured when registering for a course.
///
/// The phone number is stored exactly as entered; display grouping happens
/// at the HTTP edge and numbering-plan checks are out of scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct RegistrationRequest {
    #[serde(alias = "full_name")]
    pub full_name: DisplayName,
    pub phone: String,
}

/// A confirmed seat on a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct Registration {
    pub id: Uuid,
    pub course_id: Uuid,
    pub full_name: DisplayName,
    pub phone: String,
    pub registered_by: UserId,
}

impl Registration {
    /// Record a registration for `request` against `course_id`.
    pub fn new(course_id: Uuid, request: RegistrationRequest, registered_by: UserId) -> Self {
        Self {
            id: Uuid::new_v4(),
            course_id,
            full_name: request.full_name,
            phone: request.phone,
            registered_by,
        }
    }
}
