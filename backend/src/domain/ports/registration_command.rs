//! Write-side port for course registration.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Registration, RegistrationRequest, UserId};

use super::port_error;

port_error! {
    /// Errors raised when registering an attendee.
    pub enum RegistrationError {
        /// No course carries the requested slug.
        CourseUnknown { slug: String } =>
            "no course with slug: {slug}",
        /// Every seat on the course is taken.
        CourseFull { slug: String } =>
            "course is full: {slug}",
        /// The course is not open for registration.
        CourseUnpublished { slug: String } =>
            "course is not open for registration: {slug}",
    }
}

/// Port for registering attendees onto courses.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationCommand: Send + Sync {
    /// Record a registration for the course with `course_slug`.
    ///
    /// `registered_by` is the staff member capturing the registration, not
    /// the attendee.
    async fn register(
        &self,
        course_slug: &str,
        request: RegistrationRequest,
        registered_by: &UserId,
    ) -> Result<Registration, RegistrationError>;
}

/// Fixture command that confirms every registration against a synthetic
/// course id.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRegistrationCommand;

#[async_trait]
impl RegistrationCommand for FixtureRegistrationCommand {
    async fn register(
        &self,
        _course_slug: &str,
        request: RegistrationRequest,
        registered_by: &UserId,
    ) -> Result<Registration, RegistrationError> {
        Ok(Registration::new(
            Uuid::new_v4(),
            request,
            registered_by.clone(),
        ))
    }
}
