//! Write-side port for catalogue administration.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Course, CourseDraft};

use super::port_error;

port_error! {
    /// Errors raised when amending the catalogue.
    pub enum CatalogueCommandError {
        /// Another course already owns the requested slug.
        SlugTaken { slug: String } =>
            "course slug already in use: {slug}",
        /// The referenced category does not exist.
        UnknownCategory { category_id: Uuid } =>
            "unknown course category: {category_id}",
        /// The draft failed domain validation.
        Invalid { message: String } =>
            "invalid course draft: {message}",
    }
}

/// Port for adding courses to the catalogue.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseCatalogueCommand: Send + Sync {
    /// Validate and add a new course.
    async fn create_course(&self, draft: CourseDraft) -> Result<Course, CatalogueCommandError>;
}

/// Fixture command that validates the draft and pretends to store it.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCourseCatalogueCommand;

#[async_trait]
impl CourseCatalogueCommand for FixtureCourseCatalogueCommand {
    async fn create_course(&self, draft: CourseDraft) -> Result<Course, CatalogueCommandError> {
        Course::new(draft).map_err(|err| CatalogueCommandError::invalid(err.to_string()))
    }
}
