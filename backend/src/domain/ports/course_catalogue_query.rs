//! Read-side port for course catalogue browsing.
//!
//! Inbound adapters (HTTP handlers) use this port to fetch catalogue data
//! without importing outbound storage concerns. Production backs it with the
//! seeded in-memory registry; tests can use a deterministic double.

use async_trait::async_trait;

use crate::domain::{Category, Course, Error};

/// Port for reading the course catalogue.
///
/// All collections are deterministically ordered by slug. An empty
/// catalogue yields empty vectors rather than an error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseCatalogueQuery: Send + Sync {
    /// Published courses for public browsing.
    async fn published_courses(&self) -> Result<Vec<Course>, Error>;

    /// Look up one course by slug, published or not.
    ///
    /// Callers serving public traffic must check [`Course::published`]
    /// before rendering the result.
    async fn course_by_slug(&self, slug: &str) -> Result<Option<Course>, Error>;

    /// Every course, including unpublished drafts, for the admin area.
    async fn all_courses(&self) -> Result<Vec<Course>, Error>;

    /// Course categories.
    async fn categories(&self) -> Result<Vec<Category>, Error>;
}

/// Fixture catalogue for tests that do not exercise catalogue reads.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCourseCatalogue;

#[async_trait]
impl CourseCatalogueQuery for FixtureCourseCatalogue {
    async fn published_courses(&self) -> Result<Vec<Course>, Error> {
        Ok(Vec::new())
    }

    async fn course_by_slug(&self, _slug: &str) -> Result<Option<Course>, Error> {
        Ok(None)
    }

    async fn all_courses(&self) -> Result<Vec<Course>, Error> {
        Ok(Vec::new())
    }

    async fn categories(&self) -> Result<Vec<Category>, Error> {
        Ok(Vec::new())
    }
}
