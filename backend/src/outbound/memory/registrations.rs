//! Append-only in-memory registration ledger.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{RegistrationCommand, RegistrationError, RegistrationQuery};
use crate::domain::{Error, Registration, RegistrationRequest, UserId};

use super::MemoryCatalogue;

/// Ledger of captured registrations with seat enforcement.
pub struct MemoryRegistrations {
    catalogue: Arc<MemoryCatalogue>,
    records: RwLock<Vec<Registration>>,
}

impl MemoryRegistrations {
    /// Build an empty ledger checking seats against `catalogue`.
    pub fn new(catalogue: Arc<MemoryCatalogue>) -> Self {
        Self {
            catalogue,
            records: RwLock::new(Vec::new()),
        }
    }
}

#[async_trait]
impl RegistrationCommand for MemoryRegistrations {
    async fn register(
        &self,
        course_slug: &str,
        request: RegistrationRequest,
        registered_by: &UserId,
    ) -> Result<Registration, RegistrationError> {
        let course = self
            .catalogue
            .find_course(course_slug)
            .await
            .ok_or_else(|| RegistrationError::course_unknown(course_slug))?;
        if !course.published() {
            return Err(RegistrationError::course_unpublished(course_slug));
        }

        // Seat counting and the append happen under one write guard so two
        // concurrent registrations cannot both claim the last seat.
        let mut records = self.records.write().await;
        let taken = records
            .iter()
            .filter(|record| record.course_id == course.id())
            .count();
        if taken >= course.seats_total() as usize {
            return Err(RegistrationError::course_full(course_slug));
        }

        let registration = Registration::new(course.id(), request, registered_by.clone());
        records.push(registration.clone());
        Ok(registration)
    }
}

#[async_trait]
impl RegistrationQuery for MemoryRegistrations {
    async fn registrations(&self) -> Result<Vec<Registration>, Error> {
        Ok(self.records.read().await.clone())
    }
}
