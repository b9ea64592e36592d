//! Read-side port for the registration ledger.

use async_trait::async_trait;

use crate::domain::{Error, Registration};

/// Port for listing captured registrations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationQuery: Send + Sync {
    /// Every registration in capture order.
    async fn registrations(&self) -> Result<Vec<Registration>, Error>;
}

/// Fixture query for tests that do not exercise the ledger.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRegistrationQuery;

#[async_trait]
impl RegistrationQuery for FixtureRegistrationQuery {
    async fn registrations(&self) -> Result<Vec<Registration>, Error> {
        Ok(Vec::new())
    }
}
