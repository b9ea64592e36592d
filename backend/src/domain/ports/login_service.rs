//! Driving port for login/authentication use-cases.
//!
//! Inbound adapters authenticate through this port without importing the
//! backing staff directory, so HTTP handler tests can substitute a test
//! double instead of wiring one up.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, UserId};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated user id.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error>;
}

/// User id produced by [`FixtureLoginService`] for the fixture account.
pub const FIXTURE_STAFF_ID: &str = "123e4567-e89b-12d3-a456-426614174000";

const FIXTURE_USERNAME: &str = "amina";
const FIXTURE_PASSWORD: &str = "password";

/// Deterministic authenticator for tests and local development.
///
/// Accepts exactly one account, `amina` / `password`, and maps it to
/// [`FIXTURE_STAFF_ID`]. Every other credential pair is rejected as
/// unauthorized.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLoginService;

#[async_trait]
impl LoginService for FixtureLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        let known = credentials.username() == FIXTURE_USERNAME
            && credentials.password() == FIXTURE_PASSWORD;
        if !known {
            return Err(Error::unauthorized("invalid credentials"));
        }
        UserId::new(FIXTURE_STAFF_ID)
            .map_err(|err| Error::internal(format!("invalid fixture user id: {err}")))
    }
}
