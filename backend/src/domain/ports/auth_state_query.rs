//! Read-side port for authentication state snapshots.
//!
//! The staff directory owns authentication state. This port exposes it as a
//! point-in-time [`AuthSnapshot`] so gate evaluation stays a pure function
//! over explicit inputs rather than a read of ambient session state.

use async_trait::async_trait;

use crate::domain::{AuthSnapshot, Capability, DisplayName, Error, PermissionSet, User, UserId};

/// Port for reading a subject's authentication state.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthStateQuery: Send + Sync {
    /// Return the current snapshot for `subject`.
    ///
    /// `None` means no session proof was presented. A snapshot with
    /// `restoring` set marks the window where the directory is still
    /// warming its persisted state, making an absent user projection
    /// inconclusive rather than final.
    async fn snapshot<'a>(&self, subject: Option<&'a UserId>) -> Result<AuthSnapshot, Error>;
}

/// Deterministic auth state for tests and local development.
///
/// Any subject resolves immediately to a staff member holding every
/// capability; an absent subject is anonymous.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAuthState;

#[async_trait]
impl AuthStateQuery for FixtureAuthState {
    async fn snapshot(&self, subject: Option<&UserId>) -> Result<AuthSnapshot, Error> {
        let Some(subject) = subject else {
            return Ok(AuthSnapshot::anonymous());
        };

        let display_name = DisplayName::new("Amina Boudjema")
            .map_err(|err| Error::internal(format!("invalid fixture display name: {err}")))?;
        let permissions = PermissionSet::from_iter([
            Capability::manage_courses(),
            Capability::view_registrations(),
        ]);
        Ok(AuthSnapshot::resolved(
            User::new(subject.clone(), display_name),
            permissions,
        ))
    }
}
