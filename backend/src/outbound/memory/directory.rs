//! In-memory staff directory backing login and auth-state queries.
//!
//! The directory is seeded with demo accounts at startup. Until
//! [`MemoryDirectory::mark_restored`] runs, snapshots for authenticated
//! subjects report the restoration window: `restoring` is set and the user
//! projection stays absent, so the access gate knows an inconclusive lookup
//! may still resolve.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use crate::domain::ports::{AuthStateQuery, FIXTURE_STAFF_ID, LoginService};
use crate::domain::{
    AuthSnapshot, Capability, DisplayName, Error, LoginCredentials, PermissionSet, User, UserId,
};

/// Demo password shared by every seeded account.
const SEED_PASSWORD: &str = "password";

const KARIM_STAFF_ID: &str = "223e4567-e89b-12d3-a456-426614174001";
const YACINE_STAFF_ID: &str = "323e4567-e89b-12d3-a456-426614174002";

struct StaffAccount {
    username: &'static str,
    password: &'static str,
    user: User,
    permissions: PermissionSet,
}

impl StaffAccount {
    fn new(
        id: &str,
        username: &'static str,
        display_name: &str,
        capabilities: impl IntoIterator<Item = Capability>,
    ) -> Result<Self, Error> {
        let id = UserId::new(id)
            .map_err(|err| Error::internal(format!("invalid seeded account id: {err}")))?;
        let display_name = DisplayName::new(display_name)
            .map_err(|err| Error::internal(format!("invalid seeded account name: {err}")))?;
        Ok(Self {
            username,
            password: SEED_PASSWORD,
            user: User::new(id, display_name),
            permissions: PermissionSet::from_iter(capabilities),
        })
    }
}

/// Seeded staff directory serving both authentication ports.
pub struct MemoryDirectory {
    accounts: Vec<StaffAccount>,
    restored: AtomicBool,
}

impl MemoryDirectory {
    /// Build the demo directory.
    ///
    /// Three accounts, all sharing the demo password:
    ///
    /// | username | capabilities                          |
    /// |----------|---------------------------------------|
    /// | `amina`  | `manage_courses`, `view_registrations`|
    /// | `karim`  | `view_registrations`                  |
    /// | `yacine` | none                                  |
    pub fn seeded() -> Result<Self, Error> {
        let accounts = vec![
            StaffAccount::new(
                FIXTURE_STAFF_ID,
                "amina",
                "Amina Boudjema",
                [
                    Capability::manage_courses(),
                    Capability::view_registrations(),
                ],
            )?,
            StaffAccount::new(
                KARIM_STAFF_ID,
                "karim",
                "Karim Haddad",
                [Capability::view_registrations()],
            )?,
            StaffAccount::new(YACINE_STAFF_ID, "yacine", "Yacine Merbah", [])?,
        ];
        Ok(Self {
            accounts,
            restored: AtomicBool::new(false),
        })
    }

    /// Close the restoration window; subsequent snapshots resolve fully.
    pub fn mark_restored(&self) {
        self.restored.store(true, Ordering::Release);
    }

    /// Whether persisted state has finished restoring.
    #[must_use]
    pub fn is_restored(&self) -> bool {
        self.restored.load(Ordering::Acquire)
    }
}

#[async_trait]
impl LoginService for MemoryDirectory {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        self.accounts
            .iter()
            .find(|account| {
                account.username == credentials.username()
                    && account.password == credentials.password()
            })
            .map(|account| account.user.id().clone())
            .ok_or_else(|| Error::unauthorized("invalid credentials"))
    }
}

#[async_trait]
impl AuthStateQuery for MemoryDirectory {
    async fn snapshot(&self, subject: Option<&UserId>) -> Result<AuthSnapshot, Error> {
        let Some(subject) = subject else {
            return Ok(AuthSnapshot::anonymous());
        };

        if !self.is_restored() {
            return Ok(AuthSnapshot::warming());
        }

        // A subject the restored directory does not know is a stale session;
        // it reports as anonymous so the gate sends it back through login.
        Ok(self
            .accounts
            .iter()
            .find(|account| account.user.id() == subject)
            .map(|account| {
                AuthSnapshot::resolved(account.user.clone(), account.permissions.clone())
            })
            .unwrap_or_else(AuthSnapshot::anonymous))
    }
}
