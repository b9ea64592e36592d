//! Access decisions for capability-protected areas.
//!
//! The admin area renders nothing it should not: a visitor is redirected to
//! the login page, an authenticated user without the required capability
//! sees a static forbidden message and is sent back to the admin home, and
//! an authorised user sees the protected content. The awkward case is the
//! moment just after start-up, when a session cookie proves authentication
//! but the directory is still restoring its persisted state and cannot yet
//! produce the user projection. [`evaluate_gate`] captures the whole rule as
//! a pure function; [`AccessGateService`] drives the one bounded re-check
//! the restoration window is allowed.

use std::sync::Arc;

use crate::domain::ports::{AuthStateQuery, RestorationPause};
use crate::domain::{Capability, Error, PermissionSet, User, UserId};

/// Read-only view of a subject's authentication state.
///
/// Produced by [`AuthStateQuery`]; `restoring` marks the window where the
/// backing store may still be warming, making an absent `user` inconclusive
/// rather than final.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSnapshot {
    /// Whether the subject presented a valid authentication proof.
    pub authenticated: bool,
    /// The resolved user projection, when available.
    pub user: Option<User>,
    /// Capabilities granted to the subject.
    pub permissions: PermissionSet,
    /// Whether persisted-state restoration may still be in flight.
    pub restoring: bool,
}

impl AuthSnapshot {
    /// Snapshot for a subject with no authentication proof.
    #[must_use]
    pub fn anonymous() -> Self {
        Self {
            authenticated: false,
            user: None,
            permissions: PermissionSet::empty(),
            restoring: false,
        }
    }

    /// Snapshot for an authenticated subject whose projection has not
    /// resolved yet.
    #[must_use]
    pub fn warming() -> Self {
        Self {
            authenticated: true,
            user: None,
            permissions: PermissionSet::empty(),
            restoring: true,
        }
    }

    /// Snapshot for a fully resolved authenticated subject.
    #[must_use]
    pub fn resolved(user: User, permissions: PermissionSet) -> Self {
        Self {
            authenticated: true,
            user: Some(user),
            permissions,
            restoring: false,
        }
    }
}

/// Classified authentication state the gate derived from a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    /// Authenticated, but the user projection is still inconclusive.
    Unresolved,
    /// No valid authentication proof.
    Unauthenticated,
    /// Authenticated but lacking the required capability.
    AuthenticatedNoPermission,
    /// Authenticated and authorised for the protected content.
    AuthenticatedAuthorized,
}

/// What the gate renders while (or instead of) the protected content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateView {
    /// Render nothing.
    Blank,
    /// Render the static forbidden message.
    ForbiddenMessage,
    /// Render the protected content.
    Children,
}

/// Navigation the gate instructs alongside the rendered view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateRedirect {
    /// Send the subject to the login page.
    Login,
    /// Send the subject back to the admin home page.
    AdminHome,
}

/// Whether the single restoration re-check is still available.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryBudget {
    /// The bounded re-check has not been used.
    Available,
    /// The bounded re-check has already run.
    Spent,
}

/// Outcome of one gate evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateDecision {
    /// Classified authentication state.
    pub state: GateState,
    /// View to render.
    pub view: GateView,
    /// Navigation side effect, if any.
    pub redirect: Option<GateRedirect>,
}

/// Evaluate the access rule over one snapshot.
///
/// The function is pure and total. Rules, in order:
///
/// 1. An unauthenticated subject renders blank and is redirected to login,
///    whatever the capability requirement or retry budget.
/// 2. An authenticated subject with no user projection, while restoration is
///    still in flight and the budget is [`RetryBudget::Available`], is
///    [`GateState::Unresolved`]: blank, no redirect, and the caller owes one
///    bounded re-check.
/// 3. When a capability is required, only a resolved user holding it passes;
///    an absent user projection fails every capability check. Failure
///    renders the forbidden message and redirects to the admin home.
/// 4. Otherwise the protected content renders.
#[must_use]
pub fn evaluate_gate(
    snapshot: &AuthSnapshot,
    required: Option<&Capability>,
    budget: RetryBudget,
) -> GateDecision {
    if !snapshot.authenticated {
        return GateDecision {
            state: GateState::Unauthenticated,
            view: GateView::Blank,
            redirect: Some(GateRedirect::Login),
        };
    }

    if snapshot.user.is_none() && snapshot.restoring && budget == RetryBudget::Available {
        return GateDecision {
            state: GateState::Unresolved,
            view: GateView::Blank,
            redirect: None,
        };
    }

    if let Some(capability) = required {
        let granted = snapshot.user.is_some() && snapshot.permissions.contains(capability);
        if !granted {
            return GateDecision {
                state: GateState::AuthenticatedNoPermission,
                view: GateView::ForbiddenMessage,
                redirect: Some(GateRedirect::AdminHome),
            };
        }
    }

    GateDecision {
        state: GateState::AuthenticatedAuthorized,
        view: GateView::Children,
        redirect: None,
    }
}

/// Drives gate evaluation against the auth state port, spending at most one
/// bounded pause on an unresolved snapshot.
#[derive(Clone)]
pub struct AccessGateService {
    auth: Arc<dyn AuthStateQuery>,
    pause: Arc<dyn RestorationPause>,
}

impl AccessGateService {
    /// Build a service over the given collaborators.
    pub fn new(auth: Arc<dyn AuthStateQuery>, pause: Arc<dyn RestorationPause>) -> Self {
        Self { auth, pause }
    }

    /// Resolve the gate decision for `subject`.
    ///
    /// Queries a snapshot and evaluates it. An [`GateState::Unresolved`]
    /// outcome schedules exactly one pause, then re-queries and re-evaluates
    /// with the budget spent; every other outcome returns immediately. The
    /// returned future owns the pending pause, so dropping it (request
    /// teardown) cancels the re-check.
    pub async fn resolve(
        &self,
        subject: Option<&UserId>,
        required: Option<&Capability>,
    ) -> Result<GateDecision, Error> {
        let snapshot = self.auth.snapshot(subject).await?;
        let decision = evaluate_gate(&snapshot, required, RetryBudget::Available);
        if decision.state != GateState::Unresolved {
            return Ok(decision);
        }

        self.pause.pause().await;
        let snapshot = self.auth.snapshot(subject).await?;
        Ok(evaluate_gate(&snapshot, required, RetryBudget::Spent))
    }
}
