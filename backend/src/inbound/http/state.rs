//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AuthStateQuery, CourseCatalogueCommand, CourseCatalogueQuery, FixtureAuthState,
    FixtureCourseCatalogue, FixtureCourseCatalogueCommand, FixtureLoginService,
    FixtureRegistrationCommand, FixtureRegistrationQuery, LoginService, RegistrationCommand,
    RegistrationQuery,
};

/// Dependency bundle for HTTP handlers.
///
/// [`Default`] wires every port to its fixture implementation, so tests
/// override only the ports they exercise:
///
/// ```no_run
/// use std::sync::Arc;
///
/// use backend::domain::ports::FixtureLoginService;
/// use backend::inbound::http::state::HttpState;
///
/// let state = HttpState {
///     login: Arc::new(FixtureLoginService),
///     ..HttpState::default()
/// };
/// let _login = state.login.clone();
/// ```
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub auth_state: Arc<dyn AuthStateQuery>,
    pub catalogue: Arc<dyn CourseCatalogueQuery>,
    pub catalogue_admin: Arc<dyn CourseCatalogueCommand>,
    pub registrations: Arc<dyn RegistrationCommand>,
    pub registrations_query: Arc<dyn RegistrationQuery>,
}

impl Default for HttpState {
    fn default() -> Self {
        Self {
            login: Arc::new(FixtureLoginService),
            auth_state: Arc::new(FixtureAuthState),
            catalogue: Arc::new(FixtureCourseCatalogue),
            catalogue_admin: Arc::new(FixtureCourseCatalogueCommand),
            registrations: Arc::new(FixtureRegistrationCommand),
            registrations_query: Arc::new(FixtureRegistrationQuery),
        }
    }
}
