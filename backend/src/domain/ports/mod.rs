//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::port_error;

mod auth_state_query;
mod course_catalogue_command;
mod course_catalogue_query;
mod login_service;
mod registration_command;
mod registration_query;
mod restoration_pause;

#[cfg(test)]
pub use auth_state_query::MockAuthStateQuery;
pub use auth_state_query::{AuthStateQuery, FixtureAuthState};
#[cfg(test)]
pub use course_catalogue_command::MockCourseCatalogueCommand;
pub use course_catalogue_command::{
    CatalogueCommandError, CourseCatalogueCommand, FixtureCourseCatalogueCommand,
};
#[cfg(test)]
pub use course_catalogue_query::MockCourseCatalogueQuery;
pub use course_catalogue_query::{CourseCatalogueQuery, FixtureCourseCatalogue};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::{FIXTURE_STAFF_ID, FixtureLoginService, LoginService};
#[cfg(test)]
pub use registration_command::MockRegistrationCommand;
pub use registration_command::{FixtureRegistrationCommand, RegistrationCommand, RegistrationError};
#[cfg(test)]
pub use registration_query::MockRegistrationQuery;
pub use registration_query::{FixtureRegistrationQuery, RegistrationQuery};
#[cfg(test)]
pub use restoration_pause::MockRestorationPause;
pub use restoration_pause::{NoopPause, RestorationPause};

#[cfg(test)]
mod tests;
