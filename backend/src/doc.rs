//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: All HTTP endpoints from the inbound layer (auth, courses,
//!   admin, health)
//! - **Schemas**: Request and response bodies alongside the shared error
//!   envelope
//! - **Security**: Session cookie authentication scheme
//!
//! The generated specification is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::domain::{Error, ErrorCode, User};
use crate::inbound::http::admin::{AdminCatalogueBody, CreateCourseBody, LocalizedCopyBody};
use crate::inbound::http::courses::{
    CourseCardResponse, RegisterCourseRequest, RegistrationResponse,
};
use crate::inbound::http::health::ProbeBody;
use crate::inbound::http::users::{AuthSnapshotResponse, LoginRequest};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Registers the session cookie scheme on the generated document.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let scheme = SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
            "session",
            "Signed session cookie obtained from POST /api/v1/login.",
        )));
        openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default)
            .add_security_scheme("SessionCookie", scheme);
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Takwin backend API",
        description = "HTTP interface for the public course catalogue, staff-side \
                       registration capture, and capability-gated admin areas.",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0.html"
        )
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::users::me,
        crate::inbound::http::courses::list_courses,
        crate::inbound::http::courses::get_course,
        crate::inbound::http::courses::register_for_course,
        crate::inbound::http::admin::admin_list_courses,
        crate::inbound::http::admin::admin_create_course,
        crate::inbound::http::admin::admin_list_registrations,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        User,
        Error,
        ErrorCode,
        LoginRequest,
        AuthSnapshotResponse,
        CourseCardResponse,
        RegisterCourseRequest,
        RegistrationResponse,
        LocalizedCopyBody,
        CreateCourseBody,
        AdminCatalogueBody,
        ProbeBody,
    )),
    tags(
        (name = "auth", description = "Session establishment and the caller's authentication snapshot"),
        (name = "courses", description = "Public course catalogue and registration capture"),
        (name = "admin", description = "Capability-gated catalogue and registration administration"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
