//! Staff authentication handlers.
//!
//! ```text
//! POST /api/v1/login {"username":"amina","password":"password"}
//! POST /api/v1/logout
//! GET /api/v1/me
//! ```

use crate::domain::{AuthSnapshot, Error, LoginCredentials, LoginValidationError, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Credentials payload accepted by `POST /api/v1/login`, e.g.
/// `{"username":"amina","password":"password"}`.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.password)
    }
}

/// Wire projection of the authentication snapshot served by `GET /api/v1/me`.
///
/// `restoring` is set while a persisted login is known but the staff profile
/// has not been re-read yet; clients should treat it as "hold on" rather
/// than "logged out".
#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthSnapshotResponse {
    pub authenticated: bool,
    pub user: Option<User>,
    #[schema(example = json!(["manage_courses"]))]
    pub permissions: Vec<String>,
    pub restoring: bool,
}

impl From<AuthSnapshot> for AuthSnapshotResponse {
    fn from(snapshot: AuthSnapshot) -> Self {
        let AuthSnapshot {
            authenticated,
            user,
            permissions,
            restoring,
        } = snapshot;
        Self {
            authenticated,
            user,
            permissions: permissions.iter().map(ToString::to_string).collect(),
            restoring,
        }
    }
}

/// Authenticate a staff member and establish a session.
///
/// A successful response carries only the session cookie; clients fetch the
/// staff profile separately via `GET /api/v1/me`.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Session established", headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Validation failed", body = Error),
        (status = 401, description = "Unknown credentials", body = Error),
        (status = 500, description = "Internal server error")
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let credentials =
        LoginCredentials::try_from(payload.into_inner()).map_err(map_login_validation_error)?;
    let user_id = state.login.authenticate(&credentials).await?;
    session.persist_user(&user_id)?;
    Ok(HttpResponse::Ok().finish())
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    let (message, field, code) = match err {
        LoginValidationError::EmptyUsername => {
            ("username must not be empty", "username", "empty_username")
        }
        LoginValidationError::EmptyPassword => {
            ("password must not be empty", "password", "empty_password")
        }
    };
    Error::invalid_request(message).with_details(json!({ "field": field, "code": code }))
}

/// End the current session.
///
/// Purging an absent session is a no-op, so the endpoint is idempotent.
#[utoipa::path(
    post,
    path = "/api/v1/logout",
    responses(
        (status = 204, description = "Session ended", headers(("Set-Cookie" = String, description = "Cleared session cookie"))),
        (status = 500, description = "Internal server error")
    ),
    tags = ["auth"],
    operation_id = "logout"
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.purge();
    HttpResponse::NoContent().finish()
}

/// Report the caller's authentication snapshot.
///
/// Anonymous callers receive `{"authenticated": false, ...}` rather than an
/// error so the client can render the signed-out state.
#[utoipa::path(
    get,
    path = "/api/v1/me",
    responses(
        (status = 200, description = "Authentication snapshot", body = AuthSnapshotResponse),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "me",
    security([])
)]
#[get("/me")]
pub async fn me(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<AuthSnapshotResponse>> {
    let subject = session.user_id()?;
    let snapshot = state.auth_state.snapshot(subject.as_ref()).await?;
    Ok(web::Json(AuthSnapshotResponse::from(snapshot)))
}
