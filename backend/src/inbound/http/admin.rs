//! Admin catalogue and registration handlers.
//!
//! ```text
//! GET /api/v1/admin/courses
//! POST /api/v1/admin/courses
//! GET /api/v1/admin/registrations
//! ```
//!
//! The access gate middleware vets capabilities before these handlers run;
//! they still require a session subject so the routes fail closed if
//! mounted without the gate.

use std::collections::BTreeMap;

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::ports::CatalogueCommandError;
use crate::domain::{
    Category, CourseDraft, Error, LocalizationMap, LocalizationValidationError, LocalizedCopy,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::cache_control::private_no_cache_header;
use crate::inbound::http::courses::{CourseCardResponse, RegistrationResponse};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_iso_date};

/// Localised copy payload for one locale.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedCopyBody {
    pub title: String,
    pub summary: Option<String>,
}

/// Request body for `POST /api/v1/admin/courses`.
///
/// The server assigns the course identifier; a draft stays unpublished
/// unless `published` is set.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourseBody {
    #[schema(example = "python-debutant")]
    pub slug: String,
    pub category_id: Uuid,
    /// Localised copy keyed by locale code (`fr-DZ`, `ar-DZ`).
    pub localizations: BTreeMap<String, LocalizedCopyBody>,
    pub price_centimes: i64,
    /// ISO 8601 course start date.
    #[schema(example = "2026-09-05")]
    pub starts_on: String,
    pub seats_total: u32,
    pub contact_phone: String,
    #[serde(default)]
    pub published: bool,
}

impl CreateCourseBody {
    fn into_draft(self) -> Result<CourseDraft, Error> {
        let starts_on = parse_iso_date(&self.starts_on, FieldName::new("startsOn"))?;
        let localizations = self
            .localizations
            .into_iter()
            .map(|(locale, copy)| (locale, LocalizedCopy::new(copy.title, copy.summary)))
            .collect::<BTreeMap<_, _>>();
        let localizations = LocalizationMap::new(localizations).map_err(map_localization_error)?;

        Ok(CourseDraft {
            id: Uuid::new_v4(),
            slug: self.slug,
            category_id: self.category_id,
            localizations,
            price_centimes: self.price_centimes,
            starts_on,
            seats_total: self.seats_total,
            contact_phone: self.contact_phone,
            published: self.published,
        })
    }
}

fn map_localization_error(err: LocalizationValidationError) -> Error {
    Error::invalid_request(err.to_string())
        .with_details(json!({ "field": "localizations", "code": "invalid_localizations" }))
}

/// Full catalogue payload for the admin dashboard.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminCatalogueBody {
    /// Course categories, including those without published courses.
    #[schema(value_type = Vec<Object>)]
    pub categories: Vec<Category>,
    /// Every course, drafts included.
    pub courses: Vec<CourseCardResponse>,
}

/// Report the full catalogue, drafts included.
#[utoipa::path(
    get,
    path = "/api/v1/admin/courses",
    responses(
        (
            status = 200,
            description = "Full catalogue",
            headers(("Cache-Control" = String, description = "Cache control header")),
            body = AdminCatalogueBody
        ),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["admin"],
    operation_id = "adminListCourses",
    security(("SessionCookie" = []))
)]
#[get("")]
pub async fn admin_list_courses(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let _user_id = session.require_user_id()?;
    let categories = state.catalogue.categories().await?;
    let courses = state.catalogue.all_courses().await?;
    let payload = AdminCatalogueBody {
        categories,
        courses: courses
            .iter()
            .map(CourseCardResponse::try_from)
            .collect::<Result<Vec<_>, _>>()?,
    };
    Ok(HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(payload))
}

/// Create a course from an admin draft.
#[utoipa::path(
    post,
    path = "/api/v1/admin/courses",
    request_body = CreateCourseBody,
    responses(
        (status = 201, description = "Course created", body = CourseCardResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 409, description = "Slug already in use", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["admin"],
    operation_id = "adminCreateCourse",
    security(("SessionCookie" = []))
)]
#[post("")]
pub async fn admin_create_course(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateCourseBody>,
) -> ApiResult<HttpResponse> {
    let _user_id = session.require_user_id()?;
    let draft = payload.into_inner().into_draft()?;
    let course = state
        .catalogue_admin
        .create_course(draft)
        .await
        .map_err(map_catalogue_command_error)?;
    let card = CourseCardResponse::try_from(&course)?;
    Ok(HttpResponse::Created().json(card))
}

fn map_catalogue_command_error(err: CatalogueCommandError) -> Error {
    match &err {
        CatalogueCommandError::SlugTaken { .. } => Error::conflict(err.to_string()),
        CatalogueCommandError::UnknownCategory { .. } | CatalogueCommandError::Invalid { .. } => {
            Error::invalid_request(err.to_string())
        }
    }
}

/// List recorded registrations.
#[utoipa::path(
    get,
    path = "/api/v1/admin/registrations",
    responses(
        (
            status = 200,
            description = "Registrations",
            headers(("Cache-Control" = String, description = "Cache control header")),
            body = [RegistrationResponse]
        ),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["admin"],
    operation_id = "adminListRegistrations",
    security(("SessionCookie" = []))
)]
#[get("")]
pub async fn admin_list_registrations(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let _user_id = session.require_user_id()?;
    let registrations = state.registrations_query.registrations().await?;
    let payload: Vec<RegistrationResponse> = registrations
        .into_iter()
        .map(RegistrationResponse::from)
        .collect();
    Ok(HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(payload))
}
