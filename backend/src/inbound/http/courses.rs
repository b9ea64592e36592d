//! Public course catalogue and registration handlers.
//!
//! ```text
//! GET /api/v1/courses
//! GET /api/v1/courses/{slug}
//! POST /api/v1/courses/{slug}/register {"fullName":"Nadia Benali","phone":"0661 23 45 67"}
//! ```

use actix_web::{HttpResponse, get, post, web};
use dz_locale::{format_date, format_dzd, format_phone};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::ports::RegistrationError;
use crate::domain::{
    Course, DisplayName, Error, Registration, RegistrationRequest, UserValidationError,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::cache_control::public_short_cache_header;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Convert a serializable value to `serde_json::Value`, mapping errors to
/// `domain::Error::internal`.
fn to_json_value<T: Serialize>(value: T) -> Result<serde_json::Value, Error> {
    serde_json::to_value(value).map_err(|err| Error::internal(err.to_string()))
}

/// Course card returned by the public catalogue endpoints.
///
/// Carries the raw values alongside the server-formatted display strings so
/// every client renders the same Algerian conventions.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseCardResponse {
    pub id: Uuid,
    #[schema(example = "python-debutant")]
    pub slug: String,
    pub category_id: Uuid,
    /// Localised copy keyed by locale code (`fr-DZ`, `ar-DZ`).
    #[schema(value_type = Object)]
    pub localizations: serde_json::Value,
    pub price_centimes: i64,
    #[schema(example = "15 000,00 DA")]
    pub price_display: String,
    /// ISO 8601 course start date.
    #[schema(example = "2026-09-05")]
    pub starts_on: String,
    #[schema(example = "5 septembre 2026")]
    pub starts_on_display: String,
    pub seats_total: u32,
    pub contact_phone: String,
    #[schema(example = "05 12 34 56 78")]
    pub contact_phone_display: String,
}

impl TryFrom<&Course> for CourseCardResponse {
    type Error = Error;

    fn try_from(course: &Course) -> Result<Self, Self::Error> {
        Ok(Self {
            id: course.id(),
            slug: course.slug().to_owned(),
            category_id: course.category_id(),
            localizations: to_json_value(course.localizations())?,
            price_centimes: course.price_centimes(),
            price_display: format_dzd(course.price_centimes()),
            starts_on: course.starts_on().to_string(),
            starts_on_display: format_date(course.starts_on()),
            seats_total: course.seats_total(),
            contact_phone: course.contact_phone().to_owned(),
            contact_phone_display: format_phone(course.contact_phone()),
        })
    }
}

/// Registration request body for `POST /api/v1/courses/{slug}/register`.
///
/// Example JSON:
/// `{"fullName":"Nadia Benali","phone":"0661 23 45 67"}`
#[derive(Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterCourseRequest {
    pub full_name: String,
    /// Attendee contact number, stored exactly as entered.
    pub phone: String,
}

impl TryFrom<RegisterCourseRequest> for RegistrationRequest {
    type Error = Error;

    fn try_from(value: RegisterCourseRequest) -> Result<Self, Self::Error> {
        let full_name = DisplayName::new(value.full_name).map_err(map_full_name_error)?;
        Ok(Self {
            full_name,
            phone: value.phone,
        })
    }
}

fn map_full_name_error(err: UserValidationError) -> Error {
    Error::invalid_request(err.to_string())
        .with_details(json!({ "field": "fullName", "code": "invalid_full_name" }))
}

/// Confirmation payload returned after a successful registration.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationResponse {
    pub id: Uuid,
    pub course_id: Uuid,
    #[schema(example = "Nadia Benali")]
    pub full_name: String,
    pub phone: String,
    /// Identifier of the staff member who recorded the registration.
    #[schema(example = "123e4567-e89b-12d3-a456-426614174000")]
    pub registered_by: String,
}

impl From<Registration> for RegistrationResponse {
    fn from(registration: Registration) -> Self {
        let Registration {
            id,
            course_id,
            full_name,
            phone,
            registered_by,
        } = registration;
        Self {
            id,
            course_id,
            full_name: full_name.into(),
            phone,
            registered_by: registered_by.to_string(),
        }
    }
}

/// List courses open for registration.
#[utoipa::path(
    get,
    path = "/api/v1/courses",
    responses(
        (
            status = 200,
            description = "Published course cards",
            headers(("Cache-Control" = String, description = "Cache control header")),
            body = [CourseCardResponse]
        ),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["courses"],
    operation_id = "listCourses",
    security([])
)]
#[get("/courses")]
pub async fn list_courses(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let courses = state.catalogue.published_courses().await?;
    let cards = courses
        .iter()
        .map(CourseCardResponse::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(HttpResponse::Ok()
        .insert_header(public_short_cache_header())
        .json(cards))
}

/// Fetch one published course by slug.
///
/// Unpublished drafts are indistinguishable from unknown slugs here; only
/// the admin surface sees them.
#[utoipa::path(
    get,
    path = "/api/v1/courses/{slug}",
    params(("slug" = String, Path, description = "Course slug")),
    responses(
        (
            status = 200,
            description = "Course details",
            headers(("Cache-Control" = String, description = "Cache control header")),
            body = CourseCardResponse
        ),
        (status = 404, description = "Not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["courses"],
    operation_id = "getCourse",
    security([])
)]
#[get("/courses/{slug}")]
pub async fn get_course(
    state: web::Data<HttpState>,
    slug: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let slug = slug.into_inner();
    let course = state
        .catalogue
        .course_by_slug(&slug)
        .await?
        .filter(Course::published)
        .ok_or_else(|| Error::not_found(format!("no course with slug: {slug}")))?;
    let card = CourseCardResponse::try_from(&course)?;
    Ok(HttpResponse::Ok()
        .insert_header(public_short_cache_header())
        .json(card))
}

/// Register an attendee for a published course.
///
/// The staff member recorded against the registration is the session
/// subject, not the attendee named in the payload.
#[utoipa::path(
    post,
    path = "/api/v1/courses/{slug}/register",
    params(("slug" = String, Path, description = "Course slug")),
    request_body = RegisterCourseRequest,
    responses(
        (status = 201, description = "Registration recorded", body = RegistrationResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 409, description = "Course full", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["courses"],
    operation_id = "registerForCourse"
)]
#[post("/courses/{slug}/register")]
pub async fn register_for_course(
    state: web::Data<HttpState>,
    session: SessionContext,
    slug: web::Path<String>,
    payload: web::Json<RegisterCourseRequest>,
) -> ApiResult<HttpResponse> {
    let registered_by = session.require_user_id()?;
    let request = RegistrationRequest::try_from(payload.into_inner())?;
    let registration = state
        .registrations
        .register(&slug, request, &registered_by)
        .await
        .map_err(map_registration_error)?;
    Ok(HttpResponse::Created().json(RegistrationResponse::from(registration)))
}

fn map_registration_error(err: RegistrationError) -> Error {
    match &err {
        RegistrationError::CourseUnknown { .. } | RegistrationError::CourseUnpublished { .. } => {
            Error::not_found(err.to_string())
        }
        RegistrationError::CourseFull { .. } => Error::conflict(err.to_string()),
    }
}
