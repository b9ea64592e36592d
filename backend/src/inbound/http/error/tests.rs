//! Tests for HTTP error mapping.

use super::*;
use crate::domain::Error;
use actix_web::ResponseError;
use actix_web::body::to_bytes;
use actix_web::http::StatusCode;
use rstest::rstest;
use rstest_bdd_macros::{given, then, when};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

/// Renders an error the way a handler failure would and splits the response
/// into its observable parts.
async fn rendered(error: &Error) -> (StatusCode, Option<String>, Error) {
    let response = error.error_response();
    let status = response.status();
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .map(|value| value.to_str().expect("trace header is UTF-8").to_owned());
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    let payload = serde_json::from_slice(&bytes).expect("payload is an Error document");
    (status, header, payload)
}

#[rstest]
#[case::invalid_request(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case::unauthorized(Error::unauthorized("no auth"), StatusCode::UNAUTHORIZED)]
#[case::forbidden(Error::forbidden("denied"), StatusCode::FORBIDDEN)]
#[case::not_found(Error::not_found("missing"), StatusCode::NOT_FOUND)]
#[case::conflict(Error::conflict("slug taken"), StatusCode::CONFLICT)]
#[case::internal(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_codes_follow_the_error_code(#[case] error: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&error), status);
}

#[rstest]
#[actix_web::test]
async fn internal_detail_never_reaches_the_payload() {
    let error = Error::internal("seed account failed validation")
        .with_trace_id(TRACE_ID)
        .with_details(json!({"account": "amina"}));

    let (status, header, payload) = rendered(&error).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(header.as_deref(), Some(TRACE_ID));
    assert_eq!(payload.code(), ErrorCode::InternalError);
    assert_eq!(payload.message(), "Internal server error");
    assert_eq!(payload.trace_id(), Some(TRACE_ID));
    assert!(payload.details().is_none());
}

#[rstest]
#[actix_web::test]
async fn client_errors_pass_through_with_their_details() {
    let error = Error::invalid_request("startDate must be an ISO date (yyyy-mm-dd)")
        .with_trace_id(TRACE_ID)
        .with_details(json!({"field": "startDate"}));

    let (status, header, payload) = rendered(&error).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(header.as_deref(), Some(TRACE_ID));
    assert_eq!(payload.code(), ErrorCode::InvalidRequest);
    assert_eq!(payload.message(), "startDate must be an ISO date (yyyy-mm-dd)");
    assert_eq!(payload.details(), Some(&json!({"field": "startDate"})));
}

#[rstest]
#[actix_web::test]
async fn missing_trace_id_leaves_the_header_unset() {
    let error = Error::not_found("no course with slug: anglais-durgence");

    let (status, header, payload) = rendered(&error).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(header.is_none(), "no trace id, no trace header");
    assert_eq!(payload.trace_id(), None);
    assert_eq!(payload.message(), "no course with slug: anglais-durgence");
}

#[given("a forbidden error code")]
fn a_forbidden_error_code() -> ErrorCode {
    ErrorCode::Forbidden
}

#[when("the code is mapped to an HTTP status")]
fn the_code_is_mapped_to_an_http_status(code: ErrorCode) -> StatusCode {
    super::http_status(code)
}

#[then("the status is 403 Forbidden")]
fn the_status_is_403_forbidden(status: StatusCode) {
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[rstest]
fn forbidden_maps_to_403() {
    let status = the_code_is_mapped_to_an_http_status(a_forbidden_error_code());
    the_status_is_403_forbidden(status);
}

#[given("an internal failure with a trace id")]
fn an_internal_failure_with_a_trace_id() -> Error {
    Error::internal("catalogue registry parse failed")
        .with_trace_id(TRACE_ID)
        .with_details(json!({"path": "/etc/takwin/courses.json"}))
}

#[when("the failure is rendered for the client")]
fn the_failure_is_rendered_for_the_client(error: Error) -> Error {
    super::client_view(&error)
}

#[then("only the generic message and the trace id survive")]
fn only_the_generic_message_and_the_trace_id_survive(view: Error) {
    assert_eq!(view.message(), "Internal server error");
    assert_eq!(view.trace_id(), Some(TRACE_ID));
    assert!(view.details().is_none());
}

#[rstest]
fn internal_failures_render_generically() {
    let view = the_failure_is_rendered_for_the_client(an_internal_failure_with_a_trace_id());
    only_the_generic_message_and_the_trace_id_survive(view);
}

#[rstest]
fn actix_errors_become_redacted_internal_errors() {
    use actix_web::error;

    let actix_err = error::ErrorBadRequest("boom");
    let err: Error = actix_err.into();

    assert_eq!(err.code(), ErrorCode::InternalError);
    assert_eq!(err.message(), "Internal server error");
    assert_eq!(err.trace_id(), None);
    assert_eq!(err.details(), None);
}
