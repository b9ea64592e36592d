//! Capability gate wrapping protected route scopes.
//!
//! The gate reads the session subject, asks the staff directory for an
//! authentication snapshot, and translates the resulting
//! [`GateDecision`](crate::domain::GateDecision) into HTTP:
//!
//! - unauthenticated subjects receive `303 See Other` towards the login page
//!   with an empty body;
//! - authenticated subjects lacking the required capability receive `403`
//!   with a static forbidden payload pointing back at the admin home;
//! - authorised subjects fall through to the wrapped service.
//!
//! While the directory is restoring persisted state the gate spends at most
//! one bounded pause before deciding. The pause future is owned by the
//! in-flight response future, so a dropped request cancels the pending
//! re-check instead of leaving a timer behind.

use std::rc::Rc;
use std::task::{Context, Poll};

use actix_session::SessionExt;
use actix_web::body::{EitherBody, MessageBody};
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header;
use actix_web::{Error, HttpResponse, ResponseError};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use serde_json::json;
use tracing::warn;

use crate::domain::{AccessGateService, Capability, GateState, UserId};
use crate::inbound::http::session::SessionContext;

/// Destinations the gate points subjects at when refusing entry.
#[derive(Debug, Clone)]
pub struct GatePolicy {
    /// Where unauthenticated subjects are redirected.
    pub login_destination: String,
    /// Where unauthorised subjects are pointed back to.
    pub admin_home_destination: String,
}

impl Default for GatePolicy {
    fn default() -> Self {
        Self {
            login_destination: "/login".to_owned(),
            admin_home_destination: "/admin".to_owned(),
        }
    }
}

/// Middleware factory guarding a scope behind the access gate.
///
/// Without [`AccessGate::require`] the gate only demands authentication;
/// with it, the subject must also hold the given capability.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use actix_web::{App, web};
/// use backend::domain::ports::{FixtureAuthState, NoopPause};
/// use backend::domain::{AccessGateService, Capability};
/// use backend::middleware::access_gate::AccessGate;
///
/// let service = AccessGateService::new(Arc::new(FixtureAuthState), Arc::new(NoopPause));
/// let app = App::new().service(
///     web::scope("/admin")
///         .wrap(AccessGate::new(service).require(Capability::manage_courses())),
/// );
/// ```
#[derive(Clone)]
pub struct AccessGate {
    gate: AccessGateService,
    required: Option<Capability>,
    policy: GatePolicy,
}

impl AccessGate {
    /// Gate a scope on authentication alone.
    pub fn new(gate: AccessGateService) -> Self {
        Self {
            gate,
            required: None,
            policy: GatePolicy::default(),
        }
    }

    /// Additionally demand `capability` from the resolved subject.
    #[must_use]
    pub fn require(mut self, capability: Capability) -> Self {
        self.required = Some(capability);
        self
    }

    /// Override the default redirect destinations.
    #[must_use]
    pub fn with_policy(mut self, policy: GatePolicy) -> Self {
        self.policy = policy;
        self
    }
}

impl<S, B> Transform<S, ServiceRequest> for AccessGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AccessGateMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AccessGateMiddleware {
            service: Rc::new(service),
            gate: self.gate.clone(),
            required: self.required.clone(),
            policy: self.policy.clone(),
        }))
    }
}

/// Per-request service created by [`AccessGate`]; not constructed directly.
pub struct AccessGateMiddleware<S> {
    service: Rc<S>,
    gate: AccessGateService,
    required: Option<Capability>,
    policy: GatePolicy,
}

/// Read the session subject, treating an unreadable session as anonymous.
fn subject_for(req: &ServiceRequest) -> Option<UserId> {
    let session = SessionContext::new(req.get_session());
    match session.user_id() {
        Ok(subject) => subject,
        Err(error) => {
            warn!(%error, "session read failed; treating the subject as unauthenticated");
            None
        }
    }
}

fn login_redirect(policy: &GatePolicy) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, policy.login_destination.as_str()))
        .finish()
}

fn forbidden_response(policy: &GatePolicy) -> HttpResponse {
    crate::domain::Error::forbidden("missing required capability")
        .with_details(json!({
            "heading": "Access restricted",
            "body": "Your account does not hold the capability this area requires.",
            "redirectTo": policy.admin_home_destination,
        }))
        .error_response()
}

impl<S, B> Service<ServiceRequest> for AccessGateMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let gate = self.gate.clone();
        let required = self.required.clone();
        let policy = self.policy.clone();
        Box::pin(async move {
            let subject = subject_for(&req);
            let decision = gate.resolve(subject.as_ref(), required.as_ref()).await?;
            match decision.state {
                GateState::Unauthenticated => {
                    Ok(req.into_response(login_redirect(&policy)).map_into_right_body())
                }
                GateState::AuthenticatedNoPermission => Ok(req
                    .into_response(forbidden_response(&policy))
                    .map_into_right_body()),
                GateState::Unresolved => {
                    // resolve() re-evaluates with the retry budget spent,
                    // which cannot produce an unresolved state.
                    Ok(req
                        .into_response(HttpResponse::ServiceUnavailable().finish())
                        .map_into_right_body())
                }
                GateState::AuthenticatedAuthorized => {
                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use actix_session::Session;
    use actix_web::http::StatusCode;
    use actix_web::{App, test, web};
    use async_trait::async_trait;
    use rstest::rstest;
    use serde_json::Value;

    use super::*;
    use crate::domain::ports::{
        AuthStateQuery, FIXTURE_STAFF_ID, FixtureAuthState, NoopPause, RestorationPause,
    };
    use crate::domain::{AuthSnapshot, DisplayName, PermissionSet, User};
    use crate::inbound::http::session::USER_ID_KEY;
    use crate::inbound::http::test_utils::test_session_middleware;

    /// Directory that resolves any subject without granting capabilities.
    struct NoCapabilities;

    #[async_trait]
    impl AuthStateQuery for NoCapabilities {
        async fn snapshot(
            &self,
            subject: Option<&UserId>,
        ) -> Result<AuthSnapshot, crate::domain::Error> {
            let Some(subject) = subject else {
                return Ok(AuthSnapshot::anonymous());
            };
            let name = DisplayName::new("Yacine Merbah").expect("fixture name");
            Ok(AuthSnapshot::resolved(
                User::new(subject.clone(), name),
                PermissionSet::empty(),
            ))
        }
    }

    /// Directory still restoring; every snapshot reports warming.
    struct WarmingAuthState;

    #[async_trait]
    impl AuthStateQuery for WarmingAuthState {
        async fn snapshot(
            &self,
            _subject: Option<&UserId>,
        ) -> Result<AuthSnapshot, crate::domain::Error> {
            Ok(AuthSnapshot::warming())
        }
    }

    /// Directory replaying a scripted snapshot sequence.
    struct ScriptedAuthState {
        snapshots: Mutex<VecDeque<AuthSnapshot>>,
    }

    impl ScriptedAuthState {
        fn new(snapshots: impl IntoIterator<Item = AuthSnapshot>) -> Self {
            Self {
                snapshots: Mutex::new(snapshots.into_iter().collect()),
            }
        }
    }

    #[async_trait]
    impl AuthStateQuery for ScriptedAuthState {
        async fn snapshot(
            &self,
            _subject: Option<&UserId>,
        ) -> Result<AuthSnapshot, crate::domain::Error> {
            self.snapshots
                .lock()
                .expect("scripted snapshots")
                .pop_front()
                .ok_or_else(|| crate::domain::Error::internal("scripted snapshots exhausted"))
        }
    }

    #[derive(Default)]
    struct CountingPause {
        pauses: AtomicUsize,
    }

    #[async_trait]
    impl RestorationPause for CountingPause {
        async fn pause(&self) {
            self.pauses.fetch_add(1, Ordering::SeqCst);
        }
    }

    /// Pause that never completes, recording whether it started and whether
    /// it was allowed to finish.
    struct HangingPause {
        started: Arc<AtomicBool>,
        finished: Arc<AtomicBool>,
    }

    #[async_trait]
    impl RestorationPause for HangingPause {
        async fn pause(&self) {
            self.started.store(true, Ordering::SeqCst);
            futures_util::future::pending::<()>().await;
            self.finished.store(true, Ordering::SeqCst);
        }
    }

    fn staff_snapshot(permissions: PermissionSet) -> AuthSnapshot {
        let id = UserId::new(FIXTURE_STAFF_ID).expect("fixture id");
        let name = DisplayName::new("Amina Boudjema").expect("fixture name");
        AuthSnapshot::resolved(User::new(id, name), permissions)
    }

    fn gate_over(
        auth: Arc<dyn AuthStateQuery>,
        pause: Arc<dyn RestorationPause>,
    ) -> AccessGate {
        AccessGate::new(AccessGateService::new(auth, pause))
            .require(Capability::manage_courses())
    }

    fn gated_app(
        gate: AccessGate,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .wrap(test_session_middleware())
            .route(
                "/seed",
                web::get().to(|session: SessionContext| async move {
                    let id = UserId::new(FIXTURE_STAFF_ID).expect("fixture id");
                    session.persist_user(&id).expect("persist session user");
                    HttpResponse::Ok().finish()
                }),
            )
            .route(
                "/seed-corrupt",
                web::get().to(|session: Session| async move {
                    // A non-string value makes the typed session read fail.
                    session.insert(USER_ID_KEY, 7).expect("seed corrupt value");
                    HttpResponse::Ok().finish()
                }),
            )
            .service(web::scope("/admin").wrap(gate).route(
                "/courses",
                web::get().to(|| async { HttpResponse::Ok().body("protected") }),
            ))
    }

    async fn session_cookie<S>(app: &S, uri: &str) -> actix_web::cookie::Cookie<'static>
    where
        S: actix_web::dev::Service<
                actix_http::Request,
                Response = actix_web::dev::ServiceResponse,
                Error = actix_web::Error,
            >,
    {
        let response = test::call_service(app, test::TestRequest::get().uri(uri).to_request()).await;
        assert!(response.status().is_success(), "seed route failed");
        response
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie set")
            .into_owned()
    }

    #[rstest]
    fn default_policy_points_at_login_and_admin_home() {
        let policy = GatePolicy::default();
        assert_eq!(policy.login_destination, "/login");
        assert_eq!(policy.admin_home_destination, "/admin");
    }

    #[actix_web::test]
    async fn anonymous_subjects_are_redirected_to_login() {
        let gate = gate_over(Arc::new(FixtureAuthState), Arc::new(NoopPause));
        let app = test::init_service(gated_app(gate)).await;

        let response = test::call_service(
            &app,
            test::TestRequest::get().uri("/admin/courses").to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let location = response
            .headers()
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok());
        assert_eq!(location, Some("/login"));
        let body = test::read_body(response).await;
        assert!(body.is_empty(), "redirects carry no body");
    }

    #[actix_web::test]
    async fn login_redirect_honours_the_policy() {
        let gate = gate_over(Arc::new(FixtureAuthState), Arc::new(NoopPause)).with_policy(
            GatePolicy {
                login_destination: "/connexion".to_owned(),
                admin_home_destination: "/tableau".to_owned(),
            },
        );
        let app = test::init_service(gated_app(gate)).await;

        let response = test::call_service(
            &app,
            test::TestRequest::get().uri("/admin/courses").to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let location = response
            .headers()
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok());
        assert_eq!(location, Some("/connexion"));
    }

    #[actix_web::test]
    async fn authorised_subjects_reach_the_protected_handler() {
        let gate = gate_over(Arc::new(FixtureAuthState), Arc::new(NoopPause));
        let app = test::init_service(gated_app(gate)).await;
        let cookie = session_cookie(&app, "/seed").await;

        let response = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/admin/courses")
                .cookie(cookie)
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(test::read_body(response).await, "protected");
    }

    #[actix_web::test]
    async fn subjects_without_the_capability_get_the_forbidden_view() {
        let gate = gate_over(Arc::new(NoCapabilities), Arc::new(NoopPause));
        let app = test::init_service(gated_app(gate)).await;
        let cookie = session_cookie(&app, "/seed").await;

        let response = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/admin/courses")
                .cookie(cookie)
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let body: Value =
            serde_json::from_slice(&test::read_body(response).await).expect("forbidden JSON");
        assert_eq!(body.get("code").and_then(Value::as_str), Some("forbidden"));
        assert!(
            body.get("message")
                .and_then(Value::as_str)
                .is_some_and(|message| !message.is_empty())
        );
        let details = body.get("details").expect("forbidden details");
        assert!(details.get("heading").and_then(Value::as_str).is_some());
        assert!(details.get("body").and_then(Value::as_str).is_some());
        assert_eq!(
            details.get("redirectTo").and_then(Value::as_str),
            Some("/admin")
        );
    }

    #[actix_web::test]
    async fn a_failed_session_read_fails_closed_to_login() {
        let gate = gate_over(Arc::new(FixtureAuthState), Arc::new(NoopPause));
        let app = test::init_service(gated_app(gate)).await;
        let cookie = session_cookie(&app, "/seed-corrupt").await;

        let response = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/admin/courses")
                .cookie(cookie)
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
    }

    #[actix_web::test]
    async fn restoration_window_allows_one_bounded_recheck() {
        let auth = Arc::new(ScriptedAuthState::new([
            AuthSnapshot::warming(),
            staff_snapshot(PermissionSet::from_iter([Capability::manage_courses()])),
        ]));
        let pause = Arc::new(CountingPause::default());
        let gate = gate_over(auth, Arc::clone(&pause) as Arc<dyn RestorationPause>);
        let app = test::init_service(gated_app(gate)).await;

        let response = test::call_service(
            &app,
            test::TestRequest::get().uri("/admin/courses").to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(pause.pauses.load(Ordering::SeqCst), 1);
    }

    #[actix_web::test]
    async fn an_exhausted_restoration_window_is_unauthorised() {
        let auth = Arc::new(ScriptedAuthState::new([
            AuthSnapshot::warming(),
            AuthSnapshot::warming(),
        ]));
        let pause = Arc::new(CountingPause::default());
        let gate = gate_over(auth, Arc::clone(&pause) as Arc<dyn RestorationPause>);
        let app = test::init_service(gated_app(gate)).await;

        let response = test::call_service(
            &app,
            test::TestRequest::get().uri("/admin/courses").to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(pause.pauses.load(Ordering::SeqCst), 1);
    }

    #[actix_web::test]
    async fn a_dropped_request_cancels_the_pending_pause() {
        let started = Arc::new(AtomicBool::new(false));
        let finished = Arc::new(AtomicBool::new(false));
        let pause = Arc::new(HangingPause {
            started: Arc::clone(&started),
            finished: Arc::clone(&finished),
        });
        let gate = gate_over(Arc::new(WarmingAuthState), pause);
        let app = test::init_service(gated_app(gate)).await;

        let request = test::TestRequest::get().uri("/admin/courses").to_request();
        let mut in_flight = Box::pin(test::call_service(&app, request));
        assert!(futures::poll!(in_flight.as_mut()).is_pending());
        assert!(started.load(Ordering::SeqCst), "pause should have begun");

        drop(in_flight);
        assert!(
            !finished.load(Ordering::SeqCst),
            "dropping the request should cancel the pause"
        );
    }
}
