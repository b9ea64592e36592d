//! Server construction and middleware wiring.

mod config;
#[cfg(feature = "metrics")]
mod metrics;

pub use config::{AppSettings, ServerConfig};

#[cfg(feature = "metrics")]
use metrics::RequestMetrics;

use actix_session::{
    SessionMiddleware,
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

#[cfg(debug_assertions)]
use backend::doc::ApiDoc;
use backend::domain::{AccessGateService, Capability};
use backend::inbound::http::admin::{
    admin_create_course, admin_list_courses, admin_list_registrations,
};
use backend::inbound::http::courses::{get_course, list_courses, register_for_course};
use backend::inbound::http::health::{HealthState, live, ready};
use backend::inbound::http::state::HttpState;
use backend::inbound::http::users::{login, logout, me};
use backend::middleware::{AccessGate, Trace};
use backend::outbound::memory::{MemoryCatalogue, MemoryDirectory, MemoryRegistrations};
use backend::outbound::pause::TokioPause;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use std::sync::Arc;

/// Cookie-session parameters shared by every worker.
#[derive(Clone)]
struct SessionCookies {
    key: Key,
    secure: bool,
    same_site: SameSite,
}

impl SessionCookies {
    /// Builds the per-worker session middleware over a private cookie store.
    fn middleware(self) -> SessionMiddleware<CookieSessionStore> {
        SessionMiddleware::builder(CookieSessionStore::default(), self.key)
            .cookie_name("session".into())
            .cookie_path("/".into())
            .cookie_secure(self.secure)
            .cookie_http_only(true)
            .cookie_content_security(CookieContentSecurity::Private)
            .cookie_same_site(self.same_site)
            .session_lifecycle(
                PersistentSession::default()
                    .session_ttl(actix_web::cookie::time::Duration::hours(2)),
            )
            .build()
    }
}

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    cookies: SessionCookies,
    courses_gate: AccessGate,
    registrations_gate: AccessGate,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        cookies,
        courses_gate,
        registrations_gate,
    } = deps;

    // Each admin area carries its own gate so the required capability can
    // differ between them.
    let admin = web::scope("/admin")
        .service(
            web::scope("/courses")
                .wrap(courses_gate)
                .service(admin_list_courses)
                .service(admin_create_course),
        )
        .service(
            web::scope("/registrations")
                .wrap(registrations_gate)
                .service(admin_list_registrations),
        );

    let api = web::scope("/api/v1")
        .wrap(cookies.middleware())
        .service(login)
        .service(logout)
        .service(me)
        .service(list_courses)
        .service(get_course)
        .service(register_for_course)
        .service(admin);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(api)
        .service(web::scope("/health").service(ready).service(live));

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Wire the in-memory adapters and gates demanded by `config`.
///
/// Returns the shared HTTP state alongside the staff directory, which the
/// caller marks restored once the listener is up, and the two admin gates.
fn build_ports(
    config: &ServerConfig,
) -> std::io::Result<(
    web::Data<HttpState>,
    Arc<MemoryDirectory>,
    AccessGate,
    AccessGate,
)> {
    let directory = Arc::new(
        MemoryDirectory::seeded()
            .map_err(|e| std::io::Error::other(format!("staff directory seeding failed: {e}")))?,
    );
    let catalogue = match &config.courses_path {
        Some(path) => MemoryCatalogue::from_registry_file(path),
        None => MemoryCatalogue::seeded(),
    }
    .map_err(|e| std::io::Error::other(format!("course catalogue failed to load: {e}")))?;
    let catalogue = Arc::new(catalogue);
    let registrations = Arc::new(MemoryRegistrations::new(Arc::clone(&catalogue)));

    let http_state = web::Data::new(HttpState {
        login: directory.clone(),
        auth_state: directory.clone(),
        catalogue: catalogue.clone(),
        catalogue_admin: catalogue,
        registrations: registrations.clone(),
        registrations_query: registrations,
    });

    let gate = AccessGateService::new(
        directory.clone(),
        Arc::new(TokioPause::new(config.gate_pause)),
    );
    let courses_gate = AccessGate::new(gate.clone())
        .require(Capability::manage_courses())
        .with_policy(config.gate_policy.clone());
    let registrations_gate = AccessGate::new(gate)
        .require(Capability::view_registrations())
        .with_policy(config.gate_policy.clone());

    Ok((http_state, directory, courses_gate, registrations_gate))
}

/// Construct the Actix HTTP server described by `config`.
///
/// # Parameters
/// - `health_state`: readiness flag flipped once the listener is bound.
/// - `config`: session, bind, gate, and optional metrics settings.
///
/// # Returns
/// A running [`Server`] future; await it to serve requests.
///
/// # Errors
/// Returns [`std::io::Error`] when adapter seeding or socket binding fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let (http_state, directory, courses_gate, registrations_gate) = build_ports(&config)?;
    let ServerConfig {
        key,
        cookie_secure,
        same_site,
        bind_addr,
        courses_path: _,
        gate_pause: _,
        gate_policy: _,
        #[cfg(feature = "metrics")]
        prometheus,
    } = config;
    let cookies = SessionCookies {
        key,
        secure: cookie_secure,
        same_site,
    };

    #[cfg(feature = "metrics")]
    let request_metrics = RequestMetrics::optional(prometheus);

    let server = HttpServer::new(move || {
        let app = build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            cookies: cookies.clone(),
            courses_gate: courses_gate.clone(),
            registrations_gate: registrations_gate.clone(),
        });

        #[cfg(feature = "metrics")]
        let app = app.wrap(request_metrics.clone());

        app
    })
    .bind(bind_addr)?
    .run();

    // The listener is up, so the restoration window closes together with the
    // readiness flip.
    directory.mark_restored();
    health_state.mark_ready();
    Ok(server)
}
