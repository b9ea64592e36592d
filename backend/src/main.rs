//! Backend entry-point: wires the REST API, access gates, and OpenAPI docs.

mod server;

use std::net::SocketAddr;

use actix_web::web;
#[cfg(feature = "metrics")]
use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::inbound::http::health::HealthState;
use backend::inbound::http::session_config::fingerprint::key_fingerprint;
use backend::inbound::http::session_config::{BuildMode, session_settings_from_env};

use server::{AppSettings, ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load()
        .map_err(|e| std::io::Error::other(format!("configuration failed: {e}")))?;
    let bind_addr: SocketAddr = settings.bind_addr().parse().map_err(|e| {
        std::io::Error::other(format!(
            "invalid bind address '{}': {e}",
            settings.bind_addr()
        ))
    })?;

    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(|e| std::io::Error::other(format!("session configuration failed: {e}")))?;
    info!(key = %key_fingerprint(&session.key), "session signing key loaded");

    let mut config = ServerConfig::new(session, bind_addr)
        .with_gate_pause(settings.gate_pause())
        .with_gate_policy(settings.gate_policy());
    if let Some(path) = settings.courses_path() {
        config = config.with_courses_path(path.to_path_buf());
    }
    #[cfg(feature = "metrics")]
    let config = config.with_metrics(Some(make_metrics()?));

    let health_state = web::Data::from(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(%bind_addr, "backend listening");
    server.await
}

#[cfg(feature = "metrics")]
fn make_metrics() -> std::io::Result<PrometheusMetrics> {
    PrometheusMetricsBuilder::new("takwin")
        .endpoint("/metrics")
        .build()
        .map_err(|e| std::io::Error::other(format!("configure Prometheus metrics: {e}")))
}
