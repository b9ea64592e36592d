//! Liveness and readiness probes.
//!
//! ```text
//! GET /health/ready
//! GET /health/live
//! ```
//!
//! Readiness flips on once the adapters are seeded; liveness stays up until
//! the server flags a fatal condition.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, get, web};
use serde::Serialize;
use utoipa::ToSchema;

use crate::inbound::http::cache_control::no_store_header;

/// Shared probe flags flipped by the server lifecycle.
#[derive(Debug, Default)]
pub struct HealthState {
    ready: AtomicBool,
    unhealthy: AtomicBool,
}

impl HealthState {
    /// Create the shared probe state, initially not ready and live.
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Mark startup complete; the readiness probe begins passing.
    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Flag a fatal condition; the liveness probe starts failing.
    pub fn mark_unhealthy(&self) {
        self.unhealthy.store(true, Ordering::Release);
    }

    /// Whether the server finished seeding its adapters.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// Whether the process should keep receiving traffic.
    #[must_use]
    pub fn is_live(&self) -> bool {
        !self.unhealthy.load(Ordering::Acquire)
    }
}

/// Probe response payload.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProbeBody {
    #[schema(example = "ok")]
    pub status: &'static str,
    #[schema(example = "0.1.0")]
    pub version: &'static str,
}

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn probe_response(passing: bool, failing_status: &'static str) -> HttpResponse {
    let (mut builder, status) = if passing {
        (HttpResponse::Ok(), "ok")
    } else {
        (HttpResponse::ServiceUnavailable(), failing_status)
    };
    builder.insert_header(no_store_header()).json(ProbeBody {
        status,
        version: VERSION,
    })
}

/// Readiness probe.
#[utoipa::path(
    get,
    path = "/health/ready",
    responses(
        (status = 200, description = "Ready to serve traffic", body = ProbeBody),
        (status = 503, description = "Still starting", body = ProbeBody)
    ),
    tags = ["health"],
    operation_id = "healthReady",
    security([])
)]
#[get("/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    probe_response(state.is_ready(), "starting")
}

/// Liveness probe.
#[utoipa::path(
    get,
    path = "/health/live",
    responses(
        (status = 200, description = "Process healthy", body = ProbeBody),
        (status = 503, description = "Process flagged unhealthy", body = ProbeBody)
    ),
    tags = ["health"],
    operation_id = "healthLive",
    security([])
)]
#[get("/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    probe_response(state.is_live(), "failed")
}
