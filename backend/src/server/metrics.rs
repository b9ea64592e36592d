//! Optional Prometheus request-metrics middleware.
//!
//! The exporter is wired in only when the server was configured with one.
//! Both branches erase to the same boxed service type so `build_app` keeps a
//! single return type either way.

use std::sync::Arc;

use actix_service::{
    Service, ServiceExt as _, Transform,
    boxed::{self, BoxService},
};
use actix_web::body::BoxBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::middleware::Compat;
use actix_web_prom::PrometheusMetrics;
use futures_util::future::LocalBoxFuture;

/// Request-metrics middleware that may be absent.
#[derive(Clone)]
pub(crate) enum RequestMetrics {
    Enabled(Arc<PrometheusMetrics>),
    Disabled,
}

impl RequestMetrics {
    #[must_use]
    pub(crate) fn optional(exporter: Option<PrometheusMetrics>) -> Self {
        exporter.map_or(Self::Disabled, |metrics| Self::Enabled(Arc::new(metrics)))
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequestMetrics
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = BoxService<ServiceRequest, ServiceResponse<BoxBody>, actix_web::Error>;
    type Future = LocalBoxFuture<'static, Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        match self {
            Self::Enabled(exporter) => {
                let fut = Compat::new(exporter.as_ref().clone()).new_transform(service);
                Box::pin(async move { Ok(boxed::service(fut.await?)) })
            }
            Self::Disabled => {
                let passthrough = service.map(ServiceResponse::map_into_boxed_body);
                Box::pin(std::future::ready(Ok(boxed::service(passthrough))))
            }
        }
    }
}
