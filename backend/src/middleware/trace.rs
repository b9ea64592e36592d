//! Request tracing middleware.
//!
//! Wrapping an app in [`Trace`] gives every request a fresh [`TraceId`],
//! keeps it in task-local scope for the duration of the handler, and echoes
//! it back to the client in the `trace-id` response header. Log lines and
//! error payloads produced inside the request therefore share one
//! correlation key with the response the client saw.

use std::task::{Context, Poll};

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderName, HeaderValue};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::error;

use crate::domain::{TRACE_ID_HEADER, TraceId};

/// Middleware that scopes a [`TraceId`] around each request.
///
/// Handlers read the active identifier with [`TraceId::current`].
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use backend::middleware::trace::Trace;
///
/// let app = App::new()
///     .wrap(Trace)
///     .route("/ping", web::get().to(|| async { "pong" }));
/// ```
#[derive(Clone)]
pub struct Trace;

impl<S, B> Transform<S, ServiceRequest> for Trace
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TraceMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TraceMiddleware { service }))
    }
}

/// Per-request service created by [`Trace`]; not constructed directly.
pub struct TraceMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for TraceMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let trace_id = TraceId::generate();
        // A hyphenated UUID is plain ASCII, so encoding only fails if the
        // identifier representation ever changes.
        let header = HeaderValue::from_str(&trace_id.to_string()).ok();
        let inner = self.service.call(req);
        Box::pin(TraceId::scope(trace_id, async move {
            let mut res = inner.await?;
            if let Some(value) = header {
                res.response_mut()
                    .headers_mut()
                    .insert(HeaderName::from_static(TRACE_ID_HEADER), value);
            } else {
                error!(trace_id = %trace_id, "trace identifier is not a valid header value");
            }
            Ok(res)
        }))
    }
}
