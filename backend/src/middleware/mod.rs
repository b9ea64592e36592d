//! Middleware wrapping the request lifecycle: tracing and access control.

pub mod access_gate;
pub mod trace;

pub use access_gate::{AccessGate, GatePolicy};
pub use trace::Trace;
