//! Inbound adapters translating external requests into domain calls.
//!
//! HTTP handlers live under [`http`]; framework details stay at this edge
//! so the domain never sees the web stack.

pub mod http;
