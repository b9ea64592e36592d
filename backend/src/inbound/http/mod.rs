//! REST handlers, session plumbing, and shared request validation.

pub mod admin;
pub mod cache_control;
pub mod courses;
pub mod error;
pub mod health;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub(crate) mod validation;

pub use error::ApiResult;
