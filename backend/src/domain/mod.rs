//! Domain types shared by the inbound and outbound adapters.
//!
//! Types validate on construction and stay immutable afterwards. Each type
//! documents its serde contract in its own Rustdoc, so the wire format is
//! described next to the code that owns it. Adapters re-export what they
//! need from the flat list below rather than reaching into submodules.

pub mod access;
pub mod auth;
pub mod capability;
pub mod catalogue;
pub mod error;
pub mod localization;
pub mod ports;
pub mod registration;
mod slug;
pub mod trace_id;
pub mod user;

pub use self::access::{
    AccessGateService, AuthSnapshot, GateDecision, GateRedirect, GateState, GateView, RetryBudget,
    evaluate_gate,
};
pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::capability::{Capability, CapabilityValidationError, PermissionSet};
pub use self::catalogue::{CatalogueValidationError, Category, CategoryDraft, Course, CourseDraft};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::localization::{
    LocaleCode, LocalizationMap, LocalizationValidationError, LocalizedCopy,
};
pub use self::registration::{Registration, RegistrationRequest};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{DisplayName, User, UserId, UserValidationError};

/// Result alias pairing handler output with the API error payload.
///
/// # Examples
/// ```
/// use backend::domain::{ApiResult, Error};
///
/// fn lookup(slug: &str) -> ApiResult<String> {
///     Err(Error::not_found(format!("no course with slug '{slug}'")))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
