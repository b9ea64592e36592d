//! Course registration backend, organised as a hexagonal architecture.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// OpenAPI document served by Swagger UI and dumped by tooling.
pub use doc::ApiDoc;
