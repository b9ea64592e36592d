//! Outbound adapters implementing domain ports for infrastructure.
//!
//! This module follows the hexagonal architecture pattern: adapters are thin
//! translators between domain ports and the infrastructure backing them, and
//! contain no business logic.
//!
//! - **memory**: seeded in-memory staff directory, course catalogue, and
//!   registration ledger
//! - **pause**: Tokio timer behind the restoration pause port

pub mod memory;
pub mod pause;
