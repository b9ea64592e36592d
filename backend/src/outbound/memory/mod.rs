//! In-memory adapters backing the domain ports.
//!
//! Takwin runs against seeded in-memory state rather than external storage.
//! Each adapter lives behind its domain port so the HTTP layer stays unaware
//! of the backing collections.

mod catalogue;
mod directory;
mod registrations;

pub use catalogue::{CatalogueRegistryError, MemoryCatalogue};
pub use directory::MemoryDirectory;
pub use registrations::MemoryRegistrations;
