//! Shared cache-control policies for HTTP handlers.

/// Private responses must always be revalidated before reuse.
pub const PRIVATE_NO_CACHE_MUST_REVALIDATE: &str = "private, no-cache, must-revalidate";

/// Public catalogue responses may be reused briefly; course edits tolerate a
/// minute of staleness.
pub const PUBLIC_SHORT_CACHE: &str = "public, max-age=60";

/// Build the standard cache-control header tuple for private API responses.
pub const fn private_no_cache_header() -> (&'static str, &'static str) {
    ("Cache-Control", PRIVATE_NO_CACHE_MUST_REVALIDATE)
}

/// Probe responses must never be cached.
pub const NO_STORE: &str = "no-store";

/// Build the cache-control header tuple for public catalogue reads.
pub const fn public_short_cache_header() -> (&'static str, &'static str) {
    ("Cache-Control", PUBLIC_SHORT_CACHE)
}

/// Build the cache-control header tuple for health probes.
pub const fn no_store_header() -> (&'static str, &'static str) {
    ("Cache-Control", NO_STORE)
}
