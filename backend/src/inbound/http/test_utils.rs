//! Shared fixtures for HTTP handler tests.

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Key, SameSite};

/// Session middleware for handler tests.
///
/// Uses a throwaway signing key and issues the `session` cookie without the
/// `Secure` flag so plain-HTTP test clients can send it back.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .cookie_same_site(SameSite::Lax)
        .build()
}
