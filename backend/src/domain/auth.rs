//! Login credential validation.
//!
//! The staff directory stores usernames in lowercase, so credentials
//! normalise their username on construction and lookups never depend on the
//! caller's casing. Passwords pass through byte-for-byte and are zeroised
//! on drop.

use std::fmt;

use zeroize::Zeroizing;

/// Rejection reasons for malformed login payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginValidationError {
    /// The username was blank after trimming.
    EmptyUsername,
    /// The password was empty.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Self::EmptyUsername => "username must not be empty",
            Self::EmptyPassword => "password must not be empty",
        };
        f.write_str(reason)
    }
}

impl std::error::Error for LoginValidationError {}

/// Credentials accepted by the login port.
///
/// ## Invariants
/// - `username` is trimmed and lowercased; it is never empty.
/// - `password` is non-empty and otherwise untouched, so passwords with
///   deliberate leading or trailing whitespace keep working.
///
/// # Examples
/// ```
/// use backend::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" Amina ", "password").unwrap();
/// assert_eq!(creds.username(), "amina");
/// assert_eq!(creds.password(), "password");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Validates and normalises raw username and password inputs.
    ///
    /// # Errors
    /// Returns a [`LoginValidationError`] naming the offending field.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let trimmed = username.trim();
        if trimmed.is_empty() {
            Err(LoginValidationError::EmptyUsername)
        } else if password.is_empty() {
            Err(LoginValidationError::EmptyPassword)
        } else {
            Ok(Self {
                username: trimmed.to_lowercase(),
                password: Zeroizing::new(password.to_owned()),
            })
        }
    }

    /// Directory lookup key, trimmed and lowercased.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Password exactly as the caller supplied it.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}
