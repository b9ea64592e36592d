//! Capability grants controlling access to administrative areas.
//!
//! A capability is an opaque permission token attached to a user by the
//! directory. The domain never interprets the token beyond equality; the
//! well-known constructors exist so call sites and seeds agree on spelling.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Validation errors returned by [`Capability::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CapabilityValidationError {
    /// The capability token was empty.
    Empty,
    /// The token strayed outside lowercase letters, digits, and underscores.
    InvalidCharacters { value: String },
}

impl fmt::Display for CapabilityValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "capability must not be empty"),
            Self::InvalidCharacters { value } => write!(
                f,
                "capability '{value}' must start with a lowercase letter and contain only \
                 lowercase letters, digits, or underscores"
            ),
        }
    }
}

impl std::error::Error for CapabilityValidationError {}

/// Opaque permission token granted to a user.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Capability(String);

impl Capability {
    /// Validate and construct a [`Capability`] from raw input.
    pub fn new(value: impl Into<String>) -> Result<Self, CapabilityValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(CapabilityValidationError::Empty);
        }
        if !has_capability_shape(&value) {
            return Err(CapabilityValidationError::InvalidCharacters { value });
        }
        Ok(Self(value))
    }

    /// Grants management of the course catalogue.
    #[must_use]
    pub fn manage_courses() -> Self {
        Self("manage_courses".to_owned())
    }

    /// Grants read access to course registration records.
    #[must_use]
    pub fn view_registrations() -> Self {
        Self("view_registrations".to_owned())
    }
}

fn has_capability_shape(value: &str) -> bool {
    let mut chars = value.chars();
    let leading_ok = chars.next().is_some_and(|ch| ch.is_ascii_lowercase());
    leading_ok
        && chars.all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '_')
}

impl AsRef<str> for Capability {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Capability> for String {
    fn from(value: Capability) -> Self {
        value.0
    }
}

impl TryFrom<String> for Capability {
    type Error = CapabilityValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Immutable set of capabilities granted to a user.
///
/// Backed by an ordered set so serialised permission lists are stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionSet(BTreeSet<Capability>);

impl PermissionSet {
    /// The empty grant.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether the set holds `capability`.
    pub fn contains(&self, capability: &Capability) -> bool {
        self.0.contains(capability)
    }

    /// Whether no capabilities are granted.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate the granted capabilities in stable order.
    pub fn iter(&self) -> impl Iterator<Item = &Capability> {
        self.0.iter()
    }
}

impl FromIterator<Capability> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = Capability>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
