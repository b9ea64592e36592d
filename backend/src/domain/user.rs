//! Staff identity types.
//!
//! A staff member is a UUID identity paired with a validated display name.
//! Names on this platform are written in Arabic, French, or both, so the
//! display-name rules admit any Unicode letter and the combining marks that
//! Arabic script uses, not just ASCII.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Validation errors returned by the user constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    /// The identifier was empty.
    EmptyId,
    /// The identifier was not a canonical UUID.
    InvalidId,
    /// The display name was blank.
    EmptyDisplayName,
    /// The display name fell short of [`DISPLAY_NAME_MIN`] characters.
    DisplayNameTooShort { min: usize },
    /// The display name exceeded [`DISPLAY_NAME_MAX`] characters.
    DisplayNameTooLong { max: usize },
    /// The display name carried characters outside the permitted set.
    DisplayNameInvalidCharacters,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Self::EmptyId => "user id must not be empty",
            Self::InvalidId => "user id must be a valid UUID",
            Self::EmptyDisplayName => "display name must not be empty",
            Self::DisplayNameTooShort { min } => {
                return write!(f, "display name must be at least {min} characters");
            }
            Self::DisplayNameTooLong { max } => {
                return write!(f, "display name must be at most {max} characters");
            }
            Self::DisplayNameInvalidCharacters => {
                "display name may only contain letters, numbers, spaces, underscores, or hyphens"
            }
        };
        f.write_str(reason)
    }
}

impl std::error::Error for UserValidationError {}

/// Stable staff identifier.
///
/// The UUID is kept alongside its canonical string form so session lookups
/// and serialisation never re-render it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId {
    uuid: Uuid,
    text: String,
}

impl UserId {
    /// Parses and validates `id`.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        id.as_ref().parse()
    }

    /// Mints a fresh random identifier.
    pub fn random() -> Self {
        Self::from_uuid(Uuid::new_v4())
    }

    /// Wraps an already parsed UUID without re-validation.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self {
            text: uuid.to_string(),
            uuid,
        }
    }

    /// Parsed UUID form, useful as a storage key.
    pub fn as_uuid(&self) -> &Uuid {
        &self.uuid
    }
}

impl std::str::FromStr for UserId {
    type Err = UserValidationError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        if raw.is_empty() {
            Err(UserValidationError::EmptyId)
        } else if raw.trim() != raw {
            Err(UserValidationError::InvalidId)
        } else {
            Uuid::parse_str(raw)
                .map(|uuid| Self {
                    uuid,
                    text: raw.to_owned(),
                })
                .map_err(|_| UserValidationError::InvalidId)
        }
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.text.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.text
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Shortest display name the platform accepts.
pub const DISPLAY_NAME_MIN: usize = 3;
/// Longest display name the platform accepts.
pub const DISPLAY_NAME_MAX: usize = 64;

// Length is enforced separately; the regex constrains allowed characters.
// \p{M} admits combining marks such as Arabic harakat.
static DISPLAY_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\p{L}\p{M}\p{N} _-]+$")
        .unwrap_or_else(|error| panic!("display name regex failed to compile: {error}"))
});

/// Staff member's name as shown to colleagues and course applicants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DisplayName(String);

impl DisplayName {
    /// Validates length and character constraints on `display_name`.
    pub fn new(display_name: impl Into<String>) -> Result<Self, UserValidationError> {
        Self::validated(display_name.into())
    }

    fn validated(name: String) -> Result<Self, UserValidationError> {
        let length = name.chars().count();
        if name.trim().is_empty() {
            Err(UserValidationError::EmptyDisplayName)
        } else if length < DISPLAY_NAME_MIN {
            Err(UserValidationError::DisplayNameTooShort {
                min: DISPLAY_NAME_MIN,
            })
        } else if length > DISPLAY_NAME_MAX {
            Err(UserValidationError::DisplayNameTooLong {
                max: DISPLAY_NAME_MAX,
            })
        } else if !DISPLAY_NAME_RE.is_match(&name) {
            Err(UserValidationError::DisplayNameInvalidCharacters)
        } else {
            Ok(Self(name))
        }
    }
}

impl AsRef<str> for DisplayName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<DisplayName> for String {
    fn from(value: DisplayName) -> Self {
        value.0
    }
}

impl TryFrom<String> for DisplayName {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::validated(value)
    }
}

/// Staff member profile served by `GET /api/v1/me`.
///
/// Both fields go through their newtype validation whether the profile is
/// built in code or deserialised from a payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
#[serde(try_from = "UserDto", into = "UserDto")]
pub struct User {
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    id: UserId,
    #[schema(value_type = String, example = "Amina Boudjemaa")]
    #[serde(alias = "display_name")]
    display_name: DisplayName,
}

impl User {
    /// Assembles a profile from already validated parts.
    pub fn new(id: UserId, display_name: DisplayName) -> Self {
        Self { id, display_name }
    }

    /// Panicking convenience for seed and fixture data.
    pub fn from_strings(id: impl AsRef<str>, display_name: impl Into<String>) -> Self {
        Self::try_from_strings(id, display_name)
            .unwrap_or_else(|err| panic!("user string values must satisfy validation: {err}"))
    }

    /// Validates both components and assembles the profile.
    pub fn try_from_strings(
        id: impl AsRef<str>,
        display_name: impl Into<String>,
    ) -> Result<Self, UserValidationError> {
        Ok(Self {
            id: UserId::new(id)?,
            display_name: DisplayName::new(display_name)?,
        })
    }

    /// Identifier referenced by sessions and registrations.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Name rendered in admin listings and the profile endpoint.
    pub fn display_name(&self) -> &DisplayName {
        &self.display_name
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
struct UserDto {
    id: String,
    #[serde(alias = "display_name")]
    display_name: String,
}

impl From<User> for UserDto {
    fn from(value: User) -> Self {
        Self {
            id: value.id.to_string(),
            display_name: value.display_name.into(),
        }
    }
}

impl TryFrom<UserDto> for User {
    type Error = UserValidationError;

    fn try_from(value: UserDto) -> Result<Self, Self::Error> {
        User::try_from_strings(value.id, value.display_name)
    }
}
