//! Account and session data exchanged with the registration and session services.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque proof that a user is currently authenticated.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(..)")
    }
}

/// Snapshot of the registration form sent to the registration service.
///
/// The password confirmation is validation-only and never part of the request.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationRequest {
    pub name: String,
    pub username: String,
    pub password: String,
}

impl fmt::Debug for RegistrationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationRequest")
            .field("name", &self.name)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Answer of the registration service.
///
/// `authenticated == false` means the username is already taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationResult {
    #[serde(rename = "auth")]
    pub authenticated: bool,
}

impl RegistrationResult {
    #[must_use]
    pub const fn created() -> Self {
        Self { authenticated: true }
    }

    #[must_use]
    pub const fn username_taken() -> Self {
        Self { authenticated: false }
    }
}
