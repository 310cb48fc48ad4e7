use serde::{Deserialize, Serialize};
use std::fmt;

/// Navigation targets the registration flow can send the user to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Route {
    Dashboard,
    Login,
}

impl Route {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Login => "login",
        }
    }

    /// Absolute path form used by routers, e.g. `/dashboard`.
    #[must_use]
    pub fn path(self) -> String {
        format!("/{}", self.as_str())
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
