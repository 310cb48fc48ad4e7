//! Capabilities the registration slice consumes.
//!
//! Implementations are handed to [`crate::RegisterForm`] at construction.

use crate::error::RegisterError;
use closetr_domain::account::{RegistrationRequest, RegistrationResult, SessionToken};
use closetr_domain::route::Route;
use std::future::Future;

/// Answers "is somebody already signed in?". Queried once per activation.
pub trait SessionProvider: Send + Sync {
    /// Resolves the current session, `None` when nobody is signed in.
    fn current_session(
        &self,
    ) -> impl Future<Output = Result<Option<SessionToken>, RegisterError>> + Send;
}

/// Creates accounts.
pub trait RegistrationService: Send + Sync {
    /// `authenticated == false` in the result means the username is taken.
    ///
    /// Network-level problems should be reported as [`RegisterError::Transport`].
    fn register(
        &self,
        request: RegistrationRequest,
    ) -> impl Future<Output = Result<RegistrationResult, RegisterError>> + Send;
}

/// Fire-and-forget navigation.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}
