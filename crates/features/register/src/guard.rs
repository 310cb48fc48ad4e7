//! Session guard: decides once per activation whether the form is shown at all.

use crate::error::RegisterError;
use crate::ports::{Navigator, SessionProvider};
use closetr_domain::route::Route;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument, warn};

/// Result of resolving the current session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    RenderForm,
    Redirect(Route),
}

/// Single-shot session check.
///
/// The first completed resolution is final: later calls return the cached
/// decision without querying the provider or navigating again.
#[derive(Debug)]
pub struct SessionGuard {
    timeout: Duration,
    decision: Option<Decision>,
}

impl SessionGuard {
    #[must_use]
    pub const fn new(timeout: Duration) -> Self {
        Self { timeout, decision: None }
    }

    #[must_use]
    pub const fn decision(&self) -> Option<Decision> {
        self.decision
    }

    /// Resolves the session and navigates to the dashboard when one exists.
    ///
    /// A failing or slow session provider is not fatal: the form is rendered.
    ///
    /// # Errors
    /// [`RegisterError::Cancelled`] when `lifetime` is cancelled before the
    /// session resolves. No navigation happens and nothing is cached.
    #[instrument(skip_all, name = "session_guard")]
    pub async fn resolve<S, N>(
        &mut self,
        sessions: &S,
        navigator: &N,
        lifetime: &CancellationToken,
    ) -> Result<Decision, RegisterError>
    where
        S: SessionProvider,
        N: Navigator,
    {
        if let Some(decision) = self.decision {
            return Ok(decision);
        }

        let resolved = tokio::select! {
            biased;
            () = lifetime.cancelled() => return Err(RegisterError::cancelled("session resolution")),
            resolved = tokio::time::timeout(self.timeout, sessions.current_session()) => resolved,
        };
        if lifetime.is_cancelled() {
            return Err(RegisterError::cancelled("session resolution"));
        }

        let session = match resolved {
            Ok(Ok(session)) => session,
            Ok(Err(err)) => {
                warn!(error = %err, "Session lookup failed; showing the registration form");
                None
            },
            Err(_) => {
                warn!(timeout = ?self.timeout, "Session lookup timed out; showing the registration form");
                None
            },
        };

        let decision = if session.is_some() {
            let route = Route::Dashboard;
            info!(%route, "User already signed in; redirecting");
            navigator.navigate(route);
            Decision::Redirect(route)
        } else {
            Decision::RenderForm
        };

        self.decision = Some(decision);
        Ok(decision)
    }
}
