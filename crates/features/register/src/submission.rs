//! Submission coordinator: sends the registration request and applies the answer.

use crate::controller::{FormController, GENERIC_FAILURE};
use crate::error::RegisterError;
use crate::field::FieldId;
use crate::ports::{Navigator, RegistrationService};
use closetr_domain::route::Route;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument, warn};

/// How a submit attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Account created, navigation to the dashboard issued.
    Redirected,
    /// The service rejected the value of `field`; it now shows an error.
    Conflict { field: FieldId },
}

#[derive(Debug)]
pub struct SubmissionCoordinator {
    timeout: Duration,
}

impl SubmissionCoordinator {
    #[must_use]
    pub const fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Runs one submit attempt against `registry`.
    ///
    /// While the request is in flight the controller reports `submitting` and
    /// the submit trigger is disabled.
    ///
    /// # Errors
    /// * [`RegisterError::InvalidState`] when the form cannot be submitted; the
    ///   registry is never called.
    /// * [`RegisterError::Transport`] (or whatever the registry reported) when
    ///   the request failed or timed out; the form is re-enabled and shows
    ///   [`GENERIC_FAILURE`].
    /// * [`RegisterError::Cancelled`] when `lifetime` was cancelled first; the
    ///   answer, if any, is discarded without touching the form or navigating.
    #[instrument(skip_all, name = "submit_registration")]
    pub async fn submit<R, N>(
        &self,
        controller: &mut FormController,
        registry: &R,
        navigator: &N,
        lifetime: &CancellationToken,
    ) -> Result<Outcome, RegisterError>
    where
        R: RegistrationService,
        N: Navigator,
    {
        if lifetime.is_cancelled() {
            return Err(RegisterError::cancelled("registration"));
        }

        let request = controller.begin_submission()?;
        let username = request.username.clone();

        let response = tokio::select! {
            biased;
            () = lifetime.cancelled() => return Err(RegisterError::cancelled("registration")),
            response = tokio::time::timeout(self.timeout, registry.register(request)) => response,
        };
        if lifetime.is_cancelled() {
            return Err(RegisterError::cancelled("registration"));
        }

        let result = match response {
            Ok(Ok(result)) => result,
            Ok(Err(err)) => {
                warn!(%username, error = %err, "Registration request failed");
                controller.complete_failure(GENERIC_FAILURE);
                return Err(err);
            },
            Err(_) => {
                warn!(%username, timeout = ?self.timeout, "Registration request timed out");
                controller.complete_failure(GENERIC_FAILURE);
                return Err(RegisterError::Transport {
                    message: format!("No answer within {:?}", self.timeout).into(),
                    context: Some("Registration request".into()),
                });
            },
        };

        if result.authenticated {
            controller.complete_success();
            let route = Route::Dashboard;
            info!(%username, %route, "Account created; redirecting");
            navigator.navigate(route);
            Ok(Outcome::Redirected)
        } else {
            info!(%username, "Username already taken");
            controller.complete_conflict(FieldId::Username);
            Ok(Outcome::Conflict { field: FieldId::Username })
        }
    }
}
