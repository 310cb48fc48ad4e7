use crate::controller::{FormController, FormView};
use crate::error::RegisterError;
use crate::field::FieldId;
use crate::guard::{Decision, SessionGuard};
use crate::ports::{Navigator, RegistrationService, SessionProvider};
use crate::submission::{Outcome, SubmissionCoordinator};
use closetr_domain::config::RegisterConfig;
use closetr_domain::route::Route;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Tears a form down from outside, e.g. from the renderer's task while a
/// submission is suspended.
#[derive(Debug, Clone)]
pub struct TeardownHandle(CancellationToken);

impl TeardownHandle {
    pub fn teardown(&self) {
        self.0.cancel();
    }

    #[must_use]
    pub fn is_torn_down(&self) -> bool {
        self.0.is_cancelled()
    }
}

/// One activation of the registration view.
///
/// Owns its [`FormController`] and the injected collaborators. After teardown,
/// or after any redirect, pending answers are discarded and edits are ignored.
#[derive(Debug)]
pub struct RegisterForm<S, R, N> {
    sessions: S,
    registry: R,
    navigator: N,
    controller: FormController,
    guard: SessionGuard,
    coordinator: SubmissionCoordinator,
    lifetime: CancellationToken,
}

impl<S, R, N> RegisterForm<S, R, N>
where
    S: SessionProvider,
    R: RegistrationService,
    N: Navigator,
{
    pub fn new(sessions: S, registry: R, navigator: N, config: &RegisterConfig) -> Self {
        Self {
            sessions,
            registry,
            navigator,
            controller: FormController::new(),
            guard: SessionGuard::new(config.session_timeout()),
            coordinator: SubmissionCoordinator::new(config.request_timeout()),
            lifetime: CancellationToken::new(),
        }
    }

    /// Runs the session guard. A redirect deactivates the form.
    ///
    /// # Errors
    /// [`RegisterError::Cancelled`] when the form was torn down first.
    pub async fn activate(&mut self) -> Result<Decision, RegisterError> {
        let decision = self.guard.resolve(&self.sessions, &self.navigator, &self.lifetime).await?;
        if matches!(decision, Decision::Redirect(_)) {
            self.lifetime.cancel();
        }
        Ok(decision)
    }

    /// Applies a user edit. Ignored once the form is no longer active.
    pub fn input(&mut self, id: FieldId, value: impl Into<String>) {
        if !self.is_active() {
            debug!(field = %id, "Edit ignored; form is no longer active");
            return;
        }
        self.controller.input(id, value);
    }

    /// Submits the form. A successful registration deactivates the form.
    ///
    /// # Errors
    /// See [`SubmissionCoordinator::submit`].
    pub async fn submit(&mut self) -> Result<Outcome, RegisterError> {
        let outcome = self
            .coordinator
            .submit(&mut self.controller, &self.registry, &self.navigator, &self.lifetime)
            .await?;
        if outcome == Outcome::Redirected {
            self.lifetime.cancel();
        }
        Ok(outcome)
    }

    /// Goes to the login page. No validation involved.
    pub fn go_to_login(&self) {
        let route = Route::Login;
        info!(%route, "Leaving registration");
        self.navigator.navigate(route);
    }
}

impl<S, R, N> RegisterForm<S, R, N> {
    #[must_use]
    pub fn view(&self) -> FormView {
        self.controller.view()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<FormView> {
        self.controller.subscribe()
    }

    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.is_active() && self.controller.can_submit()
    }

    #[must_use]
    pub const fn error_visible(&self, id: FieldId) -> bool {
        self.controller.error_visible(id)
    }

    #[must_use]
    pub const fn controller(&self) -> &FormController {
        &self.controller
    }

    #[must_use]
    pub const fn decision(&self) -> Option<Decision> {
        self.guard.decision()
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.lifetime.is_cancelled()
    }

    #[must_use]
    pub fn teardown_handle(&self) -> TeardownHandle {
        TeardownHandle(self.lifetime.clone())
    }

    /// Ends this activation; in-flight answers will be discarded.
    pub fn deactivate(&self) {
        if !self.lifetime.is_cancelled() {
            debug!("Registration form deactivated");
            self.lifetime.cancel();
        }
    }
}

impl<S, R, N> Drop for RegisterForm<S, R, N> {
    fn drop(&mut self) {
        self.lifetime.cancel();
    }
}
