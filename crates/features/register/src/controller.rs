//! Form controller: owns the [`FormState`], recomputes validation on every edit
//! and publishes the render-ready [`FormView`].

use crate::error::RegisterError;
use crate::field::{FieldId, FormState};
use crate::validator::{Validation, validate};
use closetr_domain::account::RegistrationRequest;
use std::borrow::Cow;
use tokio::sync::watch;
use tracing::{debug, trace};

/// Message shown after a transport failure. Presentation is left to the renderer.
pub const GENERIC_FAILURE: &str = "Registration is unavailable right now. Please try again.";

/// What a renderer needs for one input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    pub id: FieldId,
    pub value: String,
    pub touched: bool,
    pub error_visible: bool,
}

/// Snapshot of everything a renderer binds to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub fields: [FieldView; FieldId::COUNT],
    pub can_submit: bool,
    pub submitting: bool,
    /// Field rejected by the last submission, if still unresolved.
    pub conflict: Option<FieldId>,
    pub failure: Option<Cow<'static, str>>,
}

impl FormView {
    #[must_use]
    pub const fn field(&self, id: FieldId) -> &FieldView {
        &self.fields[id.index()]
    }

    #[must_use]
    pub const fn error_visible(&self, id: FieldId) -> bool {
        self.field(id).error_visible
    }
}

#[derive(Debug)]
pub struct FormController {
    state: FormState,
    validation: Validation,
    submitting: bool,
    failure: Option<Cow<'static, str>>,
    view: watch::Sender<FormView>,
}

impl Default for FormController {
    fn default() -> Self {
        Self::new()
    }
}

impl FormController {
    /// All fields empty, no errors, submit disabled.
    #[must_use]
    pub fn new() -> Self {
        let state = FormState::new();
        let validation = validate(&state);
        let view = watch::Sender::new(render(&state, &validation, false, None));
        Self { state, validation, submitting: false, failure: None, view }
    }

    #[must_use]
    pub const fn state(&self) -> &FormState {
        &self.state
    }

    #[must_use]
    pub const fn validation(&self) -> &Validation {
        &self.validation
    }

    #[must_use]
    pub const fn submitting(&self) -> bool {
        self.submitting
    }

    #[must_use]
    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    #[must_use]
    pub const fn error_visible(&self, id: FieldId) -> bool {
        self.validation.error_visible(id)
    }

    /// Submit trigger state: valid form and no request in flight.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.submitting && self.validation.can_submit()
    }

    /// Latest published snapshot.
    #[must_use]
    pub fn view(&self) -> FormView {
        self.view.borrow().clone()
    }

    /// Receives a new [`FormView`] after every change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<FormView> {
        self.view.subscribe()
    }

    /// Applies one edit and recomputes synchronously.
    ///
    /// Editing the username clears a pending username conflict; any edit clears
    /// the last transport failure message.
    pub fn input(&mut self, id: FieldId, value: impl Into<String>) {
        let changed = self.state.set_value(id, value);

        if changed && self.state.conflict_field() == Some(id) {
            self.state.clear_conflict();
            debug!(field = %id, "Conflict cleared by edit");
        }
        if changed {
            self.failure = None;
        }

        self.refresh();
    }

    /// Marks a submission in flight and snapshots the request.
    ///
    /// # Errors
    /// [`RegisterError::InvalidState`] when the form cannot be submitted or a
    /// submission is already in flight. Nothing is changed in that case.
    pub fn begin_submission(&mut self) -> Result<RegistrationRequest, RegisterError> {
        if self.submitting {
            return Err(RegisterError::InvalidState {
                message: "A registration request is already in flight".into(),
                context: None,
            });
        }
        if !self.validation.can_submit() {
            return Err(RegisterError::InvalidState {
                message: "The registration form is incomplete or invalid".into(),
                context: Some(
                    format!(
                        "errors on [{}]",
                        self.validation.visible_errors().map(|id| id.to_string()).collect::<Vec<_>>().join(", ")
                    )
                    .into(),
                ),
            });
        }

        self.submitting = true;
        self.failure = None;
        self.refresh();

        Ok(RegistrationRequest {
            name: self.state.value(FieldId::Name).to_owned(),
            username: self.state.value(FieldId::Username).to_owned(),
            password: self.state.value(FieldId::Password).to_owned(),
        })
    }

    /// The account was created. A conflict cannot be pending here: it keeps
    /// `can_submit` false, so no submission started while it was set.
    pub fn complete_success(&mut self) {
        self.submitting = false;
        self.failure = None;
        self.refresh();
    }

    /// The service rejected the value of `field`.
    pub fn complete_conflict(&mut self, field: FieldId) {
        self.submitting = false;
        self.state.set_conflict(field);
        self.refresh();
    }

    /// The request failed in transit; the form returns to its pre-submit state.
    pub fn complete_failure(&mut self, message: impl Into<Cow<'static, str>>) {
        self.submitting = false;
        self.failure = Some(message.into());
        self.refresh();
    }

    fn refresh(&mut self) {
        self.validation = validate(&self.state);
        trace!(
            errors = ?self.validation.visible_errors().collect::<Vec<_>>(),
            can_submit = self.can_submit(),
            "Form recomputed"
        );
        self.view.send_replace(render(
            &self.state,
            &self.validation,
            self.submitting,
            self.failure.clone(),
        ));
    }
}

fn render(
    state: &FormState,
    validation: &Validation,
    submitting: bool,
    failure: Option<Cow<'static, str>>,
) -> FormView {
    FormView {
        fields: FieldId::ALL.map(|id| {
            let field = state.field(id);
            FieldView {
                id,
                value: field.value().to_owned(),
                touched: field.touched(),
                error_visible: validation.error_visible(id),
            }
        }),
        can_submit: !submitting && validation.can_submit(),
        submitting,
        conflict: state.conflict_field(),
        failure,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> FormController {
        let mut controller = FormController::new();
        controller.input(FieldId::Name, "Fides");
        controller.input(FieldId::Username, "fides");
        controller.input(FieldId::Password, "secret");
        controller.input(FieldId::PasswordConfirm, "secret");
        controller
    }

    #[test]
    fn initial_view_is_blank() {
        let view = FormController::new().view();
        assert!(view.fields.iter().all(|f| f.value.is_empty() && !f.error_visible));
        assert!(!view.can_submit);
        assert!(!view.submitting);
        assert!(view.failure.is_none());
    }

    #[test]
    fn every_edit_is_published() {
        let mut controller = FormController::new();
        let mut rx = controller.subscribe();

        controller.input(FieldId::Username, "u");
        assert!(rx.has_changed().unwrap());
        let view = rx.borrow_and_update().clone();
        assert!(view.error_visible(FieldId::Name));
        assert_eq!(view.field(FieldId::Username).value, "u");
    }

    #[test]
    fn begin_submission_rejects_invalid_form() {
        let mut controller = FormController::new();
        controller.input(FieldId::Name, "n");

        let err = controller.begin_submission().unwrap_err();
        assert!(matches!(err, RegisterError::InvalidState { .. }));
        assert!(!controller.submitting());
    }

    #[test]
    fn begin_submission_disables_trigger_until_completion() {
        let mut controller = filled();
        let request = controller.begin_submission().unwrap();

        assert_eq!(request.username, "fides");
        assert_eq!(request.password, "secret");
        assert!(controller.submitting());
        assert!(!controller.can_submit());
        assert!(!controller.view().can_submit);

        let again = controller.begin_submission().unwrap_err();
        assert!(matches!(again, RegisterError::InvalidState { .. }));

        controller.complete_failure(GENERIC_FAILURE);
        assert!(controller.can_submit());
        assert_eq!(controller.failure(), Some(GENERIC_FAILURE));
    }

    #[test]
    fn conflict_is_cleared_by_username_edit_only() {
        let mut controller = filled();
        controller.begin_submission().unwrap();
        controller.complete_conflict(FieldId::Username);
        assert!(controller.error_visible(FieldId::Username));
        assert_eq!(controller.view().conflict, Some(FieldId::Username));
        assert!(!controller.can_submit());

        controller.input(FieldId::Name, "Fides Again");
        assert!(controller.error_visible(FieldId::Username));

        controller.input(FieldId::Username, "fides2");
        assert!(!controller.error_visible(FieldId::Username));
        assert!(controller.can_submit());
    }

    #[test]
    fn pending_conflict_blocks_a_new_submission() {
        let mut controller = filled();
        controller.begin_submission().unwrap();
        controller.complete_conflict(FieldId::Username);

        assert!(matches!(controller.begin_submission(), Err(RegisterError::InvalidState { .. })));
        assert!(!controller.submitting());

        controller.input(FieldId::Username, "fides2");
        controller.begin_submission().unwrap();
        controller.complete_success();

        let view = controller.view();
        assert_eq!(view.conflict, None);
        assert!(!view.submitting);
        assert!(view.can_submit);
    }

    #[test]
    fn edits_clear_failure_message() {
        let mut controller = filled();
        controller.begin_submission().unwrap();
        controller.complete_failure("offline");
        assert_eq!(controller.view().failure.as_deref(), Some("offline"));

        controller.input(FieldId::Password, "secret2");
        assert!(controller.view().failure.is_none());
    }
}
