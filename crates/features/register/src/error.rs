use std::borrow::Cow;

/// A specialized [`RegisterError`] enum of the registration slice.
///
/// Validation problems and username conflicts are not errors: they surface as
/// flags in the form view.
#[closetr_derive::closetr_error]
pub enum RegisterError {
    /// The call is not allowed in the current form state (e.g. submit while `can_submit` is false).
    #[error("Invalid form state{}: {message}", format_context(.context))]
    InvalidState { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A collaborator could not be reached or did not answer in time.
    #[error("Transport failure{}: {message}", format_context(.context))]
    Transport { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The form was torn down before the operation resolved; nothing was applied.
    #[error("Form torn down{}: {message}", format_context(.context))]
    Cancelled { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal registration error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl RegisterError {
    pub(crate) fn cancelled(operation: &'static str) -> Self {
        Self::Cancelled { message: operation.into(), context: None }
    }

    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }
}
