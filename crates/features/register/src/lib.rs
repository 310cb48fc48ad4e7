//! Registration feature slice.
//!
//! A client-side state machine for the account registration form:
//!
//! * [`FormState`]: values and touched flags of `name`, `username`, `password`, `passwordConfirm`.
//! * [`validate`]: the sequential (skip-ahead) validator plus the confirmation check.
//! * [`FormController`]: recomputes on every edit and publishes a [`FormView`].
//! * [`SessionGuard`]: redirects an already signed-in user to the dashboard, once.
//! * [`SubmissionCoordinator`]: sends the request, maps conflicts back onto the username field.
//! * [`RegisterForm`]: one activation wiring all of the above to injected collaborators.
//!
//! ```rust
//! use closetr_domain::config::RegisterConfig;
//! use closetr_register::memory::{MemoryDirectory, MemorySessions, RecordingNavigator};
//! use closetr_register::{Decision, FieldId, Outcome, RegisterForm};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), closetr_register::RegisterError> {
//! let navigator = RecordingNavigator::new();
//! let mut form = RegisterForm::new(
//!     MemorySessions::new(),
//!     MemoryDirectory::new(),
//!     navigator.clone(),
//!     &RegisterConfig::default(),
//! );
//!
//! assert_eq!(form.activate().await?, Decision::RenderForm);
//! form.input(FieldId::Name, "Fides");
//! form.input(FieldId::Username, "fides");
//! form.input(FieldId::Password, "secret");
//! form.input(FieldId::PasswordConfirm, "secret");
//!
//! assert_eq!(form.submit().await?, Outcome::Redirected);
//! # Ok(())
//! # }
//! ```

mod controller;
mod error;
mod field;
mod form;
mod guard;
pub mod memory;
mod ports;
mod submission;
mod validator;

pub use crate::controller::{FieldView, FormController, FormView, GENERIC_FAILURE};
pub use crate::error::{RegisterError, RegisterErrorExt};
pub use crate::field::{Field, FieldId, FormState};
pub use crate::form::{RegisterForm, TeardownHandle};
pub use crate::guard::{Decision, SessionGuard};
pub use crate::ports::{Navigator, RegistrationService, SessionProvider};
pub use crate::submission::{Outcome, SubmissionCoordinator};
pub use crate::validator::{Validation, validate};
