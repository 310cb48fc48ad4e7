//! # Sequential validator
//!
//! Errors are not "required field" checks. The fields form a chain and an
//! earlier field is in error when it is still empty while *any* later field
//! already holds a value: the user skipped a step. Every field is judged on its
//! own, so filling only the last field flags all the empty fields before it.
//!
//! The last field has nothing after it; its rule is instead an equality check
//! against the field right before it (`passwordConfirm` against `password`),
//! visible only once it is non-empty.
//!
//! A username conflict reported by the registration service overrides the
//! chain rule for that field until it is cleared.
//!
//! Only emptiness matters. Whether a field was ever focused (touched) plays no
//! part in any rule.

use crate::field::{FieldId, FormState};

/// Per-field error visibility computed from one [`FormState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Validation {
    errors: [bool; FieldId::COUNT],
    complete: bool,
}

impl Validation {
    #[must_use]
    pub const fn error_visible(&self, id: FieldId) -> bool {
        self.errors[id.index()]
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.errors.contains(&true)
    }

    /// All fields non-empty and no visible error.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.complete && !self.has_errors()
    }

    /// Fields currently showing an error, in chain order.
    pub fn visible_errors(&self) -> impl Iterator<Item = FieldId> + '_ {
        FieldId::ALL.into_iter().filter(|id| self.error_visible(*id))
    }
}

/// Computes error visibility for every field. Pure and idempotent.
#[must_use]
pub fn validate(state: &FormState) -> Validation {
    let mut errors = [false; FieldId::COUNT];
    let Some((&last, chain)) = FieldId::ALL.split_last() else {
        return Validation::default();
    };

    let confirm = state.field(last);
    let previous = chain.last().map_or("", |id| state.value(*id));
    errors[last.index()] = !confirm.is_empty() && confirm.value() != previous;

    // Walk backwards so "some later field is filled" is a running flag.
    let mut later_filled = !confirm.is_empty();
    for &id in chain.iter().rev() {
        let empty = state.field(id).is_empty();
        errors[id.index()] = empty && later_filled;
        later_filled |= !empty;
    }

    if let Some(conflict) = state.conflict_field() {
        errors[conflict.index()] = true;
    }

    Validation { errors, complete: state.is_complete() }
}
