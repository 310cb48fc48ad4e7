//! Plain-text rendering of a [`FormView`].

use closetr::features::register::{FieldId, FieldView, FormView};

const LABEL_WIDTH: usize = 18;

fn label(id: FieldId) -> &'static str {
    match id {
        FieldId::Name => "Name",
        FieldId::Username => "Username",
        FieldId::Password => "Password",
        FieldId::PasswordConfirm => "Confirm password",
    }
}

/// Message under a field whose error flag is up.
fn error_message(id: FieldId, conflict: Option<FieldId>) -> &'static str {
    match id {
        FieldId::Username if conflict == Some(FieldId::Username) => "this username is already taken",
        FieldId::PasswordConfirm => "passwords do not match",
        _ => "required",
    }
}

fn shown_value(field: &FieldView) -> String {
    match field.id {
        FieldId::Password | FieldId::PasswordConfirm => "*".repeat(field.value.chars().count()),
        _ => field.value.clone(),
    }
}

#[must_use]
pub fn render(view: &FormView) -> String {
    let mut lines: Vec<String> = view
        .fields
        .iter()
        .map(|field| {
            let line = format!("{:<LABEL_WIDTH$}[{}]", label(field.id), shown_value(field));
            if field.error_visible {
                format!("{line}  ! {}", error_message(field.id, view.conflict))
            } else {
                line
            }
        })
        .collect();

    if let Some(failure) = &view.failure {
        lines.push(format!("! {failure}"));
    }

    let state = if view.submitting {
        "sending..."
    } else if view.can_submit {
        "ready"
    } else {
        "disabled"
    };
    lines.push(format!("{:<LABEL_WIDTH$}{state}", "Register"));

    lines.join("\n")
}
