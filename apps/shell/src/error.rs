use closetr::features::register::RegisterError;
use std::borrow::Cow;

/// Errors of the terminal front-end.
#[closetr_derive::closetr_error]
pub enum ShellError {
    #[error("Terminal I/O error{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Registration error{}: {source}", format_context(.context))]
    Register { source: RegisterError, context: Option<Cow<'static, str>> },

    /// A line that does not parse as a command. Reported to the user, never fatal.
    #[error("Unrecognised input{}: {message}", format_context(.context))]
    Command { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
