//! # Closetr Shell
//!
//! Terminal front-end for the registration form. Reads one command per line,
//! applies it to a [`RegisterForm`] and prints the resulting form.
//!
//! ## Example
//! ```no_run
//! use closetr::domain::config::RegisterConfig;
//! use closetr::features::register::memory::{MemoryDirectory, MemorySessions, RecordingNavigator};
//! use closetr::features::register::RegisterForm;
//! use closetr_shell::Shell;
//! use tokio::io::BufReader;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let form = RegisterForm::new(
//!         MemorySessions::new(),
//!         MemoryDirectory::new(),
//!         RecordingNavigator::new(),
//!         &RegisterConfig::default(),
//!     );
//!     Shell::new(form).run(BufReader::new(tokio::io::stdin()), tokio::io::stdout()).await?;
//!     Ok(())
//! }
//! ```

mod command;
mod error;
mod render;

pub use crate::command::{Command, HELP};
pub use crate::error::{ShellError, ShellErrorExt};
pub use crate::render::render;

use closetr::domain::route::Route;
use closetr::features::register::{
    Decision, Navigator, Outcome, RegisterError, RegisterForm, RegistrationService,
    SessionProvider,
};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};

/// How a shell session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    /// The user left with `quit` or closed the input.
    Quit,
    /// The form navigated away (signed-in user, new account, or `login`).
    Navigated,
}

#[derive(Debug)]
pub struct Shell<S, R, N> {
    form: RegisterForm<S, R, N>,
}

impl<S, R, N> Shell<S, R, N>
where
    S: SessionProvider,
    R: RegistrationService,
    N: Navigator,
{
    pub const fn new(form: RegisterForm<S, R, N>) -> Self {
        Self { form }
    }

    #[must_use]
    pub const fn form(&self) -> &RegisterForm<S, R, N> {
        &self.form
    }

    /// Activates the form, then serves commands from `input` until the form
    /// navigates away, `quit` is entered or `input` ends.
    ///
    /// # Errors
    /// [`ShellError::Io`] when reading or writing the terminal fails and
    /// [`ShellError::Register`] when the form is torn down underneath the shell.
    pub async fn run<I, O>(&mut self, input: I, mut output: O) -> Result<Exit, ShellError>
    where
        I: AsyncBufRead + Unpin,
        O: AsyncWrite + Unpin,
    {
        match self.form.activate().await.context("Activating registration form")? {
            Decision::Redirect(route) => {
                let text = format!("Already signed in; continuing to {}\n", route.path());
                write(&mut output, &text).await?;
                return Ok(Exit::Navigated);
            },
            Decision::RenderForm => {
                let text = format!("{}\ntype 'help' for commands\n", render(&self.form.view()));
                write(&mut output, &text).await?;
            },
        }

        let mut lines = input.lines();
        while let Some(line) = lines.next_line().await.context("Reading command")? {
            let command = match line.parse::<Command>() {
                Ok(command) => command,
                Err(e) => {
                    debug!(%line, "Rejected input");
                    write(&mut output, &format!("{e}\n")).await?;
                    continue;
                },
            };

            if let Some(exit) = self.apply(command, &mut output).await? {
                return Ok(exit);
            }
        }

        info!("Input closed");
        self.form.deactivate();
        Ok(Exit::Quit)
    }

    async fn apply<O>(&mut self, command: Command, output: &mut O) -> Result<Option<Exit>, ShellError>
    where
        O: AsyncWrite + Unpin,
    {
        let text = match command {
            Command::Set(id, value) => {
                self.form.input(id, value);
                render(&self.form.view())
            },
            Command::Clear(id) => {
                self.form.input(id, "");
                render(&self.form.view())
            },
            Command::Show => render(&self.form.view()),
            Command::Help => HELP.to_owned(),
            Command::Submit => match self.form.submit().await {
                Ok(Outcome::Redirected) => {
                    let text = format!("Account created; continuing to {}\n", Route::Dashboard.path());
                    write(output, &text).await?;
                    return Ok(Some(Exit::Navigated));
                },
                Ok(Outcome::Conflict { .. }) => render(&self.form.view()),
                Err(e @ RegisterError::InvalidState { .. }) => format!("Cannot register yet: {e}"),
                Err(e) if e.is_transport() => {
                    warn!(error = %e, "Registration failed");
                    render(&self.form.view())
                },
                Err(e) => return Err(e.into()),
            },
            Command::Login => {
                self.form.go_to_login();
                self.form.deactivate();
                write(output, &format!("Continuing to {}\n", Route::Login.path())).await?;
                return Ok(Some(Exit::Navigated));
            },
            Command::Quit => {
                self.form.deactivate();
                return Ok(Some(Exit::Quit));
            },
        };

        write(output, &format!("{text}\n")).await?;
        Ok(None)
    }
}

async fn write<O>(output: &mut O, text: &str) -> Result<(), ShellError>
where
    O: AsyncWrite + Unpin,
{
    output.write_all(text.as_bytes()).await.context("Writing to terminal")?;
    output.flush().await.context("Flushing terminal")?;
    Ok(())
}
