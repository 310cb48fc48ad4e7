//! Line commands understood by the shell.

use crate::error::ShellError;
use closetr::features::register::FieldId;
use std::str::FromStr;

pub const HELP: &str = "\
commands:
  set <field> <value>   type into a field (name, username, password, passwordConfirm)
  clear <field>         empty a field
  show                  print the form
  submit                send the registration
  login                 go to the login page
  help                  print this text
  quit                  leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Set(FieldId, String),
    Clear(FieldId),
    Show,
    Submit,
    Login,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = ShellError;

    /// Everything after `set <field> ` is the value, inner spaces included.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim_start();

        match verb.to_ascii_lowercase().as_str() {
            "set" => {
                let (field, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                Ok(Self::Set(field_id(field)?, value.trim_start().to_owned()))
            },
            "clear" => Ok(Self::Clear(field_id(rest)?)),
            "show" | "" => Ok(Self::Show),
            "submit" | "register" => Ok(Self::Submit),
            "login" => Ok(Self::Login),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            other => Err(ShellError::Command {
                message: format!("unknown command '{other}'").into(),
                context: Some("type 'help' for the list".into()),
            }),
        }
    }
}

fn field_id(name: &str) -> Result<FieldId, ShellError> {
    if name.is_empty() {
        return Err(ShellError::Command { message: "missing field name".into(), context: None });
    }
    name.parse().map_err(|_| ShellError::Command {
        message: format!("unknown field '{name}'").into(),
        context: Some("expected name, username, password or passwordConfirm".into()),
    })
}
