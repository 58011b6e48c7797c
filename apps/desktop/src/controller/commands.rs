//! Operator commands read from the terminal, one per line.

use shared::{domain::UserId, protocol::UserInput};
use thiserror::Error;

pub const HELP: &str = "\
commands:
  list                      show the cached users
  reload                    fetch the user list again
  edit <id>                 load a user into the form
  cancel                    leave edit mode and clear the form
  name <value>              set the form's name field
  email <value>             set the form's email field
  submit [<name> <email>]   add or update using the form (alias: add)
  delete <id>               delete a user
  help                      show this help
  quit                      exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Reload,
    Edit(UserId),
    Cancel,
    SetName(String),
    SetEmail(String),
    Submit(Option<UserInput>),
    Delete(UserId),
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command '{0}'")]
    Unknown(String),
    #[error("'{command}' expects {expected}")]
    Arguments {
        command: &'static str,
        expected: &'static str,
    },
    #[error("invalid user id '{0}'")]
    InvalidId(String),
    #[error("unterminated quote")]
    UnterminatedQuote,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let words = split_words(line)?;
        let Some((verb, args)) = words.split_first() else {
            return Err(CommandError::Empty);
        };

        match verb.to_ascii_lowercase().as_str() {
            "list" | "ls" => no_args("list", args, Self::List),
            "reload" => no_args("reload", args, Self::Reload),
            "cancel" | "reset" => no_args("cancel", args, Self::Cancel),
            "help" | "?" => no_args("help", args, Self::Help),
            "quit" | "exit" => no_args("quit", args, Self::Quit),
            "edit" => Ok(Self::Edit(single_id("edit", args)?)),
            "delete" | "rm" => Ok(Self::Delete(single_id("delete", args)?)),
            "name" => Ok(Self::SetName(single_text("name", args)?)),
            "email" => Ok(Self::SetEmail(single_text("email", args)?)),
            "submit" | "add" | "update" => match args {
                [] => Ok(Self::Submit(None)),
                [name, email] => Ok(Self::Submit(Some(UserInput::new(
                    name.as_str(),
                    email.as_str(),
                )))),
                _ => Err(CommandError::Arguments {
                    command: "submit",
                    expected: "either no arguments or <name> <email>",
                }),
            },
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

fn no_args(command: &'static str, args: &[String], parsed: Command) -> Result<Command, CommandError> {
    if args.is_empty() {
        Ok(parsed)
    } else {
        Err(CommandError::Arguments {
            command,
            expected: "no arguments",
        })
    }
}

fn single_id(command: &'static str, args: &[String]) -> Result<UserId, CommandError> {
    let [raw] = args else {
        return Err(CommandError::Arguments {
            command,
            expected: "a user id",
        });
    };
    raw.parse::<i64>()
        .map(UserId)
        .map_err(|_| CommandError::InvalidId(raw.clone()))
}

fn single_text(command: &'static str, args: &[String]) -> Result<String, CommandError> {
    match args {
        [value] => Ok(value.clone()),
        _ => Err(CommandError::Arguments {
            command,
            expected: "one value (quote it if it contains spaces)",
        }),
    }
}

/// Splits on whitespace, keeping double-quoted runs together.
fn split_words(line: &str) -> Result<Vec<String>, CommandError> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quoted = false;

    for ch in line.chars() {
        match ch {
            '"' => {
                quoted = !quoted;
                in_word = true;
            }
            ch if ch.is_whitespace() && !quoted => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            ch => {
                current.push(ch);
                in_word = true;
            }
        }
    }

    if quoted {
        return Err(CommandError::UnterminatedQuote);
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}
