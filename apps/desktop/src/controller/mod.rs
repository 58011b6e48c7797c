//! Controller layer: maps operator commands to store operations and keeps the
//! form and status line in sync with the outcome.

pub mod commands;

use client_core::{StoreError, UserDirectory, UserStore};
use shared::{domain::UserId, protocol::UserInput};
use tracing::error;

use crate::view::{render_form, render_table, StatusMessage};
use commands::{Command, CommandError, HELP};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Controller<D: UserDirectory> {
    store: UserStore<D>,
    form: UserInput,
    status: Option<StatusMessage>,
}

impl<D: UserDirectory> Controller<D> {
    pub fn new(directory: D) -> Self {
        Self {
            store: UserStore::new(directory),
            form: UserInput::default(),
            status: None,
        }
    }

    pub async fn load(&mut self) {
        self.status = Some(match self.store.load().await {
            Ok(_) => StatusMessage::success("Users loaded."),
            Err(err) => report(&err, "Failed to fetch users."),
        });
    }

    pub async fn handle_line(&mut self, line: &str) -> Flow {
        match Command::parse(line) {
            Ok(command) => self.handle(command).await,
            Err(CommandError::Empty) => Flow::Continue,
            Err(err) => {
                self.status = Some(StatusMessage::error(format!("{err}; type 'help'")));
                Flow::Continue
            }
        }
    }

    pub async fn handle(&mut self, command: Command) -> Flow {
        match command {
            Command::List => {}
            Command::Reload => self.load().await,
            Command::Edit(id) => match self.store.begin_edit(id) {
                Ok(user) => {
                    self.form = UserInput::new(user.text_field("name"), user.text_field("email"));
                    self.status = Some(StatusMessage::info(format!("Editing user {id}.")));
                }
                Err(err) => self.status = Some(report(&err, &format!("No user with id {id}."))),
            },
            Command::Cancel => {
                self.store.cancel_edit();
                self.form = UserInput::default();
                self.status = None;
            }
            Command::SetName(name) => self.form.name = name,
            Command::SetEmail(email) => self.form.email = email,
            Command::Submit(input) => {
                if let Some(input) = input {
                    self.form = input;
                }
                self.submit().await;
            }
            Command::Delete(id) => self.delete(id).await,
            Command::Help => self.status = Some(StatusMessage::info(HELP)),
            Command::Quit => return Flow::Quit,
        }
        Flow::Continue
    }

    async fn submit(&mut self) {
        let editing = self.store.edit_target().is_some();
        match self.store.submit(&self.form).await {
            Ok(_) => {
                self.form = UserInput::default();
                self.status = Some(StatusMessage::success(if editing {
                    "User updated."
                } else {
                    "User created."
                }));
            }
            Err(err) => self.status = Some(report(&err, "Failed to submit form.")),
        }
    }

    async fn delete(&mut self, id: UserId) {
        let was_editing = self.store.edit_target() == Some(id);
        match self.store.remove(id).await {
            Ok(_) => {
                if was_editing {
                    self.form = UserInput::default();
                }
                self.status = Some(StatusMessage::success("User deleted."));
            }
            Err(err) => self.status = Some(report(&err, "Failed to delete user.")),
        }
    }

    pub fn render(&self) -> String {
        let mut out = render_table(self.store.users());
        out.push_str(&render_form(self.store.form_mode(), &self.form));
        out.push('\n');
        if let Some(status) = &self.status {
            out.push_str(&status.to_string());
            out.push('\n');
        }
        out
    }
}

fn report(err: &StoreError, message: &str) -> StatusMessage {
    match err.directory_error() {
        Some(source) => error!("{message} {err} (directory: {source:?})"),
        None => error!("{message} {err}"),
    }
    StatusMessage::error(message)
}

#[cfg(test)]
#[path = "../tests/controller_tests.rs"]
mod tests;
