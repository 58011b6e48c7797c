//! Text rendering of the user table, the form and the status line.

use std::fmt;

use shared::{
    domain::{FormMode, UserRecord},
    protocol::UserInput,
};

const ACTIONS_HEADER: &str = "Actions";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

impl StatusKind {
    fn label(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
}

impl StatusMessage {
    pub fn new(text: impl Into<String>, kind: StatusKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self::new(text, StatusKind::Info)
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::new(text, StatusKind::Success)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(text, StatusKind::Error)
    }
}

impl fmt::Display for StatusMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind.label(), self.text)
    }
}

/// Renders the table. Columns come from the first record; each row shows its
/// own fields in its own order, like the header does for the first row.
pub fn render_table(users: &[UserRecord]) -> String {
    let mut header: Vec<String> = users
        .first()
        .map(|user| user.field_names().map(str::to_string).collect())
        .unwrap_or_default();
    header.push(ACTIONS_HEADER.to_string());

    let rows: Vec<Vec<String>> = users
        .iter()
        .map(|user| {
            let mut cells: Vec<String> = user
                .field_names()
                .map(|field| user.display_value(field))
                .collect();
            cells.push(match user.id() {
                Some(id) => format!("[edit {id}] [delete {id}]"),
                None => String::new(),
            });
            cells
        })
        .collect();

    let columns = rows.iter().map(Vec::len).fold(header.len(), usize::max);
    let mut widths = vec![0usize; columns];
    for line in std::iter::once(&header).chain(rows.iter()) {
        for (index, cell) in line.iter().enumerate() {
            widths[index] = widths[index].max(cell.chars().count());
        }
    }

    let mut out = String::new();
    for line in std::iter::once(&header).chain(rows.iter()) {
        let padded: Vec<String> = line
            .iter()
            .enumerate()
            .map(|(index, cell)| format!("{cell:<width$}", width = widths[index]))
            .collect();
        out.push_str(padded.join(" | ").trim_end());
        out.push('\n');
    }
    out
}

pub fn render_form(mode: FormMode, form: &UserInput) -> String {
    let target = match mode {
        FormMode::Create => String::new(),
        FormMode::Edit(id) => format!(" user {id}"),
    };
    format!(
        "form{target}: name=\"{}\" email=\"{}\" -> submit to {}",
        form.name,
        form.email,
        mode.submit_label()
    )
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use shared::domain::UserId;

    use super::*;

    fn users(value: serde_json::Value) -> Vec<UserRecord> {
        serde_json::from_value(value).expect("users")
    }

    #[test]
    fn empty_table_only_has_actions_header() {
        assert_eq!(render_table(&[]), "Actions\n");
    }

    #[test]
    fn renders_header_from_first_record_and_nested_values_as_json() {
        let table = render_table(&users(json!([
            {"id": 1, "name": "Leanne", "address": {"city": "G"}},
            {"id": 10, "name": "Clementina", "address": null},
        ])));

        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "id | name       | address      | Actions");
        assert_eq!(
            lines[1],
            r#"1  | Leanne     | {"city":"G"} | [edit 1] [delete 1]"#
        );
        assert_eq!(
            lines[2],
            "10 | Clementina |              | [edit 10] [delete 10]"
        );
    }

    #[test]
    fn status_line_shows_kind() {
        assert_eq!(
            StatusMessage::error("Failed to fetch users.").to_string(),
            "[error] Failed to fetch users."
        );
    }

    #[test]
    fn form_shows_mode_label() {
        let form = UserInput::new("X", "y@z");
        assert_eq!(
            render_form(FormMode::Create, &form),
            "form: name=\"X\" email=\"y@z\" -> submit to Add"
        );
        assert_eq!(
            render_form(FormMode::Edit(UserId(3)), &form),
            "form user 3: name=\"X\" email=\"y@z\" -> submit to Update"
        );
    }
}
