use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::RecordError;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(UserId);

pub const ID_FIELD: &str = "id";

/// One user entity as returned by the directory service.
///
/// The field set is whatever the server sent, kept in the order it was sent,
/// so the first record of a listing can act as the column template.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserRecord {
    fields: Map<String, Value>,
}

impl UserRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_value(value: Value) -> Result<Self, RecordError> {
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            other => Err(RecordError::NotAnObject(json_kind(&other))),
        }
    }

    /// The integer `id` field, if present.
    pub fn id(&self) -> Option<UserId> {
        self.fields.get(ID_FIELD).and_then(Value::as_i64).map(UserId)
    }

    pub fn has_id(&self, id: UserId) -> bool {
        self.id() == Some(id)
    }

    /// Value of `field` unless it is absent or `null`.
    pub fn present(&self, field: &str) -> Option<&Value> {
        self.fields.get(field).filter(|value| !value.is_null())
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(field.into(), value.into());
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Text shown in a table cell. Nested structures are shown as compact JSON.
    pub fn display_value(&self, field: &str) -> String {
        self.fields.get(field).map(display_value).unwrap_or_default()
    }

    /// Text field for the edit form; anything missing or non-textual is empty.
    pub fn text_field(&self, field: &str) -> String {
        match self.fields.get(field) {
            Some(Value::String(text)) => text.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        }
    }
}

pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(UserId),
}

impl FormMode {
    pub fn from_edit_target(edit_target: Option<UserId>) -> Self {
        match edit_target {
            Some(id) => Self::Edit(id),
            None => Self::Create,
        }
    }

    pub fn submit_label(self) -> &'static str {
        match self {
            Self::Create => "Add",
            Self::Edit(_) => "Update",
        }
    }
}
