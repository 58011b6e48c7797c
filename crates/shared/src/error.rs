use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("user record must be a JSON object, got {0}")]
    NotAnObject(&'static str),
}
