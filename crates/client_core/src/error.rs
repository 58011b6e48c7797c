use shared::{domain::UserId, error::RecordError};
use thiserror::Error;

/// Failure of a single call to the user-directory service.
///
/// Every non-success status is treated the same way; the code is kept only
/// so it can be logged.
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("directory responded with status {0}")]
    Status(u16),
    #[error("directory request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("invalid directory response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for DirectoryError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return Self::Status(status.as_u16());
        }
        if err.is_decode() {
            return Self::Decode(err.to_string());
        }
        Self::Transport(err)
    }
}

impl From<RecordError> for DirectoryError {
    fn from(err: RecordError) -> Self {
        Self::Decode(err.to_string())
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to fetch users: {0}")]
    Fetch(#[source] DirectoryError),
    #[error("failed to create user: {0}")]
    Create(#[source] DirectoryError),
    #[error("failed to update user {id}: {source}")]
    Update {
        id: UserId,
        #[source]
        source: DirectoryError,
    },
    #[error("failed to delete user {id}: {source}")]
    Delete {
        id: UserId,
        #[source]
        source: DirectoryError,
    },
    #[error("user {0} not found")]
    NotFound(UserId),
    #[error("user id {0} is already present")]
    DuplicateId(UserId),
    #[error("user record has no integer id")]
    MissingId,
}

impl StoreError {
    /// The underlying directory failure, if the request itself failed.
    pub fn directory_error(&self) -> Option<&DirectoryError> {
        match self {
            Self::Fetch(source) | Self::Create(source) => Some(source),
            Self::Update { source, .. } | Self::Delete { source, .. } => Some(source),
            Self::NotFound(_) | Self::DuplicateId(_) | Self::MissingId => None,
        }
    }
}
