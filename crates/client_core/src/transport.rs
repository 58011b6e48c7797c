use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use shared::{
    domain::{UserId, UserRecord},
    protocol::UserInput,
};
use tracing::debug;

use crate::error::DirectoryError;

/// The remote user-directory service. Each method issues exactly one request.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn list_users(&self) -> Result<Vec<UserRecord>, DirectoryError>;
    async fn create_user(&self, input: &UserInput) -> Result<UserRecord, DirectoryError>;
    async fn update_user(
        &self,
        id: UserId,
        input: &UserInput,
    ) -> Result<UserRecord, DirectoryError>;
    async fn delete_user(&self, id: UserId) -> Result<(), DirectoryError>;
}

/// REST implementation talking to `{base_url}/users`.
pub struct HttpUserDirectory {
    http: Client,
    users_url: String,
}

impl HttpUserDirectory {
    pub fn new(base_url: impl AsRef<str>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_timeout(
        base_url: impl AsRef<str>,
        timeout: Option<Duration>,
    ) -> Result<Self, DirectoryError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self::with_client(builder.build()?, base_url))
    }

    pub fn with_client(http: Client, base_url: impl AsRef<str>) -> Self {
        Self {
            http,
            users_url: format!("{}/users", base_url.as_ref().trim_end_matches('/')),
        }
    }

    pub fn users_url(&self) -> &str {
        &self.users_url
    }

    fn user_url(&self, id: UserId) -> String {
        format!("{}/{}", self.users_url, id.0)
    }
}

#[async_trait]
impl UserDirectory for HttpUserDirectory {
    async fn list_users(&self) -> Result<Vec<UserRecord>, DirectoryError> {
        debug!("users: GET {}", self.users_url);
        let users: Vec<Value> = self
            .http
            .get(&self.users_url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        users
            .into_iter()
            .map(|user| UserRecord::from_value(user).map_err(DirectoryError::from))
            .collect()
    }

    async fn create_user(&self, input: &UserInput) -> Result<UserRecord, DirectoryError> {
        debug!("users: POST {}", self.users_url);
        let created: Value = self
            .http
            .post(&self.users_url)
            .json(input)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(UserRecord::from_value(created)?)
    }

    async fn update_user(
        &self,
        id: UserId,
        input: &UserInput,
    ) -> Result<UserRecord, DirectoryError> {
        let url = self.user_url(id);
        debug!("users: PATCH {url}");
        let updated: Value = self
            .http
            .patch(&url)
            .json(input)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(UserRecord::from_value(updated)?)
    }

    async fn delete_user(&self, id: UserId) -> Result<(), DirectoryError> {
        let url = self.user_url(id);
        debug!("users: DELETE {url}");
        self.http.delete(&url).send().await?.error_for_status()?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
