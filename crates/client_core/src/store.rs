use std::collections::HashSet;

use shared::{
    domain::{FormMode, UserId, UserRecord, ID_FIELD},
    protocol::UserInput,
};
use tracing::{error, info, warn};

use crate::{
    error::StoreError,
    reconcile::{conform_created, merge_updated},
    transport::UserDirectory,
};

/// Local cache of the remote user list plus the record being edited.
///
/// The remote directory is the source of truth. Every mutation issues one
/// request and only touches the cache once that request succeeded.
pub struct UserStore<D: UserDirectory> {
    directory: D,
    users: Vec<UserRecord>,
    edit_target: Option<UserId>,
}

impl<D: UserDirectory> UserStore<D> {
    pub fn new(directory: D) -> Self {
        Self {
            directory,
            users: Vec::new(),
            edit_target: None,
        }
    }

    pub fn directory(&self) -> &D {
        &self.directory
    }

    pub fn users(&self) -> &[UserRecord] {
        &self.users
    }

    pub fn find(&self, id: UserId) -> Option<&UserRecord> {
        self.users.iter().find(|user| user.has_id(id))
    }

    fn position(&self, id: UserId) -> Option<usize> {
        self.users.iter().position(|user| user.has_id(id))
    }

    pub fn edit_target(&self) -> Option<UserId> {
        self.edit_target
    }

    pub fn form_mode(&self) -> FormMode {
        FormMode::from_edit_target(self.edit_target)
    }

    /// Replaces the cache with the remote listing.
    pub async fn load(&mut self) -> Result<&[UserRecord], StoreError> {
        let users = self.directory.list_users().await.map_err(|err| {
            error!("users: listing failed: {err}");
            StoreError::Fetch(err)
        })?;

        let mut seen = HashSet::with_capacity(users.len());
        for user in &users {
            let Some(id) = user.id() else {
                warn!("users: listing contains a record without an integer id");
                return Err(StoreError::MissingId);
            };
            if !seen.insert(id) {
                warn!("users: listing contains duplicate id={id}");
                return Err(StoreError::DuplicateId(id));
            }
        }

        info!("users: loaded count={}", users.len());
        self.users = users;
        Ok(&self.users)
    }

    /// Creates a user remotely and appends it, shaped like the first cached record.
    pub async fn create(&mut self, input: &UserInput) -> Result<&[UserRecord], StoreError> {
        let created = self.directory.create_user(input).await.map_err(|err| {
            error!("users: create failed: {err}");
            StoreError::Create(err)
        })?;

        let record = conform_created(self.users.first(), created);
        let id = record.id().ok_or_else(|| {
            warn!(
                "users: remote create succeeded but local append refused: \
                 response has no integer id"
            );
            StoreError::MissingId
        })?;
        if self.position(id).is_some() {
            warn!(
                "users: remote create succeeded but local append refused: \
                 server assigned id={id} which is already cached"
            );
            return Err(StoreError::DuplicateId(id));
        }

        info!("users: created id={id}");
        self.users.push(record);
        Ok(&self.users)
    }

    /// Updates a cached user remotely and merges the response in place.
    pub async fn update(
        &mut self,
        id: UserId,
        input: &UserInput,
    ) -> Result<&[UserRecord], StoreError> {
        if self.position(id).is_none() {
            warn!("users: update of unknown id={id}");
            return Err(StoreError::NotFound(id));
        }

        let updated = self
            .directory
            .update_user(id, input)
            .await
            .map_err(|err| {
                error!("users: update failed id={id}: {err}");
                StoreError::Update { id, source: err }
            })?;

        if updated.present(ID_FIELD).is_some() && !updated.has_id(id) {
            warn!("users: update response for id={id} carries a different id, keeping id={id}");
        }

        let index = self.position(id).ok_or(StoreError::NotFound(id))?;
        let merged = merge_updated(&self.users[index], &updated);
        self.users[index] = merged;
        info!("users: updated id={id}");
        Ok(&self.users)
    }

    /// Deletes a user remotely and drops it from the cache.
    ///
    /// Dropping an id that is not cached is a no-op once the request succeeded.
    pub async fn remove(&mut self, id: UserId) -> Result<&[UserRecord], StoreError> {
        self.directory.delete_user(id).await.map_err(|err| {
            error!("users: delete failed id={id}: {err}");
            StoreError::Delete { id, source: err }
        })?;

        let before = self.users.len();
        self.users.retain(|user| !user.has_id(id));
        if self.users.len() == before {
            info!("users: deleted id={id} was not cached");
        } else {
            info!("users: deleted id={id}");
        }

        if self.edit_target == Some(id) {
            self.edit_target = None;
        }
        Ok(&self.users)
    }

    /// Puts the store in edit mode for `id` and returns the record to prefill the form.
    pub fn begin_edit(&mut self, id: UserId) -> Result<&UserRecord, StoreError> {
        let index = self.position(id).ok_or(StoreError::NotFound(id))?;
        self.edit_target = Some(id);
        Ok(&self.users[index])
    }

    pub fn cancel_edit(&mut self) {
        self.edit_target = None;
    }

    /// Form submit: updates the edit target if there is one, otherwise creates.
    ///
    /// Returns to create mode on success; on failure the mode is kept so the
    /// operator can retry.
    pub async fn submit(&mut self, input: &UserInput) -> Result<&[UserRecord], StoreError> {
        match self.edit_target {
            Some(id) => {
                self.update(id, input).await?;
            }
            None => {
                self.create(input).await?;
            }
        }
        self.edit_target = None;
        Ok(&self.users)
    }
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
