//! Profile repository on top of a generic document store.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use common::{AppError, AppResult};
use domain::{
    NewProfile, ProfilePatch, UserProfile, DEFAULT_PROFILE_COLLECTION, FIELD_UPDATED_AT,
};

use super::document_store::DocumentStore;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Profile repository trait for dependency injection.
///
/// Records are keyed by uid. Absence is a normal outcome, not an error.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Find the profile for a uid
    async fn fetch(&self, uid: &str) -> AppResult<Option<UserProfile>>;

    /// Write a new profile, overwriting any existing record.
    /// Sets `createdAt` and `updatedAt` to the store's current time.
    async fn create(&self, uid: &str, profile: NewProfile) -> AppResult<UserProfile>;

    /// Merge fields into an existing profile and refresh `updatedAt`.
    /// Fails with `NotFound` if the profile does not exist.
    async fn patch(&self, uid: &str, patch: ProfilePatch) -> AppResult<()>;
}

/// Concrete implementation of ProfileRepository over a document store
pub struct ProfileStore {
    store: Arc<dyn DocumentStore>,
    collection: String,
}

impl ProfileStore {
    /// Create repository using the default collection
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self::with_collection(store, DEFAULT_PROFILE_COLLECTION)
    }

    /// Create repository bound to a specific collection
    pub fn with_collection(store: Arc<dyn DocumentStore>, collection: impl Into<String>) -> Self {
        Self {
            store,
            collection: collection.into(),
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }
}

#[async_trait]
impl ProfileRepository for ProfileStore {
    async fn fetch(&self, uid: &str) -> AppResult<Option<UserProfile>> {
        let document = self.store.get(&self.collection, uid).await?;

        match document {
            Some(document) => Ok(Some(serde_json::from_value(Value::Object(document))?)),
            None => Ok(None),
        }
    }

    async fn create(&self, uid: &str, profile: NewProfile) -> AppResult<UserProfile> {
        let profile = UserProfile::from_new(uid, profile, self.store.server_timestamp());

        let Value::Object(document) = serde_json::to_value(&profile)? else {
            return Err(AppError::internal("profile did not encode to an object"));
        };

        self.store.set(&self.collection, uid, document).await?;
        Ok(profile)
    }

    async fn patch(&self, uid: &str, patch: ProfilePatch) -> AppResult<()> {
        let mut fields = patch.into_fields();
        fields.insert(
            FIELD_UPDATED_AT.to_string(),
            serde_json::to_value(self.store.server_timestamp())?,
        );

        self.store.update(&self.collection, uid, fields).await
    }
}
