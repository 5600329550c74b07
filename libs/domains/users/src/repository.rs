use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::error::UserResult;
use crate::models::{UpdateUser, UserRecord};

/// Repository trait for user persistence.
///
/// This is the store adapter contract: one method per primitive store
/// operation the service composes (insert, find variants, partial update,
/// delete). Implementations can use different storage backends.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new document; the store assigns and returns its identifier.
    async fn insert(&self, record: UserRecord) -> UserResult<ObjectId>;

    /// Fetch every document in the collection, in store-native order.
    async fn find_all(&self) -> UserResult<Vec<UserRecord>>;

    /// Fetch a single document by its identifier.
    async fn find_by_id(&self, id: ObjectId) -> UserResult<Option<UserRecord>>;

    /// All documents whose name contains `pattern`, case-insensitively.
    async fn find_by_name(&self, pattern: &str) -> UserResult<Vec<UserRecord>>;

    /// The first document (store-native order) whose name contains `pattern`.
    async fn find_first_by_name(&self, pattern: &str) -> UserResult<Option<UserRecord>>;

    /// Apply a partial update to one document; returns the modified count.
    async fn update_by_id(&self, id: ObjectId, update: UpdateUser) -> UserResult<u64>;

    /// Delete one document by its identifier; returns the deleted count.
    async fn delete_by_id(&self, id: ObjectId) -> UserResult<u64>;
}
