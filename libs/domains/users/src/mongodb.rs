//! MongoDB implementation of UserRepository

use async_trait::async_trait;
use mongodb::{
    bson::{doc, oid::ObjectId, Document},
    Collection, Database,
};
use tracing::instrument;

use crate::error::{UserError, UserResult};
use crate::models::{UpdateUser, UserRecord};
use crate::repository::UserRepository;

/// MongoDB implementation of the UserRepository
pub struct MongoUserRepository {
    collection: Collection<UserRecord>,
}

impl MongoUserRepository {
    /// Create a new MongoUserRepository over the `users` collection
    ///
    /// # Example
    /// ```ignore
    /// let client = Client::with_uri_str("mongodb://localhost:27017").await?;
    /// let db = client.database("mydb");
    /// let repo = MongoUserRepository::new(db);
    /// ```
    pub fn new(db: Database) -> Self {
        let collection = db.collection::<UserRecord>("users");
        Self { collection }
    }

    /// Create a new MongoUserRepository with a custom collection name
    pub fn with_collection(db: Database, collection_name: &str) -> Self {
        let collection = db.collection::<UserRecord>(collection_name);
        Self { collection }
    }

    /// Get the underlying collection for advanced operations
    pub fn collection(&self) -> &Collection<UserRecord> {
        &self.collection
    }

    /// Case-insensitive substring filter over the name field.
    ///
    /// The input is escaped, so regex metacharacters in a query match
    /// literally rather than being interpreted.
    fn name_filter(pattern: &str) -> Document {
        doc! { "name": { "$regex": regex::escape(pattern), "$options": "i" } }
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    #[instrument(skip(self, record), fields(user_name = %record.name))]
    async fn insert(&self, record: UserRecord) -> UserResult<ObjectId> {
        let result = self.collection.insert_one(&record).await?;

        let id = result.inserted_id.as_object_id().ok_or_else(|| {
            UserError::Internal("store returned a non-ObjectId identifier".to_string())
        })?;

        tracing::info!(user_id = %id, "User created successfully");
        Ok(id)
    }

    #[instrument(skip(self))]
    async fn find_all(&self) -> UserResult<Vec<UserRecord>> {
        use futures_util::TryStreamExt;

        let cursor = self.collection.find(doc! {}).await?;
        let records: Vec<UserRecord> = cursor.try_collect().await?;

        Ok(records)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: ObjectId) -> UserResult<Option<UserRecord>> {
        let record = self.collection.find_one(doc! { "_id": id }).await?;
        Ok(record)
    }

    #[instrument(skip(self))]
    async fn find_by_name(&self, pattern: &str) -> UserResult<Vec<UserRecord>> {
        use futures_util::TryStreamExt;

        let cursor = self.collection.find(Self::name_filter(pattern)).await?;
        let records: Vec<UserRecord> = cursor.try_collect().await?;

        Ok(records)
    }

    #[instrument(skip(self))]
    async fn find_first_by_name(&self, pattern: &str) -> UserResult<Option<UserRecord>> {
        let record = self.collection.find_one(Self::name_filter(pattern)).await?;
        Ok(record)
    }

    #[instrument(skip(self, update))]
    async fn update_by_id(&self, id: ObjectId, update: UpdateUser) -> UserResult<u64> {
        let result = self
            .collection
            .update_one(doc! { "_id": id }, doc! { "$set": update.to_document() })
            .await?;

        tracing::info!(user_id = %id, modified = result.modified_count, "User update applied");
        Ok(result.modified_count)
    }

    #[instrument(skip(self))]
    async fn delete_by_id(&self, id: ObjectId) -> UserResult<u64> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;

        tracing::info!(user_id = %id, deleted = result.deleted_count, "User delete applied");
        Ok(result.deleted_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_filter_is_case_insensitive_substring() {
        let filter = MongoUserRepository::name_filter("ali");
        let name = filter.get_document("name").unwrap();
        assert_eq!(name.get_str("$regex").unwrap(), "ali");
        assert_eq!(name.get_str("$options").unwrap(), "i");
    }

    #[test]
    fn test_name_filter_escapes_regex_metacharacters() {
        let filter = MongoUserRepository::name_filter("a.b*");
        let name = filter.get_document("name").unwrap();
        assert_eq!(name.get_str("$regex").unwrap(), r"a\.b\*");
    }
}
