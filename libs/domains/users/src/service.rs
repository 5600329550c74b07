//! User Service - operation semantics over the repository

use mongodb::bson::oid::ObjectId;
use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{UserError, UserResult};
use crate::models::{CreateUser, DeletedUser, UpdateUser, User};
use crate::repository::UserRepository;

/// User service implementing the five collection operations.
///
/// The service owns the semantics: validation, not-found behavior, and the
/// serialization of stored records into the external representation. The
/// repository only executes primitive store operations.
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    /// Create a new UserService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new user.
    ///
    /// The store assigns the identifier; the response echoes the input
    /// fields with the assigned id in its string form.
    #[instrument(skip(self, input), fields(user_name = %input.name))]
    pub async fn create_user(&self, input: CreateUser) -> UserResult<User> {
        input
            .validate()
            .map_err(|e| UserError::Validation(e.to_string()))?;

        let record = input.into_record();
        let id = self.repository.insert(record.clone()).await?;

        Ok(User {
            id: Some(id.to_hex()),
            name: record.name,
            email: record.email,
            age: record.age,
        })
    }

    /// Apply a partial update to the user with the given identifier.
    ///
    /// Fields absent from the input keep their stored values. When no
    /// document was modified (unknown id, or nothing to change) the user
    /// counts as not found. On success the stored document is re-read so
    /// the response reflects the merged state.
    #[instrument(skip(self, input))]
    pub async fn update_user(&self, id: ObjectId, input: UpdateUser) -> UserResult<User> {
        input
            .validate()
            .map_err(|e| UserError::Validation(e.to_string()))?;

        // An empty update can modify nothing; same outcome as an unmatched id
        if input.is_empty() {
            return Err(UserError::NotFound);
        }

        let modified = self.repository.update_by_id(id, input).await?;
        if modified == 0 {
            return Err(UserError::NotFound);
        }

        let record = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound)?;

        Ok(record.into())
    }

    /// List every user in the collection. An empty collection is not an
    /// error.
    #[instrument(skip(self))]
    pub async fn list_users(&self) -> UserResult<Vec<User>> {
        let records = self.repository.find_all().await?;
        Ok(records.into_iter().map(User::from).collect())
    }

    /// Users whose name contains the query, case-insensitively.
    ///
    /// Unlike [`list_users`](Self::list_users), zero matches is an error.
    #[instrument(skip(self))]
    pub async fn search_users(&self, name: &str) -> UserResult<Vec<User>> {
        let records = self.repository.find_by_name(name).await?;

        if records.is_empty() {
            return Err(UserError::NoneMatched);
        }

        Ok(records.into_iter().map(User::from).collect())
    }

    /// Delete the first user whose name matches the given substring.
    ///
    /// With multiple matches, only the first in store-native order is
    /// deleted. Returns the pre-deletion snapshot of the deleted record.
    /// The find and the delete are separate store operations; a record
    /// that vanished in between counts as not found.
    #[instrument(skip(self))]
    pub async fn delete_user_by_name(&self, name: &str) -> UserResult<DeletedUser> {
        let record = self
            .repository
            .find_first_by_name(name)
            .await?
            .ok_or(UserError::NotFound)?;

        let id = record
            .id
            .ok_or_else(|| UserError::Internal("stored document missing _id".to_string()))?;

        let deleted = self.repository.delete_by_id(id).await?;
        if deleted == 0 {
            return Err(UserError::NotFound);
        }

        Ok(DeletedUser {
            message: "User deleted successfully".to_string(),
            deleted_user: record.into(),
        })
    }
}

impl<R: UserRepository> Clone for UserService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserRecord;
    use crate::repository::MockUserRepository;
    use mockall::predicate;

    fn oid(hex: &str) -> ObjectId {
        ObjectId::parse_str(hex).unwrap()
    }

    fn bob(id: ObjectId) -> UserRecord {
        UserRecord {
            id: Some(id),
            name: "Bob".to_string(),
            email: "b@x.com".to_string(),
            age: 30,
        }
    }

    #[tokio::test]
    async fn test_create_user_echoes_assigned_id() {
        let mut mock_repo = MockUserRepository::new();
        let id = oid("507f1f77bcf86cd799439011");

        mock_repo
            .expect_insert()
            .withf(|record| record.id.is_none() && record.name == "Bob")
            .returning(move |_| Ok(id));

        let service = UserService::new(mock_repo);
        let user = service
            .create_user(CreateUser {
                name: "Bob".to_string(),
                email: "b@x.com".to_string(),
                age: 30,
            })
            .await
            .unwrap();

        assert_eq!(user.id.as_deref(), Some("507f1f77bcf86cd799439011"));
        assert_eq!(user.name, "Bob");
        assert_eq!(user.email, "b@x.com");
        assert_eq!(user.age, 30);
    }

    #[tokio::test]
    async fn test_create_user_rejects_empty_name_before_store() {
        // No insert expectation: validation must fail first
        let service = UserService::new(MockUserRepository::new());

        let result = service
            .create_user(CreateUser {
                name: String::new(),
                email: "b@x.com".to_string(),
                age: 30,
            })
            .await;

        assert!(matches!(result, Err(UserError::Validation(_))));
    }

    #[tokio::test]
    async fn test_update_user_applies_only_provided_fields() {
        let mut mock_repo = MockUserRepository::new();
        let id = oid("507f1f77bcf86cd799439011");

        mock_repo
            .expect_update_by_id()
            .withf(|_, update| {
                let doc = update.to_document();
                doc.len() == 1 && doc.get_str("name") == Ok("Bobby")
            })
            .returning(|_, _| Ok(1));

        // Merge law: the re-read shows the new name with old email/age intact
        mock_repo
            .expect_find_by_id()
            .with(predicate::eq(id))
            .returning(move |_| {
                Ok(Some(UserRecord {
                    name: "Bobby".to_string(),
                    ..bob(id)
                }))
            });

        let service = UserService::new(mock_repo);
        let user = service
            .update_user(
                id,
                UpdateUser {
                    name: Some("Bobby".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(user.name, "Bobby");
        assert_eq!(user.email, "b@x.com");
        assert_eq!(user.age, 30);
    }

    #[tokio::test]
    async fn test_update_user_unmatched_id_is_not_found() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_update_by_id().returning(|_, _| Ok(0));

        let service = UserService::new(mock_repo);
        let result = service
            .update_user(
                oid("507f1f77bcf86cd799439011"),
                UpdateUser {
                    age: Some(31),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(UserError::NotFound)));
    }

    #[tokio::test]
    async fn test_update_user_empty_body_is_not_found_without_store_call() {
        // No expectations: an empty update must not reach the repository
        let service = UserService::new(MockUserRepository::new());

        let result = service
            .update_user(oid("507f1f77bcf86cd799439011"), UpdateUser::default())
            .await;

        assert!(matches!(result, Err(UserError::NotFound)));
    }

    #[tokio::test]
    async fn test_list_users_empty_collection_is_ok() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_find_all().returning(|| Ok(vec![]));

        let service = UserService::new(mock_repo);
        let users = service.list_users().await.unwrap();

        assert!(users.is_empty());
    }

    #[tokio::test]
    async fn test_search_users_no_matches_is_an_error() {
        // Asymmetric with list: an empty search result is NoneMatched
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_find_by_name()
            .with(predicate::eq("nobody"))
            .returning(|_| Ok(vec![]));

        let service = UserService::new(mock_repo);
        let result = service.search_users("nobody").await;

        assert!(matches!(result, Err(UserError::NoneMatched)));
    }

    #[tokio::test]
    async fn test_search_users_serializes_matches() {
        let mut mock_repo = MockUserRepository::new();
        let id = oid("507f1f77bcf86cd799439011");

        mock_repo
            .expect_find_by_name()
            .with(predicate::eq("bo"))
            .returning(move |_| Ok(vec![bob(id)]));

        let service = UserService::new(mock_repo);
        let users = service.search_users("bo").await.unwrap();

        assert_eq!(users.len(), 1);
        assert_eq!(users[0].id.as_deref(), Some("507f1f77bcf86cd799439011"));
    }

    #[tokio::test]
    async fn test_delete_user_returns_pre_deletion_snapshot() {
        let mut mock_repo = MockUserRepository::new();
        let id = oid("507f1f77bcf86cd799439011");

        mock_repo
            .expect_find_first_by_name()
            .with(predicate::eq("Bobby"))
            .returning(move |_| {
                Ok(Some(UserRecord {
                    name: "Bobby".to_string(),
                    ..bob(id)
                }))
            });
        mock_repo
            .expect_delete_by_id()
            .with(predicate::eq(id))
            .returning(|_| Ok(1));

        let service = UserService::new(mock_repo);
        let deleted = service.delete_user_by_name("Bobby").await.unwrap();

        assert_eq!(deleted.message, "User deleted successfully");
        assert_eq!(deleted.deleted_user.name, "Bobby");
        assert_eq!(
            deleted.deleted_user.id.as_deref(),
            Some("507f1f77bcf86cd799439011")
        );
    }

    #[tokio::test]
    async fn test_delete_user_no_match_is_not_found() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_find_first_by_name()
            .returning(|_| Ok(None));

        let service = UserService::new(mock_repo);
        let result = service.delete_user_by_name("nobody").await;

        assert!(matches!(result, Err(UserError::NotFound)));
    }

    #[tokio::test]
    async fn test_delete_user_vanished_between_find_and_delete() {
        let mut mock_repo = MockUserRepository::new();
        let id = oid("507f1f77bcf86cd799439011");

        mock_repo
            .expect_find_first_by_name()
            .returning(move |_| Ok(Some(bob(id))));
        mock_repo.expect_delete_by_id().returning(|_| Ok(0));

        let service = UserService::new(mock_repo);
        let result = service.delete_user_by_name("Bob").await;

        assert!(matches!(result, Err(UserError::NotFound)));
    }
}
