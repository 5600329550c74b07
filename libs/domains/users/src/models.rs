use mongodb::bson::oid::ObjectId;
use mongodb::bson::{doc, Document};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// User document as stored in MongoDB.
///
/// The identifier is assigned by the store: it is `None` on a record built
/// for insertion (and skipped during serialization so the store generates
/// it) and always present on a record read back from the collection.
///
/// Reads are tolerant of partially populated documents: a missing `name`
/// or `email` comes back as an empty string and a missing `age` as 0,
/// so legacy records pass through every read path without error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub age: i32,
}

/// External representation of a user.
///
/// `id` is the hex string form of the stored ObjectId.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: Option<String>,
    pub name: String,
    pub email: String,
    pub age: i32,
}

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        Self {
            id: record.id.map(|oid| oid.to_hex()),
            name: record.name,
            email: record.email,
            age: record.age,
        }
    }
}

/// DTO for creating a new user.
///
/// All three fields are required; `email` is free-form text (presence is
/// the only requirement).
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateUser {
    #[validate(length(min = 1))]
    pub name: String,
    pub email: String,
    pub age: i32,
}

impl CreateUser {
    /// Build the document to insert; the store assigns the identifier.
    pub fn into_record(self) -> UserRecord {
        UserRecord {
            id: None,
            name: self.name,
            email: self.email,
            age: self.age,
        }
    }
}

/// DTO for partially updating an existing user.
///
/// Only provided fields are applied; everything else keeps its stored
/// value (merge semantics).
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateUser {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    pub email: Option<String>,
    pub age: Option<i32>,
}

impl UpdateUser {
    /// Whether the update carries no fields at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.age.is_none()
    }

    /// Build the partial `$set` body containing exactly the provided fields.
    pub fn to_document(&self) -> Document {
        let mut update = doc! {};

        if let Some(ref name) = self.name {
            update.insert("name", name.as_str());
        }
        if let Some(ref email) = self.email {
            update.insert("email", email.as_str());
        }
        if let Some(age) = self.age {
            update.insert("age", age);
        }

        update
    }
}

/// Query parameters for searching users by name.
#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
pub struct SearchParams {
    /// Substring to match against user names, case-insensitively
    pub name: String,
}

/// Response body for a successful delete.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeletedUser {
    pub message: String,
    pub deleted_user: User,
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson;

    #[test]
    fn test_record_serialization_omits_missing_id() {
        let record = CreateUser {
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            age: 30,
        }
        .into_record();

        let doc = bson::to_document(&record).unwrap();
        assert!(!doc.contains_key("_id"));
        assert_eq!(doc.get_str("name").unwrap(), "Alice");
        assert_eq!(doc.get_i32("age").unwrap(), 30);
    }

    #[test]
    fn test_record_deserialization_applies_defaults() {
        let oid = ObjectId::parse_str("507f1f77bcf86cd799439011").unwrap();
        let record: UserRecord = bson::from_document(doc! { "_id": oid }).unwrap();

        assert_eq!(record.id, Some(oid));
        assert_eq!(record.name, "");
        assert_eq!(record.email, "");
        assert_eq!(record.age, 0);
    }

    #[test]
    fn test_serializer_converts_object_id_to_hex() {
        let oid = ObjectId::parse_str("507f1f77bcf86cd799439011").unwrap();
        let record = UserRecord {
            id: Some(oid),
            name: "Bob".to_string(),
            email: "b@x.com".to_string(),
            age: 30,
        };

        let user: User = record.into();
        assert_eq!(user.id.as_deref(), Some("507f1f77bcf86cd799439011"));
        assert_eq!(user.name, "Bob");
    }

    #[test]
    fn test_update_document_contains_exactly_provided_fields() {
        let update = UpdateUser {
            name: Some("Bobby".to_string()),
            email: None,
            age: None,
        };

        let doc = update.to_document();
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.get_str("name").unwrap(), "Bobby");
    }

    #[test]
    fn test_update_is_empty() {
        assert!(UpdateUser::default().is_empty());
        assert!(!UpdateUser {
            age: Some(31),
            ..Default::default()
        }
        .is_empty());
    }

    #[test]
    fn test_create_user_rejects_empty_name() {
        let input = CreateUser {
            name: String::new(),
            email: "a@b.com".to_string(),
            age: 1,
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_create_user_accepts_any_email_text() {
        // Presence is the only email requirement
        let input = CreateUser {
            name: "Alice".to_string(),
            email: "not-an-email".to_string(),
            age: 1,
        };
        assert!(input.validate().is_ok());
    }
}
