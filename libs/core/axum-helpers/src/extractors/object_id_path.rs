//! ObjectId path parameter extractor with automatic validation.

use crate::errors::{error_response, ErrorCode};
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use mongodb::bson::oid::ObjectId;

/// Extractor for BSON ObjectId path parameters.
///
/// The stored identifier type is an [`ObjectId`], but it travels over the
/// API as a hex string. This extractor performs the fallible string →
/// ObjectId conversion in one place, returning a structured 400 response
/// when the path segment is not a valid ObjectId.
///
/// # Example
/// ```ignore
/// use axum::Router;
/// use axum::routing::put;
/// use axum_helpers::extractors::ObjectIdPath;
///
/// async fn update_user(ObjectIdPath(id): ObjectIdPath) -> String {
///     format!("User ID: {}", id.to_hex())
/// }
///
/// let app = Router::new().route("/users/{id}", put(update_user));
/// ```
pub struct ObjectIdPath(pub ObjectId);

impl<S> FromRequestParts<S> for ObjectIdPath
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| e.into_response())?;

        match ObjectId::parse_str(&id) {
            Ok(oid) => Ok(ObjectIdPath(oid)),
            Err(_) => Err(error_response(
                StatusCode::BAD_REQUEST,
                format!("Invalid object id: {}", id),
                ErrorCode::InvalidObjectId,
            )),
        }
    }
}
