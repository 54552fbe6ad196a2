use crate::services::parse_record_id;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use mongodb::bson::oid::ObjectId;
use service_core::error::AppError;

/// Record id taken from the `:id` path segment.
///
/// Runs before any body extractor, so a malformed id is reported as such
/// even when the body is also bad, and no store call is made.
#[derive(Debug, Clone, Copy)]
pub struct RecordId(pub ObjectId);

#[axum::async_trait]
impl<S> FromRequestParts<S> for RecordId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(anyhow::anyhow!(e.body_text())))?;

        Ok(RecordId(parse_record_id(&raw)?))
    }
}
