use crate::models::Record;
use crate::services::query::{RecordFilter, RecordUpdate};
use async_trait::async_trait;
use service_core::error::AppError;

/// Persistence for records. One call per request, no retries.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn insert(&self, record: &Record) -> Result<(), AppError>;

    /// All records in the store's natural order.
    async fn list(&self) -> Result<Vec<Record>, AppError>;

    async fn find_one(&self, filter: &RecordFilter) -> Result<Option<Record>, AppError>;

    /// Returns `false` when no record matched the filter.
    async fn update_one(
        &self,
        filter: &RecordFilter,
        update: &RecordUpdate,
    ) -> Result<bool, AppError>;

    /// Returns `false` when no record matched the filter.
    async fn delete_one(&self, filter: &RecordFilter) -> Result<bool, AppError>;

    async fn health_check(&self) -> Result<(), AppError>;
}
