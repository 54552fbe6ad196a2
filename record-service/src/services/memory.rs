use crate::models::Record;
use crate::services::query::{RecordFilter, RecordUpdate};
use crate::services::store::RecordStore;
use async_trait::async_trait;
use service_core::error::AppError;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-process record store. Keeps insertion order, which is what `list`
/// returns. Used by tests and by `RECORD_STORE_BACKEND=memory`.
#[derive(Clone, Default)]
pub struct InMemoryRecordStore {
    records: Arc<RwLock<Vec<Record>>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn insert(&self, record: &Record) -> Result<(), AppError> {
        let mut records = self.records.write().await;
        if records.iter().any(|r| r.id == record.id) {
            return Err(AppError::DatabaseError(anyhow::anyhow!(
                "duplicate key: {}",
                record.id
            )));
        }
        records.push(record.clone());
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Record>, AppError> {
        Ok(self.records.read().await.clone())
    }

    async fn find_one(&self, filter: &RecordFilter) -> Result<Option<Record>, AppError> {
        let records = self.records.read().await;
        Ok(records.iter().find(|r| filter.matches(r)).cloned())
    }

    async fn update_one(
        &self,
        filter: &RecordFilter,
        update: &RecordUpdate,
    ) -> Result<bool, AppError> {
        let mut records = self.records.write().await;
        match records.iter_mut().find(|r| filter.matches(r)) {
            Some(record) => {
                update.apply(record);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_one(&self, filter: &RecordFilter) -> Result<bool, AppError> {
        let mut records = self.records.write().await;
        match records.iter().position(|r| filter.matches(r)) {
            Some(index) => {
                records.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn health_check(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;

    fn record(name: &str) -> Record {
        Record::new(name.to_string(), "Surname".to_string())
    }

    #[tokio::test]
    async fn list_preserves_insertion_order() {
        let store = InMemoryRecordStore::new();
        let first = record("first");
        let second = record("second");
        store.insert(&first).await.unwrap();
        store.insert(&second).await.unwrap();

        let names: Vec<_> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["first", "second"]);
    }

    #[tokio::test]
    async fn duplicate_ids_are_rejected() {
        let store = InMemoryRecordStore::new();
        let r = record("dup");
        store.insert(&r).await.unwrap();
        assert!(matches!(
            store.insert(&r).await,
            Err(AppError::DatabaseError(_))
        ));
    }

    #[tokio::test]
    async fn update_and_delete_report_missing_records() {
        let store = InMemoryRecordStore::new();
        let missing = RecordFilter::by_id(ObjectId::new());

        let updated = store
            .update_one(&missing, &RecordUpdate::set_name_surname("x", "y"))
            .await
            .unwrap();
        assert!(!updated);
        assert!(!store.delete_one(&missing).await.unwrap());
    }

    #[tokio::test]
    async fn delete_removes_only_the_matching_record() {
        let store = InMemoryRecordStore::new();
        let keep = record("keep");
        let gone = record("gone");
        store.insert(&keep).await.unwrap();
        store.insert(&gone).await.unwrap();

        assert!(store.delete_one(&RecordFilter::by_id(gone.id)).await.unwrap());

        let remaining = store.list().await.unwrap();
        assert_eq!(remaining, vec![keep]);
    }
}
