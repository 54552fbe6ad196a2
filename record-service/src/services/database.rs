use crate::models::Record;
use crate::services::query::{RecordFilter, RecordUpdate};
use crate::services::store::RecordStore;
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, Client as MongoClient, Collection, Database};
use service_core::error::AppError;

/// MongoDB-backed record store. The driver pools connections internally, so
/// one clone of this is shared by every request.
#[derive(Clone)]
pub struct MongoDb {
    client: MongoClient,
    db: Database,
    collection: String,
}

impl MongoDb {
    pub async fn connect(uri: &str, database: &str, collection: &str) -> Result<Self, AppError> {
        tracing::info!(database = %database, "Connecting to MongoDB");
        let client = MongoClient::with_uri_str(uri).await.map_err(|e| {
            tracing::error!("Failed to connect to MongoDB: {}", e);
            AppError::from(e)
        })?;
        let db = client.database(database);

        let store = Self {
            client,
            db,
            collection: collection.to_string(),
        };

        // with_uri_str does not dial; ping so a bad URI fails at startup.
        store.health_check().await?;
        tracing::info!(database = %database, "Successfully connected to MongoDB database");

        Ok(store)
    }

    pub fn records(&self) -> Collection<Record> {
        self.db.collection(&self.collection)
    }

    pub fn client(&self) -> &MongoClient {
        &self.client
    }
}

#[async_trait]
impl RecordStore for MongoDb {
    async fn insert(&self, record: &Record) -> Result<(), AppError> {
        self.records().insert_one(record, None).await.map_err(|e| {
            tracing::error!(record_id = %record.id, "Failed to insert record: {}", e);
            AppError::from(e)
        })?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Record>, AppError> {
        let cursor = self.records().find(None, None).await.map_err(|e| {
            tracing::error!("Failed to list records: {}", e);
            AppError::from(e)
        })?;

        cursor.try_collect().await.map_err(|e| {
            tracing::error!("Failed to collect records: {}", e);
            AppError::from(e)
        })
    }

    async fn find_one(&self, filter: &RecordFilter) -> Result<Option<Record>, AppError> {
        self.records()
            .find_one(filter.to_document(), None)
            .await
            .map_err(|e| {
                tracing::error!(record_id = %filter.id(), "Failed to find record: {}", e);
                AppError::from(e)
            })
    }

    async fn update_one(
        &self,
        filter: &RecordFilter,
        update: &RecordUpdate,
    ) -> Result<bool, AppError> {
        let result = self
            .records()
            .update_one(filter.to_document(), update.to_document(), None)
            .await
            .map_err(|e| {
                tracing::error!(record_id = %filter.id(), "Failed to update record: {}", e);
                AppError::from(e)
            })?;
        Ok(result.matched_count > 0)
    }

    async fn delete_one(&self, filter: &RecordFilter) -> Result<bool, AppError> {
        let result = self
            .records()
            .delete_one(filter.to_document(), None)
            .await
            .map_err(|e| {
                tracing::error!(record_id = %filter.id(), "Failed to delete record: {}", e);
                AppError::from(e)
            })?;
        Ok(result.deleted_count > 0)
    }

    async fn health_check(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                AppError::from(e)
            })?;
        Ok(())
    }
}
