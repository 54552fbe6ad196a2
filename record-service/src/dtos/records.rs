use crate::models::Record;
use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of create and update requests.
///
/// Any `id` or `createdon` sent by the client is ignored.
#[derive(Debug, Deserialize, Validate)]
pub struct RecordRequest {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: String,
    #[validate(length(min = 1, message = "Surname cannot be empty"))]
    pub surname: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RecordResponse {
    pub id: String,
    pub name: String,
    pub surname: String,
    pub createdon: String,
}

impl From<Record> for RecordResponse {
    fn from(record: Record) -> Self {
        Self {
            id: record.id.to_hex(),
            name: record.name,
            surname: record.surname,
            createdon: record.created_on.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// List envelope: `{"data": [...]}`, also when the store is empty.
#[derive(Debug, Serialize, Deserialize)]
pub struct RecordListResponse {
    pub data: Vec<RecordResponse>,
}

impl From<Vec<Record>> for RecordListResponse {
    fn from(records: Vec<Record>) -> Self {
        Self {
            data: records.into_iter().map(RecordResponse::from).collect(),
        }
    }
}
