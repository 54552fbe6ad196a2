//! Typed filters and updates for the records collection.
//!
//! These are the only query shapes the service issues; there is no way to
//! pass an arbitrary document through to the store.

use crate::models::Record;
use mongodb::bson::{doc, oid::ObjectId, Document};
use service_core::error::AppError;

/// Parse a path segment into a record id.
pub fn parse_record_id(raw: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(raw).map_err(|_| AppError::InvalidIdentifier(raw.to_string()))
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordFilter {
    id: ObjectId,
}

impl RecordFilter {
    pub fn by_id(id: ObjectId) -> Self {
        Self { id }
    }

    pub fn id(&self) -> &ObjectId {
        &self.id
    }

    pub fn matches(&self, record: &Record) -> bool {
        record.id == self.id
    }

    pub fn to_document(&self) -> Document {
        doc! { "_id": self.id }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordUpdate {
    name: String,
    surname: String,
}

impl RecordUpdate {
    pub fn set_name_surname(name: impl Into<String>, surname: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            surname: surname.into(),
        }
    }

    pub fn apply(&self, record: &mut Record) {
        record.name.clone_from(&self.name);
        record.surname.clone_from(&self.surname);
    }

    pub fn to_document(&self) -> Document {
        doc! { "$set": { "name": self.name.as_str(), "surname": self.surname.as_str() } }
    }
}
