use chrono::{DateTime, SubsecRound, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// A persisted name/surname pair.
///
/// `id` and `created_on` are assigned once in [`Record::new`] and never
/// rewritten; updates only touch `name` and `surname`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Record {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub surname: String,
    #[serde(
        rename = "createdon",
        with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime"
    )]
    pub created_on: DateTime<Utc>,
}

impl Record {
    pub fn new(name: String, surname: String) -> Self {
        Self {
            id: ObjectId::new(),
            name,
            surname,
            // BSON datetimes hold milliseconds; truncate so the value we return
            // on create is the value later reads return.
            created_on: Utc::now().trunc_subsecs(3),
        }
    }
}
