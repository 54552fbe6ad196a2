pub mod database;
pub mod memory;
pub mod metrics;
pub mod query;
pub mod storage;
pub mod store;

pub use database::MongoDb;
pub use memory::InMemoryRecordStore;
pub use self::metrics::{get_metrics, init_metrics};
pub use query::{parse_record_id, RecordFilter, RecordUpdate};
pub use storage::{LocalStorage, Storage};
pub use store::RecordStore;
