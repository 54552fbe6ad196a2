pub mod health;
pub mod metrics;
pub mod records;
pub mod upload;

pub use health::{health_check, index, readiness_check};
pub use records::{create_record, delete_record, get_record, list_records, update_record};
pub use upload::upload_file;
