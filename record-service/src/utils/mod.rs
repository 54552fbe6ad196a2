pub mod record_id;
pub mod validation;

pub use record_id::RecordId;
pub use validation::ValidatedJson;
