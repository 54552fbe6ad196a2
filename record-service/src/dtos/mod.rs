pub mod records;
pub mod upload;

pub use records::{RecordListResponse, RecordRequest, RecordResponse};
pub use upload::UploadResponse;
