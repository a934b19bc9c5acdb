mod api;
mod storage;

pub use api::{ApiError, ErrorMessage};
pub use storage::StorageError;
