pub mod client;
pub mod query;

pub use client::{normalize_response, FetchResult, HealthApiClient};
pub use query::{RecordQuery, FILE_PATH_REQUIRED};
