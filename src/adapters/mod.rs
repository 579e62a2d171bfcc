// Adapters layer: concrete implementations for external systems (GitHub REST, local filesystem).

pub mod http;
pub mod storage;

pub use http::ReleaseClient;
pub use storage::LocalStorage;
