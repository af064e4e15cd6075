pub mod config;
pub mod paths;
pub mod storage;

pub use crate::config::{AdminConfig, ApiConfig, LoggingConfig};
pub use crate::paths::AdminPaths;
pub use crate::storage::FileKeyValueStore;
