mod config;
mod storage;

pub use self::config::{AppConfig, DEFAULT_CELEBRATION_MS};
pub use self::storage::StorageFile;
