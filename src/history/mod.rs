pub mod manager;
pub mod storage;

pub use manager::{SearchHistory, filter_entries, push_recent};
pub use storage::{JsonFileStore, KeyValueStore, MemoryStore, StorageError};
