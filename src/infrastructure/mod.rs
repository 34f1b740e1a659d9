//! Infrastructure layer: store implementations, cache and DI container

pub mod cache;
pub mod di;
pub mod error;
pub mod traits;

pub use cache::{QueryCache, QueryKey};
pub use error::{InfraError, InfraResult};
pub use traits::{
    FileStore, JsonFileStore, LocalFileStore, MemoryFileStore, MemoryStore, RecordStore,
    ResourceKind, StoreError, StoreResult, StoredFile,
};
