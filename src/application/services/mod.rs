//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on the store boundary traits (RecordStore, FileStore)
//! and share one query cache, but are themselves concrete structs.

mod catalog;
mod content;
mod directory;
mod documents;

pub use catalog::{
    CatalogService, CategoryPatch, NewCategory, NewProduct, ProductFilter, ProductPatch,
};
pub use content::{
    ContentService, EventFilter, EventPatch, NewEvent, NewNewsPost, NewsFilter, NewsPatch,
};
pub use directory::{
    BranchPatch, CompanyFilter, CompanyPatch, DirectoryService, NewBranch, NewCompany,
    NewSpecification, NewUser, UserFilter, UserPatch,
};
pub use documents::{DocumentFilter, DocumentService, NewDocument};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::application::{ApplicationError, ApplicationResult};
use crate::infrastructure::cache::{QueryCache, QueryKey};
use crate::infrastructure::traits::{RecordStore, ResourceKind};

/// List a table through the cache, decoding rows into typed records.
///
/// Cache hit serves the stored rows; miss fetches from the store and
/// populates the list key before decoding.
pub(crate) fn cached_list<T: DeserializeOwned>(
    store: &dyn RecordStore,
    cache: &QueryCache,
    kind: ResourceKind,
) -> ApplicationResult<Vec<T>> {
    let key = QueryKey::list(kind);
    let rows = match cache.get(&key) {
        Some(Value::Array(rows)) => {
            tracing::debug!(%kind, "cache hit");
            rows
        }
        _ => {
            tracing::debug!(%kind, "cache miss, fetching");
            let rows = store.list(kind)?;
            cache.put(key, Value::Array(rows.clone()));
            rows
        }
    };
    rows.into_iter().map(|row| decode(kind, row)).collect()
}

pub(crate) fn decode<T: DeserializeOwned>(kind: ResourceKind, row: Value) -> ApplicationResult<T> {
    serde_json::from_value(row).map_err(|source| ApplicationError::Decode { kind, source })
}

/// Fetch a single row by id, erroring when it does not exist.
pub(crate) fn fetch<T: DeserializeOwned>(
    store: &dyn RecordStore,
    kind: ResourceKind,
    id: &str,
) -> ApplicationResult<T> {
    let row = store.get(kind, id)?.ok_or_else(|| {
        ApplicationError::Domain(crate::domain::DomainError::RecordNotFound {
            kind: kind.table_name(),
            id: id.to_string(),
        })
    })?;
    decode(kind, row)
}

pub(crate) fn encode<T: Serialize>(kind: ResourceKind, record: &T) -> ApplicationResult<Value> {
    serde_json::to_value(record).map_err(|source| ApplicationError::Encode { kind, source })
}

/// Case-insensitive substring match used by every list filter.
pub(crate) fn matches_search(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
