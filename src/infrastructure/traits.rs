//! Store boundary traits for testability
//!
//! These traits abstract the hosted backend (row storage and file storage),
//! allowing services to be tested with in-memory implementations. Rows cross
//! the boundary as JSON values shaped like the remote tables; the services
//! own the typed view.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use serde_json::Value;
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

/// Table identifier, doubling as the typed half of a cache key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Companies,
    CompanySpecifications,
    Categories,
    Products,
    Documents,
    Users,
    Branches,
    News,
    Events,
}

impl ResourceKind {
    /// Remote table name for this resource.
    pub fn table_name(&self) -> &'static str {
        match self {
            ResourceKind::Companies => "companies",
            ResourceKind::CompanySpecifications => "company_specifications",
            ResourceKind::Categories => "product_categories",
            ResourceKind::Products => "products",
            ResourceKind::Documents => "documents",
            ResourceKind::Users => "users",
            ResourceKind::Branches => "branches",
            ResourceKind::News => "news",
            ResourceKind::Events => "calendar_events",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table_name())
    }
}

/// Errors crossing the store boundary.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("store I/O error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed row in {table}: {source}")]
    Malformed {
        table: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("no {kind} row with id {id}")]
    NotFound { kind: ResourceKind, id: String },

    #[error("{kind} row with id {id} already exists")]
    Conflict { kind: ResourceKind, id: String },

    #[error("row has no string id field")]
    MissingId,
}

impl StoreError {
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Extract the `id` field of a row.
pub fn row_id(row: &Value) -> StoreResult<&str> {
    row.get("id")
        .and_then(Value::as_str)
        .ok_or(StoreError::MissingId)
}

/// Row storage abstraction (the hosted relational backend).
pub trait RecordStore: Send + Sync {
    /// All rows of a table, in insertion order.
    fn list(&self, kind: ResourceKind) -> StoreResult<Vec<Value>>;

    /// Single row by id, None if absent.
    fn get(&self, kind: ResourceKind, id: &str) -> StoreResult<Option<Value>>;

    /// Append a row. The row must carry a unique string `id`.
    fn insert(&self, kind: ResourceKind, row: Value) -> StoreResult<Value>;

    /// Replace the row with the same id. Errors if the id is absent.
    fn update(&self, kind: ResourceKind, id: &str, row: Value) -> StoreResult<Value>;

    /// Remove the row with the given id. Errors if the id is absent.
    fn delete(&self, kind: ResourceKind, id: &str) -> StoreResult<()>;
}

/// Result of a file upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    /// Location consumers can resolve (path or URL)
    pub url: String,
    /// Content type derived from the file name
    pub file_type: String,
    pub size: u64,
}

/// File storage abstraction (the hosted storage bucket).
pub trait FileStore: Send + Sync {
    /// Store bytes under a bucket, returning where they landed.
    fn upload(&self, bucket: &str, file_name: &str, bytes: &[u8]) -> StoreResult<StoredFile>;
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Record store persisting each table as one JSON array file under a data
/// directory. Stands in for the hosted backend in single-user CLI use.
#[derive(Debug)]
pub struct JsonFileStore {
    data_dir: PathBuf,
    // Serializes read-modify-write cycles within this process
    lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            lock: Mutex::new(()),
        }
    }

    fn table_path(&self, kind: ResourceKind) -> PathBuf {
        self.data_dir.join(format!("{}.json", kind.table_name()))
    }

    fn read_table(&self, kind: ResourceKind) -> StoreResult<Vec<Value>> {
        let path = self.table_path(kind);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let content = std::fs::read_to_string(&path)
            .map_err(|e| StoreError::io(format!("read {}", path.display()), e))?;
        serde_json::from_str(&content).map_err(|e| StoreError::Malformed {
            table: kind.table_name(),
            source: e,
        })
    }

    fn write_table(&self, kind: ResourceKind, rows: &[Value]) -> StoreResult<()> {
        std::fs::create_dir_all(&self.data_dir)
            .map_err(|e| StoreError::io(format!("create {}", self.data_dir.display()), e))?;
        let path = self.table_path(kind);
        let content = serde_json::to_string_pretty(rows).map_err(|e| StoreError::Malformed {
            table: kind.table_name(),
            source: e,
        })?;
        std::fs::write(&path, content)
            .map_err(|e| StoreError::io(format!("write {}", path.display()), e))
    }
}

impl RecordStore for JsonFileStore {
    fn list(&self, kind: ResourceKind) -> StoreResult<Vec<Value>> {
        let _guard = self.lock.lock().expect("store lock poisoned");
        self.read_table(kind)
    }

    fn get(&self, kind: ResourceKind, id: &str) -> StoreResult<Option<Value>> {
        let _guard = self.lock.lock().expect("store lock poisoned");
        let rows = self.read_table(kind)?;
        Ok(rows.into_iter().find(|row| row_id(row).ok() == Some(id)))
    }

    fn insert(&self, kind: ResourceKind, row: Value) -> StoreResult<Value> {
        let _guard = self.lock.lock().expect("store lock poisoned");
        let id = row_id(&row)?.to_string();
        let mut rows = self.read_table(kind)?;
        if rows.iter().any(|r| row_id(r).ok() == Some(id.as_str())) {
            return Err(StoreError::Conflict { kind, id });
        }
        rows.push(row.clone());
        self.write_table(kind, &rows)?;
        debug!(%kind, %id, "inserted row");
        Ok(row)
    }

    fn update(&self, kind: ResourceKind, id: &str, row: Value) -> StoreResult<Value> {
        let _guard = self.lock.lock().expect("store lock poisoned");
        let mut rows = self.read_table(kind)?;
        let slot = rows
            .iter_mut()
            .find(|r| row_id(r).ok() == Some(id))
            .ok_or_else(|| StoreError::NotFound {
                kind,
                id: id.to_string(),
            })?;
        *slot = row.clone();
        self.write_table(kind, &rows)?;
        debug!(%kind, %id, "updated row");
        Ok(row)
    }

    fn delete(&self, kind: ResourceKind, id: &str) -> StoreResult<()> {
        let _guard = self.lock.lock().expect("store lock poisoned");
        let mut rows = self.read_table(kind)?;
        let before = rows.len();
        rows.retain(|r| row_id(r).ok() != Some(id));
        if rows.len() == before {
            return Err(StoreError::NotFound {
                kind,
                id: id.to_string(),
            });
        }
        self.write_table(kind, &rows)?;
        debug!(%kind, %id, "deleted row");
        Ok(())
    }
}

/// File store writing uploads beneath a local directory, one subdirectory
/// per bucket. File names are prefixed with a UUID so repeated uploads of
/// the same name never collide.
#[derive(Debug)]
pub struct LocalFileStore {
    uploads_dir: PathBuf,
}

impl LocalFileStore {
    pub fn new(uploads_dir: impl Into<PathBuf>) -> Self {
        Self {
            uploads_dir: uploads_dir.into(),
        }
    }
}

impl FileStore for LocalFileStore {
    fn upload(&self, bucket: &str, file_name: &str, bytes: &[u8]) -> StoreResult<StoredFile> {
        let dir = self.uploads_dir.join(bucket);
        std::fs::create_dir_all(&dir)
            .map_err(|e| StoreError::io(format!("create {}", dir.display()), e))?;

        let stored_name = format!("{}-{}", Uuid::new_v4(), file_name);
        let path = dir.join(&stored_name);
        std::fs::write(&path, bytes)
            .map_err(|e| StoreError::io(format!("write {}", path.display()), e))?;

        debug!(bucket, file = %path.display(), "uploaded file");
        Ok(StoredFile {
            url: path.to_string_lossy().into_owned(),
            file_type: content_type_for(file_name).to_string(),
            size: bytes.len() as u64,
        })
    }
}

/// Content type from the file extension, octet-stream when unknown.
pub fn content_type_for(file_name: &str) -> &'static str {
    let ext = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("pdf") => "application/pdf",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("txt") => "text/plain",
        Some("csv") => "text/csv",
        Some("doc") => "application/msword",
        Some("docx") => {
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        }
        Some("xls") => "application/vnd.ms-excel",
        Some("xlsx") => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        _ => "application/octet-stream",
    }
}

// ============================================================
// TEST IMPLEMENTATIONS
// ============================================================

/// In-memory record store for tests. Counts `list` calls so cache behavior
/// can be asserted.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<HashMap<ResourceKind, Vec<Value>>>,
    list_calls: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `list` calls served so far.
    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }
}

impl RecordStore for MemoryStore {
    fn list(&self, kind: ResourceKind) -> StoreResult<Vec<Value>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        let tables = self.tables.lock().expect("store lock poisoned");
        Ok(tables.get(&kind).cloned().unwrap_or_default())
    }

    fn get(&self, kind: ResourceKind, id: &str) -> StoreResult<Option<Value>> {
        let tables = self.tables.lock().expect("store lock poisoned");
        Ok(tables
            .get(&kind)
            .and_then(|rows| rows.iter().find(|r| row_id(r).ok() == Some(id)).cloned()))
    }

    fn insert(&self, kind: ResourceKind, row: Value) -> StoreResult<Value> {
        let id = row_id(&row)?.to_string();
        let mut tables = self.tables.lock().expect("store lock poisoned");
        let rows = tables.entry(kind).or_default();
        if rows.iter().any(|r| row_id(r).ok() == Some(id.as_str())) {
            return Err(StoreError::Conflict { kind, id });
        }
        rows.push(row.clone());
        Ok(row)
    }

    fn update(&self, kind: ResourceKind, id: &str, row: Value) -> StoreResult<Value> {
        let mut tables = self.tables.lock().expect("store lock poisoned");
        let rows = tables.entry(kind).or_default();
        let slot = rows
            .iter_mut()
            .find(|r| row_id(r).ok() == Some(id))
            .ok_or_else(|| StoreError::NotFound {
                kind,
                id: id.to_string(),
            })?;
        *slot = row.clone();
        Ok(row)
    }

    fn delete(&self, kind: ResourceKind, id: &str) -> StoreResult<()> {
        let mut tables = self.tables.lock().expect("store lock poisoned");
        let rows = tables.entry(kind).or_default();
        let before = rows.len();
        rows.retain(|r| row_id(r).ok() != Some(id));
        if rows.len() == before {
            return Err(StoreError::NotFound {
                kind,
                id: id.to_string(),
            });
        }
        Ok(())
    }
}

/// In-memory file store for tests.
#[derive(Debug, Default)]
pub struct MemoryFileStore {
    files: Mutex<Vec<(String, String, Vec<u8>)>>,
}

impl MemoryFileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file_count(&self) -> usize {
        self.files.lock().expect("store lock poisoned").len()
    }
}

impl FileStore for MemoryFileStore {
    fn upload(&self, bucket: &str, file_name: &str, bytes: &[u8]) -> StoreResult<StoredFile> {
        let url = format!("memory://{bucket}/{file_name}");
        self.files.lock().expect("store lock poisoned").push((
            bucket.to_string(),
            file_name.to_string(),
            bytes.to_vec(),
        ));
        Ok(StoredFile {
            url,
            file_type: content_type_for(file_name).to_string(),
            size: bytes.len() as u64,
        })
    }
}
