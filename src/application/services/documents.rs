//! Document service: records plus file uploads
//!
//! Creating a document is a two-step remote operation: upload the bytes to
//! the file store, then insert the record carrying the stored file's
//! location. There is no compensating action; if the insert fails the
//! uploaded file stays behind.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::application::services::{cached_list, encode, matches_search};
use crate::application::ApplicationResult;
use crate::domain::{Document, DomainError};
use crate::infrastructure::cache::QueryCache;
use crate::infrastructure::traits::{FileStore, RecordStore, ResourceKind};

/// Storage bucket for document uploads.
const DOCUMENTS_BUCKET: &str = "documents";

#[derive(Debug, Clone)]
pub struct NewDocument {
    pub title: String,
    pub description: Option<String>,
    pub category_id: String,
    pub company_id: Option<String>,
    pub product_id: Option<String>,
    pub product_category_id: Option<String>,
    pub product_subcategory_id: Option<String>,
    pub tags: Vec<String>,
    pub uploaded_by: String,
    /// Original file name, used for the stored name and content type
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Default)]
pub struct DocumentFilter {
    /// Substring match on the title, case-insensitive
    pub search: Option<String>,
    pub category_id: Option<String>,
    pub company_id: Option<String>,
    pub product_id: Option<String>,
}

/// Service for document records and their uploaded files.
pub struct DocumentService {
    store: Arc<dyn RecordStore>,
    files: Arc<dyn FileStore>,
    cache: Arc<QueryCache>,
}

impl DocumentService {
    pub fn new(
        store: Arc<dyn RecordStore>,
        files: Arc<dyn FileStore>,
        cache: Arc<QueryCache>,
    ) -> Self {
        Self {
            store,
            files,
            cache,
        }
    }

    pub fn list_documents(&self, filter: &DocumentFilter) -> ApplicationResult<Vec<Document>> {
        let documents: Vec<Document> =
            cached_list(self.store.as_ref(), &self.cache, ResourceKind::Documents)?;
        Ok(documents
            .into_iter()
            .filter(|d| {
                filter
                    .search
                    .as_deref()
                    .map(|s| matches_search(&d.title, s))
                    .unwrap_or(true)
                    && filter
                        .category_id
                        .as_deref()
                        .map(|c| d.category_id == c)
                        .unwrap_or(true)
                    && filter
                        .company_id
                        .as_deref()
                        .map(|c| d.company_id.as_deref() == Some(c))
                        .unwrap_or(true)
                    && filter
                        .product_id
                        .as_deref()
                        .map(|p| d.product_id.as_deref() == Some(p))
                        .unwrap_or(true)
            })
            .collect())
    }

    /// Upload the file, then insert the record referencing it.
    #[instrument(level = "debug", skip(self, input))]
    pub fn create_document(&self, input: NewDocument) -> ApplicationResult<Document> {
        if input.title.trim().is_empty() {
            return Err(DomainError::EmptyField { field: "title" }.into());
        }
        if input.file_name.trim().is_empty() {
            return Err(DomainError::EmptyField { field: "file_name" }.into());
        }

        let stored = self
            .files
            .upload(DOCUMENTS_BUCKET, &input.file_name, &input.bytes)?;
        debug!(url = %stored.url, size = stored.size, "file uploaded");

        let document = Document {
            id: Uuid::new_v4().to_string(),
            title: input.title,
            description: input.description,
            category_id: input.category_id,
            company_id: input.company_id,
            product_id: input.product_id,
            product_category_id: input.product_category_id,
            product_subcategory_id: input.product_subcategory_id,
            file_url: stored.url,
            file_type: stored.file_type,
            file_size: stored.size,
            tags: input.tags,
            uploaded_by: input.uploaded_by,
            uploaded_at: Utc::now(),
        };
        let row = encode(ResourceKind::Documents, &document)?;
        self.store.insert(ResourceKind::Documents, row)?;
        self.cache.invalidate_kind(ResourceKind::Documents);
        debug!(id = %document.id, "document created");
        Ok(document)
    }

    /// Delete the record. The stored file is left in place.
    #[instrument(level = "debug", skip(self))]
    pub fn delete_document(&self, id: &str) -> ApplicationResult<()> {
        self.store.delete(ResourceKind::Documents, id)?;
        self.cache.invalidate_kind(ResourceKind::Documents);
        Ok(())
    }
}
