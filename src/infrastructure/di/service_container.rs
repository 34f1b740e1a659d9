//! Service container for dependency injection
//!
//! Wires up all services with their dependencies. All services share one
//! record store, one file store and one query cache.

use std::sync::Arc;

use crate::application::services::{
    CatalogService, ContentService, DirectoryService, DocumentService,
};
use crate::config::Settings;
use crate::infrastructure::cache::QueryCache;
use crate::infrastructure::traits::{FileStore, JsonFileStore, LocalFileStore, RecordStore};

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Shared query cache
    pub cache: Arc<QueryCache>,

    pub catalog: CatalogService,
    pub directory: DirectoryService,
    pub content: ContentService,
    pub documents: DocumentService,
}

impl ServiceContainer {
    /// Create a new service container with the JSON file stores.
    pub fn new(settings: Settings) -> Self {
        let store = Arc::new(JsonFileStore::new(&settings.data_dir));
        let files = Arc::new(LocalFileStore::new(&settings.uploads_dir));
        Self::with_deps(settings, store, files)
    }

    /// Create a service container with custom stores (for testing).
    pub fn with_deps(
        settings: Settings,
        store: Arc<dyn RecordStore>,
        files: Arc<dyn FileStore>,
    ) -> Self {
        let settings = Arc::new(settings);
        let cache = Arc::new(QueryCache::new());

        Self {
            catalog: CatalogService::new(store.clone(), cache.clone()),
            directory: DirectoryService::new(store.clone(), cache.clone()),
            content: ContentService::new(store.clone(), cache.clone()),
            documents: DocumentService::new(store, files, cache.clone()),
            settings,
            cache,
        }
    }
}
