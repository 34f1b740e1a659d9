//! Tests for DocumentService: upload-then-insert flow

use std::sync::Arc;

use brokerhub::application::services::{DocumentFilter, NewDocument};
use brokerhub::application::ApplicationError;
use brokerhub::config::Settings;
use brokerhub::domain::DomainError;
use brokerhub::infrastructure::di::ServiceContainer;
use brokerhub::infrastructure::{FileStore, LocalFileStore, MemoryFileStore, MemoryStore};
use tempfile::TempDir;

fn setup() -> (Arc<MemoryFileStore>, ServiceContainer) {
    brokerhub::util::testing::init_test_setup();
    let files = Arc::new(MemoryFileStore::new());
    let container = ServiceContainer::with_deps(
        Settings::default(),
        Arc::new(MemoryStore::new()),
        files.clone(),
    );
    (files, container)
}

fn new_document(title: &str, file_name: &str) -> NewDocument {
    NewDocument {
        title: title.to_string(),
        description: None,
        category_id: "brochures".to_string(),
        company_id: None,
        product_id: None,
        product_category_id: None,
        product_subcategory_id: None,
        tags: vec![],
        uploaded_by: "uploader".to_string(),
        file_name: file_name.to_string(),
        bytes: b"content".to_vec(),
    }
}

#[test]
fn given_new_document_when_created_then_file_is_stored_and_record_references_it() {
    // Arrange
    let (files, container) = setup();

    // Act
    let document = container
        .documents
        .create_document(new_document("Rate Sheet", "rates.pdf"))
        .unwrap();

    // Assert
    assert_eq!(files.file_count(), 1);
    assert_eq!(document.file_type, "application/pdf");
    assert_eq!(document.file_size, 7);
    assert!(document.file_url.contains("rates.pdf"));

    let listed = container
        .documents
        .list_documents(&DocumentFilter::default())
        .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, document.id);
}

#[test]
fn given_blank_title_when_creating_document_then_nothing_is_uploaded() {
    // Arrange
    let (files, container) = setup();

    // Act
    let result = container
        .documents
        .create_document(new_document("  ", "rates.pdf"));

    // Assert: validation happens before the upload
    assert!(matches!(
        result,
        Err(ApplicationError::Domain(DomainError::EmptyField {
            field: "title"
        }))
    ));
    assert_eq!(files.file_count(), 0);
}

#[test]
fn given_document_when_deleted_then_stored_file_is_kept() {
    // Arrange
    let (files, container) = setup();
    let document = container
        .documents
        .create_document(new_document("Rate Sheet", "rates.pdf"))
        .unwrap();

    // Act
    container.documents.delete_document(&document.id).unwrap();

    // Assert: the record is gone, the uploaded bytes stay
    let listed = container
        .documents
        .list_documents(&DocumentFilter::default())
        .unwrap();
    assert!(listed.is_empty());
    assert_eq!(files.file_count(), 1);
}

#[test]
fn given_documents_when_filtering_by_company_then_only_its_documents_remain() {
    // Arrange
    let (_, container) = setup();
    let mut acme_doc = new_document("Acme Brochure", "acme.pdf");
    acme_doc.company_id = Some("acme".to_string());
    container.documents.create_document(acme_doc).unwrap();
    container
        .documents
        .create_document(new_document("Generic", "generic.pdf"))
        .unwrap();

    // Act
    let found = container
        .documents
        .list_documents(&DocumentFilter {
            company_id: Some("acme".to_string()),
            ..Default::default()
        })
        .unwrap();

    // Assert
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].title, "Acme Brochure");
}

#[test]
fn given_local_file_store_when_uploading_same_name_twice_then_paths_differ() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let store = LocalFileStore::new(temp.path());

    // Act
    let first = store.upload("documents", "rates.pdf", b"one").unwrap();
    let second = store.upload("documents", "rates.pdf", b"two").unwrap();

    // Assert
    assert_ne!(first.url, second.url);
    assert!(std::path::Path::new(&first.url).exists());
    assert!(std::path::Path::new(&second.url).exists());
}
