//! Tests for JsonFileStore persistence

use rstest::rstest;
use serde_json::json;
use tempfile::TempDir;

use brokerhub::infrastructure::traits::content_type_for;
use brokerhub::infrastructure::{JsonFileStore, RecordStore, ResourceKind, StoreError};

fn row(id: &str, name: &str) -> serde_json::Value {
    json!({ "id": id, "name": name })
}

#[test]
fn given_inserted_rows_when_store_is_reopened_then_rows_persist() {
    // Arrange
    let temp = TempDir::new().unwrap();
    {
        let store = JsonFileStore::new(temp.path());
        store.insert(ResourceKind::Companies, row("1", "Acme")).unwrap();
        store.insert(ResourceKind::Companies, row("2", "Globex")).unwrap();
    }

    // Act: a fresh instance over the same directory
    let store = JsonFileStore::new(temp.path());
    let rows = store.list(ResourceKind::Companies).unwrap();

    // Assert
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["name"], "Acme");
    assert_eq!(rows[1]["name"], "Globex");
}

#[test]
fn given_empty_directory_when_listing_then_empty_not_error() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let store = JsonFileStore::new(temp.path());

    // Act
    let rows = store.list(ResourceKind::Products).unwrap();

    // Assert
    assert!(rows.is_empty());
}

#[test]
fn given_duplicate_id_when_inserting_then_conflict_error() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let store = JsonFileStore::new(temp.path());
    store.insert(ResourceKind::Users, row("u1", "Alex")).unwrap();

    // Act
    let result = store.insert(ResourceKind::Users, row("u1", "Impostor"));

    // Assert
    assert!(matches!(result, Err(StoreError::Conflict { .. })));
}

#[test]
fn given_row_without_id_when_inserting_then_missing_id_error() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let store = JsonFileStore::new(temp.path());

    // Act
    let result = store.insert(ResourceKind::Users, json!({ "name": "no id" }));

    // Assert
    assert!(matches!(result, Err(StoreError::MissingId)));
}

#[test]
fn given_absent_id_when_updating_or_deleting_then_not_found_error() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let store = JsonFileStore::new(temp.path());

    // Act / Assert
    assert!(matches!(
        store.update(ResourceKind::Branches, "ghost", row("ghost", "x")),
        Err(StoreError::NotFound { .. })
    ));
    assert!(matches!(
        store.delete(ResourceKind::Branches, "ghost"),
        Err(StoreError::NotFound { .. })
    ));
}

#[test]
fn given_update_when_applied_then_row_is_replaced_not_merged() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let store = JsonFileStore::new(temp.path());
    store
        .insert(ResourceKind::Companies, json!({ "id": "1", "name": "Acme", "website": "a.example" }))
        .unwrap();

    // Act: the replacement row carries no website field
    store
        .update(ResourceKind::Companies, "1", row("1", "Acme Renamed"))
        .unwrap();

    // Assert
    let fetched = store.get(ResourceKind::Companies, "1").unwrap().unwrap();
    assert_eq!(fetched["name"], "Acme Renamed");
    assert!(fetched.get("website").is_none());
}

#[test]
fn given_corrupt_table_file_when_listing_then_malformed_error() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let store = JsonFileStore::new(temp.path());
    store.insert(ResourceKind::News, row("n1", "Launch")).unwrap();
    std::fs::write(temp.path().join("news.json"), "not json").unwrap();

    // Act
    let result = store.list(ResourceKind::News);

    // Assert
    assert!(matches!(result, Err(StoreError::Malformed { .. })));
}

#[test]
fn given_tables_when_written_then_each_lands_in_its_own_file() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let store = JsonFileStore::new(temp.path());

    // Act
    store.insert(ResourceKind::Companies, row("1", "Acme")).unwrap();
    store.insert(ResourceKind::Categories, row("c1", "Life")).unwrap();
    store.insert(ResourceKind::Events, row("e1", "Kickoff")).unwrap();

    // Assert: file names follow the remote table names
    assert!(temp.path().join("companies.json").exists());
    assert!(temp.path().join("product_categories.json").exists());
    assert!(temp.path().join("calendar_events.json").exists());
}

#[rstest]
#[case("rates.pdf", "application/pdf")]
#[case("logo.PNG", "image/png")]
#[case("photo.jpeg", "image/jpeg")]
#[case("table.xlsx", "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet")]
#[case("unknown.bin", "application/octet-stream")]
#[case("no_extension", "application/octet-stream")]
fn given_file_name_when_deriving_content_type_then_extension_decides(
    #[case] file_name: &str,
    #[case] expected: &str,
) {
    assert_eq!(content_type_for(file_name), expected);
}
