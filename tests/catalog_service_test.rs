//! Tests for CatalogService: categories, products and cache behavior

use std::sync::Arc;

use brokerhub::application::services::{
    CategoryPatch, NewCategory, NewProduct, ProductFilter, ProductPatch,
};
use brokerhub::application::ApplicationError;
use brokerhub::config::Settings;
use brokerhub::domain::{DomainError, ProductStatus};
use brokerhub::infrastructure::di::ServiceContainer;
use brokerhub::infrastructure::{MemoryFileStore, MemoryStore};

fn setup() -> (Arc<MemoryStore>, ServiceContainer) {
    brokerhub::util::testing::init_test_setup();
    let store = Arc::new(MemoryStore::new());
    let container = ServiceContainer::with_deps(
        Settings::default(),
        store.clone(),
        Arc::new(MemoryFileStore::new()),
    );
    (store, container)
}

fn new_category(name: &str, parent_id: Option<&str>) -> NewCategory {
    NewCategory {
        name: name.to_string(),
        parent_id: parent_id.map(String::from),
        description: None,
    }
}

fn new_product(name: &str, category_id: &str) -> NewProduct {
    NewProduct {
        name: name.to_string(),
        category_id: category_id.to_string(),
        subcategory_id: None,
        company_id: "acme".to_string(),
        description: None,
        status: ProductStatus::Active,
        strengths: None,
        weaknesses: None,
        processes: None,
        tags: vec![],
        author: "tester".to_string(),
    }
}

// ============================================================
// Cache behavior
// ============================================================

#[test]
fn given_repeated_list_when_nothing_changed_then_store_is_hit_once() {
    // Arrange
    let (store, container) = setup();
    container
        .catalog
        .create_category(new_category("Life", None))
        .unwrap();
    let calls_after_create = store.list_calls();

    // Act
    container.catalog.list_categories().unwrap();
    container.catalog.list_categories().unwrap();
    container.catalog.list_categories().unwrap();

    // Assert: only the first list after the mutation reaches the store
    assert_eq!(store.list_calls(), calls_after_create + 1);
}

#[test]
fn given_cached_list_when_category_created_then_next_list_refetches() {
    // Arrange
    let (store, container) = setup();
    container.catalog.list_categories().unwrap();
    let baseline = store.list_calls();

    // Act
    container
        .catalog
        .create_category(new_category("Auto", None))
        .unwrap();
    let listed = container.catalog.list_categories().unwrap();

    // Assert
    assert_eq!(store.list_calls(), baseline + 1);
    assert_eq!(listed.len(), 1);
}

#[test]
fn given_cached_rows_when_forest_rebuilt_then_no_extra_store_reads() {
    // Arrange
    let (store, container) = setup();
    container
        .catalog
        .create_category(new_category("Life", None))
        .unwrap();
    container.catalog.category_forest().unwrap();
    let baseline = store.list_calls();

    // Act: the forest is reassembled per call, but from cached rows
    container.catalog.category_forest().unwrap();
    container.catalog.category_forest().unwrap();

    // Assert
    assert_eq!(store.list_calls(), baseline);
}

#[test]
fn given_cached_product_record_when_product_updated_then_record_key_is_dropped() {
    // Arrange
    let (_, container) = setup();
    let product = container
        .catalog
        .create_product(new_product("Term 20", "life"))
        .unwrap();
    container.catalog.get_product(&product.id).unwrap();

    // Act
    container
        .catalog
        .update_product(
            &product.id,
            ProductPatch {
                name: Some("Term 30".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
    let fetched = container.catalog.get_product(&product.id).unwrap();

    // Assert: a stale record key would still say "Term 20"
    assert_eq!(fetched.name, "Term 30");
}

// ============================================================
// Categories
// ============================================================

#[test]
fn given_parent_and_child_when_building_forest_then_child_is_nested() {
    // Arrange
    let (_, container) = setup();
    let parent = container
        .catalog
        .create_category(new_category("Life", None))
        .unwrap();
    container
        .catalog
        .create_category(new_category("Term Life", Some(&parent.id)))
        .unwrap();

    // Act
    let nested = container.catalog.category_forest().unwrap().to_nested();

    // Assert
    assert_eq!(nested.len(), 1);
    assert_eq!(nested[0].name, "Life");
    assert_eq!(nested[0].children.len(), 1);
    assert_eq!(nested[0].children[0].name, "Term Life");
}

#[test]
fn given_blank_name_when_creating_category_then_empty_field_error() {
    // Arrange
    let (_, container) = setup();

    // Act
    let result = container.catalog.create_category(new_category("   ", None));

    // Assert
    assert!(matches!(
        result,
        Err(ApplicationError::Domain(DomainError::EmptyField {
            field: "name"
        }))
    ));
}

#[test]
fn given_category_when_detached_via_patch_then_it_becomes_a_root() {
    // Arrange
    let (_, container) = setup();
    let parent = container
        .catalog
        .create_category(new_category("Life", None))
        .unwrap();
    let child = container
        .catalog
        .create_category(new_category("Term", Some(&parent.id)))
        .unwrap();

    // Act: parent_id = Some(None) clears the reference
    container
        .catalog
        .update_category(
            &child.id,
            CategoryPatch {
                parent_id: Some(None),
                ..Default::default()
            },
        )
        .unwrap();

    // Assert
    let forest = container.catalog.category_forest().unwrap();
    assert_eq!(forest.roots().len(), 2);
}

#[test]
fn given_self_parent_patch_when_updating_then_parent_is_unchanged() {
    // Arrange
    let (_, container) = setup();
    let category = container
        .catalog
        .create_category(new_category("Life", None))
        .unwrap();

    // Act
    let updated = container
        .catalog
        .update_category(
            &category.id,
            CategoryPatch {
                parent_id: Some(Some(category.id.clone())),
                ..Default::default()
            },
        )
        .unwrap();

    // Assert
    assert_eq!(updated.parent_id, None);
}

#[test]
fn given_deleted_parent_when_rebuilding_forest_then_children_surface_as_roots() {
    // Arrange
    let (_, container) = setup();
    let parent = container
        .catalog
        .create_category(new_category("Life", None))
        .unwrap();
    let child = container
        .catalog
        .create_category(new_category("Term", Some(&parent.id)))
        .unwrap();

    // Act
    container.catalog.delete_category(&parent.id).unwrap();

    // Assert: the child keeps its dangling parent_id but reads as a root
    let forest = container.catalog.category_forest().unwrap();
    assert_eq!(forest.len(), 1);
    let roots: Vec<&str> = forest
        .roots()
        .iter()
        .map(|&idx| forest[idx].record.id.as_str())
        .collect();
    assert_eq!(roots, vec![child.id.as_str()]);
}

#[test]
fn given_missing_category_when_updating_then_not_found_error() {
    // Arrange
    let (_, container) = setup();

    // Act
    let result = container
        .catalog
        .update_category("no-such-id", CategoryPatch::default());

    // Assert
    assert!(matches!(
        result,
        Err(ApplicationError::Domain(DomainError::RecordNotFound { .. }))
    ));
}

// ============================================================
// Products
// ============================================================

#[test]
fn given_products_when_filtering_by_search_then_name_and_description_match() {
    // Arrange
    let (_, container) = setup();
    container
        .catalog
        .create_product(new_product("Term Life 20", "life"))
        .unwrap();
    let mut with_description = new_product("Umbrella", "liability");
    with_description.description = Some("covers TERM liabilities".to_string());
    container.catalog.create_product(with_description).unwrap();
    container
        .catalog
        .create_product(new_product("Auto Basic", "auto"))
        .unwrap();

    // Act: case-insensitive, matches name or description
    let found = container
        .catalog
        .list_products(&ProductFilter {
            search: Some("term".to_string()),
            ..Default::default()
        })
        .unwrap();

    // Assert
    assert_eq!(found.len(), 2);
}

#[test]
fn given_category_filter_when_listing_then_subcategory_reference_also_matches() {
    // Arrange
    let (_, container) = setup();
    let mut product = new_product("Term Life", "life");
    product.subcategory_id = Some("term".to_string());
    container.catalog.create_product(product).unwrap();
    container
        .catalog
        .create_product(new_product("Auto Basic", "auto"))
        .unwrap();

    // Act
    let by_category = container
        .catalog
        .list_products(&ProductFilter {
            category_id: Some("life".to_string()),
            ..Default::default()
        })
        .unwrap();
    let by_subcategory = container
        .catalog
        .list_products(&ProductFilter {
            category_id: Some("term".to_string()),
            ..Default::default()
        })
        .unwrap();

    // Assert
    assert_eq!(by_category.len(), 1);
    assert_eq!(by_subcategory.len(), 1);
    assert_eq!(by_category[0].id, by_subcategory[0].id);
}

#[test]
fn given_status_filter_when_listing_then_only_matching_products_remain() {
    // Arrange
    let (_, container) = setup();
    container
        .catalog
        .create_product(new_product("Active One", "life"))
        .unwrap();
    let mut pending = new_product("Pending One", "life");
    pending.status = ProductStatus::Pending;
    container.catalog.create_product(pending).unwrap();

    // Act
    let found = container
        .catalog
        .list_products(&ProductFilter {
            status: Some(ProductStatus::Pending),
            ..Default::default()
        })
        .unwrap();

    // Assert
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Pending One");
}

#[test]
fn given_product_when_patched_then_unset_fields_are_preserved() {
    // Arrange
    let (_, container) = setup();
    let mut input = new_product("Term Life", "life");
    input.strengths = Some("cheap".to_string());
    let product = container.catalog.create_product(input).unwrap();

    // Act
    let updated = container
        .catalog
        .update_product(
            &product.id,
            ProductPatch {
                status: Some(ProductStatus::Inactive),
                ..Default::default()
            },
        )
        .unwrap();

    // Assert
    assert_eq!(updated.status, ProductStatus::Inactive);
    assert_eq!(updated.name, "Term Life");
    assert_eq!(updated.strengths.as_deref(), Some("cheap"));
    assert!(updated.updated_at >= product.updated_at);
}
