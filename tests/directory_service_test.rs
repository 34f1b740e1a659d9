//! Tests for DirectoryService: companies, specifications, branches, users

use std::sync::Arc;

use brokerhub::application::services::{
    CompanyFilter, CompanyPatch, NewBranch, NewCompany, NewSpecification, NewUser, UserFilter,
};
use brokerhub::application::ApplicationError;
use brokerhub::config::Settings;
use brokerhub::domain::DomainError;
use brokerhub::infrastructure::di::ServiceContainer;
use brokerhub::infrastructure::{MemoryFileStore, MemoryStore};

fn setup() -> ServiceContainer {
    brokerhub::util::testing::init_test_setup();
    ServiceContainer::with_deps(
        Settings::default(),
        Arc::new(MemoryStore::new()),
        Arc::new(MemoryFileStore::new()),
    )
}

fn new_company(name: &str, classification: Option<&str>) -> NewCompany {
    NewCompany {
        name: name.to_string(),
        classification: classification.map(String::from),
        contact_email: None,
        website: None,
        logo: None,
        agent_access_url: None,
    }
}

fn new_branch(name: &str, city: &str) -> NewBranch {
    NewBranch {
        name: name.to_string(),
        address: "1 Main St".to_string(),
        city: city.to_string(),
        province: "ON".to_string(),
        postal_code: "A1A 1A1".to_string(),
        contact_person: "Pat".to_string(),
        email: "branch@example.com".to_string(),
        phone: None,
        website: None,
    }
}

fn new_user(name: &str, email: &str, role: &str) -> NewUser {
    NewUser {
        name: name.to_string(),
        email: email.to_string(),
        role: role.to_string(),
        kind: "employee".to_string(),
        position: None,
        extension: None,
        social_contact: None,
        branch_id: None,
        avatar: None,
    }
}

// ============================================================
// Companies
// ============================================================

#[test]
fn given_companies_when_filtering_by_search_then_match_is_case_insensitive() {
    // Arrange
    let container = setup();
    container
        .directory
        .create_company(new_company("Great-West Life", Some("life")))
        .unwrap();
    container
        .directory
        .create_company(new_company("Intact", Some("property")))
        .unwrap();

    // Act
    let found = container
        .directory
        .list_companies(&CompanyFilter {
            search: Some("great".to_string()),
            ..Default::default()
        })
        .unwrap();

    // Assert
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Great-West Life");
}

#[test]
fn given_companies_when_listing_classifications_then_distinct_and_sorted() {
    // Arrange
    let container = setup();
    container
        .directory
        .create_company(new_company("A", Some("property")))
        .unwrap();
    container
        .directory
        .create_company(new_company("B", Some("life")))
        .unwrap();
    container
        .directory
        .create_company(new_company("C", Some("property")))
        .unwrap();
    container
        .directory
        .create_company(new_company("D", None))
        .unwrap();

    // Act
    let classifications = container.directory.classifications().unwrap();

    // Assert
    assert_eq!(classifications, vec!["life", "property"]);
}

#[test]
fn given_company_when_updated_then_last_updated_is_bumped() {
    // Arrange
    let container = setup();
    let company = container
        .directory
        .create_company(new_company("Acme", None))
        .unwrap();

    // Act
    let updated = container
        .directory
        .update_company(
            &company.id,
            CompanyPatch {
                website: Some("https://acme.example".to_string()),
                ..Default::default()
            },
        )
        .unwrap();

    // Assert
    assert_eq!(updated.website.as_deref(), Some("https://acme.example"));
    assert!(updated.last_updated >= company.last_updated);
    assert_eq!(updated.created_at, company.created_at);
}

// ============================================================
// Specifications
// ============================================================

#[test]
fn given_unknown_company_when_adding_specification_then_not_found_error() {
    // Arrange
    let container = setup();

    // Act
    let result = container.directory.add_specification(NewSpecification {
        company_id: "ghost".to_string(),
        category: "commissions".to_string(),
        content: "n/a".to_string(),
    });

    // Assert
    assert!(matches!(
        result,
        Err(ApplicationError::Domain(DomainError::RecordNotFound { .. }))
    ));
}

#[test]
fn given_specifications_when_listing_then_only_the_companys_own_appear() {
    // Arrange
    let container = setup();
    let acme = container
        .directory
        .create_company(new_company("Acme", None))
        .unwrap();
    let other = container
        .directory
        .create_company(new_company("Other", None))
        .unwrap();
    container
        .directory
        .add_specification(NewSpecification {
            company_id: acme.id.clone(),
            category: "commissions".to_string(),
            content: "10% first year".to_string(),
        })
        .unwrap();
    container
        .directory
        .add_specification(NewSpecification {
            company_id: other.id.clone(),
            category: "claims".to_string(),
            content: "online portal".to_string(),
        })
        .unwrap();

    // Act
    let specs = container.directory.list_specifications(&acme.id).unwrap();

    // Assert
    assert_eq!(specs.len(), 1);
    assert_eq!(specs[0].category, "commissions");
}

#[test]
fn given_deleted_company_when_listing_its_specs_then_orphans_remain() {
    // Arrange: deletes do not cascade
    let container = setup();
    let acme = container
        .directory
        .create_company(new_company("Acme", None))
        .unwrap();
    container
        .directory
        .add_specification(NewSpecification {
            company_id: acme.id.clone(),
            category: "claims".to_string(),
            content: "fax only".to_string(),
        })
        .unwrap();

    // Act
    container.directory.delete_company(&acme.id).unwrap();

    // Assert
    let specs = container.directory.list_specifications(&acme.id).unwrap();
    assert_eq!(specs.len(), 1);
}

// ============================================================
// Branches and users
// ============================================================

#[test]
fn given_branches_when_searching_then_name_and_city_both_match() {
    // Arrange
    let container = setup();
    container
        .directory
        .create_branch(new_branch("Downtown", "Toronto"))
        .unwrap();
    container
        .directory
        .create_branch(new_branch("Toronto East", "Scarborough"))
        .unwrap();
    container
        .directory
        .create_branch(new_branch("Harbour", "Halifax"))
        .unwrap();

    // Act
    let found = container.directory.list_branches(Some("toronto")).unwrap();

    // Assert
    assert_eq!(found.len(), 2);
}

#[test]
fn given_users_when_filtering_by_role_and_branch_then_both_apply() {
    // Arrange
    let container = setup();
    let branch = container
        .directory
        .create_branch(new_branch("Downtown", "Toronto"))
        .unwrap();
    let mut placed = new_user("Alex", "alex@example.com", "admin");
    placed.branch_id = Some(branch.id.clone());
    container.directory.create_user(placed).unwrap();
    container
        .directory
        .create_user(new_user("Sam", "sam@example.com", "admin"))
        .unwrap();
    container
        .directory
        .create_user(new_user("Kim", "kim@example.com", "agent"))
        .unwrap();

    // Act
    let found = container
        .directory
        .list_users(&UserFilter {
            role: Some("admin".to_string()),
            branch_id: Some(branch.id.clone()),
            ..Default::default()
        })
        .unwrap();

    // Assert
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Alex");
}

#[test]
fn given_blank_email_when_creating_user_then_empty_field_error() {
    // Arrange
    let container = setup();

    // Act
    let result = container
        .directory
        .create_user(new_user("No Email", "  ", "agent"));

    // Assert
    assert!(matches!(
        result,
        Err(ApplicationError::Domain(DomainError::EmptyField {
            field: "email"
        }))
    ));
}
