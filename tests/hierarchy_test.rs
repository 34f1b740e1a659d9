//! Tests for the category forest builder

use brokerhub::domain::{Category, CategoryForest};

fn category(id: &str, name: &str, parent: Option<&str>) -> Category {
    Category {
        id: id.to_string(),
        name: name.to_string(),
        parent_id: parent.map(String::from),
        description: None,
        created_at: None,
        updated_at: None,
    }
}

#[test]
fn given_flat_rows_when_building_then_every_row_appears_exactly_once() {
    // Arrange
    let records = vec![
        category("life", "Life", None),
        category("term", "Term Life", Some("life")),
        category("whole", "Whole Life", Some("life")),
        category("auto", "Auto", None),
        category("stray", "Stray", Some("missing-parent")),
    ];

    // Act
    let forest = CategoryForest::build(&records);

    // Assert
    assert_eq!(forest.len(), records.len());
    let mut seen: Vec<String> = forest
        .iter()
        .map(|(_, _, node)| node.record.id.clone())
        .collect();
    seen.sort();
    let mut expected: Vec<String> = records.iter().map(|r| r.id.clone()).collect();
    expected.sort();
    assert_eq!(seen, expected);
}

#[test]
fn given_same_input_when_building_twice_then_structure_is_identical() {
    // Arrange
    let records = vec![
        category("a", "A", None),
        category("b", "B", Some("a")),
        category("c", "C", Some("b")),
        category("d", "D", None),
    ];

    // Act
    let first = CategoryForest::build(&records);
    let second = CategoryForest::build(&records);

    // Assert
    assert_eq!(first.to_nested(), second.to_nested());
    assert_eq!(first.flatten(), second.flatten());
}

#[test]
fn given_null_and_unresolved_parents_when_building_then_both_become_roots() {
    // Arrange
    let records = vec![
        category("explicit-root", "Explicit", None),
        category("orphan", "Orphan", Some("nowhere")),
        category("child", "Child", Some("explicit-root")),
    ];

    // Act
    let forest = CategoryForest::build(&records);

    // Assert
    let roots: Vec<&str> = forest
        .roots()
        .iter()
        .map(|&idx| forest[idx].record.id.as_str())
        .collect();
    assert_eq!(roots, vec!["explicit-root", "orphan"]);
}

#[test]
fn given_parent_links_when_building_then_child_and_parent_agree() {
    // Arrange
    let records = vec![
        category("p", "Parent", None),
        category("c", "Child", Some("p")),
    ];

    // Act
    let forest = CategoryForest::build(&records);

    // Assert
    let root = forest.roots()[0];
    let root_node = &forest[root];
    assert_eq!(root_node.children.len(), 1);
    let child = root_node.children[0];
    assert_eq!(forest[child].parent, Some(root));
    assert_eq!(forest[child].record.parent_id.as_deref(), Some("p"));
}

#[test]
fn given_deep_chain_when_building_then_depth_matches_chain_length() {
    // Arrange: a 50-deep chain, shuffled so children precede parents
    let mut records: Vec<Category> = (0..50)
        .map(|i| {
            let parent = if i == 0 {
                None
            } else {
                Some(format!("n{}", i - 1))
            };
            category(&format!("n{i}"), &format!("Node {i}"), parent.as_deref())
        })
        .collect();
    records.reverse();

    // Act
    let forest = CategoryForest::build(&records);

    // Assert
    assert_eq!(forest.roots().len(), 1);
    assert_eq!(forest.depth(), 50);
}

#[test]
fn given_forest_when_flattening_then_parents_precede_children() {
    // Arrange
    let records = vec![
        category("a", "A", None),
        category("b", "B", None),
        category("a1", "A1", Some("a")),
        category("b1", "B1", Some("b")),
        category("a2", "A2", Some("a1")),
    ];

    // Act
    let options = CategoryForest::build(&records).flatten();

    // Assert: preorder, first root's subtree fully before the second root
    let ids: Vec<&str> = options.iter().map(|o| o.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "a1", "a2", "b", "b1"]);
    assert_eq!(options[2].label, "—— A2");
    assert_eq!(options[3].label, "B");
}
