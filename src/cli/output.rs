//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use colored::Colorize;
use termtree::Tree;

use crate::domain::CategoryForest;

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Print warning (yellow "Warning:" prefix) to stderr
pub fn warning(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "Warning".yellow(), msg);
}

/// Print success status (green checkmark)
pub fn success(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{} {}", "✓".green(), msg);
}

/// Print completed action (green label)
pub fn action(label: &str, msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}: {}", label.green(), msg);
}

/// Print section header (cyan bold)
pub fn header(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg.to_string().cyan().bold());
}

/// Print indented detail (no color)
pub fn detail(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("  {}", msg);
}

/// Print plain output (no color, for data listings)
pub fn info(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg);
}

/// Convert a forest into termtree structures, one per root.
pub fn forest_to_tree_strings(forest: &CategoryForest) -> Vec<Tree<String>> {
    forest
        .roots()
        .iter()
        .map(|&root| subtree_to_tree_string(forest, root))
        .collect()
}

fn subtree_to_tree_string(
    forest: &CategoryForest,
    idx: generational_arena::Index,
) -> Tree<String> {
    let node = &forest[idx];
    let mut tree = Tree::new(format!("{} ({})", node.record.name, node.record.id));
    for &child in &node.children {
        tree.push(subtree_to_tree_string(forest, child));
    }
    tree
}

/// Print the whole category hierarchy.
pub fn print_forest(forest: &CategoryForest) {
    for tree in forest_to_tree_strings(forest) {
        println!("{}", tree);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Category;

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
    fn given_nested_forest_when_rendered_then_children_are_indented() {
        let forest = CategoryForest::build(&[
            category("1", "Life", None),
            category("2", "Term", Some("1")),
        ]);
        let trees = forest_to_tree_strings(&forest);
        assert_eq!(trees.len(), 1);
        let rendered = trees[0].to_string();
        assert!(rendered.contains("Life (1)"));
        assert!(rendered.contains("└── Term (2)"));
    }
}
