//! Category hierarchy: flat rows to forest
//!
//! The remote table stores categories as flat rows with a nullable
//! `parent_id`. This module assembles them into a forest at read time.
//!
//! Construction is a single pass over an id lookup map (arena + index), never
//! a recursive walk of parent pointers, so malformed rows (parent pointing at
//! a missing id, or a row naming itself as parent) cannot cause
//! non-termination. Such rows degrade to roots instead of failing: the
//! builder is total over any well-typed input.

use std::collections::HashMap;

use generational_arena::{Arena, Index};
use serde::Serialize;
use tracing::warn;

use crate::domain::entities::Category;

/// Node in the assembled forest.
#[derive(Debug)]
pub struct CategoryNode {
    /// The flat record this node was built from
    pub record: Category,
    /// Index of the parent node, None for roots
    pub parent: Option<Index>,
    /// Indices of direct children, in first-encounter order
    pub children: Vec<Index>,
}

/// Nested category shape, children populated recursively.
///
/// This is the read-time projection handed to consumers (tree views,
/// serialized responses). Assembled by [`CategoryForest::to_nested`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTree {
    pub id: String,
    pub name: String,
    pub parent_id: Option<String>,
    pub description: Option<String>,
    pub children: Vec<CategoryTree>,
}

/// Dropdown entry produced by flattening the forest depth-first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryOption {
    pub id: String,
    /// Display name prefixed with a depth-proportional `—` marker
    pub label: String,
    pub depth: usize,
}

/// Arena-backed forest of categories.
///
/// Root order and child order both follow first-encounter order in the
/// input, so the same flat list always yields the same structure.
#[derive(Debug, Default)]
pub struct CategoryForest {
    arena: Arena<CategoryNode>,
    roots: Vec<Index>,
}

impl CategoryForest {
    /// Assemble a forest from flat records.
    ///
    /// Rows whose `parent_id` does not resolve to another row are kept as
    /// roots. A row naming itself as parent is also kept as a root, with a
    /// warning; dropping or rejecting it would lose user data over what is
    /// merely a malformed reference.
    pub fn build(records: &[Category]) -> Self {
        let mut arena = Arena::with_capacity(records.len());
        let mut by_id: HashMap<&str, Index> = HashMap::with_capacity(records.len());

        for record in records {
            let idx = arena.insert(CategoryNode {
                record: record.clone(),
                parent: None,
                children: Vec::new(),
            });
            by_id.insert(record.id.as_str(), idx);
        }

        let mut roots = Vec::new();
        for record in records {
            let idx = by_id[record.id.as_str()];
            match record.parent_id.as_deref() {
                Some(parent_id) if parent_id == record.id => {
                    warn!(id = %record.id, "category lists itself as parent, keeping as root");
                    roots.push(idx);
                }
                Some(parent_id) => match by_id.get(parent_id) {
                    Some(&parent_idx) => {
                        arena[idx].parent = Some(parent_idx);
                        arena[parent_idx].children.push(idx);
                    }
                    None => {
                        warn!(id = %record.id, parent_id, "unresolved parent, keeping as root");
                        roots.push(idx);
                    }
                },
                None => roots.push(idx),
            }
        }

        Self { arena, roots }
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn get(&self, idx: Index) -> Option<&CategoryNode> {
        self.arena.get(idx)
    }

    /// Root indices in first-encounter order.
    pub fn roots(&self) -> &[Index] {
        &self.roots
    }

    /// Depth-first preorder iteration over the whole forest.
    pub fn iter(&self) -> ForestIterator<'_> {
        ForestIterator::new(self)
    }

    /// Maximum node count on any root-to-leaf path.
    pub fn depth(&self) -> usize {
        self.iter().map(|(_, depth, _)| depth + 1).max().unwrap_or(0)
    }

    /// Materialize the nested parent/children shape, roots first.
    pub fn to_nested(&self) -> Vec<CategoryTree> {
        self.roots
            .iter()
            .map(|&root| self.nested_at(root))
            .collect()
    }

    fn nested_at(&self, idx: Index) -> CategoryTree {
        let node = &self.arena[idx];
        CategoryTree {
            id: node.record.id.clone(),
            name: node.record.name.clone(),
            parent_id: node.record.parent_id.clone(),
            description: node.record.description.clone(),
            children: node
                .children
                .iter()
                .map(|&child| self.nested_at(child))
                .collect(),
        }
    }

    /// Flatten depth-first into dropdown options, parent before children.
    ///
    /// Labels carry one `—` per nesting level so a plain select list still
    /// reads as a hierarchy.
    pub fn flatten(&self) -> Vec<CategoryOption> {
        self.iter()
            .map(|(_, depth, node)| CategoryOption {
                id: node.record.id.clone(),
                label: if depth == 0 {
                    node.record.name.clone()
                } else {
                    format!("{} {}", "—".repeat(depth), node.record.name)
                },
                depth,
            })
            .collect()
    }
}

impl std::ops::Index<Index> for CategoryForest {
    type Output = CategoryNode;

    fn index(&self, idx: Index) -> &CategoryNode {
        &self.arena[idx]
    }
}

/// Preorder iterator yielding `(index, depth, node)`.
pub struct ForestIterator<'a> {
    forest: &'a CategoryForest,
    stack: Vec<(Index, usize)>,
}

impl<'a> ForestIterator<'a> {
    fn new(forest: &'a CategoryForest) -> Self {
        // Roots pushed in reverse so the first root pops first
        let stack = forest.roots.iter().rev().map(|&idx| (idx, 0)).collect();
        Self { forest, stack }
    }
}

impl<'a> Iterator for ForestIterator<'a> {
    type Item = (Index, usize, &'a CategoryNode);

    fn next(&mut self) -> Option<Self::Item> {
        let (idx, depth) = self.stack.pop()?;
        let node = &self.forest.arena[idx];
        for &child in node.children.iter().rev() {
            self.stack.push((child, depth + 1));
        }
        Some((idx, depth, node))
    }
}
