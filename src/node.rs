// src/node.rs

use std::cmp::Ordering;

use crate::error::{DineError, Result};

/// Restaurant-identity payload stored at the bottom of a category path.
#[derive(Debug, Clone, PartialEq)]
pub struct Leaf {
    pub name: String,
    pub price: f64,
    pub rating: f64,
    pub original_index: usize,
}

/// A node below the synthetic root: either a category value or a restaurant.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Category { label: String, children: Vec<Node> }, // children sorted ascending by label
    Leaf(Leaf),
}

impl Node {
    /// Creates an empty category node.
    pub fn category(label: impl Into<String>) -> Self {
        Node::Category {
            label: label.into(),
            children: Vec::new(),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Node::Category { label, .. } => label,
            Node::Leaf(leaf) => &leaf.name,
        }
    }

    /// Sorted children of a category; always empty for a leaf.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Category { children, .. } => children,
            Node::Leaf(_) => &[],
        }
    }

    pub fn as_leaf(&self) -> Option<&Leaf> {
        match self {
            Node::Leaf(leaf) => Some(leaf),
            Node::Category { .. } => None,
        }
    }
}

/// Finds the child with exactly this label using binary search.
///
/// Returns None if no sibling carries the label.
/// Precondition: `children` is sorted ascending by label.
pub fn find_child<'a>(children: &'a [Node], label: &str) -> Option<&'a Node> {
    let mut left = 0;
    let mut right = children.len();

    while left < right {
        let mid = (left + right) / 2;
        match label.cmp(children[mid].label()) {
            Ordering::Less => right = mid,
            Ordering::Equal => return Some(&children[mid]),
            Ordering::Greater => left = mid + 1,
        }
    }

    None
}

/// Ok(pos) if a child with this label exists, Err(pos) with the insertion point otherwise.
fn position(children: &[Node], label: &str) -> std::result::Result<usize, usize> {
    children.binary_search_by(|child| child.label().cmp(label))
}

/// Returns the children of the category `label`, creating it in sorted position if absent.
pub fn insert_category<'a>(children: &'a mut Vec<Node>, label: &str) -> Result<&'a mut Vec<Node>> {
    let pos = match position(children, label) {
        Ok(pos) => pos,
        Err(pos) => {
            children.insert(pos, Node::category(label));
            pos
        }
    };

    match &mut children[pos] {
        Node::Category { children, .. } => Ok(children),
        Node::Leaf(leaf) => Err(DineError::NodeShape {
            label: leaf.name.clone(),
        }),
    }
}

/// Places `leaf` among its siblings, overwriting the payload of a same-named leaf.
pub fn upsert_leaf(children: &mut Vec<Node>, leaf: Leaf) -> Result<()> {
    match position(children, &leaf.name) {
        Ok(pos) => match &mut children[pos] {
            Node::Leaf(existing) => {
                *existing = leaf;
                Ok(())
            }
            Node::Category { label, .. } => Err(DineError::NodeShape {
                label: label.clone(),
            }),
        },
        Err(pos) => {
            children.insert(pos, Node::Leaf(leaf));
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(name: &str, original_index: usize) -> Leaf {
        Leaf {
            name: name.to_string(),
            price: 10.0,
            rating: 4.0,
            original_index,
        }
    }

    fn labels(children: &[Node]) -> Vec<&str> {
        children.iter().map(Node::label).collect()
    }

    #[test]
    fn test_insert_category_keeps_order() {
        let mut children = Vec::new();
        for label in ["Thai", "Cafe", "North Indian", "Chinese", "Thai"] {
            insert_category(&mut children, label).expect("category insert");
        }
        assert_eq!(labels(&children), vec!["Cafe", "Chinese", "North Indian", "Thai"]);
    }

    #[test]
    fn test_find_child_hits_and_misses() {
        let mut children = Vec::new();
        for label in ["b", "d", "a", "c"] {
            insert_category(&mut children, label).expect("category insert");
        }
        for label in ["a", "b", "c", "d"] {
            assert_eq!(find_child(&children, label).map(Node::label), Some(label));
        }
        assert!(find_child(&children, "e").is_none());
        assert!(find_child(&children, "").is_none());
        assert!(find_child(&[], "a").is_none());
    }

    #[test]
    fn test_upsert_leaf_overwrites_payload() {
        let mut children = Vec::new();
        upsert_leaf(&mut children, leaf("Dosa Hut", 1)).expect("first insert");
        upsert_leaf(&mut children, leaf("Dosa Hut", 7)).expect("second insert");
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].as_leaf().map(|l| l.original_index), Some(7));
    }

    #[test]
    fn test_shape_mismatch_is_an_error() {
        let mut children = Vec::new();
        upsert_leaf(&mut children, leaf("Cafe", 1)).expect("leaf insert");
        assert!(matches!(
            insert_category(&mut children, "Cafe"),
            Err(DineError::NodeShape { .. })
        ));
    }
}
