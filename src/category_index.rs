// src/category_index.rs

use std::collections::{BTreeSet, HashSet};
use std::fmt;

use log::trace;

use crate::config::{FIELD_SEPARATOR, PATH_LEN};
use crate::error::{DineError, Result};
use crate::node::{find_child, insert_category, upsert_leaf, Leaf, Node};

/// Multi-level trie keyed by category labels:
/// cuisine -> dining type -> table booking -> online order -> restaurant name.
///
/// Built once, then read only. The synthetic root is the index itself and
/// `roots` holds its children (the cuisine level).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryIndex {
    roots: Vec<Node>,
}

/// Splits a possibly multi-valued field ("Chinese, Thai") into item labels.
pub fn split_labels(field: &str) -> impl Iterator<Item = &str> {
    field
        .split(FIELD_SEPARATOR)
        .map(str::trim)
        .filter(|item| !item.is_empty())
}

impl CategoryIndex {
    pub fn new() -> Self {
        Self { roots: Vec::new() }
    }

    /// Inserts one restaurant along `path` (four category fields, then the name).
    ///
    /// Every field is comma-split; each item fans out into its own branch and
    /// all resulting leaves carry the same price, rating and original index.
    /// A leaf that already exists under the same path gets its payload replaced.
    /// A field that splits into no labels is rejected before anything is added.
    pub fn insert(&mut self, path: &[&str], price: f64, rating: f64, original_index: usize) -> Result<()> {
        if path.len() != PATH_LEN {
            return Err(DineError::PathLength {
                expected: PATH_LEN,
                actual: path.len(),
            });
        }
        if let Some(position) = path.iter().position(|field| split_labels(field).next().is_none()) {
            return Err(DineError::EmptyLabel { position });
        }
        Self::insert_at(&mut self.roots, path, price, rating, original_index)
    }

    fn insert_at(
        children: &mut Vec<Node>,
        path: &[&str],
        price: f64,
        rating: f64,
        original_index: usize,
    ) -> Result<()> {
        let Some((field, rest)) = path.split_first() else {
            return Ok(());
        };

        for item in split_labels(field) {
            if rest.is_empty() {
                // Restaurant-identity level
                upsert_leaf(
                    children,
                    Leaf {
                        name: item.to_string(),
                        price,
                        rating,
                        original_index,
                    },
                )?;
            } else {
                let next = insert_category(children, item)?;
                Self::insert_at(next, rest, price, rating, original_index)?;
            }
        }
        Ok(())
    }

    /// Follows `path` one exact label at a time and returns the children of
    /// the node it ends on. None as soon as a level has no such label.
    ///
    /// With a full category path (four labels) the result is the restaurant leaves.
    pub fn lookup(&self, path: &[&str]) -> Option<&[Node]> {
        let mut current: &[Node] = &self.roots;

        for (depth, label) in path.iter().enumerate() {
            match find_child(current, label) {
                Some(node) => current = node.children(),
                None => {
                    trace!("lookup miss at depth {depth} for label {label:?}");
                    return None;
                }
            }
        }

        Some(current)
    }

    /// The restaurant leaves under a category path, or None if the path does not exist.
    pub fn find_restaurants(&self, path: &[&str]) -> Option<Vec<&Leaf>> {
        self.lookup(path)
            .map(|nodes| nodes.iter().filter_map(Node::as_leaf).collect())
    }

    /// All cuisine labels, ascending.
    pub fn cuisines(&self) -> Vec<&str> {
        self.roots.iter().map(Node::label).collect()
    }

    /// Distinct dining types across all cuisines, ascending.
    pub fn dining_types(&self) -> Vec<&str> {
        let types: BTreeSet<&str> = self
            .roots
            .iter()
            .flat_map(|cuisine| cuisine.children().iter().map(Node::label))
            .collect();
        types.into_iter().collect()
    }

    /// Iterates over every leaf, including the copies produced by multi-valued fields.
    pub fn leaves(&self) -> impl Iterator<Item = &Leaf> {
        let mut stack: Vec<&Node> = self.roots.iter().rev().collect();
        std::iter::from_fn(move || {
            while let Some(node) = stack.pop() {
                match node {
                    Node::Leaf(leaf) => return Some(leaf),
                    Node::Category { children, .. } => stack.extend(children.iter().rev()),
                }
            }
            None
        })
    }

    /// Number of distinct restaurants (by original index) in the index.
    pub fn restaurant_count(&self) -> usize {
        self.leaves()
            .map(|leaf| leaf.original_index)
            .collect::<HashSet<_>>()
            .len()
    }

    /// Number of nodes below the root.
    pub fn len(&self) -> usize {
        fn count(nodes: &[Node]) -> usize {
            nodes.iter().map(|node| 1 + count(node.children())).sum()
        }
        count(&self.roots)
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Checks the structural invariants: siblings strictly ascending, leaves
    /// exactly at name depth, and no childless category.
    pub fn verify(&self) -> Result<()> {
        Self::verify_level(&self.roots, "<root>", 0)
    }

    fn verify_level(children: &[Node], parent: &str, depth: usize) -> Result<()> {
        for pair in children.windows(2) {
            if pair[0].label() >= pair[1].label() {
                return Err(DineError::UnsortedChildren {
                    parent: parent.to_string(),
                    label: pair[1].label().to_string(),
                });
            }
        }

        let leaf_depth = PATH_LEN - 1;
        for child in children {
            match child {
                Node::Leaf(leaf) if depth != leaf_depth => {
                    return Err(DineError::NodeShape {
                        label: leaf.name.clone(),
                    })
                }
                Node::Category { label, children } => {
                    if depth >= leaf_depth || children.is_empty() {
                        return Err(DineError::NodeShape {
                            label: label.clone(),
                        });
                    }
                    Self::verify_level(children, label, depth + 1)?;
                }
                Node::Leaf(_) => {}
            }
        }
        Ok(())
    }

    fn fmt_level(nodes: &[Node], depth: usize, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for node in nodes {
            let indent = "  ".repeat(depth);
            match node {
                Node::Category { label, children } => {
                    writeln!(f, "{indent}{label}")?;
                    Self::fmt_level(children, depth + 1, f)?;
                }
                Node::Leaf(leaf) => writeln!(
                    f,
                    "{indent}{} (price {}, rating {}, #{})",
                    leaf.name, leaf.price, leaf.rating, leaf.original_index
                )?,
            }
        }
        Ok(())
    }
}

/// One label per line, indented two spaces per level.
impl fmt::Display for CategoryIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Self::fmt_level(&self.roots, 0, f)
    }
}
