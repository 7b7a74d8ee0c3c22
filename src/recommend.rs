// src/recommend.rs

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashSet};

use log::debug;

use crate::category_index::CategoryIndex;
use crate::config::{flag_label, CATEGORY_DEPTH};
use crate::error::{DineError, Result};
use crate::node::Leaf;

/// A validated request for `visit_count` outings within `total_budget`.
///
/// Cuisines are held in a BTreeSet so they are visited in ascending order.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    visit_count: usize,
    total_budget: f64,
    cuisines: BTreeSet<String>,
    dining_type: String,
    table_booking: bool,
    online_order: bool,
}

impl Query {
    /// Builds a query, rejecting a zero visit count, a negative or non-finite
    /// budget, an empty cuisine set, or more cuisines than visits.
    pub fn new<I, S>(
        visit_count: usize,
        total_budget: f64,
        cuisines: I,
        dining_type: impl Into<String>,
        table_booking: bool,
        online_order: bool,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let cuisines: BTreeSet<String> = cuisines.into_iter().map(Into::into).collect();

        if visit_count == 0 {
            return Err(DineError::InvalidQuery("visit count must be at least 1".into()));
        }
        if !total_budget.is_finite() || total_budget < 0.0 {
            return Err(DineError::InvalidQuery(format!(
                "budget must be a non-negative number, got {total_budget}"
            )));
        }
        if cuisines.is_empty() {
            return Err(DineError::InvalidQuery("at least one cuisine is required".into()));
        }
        if cuisines.len() > visit_count {
            return Err(DineError::InvalidQuery(format!(
                "{} cuisines requested for {visit_count} visits",
                cuisines.len()
            )));
        }

        Ok(Self {
            visit_count,
            total_budget,
            cuisines,
            dining_type: dining_type.into(),
            table_booking,
            online_order,
        })
    }

    pub fn visit_count(&self) -> usize {
        self.visit_count
    }

    pub fn total_budget(&self) -> f64 {
        self.total_budget
    }

    pub fn cuisines(&self) -> impl Iterator<Item = &str> {
        self.cuisines.iter().map(String::as_str)
    }

    pub fn dining_type(&self) -> &str {
        &self.dining_type
    }

    pub fn table_booking(&self) -> bool {
        self.table_booking
    }

    pub fn online_order(&self) -> bool {
        self.online_order
    }

    /// Spending cap applied to every candidate: the budget split evenly across visits.
    pub fn per_visit_budget(&self) -> f64 {
        self.total_budget / self.visit_count as f64
    }

    /// Category path for one requested cuisine, shared filters appended.
    pub fn category_path<'a>(&'a self, cuisine: &'a str) -> [&'a str; CATEGORY_DEPTH] {
        [
            cuisine,
            &self.dining_type,
            flag_label(self.table_booking),
            flag_label(self.online_order),
        ]
    }
}

/// Best rating first; equal ratings by ascending original index.
fn by_rating(a: &&Leaf, b: &&Leaf) -> Ordering {
    b.rating
        .total_cmp(&a.rating)
        .then(a.original_index.cmp(&b.original_index))
}

impl CategoryIndex {
    /// Picks up to `visit_count` restaurants for the query.
    ///
    /// Each cuisine's best affordable match comes first (in cuisine order),
    /// then the remaining affordable matches of all cuisines, pooled in the
    /// same order, fill any slots left. No original index appears twice.
    ///
    /// Returns None when no requested cuisine has a matching category path;
    /// `Some(vec![])` when paths exist but nothing fits the per-visit budget.
    pub fn recommend(&self, query: &Query) -> Option<Vec<usize>> {
        let budget = query.per_visit_budget();
        let mut matched = false;
        let mut ranked: Vec<Vec<&Leaf>> = Vec::new();

        // Step 1: Look up each cuisine, keep what is affordable, rank it
        for cuisine in query.cuisines() {
            let Some(leaves) = self.find_restaurants(&query.category_path(cuisine)) else {
                debug!("no restaurants under cuisine {cuisine:?}");
                continue;
            };
            matched = true;

            let mut affordable: Vec<&Leaf> =
                leaves.into_iter().filter(|leaf| leaf.price <= budget).collect();
            affordable.sort_by(by_rating);
            debug!(
                "cuisine {cuisine:?}: {} affordable under {budget}",
                affordable.len()
            );
            ranked.push(affordable);
        }

        if !matched {
            return None;
        }

        // Step 2: Primary picks, one per cuisine
        let mut selected: Vec<usize> = Vec::with_capacity(query.visit_count());
        let mut seen: HashSet<usize> = HashSet::new();
        for top in ranked.iter().filter_map(|list| list.first()) {
            if seen.insert(top.original_index) {
                selected.push(top.original_index);
            }
        }
        debug!("primary picks: {selected:?}");

        // Step 3: Fill remaining visits from the pooled candidates
        for leaf in ranked.iter().flatten() {
            if selected.len() >= query.visit_count() {
                break;
            }
            if seen.insert(leaf.original_index) {
                selected.push(leaf.original_index);
            }
        }

        Some(selected)
    }
}
