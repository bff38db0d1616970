use std::collections::btree_map::{self, BTreeMap};
use std::ops::Index;

use shg_core::Semiring;

/// Per-node values produced by a traversal.
///
/// Unseen nodes read as the semiring zero, so callers never have to
/// distinguish "not reached" from "reached with no mass".
#[derive(Debug, Clone)]
pub struct Chart<N, W> {
    values: BTreeMap<N, W>,
    zero: W,
}

impl<N: Ord, W: Semiring> Chart<N, W> {
    /// Creates an empty chart.
    pub fn new() -> Self {
        Self {
            values: BTreeMap::new(),
            zero: W::zero(),
        }
    }

    /// Value of `node`, or zero when it was never written.
    pub fn get(&self, node: &N) -> &W {
        self.values.get(node).unwrap_or(&self.zero)
    }

    /// Overwrites the value of `node`.
    pub fn set(&mut self, node: N, value: W) {
        self.values.insert(node, value);
    }

    /// `chart[node] ⊕= value`
    pub fn accumulate(&mut self, node: N, value: &W) {
        match self.values.entry(node) {
            btree_map::Entry::Occupied(mut slot) => slot.get_mut().add_assign(value),
            btree_map::Entry::Vacant(slot) => {
                slot.insert(value.clone());
            }
        }
    }

    /// Whether `node` has an explicit entry.
    pub fn contains(&self, node: &N) -> bool {
        self.values.contains_key(node)
    }

    /// Number of explicit entries.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no node has been written.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Explicit entries in node order.
    pub fn iter(&self) -> btree_map::Iter<'_, N, W> {
        self.values.iter()
    }
}

impl<N: Ord, W: Semiring> Default for Chart<N, W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: Ord, W: Semiring> Index<&N> for Chart<N, W> {
    type Output = W;

    fn index(&self, node: &N) -> &W {
        self.get(node)
    }
}

impl<'a, N: Ord, W: Semiring> IntoIterator for &'a Chart<N, W> {
    type Item = (&'a N, &'a W);
    type IntoIter = btree_map::Iter<'a, N, W>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<N: Ord, W: Semiring> FromIterator<(N, W)> for Chart<N, W> {
    fn from_iter<I: IntoIterator<Item = (N, W)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
            zero: W::zero(),
        }
    }
}
