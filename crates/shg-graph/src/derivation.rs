use std::fmt::Debug;

use shg_core::EdgeId;

/// One complete choice of edges rooted at `node`.
///
/// Children follow the tail order of `edge`. Leaves carry either the
/// empty-tail edge that produced them or no edge at all for nodes without
/// incoming edges. Dropping a derivation walks it with an explicit stack, so
/// arbitrarily deep trees are safe to discard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Derivation<N> {
    node: N,
    edge: Option<EdgeId>,
    children: Vec<Derivation<N>>,
}

impl<N> Derivation<N> {
    /// Builds an internal node (or an empty-tail leaf) produced by `edge`.
    pub fn new(node: N, edge: EdgeId, children: Vec<Derivation<N>>) -> Self {
        Self {
            node,
            edge: Some(edge),
            children,
        }
    }

    /// Builds a leaf for a node that no edge produces.
    pub fn leaf(node: N) -> Self {
        Self {
            node,
            edge: None,
            children: Vec::new(),
        }
    }

    /// Node at the root of this derivation.
    pub fn node(&self) -> &N {
        &self.node
    }

    /// Edge chosen at the root, if any.
    pub fn edge(&self) -> Option<EdgeId> {
        self.edge
    }

    /// Sub-derivations in tail order.
    pub fn children(&self) -> &[Derivation<N>] {
        &self.children
    }

    /// Pre-order walk over every sub-derivation, the root first.
    pub fn iter(&self) -> PreOrder<'_, N> {
        PreOrder { stack: vec![self] }
    }

    /// Nodes in pre-order.
    pub fn nodes(&self) -> impl Iterator<Item = &N> {
        self.iter().map(|d| &d.node)
    }

    /// Chosen edges in pre-order.
    pub fn edges(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.iter().filter_map(|d| d.edge)
    }

    /// Number of tree nodes.
    pub fn size(&self) -> usize {
        self.iter().count()
    }

    /// Length of the longest root-to-leaf path, counted in tree nodes.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 1usize)];
        while let Some((current, level)) = stack.pop() {
            deepest = deepest.max(level);
            stack.extend(current.children.iter().map(|child| (child, level + 1)));
        }
        deepest
    }
}

impl<N> Drop for Derivation<N> {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut child) = pending.pop() {
            pending.append(&mut child.children);
        }
    }
}

/// Iterator returned by [`Derivation::iter`].
pub struct PreOrder<'a, N> {
    stack: Vec<&'a Derivation<N>>,
}

impl<'a, N> Iterator for PreOrder<'a, N> {
    type Item = &'a Derivation<N>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.stack.pop()?;
        self.stack.extend(current.children.iter().rev());
        Some(current)
    }
}
