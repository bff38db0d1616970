use std::fmt;
use std::rc::Rc;

use shg_core::Semiring;

use crate::stream::RankIter;

/// Data carried by a ranked derivation: the items of its leaves, nested in
/// the order the products were formed.
#[derive(Debug, PartialEq, Eq)]
pub enum Payload<D> {
    /// Payload of the multiplicative identity.
    Unit,
    /// A single leaf item.
    Item(D),
    /// Product of two payloads, left factor first.
    Pair(Rc<Payload<D>>, Rc<Payload<D>>),
}

impl<D> Payload<D> {
    /// Leaf items in left-to-right order.
    pub fn items(&self) -> Vec<&D> {
        let mut items = Vec::new();
        let mut stack = vec![self];
        while let Some(current) = stack.pop() {
            match current {
                Payload::Unit => {}
                Payload::Item(item) => items.push(item),
                Payload::Pair(left, right) => {
                    stack.push(right);
                    stack.push(left);
                }
            }
        }
        items
    }
}

impl<D> Drop for Payload<D> {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        detach_pair(self, &mut pending);
        while let Some(child) = pending.pop() {
            if let Ok(mut owned) = Rc::try_unwrap(child) {
                detach_pair(&mut owned, &mut pending);
            }
        }
    }
}

fn detach_pair<D>(payload: &mut Payload<D>, pending: &mut Vec<Rc<Payload<D>>>) {
    if let Payload::Pair(left, right) = payload {
        pending.push(std::mem::replace(left, Rc::new(Payload::Unit)));
        pending.push(std::mem::replace(right, Rc::new(Payload::Unit)));
    }
}

pub(crate) enum Node<D> {
    Zero,
    One,
    Leaf(f64, Rc<Payload<D>>),
    Sum(Rc<Node<D>>, Rc<Node<D>>),
    Prod(Rc<Node<D>>, Rc<Node<D>>),
}

impl<D> Drop for Node<D> {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        detach_children(self, &mut pending);
        while let Some(child) = pending.pop() {
            if let Ok(mut owned) = Rc::try_unwrap(child) {
                detach_children(&mut owned, &mut pending);
            }
        }
    }
}

fn detach_children<D>(node: &mut Node<D>, pending: &mut Vec<Rc<Node<D>>>) {
    if let Node::Sum(left, right) | Node::Prod(left, right) = node {
        pending.push(std::mem::replace(left, Rc::new(Node::Zero)));
        pending.push(std::mem::replace(right, Rc::new(Node::Zero)));
    }
}

/// Lazily sorted stream of scored derivations.
///
/// `⊕` defers a merge of two streams and `⊗` defers their sorted cartesian
/// product, so building a chart costs one node per operation and items are
/// only computed when [`iter`](Self::iter) pulls them. Every call to `iter`
/// starts an independent stream in non-increasing score order.
///
/// Scores must be non-negative for products to stay sorted. Multiplication
/// nests payloads left to right, so it is not commutative.
pub struct LazyRank<D> {
    node: Rc<Node<D>>,
}

impl<D> LazyRank<D> {
    fn wrap(node: Node<D>) -> Self {
        Self {
            node: Rc::new(node),
        }
    }

    /// A single derivation with the given score and item.
    pub fn leaf(score: f64, item: D) -> Self {
        Self::wrap(Node::Leaf(score, Rc::new(Payload::Item(item))))
    }

    /// Starts a fresh descending stream.
    pub fn iter(&self) -> RankIter<D> {
        RankIter::new(Rc::clone(&self.node))
    }

    /// The first `k` items of a fresh stream.
    pub fn top(&self, k: usize) -> Vec<(f64, Rc<Payload<D>>)> {
        self.iter().take(k).collect()
    }
}

impl<D> Clone for LazyRank<D> {
    fn clone(&self) -> Self {
        Self {
            node: Rc::clone(&self.node),
        }
    }
}

impl<D> fmt::Debug for LazyRank<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.node.as_ref() {
            Node::Zero => "Zero",
            Node::One => "One",
            Node::Leaf(..) => "Leaf",
            Node::Sum(..) => "Sum",
            Node::Prod(..) => "Prod",
        };
        f.debug_struct("LazyRank").field("node", &kind).finish()
    }
}

impl<D> Semiring for LazyRank<D> {
    const NAME: &'static str = "lazy-rank";
    const COMMUTATIVE: bool = false;

    fn zero() -> Self {
        Self::wrap(Node::Zero)
    }

    fn one() -> Self {
        Self::wrap(Node::One)
    }

    fn add(&self, other: &Self) -> Self {
        if self.is_zero() {
            return other.clone();
        }
        if other.is_zero() {
            return self.clone();
        }
        Self::wrap(Node::Sum(Rc::clone(&self.node), Rc::clone(&other.node)))
    }

    fn mul(&self, other: &Self) -> Self {
        if self.is_zero() || other.is_zero() {
            return Self::zero();
        }
        if self.is_one() {
            return other.clone();
        }
        if other.is_one() {
            return self.clone();
        }
        match (self.node.as_ref(), other.node.as_ref()) {
            (Node::Leaf(a, left), Node::Leaf(b, right)) => Self::wrap(Node::Leaf(
                a * b,
                Rc::new(Payload::Pair(Rc::clone(left), Rc::clone(right))),
            )),
            _ => Self::wrap(Node::Prod(Rc::clone(&self.node), Rc::clone(&other.node))),
        }
    }

    fn is_zero(&self) -> bool {
        matches!(self.node.as_ref(), Node::Zero)
    }

    fn is_one(&self) -> bool {
        matches!(self.node.as_ref(), Node::One)
    }
}

impl<'a, D> IntoIterator for &'a LazyRank<D> {
    type Item = (f64, Rc<Payload<D>>);
    type IntoIter = RankIter<D>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
