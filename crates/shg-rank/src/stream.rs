//! Pull-based iteration over [`LazyRank`](crate::LazyRank) elements.
//!
//! One iteration owns an arena of slots, one per distinct node reached so
//! far. A slot buffers the items its node has produced in descending order;
//! every parent reads that buffer through its own cursor, so a node shared by
//! many hyperedges is ranked once per iteration. Slots are created only when
//! a parent first asks for an item, and items are produced only on demand.
//!
//! Pulling is driven by an explicit stack of demands instead of nested
//! `next` calls, so deep node graphs do not grow the thread stack.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use std::rc::Rc;

use crate::lazy::{Node, Payload};

/// One scored derivation.
pub type Ranked<D> = (f64, Rc<Payload<D>>);

/// Descending stream over a [`LazyRank`](crate::LazyRank) element.
pub struct RankIter<D> {
    arena: Arena<D>,
    root: usize,
    position: usize,
}

impl<D> RankIter<D> {
    pub(crate) fn new(node: Rc<Node<D>>) -> Self {
        let mut arena = Arena::default();
        let root = arena.intern(&node);
        Self {
            arena,
            root,
            position: 0,
        }
    }
}

impl<D> Iterator for RankIter<D> {
    type Item = Ranked<D>;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.arena.item(self.root, self.position)?;
        self.position += 1;
        Some(item)
    }
}

/// Slots of one iteration, keyed by node identity.
struct Arena<D> {
    slots: Vec<Slot<D>>,
    index: HashMap<*const Node<D>, usize>,
}

impl<D> Default for Arena<D> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            index: HashMap::new(),
        }
    }
}

struct Slot<D> {
    /// Keeps the node alive, and with it the address used as key.
    node: Rc<Node<D>>,
    items: Vec<Ranked<D>>,
    exhausted: bool,
    state: State,
}

impl<D> Slot<D> {
    /// Whether item `index` exists or never will.
    fn settled(&self, index: usize) -> bool {
        self.exhausted || index < self.items.len()
    }

    fn score(&self, index: usize) -> Option<f64> {
        self.items.get(index).map(|(score, _)| *score)
    }
}

enum State {
    /// Not stepped yet; children are interned on the first step.
    Fresh,
    /// Two-way merge with a read cursor into each child.
    Merge {
        left: usize,
        right: usize,
        at_left: usize,
        at_right: usize,
    },
    Product(Box<Product>),
    Done,
}

/// Sorted cartesian product of two child buffers.
///
/// The frontier starts at `(0, 0)`. Popping `(i, j)` enqueues `(i, j + 1)`,
/// and `(i + 1, 0)` only when `j = 0`, so every pair has exactly one
/// predecessor and is visited once. With non-negative scores a predecessor
/// never scores below its successor, which keeps the output sorted.
struct Product {
    left: usize,
    right: usize,
    frontier: BinaryHeap<Candidate>,
    /// Pairs to score and enqueue before the next pop.
    queued: Vec<(usize, usize)>,
}

/// Outcome of one step of a slot.
enum Step {
    /// The slot produced an item or finished.
    Advanced,
    /// The slot first needs item `index` of slot `child`.
    Needs { child: usize, index: usize },
}

impl<D> Arena<D> {
    fn intern(&mut self, node: &Rc<Node<D>>) -> usize {
        let key = Rc::as_ptr(node);
        if let Some(&id) = self.index.get(&key) {
            return id;
        }
        let id = self.slots.len();
        self.slots.push(Slot {
            node: Rc::clone(node),
            items: Vec::new(),
            exhausted: false,
            state: State::Fresh,
        });
        self.index.insert(key, id);
        id
    }

    /// Item `index` of slot `id`, producing items until it exists.
    fn item(&mut self, id: usize, index: usize) -> Option<Ranked<D>> {
        let mut demands = vec![(id, index)];
        while let Some(&(slot, wanted)) = demands.last() {
            if self.slots[slot].settled(wanted) {
                demands.pop();
                continue;
            }
            if let Step::Needs { child, index } = self.step(slot) {
                demands.push((child, index));
            }
        }
        let (score, payload) = self.slots[id].items.get(index)?;
        Some((*score, Rc::clone(payload)))
    }

    /// Advances slot `id` by one item, or reports the child item it lacks.
    fn step(&mut self, id: usize) -> Step {
        match self.slots[id].state {
            State::Fresh => self.open(id),
            State::Merge { .. } => self.step_merge(id),
            State::Product(_) => self.step_product(id),
            State::Done => {
                self.slots[id].exhausted = true;
                Step::Advanced
            }
        }
    }

    fn product_mut(&mut self, id: usize) -> Option<&mut Product> {
        match &mut self.slots[id].state {
            State::Product(product) => Some(product),
            _ => None,
        }
    }

    fn finish(&mut self, id: usize) -> Step {
        let slot = &mut self.slots[id];
        slot.state = State::Done;
        slot.exhausted = true;
        Step::Advanced
    }

    fn open(&mut self, id: usize) -> Step {
        let node = Rc::clone(&self.slots[id].node);
        let state = match node.as_ref() {
            Node::Zero => State::Done,
            Node::One => {
                self.slots[id].items.push((1.0, Rc::new(Payload::Unit)));
                State::Done
            }
            Node::Leaf(score, payload) => {
                self.slots[id].items.push((*score, Rc::clone(payload)));
                State::Done
            }
            Node::Sum(left, right) => State::Merge {
                left: self.intern(left),
                right: self.intern(right),
                at_left: 0,
                at_right: 0,
            },
            Node::Prod(left, right) => State::Product(Box::new(Product {
                left: self.intern(left),
                right: self.intern(right),
                frontier: BinaryHeap::new(),
                queued: vec![(0, 0)],
            })),
        };
        self.slots[id].state = state;
        Step::Advanced
    }

    /// The left child wins ties.
    fn step_merge(&mut self, id: usize) -> Step {
        let State::Merge {
            left,
            right,
            at_left,
            at_right,
        } = self.slots[id].state
        else {
            return Step::Advanced;
        };
        if !self.slots[left].settled(at_left) {
            return Step::Needs {
                child: left,
                index: at_left,
            };
        }
        if !self.slots[right].settled(at_right) {
            return Step::Needs {
                child: right,
                index: at_right,
            };
        }
        let take_right = match (self.slots[left].score(at_left), self.slots[right].score(at_right)) {
            (Some(a), Some(b)) => b > a,
            (Some(_), None) => false,
            (None, Some(_)) => true,
            (None, None) => return self.finish(id),
        };
        let (child, at) = if take_right {
            (right, at_right)
        } else {
            (left, at_left)
        };
        let (score, payload) = &self.slots[child].items[at];
        let item = (*score, Rc::clone(payload));
        let slot = &mut self.slots[id];
        slot.items.push(item);
        slot.state = State::Merge {
            left,
            right,
            at_left: at_left + usize::from(!take_right),
            at_right: at_right + usize::from(take_right),
        };
        Step::Advanced
    }

    fn step_product(&mut self, id: usize) -> Step {
        let Some(product) = self.product_mut(id) else {
            return Step::Advanced;
        };
        let (left, right) = (product.left, product.right);

        // Score the queued successors; each may need a child item first.
        while let Some((i, j)) = self.product_mut(id).and_then(|p| p.queued.last().copied()) {
            if !self.slots[left].settled(i) {
                return Step::Needs {
                    child: left,
                    index: i,
                };
            }
            if !self.slots[right].settled(j) {
                return Step::Needs {
                    child: right,
                    index: j,
                };
            }
            let scores = (self.slots[left].score(i), self.slots[right].score(j));
            if let Some(product) = self.product_mut(id) {
                product.queued.pop();
                if let (Some(a), Some(b)) = scores {
                    product.frontier.push(Candidate { score: a * b, i, j });
                }
            }
        }

        let Some(product) = self.product_mut(id) else {
            return Step::Advanced;
        };
        let Some(Candidate { score, i, j }) = product.frontier.pop() else {
            return self.finish(id);
        };
        product.queued.push((i, j + 1));
        if j == 0 {
            product.queued.push((i + 1, 0));
        }
        let pair = Payload::Pair(
            Rc::clone(&self.slots[left].items[i].1),
            Rc::clone(&self.slots[right].items[j].1),
        );
        self.slots[id].items.push((score, Rc::new(pair)));
        Step::Advanced
    }
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    score: f64,
    i: usize,
    j: usize,
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate {
    /// Highest score first; among equal scores, the smallest `(i, j)`.
    fn cmp(&self, other: &Self) -> Ordering {
        self.score
            .total_cmp(&other.score)
            .then_with(|| other.i.cmp(&self.i))
            .then_with(|| other.j.cmp(&self.j))
    }
}
