//! The lazy tree core.
//!
//! The tree is stored as a flat array in the usual implicit layout: the
//! root lives at index 1, and the node at index `i` has its children at
//! `2i` and `2i + 1`. A node covering more than one element splits its
//! range in half between its children, so the tree is balanced by
//! construction and every root-to-leaf path has length `O(log n)`. An
//! identically indexed second array holds each node's [`Pending`] tag.
//!
//! All three range operations walk the same recursive shape from the
//! root: ranges disjoint from the operation's range are skipped, ranges
//! fully covered by it are handled on the spot without descending, and
//! partially overlapping ranges push the node's pending tag down and
//! recurse into both children. Pushing down before every descent is
//! what keeps the node invariant intact: a node's reduced value always
//! reflects all updates applied so far, while its children may lag
//! behind by exactly the node's own pending tag.

use crate::data::{Pending, Reduce};

/// A lazy segment tree over a fixed-length sequence, maintaining an
/// injected reduction under range additions and range assignments.
///
/// The memory for the tree is allocated once at construction and never
/// grows or shrinks; operations mutate aggregates and tags in place.
/// Ranges are given as inclusive index pairs `(l, r)` with
/// `l <= r < self.len()`, and violating that is a bug in the caller:
/// the operations panic rather than clamp, since a clamped update would
/// silently answer a different question than the one asked.
pub struct LazyTree<R: Reduce> {
    op: R,
    len: usize,
    tree: Box<[R::Value]>,
    lazy: Box<[Pending<R::Value>]>,
}

impl<R: Reduce> LazyTree<R> {
    /// Creates a tree of `len` elements, all starting at the
    /// reduction's identity.
    ///
    /// # Panics
    ///
    /// Panics if `len` is zero.
    pub fn new(op: R, len: usize) -> Self {
        assert!(len >= 1, "a lazy tree must cover at least one element");
        let e = op.identity();
        LazyTree {
            len,
            tree: vec![e; 4 * len].into_boxed_slice(),
            lazy: vec![Pending::Empty; 4 * len].into_boxed_slice(),
            op,
        }
    }

    /// Creates a tree over a copy of `values`.
    ///
    /// # Panics
    ///
    /// Panics if `values` is empty.
    pub fn from_slice(op: R, values: &[R::Value]) -> Self {
        let mut tree = LazyTree::new(op, values.len());
        tree.build_rec(values, 1, 0, values.len() - 1);
        tree
    }

    /// Replaces the whole sequence with `values`, discarding every
    /// pending update. The tree's length is fixed at construction, so
    /// the new values must be exactly as many as the old ones.
    ///
    /// # Panics
    ///
    /// Panics if `values.len() != self.len()`.
    pub fn build(&mut self, values: &[R::Value]) {
        assert!(
            values.len() == self.len,
            "rebuilding with {} values into a tree of length {}",
            values.len(),
            self.len
        );
        for tag in self.lazy.iter_mut() {
            *tag = Pending::Empty;
        }
        self.build_rec(values, 1, 0, self.len - 1);
    }

    /// The number of elements in the sequence.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Adds `by` to every element of `[l, r]` (inclusive).
    ///
    /// This is only sound if the tree's reduction accounts for additive
    /// shifts, either by being translation invariant (max, min) or by
    /// scaling with segment length (sum). See [`Reduce::shift`].
    ///
    /// # Panics
    ///
    /// Panics if `l > r` or `r >= self.len()`.
    pub fn range_add(&mut self, l: usize, r: usize, by: R::Value) {
        self.check_range(l, r);
        self.update_rec(1, 0, self.len - 1, l, r, Pending::Add(by));
    }

    /// Assigns `to` to every element of `[l, r]` (inclusive).
    ///
    /// # Panics
    ///
    /// Panics if `l > r` or `r >= self.len()`.
    pub fn range_set(&mut self, l: usize, r: usize, to: R::Value) {
        self.check_range(l, r);
        self.update_rec(1, 0, self.len - 1, l, r, Pending::Set(to));
    }

    /// The reduction of the current values of `[l, r]` (inclusive).
    ///
    /// Takes `&mut self` because querying pushes pending tags downward
    /// on its way; the logical sequence is unchanged.
    ///
    /// # Panics
    ///
    /// Panics if `l > r` or `r >= self.len()`.
    pub fn range_query(&mut self, l: usize, r: usize) -> R::Value {
        self.check_range(l, r);
        self.query_rec(1, 0, self.len - 1, l, r)
    }

    /// Assigns `to` to the single element at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    pub fn point_set(&mut self, index: usize, to: R::Value) {
        self.range_set(index, index, to);
    }

    /// The current value of the single element at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    pub fn point_query(&mut self, index: usize) -> R::Value {
        self.range_query(index, index)
    }

    /// Reads the whole sequence out, in order. `O(n)`.
    pub fn to_vec(&mut self) -> Vec<R::Value> {
        let mut out = Vec::with_capacity(self.len);
        self.collect_rec(1, 0, self.len - 1, &mut out);
        out
    }

    /// Checks, in `O(n)`, that every node's reduced value is consistent
    /// with its children's values under its own pending tag. Intended
    /// for tests; panics on the first violation found.
    pub fn assert_correctness(&self)
    where
        R::Value: PartialEq + std::fmt::Debug,
    {
        self.assert_node(1, 0, self.len - 1);
    }

    fn check_range(&self, l: usize, r: usize) {
        assert!(
            l <= r && r < self.len,
            "invalid range [{}, {}] on a tree of length {}",
            l,
            r,
            self.len
        );
    }

    fn build_rec(&mut self, values: &[R::Value], node: usize, start: usize, end: usize) {
        if start == end {
            self.tree[node] = values[start];
            return;
        }
        let mid = (start + end) / 2;
        self.build_rec(values, 2 * node, start, mid);
        self.build_rec(values, 2 * node + 1, mid + 1, end);
        self.pull(node);
    }

    fn pull(&mut self, node: usize) {
        self.tree[node] = self.op.combine(self.tree[2 * node], self.tree[2 * node + 1]);
    }

    // Folds an update into a single node covering `len` elements: the
    // node's reduced value absorbs it immediately, and the node's tag
    // takes it on as debt owed to the subtree.
    fn apply(&mut self, node: usize, len: usize, update: Pending<R::Value>) {
        match update {
            Pending::Empty => return,
            Pending::Add(v) => self.tree[node] = self.op.shift(self.tree[node], v, len),
            Pending::Set(v) => self.tree[node] = self.op.fill(v, len),
        }
        self.lazy[node].compose(update);
    }

    // Hands a node's pending tag down to both children and clears it.
    // Must run before anything reads or writes below the node.
    fn push(&mut self, node: usize, start: usize, end: usize) {
        let pending = self.lazy[node].take();
        if pending.is_empty() {
            return;
        }
        let mid = (start + end) / 2;
        self.apply(2 * node, mid - start + 1, pending);
        self.apply(2 * node + 1, end - mid, pending);
    }

    fn update_rec(
        &mut self,
        node: usize,
        start: usize,
        end: usize,
        l: usize,
        r: usize,
        update: Pending<R::Value>,
    ) {
        if start > r || end < l {
            return;
        }
        if l <= start && end <= r {
            // The whole subtree is covered; the tag machinery takes it
            // from here without descending.
            self.apply(node, end - start + 1, update);
            return;
        }
        self.push(node, start, end);
        let mid = (start + end) / 2;
        self.update_rec(2 * node, start, mid, l, r, update);
        self.update_rec(2 * node + 1, mid + 1, end, l, r, update);
        self.pull(node);
    }

    fn query_rec(&mut self, node: usize, start: usize, end: usize, l: usize, r: usize) -> R::Value {
        if start > r || end < l {
            return self.op.identity();
        }
        if l <= start && end <= r {
            return self.tree[node];
        }
        self.push(node, start, end);
        let mid = (start + end) / 2;
        let left = self.query_rec(2 * node, start, mid, l, r);
        let right = self.query_rec(2 * node + 1, mid + 1, end, l, r);
        self.op.combine(left, right)
    }

    fn collect_rec(&mut self, node: usize, start: usize, end: usize, out: &mut Vec<R::Value>) {
        if start == end {
            out.push(self.tree[node]);
            return;
        }
        self.push(node, start, end);
        let mid = (start + end) / 2;
        self.collect_rec(2 * node, start, mid, out);
        self.collect_rec(2 * node + 1, mid + 1, end, out);
    }

    fn assert_node(&self, node: usize, start: usize, end: usize)
    where
        R::Value: PartialEq + std::fmt::Debug,
    {
        if start == end {
            return;
        }
        let mid = (start + end) / 2;
        self.assert_node(2 * node, start, mid);
        self.assert_node(2 * node + 1, mid + 1, end);
        let len = end - start + 1;
        let combined = self.op.combine(self.tree[2 * node], self.tree[2 * node + 1]);
        let expected = match self.lazy[node] {
            Pending::Empty => combined,
            Pending::Add(v) => self.op.shift(combined, v, len),
            Pending::Set(v) => self.op.fill(v, len),
        };
        assert_eq!(
            self.tree[node], expected,
            "node covering [{}, {}] is inconsistent with its children",
            start, end
        );
    }
}

/// Builds a tree by collecting an iterator, for reductions that have a
/// default instance.
///
/// # Panics
///
/// Panics if the iterator is empty.
impl<R: Reduce + Default> std::iter::FromIterator<R::Value> for LazyTree<R> {
    fn from_iter<I: IntoIterator<Item = R::Value>>(iter: I) -> Self {
        let values: Vec<R::Value> = iter.into_iter().collect();
        LazyTree::from_slice(R::default(), &values)
    }
}
