//! This module defines the operator seam of the library: the [`Reduce`]
//! trait, through which the user injects the reduction that the tree
//! maintains, and the [`Pending`] type, which represents an update that
//! has been recorded at a node but not yet propagated to its children.
//!
//! The tree itself only ever talks to the sequence elements through a
//! `Reduce` instance, so the same tree code serves maximum trees,
//! minimum trees, sum trees and anything else the user comes up with.

pub mod example_data;

use std::ops::Add;

/// The reduction a lazy tree maintains over every segment of its
/// sequence.
///
/// `combine` must be associative, and `identity` must satisfy
/// `combine(identity, x) == x` and `combine(x, identity) == x` for every
/// `x`: queries return the identity as the contribution of the part of
/// the tree that lies outside the queried range. Neither law can be
/// checked by the library; they are the implementor's obligation.
///
/// The two remaining methods describe how the reduced value of a whole
/// segment reacts to the two supported range updates. They receive the
/// segment length so that reductions which scale with length (such as
/// sums) can account for it; reductions which don't can ignore it and
/// keep the default bodies.
pub trait Reduce {
    /// The element type of the sequence, which is also the type of
    /// reduced values.
    type Value: Copy + Add<Output = Self::Value>;

    /// The identity element of [`combine`](Reduce::combine).
    fn identity(&self) -> Self::Value;

    /// The reduction itself. Must be associative.
    fn combine(&self, left: Self::Value, right: Self::Value) -> Self::Value;

    /// The reduced value of a segment of `len` elements after `by` has
    /// been added to every one of them, given that the reduced value
    /// beforehand was `aggregate`.
    ///
    /// The default body returns `aggregate + by`, which is only correct
    /// for translation invariant reductions: those where shifting every
    /// input by a constant shifts the result by the same constant. This
    /// holds for max and min, but not for gcd or bitwise or. A reduction
    /// that is not translation invariant must either override this
    /// method with the true effect (see
    /// [`Sum`](example_data::Sum), which returns
    /// `aggregate + by * len`), or refuse additive updates altogether
    /// (see [`Gcd`](example_data::Gcd)).
    fn shift(&self, aggregate: Self::Value, by: Self::Value, len: usize) -> Self::Value {
        let _ = len;
        aggregate + by
    }

    /// The reduced value of a segment of `len` elements that are all
    /// equal to `to`.
    ///
    /// The default body returns `to`, which is correct for any
    /// idempotent reduction (max, min, gcd, bitwise or). Reductions that
    /// scale with length must override it (see
    /// [`Sum`](example_data::Sum), which returns `to * len`).
    fn fill(&self, to: Self::Value, len: usize) -> Self::Value {
        let _ = len;
        to
    }
}

/// An update recorded at a tree node but not yet pushed down to the
/// node's children.
///
/// A node's pending update has already been folded into that node's own
/// reduced value; it stands for the work still owed to the node's
/// subtree. An [`Empty`](Pending::Empty) tag owes nothing.
///
/// Updates compose without being applied: when a new update reaches a
/// node that already holds a pending one, the two are merged into a
/// single equivalent tag by [`compose`](Pending::compose). This is what
/// keeps every operation logarithmic — a node never holds more than one
/// pending update, no matter how many updates have passed through it.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Pending<T> {
    /// No update owed.
    Empty,
    /// Every element of the subtree still has to have this added to it.
    Add(T),
    /// Every element of the subtree still has to be assigned this.
    Set(T),
}

impl<T: Copy + Add<Output = T>> Pending<T> {
    /// Whether this tag owes nothing to the subtree below it.
    pub fn is_empty(&self) -> bool {
        matches!(self, Pending::Empty)
    }

    /// Merges a chronologically later update into this one, so that
    /// applying the merged tag once is equivalent to applying `self`
    /// first and `later` second.
    ///
    /// The rules:
    /// * A later addition onto a pending addition accumulates.
    /// * A later addition onto a pending assignment folds into the
    ///   assigned value — the subtree is owed "become `s`, then grow by
    ///   `v`", which is the same as "become `s + v`".
    /// * A later assignment erases whatever was pending; assignment
    ///   destroys all prior history of the elements it covers.
    pub fn compose(&mut self, later: Pending<T>) {
        match later {
            Pending::Empty => {}
            Pending::Add(v) => match *self {
                Pending::Empty => *self = Pending::Add(v),
                Pending::Add(a) => *self = Pending::Add(a + v),
                Pending::Set(s) => *self = Pending::Set(s + v),
            },
            Pending::Set(_) => *self = later,
        }
    }

    /// Takes the tag out, leaving [`Empty`](Pending::Empty) behind.
    /// Used when pushing a node's tag down to its children.
    pub fn take(&mut self) -> Pending<T> {
        std::mem::replace(self, Pending::Empty)
    }
}
