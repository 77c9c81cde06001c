//! A lazy segment tree over a flat array.
//!
//! The tree represents a fixed-length sequence of values, and can answer
//! an associative reduction (maximum, minimum, sum, and so on) over any
//! contiguous range of the sequence, while also applying two kinds of
//! range updates: adding a constant to every element of a range, and
//! assigning a constant to every element of a range. Every operation
//! takes `O(log n)` time.
//!
//! The reduction is chosen by the user and injected at construction,
//! either as a type implementing [`Reduce`], or as a plain closure
//! through [`FnReduce`]. Ready-made reductions live in [`example_data`].
//!
//! Updates are deferred: a range update is recorded on `O(log n)` tree
//! nodes as a pending tag and only propagated further down when a later
//! operation needs to descend past it. The two update kinds compose:
//! an addition arriving at a node that already holds a pending
//! assignment folds into the assignment, and an assignment erases
//! whatever was pending before it. See [`Pending`] for the exact rules.
//!
//! Note that additive range updates are only meaningful for reductions
//! that are translation invariant (shifting every element by `v` shifts
//! the reduced value by `v`, as for max/min) or that account for the
//! segment length explicitly (as the sum reduction does). See
//! [`Reduce::shift`].

pub mod data;
pub mod trees;

pub use data::example_data;
pub use data::example_data::FnReduce;
pub use data::{Pending, Reduce};
pub use trees::*;
