use rand::Rng;
use sapling::*;
use std::fmt::Debug;

/// A plain array kept in lockstep with the tree under test. Every
/// operation is the obvious linear scan, so whatever this answers is
/// the truth the tree has to match.
pub struct NaiveRange<R: Reduce> {
    op: R,
    pub values: Vec<R::Value>,
}

impl<R: Reduce> NaiveRange<R> {
    pub fn new(op: R, values: &[R::Value]) -> Self {
        NaiveRange {
            op,
            values: values.to_vec(),
        }
    }

    pub fn range_add(&mut self, l: usize, r: usize, by: R::Value) {
        for v in &mut self.values[l..=r] {
            *v = *v + by;
        }
    }

    pub fn range_set(&mut self, l: usize, r: usize, to: R::Value) {
        for v in &mut self.values[l..=r] {
            *v = to;
        }
    }

    pub fn range_query(&self, l: usize, r: usize) -> R::Value {
        let mut acc = self.op.identity();
        for &v in &self.values[l..=r] {
            acc = self.op.combine(acc, v);
        }
        acc
    }
}

/// Something to perform in one round of tests.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RoundAction<T> {
    Add { l: usize, r: usize, by: T },
    Set { l: usize, r: usize, to: T },
    Query { l: usize, r: usize },
}

/// Runs one round on the tree and on the naive mirror, and checks that
/// any answers agree.
pub fn run_round<R>(
    tree: &mut LazyTree<R>,
    naive: &mut NaiveRange<R>,
    action: RoundAction<R::Value>,
) where
    R: Reduce,
    R::Value: PartialEq + Debug,
{
    match action {
        RoundAction::Add { l, r, by } => {
            tree.range_add(l, r, by);
            naive.range_add(l, r, by);
        }
        RoundAction::Set { l, r, to } => {
            tree.range_set(l, r, to);
            naive.range_set(l, r, to);
        }
        RoundAction::Query { l, r } => {
            assert_eq!(
                tree.range_query(l, r),
                naive.range_query(l, r),
                "query disagreement on [{}, {}]",
                l,
                r
            );
        }
    }
}

/// Runs a whole prepared sequence of rounds, checking the node
/// invariant after every round and the full sequence contents at the
/// end. This is the entry point the property tests drive.
pub fn check_rounds<R>(op: R, initial: &[R::Value], actions: &[RoundAction<R::Value>])
where
    R: Reduce + Clone,
    R::Value: PartialEq + Debug,
{
    let mut tree = LazyTree::from_slice(op.clone(), initial);
    let mut naive = NaiveRange::new(op, initial);
    for &action in actions {
        run_round(&mut tree, &mut naive, action);
        tree.assert_correctness();
    }
    assert_eq!(tree.to_vec(), naive.values);
}

fn random_endpoints(rng: &mut rand::rngs::ThreadRng, len: usize) -> (usize, usize) {
    let a = rng.gen_range(0..len);
    let b = rng.gen_range(0..len);
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

const MAX_ADD: i64 = 200;

fn random_round_action(rng: &mut rand::rngs::ThreadRng, len: usize) -> RoundAction<i64> {
    let (l, r) = random_endpoints(rng, len);
    match rng.gen_range(0..3) {
        0 => RoundAction::Add {
            l,
            r,
            by: rng.gen_range(-MAX_ADD..=MAX_ADD),
        },
        1 => RoundAction::Set {
            l,
            r,
            to: rng.gen_range(-MAX_ADD..=MAX_ADD),
        },
        2 => RoundAction::Query { l, r },
        _ => panic!(),
    }
}

const INITIAL_SIZE: usize = 200;

/// Randomized consistency driver: a fresh random sequence, then
/// `num_rounds` random additions, assignments and queries checked
/// against the naive mirror.
pub fn check_consistency<R>(op: R, num_rounds: u32)
where
    R: Reduce<Value = i64> + Clone,
{
    let mut rng = rand::thread_rng();
    let initial: Vec<i64> = (0..INITIAL_SIZE)
        .map(|_| rng.gen_range(-MAX_ADD..=MAX_ADD))
        .collect();

    let mut tree = LazyTree::from_slice(op.clone(), &initial);
    let mut naive = NaiveRange::new(op, &initial);

    for _ in 0..num_rounds {
        let action = random_round_action(&mut rng, INITIAL_SIZE);
        run_round(&mut tree, &mut naive, action);
        // This check takes `O(n)` time, but the sequences here are
        // small enough that the whole run stays fast.
        tree.assert_correctness();
    }
    assert_eq!(tree.to_vec(), naive.values);
}
