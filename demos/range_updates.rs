//! A judge-style driver for the sum tree, in the format of the usual
//! range-update problems:
//!
//! The first line holds `n` and `q`. The second line holds the `n`
//! initial values. Each of the following `q` lines is one of
//!
//! * `1 l r v` — add `v` to every element of `[l, r]`,
//! * `2 l r v` — assign `v` to every element of `[l, r]`,
//! * `3 l r`   — print the sum of `[l, r]`,
//!
//! with `l` and `r` given 1-based and inclusive.

use sapling::RangeSum;
use text_io::read;

fn main() {
    let n: usize = read!();
    let q: usize = read!();
    let values: Vec<i64> = (0..n).map(|_| read!()).collect();
    let mut tree = RangeSum::sums(&values);

    for _ in 0..q {
        let kind: u32 = read!();
        let l: usize = read!();
        let r: usize = read!();
        match kind {
            1 => {
                let by: i64 = read!();
                tree.range_add(l - 1, r - 1, by);
            }
            2 => {
                let to: i64 = read!();
                tree.range_set(l - 1, r - 1, to);
            }
            3 => println!("{}", tree.range_sum(l - 1, r - 1)),
            _ => panic!("unknown query type {}", kind),
        }
    }
}
