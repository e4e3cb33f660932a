//! Module for testing using fuzzing (quickcheck)

use std::fmt::Debug;

use crate::*;
use quickcheck::Arbitrary;

mod basic;

#[cfg(miri)]
const DEFAULT_NUM_TESTS: usize = 10;
#[cfg(not(miri))]
const DEFAULT_NUM_TESTS: usize = 10000;
const DEFAULT_GEN_SIZE: usize = 100;

/// Longest key generated for the tests. Keeping it short makes routes overlap and merge often.
const DEPTH: u8 = 10;

fn proptest_runner<A: Arbitrary + Debug + PartialEq, F: Fn(A) -> bool>(f: F) {
    let num_tests: usize = std::env::var("QUICKCHECK_TESTS")
        .ok()
        .and_then(|x| x.parse::<usize>().ok())
        .unwrap_or(DEFAULT_NUM_TESTS);

    let gen_size: usize = std::env::var("QUICKCHECK_GENERATOR_SIZE")
        .ok()
        .and_then(|x| x.parse::<usize>().ok())
        .unwrap_or(DEFAULT_GEN_SIZE);

    let mut gen = quickcheck::Gen::new(gen_size);

    // sample all inputs
    for _ in 0..num_tests {
        let input = A::arbitrary(&mut gen);
        let input_c = input.clone();
        let success = f(input_c);
        if !success {
            shrink_failure(f, input)
        }
    }
}

fn shrink_failure<A: Arbitrary + Debug + PartialEq, F: Fn(A) -> bool>(f: F, input: A) -> ! {
    for i in input.shrink() {
        let i_c = i.clone();
        let success = f(i_c);
        if !success {
            shrink_failure(f, i)
        }
    }
    // if we reach this point, then all shrunken inputs work. Therefore, `inputs` is the minimal
    // input
    panic!(
        "[QUICKCHECK] Test case failed!\n  Minimal input:\n    {:?}",
        input
    );
}

#[allow(missing_docs)]
#[macro_export]
macro_rules! qc {
    ($name:ident, $f:ident) => {
        #[test]
        fn $name() {
            proptest_runner($f)
        }
    };
}

/// A short route of at most [`DEPTH`] bits.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
struct TestRoute(u32, u8);

impl TestRoute {
    fn new(repr: u32, len: u8) -> Self {
        let key = BitSlice::from_repr(repr, len);
        Self((key.repr() >> 96) as u32, key.len())
    }

    fn key(&self) -> BitSlice {
        BitSlice::from_repr(self.0, self.1)
    }
}

impl Debug for TestRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0b{}/{}", self.key(), self.1)
    }
}

impl Arbitrary for TestRoute {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        #[rustfmt::skip]
        let len: u8 = *g
            .choose(&[
                0,
                1,
                2, 2,
                3, 3, 3,
                4, 4, 4, 4,
                5, 5, 5, 5, 5,
                6, 6, 6, 6, 6, 6,
                7, 7, 7, 7, 7, 7, 7,
                8, 8, 8, 8, 8, 8, 8, 8,
                9, 9, 9, 9, 9, 9, 9, 9, 9,
                10, 10, 10, 10, 10, 10, 10, 10, 10, 10,
            ])
            .unwrap();
        let x = u32::arbitrary(g);
        Self::new(x, len)
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        if self.1 == 0 {
            quickcheck::empty_shrinker()
        } else {
            quickcheck::single_shrinker(Self::new(self.0, self.1 - 1))
        }
    }
}

/// Summarize the routes by brute force: mark every covered key of length [`DEPTH`], and report the
/// largest prefixes whose keys are all covered.
fn reference(routes: &[TestRoute]) -> Vec<BitSlice> {
    let mut covered = vec![false; 1 << DEPTH];
    for route in routes {
        let (start, size) = range(&route.key());
        covered[start..start + size].fill(true);
    }
    let mut result = Vec::new();
    reference_blocks(&covered, BitSlice::new(), &mut result);
    result
}

fn reference_blocks(covered: &[bool], prefix: BitSlice, result: &mut Vec<BitSlice>) {
    let (start, size) = range(&prefix);
    let cells = &covered[start..start + size];
    if cells.iter().all(|c| *c) {
        result.push(prefix);
    } else if cells.iter().any(|c| *c) {
        reference_blocks(covered, prefix.concat(&BitSlice::from_repr(0u8, 1)), result);
        reference_blocks(covered, prefix.concat(&BitSlice::from_repr(0x80u8, 1)), result);
    }
}

/// Range of keys of length [`DEPTH`] that are covered by `prefix`.
fn range(prefix: &BitSlice) -> (usize, usize) {
    let start = (prefix.repr() >> (MAX_BITS - DEPTH)) as usize;
    (start, 1 << (DEPTH - prefix.len()))
}

/// Check that every node has zero or two children, and that no node spans all its addresses
/// with two single-bit leaves.
fn structure_ok(t: &RSTrie) -> bool {
    let Some(root) = t.root else {
        return t.len() == 0;
    };
    let mut leaves = 0;
    let mut stack = vec![root];
    while let Some(idx) = stack.pop() {
        match t.table[idx].children {
            None => leaves += 1,
            Some([left, right]) => {
                if t.is_complete(idx)
                    || t.table[left].label.first() != Some(false)
                    || t.table[right].label.first() != Some(true)
                {
                    return false;
                }
                stack.push(left);
                stack.push(right);
            }
        }
    }
    leaves == t.len()
}

fn trie(routes: &[TestRoute]) -> RSTrie {
    routes.iter().map(TestRoute::key).collect()
}
