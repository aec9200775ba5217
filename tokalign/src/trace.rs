//! Backtracing the distance matrix into per-token alignment vectors.
//!
//! Each direction walks the matrix from the bottom-right corner on its own
//! and only reads it. The two results need not be inverses of each other.
//!
//! Tie-breaking is fixed: the skip loop only moves while doing so strictly
//! lowers the cost, and a token is only reported as unaligned when that is
//! strictly cheaper than aligning it. On ties the walk aligns.

use crate::DistanceMatrix;
use log::trace;
use std::ops::Index;

/// For every token of one sequence, the aligned index in the other sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlignmentVec(Vec<Option<usize>>);

impl AlignmentVec {
    pub fn new(v: Vec<Option<usize>>) -> Self {
        Self(v)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, i: usize) -> Option<usize> {
        self.0.get(i).copied().flatten()
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = Option<usize>> + '_ {
        self.0.iter().copied()
    }

    pub fn as_slice(&self) -> &[Option<usize>] {
        &self.0
    }

    /// Number of tokens with an alignment.
    pub fn num_aligned(&self) -> usize {
        self.0.iter().filter(|x| x.is_some()).count()
    }

    /// The alignment with `-1` for unaligned tokens.
    pub fn to_raw(&self) -> Vec<i32> {
        self.iter().map(|x| x.map_or(-1, |x| x as i32)).collect()
    }

    /// Inverse of [`AlignmentVec::to_raw`]: negative values are unaligned.
    pub fn from_raw(raw: &[i32]) -> Self {
        Self(raw.iter().map(|&x| usize::try_from(x).ok()).collect())
    }
}

impl Index<usize> for AlignmentVec {
    type Output = Option<usize>;

    fn index(&self, i: usize) -> &Option<usize> {
        &self.0[i]
    }
}

impl From<Vec<Option<usize>>> for AlignmentVec {
    fn from(v: Vec<Option<usize>>) -> Self {
        Self(v)
    }
}

impl FromIterator<Option<usize>> for AlignmentVec {
    fn from_iter<T: IntoIterator<Item = Option<usize>>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Align every row (source token) to a column (target token).
///
/// `report(i, j)` is called for every pair the walk aligns; when it returns
/// false the source token is reported as unaligned, but target token `j` is
/// still consumed.
pub fn source_to_target(d: &DistanceMatrix, mut report: impl FnMut(usize, usize) -> bool) -> AlignmentVec {
    let (rows, cols) = d.dims();
    let mut i2j = vec![None; rows - 1];
    // The current cell is (i + 1, c).
    let mut c = cols - 1;
    for i in (0..rows - 1).rev() {
        while c > 0 && d[(i + 1, c - 1)] < d[(i + 1, c)] {
            c -= 1;
        }
        if d[(i, c)] < d[(i + 1, c)] {
            trace!("i2j: {i} deleted at column {c}");
            continue;
        }
        // Column 0 always prefers deletion: d[(i, 0)] < d[(i + 1, 0)].
        debug_assert!(c > 0);
        let j = c - 1;
        if report(i, j) {
            i2j[i] = Some(j);
        }
        c -= 1;
    }
    AlignmentVec(i2j)
}

/// Align every column (target token) to a row (source token).
///
/// Mirror image of [`source_to_target`].
pub fn target_to_source(d: &DistanceMatrix, mut report: impl FnMut(usize, usize) -> bool) -> AlignmentVec {
    let (rows, cols) = d.dims();
    let mut j2i = vec![None; cols - 1];
    // The current cell is (r, j + 1).
    let mut r = rows - 1;
    for j in (0..cols - 1).rev() {
        while r > 0 && d[(r - 1, j + 1)] < d[(r, j + 1)] {
            r -= 1;
        }
        if d[(r, j)] < d[(r, j + 1)] {
            trace!("j2i: {j} inserted at row {r}");
            continue;
        }
        debug_assert!(r > 0);
        let i = r - 1;
        if report(i, j) {
            j2i[j] = Some(i);
        }
        r -= 1;
    }
    AlignmentVec(j2i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Sweep;

    fn matrix(a: &str, b: &str) -> (Vec<u32>, Vec<u32>, DistanceMatrix) {
        let a: Vec<u32> = a.chars().map(|c| c as u32).collect();
        let b: Vec<u32> = b.chars().map(|c| c as u32).collect();
        let d = DistanceMatrix::build(&a, &b, Sweep::default()).unwrap();
        (a, b, d)
    }

    fn raw(a: &str, b: &str) -> (Vec<i32>, Vec<i32>) {
        let (_, _, d) = matrix(a, b);
        (
            source_to_target(&d, |_, _| true).to_raw(),
            target_to_source(&d, |_, _| true).to_raw(),
        )
    }

    fn exact(a: &str, b: &str) -> (Vec<i32>, Vec<i32>) {
        let (a, b, d) = matrix(a, b);
        (
            source_to_target(&d, |i, j| a[i] == b[j]).to_raw(),
            target_to_source(&d, |i, j| a[i] == b[j]).to_raw(),
        )
    }

    #[test]
    fn identity() {
        assert_eq!(raw("abcab", "abcab"), (vec![0, 1, 2, 3, 4], vec![0, 1, 2, 3, 4]));
    }

    #[test]
    fn substitution_is_walked_through() {
        assert_eq!(raw("ring", "rang"), (vec![0, 1, 2, 3], vec![0, 1, 2, 3]));
        assert_eq!(exact("ring", "rang"), (vec![0, -1, 2, 3], vec![0, -1, 2, 3]));
        assert_eq!(raw("x", "y"), (vec![0], vec![0]));
        assert_eq!(exact("x", "y"), (vec![-1], vec![-1]));
    }

    #[test]
    fn empty_sides() {
        assert_eq!(raw("", "ab"), (vec![], vec![-1, -1]));
        assert_eq!(raw("ab", ""), (vec![-1, -1], vec![]));
        assert_eq!(raw("", ""), (vec![], vec![]));
    }

    #[test]
    fn insertion_and_deletion() {
        // `b` has an extra token.
        assert_eq!(raw("ac", "abc"), (vec![0, 2], vec![0, -1, 1]));
        // `a` has an extra token.
        assert_eq!(raw("abc", "ac"), (vec![0, -1, 1], vec![0, 2]));
    }

    #[test]
    fn repeated_tokens_prefer_the_earliest_copy() {
        // D = [[0,1],[1,0],[2,1]]: deleting the second `b` is strictly cheaper
        // than aligning it, so the first one is kept.
        assert_eq!(raw("bb", "b"), (vec![0, -1], vec![0]));
        assert_eq!(raw("b", "bb"), (vec![0], vec![0, -1]));
    }

    #[test]
    fn alignments_need_not_be_inverses() {
        let (i2j, j2i) = raw("ab", "ba");
        // Source `b` aligns to target `b`, but target `b` is left unaligned
        // since the reverse walk pairs target `a` with source `a` instead.
        assert_eq!(i2j, vec![-1, 0]);
        assert_eq!(j2i, vec![-1, 0]);
        assert_ne!(j2i[i2j[1] as usize], 1);

        // A walk that does give inverses.
        assert_eq!(raw("xb", "bz"), (vec![-1, 0], vec![1, -1]));
    }

    #[test]
    fn report_is_called_with_walked_pairs() {
        let (_, _, d) = matrix("abc", "axc");
        let mut pairs = vec![];
        source_to_target(&d, |i, j| {
            pairs.push((i, j));
            true
        });
        assert_eq!(pairs, vec![(2, 2), (1, 1), (0, 0)]);
    }

    #[test]
    fn raw_roundtrip() {
        let v = AlignmentVec::new(vec![Some(3), None, Some(0)]);
        assert_eq!(v.to_raw(), vec![3, -1, 0]);
        assert_eq!(AlignmentVec::from_raw(&[3, -1, 0]), v);
        assert_eq!(v.num_aligned(), 2);
        assert_eq!(v.get(1), None);
        assert_eq!(v.get(7), None);
        assert_eq!(v[0], Some(3));
    }
}
