//! The full unit-cost edit distance matrix.
//!
//! `D[i, j]` is the edit distance between the first `i` tokens of `a` and the
//! first `j` tokens of `b`. Substitutions, insertions and deletions all cost
//! 1; equal tokens are free.
//!
//! The matrix is stored row-major in a single buffer of `(m+1)*(n+1)` costs.
//! It can be filled in three orders. All of them respect the dependency of a
//! cell on its top, left and top-left neighbours and give identical results.

use crate::{AlignError, Cost, Result, Seq};
use clap::ValueEnum;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::{
    cmp::{max, min},
    fmt,
    ops::{Index, Range},
};

/// Anti-diagonals with at least this many cells are computed in parallel.
pub const PAR_THRESHOLD: usize = 4096;

/// The order in which cells of the matrix are computed.
#[derive(ValueEnum, Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Sweep {
    /// Outer loop over `b`, inner loop over `a`.
    #[default]
    ColumnMajor,
    /// Outer loop over `a`, inner loop over `b`.
    RowMajor,
    /// One anti-diagonal `i + j = k` at a time. Long diagonals are evaluated
    /// on the rayon thread pool when the `parallel` feature is enabled.
    AntiDiagonal,
}

#[derive(Clone, PartialEq, Eq)]
pub struct DistanceMatrix {
    rows: usize,
    cols: usize,
    data: Vec<Cost>,
}

/// The cost of cell `(i+1, j+1)` given its neighbours.
#[inline]
fn cell(diag: Cost, up: Cost, left: Cost, equal: bool) -> Cost {
    let sub = diag + !equal as Cost;
    let ins = left + 1;
    let del = up + 1;
    min(min(sub, ins), del)
}

impl DistanceMatrix {
    /// Compute the matrix for `a` (rows) and `b` (columns).
    pub fn build(a: Seq, b: Seq, sweep: Sweep) -> Result<Self> {
        let mut d = Self::init(a.len(), b.len())?;
        match sweep {
            Sweep::ColumnMajor => d.fill_column_major(a, b),
            Sweep::RowMajor => d.fill_row_major(a, b),
            Sweep::AntiDiagonal => d.fill_anti_diagonal(a, b),
        }
        Ok(d)
    }

    /// Allocate the matrix and fill row 0 and column 0.
    fn init(m: usize, n: usize) -> Result<Self> {
        let too_long = || AlignError::TooLong { m, n };
        let rows = m.checked_add(1).ok_or_else(too_long)?;
        let cols = n.checked_add(1).ok_or_else(too_long)?;
        let size = rows.checked_mul(cols).ok_or_else(too_long)?;
        if m.checked_add(n).map_or(true, |s| s > Cost::MAX as usize) {
            return Err(too_long());
        }

        let mut data = vec![0; size];
        for j in 0..cols {
            data[j] = j as Cost;
        }
        for i in 0..rows {
            data[i * cols] = i as Cost;
        }
        Ok(Self { rows, cols, data })
    }

    fn fill_column_major(&mut self, a: Seq, b: Seq) {
        let cols = self.cols;
        let d = &mut self.data;
        for (j, &cb) in b.iter().enumerate() {
            for (i, &ca) in a.iter().enumerate() {
                let top = i * cols + j;
                let bot = top + cols;
                d[bot + 1] = cell(d[top], d[top + 1], d[bot], ca == cb);
            }
        }
    }

    fn fill_row_major(&mut self, a: Seq, b: Seq) {
        let cols = self.cols;
        for (i, &ca) in a.iter().enumerate() {
            let (prev, next) = self.data[i * cols..(i + 2) * cols].split_at_mut(cols);
            for (j, &cb) in b.iter().enumerate() {
                next[j + 1] = cell(prev[j], prev[j + 1], next[j], ca == cb);
            }
        }
    }

    fn fill_anti_diagonal(&mut self, a: Seq, b: Seq) {
        let (m, n) = (a.len(), b.len());
        let cols = self.cols;
        let mut diagonal = Vec::with_capacity(min(m, n));
        // Cells (i, j) with 1 <= i <= m, 1 <= j <= n and i + j = k.
        for k in 2..=m + n {
            let lo = max(1, k.saturating_sub(n));
            let hi = min(m, k - 1);
            if lo > hi {
                continue;
            }
            let d = &self.data;
            let compute = |i: usize| {
                let j = k - i;
                let top = (i - 1) * cols + j - 1;
                let bot = top + cols;
                cell(d[top], d[top + 1], d[bot], a[i - 1] == b[j - 1])
            };
            eval_range(lo..hi + 1, compute, &mut diagonal);
            for (i, &c) in (lo..=hi).zip(&diagonal) {
                self.data[i * cols + k - i] = c;
            }
        }
    }

    /// `(m+1, n+1)`.
    pub fn dims(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The edit distance between the full sequences, `D[m, n]`.
    pub fn distance(&self) -> Cost {
        self.data[self.data.len() - 1]
    }

    pub fn get(&self, i: usize, j: usize) -> Option<Cost> {
        (i < self.rows && j < self.cols).then(|| self.data[i * self.cols + j])
    }

    pub fn row(&self, i: usize) -> &[Cost] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    /// The underlying row-major buffer.
    pub fn as_slice(&self) -> &[Cost] {
        &self.data
    }

    pub fn to_rows(&self) -> Vec<Vec<Cost>> {
        self.data.chunks(self.cols).map(|r| r.to_vec()).collect()
    }
}

/// Evaluate `f` on every index of `range` into `out`.
#[cfg(feature = "parallel")]
fn eval_range(range: Range<usize>, f: impl Fn(usize) -> Cost + Send + Sync, out: &mut Vec<Cost>) {
    use rayon::prelude::*;
    if range.len() >= PAR_THRESHOLD {
        range.into_par_iter().map(f).collect_into_vec(out);
    } else {
        out.clear();
        out.extend(range.map(f));
    }
}

#[cfg(not(feature = "parallel"))]
fn eval_range(range: Range<usize>, f: impl Fn(usize) -> Cost, out: &mut Vec<Cost>) {
    out.clear();
    out.extend(range.map(f));
}

impl Index<(usize, usize)> for DistanceMatrix {
    type Output = Cost;

    #[inline]
    fn index(&self, (i, j): (usize, usize)) -> &Cost {
        debug_assert!(i < self.rows && j < self.cols);
        &self.data[i * self.cols + j]
    }
}

impl fmt::Debug for DistanceMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "DistanceMatrix {}x{}", self.rows, self.cols)?;
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for DistanceMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.distance().max(max(self.rows, self.cols) as Cost).to_string().len();
        for i in 0..self.rows {
            writeln!(f, "{}", self.row(i).iter().map(|c| format!("{c:>width$}")).join(" "))?;
        }
        Ok(())
    }
}
