use std::{
    fmt::Display,
    io::{stdout, Write},
    sync::atomic::{AtomicBool, Ordering},
};

use derive_more::AddAssign;

use crate::Cost;

/// Wall time in seconds spent in each phase.
#[derive(Default, Clone, Copy, AddAssign, Debug)]
pub struct Timing {
    /// encode + matrix + trace
    pub total: f64,
    /// hashing both token sequences
    pub encode: f64,
    /// filling the distance matrix
    pub matrix: f64,
    /// both backtraces
    pub trace: f64,
}

#[derive(Default, Clone, Copy, AddAssign, Debug)]
pub struct AlignStats {
    pub len_a: usize,
    pub len_b: usize,
    /// The computed distance.
    pub distance: Cost,
    /// Source tokens with an alignment.
    pub aligned_a: usize,
    /// Target tokens with an alignment.
    pub aligned_b: usize,

    pub timing: Timing,
    pub sample_size: usize,
}

static PRINTED_HEADER: AtomicBool = AtomicBool::new(false);

impl AlignStats {
    pub fn init(len_a: usize, len_b: usize) -> Self {
        Self {
            len_a,
            len_b,
            sample_size: 1,
            ..Default::default()
        }
    }

    pub fn print(&self) {
        self.print_internal(true);
    }
    pub fn print_no_newline(&self) {
        self.print_internal(false);
    }

    fn format_raw<T: Display>(width: usize, title: &str, val: T) -> (String, String) {
        (format!("{:>width$}", title), format!("{:>width$}", val))
    }

    fn format_flt(mut width: usize, title: &str, val: f64) -> (String, String) {
        let val = val.to_string();
        // make sure to not discard things before the decimal point.
        let point = val.find('.').unwrap_or(val.len());
        width = width.max(point);
        let val = &val[..val.len().min(width)];
        (format!("{:>width$}", title), format!("{:>width$}", val))
    }

    fn format_avg(&self, width: usize, title: &str, val: f64) -> (String, String) {
        Self::format_flt(width, title, val / self.sample_size.max(1) as f64)
    }

    /// Column headers and values, averaged over `sample_size`.
    pub fn values(&self) -> (Vec<String>, Vec<String>) {
        [
            Self::format_raw(7, "nr", self.sample_size),
            self.format_avg(10, "|a|", self.len_a as f64),
            self.format_avg(10, "|b|", self.len_b as f64),
            self.format_avg(9, "al(a)", self.aligned_a as f64),
            self.format_avg(9, "al(b)", self.aligned_b as f64),
            self.format_avg(7, "ed", self.distance as f64),
            Self::format_flt(
                5,
                "e%",
                100.0 * self.distance as f64 / self.len_a.max(self.len_b).max(1) as f64,
            ),
            self.format_avg(8, "t", 1000. * self.timing.total),
            self.format_avg(6, "enc", 1000. * self.timing.encode),
            self.format_avg(6, "dp", 1000. * self.timing.matrix),
            self.format_avg(6, "trace", 1000. * self.timing.trace),
        ]
        .into_iter()
        .unzip()
    }

    fn print_internal(&self, newline: bool) {
        let (header, values) = self.values();
        if !PRINTED_HEADER.swap(true, Ordering::Relaxed) {
            println!("{}", header.join(" "));
        }
        print!("{}", values.join(" "));
        if newline {
            println!();
        } else {
            // Nothing sensible to do when stdout is gone.
            let _ = stdout().flush();
        }
    }
}
