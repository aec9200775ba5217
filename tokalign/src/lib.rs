//!
//! # tokalign
//!
//! Align two tokenizations of the same text by unit-cost edit distance.
//!
//! Tokens are hashed to 32-bit codes, the full `(m+1) x (n+1)` distance matrix
//! is computed, and the matrix is backtraced twice: once to find for each
//! source token its target token, and once the other way around. The two
//! directions are traced independently and need not be inverses.
//!
//! ```
//! let a = tokalign::align(&["the", "ring", "."], &["the", "rang", "."]).unwrap();
//! assert_eq!(a.distance, 1);
//! assert_eq!(a.source_to_target.to_raw(), vec![0, -1, 2]);
//! ```
//!
//! Use an [`Aligner`] with an [`AlignConfig`] to choose the matrix sweep, how
//! substituted tokens are reported, and the hash function.
//! [`multi_align`] recovers many-to-one alignments the backtrace leaves out.

mod align;
mod config;
mod encode;
mod error;
mod hash;
mod matrix;
mod multi;
mod types;

pub mod stats;
pub mod trace;

pub use align::{align, Aligner, Alignment};
pub use config::{AlignConfig, SubstitutionPolicy};
pub use encode::{encode, Encoded};
pub use error::{AlignError, Result};
pub use hash::{Fx, HasherKind, Murmur3, TokenHasher, SEED};
pub use matrix::{DistanceMatrix, Sweep, PAR_THRESHOLD};
pub use multi::{multi_align, MultiAlignment};
pub use stats::AlignStats;
pub use trace::AlignmentVec;
pub use types::*;
