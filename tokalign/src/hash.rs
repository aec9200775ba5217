//! Hashing of token bytes into the 32-bit alphabet used by the matrix.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::hash::Hasher;

/// The seed every token is hashed with.
pub const SEED: u32 = 0;

/// A deterministic hash of a token's bytes.
///
/// Two tokens are considered identical exactly when their hashes are equal,
/// so implementations must be stable across runs.
pub trait TokenHasher: Send + Sync {
    fn hash32(&self, bytes: &[u8], seed: u32) -> u32;
}

/// MurmurHash3 x86_32. Matches the codes produced by other tools that hash
/// tokens with `hash32(bytes, len, 0)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Murmur3;

impl TokenHasher for Murmur3 {
    fn hash32(&self, mut bytes: &[u8], seed: u32) -> u32 {
        // Reading from a slice cannot fail.
        murmur3::murmur3_32(&mut bytes, seed).expect("reading from a byte slice")
    }
}

/// FxHash folded to 32 bits. Faster, but codes are only meaningful within
/// this crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct Fx;

impl TokenHasher for Fx {
    fn hash32(&self, bytes: &[u8], seed: u32) -> u32 {
        let mut h = rustc_hash::FxHasher::default();
        h.write_u32(seed);
        h.write_usize(bytes.len());
        h.write(bytes);
        let h = h.finish();
        (h ^ (h >> 32)) as u32
    }
}

/// Selects one of the built-in hashers.
#[derive(ValueEnum, Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum HasherKind {
    #[default]
    Murmur3,
    Fx,
}

impl HasherKind {
    pub fn build(&self) -> Box<dyn TokenHasher> {
        match self {
            HasherKind::Murmur3 => Box::new(Murmur3),
            HasherKind::Fx => Box::new(Fx),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn murmur3_reference_values() {
        // Published MurmurHash3 x86_32 test vectors.
        assert_eq!(Murmur3.hash32(b"", 0), 0);
        assert_eq!(Murmur3.hash32(b"", 1), 0x514e_28b7);
        assert_eq!(Murmur3.hash32(b"hello", 0), 0x248b_fa47);
        assert_eq!(Murmur3.hash32(b"hello world", 0), 1_586_663_183);
    }

    #[test]
    fn hashers_are_deterministic() {
        for kind in [HasherKind::Murmur3, HasherKind::Fx] {
            let h = kind.build();
            assert_eq!(h.hash32(b"token", SEED), h.hash32(b"token", SEED));
            assert_ne!(h.hash32(b"token", SEED), h.hash32(b"tokens", SEED));
        }
    }
}
