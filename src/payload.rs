//! Pseudo-random payloads for mock values and text input
//!
//! Seeds derive from a stable key (normally a declaration's identity), so two
//! runs over the same source produce the same suite.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use sha2::{Digest, Sha256};

/// Address typed into email-shaped fields
pub const VALID_EMAIL: &str = "example@email.com";

/// Length of generated mock strings
pub const MOCK_STRING_LENGTH: usize = 20;

/// Exclusive upper bound of generated mock numbers
pub const MOCK_NUMBER_BOUND: i64 = 100;

/// Added to numeric candidates when negative numbers are enabled
pub const NEGATIVE_SENTINEL: i64 = -1;

/// Exclusive upper bound of numbers typed into numeric fields
pub const INPUT_NUMBER_BOUND: i64 = 100_000;

/// Length range of strings typed into text fields
pub const INPUT_STRING_LENGTH: std::ops::RangeInclusive<usize> = 8..=24;

const CHAR_POOL: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Source of random strings and numbers
#[derive(Debug, Clone)]
pub struct Payloads {
    rng: SmallRng,
}

impl Payloads {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Seed from the SHA-256 of `key`
    pub fn for_key(key: &str) -> Self {
        let digest = Sha256::digest(key.as_bytes());
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&digest[..8]);
        Self::seeded(u64::from_le_bytes(bytes))
    }

    /// Alphanumeric string of exactly `len` characters
    pub fn string(&mut self, len: usize) -> String {
        (0..len)
            .map(|_| CHAR_POOL[self.rng.random_range(0..CHAR_POOL.len())] as char)
            .collect()
    }

    /// Alphanumeric string with a length drawn from `range`
    pub fn string_in(&mut self, range: std::ops::RangeInclusive<usize>) -> String {
        let len = self.rng.random_range(range);
        self.string(len)
    }

    /// Number in `0..bound`
    pub fn number(&mut self, bound: i64) -> i64 {
        self.rng.random_range(0..bound.max(1))
    }
}
