//! Deterministic string hash used as the game's only source of randomness
//!
//! The same fold drives both the level layout (seeded from a string) and the
//! per-frame alien decisions (seeded from the serialized world). It is not
//! cryptographic; it only has to be fast, stable across runs, and cover the
//! full `u32` range.

use serde::Serialize;

const OFFSET_BASIS: u32 = 0x811C_9DC5;
const PRIME: u32 = 0x0100_0193;

/// 2^32, for mapping a hash onto `[0, 1)`
const HASH_RANGE: f64 = 4_294_967_296.0;

/// Incremental form of [`hash`]
///
/// Hashing is a left fold over UTF-16 code units, so a shared prefix can be
/// folded once and resumed for many suffixes:
/// `StringHash::new().write(a).write(b).finish() == hash(&(a + b))`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StringHash {
    acc: u32,
}

impl Default for StringHash {
    fn default() -> Self {
        Self::new()
    }
}

impl StringHash {
    pub const fn new() -> Self {
        Self { acc: OFFSET_BASIS }
    }

    /// Fold `text` into the accumulator
    #[must_use]
    pub fn write(self, text: &str) -> Self {
        let acc = text
            .encode_utf16()
            .fold(self.acc, |acc, unit| (acc ^ u32::from(unit)).wrapping_mul(PRIME));
        Self { acc }
    }

    /// Final avalanche step
    pub fn finish(self) -> u32 {
        self.acc ^ (self.acc >> 16)
    }
}

/// Hash a string to a `u32`
pub fn hash(text: &str) -> u32 {
    StringHash::new().write(text).finish()
}

/// Map a hash onto `[0, 1)`
#[inline]
pub fn unit(h: u32) -> f64 {
    f64::from(h) / HASH_RANGE
}

/// Canonical serialization used as hash input
///
/// Compact JSON with fields in declaration order. Changing the shape of any
/// serialized type changes every layout and alien decision.
pub fn fingerprint<T: Serialize + ?Sized>(value: &T) -> String {
    // Plain data with string keys only; a failure is a data-model bug.
    serde_json::to_string(value).expect("game data serializes to JSON (plain data, string keys)")
}

/// Pick a letter from the alphabet using a hash
#[inline]
pub fn letter_for(h: u32) -> char {
    use crate::consts::ALPHABET;
    char::from(ALPHABET[(h % ALPHABET.len() as u32) as usize])
}
