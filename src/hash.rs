//! Pluggable key hashing.
//!
//! Engines reduce whatever the hasher returns modulo their capacity and
//! never look further into it, so any `Fn(&str) -> u64` works, including
//! badly skewed ones. Quality only affects probe/chain length.

/// Plain function pointer hasher; the default hasher type of both engines.
pub type HashFn = fn(&str) -> u64;

/// A hash function over string keys.
pub trait KeyHasher {
    fn hash_key(&self, key: &str) -> u64;
}

impl<F> KeyHasher for F
where
    F: Fn(&str) -> u64,
{
    #[inline]
    fn hash_key(&self, key: &str) -> u64 {
        self(key)
    }
}

/// Sum of the key's character code points.
pub fn sum_hash(key: &str) -> u64 {
    key.chars()
        .fold(0u64, |acc, c| acc.wrapping_add(u64::from(u32::from(c))))
}

/// Position-weighted sum: the i-th character (0-based) contributes
/// `(i + 1) * code_point`. Unlike `sum_hash`, anagrams usually differ.
pub fn weighted_sum_hash(key: &str) -> u64 {
    key.chars().enumerate().fold(0u64, |acc, (i, c)| {
        let weight = (i as u64).wrapping_add(1);
        acc.wrapping_add(weight.wrapping_mul(u64::from(u32::from(c))))
    })
}
