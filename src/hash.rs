use core::fmt;

/// A non-negative 31-bit hash code.
///
/// Under [`Addressing::Direct`](crate::config::Addressing::Direct) the code is
/// used as the bucket index as-is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct HashCode(u32);

impl HashCode {
    /// Largest code any hasher may produce.
    pub const MAX: HashCode = HashCode(i32::MAX as u32);

    /// Builds a code from a signed accumulator by clearing the sign bit.
    #[inline]
    pub const fn from_signed(acc: i32) -> Self {
        HashCode((acc & i32::MAX) as u32)
    }

    /// Folds a 64-bit hash down to 31 bits.
    #[inline]
    pub const fn from_wide(hash: u64) -> Self {
        HashCode::from_signed((hash ^ (hash >> 32)) as u32 as i32)
    }

    /// Returns the raw code.
    #[inline]
    pub const fn get(self) -> u32 {
        self.0
    }

    #[inline]
    pub(crate) const fn as_index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for HashCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Maps a key to its [`HashCode`].
///
/// Implementations must be deterministic: the same key always produces the
/// same code for the lifetime of a dictionary.
pub trait KeyHasher {
    /// Computes the hash code of `key`.
    fn hash_key(&self, key: &str) -> HashCode;
}

impl<H: KeyHasher + ?Sized> KeyHasher for &H {
    #[inline]
    fn hash_key(&self, key: &str) -> HashCode {
        (**self).hash_key(key)
    }
}

/// The default hasher: every byte contributes `byte * index + byte`.
///
/// ```text
/// hash(key) = Σ (b[i] * i + b[i])   for i in 0..len
/// ```
///
/// Bytes are the key's UTF-8 bytes read as unsigned values. The sum is
/// accumulated in an `i32` with two's-complement wrapping on overflow, then
/// the sign bit is cleared. Short keys never overflow, so the code equals the
/// plain arithmetic sum; for keys longer than a few thousand bytes the code is
/// the sum modulo 2^32 with the top bit dropped.
///
/// # Examples
///
/// ```rust
/// use direct_dict::hash::KeyHasher;
/// use direct_dict::hash::PositionalHasher;
///
/// // 'M' * 1 + 'C' * 2 + 'O' * 3
/// assert_eq!(PositionalHasher.hash_key("MCO").get(), 77 + 67 * 2 + 79 * 3);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PositionalHasher;

impl KeyHasher for PositionalHasher {
    #[inline]
    fn hash_key(&self, key: &str) -> HashCode {
        positional_hash(key)
    }
}

/// Free-function form of [`PositionalHasher`].
#[inline]
pub fn positional_hash(key: &str) -> HashCode {
    let mut acc: i32 = 0;
    for (i, &byte) in key.as_bytes().iter().enumerate() {
        let code = byte as i32;
        acc = acc
            .wrapping_add(code.wrapping_mul(i as i32))
            .wrapping_add(code);
    }
    HashCode::from_signed(acc)
}

cfg_if::cfg_if! {
    if #[cfg(feature = "foldhash")] {
        use core::hash::BuildHasher;

        /// A fixed-seed foldhash hasher folded to 31 bits.
        ///
        /// Codes spread over the whole 31-bit range, so pair this with
        /// [`Addressing::Modulo`](crate::config::Addressing::Modulo); under direct
        /// addressing a single key could grow the bucket table to billions of
        /// slots.
        #[derive(Clone, Copy, Debug, Default)]
        pub struct FoldHasher {
            seed: u64,
        }

        impl FoldHasher {
            /// Creates a hasher with the given seed.
            pub const fn with_seed(seed: u64) -> Self {
                FoldHasher { seed }
            }
        }

        impl KeyHasher for FoldHasher {
            fn hash_key(&self, key: &str) -> HashCode {
                let state = foldhash::fast::FixedState::with_seed(self.seed);
                HashCode::from_wide(state.hash_one(key))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use super::*;

    #[test]
    fn airport_codes() {
        assert_eq!(positional_hash("MCO").get(), 448);
        assert_eq!(positional_hash("STI").get(), 470);
        assert_eq!(positional_hash("SDQ").get(), 462);
    }

    #[test]
    fn empty_key_hashes_to_zero() {
        assert_eq!(positional_hash(""), HashCode::default());
        assert_eq!(PositionalHasher.hash_key("").get(), 0);
    }

    #[test]
    fn single_byte_is_its_code() {
        assert_eq!(positional_hash("A").get(), 65);
        assert_eq!(positional_hash("\0").get(), 0);
    }

    #[test]
    fn known_true_collision() {
        // 'a' + 'b' * 2 == 'c' + 'a' * 2
        assert_eq!(positional_hash("ab"), positional_hash("ca"));
        assert_eq!(positional_hash("ab").get(), 293);
        assert_ne!(positional_hash("ab"), positional_hash("ba"));
    }

    #[test]
    fn long_keys_wrap_without_going_negative() {
        // 122 * (1 + 2 + ... + 10_000) = 6_100_610_000, which wraps once.
        let key: String = core::iter::repeat_n('z', 10_000).collect();
        assert_eq!(positional_hash(&key).get(), 1_805_642_704);

        // 122 * (1 + ... + 6000) = 2_196_366_000 lands in the negative i32 range.
        let key: String = core::iter::repeat_n('z', 6000).collect();
        assert_eq!(positional_hash(&key).get(), 2_196_366_000 - (1u32 << 31));
        assert!(positional_hash(&key) <= HashCode::MAX);
    }

    #[test]
    fn non_ascii_bytes_are_unsigned() {
        // U+00E9 encodes as 0xC3 0xA9.
        assert_eq!(positional_hash("é").get(), 0xC3 + 0xA9 * 2);
    }

    #[test]
    fn borrowed_hasher_matches_owned() {
        let hasher = PositionalHasher;
        let by_ref = &hasher;
        assert_eq!(by_ref.hash_key("SDQ"), hasher.hash_key("SDQ"));
    }

    #[test]
    fn from_wide_clears_sign_bit() {
        assert_eq!(HashCode::from_wide(u64::MAX).get(), 0);
        assert_eq!(HashCode::from_wide(0xFFFF_FFFF).get(), i32::MAX as u32);
        assert_eq!(HashCode::from_wide(1).get(), 1);
    }

    #[cfg(feature = "foldhash")]
    #[test]
    fn fold_hasher_is_deterministic_per_seed() {
        let a = FoldHasher::with_seed(7);
        let b = FoldHasher::with_seed(7);
        assert_eq!(a.hash_key("STI"), b.hash_key("STI"));
        assert!(a.hash_key("STI") <= HashCode::MAX);
    }
}
