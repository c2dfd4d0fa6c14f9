use core::num::NonZeroUsize;

use crate::hash::HashCode;

/// How hash codes map to bucket slots.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Addressing {
    /// The hash code is the slot index. The table grows to
    /// `max(hash) + 1` slots and never shrinks.
    #[default]
    Direct,
    /// A fixed number of slots addressed by `hash % buckets`. Chains then hold
    /// both true collisions and keys that merely share a slot.
    Modulo(NonZeroUsize),
}

impl Addressing {
    /// Returns the slot for `hash`.
    #[inline]
    pub fn index_of(self, hash: HashCode) -> usize {
        match self {
            Addressing::Direct => hash.as_index(),
            Addressing::Modulo(buckets) => hash.as_index() % buckets.get(),
        }
    }
}

/// Construction options for a [`Dictionary`](crate::Dictionary).
///
/// # Examples
///
/// ```rust
/// use core::num::NonZeroUsize;
///
/// use direct_dict::config::Addressing;
/// use direct_dict::config::DictConfig;
/// use direct_dict::Dictionary;
///
/// let config = DictConfig::new()
///     .addressing(Addressing::Modulo(NonZeroUsize::new(64).unwrap()))
///     .initial_capacity(16);
/// let dict = Dictionary::with_config(config);
/// assert_eq!(dict.capacity(), 64);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DictConfig {
    pub(crate) addressing: Addressing,
    pub(crate) initial_capacity: usize,
}

impl DictConfig {
    /// Direct addressing, no preallocation.
    pub const fn new() -> Self {
        DictConfig {
            addressing: Addressing::Direct,
            initial_capacity: 0,
        }
    }

    /// Sets the bucket addressing scheme.
    pub const fn addressing(mut self, addressing: Addressing) -> Self {
        self.addressing = addressing;
        self
    }

    /// Number of entries to reserve room for in the key registry and entry
    /// arena. Does not affect the bucket table.
    pub const fn initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Returns the configured addressing scheme.
    pub const fn get_addressing(&self) -> Addressing {
        self.addressing
    }
}
