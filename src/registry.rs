//! The insertion-ordered key registry.
//!
//! Every live key occupies one registry position in `[0, len)`. The chain
//! entry owning the key's value records that position, so removing a key
//! from the middle must rewrite the back-reference of every key after it.

use alloc::string::String;
use alloc::vec::Vec;
use core::slice;

use crate::chain::EntryArena;
use crate::chain::EntryId;
use crate::hash::HashCode;

/// A registered key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct KeyEntry {
    pub(crate) key: String,
    pub(crate) hash: HashCode,
    /// The arena entry holding this key's value.
    pub(crate) entry: EntryId,
}

#[derive(Clone, Debug, Default)]
pub(crate) struct KeyRegistry {
    keys: Vec<KeyEntry>,
}

impl KeyRegistry {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        KeyRegistry {
            keys: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns the key stored at `position`, or `None` past the end.
    pub(crate) fn key_at(&self, position: usize) -> Option<&str> {
        self.keys.get(position).map(|k| k.key.as_str())
    }

    /// Appends a key and returns its position.
    pub(crate) fn append(&mut self, key: String, hash: HashCode, entry: EntryId) -> usize {
        self.keys.push(KeyEntry { key, hash, entry });
        self.keys.len() - 1
    }

    /// Removes the key at `position` and shifts every later key down by one,
    /// rewriting the back-reference of each shifted key's entry.
    ///
    /// The entry of the removed key is left untouched; the caller is expected
    /// to have freed it already or to free it next.
    pub(crate) fn remove_at(&mut self, position: usize, arena: &mut EntryArena) -> KeyEntry {
        let removed = self.keys.remove(position);
        for (offset, shifted) in self.keys[position..].iter().enumerate() {
            let new_position = position + offset;
            let entry = &mut arena[shifted.entry];
            debug_assert_eq!(entry.position, new_position + 1);
            entry.position = new_position;
        }
        removed
    }

    /// Iterates key entries in registry order. The n-th item sits at
    /// position n.
    pub(crate) fn iter(&self) -> slice::Iter<'_, KeyEntry> {
        self.keys.iter()
    }

    pub(crate) fn clear(&mut self) {
        self.keys.clear();
    }
}
