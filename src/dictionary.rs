use alloc::string::String;
use core::fmt;
use core::iter::FusedIterator;
use core::slice;

use log::debug;
use log::trace;

use crate::bucket_table::BucketTable;
use crate::chain::Chain;
use crate::chain::Entry;
use crate::chain::EntryArena;
use crate::chain::EntryId;
use crate::config::Addressing;
use crate::config::DictConfig;
use crate::error::DictError;
use crate::error::Result;
use crate::hash::HashCode;
use crate::hash::KeyHasher;
use crate::hash::PositionalHasher;
use crate::registry::KeyEntry;
use crate::registry::KeyRegistry;

/// A string-to-string dictionary that remembers insertion order.
///
/// Keys are hashed with `H` (the positional hash by default) and addressed
/// directly into a bucket table. Keys whose hash codes coincide share a
/// chain in their bucket and are told apart by value. A separate key registry
/// keeps keys in insertion order for [`enumerate`](Self::enumerate);
/// removing a key closes the gap it leaves.
///
/// # Performance Characteristics
///
/// - `lookup` and `upsert`: one hash plus a walk of a (normally one-entry)
///   chain.
/// - `remove`: linear in the number of keys inserted after the removed one,
///   which all move down one registry position.
/// - **Memory**: with direct addressing the bucket table holds
///   `max(hash) + 1` slots, however sparse.
///
/// # Examples
///
/// ```rust
/// use direct_dict::Dictionary;
///
/// let mut airports = Dictionary::new();
/// airports.upsert("MCO", "Orlando International");
/// airports.upsert("STI", "Aeropuerto Cibao");
///
/// assert_eq!(airports.lookup("STI"), Ok("Aeropuerto Cibao"));
/// assert!(airports.lookup("JFK").is_err());
///
/// airports.remove("MCO").unwrap();
/// let pairs: Vec<_> = airports.enumerate().collect();
/// assert_eq!(pairs, [("STI", "Aeropuerto Cibao")]);
/// ```
#[derive(Clone)]
pub struct Dictionary<H = PositionalHasher> {
    table: BucketTable,
    arena: EntryArena,
    registry: KeyRegistry,
    hasher: H,
}

impl Dictionary<PositionalHasher> {
    /// Creates an empty dictionary with direct addressing.
    pub fn new() -> Self {
        Self::with_config_and_hasher(DictConfig::new(), PositionalHasher)
    }

    /// Creates an empty dictionary using the positional hash and `config`.
    pub fn with_config(config: DictConfig) -> Self {
        Self::with_config_and_hasher(config, PositionalHasher)
    }
}

impl Default for Dictionary<PositionalHasher> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: KeyHasher> Dictionary<H> {
    /// Creates an empty dictionary that hashes keys with `hasher`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use direct_dict::hash::HashCode;
    /// use direct_dict::hash::KeyHasher;
    /// use direct_dict::Dictionary;
    ///
    /// struct LengthHasher;
    ///
    /// impl KeyHasher for LengthHasher {
    ///     fn hash_key(&self, key: &str) -> HashCode {
    ///         HashCode::from_signed(key.len() as i32)
    ///     }
    /// }
    ///
    /// let mut dict = Dictionary::with_hasher(LengthHasher);
    /// dict.upsert("abc", "1");
    /// dict.upsert("xyz", "2");
    /// assert_eq!(dict.lookup("xyz"), Ok("2"));
    /// assert_eq!(dict.capacity(), 4);
    /// ```
    pub fn with_hasher(hasher: H) -> Self {
        Self::with_config_and_hasher(DictConfig::new(), hasher)
    }

    /// Creates an empty dictionary from `config` that hashes keys with
    /// `hasher`.
    pub fn with_config_and_hasher(config: DictConfig, hasher: H) -> Self {
        Dictionary {
            table: BucketTable::new(config.addressing),
            arena: EntryArena::with_capacity(config.initial_capacity),
            registry: KeyRegistry::with_capacity(config.initial_capacity),
            hasher,
        }
    }

    /// Returns the number of keys.
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    /// Returns `true` if there are no keys.
    pub fn is_empty(&self) -> bool {
        self.registry.len() == 0
    }

    /// Returns the number of bucket slots.
    ///
    /// Under direct addressing this is one more than the largest hash code
    /// inserted since construction or the last [`clear`](Self::clear).
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Returns the bucket addressing scheme.
    pub fn addressing(&self) -> Addressing {
        self.table.addressing()
    }

    /// Returns the hasher.
    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    /// Returns the hash code `key` would be stored under.
    pub fn hash_of(&self, key: &str) -> HashCode {
        self.hasher.hash_key(key)
    }

    fn locate(&self, hash: HashCode, key: &str) -> Option<(usize, Chain, EntryId)> {
        let index = self.table.index_of(hash);
        let chain = *self.table.get(index)?;
        let registry = &self.registry;
        let id = chain.find(&self.arena, |entry| {
            entry.hash == hash && registry.key_at(entry.position) == Some(key)
        })?;
        Some((index, chain, id))
    }

    /// Returns the value stored for `key`.
    ///
    /// # Errors
    ///
    /// [`DictError::NotFound`] if `key` is absent.
    pub fn lookup(&self, key: &str) -> Result<&str> {
        self.get(key).ok_or_else(|| DictError::not_found(key))
    }

    /// Returns the value stored for `key`, if any.
    pub fn get(&self, key: &str) -> Option<&str> {
        let hash = self.hasher.hash_key(key);
        let (_, _, id) = self.locate(hash, key)?;
        Some(self.arena[id].value.as_str())
    }

    /// Returns `true` if `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Inserts `key` with `value`, or overwrites the value of an existing key.
    ///
    /// A new key is appended to the end of the enumeration order. Overwriting
    /// keeps the key where it is. Returns the previous value, if any.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use direct_dict::Dictionary;
    ///
    /// let mut dict = Dictionary::new();
    /// assert_eq!(dict.upsert("SDQ", "Las Americas"), None);
    /// assert_eq!(
    ///     dict.upsert("SDQ", "Aeropuerto Las Americas").as_deref(),
    ///     Some("Las Americas")
    /// );
    /// assert_eq!(dict.len(), 1);
    /// ```
    pub fn upsert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let value = value.into();
        let hash = self.hasher.hash_key(&key);

        if let Some((_, _, id)) = self.locate(hash, &key) {
            trace!("overwriting value of key {key:?}");
            return Some(core::mem::replace(&mut self.arena[id].value, value));
        }

        self.table.ensure_capacity(hash);
        let index = self.table.index_of(hash);
        let position = self.registry.len();
        let id = self.arena.insert(Entry::new(value, hash, position));
        match self.table.get_mut(index) {
            Some(chain) => chain.append(&mut self.arena, id),
            None => self.table.set(index, Chain::new(id)),
        }

        trace!("inserted key {key:?} (hash {hash}) at position {position}");
        let registered = self.registry.append(key, hash, id);
        debug_assert_eq!(registered, position);
        None
    }

    /// Removes `key` and returns its value.
    ///
    /// Keys after it in the enumeration order move up one place; their
    /// relative order is unchanged.
    ///
    /// # Errors
    ///
    /// [`DictError::NotFound`] if `key` is absent; the dictionary is left
    /// unchanged.
    pub fn remove(&mut self, key: &str) -> Result<String> {
        let hash = self.hasher.hash_key(key);
        let (index, chain, id) = self
            .locate(hash, key)
            .ok_or_else(|| DictError::not_found(key))?;

        match chain.unlink(&mut self.arena, id) {
            Some(rest) => self.table.set(index, rest),
            None => self.table.clear(index),
        }
        let entry = self.arena.remove(id);
        let removed = self.registry.remove_at(entry.position, &mut self.arena);
        debug_assert_eq!(removed.entry, id);
        debug_assert_eq!(removed.hash, hash);

        trace!(
            "removed key {key:?} from position {}, {} keys moved up",
            entry.position,
            self.registry.len() - entry.position
        );
        Ok(entry.value)
    }

    /// Removes every key. Under direct addressing the bucket table is
    /// released as well.
    pub fn clear(&mut self) {
        debug!(
            "clearing dictionary of {} keys and {} buckets",
            self.registry.len(),
            self.table.capacity()
        );
        self.registry.clear();
        self.arena.clear();
        self.table.reset();
    }

    #[cfg(feature = "stats")]
    /// Collects bucket and chain statistics.
    pub fn debug_stats(&self) -> crate::stats::DictStats {
        crate::stats::DictStats::collect(&self.table, self.registry.len())
    }
}

impl<H> Dictionary<H> {
    /// Iterates `(key, value)` pairs in insertion order.
    pub fn enumerate(&self) -> Enumerate<'_> {
        Enumerate {
            keys: self.registry.iter(),
            arena: &self.arena,
        }
    }

    /// Iterates keys in insertion order.
    pub fn keys(&self) -> Keys<'_> {
        Keys {
            inner: self.enumerate(),
        }
    }

    /// Iterates values in key insertion order.
    pub fn values(&self) -> Values<'_> {
        Values {
            inner: self.enumerate(),
        }
    }
}

impl<H> fmt::Debug for Dictionary<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.enumerate()).finish()
    }
}

/// Writes `[{key, value} {key, value} ]`.
impl<H> fmt::Display for Dictionary<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (key, value) in self.enumerate() {
            write!(f, "{{{key}, {value}}} ")?;
        }
        f.write_str("]")
    }
}

impl<K, V, H> Extend<(K, V)> for Dictionary<H>
where
    K: Into<String>,
    V: Into<String>,
    H: KeyHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.upsert(key, value);
        }
    }
}

impl<K, V, H> FromIterator<(K, V)> for Dictionary<H>
where
    K: Into<String>,
    V: Into<String>,
    H: KeyHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut dict = Dictionary::with_hasher(H::default());
        dict.extend(iter);
        dict
    }
}

impl<'a, H> IntoIterator for &'a Dictionary<H> {
    type IntoIter = Enumerate<'a>;
    type Item = (&'a str, &'a str);

    fn into_iter(self) -> Self::IntoIter {
        self.enumerate()
    }
}

/// Iterator over `(key, value)` pairs in insertion order.
///
/// Created by [`Dictionary::enumerate`].
#[derive(Clone)]
pub struct Enumerate<'a> {
    keys: slice::Iter<'a, KeyEntry>,
    arena: &'a EntryArena,
}

impl<'a> Iterator for Enumerate<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        let key = self.keys.next()?;
        Some((key.key.as_str(), self.arena[key.entry].value.as_str()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.keys.size_hint()
    }
}

impl ExactSizeIterator for Enumerate<'_> {}

impl FusedIterator for Enumerate<'_> {}

/// Iterator over keys in insertion order.
#[derive(Clone)]
pub struct Keys<'a> {
    inner: Enumerate<'a>,
}

impl<'a> Iterator for Keys<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Keys<'_> {}

/// Iterator over values in key insertion order.
#[derive(Clone)]
pub struct Values<'a> {
    inner: Enumerate<'a>,
}

impl<'a> Iterator for Values<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Values<'_> {}

#[cfg(test)]
impl<H: KeyHasher> Dictionary<H> {
    /// Panics unless the table, chains, arena and registry agree.
    fn assert_consistent(&self) {
        use alloc::vec::Vec;

        assert_eq!(self.registry.len(), self.arena.len(), "registry vs arena");

        let mut chained = 0;
        for (index, chain) in self.table.chains() {
            let mut keys = Vec::new();
            for (_, entry) in chain.iter(&self.arena) {
                assert_eq!(self.table.index_of(entry.hash), index, "entry in wrong bucket");
                let key = self
                    .registry
                    .key_at(entry.position)
                    .expect("back-reference past end of registry");
                assert!(!keys.contains(&key), "duplicate key {key:?} in chain");
                keys.push(key);
            }
            assert_eq!(keys.len(), chain.len(), "chain length out of sync");
            chained += keys.len();
        }
        assert_eq!(chained, self.registry.len(), "chained entries vs registry");

        for (position, key) in self.registry.iter().enumerate() {
            let entry = &self.arena[key.entry];
            assert_eq!(entry.position, position, "stale back-reference");
            assert_eq!(entry.hash, key.hash);
            assert_eq!(self.hasher.hash_key(&key.key), key.hash);
            let chain = self
                .table
                .get(self.table.index_of(key.hash))
                .expect("registered key has no chain");
            assert!(chain.iter(&self.arena).any(|(id, _)| id == key.entry));
        }
    }
}
