//! Collision chains and the entry arena backing them.
//!
//! Chain nodes are stored in an [`EntryArena`] and link to each other by
//! [`EntryId`]. A [`Chain`] is just the head, tail and length of one linked
//! run of nodes; the bucket table stores it by value.

use alloc::string::String;
use alloc::vec::Vec;
use core::ops::Index;
use core::ops::IndexMut;

use crate::hash::HashCode;

/// Stable index of an entry in the arena.
///
/// An id stays valid until its entry is removed; the slot may then be reused
/// by a later insertion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct EntryId(usize);

/// A chain node: one live value plus its registry back-reference.
#[derive(Clone, Debug)]
pub(crate) struct Entry {
    pub(crate) value: String,
    pub(crate) hash: HashCode,
    /// Current position of the owning key in the registry.
    pub(crate) position: usize,
    prev: Option<EntryId>,
    next: Option<EntryId>,
}

impl Entry {
    pub(crate) fn new(value: String, hash: HashCode, position: usize) -> Self {
        Entry {
            value,
            hash,
            position,
            prev: None,
            next: None,
        }
    }
}

#[derive(Clone, Debug)]
enum Slot {
    Occupied(Entry),
    Vacant { next_free: Option<EntryId> },
}

/// Slab of chain nodes with a free list.
#[derive(Clone, Debug, Default)]
pub(crate) struct EntryArena {
    slots: Vec<Slot>,
    free_head: Option<EntryId>,
    len: usize,
}

impl EntryArena {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        EntryArena {
            slots: Vec::with_capacity(capacity),
            free_head: None,
            len: 0,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn insert(&mut self, entry: Entry) -> EntryId {
        self.len += 1;
        match self.free_head {
            Some(id) => {
                let slot = core::mem::replace(&mut self.slots[id.0], Slot::Occupied(entry));
                match slot {
                    Slot::Vacant { next_free } => self.free_head = next_free,
                    Slot::Occupied(_) => unreachable!("free list points at live entry {id:?}"),
                }
                id
            }
            None => {
                self.slots.push(Slot::Occupied(entry));
                EntryId(self.slots.len() - 1)
            }
        }
    }

    /// Frees the slot and returns its entry. The entry must already be
    /// unlinked from its chain.
    pub(crate) fn remove(&mut self, id: EntryId) -> Entry {
        let vacant = Slot::Vacant {
            next_free: self.free_head,
        };
        match core::mem::replace(&mut self.slots[id.0], vacant) {
            Slot::Occupied(entry) => {
                debug_assert!(entry.prev.is_none() && entry.next.is_none());
                self.free_head = Some(id);
                self.len -= 1;
                entry
            }
            Slot::Vacant { .. } => unreachable!("double free of entry {id:?}"),
        }
    }

    pub(crate) fn get(&self, id: EntryId) -> Option<&Entry> {
        match self.slots.get(id.0)? {
            Slot::Occupied(entry) => Some(entry),
            Slot::Vacant { .. } => None,
        }
    }

    pub(crate) fn get_mut(&mut self, id: EntryId) -> Option<&mut Entry> {
        match self.slots.get_mut(id.0)? {
            Slot::Occupied(entry) => Some(entry),
            Slot::Vacant { .. } => None,
        }
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free_head = None;
        self.len = 0;
    }
}

impl Index<EntryId> for EntryArena {
    type Output = Entry;

    fn index(&self, id: EntryId) -> &Entry {
        match self.get(id) {
            Some(entry) => entry,
            None => panic!("stale entry id {id:?}"),
        }
    }
}

impl IndexMut<EntryId> for EntryArena {
    fn index_mut(&mut self, id: EntryId) -> &mut Entry {
        match self.get_mut(id) {
            Some(entry) => entry,
            None => panic!("stale entry id {id:?}"),
        }
    }
}

/// A non-empty doubly-linked run of entries sharing one bucket.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Chain {
    head: EntryId,
    tail: EntryId,
    len: usize,
}

impl Chain {
    /// Starts a chain holding only `id`.
    pub(crate) fn new(id: EntryId) -> Self {
        Chain {
            head: id,
            tail: id,
            len: 1,
        }
    }

    #[cfg(any(test, feature = "stats"))]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Returns the first entry matching `eq`, scanning from the head.
    pub(crate) fn find(&self, arena: &EntryArena, eq: impl Fn(&Entry) -> bool) -> Option<EntryId> {
        self.iter(arena).find(|(_, entry)| eq(entry)).map(|(id, _)| id)
    }

    /// Links `id` after the current tail.
    pub(crate) fn append(&mut self, arena: &mut EntryArena, id: EntryId) {
        let old_tail = self.tail;
        arena[old_tail].next = Some(id);
        let entry = &mut arena[id];
        entry.prev = Some(old_tail);
        entry.next = None;
        self.tail = id;
        self.len += 1;
    }

    /// Unlinks `id`, returning the remaining chain or `None` if it is now
    /// empty.
    pub(crate) fn unlink(mut self, arena: &mut EntryArena, id: EntryId) -> Option<Chain> {
        let (prev, next) = {
            let entry = &mut arena[id];
            (entry.prev.take(), entry.next.take())
        };

        match prev {
            Some(prev) => arena[prev].next = next,
            None => {
                debug_assert_eq!(self.head, id);
                self.head = next?;
            }
        }
        match next {
            Some(next) => arena[next].prev = prev,
            None => {
                debug_assert_eq!(self.tail, id);
                // `prev` is `Some` here: a head-and-tail entry returned above.
                if let Some(prev) = prev {
                    self.tail = prev;
                }
            }
        }

        self.len -= 1;
        Some(self)
    }

    pub(crate) fn iter<'a>(&self, arena: &'a EntryArena) -> ChainIter<'a> {
        ChainIter {
            arena,
            next: Some(self.head),
        }
    }
}

/// Iterates a chain from head to tail.
pub(crate) struct ChainIter<'a> {
    arena: &'a EntryArena,
    next: Option<EntryId>,
}

impl<'a> Iterator for ChainIter<'a> {
    type Item = (EntryId, &'a Entry);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        let entry = &self.arena[id];
        self.next = entry.next;
        Some((id, entry))
    }
}
