use alloc::vec::Vec;

use log::debug;

use crate::chain::Chain;
use crate::config::Addressing;
use crate::hash::HashCode;

/// Slot array addressed by hash code.
///
/// Under [`Addressing::Direct`] the table starts empty and grows to
/// `max(hash) + 1` slots on demand. Under [`Addressing::Modulo`] it is
/// allocated at its final size up front. It never shrinks except on
/// [`reset`](Self::reset).
#[derive(Clone, Debug)]
pub(crate) struct BucketTable {
    slots: Vec<Option<Chain>>,
    addressing: Addressing,
}

impl BucketTable {
    pub(crate) fn new(addressing: Addressing) -> Self {
        let mut table = BucketTable {
            slots: Vec::new(),
            addressing,
        };
        table.allocate_fixed();
        table
    }

    fn allocate_fixed(&mut self) {
        if let Addressing::Modulo(buckets) = self.addressing {
            self.slots.resize(buckets.get(), None);
        }
    }

    pub(crate) fn addressing(&self) -> Addressing {
        self.addressing
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub(crate) fn index_of(&self, hash: HashCode) -> usize {
        self.addressing.index_of(hash)
    }

    /// Returns the chain at `index`, or `None` if the slot is empty or past
    /// the end of the table.
    #[inline]
    pub(crate) fn get(&self, index: usize) -> Option<&Chain> {
        self.slots.get(index)?.as_ref()
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut Chain> {
        self.slots.get_mut(index)?.as_mut()
    }

    /// Grows the table so that `hash` addresses a valid slot.
    pub(crate) fn ensure_capacity(&mut self, hash: HashCode) {
        let index = self.index_of(hash);
        if index >= self.slots.len() {
            debug!(
                "growing bucket table from {} to {} slots for hash {}",
                self.slots.len(),
                index + 1,
                hash
            );
            self.slots.resize(index + 1, None);
        }
    }

    /// Stores `chain` at `index`. The slot must be in range.
    pub(crate) fn set(&mut self, index: usize, chain: Chain) {
        self.slots[index] = Some(chain);
    }

    /// Marks `index` empty.
    pub(crate) fn clear(&mut self, index: usize) {
        if let Some(slot) = self.slots.get_mut(index) {
            *slot = None;
        }
    }

    /// Drops every slot. Direct tables go back to zero capacity.
    pub(crate) fn reset(&mut self) {
        self.slots.clear();
        self.allocate_fixed();
    }

    /// Iterates `(index, chain)` over occupied slots.
    #[cfg(any(test, feature = "stats"))]
    pub(crate) fn chains(&self) -> impl Iterator<Item = (usize, &Chain)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_ref().map(|chain| (index, chain)))
    }
}
