use alloc::vec;
use alloc::vec::Vec;

use crate::bucket_table::BucketTable;

/// Bucket and chain statistics for a [`Dictionary`](crate::Dictionary).
///
/// Returned by [`Dictionary::debug_stats`](crate::Dictionary::debug_stats).
#[derive(Debug, Clone, PartialEq)]
pub struct DictStats {
    /// Number of keys stored
    pub entries: usize,
    /// Number of bucket slots allocated
    pub buckets: usize,
    /// Number of slots holding a chain
    pub occupied_buckets: usize,
    /// Length of the longest chain
    pub longest_chain: usize,
    /// Entries that share their bucket with at least one other entry
    pub colliding_entries: usize,
    /// `chain_histogram[n]` is the number of chains of length `n`
    pub chain_histogram: Vec<usize>,
}

impl DictStats {
    pub(crate) fn collect(table: &BucketTable, entries: usize) -> Self {
        let mut histogram = vec![0usize];
        let mut occupied = 0;
        let mut colliding = 0;

        for (_, chain) in table.chains() {
            let len = chain.len();
            occupied += 1;
            if len > 1 {
                colliding += len;
            }
            if histogram.len() <= len {
                histogram.resize(len + 1, 0);
            }
            histogram[len] += 1;
        }

        DictStats {
            entries,
            buckets: table.capacity(),
            occupied_buckets: occupied,
            longest_chain: histogram.len() - 1,
            colliding_entries: colliding,
            chain_histogram: histogram,
        }
    }

    /// Fraction of bucket slots holding a chain.
    pub fn bucket_utilization(&self) -> f64 {
        if self.buckets == 0 {
            0.0
        } else {
            self.occupied_buckets as f64 / self.buckets as f64
        }
    }

    /// Pretty-print the statistics.
    #[cfg(feature = "std")]
    pub fn print(&self) {
        println!("=== Dictionary Statistics ===");
        println!("Entries: {}", self.entries);
        println!(
            "Buckets: {}/{} occupied ({:.2}% utilization)",
            self.occupied_buckets,
            self.buckets,
            self.bucket_utilization() * 100.0
        );
        println!(
            "Collisions: {} entries in shared buckets, longest chain {}",
            self.colliding_entries, self.longest_chain
        );
        for (len, count) in self.chain_histogram.iter().enumerate().skip(1) {
            if *count > 0 {
                println!("  chains of length {len:>3}: {count}");
            }
        }
    }
}
