#![warn(missing_docs)]
#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod bucket_table;
mod chain;
mod registry;

/// Bucket addressing and construction options.
pub mod config;

/// The insertion-ordered string dictionary.
///
/// This module provides [`Dictionary`], which composes the hash function,
/// bucket table, collision chains and key registry into lookup, upsert,
/// remove and enumerate.
pub mod dictionary;

/// Error type returned by dictionary operations.
pub mod error;

/// Key hash functions.
pub mod hash;

cfg_if::cfg_if! {
    if #[cfg(feature = "stats")] {
        /// Bucket and chain statistics.
        pub mod stats;
        pub use stats::DictStats;
    }
}

pub use config::Addressing;
pub use config::DictConfig;
pub use dictionary::Dictionary;
pub use error::DictError;
pub use error::Result;
pub use hash::HashCode;
pub use hash::KeyHasher;
pub use hash::PositionalHasher;
