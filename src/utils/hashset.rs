//! The hash-set type used throughout this crate.

/// Hashset using [`hashbrown::HashSet`] with a fixed-seed hasher.
pub type HashSet<K> = hashbrown::hash_set::HashSet<K, foldhash::fast::FixedState>;
