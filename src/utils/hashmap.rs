//! The hash-map type used throughout this crate.
//!
//! The hasher is seeded with a fixed state so that iteration order, and
//! therefore every result of the slicing pipeline, is deterministic across
//! runs for bit-identical inputs.

pub use hashbrown::hash_map::Entry;

/// Hashmap using [`hashbrown::HashMap`] with a fixed-seed hasher.
pub type HashMap<K, V> = hashbrown::hash_map::HashMap<K, V, foldhash::fast::FixedState>;
