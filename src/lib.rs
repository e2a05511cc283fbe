//! chain-map: a string-to-`i32` hash table built on separately-chained
//! buckets.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a small, fully owned hash table whose chain surgery is easy to
//!   reason about in safe Rust.
//! - Layers:
//!   - `Bucket`: one key-value cell owning its successor
//!     (`Option<Box<Bucket>>`). Chains are plain singly-linked lists with no
//!     back-references.
//!   - `ChainedTable<S>`: a `Vec` of chain heads, an entry count and the
//!     put/get/remove/grow algorithms. `S: BuildHasher` chooses the hash;
//!     the default is `foldhash::fast::FixedState`, whose fixed seed keeps
//!     slot placement reproducible.
//!
//! Constraints
//! - Single-threaded: mutation takes `&mut self`; there is no interior
//!   mutability and no locking.
//! - Keys are unique per table. `put` on an existing key overwrites the
//!   value in place and keeps the node's chain position.
//! - Lookups and removals only ever walk the key's own chain.
//!
//! Growth
//! - After each insertion of a new key the table checks
//!   `len / slot_count >= load_factor` and, if so, grows to at least twice
//!   its slot count, or further if that still leaves the ratio at or above
//!   the threshold. Every node is then relinked into
//!   `hash % new_slot_count`, so the slot index of a key is always computed
//!   against the current slot count. Nodes are moved, never reallocated.
//! - Doubling bounds the number of rehashes by the log of the number of
//!   inserts, keeping `put` amortized O(1).
//! - The table never shrinks, including on removal.
//!
//! Deletion
//! - A removal splices the node out of its chain through one of four
//!   cases: middle (predecessor and successor), tail (predecessor only),
//!   head with a successor, or sole head. Removing an absent key is a
//!   no-op.
//!
//! Diagnostics
//! - `dump()` (and `Display`) renders one line per slot:
//!   `[i] = null` or `[i] = (k1, v1) -> (k2, v2)`.
//! - Growth is reported at `debug` level and removals at `trace` level
//!   through `tracing`; no subscriber is installed by the crate.
//!
//! Notes and non-goals
//! - No generic key/value types, iteration API, persistence or
//!   concurrent access.
//! - Long chains are dropped iteratively to keep `Drop` off the stack.

mod bucket;
pub mod config;
mod table;
mod table_proptest;

// Public surface
pub use config::{
    ConfigError, TableConfig, DEFAULT_INITIAL_SLOTS, DEFAULT_LOAD_FACTOR, MIN_LOAD_FACTOR,
};
pub use table::ChainedTable;
