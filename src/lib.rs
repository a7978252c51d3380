//! slot-hashmap: string-keyed hash maps built directly on a fixed slot
//! array, with two interchangeable collision policies.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a map whose collision handling and resizing are fully
//!   visible, with no hash-table primitive underneath.
//! - Layers:
//!   - SlotStore<T>: index-addressable storage (append/get/set/len).
//!     Both engines address their table only through it.
//!   - KeyHasher: pluggable `&str -> u64` function, injected once at
//!     construction. Engines reduce it modulo capacity and nothing else.
//!   - OpenAddressingMap<V, H>: one entry per slot, quadratic probing,
//!     tombstone deletion, doubles before placing any entry that would
//!     bring the load to 0.5.
//!   - ChainingMap<V, H>: one singly linked list per slot, nodes kept in
//!     a `SlotMap` arena; never grows on its own.
//!   - `Map<V>`: the contract both engines implement.
//!
//! Invariants
//! - `capacity >= 1` at all times; construction with 0 fails.
//! - `table_load() == len() / capacity()` exactly.
//! - Open addressing: every live entry is reachable from its natural
//!   index along the probe sequence; lookups stop at the first Empty
//!   slot and step over tombstones.
//! - Open addressing: `table_load() < 0.5` whenever `put` returns.
//! - Chaining: a bucket holds at most one entry per key, in insertion
//!   order.
//!
//! Resizing
//! - Both engines rebuild by snapshotting live entries in slot order,
//!   swapping in an empty store, and re-inserting through the normal
//!   insert path. The rebuilt table therefore obeys exactly the same
//!   placement rules as one filled from scratch. Tombstones are dropped.
//! - Invalid targets (0, or below `len()` for open addressing) are
//!   declined without a state change; a `tracing` debug event records
//!   the refusal.
//!
//! Probe termination
//! - Quadratic offsets repeat with period `capacity`, so a probe walks at
//!   most `capacity` steps. A lookup that completes the cycle reports the
//!   key absent. An insert that completes it without a free slot doubles
//!   the table and retries.
//!
//! Notes and non-goals
//! - Single-threaded; no internal synchronization.
//! - Keys are `String`s; no generic key support.
//! - Hash quality only affects performance, never correctness.
//!
//! `mode::find_mode` is a small consumer of the public API that counts
//! occurrences with a `ChainingMap`.

mod chaining;
mod error;
pub mod hash;
mod map;
mod map_proptest;
pub mod mode;
mod open_addressing;
pub mod slot_store;

// Public surface
pub use chaining::ChainingMap;
pub use error::MapError;
pub use hash::{sum_hash, weighted_sum_hash, HashFn, KeyHasher};
pub use map::Map;
pub use mode::{find_mode, Mode};
pub use open_addressing::{OpenAddressingMap, MAX_LOAD_FACTOR};
pub use slot_store::SlotStore;
