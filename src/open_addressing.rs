//! OpenAddressingMap: quadratic probing with tombstone deletion.
//!
//! Each slot holds at most one entry. A key whose natural slot is taken is
//! placed along the probe sequence `(initial + j²) mod capacity`. Removal
//! only tombstones the slot, so entries placed behind it stay reachable;
//! tombstones are dropped the next time the table is rebuilt.
//!
//! Before a new entry is placed, the table doubles for as long as the entry
//! would bring the load factor to `MAX_LOAD_FACTOR`, so the load is always
//! strictly below it once `put` returns. Overwriting a live key never grows
//! the table.

use core::fmt;

use tracing::{debug, trace};

use crate::error::MapError;
use crate::hash::{HashFn, KeyHasher};
use crate::map::Map;
use crate::slot_store::SlotStore;

/// Load factor the table never reaches; `put` doubles the table first.
pub const MAX_LOAD_FACTOR: f64 = 0.5;

#[derive(Debug, Clone)]
struct Entry<V> {
    key: String,
    value: V,
}

#[derive(Debug, Clone)]
enum Slot<V> {
    Empty,
    Occupied { entry: Entry<V>, tombstone: bool },
}

impl<V> Slot<V> {
    #[inline]
    fn live(&self) -> Option<&Entry<V>> {
        match self {
            Slot::Occupied {
                entry,
                tombstone: false,
            } => Some(entry),
            _ => None,
        }
    }
}

/// Outcome of walking a key's probe sequence for insertion.
enum Probe {
    /// The key is live at this index.
    Live(usize),
    /// The key is absent; this is the first reusable slot on its path.
    Vacant(usize),
    /// The sequence cycled without meeting the key or a reusable slot.
    Exhausted,
}

/// Indices `(initial + j²) mod capacity` for `j` in `0..capacity`.
///
/// Squares repeat with period `capacity`, so stopping there visits every
/// slot the sequence can ever reach.
struct ProbeSeq {
    index: usize,
    j: usize,
    capacity: usize,
}

impl Iterator for ProbeSeq {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        if self.j >= self.capacity {
            return None;
        }
        let current = self.index;
        // (j + 1)² - j² = 2j + 1
        let step = (2 * self.j + 1) % self.capacity;
        self.index = (self.index + step) % self.capacity;
        self.j += 1;
        Some(current)
    }
}

pub struct OpenAddressingMap<V, H = HashFn> {
    slots: SlotStore<Slot<V>>,
    capacity: usize,
    size: usize,
    hasher: H,
}

impl<V> OpenAddressingMap<V> {
    pub fn new(capacity: usize, hash: HashFn) -> Result<Self, MapError> {
        Self::with_hasher(capacity, hash)
    }
}

impl<V, H> OpenAddressingMap<V, H>
where
    H: KeyHasher,
{
    pub fn with_hasher(capacity: usize, hasher: H) -> Result<Self, MapError> {
        if capacity == 0 {
            return Err(MapError::ZeroCapacity);
        }
        Ok(Self {
            slots: SlotStore::filled(capacity, || Slot::Empty),
            capacity,
            size: 0,
            hasher,
        })
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    #[inline]
    fn probe(&self, key: &str) -> ProbeSeq {
        let initial = (self.hasher.hash_key(key) % self.capacity as u64) as usize;
        ProbeSeq {
            index: initial,
            j: 0,
            capacity: self.capacity,
        }
    }

    /// Index of the live entry for `key`. An Empty slot ends the search:
    /// nothing was ever placed past it on this path.
    fn find_live(&self, key: &str) -> Option<usize> {
        for i in self.probe(key) {
            match self.slots.get_at(i) {
                None | Some(Slot::Empty) => return None,
                Some(slot) => {
                    if slot.live().is_some_and(|e| e.key == key) {
                        return Some(i);
                    }
                }
            }
        }
        None
    }

    fn find_insert_slot(&self, key: &str) -> Probe {
        let mut first_tombstone = None;
        for i in self.probe(key) {
            match self.slots.get_at(i) {
                None | Some(Slot::Empty) => return Probe::Vacant(first_tombstone.unwrap_or(i)),
                Some(Slot::Occupied { entry, tombstone }) => {
                    if *tombstone {
                        first_tombstone.get_or_insert(i);
                    } else if entry.key == key {
                        return Probe::Live(i);
                    }
                }
            }
        }
        first_tombstone.map_or(Probe::Exhausted, Probe::Vacant)
    }

    #[inline]
    fn would_overload(&self) -> bool {
        (self.size + 1) as f64 / self.capacity as f64 >= MAX_LOAD_FACTOR
    }

    fn grow(&mut self) {
        let target = self.capacity.saturating_mul(2);
        debug!(
            capacity = self.capacity,
            target,
            live = self.size,
            "growing open-addressing table"
        );
        self.resize_table(target);
    }

    pub fn put(&mut self, key: &str, value: V) {
        self.insert_key(key, value);
    }

    /// Insert path shared by `put` and rehashing; `key` is only converted
    /// to an owned `String` when a new entry is created.
    fn insert_key<K>(&mut self, key: K, value: V)
    where
        K: AsRef<str> + Into<String>,
    {
        loop {
            match self.find_insert_slot(key.as_ref()) {
                Probe::Live(i) => {
                    if let Some(Slot::Occupied { entry, .. }) = self.slots.get_at_mut(i) {
                        entry.value = value;
                    }
                    return;
                }
                Probe::Vacant(_) if self.would_overload() => self.grow(),
                Probe::Vacant(i) => {
                    if let Some(Slot::Occupied { entry, .. }) = self.slots.get_at(i) {
                        trace!(index = i, previous = %entry.key, "reusing tombstone");
                    }
                    let entry = Entry {
                        key: key.into(),
                        value,
                    };
                    self.slots.set_at(
                        i,
                        Slot::Occupied {
                            entry,
                            tombstone: false,
                        },
                    );
                    self.size += 1;
                    return;
                }
                // Only reachable for capacities whose squares cover few
                // residues; a larger table has a longer cycle.
                Probe::Exhausted => self.grow(),
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        let i = self.find_live(key)?;
        self.slots.get_at(i)?.live().map(|e| &e.value)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let i = self.find_live(key)?;
        match self.slots.get_at_mut(i)? {
            Slot::Occupied {
                entry,
                tombstone: false,
            } => Some(&mut entry.value),
            _ => None,
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.find_live(key).is_some()
    }

    /// Tombstone the entry for `key`. Returns whether it was present.
    pub fn remove(&mut self, key: &str) -> bool {
        let Some(i) = self.find_live(key) else {
            return false;
        };
        if let Some(Slot::Occupied { tombstone, .. }) = self.slots.get_at_mut(i) {
            *tombstone = true;
        }
        self.size -= 1;
        true
    }

    /// Rebuild the table with `new_capacity` slots, re-inserting every live
    /// entry through the normal insert path. Declined without any change if
    /// `new_capacity` is 0 or smaller than the live entry count.
    ///
    /// Re-insertion keeps the load below `MAX_LOAD_FACTOR` like any other
    /// insert, so `capacity()` ends up larger than `new_capacity` whenever
    /// `new_capacity <= 2 * len()`.
    pub fn resize_table(&mut self, new_capacity: usize) {
        if new_capacity < 1 || new_capacity < self.size {
            debug!(
                capacity = self.capacity,
                requested = new_capacity,
                live = self.size,
                "declining open-addressing resize"
            );
            return;
        }
        debug!(
            from = self.capacity,
            to = new_capacity,
            live = self.size,
            "rehashing open-addressing table"
        );
        let old = core::mem::replace(
            &mut self.slots,
            SlotStore::filled(new_capacity, || Slot::Empty),
        );
        self.capacity = new_capacity;
        self.size = 0;
        for slot in old {
            if let Slot::Occupied {
                entry,
                tombstone: false,
            } = slot
            {
                self.insert_key(entry.key, entry.value);
            }
        }
    }

    pub fn table_load(&self) -> f64 {
        self.size as f64 / self.capacity as f64
    }

    /// Slots that are strictly Empty; tombstones do not count.
    pub fn empty_buckets(&self) -> usize {
        self.slots
            .iter()
            .filter(|s| matches!(s, Slot::Empty))
            .count()
    }

    pub fn clear(&mut self) {
        self.slots = SlotStore::filled(self.capacity, || Slot::Empty);
        self.size = 0;
    }

    pub fn keys(&self) -> Vec<&str> {
        self.iter().map(|(k, _)| k).collect()
    }

    /// Live entries in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> + '_ {
        self.slots
            .iter()
            .filter_map(Slot::live)
            .map(|e| (e.key.as_str(), &e.value))
    }
}

impl<V, H> Map<V> for OpenAddressingMap<V, H>
where
    H: KeyHasher,
{
    fn put(&mut self, key: &str, value: V) {
        OpenAddressingMap::put(self, key, value)
    }

    fn get(&self, key: &str) -> Option<&V> {
        OpenAddressingMap::get(self, key)
    }

    fn contains_key(&self, key: &str) -> bool {
        OpenAddressingMap::contains_key(self, key)
    }

    fn remove(&mut self, key: &str) -> bool {
        OpenAddressingMap::remove(self, key)
    }

    fn clear(&mut self) {
        OpenAddressingMap::clear(self)
    }

    fn resize_table(&mut self, new_capacity: usize) {
        OpenAddressingMap::resize_table(self, new_capacity)
    }

    fn table_load(&self) -> f64 {
        OpenAddressingMap::table_load(self)
    }

    fn empty_buckets(&self) -> usize {
        OpenAddressingMap::empty_buckets(self)
    }

    fn keys(&self) -> Vec<&str> {
        OpenAddressingMap::keys(self)
    }

    fn len(&self) -> usize {
        self.size
    }

    fn capacity(&self) -> usize {
        self.capacity
    }
}

impl<V: fmt::Debug, H> fmt::Display for OpenAddressingMap<V, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, slot) in self.slots.iter().enumerate() {
            match slot {
                Slot::Empty => writeln!(f, "{i}: None")?,
                Slot::Occupied {
                    entry,
                    tombstone: false,
                } => writeln!(f, "{i}: {}: {:?}", entry.key, entry.value)?,
                Slot::Occupied {
                    entry,
                    tombstone: true,
                } => writeln!(f, "{i}: <tombstone {}>", entry.key)?,
            }
        }
        Ok(())
    }
}

impl<V: fmt::Debug, H> fmt::Debug for OpenAddressingMap<V, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAddressingMap")
            .field("capacity", &self.capacity)
            .field("size", &self.size)
            .field("slots", &self.slots)
            .finish()
    }
}
