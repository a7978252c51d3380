//! The contract shared by both engines.

/// A string-keyed map over a fixed slot array.
///
/// Both engines implement this identically from the caller's side; they
/// differ only in collision policy and in when they grow.
pub trait Map<V> {
    /// Insert `key`, or overwrite its value in place if already present.
    fn put(&mut self, key: &str, value: V);

    fn get(&self, key: &str) -> Option<&V>;

    fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Remove `key`; returns whether an entry was removed.
    fn remove(&mut self, key: &str) -> bool;

    /// Empty every slot. Capacity is unchanged.
    fn clear(&mut self);

    /// Rehash every live entry into a fresh store of `new_capacity` slots.
    /// Invalid targets are declined silently; check `capacity()` afterwards.
    fn resize_table(&mut self, new_capacity: usize);

    /// `len / capacity`.
    fn table_load(&self) -> f64 {
        self.len() as f64 / self.capacity() as f64
    }

    fn empty_buckets(&self) -> usize;

    /// Live keys in slot order.
    fn keys(&self) -> Vec<&str>;

    /// Number of live entries.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn capacity(&self) -> usize;
}
