//! SlotStore: fixed-growth, index-addressable storage the engines build on.
//!
//! The engines only ever use `append`, `get_at`, `set_at` and `len`; the
//! store never reorders or hashes anything on its own.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotStore<T> {
    data: Vec<T>,
}

impl<T> SlotStore<T> {
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    pub fn with_capacity(cap: usize) -> Self {
        Self {
            data: Vec::with_capacity(cap),
        }
    }

    /// Build a store of `len` slots, each produced by `fill`.
    pub fn filled<F>(len: usize, mut fill: F) -> Self
    where
        F: FnMut() -> T,
    {
        let mut store = Self::with_capacity(len);
        for _ in 0..len {
            store.append(fill());
        }
        store
    }

    pub fn append(&mut self, value: T) {
        self.data.push(value);
    }

    #[inline]
    pub fn get_at(&self, index: usize) -> Option<&T> {
        self.data.get(index)
    }

    #[inline]
    pub fn get_at_mut(&mut self, index: usize) -> Option<&mut T> {
        self.data.get_mut(index)
    }

    /// Overwrite slot `index`, returning the previous occupant.
    /// Out-of-range indices leave the store untouched and return `None`.
    pub fn set_at(&mut self, index: usize, value: T) -> Option<T> {
        self.data
            .get_mut(index)
            .map(|slot| core::mem::replace(slot, value))
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.data.iter()
    }
}

impl<T> Default for SlotStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> IntoIterator for SlotStore<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a SlotStore<T> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::SlotStore;

    #[test]
    fn filled_store_has_requested_length() {
        let s: SlotStore<Option<u8>> = SlotStore::filled(7, || None);
        assert_eq!(s.len(), 7);
        assert!(s.iter().all(Option::is_none));
    }

    #[test]
    fn set_at_returns_previous_and_ignores_out_of_range() {
        let mut s = SlotStore::new();
        s.append(1);
        s.append(2);
        assert_eq!(s.set_at(1, 20), Some(2));
        assert_eq!(s.get_at(1), Some(&20));
        assert_eq!(s.set_at(5, 99), None);
        assert_eq!(s.len(), 2);
    }

    #[test]
    fn empty_store() {
        let s: SlotStore<i32> = SlotStore::default();
        assert!(s.is_empty());
        assert_eq!(s.get_at(0), None);
    }
}
