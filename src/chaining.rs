//! ChainingMap: separate chaining with singly linked bucket lists.
//!
//! Every slot of the table is the head of a list holding exactly the
//! entries whose key hashes to that slot. List nodes live in a `SlotMap`
//! arena and link to their successor by generational key, which keeps the
//! lists owned and safe without per-node boxes.
//!
//! The table never grows on its own; callers decide when to
//! `resize_table`. Shrinking below the entry count is allowed and only
//! lengthens the chains.

use core::fmt;

use slotmap::{new_key_type, SlotMap};
use tracing::debug;

use crate::error::MapError;
use crate::hash::{HashFn, KeyHasher};
use crate::map::Map;
use crate::slot_store::SlotStore;

new_key_type! {
    struct NodeKey;
}

#[derive(Debug)]
struct Node<V> {
    key: String,
    value: V,
    next: Option<NodeKey>,
}

/// Walks one bucket list from its head.
struct Chain<'a, V> {
    nodes: &'a SlotMap<NodeKey, Node<V>>,
    cur: Option<NodeKey>,
}

impl<'a, V> Iterator for Chain<'a, V> {
    type Item = (NodeKey, &'a Node<V>);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let k = self.cur?;
        let node = self.nodes.get(k)?;
        self.cur = node.next;
        Some((k, node))
    }
}

pub struct ChainingMap<V, H = HashFn> {
    heads: SlotStore<Option<NodeKey>>,
    nodes: SlotMap<NodeKey, Node<V>>,
    capacity: usize,
    hasher: H,
}

impl<V> ChainingMap<V> {
    pub fn new(capacity: usize, hash: HashFn) -> Result<Self, MapError> {
        Self::with_hasher(capacity, hash)
    }
}

impl<V, H> ChainingMap<V, H>
where
    H: KeyHasher,
{
    pub fn with_hasher(capacity: usize, hasher: H) -> Result<Self, MapError> {
        if capacity == 0 {
            return Err(MapError::ZeroCapacity);
        }
        Ok(Self {
            heads: SlotStore::filled(capacity, || None),
            nodes: SlotMap::with_key(),
            capacity,
            hasher,
        })
    }

    /// Every node in the arena is linked from exactly one bucket.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    #[inline]
    fn bucket_index(&self, key: &str) -> usize {
        (self.hasher.hash_key(key) % self.capacity as u64) as usize
    }

    fn chain(&self, bucket: usize) -> Chain<'_, V> {
        Chain {
            nodes: &self.nodes,
            cur: self.heads.get_at(bucket).copied().flatten(),
        }
    }

    fn find(&self, key: &str) -> Option<NodeKey> {
        self.chain(self.bucket_index(key))
            .find(|(_, node)| node.key == key)
            .map(|(k, _)| k)
    }

    pub fn put(&mut self, key: &str, value: V) {
        self.insert_key(key, value);
    }

    fn insert_key<K>(&mut self, key: K, value: V)
    where
        K: AsRef<str> + Into<String>,
    {
        let bucket = self.bucket_index(key.as_ref());
        let mut tail = None;
        let mut found = None;
        for (k, node) in self.chain(bucket) {
            if node.key == key.as_ref() {
                found = Some(k);
                break;
            }
            tail = Some(k);
        }

        if let Some(k) = found {
            if let Some(node) = self.nodes.get_mut(k) {
                node.value = value;
            }
            return;
        }

        let new = self.nodes.insert(Node {
            key: key.into(),
            value,
            next: None,
        });
        match tail.and_then(|t| self.nodes.get_mut(t)) {
            Some(last) => last.next = Some(new),
            None => {
                self.heads.set_at(bucket, Some(new));
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.find(key)
            .and_then(|k| self.nodes.get(k))
            .map(|n| &n.value)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let k = self.find(key)?;
        self.nodes.get_mut(k).map(|n| &mut n.value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.find(key).is_some()
    }

    /// Unlink the entry for `key` and return its value.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let bucket = self.bucket_index(key);
        let mut prev = None;
        let mut target = None;
        for (k, node) in self.chain(bucket) {
            if node.key == key {
                target = Some(k);
                break;
            }
            prev = Some(k);
        }

        let node = self.nodes.remove(target?)?;
        match prev.and_then(|p| self.nodes.get_mut(p)) {
            Some(before) => before.next = node.next,
            None => {
                self.heads.set_at(bucket, node.next);
            }
        }
        Some(node.value)
    }

    /// Rebuild the table with `new_capacity` buckets, re-inserting entries
    /// in slot-then-list order. Only a zero capacity is declined.
    pub fn resize_table(&mut self, new_capacity: usize) {
        if new_capacity < 1 {
            debug!(
                capacity = self.capacity,
                requested = new_capacity,
                "declining chaining resize"
            );
            return;
        }
        debug!(
            from = self.capacity,
            to = new_capacity,
            live = self.len(),
            "rehashing chaining table"
        );
        let old_heads = core::mem::replace(
            &mut self.heads,
            SlotStore::filled(new_capacity, || None),
        );
        let mut old_nodes = core::mem::replace(&mut self.nodes, SlotMap::with_key());
        self.capacity = new_capacity;
        for head in old_heads {
            let mut cur = head;
            while let Some(node) = cur.and_then(|k| old_nodes.remove(k)) {
                cur = node.next;
                self.insert_key(node.key, node.value);
            }
        }
    }

    pub fn table_load(&self) -> f64 {
        self.len() as f64 / self.capacity as f64
    }

    /// Buckets whose list has no entries.
    pub fn empty_buckets(&self) -> usize {
        self.heads.iter().filter(|h| h.is_none()).count()
    }

    pub fn clear(&mut self) {
        self.heads = SlotStore::filled(self.capacity, || None);
        self.nodes.clear();
    }

    pub fn keys(&self) -> Vec<&str> {
        self.iter().map(|(k, _)| k).collect()
    }

    /// Entries in slot-then-list order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> + '_ {
        self.heads
            .iter()
            .flat_map(move |&head| Chain {
                nodes: &self.nodes,
                cur: head,
            })
            .map(|(_, n)| (n.key.as_str(), &n.value))
    }
}

impl<V, H> Map<V> for ChainingMap<V, H>
where
    H: KeyHasher,
{
    fn put(&mut self, key: &str, value: V) {
        ChainingMap::put(self, key, value)
    }

    fn get(&self, key: &str) -> Option<&V> {
        ChainingMap::get(self, key)
    }

    fn contains_key(&self, key: &str) -> bool {
        ChainingMap::contains_key(self, key)
    }

    fn remove(&mut self, key: &str) -> bool {
        ChainingMap::remove(self, key).is_some()
    }

    fn clear(&mut self) {
        ChainingMap::clear(self)
    }

    fn resize_table(&mut self, new_capacity: usize) {
        ChainingMap::resize_table(self, new_capacity)
    }

    fn table_load(&self) -> f64 {
        ChainingMap::table_load(self)
    }

    fn empty_buckets(&self) -> usize {
        ChainingMap::empty_buckets(self)
    }

    fn keys(&self) -> Vec<&str> {
        ChainingMap::keys(self)
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }
}

impl<V: fmt::Debug, H> fmt::Display for ChainingMap<V, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, &head) in self.heads.iter().enumerate() {
            write!(f, "{i}: [")?;
            let chain = Chain {
                nodes: &self.nodes,
                cur: head,
            };
            for (n, (_, node)) in chain.enumerate() {
                if n > 0 {
                    f.write_str(" -> ")?;
                }
                write!(f, "{}: {:?}", node.key, node.value)?;
            }
            writeln!(f, "]")?;
        }
        Ok(())
    }
}

impl<V: fmt::Debug, H> fmt::Debug for ChainingMap<V, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainingMap")
            .field("capacity", &self.capacity)
            .field("size", &self.nodes.len())
            .finish_non_exhaustive()
    }
}
