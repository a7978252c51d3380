use slot_hashmap::{sum_hash, weighted_sum_hash, Map, MapError, OpenAddressingMap};

#[test]
fn put_get_resize_scenario() {
    let mut m = OpenAddressingMap::new(20, sum_hash).unwrap();
    m.put("key1", 10);
    assert_eq!(m.len(), 1);
    assert_eq!(m.capacity(), 20);
    assert_eq!(m.get("key1"), Some(&10));
    assert!(m.contains_key("key1"));

    m.resize_table(30);
    assert_eq!(m.len(), 1);
    assert_eq!(m.capacity(), 30);
    assert_eq!(m.get("key1"), Some(&10));
    assert!(m.contains_key("key1"));
}

#[test]
fn table_load_tracks_distinct_keys() {
    let mut m = OpenAddressingMap::new(100, sum_hash).unwrap();
    assert_eq!(m.table_load(), 0.0);
    m.put("key1", 10);
    assert_eq!(m.table_load(), 0.01);
    m.put("key2", 20);
    assert_eq!(m.table_load(), 0.02);
    m.put("key1", 30);
    assert_eq!(m.table_load(), 0.02);
    assert_eq!(m.get("key1"), Some(&30));
}

#[test]
fn empty_buckets_counts_untouched_slots() {
    let mut m = OpenAddressingMap::new(100, sum_hash).unwrap();
    assert_eq!(m.empty_buckets(), 100);
    m.put("key1", 10);
    assert_eq!(m.empty_buckets(), 99);
    m.put("key2", 20);
    assert_eq!(m.empty_buckets(), 98);
    m.put("key1", 30);
    assert_eq!(m.empty_buckets(), 98);
    m.put("key4", 40);
    assert_eq!(m.empty_buckets(), 97);
    m.remove("key4");
    assert_eq!(m.empty_buckets(), 97, "tombstones are not empty");
}

#[test]
fn load_stays_below_half_under_growth() {
    let mut m = OpenAddressingMap::new(50, sum_hash).unwrap();
    for i in 0..150 {
        m.put(&format!("str{i}"), i * 100);
        assert!(m.table_load() < 0.5);
        assert_eq!(m.len(), i + 1);
    }
    for i in 0..150 {
        assert_eq!(m.get(&format!("str{i}")), Some(&(i * 100)));
    }
}

#[test]
fn repeated_keys_do_not_grow_size() {
    let mut m = OpenAddressingMap::new(40, weighted_sum_hash).unwrap();
    for i in 0..50 {
        m.put(&format!("str{}", i / 3), i * 100);
    }
    assert_eq!(m.len(), 17);
    assert_eq!(m.get("str16"), Some(&4900));
}

#[test]
fn contains_key_separates_present_from_absent() {
    let mut m = OpenAddressingMap::new(75, weighted_sum_hash).unwrap();
    let keys: Vec<u32> = (1..1000).step_by(20).collect();
    for k in &keys {
        m.put(&k.to_string(), k * 42);
    }
    assert_eq!(m.len(), keys.len());
    for k in &keys {
        assert!(m.contains_key(&k.to_string()));
        assert!(!m.contains_key(&(k + 1).to_string()));
    }
}

#[test]
fn repeated_resizes_keep_content() {
    let mut m = OpenAddressingMap::new(75, weighted_sum_hash).unwrap();
    let keys: Vec<u32> = (1..1000).step_by(13).collect();
    for k in &keys {
        m.put(&k.to_string(), k * 42);
    }
    for capacity in (111..1000).step_by(117) {
        m.resize_table(capacity);
        assert!(m.capacity() >= capacity);
        assert!(m.table_load() < 0.5);

        m.put("some key", 0);
        assert!(m.contains_key("some key"));
        m.remove("some key");

        for k in &keys {
            assert_eq!(m.get(&k.to_string()), Some(&(k * 42)));
            assert!(!m.contains_key(&(k + 1).to_string()));
        }
        assert_eq!(m.len(), keys.len());
    }
}

#[test]
fn remove_then_get_is_absent() {
    let mut m = OpenAddressingMap::new(50, sum_hash).unwrap();
    assert_eq!(m.get("key1"), None);
    m.put("key1", 10);
    assert_eq!(m.get("key1"), Some(&10));
    assert!(m.remove("key1"));
    assert_eq!(m.get("key1"), None);
    assert!(!m.remove("key4"));
    assert_eq!(m.len(), 0);
}

#[test]
fn clear_keeps_capacity() {
    let mut m = OpenAddressingMap::new(50, sum_hash).unwrap();
    m.put("key1", 10);
    m.put("key2", 20);
    m.resize_table(100);
    assert_eq!((m.len(), m.capacity()), (2, 100));
    m.clear();
    assert_eq!((m.len(), m.capacity()), (0, 100));
    assert_eq!(m.empty_buckets(), 100);
}

#[test]
fn keys_are_in_slot_order() {
    let mut m = OpenAddressingMap::new(10, |k: &str| k.parse::<u64>().unwrap_or(0)).unwrap();
    for k in ["3", "1", "4"] {
        m.put(k, ());
    }
    assert_eq!(m.keys(), vec!["1", "3", "4"]);
}

#[test]
fn usable_through_trait_object() {
    let m = OpenAddressingMap::new(8, sum_hash).unwrap();
    let mut boxed: Box<dyn Map<&str>> = Box::new(m);
    boxed.put("a", "alpha");
    assert!(boxed.contains_key("a"));
    assert_eq!(boxed.get("a"), Some(&"alpha"));
    assert!(boxed.remove("a"));
    assert!(boxed.is_empty());
}

#[test]
fn closure_hasher_is_accepted() {
    let seed = 31u64;
    let mut m = OpenAddressingMap::with_hasher(4, move |k: &str| k.len() as u64 * seed).unwrap();
    m.put("ab", 1);
    m.put("cd", 2);
    assert_eq!(m.get("cd"), Some(&2));
    assert_eq!(m.capacity(), 8);
    assert_eq!(
        OpenAddressingMap::<i32, _>::with_hasher(0, move |_: &str| seed).err(),
        Some(MapError::ZeroCapacity)
    );
}
