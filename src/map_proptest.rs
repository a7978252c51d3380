#![cfg(test)]

// Property tests for both engines kept inside the crate so they can drive
// the engines through the shared `Map` contract with custom hashers.

use crate::chaining::ChainingMap;
use crate::hash::{sum_hash, weighted_sum_hash, HashFn};
use crate::map::Map;
use crate::open_addressing::{OpenAddressingMap, MAX_LOAD_FACTOR};
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use std::collections::{BTreeSet, HashMap};

// Pool-indexed operations so shrinking moves toward earlier keys.
#[derive(Clone, Debug)]
enum Op {
    Put(usize, i32),
    Get(usize),
    Remove(usize),
    Contains(String),
    Resize(usize),
    Clear,
    Keys,
}

fn length_hash(key: &str) -> u64 {
    key.len() as u64
}

fn constant_hash(_: &str) -> u64 {
    7
}

fn arb_hash() -> impl Strategy<Value = HashFn> {
    prop_oneof![
        Just(sum_hash as HashFn),
        Just(weighted_sum_hash as HashFn),
        Just(length_hash as HashFn),
        Just(constant_hash as HashFn),
    ]
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<Op>)> {
    proptest::collection::vec("[a-z]{0,5}", 1..=12).prop_flat_map(|pool| {
        let idx = 0..pool.len();
        let op = prop_oneof![
            4 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| Op::Put(i, v)),
            2 => idx.clone().prop_map(Op::Get),
            2 => idx.clone().prop_map(Op::Remove),
            1 => "[a-z]{0,5}".prop_map(Op::Contains),
            1 => (0usize..40).prop_map(Op::Resize),
            1 => Just(Op::Clear),
            1 => Just(Op::Keys),
        ];
        proptest::collection::vec(op, 1..80).prop_map(move |ops| (pool.clone(), ops))
    })
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Engine {
    OpenAddressing,
    Chaining,
}

// Drive `sut` and a std HashMap model through the same operations.
// Invariants checked after every step:
// - `len()` matches the model and `table_load() == len / capacity`.
// - Open addressing keeps `table_load() < MAX_LOAD_FACTOR` after `put`.
// - `get`/`contains_key`/`remove` agree with the model.
// - Valid resizes keep content; invalid ones change nothing.
// - `keys()` lists every live key exactly once.
fn check<M: Map<i32>>(
    sut: &mut M,
    engine: Engine,
    pool: &[String],
    ops: Vec<Op>,
) -> Result<(), TestCaseError> {
    let mut model: HashMap<String, i32> = HashMap::new();

    for op in ops {
        match op {
            Op::Put(i, v) => {
                let k = &pool[i];
                sut.put(k, v);
                model.insert(k.clone(), v);
                prop_assert_eq!(sut.get(k), Some(&v));
                if engine == Engine::OpenAddressing {
                    prop_assert!(sut.table_load() < MAX_LOAD_FACTOR);
                }
            }
            Op::Get(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.get(k), model.get(k));
            }
            Op::Remove(i) => {
                let k = &pool[i];
                let before = sut.len();
                let removed = sut.remove(k);
                prop_assert_eq!(removed, model.remove(k).is_some());
                prop_assert_eq!(sut.len(), before - usize::from(removed));
                prop_assert!(!sut.contains_key(k));
                prop_assert!(sut.get(k).is_none());
            }
            Op::Contains(s) => {
                prop_assert_eq!(sut.contains_key(&s), model.contains_key(&s));
            }
            Op::Resize(c) => {
                let before = sut.capacity();
                let declined = c < 1 || (engine == Engine::OpenAddressing && c < sut.len());
                sut.resize_table(c);
                if declined {
                    prop_assert_eq!(sut.capacity(), before);
                } else if engine == Engine::Chaining {
                    prop_assert_eq!(sut.capacity(), c);
                } else {
                    prop_assert!(sut.capacity() >= c);
                }
                for (k, v) in &model {
                    prop_assert_eq!(sut.get(k), Some(v));
                }
            }
            Op::Clear => {
                let cap = sut.capacity();
                sut.clear();
                model.clear();
                prop_assert_eq!(sut.capacity(), cap);
                prop_assert_eq!(sut.empty_buckets(), cap);
            }
            Op::Keys => {
                let keys = sut.keys();
                let unique: BTreeSet<&str> = keys.iter().copied().collect();
                let expected: BTreeSet<&str> = model.keys().map(String::as_str).collect();
                prop_assert_eq!(keys.len(), unique.len(), "keys() must not repeat");
                prop_assert_eq!(unique, expected);
            }
        }

        prop_assert_eq!(sut.len(), model.len());
        prop_assert!(sut.capacity() >= 1);
        prop_assert_eq!(
            sut.table_load(),
            sut.len() as f64 / sut.capacity() as f64
        );
        prop_assert!(sut.empty_buckets() <= sut.capacity());
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]

    #[test]
    fn prop_open_addressing_matches_model(
        cap in 1usize..20,
        hash in arb_hash(),
        (pool, ops) in arb_scenario(),
    ) {
        let mut sut = OpenAddressingMap::new(cap, hash).unwrap();
        check(&mut sut, Engine::OpenAddressing, &pool, ops)?;
    }

    #[test]
    fn prop_chaining_matches_model(
        cap in 1usize..20,
        hash in arb_hash(),
        (pool, ops) in arb_scenario(),
    ) {
        let mut sut = ChainingMap::new(cap, hash).unwrap();
        check(&mut sut, Engine::Chaining, &pool, ops)?;
    }

    // Both engines hold the same content after the same puts.
    #[test]
    fn prop_engines_agree(
        hash in arb_hash(),
        puts in proptest::collection::vec(("[a-c]{1,3}", any::<i32>()), 0..60),
    ) {
        let mut oa = OpenAddressingMap::new(5, hash).unwrap();
        let mut sc = ChainingMap::new(5, hash).unwrap();
        for (k, v) in &puts {
            oa.put(k, *v);
            sc.put(k, *v);
        }
        prop_assert_eq!(oa.len(), sc.len());
        let a: BTreeSet<(&str, &i32)> = oa.iter().collect();
        let b: BTreeSet<(&str, &i32)> = sc.iter().collect();
        prop_assert_eq!(a, b);
    }
}
