use std::collections::BTreeMap;

use proptest::prelude::*;
use rb_tree::{RbMap, RbMultiMap};

/// The number of operations to perform in each proptest case.
const TEST_SIZE: usize = 2_000;

/// Generates keys in a range narrow enough to cause collisions.
fn key_strategy() -> impl Strategy<Value = i64> {
    -500i64..500i64
}

fn value_strategy() -> impl Strategy<Value = i64> {
    any::<i64>()
}

// ─── Operations enum for driving randomized tests ────────────────────────────

#[derive(Debug, Clone)]
enum MapOp {
    Insert(i64, i64),
    Remove(i64),
    RemoveEntry(i64),
    Get(i64),
    GetMut(i64, i64),
    ContainsKey(i64),
    PopFirst,
    PopLast,
}

fn map_op_strategy() -> impl Strategy<Value = MapOp> {
    prop_oneof![
        5 => (key_strategy(), value_strategy()).prop_map(|(k, v)| MapOp::Insert(k, v)),
        3 => key_strategy().prop_map(MapOp::Remove),
        1 => key_strategy().prop_map(MapOp::RemoveEntry),
        2 => key_strategy().prop_map(MapOp::Get),
        1 => (key_strategy(), value_strategy()).prop_map(|(k, v)| MapOp::GetMut(k, v)),
        1 => key_strategy().prop_map(MapOp::ContainsKey),
        1 => Just(MapOp::PopFirst),
        1 => Just(MapOp::PopLast),
    ]
}

// ─── Unique map ──────────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// Replays a random sequence of operations on both RbMap and BTreeMap and
    /// asserts identical results at every step.
    #[test]
    fn map_ops_match_btreemap(ops in proptest::collection::vec(map_op_strategy(), TEST_SIZE)) {
        let mut rb_map: RbMap<i64, i64> = RbMap::new();
        let mut bt_map: BTreeMap<i64, i64> = BTreeMap::new();

        for op in &ops {
            match op {
                MapOp::Insert(k, v) => prop_assert_eq!(rb_map.insert(*k, *v), bt_map.insert(*k, *v), "insert({})", k),
                MapOp::Remove(k) => prop_assert_eq!(rb_map.remove(k), bt_map.remove(k), "remove({})", k),
                MapOp::RemoveEntry(k) => prop_assert_eq!(rb_map.remove_entry(k), bt_map.remove_entry(k)),
                MapOp::Get(k) => prop_assert_eq!(rb_map.get(k), bt_map.get(k), "get({})", k),
                MapOp::GetMut(k, v) => {
                    let rb = rb_map.get_mut(k).map(|slot| std::mem::replace(slot, *v));
                    let bt = bt_map.get_mut(k).map(|slot| std::mem::replace(slot, *v));
                    prop_assert_eq!(rb, bt);
                }
                MapOp::ContainsKey(k) => prop_assert_eq!(rb_map.contains_key(k), bt_map.contains_key(k)),
                MapOp::PopFirst => prop_assert_eq!(rb_map.pop_first(), bt_map.pop_first()),
                MapOp::PopLast => prop_assert_eq!(rb_map.pop_last(), bt_map.pop_last()),
            }
            prop_assert_eq!(rb_map.len(), bt_map.len());
            prop_assert_eq!(rb_map.first_key_value(), bt_map.first_key_value());
            prop_assert_eq!(rb_map.last_key_value(), bt_map.last_key_value());
        }

        prop_assert!(rb_map.iter().eq(bt_map.iter()));
    }

    #[test]
    fn iterators_match_btreemap(entries in proptest::collection::vec((key_strategy(), value_strategy()), TEST_SIZE)) {
        let rb_map: RbMap<i64, i64> = entries.iter().copied().collect();
        let bt_map: BTreeMap<i64, i64> = entries.iter().copied().collect();

        prop_assert_eq!(rb_map.iter().len(), bt_map.len());
        prop_assert!(rb_map.iter().rev().eq(bt_map.iter().rev()));
        prop_assert!(rb_map.keys().eq(bt_map.keys()));
        prop_assert!(rb_map.values().rev().eq(bt_map.values().rev()));
        prop_assert!(rb_map.into_iter().eq(bt_map));
    }

    #[test]
    fn mutable_iterators_match_btreemap(entries in proptest::collection::vec((key_strategy(), value_strategy()), TEST_SIZE)) {
        let mut rb_map: RbMap<i64, i64> = entries.iter().copied().collect();
        let mut bt_map: BTreeMap<i64, i64> = entries.iter().copied().collect();

        for ((rk, rv), (bk, bv)) in rb_map.iter_mut().zip(bt_map.iter_mut()) {
            prop_assert_eq!(rk, bk);
            *rv = rv.wrapping_add(*rk);
            *bv = bv.wrapping_add(*bk);
        }
        for (rv, bv) in rb_map.values_mut().rev().zip(bt_map.values_mut().rev()).step_by(2) {
            *rv = 0;
            *bv = 0;
        }
        prop_assert!(rb_map.iter().eq(bt_map.iter()));
    }

    #[test]
    fn iter_mut_interleaved_ends(entries in proptest::collection::vec((key_strategy(), value_strategy()), 1..TEST_SIZE)) {
        let mut rb_map: RbMap<i64, i64> = entries.iter().copied().collect();
        let expected_len = rb_map.len();

        let mut seen = Vec::new();
        let mut iter = rb_map.iter_mut();
        let mut front = true;
        while let Some((k, v)) = if front { iter.next() } else { iter.next_back() } {
            *v = 1;
            seen.push(*k);
            front = !front;
        }
        prop_assert_eq!(seen.len(), expected_len);
        seen.sort_unstable();
        seen.dedup();
        prop_assert_eq!(seen.len(), expected_len);
        prop_assert!(rb_map.values().all(|&v| v == 1));
    }

    #[test]
    fn range_matches_btreemap(
        entries in proptest::collection::vec((key_strategy(), value_strategy()), TEST_SIZE),
        a in key_strategy(),
        b in key_strategy(),
    ) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let rb_map: RbMap<i64, i64> = entries.iter().copied().collect();
        let bt_map: BTreeMap<i64, i64> = entries.iter().copied().collect();

        prop_assert!(rb_map.range(lo..hi).eq(bt_map.range(lo..hi)));
        prop_assert!(rb_map.range(lo..=hi).rev().eq(bt_map.range(lo..=hi).rev()));
        prop_assert!(rb_map.range(..=lo).eq(bt_map.range(..=lo)));
    }

    #[test]
    fn retain_matches_btreemap(entries in proptest::collection::vec((key_strategy(), value_strategy()), TEST_SIZE)) {
        let mut rb_map: RbMap<i64, i64> = entries.iter().copied().collect();
        let mut bt_map: BTreeMap<i64, i64> = entries.iter().copied().collect();

        rb_map.retain(|k, v| {
            *v = v.wrapping_mul(2);
            k % 2 == 0
        });
        bt_map.retain(|k, v| {
            *v = v.wrapping_mul(2);
            k % 2 == 0
        });
        prop_assert!(rb_map.iter().eq(bt_map.iter()));
    }

    #[test]
    fn clone_and_compare_match_btreemap(
        a in proptest::collection::vec((key_strategy(), 0i64..4), 0..200),
        b in proptest::collection::vec((key_strategy(), 0i64..4), 0..200),
    ) {
        let rb_a: RbMap<i64, i64> = a.iter().copied().collect();
        let rb_b: RbMap<i64, i64> = b.iter().copied().collect();
        let bt_a: BTreeMap<i64, i64> = a.iter().copied().collect();
        let bt_b: BTreeMap<i64, i64> = b.iter().copied().collect();

        let mut copy = rb_a.clone();
        prop_assert_eq!(&copy, &rb_a);
        copy.insert(1_000, 0);
        prop_assert!(!rb_a.contains_key(&1_000));
        prop_assert_eq!(rb_a == rb_b, bt_a == bt_b);
        prop_assert_eq!(rb_a.cmp(&rb_b), bt_a.cmp(&bt_b));
    }
}

// ─── Multimap ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
enum MultiOp {
    Insert(i64, i64),
    Remove(i64),
    RemoveAll(i64),
    GetAll(i64),
}

fn multi_op_strategy() -> impl Strategy<Value = MultiOp> {
    prop_oneof![
        6 => (key_strategy(), value_strategy()).prop_map(|(k, v)| MultiOp::Insert(k, v)),
        3 => key_strategy().prop_map(MultiOp::Remove),
        1 => key_strategy().prop_map(MultiOp::RemoveAll),
        2 => key_strategy().prop_map(MultiOp::GetAll),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// Models the multimap as a stably sorted vector of entries: a new entry
    /// goes after every entry with an equal key.
    #[test]
    fn multimap_ops_match_stable_vec(ops in proptest::collection::vec(multi_op_strategy(), TEST_SIZE)) {
        let mut rb_map: RbMultiMap<i64, i64> = RbMultiMap::new();
        let mut model: Vec<(i64, i64)> = Vec::new();

        for op in &ops {
            match op {
                MultiOp::Insert(k, v) => {
                    rb_map.insert(*k, *v);
                    let at = model.partition_point(|e| e.0 <= *k);
                    model.insert(at, (*k, *v));
                }
                MultiOp::Remove(k) => {
                    let expected = model.iter().position(|e| e.0 == *k).map(|i| model.remove(i).1);
                    prop_assert_eq!(rb_map.remove(k), expected, "remove({})", k);
                }
                MultiOp::RemoveAll(k) => {
                    let before = model.len();
                    model.retain(|e| e.0 != *k);
                    prop_assert_eq!(rb_map.remove_all(k), before - model.len());
                }
                MultiOp::GetAll(k) => {
                    let expected: Vec<i64> = model.iter().filter(|e| e.0 == *k).map(|e| e.1).collect();
                    prop_assert_eq!(rb_map.get_all(k).copied().collect::<Vec<_>>(), expected.clone());
                    prop_assert_eq!(rb_map.count(k), expected.len());
                    prop_assert_eq!(rb_map.get(k), expected.first());
                }
            }
            prop_assert_eq!(rb_map.len(), model.len());
        }

        prop_assert!(rb_map.iter().map(|(k, v)| (*k, *v)).eq(model.iter().copied()));
    }
}

// ─── Targeted cases ──────────────────────────────────────────────────────────

#[test]
fn string_keys_support_str_lookups() {
    let mut map: RbMap<String, usize> = RbMap::new();
    for word in ["delta", "alpha", "charlie", "bravo"] {
        map.insert(word.to_owned(), word.len());
    }
    assert_eq!(map["charlie"], 7);
    assert_eq!(map.get_key_value("alpha").map(|(k, v)| (k.as_str(), *v)), Some(("alpha", 5)));
    assert_eq!(map.remove("delta"), Some(5));
    assert!(!map.contains_key("delta"));
    assert_eq!(map.keys().cloned().collect::<Vec<_>>(), ["alpha", "bravo", "charlie"]);
}

#[test]
fn multimap_equal_range_and_extend() {
    let mut map = RbMultiMap::from([(1, "one"), (2, "two")]);
    map.extend([(2, "deux"), (1, "un"), (2, "zwei")]);
    let twos: Vec<_> = map.equal_range(&2).map(|(_, v)| *v).collect();
    assert_eq!(twos, ["two", "deux", "zwei"]);
    assert_eq!(map.first_key_value(), Some((&1, &"one")));
    assert_eq!(map.last_key_value(), Some((&2, &"zwei")));
}

#[test]
fn mutable_borrows_can_be_held_together() {
    let mut map: RbMap<i32, i32> = (0..32).map(|k| (k, k)).collect();
    let held: Vec<&mut i32> = map.values_mut().collect();
    for v in held {
        *v += 100;
    }
    assert!(map.iter().all(|(k, v)| *v == k + 100));

    let mut multi: RbMultiMap<i32, i32> = (0..32).map(|k| (k % 4, k)).collect();
    let held: Vec<(&i32, &mut i32)> = multi.iter_mut().rev().collect();
    for (k, v) in held {
        *v = -*k;
    }
    assert!(multi.iter().all(|(k, v)| *v == -*k));
}

#[test]
fn debug_formats_like_std() {
    let map = RbMap::from([(2, 'b'), (1, 'a')]);
    assert_eq!(format!("{map:?}"), "{1: 'a', 2: 'b'}");
}
