//! End-to-end behavior of the tree through its position API.

use pretty_assertions::assert_eq;
use rb_tree::{First, Identity, Natural, Position, RbMultiMap, RbSet, RbTree};

type IntTree = RbTree<i32, Identity, Natural>;
type PairTree = RbTree<(i32, &'static str), First, Natural>;

fn in_order<T: Copy, X, C>(tree: &RbTree<T, X, C>) -> Vec<T> {
    tree.iter().copied().collect()
}

fn walk_positions<T: Copy, X, C>(tree: &RbTree<T, X, C>) -> Vec<T> {
    let mut out = Vec::new();
    let mut pos = tree.begin();
    while pos != tree.end() {
        out.push(*tree.get(pos).unwrap());
        pos = tree.next(pos);
    }
    out
}

#[test]
fn unique_insert_then_erase() {
    let mut tree = IntTree::new();
    for v in [10, 20, 5, 15, 3] {
        let (pos, inserted) = tree.insert_unique(v);
        assert!(inserted);
        assert_eq!(tree.get(pos), Some(&v));
    }
    assert_eq!(in_order(&tree), vec![3, 5, 10, 15, 20]);
    assert_eq!(walk_positions(&tree), in_order(&tree));

    let pos = tree.find(&10);
    tree.erase(pos);
    assert_eq!(in_order(&tree), vec![3, 5, 15, 20]);
    assert!(tree.find(&10).is_end());
    assert_eq!(tree.len(), 4);
}

#[test]
fn multi_insert_groups_equal_keys() {
    let mut tree = PairTree::new();
    tree.insert_multi((9, "after"));
    tree.insert_multi((7, "first"));
    tree.insert_multi((1, "before"));
    tree.insert_multi((7, "second"));
    tree.insert_multi((7, "third"));

    assert_eq!(tree.count_multi(&7), 3);
    let (lo, hi) = tree.equal_range_multi(&7);
    let run: Vec<_> = tree.range_positions(lo, hi).map(|e| e.1).collect();
    assert_eq!(run, vec!["first", "second", "third"]);
    assert_eq!(tree.get(tree.prev(lo)), Some(&(1, "before")));
    assert_eq!(tree.get(hi), Some(&(9, "after")));
}

#[test]
fn reverse_walk_from_end() {
    let mut tree = IntTree::new();
    tree.insert_unique_iter([4, 2, 6, 1, 3, 5, 7]);

    let mut out = Vec::new();
    let mut pos: Position = tree.end();
    while pos != tree.begin() {
        pos = tree.prev(pos);
        out.push(*tree.get(pos).unwrap());
    }
    assert_eq!(out, vec![7, 6, 5, 4, 3, 2, 1]);
    assert_eq!(tree.iter().rev().copied().collect::<Vec<_>>(), out);
}

#[test]
fn insert_then_erase_everything_leaves_empty_tree() {
    let keys: Vec<i32> = (0..500).map(|i| (i * 7919) % 1009).collect();
    let mut tree = IntTree::new();
    for &k in &keys {
        tree.insert_multi(k);
    }
    assert_eq!(tree.len(), keys.len());

    for &k in keys.iter().rev() {
        assert_eq!(tree.erase_unique(&k), 1);
    }
    assert!(tree.is_empty());
    assert_eq!(tree.begin(), tree.end());
    assert_eq!(tree, IntTree::new());
}

#[test]
fn copies_are_independent() {
    let mut original = IntTree::new();
    original.insert_unique_iter(1..=10);
    let snapshot = in_order(&original);

    let mut copy = original.clone();
    copy.erase_multi(&5);
    copy.insert_unique(42);
    let (first, last) = (copy.find(&1), copy.find(&4));
    copy.erase_range(first, last);

    assert_eq!(in_order(&original), snapshot);
    assert_eq!(in_order(&copy), vec![4, 6, 7, 8, 9, 10, 42]);
}

#[test]
fn swap_exchanges_everything() {
    let mut a = IntTree::new();
    let mut b = IntTree::new();
    a.insert_unique_iter([1, 2]);
    b.insert_unique_iter([7, 8, 9]);

    a.swap(&mut b);
    assert_eq!(in_order(&a), vec![7, 8, 9]);
    assert_eq!(in_order(&b), vec![1, 2]);
}

#[test]
fn hint_at_end_builds_sorted_input() {
    let mut tree = IntTree::new();
    for v in 0..100 {
        let end = tree.end();
        let (pos, inserted) = tree.insert_unique_hint(end, v);
        assert!(inserted);
        assert_eq!(pos, tree.last());
    }
    let hint = tree.find(&50);
    let (pos, inserted) = tree.insert_unique_hint(hint, 50);
    assert!(!inserted);
    assert_eq!(pos, hint);
    assert_eq!(in_order(&tree), (0..100).collect::<Vec<_>>());
}

#[test]
fn try_inserts_succeed_below_capacity() {
    let mut tree = IntTree::new();
    assert_eq!(tree.try_insert_unique(1).map(|(_, inserted)| inserted), Ok(true));
    assert_eq!(tree.try_insert_unique(1).map(|(_, inserted)| inserted), Ok(false));
    assert!(tree.try_insert_multi(1).is_ok());
    assert_eq!(tree.try_insert_multi_iter([3, 2]), Ok(()));
    assert_eq!(tree.try_insert_unique_iter([2, 4]), Ok(1));
    assert_eq!(in_order(&tree), vec![1, 1, 2, 3, 4]);
    assert!(tree.max_size() >= u16::MAX as usize);
}

#[test]
fn containers_expose_their_tree() {
    let set = RbSet::from([30, 10, 20]);
    let tree = set.as_tree();
    let pos = tree.upper_bound(&10);
    assert_eq!(tree.get(pos), Some(&20));
    assert_eq!(tree.count_unique(&20), 1);
    assert_eq!(tree.count_unique(&25), 0);

    let mut map = RbMultiMap::new();
    map.insert("k", 1);
    map.insert("k", 2);
    let tree = map.as_tree();
    let (lo, hi) = tree.equal_range_multi("k");
    assert_eq!(tree.distance(lo, hi), 2);
}

#[test]
fn lexicographic_comparisons() {
    let mut a = IntTree::new();
    let mut b = IntTree::new();
    a.insert_multi_iter([1, 2, 3]);
    b.insert_multi_iter([1, 2, 4]);
    assert!(a < b);
    b.erase_multi(&4);
    assert!(b < a);
    b.insert_multi(3);
    assert_eq!(a, b);
}
