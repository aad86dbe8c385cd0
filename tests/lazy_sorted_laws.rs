//! Property-based tests for the lazily sorted containers.
//!
//! A container is driven through a random sequence of operations and compared against a plain
//! vector that is sorted once at the end.

use std::collections::BTreeSet;

use lazy_sorted::{First, LazySorted, Map, MultiMap, Natural, Set};
use proptest::prelude::*;

type Engine<const MULTI: bool> = LazySorted<(i8, u8), First, Natural, Vec<(i8, u8)>, MULTI>;

// =============================================================================
// Strategies for Generating Test Data
// =============================================================================

#[derive(Clone, Debug)]
enum Op {
    Insert(i8, u8),
    InsertAll(Vec<(i8, u8)>),
    Erase(i8),
    Find(i8),
    Sort,
    Clear,
}

/// Keys are drawn from a small range so that duplicates are common.
fn arbitrary_key() -> impl Strategy<Value = i8> {
    -8i8..8
}

fn arbitrary_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        6 => (arbitrary_key(), any::<u8>()).prop_map(|(key, value)| Op::Insert(key, value)),
        2 => prop::collection::vec((arbitrary_key(), any::<u8>()), 0..8).prop_map(Op::InsertAll),
        2 => arbitrary_key().prop_map(Op::Erase),
        2 => arbitrary_key().prop_map(Op::Find),
        1 => Just(Op::Sort),
        1 => Just(Op::Clear),
    ]
}

fn arbitrary_ops() -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(arbitrary_op(), 0..40)
}

fn apply<const MULTI: bool>(container: &mut Engine<MULTI>, ops: &[Op]) {
    for op in ops {
        match op {
            Op::Insert(key, value) => container.insert((*key, *value)),
            Op::InsertAll(pairs) => container.insert_all(pairs.iter().copied()),
            Op::Erase(key) => {
                container.erase(key);
            }
            Op::Find(key) => {
                container.find(key);
            }
            Op::Sort => container.sort(),
            Op::Clear => container.clear(),
        }
    }
}

/// The elements a container should hold after `ops`, in order.
fn model(ops: &[Op], multi: bool) -> Vec<(i8, u8)> {
    let mut elements = Vec::new();
    for op in ops {
        match op {
            Op::Insert(key, value) => elements.push((*key, *value)),
            Op::InsertAll(pairs) => elements.extend(pairs.iter().copied()),
            Op::Erase(key) => elements.retain(|(k, _)| k != key),
            Op::Clear => elements.clear(),
            Op::Find(_) | Op::Sort => {}
        }
    }
    elements.sort_by_key(|(key, _)| *key);
    if !multi {
        elements.dedup_by_key(|(key, _)| *key);
    }
    elements
}

// =============================================================================
// Ordering Laws
// =============================================================================

proptest! {
    /// Law: a container that reports itself sorted is in key order, without equivalent keys
    /// unless it allows duplicates.
    #[test]
    fn prop_sorted_flag_law(ops in arbitrary_ops()) {
        let mut map = Map::new();
        apply(&mut map, &ops);
        if let Some(slice) = map.as_sorted_slice() {
            prop_assert!(slice.windows(2).all(|w| w[0].0 < w[1].0));
        }

        let mut multi = MultiMap::new();
        apply(&mut multi, &ops);
        if let Some(slice) = multi.as_sorted_slice() {
            prop_assert!(slice.windows(2).all(|w| w[0].0 <= w[1].0));
        }
    }

    /// Law: every query leaves the container sorted.
    #[test]
    fn prop_query_sorts_law(ops in arbitrary_ops(), key in arbitrary_key()) {
        let mut map = Map::new();
        apply(&mut map, &ops);
        map.find(&key);
        prop_assert!(map.is_sorted());

        let mut multi = MultiMap::new();
        apply(&mut multi, &ops);
        multi.lower_bound(&key);
        prop_assert!(multi.is_sorted());
    }

    /// Law: a map holds one element per distinct key, the first one inserted.
    #[test]
    fn prop_map_first_wins_law(ops in arbitrary_ops()) {
        let expected = model(&ops, false);
        let mut map = Map::new();
        apply(&mut map, &ops);

        prop_assert_eq!(map.len(), expected.len());
        prop_assert_eq!(map.as_slice(), expected.as_slice());
    }

    /// Law: a multimap keeps equivalent keys in insertion order.
    #[test]
    fn prop_multimap_stability_law(ops in arbitrary_ops()) {
        let expected = model(&ops, true);
        let mut multi = MultiMap::new();
        apply(&mut multi, &ops);

        prop_assert_eq!(multi.len(), expected.len());
        prop_assert_eq!(multi.as_slice(), expected.as_slice());
    }
}

// =============================================================================
// Removal Laws
// =============================================================================

proptest! {
    /// Law: erase returns the previous count, after which the key is gone.
    #[test]
    fn prop_erase_find_law(ops in arbitrary_ops(), key in arbitrary_key()) {
        let mut multi = MultiMap::new();
        apply(&mut multi, &ops);

        let count = multi.count(&key);
        prop_assert_eq!(multi.erase(&key), count);
        prop_assert_eq!(multi.find(&key), None);
        prop_assert_eq!(multi.count(&key), 0);
    }

    /// Law: a cleared container is empty and sorted.
    #[test]
    fn prop_clear_law(ops in arbitrary_ops()) {
        let mut map = Map::new();
        apply(&mut map, &ops);
        map.clear();

        prop_assert!(map.is_empty());
        prop_assert!(map.is_sorted());
    }
}

// =============================================================================
// Structural Laws
// =============================================================================

proptest! {
    /// Law: rebuilding a container from its own sorted elements gives an equal container.
    #[test]
    fn prop_resort_idempotent_law(ops in arbitrary_ops()) {
        let mut map = Map::new();
        apply(&mut map, &ops);

        let sorted = map.as_slice().to_vec();
        let mut rebuilt: Map<i8, u8> = sorted.iter().copied().collect();
        prop_assert_eq!(rebuilt.as_slice(), sorted.as_slice());
        prop_assert!(rebuilt == map);
    }

    /// Law: swapping twice restores both containers.
    #[test]
    fn prop_swap_involution_law(left_ops in arbitrary_ops(), right_ops in arbitrary_ops()) {
        let mut left = MultiMap::new();
        let mut right = MultiMap::new();
        apply(&mut left, &left_ops);
        apply(&mut right, &right_ops);
        let (left_before, right_before) = (left.clone(), right.clone());

        left.swap(&mut right);
        prop_assert!(left == right_before);
        left.swap(&mut right);
        prop_assert!(left == left_before);
        prop_assert!(right == right_before);
    }

    /// Law: equality does not depend on the order of insertion, and comparing never sorts.
    #[test]
    fn prop_equality_law(keys in prop::collection::vec(arbitrary_key(), 0..20)) {
        let forward: Set<i8> = keys.iter().copied().collect();
        let backward: Set<i8> = keys.iter().rev().copied().collect();
        prop_assert!(forward == backward);
        prop_assert_eq!(forward.is_sorted(), keys.len() <= 1);
    }
}

// =============================================================================
// Set Algebra Laws
// =============================================================================

proptest! {
    /// Law: set algebra agrees with `BTreeSet`.
    #[test]
    fn prop_set_algebra_law(
        left_keys in prop::collection::vec(arbitrary_key(), 0..20),
        right_keys in prop::collection::vec(arbitrary_key(), 0..20)
    ) {
        let mut left: Set<i8> = left_keys.iter().copied().collect();
        let mut right: Set<i8> = right_keys.iter().copied().collect();
        let left_model: BTreeSet<i8> = left_keys.iter().copied().collect();
        let right_model: BTreeSet<i8> = right_keys.iter().copied().collect();

        let union: Vec<i8> = left.union(&mut right).copied().collect();
        prop_assert_eq!(union, left_model.union(&right_model).copied().collect::<Vec<_>>());

        let both: Vec<i8> = left.intersection(&mut right).copied().collect();
        prop_assert_eq!(both, left_model.intersection(&right_model).copied().collect::<Vec<_>>());

        let only: Vec<i8> = left.difference(&mut right).copied().collect();
        prop_assert_eq!(only, left_model.difference(&right_model).copied().collect::<Vec<_>>());

        let either: Vec<i8> = left.symmetric_difference(&mut right).copied().collect();
        prop_assert_eq!(
            either,
            left_model.symmetric_difference(&right_model).copied().collect::<Vec<_>>()
        );

        prop_assert_eq!(left.is_subset(&mut right), left_model.is_subset(&right_model));
        prop_assert_eq!(left.is_disjoint(&mut right), left_model.is_disjoint(&right_model));
    }
}
