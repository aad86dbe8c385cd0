//! Sets and multisets, lazily sorted
#![warn(missing_docs)]

use alloc::vec::Vec;
use compact_str::CompactString;
use core::fmt;

use crate::{
    compare::{Compare, Identity, Natural},
    store::Store,
    util::LazySorted,
};

//-----------------------------------------------------------------------------------------------//

/// A set of keys that sorts itself when it is queried.
///
/// Inserting a key that is already present is allowed; the extra copy is dropped at the next
/// sort.
pub type Set<K, C = Natural> = LazySorted<K, Identity, C, Vec<K>, false>;

/// A set of keys that may hold several equivalent keys, kept in insertion order among themselves.
pub type MultiSet<K, C = Natural> = LazySorted<K, Identity, C, Vec<K>, true>;

/// A simple set of strings.
///
/// This is a specialised version of `Set` that stores keys as compact strings and can be searched
/// with a plain `&str`.
pub type StringSet<C = Natural> = LazySorted<CompactString, Identity, C, Vec<CompactString>, false>;

/// A set of keys ordered by a user supplied function.
pub type SetBy<K, F> = LazySorted<K, Identity, F, Vec<K>, false>;

//-----------------------------------------------------------------------------------------------//

impl<K, C, S, const MULTI: bool> LazySorted<K, Identity, C, S, MULTI>
where
    C: Compare<K>,
    S: Store<K>,
{
    /// Check if every key of this set is also in `other`
    pub fn is_subset(&mut self, other: &mut Self) -> bool {
        self.difference(other).next().is_none()
    }

    /// Check if every key of `other` is also in this set
    pub fn is_superset(&mut self, other: &mut Self) -> bool {
        other.is_subset(self)
    }

    /// Check if the sets have no key in common
    pub fn is_disjoint(&mut self, other: &mut Self) -> bool {
        self.intersection(other).next().is_none()
    }
}

impl<C, S, const MULTI: bool> LazySorted<CompactString, Identity, C, S, MULTI>
where
    C: Compare<CompactString>,
    S: Store<CompactString>,
{
    /// Insert a string
    pub fn insert_str(&mut self, key: &str) {
        self.insert(CompactString::new(key));
    }
}

impl<'a, C, S, const MULTI: bool> FromIterator<&'a str>
    for LazySorted<CompactString, Identity, C, S, MULTI>
where
    C: Compare<CompactString> + Default,
    S: Store<CompactString> + Default,
{
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        iter.into_iter().map(CompactString::new).collect()
    }
}

impl<K, C, S, const MULTI: bool> fmt::Debug for LazySorted<K, Identity, C, S, MULTI>
where
    K: fmt::Debug,
    C: Compare<K>,
    S: Store<K>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.ordered()).finish()
    }
}

//-----------------------------------------------------------------------------------------------//

#[cfg(feature = "serde")]
impl<K, C, S, const MULTI: bool> serde::Serialize for LazySorted<K, Identity, C, S, MULTI>
where
    K: serde::Serialize,
    C: Compare<K>,
    S: Store<K>,
{
    fn serialize<Z>(&self, serializer: Z) -> Result<Z::Ok, Z::Error>
    where
        Z: serde::Serializer,
    {
        serializer.collect_seq(self.ordered())
    }
}

#[cfg(feature = "serde")]
struct SetVisitor<K, C, S, const MULTI: bool> {
    marker: core::marker::PhantomData<fn() -> (K, C, S)>,
}

#[cfg(feature = "serde")]
impl<'de, K, C, S, const MULTI: bool> serde::de::Visitor<'de> for SetVisitor<K, C, S, MULTI>
where
    K: serde::Deserialize<'de>,
    C: Compare<K> + Default,
    S: Store<K> + Default,
{
    type Value = LazySorted<K, Identity, C, S, MULTI>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence of keys")
    }

    fn visit_seq<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::SeqAccess<'de>,
    {
        let mut elements = S::default();
        while let Some(key) = access.next_element()? {
            elements.push(key);
        }
        Ok(LazySorted::from_store(elements, C::default()))
    }
}

#[cfg(feature = "serde")]
impl<'de, K, C, S, const MULTI: bool> serde::Deserialize<'de>
    for LazySorted<K, Identity, C, S, MULTI>
where
    K: serde::Deserialize<'de>,
    C: Compare<K> + Default,
    S: Store<K> + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_seq(SetVisitor {
            marker: core::marker::PhantomData,
        })
    }
}

//-----------------------------------------------------------------------------------------------//

#[test]
// A very simple test of a set
fn test_set_0() {
    use alloc::vec;

    let mut set = Set::new();

    set.insert(5);
    set.insert(1);
    set.insert(9);
    set.insert(5);

    debug_assert!(!set.is_sorted());
    debug_assert_eq!(set.find(&5), Some(&5));
    debug_assert_eq!(set.find(&4), None);
    debug_assert!(set.is_sorted());

    let v: Vec<i32> = set.iter().cloned().collect();
    debug_assert_eq!(v, vec![1, 5, 9]);

    let v: Vec<i32> = set.iter().rev().cloned().collect();
    debug_assert_eq!(v, vec![9, 5, 1]);
}

#[test]
// A set of strings, searched with a borrowed key
fn test_set_1() {
    use alloc::{
        string::{String, ToString},
        vec,
    };

    let mut set: Set<String> = ["Five", "One", "Nine"]
        .iter()
        .map(|s| s.to_string())
        .collect();

    debug_assert_eq!(set.count("Five"), 1);
    debug_assert_eq!(set.count("Seven"), 0);

    let v: Vec<String> = set.iter().cloned().collect();
    debug_assert_eq!(
        v,
        vec!["Five".to_string(), "Nine".to_string(), "One".to_string()]
    );
}

#[test]
// A multiset keeps every copy, and erasing removes all of them
fn test_set_2() {
    let mut multi: MultiSet<i32> = [3, 1, 3, 2, 3].into();

    debug_assert_eq!(multi.len(), 5);
    debug_assert_eq!(multi.count(&3), 3);
    debug_assert_eq!(multi.erase(&3), 3);
    debug_assert_eq!(multi.len(), 2);
    debug_assert_eq!(multi.find(&3), None);
}

#[test]
// A custom ordering
fn test_set_3() {
    let mut set: SetBy<i32, _> =
        LazySorted::with_comparator(|left: &i32, right: &i32| right.cmp(left));

    set.insert_all([4, 8, 1, 8]);
    debug_assert_eq!(set.as_slice(), &[8, 4, 1]);
    debug_assert_eq!(set.lower_bound(&5), 1);
    debug_assert!(set.comparator().less(&8, &4));
}

#[test]
// Subsets, supersets and disjoint sets
fn test_set_4() {
    let mut small: Set<i32> = [2, 1].into();
    let mut big: Set<i32> = [3, 1, 2].into();
    let mut other: Set<i32> = [7, 9].into();

    debug_assert!(small.is_subset(&mut big));
    debug_assert!(!big.is_subset(&mut small));
    debug_assert!(big.is_superset(&mut small));
    debug_assert!(small.is_disjoint(&mut other));
    debug_assert!(!small.is_disjoint(&mut big));

    let mut twice: MultiSet<i32> = [1, 1].into();
    let mut once: MultiSet<i32> = [1, 2].into();
    debug_assert!(!twice.is_subset(&mut once));
}

#[test]
// Strings are stored compactly and searched by &str
fn test_set_5() {
    let mut set: StringSet = ["Route", "Math", "Route"].into_iter().collect();
    set.insert_str("Life");

    debug_assert_eq!(set.len(), 3);
    debug_assert!(set.contains("Math"));
    debug_assert!(!set.contains("Hangar"));
    debug_assert_eq!(set.first().map(|s| s.as_str()), Some("Life"));
}

#[test]
// Debug output is in sorted order and does not need a sort
fn test_set_6() {
    use alloc::format;

    let set: Set<i32> = [3, 1, 2, 1].into();
    debug_assert_eq!(format!("{:?}", set), "{1, 2, 3}");
    debug_assert!(!set.is_sorted());
}

#[test]
// A stress test with inserting and finding
fn test_set_7() {
    use rand::prelude::*;

    const COUNT: usize = 100000;

    let mut rng = SmallRng::seed_from_u64(1234567890);

    let mut set = Set::new();
    for _ in 0..COUNT {
        let key = rng.random_range(0..usize::MAX);
        set.insert(key);
    }

    debug_assert_eq!(set.len(), COUNT);

    let mut rng = SmallRng::seed_from_u64(1234567890);

    for _ in 0..COUNT {
        let key = rng.random_range(0..usize::MAX);
        debug_assert_eq!(set.find(&key), Some(&key));
    }
}

#[test]
// A stress test with inserting and popping from both ends
fn test_set_8() {
    use rand::prelude::*;

    const COUNT: usize = 10000;

    let mut rng = SmallRng::seed_from_u64(9876543210);

    let mut set = MultiSet::new();
    for _ in 0..COUNT {
        let key = rng.random_range(0..100u32);
        set.insert(key);
    }

    let mut previous = 0;
    for _ in 0..COUNT / 2 {
        let key = set.pop_first().unwrap();
        debug_assert!(previous <= key);
        previous = key;
    }

    let mut previous = u32::MAX;
    while let Some(key) = set.pop_last() {
        debug_assert!(key <= previous);
        previous = key;
    }

    debug_assert!(set.is_empty());
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    // Sets serialize as sorted sequences
    fn test_set_serde_0() {
        let set: Set<i32> = [3, 1, 2, 3].into();
        let json = serde_json::to_string(&set).unwrap();
        debug_assert_eq!(json, "[1,2,3]");

        let mut back: Set<i32> = serde_json::from_str("[9,4,9]").unwrap();
        debug_assert_eq!(back.as_slice(), &[4, 9]);
    }
}
