//! Maps and multimaps, lazily sorted
#![warn(missing_docs)]

use alloc::vec::Vec;
use compact_str::CompactString;
use core::{fmt, iter::FusedIterator, slice};

use crate::{
    compare::{Compare, First, Natural},
    error::Error,
    store::Store,
    util::LazySorted,
};

//-----------------------------------------------------------------------------------------------//

/// A map between keys and values that sorts itself when it is queried.
///
/// Elements are stored as `(key, value)` pairs. If a key is inserted twice before the map is
/// sorted, the pair inserted first is kept.
pub type Map<K, V, C = Natural> = LazySorted<(K, V), First, C, Vec<(K, V)>, false>;

/// A map that may hold several values for the same key, kept in insertion order.
pub type MultiMap<K, V, C = Natural> = LazySorted<(K, V), First, C, Vec<(K, V)>, true>;

/// A simple map from strings to values.
///
/// This is a specialised version of `Map` that stores keys as compact strings and can be searched
/// with a plain `&str`.
pub type StringMap<V, C = Natural> =
    LazySorted<(CompactString, V), First, C, Vec<(CompactString, V)>, false>;

/// A map with keys ordered by a user supplied function.
pub type MapBy<K, V, F> = LazySorted<(K, V), First, F, Vec<(K, V)>, false>;

//-----------------------------------------------------------------------------------------------//

impl<K, V, C, S, const MULTI: bool> LazySorted<(K, V), First, C, S, MULTI>
where
    C: Compare<K>,
    S: Store<(K, V)>,
{
    /// Insert a key/value pair
    #[inline]
    pub fn emplace(&mut self, key: K, value: V) {
        self.insert((key, value));
    }

    /// Iterate over the pairs in key order, with mutable access to the values
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        self.sort();
        IterMut {
            inner: self.elements.as_mut_slice().iter_mut(),
        }
    }

    /// Iterate over the keys in order
    pub fn keys(&mut self) -> impl DoubleEndedIterator<Item = &K> + ExactSizeIterator + '_ {
        self.iter().map(|(key, _)| key)
    }

    /// Iterate over the values in key order
    pub fn values(&mut self) -> impl DoubleEndedIterator<Item = &V> + ExactSizeIterator + '_ {
        self.iter().map(|(_, value)| value)
    }

    /// Iterate mutably over the values in key order
    pub fn values_mut(
        &mut self,
    ) -> impl DoubleEndedIterator<Item = &mut V> + ExactSizeIterator + '_ {
        self.iter_mut().map(|(_, value)| value)
    }

    /// Iterate over the values stored under `key`, in the order they were inserted
    pub fn get_all<Q>(
        &mut self,
        key: &Q,
    ) -> impl DoubleEndedIterator<Item = &V> + ExactSizeIterator + '_
    where
        Q: ?Sized,
        C: Compare<K, Q>,
    {
        let range = self.equal_range(key);
        self.elements.as_slice()[range]
            .iter()
            .map(|(_, value)| value)
    }
}

impl<K, V, C, S> LazySorted<(K, V), First, C, S, false>
where
    C: Compare<K>,
    S: Store<(K, V)>,
{
    /// Get a value by key.
    ///
    /// If the key is not in the map then `None` is returned.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        Q: ?Sized,
        C: Compare<K, Q>,
    {
        self.find(key).map(|(_, value)| value)
    }

    /// Get a mutable value by key.
    ///
    /// If the key is not in the map then `None` is returned.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        Q: ?Sized,
        C: Compare<K, Q>,
    {
        let index = self.position(key)?;
        self.elements
            .as_mut_slice()
            .get_mut(index)
            .map(|(_, value)| value)
    }

    /// Get a value by key, failing with [`Error::KeyNotFound`] if it is absent
    pub fn at<Q>(&mut self, key: &Q) -> Result<&V, Error>
    where
        Q: ?Sized,
        C: Compare<K, Q>,
    {
        self.get(key).ok_or(Error::KeyNotFound)
    }

    /// Get a mutable value by key, failing with [`Error::KeyNotFound`] if it is absent
    pub fn at_mut<Q>(&mut self, key: &Q) -> Result<&mut V, Error>
    where
        Q: ?Sized,
        C: Compare<K, Q>,
    {
        self.get_mut(key).ok_or(Error::KeyNotFound)
    }

    /// Get the value for `key`, inserting a default value first if the key is absent
    pub fn get_or_insert_default(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        self.try_emplace(key, V::default).0
    }

    /// Set the value for `key`, replacing any value already there.
    ///
    /// Returns the stored value and whether the key was newly inserted.
    pub fn insert_or_assign(&mut self, key: K, value: V) -> (&mut V, bool) {
        self.sort();
        let (index, inserted) = match self.search(&key) {
            Ok(index) => {
                self.elements.as_mut_slice()[index].1 = value;
                (index, false)
            }
            Err(index) => {
                self.elements.insert(index, (key, value));
                (index, true)
            }
        };
        (&mut self.elements.as_mut_slice()[index].1, inserted)
    }

    /// Insert a value made by `make` if `key` is absent. An existing value is left alone and
    /// `make` is not called.
    ///
    /// Returns the stored value and whether the key was newly inserted.
    pub fn try_emplace<F>(&mut self, key: K, make: F) -> (&mut V, bool)
    where
        F: FnOnce() -> V,
    {
        self.sort();
        let (index, inserted) = match self.search(&key) {
            Ok(index) => (index, false),
            Err(index) => {
                self.elements.insert(index, (key, make()));
                (index, true)
            }
        };
        (&mut self.elements.as_mut_slice()[index].1, inserted)
    }
}

impl<V, C, S, const MULTI: bool> LazySorted<(CompactString, V), First, C, S, MULTI>
where
    C: Compare<CompactString>,
    S: Store<(CompactString, V)>,
{
    /// Insert a value under a string key
    pub fn emplace_str(&mut self, key: &str, value: V) {
        self.insert((CompactString::new(key), value));
    }
}

impl<'a, V, C, S, const MULTI: bool> FromIterator<(&'a str, V)>
    for LazySorted<(CompactString, V), First, C, S, MULTI>
where
    C: Compare<CompactString> + Default,
    S: Store<(CompactString, V)> + Default,
{
    fn from_iter<I: IntoIterator<Item = (&'a str, V)>>(iter: I) -> Self {
        iter.into_iter()
            .map(|(key, value)| (CompactString::new(key), value))
            .collect()
    }
}

impl<K, V, C, S, const MULTI: bool> fmt::Debug for LazySorted<(K, V), First, C, S, MULTI>
where
    K: fmt::Debug,
    V: fmt::Debug,
    C: Compare<K>,
    S: Store<(K, V)>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.ordered().map(|(key, value)| (key, value)))
            .finish()
    }
}

//-----------------------------------------------------------------------------------------------//

/// Iterator over the pairs of a map in key order, with mutable values
pub struct IterMut<'a, K, V> {
    inner: slice::IterMut<'a, (K, V)>,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, value)| (&*key, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IterMut<'_, K, V> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(key, value)| (&*key, value))
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {}

impl<K, V> FusedIterator for IterMut<'_, K, V> {}

//-----------------------------------------------------------------------------------------------//

#[cfg(feature = "serde")]
impl<K, V, C, S, const MULTI: bool> serde::Serialize for LazySorted<(K, V), First, C, S, MULTI>
where
    K: serde::Serialize,
    V: serde::Serialize,
    C: Compare<K>,
    S: Store<(K, V)>,
{
    fn serialize<Z>(&self, serializer: Z) -> Result<Z::Ok, Z::Error>
    where
        Z: serde::Serializer,
    {
        serializer.collect_map(self.ordered().map(|(key, value)| (key, value)))
    }
}

#[cfg(feature = "serde")]
struct MapVisitor<K, V, C, S, const MULTI: bool> {
    marker: core::marker::PhantomData<fn() -> (K, V, C, S)>,
}

#[cfg(feature = "serde")]
impl<'de, K, V, C, S, const MULTI: bool> serde::de::Visitor<'de> for MapVisitor<K, V, C, S, MULTI>
where
    K: serde::Deserialize<'de>,
    V: serde::Deserialize<'de>,
    C: Compare<K> + Default,
    S: Store<(K, V)> + Default,
{
    type Value = LazySorted<(K, V), First, C, S, MULTI>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::MapAccess<'de>,
    {
        let mut elements = S::default();
        while let Some(pair) = access.next_entry()? {
            elements.push(pair);
        }
        Ok(LazySorted::from_store(elements, C::default()))
    }
}

#[cfg(feature = "serde")]
impl<'de, K, V, C, S, const MULTI: bool> serde::Deserialize<'de>
    for LazySorted<(K, V), First, C, S, MULTI>
where
    K: serde::Deserialize<'de>,
    V: serde::Deserialize<'de>,
    C: Compare<K> + Default,
    S: Store<(K, V)> + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_map(MapVisitor {
            marker: core::marker::PhantomData,
        })
    }
}

//-----------------------------------------------------------------------------------------------//

#[test]
// A very simple test of a map
fn test_map_0() {
    use alloc::{
        string::{String, ToString},
        vec,
    };

    let mut map = Map::new();

    map.emplace(5, "Five".to_string());
    map.emplace(1, "One".to_string());
    map.emplace(9, "Nine".to_string());

    debug_assert_eq!(map.get(&5), Some(&"Five".to_string()));
    debug_assert_eq!(map.get(&4), None);

    let v: Vec<(i32, String)> = map.iter().cloned().collect();
    debug_assert_eq!(
        v,
        vec![
            (1, "One".to_string()),
            (5, "Five".to_string()),
            (9, "Nine".to_string())
        ]
    );
}

#[test]
// String keys, looked up by &str
fn test_map_1() {
    use alloc::{
        string::{String, ToString},
        vec,
    };

    let mut map = Map::new();

    map.emplace("Five".to_string(), 5);
    map.emplace("One".to_string(), 1);
    map.emplace("Nine".to_string(), 9);

    debug_assert_eq!(map.get("Five"), Some(&5));
    debug_assert_eq!(map.get("Seven"), None);

    let v: Vec<String> = map.keys().cloned().collect();
    debug_assert_eq!(
        v,
        vec!["Five".to_string(), "Nine".to_string(), "One".to_string()]
    );
}

#[test]
// Maps keep one value per key, multimaps keep them all in insertion order
fn test_map_2() {
    use alloc::vec;

    let mut map = Map::new();
    map.emplace(42, "Life");
    map.emplace(23, "Hangar");

    let v: Vec<(i32, &str)> = map.iter().copied().collect();
    debug_assert_eq!(v, vec![(23, "Hangar"), (42, "Life")]);

    let mut multi = MultiMap::new();
    multi.emplace(23, "Shuck");
    multi.emplace(42, "Life");
    multi.emplace(23, "Hangar");

    let v: Vec<(i32, &str)> = multi.iter().copied().collect();
    debug_assert_eq!(v, vec![(23, "Shuck"), (23, "Hangar"), (42, "Life")]);

    let v: Vec<&str> = multi.get_all(&23).copied().collect();
    debug_assert_eq!(v, vec!["Shuck", "Hangar"]);
    debug_assert_eq!(multi.get_all(&99).len(), 0);
}

#[test]
// Checked access and default insertion
fn test_map_3() {
    use alloc::string::{String, ToString};

    let mut map: Map<i32, String> = [
        (23, "Hangar".to_string()),
        (42, "Life".to_string()),
    ]
    .into();

    debug_assert_eq!(map.at(&99), Err(Error::KeyNotFound));
    debug_assert_eq!(map.at(&23).map(|s| s.as_str()), Ok("Hangar"));
    debug_assert_eq!(map.len(), 2);

    debug_assert_eq!(map.get_or_insert_default(99).as_str(), "");
    debug_assert_eq!(map.len(), 3);
    debug_assert!(map.is_sorted());

    map.get_or_insert_default(99).push_str("Red Balloons");
    map.at_mut(&42).unwrap().push('!');
    debug_assert_eq!(map.get(&99).map(|s| s.as_str()), Some("Red Balloons"));
    debug_assert_eq!(map.get(&42).map(|s| s.as_str()), Some("Life!"));
    debug_assert_eq!(map.at_mut(&7), Err(Error::KeyNotFound));
}

#[test]
// Erasing a key from a multimap removes every value stored under it
fn test_map_4() {
    let mut multi: MultiMap<i32, &str> = [(23, "Shuck"), (42, "Life"), (23, "Hangar")].into();

    debug_assert_eq!(multi.erase(&23), 2);
    debug_assert_eq!(multi.len(), 1);
    debug_assert_eq!(multi.find(&23), None);
    debug_assert_eq!(multi.erase(&23), 0);

    multi.emplace(11, "Math");
    multi.emplace(66, "Route");
    debug_assert!(!multi.is_sorted());
    multi.sort();
    debug_assert!(multi.is_sorted());
    debug_assert_eq!(multi.first(), Some(&(11, "Math")));
}

#[test]
// Assigning and emplacing only when absent
fn test_map_5() {
    let mut map = Map::new();

    let (value, inserted) = map.insert_or_assign(42, "Life");
    debug_assert_eq!((*value, inserted), ("Life", true));

    let (value, inserted) = map.insert_or_assign(42, "Universe");
    debug_assert_eq!((*value, inserted), ("Universe", false));

    let (value, inserted) = map.try_emplace(42, || "Everything");
    debug_assert_eq!((*value, inserted), ("Universe", false));

    let (value, inserted) = map.try_emplace(23, || "Hangar");
    debug_assert_eq!((*value, inserted), ("Hangar", true));

    let (_, inserted) = map.try_emplace(42, || unreachable!());
    debug_assert!(!inserted);

    debug_assert!(map.is_sorted());
    debug_assert_eq!(map.as_slice(), &[(23, "Hangar"), (42, "Universe")]);
}

#[test]
// Mutable iteration over values
fn test_map_6() {
    use alloc::vec;

    let mut map: Map<u32, u32> = [(3, 30), (1, 10), (2, 20)].into();

    for (key, value) in map.iter_mut() {
        *value += key;
    }
    for value in map.values_mut().rev().take(1) {
        *value = 0;
    }
    if let Some(value) = map.get_mut(&1) {
        *value *= 2;
    }

    let v: Vec<u32> = map.values().copied().collect();
    debug_assert_eq!(v, vec![22, 22, 0]);

    let v: Vec<u32> = map.keys().rev().copied().collect();
    debug_assert_eq!(v, vec![3, 2, 1]);
}

#[test]
// Strings are stored compactly and searched by &str
fn test_map_7() {
    let mut map: StringMap<i32> = [("Route", 66), ("Math", 11)].into_iter().collect();
    map.emplace_str("Life", 42);
    map.emplace_str("Math", 0);

    debug_assert_eq!(map.len(), 3);
    debug_assert_eq!(map.get("Math"), Some(&11));
    debug_assert_eq!(map.get("Life"), Some(&42));
    debug_assert_eq!(map.at("Hangar"), Err(Error::KeyNotFound));
}

#[test]
// Debug output is in key order and does not need a sort
fn test_map_8() {
    use alloc::format;

    let map: Map<i32, &str> = [(42, "Life"), (23, "Hangar")].into();
    debug_assert_eq!(format!("{:?}", map), r#"{23: "Hangar", 42: "Life"}"#);
    debug_assert!(!map.is_sorted());
}

#[test]
// A stress test with emplacing and getting
fn test_map_9() {
    use alloc::string::ToString;
    use rand::prelude::*;

    const COUNT: usize = 100000;

    let mut rng = SmallRng::seed_from_u64(1234567890);

    let mut map = Map::new();
    for _ in 0..COUNT {
        let key = rng.random_range(0..usize::MAX);
        let value = key.to_string();
        map.emplace(key, value);
    }

    debug_assert_eq!(map.len(), COUNT);

    let mut rng = SmallRng::seed_from_u64(1234567890);

    for _ in 0..COUNT {
        let key = rng.random_range(0..usize::MAX);
        let value = key.to_string();
        debug_assert_eq!(map.get(&key), Some(&value));
    }

    debug_assert_eq!(map.len(), COUNT);
}

#[test]
// A stress test with assigning into a map and checking against a count
fn test_map_10() {
    use rand::prelude::*;

    const COUNT: usize = 100000;

    let mut rng = SmallRng::seed_from_u64(5678901234);

    let mut map: Map<usize, usize> = Map::new();
    let mut counts = [0usize; 64];
    for _ in 0..COUNT {
        let key = rng.random_range(0..64usize);
        *map.get_or_insert_default(key) += 1;
        counts[key] += 1;
    }

    for (key, count) in map.iter() {
        debug_assert_eq!(counts[*key], *count);
    }
    debug_assert_eq!(map.values().sum::<usize>(), COUNT);
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    // Maps serialize as objects in key order
    fn test_map_serde_0() {
        use alloc::string::{String, ToString};

        let map: Map<String, i32> =
            [("Route".to_string(), 66), ("Math".to_string(), 11)].into();
        let json = serde_json::to_string(&map).unwrap();
        debug_assert_eq!(json, r#"{"Math":11,"Route":66}"#);

        let mut back: StringMap<i32> = serde_json::from_str(r#"{"b":2,"a":1}"#).unwrap();
        debug_assert!(!back.is_sorted());
        debug_assert_eq!(back.get("a"), Some(&1));
    }
}
