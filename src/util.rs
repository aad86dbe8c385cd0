//! The engine behind every container type in this crate
//!
//! [`LazySorted`] stores its elements in a flat [`Store`] in the order they were inserted and
//! only sorts them when an operation needs order. A flag records whether the store is currently
//! sorted. Single inserts append and compare the new element with its predecessor, so elements
//! that arrive already in order never trigger a sort; bulk inserts append and mark the store as
//! unsorted.
//!
//! Every operation that depends on order takes `&mut self`, because it may have to sort first.
//! Shared references can only observe the store (`as_unsorted_slice`, `as_sorted_slice`,
//! `is_sorted`), which keeps concurrent readers from racing on a hidden sort.
#![warn(missing_docs)]

use alloc::vec::Vec;
use core::{
    cmp::Ordering,
    iter::FusedIterator,
    marker::PhantomData,
    mem,
    ops::Range,
    slice,
};
use itertools::Either;

use crate::{
    algebra,
    compare::{Compare, Natural, Project},
    store::{Capacity, Reserve, Store},
};

//-----------------------------------------------------------------------------------------------//

/// An associative container that sorts its elements lazily.
///
/// - `T` is the stored element.
/// - `P` projects an element onto its key, see [`crate::Identity`] and [`crate::First`].
/// - `C` orders keys, see [`crate::Natural`].
/// - `S` is the backing sequence, see [`crate::store`].
/// - `MULTI` allows several elements with equivalent keys.
///
/// While sorted, the elements are in non-decreasing key order and, unless `MULTI` is set, no two
/// keys are equivalent. Elements with equivalent keys keep their insertion order through every
/// sort. For containers without duplicates the first element inserted with a given key is the
/// one that survives.
///
/// The type aliases in this crate (`Set`, `MultiMap`, ...) cover the common configurations.
#[derive(Clone)]
pub struct LazySorted<T, P, C, S, const MULTI: bool> {
    pub(crate) elements: S,
    pub(crate) sorted: bool,
    pub(crate) compare: C,
    marker: PhantomData<fn() -> (T, P)>,
}

impl<T, P, const MULTI: bool> LazySorted<T, P, Natural, Vec<T>, MULTI> {
    /// Constructor
    pub const fn new() -> Self {
        LazySorted {
            elements: Vec::new(),
            sorted: true,
            compare: Natural,
            marker: PhantomData,
        }
    }

    /// Constructor
    pub fn with_capacity(capacity: usize) -> Self {
        LazySorted {
            elements: Vec::with_capacity(capacity),
            sorted: true,
            compare: Natural,
            marker: PhantomData,
        }
    }
}

impl<T, P, C, S, const MULTI: bool> LazySorted<T, P, C, S, MULTI>
where
    P: Project<T>,
    C: Compare<P::Key>,
    S: Store<T>,
{
    /// Constructor, ordering keys with `compare`
    pub fn with_comparator(compare: C) -> Self
    where
        S: Default,
    {
        Self::from_store(S::default(), compare)
    }

    /// Construct a container around existing elements.
    ///
    /// The elements may be in any order. Unless there is at most one of them, the container
    /// starts unsorted.
    pub fn from_store(elements: S, compare: C) -> Self {
        let sorted = elements.len() <= 1;
        LazySorted {
            elements,
            sorted,
            compare,
            marker: PhantomData,
        }
    }

    /// Sort the container and hand back its store
    pub fn into_store(mut self) -> S {
        self.sort();
        self.elements
    }

    /// Check if the elements are currently in sorted order. This never sorts.
    #[inline]
    pub fn is_sorted(&self) -> bool {
        self.sorted
    }

    /// Sort the elements now, if they are not sorted already.
    ///
    /// Queries sort on demand, so this is only needed to control when the cost is paid, or to
    /// make [`LazySorted::as_sorted_slice`] available to shared references.
    #[inline]
    pub fn sort(&mut self) {
        if !self.sorted {
            self.resort();
        }
    }

    fn resort(&mut self) {
        let before = self.elements.len();
        let compare = &self.compare;
        let slice = self.elements.as_mut_slice();

        // Stable, so equivalent keys keep insertion order and dedup keeps the first of each run
        slice.sort_by(|left, right| compare.compare(P::key(left), P::key(right)));
        if !MULTI {
            let len = partition_dedup(slice, |kept, next| {
                compare.equivalent(P::key(kept), P::key(next))
            });
            self.elements.truncate(len);
        }

        self.sorted = true;
        log::trace!(
            "resorted {} elements, {} remain (multi: {})",
            before,
            self.elements.len(),
            MULTI
        );
    }

    /// Get the number of elements.
    ///
    /// Containers without duplicates have to sort first, since pending duplicates only collapse
    /// when the elements are sorted.
    pub fn len(&mut self) -> usize {
        if !MULTI {
            self.sort();
        }
        self.elements.len()
    }

    /// Check if there are any elements. This never sorts.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Get the largest number of elements a container could theoretically hold
    pub fn max_len(&self) -> usize {
        isize::MAX as usize / mem::size_of::<T>().max(1)
    }

    /// Insert an element.
    ///
    /// The element is appended. The container stays sorted only if the new key sorts after the
    /// previous last key, or, when duplicates are allowed, is not less than it.
    pub fn insert(&mut self, value: T) {
        self.elements.push(value);
        if self.sorted {
            self.check_back();
        }
    }

    // Update the sorted flag after a push onto a sorted container
    fn check_back(&mut self) {
        if let [.., previous, last] = self.elements.as_slice() {
            let order = self.compare.compare(P::key(previous), P::key(last));
            self.sorted = if MULTI {
                order != Ordering::Greater
            } else {
                order == Ordering::Less
            };
        }
    }

    /// Insert a batch of elements.
    ///
    /// The batch is appended without looking at its order, and the container is considered
    /// unsorted afterwards unless it holds at most one element.
    pub fn insert_all<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.elements.append(iter);
        self.sorted = self.elements.len() <= 1;
        log::trace!("bulk insert, {} elements stored", self.elements.len());
    }

    /// Remove all elements
    pub fn clear(&mut self) {
        self.elements.clear();
        self.sorted = true;
    }

    /// Exchange the contents of two containers, including their comparators
    #[inline]
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    /// Keep only the elements for which `keep` returns `true`.
    ///
    /// The remaining elements keep their relative order, so this never makes a sorted container
    /// unsorted.
    pub fn retain<F: FnMut(&T) -> bool>(&mut self, mut keep: F) {
        let slice = self.elements.as_mut_slice();
        let mut len = 0;
        for index in 0..slice.len() {
            if keep(&slice[index]) {
                slice.swap(index, len);
                len += 1;
            }
        }
        self.elements.truncate(len);
    }

    //-------------------------------------------------------------------------------------------//

    /// Iterate over the elements in key order
    pub fn iter(&mut self) -> Iter<'_, T> {
        Iter {
            inner: self.as_slice().iter(),
        }
    }

    /// View the elements in key order
    pub fn as_slice(&mut self) -> &[T] {
        self.sort();
        self.elements.as_slice()
    }

    /// View the elements in their current order, without sorting
    #[inline]
    pub fn as_unsorted_slice(&self) -> &[T] {
        self.elements.as_slice()
    }

    /// View the elements in key order, if they are already sorted
    pub fn as_sorted_slice(&self) -> Option<&[T]> {
        if self.sorted {
            Some(self.elements.as_slice())
        } else {
            None
        }
    }

    /// Get the element with the smallest key
    pub fn first(&mut self) -> Option<&T> {
        self.as_slice().first()
    }

    /// Get the element with the largest key
    pub fn last(&mut self) -> Option<&T> {
        self.as_slice().last()
    }

    /// Remove and return the element with the smallest key
    pub fn pop_first(&mut self) -> Option<T> {
        self.sort();
        if self.elements.is_empty() {
            None
        } else {
            Some(self.elements.remove(0))
        }
    }

    /// Remove and return the element with the largest key
    pub fn pop_last(&mut self) -> Option<T> {
        self.sort();
        let len = self.elements.len();
        if len == 0 {
            None
        } else {
            Some(self.elements.remove(len - 1))
        }
    }

    //-------------------------------------------------------------------------------------------//

    /// Get the index of the first element whose key is not less than `key`
    pub fn lower_bound<Q>(&mut self, key: &Q) -> usize
    where
        Q: ?Sized,
        C: Compare<P::Key, Q>,
    {
        self.sort();
        self.lower_bound_sorted(key)
    }

    /// Get the index of the first element whose key is greater than `key`
    pub fn upper_bound<Q>(&mut self, key: &Q) -> usize
    where
        Q: ?Sized,
        C: Compare<P::Key, Q>,
    {
        self.sort();
        self.upper_bound_sorted(key)
    }

    /// Get the range of indices of the elements whose key is equivalent to `key`.
    ///
    /// If there are none, the range is empty and starts where such an element would go.
    pub fn equal_range<Q>(&mut self, key: &Q) -> Range<usize>
    where
        Q: ?Sized,
        C: Compare<P::Key, Q>,
    {
        self.sort();
        self.lower_bound_sorted(key)..self.upper_bound_sorted(key)
    }

    /// Get the index of an element whose key is equivalent to `key`.
    ///
    /// When there are several, this is the first of them.
    pub fn position<Q>(&mut self, key: &Q) -> Option<usize>
    where
        Q: ?Sized,
        C: Compare<P::Key, Q>,
    {
        self.sort();
        self.search(key).ok()
    }

    /// Find an element whose key is equivalent to `key`
    pub fn find<Q>(&mut self, key: &Q) -> Option<&T>
    where
        Q: ?Sized,
        C: Compare<P::Key, Q>,
    {
        let index = self.position(key)?;
        self.elements.as_slice().get(index)
    }

    /// Check if any element has a key equivalent to `key`
    pub fn contains<Q>(&mut self, key: &Q) -> bool
    where
        Q: ?Sized,
        C: Compare<P::Key, Q>,
    {
        self.position(key).is_some()
    }

    /// Count the elements whose key is equivalent to `key`
    pub fn count<Q>(&mut self, key: &Q) -> usize
    where
        Q: ?Sized,
        C: Compare<P::Key, Q>,
    {
        self.equal_range(key).len()
    }

    /// Remove every element whose key is equivalent to `key`, returning how many there were
    pub fn erase<Q>(&mut self, key: &Q) -> usize
    where
        Q: ?Sized,
        C: Compare<P::Key, Q>,
    {
        let range = self.equal_range(key);
        let count = range.len();
        self.elements.remove_range(range);
        count
    }

    /// Remove and return the element at `index`.
    ///
    /// The container is not sorted first. Indices are only meaningful if they were obtained
    /// while the container was sorted and nothing was inserted since.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn remove_at(&mut self, index: usize) -> T {
        self.elements.remove(index)
    }

    /// Remove the elements in `range`, without sorting first. See [`LazySorted::remove_at`].
    ///
    /// # Panics
    ///
    /// Panics if `range` is out of bounds.
    pub fn remove_range(&mut self, range: Range<usize>) {
        self.elements.remove_range(range);
    }

    //-------------------------------------------------------------------------------------------//

    /// Get the key comparator
    #[inline]
    pub fn comparator(&self) -> &C {
        &self.compare
    }

    /// Compare two elements by their keys
    pub fn compare_elements(&self, left: &T, right: &T) -> Ordering {
        self.compare.compare(P::key(left), P::key(right))
    }

    /// Check if two elements have equivalent keys
    pub fn equivalent_elements(&self, left: &T, right: &T) -> bool {
        self.compare.equivalent(P::key(left), P::key(right))
    }

    //-------------------------------------------------------------------------------------------//

    /// Merge the elements of both containers in key order, keeping all of them
    pub fn merge<'a>(&'a mut self, other: &'a mut Self) -> impl Iterator<Item = &'a T> + 'a {
        let (this, other) = sort_both(self, other);
        algebra::merge(this.as_unsorted_slice(), other.as_unsorted_slice(), move |l, r| {
            this.compare_elements(l, r)
        })
    }

    /// Iterate in key order over the elements in either container
    pub fn union<'a>(&'a mut self, other: &'a mut Self) -> impl Iterator<Item = &'a T> + 'a {
        let (this, other) = sort_both(self, other);
        algebra::union(this.as_unsorted_slice(), other.as_unsorted_slice(), move |l, r| {
            this.compare_elements(l, r)
        })
    }

    /// Iterate in key order over the elements in both containers
    pub fn intersection<'a>(
        &'a mut self,
        other: &'a mut Self,
    ) -> impl Iterator<Item = &'a T> + 'a {
        let (this, other) = sort_both(self, other);
        algebra::intersection(this.as_unsorted_slice(), other.as_unsorted_slice(), move |l, r| {
            this.compare_elements(l, r)
        })
    }

    /// Iterate in key order over the elements in this container but not in `other`
    pub fn difference<'a>(&'a mut self, other: &'a mut Self) -> impl Iterator<Item = &'a T> + 'a {
        let (this, other) = sort_both(self, other);
        algebra::difference(this.as_unsorted_slice(), other.as_unsorted_slice(), move |l, r| {
            this.compare_elements(l, r)
        })
    }

    /// Iterate in key order over the elements in exactly one of the containers
    pub fn symmetric_difference<'a>(
        &'a mut self,
        other: &'a mut Self,
    ) -> impl Iterator<Item = &'a T> + 'a {
        let (this, other) = sort_both(self, other);
        let (left, right) = (this.as_unsorted_slice(), other.as_unsorted_slice());
        algebra::symmetric_difference(left, right, move |l, r| this.compare_elements(l, r))
    }

    //-------------------------------------------------------------------------------------------//

    fn lower_bound_sorted<Q>(&self, key: &Q) -> usize
    where
        Q: ?Sized,
        C: Compare<P::Key, Q>,
    {
        let compare = &self.compare;
        self.elements
            .as_slice()
            .partition_point(|element| compare.compare(P::key(element), key) == Ordering::Less)
    }

    fn upper_bound_sorted<Q>(&self, key: &Q) -> usize
    where
        Q: ?Sized,
        C: Compare<P::Key, Q>,
    {
        let compare = &self.compare;
        self.elements
            .as_slice()
            .partition_point(|element| compare.compare(P::key(element), key) != Ordering::Greater)
    }

    /// Binary search a sorted container. `Ok` holds the index of the first element with an
    /// equivalent key, `Err` the index where such an element would be inserted.
    pub(crate) fn search<Q>(&self, key: &Q) -> Result<usize, usize>
    where
        Q: ?Sized,
        C: Compare<P::Key, Q>,
    {
        debug_assert!(self.sorted);

        let index = self.lower_bound_sorted(key);
        match self.elements.as_slice().get(index) {
            Some(element) if self.compare.compare(P::key(element), key) == Ordering::Equal => {
                Ok(index)
            }
            _ => Err(index),
        }
    }

    /// The elements in the order a sort would leave them in, without sorting the container.
    ///
    /// Sorted containers are read in place. Otherwise the order is worked out on a scratch
    /// vector of references.
    pub(crate) fn ordered(&self) -> impl Iterator<Item = &T> + '_ {
        if self.sorted {
            return Either::Left(self.elements.as_slice().iter());
        }

        let compare = &self.compare;
        let mut scratch: Vec<&T> = self.elements.as_slice().iter().collect();
        scratch.sort_by(|left, right| compare.compare(P::key(*left), P::key(*right)));
        if !MULTI {
            scratch.dedup_by(|next, kept| compare.equivalent(P::key(*kept), P::key(*next)));
        }
        Either::Right(scratch.into_iter())
    }
}

impl<T, P, C, S, const MULTI: bool> LazySorted<T, P, C, S, MULTI>
where
    S: Capacity,
{
    /// Get the number of elements the container can hold without reallocating
    #[inline]
    pub fn capacity(&self) -> usize {
        self.elements.capacity()
    }
}

impl<T, P, C, S, const MULTI: bool> LazySorted<T, P, C, S, MULTI>
where
    S: Reserve,
{
    /// Reserves capacity for at least `additional` more elements
    pub fn reserve(&mut self, additional: usize) {
        self.elements.reserve(additional);
    }

    /// Release as much unused capacity as possible
    pub fn shrink_to_fit(&mut self) {
        self.elements.shrink_to_fit();
    }
}

// Sort two containers and downgrade both borrows to shared ones
fn sort_both<'a, T, P, C, S, const MULTI: bool>(
    this: &'a mut LazySorted<T, P, C, S, MULTI>,
    other: &'a mut LazySorted<T, P, C, S, MULTI>,
) -> (
    &'a LazySorted<T, P, C, S, MULTI>,
    &'a LazySorted<T, P, C, S, MULTI>,
)
where
    P: Project<T>,
    C: Compare<P::Key>,
    S: Store<T>,
{
    this.sort();
    other.sort();
    (&*this, &*other)
}

// Move the first element of every run of equivalent neighbours to the front, keeping their order,
// and return how many there are. The tail is left in an unspecified order.
fn partition_dedup<T, F>(slice: &mut [T], mut same: F) -> usize
where
    F: FnMut(&T, &T) -> bool,
{
    if slice.len() <= 1 {
        return slice.len();
    }

    let mut len = 1;
    for index in 1..slice.len() {
        if !same(&slice[len - 1], &slice[index]) {
            slice.swap(len, index);
            len += 1;
        }
    }
    len
}

//-----------------------------------------------------------------------------------------------//

impl<T, P, C, S, const MULTI: bool> Default for LazySorted<T, P, C, S, MULTI>
where
    C: Default,
    S: Default,
{
    fn default() -> Self {
        LazySorted {
            elements: S::default(),
            sorted: true,
            compare: C::default(),
            marker: PhantomData,
        }
    }
}

impl<T, P, C, S, const MULTI: bool> FromIterator<T> for LazySorted<T, P, C, S, MULTI>
where
    P: Project<T>,
    C: Compare<P::Key> + Default,
    S: Store<T> + Default,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut container = Self::default();
        container.insert_all(iter);
        container
    }
}

impl<T, P, C, S, const MULTI: bool, const N: usize> From<[T; N]> for LazySorted<T, P, C, S, MULTI>
where
    P: Project<T>,
    C: Compare<P::Key> + Default,
    S: Store<T> + Default,
{
    fn from(elements: [T; N]) -> Self {
        Self::from_iter(elements)
    }
}

impl<T, P, C, S, const MULTI: bool> Extend<T> for LazySorted<T, P, C, S, MULTI>
where
    P: Project<T>,
    C: Compare<P::Key>,
    S: Store<T>,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.insert_all(iter);
    }
}

impl<'a, T, P, C, S, const MULTI: bool> IntoIterator for &'a mut LazySorted<T, P, C, S, MULTI>
where
    P: Project<T>,
    C: Compare<P::Key>,
    S: Store<T>,
{
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, P, C, S, const MULTI: bool> IntoIterator for LazySorted<T, P, C, S, MULTI>
where
    P: Project<T>,
    C: Compare<P::Key>,
    S: Store<T> + IntoIterator<Item = T>,
{
    type Item = T;
    type IntoIter = S::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.into_store().into_iter()
    }
}

//-----------------------------------------------------------------------------------------------//

// Comparisons use the elements' own `PartialEq`/`Ord`, not the key comparator, on the order the
// elements would have once sorted.

impl<T, P, C, S, const MULTI: bool> PartialEq for LazySorted<T, P, C, S, MULTI>
where
    T: PartialEq,
    P: Project<T>,
    C: Compare<P::Key>,
    S: Store<T>,
{
    fn eq(&self, other: &Self) -> bool {
        self.ordered().eq(other.ordered())
    }
}

impl<T, P, C, S, const MULTI: bool> Eq for LazySorted<T, P, C, S, MULTI>
where
    T: Eq,
    P: Project<T>,
    C: Compare<P::Key>,
    S: Store<T>,
{
}

impl<T, P, C, S, const MULTI: bool> PartialOrd for LazySorted<T, P, C, S, MULTI>
where
    T: PartialOrd,
    P: Project<T>,
    C: Compare<P::Key>,
    S: Store<T>,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.ordered().partial_cmp(other.ordered())
    }
}

impl<T, P, C, S, const MULTI: bool> Ord for LazySorted<T, P, C, S, MULTI>
where
    T: Ord,
    P: Project<T>,
    C: Compare<P::Key>,
    S: Store<T>,
{
    fn cmp(&self, other: &Self) -> Ordering {
        self.ordered().cmp(other.ordered())
    }
}

//-----------------------------------------------------------------------------------------------//

/// Iterator over the elements of a container, in key order
#[derive(Clone)]
pub struct Iter<'a, T> {
    inner: slice::Iter<'a, T>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<&'a T> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    #[inline]
    fn next_back(&mut self) -> Option<&'a T> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

//-----------------------------------------------------------------------------------------------//

#[cfg(test)]
type TestSet = LazySorted<i32, crate::Identity, Natural, Vec<i32>, false>;

#[cfg(test)]
type TestMultiSet = LazySorted<i32, crate::Identity, Natural, Vec<i32>, true>;

#[test]
// Inserting in order never leaves the sorted state
fn test_engine_0() {
    let mut set = TestSet::new();
    debug_assert!(set.is_sorted());

    for key in [1, 2, 5, 9] {
        set.insert(key);
        debug_assert!(set.is_sorted());
    }

    // An equal key breaks the order of a container without duplicates
    set.insert(9);
    debug_assert!(!set.is_sorted());
    debug_assert_eq!(set.len(), 4);
    debug_assert!(set.is_sorted());

    // ...but not of one with duplicates
    let mut multi = TestMultiSet::new();
    for key in [1, 1, 2, 2, 2] {
        multi.insert(key);
    }
    debug_assert!(multi.is_sorted());
    multi.insert(0);
    debug_assert!(!multi.is_sorted());
}

#[test]
// Bulk inserts leave the container unsorted unless it is trivially sorted
fn test_engine_1() {
    let mut set = TestSet::new();
    set.insert_all([7]);
    debug_assert!(set.is_sorted());

    set.insert_all([8, 9]);
    debug_assert!(!set.is_sorted());

    set.sort();
    debug_assert!(set.is_sorted());
    debug_assert_eq!(set.as_unsorted_slice(), &[7, 8, 9]);

    let empty: TestSet = [].into();
    debug_assert!(empty.is_sorted());
    debug_assert!(empty.is_empty());
}

#[test]
// Resorting removes duplicates, keeping the first one inserted
fn test_engine_2() {
    use alloc::vec;

    type PairSet = LazySorted<(i32, char), crate::First, Natural, Vec<(i32, char)>, false>;

    let mut set = PairSet::new();
    set.insert_all([(3, 'a'), (1, 'b'), (3, 'c'), (2, 'd'), (1, 'e'), (3, 'f')]);

    let v: Vec<(i32, char)> = set.iter().cloned().collect();
    debug_assert_eq!(v, vec![(1, 'b'), (2, 'd'), (3, 'a')]);
}

#[test]
// Lookups by bound
fn test_engine_3() {
    let mut multi: TestMultiSet = [5, 1, 3, 3, 9, 3].into();

    debug_assert_eq!(multi.lower_bound(&3), 1);
    debug_assert_eq!(multi.upper_bound(&3), 4);
    debug_assert_eq!(multi.equal_range(&3), 1..4);
    debug_assert_eq!(multi.equal_range(&4), 4..4);
    debug_assert_eq!(multi.count(&3), 3);
    debug_assert_eq!(multi.count(&4), 0);
    debug_assert_eq!(multi.position(&9), Some(5));
    debug_assert_eq!(multi.position(&10), None);
    debug_assert_eq!(multi.find(&5), Some(&5));
    debug_assert!(multi.contains(&1));
    debug_assert_eq!(multi.lower_bound(&100), 6);
    debug_assert_eq!(multi.first(), Some(&1));
    debug_assert_eq!(multi.last(), Some(&9));
}

#[test]
// Erasing by key and by position
fn test_engine_4() {
    let mut multi: TestMultiSet = [5, 1, 3, 3, 9, 3].into();

    debug_assert_eq!(multi.erase(&3), 3);
    debug_assert_eq!(multi.erase(&3), 0);
    debug_assert_eq!(multi.as_slice(), &[1, 5, 9]);

    let index = multi.position(&5).unwrap();
    debug_assert_eq!(multi.remove_at(index), 5);
    multi.remove_range(0..1);
    debug_assert_eq!(multi.as_slice(), &[9]);

    debug_assert_eq!(multi.pop_last(), Some(9));
    debug_assert_eq!(multi.pop_first(), None);
}

#[test]
// Clear, swap and retain
fn test_engine_5() {
    let mut left: TestSet = [3, 1, 2].into();
    let mut right = TestSet::new();

    left.swap(&mut right);
    debug_assert!(left.is_empty());
    debug_assert_eq!(right.as_slice(), &[1, 2, 3]);
    left.swap(&mut right);
    debug_assert_eq!(left.as_slice(), &[1, 2, 3]);

    left.retain(|key| key % 2 == 1);
    debug_assert!(left.is_sorted());
    debug_assert_eq!(left.as_slice(), &[1, 3]);

    left.insert_all([8, 4]);
    left.clear();
    debug_assert!(left.is_empty());
    debug_assert!(left.is_sorted());
}

#[test]
// Comparisons see the sorted order without sorting either side
fn test_engine_6() {
    let left: TestSet = [3, 1, 2, 1].into();
    let right: TestSet = [1, 2, 3].into();
    let bigger: TestSet = [1, 2, 4].into();

    debug_assert!(left == right);
    debug_assert!(!left.is_sorted());
    debug_assert!(left < bigger);
    debug_assert_eq!(bigger.cmp(&right), Ordering::Greater);

    let multi: TestMultiSet = [3, 1, 2, 1].into();
    let other: TestMultiSet = [1, 1, 2, 3].into();
    debug_assert!(multi == other);
}

#[test]
// Shared access only sees sorted data when it is sorted
fn test_engine_7() {
    let mut set: TestSet = [2, 1].into();
    debug_assert_eq!(set.as_sorted_slice(), None);
    debug_assert_eq!(set.as_unsorted_slice(), &[2, 1]);

    set.sort();
    debug_assert_eq!(set.as_sorted_slice(), Some(&[1, 2][..]));
}

#[test]
// Other stores, including capacity pass-through
fn test_engine_8() {
    use arrayvec::ArrayVec;
    use smallvec::SmallVec;

    let mut small: LazySorted<u8, crate::Identity, Natural, SmallVec<[u8; 4]>, false> =
        LazySorted::default();
    small.insert_all([4, 2, 4, 1]);
    debug_assert_eq!(small.as_slice(), &[1, 2, 4]);
    small.reserve(32);
    debug_assert!(small.capacity() >= 32);
    small.shrink_to_fit();

    let mut fixed: LazySorted<u8, crate::Identity, Natural, ArrayVec<u8, 8>, true> =
        LazySorted::default();
    fixed.insert_all([4, 2, 4, 1]);
    debug_assert_eq!(fixed.as_slice(), &[1, 2, 4, 4]);
    debug_assert_eq!(fixed.capacity(), 8);
}

#[test]
// Set algebra between two containers
fn test_engine_9() {
    use alloc::vec;

    let mut left: TestMultiSet = [1, 2, 2, 3, 5].into();
    let mut right: TestMultiSet = [2, 3, 3, 4].into();

    let v: Vec<i32> = left.union(&mut right).copied().collect();
    debug_assert_eq!(v, vec![1, 2, 2, 3, 3, 4, 5]);

    let v: Vec<i32> = left.intersection(&mut right).copied().collect();
    debug_assert_eq!(v, vec![2, 3]);

    let v: Vec<i32> = left.difference(&mut right).copied().collect();
    debug_assert_eq!(v, vec![1, 2, 5]);

    let v: Vec<i32> = left.symmetric_difference(&mut right).copied().collect();
    debug_assert_eq!(v, vec![1, 2, 3, 4, 5]);

    let v: Vec<i32> = left.merge(&mut right).copied().collect();
    debug_assert_eq!(v, vec![1, 2, 2, 2, 3, 3, 3, 4, 5]);
}

#[test]
// A stress test, inserting random keys and checking them against a sorted copy
fn test_engine_10() {
    use rand::prelude::*;

    const COUNT: usize = 100000;

    let mut rng = SmallRng::seed_from_u64(1234567890);

    let mut multi = LazySorted::<u32, crate::Identity, Natural, Vec<u32>, true>::new();
    let mut expected = Vec::with_capacity(COUNT);
    for _ in 0..COUNT {
        let key = rng.random_range(0..1000);
        multi.insert(key);
        expected.push(key);
    }
    expected.sort();

    debug_assert_eq!(multi.len(), COUNT);
    debug_assert_eq!(multi.as_slice(), expected.as_slice());

    let mut set = LazySorted::<u32, crate::Identity, Natural, Vec<u32>, false>::new();
    set.insert_all(expected.iter().rev().copied());
    expected.dedup();
    debug_assert_eq!(set.len(), expected.len());
    debug_assert_eq!(set.as_slice(), expected.as_slice());
}
