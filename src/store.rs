//! Backing sequences that hold the elements of a container
//!
//! A container keeps its elements in a flat sequence in insertion order and sorts that sequence
//! in place when it needs to. Anything that can append at the end, insert and remove by position,
//! and lend out its contents as a slice can serve as the backing sequence.
//!
//! Capacity management is optional. A store that can report its capacity implements
//! [`Capacity`], and one that can also grow and shrink on request implements [`Reserve`]. The
//! containers only offer `capacity`, `reserve` and `shrink_to_fit` when their store does.
#![warn(missing_docs)]

use alloc::vec::Vec;
use arrayvec::ArrayVec;
use core::ops::Range;
use smallvec::{Array, SmallVec};

//-----------------------------------------------------------------------------------------------//

/// A flat sequence of elements
pub trait Store<T> {
    /// Get the number of elements in the sequence
    fn len(&self) -> usize;

    /// Check if the sequence holds no elements
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// View the elements in sequence order
    fn as_slice(&self) -> &[T];

    /// View the elements in sequence order, mutably
    fn as_mut_slice(&mut self) -> &mut [T];

    /// Append an element at the end
    fn push(&mut self, value: T);

    /// Append every element of `iter` at the end, in order
    fn append<I: IntoIterator<Item = T>>(&mut self, iter: I);

    /// Insert an element at `index`, shifting the elements after it
    fn insert(&mut self, index: usize, value: T);

    /// Remove and return the element at `index`, shifting the elements after it
    fn remove(&mut self, index: usize) -> T;

    /// Remove the elements in `range`
    fn remove_range(&mut self, range: Range<usize>);

    /// Keep the first `len` elements and drop the rest
    fn truncate(&mut self, len: usize);

    /// Remove every element
    fn clear(&mut self);
}

/// A store that can report how many elements it can hold without allocating
pub trait Capacity {
    /// Get the number of elements the store can hold without allocating
    fn capacity(&self) -> usize;
}

/// A store whose allocation can be managed by the caller
pub trait Reserve: Capacity {
    /// Reserve room for at least `additional` more elements
    fn reserve(&mut self, additional: usize);

    /// Release as much unused capacity as possible
    fn shrink_to_fit(&mut self);
}

//-----------------------------------------------------------------------------------------------//

impl<T> Store<T> for Vec<T> {
    #[inline]
    fn len(&self) -> usize {
        Vec::len(self)
    }

    #[inline]
    fn as_slice(&self) -> &[T] {
        Vec::as_slice(self)
    }

    #[inline]
    fn as_mut_slice(&mut self) -> &mut [T] {
        Vec::as_mut_slice(self)
    }

    #[inline]
    fn push(&mut self, value: T) {
        Vec::push(self, value);
    }

    fn append<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        Extend::extend(self, iter);
    }

    fn insert(&mut self, index: usize, value: T) {
        Vec::insert(self, index, value);
    }

    fn remove(&mut self, index: usize) -> T {
        Vec::remove(self, index)
    }

    fn remove_range(&mut self, range: Range<usize>) {
        Vec::drain(self, range);
    }

    fn truncate(&mut self, len: usize) {
        Vec::truncate(self, len);
    }

    fn clear(&mut self) {
        Vec::clear(self);
    }
}

impl<T> Capacity for Vec<T> {
    #[inline]
    fn capacity(&self) -> usize {
        Vec::capacity(self)
    }
}

impl<T> Reserve for Vec<T> {
    fn reserve(&mut self, additional: usize) {
        Vec::reserve(self, additional);
    }

    fn shrink_to_fit(&mut self) {
        Vec::shrink_to_fit(self);
    }
}

//-----------------------------------------------------------------------------------------------//

impl<A: Array> Store<A::Item> for SmallVec<A> {
    #[inline]
    fn len(&self) -> usize {
        SmallVec::len(self)
    }

    #[inline]
    fn as_slice(&self) -> &[A::Item] {
        SmallVec::as_slice(self)
    }

    #[inline]
    fn as_mut_slice(&mut self) -> &mut [A::Item] {
        SmallVec::as_mut_slice(self)
    }

    #[inline]
    fn push(&mut self, value: A::Item) {
        SmallVec::push(self, value);
    }

    fn append<I: IntoIterator<Item = A::Item>>(&mut self, iter: I) {
        Extend::extend(self, iter);
    }

    fn insert(&mut self, index: usize, value: A::Item) {
        SmallVec::insert(self, index, value);
    }

    fn remove(&mut self, index: usize) -> A::Item {
        SmallVec::remove(self, index)
    }

    fn remove_range(&mut self, range: Range<usize>) {
        SmallVec::drain(self, range);
    }

    fn truncate(&mut self, len: usize) {
        SmallVec::truncate(self, len);
    }

    fn clear(&mut self) {
        SmallVec::clear(self);
    }
}

impl<A: Array> Capacity for SmallVec<A> {
    #[inline]
    fn capacity(&self) -> usize {
        SmallVec::capacity(self)
    }
}

impl<A: Array> Reserve for SmallVec<A> {
    fn reserve(&mut self, additional: usize) {
        SmallVec::reserve(self, additional);
    }

    fn shrink_to_fit(&mut self) {
        SmallVec::shrink_to_fit(self);
    }
}

//-----------------------------------------------------------------------------------------------//

/// Fixed capacity storage. Pushing past `CAP` elements panics, as it does for `ArrayVec` itself.
impl<T, const CAP: usize> Store<T> for ArrayVec<T, CAP> {
    #[inline]
    fn len(&self) -> usize {
        ArrayVec::len(self)
    }

    #[inline]
    fn as_slice(&self) -> &[T] {
        ArrayVec::as_slice(self)
    }

    #[inline]
    fn as_mut_slice(&mut self) -> &mut [T] {
        ArrayVec::as_mut_slice(self)
    }

    #[inline]
    fn push(&mut self, value: T) {
        ArrayVec::push(self, value);
    }

    fn append<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        Extend::extend(self, iter);
    }

    fn insert(&mut self, index: usize, value: T) {
        ArrayVec::insert(self, index, value);
    }

    fn remove(&mut self, index: usize) -> T {
        ArrayVec::remove(self, index)
    }

    fn remove_range(&mut self, range: Range<usize>) {
        ArrayVec::drain(self, range);
    }

    fn truncate(&mut self, len: usize) {
        ArrayVec::truncate(self, len);
    }

    fn clear(&mut self) {
        ArrayVec::clear(self);
    }
}

impl<T, const CAP: usize> Capacity for ArrayVec<T, CAP> {
    #[inline]
    fn capacity(&self) -> usize {
        CAP
    }
}

//-----------------------------------------------------------------------------------------------//

#[test]
// Every store behaves the same way through the trait
fn test_store_0() {
    fn exercise<S: Store<u32> + Default>() {
        let mut store = S::default();
        debug_assert!(store.is_empty());

        store.push(3);
        store.append([1, 4, 1, 5]);
        debug_assert_eq!(store.as_slice(), &[3, 1, 4, 1, 5]);

        store.insert(0, 9);
        debug_assert_eq!(store.remove(2), 1);
        debug_assert_eq!(store.as_slice(), &[9, 3, 4, 1, 5]);

        store.remove_range(1..3);
        debug_assert_eq!(store.as_slice(), &[9, 1, 5]);

        store.as_mut_slice().sort();
        store.truncate(2);
        debug_assert_eq!(store.as_slice(), &[1, 5]);

        store.clear();
        debug_assert_eq!(store.len(), 0);
    }

    exercise::<Vec<u32>>();
    exercise::<SmallVec<[u32; 2]>>();
    exercise::<ArrayVec<u32, 8>>();
}

#[test]
// Capacity hooks pass straight through to the store
fn test_store_1() {
    let mut store: Vec<u8> = Vec::new();
    Reserve::reserve(&mut store, 32);
    debug_assert!(Capacity::capacity(&store) >= 32);
    Reserve::shrink_to_fit(&mut store);

    let mut store: SmallVec<[u8; 4]> = SmallVec::new();
    debug_assert_eq!(Capacity::capacity(&store), 4);
    Reserve::reserve(&mut store, 16);
    debug_assert!(Capacity::capacity(&store) >= 16);

    let store: ArrayVec<u8, 16> = ArrayVec::new();
    debug_assert_eq!(Capacity::capacity(&store), 16);
}
