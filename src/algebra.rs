//! Set algebra over sorted sequences, and a sink that inserts into a container
//!
//! The functions here take two sequences that are already sorted by `compare` and combine them
//! lazily. Runs of equivalent elements are paired off one to one, so the results follow the usual
//! multiset rules: with `m` copies on the left and `n` on the right, a union yields `max(m, n)`,
//! an intersection `min(m, n)`, a difference `m - n` and a symmetric difference `|m - n|` copies.
//! Where an element is on both sides, the left one is produced.
//!
//! The containers expose the same operations as methods (`union`, `intersection`, ...) that sort
//! both operands first. Results can be collected straight into a container, or fed to one through
//! an [`Inserter`].
#![warn(missing_docs)]

use core::cmp::Ordering;
use itertools::{EitherOrBoth, Itertools};

use crate::{
    compare::{Compare, Project},
    store::Store,
    util::LazySorted,
};

//-----------------------------------------------------------------------------------------------//

/// Merge two sorted sequences, keeping every element. Equivalent elements from `left` come first.
pub fn merge<I, J, F>(left: I, right: J, mut compare: F) -> impl Iterator<Item = I::Item>
where
    I: IntoIterator,
    J: IntoIterator<Item = I::Item>,
    F: FnMut(&I::Item, &I::Item) -> Ordering,
{
    left.into_iter()
        .merge_by(right, move |l, r| compare(l, r) != Ordering::Greater)
}

/// The elements in either sorted sequence
pub fn union<I, J, F>(left: I, right: J, compare: F) -> impl Iterator<Item = I::Item>
where
    I: IntoIterator,
    J: IntoIterator<Item = I::Item>,
    F: FnMut(&I::Item, &I::Item) -> Ordering,
{
    left.into_iter()
        .merge_join_by(right, compare)
        .map(|pair| match pair {
            EitherOrBoth::Both(l, _) | EitherOrBoth::Left(l) => l,
            EitherOrBoth::Right(r) => r,
        })
}

/// The elements in both sorted sequences
pub fn intersection<I, J, F>(left: I, right: J, compare: F) -> impl Iterator<Item = I::Item>
where
    I: IntoIterator,
    J: IntoIterator<Item = I::Item>,
    F: FnMut(&I::Item, &I::Item) -> Ordering,
{
    left.into_iter()
        .merge_join_by(right, compare)
        .filter_map(|pair| match pair {
            EitherOrBoth::Both(l, _) => Some(l),
            _ => None,
        })
}

/// The elements in the `left` sorted sequence but not in `right`
pub fn difference<I, J, F>(left: I, right: J, compare: F) -> impl Iterator<Item = I::Item>
where
    I: IntoIterator,
    J: IntoIterator<Item = I::Item>,
    F: FnMut(&I::Item, &I::Item) -> Ordering,
{
    left.into_iter()
        .merge_join_by(right, compare)
        .filter_map(|pair| match pair {
            EitherOrBoth::Left(l) => Some(l),
            _ => None,
        })
}

/// The elements in exactly one of the sorted sequences
pub fn symmetric_difference<I, J, F>(
    left: I,
    right: J,
    compare: F,
) -> impl Iterator<Item = I::Item>
where
    I: IntoIterator,
    J: IntoIterator<Item = I::Item>,
    F: FnMut(&I::Item, &I::Item) -> Ordering,
{
    left.into_iter()
        .merge_join_by(right, compare)
        .filter_map(|pair| match pair {
            EitherOrBoth::Left(l) => Some(l),
            EitherOrBoth::Right(r) => Some(r),
            EitherOrBoth::Both(..) => None,
        })
}

//-----------------------------------------------------------------------------------------------//

/// A sink that inserts elements into a container one at a time.
///
/// Each element goes through the single element insert, so output that is already in order keeps
/// the container sorted. This makes it a good destination for the results of the functions in
/// this module, which are always in order. `Extend` on the container itself appends in bulk
/// instead, and always leaves it unsorted.
pub struct Inserter<'a, T, P, C, S, const MULTI: bool> {
    container: &'a mut LazySorted<T, P, C, S, MULTI>,
}

/// Create an [`Inserter`] for `container`
pub fn inserter<T, P, C, S, const MULTI: bool>(
    container: &mut LazySorted<T, P, C, S, MULTI>,
) -> Inserter<'_, T, P, C, S, MULTI>
where
    P: Project<T>,
    C: Compare<P::Key>,
    S: Store<T>,
{
    Inserter { container }
}

impl<T, P, C, S, const MULTI: bool> Inserter<'_, T, P, C, S, MULTI>
where
    P: Project<T>,
    C: Compare<P::Key>,
    S: Store<T>,
{
    /// Insert one element
    #[inline]
    pub fn push(&mut self, value: T) {
        self.container.insert(value);
    }
}

impl<T, P, C, S, const MULTI: bool> Extend<T> for Inserter<'_, T, P, C, S, MULTI>
where
    P: Project<T>,
    C: Compare<P::Key>,
    S: Store<T>,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

//-----------------------------------------------------------------------------------------------//

#[test]
// Multiset rules for the free functions
fn test_algebra_0() {
    use alloc::{vec, vec::Vec};

    let left = [1, 1, 1, 2, 4];
    let right = [1, 3, 4, 4];
    let compare = |l: &&i32, r: &&i32| l.cmp(r);

    let v: Vec<i32> = union(&left, &right, compare).copied().collect();
    debug_assert_eq!(v, vec![1, 1, 1, 2, 3, 4, 4]);

    let v: Vec<i32> = intersection(&left, &right, compare).copied().collect();
    debug_assert_eq!(v, vec![1, 4]);

    let v: Vec<i32> = difference(&left, &right, compare).copied().collect();
    debug_assert_eq!(v, vec![1, 1, 2]);

    let v: Vec<i32> = symmetric_difference(&left, &right, compare).copied().collect();
    debug_assert_eq!(v, vec![1, 1, 2, 3, 4]);

    let v: Vec<i32> = merge(&left, &right, compare).copied().collect();
    debug_assert_eq!(v, vec![1, 1, 1, 1, 2, 3, 4, 4, 4]);
}

#[test]
// Merging is stable, equivalent elements from the left come first
fn test_algebra_1() {
    use alloc::{vec, vec::Vec};

    let left = [(1, 'a'), (2, 'a')];
    let right = [(1, 'b'), (2, 'b')];

    let v: Vec<(i32, char)> = merge(left, right, |l, r| l.0.cmp(&r.0)).collect();
    debug_assert_eq!(v, vec![(1, 'a'), (1, 'b'), (2, 'a'), (2, 'b')]);
}

#[test]
// Feeding ordered output through an inserter keeps the destination sorted
fn test_algebra_2() {
    use crate::{MultiSet, Set};

    let mut left: Set<i32> = [5, 3, 1, 7].into();
    let mut right: Set<i32> = [3, 4, 5].into();

    let mut result = Set::new();
    inserter(&mut result).extend(left.union(&mut right).copied());
    debug_assert!(result.is_sorted());
    debug_assert_eq!(result.as_slice(), &[1, 3, 4, 5, 7]);

    result.clear();
    let mut sink = inserter(&mut result);
    for key in left.symmetric_difference(&mut right) {
        sink.push(*key);
    }
    debug_assert!(result.is_sorted());
    debug_assert_eq!(result.as_slice(), &[1, 4, 7]);

    // Out of order input still ends up sorted, it just costs a sort
    let mut multi = MultiSet::new();
    inserter(&mut multi).extend([3, 1, 3]);
    debug_assert!(!multi.is_sorted());
    debug_assert_eq!(multi.as_slice(), &[1, 3, 3]);
}
