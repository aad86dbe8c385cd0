//! Key projection and key ordering used by the containers
#![warn(missing_docs)]

use core::{borrow::Borrow, cmp::Ordering};

//-----------------------------------------------------------------------------------------------//

/// Extracts the key an element is sorted by.
///
/// Projections are stateless: the key of an element never depends on anything but the element
/// itself, so the container never has to store one.
pub trait Project<T> {
    /// The key type
    type Key;

    /// Borrow the key of `element`
    fn key(element: &T) -> &Self::Key;
}

/// Projection for set-like containers, the element is its own key.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Identity;

impl<K> Project<K> for Identity {
    type Key = K;

    #[inline]
    fn key(element: &K) -> &K {
        element
    }
}

/// Projection for map-like containers, the key is the first half of a `(key, value)` pair.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct First;

impl<K, V> Project<(K, V)> for First {
    type Key = K;

    #[inline]
    fn key(element: &(K, V)) -> &K {
        &element.0
    }
}

//-----------------------------------------------------------------------------------------------//

/// A strict weak ordering over keys.
///
/// `R` is the type on the right hand side of the comparison and defaults to `L`. Lookups accept
/// any `R` the comparator is implemented for, which is how heterogeneous (transparent) lookups
/// such as searching `String` keys with a `&str` are expressed.
///
/// `equivalent` must agree with `compare`: two keys are equivalent exactly when `compare` returns
/// `Ordering::Equal`. Implementations may override it with something cheaper, but the containers
/// do not check the two for consistency.
pub trait Compare<L: ?Sized, R: ?Sized = L> {
    /// Three way comparison of `left` against `right`
    fn compare(&self, left: &L, right: &R) -> Ordering;

    /// Check if `left` is strictly less than `right`
    #[inline]
    fn less(&self, left: &L, right: &R) -> bool {
        self.compare(left, right) == Ordering::Less
    }

    /// Check if `left` and `right` are equivalent keys
    #[inline]
    fn equivalent(&self, left: &L, right: &R) -> bool {
        self.compare(left, right) == Ordering::Equal
    }
}

/// The natural ordering given by `Ord`.
///
/// Keys can be compared with anything they borrow as, so a container of `String` can be searched
/// with a `&str`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Natural;

impl<K, Q> Compare<K, Q> for Natural
where
    K: Borrow<Q> + ?Sized,
    Q: Ord + ?Sized,
{
    #[inline]
    fn compare(&self, left: &K, right: &Q) -> Ordering {
        left.borrow().cmp(right)
    }

    #[inline]
    fn equivalent(&self, left: &K, right: &Q) -> bool {
        left.borrow() == right
    }
}

impl<L, R, F> Compare<L, R> for F
where
    L: ?Sized,
    R: ?Sized,
    F: Fn(&L, &R) -> Ordering,
{
    #[inline]
    fn compare(&self, left: &L, right: &R) -> Ordering {
        self(left, right)
    }
}

//-----------------------------------------------------------------------------------------------//

#[test]
// Natural ordering, including a borrowed right hand side
fn test_compare_0() {
    use alloc::string::{String, ToString};

    debug_assert_eq!(Natural.compare(&1_i32, &2_i32), Ordering::Less);
    debug_assert!(Natural.less(&1_i32, &2_i32));
    debug_assert!(!Natural.less(&2_i32, &2_i32));
    debug_assert!(Natural.equivalent(&2_i32, &2_i32));

    let key: String = "Hangar".to_string();
    debug_assert_eq!(
        Compare::<String, str>::compare(&Natural, &key, "Life"),
        Ordering::Less
    );
    debug_assert!(Compare::<String, str>::equivalent(&Natural, &key, "Hangar"));
}

#[test]
// Closures act as comparators
fn test_compare_1() {
    let reverse = |left: &i32, right: &i32| right.cmp(left);

    debug_assert!(reverse.less(&2, &1));
    debug_assert!(!reverse.less(&1, &2));
    debug_assert!(reverse.equivalent(&7, &7));
}

#[test]
// Projections borrow the right part of the element
fn test_compare_2() {
    debug_assert_eq!(*Identity::key(&42), 42);
    debug_assert_eq!(*First::key(&(23, "Hangar")), 23);
}
