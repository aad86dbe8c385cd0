//! ## Introduction
//!
//! This crate implements associative containers (sets, multisets, maps and multimaps) that keep
//! their elements in a flat, contiguous sequence and only sort it when they have to. Inserting is
//! an append. The first lookup, bound query or ordered iteration after a run of inserts sorts the
//! sequence once, and every query after that is a binary search until the next out of order
//! insert.
//!
//! This suits workloads that fill a container in one phase and read it in another, where a
//! balanced tree would pay for ordering on every insert.
//!
//! ## Benefits
//!
//! - Keys do not need to be hashable, only ordered, either by `Ord` or by a supplied function.
//! - Elements are stored contiguously in the order they arrive, and inserting elements that are
//!   already in order never triggers a sort.
//! - Elements with equivalent keys keep their insertion order through every sort. For containers
//!   without duplicates the first element inserted under a key is the one that is kept.
//! - Lookups can use any type the key borrows as, so `String` keys can be searched with a `&str`.
//! - The backing sequence is pluggable: `Vec`, `SmallVec` and `ArrayVec` are supported, see
//!   [`store`].
//! - The crate is `#![no_std]`.
//!
//! Because a query may sort, every operation that depends on order takes `&mut self`. A shared
//! reference can still read a container that is already sorted through
//! [`LazySorted::as_sorted_slice`]. Comparisons and `Debug` work from a shared reference and
//! never sort.
//!
//! ## Contents
//!
//! All of the containers are configurations of the single engine [`LazySorted`].
//!
//! <center>
//!
//! | Type        | Stores       | Duplicates | Sorts By  |
//! |:------------|:-------------|:-----------|:----------|
//! | `Set`       | Key          | No         | Ord       |
//! | `MultiSet`  | Key          | Yes        | Ord       |
//! | `Map`       | Key/Value    | No         | Ord       |
//! | `MultiMap`  | Key/Value    | Yes        | Ord       |
//! | `StringSet` | String       | No         | Ord       |
//! | `StringMap` | String/Value | No         | Ord       |
//! | `SetBy`     | Key          | No         | Function  |
//! | `MapBy`     | Key/Value    | No         | Function  |
//!
//! </center>
//!
//! The [`algebra`] module adds merging, union, intersection and differences of sorted sequences,
//! and an [`Inserter`] that feeds their results back into a container.
//!
//! ## Features
//!
//! - `serde`: `Serialize` and `Deserialize` for the set and map types. Sets are written as
//!   sequences and maps as maps, in key order.

#![no_std]
#![warn(missing_docs)]

extern crate alloc;

pub mod algebra;
pub mod compare;
mod error;
mod map;
mod set;
pub mod store;
pub mod util;

pub use algebra::{inserter, Inserter};
pub use compare::{Compare, First, Identity, Natural, Project};
pub use error::Error;
pub use map::*;
pub use set::*;
pub use util::LazySorted;
