//! Errors reported by the lazily sorted containers
#![warn(missing_docs)]

/// Failures surfaced by container lookups.
///
/// Only accessors that treat absence as exceptional (`at`, `at_mut`) report an error. Everything
/// else signals a missing key with `None`, a zero count or an empty range.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Error {
    /// No element has a key equivalent to the one requested
    #[error("no element with the requested key")]
    KeyNotFound,
}

//-----------------------------------------------------------------------------------------------//

#[test]
// The error message is stable and readable
fn test_error_0() {
    use alloc::string::ToString;

    debug_assert_eq!(
        Error::KeyNotFound.to_string(),
        "no element with the requested key"
    );
}
