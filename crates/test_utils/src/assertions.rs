//! Custom Test Assertions
//!
//! Error assertions that compare the exact user-facing message.

use std::fmt::{Debug, Display};

/// Asserts that `result` failed with exactly `expected` as its message
///
/// # Panics
///
/// Panics if the result is `Ok` or the message differs.
pub fn assert_error_message<T: Debug, E: Display>(result: Result<T, E>, expected: &str) {
    match result {
        Ok(value) => panic!("Expected error {expected:?}, got Ok({value:?})"),
        Err(error) => assert_eq!(error.to_string(), expected, "Unexpected error message"),
    }
}

/// Asserts that a list of items is ordered by the given key
pub fn assert_sorted_by<T, K: PartialOrd + Debug>(items: &[T], key: impl Fn(&T) -> K) {
    for pair in items.windows(2) {
        let (left, right) = (key(&pair[0]), key(&pair[1]));
        assert!(left <= right, "Items out of order: {left:?} before {right:?}");
    }
}
