//! Tests for clearing the warning registry.
//! Kept apart from `warning_tests.rs`: both mutate the same global set.

use sift_common::warning::{clear_warnings, has_warned, warn_once};

#[test]
fn test_clear_warnings() {
    warn_once("Clear", "to be cleared");
    assert!(has_warned("Clear", "to be cleared"));
    clear_warnings();
    assert!(!has_warned("Clear", "to be cleared"));
}
