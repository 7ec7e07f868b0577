//! Native CSS pseudo-classes and pseudo-functions.
//!
//! A `:name` or `:name(...)` found here is copied through verbatim; anything
//! else is an engine function and is parsed structurally.

use std::collections::HashSet;
use std::sync::LazyLock;

/// [§ 4 Pseudo-classes](https://www.w3.org/TR/selectors-4/#pseudo-classes)
/// without arguments.
static PSEUDO_CLASSES: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    HashSet::from([
        "active",
        "any-link",
        "checked",
        "blank",
        "default",
        "defined",
        "disabled",
        "empty",
        "enabled",
        "first",
        "first-child",
        "first-of-type",
        "fullscreen",
        "focus",
        "focus-visible",
        "focus-within",
        "hover",
        "indeterminate",
        "in-range",
        "invalid",
        "last-child",
        "last-of-type",
        "link",
        "only-child",
        "only-of-type",
        "optional",
        "out-of-range",
        "placeholder-shown",
        "read-only",
        "read-write",
        "required",
        "root",
        "target",
        "valid",
        "visited",
    ])
});

/// Functional pseudo-classes whose arguments are not selectors.
static PSEUDO_FUNCTIONS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    HashSet::from([
        "dir",
        "lang",
        "nth-child",
        "nth-last-child",
        "nth-last-of-type",
        "nth-of-type",
    ])
});

/// Whether `:name` is a native pseudo-class. ASCII case-insensitive.
#[must_use]
pub fn is_builtin_pseudo_class(name: &str) -> bool {
    PSEUDO_CLASSES.contains(name.to_ascii_lowercase().as_str())
}

/// Whether `:name(...)` is a native pseudo-function. ASCII case-insensitive.
#[must_use]
pub fn is_builtin_pseudo_function(name: &str) -> bool {
    PSEUDO_FUNCTIONS.contains(name.to_ascii_lowercase().as_str())
}
