//! Selector parser module.

/// Recursive-descent parser over the selector token stream.
pub mod selector_parser;

pub use selector_parser::{
    SelectorParser, check_supported, parse_function_arguments, parse_selector,
};
