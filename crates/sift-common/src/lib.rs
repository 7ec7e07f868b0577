//! Common utilities for the sift selector tools.
//!
//! This crate provides shared infrastructure used by the parser and the CLI:
//! - **Warning System** - colored, de-duplicated diagnostics for recoverable problems

pub mod warning;
