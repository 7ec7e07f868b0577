//! Canonical text for selector trees.
//!
//! Native CSS fragments are emitted exactly as they were parsed, so the
//! output only normalizes what the parser structured: whitespace around
//! combinators and commas, engine-function names, and literals.

use core::fmt;
use core::num::FpCategory;

use sift_common::warning::warn_once;

use crate::selector::{
    ComplexSelector, EngineFunction, FunctionArgument, SelectorList, SimpleSelector,
};

/// Serialize engine-function arguments, joined by `", "`.
///
/// Strings are wrapped in double quotes without escaping, so a string that
/// itself contains `"` or `\` does not survive a round trip; a warning is
/// printed when that happens.
///
/// ```
/// use sift_selector::{FunctionArgument, serialize_arguments};
///
/// let args = [FunctionArgument::String("foo".into()), FunctionArgument::Number(2.0)];
/// assert_eq!(serialize_arguments(&args), "\"foo\", 2");
/// ```
#[must_use]
pub fn serialize_arguments(args: &[FunctionArgument]) -> String {
    let mut out = String::new();
    write_arguments(&mut out, args);
    out
}

fn write_arguments(out: &mut String, args: &[FunctionArgument]) {
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        write_argument(out, arg);
    }
}

fn write_argument(out: &mut String, arg: &FunctionArgument) {
    match arg {
        FunctionArgument::String(value) => {
            if value.contains(['"', '\\']) {
                warn_once(
                    "Serializer",
                    &format!("string argument {value:?} cannot be quoted without escaping"),
                );
            }
            out.push('"');
            out.push_str(value);
            out.push('"');
        }
        FunctionArgument::Number(value) => write_number(out, *value),
        FunctionArgument::Selector(selector) => write_complex(out, selector),
    }
}

/// Shortest decimal form; negative zero is written `0`.
fn write_number(out: &mut String, value: f64) {
    if value.classify() == FpCategory::Zero {
        out.push('0');
    } else {
        out.push_str(&value.to_string());
    }
}

fn write_complex(out: &mut String, selector: &ComplexSelector) {
    for (i, part) in selector.parts.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        write_simple(out, &part.selector);
        if !part.combinator.is_descendant() {
            out.push(' ');
            out.push_str(part.combinator.as_ref());
        }
    }
}

fn write_simple(out: &mut String, selector: &SimpleSelector) {
    if let Some(raw_text) = &selector.raw_text {
        out.push_str(raw_text);
    }
    for function in &selector.functions {
        write_function(out, function);
    }
}

/// `:name(args)`. An engine function without arguments is written `:name()`,
/// which does not parse back.
fn write_function(out: &mut String, function: &EngineFunction) {
    out.push(':');
    out.push_str(&function.name);
    out.push('(');
    write_arguments(out, &function.args);
    out.push(')');
}

/// Render with `write`, for the `Display` impls below.
fn display_with<T: ?Sized>(
    f: &mut fmt::Formatter<'_>,
    value: &T,
    write: fn(&mut String, &T),
) -> fmt::Result {
    let mut out = String::new();
    write(&mut out, value);
    f.write_str(&out)
}

impl fmt::Display for FunctionArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        display_with(f, self, write_argument)
    }
}

impl fmt::Display for EngineFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        display_with(f, self, write_function)
    }
}

impl fmt::Display for SimpleSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        display_with(f, self, write_simple)
    }
}

impl fmt::Display for ComplexSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        display_with(f, self, write_complex)
    }
}

impl fmt::Display for SelectorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, selector) in self.selectors.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{selector}")?;
        }
        Ok(())
    }
}
