//! Selector tree produced by the parser.
//!
//! The tree follows [Selectors Level 4](https://www.w3.org/TR/selectors-4/)
//! down to the compound level, but keeps native CSS fragments as opaque
//! text. Only *engine functions* (pseudo-class syntax whose name is not a
//! built-in) are broken out structurally, because their arguments can be
//! selectors themselves.

use serde::Serialize;
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display, EnumIter};

/// Built-in pseudo-class and pseudo-function names.
pub mod builtins;

/// [§ 16 Combinators](https://www.w3.org/TR/selectors-4/#combinators)
///
/// "A combinator is punctuation that represents a particular kind of
/// relationship between the selectors on either side."
///
/// Renders as the combinator's punctuation; the descendant combinator
/// renders as the empty string.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Display, AsRefStr, EnumIter,
)]
pub enum Combinator {
    /// [§ 16.1 Descendant combinator](https://www.w3.org/TR/selectors-4/#descendant-combinators)
    /// "A descendant combinator is whitespace that separates two compound selectors."
    ///
    /// Also the value carried by the last part of every complex selector.
    #[default]
    #[strum(serialize = "")]
    #[serde(rename = "")]
    Descendant,

    /// [§ 16.2 Child combinator](https://www.w3.org/TR/selectors-4/#child-combinators) (`>`)
    #[strum(serialize = ">")]
    #[serde(rename = ">")]
    Child,

    /// [§ 16.3 Next-sibling combinator](https://www.w3.org/TR/selectors-4/#adjacent-sibling-combinators) (`+`)
    #[strum(serialize = "+")]
    #[serde(rename = "+")]
    NextSibling,

    /// [§ 16.4 Subsequent-sibling combinator](https://www.w3.org/TR/selectors-4/#general-sibling-combinators) (`~`)
    #[strum(serialize = "~")]
    #[serde(rename = "~")]
    SubsequentSibling,
}

impl Combinator {
    /// The combinator spelled by a delim token, if any.
    #[must_use]
    pub fn from_delim(c: char) -> Option<Self> {
        let mut buf = [0; 4];
        let spelled: &str = c.encode_utf8(&mut buf);
        Self::iter()
            .filter(|combinator| !combinator.is_descendant())
            .find(|combinator| combinator.as_ref() == spelled)
    }

    /// Whether this is the implicit (whitespace) combinator.
    #[must_use]
    pub const fn is_descendant(self) -> bool {
        matches!(self, Self::Descendant)
    }
}

/// A custom pseudo-class such as `:has-text("foo")` or `:visible`.
///
/// The name is lowercase. A bare `:name` has no arguments.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngineFunction {
    /// The function name, without the leading colon.
    pub name: String,
    /// The parsed arguments, in source order.
    pub args: Vec<FunctionArgument>,
}

/// One argument of an [`EngineFunction`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FunctionArgument {
    /// A nested selector, e.g. the `div > span` in `:has(div > span)`.
    Selector(ComplexSelector),
    /// A numeric literal, as produced by the tokenizer.
    Number(f64),
    /// A quoted string literal, with escapes resolved.
    String(String),
}

impl FunctionArgument {
    /// The nested selector, if this argument is one.
    #[must_use]
    pub const fn as_selector(&self) -> Option<&ComplexSelector> {
        match self {
            Self::Selector(selector) => Some(selector),
            Self::Number(_) | Self::String(_) => None,
        }
    }
}

/// [§ 4.2 Compound selectors](https://www.w3.org/TR/selectors-4/#compound)
///
/// A run of conditions on a single element: the native CSS part is kept
/// verbatim in `raw_text`, engine functions are listed separately.
///
/// At least one of the two is non-empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimpleSelector {
    /// Verbatim CSS such as `div.item[data-x]:hover`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_text: Option<String>,
    /// Engine functions applied to the same element.
    pub functions: Vec<EngineFunction>,
}

/// A simple selector and the combinator linking it to the next one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectorPart {
    /// The simple selector.
    pub selector: SimpleSelector,
    /// Relationship to the *following* part. Always
    /// [`Combinator::Descendant`] on the last part.
    pub combinator: Combinator,
}

/// [§ 4.3 Complex selectors](https://www.w3.org/TR/selectors-4/#complex)
///
/// "A complex selector is a chain of one or more compound selectors separated
/// by combinators."
///
/// Unlike a matcher's right-to-left chain, parts are stored in source order:
/// `div > span` is `[div (Child), span (Descendant)]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComplexSelector {
    /// Non-empty, in source order.
    pub parts: Vec<SelectorPart>,
}

/// [§ 4.1 Selector lists](https://www.w3.org/TR/selectors-4/#grouping)
///
/// The comma-separated alternatives at the top level of a selector string.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SelectorList {
    /// Non-empty, in source order.
    pub selectors: Vec<ComplexSelector>,
}

impl SelectorList {
    /// Names of every engine function used anywhere in the list, nested
    /// arguments included. Each name appears once, in order of first use.
    #[must_use]
    pub fn function_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        for selector in &self.selectors {
            collect_function_names(selector, &mut names);
        }
        names
    }
}

fn collect_function_names<'a>(selector: &'a ComplexSelector, names: &mut Vec<&'a str>) {
    for part in &selector.parts {
        for function in &part.selector.functions {
            if !names.contains(&function.name.as_str()) {
                names.push(&function.name);
            }
            for nested in function.args.iter().filter_map(FunctionArgument::as_selector) {
                collect_function_names(nested, names);
            }
        }
    }
}
