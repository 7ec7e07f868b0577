//! Errors produced while tokenizing and parsing selectors.
//!
//! Every [`SelectorError`] message embeds the complete selector string so the
//! caller can show it to a user as-is.

use core::fmt;

use thiserror::Error;

/// An input the tokenizer cannot turn into tokens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    /// A `/*` with no closing `*/`.
    #[error("Unterminated comment at offset {offset}")]
    UnterminatedComment {
        /// Character offset of the opening `/*`.
        offset: usize,
    },

    /// A backslash followed by a newline outside of a string.
    #[error("Invalid escape at offset {offset}")]
    InvalidEscape {
        /// Character offset of the backslash.
        offset: usize,
    },
}

/// What the parser ran into when the grammar was violated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A token that cannot appear at this point; holds its source text.
    UnexpectedToken(String),
    /// The input ended while a construct was still open or empty.
    UnexpectedEnd,
    /// The input parsed, but its top level is a bare string or number.
    NotASelector,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedToken(source) => write!(f, "Unexpected token \"{source}\""),
            Self::UnexpectedEnd => f.write_str("Unexpected end of input"),
            Self::NotASelector => f.write_str("Error"),
        }
    }
}

/// Failure to turn a selector string into a selector tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    /// The tokenizer rejected the input.
    #[error("{source} while parsing css selector \"{selector}\". Did you mean to CSS.escape it?")]
    Lex {
        /// The underlying tokenizer error.
        #[source]
        source: LexError,
        /// The complete selector string.
        selector: String,
    },

    /// The input contains a token kind outside the selector grammar.
    #[error(
        "Unsupported token \"{token}\" while parsing css selector \"{selector}\". Did you mean to CSS.escape it?"
    )]
    UnsupportedToken {
        /// Source text of the first rejected token.
        token: String,
        /// The complete selector string.
        selector: String,
    },

    /// The token stream does not follow the selector grammar.
    #[error("{kind} while parsing css selector \"{selector}\". Did you mean to CSS.escape it?")]
    Parse {
        /// What went wrong.
        kind: ParseErrorKind,
        /// The complete selector string.
        selector: String,
    },
}

impl SelectorError {
    /// The selector string this error refers to.
    #[must_use]
    pub fn selector(&self) -> &str {
        match self {
            Self::Lex { selector, .. }
            | Self::UnsupportedToken { selector, .. }
            | Self::Parse { selector, .. } => selector,
        }
    }
}
