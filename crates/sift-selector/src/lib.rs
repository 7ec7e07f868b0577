//! Selector tokenizer, parser, and serializer with engine-function extensions.
//!
//! # Scope
//!
//! This crate implements:
//! - **CSS Tokenizer** ([§ 4 Tokenization](https://www.w3.org/TR/css-syntax-3/#tokenization))
//!   - All Level 3 token types plus the column and attribute-match tokens
//!   - Source text and offset recorded for every token
//!   - Comment handling and escape sequences
//!
//! - **Selector Parser** ([Selectors Level 4](https://www.w3.org/TR/selectors-4/))
//!   - Type, class, ID, universal, and attribute selectors (kept verbatim)
//!   - Built-in pseudo-classes and pseudo-functions (kept verbatim)
//!   - Complex selectors with combinators (descendant, child, sibling)
//!   - Engine functions: any other `:name` or `:name(args)`, with arguments
//!     that are nested selectors, strings, or numbers
//!
//! - **Serializer**
//!   - Canonical text for argument lists and selector trees
//!
//! # Not Supported
//!
//! - Attribute match operators (`~=`, `|=`, `^=`, `$=`, `*=`)
//! - At-rules, blocks, urls, and percentages
//! - Pseudo-elements (`::before`)
//! - Matching selectors against a document

/// Tokenizer and parser errors.
pub mod error;
/// Selector parser.
pub mod parser;
/// Selector tree types.
pub mod selector;
/// Selector serialization.
pub mod serialize;
/// CSS tokenizer per [§ 4 Tokenization](https://www.w3.org/TR/css-syntax-3/#tokenization).
pub mod tokenizer;

// Re-exports for convenience
pub use error::{LexError, ParseErrorKind, SelectorError};
pub use parser::{SelectorParser, parse_function_arguments, parse_selector};
pub use selector::{
    Combinator, ComplexSelector, EngineFunction, FunctionArgument, SelectorList, SelectorPart,
    SimpleSelector,
};
pub use serialize::serialize_arguments;
pub use tokenizer::{CSSToken, CSSTokenizer, Spanned, tokenize};
