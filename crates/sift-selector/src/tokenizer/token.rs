//! CSS Token types per [§ 4 Tokenization](https://www.w3.org/TR/css-syntax-3/#tokenization).
//!
//! "The output of the tokenization step is a stream of zero or more of the
//! following tokens: `<ident-token>`, `<function-token>`, `<at-keyword-token>`,
//! `<hash-token>`, `<string-token>`, `<bad-string-token>`, `<url-token>`,
//! `<bad-url-token>`, `<delim-token>`, `<number-token>`, `<percentage-token>`,
//! `<dimension-token>`, `<whitespace-token>`, `<CDO-token>`, `<CDC-token>`,
//! `<colon-token>`, `<semicolon-token>`, `<comma-token>`, `<[-token>`,
//! `<]-token>`, `<(-token>`, `<)-token>`, `<{-token>`, and `<}-token>`."
//!
//! On top of the Level 3 set, the selector tokenizer keeps the column token
//! and the attribute match tokens from
//! [CSS Syntax 2021](https://www.w3.org/TR/2021/CRD-css-syntax-3-20211224/)
//! so the selector grammar can reject them by kind.

use core::fmt;

/// [§ 4.2 Definitions](https://www.w3.org/TR/css-syntax-3/#token-diagrams)
///
/// "A `<hash-token>` with the type flag set to 'id'... or 'unrestricted'."
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashType {
    /// "id" - the hash token's value is a valid identifier
    Id,
    /// "unrestricted" - the hash token's value is not a valid identifier
    Unrestricted,
}

/// [§ 4.2 Definitions](https://www.w3.org/TR/css-syntax-3/#token-diagrams)
///
/// "A `<number-token>` has a type flag set to either 'integer' or 'number'."
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericType {
    /// "integer" - the number is an integer
    Integer,
    /// "number" - the number has a decimal point or exponent
    Number,
}

/// CSS tokens as produced by the selector tokenizer.
///
/// The payloads carry the *interpreted* value (escapes resolved). The exact
/// text a token was lexed from lives on [`Spanned::source`].
#[derive(Debug, Clone, PartialEq)]
pub enum CSSToken {
    /// `<ident-token>`: a type selector or pseudo-class name
    Ident(String),
    /// `<function-token>`: the name, without the trailing `(`
    Function(String),
    /// `<at-keyword-token>`, value without the `@`
    AtKeyword(String),
    /// `<hash-token>`: an ID selector when `hash_type` is [`HashType::Id`]
    Hash {
        /// Value without the `#`
        value: String,
        /// Whether the value would start an ident sequence
        hash_type: HashType,
    },
    /// `<string-token>`, quotes removed
    String(String),
    /// `<bad-string-token>`: a string broken by a newline
    BadString,
    /// `<url-token>` for an unquoted `url(...)`
    Url(String),
    /// `<bad-url-token>`
    BadUrl,
    /// `<delim-token>`: `.`, `*`, `>`, `+`, `~` and any other lone code point
    Delim(char),
    /// `<number-token>`
    Number {
        /// Numeric value, sign included
        value: f64,
        /// Integer or number
        numeric_type: NumericType,
    },
    /// `<percentage-token>`
    Percentage {
        /// Value before the `%`
        value: f64,
    },
    /// `<dimension-token>`, e.g. `2n` in `:nth-child(2n+1)`
    Dimension {
        /// Numeric part
        value: f64,
        /// Unit ident
        unit: String,
    },
    /// `<whitespace-token>`: one run of whitespace
    Whitespace,
    /// `<CDO-token>` (`<!--`)
    CDO,
    /// `<CDC-token>` (`-->`)
    CDC,
    /// `:`
    Colon,
    /// `;`
    Semicolon,
    /// `,`
    Comma,
    /// `[`
    LeftBracket,
    /// `]`
    RightBracket,
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `{`
    LeftBrace,
    /// `}`
    RightBrace,
    /// `<column-token>` (`||`)
    Column,
    /// `~=`
    IncludeMatch,
    /// `|=`
    DashMatch,
    /// `^=`
    PrefixMatch,
    /// `$=`
    SuffixMatch,
    /// `*=`
    SubstringMatch,
    /// End of input; always the last token of a stream
    EOF,
}

impl CSSToken {
    /// Returns true if this is an EOF token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self, Self::EOF)
    }

    /// Returns true if this is a whitespace token.
    #[must_use]
    pub const fn is_whitespace(&self) -> bool {
        matches!(self, Self::Whitespace)
    }

    /// Whether the selector grammar accepts this kind of token at all.
    ///
    /// Everything outside the selector subset (at-rules, blocks, urls,
    /// percentages, attribute match operators, bad tokens) is rejected up
    /// front, before any structural parsing.
    #[must_use]
    pub const fn is_supported(&self) -> bool {
        match self {
            Self::Ident(_)
            | Self::Function(_)
            | Self::Hash { .. }
            | Self::String(_)
            | Self::Delim(_)
            | Self::Number { .. }
            | Self::Dimension { .. }
            | Self::Whitespace
            | Self::Colon
            | Self::Comma
            | Self::LeftBracket
            | Self::RightBracket
            | Self::LeftParen
            | Self::RightParen
            | Self::EOF => true,
            Self::AtKeyword(_)
            | Self::BadString
            | Self::Url(_)
            | Self::BadUrl
            | Self::Percentage { .. }
            | Self::CDO
            | Self::CDC
            | Self::Semicolon
            | Self::LeftBrace
            | Self::RightBrace
            | Self::Column
            | Self::IncludeMatch
            | Self::DashMatch
            | Self::PrefixMatch
            | Self::SuffixMatch
            | Self::SubstringMatch => false,
        }
    }
}

/// Kind name of the token, as used in token listings. The text itself is
/// on [`Spanned::source`].
impl fmt::Display for CSSToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            Self::Ident(_) => "ident",
            Self::Function(_) => "function",
            Self::AtKeyword(_) => "at-keyword",
            Self::Hash {
                hash_type: HashType::Id,
                ..
            } => "hash(id)",
            Self::Hash { .. } => "hash",
            Self::String(_) => "string",
            Self::BadString => "bad-string",
            Self::Url(_) => "url",
            Self::BadUrl => "bad-url",
            Self::Delim(_) => "delim",
            Self::Number {
                numeric_type: NumericType::Integer,
                ..
            } => "number(integer)",
            Self::Number { .. } => "number",
            Self::Percentage { .. } => "percentage",
            Self::Dimension { .. } => "dimension",
            Self::Whitespace => "whitespace",
            Self::CDO => "CDO",
            Self::CDC => "CDC",
            Self::Colon => "colon",
            Self::Semicolon => "semicolon",
            Self::Comma => "comma",
            Self::LeftBracket => "[",
            Self::RightBracket => "]",
            Self::LeftParen => "(",
            Self::RightParen => ")",
            Self::LeftBrace => "{",
            Self::RightBrace => "}",
            Self::Column => "column",
            Self::IncludeMatch => "include-match",
            Self::DashMatch => "dash-match",
            Self::PrefixMatch => "prefix-match",
            Self::SuffixMatch => "suffix-match",
            Self::SubstringMatch => "substring-match",
            Self::EOF => "EOF",
        };
        f.write_str(kind)
    }
}

/// A token together with the text it was lexed from.
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned {
    /// The classified token.
    pub token: CSSToken,
    /// The exact input text this token covers. Empty for EOF.
    pub source: String,
    /// Character offset of the token's first code point in the input.
    pub offset: usize,
}

impl Spanned {
    /// The end-of-input marker at `offset`.
    #[must_use]
    pub const fn eof(offset: usize) -> Self {
        Self {
            token: CSSToken::EOF,
            source: String::new(),
            offset,
        }
    }
}
