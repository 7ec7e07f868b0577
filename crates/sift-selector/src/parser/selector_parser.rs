//! Recursive-descent selector parser.
//!
//! Grammar, top-down:
//!
//! ```text
//! arguments := argument ( ',' argument )*
//! argument  := number | string | complex
//! complex   := simple ( combinator? simple )*
//! simple    := ( ident | '*' | hash | '.' ident | ':' pseudo | '[' ... ']' )+
//! pseudo    := ident | function arguments ')'
//! ```
//!
//! The top level of a selector string is an argument list whose entries
//! must all be complex selectors. No backtracking: every rule either moves
//! the cursor forward or fails.

#[cfg(feature = "parse-trace")]
use std::cell::Cell;

use crate::error::{ParseErrorKind, SelectorError};
use crate::selector::builtins::{is_builtin_pseudo_class, is_builtin_pseudo_function};
use crate::selector::{
    Combinator, ComplexSelector, EngineFunction, FunctionArgument, SelectorList, SelectorPart,
    SimpleSelector,
};
use crate::tokenizer::{CSSToken, Spanned, tokenize};

#[cfg(feature = "parse-trace")]
thread_local! {
    static PARSE_DEPTH: Cell<usize> = const { Cell::new(0) };
}

/// Prints one indented line per grammar rule entered; unwinds on drop.
#[cfg(feature = "parse-trace")]
struct TraceGuard;

#[cfg(feature = "parse-trace")]
impl TraceGuard {
    fn enter(rule: &str, at: &Spanned) -> Self {
        let depth = PARSE_DEPTH.with(|d| {
            let current = d.get();
            d.set(current + 1);
            current
        });
        eprintln!(
            "[parse] {}{rule} @{} {:?}",
            "  ".repeat(depth),
            at.offset,
            at.source
        );
        Self
    }
}

#[cfg(feature = "parse-trace")]
impl Drop for TraceGuard {
    fn drop(&mut self) {
        PARSE_DEPTH.with(|d| d.set(d.get().saturating_sub(1)));
    }
}

/// Reject any token kind the selector grammar does not support.
///
/// Scans the whole stream before parsing starts, so an unsupported token
/// is reported even if a grammar error would have come first.
///
/// # Errors
///
/// Returns [`SelectorError::UnsupportedToken`] naming the first rejected
/// token's source text.
pub fn check_supported(tokens: &[Spanned], selector: &str) -> Result<(), SelectorError> {
    match tokens.iter().find(|t| !t.token.is_supported()) {
        Some(rejected) => Err(SelectorError::UnsupportedToken {
            token: rejected.source.clone(),
            selector: selector.to_string(),
        }),
        None => Ok(()),
    }
}

/// Selector parser over a guarded token stream.
///
/// One instance parses one selector string; it is consumed by the parse.
pub struct SelectorParser<'a> {
    /// The original text, for error messages
    selector: &'a str,
    /// Token stream, always terminated by EOF
    tokens: Vec<Spanned>,
    /// Current position in the token stream
    position: usize,
}

impl<'a> SelectorParser<'a> {
    /// Tokenize `selector` and prepare to parse it.
    ///
    /// # Errors
    ///
    /// Returns [`SelectorError::Lex`] if tokenization fails and
    /// [`SelectorError::UnsupportedToken`] if the input contains a token
    /// outside the selector grammar.
    pub fn new(selector: &'a str) -> Result<Self, SelectorError> {
        let tokens = tokenize(selector).map_err(|source| SelectorError::Lex {
            source,
            selector: selector.to_string(),
        })?;
        Self::from_tokens(selector, tokens)
    }

    /// Prepare to parse an already tokenized `selector`.
    ///
    /// An EOF token is appended if the stream does not end with one.
    ///
    /// # Errors
    ///
    /// Returns [`SelectorError::UnsupportedToken`] if the stream contains a
    /// token outside the selector grammar.
    pub fn from_tokens(selector: &'a str, mut tokens: Vec<Spanned>) -> Result<Self, SelectorError> {
        if !tokens.last().is_some_and(|t| t.token.is_eof()) {
            tokens.push(Spanned::eof(selector.chars().count()));
        }
        check_supported(&tokens, selector)?;
        Ok(Self {
            selector,
            tokens,
            position: 0,
        })
    }

    /// Parse the whole input as a comma-separated list of complex selectors.
    ///
    /// # Errors
    ///
    /// Returns [`SelectorError::Parse`] at the first grammar violation, or
    /// if a top-level entry is a bare string or number.
    pub fn parse_selector_list(mut self) -> Result<SelectorList, SelectorError> {
        let selectors = self
            .parse_arguments_to_end()?
            .into_iter()
            .map(|argument| match argument {
                FunctionArgument::Selector(selector) => Ok(selector),
                FunctionArgument::Number(_) | FunctionArgument::String(_) => {
                    Err(self.error(ParseErrorKind::NotASelector))
                }
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(SelectorList { selectors })
    }

    /// Parse the whole input as an engine-function argument list, the
    /// inverse of [`crate::serialize_arguments`].
    ///
    /// # Errors
    ///
    /// Returns [`SelectorError::Parse`] at the first grammar violation.
    pub fn parse_arguments(mut self) -> Result<Vec<FunctionArgument>, SelectorError> {
        self.parse_arguments_to_end()
    }

    fn parse_arguments_to_end(&mut self) -> Result<Vec<FunctionArgument>, SelectorError> {
        let arguments = self.consume_function_arguments()?;
        if !self.peek().is_eof() {
            return Err(self.unexpected());
        }
        Ok(arguments)
    }

    /// `arguments := argument ( ',' argument )*`
    fn consume_function_arguments(&mut self) -> Result<Vec<FunctionArgument>, SelectorError> {
        #[cfg(feature = "parse-trace")]
        let _trace = TraceGuard::enter("arguments", self.current());

        let mut arguments = vec![self.consume_argument()?];
        loop {
            self.skip_whitespace();
            if !matches!(self.peek(), CSSToken::Comma) {
                return Ok(arguments);
            }
            self.bump();
            arguments.push(self.consume_argument()?);
        }
    }

    /// `argument := number | string | complex`
    fn consume_argument(&mut self) -> Result<FunctionArgument, SelectorError> {
        self.skip_whitespace();
        match self.peek() {
            CSSToken::Number { value, .. } => {
                let value = *value;
                self.bump();
                Ok(FunctionArgument::Number(value))
            }
            CSSToken::String(value) => {
                let value = value.clone();
                self.bump();
                Ok(FunctionArgument::String(value))
            }
            _ => self
                .consume_complex_selector()
                .map(FunctionArgument::Selector),
        }
    }

    /// `complex := simple ( combinator? simple )*`
    fn consume_complex_selector(&mut self) -> Result<ComplexSelector, SelectorError> {
        #[cfg(feature = "parse-trace")]
        let _trace = TraceGuard::enter("complex selector", self.current());

        let mut parts = vec![SelectorPart {
            selector: self.consume_simple_selector()?,
            combinator: Combinator::Descendant,
        }];

        loop {
            self.skip_whitespace();
            if let Some(combinator) = self.peek_combinator() {
                // The combinator belongs to the part on its left.
                if let Some(last) = parts.last_mut() {
                    last.combinator = combinator;
                }
                self.bump();
                self.skip_whitespace();
            } else if self.at_clause_end() {
                break;
            }
            parts.push(SelectorPart {
                selector: self.consume_simple_selector()?,
                combinator: Combinator::Descendant,
            });
        }

        Ok(ComplexSelector { parts })
    }

    /// `simple := ( ident | '*' | hash | '.' ident | ':' pseudo | '[' ... ']' )+`
    fn consume_simple_selector(&mut self) -> Result<SimpleSelector, SelectorError> {
        #[cfg(feature = "parse-trace")]
        let _trace = TraceGuard::enter("simple selector", self.current());

        let mut raw_text = String::new();
        let mut functions = Vec::new();

        while !self.at_clause_end() {
            match self.peek() {
                CSSToken::Ident(_) | CSSToken::Hash { .. } | CSSToken::Delim('*') => {
                    raw_text.push_str(&self.bump_source());
                }
                CSSToken::Delim('.') => {
                    self.bump();
                    if !matches!(self.peek(), CSSToken::Ident(_)) {
                        return Err(self.unexpected());
                    }
                    raw_text.push('.');
                    raw_text.push_str(&self.bump_source());
                }
                CSSToken::Colon => {
                    self.bump();
                    self.consume_pseudo(&mut raw_text, &mut functions)?;
                }
                CSSToken::LeftBracket => self.consume_attribute(&mut raw_text)?,
                _ => return Err(self.unexpected()),
            }
        }

        if raw_text.is_empty() && functions.is_empty() {
            return Err(self.unexpected());
        }
        Ok(SimpleSelector {
            raw_text: (!raw_text.is_empty()).then_some(raw_text),
            functions,
        })
    }

    /// Everything after a `:`. Native pseudo-classes are appended to
    /// `raw_text`; anything else becomes an engine function.
    fn consume_pseudo(
        &mut self,
        raw_text: &mut String,
        functions: &mut Vec<EngineFunction>,
    ) -> Result<(), SelectorError> {
        match self.peek() {
            CSSToken::Ident(name) => {
                let name = name.to_ascii_lowercase();
                let source = self.bump_source();
                if is_builtin_pseudo_class(&name) {
                    raw_text.push(':');
                    raw_text.push_str(&source);
                } else {
                    functions.push(EngineFunction {
                        name,
                        args: Vec::new(),
                    });
                }
                Ok(())
            }
            CSSToken::Function(name) => {
                let name = name.to_ascii_lowercase();
                self.bump();
                if is_builtin_pseudo_function(&name) {
                    let args = self.consume_builtin_arguments();
                    raw_text.push(':');
                    raw_text.push_str(&name);
                    raw_text.push('(');
                    raw_text.push_str(&args);
                    raw_text.push(')');
                } else {
                    let args = self.consume_function_arguments()?;
                    functions.push(EngineFunction { name, args });
                }
                self.skip_whitespace();
                if !matches!(self.peek(), CSSToken::RightParen) {
                    return Err(self.unexpected());
                }
                self.bump();
                Ok(())
            }
            _ => Err(self.unexpected()),
        }
    }

    /// Source text of a native pseudo-function's arguments, up to but not
    /// including the matching `)`. Leaves the cursor on that `)` (or EOF).
    fn consume_builtin_arguments(&mut self) -> String {
        let mut raw = String::new();
        // The function token itself opened the first level.
        let mut depth = 1_usize;
        loop {
            match self.peek() {
                CSSToken::EOF => break,
                CSSToken::LeftParen | CSSToken::Function(_) => depth += 1,
                CSSToken::RightParen => {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                }
                _ => {}
            }
            raw.push_str(&self.bump_source());
        }
        raw
    }

    /// `[` ... `]`, copied verbatim.
    fn consume_attribute(&mut self, raw_text: &mut String) -> Result<(), SelectorError> {
        raw_text.push_str(&self.bump_source());
        loop {
            match self.peek() {
                CSSToken::EOF => return Err(self.unexpected()),
                CSSToken::RightBracket => {
                    raw_text.push_str(&self.bump_source());
                    return Ok(());
                }
                _ => raw_text.push_str(&self.bump_source()),
            }
        }
    }

    /// Comma, `)`, EOF, a combinator or whitespace: the end of a simple
    /// selector.
    fn at_clause_end(&self) -> bool {
        matches!(
            self.peek(),
            CSSToken::Comma | CSSToken::RightParen | CSSToken::EOF | CSSToken::Whitespace
        ) || self.peek_combinator().is_some()
    }

    fn peek_combinator(&self) -> Option<Combinator> {
        match self.peek() {
            CSSToken::Delim(c) => Combinator::from_delim(*c),
            _ => None,
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_whitespace() {
            self.bump();
        }
    }

    fn current(&self) -> &Spanned {
        // The stream is never empty and the cursor never moves past EOF.
        &self.tokens[self.position.min(self.tokens.len() - 1)]
    }

    fn peek(&self) -> &CSSToken {
        &self.current().token
    }

    /// Step past the current token. EOF is never stepped past.
    fn bump(&mut self) {
        if !self.peek().is_eof() {
            self.position += 1;
        }
    }

    /// Step past the current token, returning its source text.
    fn bump_source(&mut self) -> String {
        let source = self.current().source.clone();
        self.bump();
        source
    }

    fn unexpected(&self) -> SelectorError {
        let current = self.current();
        self.error(if current.token.is_eof() {
            ParseErrorKind::UnexpectedEnd
        } else {
            ParseErrorKind::UnexpectedToken(current.source.clone())
        })
    }

    fn error(&self, kind: ParseErrorKind) -> SelectorError {
        SelectorError::Parse {
            kind,
            selector: self.selector.to_string(),
        }
    }
}

/// Parse a selector string into a [`SelectorList`].
///
/// ```
/// let list = sift_selector::parse_selector("div > span:has-text(\"ok\")").unwrap();
/// assert_eq!(list.selectors[0].parts.len(), 2);
/// assert_eq!(list.function_names(), ["has-text"]);
/// ```
///
/// # Errors
///
/// Returns a [`SelectorError`] if the input cannot be tokenized, contains
/// an unsupported token, or does not follow the selector grammar.
pub fn parse_selector(selector: &str) -> Result<SelectorList, SelectorError> {
    SelectorParser::new(selector)?.parse_selector_list()
}

/// Parse `text` as an engine-function argument list: selectors, strings
/// and numbers separated by commas.
///
/// # Errors
///
/// Returns a [`SelectorError`] if the input cannot be tokenized, contains
/// an unsupported token, or does not follow the argument grammar.
pub fn parse_function_arguments(text: &str) -> Result<Vec<FunctionArgument>, SelectorError> {
    SelectorParser::new(text)?.parse_arguments()
}
