use sift_common::warning::warn_once;

use super::token::{CSSToken, HashType, NumericType, Spanned};
use crate::error::LexError;

/// [§ 4.3 Tokenizer Algorithms](https://www.w3.org/TR/css-syntax-3/#tokenizer-algorithms)
///
/// CSS tokenizer following the CSS Syntax Module Level 3 specification,
/// recording the source text of every token it emits.
pub struct CSSTokenizer {
    /// The input string being tokenized
    input: Vec<char>,
    /// Current position in the input
    position: usize,
    /// Position where the token currently being consumed started
    token_start: usize,
    /// Collected tokens
    tokens: Vec<Spanned>,
}

impl CSSTokenizer {
    /// Create a new CSS tokenizer with the given input.
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into().chars().collect(),
            position: 0,
            token_start: 0,
            tokens: Vec::new(),
        }
    }

    /// [§ 4.3.1 Consume a token](https://www.w3.org/TR/css-syntax-3/#consume-token)
    ///
    /// Runs until EOF. The last collected token is always [`CSSToken::EOF`].
    ///
    /// # Errors
    ///
    /// Returns a [`LexError`] for an unterminated comment or a backslash
    /// that does not start a valid escape.
    pub fn run(&mut self) -> Result<(), LexError> {
        loop {
            self.consume_comments()?;

            self.token_start = self.position;
            let token = self.consume_token()?;
            let is_eof = token.is_eof();
            let source = self.input[self.token_start..self.position].iter().collect();
            self.tokens.push(Spanned {
                token,
                source,
                offset: self.token_start,
            });
            if is_eof {
                return Ok(());
            }
        }
    }

    /// Return the collected tokens.
    #[must_use]
    pub fn into_tokens(self) -> Vec<Spanned> {
        self.tokens
    }

    /// Return a reference to the collected tokens.
    #[must_use]
    pub fn tokens(&self) -> &[Spanned] {
        &self.tokens
    }

    /// [§ 4.3.1 Consume a token](https://www.w3.org/TR/css-syntax-3/#consume-token)
    fn consume_token(&mut self) -> Result<CSSToken, LexError> {
        // "Consume the next input code point."
        let Some(c) = self.consume() else {
            return Ok(CSSToken::EOF);
        };

        let token = match c {
            // "whitespace"
            // "Consume as much whitespace as possible. Return a <whitespace-token>."
            c if is_whitespace(c) => {
                self.consume_whitespace();
                CSSToken::Whitespace
            }

            '(' => CSSToken::LeftParen,
            ')' => CSSToken::RightParen,
            '[' => CSSToken::LeftBracket,
            ']' => CSSToken::RightBracket,
            '{' => CSSToken::LeftBrace,
            '}' => CSSToken::RightBrace,
            ',' => CSSToken::Comma,
            ':' => CSSToken::Colon,
            ';' => CSSToken::Semicolon,

            // "U+0022 QUOTATION MARK (")" / "U+0027 APOSTROPHE (')"
            // "Consume a string token and return it."
            '"' | '\'' => self.consume_string_token(c),

            // "U+0023 NUMBER SIGN (#)"
            // "If the next input code point is an ident code point or the next
            // two input code points are a valid escape..."
            '#' if self.peek().is_some_and(is_ident_code_point)
                || is_valid_escape(self.peek(), self.peek_at(1)) =>
            {
                // "If the next 3 input code points would start an ident sequence,
                // set the <hash-token>'s type flag to 'id'."
                let hash_type = if self.would_start_ident_sequence() {
                    HashType::Id
                } else {
                    HashType::Unrestricted
                };
                CSSToken::Hash {
                    value: self.consume_ident_sequence(),
                    hash_type,
                }
            }

            // "U+002B PLUS SIGN (+)" / "U+002E FULL STOP (.)"
            // "If the input stream starts with a number, reconsume the current
            // input code point, consume a numeric token, and return it."
            '+' | '.' if self.would_start_number_with(Some(c)) => {
                self.reconsume();
                self.consume_numeric_token()
            }

            // "U+002D HYPHEN-MINUS (-)"
            // "If the input stream starts with a number..."
            '-' if self.would_start_number_with(Some('-')) => {
                self.reconsume();
                self.consume_numeric_token()
            }
            // "Otherwise, if the next 2 input code points are U+002D U+003E (->),
            // consume them and return a <CDC-token>."
            '-' if self.peek() == Some('-') && self.peek_at(1) == Some('>') => {
                self.skip(2);
                CSSToken::CDC
            }
            // "Otherwise, if the input stream starts with an ident sequence,
            // reconsume the current input code point, consume an ident-like
            // token, and return it."
            '-' if self.would_start_ident_sequence_with(Some('-')) => {
                self.reconsume();
                self.consume_ident_like_token()
            }

            // "U+003C LESS-THAN SIGN (<)"
            // "If the next 3 input code points are U+0021 U+002D U+002D (!--),
            // consume them and return a <CDO-token>."
            '<' if self.peek() == Some('!')
                && self.peek_at(1) == Some('-')
                && self.peek_at(2) == Some('-') =>
            {
                self.skip(3);
                CSSToken::CDO
            }

            // "U+0040 COMMERCIAL AT (@)"
            // "If the next 3 input code points would start an ident sequence,
            // consume an ident sequence, create an <at-keyword-token> with its
            // value set to the returned value, and return it."
            '@' if self.would_start_ident_sequence() => {
                CSSToken::AtKeyword(self.consume_ident_sequence())
            }

            // "U+005C REVERSE SOLIDUS (\)"
            // "If the input stream starts with a valid escape, reconsume the
            // current input code point, consume an ident-like token, and return it."
            '\\' if is_valid_escape(Some('\\'), self.peek()) => {
                self.reconsume();
                self.consume_ident_like_token()
            }
            // A line continuation is only meaningful inside a string.
            '\\' => {
                return Err(LexError::InvalidEscape {
                    offset: self.token_start,
                });
            }

            // Attribute match operators and the column combinator.
            '~' | '^' | '$' | '*' | '|' => self.consume_match_or_delim(c),

            // "digit"
            c if c.is_ascii_digit() => {
                self.reconsume();
                self.consume_numeric_token()
            }

            // "ident-start code point"
            c if is_ident_start_code_point(c) => {
                self.reconsume();
                self.consume_ident_like_token()
            }

            // "anything else"
            // "Return a <delim-token> with its value set to the current input code point."
            c => CSSToken::Delim(c),
        };
        Ok(token)
    }

    /// `~=`, `|=`, `^=`, `$=`, `*=` and `||`; a lone code point is a delim.
    fn consume_match_or_delim(&mut self, c: char) -> CSSToken {
        if self.peek() == Some('=') {
            self.skip(1);
            return match c {
                '~' => CSSToken::IncludeMatch,
                '|' => CSSToken::DashMatch,
                '^' => CSSToken::PrefixMatch,
                '$' => CSSToken::SuffixMatch,
                _ => CSSToken::SubstringMatch,
            };
        }
        if c == '|' && self.peek() == Some('|') {
            self.skip(1);
            return CSSToken::Column;
        }
        CSSToken::Delim(c)
    }

    /// [§ 4.3.2 Consume comments](https://www.w3.org/TR/css-syntax-3/#consume-comment)
    ///
    /// Skips any run of `/* ... */` comments. Reaching EOF inside a comment
    /// is an error.
    fn consume_comments(&mut self) -> Result<(), LexError> {
        while self.peek() == Some('/') && self.peek_at(1) == Some('*') {
            let offset = self.position;
            self.skip(2);

            loop {
                match self.consume() {
                    Some('*') if self.peek() == Some('/') => {
                        self.skip(1);
                        break;
                    }
                    Some(_) => {}
                    None => return Err(LexError::UnterminatedComment { offset }),
                }
            }
        }
        Ok(())
    }

    /// Consume whitespace characters.
    fn consume_whitespace(&mut self) {
        while self.peek().is_some_and(is_whitespace) {
            self.skip(1);
        }
    }

    /// [§ 4.3.4 Consume a string token](https://www.w3.org/TR/css-syntax-3/#consume-string-token)
    fn consume_string_token(&mut self, ending_code_point: char) -> CSSToken {
        let mut value = String::new();

        loop {
            match self.consume() {
                // "ending code point"
                // "Return the <string-token>."
                Some(c) if c == ending_code_point => {
                    return CSSToken::String(value);
                }

                // "EOF"
                // "This is a parse error. Return the <string-token>."
                None => {
                    warn_once(
                        "Tokenizer",
                        &format!("unterminated string at offset {}", self.token_start),
                    );
                    return CSSToken::String(value);
                }

                // "newline"
                // "This is a parse error. Reconsume the current input code point,
                // create a <bad-string-token>, and return it."
                Some('\n') => {
                    self.reconsume();
                    return CSSToken::BadString;
                }

                // "U+005C REVERSE SOLIDUS (\)"
                Some('\\') => match self.peek() {
                    // "If the next input code point is EOF, do nothing."
                    None => {}
                    // "Otherwise, if the next input code point is a newline, consume it."
                    Some('\n') => self.skip(1),
                    // "Otherwise, (the stream starts with a valid escape) consume an
                    // escaped code point and append the returned code point to the
                    // <string-token>'s value."
                    Some(_) => value.push(self.consume_escaped_code_point()),
                },

                // "anything else"
                // "Append the current input code point to the <string-token>'s value."
                Some(c) => value.push(c),
            }
        }
    }

    /// [§ 4.3.5 Consume a numeric token](https://www.w3.org/TR/css-syntax-3/#consume-numeric-token)
    fn consume_numeric_token(&mut self) -> CSSToken {
        let (value, numeric_type) = self.consume_number();

        if self.would_start_ident_sequence() {
            let unit = self.consume_ident_sequence();
            CSSToken::Dimension { value, unit }
        } else if self.peek() == Some('%') {
            self.skip(1);
            CSSToken::Percentage { value }
        } else {
            CSSToken::Number {
                value,
                numeric_type,
            }
        }
    }

    /// [§ 4.3.6 Consume an ident-like token](https://www.w3.org/TR/css-syntax-3/#consume-ident-like-token)
    fn consume_ident_like_token(&mut self) -> CSSToken {
        let string = self.consume_ident_sequence();

        // `url(` is a url token unless a quoted string follows.
        if string.eq_ignore_ascii_case("url") && self.peek() == Some('(') {
            self.skip(1);

            while self.peek().is_some_and(is_whitespace)
                && self.peek_at(1).is_some_and(is_whitespace)
            {
                self.skip(1);
            }

            let quote_follows = |c: Option<char>| matches!(c, Some('"' | '\''));
            if quote_follows(self.peek())
                || (self.peek().is_some_and(is_whitespace) && quote_follows(self.peek_at(1)))
            {
                CSSToken::Function(string)
            } else {
                self.consume_url_token()
            }
        } else if self.peek() == Some('(') {
            self.skip(1);
            CSSToken::Function(string)
        } else {
            CSSToken::Ident(string)
        }
    }

    /// [§ 4.3.7 Consume a url token](https://www.w3.org/TR/css-syntax-3/#consume-url-token)
    fn consume_url_token(&mut self) -> CSSToken {
        let mut value = String::new();

        // "Consume as much whitespace as possible."
        self.consume_whitespace();

        loop {
            match self.consume() {
                // "U+0029 RIGHT PARENTHESIS ())"
                // "Return the <url-token>."
                Some(')') => return CSSToken::Url(value),

                // "EOF"
                // "This is a parse error. Return the <url-token>."
                None => {
                    warn_once(
                        "Tokenizer",
                        &format!("unterminated url at offset {}", self.token_start),
                    );
                    return CSSToken::Url(value);
                }

                // "whitespace"
                // "Consume as much whitespace as possible. If the next input code
                // point is U+0029 RIGHT PARENTHESIS ()) or EOF, consume it and return
                // the <url-token>; otherwise, consume the remnants of a bad url,
                // create a <bad-url-token>, and return it."
                Some(c) if is_whitespace(c) => {
                    self.consume_whitespace();
                    match self.peek() {
                        Some(')') | None => {
                            self.skip(1);
                            return CSSToken::Url(value);
                        }
                        _ => {
                            self.consume_bad_url_remnants();
                            return CSSToken::BadUrl;
                        }
                    }
                }

                // "U+0022 QUOTATION MARK ("), U+0027 APOSTROPHE ('), U+0028 LEFT
                // PARENTHESIS (()"
                // "This is a parse error. Consume the remnants of a bad url, create
                // a <bad-url-token>, and return it."
                Some('"' | '\'' | '(') => {
                    self.consume_bad_url_remnants();
                    return CSSToken::BadUrl;
                }

                // "U+005C REVERSE SOLIDUS (\)"
                // "If the stream starts with a valid escape, consume an escaped code
                // point and append the returned code point to the <url-token>'s
                // value. Otherwise, this is a parse error."
                Some('\\') => {
                    if is_valid_escape(Some('\\'), self.peek()) {
                        value.push(self.consume_escaped_code_point());
                    } else {
                        self.consume_bad_url_remnants();
                        return CSSToken::BadUrl;
                    }
                }

                // "anything else"
                Some(c) => value.push(c),
            }
        }
    }

    /// [§ 4.3.14 Consume the remnants of a bad url](https://www.w3.org/TR/css-syntax-3/#consume-remnants-of-bad-url)
    fn consume_bad_url_remnants(&mut self) {
        loop {
            match self.consume() {
                Some(')') | None => return,
                Some('\\') if is_valid_escape(Some('\\'), self.peek()) => {
                    let _ = self.consume_escaped_code_point();
                }
                Some(_) => {}
            }
        }
    }

    /// [§ 4.3.11 Consume an ident sequence](https://www.w3.org/TR/css-syntax-3/#consume-name)
    fn consume_ident_sequence(&mut self) -> String {
        let mut result = String::new();

        loop {
            match self.consume() {
                Some(c) if is_ident_code_point(c) => result.push(c),

                Some('\\') if is_valid_escape(Some('\\'), self.peek()) => {
                    result.push(self.consume_escaped_code_point());
                }

                Some(_) => {
                    self.reconsume();
                    return result;
                }

                None => return result,
            }
        }
    }

    /// [§ 4.3.12 Consume a number](https://www.w3.org/TR/css-syntax-3/#consume-number)
    fn consume_number(&mut self) -> (f64, NumericType) {
        let mut numeric_type = NumericType::Integer;
        let mut repr = String::new();

        if matches!(self.peek(), Some('+' | '-')) {
            self.consume_into(&mut repr);
        }
        self.consume_digits_into(&mut repr);

        if self.peek() == Some('.') && self.peek_at(1).is_some_and(|c| c.is_ascii_digit()) {
            self.consume_into(&mut repr);
            numeric_type = NumericType::Number;
            self.consume_digits_into(&mut repr);
        }

        if matches!(self.peek(), Some('e' | 'E')) {
            let has_sign = matches!(self.peek_at(1), Some('+' | '-'));
            let digit_pos = if has_sign { 2 } else { 1 };

            if self.peek_at(digit_pos).is_some_and(|c| c.is_ascii_digit()) {
                self.consume_into(&mut repr);
                if has_sign {
                    self.consume_into(&mut repr);
                }
                numeric_type = NumericType::Number;
                self.consume_digits_into(&mut repr);
            }
        }

        (repr.parse().unwrap_or(0.0), numeric_type)
    }

    /// [§ 4.3.13 Consume an escaped code point](https://www.w3.org/TR/css-syntax-3/#consume-escaped-code-point)
    fn consume_escaped_code_point(&mut self) -> char {
        match self.consume() {
            Some(c) if c.is_ascii_hexdigit() => {
                let mut hex = c.to_string();
                while hex.len() < 6 && self.peek().is_some_and(|c| c.is_ascii_hexdigit()) {
                    self.consume_into(&mut hex);
                }
                if self.peek().is_some_and(is_whitespace) {
                    self.skip(1);
                }
                u32::from_str_radix(&hex, 16)
                    .ok()
                    .filter(|&code_point| code_point != 0)
                    .and_then(char::from_u32)
                    .unwrap_or('\u{FFFD}')
            }
            None => '\u{FFFD}',
            Some(c) => c,
        }
    }

    /// [§ 4.3.9 Check if three code points would start an ident sequence](https://www.w3.org/TR/css-syntax-3/#would-start-an-identifier)
    fn would_start_ident_sequence(&self) -> bool {
        self.would_start_ident_sequence_with(self.peek())
    }

    fn would_start_ident_sequence_with(&self, first: Option<char>) -> bool {
        match first {
            Some('-') => {
                let second = self.peek_at(1);
                second.is_some_and(is_ident_start_code_point)
                    || second == Some('-')
                    || is_valid_escape(second, self.peek_at(2))
            }
            Some('\\') => is_valid_escape(Some('\\'), self.peek_at(1)),
            Some(c) => is_ident_start_code_point(c),
            None => false,
        }
    }

    /// [§ 4.3.10 Check if three code points would start a number](https://www.w3.org/TR/css-syntax-3/#starts-with-a-number)
    ///
    /// `first` is the code point just consumed; the rest are peeked.
    fn would_start_number_with(&self, first: Option<char>) -> bool {
        let digit_at = |offset| self.peek_at(offset).is_some_and(|c: char| c.is_ascii_digit());
        match first {
            Some('+' | '-') => digit_at(0) || (self.peek() == Some('.') && digit_at(1)),
            Some('.') => digit_at(0),
            Some(c) => c.is_ascii_digit(),
            None => false,
        }
    }

    /// Consume the next character and append it to `buf`.
    fn consume_into(&mut self, buf: &mut String) {
        if let Some(c) = self.consume() {
            buf.push(c);
        }
    }

    fn consume_digits_into(&mut self, buf: &mut String) {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.consume_into(buf);
        }
    }

    /// Consume and return the next character.
    fn consume(&mut self) -> Option<char> {
        let c = self.input.get(self.position).copied();
        if c.is_some() {
            self.position += 1;
        }
        c
    }

    /// Consume up to `count` characters without looking at them.
    fn skip(&mut self, count: usize) {
        self.position = (self.position + count).min(self.input.len());
    }

    /// Put back the last consumed character.
    const fn reconsume(&mut self) {
        self.position = self.position.saturating_sub(1);
    }

    fn peek(&self) -> Option<char> {
        self.peek_at(0)
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }
}

/// Tokenize `input` into a complete token stream ending in EOF.
///
/// # Errors
///
/// Returns a [`LexError`] when the input cannot be tokenized.
pub fn tokenize(input: &str) -> Result<Vec<Spanned>, LexError> {
    let mut tokenizer = CSSTokenizer::new(input);
    tokenizer.run()?;
    Ok(tokenizer.into_tokens())
}

/// [§ 4.3.8 Check if two code points are a valid escape](https://www.w3.org/TR/css-syntax-3/#starts-with-a-valid-escape)
fn is_valid_escape(first: Option<char>, second: Option<char>) -> bool {
    first == Some('\\') && second != Some('\n')
}

/// [§ 4.2 Definitions - whitespace](https://www.w3.org/TR/css-syntax-3/#whitespace)
const fn is_whitespace(c: char) -> bool {
    matches!(c, '\n' | '\t' | ' ' | '\r' | '\x0C')
}

/// [§ 4.2 Definitions - ident-start code point](https://www.w3.org/TR/css-syntax-3/#ident-start-code-point)
///
/// "A letter, a non-ASCII code point, or U+005F LOW LINE (_)."
const fn is_ident_start_code_point(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || !c.is_ascii()
}

/// [§ 4.2 Definitions - ident code point](https://www.w3.org/TR/css-syntax-3/#ident-code-point)
///
/// "An ident-start code point, a digit, or U+002D HYPHEN-MINUS (-)."
const fn is_ident_code_point(c: char) -> bool {
    is_ident_start_code_point(c) || c.is_ascii_digit() || c == '-'
}
