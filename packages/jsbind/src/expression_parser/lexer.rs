/**
 * Binding Expression Lexer
 *
 * Tokenizes binding attribute strings on demand, one token at a time
 */

use std::collections::HashSet;
use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::chars;
use crate::config::NumericLiteralMode;
use crate::error::SyntaxError;

/// Token categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum TokenCategory {
    Operator = 0,
    LiteralString = 1,
    LiteralNumber = 2,
    Identifier = 3,
    Keyword = 4,
    Eof = 5,
    Punctuation = 6,
}

/// Payload of a token: numbers are converted while scanning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TokenValue {
    Number(f64),
    Text(String),
}

/// Token representation. `index` and `end` are character offsets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub index: usize,
    pub end: usize,
    pub category: TokenCategory,
    pub value: TokenValue,
}

impl Token {
    pub fn new(index: usize, end: usize, category: TokenCategory, value: TokenValue) -> Self {
        Token {
            index,
            end,
            category,
            value,
        }
    }

    pub fn text(index: usize, end: usize, category: TokenCategory, text: impl Into<String>) -> Self {
        Token::new(index, end, category, TokenValue::Text(text.into()))
    }

    pub fn number(index: usize, end: usize, n: f64) -> Self {
        Token::new(index, end, TokenCategory::LiteralNumber, TokenValue::Number(n))
    }

    pub fn eof(index: usize) -> Self {
        Token::text(index, index, TokenCategory::Eof, "")
    }

    /// Text of every non-number token
    pub fn str_value(&self) -> &str {
        match &self.value {
            TokenValue::Text(text) => text,
            TokenValue::Number(_) => "",
        }
    }

    pub fn num_value(&self) -> Option<f64> {
        match self.value {
            TokenValue::Number(n) => Some(n),
            TokenValue::Text(_) => None,
        }
    }

    pub fn is_punctuation(&self, code: char) -> bool {
        self.category == TokenCategory::Punctuation && self.str_value().chars().next() == Some(code)
    }

    pub fn is_operator(&self, operator: &str) -> bool {
        self.category == TokenCategory::Operator && self.str_value() == operator
    }

    pub fn is_identifier(&self) -> bool {
        self.category == TokenCategory::Identifier
    }

    pub fn is_identifier_named(&self, name: &str) -> bool {
        self.is_identifier() && self.str_value() == name
    }

    pub fn is_keyword(&self) -> bool {
        self.category == TokenCategory::Keyword
    }

    pub fn is_string(&self) -> bool {
        self.category == TokenCategory::LiteralString
    }

    pub fn is_number(&self) -> bool {
        self.category == TokenCategory::LiteralNumber
    }

    pub fn is_eof(&self) -> bool {
        self.category == TokenCategory::Eof
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.category, &self.value) {
            (TokenCategory::Eof, _) => f.write_str("end of input"),
            (_, TokenValue::Number(n)) => write!(f, "{}", n),
            (TokenCategory::LiteralString, TokenValue::Text(text)) => write!(f, "\"{}\"", text),
            (_, TokenValue::Text(text)) => f.write_str(text),
        }
    }
}

/// Words scanned as keywords instead of identifiers
pub const KEYWORDS: &[&str] = &["true", "false", "null", "undefined"];

/// Operator table. Scanning extends a candidate one character at a time while the
/// extension is still listed, so every multi-character entry needs its prefixes here.
pub const OPERATORS: &[&str] = &[
    "+", "-", "!", "~", "&", "|", "^", "*", "/", "%", ">>", "<<", ">>>", "<", ">", "<=",
    ">=", "==", "===", "!=", "!==", "?", "=", "&&", "||",
];

static OPERATOR_SET: Lazy<HashSet<&'static str>> = Lazy::new(|| OPERATORS.iter().copied().collect());

pub fn is_operator(candidate: &str) -> bool {
    OPERATOR_SET.contains(candidate)
}

pub fn is_keyword(word: &str) -> bool {
    KEYWORDS.contains(&word)
}

/// Tokenize a whole input, including the trailing `Eof` token
pub fn tokenize(input: &str) -> Result<Vec<Token>, SyntaxError> {
    Lexer::new(input).collect()
}

pub fn tokenize_with(input: &str, mode: NumericLiteralMode) -> Result<Vec<Token>, SyntaxError> {
    Lexer::with_mode(input, mode).collect()
}

/// Lazy scanner over one input. Restart by constructing a new lexer.
pub struct Lexer<'a> {
    input: &'a str,
    chars: Vec<char>,
    index: usize,
    peek: char,
    mode: NumericLiteralMode,
    done: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer::with_mode(input, NumericLiteralMode::default())
    }

    pub fn with_mode(input: &'a str, mode: NumericLiteralMode) -> Self {
        let chars: Vec<char> = input.chars().collect();
        let peek = chars.first().copied().unwrap_or(chars::EOF);
        Lexer {
            input,
            chars,
            index: 0,
            peek,
            mode,
            done: false,
        }
    }

    pub fn input(&self) -> &'a str {
        self.input
    }

    /// Character offset of the scanner
    pub fn position(&self) -> usize {
        self.index
    }

    /// Scan the next token. Once the input is exhausted this keeps returning `Eof`.
    pub fn next_token(&mut self) -> Result<Token, SyntaxError> {
        while !self.at_end() && chars::is_whitespace(self.peek) {
            self.advance();
        }

        if self.at_end() {
            return Ok(Token::eof(self.index));
        }

        let start = self.index;
        let ch = self.peek;

        if chars::is_digit(ch) {
            return self.scan_number(start);
        }

        if ch == chars::PERIOD {
            if chars::is_digit(self.char_at(start + 1)) {
                return self.scan_number(start);
            }
            self.advance();
            return Ok(Token::text(start, self.index, TokenCategory::Punctuation, "."));
        }

        if chars::is_quote(ch) {
            return self.scan_string(start, ch);
        }

        if chars::is_identifier_start(ch) {
            return Ok(self.scan_identifier(start));
        }

        if is_operator(ch.encode_utf8(&mut [0; 4])) {
            return Ok(self.scan_operator(start));
        }

        if chars::is_punctuation(ch) {
            self.advance();
            return Ok(Token::text(start, self.index, TokenCategory::Punctuation, ch));
        }

        Err(SyntaxError::lex(
            format!("Invalid character [{}]", ch),
            start,
            self.input,
        ))
    }

    fn at_end(&self) -> bool {
        self.index >= self.chars.len()
    }

    fn advance(&mut self) {
        self.index += 1;
        self.peek = self.char_at(self.index);
    }

    fn char_at(&self, index: usize) -> char {
        self.chars.get(index).copied().unwrap_or(chars::EOF)
    }

    fn slice(&self, start: usize, end: usize) -> String {
        self.chars[start..end].iter().collect()
    }

    fn describe_peek(&self) -> String {
        if self.at_end() {
            "end of input".to_string()
        } else {
            format!("[{}]", self.peek)
        }
    }

    fn scan_identifier(&mut self, start: usize) -> Token {
        self.advance();
        while !self.at_end() && chars::is_identifier_part(self.peek) {
            self.advance();
        }

        let text = self.slice(start, self.index);
        let category = if is_keyword(&text) {
            TokenCategory::Keyword
        } else {
            TokenCategory::Identifier
        };

        Token::text(start, self.index, category, text)
    }

    fn scan_operator(&mut self, start: usize) -> Token {
        let mut op = String::new();
        op.push(self.peek);
        self.advance();

        while !self.at_end() {
            let mut candidate = op.clone();
            candidate.push(self.peek);
            if !is_operator(&candidate) {
                break;
            }
            op = candidate;
            self.advance();
        }

        Token::text(start, self.index, TokenCategory::Operator, op)
    }

    fn scan_number(&mut self, start: usize) -> Result<Token, SyntaxError> {
        if self.peek == chars::ZERO {
            let next = self.char_at(self.index + 1);
            if chars::is_hex_marker(next) {
                return self.scan_hex(start);
            }
            if chars::is_octal_digit(next) {
                return Ok(self.scan_octal(start));
            }
        }

        while chars::is_digit(self.peek) {
            self.advance();
        }

        if self.peek == chars::PERIOD {
            self.advance();
            while chars::is_digit(self.peek) {
                self.advance();
            }
        }

        if chars::is_exponent_start(self.peek) {
            self.advance();
            if self.peek == chars::PLUS || self.peek == chars::MINUS {
                self.advance();
            }
            if !chars::is_digit(self.peek) {
                return Err(SyntaxError::lex(
                    format!("Invalid exponent, expected digit but found {}", self.describe_peek()),
                    self.index,
                    self.input,
                ));
            }
            while chars::is_digit(self.peek) {
                self.advance();
            }
        }

        let text = self.slice(start, self.index);
        let value = text.parse::<f64>().map_err(|_| {
            SyntaxError::lex(format!("Invalid number [{}]", text), start, self.input)
        })?;

        Ok(Token::number(start, self.index, value))
    }

    fn scan_hex(&mut self, start: usize) -> Result<Token, SyntaxError> {
        self.advance(); // 0
        self.advance(); // x
        let digits_start = self.index;
        while chars::is_ascii_hex_digit(self.peek) {
            self.advance();
        }

        let value = match self.mode {
            NumericLiteralMode::Standard => {
                if digits_start == self.index {
                    return Err(SyntaxError::lex(
                        format!(
                            "Invalid hexadecimal literal, expected hex digit but found {}",
                            self.describe_peek()
                        ),
                        self.index,
                        self.input,
                    ));
                }
                fold_digits(&self.chars[digits_start..self.index], 16)
            }
            // A base-8 parse of "0x.." stops at the 'x'
            NumericLiteralMode::Legacy => 0.0,
        };

        Ok(Token::number(start, self.index, value))
    }

    fn scan_octal(&mut self, start: usize) -> Token {
        self.advance(); // leading 0
        while chars::is_octal_digit(self.peek) {
            self.advance();
        }

        let radix = match self.mode {
            NumericLiteralMode::Standard => 8,
            NumericLiteralMode::Legacy => 16,
        };
        let value = fold_digits(&self.chars[start..self.index], radix);

        Token::number(start, self.index, value)
    }

    fn scan_string(&mut self, start: usize, quote: char) -> Result<Token, SyntaxError> {
        self.advance(); // opening quote
        let mut buffer = String::new();

        loop {
            if self.at_end() {
                return Err(SyntaxError::lex("Unterminated quote", start, self.input));
            }

            let ch = self.peek;
            if ch == chars::BACKSLASH {
                // The escaped character is taken as-is, `\n` is a plain `n`
                self.advance();
                if self.at_end() {
                    return Err(SyntaxError::lex("Unterminated quote", start, self.input));
                }
                buffer.push(self.peek);
                self.advance();
            } else if ch == quote {
                self.advance();
                return Ok(Token::text(start, self.index, TokenCategory::LiteralString, buffer));
            } else {
                buffer.push(ch);
                self.advance();
            }
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, SyntaxError>;

    /// Yields every token up to and including `Eof`, then stops.
    /// Stops after the first error as well.
    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let result = self.next_token();
        match &result {
            Ok(token) if token.is_eof() => self.done = true,
            Err(_) => self.done = true,
            Ok(_) => {}
        }
        Some(result)
    }
}

fn fold_digits(digits: &[char], radix: u32) -> f64 {
    digits.iter().fold(0.0, |acc, ch| {
        acc * radix as f64 + ch.to_digit(radix).unwrap_or(0) as f64
    })
}
