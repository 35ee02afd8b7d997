/*
 * Character Codes
 *
 * Character constants and classification used by the binding lexer
 */

//! Character constants used throughout the binding parser

// Special characters
pub const EOF: char = '\0';
pub const TAB: char = '\t';
pub const LF: char = '\n'; // Line feed
pub const CR: char = '\r'; // Carriage return
pub const SPACE: char = ' ';

// Punctuation
pub const DQ: char = '"';
pub const DOLLAR: char = '$';
pub const SQ: char = '\'';
pub const LPAREN: char = '(';
pub const RPAREN: char = ')';
pub const PLUS: char = '+';
pub const COMMA: char = ',';
pub const MINUS: char = '-';
pub const PERIOD: char = '.';
pub const COLON: char = ':';
pub const SEMICOLON: char = ';';

// Brackets
pub const LBRACKET: char = '[';
pub const BACKSLASH: char = '\\';
pub const RBRACKET: char = ']';
pub const UNDERSCORE: char = '_';

// Braces
pub const LBRACE: char = '{';
pub const RBRACE: char = '}';

// Digits
pub const ZERO: char = '0';

/// Whitespace skipped between tokens. Only space, tab, CR and LF qualify.
pub fn is_whitespace(ch: char) -> bool {
    ch == SPACE || ch == TAB || ch == LF || ch == CR
}

/// Check if character is a digit
pub fn is_digit(ch: char) -> bool {
    ('0'..='9').contains(&ch)
}

/// Check if character is ASCII letter
pub fn is_ascii_letter(ch: char) -> bool {
    ch.is_ascii_alphabetic()
}

/// Check if character is ASCII hex digit
pub fn is_ascii_hex_digit(ch: char) -> bool {
    ch.is_ascii_hexdigit()
}

/// Check if character is octal digit (0-7)
pub fn is_octal_digit(ch: char) -> bool {
    ('0'..='7').contains(&ch)
}

/// Check if character is a string delimiter
pub fn is_quote(ch: char) -> bool {
    ch == SQ || ch == DQ
}

/// Exponent marker of scientific notation
pub fn is_exponent_start(ch: char) -> bool {
    ch == 'e' || ch == 'E'
}

/// Hex literal marker following a leading zero
pub fn is_hex_marker(ch: char) -> bool {
    ch == 'x' || ch == 'X'
}

/// Single-character punctuation tokens. `.` is handled by the number scanner.
pub fn is_punctuation(ch: char) -> bool {
    matches!(
        ch,
        LBRACKET | RBRACKET | LBRACE | RBRACE | LPAREN | RPAREN | COMMA | SEMICOLON | COLON
    )
}

/// Check if character can start an identifier
pub fn is_identifier_start(ch: char) -> bool {
    is_ascii_letter(ch) || ch == UNDERSCORE || ch == DOLLAR
}

/// Check if character can be part of an identifier
pub fn is_identifier_part(ch: char) -> bool {
    is_identifier_start(ch) || is_digit(ch)
}
