/**
 * Expression Parser Module
 *
 * Lexer, AST, parser and serializer for binding expressions
 */
pub mod ast;
pub mod lexer;
pub mod parser;
pub mod serializer;

pub use ast::*;
pub use lexer::{tokenize, tokenize_with, Lexer, Token, TokenCategory, TokenValue};
pub use parser::{ParseResult, Parser};
pub use serializer::serialize;
