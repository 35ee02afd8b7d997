#![deny(clippy::all)]

/**
 * jsbind
 *
 * Declarative data binding driven by `data-jsBind` attributes: a lexer and
 * precedence-climbing parser for binding expressions, the directive grammar on top
 * of it, an expression evaluator and the tree walk that hands typed directives to a
 * binding factory
 */

// Front end
pub mod chars;
pub mod directives;
pub mod expression_parser;

// Runtime
pub mod binder;
pub mod evaluator;

// Ambient
pub mod config;
pub mod error;

// Re-exports
pub use binder::{
    dispatch, Binder, Binding, BindingContext, BindingFactory, Dispatched, Node,
};
pub use config::{
    BinderConfig, DuplicateDirectivePolicy, ErrorPolicy, NumericLiteralMode, ParserOptions,
};
pub use directives::{
    parse_directives, Directive, DirectiveKind, DirectiveSet, EventDirective, ForEachDirective,
    PropDirective, TemplateDirective,
};
pub use error::{BindError, EvalError, Result, SyntaxError, SyntaxErrorKind};
pub use evaluator::Value;
pub use expression_parser::{serialize, Parser, AST};

/// Parse a standalone expression with default options
pub fn parse_expression(input: &str) -> std::result::Result<AST, SyntaxError> {
    Parser::new().parse_expression(input)
}

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
