/**
 * Binding Expression Parser
 *
 * Recursive descent parser with precedence climbing for binary operators
 */
use log::trace;

use super::ast::*;
use super::lexer::{Lexer, Token, TokenCategory};
use crate::config::ParserOptions;
use crate::directives::{self, DirectiveSet};
use crate::error::SyntaxError;

pub type ParseResult<T> = std::result::Result<T, SyntaxError>;

/// Parser for binding expressions and directive lists.
///
/// Holds configuration only; every call builds its own cursor, so one `Parser` can be
/// shared freely.
#[derive(Debug, Clone, Default)]
pub struct Parser {
    options: ParserOptions,
}

impl Parser {
    pub fn new() -> Self {
        Parser::default()
    }

    pub fn with_options(options: ParserOptions) -> Self {
        Parser { options }
    }

    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// Parse a standalone expression. The whole input must be consumed.
    pub fn parse_expression(&self, input: &str) -> ParseResult<AST> {
        let mut parse_ast = ParseAST::new(input, &self.options)?;
        let ast = parse_ast.parse_expression()?;
        parse_ast.expect_eof()?;
        trace!("parsed expression [{}]", input);
        Ok(ast)
    }

    /// Parse a full binding attribute (`prop:text = a; event:click = b()`)
    pub fn parse_directives(&self, input: &str) -> ParseResult<DirectiveSet> {
        directives::parse_directives(input, &self.options)
    }
}

/// Cursor state of one parse: the lexer, the current token and nesting depth.
/// Owned by a single parse call and never shared.
pub(crate) struct ParseAST<'a> {
    lexer: Lexer<'a>,
    input: &'a str,
    token: Token,
    last_end: usize,
    depth: usize,
    max_depth: usize,
}

impl<'a> ParseAST<'a> {
    pub(crate) fn new(input: &'a str, options: &ParserOptions) -> ParseResult<Self> {
        let mut lexer = Lexer::with_mode(input, options.numeric_literals);
        let token = lexer.next_token()?;
        Ok(ParseAST {
            lexer,
            input,
            token,
            last_end: 0,
            depth: 0,
            max_depth: options.max_depth,
        })
    }

    pub(crate) fn at_eof(&self) -> bool {
        self.token.is_eof()
    }

    pub(crate) fn input_index(&self) -> usize {
        self.token.index
    }

    /// Move to the next token, returning the one just consumed
    pub(crate) fn advance(&mut self) -> ParseResult<Token> {
        let next = self.lexer.next_token()?;
        self.last_end = self.token.end;
        Ok(std::mem::replace(&mut self.token, next))
    }

    pub(crate) fn span(&self, start: usize) -> ParseSpan {
        ParseSpan::new(start, self.last_end.max(start))
    }

    /// Parse error positioned at the current token
    pub(crate) fn error(&self, message: impl Into<String>) -> SyntaxError {
        SyntaxError::parse(message, self.token.index, self.input)
    }

    pub(crate) fn error_at(&self, message: impl Into<String>, position: usize) -> SyntaxError {
        SyntaxError::parse(message, position, self.input)
    }

    pub(crate) fn describe_current(&self) -> String {
        describe(&self.token)
    }

    pub(crate) fn consume_optional_punctuation(&mut self, code: char) -> ParseResult<bool> {
        if self.token.is_punctuation(code) {
            self.advance()?;
            return Ok(true);
        }
        Ok(false)
    }

    pub(crate) fn consume_optional_operator(&mut self, op: &str) -> ParseResult<bool> {
        if self.token.is_operator(op) {
            self.advance()?;
            return Ok(true);
        }
        Ok(false)
    }

    pub(crate) fn expect_punctuation(&mut self, code: char) -> ParseResult<()> {
        if self.consume_optional_punctuation(code)? {
            return Ok(());
        }
        Err(self.error(format!(
            "Expected '{}' but found {}",
            code,
            self.describe_current()
        )))
    }

    pub(crate) fn expect_operator(&mut self, op: &str) -> ParseResult<()> {
        if self.consume_optional_operator(op)? {
            return Ok(());
        }
        Err(self.error(format!(
            "Expected '{}' but found {}",
            op,
            self.describe_current()
        )))
    }

    pub(crate) fn expect_identifier(&mut self) -> ParseResult<String> {
        if self.token.is_identifier() {
            let token = self.advance()?;
            return Ok(token.str_value().to_string());
        }
        Err(self.error(format!(
            "Expected identifier but found {}",
            self.describe_current()
        )))
    }

    pub(crate) fn expect_eof(&self) -> ParseResult<()> {
        if self.at_eof() {
            return Ok(());
        }
        Err(self.error(format!("Unexpected token {}", self.describe_current())))
    }

    fn descend(&mut self) -> ParseResult<()> {
        self.depth += 1;
        if self.depth > self.max_depth {
            return Err(self.error(format!(
                "Expression nesting exceeds {} levels",
                self.max_depth
            )));
        }
        Ok(())
    }

    /// Expression := Operators ( "?" Expression ":" Expression )?
    pub(crate) fn parse_expression(&mut self) -> ParseResult<AST> {
        self.descend()?;
        let result = self.parse_conditional();
        self.depth -= 1;
        result
    }

    /// Parse conditional/ternary expression (e.g., `a ? b : c`).
    /// Both branches are full expressions, so nesting is right-associative.
    fn parse_conditional(&mut self) -> ParseResult<AST> {
        let start = self.input_index();
        let condition = self.parse_operators()?;

        if self.consume_optional_operator("?")? {
            let true_exp = self.parse_expression()?;
            self.expect_punctuation(':')?;
            let false_exp = self.parse_expression()?;

            return Ok(AST::Condition(Condition::new(
                self.span(start),
                Box::new(condition),
                Box::new(true_exp),
                Box::new(false_exp),
            )));
        }

        Ok(condition)
    }

    fn parse_operators(&mut self) -> ParseResult<AST> {
        let left = self.parse_unary()?;
        self.parse_binary(left, 0)
    }

    /// Precedence climbing: consume operators binding tighter than `min_precedence`,
    /// grouping equal levels to the left.
    fn parse_binary(&mut self, mut left: AST, min_precedence: u8) -> ParseResult<AST> {
        while let Some(operation) = self.current_binary_operator() {
            let precedence = operation.precedence();
            if precedence <= min_precedence {
                break;
            }
            self.advance()?;

            let operand = self.parse_unary()?;
            let right = self.parse_binary(operand, precedence)?;
            let start = left.span().start;

            left = AST::BinaryOperator(BinaryOperator::new(
                self.span(start),
                Box::new(left),
                operation,
                Box::new(right),
            ));
        }

        Ok(left)
    }

    fn current_binary_operator(&self) -> Option<BinaryOp> {
        let token = &self.token;
        match token.category {
            TokenCategory::Operator => BinaryOp::from_symbol(token.str_value()),
            // `in` and `instanceof` arrive as plain identifiers
            TokenCategory::Identifier => {
                BinaryOp::from_symbol(token.str_value()).filter(BinaryOp::is_word)
            }
            _ => None,
        }
    }

    fn current_unary_operator(&self) -> Option<UnaryOp> {
        let token = &self.token;
        match token.category {
            TokenCategory::Operator => UnaryOp::from_symbol(token.str_value()),
            TokenCategory::Identifier if token.str_value() == "typeof" => Some(UnaryOp::TypeOf),
            _ => None,
        }
    }

    /// Parse prefix operators (typeof, !, ~, -, +)
    fn parse_unary(&mut self) -> ParseResult<AST> {
        if let Some(operator) = self.current_unary_operator() {
            let start = self.input_index();
            self.advance()?;

            self.descend()?;
            let operand = self.parse_unary();
            self.depth -= 1;

            return Ok(AST::PreUnaryOperator(PreUnaryOperator::new(
                self.span(start),
                operator,
                Box::new(operand?),
            )));
        }

        self.parse_atom()
    }

    /// Parse primary expression, then its subscript chain
    fn parse_atom(&mut self) -> ParseResult<AST> {
        let start = self.input_index();
        let token = self.token.clone();

        let atom = match token.category {
            TokenCategory::Punctuation if token.is_punctuation('[') => {
                self.advance()?;
                let elements = self.parse_expression_list(']')?;
                AST::ArrayExpr(ArrayExpr::new(self.span(start), elements))
            }
            TokenCategory::Punctuation if token.is_punctuation('(') => {
                self.advance()?;
                let expr = self.parse_expression()?;
                self.expect_punctuation(')')?;
                expr
            }
            TokenCategory::LiteralNumber => {
                self.advance()?;
                let value = LiteralValue::Number(token.num_value().unwrap_or(f64::NAN));
                AST::Literal(Literal::new(self.span(start), value))
            }
            TokenCategory::LiteralString => {
                self.advance()?;
                let value = LiteralValue::String(token.str_value().to_string());
                AST::Literal(Literal::new(self.span(start), value))
            }
            TokenCategory::Identifier => {
                self.advance()?;
                AST::VariableReference(VariableReference::new(
                    self.span(start),
                    token.str_value().to_string(),
                ))
            }
            TokenCategory::Keyword => {
                let kind = KeywordKind::from_word(token.str_value()).ok_or_else(|| {
                    self.error(format!("Unknown keyword '{}'", token.str_value()))
                })?;
                self.advance()?;
                AST::Keyword(Keyword::new(self.span(start), kind))
            }
            TokenCategory::Eof => return Err(self.error("Unexpected end of input")),
            _ => return Err(self.error(format!("Unexpected token {}", describe(&token)))),
        };

        self.parse_subscripts(atom)
    }

    /// Subscript := ( "." Identifier | "[" Expression "]" | "(" ExprList ")" )*
    fn parse_subscripts(&mut self, mut result: AST) -> ParseResult<AST> {
        loop {
            let start = result.span().start;

            if self.consume_optional_punctuation('.')? {
                let member_name = self.expect_identifier()?;
                result = AST::Dereference(Dereference::new(
                    self.span(start),
                    Box::new(result),
                    member_name,
                ));
            } else if self.consume_optional_punctuation('[')? {
                let index = self.parse_expression()?;
                self.expect_punctuation(']')?;
                result = AST::ArrayIndex(ArrayIndex::new(
                    self.span(start),
                    Box::new(result),
                    Box::new(index),
                ));
            } else if self.consume_optional_punctuation('(')? {
                let args = self.parse_expression_list(')')?;
                result = AST::FunctionCall(FunctionCall::new(
                    self.span(start),
                    Box::new(result),
                    args,
                ));
            } else {
                break;
            }
        }

        Ok(result)
    }

    /// Shared by array literals and call arguments; the opening delimiter is
    /// already consumed.
    fn parse_expression_list(&mut self, end: char) -> ParseResult<Vec<AST>> {
        let mut items = Vec::new();

        if self.consume_optional_punctuation(end)? {
            return Ok(items);
        }

        loop {
            items.push(self.parse_expression()?);

            if !self.consume_optional_punctuation(',')? {
                self.expect_punctuation(end)?;
                return Ok(items);
            }
        }
    }
}

fn describe(token: &Token) -> String {
    if token.is_eof() {
        token.to_string()
    } else {
        format!("'{}'", token)
    }
}
