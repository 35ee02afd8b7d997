/**
 * Binding Expression AST
 *
 * Defines all AST node types produced by the expression parser
 */

use std::fmt;

use serde::{Deserialize, Serialize};

/// Character span of a node inside the parsed input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseSpan {
    pub start: usize,
    pub end: usize,
}

impl ParseSpan {
    pub fn new(start: usize, end: usize) -> Self {
        ParseSpan { start, end }
    }
}

/// Base trait for all AST nodes
pub trait AstNode {
    fn span(&self) -> &ParseSpan;
    fn visit<V: AstVisitor>(&self, visitor: &mut V) -> V::Result;
}

/// Visitor pattern for AST traversal
pub trait AstVisitor {
    type Result;

    fn visit_literal(&mut self, ast: &Literal) -> Self::Result;
    fn visit_variable_reference(&mut self, ast: &VariableReference) -> Self::Result;
    fn visit_dereference(&mut self, ast: &Dereference) -> Self::Result;
    fn visit_array_index(&mut self, ast: &ArrayIndex) -> Self::Result;
    fn visit_function_call(&mut self, ast: &FunctionCall) -> Self::Result;
    fn visit_binary_operator(&mut self, ast: &BinaryOperator) -> Self::Result;
    fn visit_pre_unary_operator(&mut self, ast: &PreUnaryOperator) -> Self::Result;
    fn visit_condition(&mut self, ast: &Condition) -> Self::Result;
    fn visit_array_expr(&mut self, ast: &ArrayExpr) -> Self::Result;
    fn visit_keyword(&mut self, ast: &Keyword) -> Self::Result;
}

/// Main AST enum containing all node types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum AST {
    Literal(Literal),
    VariableReference(VariableReference),
    Dereference(Dereference),
    ArrayIndex(ArrayIndex),
    FunctionCall(FunctionCall),
    BinaryOperator(BinaryOperator),
    PreUnaryOperator(PreUnaryOperator),
    Condition(Condition),
    ArrayExpr(ArrayExpr),
    Keyword(Keyword),
}

impl AST {
    pub fn span(&self) -> &ParseSpan {
        match self {
            AST::Literal(node) => node.span(),
            AST::VariableReference(node) => node.span(),
            AST::Dereference(node) => node.span(),
            AST::ArrayIndex(node) => node.span(),
            AST::FunctionCall(node) => node.span(),
            AST::BinaryOperator(node) => node.span(),
            AST::PreUnaryOperator(node) => node.span(),
            AST::Condition(node) => node.span(),
            AST::ArrayExpr(node) => node.span(),
            AST::Keyword(node) => node.span(),
        }
    }

    pub fn visit<V: AstVisitor>(&self, visitor: &mut V) -> V::Result {
        match self {
            AST::Literal(node) => node.visit(visitor),
            AST::VariableReference(node) => node.visit(visitor),
            AST::Dereference(node) => node.visit(visitor),
            AST::ArrayIndex(node) => node.visit(visitor),
            AST::FunctionCall(node) => node.visit(visitor),
            AST::BinaryOperator(node) => node.visit(visitor),
            AST::PreUnaryOperator(node) => node.visit(visitor),
            AST::Condition(node) => node.visit(visitor),
            AST::ArrayExpr(node) => node.visit(visitor),
            AST::Keyword(node) => node.visit(visitor),
        }
    }
}

/// Value carried by a literal node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "literalType", content = "value")]
pub enum LiteralValue {
    Number(f64),
    String(String),
    Bool(bool),
    Null,
    Undefined,
}

/// Literal (e.g., `42`, `'text'`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Literal {
    pub span: ParseSpan,
    pub value: LiteralValue,
}

/// Bare name resolved against the data context (e.g., `user`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableReference {
    pub span: ParseSpan,
    pub name: String,
}

/// Member access (e.g., `user.name`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dereference {
    pub span: ParseSpan,
    pub target: Box<AST>,
    pub member_name: String,
}

/// Indexing (e.g., `items[0]`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrayIndex {
    pub span: ParseSpan,
    pub target: Box<AST>,
    pub index: Box<AST>,
}

/// Function call (e.g., `fn(a, b)`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    pub span: ParseSpan,
    pub target: Box<AST>,
    pub args: Vec<AST>,
}

/// Binary operators in precedence order, weakest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    Or,
    And,
    BitOr,
    BitXor,
    BitAnd,
    Equal,
    StrictEqual,
    NotEqual,
    StrictNotEqual,
    Less,
    Greater,
    LessEqual,
    GreaterEqual,
    In,
    InstanceOf,
    ShiftRight,
    ShiftLeft,
    UnsignedShiftRight,
    Add,
    Subtract,
    Multiply,
    Divide,
    Remainder,
}

impl BinaryOp {
    pub fn from_symbol(op: &str) -> Option<BinaryOp> {
        let op = match op {
            "||" => BinaryOp::Or,
            "&&" => BinaryOp::And,
            "|" => BinaryOp::BitOr,
            "^" => BinaryOp::BitXor,
            "&" => BinaryOp::BitAnd,
            "==" => BinaryOp::Equal,
            "===" => BinaryOp::StrictEqual,
            "!=" => BinaryOp::NotEqual,
            "!==" => BinaryOp::StrictNotEqual,
            "<" => BinaryOp::Less,
            ">" => BinaryOp::Greater,
            "<=" => BinaryOp::LessEqual,
            ">=" => BinaryOp::GreaterEqual,
            "in" => BinaryOp::In,
            "instanceof" => BinaryOp::InstanceOf,
            ">>" => BinaryOp::ShiftRight,
            "<<" => BinaryOp::ShiftLeft,
            ">>>" => BinaryOp::UnsignedShiftRight,
            "+" => BinaryOp::Add,
            "-" => BinaryOp::Subtract,
            "*" => BinaryOp::Multiply,
            "/" => BinaryOp::Divide,
            "%" => BinaryOp::Remainder,
            _ => return None,
        };
        Some(op)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOp::Or => "||",
            BinaryOp::And => "&&",
            BinaryOp::BitOr => "|",
            BinaryOp::BitXor => "^",
            BinaryOp::BitAnd => "&",
            BinaryOp::Equal => "==",
            BinaryOp::StrictEqual => "===",
            BinaryOp::NotEqual => "!=",
            BinaryOp::StrictNotEqual => "!==",
            BinaryOp::Less => "<",
            BinaryOp::Greater => ">",
            BinaryOp::LessEqual => "<=",
            BinaryOp::GreaterEqual => ">=",
            BinaryOp::In => "in",
            BinaryOp::InstanceOf => "instanceof",
            BinaryOp::ShiftRight => ">>",
            BinaryOp::ShiftLeft => "<<",
            BinaryOp::UnsignedShiftRight => ">>>",
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "-",
            BinaryOp::Multiply => "*",
            BinaryOp::Divide => "/",
            BinaryOp::Remainder => "%",
        }
    }

    /// Binding strength used by precedence climbing. Higher binds tighter.
    pub fn precedence(&self) -> u8 {
        match self {
            BinaryOp::Or => 1,
            BinaryOp::And => 2,
            BinaryOp::BitOr => 3,
            BinaryOp::BitXor => 4,
            BinaryOp::BitAnd => 5,
            BinaryOp::Equal
            | BinaryOp::StrictEqual
            | BinaryOp::NotEqual
            | BinaryOp::StrictNotEqual => 6,
            BinaryOp::Less
            | BinaryOp::Greater
            | BinaryOp::LessEqual
            | BinaryOp::GreaterEqual
            | BinaryOp::In
            | BinaryOp::InstanceOf => 7,
            BinaryOp::ShiftRight | BinaryOp::ShiftLeft | BinaryOp::UnsignedShiftRight => 8,
            BinaryOp::Add | BinaryOp::Subtract => 9,
            BinaryOp::Multiply | BinaryOp::Divide | BinaryOp::Remainder => 10,
        }
    }

    /// `in` and `instanceof` are words, everything else is punctuation-like
    pub fn is_word(&self) -> bool {
        matches!(self, BinaryOp::In | BinaryOp::InstanceOf)
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Binary operator (e.g., `a + b`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinaryOperator {
    pub span: ParseSpan,
    pub left: Box<AST>,
    pub operation: BinaryOp,
    pub right: Box<AST>,
}

/// Prefix operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryOp {
    TypeOf,
    Not,
    BitNot,
    Negate,
    Plus,
}

impl UnaryOp {
    pub fn from_symbol(op: &str) -> Option<UnaryOp> {
        let op = match op {
            "typeof" => UnaryOp::TypeOf,
            "!" => UnaryOp::Not,
            "~" => UnaryOp::BitNot,
            "-" => UnaryOp::Negate,
            "+" => UnaryOp::Plus,
            _ => return None,
        };
        Some(op)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UnaryOp::TypeOf => "typeof",
            UnaryOp::Not => "!",
            UnaryOp::BitNot => "~",
            UnaryOp::Negate => "-",
            UnaryOp::Plus => "+",
        }
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Prefix unary operator (e.g., `!done`, `-x`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreUnaryOperator {
    pub span: ParseSpan,
    pub operator: UnaryOp,
    pub operand: Box<AST>,
}

/// Ternary conditional (e.g., `condition ? a : b`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub span: ParseSpan,
    pub condition: Box<AST>,
    pub true_exp: Box<AST>,
    pub false_exp: Box<AST>,
}

/// Array literal (e.g., `[1, 2, 3]`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrayExpr {
    pub span: ParseSpan,
    pub elements: Vec<AST>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeywordKind {
    True,
    False,
    Null,
    Undefined,
}

impl KeywordKind {
    pub fn from_word(word: &str) -> Option<KeywordKind> {
        match word {
            "true" => Some(KeywordKind::True),
            "false" => Some(KeywordKind::False),
            "null" => Some(KeywordKind::Null),
            "undefined" => Some(KeywordKind::Undefined),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            KeywordKind::True => "true",
            KeywordKind::False => "false",
            KeywordKind::Null => "null",
            KeywordKind::Undefined => "undefined",
        }
    }

    pub fn value(&self) -> LiteralValue {
        match self {
            KeywordKind::True => LiteralValue::Bool(true),
            KeywordKind::False => LiteralValue::Bool(false),
            KeywordKind::Null => LiteralValue::Null,
            KeywordKind::Undefined => LiteralValue::Undefined,
        }
    }
}

/// Keyword (e.g., `true`, `null`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyword {
    pub span: ParseSpan,
    pub kind: KeywordKind,
}

impl AstNode for Literal {
    fn span(&self) -> &ParseSpan { &self.span }
    fn visit<V: AstVisitor>(&self, visitor: &mut V) -> V::Result { visitor.visit_literal(self) }
}

impl AstNode for VariableReference {
    fn span(&self) -> &ParseSpan { &self.span }
    fn visit<V: AstVisitor>(&self, visitor: &mut V) -> V::Result { visitor.visit_variable_reference(self) }
}

impl AstNode for Dereference {
    fn span(&self) -> &ParseSpan { &self.span }
    fn visit<V: AstVisitor>(&self, visitor: &mut V) -> V::Result { visitor.visit_dereference(self) }
}

impl AstNode for ArrayIndex {
    fn span(&self) -> &ParseSpan { &self.span }
    fn visit<V: AstVisitor>(&self, visitor: &mut V) -> V::Result { visitor.visit_array_index(self) }
}

impl AstNode for FunctionCall {
    fn span(&self) -> &ParseSpan { &self.span }
    fn visit<V: AstVisitor>(&self, visitor: &mut V) -> V::Result { visitor.visit_function_call(self) }
}

impl AstNode for BinaryOperator {
    fn span(&self) -> &ParseSpan { &self.span }
    fn visit<V: AstVisitor>(&self, visitor: &mut V) -> V::Result { visitor.visit_binary_operator(self) }
}

impl AstNode for PreUnaryOperator {
    fn span(&self) -> &ParseSpan { &self.span }
    fn visit<V: AstVisitor>(&self, visitor: &mut V) -> V::Result { visitor.visit_pre_unary_operator(self) }
}

impl AstNode for Condition {
    fn span(&self) -> &ParseSpan { &self.span }
    fn visit<V: AstVisitor>(&self, visitor: &mut V) -> V::Result { visitor.visit_condition(self) }
}

impl AstNode for ArrayExpr {
    fn span(&self) -> &ParseSpan { &self.span }
    fn visit<V: AstVisitor>(&self, visitor: &mut V) -> V::Result { visitor.visit_array_expr(self) }
}

impl AstNode for Keyword {
    fn span(&self) -> &ParseSpan { &self.span }
    fn visit<V: AstVisitor>(&self, visitor: &mut V) -> V::Result { visitor.visit_keyword(self) }
}

// Helper constructors
impl Literal {
    pub fn new(span: ParseSpan, value: LiteralValue) -> Self {
        Literal { span, value }
    }
}

impl VariableReference {
    pub fn new(span: ParseSpan, name: String) -> Self {
        VariableReference { span, name }
    }
}

impl Dereference {
    pub fn new(span: ParseSpan, target: Box<AST>, member_name: String) -> Self {
        Dereference {
            span,
            target,
            member_name,
        }
    }
}

impl ArrayIndex {
    pub fn new(span: ParseSpan, target: Box<AST>, index: Box<AST>) -> Self {
        ArrayIndex {
            span,
            target,
            index,
        }
    }
}

impl FunctionCall {
    pub fn new(span: ParseSpan, target: Box<AST>, args: Vec<AST>) -> Self {
        FunctionCall { span, target, args }
    }
}

impl BinaryOperator {
    pub fn new(span: ParseSpan, left: Box<AST>, operation: BinaryOp, right: Box<AST>) -> Self {
        BinaryOperator {
            span,
            left,
            operation,
            right,
        }
    }
}

impl PreUnaryOperator {
    pub fn new(span: ParseSpan, operator: UnaryOp, operand: Box<AST>) -> Self {
        PreUnaryOperator {
            span,
            operator,
            operand,
        }
    }
}

impl Condition {
    pub fn new(
        span: ParseSpan,
        condition: Box<AST>,
        true_exp: Box<AST>,
        false_exp: Box<AST>,
    ) -> Self {
        Condition {
            span,
            condition,
            true_exp,
            false_exp,
        }
    }
}

impl ArrayExpr {
    pub fn new(span: ParseSpan, elements: Vec<AST>) -> Self {
        ArrayExpr { span, elements }
    }
}

impl Keyword {
    pub fn new(span: ParseSpan, kind: KeywordKind) -> Self {
        Keyword { span, kind }
    }
}
