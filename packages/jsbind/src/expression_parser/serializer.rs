/**
 * Binding Expression Serializer
 *
 * Serializes AST back to canonical source, inserting parentheses only where the
 * grouping would otherwise change on reparse
 */
use super::ast::*;

/// Serialize AST to string
pub fn serialize(ast: &AST) -> String {
    ast.visit(&mut SerializeExpressionVisitor)
}

struct SerializeExpressionVisitor;

impl SerializeExpressionVisitor {
    fn wrap(&mut self, ast: &AST, parens: bool) -> String {
        let text = ast.visit(self);
        if parens {
            format!("({})", text)
        } else {
            text
        }
    }

    /// Operand of a prefix operator or base of a subscript
    fn wrap_tight(&mut self, ast: &AST) -> String {
        let parens = matches!(ast, AST::BinaryOperator(_) | AST::Condition(_));
        self.wrap(ast, parens)
    }

    fn wrap_postfix_target(&mut self, ast: &AST, is_member: bool) -> String {
        let parens = match ast {
            AST::BinaryOperator(_) | AST::Condition(_) | AST::PreUnaryOperator(_) => true,
            // `1.toString` would lex as a float
            AST::Literal(Literal {
                value: LiteralValue::Number(_),
                ..
            }) => is_member,
            _ => false,
        };
        self.wrap(ast, parens)
    }

    fn list(&mut self, items: &[AST]) -> String {
        items
            .iter()
            .map(|item| item.visit(self))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn binary_precedence(ast: &AST) -> Option<u8> {
    match ast {
        AST::BinaryOperator(b) => Some(b.operation.precedence()),
        _ => None,
    }
}

fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for ch in text.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            _ => out.push(ch),
        }
    }
    out.push('"');
    out
}

/// Source text that lexes back to `n`. Literals past `f64::MAX` overflow to infinity.
fn number_literal(n: f64) -> String {
    if n.is_infinite() {
        let digits = "1e999";
        return if n < 0.0 { format!("-{}", digits) } else { digits.to_string() };
    }
    n.to_string()
}

impl AstVisitor for SerializeExpressionVisitor {
    type Result = String;

    fn visit_literal(&mut self, ast: &Literal) -> String {
        match &ast.value {
            LiteralValue::Number(n) => number_literal(*n),
            LiteralValue::String(s) => quote(s),
            LiteralValue::Bool(b) => b.to_string(),
            LiteralValue::Null => "null".to_string(),
            LiteralValue::Undefined => "undefined".to_string(),
        }
    }

    fn visit_variable_reference(&mut self, ast: &VariableReference) -> String {
        ast.name.clone()
    }

    fn visit_dereference(&mut self, ast: &Dereference) -> String {
        format!(
            "{}.{}",
            self.wrap_postfix_target(&ast.target, true),
            ast.member_name
        )
    }

    fn visit_array_index(&mut self, ast: &ArrayIndex) -> String {
        format!(
            "{}[{}]",
            self.wrap_postfix_target(&ast.target, false),
            ast.index.visit(self)
        )
    }

    fn visit_function_call(&mut self, ast: &FunctionCall) -> String {
        format!(
            "{}({})",
            self.wrap_postfix_target(&ast.target, false),
            self.list(&ast.args)
        )
    }

    fn visit_binary_operator(&mut self, ast: &BinaryOperator) -> String {
        let precedence = ast.operation.precedence();

        let left_parens = matches!(*ast.left, AST::Condition(_))
            || binary_precedence(&ast.left).is_some_and(|p| p < precedence);
        // Equal precedence on the right must keep its grouping: a - (b - c)
        let right_parens = matches!(*ast.right, AST::Condition(_))
            || binary_precedence(&ast.right).is_some_and(|p| p <= precedence);

        format!(
            "{} {} {}",
            self.wrap(&ast.left, left_parens),
            ast.operation,
            self.wrap(&ast.right, right_parens)
        )
    }

    fn visit_pre_unary_operator(&mut self, ast: &PreUnaryOperator) -> String {
        let operand = self.wrap_tight(&ast.operand);
        match ast.operator {
            UnaryOp::TypeOf => format!("typeof {}", operand),
            // keep `- -x` from reading as a decrement
            UnaryOp::Negate | UnaryOp::Plus if operand.starts_with(&['-', '+'][..]) => {
                format!("{} {}", ast.operator, operand)
            }
            _ => format!("{}{}", ast.operator, operand),
        }
    }

    fn visit_condition(&mut self, ast: &Condition) -> String {
        let condition_parens = matches!(*ast.condition, AST::Condition(_));
        format!(
            "{} ? {} : {}",
            self.wrap(&ast.condition, condition_parens),
            ast.true_exp.visit(self),
            ast.false_exp.visit(self)
        )
    }

    fn visit_array_expr(&mut self, ast: &ArrayExpr) -> String {
        format!("[{}]", self.list(&ast.elements))
    }

    fn visit_keyword(&mut self, ast: &Keyword) -> String {
        ast.kind.as_str().to_string()
    }
}
