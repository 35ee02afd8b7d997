/**
 * Expression Evaluator
 *
 * Tree-walking interpreter for parsed binding expressions
 */
pub mod value;

pub use value::{Function, NativeFn, Object, Value};

use crate::error::EvalError;
use crate::expression_parser::ast::*;
use crate::expression_parser::serialize;

pub type EvalResult = Result<Value, EvalError>;

impl AST {
    /// Evaluate against a data context, falling back to `parent` for names the data
    /// context does not define. Unknown names are `undefined`.
    pub fn evaluate(&self, data: &Value, parent: Option<&Value>) -> EvalResult {
        self.visit(&mut Evaluator { data, parent })
    }
}

struct Evaluator<'a> {
    data: &'a Value,
    parent: Option<&'a Value>,
}

impl Evaluator<'_> {
    fn lookup(&self, name: &str) -> Value {
        [Some(self.data), self.parent]
            .into_iter()
            .flatten()
            .find_map(|scope| match scope {
                Value::Object(map) => map.get(name).cloned(),
                _ => None,
            })
            .unwrap_or_default()
    }

    fn eval(&mut self, ast: &AST) -> EvalResult {
        ast.visit(self)
    }

    fn eval_all(&mut self, items: &[AST]) -> Result<Vec<Value>, EvalError> {
        items.iter().map(|item| self.eval(item)).collect()
    }

    fn binary(&self, op: BinaryOp, left: Value, right: Value) -> EvalResult {
        let value = match op {
            BinaryOp::Add => {
                let (left, right) = (left.to_primitive(), right.to_primitive());
                if matches!(left, Value::String(_)) || matches!(right, Value::String(_)) {
                    Value::String(left.to_display_string() + &right.to_display_string())
                } else {
                    Value::Number(left.to_number() + right.to_number())
                }
            }
            BinaryOp::Subtract => Value::Number(left.to_number() - right.to_number()),
            BinaryOp::Multiply => Value::Number(left.to_number() * right.to_number()),
            BinaryOp::Divide => Value::Number(left.to_number() / right.to_number()),
            BinaryOp::Remainder => Value::Number(left.to_number() % right.to_number()),

            BinaryOp::Equal => Value::Bool(left.loose_equals(&right)),
            BinaryOp::NotEqual => Value::Bool(!left.loose_equals(&right)),
            BinaryOp::StrictEqual => Value::Bool(left.strict_equals(&right)),
            BinaryOp::StrictNotEqual => Value::Bool(!left.strict_equals(&right)),

            BinaryOp::Less => Value::Bool(left.compare(&right).is_some_and(|o| o.is_lt())),
            BinaryOp::Greater => Value::Bool(left.compare(&right).is_some_and(|o| o.is_gt())),
            BinaryOp::LessEqual => Value::Bool(left.compare(&right).is_some_and(|o| o.is_le())),
            BinaryOp::GreaterEqual => {
                Value::Bool(left.compare(&right).is_some_and(|o| o.is_ge()))
            }

            BinaryOp::BitOr => Value::Number((left.to_int32() | right.to_int32()) as f64),
            BinaryOp::BitXor => Value::Number((left.to_int32() ^ right.to_int32()) as f64),
            BinaryOp::BitAnd => Value::Number((left.to_int32() & right.to_int32()) as f64),
            BinaryOp::ShiftLeft => {
                Value::Number(left.to_int32().wrapping_shl(right.to_uint32() & 31) as f64)
            }
            BinaryOp::ShiftRight => {
                Value::Number(left.to_int32().wrapping_shr(right.to_uint32() & 31) as f64)
            }
            BinaryOp::UnsignedShiftRight => {
                Value::Number(left.to_uint32().wrapping_shr(right.to_uint32() & 31) as f64)
            }

            BinaryOp::In => Value::Bool(right.has_member(&left.to_property_key())?),
            BinaryOp::InstanceOf => {
                return Err(EvalError::UnsupportedOperator {
                    operator: op.to_string(),
                })
            }

            // Short-circuited in `visit_binary_operator`
            BinaryOp::And | BinaryOp::Or => unreachable!("logical operator {} in binary()", op),
        };
        Ok(value)
    }
}

impl AstVisitor for Evaluator<'_> {
    type Result = EvalResult;

    fn visit_literal(&mut self, ast: &Literal) -> EvalResult {
        Ok(literal_value(&ast.value))
    }

    fn visit_variable_reference(&mut self, ast: &VariableReference) -> EvalResult {
        Ok(self.lookup(&ast.name))
    }

    fn visit_dereference(&mut self, ast: &Dereference) -> EvalResult {
        self.eval(&ast.target)?.get_member(&ast.member_name)
    }

    fn visit_array_index(&mut self, ast: &ArrayIndex) -> EvalResult {
        let target = self.eval(&ast.target)?;
        let index = self.eval(&ast.index)?;
        target.get_member(&index.to_property_key())
    }

    fn visit_function_call(&mut self, ast: &FunctionCall) -> EvalResult {
        // Member calls pass their receiver as `this`
        let (this, callee) = match ast.target.as_ref() {
            AST::Dereference(member) => {
                let receiver = self.eval(&member.target)?;
                let callee = receiver.get_member(&member.member_name)?;
                (receiver, callee)
            }
            AST::ArrayIndex(index) => {
                let receiver = self.eval(&index.target)?;
                let key = self.eval(&index.index)?.to_property_key();
                let callee = receiver.get_member(&key)?;
                (receiver, callee)
            }
            target => (Value::Undefined, self.eval(target)?),
        };

        let function = callee.as_function().ok_or_else(|| EvalError::NotAFunction {
            callee: serialize(&ast.target),
        })?;
        let args = self.eval_all(&ast.args)?;
        function.call(&this, &args)
    }

    fn visit_binary_operator(&mut self, ast: &BinaryOperator) -> EvalResult {
        let left = self.eval(&ast.left)?;
        match ast.operation {
            BinaryOp::And if !left.truthy() => Ok(left),
            BinaryOp::Or if left.truthy() => Ok(left),
            BinaryOp::And | BinaryOp::Or => self.eval(&ast.right),
            op => {
                let right = self.eval(&ast.right)?;
                self.binary(op, left, right)
            }
        }
    }

    fn visit_pre_unary_operator(&mut self, ast: &PreUnaryOperator) -> EvalResult {
        let operand = self.eval(&ast.operand)?;
        let value = match ast.operator {
            UnaryOp::TypeOf => Value::from(operand.type_of()),
            UnaryOp::Not => Value::Bool(!operand.truthy()),
            UnaryOp::BitNot => Value::Number(!operand.to_int32() as f64),
            UnaryOp::Negate => Value::Number(-operand.to_number()),
            UnaryOp::Plus => Value::Number(operand.to_number()),
        };
        Ok(value)
    }

    fn visit_condition(&mut self, ast: &Condition) -> EvalResult {
        if self.eval(&ast.condition)?.truthy() {
            self.eval(&ast.true_exp)
        } else {
            self.eval(&ast.false_exp)
        }
    }

    fn visit_array_expr(&mut self, ast: &ArrayExpr) -> EvalResult {
        Ok(Value::array(self.eval_all(&ast.elements)?))
    }

    fn visit_keyword(&mut self, ast: &Keyword) -> EvalResult {
        Ok(literal_value(&ast.kind.value()))
    }
}

fn literal_value(value: &LiteralValue) -> Value {
    match value {
        LiteralValue::Number(n) => Value::Number(*n),
        LiteralValue::String(s) => Value::String(s.clone()),
        LiteralValue::Bool(b) => Value::Bool(*b),
        LiteralValue::Null => Value::Null,
        LiteralValue::Undefined => Value::Undefined,
    }
}
