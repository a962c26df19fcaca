use super::{ErrorKind, EvalError, Evaluator};
use crate::ast::{FALSE, TRUE};
use crate::environment::split_member;
use crate::value::{slot, Kind, Slot, Value};
use std::fmt;

/// Binary operators of prefix expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
}

impl BinaryOp {
    pub fn parse(token: &str) -> Option<BinaryOp> {
        let op = match token {
            "+" => BinaryOp::Add,
            "-" => BinaryOp::Sub,
            "*" => BinaryOp::Mul,
            "/" => BinaryOp::Div,
            "%" => BinaryOp::Mod,
            "==" => BinaryOp::Eq,
            "!=" => BinaryOp::Ne,
            "<" => BinaryOp::Lt,
            "<=" => BinaryOp::Le,
            ">" => BinaryOp::Gt,
            ">=" => BinaryOp::Ge,
            "&" => BinaryOp::And,
            "|" => BinaryOp::Or,
            _ => return None,
        };
        Some(op)
    }

    fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::And => "&",
            BinaryOp::Or => "|",
        }
    }

    /// Equality and ordering, for any operand type with a total order.
    fn compare<T: Ord + ?Sized>(self, a: &T, b: &T) -> Option<bool> {
        match self {
            BinaryOp::Eq => Some(a == b),
            BinaryOp::Ne => Some(a != b),
            BinaryOp::Lt => Some(a < b),
            BinaryOp::Le => Some(a <= b),
            BinaryOp::Gt => Some(a > b),
            BinaryOp::Ge => Some(a >= b),
            _ => None,
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Division rounding toward negative infinity. `None` on division by zero
/// or overflow.
pub(crate) fn floor_div(a: i64, b: i64) -> Option<i64> {
    let quotient = a.checked_div(b)?;
    if a % b != 0 && ((a < 0) != (b < 0)) {
        quotient.checked_sub(1)
    } else {
        Some(quotient)
    }
}

/// Remainder with the sign of the divisor, matching [`floor_div`].
pub(crate) fn floor_mod(a: i64, b: i64) -> Option<i64> {
    if b == -1 {
        return Some(0);
    }
    let remainder = a.checked_rem(b)?;
    if remainder != 0 && ((remainder < 0) != (b < 0)) {
        Some(remainder + b)
    } else {
        Some(remainder)
    }
}

fn is_int_literal(token: &str) -> bool {
    token.starts_with('-') || (!token.is_empty() && token.bytes().all(|b| b.is_ascii_digit()))
}

impl<'a> Evaluator<'a> {
    /// Evaluate a prefix expression such as `+ 5 * 6 x`.
    ///
    /// Tokens are scanned right to left; operands are pushed, operators pop
    /// their operands (left operand first) and push the result.
    pub(crate) fn eval_expression(&self, tokens: &[String]) -> Result<Value, EvalError> {
        let mut stack: Vec<Value> = Vec::with_capacity(tokens.len());

        for token in tokens.iter().rev() {
            if let Some(op) = BinaryOp::parse(token) {
                let (Some(left), Some(right)) = (stack.pop(), stack.pop()) else {
                    return Err(self.fail(
                        ErrorKind::Syntax,
                        format!("operator {} needs two operands", op),
                    ));
                };
                stack.push(self.apply_binary(op, left, right)?);
            } else if token == "!" {
                let operand = stack.pop().ok_or_else(|| {
                    self.fail(ErrorKind::Syntax, "operator ! needs an operand")
                })?;
                match operand {
                    Value::Bool(b) => stack.push(Value::Bool(!b)),
                    other => {
                        return Err(self.fail(
                            ErrorKind::Type,
                            format!("Expecting boolean for !, got {}", other.kind()),
                        ))
                    }
                }
            } else {
                stack.push(self.get_value(token)?);
            }
        }

        match (stack.pop(), stack.is_empty()) {
            (Some(value), true) => Ok(value),
            _ => Err(self.fail(ErrorKind::Syntax, "Invalid expression")),
        }
    }

    fn apply_binary(&self, op: BinaryOp, left: Value, right: Value) -> Result<Value, EvalError> {
        if left.kind() != right.kind() {
            return Err(self.fail(
                ErrorKind::Type,
                format!("Mismatching types {} and {}", left.kind(), right.kind()),
            ));
        }

        let result = match (&left, &right) {
            (Value::Int(a), Value::Int(b)) => match op {
                BinaryOp::Add => Some(Value::Int(self.checked(a.checked_add(*b), *b)?)),
                BinaryOp::Sub => Some(Value::Int(self.checked(a.checked_sub(*b), *b)?)),
                BinaryOp::Mul => Some(Value::Int(self.checked(a.checked_mul(*b), *b)?)),
                BinaryOp::Div => Some(Value::Int(self.checked(floor_div(*a, *b), *b)?)),
                BinaryOp::Mod => Some(Value::Int(self.checked(floor_mod(*a, *b), *b)?)),
                _ => op.compare(a, b).map(Value::Bool),
            },
            (Value::Str(a), Value::Str(b)) => match op {
                BinaryOp::Add => Some(Value::Str(format!("{}{}", a, b))),
                _ => op.compare(a.as_str(), b.as_str()).map(Value::Bool),
            },
            (Value::Bool(a), Value::Bool(b)) => match op {
                BinaryOp::And => Some(Value::Bool(*a && *b)),
                BinaryOp::Or => Some(Value::Bool(*a || *b)),
                _ => op.compare(a, b).map(Value::Bool),
            },
            _ => None,
        };

        result.ok_or_else(|| {
            self.fail(
                ErrorKind::Type,
                format!("Operator {} is not compatible with {}", op, left.kind()),
            )
        })
    }

    /// Turn a failed checked integer operation into a fault.
    fn checked(&self, result: Option<i64>, divisor: i64) -> Result<i64, EvalError> {
        result.ok_or_else(|| {
            if divisor == 0 {
                self.fail(ErrorKind::Fault, "division by zero")
            } else {
                self.fail(ErrorKind::Fault, "integer overflow")
            }
        })
    }

    /// Literal value of a token, if it is one.
    fn literal(&self, token: &str) -> Result<Option<Value>, EvalError> {
        if token.starts_with('"') {
            return Ok(Some(Value::Str(token.trim_matches('"').to_string())));
        }
        if is_int_literal(token) {
            let n = token.parse::<i64>().map_err(|_| {
                self.fail(ErrorKind::Syntax, format!("Invalid integer literal {}", token))
            })?;
            return Ok(Some(Value::Int(n)));
        }
        match token {
            TRUE => Ok(Some(Value::Bool(true))),
            FALSE => Ok(Some(Value::Bool(false))),
            _ => Ok(None),
        }
    }

    /// Value of a single token: a literal, a variable (plain or member), or
    /// the name of a declared function.
    pub(crate) fn get_value(&self, token: &str) -> Result<Value, EvalError> {
        if let Some(value) = self.literal(token)? {
            return Ok(value);
        }
        if let Some(cell) = self.env.get(token) {
            let value = cell.borrow().clone();
            return Ok(value);
        }
        if let Some(info) = self.program.functions.get(token) {
            return Ok(Value::Function(info));
        }
        Err(self.unknown_variable(token))
    }

    /// Like [`get_value`](Self::get_value), but hands back the variable's own
    /// slot so the caller can alias it. Literals and function names get a
    /// fresh slot.
    pub(crate) fn resolve_slot(&self, token: &str) -> Result<Slot, EvalError> {
        if let Some(value) = self.literal(token)? {
            return Ok(slot(value));
        }
        if let Some(cell) = self.env.get(token) {
            return Ok(cell);
        }
        if let Some(info) = self.program.functions.get(token) {
            return Ok(slot(Value::Function(info)));
        }
        Err(self.unknown_variable(token))
    }

    /// Error for a name that does not resolve. Member access on something
    /// that is not an object is a type error rather than a name error.
    pub(crate) fn unknown_variable(&self, name: &str) -> EvalError {
        if let Some((object, _)) = split_member(name) {
            if let Some(cell) = self.env.get(object) {
                let kind = cell.borrow().kind();
                if kind != Kind::Object {
                    return self.fail(
                        ErrorKind::Type,
                        format!("{} is a {}, not an object", object, kind),
                    );
                }
            }
        }
        self.fail(ErrorKind::Name, format!("Unknown variable {}", name))
    }
}
