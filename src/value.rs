use serde::Serialize;
use std::fmt::{self, Display};
use std::rc::Rc;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("undefined name '{0}'")]
    Undefined(Rc<str>),
    #[error("division by zero")]
    DivisionByZero,
    #[error("'div' expects integer operands")]
    IntegerOperands,
    #[error("statement used where a value is required")]
    NotAValue,
    #[error("expression used where an assignable name is required")]
    NotAName,
}

/// A runtime value. Serializes untagged, so snapshots carry plain JSON
/// numbers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Val {
    Int(i64),
    Real(f64),
}

impl Val {
    pub fn as_real(self) -> f64 {
        match self {
            Val::Int(x) => x as f64,
            Val::Real(x) => x,
        }
    }

    fn widen(self, other: Val, int_op: fn(i64, i64) -> i64, real_op: fn(f64, f64) -> f64) -> Val {
        match (self, other) {
            (Val::Int(a), Val::Int(b)) => Val::Int(int_op(a, b)),
            (a, b) => Val::Real(real_op(a.as_real(), b.as_real())),
        }
    }

    pub fn add(self, other: Val) -> Val {
        self.widen(other, |a, b| a + b, |a, b| a + b)
    }

    pub fn sub(self, other: Val) -> Val {
        self.widen(other, |a, b| a - b, |a, b| a - b)
    }

    pub fn mul(self, other: Val) -> Val {
        self.widen(other, |a, b| a * b, |a, b| a * b)
    }

    /// `div`: integer division over integer operands, truncating toward zero
    /// (`(-7) div 2 = -3`). Division by zero is reported, not raised.
    pub fn int_div(self, other: Val) -> Result<Val, EvalError> {
        match (self, other) {
            (Val::Int(_), Val::Int(0)) => Err(EvalError::DivisionByZero),
            (Val::Int(a), Val::Int(b)) => Ok(Val::Int(a / b)),
            _ => Err(EvalError::IntegerOperands),
        }
    }

    /// `/`: real division regardless of operand types.
    pub fn real_div(self, other: Val) -> Result<Val, EvalError> {
        if other.as_real() == 0.0 {
            return Err(EvalError::DivisionByZero);
        }
        Ok(Val::Real(self.as_real() / other.as_real()))
    }

    pub fn neg(self) -> Val {
        match self {
            Val::Int(x) => Val::Int(-x),
            Val::Real(x) => Val::Real(-x),
        }
    }
}

impl Display for Val {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(x) => write!(f, "{}", x),
            Self::Real(x) => write!(f, "{}", x),
        }
    }
}
