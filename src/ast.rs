use crate::token::{Token, TokenType};
use crate::value::Val;
use serde::Serialize;
use std::fmt::{self, Display};
use std::rc::Rc;
use thiserror::Error;

/// A token reached a node constructor whose kind the node cannot hold.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("[line {line}] {found} cannot form {expected}")]
pub struct NodeError {
    pub expected: &'static str,
    pub found: TokenType,
    pub line: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Ty {
    Integer,
    Real,
}

impl Display for Ty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer => write!(f, "integer"),
            Self::Real => write!(f, "real"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnOp {
    Plus,
    Minus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    /// `/` — always real division.
    RealDiv,
    /// `div` — integer division.
    IntDiv,
    /// `:=`
    Assign,
    /// `:` between declaration names and their type.
    Declare,
    /// `,` chaining declaration names.
    List,
}

impl UnOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Plus => "+",
            Self::Minus => "-",
        }
    }
}

impl BinOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::RealDiv => "/",
            Self::IntDiv => "div",
            Self::Assign => ":=",
            Self::Declare => ":",
            Self::List => ",",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompoundKind {
    /// A `begin ... end` statement block.
    Block,
    /// A `var ...` declaration group.
    Declarations,
}

pub type AstRef = Box<Ast>;

/// The finite node set. Nodes are built through the constructors below, which
/// reject tokens of the wrong kind; the walkers can therefore match
/// exhaustively over these closed operator sets with no fallback arm.
#[derive(Debug, Clone, PartialEq)]
pub enum Ast {
    Empty,
    Num(Val),
    Variable(Rc<str>),
    TypeName(Ty),
    Unary(UnOp, AstRef),
    Binary(BinOp, AstRef, AstRef),
    Compound(CompoundKind, Vec<Ast>),
}

impl Ast {
    pub fn num(token: Token) -> Result<Ast, NodeError> {
        match token.data {
            TokenType::IntConst(x) => Ok(Ast::Num(Val::Int(x))),
            TokenType::RealConst(x) => Ok(Ast::Num(Val::Real(x))),
            found => Err(NodeError {
                expected: "a number node",
                found,
                line: token.line,
            }),
        }
    }

    pub fn variable(token: Token) -> Result<Ast, NodeError> {
        match token.data {
            TokenType::Identifier(id) => Ok(Ast::Variable(id)),
            found => Err(NodeError {
                expected: "a variable node",
                found,
                line: token.line,
            }),
        }
    }

    pub fn type_name(token: Token) -> Result<Ast, NodeError> {
        match token.data {
            TokenType::IntegerType => Ok(Ast::TypeName(Ty::Integer)),
            TokenType::RealType => Ok(Ast::TypeName(Ty::Real)),
            found => Err(NodeError {
                expected: "a type-name node",
                found,
                line: token.line,
            }),
        }
    }

    pub fn unary(token: Token, operand: Ast) -> Result<Ast, NodeError> {
        let op = match token.data {
            TokenType::UnaryPlus => UnOp::Plus,
            TokenType::UnaryMinus => UnOp::Minus,
            found => {
                return Err(NodeError {
                    expected: "a unary-operator node",
                    found,
                    line: token.line,
                })
            }
        };
        Ok(Ast::Unary(op, Box::new(operand)))
    }

    pub fn binary(token: Token, left: Ast, right: Ast) -> Result<Ast, NodeError> {
        let op = match token.data {
            TokenType::Plus => BinOp::Add,
            TokenType::Minus => BinOp::Sub,
            TokenType::Star => BinOp::Mul,
            TokenType::Slash => BinOp::RealDiv,
            TokenType::Div => BinOp::IntDiv,
            TokenType::Assign => BinOp::Assign,
            TokenType::Colon => BinOp::Declare,
            TokenType::Comma => BinOp::List,
            found => {
                return Err(NodeError {
                    expected: "a binary-operator node",
                    found,
                    line: token.line,
                })
            }
        };
        Ok(Ast::Binary(op, Box::new(left), Box::new(right)))
    }
}
