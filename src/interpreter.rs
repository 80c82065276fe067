use crate::ast::{Ast, BinOp, UnOp};
use crate::parser::{ParseError, Parser};
use crate::scanner::Lexer;
use crate::symtab::{Symbol, SymbolTable};
use crate::value::{EvalError, Val};
use std::rc::Rc;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum InterpretError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Eval(#[from] EvalError),
}

/// Tree walker. Owns the symbol table for exactly one run; a fresh
/// interpreter starts from an empty table.
pub struct Interpreter {
    table: SymbolTable,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    pub fn new() -> Interpreter {
        Interpreter {
            table: SymbolTable::new(),
        }
    }

    /// Parses the whole program, then walks it. Nothing executes until the
    /// entire tree is known to be well-formed, so a syntax error anywhere
    /// leaves the table untouched.
    pub fn run(&mut self, code: &str) -> Result<(), InterpretError> {
        let mut parser = Parser::new(Lexer::new(code))?;
        let program = parser.parse_program()?;
        self.eval(&program)?;
        Ok(())
    }

    /// Evaluates a single expression against the current table.
    pub fn eval_expression(&mut self, code: &str) -> Result<Val, InterpretError> {
        let mut parser = Parser::new(Lexer::new(code))?;
        let expr = parser.parse_expression()?;
        Ok(self.eval_value(&expr)?)
    }

    pub fn get(&self, name: &str) -> Option<Val> {
        self.table.get(name)
    }

    pub fn snapshot(&self) -> Vec<Symbol> {
        self.table.snapshot()
    }

    /// Statement walk. Statements yield `None`; the value of a compound is
    /// the value of its last operand.
    pub fn eval(&mut self, node: &Ast) -> Result<Option<Val>, EvalError> {
        match node {
            Ast::Empty => Ok(None),
            Ast::Num(val) => Ok(Some(*val)),
            Ast::Variable(id) => Ok(Some(self.table.lookup(id)?)),
            Ast::TypeName(_) => Err(EvalError::NotAValue),
            Ast::Unary(op, operand) => {
                let v = self.eval_value(operand)?;
                Ok(Some(match op {
                    UnOp::Plus => v,
                    UnOp::Minus => v.neg(),
                }))
            }
            Ast::Binary(op, left, right) => self.eval_binary(*op, left, right),
            Ast::Compound(_, stmts) => {
                let mut last = None;
                for stmt in stmts.iter() {
                    last = self.eval(stmt)?;
                }
                Ok(last)
            }
        }
    }

    /// Value context: the node must produce a value.
    pub fn eval_value(&mut self, node: &Ast) -> Result<Val, EvalError> {
        self.eval(node)?.ok_or(EvalError::NotAValue)
    }

    /// Name context: assignment and declaration targets. Yields the bare
    /// name and never reads the table.
    pub fn eval_name(&self, node: &Ast) -> Result<Rc<str>, EvalError> {
        match node {
            Ast::Variable(id) => Ok(id.clone()),
            _ => Err(EvalError::NotAName),
        }
    }

    fn eval_binary(
        &mut self,
        op: BinOp,
        left: &Ast,
        right: &Ast,
    ) -> Result<Option<Val>, EvalError> {
        match op {
            BinOp::Add => {
                let (l, r) = self.operands(left, right)?;
                Ok(Some(l.add(r)))
            }
            BinOp::Sub => {
                let (l, r) = self.operands(left, right)?;
                Ok(Some(l.sub(r)))
            }
            BinOp::Mul => {
                let (l, r) = self.operands(left, right)?;
                Ok(Some(l.mul(r)))
            }
            BinOp::IntDiv => {
                let (l, r) = self.operands(left, right)?;
                Ok(Some(l.int_div(r)?))
            }
            BinOp::RealDiv => {
                let (l, r) = self.operands(left, right)?;
                Ok(Some(l.real_div(r)?))
            }
            BinOp::Assign => {
                let name = self.eval_name(left)?;
                let val = self.eval_value(right)?;
                Ok(Some(self.table.assign(name, val)))
            }
            BinOp::Declare => {
                let mut names = vec![];
                self.collect_names(left, &mut names)?;
                let Ast::TypeName(ty) = right else {
                    return Err(EvalError::NotAValue);
                };
                for name in names {
                    self.table.declare(name, *ty);
                }
                Ok(None)
            }
            // A bare name list is only meaningful under a declaration.
            BinOp::List => Err(EvalError::NotAValue),
        }
    }

    fn operands(&mut self, left: &Ast, right: &Ast) -> Result<(Val, Val), EvalError> {
        Ok((self.eval_value(left)?, self.eval_value(right)?))
    }

    // Flattens a ','-chained declaration target into names, left to right.
    fn collect_names(&self, node: &Ast, out: &mut Vec<Rc<str>>) -> Result<(), EvalError> {
        match node {
            Ast::Binary(BinOp::List, left, right) => {
                self.collect_names(left, out)?;
                self.collect_names(right, out)
            }
            _ => {
                out.push(self.eval_name(node)?);
                Ok(())
            }
        }
    }
}
