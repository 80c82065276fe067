use crate::ast::{Ast, CompoundKind, NodeError};
use crate::scanner::{LexError, Lexer};
use crate::token::{Token, TokenType};

use thiserror::Error;

type AstResult = Result<Ast, ParseError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("[line {}] expected {expected}, found {}", .found.line, .found.data)]
    ExpectedToken { expected: TokenType, found: Token },
    #[error("[line {}] expected a type name ('integer' or 'real'), found {}", .found.line, .found.data)]
    ExpectedTypeName { found: Token },
    #[error("[line {}] expected a constant, identifier, sign, or '(', found {}", .found.line, .found.data)]
    ExpectedFactor { found: Token },
    #[error("[line {}] expected {expected} to close {} [line {}], found {}", .found.line, .opener.data, .opener.line, .found.data)]
    UnclosedPair {
        expected: TokenType,
        opener: Token,
        found: Token,
    },
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Node(#[from] NodeError),
}

/// Recursive-descent parser: one method per grammar rule.
///
/// ```text
/// program     := [ PROGRAM identifier ';' ] block '.'
/// block       := declarations compound
/// declarations:= ( VAR (var_decl ';')+ )?
/// var_decl    := identifier (',' identifier)* ':' type_name
/// type_name   := INTEGER | REAL
/// compound    := BEGIN stmt_list END
/// stmt_list   := statement (';' statement)*
/// statement   := compound | assignment | /* empty */
/// assignment  := identifier ':=' expr
/// expr        := term (('+' | '-') term)*
/// term        := factor (('*' | 'div' | '/') factor)*
/// factor      := INT_CONST | REAL_CONST | identifier
///              | '(' expr ')' | ('+' | '-') factor
/// ```
pub struct Parser {
    lexer: Lexer,
    current: Token,
    peeked: Option<Token>,
}

impl Parser {
    pub fn new(mut lexer: Lexer) -> Result<Parser, ParseError> {
        let current = lexer.next_token()?;
        Ok(Parser {
            lexer,
            current,
            peeked: None,
        })
    }

    /// Consumes the current token and returns it; the replacement comes from
    /// the peek buffer first, so a peeked token is the next one consumed.
    fn advance(&mut self) -> Result<Token, ParseError> {
        let next = match self.peeked.take() {
            Some(tok) => tok,
            None => self.lexer.next_token()?,
        };
        Ok(std::mem::replace(&mut self.current, next))
    }

    /// Buffers and returns the token after the current one.
    pub fn peek(&mut self) -> Result<&Token, ParseError> {
        let tok = match self.peeked.take() {
            Some(tok) => tok,
            None => self.lexer.next_token()?,
        };
        Ok(self.peeked.insert(tok))
    }

    fn check(&self, tok: &TokenType) -> bool {
        self.current.data == *tok
    }

    /// Consumes the current token if it has the expected kind, else fails
    /// naming both the found and the expected kinds.
    fn eat(&mut self, expected: &TokenType) -> Result<Token, ParseError> {
        if self.current.data != *expected {
            return Err(ParseError::ExpectedToken {
                expected: expected.clone(),
                found: self.current.clone(),
            });
        }
        self.advance()
    }

    fn eat_identifier(&mut self) -> Result<Token, ParseError> {
        if let TokenType::Identifier(_) = self.current.data {
            self.advance()
        } else {
            Err(ParseError::ExpectedToken {
                expected: TokenType::Identifier("".into()),
                found: self.current.clone(),
            })
        }
    }

    fn eat_pair(&mut self, expected: &TokenType, opener: &Token) -> Result<Token, ParseError> {
        if self.current.data != *expected {
            return Err(ParseError::UnclosedPair {
                expected: expected.clone(),
                opener: opener.clone(),
                found: self.current.clone(),
            });
        }
        self.advance()
    }

    /// Parses a whole program and requires the input to end after the
    /// closing '.'.
    pub fn parse_program(&mut self) -> AstResult {
        let root = self.program()?;
        self.eat(&TokenType::Eof)?;
        Ok(root)
    }

    /// Parses a single expression followed by end of input.
    pub fn parse_expression(&mut self) -> AstResult {
        let expr = self.expr()?;
        self.eat(&TokenType::Eof)?;
        Ok(expr)
    }

    // The header is optional so the bare `begin ... end.` form still runs.
    fn program(&mut self) -> AstResult {
        if self.check(&TokenType::Program) {
            self.eat(&TokenType::Program)?;
            self.eat_identifier()?;
            self.eat(&TokenType::Semicolon)?;
        }
        let root = self.block()?;
        self.eat(&TokenType::Dot)?;
        Ok(root)
    }

    fn block(&mut self) -> AstResult {
        let decls = self.declarations()?;
        let body = self.compound()?;
        Ok(Ast::Compound(CompoundKind::Block, vec![decls, body]))
    }

    fn declarations(&mut self) -> AstResult {
        let mut decls = vec![];
        if self.check(&TokenType::Var) {
            self.eat(&TokenType::Var)?;
            loop {
                decls.push(self.var_decl()?);
                self.eat(&TokenType::Semicolon)?;
                if !matches!(self.current.data, TokenType::Identifier(_)) {
                    break;
                }
            }
        }
        Ok(Ast::Compound(CompoundKind::Declarations, decls))
    }

    fn var_decl(&mut self) -> AstResult {
        let mut names = Ast::variable(self.eat_identifier()?)?;
        while self.check(&TokenType::Comma) {
            let comma = self.eat(&TokenType::Comma)?;
            let next = Ast::variable(self.eat_identifier()?)?;
            names = Ast::binary(comma, names, next)?;
        }
        let colon = self.eat(&TokenType::Colon)?;
        let ty = self.type_name()?;
        Ok(Ast::binary(colon, names, ty)?)
    }

    fn type_name(&mut self) -> AstResult {
        if matches!(
            self.current.data,
            TokenType::IntegerType | TokenType::RealType
        ) {
            Ok(Ast::type_name(self.advance()?)?)
        } else {
            Err(ParseError::ExpectedTypeName {
                found: self.current.clone(),
            })
        }
    }

    fn compound(&mut self) -> AstResult {
        self.eat(&TokenType::Begin)?;
        let mut stmts = vec![self.statement()?];
        while self.check(&TokenType::Semicolon) {
            self.eat(&TokenType::Semicolon)?;
            stmts.push(self.statement()?);
        }
        self.eat(&TokenType::End)?;
        Ok(Ast::Compound(CompoundKind::Block, stmts))
    }

    fn statement(&mut self) -> AstResult {
        if self.check(&TokenType::Begin) {
            self.compound()
        } else if matches!(self.current.data, TokenType::Identifier(_)) {
            // One token of lookahead: commit to an assignment only when ':='
            // follows the identifier.
            if self.peek()?.data == TokenType::Assign {
                self.assignment()
            } else {
                let found = self.peek()?.clone();
                Err(ParseError::ExpectedToken {
                    expected: TokenType::Assign,
                    found,
                })
            }
        } else {
            Ok(Ast::Empty)
        }
    }

    fn assignment(&mut self) -> AstResult {
        let target = Ast::variable(self.eat_identifier()?)?;
        let assign = self.eat(&TokenType::Assign)?;
        let value = self.expr()?;
        Ok(Ast::binary(assign, target, value)?)
    }

    fn expr(&mut self) -> AstResult {
        let mut expr = self.term()?;
        while matches!(self.current.data, TokenType::Plus | TokenType::Minus) {
            let op = self.advance()?;
            let right = self.term()?;
            expr = Ast::binary(op, expr, right)?;
        }
        Ok(expr)
    }

    fn term(&mut self) -> AstResult {
        let mut expr = self.factor()?;
        while matches!(
            self.current.data,
            TokenType::Star | TokenType::Slash | TokenType::Div
        ) {
            let op = self.advance()?;
            let right = self.factor()?;
            expr = Ast::binary(op, expr, right)?;
        }
        Ok(expr)
    }

    fn factor(&mut self) -> AstResult {
        match self.current.data.clone() {
            TokenType::IntConst(_) | TokenType::RealConst(_) => {
                let tok = self.advance()?;
                Ok(Ast::num(tok)?)
            }
            TokenType::Identifier(_) => {
                let tok = self.advance()?;
                Ok(Ast::variable(tok)?)
            }
            TokenType::UnaryPlus | TokenType::UnaryMinus => {
                let op = self.advance()?;
                let operand = self.factor()?;
                Ok(Ast::unary(op, operand)?)
            }
            TokenType::LeftParen => {
                // A parenthesized factor re-enters at the expression rule.
                let opener = self.advance()?;
                let expr = self.expr()?;
                self.eat_pair(&TokenType::RightParen, &opener)?;
                Ok(expr)
            }
            _ => Err(ParseError::ExpectedFactor {
                found: self.current.clone(),
            }),
        }
    }
}
