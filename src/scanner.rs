use crate::token::{Token, TokenType};
use std::rc::Rc;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LexError {
    #[error("[line {line}] unrecognized character '{ch}'")]
    UnrecognizedChar { ch: char, line: usize },
    #[error("[line {line}] unterminated comment")]
    UnterminatedComment { line: usize },
    #[error("[line {line}] malformed number literal '{literal}'")]
    InvalidNumber { literal: String, line: usize },
}

/// Pull-based scanner. Keywords are case-insensitive, so the source text is
/// normalized to lowercase once, up front.
pub struct Lexer {
    chars: Vec<char>,
    index: usize,
    line: usize,
    // Whether the previous token can end an operand. Decides if a following
    // '+'/'-' is a binary operator or a sign.
    after_operand: bool,
}

impl Lexer {
    pub fn new(code: &str) -> Self {
        Self {
            chars: code.to_lowercase().chars().collect(),
            index: 0,
            line: 1,
            after_operand: false,
        }
    }

    fn advance(&mut self) -> Option<char> {
        self.index += 1;
        self.chars.get(self.index - 1).copied()
    }

    // "match" is a keyword in the metalanguage already.
    fn match_next(&mut self, c: char) -> bool {
        let res = self.chars.get(self.index).is_some_and(|d| c == *d);
        if res {
            self.index += 1;
        }
        res
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.index).copied()
    }

    fn peek_next(&self) -> Option<char> {
        self.chars.get(self.index + 1).copied()
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// The prefix already consumed by the cursor.
    pub fn scanned(&self) -> &[char] {
        &self.chars[..self.index]
    }

    /// The suffix not yet consumed by the cursor.
    pub fn remaining(&self) -> &[char] {
        &self.chars[self.index..]
    }

    /// Returns the next token, or an `Eof` token at end of input (repeatedly,
    /// if called past the end). Whitespace and `{ ... }` comments are skipped
    /// before classification.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_trivia()?;

        let line = self.line;
        let Some(c) = self.peek() else {
            return Ok(Token::new(TokenType::Eof, line));
        };

        let data = match c {
            '0'..='9' => self.number()?,
            c if c.is_alphabetic() || c == '_' => self.word(),
            ':' => {
                self.advance();
                if self.match_next('=') {
                    TokenType::Assign
                } else {
                    TokenType::Colon
                }
            }
            '+' => {
                self.advance();
                if self.after_operand {
                    TokenType::Plus
                } else {
                    TokenType::UnaryPlus
                }
            }
            '-' => {
                self.advance();
                if self.after_operand {
                    TokenType::Minus
                } else {
                    TokenType::UnaryMinus
                }
            }
            '*' => {
                self.advance();
                TokenType::Star
            }
            '/' => {
                self.advance();
                TokenType::Slash
            }
            '(' => {
                self.advance();
                TokenType::LeftParen
            }
            ')' => {
                self.advance();
                TokenType::RightParen
            }
            ';' => {
                self.advance();
                TokenType::Semicolon
            }
            ',' => {
                self.advance();
                TokenType::Comma
            }
            '.' => {
                self.advance();
                TokenType::Dot
            }
            c => return Err(LexError::UnrecognizedChar { ch: c, line }),
        };

        self.after_operand = data.ends_operand();
        Ok(Token::new(data, line))
    }

    fn skip_trivia(&mut self) -> Result<(), LexError> {
        loop {
            match self.peek() {
                Some('\n') => {
                    self.line += 1;
                    self.advance();
                }
                Some(' ' | '\t' | '\r') => {
                    self.advance();
                }
                Some('{') => {
                    let open_line = self.line;
                    self.advance();
                    loop {
                        match self.advance() {
                            Some('}') => break,
                            Some('\n') => self.line += 1,
                            Some(_) => {}
                            None => {
                                return Err(LexError::UnterminatedComment { line: open_line })
                            }
                        }
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    // digits '.' digits is a real constant; a dot not followed by a digit is
    // left for the next token (`2.` at the end of a program is INT then DOT).
    fn number(&mut self) -> Result<TokenType, LexError> {
        let start = self.index;
        while matches!(self.peek(), Some('0'..='9')) {
            self.advance();
        }

        let real = self.peek() == Some('.') && matches!(self.peek_next(), Some('0'..='9'));
        if real {
            self.advance();
            while matches!(self.peek(), Some('0'..='9')) {
                self.advance();
            }
        }

        let literal = self.chars[start..self.index].iter().collect::<String>();
        let line = self.line;
        if real {
            literal
                .parse()
                .map(TokenType::RealConst)
                .map_err(|_| LexError::InvalidNumber { literal, line })
        } else {
            literal
                .parse()
                .map(TokenType::IntConst)
                .map_err(|_| LexError::InvalidNumber { literal, line })
        }
    }

    fn word(&mut self) -> TokenType {
        let start = self.index;
        while self
            .peek()
            .is_some_and(|c| c.is_alphanumeric() || c == '_')
        {
            self.advance();
        }

        let word = self.chars[start..self.index].iter().collect::<String>();
        match word.as_str() {
            "program" => TokenType::Program,
            "begin" => TokenType::Begin,
            "end" => TokenType::End,
            "var" => TokenType::Var,
            "div" => TokenType::Div,
            "integer" => TokenType::IntegerType,
            "real" => TokenType::RealType,
            _ => TokenType::Identifier(Rc::from(word)),
        }
    }
}

/// Scans a whole input eagerly. The parser pulls tokens one at a time
/// instead; this is for callers that want the full stream.
pub fn scan(code: &str) -> Result<Vec<Token>, LexError> {
    let mut lexer = Lexer::new(code);
    let mut result = vec![];
    loop {
        let tok = lexer.next_token()?;
        let done = tok.data == TokenType::Eof;
        result.push(tok);
        if done {
            return Ok(result);
        }
    }
}
