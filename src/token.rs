use std::fmt::{self, Display};
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub data: TokenType,
    pub line: usize,
}

impl Token {
    pub fn new(data: TokenType, line: usize) -> Self {
        Token { data, line }
    }
}

/// The closed set of token kinds. `Plus`/`Minus` vs `UnaryPlus`/`UnaryMinus`
/// is decided by the lexer from the preceding token, never by the parser.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenType {
    Eof,

    IntConst(i64),
    RealConst(f64),
    Identifier(Rc<str>),

    Program,
    Begin,
    End,
    Var,
    Div,
    IntegerType,
    RealType,

    Plus,
    Minus,
    UnaryPlus,
    UnaryMinus,
    Star,
    Slash,
    Assign,
    Colon,
    Comma,

    LeftParen,
    RightParen,
    Semicolon,
    Dot,
}

impl TokenType {
    /// A binary sign may only follow something that ends an operand.
    pub fn ends_operand(&self) -> bool {
        matches!(
            self,
            Self::RightParen | Self::IntConst(_) | Self::RealConst(_) | Self::Identifier(_)
        )
    }
}

impl Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Eof => write!(f, "end of input"),
            Self::IntConst(x) => write!(f, "integer constant {x}"),
            Self::RealConst(x) => write!(f, "real constant {x}"),
            Self::Identifier(id) => write!(f, "identifier '{id}'"),
            Self::Program => write!(f, "'program'"),
            Self::Begin => write!(f, "'begin'"),
            Self::End => write!(f, "'end'"),
            Self::Var => write!(f, "'var'"),
            Self::Div => write!(f, "'div'"),
            Self::IntegerType => write!(f, "'integer'"),
            Self::RealType => write!(f, "'real'"),
            Self::Plus | Self::UnaryPlus => write!(f, "'+'"),
            Self::Minus | Self::UnaryMinus => write!(f, "'-'"),
            Self::Star => write!(f, "'*'"),
            Self::Slash => write!(f, "'/'"),
            Self::Assign => write!(f, "':='"),
            Self::Colon => write!(f, "':'"),
            Self::Comma => write!(f, "','"),
            Self::LeftParen => write!(f, "'('"),
            Self::RightParen => write!(f, "')'"),
            Self::Semicolon => write!(f, "';'"),
            Self::Dot => write!(f, "'.'"),
        }
    }
}
