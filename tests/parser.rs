use pascalet::ast::{Ast, BinOp, CompoundKind, Ty, UnOp};
use pascalet::parser::{ParseError, Parser};
use pascalet::scanner::Lexer;
use pascalet::token::TokenType;
use pascalet::value::Val;

fn parse_expr(code: &str) -> Ast {
    Parser::new(Lexer::new(code))
        .unwrap()
        .parse_expression()
        .unwrap()
}

fn num(x: i64) -> Box<Ast> {
    Box::new(Ast::Num(Val::Int(x)))
}

#[test]
fn peeked_token_is_returned_next() {
    let mut parser = Parser::new(Lexer::new("1 + 2")).unwrap();

    // Peeking buffers the '+' without consuming it; repeated peeks see the
    // same token, and the parse still comes out in source order.
    assert_eq!(parser.peek().unwrap().data, TokenType::Plus);
    assert_eq!(parser.peek().unwrap().data, TokenType::Plus);
    assert_eq!(
        parser.parse_expression().unwrap(),
        Ast::Binary(BinOp::Add, num(1), num(2))
    );
}

#[test]
fn term_binds_tighter_than_expr() {
    assert_eq!(
        parse_expr("1 + 2 * 3"),
        Ast::Binary(BinOp::Add, num(1), Box::new(Ast::Binary(BinOp::Mul, num(2), num(3))))
    );
}

#[test]
fn operators_associate_left() {
    assert_eq!(
        parse_expr("1 - 2 - 3"),
        Ast::Binary(
            BinOp::Sub,
            Box::new(Ast::Binary(BinOp::Sub, num(1), num(2))),
            num(3)
        )
    );
}

#[test]
fn parenthesized_factor_reenters_at_expr() {
    assert_eq!(
        parse_expr("(1 + 2) * 3"),
        Ast::Binary(
            BinOp::Mul,
            Box::new(Ast::Binary(BinOp::Add, num(1), num(2))),
            num(3)
        )
    );
}

#[test]
fn unary_signs_nest() {
    assert_eq!(
        parse_expr("- -1"),
        Ast::Unary(
            UnOp::Minus,
            Box::new(Ast::Unary(UnOp::Minus, num(1)))
        )
    );
}

#[test]
fn program_shape() {
    let ast = Parser::new(Lexer::new("program p; var x: integer; begin x := 1 end."))
        .unwrap()
        .parse_program()
        .unwrap();

    let Ast::Compound(CompoundKind::Block, parts) = ast else {
        panic!("program should parse to a block compound");
    };
    assert_eq!(parts.len(), 2);
    assert_eq!(
        parts[0],
        Ast::Compound(
            CompoundKind::Declarations,
            vec![Ast::Binary(
                BinOp::Declare,
                Box::new(Ast::Variable("x".into())),
                Box::new(Ast::TypeName(Ty::Integer)),
            )]
        )
    );
    assert_eq!(
        parts[1],
        Ast::Compound(
            CompoundKind::Block,
            vec![Ast::Binary(
                BinOp::Assign,
                Box::new(Ast::Variable("x".into())),
                num(1),
            )]
        )
    );
}

#[test]
fn comma_chains_declaration_names() {
    let ast = Parser::new(Lexer::new("program p; var a, b: real; begin end."))
        .unwrap()
        .parse_program()
        .unwrap();

    let Ast::Compound(CompoundKind::Block, parts) = ast else {
        panic!("program should parse to a block compound");
    };
    assert_eq!(
        parts[0],
        Ast::Compound(
            CompoundKind::Declarations,
            vec![Ast::Binary(
                BinOp::Declare,
                Box::new(Ast::Binary(
                    BinOp::List,
                    Box::new(Ast::Variable("a".into())),
                    Box::new(Ast::Variable("b".into())),
                )),
                Box::new(Ast::TypeName(Ty::Real)),
            )]
        )
    );
}

#[test]
fn expression_must_consume_all_input() {
    let err = Parser::new(Lexer::new("1 2"))
        .unwrap()
        .parse_expression()
        .unwrap_err();

    assert!(matches!(
        err,
        ParseError::ExpectedToken {
            expected: TokenType::Eof,
            ..
        }
    ));
}
