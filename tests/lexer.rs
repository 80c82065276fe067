use pascalet::scanner::{scan, Lexer};
use pascalet::token::TokenType;

fn kinds(code: &str) -> Vec<TokenType> {
    scan(code).unwrap().into_iter().map(|t| t.data).collect()
}

#[test]
fn no_characters_gained_or_lost() {
    let code = "
program p; { a comment
spanning lines }
var x: real;
begin
    x := 1.5 * (2 + 3)
end.
";
    let mut lexer = Lexer::new(code);
    let total = lexer.len();
    loop {
        let tok = lexer.next_token().unwrap();
        assert_eq!(lexer.scanned().len() + lexer.remaining().len(), total);
        if tok.data == TokenType::Eof {
            break;
        }
    }
}

#[test]
fn scanned_and_remaining_partition_the_input() {
    let mut lexer = Lexer::new("x := 1");
    lexer.next_token().unwrap();
    lexer.next_token().unwrap();

    let mut whole: Vec<char> = lexer.scanned().to_vec();
    whole.extend_from_slice(lexer.remaining());
    assert_eq!(whole, "x := 1".chars().collect::<Vec<_>>());
}

#[test]
fn sign_after_operator_is_unary() {
    assert_eq!(
        kinds("a - -b"),
        vec![
            TokenType::Identifier("a".into()),
            TokenType::Minus,
            TokenType::UnaryMinus,
            TokenType::Identifier("b".into()),
            TokenType::Eof,
        ]
    );
}

#[test]
fn sign_after_closing_paren_is_binary() {
    assert_eq!(
        kinds("(1) - 2"),
        vec![
            TokenType::LeftParen,
            TokenType::IntConst(1),
            TokenType::RightParen,
            TokenType::Minus,
            TokenType::IntConst(2),
            TokenType::Eof,
        ]
    );
}

#[test]
fn sign_at_start_is_unary() {
    assert_eq!(
        kinds("-5 + +3"),
        vec![
            TokenType::UnaryMinus,
            TokenType::IntConst(5),
            TokenType::Plus,
            TokenType::UnaryPlus,
            TokenType::IntConst(3),
            TokenType::Eof,
        ]
    );
}

#[test]
fn assign_wins_over_colon() {
    assert_eq!(
        kinds("x : integer; x := 1"),
        vec![
            TokenType::Identifier("x".into()),
            TokenType::Colon,
            TokenType::IntegerType,
            TokenType::Semicolon,
            TokenType::Identifier("x".into()),
            TokenType::Assign,
            TokenType::IntConst(1),
            TokenType::Eof,
        ]
    );
}

#[test]
fn real_needs_digits_on_both_sides_of_the_dot() {
    assert_eq!(
        kinds("1.5 2. 3"),
        vec![
            TokenType::RealConst(1.5),
            TokenType::IntConst(2),
            TokenType::Dot,
            TokenType::IntConst(3),
            TokenType::Eof,
        ]
    );
}

#[test]
fn keywords_and_identifiers_lowercase() {
    assert_eq!(
        kinds("BEGIN Foo END."),
        vec![
            TokenType::Begin,
            TokenType::Identifier("foo".into()),
            TokenType::End,
            TokenType::Dot,
            TokenType::Eof,
        ]
    );
}

#[test]
fn comments_vanish_between_tokens() {
    assert_eq!(
        kinds("1 { two } 3"),
        vec![TokenType::IntConst(1), TokenType::IntConst(3), TokenType::Eof]
    );
}

#[test]
fn eof_repeats() {
    let mut lexer = Lexer::new("1");
    assert_eq!(lexer.next_token().unwrap().data, TokenType::IntConst(1));
    assert_eq!(lexer.next_token().unwrap().data, TokenType::Eof);
    assert_eq!(lexer.next_token().unwrap().data, TokenType::Eof);
}

#[test]
fn div_is_a_keyword() {
    assert_eq!(
        kinds("7 div 2"),
        vec![
            TokenType::IntConst(7),
            TokenType::Div,
            TokenType::IntConst(2),
            TokenType::Eof,
        ]
    );
}
