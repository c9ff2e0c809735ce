// Integration tests for the TINY front end

use std::fs;
use std::io::Cursor;
use std::path::Path;

use tinyfront::parser::ast::*;
use tinyfront::parser::lexer::{Lexer, TokenKind};
use tinyfront::parser::reader::LineReader;
use tinyfront::parser::{parse, ParseError, Parser, MAX_NESTING};
use tinyfront::tree::{print_tree, walk_program};

#[test]
fn test_factorial_tree() {
    let path = Path::new("demos/factorial.tiny");
    let source = fs::read_to_string(path).expect("Failed to read demo file");

    let program = parse(&source).expect("Parsing failed");

    let expected = "\
[Read][x]
[If]
   [Oper][LessThan]
      [Num][0]
      [ID][x]
   [Assign][fact]
      [Num][1]
   [Repeat]
      [Assign][fact]
         [Oper][Times]
            [ID][fact]
            [ID][x]
      [Assign][x]
         [Oper][Minus]
            [ID][x]
            [Num][1]
      [Oper][Equal]
         [ID][x]
         [Num][0]
   [Write]
      [ID][fact]
";
    assert_eq!(print_tree(&program), expected);
}

#[test]
fn test_powers_demo_parses() {
    let source = fs::read_to_string("demos/powers.tiny").expect("Failed to read demo file");
    let program = parse(&source).expect("Parsing failed");

    assert_eq!(program.statements.len(), 5);
    match &program.statements[4] {
        Stmt::If {
            condition,
            else_branch: Some(else_branch),
            ..
        } => {
            assert!(matches!(condition.kind, ExprKind::Operator { op: BinOp::Equal, .. }));
            assert_eq!(else_branch.len(), 1);
        }
        other => panic!("Expected if/else, got {:?}", other),
    }
}

#[test]
fn test_parse_from_buffered_reader() {
    let source = "read x;\nwrite x\n";
    let reader = LineReader::new(Cursor::new(source.as_bytes().to_vec()));

    let mut parser = Parser::from_reader(reader).expect("Parser creation failed");
    let program = parser.parse_program().expect("Parsing failed");

    assert_eq!(program, parse(source).unwrap());
}

#[test]
fn test_left_associative_minus() {
    let program = parse("x := 1-2-3").unwrap();
    let Stmt::Assign { value, .. } = &program.statements[0] else {
        panic!("Expected assignment");
    };

    let ExprKind::Operator { op, left, right } = &value.kind else {
        panic!("Expected operator");
    };
    assert_eq!(*op, BinOp::Minus);
    assert_eq!(right.kind, ExprKind::Number(3));
    match &left.kind {
        ExprKind::Operator { op, left, right } => {
            assert_eq!(*op, BinOp::Minus);
            assert_eq!(left.kind, ExprKind::Number(1));
            assert_eq!(right.kind, ExprKind::Number(2));
        }
        other => panic!("Expected nested minus, got {:?}", other),
    }
}

#[test]
fn test_right_associative_power() {
    let program = parse("write 2^3^2").unwrap();
    assert_eq!(
        print_tree(&program),
        "[Write]\n   [Oper][Power]\n      [Num][2]\n      [Oper][Power]\n         [Num][3]\n         [Num][2]\n"
    );
}

#[test]
fn test_comment_tokenizes_like_whitespace() {
    let with_comment: Vec<_> = Lexer::new("read{c}x")
        .tokenize()
        .unwrap()
        .into_iter()
        .map(|t| (t.kind, t.lexeme))
        .collect();
    let with_space: Vec<_> = Lexer::new("read x")
        .tokenize()
        .unwrap()
        .into_iter()
        .map(|t| (t.kind, t.lexeme))
        .collect();

    assert_eq!(with_comment, with_space);
    assert_eq!(
        with_comment,
        vec![
            (TokenKind::Read, "read".to_string()),
            (TokenKind::Ident, "x".to_string()),
            (TokenKind::EndFile, String::new()),
        ]
    );
}

#[test]
fn test_sequence_consumes_all_input() {
    let program = parse("x:=1;y:=2").unwrap();
    let names: Vec<&str> = program
        .statements
        .iter()
        .map(|s| match s {
            Stmt::Assign { name, .. } => name.as_str(),
            other => panic!("Expected assignment, got {:?}", other),
        })
        .collect();
    assert_eq!(names, vec!["x", "y"]);
}

#[test]
fn test_missing_end_is_rejected() {
    let err = parse("if 1 then").unwrap_err();
    assert!(matches!(err, ParseError::Syntax { .. }), "{:?}", err);
}

#[test]
fn test_error_kinds_are_distinct() {
    assert!(matches!(parse("x := 1 until"), Err(ParseError::TrailingInput { .. })));
    assert!(matches!(parse("x := 1 ! 2"), Err(ParseError::Lexical { .. })));
    assert!(matches!(parse("x := )"), Err(ParseError::Syntax { .. })));
}

#[test]
fn test_diagnostic_messages() {
    let err = parse("then x := 1").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Syntax error at line 1, column 1: unexpected token in statement: 'then'"
    );

    let err = parse("write\n  * 2").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Syntax error at line 2, column 3: unexpected token in primary expression: '*'"
    );

    let err = parse("read x;\nx := 1 # 1").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Lexical error at line 2, column 8: unrecognized character '#'"
    );
}

#[test]
fn test_unterminated_comment_ends_program() {
    let program = parse("write 1 { the rest is ignored ;\n write 2").unwrap();
    assert_eq!(program.statements.len(), 1);
}

#[test]
fn test_scanner_stays_at_end_of_file() {
    let mut lexer = Lexer::new("write 1");
    let tokens = lexer.tokenize().unwrap();
    assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::EndFile));

    for _ in 0..3 {
        let token = lexer.next_token().unwrap();
        assert_eq!(token.kind, TokenKind::EndFile);
        assert!(token.lexeme.is_empty());
    }
}

#[test]
fn test_deep_parentheses_are_diagnosed() {
    let source = format!("x := {}1{}", "(".repeat(2000), ")".repeat(2000));
    match parse(&source) {
        Err(ParseError::Syntax { message, location }) => {
            assert_eq!(message, "expression nested too deeply");
            assert_eq!(location, SourceLocation::new(1, 6 + MAX_NESTING));
        }
        other => panic!("Expected nesting error, got {:?}", other),
    }
}

#[test]
fn test_long_sum_parses_walks_and_drops() {
    let terms = 200_000;
    let source = format!("x := 1{}", "\n+1".repeat(terms - 1));
    let program = parse(&source).expect("Parsing failed");

    let mut nodes = 0;
    let mut deepest = 0;
    walk_program(&program, &mut |_, depth| {
        nodes += 1;
        deepest = deepest.max(depth);
    });
    assert_eq!(nodes, 2 * terms);
    assert_eq!(deepest, terms);

    drop(program);
}

#[test]
fn test_trailing_input_message() {
    let err = parse("write 1\nend").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Trailing input at line 2, column 1: 'end' after program end"
    );
}
