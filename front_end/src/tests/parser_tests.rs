use crate::ast::*;
use crate::error::{FrontEndError, ParseError};
use crate::lexer::tokenize;
use crate::parser::{parse_source, Parser};
use crate::types::StdType;

fn parse(source: &str) -> Program {
    parse_source(source).expect("program should parse")
}

fn parse_error(source: &str) -> ParseError {
    match parse_source(source) {
        Err(FrontEndError::Parse { source }) => source,
        other => panic!("expected a parse error, got {:?}", other),
    }
}

fn main_statements(program: &Program) -> &[Statement] {
    &program.block.body.statements
}

#[test]
fn test_minimal_program() {
    let program = parse("program empty; begin end.");
    assert_eq!(program.name.name, "empty");
    assert!(program.block.declarations.is_empty());
    assert_eq!(main_statements(&program), &[Statement::Empty]);
}

#[test]
fn test_variable_declaration_groups() {
    let program = parse(
        "program p;
         var x, y : integer;
             a : array[10] of char;
         begin end.",
    );

    let Declaration::Variables(vars) = &program.block.declarations[0] else {
        panic!("expected a var section");
    };
    assert_eq!(vars.line, 2);
    assert_eq!(vars.groups.len(), 2);
    let names: Vec<&str> = vars.groups[0].names.iter().map(|n| n.name.as_str()).collect();
    assert_eq!(names, vec!["x", "y"]);
    assert_eq!(vars.groups[0].typ, TypeSpec::Standard(StdType::Integer));
    assert_eq!(
        vars.groups[1].typ,
        TypeSpec::Array {
            size: 10,
            element: StdType::Char,
            line: 3
        }
    );
}

#[test]
fn test_zero_sized_array_is_rejected() {
    let err = parse_error("program p; var a : array[0] of integer; begin end.");
    assert_eq!(err, ParseError::ZeroArraySize { line: 1 });
}

#[test]
fn test_procedure_with_parameters_and_locals() {
    let program = parse(
        "program p;
         procedure swap(a, b : integer; c : char);
         var t : integer;
         begin t := a; a := b; b := t end;
         begin end.",
    );

    let Declaration::Procedure(procedure) = &program.block.declarations[0] else {
        panic!("expected a procedure");
    };
    assert_eq!(procedure.name.name, "swap");
    assert_eq!(procedure.params.len(), 2);
    assert_eq!(procedure.params[0].names.len(), 2);
    assert_eq!(procedure.params[1].typ, StdType::Char);
    assert!(procedure.variables.is_some());
    assert_eq!(procedure.body.statements.len(), 3);
}

#[test]
fn test_operator_precedence() {
    let program = parse("program p; var x : integer; begin x := 1 + 2 * 3 end.");
    let Statement::Assignment { value, .. } = &main_statements(&program)[0] else {
        panic!("expected an assignment");
    };
    let Expression::Binary { operator, right, .. } = value else {
        panic!("expected a binary expression");
    };
    assert_eq!(*operator, BinaryOp::Add);
    assert!(matches!(
        **right,
        Expression::Binary {
            operator: BinaryOp::Mul,
            ..
        }
    ));
}

#[test]
fn test_leading_sign_binds_to_first_term() {
    let program = parse("program p; var x : integer; begin x := -x * 2 + 1 end.");
    let Statement::Assignment { value, .. } = &main_statements(&program)[0] else {
        panic!("expected an assignment");
    };
    let Expression::Binary { left, operator, .. } = value else {
        panic!("expected a binary expression");
    };
    assert_eq!(*operator, BinaryOp::Add);
    assert!(matches!(
        **left,
        Expression::Unary {
            operator: UnaryOp::Minus,
            ..
        }
    ));
}

#[test]
fn test_relational_operators_are_left_associative() {
    let program = parse("program p; var b : boolean; begin b := 1 < 2 = true end.");
    let Statement::Assignment { value, .. } = &main_statements(&program)[0] else {
        panic!("expected an assignment");
    };
    let Expression::Binary { left, operator, .. } = value else {
        panic!("expected a binary expression");
    };
    assert_eq!(*operator, BinaryOp::Equal);
    assert!(matches!(
        **left,
        Expression::Binary {
            operator: BinaryOp::Less,
            ..
        }
    ));
}

#[test]
fn test_control_flow_statements() {
    let program = parse(
        "program p;
         var i : integer;
         begin
             while i < 10 do begin
                 if i = 5 then break else i := i + 1
             end;
             return
         end.",
    );

    let statements = main_statements(&program);
    let Statement::While { body, line, .. } = &statements[0] else {
        panic!("expected a while loop");
    };
    assert_eq!(*line, 4);
    let Statement::Compound(inner) = &**body else {
        panic!("expected a compound body");
    };
    assert!(matches!(
        &inner.statements[0],
        Statement::If {
            else_branch: Some(_),
            ..
        }
    ));
    assert!(matches!(statements[1], Statement::Return { line: 7 }));
}

#[test]
fn test_dangling_else_binds_to_nearest_if() {
    let program = parse(
        "program p; var a, b : boolean; var x : integer;
         begin if a then if b then x := 1 else x := 2 end.",
    );
    let Statement::If {
        then_branch,
        else_branch,
        ..
    } = &main_statements(&program)[0]
    else {
        panic!("expected an if");
    };
    assert!(else_branch.is_none());
    assert!(matches!(
        **then_branch,
        Statement::If {
            else_branch: Some(_),
            ..
        }
    ));
}

#[test]
fn test_call_read_and_write() {
    let program = parse(
        "program p;
         var n : integer; a : array[3] of char;
         procedure q(k : integer); begin end;
         begin
             call q(n + 1);
             readln(n, a[0]);
             writeln('n = ', n : 4, a[0], 'x');
             write
         end.",
    );

    let statements = main_statements(&program);
    let Statement::Call { name, arguments } = &statements[0] else {
        panic!("expected a call");
    };
    assert_eq!(name.name, "q");
    assert_eq!(arguments.len(), 1);

    let Statement::Read {
        newline, targets, ..
    } = &statements[1]
    else {
        panic!("expected readln");
    };
    assert!(*newline);
    assert_eq!(targets.len(), 2);
    assert!(targets[1].index.is_some());

    let Statement::Write { newline, items, .. } = &statements[2] else {
        panic!("expected writeln");
    };
    assert!(*newline);
    assert!(matches!(&items[0], OutputItem::Text { value, .. } if value == "n = "));
    assert!(matches!(&items[1], OutputItem::Value { width: Some(4), .. }));
    assert!(matches!(&items[2], OutputItem::Value { width: None, .. }));
    // a one-character string is a char value, not text
    assert!(matches!(
        &items[3],
        OutputItem::Value {
            expr: Expression::Str { .. },
            ..
        }
    ));

    assert!(matches!(
        &statements[3],
        Statement::Write {
            newline: false,
            ..
        }
    ));
}

#[test]
fn test_casts_and_not() {
    let program = parse(
        "program p; var c : char; var b : boolean;
         begin b := not boolean(integer(c)) end.",
    );
    let Statement::Assignment { value, .. } = &main_statements(&program)[0] else {
        panic!("expected an assignment");
    };
    let Expression::Not { operand, .. } = value else {
        panic!("expected not");
    };
    let Expression::Cast { target, operand, .. } = &**operand else {
        panic!("expected a cast");
    };
    assert_eq!(*target, StdType::Boolean);
    assert!(matches!(
        **operand,
        Expression::Cast {
            target: StdType::Integer,
            ..
        }
    ));
}

#[test]
fn test_missing_semicolon_reports_line() {
    let err = parse_error("program p;\nvar x : integer\nbegin end.");
    assert_eq!(err.line(), 3);
    assert_eq!(err.to_string(), "line 3: expected ';', found 'begin'");
}

#[test]
fn test_missing_final_dot() {
    let err = parse_error("program p; begin end");
    assert!(matches!(
        err,
        ParseError::UnexpectedToken { ref found, .. } if found == "end of input"
    ));
}

#[test]
fn test_bad_factor() {
    let err = parse_error("program p; var x : integer; begin x := * 2 end.");
    assert_eq!(err.to_string(), "line 1: expected factor, found '*'");
}

#[test]
fn test_lexical_errors_surface_through_parse_source() {
    assert!(matches!(
        parse_source("program p; begin x := 99999 end."),
        Err(FrontEndError::Lex { .. })
    ));
}

#[test]
fn test_parser_over_prelexed_tokens() {
    let tokens = tokenize("program t; begin writeln end.").unwrap();
    let program = Parser::new(&tokens).parse_program().unwrap();
    assert_eq!(program.name.line, 1);
    assert_eq!(main_statements(&program).len(), 1);
}
