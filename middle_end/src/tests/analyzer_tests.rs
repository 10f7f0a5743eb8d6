use front_end::ast::BinaryOp;
use front_end::types::{StdType, Type};

use super::analyze_source;
use crate::hir::*;

#[test]
fn test_globals_and_labels() {
    let analysis = analyze_source(
        "program p;
         var x : integer; a : array[4] of char;
         begin x := 1 end.",
    )
    .unwrap();
    let program = &analysis.program;

    assert_eq!(program.name, "p");
    assert_eq!(program.globals.len(), 2);
    let x = program.symbols.get(program.globals[0]).unwrap();
    assert_eq!(x.label(), "$x");
    assert_eq!(x.ty, Type::Int);
    let a = program.symbols.get(program.globals[1]).unwrap();
    assert_eq!(
        a.ty,
        Type::Array {
            element: StdType::Char,
            size: 4
        }
    );
}

#[test]
fn test_procedure_symbols() {
    let analysis = analyze_source(
        "program p;
         procedure q(n : integer; c : char);
         var t : boolean;
         begin t := true end;
         begin call q(1, 'x') end.",
    )
    .unwrap();
    let program = &analysis.program;
    let procedure = &program.procedures[0];

    let info = program.symbols.get(procedure.symbol).unwrap();
    assert_eq!(info.label(), "$q");
    assert_eq!(info.ty, Type::Procedure(vec![Type::Int, Type::Char]));
    assert_eq!(info.ty.to_string(), "procedure(integer, char)");

    let n = program.symbols.get(procedure.params[0]).unwrap();
    assert!(n.is_param);
    assert_eq!(n.owner.as_deref(), Some("q"));
    assert_eq!(n.label(), "$n%q");
    let t = program.symbols.get(procedure.locals[0]).unwrap();
    assert!(!t.is_param);
    assert_eq!(t.label(), "$t%q");
}

#[test]
fn test_local_shadows_global() {
    let analysis = analyze_source(
        "program p;
         var x : integer;
         procedure q;
         var x : char;
         begin x := 'a' end;
         begin x := 1 end.",
    )
    .unwrap();
    let program = &analysis.program;

    let HirStatement::Assign { target, .. } = &program.procedures[0].body[0] else {
        panic!("expected an assignment");
    };
    let local = program.symbols.get(target.symbol).unwrap();
    assert_eq!(local.owner.as_deref(), Some("q"));
    assert_eq!(target.ty, Type::Char);

    let HirStatement::Assign { target, .. } = &program.body[0] else {
        panic!("expected an assignment");
    };
    assert_eq!(program.symbols.get(target.symbol).unwrap().owner, None);

    let xref = &analysis.xref;
    assert_eq!(xref.find("x", None).unwrap().refs, vec![6]);
    assert_eq!(xref.find("x", Some("q")).unwrap().refs, vec![5]);
}

#[test]
fn test_expression_types() {
    let analysis = analyze_source(
        "program p;
         var i : integer; b : boolean; c : char;
         begin
             b := (i + 1) * 2 > i div 3;
             b := not b and (c <> 'z');
             i := -i;
             c := char(i);
             b := boolean(c)
         end.",
    )
    .unwrap();
    let body = &analysis.program.body;

    let HirStatement::Assign { value, .. } = &body[0] else {
        panic!("expected an assignment");
    };
    assert_eq!(value.ty, Type::Bool);
    assert!(matches!(
        value.kind,
        HirExprKind::Binary {
            operator: BinaryOp::Greater,
            ..
        }
    ));

    let HirStatement::Assign { value, .. } = &body[2] else {
        panic!("expected an assignment");
    };
    assert!(matches!(value.kind, HirExprKind::Negate(_)));

    let HirStatement::Assign { value, .. } = &body[3] else {
        panic!("expected an assignment");
    };
    assert_eq!(value.ty, Type::Char);
    assert!(matches!(
        value.kind,
        HirExprKind::Cast {
            target: StdType::Char,
            ..
        }
    ));
}

#[test]
fn test_one_character_string_is_char_constant() {
    let analysis = analyze_source("program p; var c : char; begin c := 'A' end.").unwrap();
    let HirStatement::Assign { value, .. } = &analysis.program.body[0] else {
        panic!("expected an assignment");
    };
    assert_eq!(value.kind, HirExprKind::Char(65));
    assert_eq!(value.ty, Type::Char);
}

#[test]
fn test_unary_plus_is_dropped() {
    let analysis = analyze_source("program p; var i : integer; begin i := +3 end.").unwrap();
    let HirStatement::Assign { value, .. } = &analysis.program.body[0] else {
        panic!("expected an assignment");
    };
    assert_eq!(value.kind, HirExprKind::Int(3));
}

#[test]
fn test_call_arguments_by_address_and_value() {
    let analysis = analyze_source(
        "program p;
         var x : integer; a : array[3] of integer;
         procedure q(m, n, k : integer); begin end;
         begin call q(x, a[1], x + 1) end.",
    )
    .unwrap();
    let HirStatement::Call {
        procedure,
        arguments,
    } = &analysis.program.body[0]
    else {
        panic!("expected a call");
    };

    assert_eq!(*procedure, analysis.program.procedures[0].symbol);
    assert!(matches!(&arguments[0], HirArgument::Address(place) if place.index.is_none()));
    assert!(matches!(&arguments[1], HirArgument::Address(place) if place.index.is_some()));
    assert!(matches!(&arguments[2], HirArgument::Value(expr) if expr.ty == Type::Int));
}

#[test]
fn test_parenthesized_variable_is_passed_by_value() {
    let analysis = analyze_source(
        "program p; var x : integer;
         procedure q(n : integer); begin end;
         begin call q((x)) end.",
    )
    .unwrap();
    let HirStatement::Call { arguments, .. } = &analysis.program.body[0] else {
        panic!("expected a call");
    };
    assert!(matches!(&arguments[0], HirArgument::Value(_)));
}

#[test]
fn test_empty_statements_are_dropped() {
    let analysis = analyze_source("program p; begin ; ; writeln; end.").unwrap();
    assert_eq!(analysis.program.body.len(), 1);
    assert!(matches!(
        analysis.program.body[0],
        HirStatement::Write {
            newline: true,
            ..
        }
    ));
}

#[test]
fn test_break_inside_nested_statement_of_loop() {
    let source = "program p; var b : boolean;
        begin while b do begin if b then break end end.";
    assert!(analyze_source(source).is_ok());
}

#[test]
fn test_write_items() {
    let analysis = analyze_source(
        "program p; var i : integer;
         begin writeln('value: ', i : 5, true, 'c') end.",
    )
    .unwrap();
    let HirStatement::Write { items, .. } = &analysis.program.body[0] else {
        panic!("expected a write");
    };
    assert_eq!(items[0], HirOutput::Text("value: ".to_string()));
    assert!(matches!(&items[1], HirOutput::Value { width: Some(5), .. }));
    assert!(matches!(&items[2], HirOutput::Value { expr, .. } if expr.ty == Type::Bool));
    assert!(matches!(&items[3], HirOutput::Value { expr, .. } if expr.ty == Type::Char));
}
