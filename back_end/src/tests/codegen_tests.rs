use front_end::types::Type;
use middle_end::hir::{HirProgram, SymbolArena, SymbolId};

use super::{assemble, program_lines};
use crate::runtime::{ENTRY_POINTS, RUNTIME_LIBRARY};
use crate::{generate, CodegenError};

const ELEMENT_CHECK: [&str; 5] = [
    "\tCPA\tGR1,GR0",
    "\tJMI\tEROV",
    "\tLAD\tGR2,4",
    "\tCPA\tGR1,GR2",
    "\tJPL\tEROV",
];

#[test]
fn test_addition_and_write() {
    let assembly = assemble("program P; var x: integer; begin x := 3 + 4; write(x) end.");

    assert_eq!(
        program_lines(&assembly),
        vec![
            "%%P\tSTART\tL0001",
            "$x\tDC\t0",
            "L0001\tLAD\tGR0,0",
            "\tLAD\tGR1,$x",
            "\tPUSH\t0,GR1",
            "\tLAD\tGR1,3",
            "\tPUSH\t0,GR1",
            "\tLAD\tGR1,4",
            "\tPOP\tGR2",
            "\tADDA\tGR1,GR2",
            "\tJOV\tEOVF",
            "\tPOP\tGR2",
            "\tST\tGR1,0,GR2",
            "\tLD\tGR1,$x",
            "\tLD\tGR2,GR0",
            "\tCALL\tWRITEINT",
            "\tCALL\tFLUSH",
            "\tSVC\t0",
        ]
    );
}

#[test]
fn test_file_layout() {
    let assembly = assemble("program p; begin end.");

    assert!(assembly.starts_with("%%p\tSTART\tL0001\n"));
    assert!(assembly.contains(RUNTIME_LIBRARY));
    assert!(assembly.ends_with("\tEND\n"));
}

#[test]
fn test_runtime_defines_entry_points() {
    for entry in ENTRY_POINTS {
        assert!(
            RUNTIME_LIBRARY
                .lines()
                .any(|line| line.split_whitespace().next() == Some(entry)),
            "runtime library does not define {}",
            entry
        );
    }
}

#[test]
fn test_bounds_checked_before_every_element_access() {
    let assembly = assemble(
        "program p;
         var a: array[5] of integer;
         begin a[4] := 1; write(a[0]) end.",
    );
    let lines = program_lines(&assembly);

    let accesses: Vec<usize> = lines
        .iter()
        .enumerate()
        .filter(|(_, line)| **line == "\tLAD\tGR1,$a,GR1")
        .map(|(i, _)| i)
        .collect();
    assert_eq!(accesses.len(), 2);
    for i in accesses {
        assert_eq!(lines[i - 5..i], ELEMENT_CHECK);
    }
    assert!(lines.contains(&"$a\tDS\t5"));
}

#[test]
fn test_break_jumps_to_loop_exit() {
    let assembly = assemble("program p; begin while true do begin break end end.");
    let lines = program_lines(&assembly);

    assert!(lines.contains(&"L0002\tLAD\tGR1,1"));
    assert!(lines.contains(&"\tJZE\tL0003"));
    assert_eq!(lines.iter().filter(|l| **l == "\tJUMP\tL0003").count(), 1);
    assert!(lines.contains(&"\tJUMP\tL0002"));
    assert!(lines.contains(&"L0003\tCALL\tFLUSH"));
}

#[test]
fn test_break_leaves_innermost_loop() {
    let assembly = assemble(
        "program p;
         var b: boolean;
         begin
             while b do begin
                 while true do break;
                 b := false
             end
         end.",
    );
    let lines = program_lines(&assembly);

    // Outer loop L0002/L0003, inner loop L0004/L0005.
    let inner_exit = lines.iter().position(|l| *l == "\tJUMP\tL0005");
    let inner_back = lines.iter().position(|l| *l == "\tJUMP\tL0004");
    assert!(inner_exit.is_some() && inner_exit < inner_back);
    assert!(!lines.contains(&"\tJUMP\tL0003"));
}

#[test]
fn test_labels_are_reproducible() {
    let source = "program p;
         var i: integer;
         begin
             i := 0;
             while i < 10 do begin
                 if i = 5 then writeln('five') else writeln(i);
                 i := i + 1
             end
         end.";

    assert_eq!(assemble(source), assemble(source));
}

#[test]
fn test_procedure_call_and_prologue() {
    let assembly = assemble(
        "program p;
         var n: integer;
         procedure q(a: integer; b: char);
         begin a := a + 1 end;
         begin call q(n, 'x') end.",
    );

    assert_eq!(
        program_lines(&assembly),
        vec![
            "%%p\tSTART\tL0001",
            "$n\tDC\t0",
            "$a%q\tDC\t0",
            "$b%q\tDC\t0",
            "$q\tPOP\tGR2",
            "\tPOP\tGR1",
            "\tST\tGR1,$b%q",
            "\tPOP\tGR1",
            "\tST\tGR1,$a%q",
            "\tPUSH\t0,GR2",
            "\tLD\tGR1,$a%q",
            "\tPUSH\t0,GR1",
            "\tLD\tGR1,$a%q",
            "\tLD\tGR1,0,GR1",
            "\tPUSH\t0,GR1",
            "\tLAD\tGR1,1",
            "\tPOP\tGR2",
            "\tADDA\tGR1,GR2",
            "\tJOV\tEOVF",
            "\tPOP\tGR2",
            "\tST\tGR1,0,GR2",
            "\tRET",
            "L0001\tLAD\tGR0,0",
            "\tLAD\tGR1,$n",
            "\tPUSH\t0,GR1",
            "\tLAD\tGR1,120",
            "\tST\tGR1,L0002",
            "\tLAD\tGR1,L0002",
            "\tPUSH\t0,GR1",
            "\tCALL\t$q",
            "\tCALL\tFLUSH",
            "\tSVC\t0",
            "L0002\tDC\t0",
        ]
    );
}

#[test]
fn test_procedure_without_params_has_no_prologue() {
    let assembly = assemble(
        "program p;
         procedure q; begin return end;
         begin call q; return end.",
    );
    let lines = program_lines(&assembly);

    assert_eq!(lines[1], "$q\tRET");
    assert_eq!(lines[2], "\tRET");
    assert_eq!(
        lines[3..],
        [
            "L0001\tLAD\tGR0,0",
            "\tCALL\t$q",
            "\tCALL\tFLUSH",
            "\tSVC\t0",
            "\tCALL\tFLUSH",
            "\tSVC\t0",
        ]
    );
}

#[test]
fn test_write_items() {
    let assembly = assemble(
        "program p;
         var c: char; b: boolean;
         begin writeln('it''s', c:3, b) end.",
    );
    let lines = program_lines(&assembly);

    let body: Vec<&str> = lines[3..].to_vec();
    assert_eq!(
        body,
        vec![
            "L0001\tLAD\tGR0,0",
            "\tLAD\tGR1,L0002",
            "\tLD\tGR2,GR0",
            "\tCALL\tWRITESTR",
            "\tLD\tGR1,$c",
            "\tLAD\tGR2,3",
            "\tCALL\tWRITECHAR",
            "\tLD\tGR1,$b",
            "\tLD\tGR2,GR0",
            "\tCALL\tWRITEBOOL",
            "\tCALL\tWRITELINE",
            "\tCALL\tFLUSH",
            "\tSVC\t0",
            "L0002\tDC\t'it''s'",
            "\tDC\t0",
        ]
    );
}

#[test]
fn test_read_items() {
    let assembly = assemble(
        "program p;
         var i: integer; c: char;
         begin readln(i, c); read end.",
    );
    let lines = program_lines(&assembly);

    assert_eq!(
        lines[3..8],
        [
            "L0001\tLAD\tGR0,0",
            "\tLAD\tGR1,$i",
            "\tCALL\tREADINT",
            "\tLAD\tGR1,$c",
            "\tCALL\tREADCHAR",
        ]
    );
    assert_eq!(lines[8], "\tCALL\tREADLINE");
    assert_eq!(lines[9], "\tCALL\tFLUSH");
}

#[test]
fn test_if_else_and_comparison() {
    let assembly = assemble(
        "program p;
         var x: integer;
         begin if x <= 1 then x := 0 else x := 1 end.",
    );
    let lines = program_lines(&assembly);

    for expected in [
        "\tCPA\tGR2,GR1",
        "\tJMI\tL0002",
        "\tJZE\tL0002",
        "\tJUMP\tL0003",
        "L0002\tLAD\tGR1,1",
        "L0003\tCPA\tGR1,GR0",
        "\tJZE\tL0004",
        "\tJUMP\tL0005",
        "L0004\tLAD\tGR1,$x",
        "L0005\tCALL\tFLUSH",
    ] {
        assert!(lines.contains(&expected), "missing {:?}", expected);
    }
}

#[test]
fn test_arithmetic_checks() {
    let assembly = assemble(
        "program p;
         var x: integer;
         begin x := -(x div 2) - x * 3 end.",
    );
    let lines = program_lines(&assembly);

    let divide = lines.iter().position(|l| *l == "\tDIVA\tGR2,GR1").unwrap();
    assert_eq!(lines[divide - 2..divide], ["\tCPA\tGR1,GR0", "\tJZE\tE0DIV"]);
    assert_eq!(lines[divide + 1], "\tJOV\tEOVF");
    assert!(lines.contains(&"\tMULA\tGR1,GR2"));
    assert!(lines.contains(&"\tSUBA\tGR2,GR1"));
    assert_eq!(lines.iter().filter(|l| **l == "\tJOV\tEOVF").count(), 4);
}

#[test]
fn test_conversions() {
    let assembly = assemble(
        "program p;
         var i: integer; c: char; b: boolean;
         begin b := boolean(i); c := char(i); i := integer(c); b := not b end.",
    );
    let lines = program_lines(&assembly);

    for expected in [
        "\tJZE\tL0002",
        "\tJUMP\tL0003",
        "L0002\tLD\tGR1,GR0",
        "L0003\tPOP\tGR2",
        "\tLAD\tGR2,127",
        "\tAND\tGR1,GR2",
        "\tXOR\tGR1,ONE",
    ] {
        assert!(lines.contains(&expected), "missing {:?}", expected);
    }
}

#[test]
fn test_unknown_symbol_is_reported() {
    let program = HirProgram {
        name: "p".to_string(),
        symbols: SymbolArena::new(),
        globals: vec![SymbolId(3)],
        procedures: Vec::new(),
        body: Vec::new(),
    };

    assert_eq!(generate(&program), Err(CodegenError::UnknownSymbol { id: 3 }));
    assert_eq!(
        CodegenError::UnprintableValue { ty: Type::Error }.to_string(),
        "internal error: cannot write a value of type <error>"
    );
}
