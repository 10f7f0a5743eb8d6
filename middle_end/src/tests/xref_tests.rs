use front_end::types::{StdType, Type};

use super::analyze_source;

const SOURCE: &str = "program xref;
var n : integer;
    c : char;
    b : boolean;
    a : array[5] of integer;
procedure show(v : integer);
var n : char;
begin
    n := 'x';
    writeln(v, n)
end;
begin
    read(n);
    c := 'q';
    b := n > 1;
    a[n] := n;
    a[n] := n;
    call show(a[1])
end.";

#[test]
fn test_scalar_entries_round_trip() {
    let xref = analyze_source(SOURCE).unwrap().xref;

    let n = xref.find("n", None).unwrap();
    assert_eq!(n.ty, Type::Int);
    assert_eq!(n.def_line, 2);
    assert_eq!(n.refs, vec![13, 15, 16, 17]);

    let c = xref.find("c", None).unwrap();
    assert_eq!(c.ty, Type::Char);
    assert_eq!(c.def_line, 3);
    assert_eq!(c.refs, vec![14]);

    let b = xref.find("b", None).unwrap();
    assert_eq!(b.ty, Type::Bool);
    assert_eq!(b.refs, vec![15]);
}

#[test]
fn test_array_and_procedure_entries() {
    let xref = analyze_source(SOURCE).unwrap().xref;

    let a = xref.find("a", None).unwrap();
    assert_eq!(
        a.ty,
        Type::Array {
            element: StdType::Integer,
            size: 5
        }
    );
    assert_eq!(a.refs, vec![16, 17, 18]);

    let show = xref.find("show", None).unwrap();
    assert_eq!(show.ty, Type::Procedure(vec![Type::Int]));
    assert_eq!(show.def_line, 6);
    assert_eq!(show.refs, vec![18]);

    let v = xref.find("v", Some("show")).unwrap();
    assert_eq!(v.refs, vec![10]);
    let local_n = xref.find("n", Some("show")).unwrap();
    assert_eq!(local_n.ty, Type::Char);
    assert_eq!(local_n.refs, vec![9, 10]);
}

#[test]
fn test_entries_sorted_by_name_then_owner() {
    let xref = analyze_source(SOURCE).unwrap().xref;
    let keys: Vec<(String, Option<String>)> = xref
        .entries()
        .iter()
        .map(|e| (e.name.clone(), e.owner.clone()))
        .collect();

    let show = Some("show".to_string());
    assert_eq!(
        keys,
        vec![
            ("a".to_string(), None),
            ("b".to_string(), None),
            ("c".to_string(), None),
            ("n".to_string(), None),
            ("n".to_string(), show.clone()),
            ("show".to_string(), None),
            ("v".to_string(), show),
        ]
    );
}

#[test]
fn test_report_lines() {
    let report = analyze_source(SOURCE).unwrap().xref.to_string();
    let lines: Vec<&str> = report.lines().collect();

    assert_eq!(lines[0], "a|array[5] of integer|5|16,17,18");
    assert_eq!(lines[4], "n:show|char|7|9,10");
    assert_eq!(lines[5], "show|procedure(integer)|6|18");
    assert_eq!(lines.len(), 7);
}

#[test]
fn test_unreferenced_name_has_empty_reference_list() {
    let report = analyze_source("program p; var unused : integer; begin end.")
        .unwrap()
        .xref
        .to_string();
    assert_eq!(report, "unused|integer|1|\n");
}
