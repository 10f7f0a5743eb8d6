use crate::diagnostics_reporter::DiagnosticReporter;
use crate::parser::parse_source;
use crate::source_manager::SourceManager;

#[test]
fn test_source_manager_lines() {
    let manager = SourceManager::with_source("prog.mpl", "program p;\r\nbegin\rend.\n");

    assert_eq!(manager.name(), "prog.mpl");
    assert_eq!(manager.get_line(1), Some("program p;"));
    assert_eq!(manager.get_line(2), Some("begin"));
    assert_eq!(manager.get_line(3), Some("end."));
    assert_eq!(manager.get_line(0), None);
    assert_eq!(manager.get_line(9), None);
}

#[test]
fn test_snippet_has_gutter() {
    let manager = SourceManager::with_source("", "a\nb\nc\nd\ne\nf\ng\nh\ni\n  j := 1  ");
    assert_eq!(manager.get_snippet(10).as_deref(), Some("10 |   j := 1"));
    assert_eq!(manager.get_snippet(2).as_deref(), Some(" 2 | b"));
}

#[test]
fn test_report_includes_message_and_source_line() {
    let source = "program p;\nvar x : integer\nbegin end.";
    let err = parse_source(source).unwrap_err();

    let reporter = DiagnosticReporter::new(SourceManager::with_source("prog.mpl", source));
    let formatted = reporter.report_error(&err, err.line());

    assert!(formatted.contains("error"));
    assert!(formatted.contains("line 3: expected ';', found 'begin'"));
    assert!(formatted.contains("prog.mpl:3"));
    assert!(formatted.contains("3 | begin end."));
}

#[test]
fn test_report_without_matching_line_is_header_only() {
    let reporter = DiagnosticReporter::new(SourceManager::with_source("x.mpl", "begin"));
    let formatted = reporter.report_error(&"line 7: something", 7);
    assert!(formatted.contains("line 7: something"));
    assert!(!formatted.contains("-->"));
}
