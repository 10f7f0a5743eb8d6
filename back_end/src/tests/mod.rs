//! Tests for the CASL II back end

mod codegen_tests;

use front_end::parser::parse_source;
use middle_end::analyze;

use crate::generate;

/// Compile a program that is expected to be valid.
pub(crate) fn assemble(source: &str) -> String {
    let program = parse_source(source).expect("test program should parse");
    let analysis = analyze(&program).expect("test program should analyse");
    generate(&analysis.program).expect("test program should generate")
}

/// The generated lines up to (not including) the runtime library.
pub(crate) fn program_lines(assembly: &str) -> Vec<&str> {
    assembly
        .lines()
        .take_while(|line| !line.starts_with("; ----"))
        .collect()
}
