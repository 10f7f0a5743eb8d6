//! Tests for the middle-end components
//!
//! Symbol tables, semantic analysis, the HIR it produces and the
//! cross-reference and symbol reports derived from it.

mod symbol_table_tests;
mod analyzer_tests;
mod xref_tests;

use front_end::parser::parse_source;

use crate::{analyze, Analysis, SemanticError};

pub(crate) fn analyze_source(source: &str) -> Result<Analysis, SemanticError> {
    let program = parse_source(source).expect("test program should parse");
    analyze(&program)
}
