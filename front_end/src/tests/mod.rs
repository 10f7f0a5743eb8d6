//! Tests for the front-end components: lexing, parsing, diagnostics
//! rendering and the source-level reports.

mod parser_tests;
mod errors;
