pub mod token;
pub mod lexer;
pub mod ast;
pub mod types;
pub mod parser;
pub mod error;
pub mod source_manager;
pub mod diagnostics_reporter;
pub mod token_stats;
pub mod pretty_print;

#[cfg(test)]
mod tests;
