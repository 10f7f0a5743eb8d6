pub mod analyzer;
pub mod diagnostics;
pub mod hir;
pub mod symbol_export;
pub mod symbol_table;
pub mod xref;

pub use analyzer::{analyze, Analysis};
pub use diagnostics::{AnalysisResult, SemanticError};

#[cfg(test)]
mod tests;
