//! High-level Intermediate Representation (HIR)
//!
//! The analyzer lowers the syntax tree into this resolved, typed form: every
//! name is replaced by a `SymbolId` into the program's symbol arena and every
//! expression carries its type. The code generator consumes nothing else.

pub mod symbols;
pub mod types;

pub use symbols::{SymbolArena, SymbolId, SymbolInfo};
pub use types::{
    HirArgument, HirExpr, HirExprKind, HirOutput, HirPlace, HirProcedure, HirProgram,
    HirStatement,
};
