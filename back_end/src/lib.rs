//! CASL II back end.
//!
//! Turns the resolved program tree from `middle_end` into assembly text for
//! the COMET II machine, followed by the runtime support library.

use front_end::types::Type;
use snafu::Snafu;

pub mod casl;
pub mod codegen;
pub mod emitter;
pub mod runtime;

pub use codegen::{generate, CodeGenerator};

/// Inconsistencies between the analysed tree and what generation expects.
/// None of these is reachable from a program that passed analysis.
#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum CodegenError {
    #[snafu(display("internal error: symbol #{id} is not in the symbol table"))]
    UnknownSymbol { id: usize },

    #[snafu(display("internal error: '{name}' is indexed but is not an array"))]
    NotAnArray { name: String },

    #[snafu(display("internal error: '{name}' is called but is not a procedure"))]
    NotAProcedure { name: String },

    #[snafu(display("internal error: cannot write a value of type {ty}"))]
    UnprintableValue { ty: Type },

    #[snafu(display("internal error: cannot read a value of type {ty}"))]
    UnreadableValue { ty: Type },

    #[snafu(display("internal error: 'break' outside of a loop"))]
    BreakOutsideLoop,
}

pub type CodegenResult<T> = Result<T, CodegenError>;

#[cfg(test)]
mod tests;
