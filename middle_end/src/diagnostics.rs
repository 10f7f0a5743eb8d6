//! Semantic errors reported by the analyzer.
//!
//! Analysis stops at the first error; every variant carries the source line
//! it refers to.

use front_end::types::{StdType, Type};
use snafu::Snafu;

#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum SemanticError {
    #[snafu(display("line {line}: undefined name '{name}'"))]
    UndefinedName { name: String, line: usize },

    #[snafu(display("line {line}: undefined procedure '{name}'"))]
    UndefinedProcedure { name: String, line: usize },

    #[snafu(display("line {line}: '{name}' is already declared in this scope"))]
    Redeclared { name: String, line: usize },

    #[snafu(display("line {line}: procedure name '{name}' is already defined"))]
    ProcedureNameClash { name: String, line: usize },

    #[snafu(display("line {line}: operator '{operator}' expects {expected} operands, found {found}"))]
    OperatorType {
        operator: String,
        expected: Type,
        found: Type,
        line: usize,
    },

    #[snafu(display(
        "line {line}: operands of '{operator}' must have the same standard type, found {left} and {right}"
    ))]
    RelationalMismatch {
        operator: String,
        left: Type,
        right: Type,
        line: usize,
    },

    #[snafu(display("line {line}: type mismatch in assignment, cannot assign {value} to {target}"))]
    AssignmentMismatch {
        target: Type,
        value: Type,
        line: usize,
    },

    #[snafu(display("line {line}: cannot assign to '{name}' of type {ty}"))]
    AssignToNonScalar { name: String, ty: Type, line: usize },

    #[snafu(display("line {line}: array index must be integer, found {found}"))]
    IndexNotInteger { found: Type, line: usize },

    #[snafu(display("line {line}: '{name}' of type {ty} cannot be indexed"))]
    NotAnArray { name: String, ty: Type, line: usize },

    #[snafu(display("line {line}: '{name}' of type {ty} cannot be used as a value"))]
    NotAValue { name: String, ty: Type, line: usize },

    #[snafu(display("line {line}: cannot convert {found} to {target}"))]
    InvalidCast {
        target: StdType,
        found: Type,
        line: usize,
    },

    #[snafu(display("line {line}: condition must be boolean, found {found}"))]
    ConditionNotBoolean { found: Type, line: usize },

    #[snafu(display("line {line}: '{name}' is not a procedure"))]
    NotAProcedure { name: String, line: usize },

    #[snafu(display("line {line}: too few arguments for procedure '{name}', expected {expected}, found {found}"))]
    TooFewArguments {
        name: String,
        expected: usize,
        found: usize,
        line: usize,
    },

    #[snafu(display("line {line}: too many arguments for procedure '{name}', expected {expected}, found {found}"))]
    TooManyArguments {
        name: String,
        expected: usize,
        found: usize,
        line: usize,
    },

    #[snafu(display(
        "line {line}: type mismatch in argument {position} of procedure '{name}', expected {expected}, found {found}"
    ))]
    ArgumentMismatch {
        name: String,
        position: usize,
        expected: Type,
        found: Type,
        line: usize,
    },

    #[snafu(display("line {line}: recursive call of procedure '{name}'"))]
    RecursiveCall { name: String, line: usize },

    #[snafu(display("line {line}: 'break' statement not within loop"))]
    BreakOutsideLoop { line: usize },

    #[snafu(display("line {line}: read target must be integer or char, found {found}"))]
    UnreadableTarget { found: Type, line: usize },

    #[snafu(display("line {line}: string '{value}' cannot be used in an expression"))]
    StringInExpression { value: String, line: usize },
}

impl SemanticError {
    pub fn line(&self) -> usize {
        use SemanticError::*;
        match self {
            UndefinedName { line, .. }
            | UndefinedProcedure { line, .. }
            | Redeclared { line, .. }
            | ProcedureNameClash { line, .. }
            | OperatorType { line, .. }
            | RelationalMismatch { line, .. }
            | AssignmentMismatch { line, .. }
            | AssignToNonScalar { line, .. }
            | IndexNotInteger { line, .. }
            | NotAnArray { line, .. }
            | NotAValue { line, .. }
            | InvalidCast { line, .. }
            | ConditionNotBoolean { line, .. }
            | NotAProcedure { line, .. }
            | TooFewArguments { line, .. }
            | TooManyArguments { line, .. }
            | ArgumentMismatch { line, .. }
            | RecursiveCall { line, .. }
            | BreakOutsideLoop { line }
            | UnreadableTarget { line, .. }
            | StringInExpression { line, .. } => *line,
        }
    }
}

pub type AnalysisResult<T> = Result<T, SemanticError>;
