//! HIR Type Definitions

use front_end::ast::BinaryOp;
use front_end::types::{StdType, Type};

use super::symbols::{SymbolArena, SymbolId};

#[derive(Debug, Clone, PartialEq)]
pub struct HirProgram {
    pub name: String,
    pub symbols: SymbolArena,
    /// Global variables in declaration order.
    pub globals: Vec<SymbolId>,
    pub procedures: Vec<HirProcedure>,
    pub body: Vec<HirStatement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HirProcedure {
    pub symbol: SymbolId,
    /// Formal parameters in declaration order.
    pub params: Vec<SymbolId>,
    pub locals: Vec<SymbolId>,
    pub body: Vec<HirStatement>,
}

/// A storage location: a scalar variable, or one element of an array.
#[derive(Debug, Clone, PartialEq)]
pub struct HirPlace {
    pub symbol: SymbolId,
    pub index: Option<Box<HirExpr>>,
    /// Type of the value stored at this place.
    pub ty: Type,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HirExpr {
    pub kind: HirExprKind,
    pub ty: Type,
}

#[derive(Debug, Clone, PartialEq)]
pub enum HirExprKind {
    Load(HirPlace),
    Int(u16),
    Bool(bool),
    /// Character constant, as its code.
    Char(u16),
    Not(Box<HirExpr>),
    Negate(Box<HirExpr>),
    Binary {
        operator: BinaryOp,
        left: Box<HirExpr>,
        right: Box<HirExpr>,
    },
    Cast {
        target: StdType,
        operand: Box<HirExpr>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum HirArgument {
    /// A bare variable: its address is passed.
    Address(HirPlace),
    /// Any other expression: evaluated into a temporary whose address is passed.
    Value(HirExpr),
}

#[derive(Debug, Clone, PartialEq)]
pub enum HirOutput {
    Text(String),
    Value { expr: HirExpr, width: Option<u16> },
}

#[derive(Debug, Clone, PartialEq)]
pub enum HirStatement {
    Assign {
        target: HirPlace,
        value: HirExpr,
    },
    If {
        condition: HirExpr,
        then_branch: Box<HirStatement>,
        else_branch: Option<Box<HirStatement>>,
    },
    While {
        condition: HirExpr,
        body: Box<HirStatement>,
    },
    Break,
    Call {
        procedure: SymbolId,
        arguments: Vec<HirArgument>,
    },
    Return,
    Read {
        newline: bool,
        targets: Vec<HirPlace>,
    },
    Write {
        newline: bool,
        items: Vec<HirOutput>,
    },
    Block(Vec<HirStatement>),
}
