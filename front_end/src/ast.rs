use crate::types::StdType;

/// A name together with the line it appeared on.
#[derive(Debug, PartialEq, Clone)]
pub struct Ident {
    pub name: String,
    pub line: usize,
}

#[derive(Debug, PartialEq, Clone)]
pub struct Program {
    pub name: Ident,
    pub block: Block,
}

#[derive(Debug, PartialEq, Clone)]
pub struct Block {
    /// `var` sections and procedures, in source order.
    pub declarations: Vec<Declaration>,
    pub body: CompoundStatement,
}

#[derive(Debug, PartialEq, Clone)]
pub enum Declaration {
    Variables(VariableDeclaration),
    Procedure(ProcedureDeclaration),
}

/// One `var` section: a list of `names : type ;` groups.
#[derive(Debug, PartialEq, Clone)]
pub struct VariableDeclaration {
    pub line: usize,
    pub groups: Vec<VariableGroup>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct VariableGroup {
    pub names: Vec<Ident>,
    pub typ: TypeSpec,
}

#[derive(Debug, PartialEq, Clone)]
pub enum TypeSpec {
    Standard(StdType),
    Array { size: u16, element: StdType, line: usize },
}

#[derive(Debug, PartialEq, Clone)]
pub struct ParameterGroup {
    pub names: Vec<Ident>,
    pub typ: StdType,
}

#[derive(Debug, PartialEq, Clone)]
pub struct ProcedureDeclaration {
    pub name: Ident,
    pub params: Vec<ParameterGroup>,
    pub variables: Option<VariableDeclaration>,
    pub body: CompoundStatement,
}

#[derive(Debug, PartialEq, Clone)]
pub struct CompoundStatement {
    pub line: usize,
    pub statements: Vec<Statement>,
}

/// A variable reference, optionally indexed: `a` or `a[i + 1]`.
#[derive(Debug, PartialEq, Clone)]
pub struct Variable {
    pub name: Ident,
    pub index: Option<Box<Expression>>,
}

#[derive(Debug, PartialEq, Clone)]
pub enum OutputItem {
    /// A string literal whose length is not 1.
    Text { value: String, line: usize },
    Value { expr: Expression, width: Option<u16> },
}

#[derive(Debug, PartialEq, Clone)]
pub enum Statement {
    Assignment {
        target: Variable,
        value: Expression,
        line: usize,
    },
    If {
        condition: Expression,
        then_branch: Box<Statement>,
        else_branch: Option<Box<Statement>>,
        line: usize,
    },
    While {
        condition: Expression,
        body: Box<Statement>,
        line: usize,
    },
    Break { line: usize },
    Call {
        name: Ident,
        arguments: Vec<Expression>,
    },
    Return { line: usize },
    Read {
        newline: bool,
        targets: Vec<Variable>,
        line: usize,
    },
    Write {
        newline: bool,
        items: Vec<OutputItem>,
        line: usize,
    },
    Compound(CompoundStatement),
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Plus,
    Minus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    // multiplicative
    Mul,
    Div,
    And,
    // additive
    Add,
    Sub,
    Or,
    // relational
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Mul => "*",
            BinaryOp::Div => "div",
            BinaryOp::And => "and",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Or => "or",
            BinaryOp::Equal => "=",
            BinaryOp::NotEqual => "<>",
            BinaryOp::Less => "<",
            BinaryOp::LessEqual => "<=",
            BinaryOp::Greater => ">",
            BinaryOp::GreaterEqual => ">=",
        }
    }

    pub fn is_relational(self) -> bool {
        matches!(
            self,
            BinaryOp::Equal
                | BinaryOp::NotEqual
                | BinaryOp::Less
                | BinaryOp::LessEqual
                | BinaryOp::Greater
                | BinaryOp::GreaterEqual
        )
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum Expression {
    Variable(Variable),
    Number { value: u16, line: usize },
    Boolean { value: bool, line: usize },
    /// Any string literal in expression position; only length 1 is legal.
    Str { value: String, line: usize },
    Paren(Box<Expression>),
    Not {
        operand: Box<Expression>,
        line: usize,
    },
    Unary {
        operator: UnaryOp,
        operand: Box<Expression>,
        line: usize,
    },
    Binary {
        left: Box<Expression>,
        operator: BinaryOp,
        right: Box<Expression>,
        line: usize,
    },
    /// `integer(e)`, `boolean(e)`, `char(e)`.
    Cast {
        target: StdType,
        operand: Box<Expression>,
        line: usize,
    },
}

impl Expression {
    /// Line of the first token of the expression.
    pub fn line(&self) -> usize {
        match self {
            Expression::Variable(v) => v.name.line,
            Expression::Number { line, .. }
            | Expression::Boolean { line, .. }
            | Expression::Str { line, .. }
            | Expression::Not { line, .. }
            | Expression::Unary { line, .. }
            | Expression::Cast { line, .. } => *line,
            Expression::Binary { left, .. } => left.line(),
            Expression::Paren(inner) => inner.line(),
        }
    }
}
