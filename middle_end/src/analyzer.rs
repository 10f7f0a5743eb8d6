//! Semantic analysis: name resolution, type checking and lowering to HIR.
//!
//! The analyzer walks the syntax tree once in source order. Names are
//! resolved against the procedure's local scope first and the global scope
//! second; every successful lookup records the line in the entry's reference
//! list. Procedures become visible only once their declaration is reached.

use front_end::ast::{
    BinaryOp, Block, CompoundStatement, Declaration, Expression, Ident, OutputItem,
    ProcedureDeclaration, Program, Statement, TypeSpec, UnaryOp, Variable, VariableDeclaration,
};
use front_end::types::Type;
use snafu::ensure;

use crate::diagnostics::*;
use crate::hir::*;
use crate::symbol_table::{Scope, SymbolEntry};
use crate::xref::CrossReference;

/// Result of a successful analysis.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub program: HirProgram,
    pub xref: CrossReference,
}

/// Analyze a parsed program.
pub fn analyze(program: &Program) -> AnalysisResult<Analysis> {
    Analyzer::new().analyze_program(program)
}

pub struct Analyzer {
    symbols: SymbolArena,
    global: Scope,
    /// Scope of the procedure being analyzed, if any.
    local: Option<Scope>,
    loop_depth: usize,
    xref: CrossReference,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer {
    pub fn new() -> Self {
        Self {
            symbols: SymbolArena::new(),
            global: Scope::global(),
            local: None,
            loop_depth: 0,
            xref: CrossReference::new(),
        }
    }

    pub fn analyze_program(mut self, program: &Program) -> AnalysisResult<Analysis> {
        let (globals, procedures) = self.analyze_declarations(&program.block)?;
        let body = self.analyze_compound(&program.block.body)?;

        let global = std::mem::replace(&mut self.global, Scope::global());
        self.xref.add_scope(global);

        Ok(Analysis {
            program: HirProgram {
                name: program.name.name.clone(),
                symbols: self.symbols,
                globals,
                procedures,
                body,
            },
            xref: self.xref,
        })
    }

    fn analyze_declarations(
        &mut self,
        block: &Block,
    ) -> AnalysisResult<(Vec<SymbolId>, Vec<HirProcedure>)> {
        let mut globals = Vec::new();
        let mut procedures = Vec::new();
        for declaration in &block.declarations {
            match declaration {
                Declaration::Variables(vars) => globals.extend(self.declare_variables(vars)?),
                Declaration::Procedure(procedure) => {
                    procedures.push(self.analyze_procedure(procedure)?)
                }
            }
        }
        Ok((globals, procedures))
    }

    fn declare_variables(&mut self, vars: &VariableDeclaration) -> AnalysisResult<Vec<SymbolId>> {
        let mut ids = Vec::new();
        for group in &vars.groups {
            let ty = match group.typ {
                TypeSpec::Standard(std) => std.to_type(),
                TypeSpec::Array { size, element, .. } => Type::Array { element, size },
            };
            for name in &group.names {
                ids.push(self.declare(name, ty.clone(), false)?);
            }
        }
        Ok(ids)
    }

    /// Declare `name` in the innermost scope.
    fn declare(&mut self, name: &Ident, ty: Type, is_param: bool) -> AnalysisResult<SymbolId> {
        let scope = self.local.as_mut().unwrap_or(&mut self.global);
        let owner = scope.owner().map(str::to_string);
        let id = self.symbols.push(SymbolInfo {
            name: name.name.clone(),
            owner: owner.clone(),
            ty: ty.clone(),
            is_param,
            def_line: name.line,
        });
        let declared = scope.declare(SymbolEntry {
            id,
            name: name.name.clone(),
            owner,
            ty,
            is_param,
            def_line: name.line,
            refs: Vec::new(),
        });
        ensure!(
            declared,
            RedeclaredSnafu {
                name: name.name.clone(),
                line: name.line,
            }
        );
        Ok(id)
    }

    fn analyze_procedure(&mut self, procedure: &ProcedureDeclaration) -> AnalysisResult<HirProcedure> {
        let name = &procedure.name;
        ensure!(
            !self.global.contains(&name.name),
            ProcedureNameClashSnafu {
                name: name.name.clone(),
                line: name.line,
            }
        );

        let param_types: Vec<Type> = procedure
            .params
            .iter()
            .flat_map(|group| group.names.iter().map(|_| group.typ.to_type()))
            .collect();
        let symbol = self.declare(name, Type::Procedure(param_types), false)?;

        self.local = Some(Scope::procedure(&name.name));
        let result = self.analyze_procedure_body(procedure, symbol);
        if let Some(scope) = self.local.take() {
            self.xref.add_scope(scope);
        }
        result
    }

    fn analyze_procedure_body(
        &mut self,
        procedure: &ProcedureDeclaration,
        symbol: SymbolId,
    ) -> AnalysisResult<HirProcedure> {
        let mut params = Vec::new();
        for group in &procedure.params {
            for name in &group.names {
                params.push(self.declare(name, group.typ.to_type(), true)?);
            }
        }
        let locals = match &procedure.variables {
            Some(vars) => self.declare_variables(vars)?,
            None => Vec::new(),
        };
        let body = self.analyze_compound(&procedure.body)?;
        Ok(HirProcedure {
            symbol,
            params,
            locals,
            body,
        })
    }

    fn current_procedure(&self) -> Option<&str> {
        self.local.as_ref().and_then(Scope::owner)
    }

    /// Find `name` (local scope first) and record a reference on `line`.
    fn resolve(&mut self, name: &Ident) -> AnalysisResult<(SymbolId, Type)> {
        let line = name.line;
        let entry = self.lookup_mut(&name.name).ok_or_else(|| SemanticError::UndefinedName {
            name: name.name.clone(),
            line,
        })?;
        entry.add_reference(line);
        Ok((entry.id, entry.ty.clone()))
    }

    /// Local scope first, then global.
    fn lookup_mut(&mut self, name: &str) -> Option<&mut SymbolEntry> {
        match self.local.as_mut().and_then(|scope| scope.lookup_mut(name)) {
            Some(entry) => Some(entry),
            None => self.global.lookup_mut(name),
        }
    }

    fn analyze_compound(&mut self, compound: &CompoundStatement) -> AnalysisResult<Vec<HirStatement>> {
        let mut statements = Vec::new();
        for statement in &compound.statements {
            if matches!(statement, Statement::Empty) {
                continue;
            }
            statements.push(self.analyze_statement(statement)?);
        }
        Ok(statements)
    }

    fn analyze_statement(&mut self, statement: &Statement) -> AnalysisResult<HirStatement> {
        match statement {
            Statement::Assignment {
                target,
                value,
                line,
            } => {
                let place = self.analyze_place(target)?;
                ensure!(
                    place.ty.is_standard(),
                    AssignToNonScalarSnafu {
                        name: target.name.name.clone(),
                        ty: place.ty.clone(),
                        line: *line,
                    }
                );
                let value = self.analyze_expression(value)?;
                ensure!(
                    value.ty == place.ty,
                    AssignmentMismatchSnafu {
                        target: place.ty.clone(),
                        value: value.ty.clone(),
                        line: *line,
                    }
                );
                Ok(HirStatement::Assign {
                    target: place,
                    value,
                })
            }
            Statement::If {
                condition,
                then_branch,
                else_branch,
                ..
            } => {
                let condition = self.analyze_condition(condition)?;
                let then_branch = Box::new(self.analyze_statement(then_branch)?);
                let else_branch = match else_branch {
                    Some(branch) => Some(Box::new(self.analyze_statement(branch)?)),
                    None => None,
                };
                Ok(HirStatement::If {
                    condition,
                    then_branch,
                    else_branch,
                })
            }
            Statement::While { condition, body, .. } => {
                let condition = self.analyze_condition(condition)?;
                self.loop_depth += 1;
                let body = self.analyze_statement(body);
                self.loop_depth -= 1;
                Ok(HirStatement::While {
                    condition,
                    body: Box::new(body?),
                })
            }
            Statement::Break { line } => {
                ensure!(self.loop_depth > 0, BreakOutsideLoopSnafu { line: *line });
                Ok(HirStatement::Break)
            }
            Statement::Call { name, arguments } => self.analyze_call(name, arguments),
            Statement::Return { .. } => Ok(HirStatement::Return),
            Statement::Read {
                newline,
                targets,
                line,
            } => {
                let mut places = Vec::new();
                for target in targets {
                    let place = self.analyze_place(target)?;
                    ensure!(
                        matches!(place.ty, Type::Int | Type::Char),
                        UnreadableTargetSnafu {
                            found: place.ty.clone(),
                            line: *line,
                        }
                    );
                    places.push(place);
                }
                Ok(HirStatement::Read {
                    newline: *newline,
                    targets: places,
                })
            }
            Statement::Write { newline, items, .. } => {
                let mut outputs = Vec::new();
                for item in items {
                    outputs.push(match item {
                        OutputItem::Text { value, .. } => HirOutput::Text(value.clone()),
                        OutputItem::Value { expr, width } => HirOutput::Value {
                            expr: self.analyze_expression(expr)?,
                            width: *width,
                        },
                    });
                }
                Ok(HirStatement::Write {
                    newline: *newline,
                    items: outputs,
                })
            }
            Statement::Compound(compound) => Ok(HirStatement::Block(self.analyze_compound(compound)?)),
            Statement::Empty => Ok(HirStatement::Block(Vec::new())),
        }
    }

    fn analyze_condition(&mut self, condition: &Expression) -> AnalysisResult<HirExpr> {
        let line = condition.line();
        let condition = self.analyze_expression(condition)?;
        ensure!(
            condition.ty == Type::Bool,
            ConditionNotBooleanSnafu {
                found: condition.ty.clone(),
                line,
            }
        );
        Ok(condition)
    }

    fn analyze_call(&mut self, name: &Ident, arguments: &[Expression]) -> AnalysisResult<HirStatement> {
        let line = name.line;
        ensure!(
            self.current_procedure() != Some(name.name.as_str()),
            RecursiveCallSnafu {
                name: name.name.clone(),
                line,
            }
        );

        let entry = self.lookup_mut(&name.name).ok_or_else(|| {
            SemanticError::UndefinedProcedure {
                name: name.name.clone(),
                line,
            }
        })?;
        entry.add_reference(line);
        let procedure = entry.id;
        let Type::Procedure(param_types) = entry.ty.clone() else {
            return NotAProcedureSnafu {
                name: name.name.clone(),
                line,
            }
            .fail();
        };

        ensure!(
            arguments.len() <= param_types.len(),
            TooManyArgumentsSnafu {
                name: name.name.clone(),
                expected: param_types.len(),
                found: arguments.len(),
                line,
            }
        );
        ensure!(
            arguments.len() >= param_types.len(),
            TooFewArgumentsSnafu {
                name: name.name.clone(),
                expected: param_types.len(),
                found: arguments.len(),
                line,
            }
        );

        let mut hir_arguments = Vec::new();
        for (position, (argument, expected)) in arguments.iter().zip(&param_types).enumerate() {
            let (hir_argument, found) = match argument {
                Expression::Variable(variable) => {
                    let place = self.analyze_place(variable)?;
                    let ty = place.ty.clone();
                    (HirArgument::Address(place), ty)
                }
                other => {
                    let expr = self.analyze_expression(other)?;
                    let ty = expr.ty.clone();
                    (HirArgument::Value(expr), ty)
                }
            };
            ensure!(
                found == *expected,
                ArgumentMismatchSnafu {
                    name: name.name.clone(),
                    position: position + 1,
                    expected: expected.clone(),
                    found,
                    line,
                }
            );
            hir_arguments.push(hir_argument);
        }

        Ok(HirStatement::Call {
            procedure,
            arguments: hir_arguments,
        })
    }

    /// Resolve a variable reference to a storage location. An unindexed
    /// array or procedure name is returned as-is; callers decide whether
    /// that is acceptable.
    fn analyze_place(&mut self, variable: &Variable) -> AnalysisResult<HirPlace> {
        let (symbol, ty) = self.resolve(&variable.name)?;
        let Some(index) = &variable.index else {
            return Ok(HirPlace {
                symbol,
                index: None,
                ty,
            });
        };

        let Some(element) = ty.element_type() else {
            return NotAnArraySnafu {
                name: variable.name.name.clone(),
                ty,
                line: variable.name.line,
            }
            .fail();
        };
        let index_line = index.line();
        let index = self.analyze_expression(index)?;
        ensure!(
            index.ty == Type::Int,
            IndexNotIntegerSnafu {
                found: index.ty.clone(),
                line: index_line,
            }
        );
        Ok(HirPlace {
            symbol,
            index: Some(Box::new(index)),
            ty: element,
        })
    }

    pub fn analyze_expression(&mut self, expr: &Expression) -> AnalysisResult<HirExpr> {
        match expr {
            Expression::Variable(variable) => {
                let place = self.analyze_place(variable)?;
                ensure!(
                    place.ty.is_standard(),
                    NotAValueSnafu {
                        name: variable.name.name.clone(),
                        ty: place.ty.clone(),
                        line: variable.name.line,
                    }
                );
                let ty = place.ty.clone();
                Ok(HirExpr {
                    kind: HirExprKind::Load(place),
                    ty,
                })
            }
            Expression::Number { value, .. } => Ok(HirExpr {
                kind: HirExprKind::Int(*value),
                ty: Type::Int,
            }),
            Expression::Boolean { value, .. } => Ok(HirExpr {
                kind: HirExprKind::Bool(*value),
                ty: Type::Bool,
            }),
            Expression::Str { value, line } => {
                let mut chars = value.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(HirExpr {
                        kind: HirExprKind::Char(c as u32 as u16),
                        ty: Type::Char,
                    }),
                    _ => StringInExpressionSnafu {
                        value: value.clone(),
                        line: *line,
                    }
                    .fail(),
                }
            }
            Expression::Paren(inner) => self.analyze_expression(inner),
            Expression::Not { operand, line } => {
                let operand = self.analyze_expression(operand)?;
                self.expect_operand("not", Type::Bool, &operand, *line)?;
                Ok(HirExpr {
                    kind: HirExprKind::Not(Box::new(operand)),
                    ty: Type::Bool,
                })
            }
            Expression::Unary {
                operator,
                operand,
                line,
            } => {
                let operand = self.analyze_expression(operand)?;
                match operator {
                    UnaryOp::Plus => {
                        self.expect_operand("+", Type::Int, &operand, *line)?;
                        Ok(operand)
                    }
                    UnaryOp::Minus => {
                        self.expect_operand("-", Type::Int, &operand, *line)?;
                        Ok(HirExpr {
                            kind: HirExprKind::Negate(Box::new(operand)),
                            ty: Type::Int,
                        })
                    }
                }
            }
            Expression::Binary {
                left,
                operator,
                right,
                line,
            } => self.analyze_binary(left, *operator, right, *line),
            Expression::Cast {
                target,
                operand,
                line,
            } => {
                let operand = self.analyze_expression(operand)?;
                ensure!(
                    operand.ty.is_standard(),
                    InvalidCastSnafu {
                        target: *target,
                        found: operand.ty.clone(),
                        line: *line,
                    }
                );
                Ok(HirExpr {
                    kind: HirExprKind::Cast {
                        target: *target,
                        operand: Box::new(operand),
                    },
                    ty: target.to_type(),
                })
            }
        }
    }

    fn analyze_binary(
        &mut self,
        left: &Expression,
        operator: BinaryOp,
        right: &Expression,
        line: usize,
    ) -> AnalysisResult<HirExpr> {
        let left = self.analyze_expression(left)?;
        let right = self.analyze_expression(right)?;

        let ty = if operator.is_relational() {
            ensure!(
                left.ty.is_standard() && left.ty == right.ty,
                RelationalMismatchSnafu {
                    operator: operator.symbol(),
                    left: left.ty.clone(),
                    right: right.ty.clone(),
                    line,
                }
            );
            Type::Bool
        } else {
            let operand_type = match operator {
                BinaryOp::And | BinaryOp::Or => Type::Bool,
                _ => Type::Int,
            };
            self.expect_operand(operator.symbol(), operand_type.clone(), &left, line)?;
            self.expect_operand(operator.symbol(), operand_type.clone(), &right, line)?;
            operand_type
        };

        Ok(HirExpr {
            kind: HirExprKind::Binary {
                operator,
                left: Box::new(left),
                right: Box::new(right),
            },
            ty,
        })
    }

    fn expect_operand(
        &self,
        operator: &str,
        expected: Type,
        operand: &HirExpr,
        line: usize,
    ) -> AnalysisResult<()> {
        ensure!(
            operand.ty == expected,
            OperatorTypeSnafu {
                operator,
                expected,
                found: operand.ty.clone(),
                line,
            }
        );
        Ok(())
    }
}
