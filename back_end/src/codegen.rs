//! CASL II generation from the resolved program tree.
//!
//! Every expression leaves its value in `GR1`. `GR0` holds zero for the
//! whole run. Binary operators keep their left operand on the stack while
//! the right operand is evaluated, so nested expressions never clobber each
//! other.

use front_end::ast::BinaryOp;
use front_end::types::{StdType, Type};
use middle_end::hir::*;

use crate::casl::{address, pair, string_constant, Opcode, Reg};
use crate::emitter::{LabelAllocator, Section};
use crate::runtime::RUNTIME_LIBRARY;
use crate::{
    BreakOutsideLoopSnafu, CodegenResult, NotAProcedureSnafu, NotAnArraySnafu, UnknownSymbolSnafu,
    UnprintableValueSnafu, UnreadableValueSnafu,
};

use Reg::{GR0, GR1, GR2};

/// Generate a complete assembly file for an analysed program.
pub fn generate(program: &HirProgram) -> CodegenResult<String> {
    CodeGenerator::new(program).generate()
}

pub struct CodeGenerator<'p> {
    program: &'p HirProgram,
    labels: LabelAllocator,
    code: Section,
    /// Temporaries and string literals, emitted after the main program.
    constants: Section,
    /// Exit labels of the enclosing `while` loops, innermost last.
    loop_exits: Vec<String>,
    in_procedure: bool,
}

impl<'p> CodeGenerator<'p> {
    pub fn new(program: &'p HirProgram) -> Self {
        Self {
            program,
            labels: LabelAllocator::new(),
            code: Section::new(),
            constants: Section::new(),
            loop_exits: Vec::new(),
            in_procedure: false,
        }
    }

    pub fn generate(mut self) -> CodegenResult<String> {
        let program = self.program;
        let entry = self.labels.next_label();
        self.code
            .emit_labeled(format!("%%{}", program.name), Opcode::Start, &entry);

        for &id in &program.globals {
            self.emit_storage(id)?;
        }
        for procedure in &program.procedures {
            self.generate_procedure(procedure)?;
        }

        self.code.place_label(entry);
        self.code.emit(Opcode::Lad, address(GR0, "0", None));
        self.generate_statements(&program.body)?;
        self.emit_halt();

        let mut code = self.code;
        code.append(self.constants);

        let mut output = String::new();
        for line in code.finish() {
            output.push_str(&line.to_string());
            output.push('\n');
        }
        output.push_str(RUNTIME_LIBRARY);
        output.push_str(&format!("\t{}\n", Opcode::End));
        Ok(output)
    }

    fn symbol(&self, id: SymbolId) -> CodegenResult<&'p SymbolInfo> {
        let program = self.program;
        program
            .symbols
            .get(id)
            .ok_or_else(|| UnknownSymbolSnafu { id: id.0 }.build())
    }

    /// Reserve the storage cell(s) of a variable or parameter.
    fn emit_storage(&mut self, id: SymbolId) -> CodegenResult<()> {
        let info = self.symbol(id)?;
        match &info.ty {
            Type::Array { size, .. } => self.code.emit_labeled(info.label(), Opcode::Ds, size),
            _ => self.code.emit_labeled(info.label(), Opcode::Dc, 0),
        }
        Ok(())
    }

    fn generate_procedure(&mut self, procedure: &HirProcedure) -> CodegenResult<()> {
        let info = self.symbol(procedure.symbol)?;
        for &id in procedure.params.iter().chain(&procedure.locals) {
            self.emit_storage(id)?;
        }

        self.code.place_label(info.label());
        if !procedure.params.is_empty() {
            // The return address sits above the arguments.
            self.code.emit(Opcode::Pop, GR2);
            for &id in procedure.params.iter().rev() {
                let param = self.symbol(id)?;
                self.code.emit(Opcode::Pop, GR1);
                self.code.emit(Opcode::St, address(GR1, &param.label(), None));
            }
            self.push(GR2);
        }

        self.in_procedure = true;
        self.generate_statements(&procedure.body)?;
        self.in_procedure = false;
        self.code.emit(Opcode::Ret, "");
        Ok(())
    }

    fn emit_halt(&mut self) {
        self.code.emit(Opcode::Call, "FLUSH");
        self.code.emit(Opcode::Svc, 0);
    }

    fn generate_statements(&mut self, statements: &[HirStatement]) -> CodegenResult<()> {
        for statement in statements {
            self.generate_statement(statement)?;
        }
        Ok(())
    }

    fn generate_statement(&mut self, statement: &HirStatement) -> CodegenResult<()> {
        match statement {
            HirStatement::Assign { target, value } => {
                self.load_address(target)?;
                self.push(GR1);
                self.generate_expression(value)?;
                self.code.emit(Opcode::Pop, GR2);
                self.code.emit(Opcode::St, address(GR1, "0", Some(GR2)));
            }
            HirStatement::If {
                condition,
                then_branch,
                else_branch,
            } => {
                self.generate_expression(condition)?;
                self.code.emit(Opcode::Cpa, pair(GR1, GR0));
                let else_label = self.labels.next_label();
                self.code.emit(Opcode::Jze, &else_label);
                self.generate_statement(then_branch)?;
                match else_branch {
                    Some(else_branch) => {
                        let end_label = self.labels.next_label();
                        self.code.emit(Opcode::Jump, &end_label);
                        self.code.place_label(else_label);
                        self.generate_statement(else_branch)?;
                        self.code.place_label(end_label);
                    }
                    None => self.code.place_label(else_label),
                }
            }
            HirStatement::While { condition, body } => {
                let top = self.labels.next_label();
                let bottom = self.labels.next_label();
                self.code.place_label(top.clone());
                self.generate_expression(condition)?;
                self.code.emit(Opcode::Cpa, pair(GR1, GR0));
                self.code.emit(Opcode::Jze, &bottom);
                self.loop_exits.push(bottom.clone());
                self.generate_statement(body)?;
                self.loop_exits.pop();
                self.code.emit(Opcode::Jump, top);
                self.code.place_label(bottom);
            }
            HirStatement::Break => {
                let exit = self
                    .loop_exits
                    .last()
                    .cloned()
                    .ok_or_else(|| BreakOutsideLoopSnafu.build())?;
                self.code.emit(Opcode::Jump, exit);
            }
            HirStatement::Call {
                procedure,
                arguments,
            } => self.generate_call(*procedure, arguments)?,
            HirStatement::Return => {
                if self.in_procedure {
                    self.code.emit(Opcode::Ret, "");
                } else {
                    self.emit_halt();
                }
            }
            HirStatement::Read { newline, targets } => {
                for target in targets {
                    let routine = match target.ty {
                        Type::Int => "READINT",
                        Type::Char => "READCHAR",
                        ref ty => return UnreadableValueSnafu { ty: ty.clone() }.fail(),
                    };
                    self.load_address(target)?;
                    self.code.emit(Opcode::Call, routine);
                }
                if *newline {
                    self.code.emit(Opcode::Call, "READLINE");
                }
            }
            HirStatement::Write { newline, items } => {
                for item in items {
                    self.generate_output(item)?;
                }
                if *newline {
                    self.code.emit(Opcode::Call, "WRITELINE");
                }
            }
            HirStatement::Block(statements) => self.generate_statements(statements)?,
        }
        Ok(())
    }

    fn generate_call(&mut self, procedure: SymbolId, arguments: &[HirArgument]) -> CodegenResult<()> {
        let info = self.symbol(procedure)?;
        if !matches!(info.ty, Type::Procedure(_)) {
            return NotAProcedureSnafu {
                name: info.name.clone(),
            }
            .fail();
        }

        for argument in arguments {
            match argument {
                HirArgument::Address(place) => self.load_address(place)?,
                HirArgument::Value(expr) => {
                    self.generate_expression(expr)?;
                    let temp = self.labels.next_label();
                    self.constants.emit_labeled(temp.clone(), Opcode::Dc, 0);
                    self.code.emit(Opcode::St, address(GR1, &temp, None));
                    self.code.emit(Opcode::Lad, address(GR1, &temp, None));
                }
            }
            self.push(GR1);
        }
        self.code.emit(Opcode::Call, info.label());
        Ok(())
    }

    fn generate_output(&mut self, item: &HirOutput) -> CodegenResult<()> {
        match item {
            HirOutput::Text(text) => {
                let label = self.labels.next_label();
                if text.is_empty() {
                    self.constants.emit_labeled(label.clone(), Opcode::Dc, 0);
                } else {
                    self.constants
                        .emit_labeled(label.clone(), Opcode::Dc, string_constant(text));
                    self.constants.emit(Opcode::Dc, 0);
                }
                self.code.emit(Opcode::Lad, address(GR1, &label, None));
                self.code.emit(Opcode::Ld, pair(GR2, GR0));
                self.code.emit(Opcode::Call, "WRITESTR");
            }
            HirOutput::Value { expr, width } => {
                let routine = match expr.ty {
                    Type::Int => "WRITEINT",
                    Type::Bool => "WRITEBOOL",
                    Type::Char => "WRITECHAR",
                    ref ty => return UnprintableValueSnafu { ty: ty.clone() }.fail(),
                };
                self.generate_expression(expr)?;
                match width {
                    Some(width) => self.code.emit(Opcode::Lad, address(GR2, &width.to_string(), None)),
                    None => self.code.emit(Opcode::Ld, pair(GR2, GR0)),
                }
                self.code.emit(Opcode::Call, routine);
            }
        }
        Ok(())
    }

    fn push(&mut self, reg: Reg) {
        self.code.emit(Opcode::Push, format!("0,{}", reg));
    }

    /// Leave the address of `place` in `GR1`, range-checking any index.
    fn load_address(&mut self, place: &HirPlace) -> CodegenResult<()> {
        let info = self.symbol(place.symbol)?;
        let label = info.label();
        match &place.index {
            Some(index) => {
                let Type::Array { size, .. } = info.ty else {
                    return NotAnArraySnafu {
                        name: info.name.clone(),
                    }
                    .fail();
                };
                self.generate_expression(index)?;
                self.code.emit(Opcode::Cpa, pair(GR1, GR0));
                self.code.emit(Opcode::Jmi, "EROV");
                self.code
                    .emit(Opcode::Lad, address(GR2, &(size - 1).to_string(), None));
                self.code.emit(Opcode::Cpa, pair(GR1, GR2));
                self.code.emit(Opcode::Jpl, "EROV");
                self.code.emit(Opcode::Lad, address(GR1, &label, Some(GR1)));
            }
            // Parameter cells already hold the caller's address.
            None if info.is_param => self.code.emit(Opcode::Ld, address(GR1, &label, None)),
            None => self.code.emit(Opcode::Lad, address(GR1, &label, None)),
        }
        Ok(())
    }

    fn load_value(&mut self, place: &HirPlace) -> CodegenResult<()> {
        let info = self.symbol(place.symbol)?;
        if place.index.is_none() && !info.is_param {
            self.code.emit(Opcode::Ld, address(GR1, &info.label(), None));
            return Ok(());
        }
        self.load_address(place)?;
        self.code.emit(Opcode::Ld, address(GR1, "0", Some(GR1)));
        Ok(())
    }

    pub fn generate_expression(&mut self, expr: &HirExpr) -> CodegenResult<()> {
        match &expr.kind {
            HirExprKind::Load(place) => self.load_value(place)?,
            HirExprKind::Int(value) | HirExprKind::Char(value) => {
                self.code.emit(Opcode::Lad, address(GR1, &value.to_string(), None))
            }
            HirExprKind::Bool(true) => self.code.emit(Opcode::Lad, address(GR1, "1", None)),
            HirExprKind::Bool(false) => self.code.emit(Opcode::Ld, pair(GR1, GR0)),
            HirExprKind::Not(operand) => {
                self.generate_expression(operand)?;
                self.code.emit(Opcode::Xor, address(GR1, "ONE", None));
            }
            HirExprKind::Negate(operand) => {
                self.generate_expression(operand)?;
                self.code.emit(Opcode::Ld, pair(GR2, GR0));
                self.code.emit(Opcode::Suba, pair(GR2, GR1));
                self.code.emit(Opcode::Jov, "EOVF");
                self.code.emit(Opcode::Ld, pair(GR1, GR2));
            }
            HirExprKind::Binary {
                operator,
                left,
                right,
            } => {
                self.generate_expression(left)?;
                self.push(GR1);
                self.generate_expression(right)?;
                self.code.emit(Opcode::Pop, GR2);
                self.combine(*operator);
            }
            HirExprKind::Cast { target, operand } => {
                self.generate_expression(operand)?;
                self.convert(*target, &operand.ty);
            }
        }
        Ok(())
    }

    /// Left operand in `GR2`, right operand in `GR1`; result in `GR1`.
    fn combine(&mut self, operator: BinaryOp) {
        match operator {
            BinaryOp::Add => {
                self.code.emit(Opcode::Adda, pair(GR1, GR2));
                self.code.emit(Opcode::Jov, "EOVF");
            }
            BinaryOp::Sub => {
                self.code.emit(Opcode::Suba, pair(GR2, GR1));
                self.code.emit(Opcode::Jov, "EOVF");
                self.code.emit(Opcode::Ld, pair(GR1, GR2));
            }
            BinaryOp::Mul => {
                self.code.emit(Opcode::Mula, pair(GR1, GR2));
                self.code.emit(Opcode::Jov, "EOVF");
            }
            BinaryOp::Div => {
                self.code.emit(Opcode::Cpa, pair(GR1, GR0));
                self.code.emit(Opcode::Jze, "E0DIV");
                self.code.emit(Opcode::Diva, pair(GR2, GR1));
                self.code.emit(Opcode::Jov, "EOVF");
                self.code.emit(Opcode::Ld, pair(GR1, GR2));
            }
            BinaryOp::And => self.code.emit(Opcode::And, pair(GR1, GR2)),
            BinaryOp::Or => self.code.emit(Opcode::Or, pair(GR1, GR2)),
            relational => self.compare(relational),
        }
    }

    fn compare(&mut self, operator: BinaryOp) {
        let jumps: &[Opcode] = match operator {
            BinaryOp::Equal => &[Opcode::Jze],
            BinaryOp::NotEqual => &[Opcode::Jnz],
            BinaryOp::Less => &[Opcode::Jmi],
            BinaryOp::LessEqual => &[Opcode::Jmi, Opcode::Jze],
            BinaryOp::Greater => &[Opcode::Jpl],
            _ => &[Opcode::Jpl, Opcode::Jze],
        };
        let true_label = self.labels.next_label();
        let end_label = self.labels.next_label();

        self.code.emit(Opcode::Cpa, pair(GR2, GR1));
        for &jump in jumps {
            self.code.emit(jump, &true_label);
        }
        self.code.emit(Opcode::Ld, pair(GR1, GR0));
        self.code.emit(Opcode::Jump, &end_label);
        self.code.place_label(true_label);
        self.code.emit(Opcode::Lad, address(GR1, "1", None));
        self.code.place_label(end_label);
    }

    fn convert(&mut self, target: StdType, from: &Type) {
        match (target, from.as_std()) {
            (StdType::Boolean, Some(StdType::Integer | StdType::Char)) => {
                let false_label = self.labels.next_label();
                let join_label = self.labels.next_label();
                self.code.emit(Opcode::Cpa, pair(GR1, GR0));
                self.code.emit(Opcode::Jze, &false_label);
                self.code.emit(Opcode::Lad, address(GR1, "1", None));
                self.code.emit(Opcode::Jump, &join_label);
                self.code.place_label(false_label);
                self.code.emit(Opcode::Ld, pair(GR1, GR0));
                self.code.place_label(join_label);
            }
            (StdType::Char, Some(StdType::Integer)) => {
                self.code.emit(Opcode::Lad, address(GR2, "127", None));
                self.code.emit(Opcode::And, pair(GR1, GR2));
            }
            _ => {}
        }
    }
}
