//! Pretty printer for MPPL syntax trees
//!
//! Reprints a parsed program with canonical layout: one statement per line,
//! four spaces per nesting level, declarations indented under the program
//! header and bodies indented under `begin`.

use crate::ast::*;

const INDENT: &str = "    ";

/// Pretty-print a program to a string
pub fn pretty_print(program: &Program) -> String {
    let mut printer = Printer::new();
    printer.print_program(program);
    let mut text = printer
        .output
        .lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n");
    text.push('\n');
    text
}

struct Printer {
    output: String,
    indent: usize,
}

impl Printer {
    fn new() -> Self {
        Self {
            output: String::new(),
            indent: 0,
        }
    }

    fn line_start(&mut self) {
        self.output.push('\n');
        for _ in 0..self.indent {
            self.output.push_str(INDENT);
        }
    }

    fn print_program(&mut self, program: &Program) {
        self.output.push_str(&format!("program {};", program.name.name));

        self.indent += 1;
        for declaration in &program.block.declarations {
            self.line_start();
            match declaration {
                Declaration::Variables(vars) => self.print_variables(vars),
                Declaration::Procedure(procedure) => self.print_procedure(procedure),
            }
        }
        self.indent -= 1;

        self.line_start();
        self.print_compound(&program.block.body);
        self.output.push('.');
    }

    fn print_variables(&mut self, vars: &VariableDeclaration) {
        self.output.push_str("var ");
        for (i, group) in vars.groups.iter().enumerate() {
            if i == 1 {
                self.indent += 1;
            }
            if i > 0 {
                self.line_start();
            }
            self.output.push_str(&format!(
                "{} : {};",
                join_names(&group.names),
                type_spec_to_string(&group.typ)
            ));
        }
        if vars.groups.len() > 1 {
            self.indent -= 1;
        }
    }

    fn print_procedure(&mut self, procedure: &ProcedureDeclaration) {
        self.output.push_str(&format!("procedure {}", procedure.name.name));
        if !procedure.params.is_empty() {
            let groups: Vec<String> = procedure
                .params
                .iter()
                .map(|group| format!("{} : {}", join_names(&group.names), group.typ))
                .collect();
            self.output.push_str(&format!("({})", groups.join("; ")));
        }
        self.output.push(';');

        if let Some(vars) = &procedure.variables {
            self.indent += 1;
            self.line_start();
            self.print_variables(vars);
            self.indent -= 1;
        }

        self.line_start();
        self.print_compound(&procedure.body);
        self.output.push(';');
    }

    fn print_compound(&mut self, compound: &CompoundStatement) {
        self.output.push_str("begin");
        self.indent += 1;
        for (i, statement) in compound.statements.iter().enumerate() {
            if i > 0 {
                self.output.push(';');
            }
            self.line_start();
            self.print_statement(statement);
        }
        self.indent -= 1;
        self.line_start();
        self.output.push_str("end");
    }

    /// Print a statement starting at the current (already indented) position
    fn print_statement(&mut self, statement: &Statement) {
        match statement {
            Statement::Assignment { target, value, .. } => {
                self.print_variable(target);
                self.output.push_str(" := ");
                self.print_expression(value);
            }
            Statement::If {
                condition,
                then_branch,
                else_branch,
                ..
            } => {
                self.output.push_str("if ");
                self.print_expression(condition);
                self.output.push_str(" then");
                self.print_nested(then_branch);
                if let Some(else_branch) = else_branch {
                    self.line_start();
                    self.output.push_str("else");
                    self.print_nested(else_branch);
                }
            }
            Statement::While { condition, body, .. } => {
                self.output.push_str("while ");
                self.print_expression(condition);
                self.output.push_str(" do");
                self.print_nested(body);
            }
            Statement::Break { .. } => self.output.push_str("break"),
            Statement::Call { name, arguments } => {
                self.output.push_str(&format!("call {}", name.name));
                if !arguments.is_empty() {
                    self.output.push('(');
                    for (i, argument) in arguments.iter().enumerate() {
                        if i > 0 {
                            self.output.push_str(", ");
                        }
                        self.print_expression(argument);
                    }
                    self.output.push(')');
                }
            }
            Statement::Return { .. } => self.output.push_str("return"),
            Statement::Read { newline, targets, .. } => {
                self.output.push_str(if *newline { "readln" } else { "read" });
                if !targets.is_empty() {
                    self.output.push('(');
                    for (i, target) in targets.iter().enumerate() {
                        if i > 0 {
                            self.output.push_str(", ");
                        }
                        self.print_variable(target);
                    }
                    self.output.push(')');
                }
            }
            Statement::Write { newline, items, .. } => {
                self.output.push_str(if *newline { "writeln" } else { "write" });
                if !items.is_empty() {
                    self.output.push('(');
                    for (i, item) in items.iter().enumerate() {
                        if i > 0 {
                            self.output.push_str(", ");
                        }
                        match item {
                            OutputItem::Text { value, .. } => self.output.push_str(&quote(value)),
                            OutputItem::Value { expr, width } => {
                                self.print_expression(expr);
                                if let Some(width) = width {
                                    self.output.push_str(&format!(" : {}", width));
                                }
                            }
                        }
                    }
                    self.output.push(')');
                }
            }
            Statement::Compound(compound) => self.print_compound(compound),
            Statement::Empty => {}
        }
    }

    fn print_nested(&mut self, statement: &Statement) {
        self.indent += 1;
        self.line_start();
        self.print_statement(statement);
        self.indent -= 1;
    }

    fn print_variable(&mut self, variable: &Variable) {
        self.output.push_str(&variable.name.name);
        if let Some(index) = &variable.index {
            self.output.push('[');
            self.print_expression(index);
            self.output.push(']');
        }
    }

    fn print_expression(&mut self, expr: &Expression) {
        match expr {
            Expression::Variable(variable) => self.print_variable(variable),
            Expression::Number { value, .. } => self.output.push_str(&value.to_string()),
            Expression::Boolean { value, .. } => {
                self.output.push_str(if *value { "true" } else { "false" })
            }
            Expression::Str { value, .. } => self.output.push_str(&quote(value)),
            Expression::Paren(inner) => {
                self.output.push('(');
                self.print_expression(inner);
                self.output.push(')');
            }
            Expression::Not { operand, .. } => {
                self.output.push_str("not ");
                self.print_expression(operand);
            }
            Expression::Unary { operator, operand, .. } => {
                self.output.push(match operator {
                    UnaryOp::Plus => '+',
                    UnaryOp::Minus => '-',
                });
                self.print_expression(operand);
            }
            Expression::Binary {
                left,
                operator,
                right,
                ..
            } => {
                self.print_expression(left);
                self.output.push_str(&format!(" {} ", operator.symbol()));
                self.print_expression(right);
            }
            Expression::Cast { target, operand, .. } => {
                self.output.push_str(&format!("{}(", target));
                self.print_expression(operand);
                self.output.push(')');
            }
        }
    }
}

fn join_names(names: &[Ident]) -> String {
    names
        .iter()
        .map(|ident| ident.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn type_spec_to_string(spec: &TypeSpec) -> String {
    match spec {
        TypeSpec::Standard(std) => std.to_string(),
        TypeSpec::Array { size, element, .. } => format!("array[{}] of {}", size, element),
    }
}

/// Re-encode a decoded string literal, doubling embedded quotes.
fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}
