//! Line-oriented assembly buffers.
//!
//! A `Section` is one stream of instructions. A label placed with
//! `place_label` attaches to the next instruction emitted into the same
//! section; if another label arrives first, or the section is finished, the
//! waiting label is given a `NOP` of its own.

use std::fmt::Display;

use crate::casl::{Instruction, Opcode};

#[derive(Debug, Default)]
pub struct Section {
    lines: Vec<Instruction>,
    pending_label: Option<String>,
}

impl Section {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn place_label(&mut self, label: impl Into<String>) {
        self.flush_label();
        self.pending_label = Some(label.into());
    }

    /// Emit an instruction, picking up any waiting label.
    pub fn emit(&mut self, opcode: Opcode, operands: impl Display) {
        let label = self.pending_label.take();
        self.lines.push(Instruction {
            label,
            opcode,
            operands: operands.to_string(),
        });
    }

    /// Emit an instruction that carries its own label.
    pub fn emit_labeled(&mut self, label: impl Into<String>, opcode: Opcode, operands: impl Display) {
        self.place_label(label);
        self.emit(opcode, operands);
    }

    fn flush_label(&mut self) {
        if self.pending_label.is_some() {
            self.emit(Opcode::Nop, "");
        }
    }

    /// Close the section and hand back its lines.
    pub fn finish(mut self) -> Vec<Instruction> {
        self.flush_label();
        self.lines
    }

    pub fn append(&mut self, other: Section) {
        self.flush_label();
        self.lines.extend(other.finish());
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Source of `Lnnnn` labels. One counter serves a whole compilation.
#[derive(Debug)]
pub struct LabelAllocator {
    next: u32,
}

impl Default for LabelAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl LabelAllocator {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    pub fn next_label(&mut self) -> String {
        let label = format!("L{:04}", self.next);
        self.next += 1;
        label
    }
}
