//! CASL II instruction vocabulary.

use std::fmt;

/// General registers of the COMET II machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reg {
    GR0,
    GR1,
    GR2,
    GR3,
    GR4,
    GR5,
    GR6,
    GR7,
}

impl fmt::Display for Reg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    Start,
    End,
    Dc,
    Ds,
    Nop,
    Ld,
    St,
    Lad,
    Adda,
    Suba,
    Mula,
    Diva,
    And,
    Or,
    Xor,
    Cpa,
    Jze,
    Jnz,
    Jmi,
    Jpl,
    Jov,
    Jump,
    Push,
    Pop,
    Call,
    Ret,
    Svc,
}

impl Opcode {
    pub fn mnemonic(self) -> &'static str {
        match self {
            Opcode::Start => "START",
            Opcode::End => "END",
            Opcode::Dc => "DC",
            Opcode::Ds => "DS",
            Opcode::Nop => "NOP",
            Opcode::Ld => "LD",
            Opcode::St => "ST",
            Opcode::Lad => "LAD",
            Opcode::Adda => "ADDA",
            Opcode::Suba => "SUBA",
            Opcode::Mula => "MULA",
            Opcode::Diva => "DIVA",
            Opcode::And => "AND",
            Opcode::Or => "OR",
            Opcode::Xor => "XOR",
            Opcode::Cpa => "CPA",
            Opcode::Jze => "JZE",
            Opcode::Jnz => "JNZ",
            Opcode::Jmi => "JMI",
            Opcode::Jpl => "JPL",
            Opcode::Jov => "JOV",
            Opcode::Jump => "JUMP",
            Opcode::Push => "PUSH",
            Opcode::Pop => "POP",
            Opcode::Call => "CALL",
            Opcode::Ret => "RET",
            Opcode::Svc => "SVC",
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// One line of assembly: `[label]\tOPCODE[\toperands]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub label: Option<String>,
    pub opcode: Opcode,
    pub operands: String,
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(label) = &self.label {
            f.write_str(label)?;
        }
        write!(f, "\t{}", self.opcode)?;
        if !self.operands.is_empty() {
            write!(f, "\t{}", self.operands)?;
        }
        Ok(())
    }
}

/// `'text'` with embedded quotes doubled, as `DC` expects.
pub fn string_constant(text: &str) -> String {
    format!("'{}'", text.replace('\'', "''"))
}

/// Register-register operand: `GR1,GR2`.
pub fn pair(a: Reg, b: Reg) -> String {
    format!("{},{}", a, b)
}

/// Register and address operand, optionally indexed: `GR1,$x` or `GR1,$a,GR1`.
pub fn address(reg: Reg, adr: &str, index: Option<Reg>) -> String {
    match index {
        Some(x) => format!("{},{},{}", reg, adr, x),
        None => format!("{},{}", reg, adr),
    }
}
