//! Symbol-table interchange format.
//!
//! One line per symbol: `key|label|type|is-parameter`, where `key` is
//! `name` or `name:proc` and `is-parameter` is `1` or `0`.

use front_end::types::Type;
use snafu::Snafu;

use crate::hir::{SymbolArena, SymbolInfo};

#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
pub enum SymbolFormatError {
    #[snafu(display("symbol line {line_no}: expected 4 fields, found {found}"))]
    FieldCount { line_no: usize, found: usize },

    #[snafu(display("symbol line {line_no}: {reason}"))]
    BadField { line_no: usize, reason: String },
}

/// Write every symbol of the arena, in declaration order.
pub fn export_symbols(symbols: &SymbolArena) -> String {
    let mut output = String::new();
    for (_, info) in symbols.iter() {
        output.push_str(&format!(
            "{}|{}|{}|{}\n",
            info.key(),
            info.label(),
            info.ty,
            if info.is_param { 1 } else { 0 }
        ));
    }
    output
}

/// A symbol read back from the interchange format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedSymbol {
    pub name: String,
    pub owner: Option<String>,
    pub label: String,
    pub ty: Type,
    pub is_param: bool,
}

impl From<&SymbolInfo> for ExportedSymbol {
    fn from(info: &SymbolInfo) -> Self {
        Self {
            name: info.name.clone(),
            owner: info.owner.clone(),
            label: info.label(),
            ty: info.ty.clone(),
            is_param: info.is_param,
        }
    }
}

/// Parse the output of `export_symbols`. Blank lines are skipped.
pub fn parse_symbols(text: &str) -> Result<Vec<ExportedSymbol>, SymbolFormatError> {
    let mut symbols = Vec::new();
    for (i, line) in text.lines().enumerate() {
        let line_no = i + 1;
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split('|').collect();
        let &[key, label, ty, is_param] = fields.as_slice() else {
            return FieldCountSnafu {
                line_no,
                found: fields.len(),
            }
            .fail();
        };

        let (name, owner) = match key.split_once(':') {
            Some((name, owner)) => (name.to_string(), Some(owner.to_string())),
            None => (key.to_string(), None),
        };
        if name.is_empty() {
            return BadFieldSnafu {
                line_no,
                reason: "empty name".to_string(),
            }
            .fail();
        }
        let ty = ty
            .parse::<Type>()
            .map_err(|reason| SymbolFormatError::BadField { line_no, reason })?;
        let is_param = match is_param {
            "1" => true,
            "0" => false,
            other => {
                return BadFieldSnafu {
                    line_no,
                    reason: format!("parameter flag must be 0 or 1, found '{}'", other),
                }
                .fail()
            }
        };

        symbols.push(ExportedSymbol {
            name,
            owner,
            label: label.to_string(),
            ty,
            is_param,
        });
    }
    Ok(symbols)
}
