use std::fmt;

use front_end::types::Type;

/// Index of a declared name in the program's `SymbolArena`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolId(pub usize);

impl fmt::Display for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Everything later phases need to know about a declared name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolInfo {
    pub name: String,
    /// Procedure the name is local to; `None` for globals and procedures.
    pub owner: Option<String>,
    pub ty: Type,
    pub is_param: bool,
    pub def_line: usize,
}

impl SymbolInfo {
    /// Assembler label of the storage cell (or entry point) for this name.
    pub fn label(&self) -> String {
        match &self.owner {
            Some(procedure) => format!("${}%{}", self.name, procedure),
            None => format!("${}", self.name),
        }
    }

    /// `name` for globals, `name:proc` for procedure-local names.
    pub fn key(&self) -> String {
        match &self.owner {
            Some(procedure) => format!("{}:{}", self.name, procedure),
            None => self.name.clone(),
        }
    }
}

/// Append-only storage for every name declared in a program.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SymbolArena {
    symbols: Vec<SymbolInfo>,
}

impl SymbolArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, info: SymbolInfo) -> SymbolId {
        self.symbols.push(info);
        SymbolId(self.symbols.len() - 1)
    }

    pub fn get(&self, id: SymbolId) -> Option<&SymbolInfo> {
        self.symbols.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Symbols in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (SymbolId, &SymbolInfo)> {
        self.symbols
            .iter()
            .enumerate()
            .map(|(i, info)| (SymbolId(i), info))
    }
}
