//! Cross-reference report: where every declared name is defined and used.

use std::fmt;

use front_end::types::Type;

use crate::symbol_table::{Scope, SymbolEntry};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XrefEntry {
    pub name: String,
    pub owner: Option<String>,
    pub ty: Type,
    pub def_line: usize,
    /// Ascending, without duplicates.
    pub refs: Vec<usize>,
}

impl XrefEntry {
    fn from_symbol(entry: SymbolEntry) -> Self {
        let mut refs = entry.refs;
        refs.sort_unstable();
        refs.dedup();
        Self {
            name: entry.name,
            owner: entry.owner,
            ty: entry.ty,
            def_line: entry.def_line,
            refs,
        }
    }
}

impl fmt::Display for XrefEntry {
    /// `name[:proc]|type|def-line|ref,ref,...`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(owner) = &self.owner {
            write!(f, ":{}", owner)?;
        }
        let refs: Vec<String> = self.refs.iter().map(|line| line.to_string()).collect();
        write!(f, "|{}|{}|{}", self.ty, self.def_line, refs.join(","))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrossReference {
    entries: Vec<XrefEntry>,
}

impl CrossReference {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move every entry of a finished scope into the report.
    pub fn add_scope(&mut self, scope: Scope) {
        self.entries
            .extend(scope.into_entries().map(XrefEntry::from_symbol));
        self.sort();
    }

    /// Sorted by name, then by owning procedure with globals first.
    fn sort(&mut self) {
        self.entries
            .sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.owner.cmp(&b.owner)));
    }

    pub fn entries(&self) -> &[XrefEntry] {
        &self.entries
    }

    pub fn find(&self, name: &str, owner: Option<&str>) -> Option<&XrefEntry> {
        self.entries
            .iter()
            .find(|e| e.name == name && e.owner.as_deref() == owner)
    }
}

impl fmt::Display for CrossReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            writeln!(f, "{}", entry)?;
        }
        Ok(())
    }
}
