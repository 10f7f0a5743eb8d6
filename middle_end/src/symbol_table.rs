//! Scoped symbol tables.
//!
//! Each scope owns a fixed-size chained hash table. Keys hash with the
//! polynomial `31 * h + byte` over the key bytes (wrapping at 32 bits) and
//! land in one of `BUCKET_COUNT` chains. A new key goes to the head of its
//! chain; inserting an existing key replaces its value in place.

use front_end::types::Type;

use crate::hir::SymbolId;

pub const BUCKET_COUNT: usize = 1000;

/// Bucket index of `key`.
pub fn hash(key: &str) -> usize {
    let mut h: u32 = 0;
    for byte in key.bytes() {
        h = h.wrapping_mul(31).wrapping_add(byte as u32);
    }
    h as usize % BUCKET_COUNT
}

/// String-keyed hash table with separate chaining.
#[derive(Debug, Clone)]
pub struct ChainedTable<V> {
    /// Each chain is stored head first.
    buckets: Vec<Vec<(String, V)>>,
    len: usize,
}

impl<V> ChainedTable<V> {
    pub fn new() -> Self {
        Self {
            buckets: (0..BUCKET_COUNT).map(|_| Vec::new()).collect(),
            len: 0,
        }
    }

    /// Insert `value` under `key`, returning the value it replaced.
    pub fn insert(&mut self, key: &str, value: V) -> Option<V> {
        let chain = &mut self.buckets[hash(key)];
        if let Some(slot) = chain.iter_mut().find(|(k, _)| k == key) {
            return Some(std::mem::replace(&mut slot.1, value));
        }
        chain.insert(0, (key.to_string(), value));
        self.len += 1;
        None
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.buckets[hash(key)]
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        self.buckets[hash(key)]
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Entries in bucket order, each chain from its head.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.buckets
            .iter()
            .flat_map(|chain| chain.iter().map(|(k, v)| (k.as_str(), v)))
    }

    pub fn into_values(self) -> impl Iterator<Item = V> {
        self.buckets
            .into_iter()
            .flat_map(|chain| chain.into_iter().map(|(_, v)| v))
    }
}

impl<V> Default for ChainedTable<V> {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SymbolEntry {
    pub id: SymbolId,
    pub name: String,
    pub owner: Option<String>,
    pub ty: Type,
    pub is_param: bool,
    pub def_line: usize,
    /// Lines of later uses, in the order they were seen.
    pub refs: Vec<usize>,
}

impl SymbolEntry {
    pub fn add_reference(&mut self, line: usize) {
        if self.refs.last() != Some(&line) {
            self.refs.push(line);
        }
    }
}

/// One level of name visibility: the global scope or a procedure's scope.
#[derive(Debug, Clone)]
pub struct Scope {
    owner: Option<String>,
    table: ChainedTable<SymbolEntry>,
}

impl Scope {
    pub fn global() -> Self {
        Self {
            owner: None,
            table: ChainedTable::new(),
        }
    }

    pub fn procedure(name: &str) -> Self {
        Self {
            owner: Some(name.to_string()),
            table: ChainedTable::new(),
        }
    }

    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.table.contains_key(name)
    }

    /// Add a new entry. Returns `false`, leaving the scope unchanged, when the
    /// name is already declared here.
    pub fn declare(&mut self, entry: SymbolEntry) -> bool {
        if self.table.contains_key(&entry.name) {
            return false;
        }
        let name = entry.name.clone();
        self.table.insert(&name, entry);
        true
    }

    pub fn lookup(&self, name: &str) -> Option<&SymbolEntry> {
        self.table.get(name)
    }

    pub fn lookup_mut(&mut self, name: &str) -> Option<&mut SymbolEntry> {
        self.table.get_mut(name)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn into_entries(self) -> impl Iterator<Item = SymbolEntry> {
        self.table.into_values()
    }
}
