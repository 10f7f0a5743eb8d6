use front_end::types::Type;

use crate::hir::SymbolId;
use crate::symbol_table::{hash, ChainedTable, Scope, SymbolEntry, BUCKET_COUNT};

fn entry(name: &str, id: usize) -> SymbolEntry {
    SymbolEntry {
        id: SymbolId(id),
        name: name.to_string(),
        owner: None,
        ty: Type::Int,
        is_param: false,
        def_line: 1,
        refs: Vec::new(),
    }
}

#[test]
fn test_hash_matches_polynomial() {
    assert_eq!(hash(""), 0);
    assert_eq!(hash("a"), 97);
    // 31 * 97 + 98 = 3105
    assert_eq!(hash("ab"), 3105 % BUCKET_COUNT);
    let long = "abcdefghijklmnopqrstuvwxyz".repeat(4);
    assert!(hash(&long) < BUCKET_COUNT);
}

#[test]
fn test_insert_replaces_equal_key() {
    let mut table = ChainedTable::new();
    assert_eq!(table.insert("x", 1), None);
    assert_eq!(table.insert("x", 2), Some(1));
    assert_eq!(table.get("x"), Some(&2));
    assert_eq!(table.len(), 1);
}

#[test]
fn test_colliding_keys_chain_newest_first() {
    // "Aa" and "BB" share a polynomial hash
    assert_eq!(hash("Aa"), hash("BB"));

    let mut table = ChainedTable::new();
    table.insert("Aa", 1);
    table.insert("BB", 2);
    assert_eq!(table.get("Aa"), Some(&1));
    assert_eq!(table.get("BB"), Some(&2));

    let order: Vec<&str> = table.iter().map(|(k, _)| k).collect();
    assert_eq!(order, vec!["BB", "Aa"]);
    assert_eq!(table.len(), 2);
}

#[test]
fn test_get_mut_updates_in_place() {
    let mut table = ChainedTable::new();
    table.insert("n", vec![1]);
    table.get_mut("n").unwrap().push(2);
    assert_eq!(table.get("n"), Some(&vec![1, 2]));
    assert!(table.get_mut("m").is_none());
}

#[test]
fn test_scope_rejects_redeclaration() {
    let mut scope = Scope::global();
    assert!(scope.declare(entry("x", 0)));
    assert!(!scope.declare(entry("x", 1)));
    assert_eq!(scope.lookup("x").unwrap().id, SymbolId(0));
    assert_eq!(scope.len(), 1);
}

#[test]
fn test_procedure_scope_owner() {
    let scope = Scope::procedure("p");
    assert_eq!(scope.owner(), Some("p"));
    assert!(scope.is_empty());
    assert_eq!(Scope::global().owner(), None);
}

#[test]
fn test_references_skip_repeated_line() {
    let mut scope = Scope::global();
    scope.declare(entry("x", 0));
    let x = scope.lookup_mut("x").unwrap();
    x.add_reference(3);
    x.add_reference(3);
    x.add_reference(5);
    assert_eq!(scope.lookup("x").unwrap().refs, vec![3, 5]);
}
