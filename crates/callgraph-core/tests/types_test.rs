//! Tests for identifier types.

use callgraph_core::types::{FxHashMap, FxHashSet, SymbolId, UnitId};

#[test]
fn test_symbol_id_equality_is_by_value() {
    let a = SymbolId::new("c:@F@main");
    let b = SymbolId::from(String::from("c:@F@main"));
    assert_eq!(a, b);

    let mut set = FxHashSet::default();
    set.insert(a.clone());
    assert!(!set.insert(b));
    assert_eq!(set.len(), 1);
}

#[test]
fn test_symbol_id_borrows_as_str() {
    let mut map: FxHashMap<SymbolId, u32> = FxHashMap::default();
    map.insert(SymbolId::new("c:@F@foo"), 7);
    assert_eq!(map.get("c:@F@foo"), Some(&7));
}

#[test]
fn test_empty_symbol_id() {
    assert!(SymbolId::new("").is_empty());
    assert!(!SymbolId::new("x").is_empty());
}

#[test]
fn test_unit_id_roundtrip() {
    let id = UnitId::new(42);
    assert_eq!(id.index(), 42);
    assert_eq!(id.to_string(), "unit#42");
    assert!(UnitId::new(1) < UnitId::new(2));
}
