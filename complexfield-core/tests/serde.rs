//! JSON export of parsed values (requires the `serde` feature).

#![cfg(feature = "serde")]

use complexfield_core::parse;

#[test]
fn test_value_serializes_as_nested_arrays() {
    let v = parse(r"[10, 'it\'s', (a, [])]").unwrap();
    let json = serde_json::to_string(&v).unwrap();
    assert_eq!(json, r#"["10","it's",["a",[]]]"#);
}
