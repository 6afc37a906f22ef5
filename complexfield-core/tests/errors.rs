//! Error localization tests.
//!
//! A failure blames the recorded rule that got furthest into the input,
//! and reports where that rule stopped.

use complexfield_core::config::DEFAULT_MAX_DEPTH;
use complexfield_core::{parse, parse_with, ParseError, ParserConfig, Rule, SyntaxError};
use pretty_assertions::assert_eq;

fn syntax(input: &str) -> SyntaxError {
    match parse(input) {
        Err(ParseError::Syntax(e)) => e,
        other => panic!("expected syntax error for {:?}, got {:?}", input, other),
    }
}

#[test]
fn test_nothing_matched_points_past_open_bracket() {
    let e = syntax(r#"[&*&, "car", "plane", "boat's"]"#);
    assert_eq!(e.rule, Rule::ComplexField);
    assert_eq!((e.line(), e.column()), (1, 2));
    assert_eq!(e.excerpt, "");
}

#[test]
fn test_blames_furthest_item_list() {
    let e = syntax("[1, 2 &]");
    assert_eq!(e.rule_name(), "ItemList");
    assert_eq!(e.excerpt, "1, 2 ");
    assert_eq!((e.line(), e.column()), (1, 7));
    assert_eq!(
        e.to_string(),
        r#"syntax error near ItemList (line 1 column 2 - line 1 column 7): "1, 2 ""#
    );
}

#[test]
fn test_multiline_location() {
    let e = syntax("[\"a\nb\", &]");
    assert_eq!(e.rule, Rule::DoubleQuoted);
    assert_eq!((e.start.line, e.start.column), (1, 2));
    assert_eq!((e.line(), e.column()), (2, 3));
    assert_eq!(e.excerpt, "\"a\nb\"");
}

#[test]
fn test_trailing_content_blames_array() {
    let e = syntax("[1] x");
    assert_eq!(e.rule, Rule::Array);
    assert_eq!(e.span.end, 3);
    assert_eq!(e.column(), 4);
}

#[test]
fn test_unterminated_string_reaches_end() {
    let e = syntax("[\"abc");
    assert_eq!(e.rule, Rule::ComplexField);
    assert_eq!(e.span.start, 5);
    assert_eq!(e.column(), 6);
}

#[test]
fn test_discarded_token_still_blamed() {
    // `(b` matches as far as the raw value before the missing `)` throws
    // the nested array away; the raw value is still the furthest token.
    let e = syntax("[a, (b]");
    assert_eq!(e.rule, Rule::RawValue);
    assert_eq!(e.excerpt, "b");
    assert_eq!(e.column(), 7);
}

#[test]
fn test_error_location_accessor() {
    let err = parse("[1,]").unwrap_err();
    let loc = err.location().unwrap();
    assert_eq!(loc.line, 1);
    assert!(loc.offset <= 4);
}

#[test]
fn test_nesting_limit() {
    let deep = format!("{}1{}", "[".repeat(10), "]".repeat(10));
    let config = ParserConfig::new().with_max_depth(5);
    match parse_with(&deep, &config) {
        Err(ParseError::NestingTooDeep { limit, location }) => {
            assert_eq!(limit, 5);
            assert_eq!(location.column, 6);
        }
        other => panic!("expected nesting error, got {:?}", other),
    }
    assert!(parse_with(&deep, &ParserConfig::new().with_max_depth(10)).is_ok());
    assert!(parse_with(&deep, &ParserConfig::unlimited()).is_ok());
}

#[test]
fn test_default_limit_is_generous() {
    let deep = format!("{}{}", "(".repeat(200), ")".repeat(200));
    assert_eq!(parse(&deep).unwrap().depth(), 200);
}

#[test]
fn test_default_limit_boundary() {
    let nested = |n: usize| format!("{}{}", "[".repeat(n), "]".repeat(n));

    assert_eq!(parse(&nested(DEFAULT_MAX_DEPTH)).unwrap().depth(), DEFAULT_MAX_DEPTH);

    let over = nested(DEFAULT_MAX_DEPTH + 1);
    match parse(&over) {
        Err(ParseError::NestingTooDeep { limit, location }) => {
            assert_eq!(limit, DEFAULT_MAX_DEPTH);
            assert_eq!(location.column, DEFAULT_MAX_DEPTH + 1);
        }
        other => panic!("expected nesting error, got {:?}", other),
    }
    assert_eq!(
        parse_with(&over, &ParserConfig::unlimited()).unwrap().depth(),
        DEFAULT_MAX_DEPTH + 1
    );
}
