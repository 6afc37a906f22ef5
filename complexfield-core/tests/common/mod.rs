//! Test infrastructure for the complex field parser
//!
//! Provides seeded value generation and text rendering variations.

#![allow(dead_code)]

mod generators;

pub use generators::Gen;

use complexfield_core::Value;

/// Shorthand for a list of borrowed leaves.
pub fn list(items: &[&'static str]) -> Value<'static> {
    Value::leaves_of(items)
}

/// Shorthand for a nested list.
pub fn nest(items: Vec<Value<'static>>) -> Value<'static> {
    Value::List(items)
}

pub fn leaf(s: &'static str) -> Value<'static> {
    Value::leaf(s)
}
