//! Complex Field Parser
//!
//! Parses the text of a single CSV cell that encodes an array - possibly
//! nested, with quoted strings and bare tokens as elements - into a
//! [`Value`] tree.
//!
//! ```
//! use complexfield_core::{parse, Value};
//!
//! let v = parse("[10, 'c ar', (x, y)]").unwrap();
//! assert_eq!(v.get(0), Some(&Value::leaf("10")));
//! assert_eq!(v.get(2), Some(&Value::leaves_of(&["x", "y"])));
//! ```
//!
//! # Nesting limit
//!
//! The grammar itself puts no bound on nesting, but [`parse`] uses
//! [`ParserConfig::default`], which rejects cells with more than
//! [`config::DEFAULT_MAX_DEPTH`] (256) open arrays with
//! [`ParseError::NestingTooDeep`]. Use [`parse_with`] and
//! [`ParserConfig::unlimited`] or [`ParserConfig::with_max_depth`] to
//! accept deeper input.
//!
//! # Architecture
//!
//! - **parser.rs** - Grammar rules with save/restore backtracking, token trace
//! - **event.rs** - Rule identities, tokens, semantic signals
//! - **builder.rs** - Array-context stack that replays signals into a value
//! - **tree.rs** - Arena tree rebuilt from the flat trace
//! - **error.rs** - Error taxonomy and furthest-span error reporting
//! - **span.rs** - Span/Location types
//! - **config.rs** - Parser limits
//! - **value.rs** - Leaf/List value type and canonical serialization
//! - **field.rs** - CSV cell boundary (structured vs. plain cells)

pub mod builder;
pub mod config;
pub mod error;
pub mod event;
pub mod field;
pub mod parser;
pub mod span;
pub mod tree;
pub mod value;

pub use builder::ValueBuilder;
pub use config::ParserConfig;
pub use error::{Defect, ParseError, SyntaxError};
pub use event::{Rule, Signal, Token};
pub use field::{parse_field, parse_field_or_raw, parse_row, Field, FieldError};
pub use parser::{Parser, Trace};
pub use span::{Location, Span};
pub use tree::{Node, NodeId, SpanTree};
pub use value::{Leaves, Value};

/// Parse a field with the default configuration.
///
/// Input nested deeper than [`config::DEFAULT_MAX_DEPTH`] arrays fails
/// with [`ParseError::NestingTooDeep`] even when it is otherwise valid.
pub fn parse(input: &str) -> Result<Value<'_>, ParseError> {
    parse_with(input, &ParserConfig::default())
}

/// Parse a field with an explicit configuration.
pub fn parse_with<'a>(input: &'a str, config: &ParserConfig) -> Result<Value<'a>, ParseError> {
    Parser::with_config(input, *config).parse()?.build()
}
