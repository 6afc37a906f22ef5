//! CSV cell boundary.
//!
//! A row reader hands over raw cell text. Cells that open with `[` or `(`
//! (after any leading spaces) are structured and go through the parser;
//! anything else is a plain scalar and passes through untouched. A
//! structured cell that fails to parse is an error, never silently kept
//! as raw text.

use thiserror::Error;
use tracing::{debug, trace};

use crate::error::ParseError;
use crate::value::Value;

/// One cell, after the structured/plain decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field<'a> {
    /// Plain scalar cell, passed through as-is.
    Raw(&'a str),
    /// Parsed array value. The top level is always a `List`.
    Structured(Value<'a>),
}

impl<'a> Field<'a> {
    pub fn as_raw(&self) -> Option<&'a str> {
        match self {
            Field::Raw(s) => Some(s),
            Field::Structured(_) => None,
        }
    }

    pub fn as_value(&self) -> Option<&Value<'a>> {
        match self {
            Field::Raw(_) => None,
            Field::Structured(v) => Some(v),
        }
    }

    /// Logical column values: the elements of the top-level list. Raw
    /// cells have none.
    pub fn elements(&self) -> &[Value<'a>] {
        self.as_value().and_then(Value::as_list).unwrap_or(&[])
    }
}

/// True when a cell looks like an array and should be parsed.
pub fn is_structured(cell: &str) -> bool {
    matches!(cell.trim_start_matches(' ').as_bytes().first(), Some(b'[' | b'('))
}

/// Parse one cell, passing plain scalars through.
pub fn parse_field(cell: &str) -> Result<Field<'_>, ParseError> {
    if !is_structured(cell) {
        trace!(len = cell.len(), "cell is not delimited, passing through");
        return Ok(Field::Raw(cell));
    }
    crate::parse(cell).map(Field::Structured)
}

/// Parse one cell, keeping the raw text when a structured cell fails.
///
/// For readers whose policy is to keep going on bad rows; the failure is
/// still logged.
pub fn parse_field_or_raw(cell: &str) -> Field<'_> {
    match parse_field(cell) {
        Ok(field) => field,
        Err(err) => {
            debug!(error = %err, "structured cell rejected, keeping raw text");
            Field::Raw(cell)
        }
    }
}

/// Error for a structured cell within a row.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("column {column}: {source}")]
pub struct FieldError {
    /// Zero-based column index of the failing cell.
    pub column: usize,
    #[source]
    pub source: ParseError,
}

/// Parse every cell of a row. The first failing cell aborts the row.
pub fn parse_row<'a, I>(cells: I) -> Result<Vec<Field<'a>>, FieldError>
where
    I: IntoIterator<Item = &'a str>,
{
    cells
        .into_iter()
        .enumerate()
        .map(|(column, cell)| parse_field(cell).map_err(|source| FieldError { column, source }))
        .collect()
}
