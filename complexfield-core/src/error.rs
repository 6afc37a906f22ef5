//! Parse errors and the error reporter.
//!
//! A failed parse blames a single span: the recorded token that reached
//! furthest into the input, even if backtracking later discarded it.

use std::fmt;

use thiserror::Error;

use crate::event::{Rule, Token};
use crate::span::{Location, Span};

/// Error returned when a field cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// No grammar alternative matched. Deterministic - retrying the same
    /// input always fails the same way.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    /// Arrays nested deeper than `ParserConfig::max_depth`.
    #[error("arrays nested deeper than {limit} at {location}")]
    NestingTooDeep { limit: usize, location: Location },

    /// Internal invariant broken while building the value.
    #[error("internal parser defect: {0}")]
    Defect(#[from] Defect),
}

impl ParseError {
    /// Location the error points at.
    pub fn location(&self) -> Option<Location> {
        match self {
            ParseError::Syntax(e) => Some(e.end),
            ParseError::NestingTooDeep { location, .. } => Some(*location),
            ParseError::Defect(_) => None,
        }
    }

    #[inline]
    pub fn is_syntax(&self) -> bool {
        matches!(self, ParseError::Syntax(_))
    }
}

/// Syntax error diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct SyntaxError {
    /// Rule of the blamed token.
    pub rule: Rule,
    /// Byte range of the blamed token.
    pub span: Span,
    pub start: Location,
    pub end: Location,
    /// Input text covered by the blamed span.
    pub excerpt: String,
}

impl SyntaxError {
    /// Line where progress stopped (1-based).
    #[inline]
    pub fn line(&self) -> usize {
        self.end.line
    }

    /// Column where progress stopped (1-based, in characters).
    #[inline]
    pub fn column(&self) -> usize {
        self.end.column
    }

    /// Name of the rule that made the most progress.
    #[inline]
    pub fn rule_name(&self) -> &'static str {
        self.rule.name()
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "syntax error near {} ({} - {}): {:?}",
            self.rule, self.start, self.end, self.excerpt
        )
    }
}

/// Builder invariant violations. Accepted input never produces these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Defect {
    #[error("array closed with no array open at {0}")]
    StackUnderflow(Span),
    #[error("element added outside any array at {0}")]
    NoOpenArray(Span),
    #[error("{0} array(s) still open at end of input")]
    UnclosedArrays(usize),
    #[error("no value produced")]
    NoResult,
    #[error("second top-level value at {0}")]
    MultipleResults(Span),
}

/// Turn the furthest-reaching token into a syntax error.
///
/// `furthest` is the blamed token, or `None` when nothing matched at all;
/// `cursor` is then the furthest offset the matcher looked at.
pub fn report(furthest: Option<Token>, cursor: usize, input: &str) -> SyntaxError {
    let token = furthest
        .unwrap_or_else(|| Token::new(Rule::ComplexField, Span::empty(cursor.min(input.len()))));
    let span = token.span;
    SyntaxError {
        rule: token.rule,
        span,
        start: Location::resolve(input, span.start),
        end: Location::resolve(input, span.end),
        excerpt: span.text(input).to_owned(),
    }
}
