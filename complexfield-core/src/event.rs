//! Parser output - the flat token trace and the semantic signals it carries.
//!
//! The matcher records one `Token` per completed rule, in completion
//! order. That order is a post-order walk of the parse tree, so a
//! consumer can rebuild nesting with nothing more than a stack:
//!
//! ```text
//! input:   [a, (b)]
//! tokens:  PushArray
//!          AddElement "a"  RawValue  Item
//!          PushArray
//!          AddElement "b"  RawValue  Item  ItemList
//!          PopArray  Array  Item
//!          ItemList
//!          PopArray  Array
//!          ComplexField
//! signals: PushArray, AddElement("a"), PushArray, AddElement("b"), PopArray, PopArray
//! ```

use std::borrow::Cow;
use std::fmt;

use crate::span::Span;

/// Identity of a grammar rule (or semantic action) in the trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    /// `Array EOI` - the whole field.
    ComplexField,
    /// `[ ... ]` or `( ... )`.
    Array,
    /// Comma separated items inside an array.
    ItemList,
    /// One array element.
    Item,
    /// Either quoted form.
    QuotedString,
    /// `"..."` - backslash is plain content.
    DoubleQuoted,
    /// `'...'` - `\'` escapes the quote.
    SingleQuoted,
    /// Unquoted alphanumeric run, optionally signed and dotted.
    RawValue,

    // ---- Semantic actions (zero-width or capture spans) ----

    /// An array was opened.
    PushArray,
    /// An array was closed.
    PopArray,
    /// A leaf was captured. The flag is set for single-quoted text,
    /// whose `\'` sequences are unescaped on replay.
    AddElement { unescape: bool },
}

impl Rule {
    /// Stable, human-facing rule name used in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            Rule::ComplexField => "ComplexField",
            Rule::Array => "Array",
            Rule::ItemList => "ItemList",
            Rule::Item => "Item",
            Rule::QuotedString => "QuotedString",
            Rule::DoubleQuoted => "DoubleQuoted",
            Rule::SingleQuoted => "SingleQuoted",
            Rule::RawValue => "RawValue",
            Rule::PushArray => "PushArray",
            Rule::PopArray => "PopArray",
            Rule::AddElement { .. } => "AddElement",
        }
    }

    /// True for the action pseudo-rules that drive value building.
    #[inline]
    pub fn is_signal(self) -> bool {
        matches!(self, Rule::PushArray | Rule::PopArray | Rule::AddElement { .. })
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One matched rule: what matched and where.
///
/// `descendants` counts the tokens recorded while this rule was running,
/// i.e. the size of its subtree. With post-order storage that is enough to
/// recover the tree: the subtree of token `i` is `tokens[i - descendants..i]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub rule: Rule,
    pub span: Span,
    pub descendants: usize,
}

impl Token {
    /// A leaf token (no recorded children).
    #[inline]
    pub fn new(rule: Rule, span: Span) -> Self {
        Self { rule, span, descendants: 0 }
    }

    #[inline]
    pub fn with_descendants(rule: Rule, span: Span, descendants: usize) -> Self {
        Self { rule, span, descendants }
    }

    /// The semantic signal this token carries, if any.
    pub fn signal<'a>(&self, input: &'a str) -> Option<Signal<'a>> {
        match self.rule {
            Rule::PushArray => Some(Signal::PushArray { span: self.span }),
            Rule::PopArray => Some(Signal::PopArray { span: self.span }),
            Rule::AddElement { unescape } => {
                let raw = self.span.text(input);
                let text = if unescape { unescape_single_quoted(raw) } else { Cow::Borrowed(raw) };
                Some(Signal::AddElement { text, span: self.span })
            }
            _ => None,
        }
    }
}

/// Value-building instructions, replayed in trace order.
#[derive(Debug, Clone, PartialEq)]
pub enum Signal<'a> {
    /// Open a new array context.
    PushArray { span: Span },
    /// Close the current array context.
    PopArray { span: Span },
    /// Append a leaf to the current array context.
    AddElement { text: Cow<'a, str>, span: Span },
}

impl<'a> Signal<'a> {
    pub fn span(&self) -> Span {
        match self {
            Signal::PushArray { span } => *span,
            Signal::PopArray { span } => *span,
            Signal::AddElement { span, .. } => *span,
        }
    }
}

/// Replace each `\'` with `'`. Borrows when there is nothing to replace.
pub(crate) fn unescape_single_quoted(raw: &str) -> Cow<'_, str> {
    if !raw.contains("\\'") {
        return Cow::Borrowed(raw);
    }
    Cow::Owned(raw.replace("\\'", "'"))
}
