//! Parsed field values.
//!
//! A field parses to a tree of `Leaf` text and `List` arrays. Leaf text is
//! kept exactly as written (numbers are never converted), borrowing from
//! the input wherever no unescaping was needed.

use std::borrow::Cow;
use std::fmt;

/// A parsed field value.
///
/// The lifetime `'a` refers to the input field - leaves are zero-copy
/// slices unless a single-quoted string contained `\'`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value<'a> {
    /// Terminal text: a quoted string's content or a raw token.
    Leaf(Cow<'a, str>),
    /// Array of values, in source order.
    List(Vec<Value<'a>>),
}

impl<'a> Value<'a> {
    /// Borrowed leaf.
    #[inline]
    pub fn leaf(text: &'a str) -> Self {
        Value::Leaf(Cow::Borrowed(text))
    }

    /// List of borrowed leaves.
    pub fn leaves_of(items: &[&'a str]) -> Self {
        Value::List(items.iter().map(|s| Value::leaf(s)).collect())
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(self, Value::Leaf(_))
    }

    #[inline]
    pub fn is_list(&self) -> bool {
        matches!(self, Value::List(_))
    }

    /// Leaf text, if this is a leaf.
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Leaf(s) => Some(s.as_ref()),
            Value::List(_) => None,
        }
    }

    /// Elements, if this is a list.
    #[inline]
    pub fn as_list(&self) -> Option<&[Value<'a>]> {
        match self {
            Value::List(items) => Some(items),
            Value::Leaf(_) => None,
        }
    }

    /// Number of elements of a list; 0 for a leaf.
    pub fn len(&self) -> usize {
        self.as_list().map_or(0, <[_]>::len)
    }

    /// True for an empty list. Leaves are never "empty" in this sense,
    /// even `Leaf("")`.
    pub fn is_empty(&self) -> bool {
        matches!(self, Value::List(items) if items.is_empty())
    }

    /// Element `index` of a list.
    pub fn get(&self, index: usize) -> Option<&Value<'a>> {
        self.as_list().and_then(|items| items.get(index))
    }

    /// Depth-first iterator over all leaf texts.
    pub fn leaves(&self) -> Leaves<'_, 'a> {
        Leaves { stack: vec![self] }
    }

    /// Nesting depth: 0 for a leaf, 1 for a flat list.
    pub fn depth(&self) -> usize {
        match self {
            Value::Leaf(_) => 0,
            Value::List(items) => 1 + items.iter().map(Value::depth).max().unwrap_or(0),
        }
    }

    /// Detach from the input buffer.
    pub fn into_owned(self) -> Value<'static> {
        match self {
            Value::Leaf(s) => Value::Leaf(Cow::Owned(s.into_owned())),
            Value::List(items) => Value::List(items.into_iter().map(Value::into_owned).collect()),
        }
    }
}

/// Iterator returned by [`Value::leaves`].
pub struct Leaves<'v, 'a> {
    stack: Vec<&'v Value<'a>>,
}

impl<'v, 'a> Iterator for Leaves<'v, 'a> {
    type Item = &'v str;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(value) = self.stack.pop() {
            match value {
                Value::Leaf(s) => return Some(s.as_ref()),
                Value::List(items) => self.stack.extend(items.iter().rev()),
            }
        }
        None
    }
}

// ============================================================================
// Serialization
// ============================================================================

/// Canonical text form: `[`, `, ` separators, `]`.
///
/// Leaves that would re-parse as a `RawValue` are written bare. Others are
/// double-quoted when they contain no `"`, and single-quoted (with `'`
/// written as `\'`) otherwise. Text holding a `"` and ending in `\` has
/// no representation in the grammar, since the trailing backslash would
/// escape the closing quote. It is written double-quoted anyway.
impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Leaf(s) => write_leaf(f, s),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
        }
    }
}

fn write_leaf(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    if is_raw_value(s) {
        return f.write_str(s);
    }
    if !s.contains('"') || !single_quote_safe(s) {
        return write!(f, "\"{}\"", s);
    }
    f.write_str("'")?;
    f.write_str(&s.replace('\'', "\\'"))?;
    f.write_str("'")
}

/// Matches the `RawValue` rule: `-? [A-Za-z0-9]+ ('.' [A-Za-z0-9]+)?`.
pub(crate) fn is_raw_value(s: &str) -> bool {
    let body = s.strip_prefix('-').unwrap_or(s);
    let (whole, fraction) = match body.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (body, None),
    };
    let digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_alphanumeric());
    digits(whole) && fraction.map_or(true, digits)
}

/// Single quoting round-trips unless a trailing backslash would swallow
/// the closing quote. Every other `\` sits before a written `\'` or plain
/// text and stays literal.
fn single_quote_safe(s: &str) -> bool {
    !s.ends_with('\\')
}

#[cfg(feature = "serde")]
impl serde::Serialize for Value<'_> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeSeq;
        match self {
            Value::Leaf(s) => serializer.serialize_str(s),
            Value::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
        }
    }
}
