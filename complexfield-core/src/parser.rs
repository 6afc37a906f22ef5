//! Grammar/matcher for complex field values.
//!
//! Hand-written PEG: each rule is a method that either matches at the
//! cursor and returns `true`, or leaves the parser exactly as it found
//! it and returns `false`. Ordered choice is `a() || b()`, repetition is
//! a `while` loop, and [`Parser::attempt`] provides the save/restore that
//! makes every alternative start from the same place.
//!
//! ```text
//! ComplexField <- Array !.
//! Array        <- WS* '[' PushArray WS* ItemList? ']' PopArray
//!               / WS* '(' PushArray WS* ItemList? ')' PopArray
//! ItemList     <- Item WS* (',' WS* Item WS*)*
//! Item         <- Array / QuotedString / RawValue
//! QuotedString <- DoubleQuoted / SingleQuoted
//! DoubleQuoted <- '"' <(!'"' .)*> '"' AddElement
//! SingleQuoted <- '\'' <("\\'" / !'\'' .)*> '\'' AddElement
//! RawValue     <- <'-'? Digit+ ('.' Digit+)?> AddElement
//! Digit        <- [a-zA-Z0-9]
//! WS           <- ' '
//! ```
//!
//! The character-level rules (`WS`, `Digit`, the sign and decimal point)
//! are matched inline and never recorded.

use memchr::{memchr, memchr2};
use tracing::debug;

use crate::builder::ValueBuilder;
use crate::config::ParserConfig;
use crate::error::{self, ParseError};
use crate::event::{Rule, Signal, Token};
use crate::span::{Location, Span};
use crate::tree::SpanTree;
use crate::value::Value;

/// Saved matcher state: cursor plus token count.
#[derive(Debug, Clone, Copy)]
struct Checkpoint {
    pos: usize,
    tokens: usize,
}

/// Single-field parser.
///
/// Owns all mutable matching state, so separate instances never share
/// anything and may run on separate threads.
#[derive(Debug)]
pub struct Parser<'a> {
    input: &'a str,
    bytes: &'a [u8],
    config: ParserConfig,
    pos: usize,
    tokens: Vec<Token>,
    /// Open arrays on the current match path.
    depth: usize,
    /// Furthest offset any rule looked at.
    furthest_pos: usize,
    /// Grammar token with the greatest end offset ever recorded.
    furthest_token: Option<Token>,
    /// Offset of the first bracket rejected by the depth limit.
    depth_exceeded: Option<usize>,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Self {
        Self::with_config(input, ParserConfig::default())
    }

    pub fn with_config(input: &'a str, config: ParserConfig) -> Self {
        Self {
            input,
            bytes: input.as_bytes(),
            config,
            pos: 0,
            tokens: Vec::new(),
            depth: 0,
            furthest_pos: 0,
            furthest_token: None,
            depth_exceeded: None,
        }
    }

    /// The input this parser was built for.
    #[inline]
    pub fn input(&self) -> &'a str {
        self.input
    }

    /// Clear all matching state.
    pub fn reset(&mut self) {
        self.pos = 0;
        self.tokens.clear();
        self.depth = 0;
        self.furthest_pos = 0;
        self.furthest_token = None;
        self.depth_exceeded = None;
    }

    /// Match the whole input.
    ///
    /// On success the token trace is moved out of the parser. Calling
    /// `parse` again starts over from a clean state.
    pub fn parse(&mut self) -> Result<Trace<'a>, ParseError> {
        self.reset();
        debug!(len = self.input.len(), "parsing complex field");

        if self.complex_field() {
            let tokens = std::mem::take(&mut self.tokens);
            debug!(tokens = tokens.len(), "complex field matched");
            return Ok(Trace { input: self.input, tokens });
        }

        let err = self.failure();
        debug!(error = %err, "complex field rejected");
        Err(err)
    }

    fn failure(&self) -> ParseError {
        if let Some(at) = self.depth_exceeded {
            return ParseError::NestingTooDeep {
                limit: self.config.max_depth,
                location: Location::resolve(self.input, at),
            };
        }
        error::report(self.furthest_token, self.furthest_pos, self.input).into()
    }

    // ========================================================================
    // Cursor primitives
    // ========================================================================

    #[inline]
    fn checkpoint(&self) -> Checkpoint {
        Checkpoint { pos: self.pos, tokens: self.tokens.len() }
    }

    #[inline]
    fn restore(&mut self, cp: Checkpoint) {
        self.pos = cp.pos;
        self.tokens.truncate(cp.tokens);
    }

    /// Run `rule`; on failure rewind cursor and trace to where it started.
    #[inline]
    fn attempt(&mut self, rule: impl FnOnce(&mut Self) -> bool) -> bool {
        let cp = self.checkpoint();
        if rule(self) {
            true
        } else {
            self.restore(cp);
            false
        }
    }

    #[inline]
    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    #[inline]
    fn reach(&mut self, pos: usize) {
        if pos > self.furthest_pos {
            self.furthest_pos = pos;
        }
    }

    /// Consume `byte` if it is next.
    #[inline]
    fn eat(&mut self, byte: u8) -> bool {
        self.reach(self.pos);
        if self.peek() == Some(byte) {
            self.pos += 1;
            self.reach(self.pos);
            true
        } else {
            false
        }
    }

    /// `WS*`
    #[inline]
    fn skip_ws(&mut self) {
        while self.peek() == Some(b' ') {
            self.pos += 1;
        }
        self.reach(self.pos);
    }

    /// `Digit+`
    fn digits(&mut self) -> bool {
        let start = self.pos;
        while matches!(self.peek(), Some(b) if b.is_ascii_alphanumeric()) {
            self.pos += 1;
        }
        self.reach(self.pos);
        self.pos > start
    }

    // ========================================================================
    // Token recording
    // ========================================================================

    /// Record a completed rule that started at `cp`.
    fn complete(&mut self, rule: Rule, cp: Checkpoint) {
        let span = Span::new(cp.pos, self.pos);
        let token = Token::with_descendants(rule, span, self.tokens.len() - cp.tokens);
        if self.furthest_token.map_or(true, |t| token.span.end > t.span.end) {
            self.furthest_token = Some(token);
        }
        self.tokens.push(token);
    }

    /// Record a semantic action. Actions never take the blame for errors.
    #[inline]
    fn signal(&mut self, rule: Rule, span: Span) {
        self.tokens.push(Token::new(rule, span));
    }

    // ========================================================================
    // Rules
    // ========================================================================

    /// `ComplexField <- Array !.`
    fn complex_field(&mut self) -> bool {
        self.attempt(|p| {
            let cp = p.checkpoint();
            if !p.array() {
                return false;
            }
            p.reach(p.pos);
            if p.pos != p.bytes.len() {
                return false;
            }
            p.complete(Rule::ComplexField, cp);
            true
        })
    }

    /// `Array <- bracketed('[', ']') / bracketed('(', ')')`
    fn array(&mut self) -> bool {
        self.attempt(|p| p.bracketed(b'[', b']')) || self.attempt(|p| p.bracketed(b'(', b')'))
    }

    fn bracketed(&mut self, open: u8, close: u8) -> bool {
        let cp = self.checkpoint();
        self.skip_ws();
        if !self.eat(open) {
            return false;
        }
        if self.depth >= self.config.max_depth {
            if self.depth_exceeded.is_none() {
                self.depth_exceeded = Some(self.pos - 1);
            }
            return false;
        }

        self.depth += 1;
        self.signal(Rule::PushArray, Span::empty(self.pos));
        self.skip_ws();
        self.item_list();
        let closed = self.eat(close);
        self.depth -= 1;
        if !closed {
            return false;
        }

        self.signal(Rule::PopArray, Span::empty(self.pos));
        self.complete(Rule::Array, cp);
        true
    }

    /// `ItemList <- Item WS* (',' WS* Item WS*)*`
    fn item_list(&mut self) -> bool {
        self.attempt(|p| {
            let cp = p.checkpoint();
            if !p.item() {
                return false;
            }
            p.skip_ws();
            while p.attempt(Self::next_item) {}
            p.complete(Rule::ItemList, cp);
            true
        })
    }

    /// `',' WS* Item WS*`
    fn next_item(&mut self) -> bool {
        if !self.eat(b',') {
            return false;
        }
        self.skip_ws();
        if !self.item() {
            return false;
        }
        self.skip_ws();
        true
    }

    /// `Item <- Array / QuotedString / RawValue`
    fn item(&mut self) -> bool {
        let cp = self.checkpoint();
        if self.array() || self.quoted_string() || self.raw_value() {
            self.complete(Rule::Item, cp);
            true
        } else {
            false
        }
    }

    /// `QuotedString <- DoubleQuoted / SingleQuoted`
    fn quoted_string(&mut self) -> bool {
        let cp = self.checkpoint();
        if self.double_quoted() || self.single_quoted() {
            self.complete(Rule::QuotedString, cp);
            true
        } else {
            false
        }
    }

    /// `DoubleQuoted <- '"' <(!'"' .)*> '"' AddElement`
    ///
    /// No escapes: a backslash is ordinary content and the first `"`
    /// always terminates.
    fn double_quoted(&mut self) -> bool {
        self.attempt(|p| {
            let cp = p.checkpoint();
            if !p.eat(b'"') {
                return false;
            }
            let content = p.pos;
            let Some(len) = memchr(b'"', &p.bytes[content..]) else {
                p.reach(p.bytes.len());
                return false;
            };
            p.pos = content + len;
            let text = Span::new(content, p.pos);
            p.eat(b'"');
            p.signal(Rule::AddElement { unescape: false }, text);
            p.complete(Rule::DoubleQuoted, cp);
            true
        })
    }

    /// `SingleQuoted <- '\'' <("\\'" / !'\'' .)*> '\'' AddElement`
    ///
    /// `\'` is always taken as an escaped quote, so a backslash right
    /// before the closing quote swallows it.
    fn single_quoted(&mut self) -> bool {
        self.attempt(|p| {
            let cp = p.checkpoint();
            if !p.eat(b'\'') {
                return false;
            }
            let content = p.pos;
            let mut at = content;
            loop {
                let Some(off) = memchr2(b'\'', b'\\', &p.bytes[at..]) else {
                    p.reach(p.bytes.len());
                    return false;
                };
                at += off;
                if p.bytes[at] == b'\'' {
                    break;
                }
                at += if p.bytes.get(at + 1) == Some(&b'\'') { 2 } else { 1 };
            }
            p.pos = at;
            let text = Span::new(content, p.pos);
            p.eat(b'\'');
            p.signal(Rule::AddElement { unescape: true }, text);
            p.complete(Rule::SingleQuoted, cp);
            true
        })
    }

    /// `RawValue <- <'-'? Digit+ ('.' Digit+)?> AddElement`
    ///
    /// Digits include letters, so bare words land here too. The text is
    /// kept as written.
    fn raw_value(&mut self) -> bool {
        self.attempt(|p| {
            let cp = p.checkpoint();
            p.eat(b'-');
            if !p.digits() {
                return false;
            }
            p.attempt(|p| p.eat(b'.') && p.digits());
            p.signal(Rule::AddElement { unescape: false }, Span::new(cp.pos, p.pos));
            p.complete(Rule::RawValue, cp);
            true
        })
    }
}

// ============================================================================
// Trace
// ============================================================================

/// Successful match: the input plus its post-order token list.
#[derive(Debug, Clone, PartialEq)]
pub struct Trace<'a> {
    input: &'a str,
    tokens: Vec<Token>,
}

impl<'a> Trace<'a> {
    #[inline]
    pub fn input(&self) -> &'a str {
        self.input
    }

    /// Every recorded token, in completion order.
    #[inline]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Semantic signals, in the order the builder must see them.
    pub fn signals(&self) -> impl Iterator<Item = Signal<'a>> + '_ {
        let input = self.input;
        self.tokens.iter().filter_map(move |t| t.signal(input))
    }

    /// Replay the signals into a value.
    pub fn build(&self) -> Result<Value<'a>, ParseError> {
        let mut builder = ValueBuilder::new();
        for signal in self.signals() {
            builder.handle_signal(signal)?;
        }
        Ok(builder.finish()?)
    }

    /// Rebuild the parse tree from the flat trace.
    pub fn tree(&self) -> SpanTree<'a> {
        SpanTree::from_tokens(self.input, &self.tokens)
    }
}
