//! Stochastic value generators for round-trip and variation tests
//!
//! Uses seeded RNG for reproducibility. Print seed on failure for replay.

use std::borrow::Cow;

use complexfield_core::Value;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Seeded generator for reproducible stochastic tests
pub struct Gen {
    pub rng: StdRng,
    pub seed: u64,
}

impl Gen {
    /// Create with specific seed (for reproduction)
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create from environment or random seed
    pub fn from_env_or_random() -> Self {
        let seed = std::env::var("COMPLEXFIELD_TEST_SEED")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(rand::random);
        Self::new(seed)
    }

    /// Geometric distribution: count until rand > alpha
    pub fn geometric(&mut self, alpha: f64) -> usize {
        let mut n = 0;
        while self.rng.gen::<f64>() < alpha {
            n += 1;
        }
        n
    }

    /// Random boolean with probability p
    pub fn chance(&mut self, p: f64) -> bool {
        self.rng.gen::<f64>() < p
    }

    fn pick(&mut self, chars: &[u8]) -> char {
        chars[self.rng.gen_range(0..chars.len())] as char
    }

    /// Bare token matching the raw value rule (`-?[A-Za-z0-9]+(.[A-Za-z0-9]+)?`)
    pub fn raw_token(&mut self) -> String {
        const ALNUM: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCXYZ0123456789";
        let mut s = String::new();
        if self.chance(0.2) {
            s.push('-');
        }
        for _ in 0..1 + self.geometric(0.6) {
            s.push(self.pick(ALNUM));
        }
        if self.chance(0.3) {
            s.push('.');
            for _ in 0..1 + self.geometric(0.5) {
                s.push(self.pick(ALNUM));
            }
        }
        s
    }

    /// Free text that survives serialization: anything except a double
    /// quote and backslashes.
    pub fn text(&mut self) -> String {
        const CHARS: &[u8] = b"abc XYZ 019 ,[]()&*'-.\n;:";
        (0..self.geometric(0.85)).map(|_| self.pick(CHARS)).collect()
    }

    /// Text containing a double quote (forces single quoting).
    pub fn quoted_text(&mut self) -> String {
        let mut s = self.text();
        let at = self.rng.gen_range(0..=s.len());
        s.insert(at, '"');
        s
    }

    /// Text containing a backslash not adjacent to a quote.
    pub fn backslash_text(&mut self) -> String {
        format!("{}\\{}", self.raw_token(), self.raw_token())
    }

    /// Text with a double quote, an escaped-looking `\'` and a lone
    /// backslash, so only single quoting can carry it.
    pub fn escaped_quote_text(&mut self) -> String {
        let mut parts = [
            "\"".to_owned(),
            "\\'".to_owned(),
            "\\".to_owned(),
            self.raw_token(),
            self.text(),
        ];
        parts.shuffle(&mut self.rng);
        let mut s = parts.concat();
        if s.ends_with('\\') {
            s.push_str(&self.raw_token());
        }
        s
    }

    /// Random leaf
    pub fn leaf(&mut self) -> Value<'static> {
        let s = match self.rng.gen_range(0..11) {
            0..=3 => self.raw_token(),
            4..=6 => self.text(),
            7 => self.quoted_text(),
            8 => self.escaped_quote_text(),
            _ => self.backslash_text(),
        };
        Value::Leaf(Cow::Owned(s))
    }

    /// Random list, nesting at most `depth` more levels
    pub fn list(&mut self, depth: usize) -> Value<'static> {
        let len = self.geometric(0.7);
        let items = (0..len)
            .map(|_| {
                if depth > 0 && self.chance(0.25) {
                    self.list(depth - 1)
                } else {
                    self.leaf()
                }
            })
            .collect();
        Value::List(items)
    }

    /// Render a value in a randomly chosen but equivalent surface form:
    /// bracket style, spacing, and quote style vary; structure does not.
    pub fn render(&mut self, value: &Value<'_>) -> String {
        let mut out = String::new();
        self.render_into(value, &mut out);
        out
    }

    fn spaces(&mut self) -> String {
        " ".repeat(self.geometric(0.3))
    }

    fn render_into(&mut self, value: &Value<'_>, out: &mut String) {
        match value {
            Value::Leaf(s) => self.render_leaf(s, out),
            Value::List(items) => {
                let (open, close) = if self.chance(0.5) { ('[', ']') } else { ('(', ')') };
                out.push(open);
                out.push_str(&self.spaces());
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                        out.push_str(&self.spaces());
                    }
                    self.render_into(item, out);
                    out.push_str(&self.spaces());
                }
                out.push(close);
            }
        }
    }

    fn render_leaf(&mut self, s: &str, out: &mut String) {
        let raw_ok = !s.is_empty() && Value::leaf(s).to_string() == s;
        let double_ok = !s.contains('"');
        let single_ok = !s.ends_with('\\');
        if raw_ok && self.chance(0.5) {
            out.push_str(s);
        } else if double_ok && (!single_ok || self.chance(0.5)) {
            out.push('"');
            out.push_str(s);
            out.push('"');
        } else {
            out.push('\'');
            out.push_str(&s.replace('\'', "\\'"));
            out.push('\'');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reproducibility() {
        let mut g1 = Gen::new(42);
        let mut g2 = Gen::new(42);

        for _ in 0..10 {
            assert_eq!(g1.list(3), g2.list(3));
        }
    }

    #[test]
    fn test_escaped_quote_text_needs_single_quotes() {
        let mut gen = Gen::new(3);
        for _ in 0..50 {
            let s = gen.escaped_quote_text();
            assert!(s.contains('"') && s.contains("\\'"));
            assert!(!s.ends_with('\\'));
        }
    }
}
